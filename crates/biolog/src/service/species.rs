use super::{delete, fetch_by_id, insert, select_all, update};
use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::ident::Table;
use crate::model::{ConservationStatus, Observation, Species};
use crate::statement::Statement;

/// Species, observations of them and conservation statuses.
#[derive(Debug, Clone)]
pub struct SpeciesService<C> {
    client: C,
}

impl<C: GenericClient> SpeciesService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    pub async fn species(&self, id: i32) -> StoreResult<Species> {
        fetch_by_id(&self.client, Table::Species, id).await
    }

    pub async fn all_species(&self) -> StoreResult<Vec<Species>> {
        select_all(Table::Species).fetch_all_as(&self.client).await
    }

    pub async fn create_species(&self, species: &Species) -> StoreResult<Species> {
        insert(&self.client, Table::Species, species).await
    }

    pub async fn update_species(&self, id: i32, species: &Species) -> StoreResult<u64> {
        update(&self.client, Table::Species, id, species).await
    }

    /// Delete a species. Fails with `ForeignKeyViolation` while observations reference it.
    pub async fn delete_species(&self, id: i32) -> StoreResult<u64> {
        delete(&self.client, Table::Species, id).await
    }

    /// Fetch one observation regardless of its visibility.
    pub async fn observation(&self, id: i32) -> StoreResult<Observation> {
        fetch_by_id(&self.client, Table::Observation, id).await
    }

    /// All publicly visible observations.
    pub async fn observations(&self) -> StoreResult<Vec<Observation>> {
        Statement::new(format!(
            "SELECT * FROM {} WHERE public_visibility = TRUE ORDER BY id",
            Table::Observation
        ))
        .fetch_all_as(&self.client)
        .await
    }

    pub async fn create_observation(&self, observation: &Observation) -> StoreResult<Observation> {
        insert(&self.client, Table::Observation, observation).await
    }

    pub async fn update_observation(&self, id: i32, observation: &Observation) -> StoreResult<u64> {
        update(&self.client, Table::Observation, id, observation).await
    }

    pub async fn delete_observation(&self, id: i32) -> StoreResult<u64> {
        delete(&self.client, Table::Observation, id).await
    }

    pub async fn conservation_status(&self, id: i32) -> StoreResult<ConservationStatus> {
        fetch_by_id(&self.client, Table::ConservationStatus, id).await
    }

    pub async fn conservation_statuses(&self) -> StoreResult<Vec<ConservationStatus>> {
        select_all(Table::ConservationStatus)
            .fetch_all_as(&self.client)
            .await
    }
}
