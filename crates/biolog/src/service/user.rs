use super::{delete, fetch_by_id, insert, select_all, update};
use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::ident::Table;
use crate::model::{AuthProvider, ExternalUser, User};
use crate::statement::Statement;

/// Users, their external identities and the providers behind them.
#[derive(Debug, Clone)]
pub struct UserService<C> {
    client: C,
}

impl<C: GenericClient> UserService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// Fetch one user; `NotFound` if the id does not exist.
    pub async fn user(&self, id: i32) -> StoreResult<User> {
        fetch_by_id(&self.client, Table::User, id).await
    }

    pub async fn users(&self) -> StoreResult<Vec<User>> {
        select_all(Table::User).fetch_all_as(&self.client).await
    }

    /// Insert the present fields of `user` and return the stored row.
    pub async fn create_user(&self, user: &User) -> StoreResult<User> {
        insert(&self.client, Table::User, user).await
    }

    /// Write the present fields of `user` to the row `id`.
    pub async fn update_user(&self, id: i32, user: &User) -> StoreResult<u64> {
        update(&self.client, Table::User, id, user).await
    }

    /// Delete a user. Fails with `ForeignKeyViolation` while observations still reference them.
    pub async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        delete(&self.client, Table::User, id).await
    }

    pub async fn ext_user(&self, id: i32) -> StoreResult<ExternalUser> {
        fetch_by_id(&self.client, Table::ExternalUser, id).await
    }

    /// Look up an external identity by the provider's subject id.
    pub async fn ext_user_by_external_id(&self, external_id: &str) -> StoreResult<ExternalUser> {
        let mut q = Statement::new(format!(
            "SELECT * FROM {} WHERE external_id = ",
            Table::ExternalUser
        ));
        q.push_bind(external_id);
        q.fetch_opt_as(&self.client).await?.ok_or_else(|| {
            StoreError::not_found(format!("external user '{external_id}' does not exist"))
        })
    }

    pub async fn create_ext_user(&self, ext_user: &ExternalUser) -> StoreResult<ExternalUser> {
        insert(&self.client, Table::ExternalUser, ext_user).await
    }

    pub async fn delete_ext_user(&self, id: i32) -> StoreResult<u64> {
        delete(&self.client, Table::ExternalUser, id).await
    }

    pub async fn auth_provider(&self, id: i32) -> StoreResult<AuthProvider> {
        fetch_by_id(&self.client, Table::AuthProvider, id).await
    }

    pub async fn auth_providers(&self) -> StoreResult<Vec<AuthProvider>> {
        select_all(Table::AuthProvider)
            .fetch_all_as(&self.client)
            .await
    }
}
