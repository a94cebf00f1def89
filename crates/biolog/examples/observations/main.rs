//! Example: record a sighting and patch it with a partial update.
//!
//! Run with:
//!   cargo run --example observations -p biolog
//!
//! Requires the `BIOLOG_DB_*` variables (a `.env` file works) and an existing schema with at
//! least one species and one user.

use biolog::prelude::*;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> StoreResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,biolog.sql=debug")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database)?;
    let client = pool.get().await?;

    let users = UserService::new(&client);
    let catalog = SpeciesService::new(&client);

    let Some(observer) = users.users().await?.into_iter().next() else {
        println!("no users yet; nothing to do");
        return Ok(());
    };
    let Some(species) = catalog.all_species().await?.into_iter().next() else {
        println!("no species yet; nothing to do");
        return Ok(());
    };

    let sighting = Observation {
        sighting_time: Some(Utc::now()),
        sighting_location: Some("46.0569,14.5058".into()),
        quantity: Some(1),
        public_visibility: Some(false),
        user: observer.id,
        species: species.id,
        ..Default::default()
    };
    let created = catalog.create_observation(&sighting).await?;
    let id = created
        .id
        .ok_or_else(|| StoreError::Other("observation has no id".into()))?;
    println!("created observation {id}: {created:?}");

    // Only quantity and visibility are written.
    let patch = Observation {
        quantity: Some(3),
        public_visibility: Some(true),
        ..Default::default()
    };
    let statement = build_update("observation", &patch, id)?;
    println!("{}", statement.to_sql());
    catalog.update_observation(id, &patch).await?;

    let updated = catalog.observation(id).await?;
    println!("updated observation {id}: {updated:?}");

    catalog.delete_observation(id).await?;
    Ok(())
}
