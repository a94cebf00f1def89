//! Connection pool utilities

use crate::config::DatabaseConfig;
use crate::error::{StoreError, StoreResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from database settings.
///
/// # Example
///
/// ```ignore
/// let config = biolog::AppConfig::from_env()?;
/// let pool = biolog::create_pool(&config.database)?;
/// let client = pool.get().await?;
/// ```
pub fn create_pool(config: &DatabaseConfig) -> StoreResult<Pool> {
    let mgr = Manager::from_config(config.to_pg_config(), NoTls, default_manager_config());
    let pool = Pool::builder(mgr)
        .max_size(config.pool_size)
        .build()
        .map_err(|e| StoreError::Pool(e.to_string()))?;

    tracing::info!(
        target: "biolog.sql",
        host = %config.host,
        dbname = %config.dbname,
        max_size = config.pool_size,
        "connection pool created"
    );
    Ok(pool)
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
