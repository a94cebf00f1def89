//! Data-access services for users and species observations.
//!
//! Services are generic over [`GenericClient`], so the same service runs against a direct
//! connection, a pooled connection or an open transaction:
//!
//! ```ignore
//! let client = pool.get().await?;
//! let users = UserService::new(&client);
//! let created = users.create_user(&User { display_name: Some("David Rubin".into()), ..Default::default() }).await?;
//! ```

mod species;
mod user;

pub use species::SpeciesService;
pub use user::UserService;

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::ident::Table;
use crate::record::Record;
use crate::row::FromRow;
use crate::statement::{Statement, build_insert, build_update};

fn select_all(table: Table) -> Statement {
    Statement::new(format!("SELECT * FROM {table} ORDER BY id"))
}

fn select_by_id(table: Table, id: i32) -> Statement {
    let mut q = Statement::new(format!("SELECT * FROM {table} WHERE id = "));
    q.push_bind(id);
    q
}

async fn fetch_by_id<T: FromRow>(conn: &impl GenericClient, table: Table, id: i32) -> StoreResult<T> {
    select_by_id(table, id)
        .fetch_opt_as(conn)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("{table} with id {id} does not exist")))
}

async fn insert<R, T>(conn: &impl GenericClient, table: Table, record: &R) -> StoreResult<T>
where
    R: Record + ?Sized,
    T: FromRow,
{
    let created: T = build_insert(table.as_str(), record)?.fetch_one_as(conn).await?;
    tracing::info!(table = %table, "row inserted");
    Ok(created)
}

async fn update<R>(conn: &impl GenericClient, table: Table, id: i32, record: &R) -> StoreResult<u64>
where
    R: Record + ?Sized,
{
    let affected = build_update(table.as_str(), record, id)?.execute(conn).await?;
    if affected == 0 {
        tracing::warn!(table = %table, id, "update matched no rows");
        return Err(StoreError::not_found(format!("{table} with id {id} does not exist")));
    }
    tracing::info!(table = %table, id, affected, "row updated");
    Ok(affected)
}

async fn delete(conn: &impl GenericClient, table: Table, id: i32) -> StoreResult<u64> {
    let mut q = Statement::new(format!("DELETE FROM {table} WHERE id = "));
    q.push_bind(id);
    let affected = q.execute(conn).await?;
    if affected == 0 {
        tracing::warn!(table = %table, id, "delete matched no rows");
    } else {
        tracing::info!(table = %table, id, affected, "row deleted");
    }
    Ok(affected)
}
