//! # biolog
//!
//! Postgres storage layer for a species-observation backend.
//!
//! Entities are plain structs whose columns are all optional. A request payload that only
//! carries some fields becomes a record with only those fields present, and the statement
//! builders write exactly those columns:
//!
//! ```ignore
//! use biolog::prelude::*;
//!
//! let patch = Observation { quantity: Some(3), ..Default::default() };
//!
//! // UPDATE observation SET quantity = $1 WHERE id = $2
//! build_update("observation", &patch, 17)?.execute(&client).await?;
//! ```
//!
//! - [`build_insert`] / [`build_update`]: parameterized statements from present fields
//! - [`Record`] / [`FromRow`]: derive macros for entities
//! - [`UserService`] / [`SpeciesService`]: table-level operations over any [`GenericClient`]
//! - [`AppConfig`]: environment-driven settings, [`create_pool`] for pooled connections

extern crate self as biolog;

pub mod client;
pub mod config;
pub mod error;
pub mod ident;
pub mod model;
pub mod prelude;
pub mod record;
pub mod row;
pub mod service;
pub mod statement;
pub mod value;

#[cfg(feature = "pool")]
pub mod pool;

pub use client::GenericClient;
pub use config::{AppConfig, AuthConfig, DatabaseConfig};
pub use error::{ConfigError, StoreError, StoreResult};
pub use ident::Table;
pub use model::{AuthProvider, ConservationStatus, ExternalUser, Observation, Species, User};
pub use record::{Field, Record, extract_fields};
pub use row::{FromRow, RowExt};
pub use service::{SpeciesService, UserService};
pub use statement::{Statement, build_insert, build_update};
pub use value::{ToValue, Value, ValueError};

#[cfg(feature = "pool")]
pub use pool::create_pool;

pub use biolog_derive::{FromRow, Record};

pub use tokio_postgres;
