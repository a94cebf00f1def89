//! Convenient imports for typical `biolog` usage.
//!
//! ```ignore
//! use biolog::prelude::*;
//! ```

pub use crate::{
    AppConfig, FromRow, GenericClient, Record, RowExt, SpeciesService, Statement, StoreError,
    StoreResult, UserService, Value, build_insert, build_update,
};
pub use crate::model::{AuthProvider, ConservationStatus, ExternalUser, Observation, Species, User};

#[cfg(feature = "pool")]
pub use crate::create_pool;
