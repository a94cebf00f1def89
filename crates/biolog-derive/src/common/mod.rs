//! Common utilities shared across macro modules.
//!
//! This module provides shared helper functions that are used by both
//! derive macros (Record, FromRow).

pub mod syn_types;
