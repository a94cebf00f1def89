//! SQL identifier checks and the table allow-list.
//!
//! Postgres does not allow identifiers to be parameterized, so table and column names that end
//! up in statement text are restricted to plain identifiers: `[A-Za-z_][A-Za-z0-9_]*`.

use std::fmt;
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};

/// Returns `true` if `s` is a plain, unquoted SQL identifier.
pub fn is_valid_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Validate a single identifier, returning it unchanged.
pub fn validate_ident<'a>(what: &str, s: &'a str) -> StoreResult<&'a str> {
    if s.is_empty() {
        return Err(StoreError::validation(format!("{what}: empty identifier")));
    }
    if !is_valid_ident(s) {
        return Err(StoreError::validation(format!(
            "{what}: invalid identifier '{s}'"
        )));
    }
    Ok(s)
}

/// The tables this backend reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    User,
    ExternalUser,
    AuthProvider,
    Species,
    Observation,
    ConservationStatus,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::User,
        Table::ExternalUser,
        Table::AuthProvider,
        Table::Species,
        Table::Observation,
        Table::ConservationStatus,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Table::User => "biolog_user",
            Table::ExternalUser => "external_user",
            Table::AuthProvider => "external_auth_provider",
            Table::Species => "species",
            Table::Observation => "observation",
            Table::ConservationStatus => "conservation_status",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StoreError::UnknownTable(s.to_string()))
    }
}
