//! Error types for biolog

use thiserror::Error;

/// Result type alias for biolog storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for statement building and database operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A present field has no bindable representation
    #[error("Malformed record field '{field}': {message}")]
    MalformedRecord { field: String, message: String },

    /// A record with no present fields was handed to a statement builder
    #[error("Record for table '{table}' has no fields to write")]
    EmptyRecord { table: String },

    /// Table name outside the known allow-list
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl StoreError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-record error for a specific field
    pub fn malformed(field: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedRecord {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create an empty-record error for a table
    pub fn empty_record(table: impl Into<String>) -> Self {
        Self::EmptyRecord {
            table: table.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if this is a foreign key violation error
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation(_))
    }

    /// Check if this error was raised while building a statement (nothing was executed)
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. } | Self::EmptyRecord { .. } | Self::Validation(_)
        )
    }

    /// Parse a tokio_postgres error into a more specific StoreError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_errors_are_classified() {
        assert!(StoreError::empty_record("species").is_build_error());
        assert!(StoreError::malformed("quantity", "too large").is_build_error());
        assert!(!StoreError::not_found("no species").is_build_error());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = StoreError::malformed("gbif_key", "does not fit");
        assert_eq!(
            err.to_string(),
            "Malformed record field 'gbif_key': does not fit"
        );
        assert_eq!(
            StoreError::empty_record("observation").to_string(),
            "Record for table 'observation' has no fields to write"
        );
    }

    #[test]
    fn config_errors_convert() {
        let err: StoreError = ConfigError::MissingEnvVar("BIOLOG_DB_USER".into()).into();
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: BIOLOG_DB_USER"
        );
    }
}
