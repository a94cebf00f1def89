//! Parameterized statements and the INSERT/UPDATE builders.
//!
//! [`Statement`] stores SQL pieces and argument values separately and renders `$1, $2, ...`
//! placeholders in argument order, so placeholder *k* always binds `args()[k - 1]`.
//!
//! [`build_insert`] and [`build_update`] turn a [`Record`] into a statement using only the
//! record's present fields:
//!
//! ```ignore
//! use biolog::{build_insert, build_update};
//!
//! let user = User { display_name: Some("David Rubin".into()), ..Default::default() };
//!
//! let insert = build_insert("biolog_user", &user)?;
//! assert_eq!(insert.to_sql(), "INSERT INTO biolog_user (display_name) VALUES ($1) RETURNING *");
//!
//! let update = build_update("biolog_user", &user, 42)?;
//! assert_eq!(update.to_sql(), "UPDATE biolog_user SET display_name = $1 WHERE id = $2");
//! ```

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::ident::validate_ident;
use crate::record::{Record, extract_fields};
use crate::row::FromRow;
use crate::value::{ToValue, Value};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Raw(String),
    Param,
}

/// SQL text with positional placeholders plus the ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    parts: Vec<Part>,
    args: Vec<Value>,
}

impl Statement {
    /// Create a new statement with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Raw(initial_sql.into())],
            args: Vec::new(),
        }
    }

    /// Create an empty statement.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(Part::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(Part::Raw(sql.to_string())),
        }
        self
    }

    /// Append a placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(Part::Param);
        self.args.push(value.into());
        self
    }

    /// Append a SQL identifier after checking it is a plain identifier.
    pub fn push_ident(&mut self, ident: &str) -> StoreResult<&mut Self> {
        let ident = validate_ident("Statement::push_ident", ident)?;
        Ok(self.push(ident))
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        let mut idx: usize = 0;

        for part in &self.parts {
            match part {
                Part::Raw(s) => out.push_str(s),
                Part::Param => {
                    idx += 1;
                    use std::fmt::Write;
                    let _ = write!(&mut out, "${}", idx);
                }
            }
        }
        out
    }

    /// Bound arguments in placeholder order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Number of placeholders in the rendered SQL.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Param))
            .count()
    }

    /// Split into rendered SQL and arguments.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.to_sql(), self.args)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    fn prepare(&self) -> StoreResult<String> {
        let placeholders = self.placeholder_count();
        if placeholders != self.args.len() {
            return Err(StoreError::Validation(format!(
                "Statement: {} placeholders but {} args",
                placeholders,
                self.args.len()
            )));
        }
        let sql = self.to_sql();
        tracing::debug!(
            target: "biolog.sql",
            sql = %sql,
            param_count = self.args.len(),
            "executing statement"
        );
        Ok(sql)
    }

    /// Execute and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> StoreResult<Vec<Row>> {
        let sql = self.prepare()?;
        conn.query(&sql, &self.params_ref()).await
    }

    /// Execute and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> StoreResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and return the first row; `NotFound` if there is none.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> StoreResult<Row> {
        let sql = self.prepare()?;
        conn.query_one(&sql, &self.params_ref()).await
    }

    /// Execute and return the first row mapped to `T`; `NotFound` if there is none.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> StoreResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute and return at most one row.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> StoreResult<Option<Row>> {
        let sql = self.prepare()?;
        conn.query_opt(&sql, &self.params_ref()).await
    }

    /// Execute and return at most one row mapped to `T`.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> StoreResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute and return the affected row count.
    pub async fn execute(&self, conn: &impl GenericClient) -> StoreResult<u64> {
        let sql = self.prepare()?;
        conn.execute(&sql, &self.params_ref()).await
    }
}

/// Build `INSERT INTO <table> (...) VALUES (...) RETURNING *` from the present fields of `record`.
///
/// Fails with [`StoreError::EmptyRecord`] when no field is present and with
/// [`StoreError::MalformedRecord`] when a present value cannot be bound.
pub fn build_insert<R: Record + ?Sized>(table: &str, record: &R) -> StoreResult<Statement> {
    let table = validate_ident("build_insert", table)?;
    let fields = extract_fields(record)?;
    if fields.is_empty() {
        return Err(StoreError::empty_record(table));
    }

    let columns: Vec<&str> = fields.iter().map(|f| f.column).collect();
    let mut q = Statement::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        table,
        columns.join(", ")
    ));
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            q.push(", ");
        }
        q.push_bind(field.value);
    }
    q.push(") RETURNING *");
    Ok(q)
}

/// Build `UPDATE <table> SET c = $1, ... WHERE <id column> = $n` from the present fields of
/// `record`.
///
/// Only present fields are written. The row is addressed by `id`; any identifier the record
/// carries is ignored.
pub fn build_update<R, I>(table: &str, record: &R, id: I) -> StoreResult<Statement>
where
    R: Record + ?Sized,
    I: ToValue,
{
    let table = validate_ident("build_update", table)?;
    let id_column = validate_ident("build_update", R::ID_COLUMN)?;
    let fields = extract_fields(record)?;
    if fields.is_empty() {
        return Err(StoreError::empty_record(table));
    }
    let id = id
        .to_value()
        .map_err(|e| StoreError::malformed(id_column, e))?;

    let mut q = Statement::new(format!("UPDATE {table} SET "));
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            q.push(", ");
        }
        q.push(field.column);
        q.push(" = ");
        q.push_bind(field.value);
    }
    q.push(" WHERE ");
    q.push(id_column);
    q.push(" = ");
    q.push_bind(id);
    Ok(q)
}

#[cfg(test)]
mod tests;
