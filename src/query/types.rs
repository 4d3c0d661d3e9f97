//! Request and result types for query execution.
//!
//! Defines the structures used to describe a statement to run and to
//! represent its outcome, uniform across read and write statements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::query::classifier::StatementKind;

/// A request to execute a single SQL statement.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// The SQL statement to execute.
    pub statement: String,

    /// Positional bind values. Never interpolated into the statement text.
    pub parameters: Vec<Value>,

    /// Path to the SQLite database file. Must exist at execution time.
    pub database_path: PathBuf,

    /// Whether to fetch all rows or just the first one (read statements only).
    pub fetch_all: bool,
}

impl QueryRequest {
    /// Creates a request with no parameters that fetches all rows.
    pub fn new(statement: impl Into<String>, database_path: impl Into<PathBuf>) -> Self {
        Self {
            statement: statement.into(),
            parameters: Vec::new(),
            database_path: database_path.into(),
            fetch_all: true,
        }
    }

    /// Sets positional bind parameters.
    pub fn with_parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Limits read statements to the first row.
    pub fn fetch_one(mut self) -> Self {
        self.fetch_all = false;
        self
    }
}

/// Result of executing one statement.
///
/// Always populated, success or failure. The executor never raises past its
/// boundary; engine errors land in [`QueryOutcome::Failed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Statement classification. Computed from the statement prefix, so it is
    /// present even when execution failed.
    pub kind: StatementKind,

    /// Wall-clock time from issuing the statement to completion or failure.
    /// Zero when the statement was never issued (validation failure).
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,

    /// What the statement produced.
    pub outcome: QueryOutcome,
}

/// Statement outcome, shaped by statement kind.
///
/// Read statements produce row sets, mutations produce affected-row counts,
/// and failures carry the engine's error text. The three cases are mutually
/// exclusive by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    /// A row-returning statement. `rows` entries align positionally with
    /// `columns`, preserving declared column order.
    Rows { columns: Vec<String>, rows: Vec<Row> },

    /// A mutating statement. `last_insert_id` is populated only for INSERT
    /// statements that produced a row id.
    Affected {
        rows_affected: u64,
        last_insert_id: Option<i64>,
    },

    /// Validation, store access, or engine failure. Any open transaction was
    /// rolled back before this was produced.
    Failed { error: String },
}

impl QueryResult {
    /// Creates a failed result with the given error text.
    pub fn failed(kind: StatementKind, elapsed: Duration, error: impl Into<String>) -> Self {
        Self {
            kind,
            elapsed,
            outcome: QueryOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns true if the statement executed without error.
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, QueryOutcome::Failed { .. })
    }

    /// Returns the error text, if the statement failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Returns the result rows, for successful read statements.
    pub fn rows(&self) -> Option<&[Row]> {
        match &self.outcome {
            QueryOutcome::Rows { rows, .. } => Some(rows),
            _ => None,
        }
    }

    /// Returns the result column names, for successful read statements.
    pub fn columns(&self) -> Option<&[String]> {
        match &self.outcome {
            QueryOutcome::Rows { columns, .. } => Some(columns),
            _ => None,
        }
    }

    /// Returns the affected-row count, for successful mutating statements.
    pub fn rows_affected(&self) -> Option<u64> {
        match &self.outcome {
            QueryOutcome::Affected { rows_affected, .. } => Some(*rows_affected),
            _ => None,
        }
    }

    /// Returns the generated row id, for INSERT statements that reported one.
    pub fn last_insert_id(&self) -> Option<i64> {
        match &self.outcome {
            QueryOutcome::Affected { last_insert_id, .. } => *last_insert_id,
            _ => None,
        }
    }
}

/// A row of data from a query result, ordered as the result's columns.
pub type Row = Vec<Value>;

/// Represents a single value from a database query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Checks that a database path points at an existing regular file.
pub(crate) fn check_database_path(path: &Path) -> std::result::Result<(), String> {
    if !path.exists() {
        return Err(format!("Database file not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Database path is not a file: {}", path.display()));
    }
    Ok(())
}

/// Serde support for Duration (not natively supported by serde).
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_nanos().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u128::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos as u64))
    }
}
