//! Query execution against a per-call SQLite connection.
//!
//! Each execution opens its own connection, runs exactly one statement, and
//! releases the connection before returning. The outcome is always captured
//! in a [`QueryResult`]; no error escapes this module's boundary.

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Executor, Row as SqlxRow, Sqlite, TypeInfo};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::query::classifier::{classify_statement, StatementKind};
use crate::query::types::{check_database_path, QueryOutcome, QueryRequest, QueryResult, Row, Value};

/// Executes SQL statements against a SQLite database file.
///
/// Holds only the default database path; every call opens and closes its own
/// connection, so executors are cheap to create and safe to share.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    database_path: PathBuf,
}

impl QueryExecutor {
    /// Creates an executor for the given database file.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Returns the default database path.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Executes a single statement and returns its result.
    ///
    /// Never returns an error: validation failures, store access failures,
    /// and engine failures are all reported through the result's outcome.
    pub async fn execute(&self, request: &QueryRequest) -> QueryResult {
        let kind = classify_statement(&request.statement);

        if request.statement.trim().is_empty() {
            return QueryResult::failed(kind, Duration::ZERO, "Statement cannot be empty");
        }

        if let Err(msg) = check_database_path(&request.database_path) {
            return QueryResult::failed(kind, Duration::ZERO, msg);
        }

        debug!(
            kind = kind.as_str(),
            statement_len = request.statement.len(),
            parameter_count = request.parameters.len(),
            "Executing statement"
        );

        let options = SqliteConnectOptions::new().filename(&request.database_path);
        let mut conn = match SqliteConnection::connect_with(&options).await {
            Ok(conn) => conn,
            Err(e) => {
                return QueryResult::failed(
                    kind,
                    Duration::ZERO,
                    format!("Failed to open database: {e}"),
                );
            }
        };

        let result = run_statement(&mut conn, request, kind).await;

        // Connection release is guaranteed: explicit close here, drop on any
        // earlier exit path.
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {e}");
        }

        debug!(
            kind = kind.as_str(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            success = result.is_success(),
            "Statement finished"
        );

        result
    }

    /// Executes a statement string against the executor's default database.
    pub async fn execute_raw(&self, statement: &str) -> QueryResult {
        self.execute(&QueryRequest::new(statement, &self.database_path))
            .await
    }

    /// Executes a parameterized statement against the executor's default database.
    pub async fn execute_with(&self, statement: &str, parameters: Vec<Value>) -> QueryResult {
        self.execute(
            &QueryRequest::new(statement, &self.database_path).with_parameters(parameters),
        )
        .await
    }
}

/// Runs one statement on an open connection and shapes the result by kind.
async fn run_statement(
    conn: &mut SqliteConnection,
    request: &QueryRequest,
    kind: StatementKind,
) -> QueryResult {
    if kind.is_read() {
        run_read(conn, request, kind).await
    } else {
        run_mutation(conn, request, kind).await
    }
}

/// Runs a row-returning statement.
async fn run_read(
    conn: &mut SqliteConnection,
    request: &QueryRequest,
    kind: StatementKind,
) -> QueryResult {
    let query = bind_parameters(sqlx::query(&request.statement), &request.parameters);

    let start = Instant::now();
    let fetched = if request.fetch_all {
        query.fetch_all(&mut *conn).await
    } else {
        query
            .fetch_optional(&mut *conn)
            .await
            .map(|row| row.into_iter().collect())
    };
    let elapsed = start.elapsed();

    let fetched = match fetched {
        Ok(rows) => rows,
        Err(e) => return QueryResult::failed(kind, elapsed, format_engine_error(&e)),
    };

    let columns = match fetched.first() {
        Some(first) => first
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
        // Empty result sets carry no row metadata; recover the column names
        // from the prepared statement, best effort.
        None => describe_columns(conn, &request.statement).await,
    };

    let rows: Vec<Row> = fetched.iter().map(convert_row).collect();

    QueryResult {
        kind,
        elapsed,
        outcome: QueryOutcome::Rows { columns, rows },
    }
}

/// Runs a mutating (or unrecognized) statement inside a transaction.
///
/// Commits on success, rolls back on engine failure, so a statement that
/// fails partway through leaves the store untouched.
async fn run_mutation(
    conn: &mut SqliteConnection,
    request: &QueryRequest,
    kind: StatementKind,
) -> QueryResult {
    let start = Instant::now();

    let mut tx = match conn.begin().await {
        Ok(tx) => tx,
        Err(e) => return QueryResult::failed(kind, start.elapsed(), format_engine_error(&e)),
    };

    let query = bind_parameters(sqlx::query(&request.statement), &request.parameters);
    let executed = query.execute(&mut *tx).await;
    let elapsed = start.elapsed();

    match executed {
        Ok(done) => match tx.commit().await {
            Ok(()) => {
                // A fresh connection reports row id 0 until an insert lands,
                // so zero means the engine reported nothing.
                let last_insert_id = (kind == StatementKind::Insert
                    && done.last_insert_rowid() != 0)
                    .then(|| done.last_insert_rowid());

                QueryResult {
                    kind,
                    elapsed,
                    outcome: QueryOutcome::Affected {
                        rows_affected: done.rows_affected(),
                        last_insert_id,
                    },
                }
            }
            Err(e) => QueryResult::failed(kind, elapsed, format_engine_error(&e)),
        },
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback failed after statement error: {rollback_err}");
            }
            QueryResult::failed(kind, elapsed, format_engine_error(&e))
        }
    }
}

/// Binds positional parameters onto a query, by value type.
fn bind_parameters<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    parameters: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in parameters {
        query = match value {
            Value::Null => query.bind(Option::<i64>::None),
            Value::Bool(b) => query.bind(*b),
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::String(s) => query.bind(s.as_str()),
            Value::Bytes(b) => query.bind(b.as_slice()),
        };
    }
    query
}

/// Recovers column names for an empty result set from statement metadata.
async fn describe_columns(conn: &mut SqliteConnection, statement: &str) -> Vec<String> {
    match conn.describe(statement).await {
        Ok(described) => described
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
        Err(e) => {
            debug!("Could not describe statement for column metadata: {e}");
            Vec::new()
        }
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
fn convert_value(row: &SqliteRow, index: usize, type_name: &str) -> Value {
    match type_name.to_uppercase().as_str() {
        "BOOLEAN" | "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "INTEGER" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        "NULL" => Value::Null,

        // TEXT, DATE, DATETIME, and anything else decode as strings.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

/// Formats an engine error, preferring the database's own message.
fn format_engine_error(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
