//! Database schema loading.
//!
//! The agent prompts with plain schema text. It comes from a schema file
//! when one is available, otherwise from the database itself via
//! `sqlite_master`. The text is embedded verbatim in prompts, never parsed.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{AskdbError, Result};
use crate::query::{QueryExecutor, QueryOutcome, Value};

/// Default schema file locations, tried in order.
const DEFAULT_SCHEMA_CANDIDATES: [&str; 2] = ["data/schema.sql", "schema.sql"];

/// Loads schema text for the executor's database.
///
/// An explicitly given file must be readable; otherwise the default
/// candidate paths are tried, and finally the schema is extracted from the
/// database itself.
pub async fn load_schema(executor: &QueryExecutor, schema_file: Option<&Path>) -> Result<String> {
    if let Some(path) = schema_file {
        return std::fs::read_to_string(path).map_err(|e| {
            AskdbError::config(format!(
                "Failed to read schema file {}: {e}",
                path.display()
            ))
        });
    }

    for candidate in DEFAULT_SCHEMA_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            debug!("Loading schema from {}", path.display());
            return std::fs::read_to_string(path).map_err(|e| {
                AskdbError::config(format!(
                    "Failed to read schema file {}: {e}",
                    path.display()
                ))
            });
        }
    }

    info!(
        "No schema file found, extracting schema from {}",
        executor.database_path().display()
    );
    extract_from_database(executor).await
}

/// Extracts table definitions from the database's `sqlite_master` catalog.
pub async fn extract_from_database(executor: &QueryExecutor) -> Result<String> {
    let result = executor
        .execute_raw("SELECT sql FROM sqlite_master WHERE type='table' ORDER BY name")
        .await;

    match result.outcome {
        QueryOutcome::Rows { rows, .. } => {
            let definitions: Vec<String> = rows
                .into_iter()
                .filter_map(|row| row.into_iter().next())
                .filter_map(|value| match value {
                    Value::String(sql) => Some(format!("{sql};")),
                    _ => None,
                })
                .collect();
            Ok(definitions.join("\n\n"))
        }
        QueryOutcome::Failed { error } => Err(AskdbError::store(format!(
            "Failed to extract schema: {error}"
        ))),
        QueryOutcome::Affected { .. } => Err(AskdbError::internal(
            "Schema extraction query returned no row set",
        )),
    }
}
