//! Terminal rendering of agent responses and query results.
//!
//! Pure string building; callers decide where the text goes. The layout
//! mirrors a plain report: banner-separated sections for the question, the
//! generated SQL, the explanation, and the results table.

use crate::agent::{AgentOutcome, AgentResponse};
use crate::query::{QueryOutcome, QueryResult, Value};

/// Width of banner rules and table separators.
const BANNER_WIDTH: usize = 80;

/// Fixed display width of one table cell.
const CELL_WIDTH: usize = 15;

/// Renders a full agent response as terminal text.
pub fn render_response(response: &AgentResponse, max_rows: usize) -> String {
    let mut out = String::new();

    push_section(&mut out, "QUESTION:", &response.question);

    match &response.outcome {
        AgentOutcome::Failed { error } => {
            push_section(&mut out, "ERROR:", error);
        }
        AgentOutcome::Answered {
            sql,
            explanation,
            execution,
        } => {
            push_section(&mut out, "GENERATED SQL:", sql);

            if let Some(explanation) = explanation {
                push_section(&mut out, "EXPLANATION:", explanation);
            }

            match execution.error() {
                Some(error) => push_section(&mut out, "SQL EXECUTION ERROR:", error),
                None => {
                    push_section(&mut out, "RESULTS:", &render_query_result(execution, max_rows))
                }
            }
        }
    }

    out
}

/// Renders one query result as terminal text.
pub fn render_query_result(result: &QueryResult, max_rows: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Execution time: {:.2}ms\n",
        result.elapsed.as_secs_f64() * 1000.0
    ));
    out.push_str(&format!("Statement kind: {}\n", result.kind));

    match &result.outcome {
        QueryOutcome::Rows { columns, rows } => {
            out.push_str(&format!("Rows returned: {}\n", rows.len()));

            if rows.is_empty() {
                out.push_str("No rows returned\n");
                return out;
            }

            out.push('\n');
            out.push_str(&rule());
            let header: Vec<String> = columns.iter().map(|col| pad_cell(col)).collect();
            out.push_str(&header.join(" | "));
            out.push('\n');
            out.push_str(&rule());

            for row in rows.iter().take(max_rows) {
                let cells: Vec<String> = row.iter().map(format_cell).collect();
                out.push_str(&cells.join(" | "));
                out.push('\n');
            }

            if rows.len() > max_rows {
                out.push_str(&format!("\n... and {} more rows\n", rows.len() - max_rows));
            }
            out.push_str(&rule());
        }
        QueryOutcome::Affected {
            rows_affected,
            last_insert_id,
        } => {
            out.push_str(&format!("Rows affected: {rows_affected}\n"));
            if let Some(id) = last_insert_id {
                out.push_str(&format!("Last inserted row ID: {id}\n"));
            }
        }
        QueryOutcome::Failed { error } => {
            out.push_str(&format!("Error: {error}\n"));
        }
    }

    out
}

/// Appends a banner-titled section.
fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(&"=".repeat(BANNER_WIDTH));
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(BANNER_WIDTH));
    out.push('\n');
    out.push_str(body.trim_end());
    out.push_str("\n\n");
}

/// A horizontal rule for result tables.
fn rule() -> String {
    format!("{}\n", "-".repeat(BANNER_WIDTH))
}

/// Formats one value for a table cell.
fn format_cell(value: &Value) -> String {
    let text = match value {
        Value::Float(f) => format!("{f:.2}"),
        other => other.to_display_string(),
    };
    pad_cell(&text)
}

/// Truncates and left-pads text to the fixed cell width.
fn pad_cell(text: &str) -> String {
    let truncated: String = text.chars().take(CELL_WIDTH).collect();
    format!("{truncated:<CELL_WIDTH$}")
}
