//! Response parsing for LLM outputs.
//!
//! Extracts a SQL statement and an explanation from free-form model text
//! that may contain markdown code fences. This is a heuristic extraction,
//! not a SQL grammar parse; it always produces some result.

/// Result of parsing an LLM response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSql {
    /// The SQL candidate, always terminated with `;`.
    pub sql: String,
    /// Explanatory text following the SQL. May be empty.
    pub explanation: String,
}

/// Extracts a SQL statement and explanation from raw model output.
///
/// The expected shape is the SQL first, a blank line, then the explanation.
/// Responses wrapped in ```sql fences are unwrapped first. When no blank
/// line separates the parts, lines are scanned instead: everything up to and
/// including the first line containing `;` is SQL, the rest is explanation.
///
/// Total: any input yields an `ExtractedSql`, even a degenerate one. A `;`
/// inside a string literal can end the SQL candidate early in the line-scan
/// fallback; garbage in, garbage out — the executor reports the consequence.
pub fn extract_sql(raw: &str) -> ExtractedSql {
    // Remove markdown code fences if present
    let text = strip_code_fences(raw);

    // Split by the first blank line when it yields two non-empty parts
    let (sql, explanation) = match text.split_once("\n\n") {
        Some((head, tail)) if !head.trim().is_empty() && !tail.trim().is_empty() => {
            (head.trim().to_string(), tail.trim().to_string())
        }
        _ => scan_for_terminator(&text),
    };

    // Clean up SQL
    let mut sql = sql.trim().to_string();
    if !sql.ends_with(';') {
        sql.push(';');
    }

    ExtractedSql { sql, explanation }
}

/// Removes ```sql and bare ``` fence markers, keeping their content.
fn strip_code_fences(text: &str) -> String {
    text.replace("```sql\n", "")
        .replace("```sql", "")
        .replace("```\n", "")
        .replace("```", "")
}

/// Accumulates lines into the SQL candidate until one contains `;`.
///
/// All lines before and including the terminator line belong to the SQL;
/// everything after is the explanation. Without a terminator, the whole
/// text is the SQL candidate and the explanation is empty.
fn scan_for_terminator(text: &str) -> (String, String) {
    let mut sql_lines = Vec::new();
    let mut explanation_lines = Vec::new();
    let mut found_terminator = false;

    for line in text.lines() {
        if !found_terminator {
            sql_lines.push(line);
            if line.contains(';') {
                found_terminator = true;
            }
        } else {
            explanation_lines.push(line);
        }
    }

    (
        sql_lines.join("\n").trim().to_string(),
        explanation_lines.join("\n").trim().to_string(),
    )
}
