//! Statement classification by keyword prefix.
//!
//! Determines the kind of a SQL statement from its leading keyword, so the
//! executor can pick the right result shape without parsing SQL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of SQL statement, derived from the statement's first keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    /// Anything whose first keyword is not in the recognized set.
    Unrecognized,
}

/// Recognized keywords, checked in declaration order.
const KEYWORDS: [(&str, StatementKind); 7] = [
    ("SELECT", StatementKind::Select),
    ("INSERT", StatementKind::Insert),
    ("UPDATE", StatementKind::Update),
    ("DELETE", StatementKind::Delete),
    ("CREATE", StatementKind::Create),
    ("DROP", StatementKind::Drop),
    ("ALTER", StatementKind::Alter),
];

impl StatementKind {
    /// Returns the kind as an uppercase keyword string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Returns true for the row-returning kind.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a SQL statement by its first keyword.
///
/// Leading whitespace and SQL comments are skipped before matching. Only the
/// statement prefix is inspected; keywords appearing later in the text (or
/// inside identifiers such as `createdAt`) never affect the result.
pub fn classify_statement(sql: &str) -> StatementKind {
    let head = strip_leading_trivia(sql);

    // Longest keyword is six characters; uppercasing a short prefix is enough.
    let prefix: String = head.chars().take(8).collect::<String>().to_uppercase();

    for (keyword, kind) in KEYWORDS {
        if prefix.starts_with(keyword) {
            return kind;
        }
    }

    StatementKind::Unrecognized
}

/// Skips leading whitespace, `--` line comments, and `/* */` block comments.
fn strip_leading_trivia(sql: &str) -> &str {
    let mut rest = sql.trim_start();

    loop {
        if let Some(after) = rest.strip_prefix("--") {
            match after.find('\n') {
                Some(idx) => rest = after[idx + 1..].trim_start(),
                None => return "",
            }
        } else if let Some(after) = rest.strip_prefix("/*") {
            match after.find("*/") {
                Some(idx) => rest = after[idx + 2..].trim_start(),
                None => return "",
            }
        } else {
            return rest;
        }
    }
}
