//! The natural-language-to-SQL agent.
//!
//! Orchestrates the full pipeline: build a schema-aware prompt, ask the LLM
//! for SQL, parse its response, execute the statement, and assemble a
//! response record. Each stage's failure is captured in the record; nothing
//! escapes this module as an error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

use crate::llm::{build_prompt, extract_sql, LlmClient};
use crate::query::{QueryExecutor, QueryResult};

/// Agent that converts natural language questions to SQL and runs them.
///
/// The schema text and client handle are fixed at construction; every
/// question is answered against the same store.
pub struct SqlAgent {
    executor: QueryExecutor,
    schema: String,
    client: Box<dyn LlmClient>,
}

impl SqlAgent {
    /// Creates an agent for the given database and schema text.
    pub fn new(
        client: Box<dyn LlmClient>,
        database_path: impl Into<PathBuf>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            executor: QueryExecutor::new(database_path),
            schema: schema.into(),
            client,
        }
    }

    /// Returns the schema text the agent prompts with.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Answers a natural language question.
    ///
    /// A failed generation stops the pipeline and yields a failed response.
    /// A failed *execution* does not: the response is still `Answered`, with
    /// the failure recorded inside its execution result, so callers see what
    /// SQL was tried and why it did not run.
    pub async fn ask(&self, question: &str, include_explanation: bool) -> AgentResponse {
        let question = question.trim();
        if question.is_empty() {
            return AgentResponse::failed(question, "Question cannot be empty");
        }

        let start = Instant::now();
        let prompt = build_prompt(&self.schema, question);

        tracing::debug!(
            question_len = question.len(),
            prompt_len = prompt.len(),
            "Requesting SQL generation"
        );

        let raw = match self.client.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("SQL generation failed: {e}");
                return AgentResponse::failed(question, format!("Failed to generate SQL: {e}"));
            }
        };

        let parsed = extract_sql(&raw);

        tracing::debug!(
            sql_len = parsed.sql.len(),
            has_explanation = !parsed.explanation.is_empty(),
            "Parsed generation response"
        );

        // The executor expects a bare statement without the trailing terminator.
        let execution = self
            .executor
            .execute_raw(parsed.sql.trim_end_matches(';'))
            .await;

        tracing::info!(
            total_duration_ms = start.elapsed().as_millis() as u64,
            execution_ok = execution.is_success(),
            "Question answered"
        );

        let explanation = if include_explanation && !parsed.explanation.is_empty() {
            Some(parsed.explanation)
        } else {
            None
        };

        AgentResponse {
            question: question.to_string(),
            outcome: AgentOutcome::Answered {
                sql: parsed.sql,
                explanation,
                execution,
            },
        }
    }
}

/// Response record for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The original natural language question.
    pub question: String,

    /// How the pipeline ended.
    pub outcome: AgentOutcome,
}

/// Outcome of the generate→execute pipeline.
///
/// `Answered` means generation succeeded; the nested execution result may
/// still report a failure. `Failed` means validation or generation failed
/// before any SQL existed. The two failure axes are deliberately kept
/// separate: a syntactically valid but wrong query still generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentOutcome {
    /// SQL was generated and handed to the executor.
    Answered {
        /// The generated SQL, terminator included.
        sql: String,
        /// Explanation of the SQL, when requested and provided.
        #[serde(skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
        /// Result of executing the generated SQL.
        execution: QueryResult,
    },
    /// The question never made it to execution.
    Failed { error: String },
}

impl AgentResponse {
    /// Creates a failed response with the given error text.
    pub fn failed(question: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            outcome: AgentOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns true if SQL generation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AgentOutcome::Answered { .. })
    }

    /// Returns the generated SQL, if generation succeeded.
    pub fn sql(&self) -> Option<&str> {
        match &self.outcome {
            AgentOutcome::Answered { sql, .. } => Some(sql),
            AgentOutcome::Failed { .. } => None,
        }
    }

    /// Returns the explanation, if one was requested and provided.
    pub fn explanation(&self) -> Option<&str> {
        match &self.outcome {
            AgentOutcome::Answered { explanation, .. } => explanation.as_deref(),
            AgentOutcome::Failed { .. } => None,
        }
    }

    /// Returns the execution result, if generation succeeded.
    pub fn execution(&self) -> Option<&QueryResult> {
        match &self.outcome {
            AgentOutcome::Answered { execution, .. } => Some(execution),
            AgentOutcome::Failed { .. } => None,
        }
    }

    /// Returns the pipeline error, if generation failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AgentOutcome::Answered { .. } => None,
            AgentOutcome::Failed { error } => Some(error),
        }
    }
}
