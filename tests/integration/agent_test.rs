//! Agent pipeline integration tests.
//!
//! Drives the full generate→parse→execute pipeline with deterministic mock
//! clients against a real scratch database.

use askdb::agent::SqlAgent;
use askdb::llm::{FailingLlmClient, MockLlmClient};
use askdb::query::{StatementKind, Value};

use super::common::seed_database;

const SCHEMA: &str = "CREATE TABLE customers (customer_id INTEGER PRIMARY KEY, email TEXT, first_name TEXT, loyalty_points INTEGER);";

#[tokio::test]
async fn test_question_answered_with_rows() {
    let (_dir, path) = seed_database().await;
    let client = MockLlmClient::new().with_response(
        "list the names",
        "SELECT first_name FROM customers ORDER BY customer_id;\n\nLists every customer name.",
    );
    let agent = SqlAgent::new(Box::new(client), &path, SCHEMA);

    let response = agent.ask("Please list the names", true).await;

    assert!(response.is_success());
    assert_eq!(
        response.sql(),
        Some("SELECT first_name FROM customers ORDER BY customer_id;")
    );
    assert_eq!(response.explanation(), Some("Lists every customer name."));

    let execution = response.execution().unwrap();
    assert!(execution.is_success());
    assert_eq!(execution.kind, StatementKind::Select);
    assert_eq!(execution.rows().unwrap().len(), 3);
}

#[tokio::test]
async fn test_explanation_omitted_when_not_requested() {
    let (_dir, path) = seed_database().await;
    let client = MockLlmClient::new()
        .with_response("count", "SELECT COUNT(*) AS n FROM customers;\n\nCounts customers.");
    let agent = SqlAgent::new(Box::new(client), &path, SCHEMA);

    let response = agent.ask("count the customers", false).await;

    assert!(response.is_success());
    assert_eq!(response.explanation(), None);
    let execution = response.execution().unwrap();
    assert_eq!(execution.rows(), Some(&[vec![Value::Int(3)]][..]));
}

#[tokio::test]
async fn test_execution_failure_is_still_an_answered_response() {
    let (_dir, path) = seed_database().await;
    let client = MockLlmClient::new().with_response(
        "broken",
        "SELECT * FROM missing_table;\n\nThis one will not run.",
    );
    let agent = SqlAgent::new(Box::new(client), &path, SCHEMA);

    let response = agent.ask("run the broken query", true).await;

    // Generation succeeded, so the response is a success even though the
    // SQL itself failed; the failure is recorded in the execution result.
    assert!(response.is_success());
    assert_eq!(response.sql(), Some("SELECT * FROM missing_table;"));

    let execution = response.execution().unwrap();
    assert!(!execution.is_success());
    assert!(execution.error().unwrap().contains("missing_table"));
}

#[tokio::test]
async fn test_generation_failure_stops_before_execution() {
    let (_dir, path) = seed_database().await;
    let agent = SqlAgent::new(
        Box::new(FailingLlmClient::new("transport error")),
        &path,
        SCHEMA,
    );

    let response = agent.ask("anything", true).await;

    assert!(!response.is_success());
    assert!(response.error().unwrap().contains("transport error"));
    assert!(response.sql().is_none());
    assert!(response.execution().is_none());
}

#[tokio::test]
async fn test_empty_question_fails_before_any_contact() {
    let (_dir, path) = seed_database().await;
    let agent = SqlAgent::new(
        Box::new(FailingLlmClient::new("must never be called")),
        &path,
        SCHEMA,
    );

    let response = agent.ask("", true).await;

    // The failing client would surface its own error if it had been called.
    assert!(!response.is_success());
    assert!(response.error().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_mutating_answer_reports_affected_rows() {
    let (_dir, path) = seed_database().await;
    let client = MockLlmClient::new().with_response(
        "remove ghost",
        "DELETE FROM orders WHERE order_id = 999;\n\nRemoves the ghost order.",
    );
    let agent = SqlAgent::new(Box::new(client), &path, SCHEMA);

    let response = agent.ask("remove ghost orders", true).await;

    assert!(response.is_success());
    let execution = response.execution().unwrap();
    assert!(execution.is_success());
    assert_eq!(execution.kind, StatementKind::Delete);
    assert_eq!(execution.rows_affected(), Some(0));
}

#[tokio::test]
async fn test_refusal_text_fails_downstream_at_execution() {
    let (_dir, path) = seed_database().await;
    // Default mock fallback is plain prose with no terminator; the parser
    // treats it as the SQL candidate and the executor reports the result.
    let agent = SqlAgent::new(Box::new(MockLlmClient::new()), &path, SCHEMA);

    let response = agent.ask("what is the meaning of life?", true).await;

    assert!(response.is_success());
    let execution = response.execution().unwrap();
    assert!(!execution.is_success());
    assert_eq!(execution.kind, StatementKind::Unrecognized);
}

#[tokio::test]
async fn test_fenced_generation_output_is_unwrapped() {
    let (_dir, path) = seed_database().await;
    let client = MockLlmClient::new().with_response(
        "loyalty",
        "```sql\nSELECT email FROM customers WHERE loyalty_points > 100;\n```\n\nHigh-loyalty customers.",
    );
    let agent = SqlAgent::new(Box::new(client), &path, SCHEMA);

    let response = agent.ask("who has high loyalty?", true).await;

    assert!(response.is_success());
    let execution = response.execution().unwrap();
    assert!(execution.is_success());
    assert_eq!(
        execution.rows(),
        Some(&[vec![Value::String("alice@example.com".to_string())]][..])
    );
}
