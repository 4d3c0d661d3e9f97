//! Query execution integration tests.
//!
//! Exercises the executor against a real SQLite database: result shaping by
//! statement kind, parameter binding, transaction rollback, and the
//! validation paths.

use askdb::query::{QueryExecutor, QueryOutcome, QueryRequest, StatementKind, Value};

use super::common::seed_database;

#[tokio::test]
async fn test_select_constant() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("SELECT 1 AS x").await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Select);
    assert_eq!(result.columns(), Some(&["x".to_string()][..]));
    assert_eq!(result.rows(), Some(&[vec![Value::Int(1)]][..]));
}

#[tokio::test]
async fn test_select_rows_match_columns_in_order() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("SELECT customer_id, email FROM customers ORDER BY customer_id")
        .await;

    assert!(result.is_success());
    let columns = result.columns().unwrap();
    assert_eq!(columns, &["customer_id".to_string(), "email".to_string()]);

    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row.len(), columns.len());
    }
    assert_eq!(rows[0][0], Value::Int(1));
    assert_eq!(rows[0][1], Value::String("alice@example.com".to_string()));
}

#[tokio::test]
async fn test_select_null_value() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("SELECT first_name FROM customers WHERE email = 'carol@example.com'")
        .await;

    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0][0].is_null());
}

#[tokio::test]
async fn test_select_empty_result_still_reports_columns() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("SELECT customer_id, email FROM customers WHERE 1 = 0")
        .await;

    assert!(result.is_success());
    assert_eq!(result.rows().unwrap().len(), 0);
    assert_eq!(
        result.columns(),
        Some(&["customer_id".to_string(), "email".to_string()][..])
    );
}

#[tokio::test]
async fn test_fetch_one_limits_to_first_row() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let request = QueryRequest::new(
        "SELECT email FROM customers ORDER BY customer_id",
        &path,
    )
    .fetch_one();
    let result = executor.execute(&request).await;

    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::String("alice@example.com".to_string()));
}

#[tokio::test]
async fn test_parameter_binding() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_with(
            "SELECT email FROM customers WHERE customer_id = ?",
            vec![Value::Int(2)],
        )
        .await;

    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::String("bob@example.com".to_string()));
}

#[tokio::test]
async fn test_update_matching_nothing_affects_zero_rows() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("UPDATE customers SET loyalty_points = 1 WHERE 0")
        .await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Update);
    assert_eq!(result.rows_affected(), Some(0));
    assert!(result.rows().is_none());
    assert!(result.columns().is_none());
}

#[tokio::test]
async fn test_insert_reports_last_insert_id() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("INSERT INTO customers (email, first_name) VALUES ('dave@example.com', 'Dave')")
        .await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Insert);
    assert_eq!(result.rows_affected(), Some(1));
    assert_eq!(result.last_insert_id(), Some(4));
}

#[tokio::test]
async fn test_update_does_not_report_insert_id() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("UPDATE customers SET loyalty_points = 50 WHERE customer_id = 2")
        .await;

    assert_eq!(result.rows_affected(), Some(1));
    assert_eq!(result.last_insert_id(), None);
}

#[tokio::test]
async fn test_delete_reports_affected_rows() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("DELETE FROM orders WHERE order_status = 'cancelled'")
        .await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Delete);
    assert_eq!(result.rows_affected(), Some(1));
}

#[tokio::test]
async fn test_create_table_succeeds_with_affected_shape() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor
        .execute_raw("CREATE TABLE notes (note_id INTEGER PRIMARY KEY, body TEXT)")
        .await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Create);
    assert!(matches!(result.outcome, QueryOutcome::Affected { .. }));
}

#[tokio::test]
async fn test_unrecognized_statement_still_executes() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("PRAGMA user_version = 1").await;

    assert!(result.is_success());
    assert_eq!(result.kind, StatementKind::Unrecognized);
    assert!(matches!(result.outcome, QueryOutcome::Affected { .. }));
}

#[tokio::test]
async fn test_syntax_error_is_captured_not_raised() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("SELEC * FROM customers").await;

    assert!(!result.is_success());
    assert_eq!(result.kind, StatementKind::Unrecognized);
    let error = result.error().unwrap().to_lowercase();
    assert!(error.contains("syntax") || error.contains("error"));
}

#[tokio::test]
async fn test_select_from_missing_table_fails() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("SELECT * FROM nonexistent_table_xyz").await;

    assert!(!result.is_success());
    assert_eq!(result.kind, StatementKind::Select);
    assert!(result.error().unwrap().contains("nonexistent_table_xyz"));
}

#[tokio::test]
async fn test_failed_statement_does_not_partially_commit() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    // Updating every row to the same email violates the unique constraint
    // after the first row; none of the rows may keep the new value.
    let result = executor
        .execute_raw("UPDATE customers SET email = 'dup@example.com'")
        .await;
    assert!(!result.is_success());

    let check = executor
        .execute_raw("SELECT COUNT(*) AS n FROM customers WHERE email = 'dup@example.com'")
        .await;
    assert_eq!(check.rows(), Some(&[vec![Value::Int(0)]][..]));
}

#[tokio::test]
async fn test_missing_database_file() {
    let executor = QueryExecutor::new("definitely-not-here.db");

    let result = executor.execute_raw("SELECT 1").await;

    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_empty_statement_is_rejected() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("   \n  ").await;

    assert!(!result.is_success());
    assert!(result.error().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_execution_time_recorded() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("SELECT * FROM customers").await;

    assert!(result.is_success());
    assert!(!result.elapsed.is_zero(), "Expected non-zero execution time");
}

#[tokio::test]
async fn test_elapsed_recorded_on_failure() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let result = executor.execute_raw("SELECT * FROM nonexistent_table_xyz").await;

    assert!(!result.is_success());
    assert!(!result.elapsed.is_zero());
}
