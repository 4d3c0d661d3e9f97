//! Schema loading integration tests.

use std::io::Write as _;

use askdb::query::QueryExecutor;
use askdb::schema::{extract_from_database, load_schema};

use super::common::seed_database;

#[tokio::test]
async fn test_extract_schema_from_database() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let schema = extract_from_database(&executor).await.unwrap();

    assert!(schema.contains("CREATE TABLE customers"));
    assert!(schema.contains("CREATE TABLE orders"));
    assert!(schema.contains(';'));
}

#[tokio::test]
async fn test_extracted_schema_lists_tables_alphabetically() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let schema = extract_from_database(&executor).await.unwrap();

    let customers_at = schema.find("CREATE TABLE customers").unwrap();
    let orders_at = schema.find("CREATE TABLE orders").unwrap();
    assert!(customers_at < orders_at);
}

#[tokio::test]
async fn test_load_schema_prefers_explicit_file() {
    let (_dir, path) = seed_database().await;
    let executor = QueryExecutor::new(&path);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "CREATE TABLE from_file (id INTEGER);").unwrap();

    let schema = load_schema(&executor, Some(file.path())).await.unwrap();

    assert!(schema.contains("from_file"));
    assert!(!schema.contains("CREATE TABLE customers"));
}
