//! Common test utilities for integration tests.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Statements used to seed the scratch database.
const SEED_STATEMENTS: [&str; 4] = [
    "CREATE TABLE customers (
        customer_id INTEGER PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        first_name TEXT,
        loyalty_points INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE orders (
        order_id INTEGER PRIMARY KEY,
        customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
        total_amount REAL NOT NULL,
        order_status TEXT NOT NULL DEFAULT 'pending'
    )",
    "INSERT INTO customers (email, first_name, loyalty_points) VALUES
        ('alice@example.com', 'Alice', 120),
        ('bob@example.com', 'Bob', 40),
        ('carol@example.com', NULL, 0)",
    "INSERT INTO orders (customer_id, total_amount, order_status) VALUES
        (1, 120.50, 'shipped'),
        (1, 35.00, 'cancelled'),
        (2, 99.99, 'pending')",
];

/// Creates a seeded scratch database.
///
/// Returns the temp directory guard (keep it alive for the test's duration)
/// and the database path.
pub async fn seed_database() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.db");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .expect("failed to create scratch database");

    for statement in SEED_STATEMENTS {
        sqlx::query(statement)
            .execute(&mut conn)
            .await
            .expect("failed to seed scratch database");
    }

    conn.close().await.expect("failed to close seeding connection");

    (dir, path)
}
