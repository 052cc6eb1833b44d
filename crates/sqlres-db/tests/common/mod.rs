//! Shared fixtures for the resource model tests
//!
//! Every test gets its own in-memory SQLite database seeded with:
//!
//! | users (id, user_name, user_age) | linked_accounts (id_1, id_2) | comments (comment_id, user_id, comment) |
//! |---|---|---|
//! | 5, foo, 24                      | 11, 12                       | 84, 11, Hello world!                    |
//! | 11, bar, 30                     | 5, 11                        | 99, 5, Lorem ipsum                      |
//! | 12, lorem, 19                   |                              | 111, 12, Foobar                         |

#![allow(dead_code)]

use rstest::fixture;
use sqlres_core::FieldColumnMap;
use sqlres_db::{Row, SqliteExecutor};
use std::sync::Arc;

const SCHEMA: &[&str] = &[
	"CREATE TABLE users (id INTEGER PRIMARY KEY, user_name TEXT, user_age INTEGER)",
	"CREATE TABLE linked_accounts (id_1 INTEGER NOT NULL, id_2 INTEGER NOT NULL)",
	"CREATE TABLE comments (comment_id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL, comment TEXT)",
	"INSERT INTO users (id, user_name, user_age) VALUES (5, 'foo', 24), (11, 'bar', 30), (12, 'lorem', 19)",
	"INSERT INTO linked_accounts (id_1, id_2) VALUES (11, 12), (5, 11)",
	"INSERT INTO comments (comment_id, user_id, comment) VALUES (84, 11, 'Hello world!'), (99, 5, 'Lorem ipsum'), (111, 12, 'Foobar')",
];

/// rstest fixture providing a seeded single-connection SQLite executor
#[fixture]
pub async fn database() -> Arc<SqliteExecutor> {
	let executor = SqliteExecutor::connect("sqlite::memory:")
		.await
		.expect("Failed to open in-memory SQLite database");
	for statement in SCHEMA {
		sqlx::query(statement)
			.execute(executor.pool())
			.await
			.expect("Failed to seed test database");
	}
	Arc::new(executor)
}

/// Field/column map of the `users` resource
#[fixture]
pub fn users_fields() -> FieldColumnMap {
	FieldColumnMap::new()
		.with("id", "id")
		.with("name", "user_name")
		.with("age", "user_age")
}

/// Reads the `id` column of every row.
pub fn ids(rows: &[Row]) -> Vec<i64> {
	rows.iter()
		.map(|row| row.get::<i64>("id").expect("row has no integer id"))
		.collect()
}

/// Reads `(id, user_name, user_age)` straight from the pool, ordered by id.
pub async fn users_table(executor: &SqliteExecutor) -> Vec<(i64, Option<String>, Option<i64>)> {
	sqlx::query_as("SELECT id, user_name, user_age FROM users ORDER BY id")
		.fetch_all(executor.pool())
		.await
		.expect("Failed to read users table")
}
