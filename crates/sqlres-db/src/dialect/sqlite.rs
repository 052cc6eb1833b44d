//! SQLite executor

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as SqlxRow, Sqlite, SqlitePool, TypeInfo};
use std::sync::Arc;
use tracing::debug;

use crate::{
	error::{DatabaseError, Result},
	executor::QueryExecutor,
	params::compile,
	types::{QueryResult, Row},
};
use sqlres_core::{BoundParams, Value};
use sqlres_query::Dialect;

/// Executes statements on a SQLite pool.
///
/// The layer assumes a single connection; [`SqliteExecutor::connect`] opens a
/// pool capped at one so `sqlite::memory:` databases stay visible across calls.
pub struct SqliteExecutor {
	pool: Arc<SqlitePool>,
}

impl SqliteExecutor {
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			pool: Arc::new(pool),
		}
	}

	pub async fn connect(url: &str) -> Result<Self> {
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect(url)
			.await?;
		Ok(Self::new(pool))
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	fn bind_value<'q>(
		query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
		value: &'q Value,
	) -> Result<sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>> {
		Ok(match value {
			Value::Null => query.bind(None::<i32>),
			Value::Bool(b) => query.bind(b),
			Value::Int(i) => query.bind(i),
			Value::Float(f) => query.bind(f),
			Value::String(s) => query.bind(s),
			Value::Bytes(b) => query.bind(b),
			Value::Timestamp(dt) => query.bind(dt),
			// bound as text, matching the normalized form the placeholder was derived from
			Value::Uuid(u) => query.bind(u.hyphenated().to_string()),
			Value::List(_) | Value::Map(_) => {
				return Err(DatabaseError::TypeError(format!(
					"cannot bind a {} parameter",
					value.type_name()
				)));
			}
		})
	}

	fn prepare<'q>(
		sql: &'q str,
		values: &'q [Value],
	) -> Result<sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>> {
		let mut query = sqlx::query(sql);
		for value in values {
			query = Self::bind_value(query, value)?;
		}
		Ok(query)
	}

	fn convert_row(sqlite_row: SqliteRow) -> Result<Row> {
		let mut row = Row::new();
		for column in sqlite_row.columns() {
			let column_name = column.name();
			let type_name = column.type_info().name().to_uppercase();

			// try_get::<i64> can yield 0 for NULL, so probe the nullable forms first
			let is_null = sqlite_row
				.try_get::<Option<String>, _>(column_name)
				.ok()
				.flatten()
				.is_none() && sqlite_row
				.try_get::<Option<i64>, _>(column_name)
				.ok()
				.flatten()
				.is_none() && sqlite_row
				.try_get::<Option<f64>, _>(column_name)
				.ok()
				.flatten()
				.is_none() && sqlite_row
				.try_get::<Option<Vec<u8>>, _>(column_name)
				.ok()
				.flatten()
				.is_none();

			let value = if is_null {
				Value::Null
			} else if type_name.contains("BOOL") {
				// BOOLEAN columns are stored as 0/1 integers
				match sqlite_row.try_get::<i64, _>(column_name) {
					Ok(v) => Value::Bool(v != 0),
					Err(_) => sqlite_row
						.try_get::<bool, _>(column_name)
						.map_or(Value::Null, Value::Bool),
				}
			} else if let Ok(v) = sqlite_row.try_get::<i64, _>(column_name) {
				Value::Int(v)
			} else if let Ok(v) = sqlite_row.try_get::<f64, _>(column_name) {
				Value::Float(v)
			} else if let Ok(v) = sqlite_row.try_get::<String, _>(column_name) {
				Value::String(v)
			} else if let Ok(v) = sqlite_row.try_get::<Vec<u8>, _>(column_name) {
				Value::Bytes(v)
			} else if let Ok(v) = sqlite_row.try_get::<chrono::DateTime<chrono::Utc>, _>(column_name)
			{
				Value::Timestamp(v)
			} else {
				Value::Null
			};
			row.insert(column_name.to_string(), value);
		}
		Ok(row)
	}
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
	fn dialect(&self) -> Dialect {
		Dialect::Sqlite
	}

	async fn execute(&self, sql: &str, params: &BoundParams) -> Result<QueryResult> {
		let compiled = compile(sql, params, Dialect::Sqlite)?;
		debug!(sql = %compiled.sql, params = compiled.values.len(), "executing statement");

		let result = Self::prepare(&compiled.sql, &compiled.values)?
			.execute(self.pool.as_ref())
			.await?;
		Ok(QueryResult {
			rows_affected: result.rows_affected(),
			last_insert_id: Some(result.last_insert_rowid()),
		})
	}

	async fn fetch_all(&self, sql: &str, params: &BoundParams) -> Result<Vec<Row>> {
		let compiled = compile(sql, params, Dialect::Sqlite)?;
		debug!(sql = %compiled.sql, params = compiled.values.len(), "fetching rows");

		let rows = Self::prepare(&compiled.sql, &compiled.values)?
			.fetch_all(self.pool.as_ref())
			.await?;
		debug!(rows = rows.len(), "fetched rows");
		rows.into_iter().map(Self::convert_row).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use sqlres_core::ValueHashMap;

	async fn executor() -> SqliteExecutor {
		let executor = SqliteExecutor::connect("sqlite::memory:").await.unwrap();
		sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT, flag BOOLEAN, score REAL)")
			.execute(executor.pool())
			.await
			.unwrap();
		executor
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_and_fetch_with_named_params() {
		// Arrange
		let executor = executor().await;
		let mut map = ValueHashMap::new();
		let name = map.insert_value(&Value::from("foo")).unwrap();
		let flag = map.insert_value(&Value::Bool(true)).unwrap();
		let score = map.insert_value(&Value::Float(1.5)).unwrap();
		let params = map.to_params();

		// Act
		let inserted = executor
			.execute(
				&format!("INSERT INTO t (name, flag, score) VALUES ({name}, {flag}, {score})"),
				&params,
			)
			.await
			.unwrap();
		let rows = executor
			.fetch_all(&format!("SELECT * FROM t WHERE name = {name}"), &params)
			.await
			.unwrap();

		// Assert
		assert_eq!(inserted.rows_affected, 1);
		assert_eq!(inserted.last_insert_id, Some(1));
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].get::<i64>("id").unwrap(), 1);
		assert_eq!(rows[0].get::<String>("name").unwrap(), "foo");
		assert_eq!(rows[0].value("flag"), Some(&Value::Bool(true)));
		assert_eq!(rows[0].get::<f64>("score").unwrap(), 1.5);
	}

	#[rstest]
	#[tokio::test]
	async fn test_null_column_reads_as_null() {
		let executor = executor().await;
		executor
			.execute("INSERT INTO t (id) VALUES (7)", &BoundParams::new())
			.await
			.unwrap();

		let rows = executor
			.fetch_all("SELECT name FROM t", &BoundParams::new())
			.await
			.unwrap();

		assert_eq!(rows[0].value("name"), Some(&Value::Null));
	}

	#[rstest]
	#[tokio::test]
	async fn test_unbound_placeholder_never_reaches_driver() {
		let executor = executor().await;

		let err = executor
			.fetch_all("SELECT * FROM t WHERE id = :8a707622", &BoundParams::new())
			.await
			.unwrap_err();

		assert!(matches!(err, DatabaseError::UnboundPlaceholder(_)));
	}
}
