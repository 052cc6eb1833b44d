//! MySQL executor

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, MySql, MySqlPool, Row as SqlxRow};
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

/// Executes statements on a MySQL (or MariaDB) pool.
pub struct MySqlExecutor {
	pool: Arc<MySqlPool>,
}

impl MySqlExecutor {
	pub fn new(pool: MySqlPool) -> Self {
		Self {
			pool: Arc::new(pool),
		}
	}

	pub async fn connect(url: &str) -> Result<Self> {
		let pool = MySqlPoolOptions::new()
			.max_connections(1)
			.connect(url)
			.await?;
		Ok(Self::new(pool))
	}

	pub fn pool(&self) -> &MySqlPool {
		&self.pool
	}

	fn bind_value<'q>(
		query: sqlx::query::Query<'q, MySql, MySqlArguments>,
		value: &'q Value,
	) -> Result<sqlx::query::Query<'q, MySql, MySqlArguments>> {
		Ok(match value {
			Value::Null => query.bind(None::<i32>),
			Value::Bool(b) => query.bind(b),
			Value::Int(i) => query.bind(i),
			Value::Float(f) => query.bind(f),
			Value::String(s) => query.bind(s),
			Value::Bytes(b) => query.bind(b),
			Value::Timestamp(dt) => query.bind(dt),
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
	) -> Result<sqlx::query::Query<'q, MySql, MySqlArguments>> {
		let mut query = sqlx::query(sql);
		for value in values {
			query = Self::bind_value(query, value)?;
		}
		Ok(query)
	}

	fn convert_row(mysql_row: MySqlRow) -> Result<Row> {
		let mut row = Row::new();
		for column in mysql_row.columns() {
			let column_name = column.name();
			let value = if let Ok(None) = mysql_row.try_get::<Option<String>, _>(column_name) {
				Value::Null
			} else if let Ok(v) = mysql_row.try_get::<bool, _>(column_name) {
				Value::Bool(v)
			} else if let Ok(v) = mysql_row.try_get::<i64, _>(column_name) {
				Value::Int(v)
			} else if let Ok(v) = mysql_row.try_get::<i32, _>(column_name) {
				Value::Int(v as i64)
			} else if let Ok(v) = mysql_row.try_get::<f64, _>(column_name) {
				Value::Float(v)
			} else if let Ok(v) = mysql_row.try_get::<String, _>(column_name) {
				Value::String(v)
			} else if let Ok(v) = mysql_row.try_get::<Vec<u8>, _>(column_name) {
				Value::Bytes(v)
			} else if let Ok(v) = mysql_row.try_get::<chrono::NaiveDateTime, _>(column_name) {
				// DATETIME carries no zone
				Value::Timestamp(chrono::DateTime::from_naive_utc_and_offset(v, chrono::Utc))
			} else if let Ok(v) = mysql_row.try_get::<chrono::DateTime<chrono::Utc>, _>(column_name)
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
impl QueryExecutor for MySqlExecutor {
	fn dialect(&self) -> Dialect {
		Dialect::Mysql
	}

	async fn execute(&self, sql: &str, params: &BoundParams) -> Result<QueryResult> {
		let compiled = compile(sql, params, Dialect::Mysql)?;
		debug!(sql = %compiled.sql, params = compiled.values.len(), "executing statement");

		let result = Self::prepare(&compiled.sql, &compiled.values)?
			.execute(self.pool.as_ref())
			.await?;
		Ok(QueryResult {
			rows_affected: result.rows_affected(),
			last_insert_id: i64::try_from(result.last_insert_id()).ok(),
		})
	}

	async fn fetch_all(&self, sql: &str, params: &BoundParams) -> Result<Vec<Row>> {
		let compiled = compile(sql, params, Dialect::Mysql)?;
		debug!(sql = %compiled.sql, params = compiled.values.len(), "fetching rows");

		let rows = Self::prepare(&compiled.sql, &compiled.values)?
			.fetch_all(self.pool.as_ref())
			.await?;
		debug!(rows = rows.len(), "fetched rows");
		rows.into_iter().map(Self::convert_row).collect()
	}
}
