use super::{ResourceBase, resource_setters};
use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::types::QueryResult;
use sqlres_core::{FieldColumnMap, IgnoreSet, RecordSource, preprocess_records};
use sqlres_query::{BuildContext, InsertStatement, PreparedStatement};
use std::sync::Arc;
use tracing::debug;

/// Inserts a batch of records into one table with a single statement.
///
/// Every row of the statement lists the same columns. On SQLite a field that
/// some records carry and others omit is written as `NULL` for the latter, so
/// the column default does not apply to them. Insert such records in separate
/// batches when the default matters.
#[derive(Clone)]
pub struct InsertResourceModel {
	base: ResourceBase,
	table: String,
}

resource_setters!(InsertResourceModel);

impl InsertResourceModel {
	pub fn new(
		executor: Arc<dyn QueryExecutor>,
		table: impl Into<String>,
		field_columns: FieldColumnMap,
	) -> Self {
		Self {
			base: ResourceBase::new(executor, field_columns),
			table: table.into(),
		}
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	/// Preprocesses `records` and renders the INSERT.
	///
	/// An empty batch fails with
	/// [`BuildError::EmptyInput`](sqlres_query::BuildError::EmptyInput).
	pub fn prepare_insert<I>(&self, records: I) -> Result<PreparedStatement>
	where
		I: IntoIterator,
		I::Item: RecordSource,
	{
		let base = &self.base;
		let (rows, hash_map) = preprocess_records(records, &base.field_columns)?;

		let stmt = InsertStatement {
			table: self.table.clone(),
			rows,
		};
		// record values are always bound, never rendered as identifiers
		let ignore = IgnoreSet::new();
		let sql = base.builder.build_insert(
			&stmt,
			&BuildContext::new(&hash_map, &ignore, &base.field_columns),
		)?;
		debug!(%sql, rows = stmt.rows.len(), "rendered INSERT");

		Ok(PreparedStatement {
			sql,
			params: hash_map.to_params(),
		})
	}

	/// Inserts `records`; the result carries the driver's last insert id.
	pub async fn insert<I>(&self, records: I) -> Result<QueryResult>
	where
		I: IntoIterator,
		I::Item: RecordSource,
	{
		let prepared = self.prepare_insert(records)?;
		self.base
			.executor
			.execute(&prepared.sql, &prepared.params)
			.await
	}
}
