use super::{Clauses, ResourceBase, resource_setters};
use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::types::Row;
use sqlres_core::{FieldColumnMap, Value};
use sqlres_query::{BuildContext, Join, PreparedStatement, SelectStatement};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Reads rows of one or more tables.
///
/// The selected columns are the columns of the field/column map. Conditions
/// are bound with the field names as the ignore set, so a literal equal to a
/// field name renders as that field's column.
#[derive(Clone)]
pub struct SelectResourceModel {
	base: ResourceBase,
	tables: Vec<String>,
	joins: Vec<Join>,
}

resource_setters!(SelectResourceModel);

impl SelectResourceModel {
	pub fn new(
		executor: Arc<dyn QueryExecutor>,
		tables: Vec<String>,
		field_columns: FieldColumnMap,
	) -> Self {
		Self {
			base: ResourceBase::new(executor, field_columns),
			tables,
			joins: Vec::new(),
		}
	}

	/// Adds `INNER JOIN` clauses.
	pub fn with_joins(mut self, joins: Vec<Join>) -> Self {
		self.joins.extend(joins);
		self
	}

	pub fn prepare_select(&self, clauses: &Clauses) -> Result<PreparedStatement> {
		let base = &self.base;
		let ignore = base.field_columns.field_names();

		let mut hash_map = base.binder.bind(clauses.condition.as_ref(), &ignore)?;
		for join in &self.joins {
			base.binder
				.bind_into(&join.condition, &ignore, &mut hash_map)?;
		}
		debug!(bound = hash_map.len(), "bound SELECT values");

		let stmt = SelectStatement {
			tables: self.tables.clone(),
			columns: base.field_columns.columns().map(String::from).collect(),
			joins: self.joins.clone(),
			condition: clauses.condition.clone(),
			ordering: clauses.ordering.clone(),
			limit: clauses.limit,
			offset: clauses.offset,
		};
		let sql = base.builder.build_select(
			&stmt,
			&BuildContext::new(&hash_map, &ignore, &base.field_columns),
		)?;
		debug!(%sql, "rendered SELECT");

		Ok(PreparedStatement {
			sql,
			params: hash_map.to_params(),
		})
	}

	/// Runs the SELECT; each row is keyed by column name.
	pub async fn select(&self, clauses: &Clauses) -> Result<Vec<Row>> {
		let prepared = self.prepare_select(clauses)?;
		self.base
			.executor
			.fetch_all(&prepared.sql, &prepared.params)
			.await
	}

	/// Runs the SELECT and translates every row back to field names.
	///
	/// Columns without a field in the map are left out.
	pub async fn select_fields(&self, clauses: &Clauses) -> Result<Vec<IndexMap<String, Value>>> {
		let rows = self.select(clauses).await?;
		Ok(rows
			.into_iter()
			.map(|row| row.into_fields(&self.base.field_columns))
			.collect())
	}
}
