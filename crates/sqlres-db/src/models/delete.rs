use super::{Clauses, ResourceBase, resource_setters};
use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::types::QueryResult;
use sqlres_core::FieldColumnMap;
use sqlres_query::{BuildContext, DeleteStatement, PreparedStatement};
use std::sync::Arc;
use tracing::debug;

/// Deletes the rows of one table matching a condition.
///
/// Without a condition every row is deleted.
#[derive(Clone)]
pub struct DeleteResourceModel {
	base: ResourceBase,
	table: String,
}

resource_setters!(DeleteResourceModel);

impl DeleteResourceModel {
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

	pub fn prepare_delete(&self, clauses: &Clauses) -> Result<PreparedStatement> {
		let base = &self.base;
		let ignore = base.field_columns.field_names();
		let hash_map = base.binder.bind(clauses.condition.as_ref(), &ignore)?;

		let stmt = DeleteStatement {
			table: self.table.clone(),
			condition: clauses.condition.clone(),
			ordering: clauses.ordering.clone(),
			limit: clauses.limit,
			offset: clauses.offset,
		};
		let sql = base.builder.build_delete(
			&stmt,
			&BuildContext::new(&hash_map, &ignore, &base.field_columns),
		)?;
		debug!(%sql, bound = hash_map.len(), "rendered DELETE");

		Ok(PreparedStatement {
			sql,
			params: hash_map.to_params(),
		})
	}

	pub async fn delete(&self, clauses: &Clauses) -> Result<QueryResult> {
		let prepared = self.prepare_delete(clauses)?;
		self.base
			.executor
			.execute(&prepared.sql, &prepared.params)
			.await
	}
}
