use super::{Clauses, ResourceBase, resource_setters};
use crate::error::{DatabaseError, Result};
use crate::executor::QueryExecutor;
use crate::types::QueryResult;
use sqlres_core::{ChangeValue, FieldColumnMap, preprocess_change_set};
use sqlres_query::{BuildContext, PreparedStatement, UpdateStatement};
use std::sync::Arc;
use tracing::debug;

/// Applies a field-keyed change-set to the rows of one table.
///
/// Change values may be plain values or terms such as
/// `Term::literal("age").plus(Term::literal(1))`; inside a term a literal
/// equal to a field name refers to that field's column.
#[derive(Clone)]
pub struct UpdateResourceModel {
	base: ResourceBase,
	table: String,
}

resource_setters!(UpdateResourceModel);

impl UpdateResourceModel {
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

	/// Preprocesses the change-set, binds the condition into the same hash map
	/// and renders the UPDATE.
	///
	/// UPDATE has no OFFSET; a non-empty `clauses.offset` is rejected.
	pub fn prepare_update<I, K>(&self, change_set: I, clauses: &Clauses) -> Result<PreparedStatement>
	where
		I: IntoIterator<Item = (K, ChangeValue)>,
		K: AsRef<str>,
	{
		if clauses.offset.is_some() {
			return Err(DatabaseError::NotSupported("OFFSET in UPDATE".to_string()));
		}
		let base = &self.base;
		let ignore = base.field_columns.field_names();

		let (changes, mut hash_map) =
			preprocess_change_set(change_set, &base.field_columns, &base.binder)?;
		if let Some(condition) = &clauses.condition {
			base.binder.bind_into(condition, &ignore, &mut hash_map)?;
		}
		debug!(bound = hash_map.len(), "bound UPDATE values");

		let stmt = UpdateStatement {
			table: self.table.clone(),
			changes,
			condition: clauses.condition.clone(),
			ordering: clauses.ordering.clone(),
			limit: clauses.limit,
		};
		let sql = base.builder.build_update(
			&stmt,
			&BuildContext::new(&hash_map, &ignore, &base.field_columns),
		)?;
		debug!(%sql, "rendered UPDATE");

		Ok(PreparedStatement {
			sql,
			params: hash_map.to_params(),
		})
	}

	/// Runs the UPDATE and reports the affected row count.
	pub async fn update<I, K>(&self, change_set: I, clauses: &Clauses) -> Result<QueryResult>
	where
		I: IntoIterator<Item = (K, ChangeValue)>,
		K: AsRef<str>,
	{
		let prepared = self.prepare_update(change_set, clauses)?;
		self.base
			.executor
			.execute(&prepared.sql, &prepared.params)
			.await
	}
}
