//! Per-verb resource models
//!
//! Each model runs the same three stages for its verb:
//!
//! 1. bind: build the value hash map from the condition, records or change-set
//! 2. render: hand tables, columns, clauses and the hash map to the statement builder
//! 3. execute: invert the hash map into named parameters and run the SQL
//!
//! The `prepare_*` methods stop after stage 2 and return the
//! [`PreparedStatement`](sqlres_query::PreparedStatement).

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteResourceModel;
pub use insert::InsertResourceModel;
pub use select::SelectResourceModel;
pub use update::UpdateResourceModel;

use crate::executor::QueryExecutor;
use sqlres_core::{ExpressionBinder, FieldColumnMap, Order, Term};
use sqlres_query::{SqlStatementBuilder, StatementBuilder};
use std::sync::Arc;

/// WHERE, ORDER BY, LIMIT and OFFSET inputs of a statement.
///
/// ```
/// use sqlres_core::{Order, Term};
/// use sqlres_db::Clauses;
///
/// let clauses = Clauses::new()
///     .filter(Term::field("users", "age").gte(Term::literal(20)))
///     .order_by(Order::desc("age"))
///     .limit(10);
/// assert_eq!(clauses.limit, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
	pub condition: Option<Term>,
	pub ordering: Vec<Order>,
	pub limit: Option<u64>,
	pub offset: Option<u64>,
}

impl Clauses {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn filter(mut self, condition: Term) -> Self {
		self.condition = Some(condition);
		self
	}

	pub fn order_by(mut self, order: Order) -> Self {
		self.ordering.push(order);
		self
	}

	pub fn limit(mut self, limit: u64) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn offset(mut self, offset: u64) -> Self {
		self.offset = Some(offset);
		self
	}
}

/// Collaborators shared by every model: executor, builder, binder and the
/// field/column map of the resource.
#[derive(Clone)]
pub(crate) struct ResourceBase {
	pub(crate) executor: Arc<dyn QueryExecutor>,
	pub(crate) builder: Arc<dyn StatementBuilder>,
	pub(crate) binder: ExpressionBinder,
	pub(crate) field_columns: FieldColumnMap,
}

impl ResourceBase {
	pub(crate) fn new(executor: Arc<dyn QueryExecutor>, field_columns: FieldColumnMap) -> Self {
		let builder = Arc::new(SqlStatementBuilder::new(executor.dialect()));
		Self {
			executor,
			builder,
			binder: ExpressionBinder::new(),
			field_columns,
		}
	}
}

macro_rules! resource_setters {
	($model:ty) => {
		impl $model {
			/// Replaces the statement builder, e.g. to plug in a custom renderer.
			pub fn with_builder(
				mut self,
				builder: std::sync::Arc<dyn sqlres_query::StatementBuilder>,
			) -> Self {
				self.base.builder = builder;
				self
			}

			pub fn with_binder(mut self, binder: sqlres_core::ExpressionBinder) -> Self {
				self.base.binder = binder;
				self
			}

			pub fn field_columns(&self) -> &sqlres_core::FieldColumnMap {
				&self.base.field_columns
			}
		}
	};
}

pub(crate) use resource_setters;
