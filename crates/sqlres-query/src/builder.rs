//! Statement builders
//!
//! A [`StatementBuilder`] renders the four statement kinds into SQL text with
//! named placeholders. It receives the value hash map built beforehand and
//! writes exactly the placeholders found there; clauses whose inputs are
//! absent or empty are left out.

use crate::dialect::Dialect;
use crate::error::{BuildError, Result};
use crate::render::{ExpressionRenderer, RenderContext, SqlExpressionTemplate};
use crate::statement::{DeleteStatement, InsertStatement, Join, SelectStatement, UpdateStatement};
use crate::writer::SqlWriter;
use sqlres_core::{ChangeValue, FieldColumnMap, IgnoreSet, Order, Term, Value, ValueHashMap, normalize};
use std::sync::Arc;
use tracing::trace;

/// Bindings shared by every clause of one statement.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
	pub hash_map: &'a ValueHashMap,
	pub ignore: &'a IgnoreSet,
	pub field_columns: &'a FieldColumnMap,
}

impl<'a> BuildContext<'a> {
	pub fn new(
		hash_map: &'a ValueHashMap,
		ignore: &'a IgnoreSet,
		field_columns: &'a FieldColumnMap,
	) -> Self {
		Self {
			hash_map,
			ignore,
			field_columns,
		}
	}
}

/// Renders statements to SQL text.
pub trait StatementBuilder: Send + Sync {
	fn dialect(&self) -> Dialect;

	fn build_select(&self, stmt: &SelectStatement, ctx: &BuildContext<'_>) -> Result<String>;

	/// Fails with [`BuildError::EmptyInput`] when there are no rows.
	///
	/// The column list is the union of every row's columns. A row lacking one
	/// of them gets `DEFAULT` where the dialect allows it in `VALUES`; on SQLite
	/// it gets an explicit `NULL`, which overrides the column's declared default.
	fn build_insert(&self, stmt: &InsertStatement, ctx: &BuildContext<'_>) -> Result<String>;

	/// Fails with [`BuildError::EmptyInput`] when the change-set is empty.
	fn build_update(&self, stmt: &UpdateStatement, ctx: &BuildContext<'_>) -> Result<String>;

	fn build_delete(&self, stmt: &DeleteStatement, ctx: &BuildContext<'_>) -> Result<String>;
}

/// The statement builder used by the resource models.
///
/// # Examples
///
/// ```
/// use sqlres_core::{ExpressionBinder, FieldColumnMap, Term};
/// use sqlres_query::{BuildContext, Dialect, SelectStatement, SqlStatementBuilder, StatementBuilder};
///
/// let fields = FieldColumnMap::new().with("id", "id").with("age", "user_age");
/// let ignore = fields.field_names();
/// let condition = Term::field("users", "age").gte(Term::literal(20));
/// let hash_map = ExpressionBinder::new().bind(Some(&condition), &ignore).unwrap();
///
/// let stmt = SelectStatement {
///     tables: vec!["users".into()],
///     columns: fields.columns().map(String::from).collect(),
///     condition: Some(condition),
///     ..Default::default()
/// };
/// let sql = SqlStatementBuilder::new(Dialect::Mysql)
///     .build_select(&stmt, &BuildContext::new(&hash_map, &ignore, &fields))
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT `id`, `user_age` FROM `users` WHERE `users`.`user_age` >= :8a707622"
/// );
/// ```
#[derive(Clone)]
pub struct SqlStatementBuilder {
	dialect: Dialect,
	renderer: Arc<dyn ExpressionRenderer>,
}

impl std::fmt::Debug for SqlStatementBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SqlStatementBuilder")
			.field("dialect", &self.dialect)
			.finish_non_exhaustive()
	}
}

impl SqlStatementBuilder {
	pub fn new(dialect: Dialect) -> Self {
		Self::with_renderer(dialect, Arc::new(SqlExpressionTemplate::new()))
	}

	pub fn with_renderer(dialect: Dialect, renderer: Arc<dyn ExpressionRenderer>) -> Self {
		Self { dialect, renderer }
	}

	fn render_ctx<'a>(&self, ctx: &BuildContext<'a>) -> RenderContext<'a> {
		RenderContext::new(self.dialect, ctx.hash_map, ctx.ignore, ctx.field_columns)
	}

	fn write_condition(
		&self,
		w: &mut SqlWriter,
		condition: Option<&Term>,
		ctx: &RenderContext<'_>,
	) -> Result<()> {
		if let Some(condition) = condition {
			w.push_keyword("WHERE");
			w.push_space();
			w.push(&self.renderer.render(condition, ctx)?);
		}
		Ok(())
	}

	fn write_joins(&self, w: &mut SqlWriter, joins: &[Join], ctx: &RenderContext<'_>) -> Result<()> {
		for join in joins {
			w.push_keyword("INNER JOIN");
			w.push_space();
			w.push_qualified(&join.table)?;
			w.push_keyword("ON");
			w.push_space();
			w.push(&self.renderer.render(&join.condition, ctx)?);
		}
		Ok(())
	}

	fn write_ordering(&self, w: &mut SqlWriter, ordering: &[Order], ctx: &RenderContext<'_>) -> Result<()> {
		if ordering.is_empty() {
			return Ok(());
		}
		w.push_keyword("ORDER BY");
		w.push_space();
		w.push_list(ordering, ", ", |w, order| {
			if let Some(entity) = &order.entity {
				w.push_identifier(entity)?;
				w.push(".");
			}
			w.push_identifier(ctx.column(&order.field))?;
			w.push(if order.ascending { " ASC" } else { " DESC" });
			Ok(())
		})
	}

	fn write_limit_offset(&self, w: &mut SqlWriter, limit: Option<u64>, offset: Option<u64>) {
		match (limit, offset) {
			(Some(limit), _) => {
				w.push_keyword("LIMIT");
				w.push_space();
				w.push(&limit.to_string());
			}
			(None, Some(_)) => {
				if let Some(unbounded) = self.dialect.unbounded_limit() {
					w.push_keyword("LIMIT");
					w.push_space();
					w.push(unbounded);
				}
			}
			(None, None) => {}
		}
		if let Some(offset) = offset {
			w.push_keyword("OFFSET");
			w.push_space();
			w.push(&offset.to_string());
		}
	}

	fn write_bound_value(&self, w: &mut SqlWriter, value: &Value, ctx: &RenderContext<'_>) -> Result<()> {
		if value.is_null() {
			w.push("NULL");
			return Ok(());
		}
		match ctx.hash_map.placeholder_of(value) {
			Some(placeholder) => {
				w.push_placeholder(placeholder);
				Ok(())
			}
			None => Err(BuildError::MissingBinding(normalize(value)?)),
		}
	}

	fn check_mutation_clauses(&self, ordering: &[Order], limit: Option<u64>) -> Result<()> {
		if self.dialect.supports_mutation_limit() {
			return Ok(());
		}
		if !ordering.is_empty() {
			return Err(self.unsupported("ORDER BY in UPDATE or DELETE"));
		}
		if limit.is_some() {
			return Err(self.unsupported("LIMIT in UPDATE or DELETE"));
		}
		Ok(())
	}

	fn unsupported(&self, feature: &'static str) -> BuildError {
		BuildError::Unsupported {
			dialect: self.dialect.name(),
			feature,
		}
	}
}

impl StatementBuilder for SqlStatementBuilder {
	fn dialect(&self) -> Dialect {
		self.dialect
	}

	fn build_select(&self, stmt: &SelectStatement, ctx: &BuildContext<'_>) -> Result<String> {
		if stmt.tables.is_empty() {
			return Err(BuildError::EmptyInput(
				"SELECT needs at least one table".to_string(),
			));
		}
		let rctx = self.render_ctx(ctx);
		let mut w = SqlWriter::new(self.dialect);

		w.push("SELECT");
		w.push_space();
		if stmt.columns.is_empty() {
			w.push("*");
		} else {
			w.push_list(&stmt.columns, ", ", |w, c| w.push_qualified(c))?;
		}

		w.push_keyword("FROM");
		w.push_space();
		w.push_list(&stmt.tables, ", ", |w, t| w.push_qualified(t))?;

		self.write_joins(&mut w, &stmt.joins, &rctx)?;
		self.write_condition(&mut w, stmt.condition.as_ref(), &rctx)?;
		self.write_ordering(&mut w, &stmt.ordering, &rctx)?;
		self.write_limit_offset(&mut w, stmt.limit, stmt.offset);

		let sql = w.finish();
		trace!(%sql, "built SELECT");
		Ok(sql)
	}

	fn build_insert(&self, stmt: &InsertStatement, ctx: &BuildContext<'_>) -> Result<String> {
		if stmt.rows.is_empty() {
			return Err(BuildError::EmptyInput(
				"INSERT needs at least one record".to_string(),
			));
		}

		// Union of the columns present in any row, in field/column map order
		let mut columns: Vec<&str> = Vec::new();
		for row in &stmt.rows {
			for column in row.keys() {
				if !columns.contains(&column.as_str()) {
					columns.push(column);
				}
			}
		}
		if columns.is_empty() {
			return Err(BuildError::EmptyInput(
				"INSERT records carry no mapped fields".to_string(),
			));
		}
		columns.sort_by_key(|c| ctx.field_columns.column_position(c).unwrap_or(usize::MAX));

		let rctx = self.render_ctx(ctx);
		// SQLite has no DEFAULT keyword inside VALUES
		let missing = if self.dialect.supports_default_in_values() {
			"DEFAULT"
		} else {
			"NULL"
		};
		let mut w = SqlWriter::new(self.dialect);

		w.push("INSERT INTO");
		w.push_space();
		w.push_qualified(&stmt.table)?;
		w.push(" (");
		w.push_list(&columns, ", ", |w, c| w.push_identifier(c))?;
		w.push(")");
		w.push_keyword("VALUES");
		w.push_space();
		w.push_list(&stmt.rows, ", ", |w, row| {
			w.push("(");
			w.push_list(&columns, ", ", |w, column| match row.get(*column) {
				Some(value) => self.write_bound_value(w, value, &rctx),
				None => {
					w.push(missing);
					Ok(())
				}
			})?;
			w.push(")");
			Ok(())
		})?;

		let sql = w.finish();
		trace!(%sql, "built INSERT");
		Ok(sql)
	}

	fn build_update(&self, stmt: &UpdateStatement, ctx: &BuildContext<'_>) -> Result<String> {
		if stmt.changes.is_empty() {
			return Err(BuildError::EmptyInput(
				"UPDATE change-set has no known fields".to_string(),
			));
		}
		self.check_mutation_clauses(&stmt.ordering, stmt.limit)?;

		let rctx = self.render_ctx(ctx);
		let mut w = SqlWriter::new(self.dialect);

		w.push("UPDATE");
		w.push_space();
		w.push_qualified(&stmt.table)?;
		w.push_keyword("SET");
		w.push_space();
		w.push_list(&stmt.changes, ", ", |w, (column, change)| {
			w.push_identifier(column)?;
			w.push(" = ");
			match change {
				ChangeValue::Value(value) => self.write_bound_value(w, value, &rctx),
				ChangeValue::Term(term) => {
					w.push(&self.renderer.render(term, &rctx)?);
					Ok(())
				}
			}
		})?;

		self.write_condition(&mut w, stmt.condition.as_ref(), &rctx)?;
		self.write_ordering(&mut w, &stmt.ordering, &rctx)?;
		self.write_limit_offset(&mut w, stmt.limit, None);

		let sql = w.finish();
		trace!(%sql, "built UPDATE");
		Ok(sql)
	}

	fn build_delete(&self, stmt: &DeleteStatement, ctx: &BuildContext<'_>) -> Result<String> {
		self.check_mutation_clauses(&stmt.ordering, stmt.limit)?;
		if stmt.offset.is_some() {
			return Err(self.unsupported("OFFSET in DELETE"));
		}

		let rctx = self.render_ctx(ctx);
		let mut w = SqlWriter::new(self.dialect);

		w.push("DELETE FROM");
		w.push_space();
		w.push_qualified(&stmt.table)?;

		self.write_condition(&mut w, stmt.condition.as_ref(), &rctx)?;
		self.write_ordering(&mut w, &stmt.ordering, &rctx)?;
		self.write_limit_offset(&mut w, stmt.limit, None);

		let sql = w.finish();
		trace!(%sql, "built DELETE");
		Ok(sql)
	}
}
