//! Expression rendering
//!
//! Turns a [`Term`] tree into a SQL fragment. The renderer never invents
//! placeholders: every non-null literal that is not an identifier must already
//! be present in the [`ValueHashMap`], otherwise rendering fails with
//! [`BuildError::MissingBinding`].

use crate::dialect::Dialect;
use crate::error::{BuildError, Result};
use crate::writer::SqlWriter;
use sqlres_core::{ExpressionType, FieldColumnMap, IgnoreSet, Term, Value, ValueHashMap, normalize};

/// Everything a renderer needs besides the term itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
	pub dialect: Dialect,
	pub hash_map: &'a ValueHashMap,
	/// Literals rendered as identifiers instead of placeholders
	pub ignore: &'a IgnoreSet,
	/// Translates field names used in terms to column names
	pub field_columns: &'a FieldColumnMap,
}

impl<'a> RenderContext<'a> {
	pub fn new(
		dialect: Dialect,
		hash_map: &'a ValueHashMap,
		ignore: &'a IgnoreSet,
		field_columns: &'a FieldColumnMap,
	) -> Self {
		Self {
			dialect,
			hash_map,
			ignore,
			field_columns,
		}
	}

	/// The column for `field`, or `field` itself when it is not mapped.
	pub fn column<'f>(&self, field: &'f str) -> &'f str
	where
		'a: 'f,
	{
		self.field_columns.column(field).unwrap_or(field)
	}
}

/// Renders an expression tree to SQL text.
pub trait ExpressionRenderer: Send + Sync {
	fn render(&self, term: &Term, ctx: &RenderContext<'_>) -> Result<String>;
}

/// The default renderer.
///
/// | Type | Template | Operands |
/// |---|---|---|
/// | `and`, `or` | `a AND b AND ...` | 1 or more |
/// | `equal_to` .. `less_equal_to`, `like` | `a op b` | 2 |
/// | `in` | `a IN (b, c, ...)` | 2 or more |
/// | `between` | `a BETWEEN b AND c` | 3 |
/// | `is_null` | `a IS NULL` | 1 |
/// | `plus` .. `modulo` | `a op b op ...` | 2 or more |
///
/// A negated expression is wrapped as `NOT (...)`; a negated `is_null`
/// becomes `IS NOT NULL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlExpressionTemplate;

impl SqlExpressionTemplate {
	pub fn new() -> Self {
		Self
	}

	fn write_term(&self, w: &mut SqlWriter, term: &Term, ctx: &RenderContext<'_>) -> Result<()> {
		match term {
			Term::Literal(value) => self.write_literal(w, value, ctx),
			Term::EntityField { entity, field } => {
				if !entity.is_empty() {
					w.push_identifier(entity)?;
					w.push(".");
				}
				w.push_identifier(ctx.column(field))
			}
			Term::Expression {
				kind,
				negated,
				terms,
			} => self.write_expression(w, *kind, *negated, terms, ctx),
		}
	}

	fn write_literal(&self, w: &mut SqlWriter, value: &Value, ctx: &RenderContext<'_>) -> Result<()> {
		if value.is_null() {
			w.push("NULL");
			return Ok(());
		}

		let normalized = normalize(value)?;
		if ctx.ignore.contains(&normalized) {
			return w.push_identifier(ctx.column(&normalized));
		}
		match ctx.hash_map.get(&normalized) {
			Some(placeholder) => {
				w.push_placeholder(placeholder);
				Ok(())
			}
			None => Err(BuildError::MissingBinding(normalized)),
		}
	}

	fn write_expression(
		&self,
		w: &mut SqlWriter,
		kind: ExpressionType,
		negated: bool,
		terms: &[Term],
		ctx: &RenderContext<'_>,
	) -> Result<()> {
		check_arity(kind, terms.len())?;

		if kind == ExpressionType::IsNull {
			self.write_operand(w, kind, &terms[0], ctx)?;
			w.push(if negated { " IS NOT NULL" } else { " IS NULL" });
			return Ok(());
		}

		if negated {
			w.push("NOT (");
		}
		match kind {
			ExpressionType::In => {
				self.write_operand(w, kind, &terms[0], ctx)?;
				w.push(" IN (");
				w.push_list(&terms[1..], ", ", |w, t| self.write_operand(w, kind, t, ctx))?;
				w.push(")");
			}
			ExpressionType::Between => {
				self.write_operand(w, kind, &terms[0], ctx)?;
				w.push(" BETWEEN ");
				self.write_operand(w, kind, &terms[1], ctx)?;
				w.push(" AND ");
				self.write_operand(w, kind, &terms[2], ctx)?;
			}
			_ => {
				let separator = format!(" {} ", operator(kind));
				w.push_list(terms, &separator, |w, t| self.write_operand(w, kind, t, ctx))?;
			}
		}
		if negated {
			w.push(")");
		}
		Ok(())
	}

	/// Writes a child term, parenthesized when it is a composite that would
	/// otherwise bind differently inside `parent`.
	fn write_operand(
		&self,
		w: &mut SqlWriter,
		parent: ExpressionType,
		child: &Term,
		ctx: &RenderContext<'_>,
	) -> Result<()> {
		let wrap = match child {
			Term::Expression { kind, negated, .. } => {
				!*negated && !(is_logical(parent) && is_predicate(*kind))
			}
			_ => false,
		};
		if wrap {
			w.push("(");
			self.write_term(w, child, ctx)?;
			w.push(")");
			Ok(())
		} else {
			self.write_term(w, child, ctx)
		}
	}
}

impl ExpressionRenderer for SqlExpressionTemplate {
	fn render(&self, term: &Term, ctx: &RenderContext<'_>) -> Result<String> {
		let mut writer = SqlWriter::new(ctx.dialect);
		self.write_term(&mut writer, term, ctx)?;
		Ok(writer.finish())
	}
}

fn is_logical(kind: ExpressionType) -> bool {
	matches!(kind, ExpressionType::And | ExpressionType::Or)
}

fn is_predicate(kind: ExpressionType) -> bool {
	matches!(
		kind,
		ExpressionType::EqualTo
			| ExpressionType::NotEqualTo
			| ExpressionType::GreaterThan
			| ExpressionType::GreaterEqualTo
			| ExpressionType::LessThan
			| ExpressionType::LessEqualTo
			| ExpressionType::Like
			| ExpressionType::In
			| ExpressionType::Between
			| ExpressionType::IsNull
	)
}

fn operator(kind: ExpressionType) -> &'static str {
	match kind {
		ExpressionType::And => "AND",
		ExpressionType::Or => "OR",
		ExpressionType::EqualTo => "=",
		ExpressionType::NotEqualTo => "<>",
		ExpressionType::GreaterThan => ">",
		ExpressionType::GreaterEqualTo => ">=",
		ExpressionType::LessThan => "<",
		ExpressionType::LessEqualTo => "<=",
		ExpressionType::Like => "LIKE",
		ExpressionType::Plus => "+",
		ExpressionType::Minus => "-",
		ExpressionType::Multiply => "*",
		ExpressionType::Divide => "/",
		ExpressionType::Modulo => "%",
		ExpressionType::In => "IN",
		ExpressionType::Between => "BETWEEN",
		ExpressionType::IsNull => "IS NULL",
	}
}

fn check_arity(kind: ExpressionType, count: usize) -> Result<()> {
	let ok = match kind {
		ExpressionType::And | ExpressionType::Or => count >= 1,
		ExpressionType::IsNull => count == 1,
		ExpressionType::Between => count == 3,
		ExpressionType::In
		| ExpressionType::Plus
		| ExpressionType::Minus
		| ExpressionType::Multiply
		| ExpressionType::Divide
		| ExpressionType::Modulo => count >= 2,
		_ => count == 2,
	};
	if ok {
		Ok(())
	} else {
		Err(BuildError::InvalidExpression(format!(
			"'{}' cannot take {} operand(s)",
			kind, count
		)))
	}
}
