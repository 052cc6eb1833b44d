//! Expression tree nodes
//!
//! A [`Term`] is a literal value, a reference to an entity field, or a
//! composite expression over child terms. Terms are plain data: they derive
//! serde traits so conditions can be read from JSON or TOML, e.g.
//!
//! ```json
//! {"expression": {"type": "greater_equal_to", "terms": [
//!     {"entity_field": {"entity": "users", "field": "age"}},
//!     {"literal": 20}
//! ]}}
//! ```

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator of a composite [`Term::Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionType {
	And,
	Or,
	#[serde(alias = "equals")]
	EqualTo,
	NotEqualTo,
	GreaterThan,
	GreaterEqualTo,
	LessThan,
	LessEqualTo,
	Like,
	In,
	Between,
	IsNull,
	Plus,
	Minus,
	Multiply,
	Divide,
	Modulo,
}

impl ExpressionType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ExpressionType::And => "and",
			ExpressionType::Or => "or",
			ExpressionType::EqualTo => "equal_to",
			ExpressionType::NotEqualTo => "not_equal_to",
			ExpressionType::GreaterThan => "greater_than",
			ExpressionType::GreaterEqualTo => "greater_equal_to",
			ExpressionType::LessThan => "less_than",
			ExpressionType::LessEqualTo => "less_equal_to",
			ExpressionType::Like => "like",
			ExpressionType::In => "in",
			ExpressionType::Between => "between",
			ExpressionType::IsNull => "is_null",
			ExpressionType::Plus => "plus",
			ExpressionType::Minus => "minus",
			ExpressionType::Multiply => "multiply",
			ExpressionType::Divide => "divide",
			ExpressionType::Modulo => "modulo",
		}
	}
}

impl fmt::Display for ExpressionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A node in an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
	/// A value supplied by the caller
	Literal(Value),

	/// A field of a table or entity, e.g. `users.age`
	EntityField {
		#[serde(default)]
		entity: String,
		field: String,
	},

	/// An operator applied to ordered child terms
	Expression {
		#[serde(rename = "type")]
		kind: ExpressionType,
		#[serde(default)]
		negated: bool,
		terms: Vec<Term>,
	},
}

impl Term {
	pub fn literal(value: impl Into<Value>) -> Self {
		Term::Literal(value.into())
	}

	/// A field reference qualified by `entity`.
	pub fn field(entity: impl Into<String>, field: impl Into<String>) -> Self {
		Term::EntityField {
			entity: entity.into(),
			field: field.into(),
		}
	}

	/// A composite expression that is not negated.
	pub fn expr(kind: ExpressionType, terms: Vec<Term>) -> Self {
		Term::Expression {
			kind,
			negated: false,
			terms,
		}
	}

	/// Flips the negation flag of an expression.
	///
	/// Literals and field references have no negated form and are returned as is.
	pub fn negate(self) -> Self {
		match self {
			Term::Expression {
				kind,
				negated,
				terms,
			} => Term::Expression {
				kind,
				negated: !negated,
				terms,
			},
			other => other,
		}
	}

	pub fn and(self, other: Term) -> Self {
		Term::expr(ExpressionType::And, vec![self, other])
	}

	pub fn or(self, other: Term) -> Self {
		Term::expr(ExpressionType::Or, vec![self, other])
	}

	pub fn equals(self, other: Term) -> Self {
		Term::expr(ExpressionType::EqualTo, vec![self, other])
	}

	pub fn not_equals(self, other: Term) -> Self {
		Term::expr(ExpressionType::NotEqualTo, vec![self, other])
	}

	pub fn gt(self, other: Term) -> Self {
		Term::expr(ExpressionType::GreaterThan, vec![self, other])
	}

	pub fn gte(self, other: Term) -> Self {
		Term::expr(ExpressionType::GreaterEqualTo, vec![self, other])
	}

	pub fn lt(self, other: Term) -> Self {
		Term::expr(ExpressionType::LessThan, vec![self, other])
	}

	pub fn lte(self, other: Term) -> Self {
		Term::expr(ExpressionType::LessEqualTo, vec![self, other])
	}

	pub fn like(self, pattern: Term) -> Self {
		Term::expr(ExpressionType::Like, vec![self, pattern])
	}

	pub fn is_in(self, candidates: Vec<Term>) -> Self {
		let mut terms = Vec::with_capacity(candidates.len() + 1);
		terms.push(self);
		terms.extend(candidates);
		Term::expr(ExpressionType::In, terms)
	}

	pub fn between(self, low: Term, high: Term) -> Self {
		Term::expr(ExpressionType::Between, vec![self, low, high])
	}

	pub fn is_null(self) -> Self {
		Term::expr(ExpressionType::IsNull, vec![self])
	}

	pub fn plus(self, other: Term) -> Self {
		Term::expr(ExpressionType::Plus, vec![self, other])
	}

	pub fn minus(self, other: Term) -> Self {
		Term::expr(ExpressionType::Minus, vec![self, other])
	}

	pub fn multiply(self, other: Term) -> Self {
		Term::expr(ExpressionType::Multiply, vec![self, other])
	}

	pub fn divide(self, other: Term) -> Self {
		Term::expr(ExpressionType::Divide, vec![self, other])
	}

	pub fn modulo(self, other: Term) -> Self {
		Term::expr(ExpressionType::Modulo, vec![self, other])
	}
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	#[serde(default)]
	pub entity: Option<String>,
	pub field: String,
	#[serde(default = "default_ascending")]
	pub ascending: bool,
}

fn default_ascending() -> bool {
	true
}

impl Order {
	pub fn asc(field: impl Into<String>) -> Self {
		Self {
			entity: None,
			field: field.into(),
			ascending: true,
		}
	}

	pub fn desc(field: impl Into<String>) -> Self {
		Self {
			entity: None,
			field: field.into(),
			ascending: false,
		}
	}

	pub fn of(mut self, entity: impl Into<String>) -> Self {
		self.entity = Some(entity.into());
		self
	}
}
