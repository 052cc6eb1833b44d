//! Statement descriptions handed to a [`StatementBuilder`](crate::StatementBuilder)

use serde::{Deserialize, Serialize};
use sqlres_core::{BoundParams, ColumnChangeSet, ColumnRow, Order, Term};

/// An `INNER JOIN table ON condition` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
	pub table: String,
	pub condition: Term,
}

impl Join {
	pub fn inner(table: impl Into<String>, condition: Term) -> Self {
		Self {
			table: table.into(),
			condition,
		}
	}
}

/// A SELECT over one or more tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
	pub tables: Vec<String>,
	/// Selected columns; empty selects `*`
	pub columns: Vec<String>,
	pub joins: Vec<Join>,
	pub condition: Option<Term>,
	pub ordering: Vec<Order>,
	pub limit: Option<u64>,
	pub offset: Option<u64>,
}

/// A multi-row INSERT.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStatement {
	pub table: String,
	pub rows: Vec<ColumnRow>,
}

/// An UPDATE of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStatement {
	pub table: String,
	pub changes: ColumnChangeSet,
	pub condition: Option<Term>,
	pub ordering: Vec<Order>,
	pub limit: Option<u64>,
}

/// A DELETE from one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteStatement {
	pub table: String,
	pub condition: Option<Term>,
	pub ordering: Vec<Order>,
	pub limit: Option<u64>,
	pub offset: Option<u64>,
}

/// Rendered SQL text together with the parameters its placeholders refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
	pub sql: String,
	pub params: BoundParams,
}
