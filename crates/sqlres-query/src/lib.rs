//! # sqlres-query
//!
//! SQL text generation for sqlres.
//!
//! Statements are rendered with named placeholders (`:8a707622`) taken from a
//! [`ValueHashMap`](sqlres_core::ValueHashMap) built beforehand by the binder
//! and the preprocessors of `sqlres-core`. The builders never collect values
//! themselves.
//!
//! - [`Dialect`]: identifier quoting and clause support per database
//! - [`SqlWriter`]: low-level SQL text accumulation
//! - [`ExpressionRenderer`] / [`SqlExpressionTemplate`]: term trees to SQL fragments
//! - [`StatementBuilder`] / [`SqlStatementBuilder`]: SELECT, INSERT, UPDATE and DELETE

pub mod builder;
pub mod dialect;
pub mod error;
pub mod render;
pub mod statement;
pub mod writer;

pub use builder::{BuildContext, SqlStatementBuilder, StatementBuilder};
pub use dialect::Dialect;
pub use error::{BuildError, Result};
pub use render::{ExpressionRenderer, RenderContext, SqlExpressionTemplate};
pub use statement::{
	DeleteStatement, InsertStatement, Join, PreparedStatement, SelectStatement, UpdateStatement,
};
pub use writer::SqlWriter;
