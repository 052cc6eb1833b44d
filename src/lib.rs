//! # sqlres
//!
//! Turns the literal values of a query into deterministic named parameters and
//! runs SELECT, INSERT, UPDATE and DELETE through per-verb resource models.
//!
//! Every distinct literal is normalized to a canonical string and hashed with
//! CRC-32; the placeholder `":" + 8 hex digits` is both what the statement
//! builder writes into the SQL and the name the executor binds the value
//! under. Equal values share a placeholder, and the same input always yields
//! the same SQL text.
//!
//! ## Feature Flags
//!
//! ### Presets
//!
//! - `minimal` - Binding engine only
//! - `standard` (default) - Binding, SQL rendering and execution
//! - `full` - All features enabled
//!
//! ### Fine-grained Control
//!
//! - `core` - Values, terms, normalizer, hasher, binder and preprocessors (`sqlres-core`)
//! - `query` - Dialects, expression renderer and statement builders (`sqlres-query`)
//! - `database` - sqlx executors, resource models and settings (`sqlres-db`)
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "query")]
//! # {
//! use sqlres::prelude::*;
//!
//! let fields = FieldColumnMap::new()
//!     .with("id", "id")
//!     .with("name", "user_name")
//!     .with("age", "user_age");
//! let ignore = fields.field_names();
//! let condition = Term::field("users", "age").gte(Term::literal(20));
//!
//! // Stage 1: bind
//! let hash_map = ExpressionBinder::new().bind(Some(&condition), &ignore).unwrap();
//!
//! // Stage 2: render
//! let stmt = SelectStatement {
//!     tables: vec!["users".into()],
//!     columns: fields.columns().map(String::from).collect(),
//!     condition: Some(condition),
//!     ..Default::default()
//! };
//! let sql = SqlStatementBuilder::new(Dialect::Sqlite)
//!     .build_select(&stmt, &BuildContext::new(&hash_map, &ignore, &fields))
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     r#"SELECT "id", "user_name", "user_age" FROM "users" WHERE "users"."user_age" >= :8a707622"#
//! );
//! # }
//! ```

pub mod core;
pub mod db;
pub mod query;

#[cfg(feature = "core")]
pub use sqlres_core::{
	BindError, ChangeValue, ExpressionBinder, ExpressionType, FieldColumnMap, IgnoreSet, Order,
	Placeholder, RecordSource, Term, Value, ValueHashMap,
};

#[cfg(feature = "query")]
pub use sqlres_query::{BuildError, Dialect, Join, PreparedStatement};

#[cfg(feature = "database")]
pub use sqlres_db::{
	Clauses, DatabaseError, DeleteResourceModel, InsertResourceModel, QueryExecutor,
	SelectResourceModel, Settings, UpdateResourceModel,
};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "core")]
	pub use sqlres_core::{
		BoundParams, ChangeValue, ExpressionBinder, FieldColumnMap, IgnoreSet, Order, RecordSource,
		SerializedRecord, Term, Value, ValueHashMap,
	};

	#[cfg(feature = "query")]
	pub use sqlres_query::{
		BuildContext, DeleteStatement, Dialect, InsertStatement, Join, PreparedStatement,
		SelectStatement, SqlStatementBuilder, StatementBuilder, UpdateStatement,
	};

	#[cfg(feature = "database")]
	pub use sqlres_db::{
		Clauses, DatabaseSettings, DeleteResourceModel, InsertResourceModel, MySqlExecutor,
		QueryExecutor, ResourceSettings, Row, SelectResourceModel, Settings, SqliteExecutor,
		UpdateResourceModel,
	};

	// External
	#[cfg(feature = "database")]
	pub use async_trait::async_trait;
}
