//! # sqlres-db
//!
//! Executes the statements rendered by `sqlres-query`.
//!
//! - [`QueryExecutor`]: the execution seam, with sqlx-backed
//!   [`SqliteExecutor`] and [`MySqlExecutor`]
//! - [`compile`]: rewrites `:name` placeholders to the driver's positional form
//! - [`SelectResourceModel`], [`InsertResourceModel`], [`UpdateResourceModel`]
//!   and [`DeleteResourceModel`]: bind, render and execute one verb
//! - [`Settings`]: TOML/JSON configuration for connections and resources
//!
//! ## Example
//!
//! ```no_run
//! use sqlres_core::{FieldColumnMap, Term};
//! use sqlres_db::{Clauses, SelectResourceModel, SqliteExecutor};
//! use std::sync::Arc;
//!
//! # async fn run() -> sqlres_db::Result<()> {
//! let executor = Arc::new(SqliteExecutor::connect("sqlite://app.db").await?);
//! let fields = FieldColumnMap::new()
//!     .with("id", "id")
//!     .with("name", "user_name")
//!     .with("age", "user_age");
//! let users = SelectResourceModel::new(executor, vec!["users".into()], fields);
//!
//! let rows = users
//!     .select(&Clauses::new().filter(Term::field("users", "age").gte(Term::literal(20))))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dialect;
pub mod error;
pub mod executor;
pub mod models;
pub mod params;
pub mod settings;
pub mod types;

pub use dialect::{MySqlExecutor, SqliteExecutor};
pub use error::{DatabaseError, Result};
pub use executor::QueryExecutor;
pub use models::{
	Clauses, DeleteResourceModel, InsertResourceModel, SelectResourceModel, UpdateResourceModel,
};
pub use params::{CompiledQuery, compile};
pub use settings::{DatabaseSettings, ResourceSettings, Settings};
pub use types::{QueryResult, Row};
