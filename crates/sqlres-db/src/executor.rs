//! Query executor seam
//!
//! An executor owns one database handle, takes SQL text with named
//! placeholders plus the `placeholder -> value` parameters, and runs it.

use crate::error::Result;
use crate::types::{QueryResult, Row};
use async_trait::async_trait;
use sqlres_core::BoundParams;
use sqlres_query::Dialect;

/// Runs rendered statements against a database.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
	/// The SQL dialect statements for this executor must be rendered in.
	fn dialect(&self) -> Dialect;

	/// Runs a statement that returns no rows.
	async fn execute(&self, sql: &str, params: &BoundParams) -> Result<QueryResult>;

	/// Runs a query and returns every row.
	async fn fetch_all(&self, sql: &str, params: &BoundParams) -> Result<Vec<Row>>;
}

