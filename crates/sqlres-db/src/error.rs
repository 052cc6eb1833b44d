//! Database layer errors

use sqlres_core::BindError;
use sqlres_query::BuildError;

/// Result type for database operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Errors raised by the resource models and executors
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	/// Stage 1 failed: a value could not be normalized or a record could not be read
	#[error("Binding error: {0}")]
	Bind(BindError),

	/// Stage 2 failed: the statement could not be rendered
	#[error("Statement build error: {0}")]
	Build(#[from] BuildError),

	/// SQL text refers to a placeholder that has no bound value
	#[error("Placeholder :{0} has no bound value")]
	UnboundPlaceholder(String),

	/// Stage 3 failed inside the driver
	#[error("Query error: {0}")]
	QueryError(#[from] sqlx::Error),

	#[error("Column not found: {0}")]
	ColumnNotFound(String),

	#[error("Type error: {0}")]
	TypeError(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Not supported: {0}")]
	NotSupported(String),
}

impl From<BindError> for DatabaseError {
	fn from(err: BindError) -> Self {
		match err {
			BindError::TypeMismatch { .. } => DatabaseError::TypeError(err.to_string()),
			other => DatabaseError::Bind(other),
		}
	}
}
