//! Statement building errors

use sqlres_core::BindError;

/// Result type for statement building
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors raised while rendering expressions and statements.
///
/// All of them are raised before anything reaches the database.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	/// No rows to insert, no columns to update, no table to read from
	#[error("Empty input: {0}")]
	EmptyInput(String),

	/// A clause the target dialect cannot express
	#[error("Unsupported by {dialect}: {feature}")]
	Unsupported {
		dialect: &'static str,
		feature: &'static str,
	},

	/// A literal reached the renderer without a placeholder in the hash map
	#[error("No placeholder bound for value '{0}'")]
	MissingBinding(String),

	/// Wrong number of operands for an expression type
	#[error("Invalid expression: {0}")]
	InvalidExpression(String),

	/// An empty table or column name
	#[error("Invalid identifier: {0}")]
	InvalidIdentifier(String),

	#[error(transparent)]
	Bind(#[from] BindError),
}
