//! Error types raised while normalizing, hashing and binding values

use crate::value::Value;

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors that can occur while turning terms and records into bound values
#[derive(Debug, thiserror::Error)]
pub enum BindError {
	/// The value cannot be converted to its canonical string form
	#[error("Invalid value: {0}")]
	InvalidValue(String),

	/// A literal inside a term failed to normalize or hash
	#[error("Value {value} in expression is out of range")]
	OutOfRange {
		value: String,
		#[source]
		source: Box<BindError>,
	},

	/// The expression tree is malformed (for example nested too deeply)
	#[error("Invalid expression: {0}")]
	InvalidExpression(String),

	/// A record source failed while reading a key
	#[error("Failed to read key '{key}' from record: {source}")]
	ContainerAccess {
		key: String,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	/// A value could not be converted to the requested Rust type
	#[error("Type error: expected {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},
}

impl BindError {
	pub(crate) fn type_mismatch(expected: &'static str, value: &Value) -> Self {
		BindError::TypeMismatch {
			expected,
			found: value.type_name(),
		}
	}

	/// Wraps `self` as the cause of an out-of-range literal.
	pub(crate) fn out_of_range(self, value: &Value) -> Self {
		BindError::OutOfRange {
			value: format!("{:?}", value),
			source: Box::new(self),
		}
	}

	/// Builds a [`BindError::ContainerAccess`] from any error raised by a record source.
	pub fn container_access<E>(key: impl Into<String>, source: E) -> Self
	where
		E: Into<Box<dyn std::error::Error + Send + Sync>>,
	{
		BindError::ContainerAccess {
			key: key.into(),
			source: source.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::error::Error;

	#[rstest]
	fn test_out_of_range_keeps_cause() {
		// Arrange
		let cause = BindError::InvalidValue("list".to_string());

		// Act
		let err = cause.out_of_range(&Value::List(vec![]));

		// Assert
		assert!(matches!(err, BindError::OutOfRange { .. }));
		let source = err.source().unwrap();
		assert_eq!(source.to_string(), "Invalid value: list");
	}

	#[rstest]
	fn test_container_access_message() {
		let err = BindError::container_access("name", "backend went away");
		assert_eq!(
			err.to_string(),
			"Failed to read key 'name' from record: backend went away"
		);
	}
}
