//! Canonical string form of bindable values
//!
//! The normalized string is both the key of a [`ValueHashMap`](crate::ValueHashMap)
//! entry and the input of the placeholder checksum. Each value is converted
//! through its own string representation; there is no cross-type coercion, so
//! `Bool(true)` and `String("1")` normalize differently.

use crate::error::{BindError, Result};
use crate::value::Value;

/// Converts `value` into its canonical string form.
///
/// Integers, floats, booleans and strings are accepted along with the
/// string-representable timestamp and UUID values. Everything else fails
/// with [`BindError::InvalidValue`].
///
/// # Examples
///
/// ```
/// use sqlres_core::{normalize, Value};
///
/// assert_eq!(normalize(&Value::Int(20)).unwrap(), "20");
/// assert_eq!(normalize(&Value::Bool(false)).unwrap(), "false");
/// assert!(normalize(&Value::Null).is_err());
/// ```
pub fn normalize(value: &Value) -> Result<String> {
	match value {
		Value::Bool(b) => Ok(b.to_string()),
		Value::Int(i) => Ok(i.to_string()),
		Value::Float(f) => Ok(f.to_string()),
		Value::String(s) => Ok(s.clone()),
		Value::Timestamp(dt) => Ok(dt.to_rfc3339()),
		Value::Uuid(u) => Ok(u.hyphenated().to_string()),
		Value::Null | Value::Bytes(_) | Value::List(_) | Value::Map(_) => Err(
			BindError::InvalidValue(format!("{} cannot be normalized to a string", value.type_name())),
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};
	use indexmap::IndexMap;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Int(20), "20")]
	#[case(Value::Int(-3), "-3")]
	#[case(Value::Float(1.5), "1.5")]
	#[case(Value::Bool(true), "true")]
	#[case(Value::Bool(false), "false")]
	#[case(Value::String("foo".into()), "foo")]
	#[case(Value::String(String::new()), "")]
	fn test_normalize_scalars(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(normalize(&value).unwrap(), expected);
	}

	#[rstest]
	fn test_normalize_stringable() {
		// Arrange
		let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
		let id = uuid::Uuid::nil();

		// Act & Assert
		assert_eq!(
			normalize(&Value::Timestamp(ts)).unwrap(),
			"2024-03-01T12:30:00+00:00"
		);
		assert_eq!(
			normalize(&Value::Uuid(id)).unwrap(),
			"00000000-0000-0000-0000-000000000000"
		);
	}

	#[rstest]
	#[case(Value::Null)]
	#[case(Value::Bytes(vec![1, 2]))]
	#[case(Value::List(vec![Value::Int(1)]))]
	#[case(Value::Map(IndexMap::new()))]
	fn test_normalize_rejects_containers(#[case] value: Value) {
		let err = normalize(&value).unwrap_err();
		assert!(matches!(err, BindError::InvalidValue(_)));
	}

	#[rstest]
	fn test_no_cross_type_coercion() {
		let from_bool = normalize(&Value::Bool(true)).unwrap();
		let from_str = normalize(&Value::String("1".into())).unwrap();
		assert_ne!(from_bool, from_str);
	}
}
