//! Value types carried by literals, records and result rows

use crate::error::BindError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value that can appear in a literal term, a record or a result row.
///
/// Only scalars, strings and the string-representable variants
/// ([`Value::Timestamp`], [`Value::Uuid`]) can be bound as statement
/// parameters. The container variants exist so that records read from
/// loosely typed sources (JSON documents, serialized structs) keep their
/// shape until normalization rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Bytes(Vec<u8>),
	Timestamp(chrono::DateTime<chrono::Utc>),
	Uuid(Uuid),
	List(Vec<Value>),
	Map(IndexMap<String, Value>),
}

impl Value {
	/// Returns `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Short name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Bytes(_) => "bytes",
			Value::Timestamp(_) => "timestamp",
			Value::Uuid(_) => "uuid",
			Value::List(_) => "list",
			Value::Map(_) => "map",
		}
	}

	/// Returns the string slice for [`Value::String`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Value::Int(i as i64)
	}
}

impl From<u32> for Value {
	fn from(i: u32) -> Self {
		Value::Int(i as i64)
	}
}

impl From<f64> for Value {
	fn from(f: f64) -> Self {
		Value::Float(f)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<Vec<u8>> for Value {
	fn from(b: Vec<u8>) -> Self {
		Value::Bytes(b)
	}
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
	fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
		Value::Timestamp(dt)
	}
}

impl From<Uuid> for Value {
	fn from(u: Uuid) -> Self {
		Value::Uuid(u)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Null, Into::into)
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Value::Int(i)
				} else {
					// u64 above i64::MAX and all non-integers land here
					n.as_f64().map_or(Value::Null, Value::Float)
				}
			}
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::List(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => Value::Map(
				map.into_iter()
					.map(|(k, v)| (k, Value::from(v)))
					.collect(),
			),
		}
	}
}

impl TryFrom<Value> for i64 {
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Int(i) => Ok(i),
			other => Err(BindError::type_mismatch("i64", &other)),
		}
	}
}

impl TryFrom<Value> for f64 {
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Float(f) => Ok(f),
			Value::Int(i) => Ok(i as f64),
			other => Err(BindError::type_mismatch("f64", &other)),
		}
	}
}

impl TryFrom<Value> for bool {
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Bool(b) => Ok(b),
			// SQLite and MySQL hand booleans back as 0/1 integers
			Value::Int(i) => Ok(i != 0),
			other => Err(BindError::type_mismatch("bool", &other)),
		}
	}
}

impl TryFrom<Value> for String {
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::String(s) => Ok(s),
			other => Err(BindError::type_mismatch("String", &other)),
		}
	}
}

impl TryFrom<Value> for Uuid {
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Uuid(u) => Ok(u),
			Value::String(s) => {
				Uuid::parse_str(&s).map_err(|_| BindError::type_mismatch("Uuid", &Value::String(s)))
			}
			other => Err(BindError::type_mismatch("Uuid", &other)),
		}
	}
}

impl<T> TryFrom<Value> for Option<T>
where
	T: TryFrom<Value, Error = BindError>,
{
	type Error = BindError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Null => Ok(None),
			other => T::try_from(other).map(Some),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_from_json_keeps_shape() {
		// Arrange
		let json = json!({"id": 5, "name": "foo", "tags": ["a"], "ratio": 0.5, "gone": null});

		// Act
		let value = Value::from(json);

		// Assert
		let Value::Map(map) = value else {
			panic!("expected a map");
		};
		assert_eq!(map["id"], Value::Int(5));
		assert_eq!(map["name"], Value::String("foo".into()));
		assert_eq!(map["tags"], Value::List(vec![Value::String("a".into())]));
		assert_eq!(map["ratio"], Value::Float(0.5));
		assert_eq!(map["gone"], Value::Null);
	}

	#[rstest]
	fn test_option_conversion() {
		assert_eq!(Value::from(None::<i64>), Value::Null);
		assert_eq!(Value::from(Some("x")), Value::String("x".into()));
	}

	#[rstest]
	#[case(Value::Int(1), true)]
	#[case(Value::Int(0), false)]
	#[case(Value::Bool(true), true)]
	fn test_bool_from_value(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(bool::try_from(value).unwrap(), expected);
	}

	#[rstest]
	fn test_type_mismatch() {
		let err = i64::try_from(Value::String("5".into())).unwrap_err();
		assert!(err.to_string().contains("string"));
	}

	#[rstest]
	fn test_optional_null() {
		let v: Option<i64> = Value::Null.try_into().unwrap();
		assert_eq!(v, None);
	}
}
