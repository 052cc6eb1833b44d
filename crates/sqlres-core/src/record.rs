//! Record sources
//!
//! A record is anything that can answer "what is stored under this key".
//! [`RecordSource::get`] distinguishes three outcomes:
//!
//! - `Ok(Some(value))`: the key is present (`value` may be [`Value::Null`])
//! - `Ok(None)`: the key is absent
//! - `Err(_)`: the container failed while reading
//!
//! Adapters are provided for the common map types, JSON documents, positional
//! lists, serializable structs ([`SerializedRecord`]) and arbitrary closures
//! ([`RecordFn`]).

use crate::error::{BindError, Result};
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to a record by key.
pub trait RecordSource {
	/// Reads `key`; `Ok(None)` means the key is absent.
	fn get(&self, key: &str) -> Result<Option<Value>>;

	/// Whether `key` is present, including keys holding null.
	fn has(&self, key: &str) -> Result<bool> {
		Ok(self.get(key)?.is_some())
	}
}

impl<S: BuildHasher> RecordSource for HashMap<String, Value, S> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(HashMap::get(self, key).cloned())
	}
}

impl RecordSource for BTreeMap<String, Value> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(BTreeMap::get(self, key).cloned())
	}
}

impl RecordSource for IndexMap<String, Value> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(IndexMap::get(self, key).cloned())
	}
}

impl RecordSource for serde_json::Map<String, serde_json::Value> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(serde_json::Map::get(self, key).cloned().map(Value::from))
	}
}

/// Objects are read by key, arrays by numeric index. Scalars have no keys.
impl RecordSource for serde_json::Value {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		match self {
			serde_json::Value::Object(map) => RecordSource::get(map, key),
			serde_json::Value::Array(items) => {
				Ok(index_of(key).and_then(|i| items.get(i)).cloned().map(Value::from))
			}
			_ => Ok(None),
		}
	}
}

/// Positional records answer numeric keys (`"0"`, `"1"`, ...).
impl RecordSource for [Value] {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(index_of(key).and_then(|i| <[Value]>::get(self, i)).cloned())
	}
}

impl RecordSource for Vec<Value> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		RecordSource::get(self.as_slice(), key)
	}
}

/// A [`Value::Map`] behaves like a map record and a [`Value::List`] like a
/// positional one.
impl RecordSource for Value {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		match self {
			Value::Map(map) => RecordSource::get(map, key),
			Value::List(items) => RecordSource::get(items.as_slice(), key),
			_ => Ok(None),
		}
	}
}

impl<R: RecordSource + ?Sized> RecordSource for &R {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		(**self).get(key)
	}
}

impl<R: RecordSource + ?Sized> RecordSource for Box<R> {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		(**self).get(key)
	}
}

fn index_of(key: &str) -> Option<usize> {
	key.parse().ok()
}

/// A record read from the serialized fields of any [`Serialize`] value.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use sqlres_core::{RecordSource, SerializedRecord, Value};
///
/// #[derive(Serialize)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// let record = SerializedRecord::new(&User { id: 5, name: "foo".into() }).unwrap();
/// assert_eq!(record.get("id").unwrap(), Some(Value::Int(5)));
/// assert_eq!(record.get("email").unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedRecord {
	fields: serde_json::Map<String, serde_json::Value>,
}

impl SerializedRecord {
	/// Serializes `source`, which must produce an object.
	pub fn new<T: Serialize + ?Sized>(source: &T) -> Result<Self> {
		match serde_json::to_value(source) {
			Ok(serde_json::Value::Object(fields)) => Ok(Self { fields }),
			Ok(other) => Err(BindError::InvalidValue(format!(
				"record must serialize to an object, got {}",
				Value::from(other).type_name()
			))),
			Err(e) => Err(BindError::container_access("<record>", e)),
		}
	}
}

impl RecordSource for SerializedRecord {
	fn get(&self, key: &str) -> Result<Option<Value>> {
		RecordSource::get(&self.fields, key)
	}
}

/// Adapts a closure into a record, for key/value containers that have no
/// dedicated adapter.
///
/// ```
/// use sqlres_core::{RecordFn, RecordSource, Value};
///
/// let record = RecordFn::new(|key: &str| Ok((key == "id").then(|| Value::Int(7))));
/// assert_eq!(record.get("id").unwrap(), Some(Value::Int(7)));
/// assert!(!record.has("name").unwrap());
/// ```
pub struct RecordFn<F> {
	read: F,
}

impl<F> RecordFn<F>
where
	F: Fn(&str) -> Result<Option<Value>>,
{
	pub fn new(read: F) -> Self {
		Self { read }
	}
}

impl<F> RecordSource for RecordFn<F>
where
	F: Fn(&str) -> Result<Option<Value>>,
{
	fn get(&self, key: &str) -> Result<Option<Value>> {
		(self.read)(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_hash_map_distinguishes_null_from_absent() {
		// Arrange
		let mut record = HashMap::new();
		record.insert("name".to_string(), Value::Null);

		// Act & Assert
		assert_eq!(RecordSource::get(&record, "name").unwrap(), Some(Value::Null));
		assert_eq!(RecordSource::get(&record, "age").unwrap(), None);
		assert!(record.has("name").unwrap());
		assert!(!record.has("age").unwrap());
	}

	#[rstest]
	fn test_json_object_and_array() {
		let object = json!({"id": 5, "name": "foo"});
		let array = json!([5, "foo"]);

		assert_eq!(RecordSource::get(&object, "id").unwrap(), Some(Value::Int(5)));
		assert_eq!(
			RecordSource::get(&array, "1").unwrap(),
			Some(Value::String("foo".into()))
		);
		assert_eq!(RecordSource::get(&array, "2").unwrap(), None);
		assert_eq!(RecordSource::get(&array, "id").unwrap(), None);
	}

	#[rstest]
	fn test_positional_list() {
		let record = vec![Value::Int(11), Value::from("bar")];

		assert_eq!(RecordSource::get(&record, "0").unwrap(), Some(Value::Int(11)));
		assert_eq!(RecordSource::get(&record, "5").unwrap(), None);
	}

	#[rstest]
	fn test_serialized_record_rejects_scalars() {
		let err = SerializedRecord::new(&42).unwrap_err();
		assert!(matches!(err, BindError::InvalidValue(_)));
	}

	#[rstest]
	fn test_record_fn_propagates_errors() {
		// Arrange
		let record = RecordFn::new(|key: &str| Err(BindError::container_access(key, "locked")));

		// Act
		let err = record.get("name").unwrap_err();

		// Assert
		assert!(matches!(err, BindError::ContainerAccess { ref key, .. } if key == "name"));
	}
}
