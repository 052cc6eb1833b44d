//! Result types returned by executors

use crate::error::{DatabaseError, Result};
use indexmap::IndexMap;
use sqlres_core::{FieldColumnMap, Value};

/// Outcome of a statement that does not return rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
	pub rows_affected: u64,
	/// Row id generated by the driver for the last inserted row, when it
	/// reports one
	pub last_insert_id: Option<i64>,
}

/// One fetched row, keyed by column name in select-list order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
	pub(crate) data: IndexMap<String, Value>,
}

impl Row {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: String, value: Value) {
		self.data.insert(key, value);
	}

	/// Reads a column converted to `T`.
	pub fn get<T: TryFrom<Value>>(&self, key: &str) -> Result<T>
	where
		DatabaseError: From<<T as TryFrom<Value>>::Error>,
	{
		self.data
			.get(key)
			.cloned()
			.ok_or_else(|| DatabaseError::ColumnNotFound(key.to_string()))
			.and_then(|v| v.try_into().map_err(Into::into))
	}

	/// The raw value of a column.
	pub fn value(&self, key: &str) -> Option<&Value> {
		self.data.get(key)
	}

	pub fn columns(&self) -> impl Iterator<Item = &str> {
		self.data.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// The row as a flat column-keyed map.
	pub fn into_map(self) -> IndexMap<String, Value> {
		self.data
	}

	/// The row keyed by field name instead of column name.
	///
	/// Columns that no field maps to are dropped.
	pub fn into_fields(mut self, field_columns: &FieldColumnMap) -> IndexMap<String, Value> {
		field_columns
			.iter()
			.filter_map(|(field, column)| {
				self.data
					.shift_remove(column)
					.map(|value| (field.to_string(), value))
			})
			.collect()
	}
}

impl From<IndexMap<String, Value>> for Row {
	fn from(data: IndexMap<String, Value>) -> Self {
		Self { data }
	}
}
