//! Field/column metadata shared by the binder, the preprocessors and the builders

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maps consumer-facing field names to database column names.
///
/// Declaration order is kept; it decides the column order of SELECT lists
/// and INSERT statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldColumnMap(IndexMap<String, String>);

impl FieldColumnMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a `field -> column` pair, builder style.
	pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
		self.insert(field, column);
		self
	}

	pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
		self.0.insert(field.into(), column.into());
	}

	/// The column a field maps to, if the field is known.
	pub fn column(&self, field: &str) -> Option<&str> {
		self.0.get(field).map(String::as_str)
	}

	pub fn contains_field(&self, field: &str) -> bool {
		self.0.contains_key(field)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(f, c)| (f.as_str(), c.as_str()))
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn columns(&self) -> impl Iterator<Item = &str> {
		self.0.values().map(String::as_str)
	}

	/// Position of `column` in declaration order.
	pub fn column_position(&self, column: &str) -> Option<usize> {
		self.0.values().position(|c| c == column)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// The field names as an ignore set, which is what SELECT, UPDATE and
	/// DELETE bind their conditions with.
	pub fn field_names(&self) -> IgnoreSet {
		self.fields().collect()
	}
}

impl<F, C> FromIterator<(F, C)> for FieldColumnMap
where
	F: Into<String>,
	C: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
		FieldColumnMap(
			iter.into_iter()
				.map(|(f, c)| (f.into(), c.into()))
				.collect(),
		)
	}
}

/// Normalized values that denote identifiers and must never be bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet(HashSet<String>);

impl IgnoreSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, value: impl Into<String>) {
		self.0.insert(value.into());
	}

	pub fn contains(&self, normalized: &str) -> bool {
		self.0.contains(normalized)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		IgnoreSet(iter.into_iter().map(Into::into).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_declaration_order_is_kept() {
		let map = FieldColumnMap::new()
			.with("id", "id")
			.with("name", "user_name")
			.with("age", "user_age");

		let columns: Vec<_> = map.columns().collect();

		assert_eq!(columns, vec!["id", "user_name", "user_age"]);
		assert_eq!(map.column_position("user_age"), Some(2));
	}

	#[rstest]
	fn test_field_names_become_ignore_set() {
		let map: FieldColumnMap = [("lastName", "surname")].into_iter().collect();

		let ignore = map.field_names();

		assert!(ignore.contains("lastName"));
		assert!(!ignore.contains("surname"));
	}

	#[rstest]
	fn test_deserialize_transparent() {
		let map: FieldColumnMap =
			serde_json::from_str(r#"{"id": "id", "name": "user_name"}"#).unwrap();

		assert_eq!(map.column("name"), Some("user_name"));
		assert_eq!(map.len(), 2);
	}
}
