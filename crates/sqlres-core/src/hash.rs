//! Placeholder derivation and the per-statement value hash map

use crate::error::Result;
use crate::normalize::normalize;
use crate::value::Value;
use flate2::Crc;
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// A named parameter token such as `:8a707622`.
///
/// The token is `":"` followed by the lowercase, zero-padded hex CRC-32 of the
/// normalized value. Renderers write it into SQL text and executors look it up
/// in [`BoundParams`], so both sides must agree on this exact format.
///
/// When two different normalized values share a CRC-32 within one statement,
/// [`ValueHashMap`] gives the later one a numeric suffix (`:4ddb0c25_1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder(String);

impl Placeholder {
	/// Derives the placeholder for an already normalized string.
	pub fn from_normalized(normalized: &str) -> Self {
		let mut crc = Crc::new();
		crc.update(normalized.as_bytes());
		Placeholder(format!(":{:08x}", crc.sum()))
	}

	/// The `n`th collision variant of this placeholder, e.g. `:4ddb0c25_2`.
	fn with_suffix(&self, n: usize) -> Self {
		Placeholder(format!("{}_{n}", self.0))
	}

	/// The full token, including the leading colon.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The token without its leading colon.
	pub fn name(&self) -> &str {
		&self.0[1..]
	}
}

impl fmt::Display for Placeholder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Placeholder {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for Placeholder {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// Computes the placeholder for `value`.
///
/// Fails with [`BindError::InvalidValue`](crate::BindError::InvalidValue) when
/// the value cannot be normalized.
///
/// # Examples
///
/// ```
/// use sqlres_core::{placeholder_for, Value};
///
/// let placeholder = placeholder_for(&Value::Int(20)).unwrap();
/// assert_eq!(placeholder.as_str(), ":8a707622");
/// ```
pub fn placeholder_for(value: &Value) -> Result<Placeholder> {
	let normalized = normalize(value)?;
	Ok(Placeholder::from_normalized(&normalized))
}

/// One entry of a [`ValueHashMap`]
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	pub placeholder: Placeholder,
	/// The first value seen with this normalized form, kept with its type so
	/// drivers can bind it natively.
	pub value: Value,
}

/// Maps normalized values to the placeholders that stand for them.
///
/// Built fresh for every statement. Each normalized value appears at most once;
/// inserting a value whose normalized form is already present is a no-op.
///
/// Placeholders are unique within a map. A value whose CRC-32 is already taken
/// by a different normalized value gets the first free `_1`, `_2`, ... suffix,
/// so the outcome depends only on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueHashMap {
	entries: IndexMap<String, Binding>,
	owners: HashMap<Placeholder, String>,
}

impl ValueHashMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Normalizes and hashes `value`, inserting it unless its normalized form
	/// is already present. Returns the placeholder in both cases.
	pub fn insert_value(&mut self, value: &Value) -> Result<Placeholder> {
		let normalized = normalize(value)?;
		Ok(self.insert_normalized(normalized, value.clone()))
	}

	fn insert_normalized(&mut self, normalized: String, value: Value) -> Placeholder {
		if let Some(existing) = self.entries.get(&normalized) {
			return existing.placeholder.clone();
		}

		let base = Placeholder::from_normalized(&normalized);
		let mut placeholder = base.clone();
		let mut n = 0;
		while self.owners.contains_key(&placeholder) {
			n += 1;
			placeholder = base.with_suffix(n);
		}
		if n > 0 {
			warn!(%base, %placeholder, "placeholder collision, using suffixed token");
		}

		self.owners.insert(placeholder.clone(), normalized.clone());
		self.entries.insert(
			normalized,
			Binding {
				placeholder: placeholder.clone(),
				value,
			},
		);
		placeholder
	}

	/// Looks up the placeholder of an already normalized value.
	pub fn get(&self, normalized: &str) -> Option<&Placeholder> {
		self.entries.get(normalized).map(|b| &b.placeholder)
	}

	/// Looks up the placeholder of `value`, normalizing it first.
	///
	/// Values that cannot be normalized are never present.
	pub fn placeholder_of(&self, value: &Value) -> Option<&Placeholder> {
		normalize(value).ok().and_then(|n| self.get(&n))
	}

	pub fn contains_key(&self, normalized: &str) -> bool {
		self.entries.contains_key(normalized)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Moves every entry of `other` into `self`, keeping existing entries.
	///
	/// Incoming entries are re-keyed against `self`, so a placeholder taken in
	/// `self` is never reused for a different value.
	pub fn merge(&mut self, other: ValueHashMap) {
		for (normalized, binding) in other.entries {
			self.insert_normalized(normalized, binding.value);
		}
	}

	/// Inverts the map into `placeholder -> value` parameters for execution.
	pub fn to_params(&self) -> BoundParams {
		let mut params = BoundParams::new();
		for binding in self.entries.values() {
			params.insert(binding.placeholder.clone(), binding.value.clone());
		}
		params
	}
}

/// Named parameters handed to an executor, keyed by placeholder token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
	params: IndexMap<Placeholder, Value>,
}

impl BoundParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, placeholder: Placeholder, value: Value) {
		self.params.insert(placeholder, value);
	}

	/// Looks up a parameter by its token name, with or without the leading colon.
	pub fn get(&self, name: &str) -> Option<&Value> {
		if name.starts_with(':') {
			self.params.get(name)
		} else {
			self.params.get(format!(":{name}").as_str())
		}
	}

	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Placeholder, &Value)> {
		self.params.iter()
	}
}

impl From<&ValueHashMap> for BoundParams {
	fn from(map: &ValueHashMap) -> Self {
		map.to_params()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Int(20), ":8a707622")]
	#[case(Value::Int(5), ":84b12bae")]
	#[case(Value::String("foo".into()), ":8c736521")]
	#[case(Value::String("a".into()), ":e8b7be43")]
	#[case(Value::Bool(true), ":fdfc4c8d")]
	#[case(Value::Float(1.5), ":875c9bba")]
	fn test_placeholder_values(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(placeholder_for(&value).unwrap().as_str(), expected);
	}

	#[rstest]
	fn test_placeholder_is_deterministic() {
		let first = placeholder_for(&Value::String("hello".into())).unwrap();
		let second = placeholder_for(&Value::String("hello".into())).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.name(), "3610a686");
	}

	#[rstest]
	fn test_placeholder_rejects_null() {
		assert!(placeholder_for(&Value::Null).is_err());
	}

	#[rstest]
	fn test_insert_is_idempotent() {
		// Arrange
		let mut map = ValueHashMap::new();

		// Act
		let first = map.insert_value(&Value::Int(11)).unwrap();
		let second = map.insert_value(&Value::String("11".into())).unwrap();

		// Assert
		assert_eq!(first, second);
		assert_eq!(map.len(), 1);
		// the first typed value wins
		assert_eq!(map.to_params().get(":d65a1577"), Some(&Value::Int(11)));
	}

	#[rstest]
	fn test_to_params_inverts_map() {
		// Arrange
		let mut map = ValueHashMap::new();
		map.insert_value(&Value::Int(5)).unwrap();
		map.insert_value(&Value::String("foo".into())).unwrap();

		// Act
		let params = map.to_params();

		// Assert
		assert_eq!(params.len(), 2);
		assert_eq!(params.get(":84b12bae"), Some(&Value::Int(5)));
		assert_eq!(params.get("8c736521"), Some(&Value::String("foo".into())));
	}

	#[rstest]
	fn test_merge_keeps_existing() {
		let mut left = ValueHashMap::new();
		left.insert_value(&Value::Int(1)).unwrap();
		let mut right = ValueHashMap::new();
		right.insert_value(&Value::String("1".into())).unwrap();
		right.insert_value(&Value::Int(2)).unwrap();

		left.merge(right);

		assert_eq!(left.len(), 2);
		assert_eq!(left.to_params().get(":83dcefb7"), Some(&Value::Int(1)));
	}

	#[rstest]
	fn test_colliding_values_get_distinct_placeholders() {
		// Arrange
		// "plumless" and "buckeroo" share the CRC-32 4ddb0c25
		let mut map = ValueHashMap::new();

		// Act
		let first = map.insert_value(&Value::from("plumless")).unwrap();
		let second = map.insert_value(&Value::from("buckeroo")).unwrap();
		let again = map.insert_value(&Value::from("buckeroo")).unwrap();

		// Assert
		assert_eq!(first.as_str(), ":4ddb0c25");
		assert_eq!(second.as_str(), ":4ddb0c25_1");
		assert_eq!(again, second);
		let params = map.to_params();
		assert_eq!(params.len(), 2);
		assert_eq!(params.get(":4ddb0c25"), Some(&Value::from("plumless")));
		assert_eq!(params.get("4ddb0c25_1"), Some(&Value::from("buckeroo")));
	}

	#[rstest]
	fn test_merge_rekeys_colliding_entries() {
		// Arrange
		let mut left = ValueHashMap::new();
		left.insert_value(&Value::from("plumless")).unwrap();
		let mut right = ValueHashMap::new();
		right.insert_value(&Value::from("buckeroo")).unwrap();

		// Act
		left.merge(right);

		// Assert
		assert_eq!(left.len(), 2);
		assert_eq!(left.get("plumless").unwrap().as_str(), ":4ddb0c25");
		assert_eq!(left.get("buckeroo").unwrap().as_str(), ":4ddb0c25_1");
		assert_eq!(
			left.placeholder_of(&Value::from("buckeroo")).map(Placeholder::as_str),
			Some(":4ddb0c25_1")
		);
	}
}
