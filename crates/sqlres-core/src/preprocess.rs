//! Record and change-set preprocessing
//!
//! Both preprocessors translate the caller's field space into the table's
//! column space through a [`FieldColumnMap`] and feed every non-null value into
//! one shared [`ValueHashMap`].

use crate::binder::ExpressionBinder;
use crate::config::{FieldColumnMap, IgnoreSet};
use crate::error::Result;
use crate::hash::ValueHashMap;
use crate::record::RecordSource;
use crate::term::Term;
use crate::value::Value;
use indexmap::IndexMap;
use tracing::{debug, trace};

/// A row keyed by column name, in field/column map order.
pub type ColumnRow = IndexMap<String, Value>;

/// An UPDATE change-set keyed by column name.
pub type ColumnChangeSet = IndexMap<String, ChangeValue>;

/// The new value of one changed field.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeValue {
	/// A plain value, bound through its own placeholder (or `NULL`)
	Value(Value),
	/// A sub-expression such as `age + 1`
	Term(Term),
}

impl From<Value> for ChangeValue {
	fn from(value: Value) -> Self {
		ChangeValue::Value(value)
	}
}

impl From<Term> for ChangeValue {
	fn from(term: Term) -> Self {
		ChangeValue::Term(term)
	}
}

impl From<&str> for ChangeValue {
	fn from(s: &str) -> Self {
		ChangeValue::Value(s.into())
	}
}

impl From<String> for ChangeValue {
	fn from(s: String) -> Self {
		ChangeValue::Value(s.into())
	}
}

impl From<i64> for ChangeValue {
	fn from(i: i64) -> Self {
		ChangeValue::Value(i.into())
	}
}

impl From<i32> for ChangeValue {
	fn from(i: i32) -> Self {
		ChangeValue::Value(i.into())
	}
}

impl From<f64> for ChangeValue {
	fn from(f: f64) -> Self {
		ChangeValue::Value(f.into())
	}
}

impl From<bool> for ChangeValue {
	fn from(b: bool) -> Self {
		ChangeValue::Value(b.into())
	}
}

/// Converts records into column-keyed rows for a multi-row INSERT.
///
/// For every `(field, column)` pair of `field_columns`:
/// - an absent field is left out of that row
/// - a null value is kept as `column -> Null` and not hashed
/// - any other value is kept and added to the returned hash map
///
/// Rows come back in input order.
pub fn preprocess_records<I>(
	records: I,
	field_columns: &FieldColumnMap,
) -> Result<(Vec<ColumnRow>, ValueHashMap)>
where
	I: IntoIterator,
	I::Item: RecordSource,
{
	let mut hash_map = ValueHashMap::new();
	let mut rows = Vec::new();

	for record in records {
		let mut row = ColumnRow::with_capacity(field_columns.len());
		for (field, column) in field_columns.iter() {
			let Some(value) = record.get(field)? else {
				trace!(field, "field absent from record, column omitted");
				continue;
			};
			if !value.is_null() {
				hash_map.insert_value(&value)?;
			}
			row.insert(column.to_string(), value);
		}
		rows.push(row);
	}

	debug!(rows = rows.len(), bound = hash_map.len(), "preprocessed records");
	Ok((rows, hash_map))
}

/// Converts a field-keyed change-set into a column-keyed one.
///
/// Unknown fields are dropped. Plain values are hashed directly, null values
/// are kept but not hashed, and [`ChangeValue::Term`] values go through
/// `binder` with the field names of `field_columns` as the ignore set.
pub fn preprocess_change_set<I, K>(
	change_set: I,
	field_columns: &FieldColumnMap,
	binder: &ExpressionBinder,
) -> Result<(ColumnChangeSet, ValueHashMap)>
where
	I: IntoIterator<Item = (K, ChangeValue)>,
	K: AsRef<str>,
{
	let ignore: IgnoreSet = field_columns.field_names();
	let mut hash_map = ValueHashMap::new();
	let mut columns = ColumnChangeSet::new();

	for (field, change) in change_set {
		let field = field.as_ref();
		let Some(column) = field_columns.column(field) else {
			trace!(field, "dropping unknown field from change-set");
			continue;
		};
		match &change {
			ChangeValue::Value(value) if value.is_null() => {}
			ChangeValue::Value(value) => {
				hash_map.insert_value(value)?;
			}
			ChangeValue::Term(term) => binder.bind_into(term, &ignore, &mut hash_map)?,
		}
		columns.insert(column.to_string(), change);
	}

	debug!(
		columns = columns.len(),
		bound = hash_map.len(),
		"preprocessed change-set"
	);
	Ok((columns, hash_map))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::BindError;
	use crate::record::RecordFn;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn user_columns() -> FieldColumnMap {
		FieldColumnMap::new()
			.with("id", "id")
			.with("name", "user_name")
	}

	#[rstest]
	fn test_records_become_column_rows(user_columns: FieldColumnMap) {
		// Arrange
		let records = vec![
			json!({"id": 5, "name": "foo"}),
			json!({"id": 11, "name": "bar"}),
		];

		// Act
		let (rows, hash_map) = preprocess_records(&records, &user_columns).unwrap();

		// Assert
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0]["id"], Value::Int(5));
		assert_eq!(rows[0]["user_name"], Value::from("foo"));
		assert_eq!(rows[1]["id"], Value::Int(11));
		assert_eq!(rows[1]["user_name"], Value::from("bar"));
		assert_eq!(hash_map.len(), 4);
		for key in ["5", "foo", "11", "bar"] {
			assert!(hash_map.contains_key(key), "missing {key}");
		}
	}

	#[rstest]
	fn test_missing_field_is_omitted(user_columns: FieldColumnMap) {
		let records = vec![json!({"id": 12})];

		let (rows, hash_map) = preprocess_records(&records, &user_columns).unwrap();

		assert_eq!(rows[0].len(), 1);
		assert!(!rows[0].contains_key("user_name"));
		assert_eq!(hash_map.len(), 1);
	}

	#[rstest]
	fn test_null_is_kept_but_not_hashed(user_columns: FieldColumnMap) {
		let records = vec![json!({"id": 5, "name": null})];

		let (rows, hash_map) = preprocess_records(&records, &user_columns).unwrap();

		assert_eq!(rows[0]["user_name"], Value::Null);
		assert_eq!(hash_map.len(), 1);
	}

	#[rstest]
	fn test_unbindable_record_value_fails(user_columns: FieldColumnMap) {
		let records = vec![json!({"id": [1, 2]})];

		let err = preprocess_records(&records, &user_columns).unwrap_err();

		assert!(matches!(err, BindError::InvalidValue(_)));
	}

	#[rstest]
	fn test_container_errors_propagate(user_columns: FieldColumnMap) {
		// Arrange
		let broken = RecordFn::new(|key: &str| Err(BindError::container_access(key, "gone")));

		// Act
		let err = preprocess_records(vec![broken], &user_columns).unwrap_err();

		// Assert
		assert!(matches!(err, BindError::ContainerAccess { .. }));
	}

	#[rstest]
	fn test_unknown_fields_are_dropped() {
		// Arrange
		let field_columns = FieldColumnMap::new().with("lastName", "surname");
		let change_set = vec![
			("lastName", ChangeValue::from("bar")),
			("unknownField", ChangeValue::from("x")),
		];

		// Act
		let (columns, hash_map) =
			preprocess_change_set(change_set, &field_columns, &ExpressionBinder::new()).unwrap();

		// Assert
		assert_eq!(columns.len(), 1);
		assert_eq!(columns["surname"], ChangeValue::from("bar"));
		assert_eq!(hash_map.len(), 1);
		assert!(!hash_map.contains_key("x"));
	}

	#[rstest]
	fn test_sub_expression_binds_through_binder() {
		// Arrange
		let field_columns = FieldColumnMap::new().with("age", "user_age");
		let bump = Term::literal("age").plus(Term::literal(1));

		// Act
		let (columns, hash_map) = preprocess_change_set(
			[("age", ChangeValue::Term(bump.clone()))],
			&field_columns,
			&ExpressionBinder::new(),
		)
		.unwrap();

		// Assert
		assert_eq!(columns["user_age"], ChangeValue::Term(bump));
		assert!(!hash_map.contains_key("age"));
		assert!(hash_map.contains_key("1"));
	}

	#[rstest]
	fn test_null_change_is_not_hashed() {
		let field_columns = FieldColumnMap::new().with("name", "user_name");

		let (columns, hash_map) = preprocess_change_set(
			[("name", ChangeValue::Value(Value::Null))],
			&field_columns,
			&ExpressionBinder::new(),
		)
		.unwrap();

		assert_eq!(columns["user_name"], ChangeValue::Value(Value::Null));
		assert!(hash_map.is_empty());
	}
}
