//! Expression binder
//!
//! Walks a [`Term`] tree in pre-order and collects every literal that has to
//! travel as a statement parameter into a [`ValueHashMap`]. Literals whose
//! normalized form is in the [`IgnoreSet`] are identifiers written directly
//! into the SQL text and are skipped, as are `Null` literals, which render as
//! `NULL`.

use crate::config::IgnoreSet;
use crate::error::{BindError, Result};
use crate::hash::ValueHashMap;
use crate::normalize::normalize;
use crate::term::Term;
use tracing::{debug, trace};

/// Default ceiling on the nesting depth of a bound expression.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Collects the value hash map of an expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionBinder {
	max_depth: usize,
}

impl Default for ExpressionBinder {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl ExpressionBinder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the nesting ceiling. Trees deeper than this fail with
	/// [`BindError::InvalidExpression`].
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Binds `term` into a fresh map. An absent term yields an empty map.
	///
	/// # Examples
	///
	/// ```
	/// use sqlres_core::{ExpressionBinder, IgnoreSet, Term};
	///
	/// let condition = Term::literal("a").and(Term::literal("b"));
	/// let map = ExpressionBinder::new()
	///     .bind(Some(&condition), &IgnoreSet::new())
	///     .unwrap();
	///
	/// assert_eq!(map.len(), 2);
	/// assert_eq!(map.get("a").unwrap().as_str(), ":e8b7be43");
	/// ```
	pub fn bind(&self, term: Option<&Term>, ignore: &IgnoreSet) -> Result<ValueHashMap> {
		let mut map = ValueHashMap::new();
		if let Some(term) = term {
			self.bind_into(term, ignore, &mut map)?;
		}
		Ok(map)
	}

	/// Binds `term` into an existing map.
	///
	/// On failure `map` is left exactly as it was.
	pub fn bind_into(&self, term: &Term, ignore: &IgnoreSet, map: &mut ValueHashMap) -> Result<()> {
		let mut scratch = ValueHashMap::new();
		self.walk(term, ignore, &mut scratch, 0)?;
		debug!(bound = scratch.len(), "bound expression values");
		map.merge(scratch);
		Ok(())
	}

	fn walk(
		&self,
		term: &Term,
		ignore: &IgnoreSet,
		map: &mut ValueHashMap,
		depth: usize,
	) -> Result<()> {
		if depth > self.max_depth {
			return Err(BindError::InvalidExpression(format!(
				"expression nests deeper than {} levels",
				self.max_depth
			)));
		}

		match term {
			Term::Literal(value) => {
				if value.is_null() {
					return Ok(());
				}
				let normalized = normalize(value).map_err(|e| e.out_of_range(value))?;
				if ignore.contains(&normalized) {
					trace!(value = %normalized, "skipping ignored literal");
					return Ok(());
				}
				map.insert_value(value).map_err(|e| e.out_of_range(value))?;
			}
			Term::Expression { terms, .. } => {
				for child in terms {
					self.walk(child, ignore, map, depth + 1)?;
				}
			}
			Term::EntityField { .. } => {}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::term::ExpressionType;
	use crate::value::Value;
	use rstest::{fixture, rstest};

	#[fixture]
	fn binder() -> ExpressionBinder {
		ExpressionBinder::new()
	}

	#[rstest]
	fn test_two_distinct_literals(binder: ExpressionBinder) {
		// Arrange
		let term = Term::literal("a").and(Term::literal("b"));

		// Act
		let map = binder.bind(Some(&term), &IgnoreSet::new()).unwrap();

		// Assert
		assert_eq!(map.len(), 2);
		assert_eq!(map.get("a").unwrap().as_str(), ":e8b7be43");
		assert_eq!(map.get("b").unwrap().as_str(), ":71beeff9");
	}

	#[rstest]
	fn test_equal_literals_share_one_entry(binder: ExpressionBinder) {
		let term = Term::literal("a").and(Term::literal("a"));

		let map = binder.bind(Some(&term), &IgnoreSet::new()).unwrap();

		assert_eq!(map.len(), 1);
	}

	#[rstest]
	fn test_ignored_literal_is_not_bound(binder: ExpressionBinder) {
		// Arrange
		let ignore: IgnoreSet = ["age"].into_iter().collect();
		let term = Term::literal("age").gt(Term::literal(20));

		// Act
		let map = binder.bind(Some(&term), &ignore).unwrap();

		// Assert
		assert!(!map.contains_key("age"));
		assert!(map.contains_key("20"));
		assert_eq!(map.len(), 1);
	}

	#[rstest]
	fn test_absent_term_yields_empty_map(binder: ExpressionBinder) {
		let map = binder.bind(None, &IgnoreSet::new()).unwrap();
		assert!(map.is_empty());
	}

	#[rstest]
	fn test_bare_literal_matches_single_child(binder: ExpressionBinder) {
		let bare = binder
			.bind(Some(&Term::literal("x")), &IgnoreSet::new())
			.unwrap();
		let wrapped = binder
			.bind(
				Some(&Term::expr(ExpressionType::And, vec![Term::literal("x")])),
				&IgnoreSet::new(),
			)
			.unwrap();

		assert_eq!(bare, wrapped);
	}

	#[rstest]
	fn test_fields_and_nulls_contribute_nothing(binder: ExpressionBinder) {
		let term = Term::field("users", "age")
			.equals(Term::Literal(Value::Null))
			.or(Term::field("users", "name").is_null());

		let map = binder.bind(Some(&term), &IgnoreSet::new()).unwrap();

		assert!(map.is_empty());
	}

	#[rstest]
	fn test_invalid_literal_is_out_of_range(binder: ExpressionBinder) {
		// Arrange
		let term = Term::literal(5).and(Term::Literal(Value::List(vec![Value::Int(1)])));

		// Act
		let err = binder.bind(Some(&term), &IgnoreSet::new()).unwrap_err();

		// Assert
		let BindError::OutOfRange { source, .. } = err else {
			panic!("expected OutOfRange, got {err:?}");
		};
		assert!(matches!(*source, BindError::InvalidValue(_)));
	}

	#[rstest]
	fn test_failed_walk_leaves_target_untouched(binder: ExpressionBinder) {
		// Arrange
		let mut map = ValueHashMap::new();
		map.insert_value(&Value::Int(1)).unwrap();
		let term = Term::literal("fresh").and(Term::Literal(Value::Bytes(vec![0])));

		// Act
		let result = binder.bind_into(&term, &IgnoreSet::new(), &mut map);

		// Assert
		assert!(result.is_err());
		assert_eq!(map.len(), 1);
		assert!(!map.contains_key("fresh"));
	}

	#[rstest]
	fn test_depth_ceiling() {
		// Arrange
		let binder = ExpressionBinder::new().with_max_depth(4);
		let mut term = Term::literal(1);
		for _ in 0..10 {
			term = term.and(Term::literal(2));
		}

		// Act
		let err = binder.bind(Some(&term), &IgnoreSet::new()).unwrap_err();

		// Assert
		assert!(matches!(err, BindError::InvalidExpression(_)));
	}

	#[rstest]
	fn test_same_placeholder_across_calls(binder: ExpressionBinder) {
		let term = Term::field("", "age").gte(Term::literal(20));

		let first = binder.bind(Some(&term), &IgnoreSet::new()).unwrap();
		let second = binder.bind(Some(&term), &IgnoreSet::new()).unwrap();

		assert_eq!(first.get("20"), second.get("20"));
		assert_eq!(first.get("20").unwrap().as_str(), ":8a707622");
	}
}
