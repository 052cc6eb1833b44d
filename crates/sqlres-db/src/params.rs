//! Named placeholder compilation
//!
//! The statement builders emit named placeholders (`:8a707622`) while sqlx
//! binds parameters positionally. [`compile`] rewrites the SQL text for the
//! target dialect and lines the bound values up with the new positions:
//!
//! | Dialect | Placeholder | Values |
//! |---|---|---|
//! | SQLite | `?NNN`, numbered by first occurrence | one per distinct name |
//! | PostgreSQL | `$N`, numbered by first occurrence | one per distinct name |
//! | MySQL | `?` | one per occurrence |
//!
//! Quoted strings, quoted identifiers and `::` casts are left untouched.

use crate::error::{DatabaseError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sqlres_core::{BoundParams, Value};
use sqlres_query::Dialect;
use std::collections::HashMap;
use tracing::warn;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r#"'(?:[^']|'')*'|"(?:[^"]|"")*"|`[^`]*`|::|:([A-Za-z0-9_]+)"#)
		.unwrap_or_else(|e| unreachable!("placeholder pattern is valid: {e}"))
});

/// SQL text with positional placeholders and the values to bind, in order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
	pub sql: String,
	pub values: Vec<Value>,
}

/// Rewrites named placeholders in `sql` to the positional form of `dialect`.
///
/// Fails with [`DatabaseError::UnboundPlaceholder`] when a placeholder has no
/// value in `params`. Parameters that the SQL never mentions are ignored with
/// a warning.
///
/// # Examples
///
/// ```
/// use sqlres_core::{ValueHashMap, Value};
/// use sqlres_db::params::compile;
/// use sqlres_query::Dialect;
///
/// let mut map = ValueHashMap::new();
/// let p = map.insert_value(&Value::Int(20)).unwrap();
/// let sql = format!("SELECT * FROM users WHERE age >= {p} OR id = {p}");
///
/// let compiled = compile(&sql, &map.to_params(), Dialect::Sqlite).unwrap();
/// assert_eq!(compiled.sql, "SELECT * FROM users WHERE age >= ?1 OR id = ?1");
/// assert_eq!(compiled.values, vec![Value::Int(20)]);
/// ```
pub fn compile(sql: &str, params: &BoundParams, dialect: Dialect) -> Result<CompiledQuery> {
	// name -> 1-based position of its value
	let mut indexes: HashMap<String, usize> = HashMap::new();
	let mut values: Vec<Value> = Vec::new();
	let mut unbound: Option<String> = None;

	let rewritten = PLACEHOLDER.replace_all(sql, |caps: &Captures<'_>| {
		let Some(name) = caps.get(1) else {
			// quoted text or a cast
			return caps[0].to_string();
		};
		let Some(value) = params.get(&caps[0]) else {
			unbound.get_or_insert_with(|| name.as_str().to_string());
			return caps[0].to_string();
		};

		match dialect {
			Dialect::Mysql => {
				values.push(value.clone());
				indexes.entry(name.as_str().to_string()).or_insert(values.len());
				"?".to_string()
			}
			Dialect::Sqlite | Dialect::Postgres => {
				let index = match indexes.get(name.as_str()) {
					Some(&i) => i,
					None => {
						values.push(value.clone());
						indexes.insert(name.as_str().to_string(), values.len());
						values.len()
					}
				};
				if dialect == Dialect::Sqlite {
					format!("?{index}")
				} else {
					format!("${index}")
				}
			}
		}
	});

	if let Some(name) = unbound {
		return Err(DatabaseError::UnboundPlaceholder(name));
	}

	for (placeholder, _) in params.iter() {
		if !indexes.contains_key(placeholder.name()) {
			warn!(placeholder = %placeholder, "bound value not referenced by SQL text");
		}
	}

	Ok(CompiledQuery {
		sql: rewritten.into_owned(),
		values,
	})
}
