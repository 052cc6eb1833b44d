//! SQL dialect differences the builders care about

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target database flavour.
///
/// Identifiers are quoted with double quotes on SQLite and PostgreSQL and
/// with backticks on MySQL. Embedded quote characters are doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
	Sqlite,
	Postgres,
	#[serde(alias = "mariadb")]
	Mysql,
}

impl Dialect {
	pub fn name(&self) -> &'static str {
		match self {
			Dialect::Sqlite => "sqlite",
			Dialect::Postgres => "postgres",
			Dialect::Mysql => "mysql",
		}
	}

	fn quote_char(&self) -> char {
		match self {
			Dialect::Mysql => '`',
			Dialect::Sqlite | Dialect::Postgres => '"',
		}
	}

	/// Quotes a single identifier.
	///
	/// ```
	/// use sqlres_query::Dialect;
	///
	/// assert_eq!(Dialect::Mysql.escape_identifier("user"), "`user`");
	/// assert_eq!(Dialect::Sqlite.escape_identifier("a\"b"), "\"a\"\"b\"");
	/// ```
	pub fn escape_identifier(&self, ident: &str) -> String {
		let quote = self.quote_char();
		let doubled: String = [quote, quote].iter().collect();
		let escaped = ident.replace(quote, &doubled);
		format!("{quote}{escaped}{quote}")
	}

	/// Whether `DEFAULT` may appear inside a `VALUES` row.
	pub fn supports_default_in_values(&self) -> bool {
		!matches!(self, Dialect::Sqlite)
	}

	/// Whether UPDATE and DELETE accept `ORDER BY` and `LIMIT`.
	pub fn supports_mutation_limit(&self) -> bool {
		matches!(self, Dialect::Mysql)
	}

	/// The `LIMIT` argument to pair with an `OFFSET` when no limit was given,
	/// for dialects that cannot write `OFFSET` alone.
	pub fn unbounded_limit(&self) -> Option<&'static str> {
		match self {
			Dialect::Sqlite => Some("-1"),
			Dialect::Mysql => Some("18446744073709551615"),
			Dialect::Postgres => None,
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Dialect::Sqlite, "user", "\"user\"")]
	#[case(Dialect::Postgres, "user", "\"user\"")]
	#[case(Dialect::Mysql, "user", "`user`")]
	#[case(Dialect::Mysql, "we`ird", "`we``ird`")]
	fn test_escape_identifier(#[case] dialect: Dialect, #[case] ident: &str, #[case] expected: &str) {
		assert_eq!(dialect.escape_identifier(ident), expected);
	}

	#[rstest]
	fn test_deserialize_mariadb_alias() {
		let dialect: Dialect = serde_json::from_str("\"mariadb\"").unwrap();
		assert_eq!(dialect, Dialect::Mysql);
	}
}
