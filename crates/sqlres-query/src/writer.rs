//! SQL writer helper
//!
//! [`SqlWriter`] accumulates SQL text for one statement. Placeholders are
//! written as named tokens straight from the value hash map; nothing is
//! collected here because the hash map already is the parameter set.

use crate::dialect::Dialect;
use crate::error::{BuildError, Result};
use sqlres_core::Placeholder;

/// Builds the SQL text of one statement.
///
/// # Examples
///
/// ```
/// use sqlres_query::{Dialect, SqlWriter};
///
/// let mut writer = SqlWriter::new(Dialect::Sqlite);
/// writer.push("SELECT");
/// writer.push_space();
/// writer.push_identifier("id").unwrap();
/// writer.push_keyword("FROM");
/// writer.push_space();
/// writer.push_identifier("users").unwrap();
///
/// assert_eq!(writer.finish(), "SELECT \"id\" FROM \"users\"");
/// ```
#[derive(Debug, Clone)]
pub struct SqlWriter {
	sql: String,
	dialect: Dialect,
}

impl SqlWriter {
	pub fn new(dialect: Dialect) -> Self {
		Self {
			sql: String::new(),
			dialect,
		}
	}

	pub fn dialect(&self) -> Dialect {
		self.dialect
	}

	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Pushes a space unless the text is empty or already ends with one.
	pub fn push_space(&mut self) {
		if !self.sql.is_empty() && !self.sql.ends_with(' ') {
			self.sql.push(' ');
		}
	}

	/// Pushes a keyword preceded by a space.
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.sql.push_str(keyword);
	}

	/// Pushes one quoted identifier. Empty names are rejected.
	pub fn push_identifier(&mut self, ident: &str) -> Result<()> {
		if ident.is_empty() {
			return Err(BuildError::InvalidIdentifier(
				"identifier must not be empty".to_string(),
			));
		}
		self.sql.push_str(&self.dialect.escape_identifier(ident));
		Ok(())
	}

	/// Pushes a possibly qualified identifier such as `users.id`, quoting
	/// each part separately.
	pub fn push_qualified(&mut self, path: &str) -> Result<()> {
		let mut first = true;
		for part in path.split('.') {
			if !first {
				self.sql.push('.');
			}
			self.push_identifier(part)?;
			first = false;
		}
		Ok(())
	}

	pub fn push_placeholder(&mut self, placeholder: &Placeholder) {
		self.sql.push_str(placeholder.as_str());
	}

	pub fn push_comma(&mut self) {
		self.sql.push_str(", ");
	}

	/// Pushes `items` separated by `separator`, stopping at the first error.
	pub fn push_list<I, T, F>(&mut self, items: I, separator: &str, mut f: F) -> Result<()>
	where
		I: IntoIterator<Item = T>,
		F: FnMut(&mut Self, T) -> Result<()>,
	{
		let mut first = true;
		for item in items {
			if !first {
				self.sql.push_str(separator);
			}
			f(self, item)?;
			first = false;
		}
		Ok(())
	}

	pub fn sql(&self) -> &str {
		&self.sql
	}

	pub fn is_empty(&self) -> bool {
		self.sql.is_empty()
	}

	pub fn finish(self) -> String {
		self.sql
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_keyword_spacing() {
		let mut writer = SqlWriter::new(Dialect::Sqlite);
		writer.push_keyword("SELECT");
		writer.push_keyword("*");

		assert_eq!(writer.sql(), "SELECT *");
	}

	#[rstest]
	#[case(Dialect::Sqlite, "users.id", "\"users\".\"id\"")]
	#[case(Dialect::Mysql, "users.id", "`users`.`id`")]
	#[case(Dialect::Mysql, "id", "`id`")]
	fn test_push_qualified(#[case] dialect: Dialect, #[case] path: &str, #[case] expected: &str) {
		let mut writer = SqlWriter::new(dialect);
		writer.push_qualified(path).unwrap();

		assert_eq!(writer.finish(), expected);
	}

	#[rstest]
	fn test_empty_identifier_is_rejected() {
		let mut writer = SqlWriter::new(Dialect::Postgres);
		let err = writer.push_qualified("users.").unwrap_err();

		assert!(matches!(err, BuildError::InvalidIdentifier(_)));
	}

	#[rstest]
	fn test_push_list_separators() {
		let mut writer = SqlWriter::new(Dialect::Sqlite);
		writer
			.push_list(["a", "b", "c"], ", ", |w, name| w.push_identifier(name))
			.unwrap();

		assert_eq!(writer.sql(), "\"a\", \"b\", \"c\"");
	}
}
