//! Settings for connecting executors and describing resources
//!
//! Settings are read from TOML:
//!
//! ```toml
//! [database]
//! url = "sqlite::memory:"
//! max_depth = 64
//!
//! [resources.users]
//! tables = ["users"]
//!
//! [resources.users.field_columns]
//! id = "id"
//! name = "user_name"
//! age = "user_age"
//! ```

use crate::dialect::{MySqlExecutor, SqliteExecutor};
use crate::error::{DatabaseError, Result};
use crate::executor::QueryExecutor;
use crate::models::{
	DeleteResourceModel, InsertResourceModel, SelectResourceModel, UpdateResourceModel,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlres_core::{DEFAULT_MAX_DEPTH, ExpressionBinder, FieldColumnMap};
use sqlres_query::{Dialect, Join};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Top-level settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
	#[serde(default)]
	pub database: DatabaseSettings,

	/// Resource definitions keyed by resource name
	#[serde(default)]
	pub resources: IndexMap<String, ResourceSettings>,
}

impl Settings {
	pub fn from_toml_str(contents: &str) -> Result<Self> {
		toml::from_str(contents)
			.map_err(|e| DatabaseError::Config(format!("TOML parse error: {}", e)))
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|e| {
			DatabaseError::Config(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml_str(&contents),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| DatabaseError::Config(format!("JSON parse error: {}", e))),
			_ => Err(DatabaseError::Config(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}

	/// Overrides the database URL with `DATABASE_URL` when it is set.
	pub fn with_env(mut self) -> Self {
		if let Ok(url) = std::env::var("DATABASE_URL") {
			self.database.url = url;
		}
		self
	}

	pub fn resource(&self, name: &str) -> Result<&ResourceSettings> {
		self.resources
			.get(name)
			.ok_or_else(|| DatabaseError::Config(format!("Unknown resource '{}'", name)))
	}
}

/// Connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
	pub url: String,

	/// Nesting ceiling for condition trees
	#[serde(default = "default_max_depth")]
	pub max_depth: usize,
}

impl Default for DatabaseSettings {
	fn default() -> Self {
		Self {
			url: "sqlite::memory:".to_string(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

fn default_max_depth() -> usize {
	DEFAULT_MAX_DEPTH
}

impl DatabaseSettings {
	/// Dialect selected by the URL scheme.
	pub fn dialect(&self) -> Result<Dialect> {
		let scheme = self.url.split(':').next().unwrap_or_default();
		match scheme {
			"sqlite" => Ok(Dialect::Sqlite),
			"mysql" | "mariadb" => Ok(Dialect::Mysql),
			"postgres" | "postgresql" => Err(DatabaseError::NotSupported(
				"no PostgreSQL executor is available".to_string(),
			)),
			other => Err(DatabaseError::Config(format!(
				"Unsupported database scheme '{}'",
				other
			))),
		}
	}

	/// Opens the executor matching the URL scheme.
	pub async fn connect(&self) -> Result<Arc<dyn QueryExecutor>> {
		let dialect = self.dialect()?;
		debug!(%dialect, "connecting executor");
		Ok(match dialect {
			Dialect::Sqlite => Arc::new(SqliteExecutor::connect(&self.url).await?),
			Dialect::Mysql => Arc::new(MySqlExecutor::connect(&self.url).await?),
			Dialect::Postgres => {
				return Err(DatabaseError::NotSupported(
					"no PostgreSQL executor is available".to_string(),
				));
			}
		})
	}

	pub fn binder(&self) -> ExpressionBinder {
		ExpressionBinder::new().with_max_depth(self.max_depth)
	}
}

/// Static table and column metadata of one resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSettings {
	/// Tables read by SELECT; the first one is the target of INSERT, UPDATE and DELETE
	pub tables: Vec<String>,

	#[serde(default)]
	pub field_columns: FieldColumnMap,

	#[serde(default)]
	pub joins: Vec<Join>,
}

impl ResourceSettings {
	fn primary_table(&self) -> Result<&str> {
		self.tables
			.first()
			.map(String::as_str)
			.ok_or_else(|| DatabaseError::Config("resource has no tables".to_string()))
	}

	pub fn select_model(
		&self,
		executor: Arc<dyn QueryExecutor>,
		binder: ExpressionBinder,
	) -> Result<SelectResourceModel> {
		self.primary_table()?;
		Ok(
			SelectResourceModel::new(executor, self.tables.clone(), self.field_columns.clone())
				.with_joins(self.joins.clone())
				.with_binder(binder),
		)
	}

	pub fn insert_model(
		&self,
		executor: Arc<dyn QueryExecutor>,
		binder: ExpressionBinder,
	) -> Result<InsertResourceModel> {
		Ok(
			InsertResourceModel::new(executor, self.primary_table()?, self.field_columns.clone())
				.with_binder(binder),
		)
	}

	pub fn update_model(
		&self,
		executor: Arc<dyn QueryExecutor>,
		binder: ExpressionBinder,
	) -> Result<UpdateResourceModel> {
		Ok(
			UpdateResourceModel::new(executor, self.primary_table()?, self.field_columns.clone())
				.with_binder(binder),
		)
	}

	pub fn delete_model(
		&self,
		executor: Arc<dyn QueryExecutor>,
		binder: ExpressionBinder,
	) -> Result<DeleteResourceModel> {
		Ok(
			DeleteResourceModel::new(executor, self.primary_table()?, self.field_columns.clone())
				.with_binder(binder),
		)
	}
}
