//! sqlx-backed executors, one per supported driver

pub mod mysql;
pub mod sqlite;

pub use mysql::MySqlExecutor;
pub use sqlite::SqliteExecutor;
