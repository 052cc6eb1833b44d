//! Execution module.
//!
//! Query executors, the per-verb resource models and settings loading.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "database")]
//! use sqlres::db::{Clauses, SelectResourceModel, SqliteExecutor};
//! ```

#[cfg(feature = "database")]
pub use sqlres_db::*;
