//! SQL rendering module.
//!
//! Dialects, the expression renderer and the four statement builders.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "query")]
//! use sqlres::query::{Dialect, SqlStatementBuilder, StatementBuilder};
//! ```

#[cfg(feature = "query")]
pub use sqlres_query::*;
