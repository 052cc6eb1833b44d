//! Binding engine module.
//!
//! Values, terms, the value normalizer, the placeholder hasher, the
//! expression binder and the INSERT/UPDATE preprocessors.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "core")]
//! use sqlres::core::{ExpressionBinder, Term, ValueHashMap};
//! ```

#[cfg(feature = "core")]
pub use sqlres_core::*;
