//! # sqlres-core
//!
//! Expression-to-parameter binding for sqlres.
//!
//! This crate turns the literal values scattered through an expression tree,
//! an INSERT record batch or an UPDATE change-set into a single
//! [`ValueHashMap`]: a map from each distinct normalized value to a
//! deterministic placeholder token (`":" + crc32 hex`). Statement builders
//! write those placeholders into SQL text and executors bind the inverted map
//! ([`BoundParams`]) as named parameters, so both sides agree by construction.
//!
//! ## Pipeline pieces
//!
//! - [`normalize`]: canonical string form of a bindable [`Value`]
//! - [`placeholder_for`]: placeholder token of a value
//! - [`ExpressionBinder`]: pre-order walk of a [`Term`] tree
//! - [`preprocess_records`] / [`preprocess_change_set`]: INSERT and UPDATE inputs
//! - [`RecordSource`]: read access over maps, JSON, positional lists and structs
//!
//! ## Example
//!
//! ```
//! use sqlres_core::{ExpressionBinder, FieldColumnMap, Term};
//!
//! let fields = FieldColumnMap::new().with("age", "user_age");
//! let condition = Term::literal("age").gte(Term::literal(20));
//!
//! let map = ExpressionBinder::new()
//!     .bind(Some(&condition), &fields.field_names())
//!     .unwrap();
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get("20").unwrap().as_str(), ":8a707622");
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod hash;
pub mod normalize;
pub mod preprocess;
pub mod record;
pub mod term;
pub mod value;

pub use binder::{DEFAULT_MAX_DEPTH, ExpressionBinder};
pub use config::{FieldColumnMap, IgnoreSet};
pub use error::{BindError, Result};
pub use hash::{Binding, BoundParams, Placeholder, ValueHashMap, placeholder_for};
pub use normalize::normalize;
pub use preprocess::{
	ChangeValue, ColumnChangeSet, ColumnRow, preprocess_change_set, preprocess_records,
};
pub use record::{RecordFn, RecordSource, SerializedRecord};
pub use term::{ExpressionType, Order, Term};
pub use value::Value;
