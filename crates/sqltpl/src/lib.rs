//! # sqltpl
//!
//! SQL query templating with typed placeholders and conditional blocks.
//!
//! ## Placeholders
//!
//! - `?`: scalar, escaped as a literal (`'text'`, `1`, `1.5`, `NULL`)
//! - `?d`: integer (floats truncate toward zero, booleans become `0`/`1`)
//! - `?f`: float
//! - `?a`: list of values (`1, 2, 3`) or map of `` `column` = value `` pairs
//! - `?#`: column name or list of column names
//!
//! ## Conditional blocks
//!
//! Text between `{` and `}` is dropped, delimiters included, when any
//! placeholder inside it receives [`skip()`]. Blocks do not nest.
//!
//! ```
//! use sqltpl::{args, build_query, skip};
//!
//! let sql = build_query(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", [1, 2, 3], skip()],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3)");
//!
//! let sql = build_query(
//!     "SELECT name FROM users WHERE ?# IN (?a){ AND block = ?d}",
//!     &args!["user_id", [1, 2, 3], true],
//! )?;
//! assert_eq!(sql, "SELECT name FROM users WHERE `user_id` IN (1, 2, 3) AND block = 1");
//! # Ok::<(), sqltpl::BuildError>(())
//! ```
//!
//! String escaping is delegated to an [`Escaper`]; [`Dialect`] provides
//! MySQL and PostgreSQL rules.

pub mod block;
pub mod config;
mod convert;
pub mod engine;
pub mod error;
pub mod escape;
pub mod substitute;
pub mod template;
pub mod value;

pub use block::{Segment, SegmentKind};
pub use config::{SkipPolicy, TemplateConfig};
pub use engine::Templater;
pub use error::{BuildError, BuildResult, NumericKind, TemplateError};
pub use escape::{Dialect, Escaper, MySqlEscaper, PostgresEscaper};
pub use substitute::Specifier;
pub use template::{Placeholder, Template};
pub use value::Value;

/// Build a query with MySQL escaping and the default configuration.
pub fn build_query(template: &str, args: &[Value]) -> BuildResult<String> {
    Templater::mysql().build_query(template, args)
}

/// The sentinel that suppresses the `{}` block it is substituted into.
pub fn skip() -> Value {
    Value::Skip
}
