//! Path expression parser and types for structural document access.
//!
//! A path expression addresses values inside a nested document of ordered
//! mappings and indexed sequences.
//!
//! # Supported Syntax
//!
//! - `property` / `.property` - Named key access, dot separated
//! - `['property']` / `["property"]` - Bracket notation for names
//! - `[index]` - Non-negative sequence index
//! - `[*]` or `.*` - Wildcard: all enumerable keys at this position
//! - `\*` - A literal key named `*` (the wildcard marker escaped)
//! - `\.`, `\[`, `\\` - Structural characters escaped inside dotted names
//!
//! # Examples
//!
//! ```
//! // foo.bar[0].baz - one value, nested under foo.bar's first element
//! // foo[*][0].baz - fans out over every key of foo
//! // [*]foo[*].baz - wildcards at the root and below foo
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{DocPath, Segment};
pub use error::PathError;
pub use parser::Parser;
