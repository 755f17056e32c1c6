//! docpath - structural access to nested documents.
//!
//! docpath reads, writes, updates, and deletes values at arbitrary,
//! possibly wildcarded, paths inside in-memory documents built from ordered
//! mappings and indexed sequences. At its center is a resumable traversal
//! engine ([`traverse::Traversal`]) that walks a parsed path expression
//! against a document one key at a time, fanning wildcard segments out
//! breadth first and letting the caller steer: continue breadth first,
//! follow one wildcard branch depth first, or cancel.
//!
//! The [`query`] module builds the everyday operations on top of the
//! engine, and the binary in `main.rs` exposes them over JSON and YAML
//! files.
//!
//! ```
//! use docpath::document::parser::parse_json;
//! use docpath::document::value::DocValue;
//! use docpath::query;
//!
//! let doc = parse_json(r#"{"store": {"a": {"price": 10}, "b": {"price": 20}}}"#).unwrap();
//! let path = "store[*].price".parse().unwrap();
//!
//! let prices: Vec<_> = query::read_values(&path, &doc).collect();
//! assert_eq!(prices, vec![Some(DocValue::from(10)), Some(DocValue::from(20))]);
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod nodes;
pub mod path;
pub mod query;
pub mod traverse;
