//! Path operations over documents.
//!
//! Thin consumers of the traversal engine: [`read`] and [`read_values`]
//! yield what a path matches, [`write`] and [`update`] assign values and
//! materialize missing intermediate containers, and [`delete`] removes
//! values only where the full chain already exists. None of them fail on
//! missing paths — a missing branch simply produces no terminal node, and
//! deleting it is a no-op.
//!
//! [`Accessor`] binds a parsed path so it can be applied to several
//! documents.
//!
//! # Example
//!
//! ```
//! use docpath::document::parser::parse_json;
//! use docpath::document::value::DocValue;
//! use docpath::path::DocPath;
//! use docpath::query;
//!
//! let mut doc = parse_json(r#"{"foo": {"b1": [{"baz": 1}], "b2": [{"baz": 2}]}}"#).unwrap();
//! let path: DocPath = "foo[*][0].baz".parse().unwrap();
//!
//! let values: Vec<_> = query::read_values(&path, &doc).collect();
//! assert_eq!(values, vec![Some(DocValue::from(1)), Some(DocValue::from(2))]);
//!
//! query::write(&path, &mut doc, DocValue::from(0));
//! let values: Vec<_> = query::read_values(&path, &doc).collect();
//! assert_eq!(values, vec![Some(DocValue::from(0)), Some(DocValue::from(0))]);
//! ```

pub mod delete;
pub mod read;
pub mod write;

pub use delete::{delete, DeleteReport};
pub use read::{read, read_values, read_values_or, ReadNodes, ReadValues, ReadValuesOr};
pub use write::{update, write, write_node, Update, WriteReport};

use crate::document::value::DocValue;
use crate::path::{DocPath, PathError};

/// A parsed path bound into a reusable accessor.
///
/// # Example
///
/// ```
/// use docpath::document::parser::parse_json;
/// use docpath::document::value::DocValue;
/// use docpath::query::Accessor;
///
/// let accessor = Accessor::parse("user.name").unwrap();
/// let mut doc = parse_json(r#"{"user": {}}"#).unwrap();
/// accessor.write(&mut doc, DocValue::from("Alice"));
///
/// let values: Vec<_> = accessor.read_values(&doc).collect();
/// assert_eq!(values, vec![Some(DocValue::from("Alice"))]);
/// ```
#[derive(Debug, Clone)]
pub struct Accessor {
    path: DocPath,
}

impl Accessor {
    /// Binds an already-parsed path.
    pub fn new(path: DocPath) -> Self {
        Self { path }
    }

    /// Parses and binds a path expression.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        Ok(Self {
            path: expression.parse()?,
        })
    }

    /// The bound path.
    pub fn path(&self) -> &DocPath {
        &self.path
    }

    /// See [`read`].
    pub fn read(&self, doc: &DocValue) -> ReadNodes {
        read(&self.path, doc)
    }

    /// See [`read_values`].
    pub fn read_values(&self, doc: &DocValue) -> ReadValues {
        read_values(&self.path, doc)
    }

    /// See [`read_values_or`].
    pub fn read_values_or(&self, doc: &DocValue, default: DocValue) -> ReadValuesOr {
        read_values_or(&self.path, doc, default)
    }

    /// See [`write`].
    pub fn write(&self, doc: &mut DocValue, value: DocValue) -> WriteReport {
        write(&self.path, doc, value)
    }

    /// See [`update`].
    pub fn update<'d>(&self, doc: &'d mut DocValue) -> Update<'d> {
        update(&self.path, doc)
    }

    /// See [`delete`].
    pub fn delete(&self, doc: &mut DocValue) -> DeleteReport {
        delete(&self.path, doc)
    }
}
