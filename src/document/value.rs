//! Document value representation.
//!
//! This module provides the core data structures for the in-memory documents
//! that docpath operates on: ordered mappings, indexed sequences, and scalar
//! values — the parsed-JSON analogue. Objects use `IndexMap` so that key
//! enumeration order is insertion order, which wildcard expansion depends on.
//!
//! # Example
//!
//! ```
//! use docpath::document::value::{DocValue, DocNumber, NodeKey};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), DocValue::String("docpath".to_string()));
//! map.insert("version".to_string(), DocValue::Number(DocNumber::Integer(3)));
//! let doc = DocValue::Object(map);
//!
//! assert!(doc.is_object());
//! assert_eq!(
//!     doc.get(&NodeKey::Name("name".to_string())),
//!     Some(&DocValue::String("docpath".to_string()))
//! );
//! ```

use indexmap::IndexMap;

/// Represents document numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum DocNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for DocNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocNumber::Integer(i) => write!(f, "{}", i),
            DocNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl DocNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            DocNumber::Integer(i) => *i as f64,
            DocNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, DocNumber::Integer(_))
    }
}

/// A concrete key into a document container: a mapping name or a sequence
/// index.
///
/// Keys of visited nodes and of expanded wildcard branches are always
/// concrete; the wildcard marker exists only in path expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Name(String),
    Index(usize),
}

impl NodeKey {
    /// Returns the name for `Name` keys, `None` for indices.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            NodeKey::Name(s) => Some(s),
            NodeKey::Index(_) => None,
        }
    }

    /// Returns true when this key addresses a sequence position.
    pub fn is_index(&self) -> bool {
        matches!(self, NodeKey::Index(_))
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Name(s) => write!(f, "{}", s),
            NodeKey::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for NodeKey {
    fn from(name: &str) -> Self {
        NodeKey::Name(name.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(name: String) -> Self {
        NodeKey::Name(name)
    }
}

impl From<usize> for NodeKey {
    fn from(index: usize) -> Self {
        NodeKey::Index(index)
    }
}

/// A document value.
///
/// This enum represents the document types docpath traverses: objects
/// (ordered key-value pairs), arrays, strings, numbers, booleans, and null.
/// Absence of a value — the analogue of a missing key — is represented
/// outside this enum as `Option::None`, distinct from `DocValue::Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// An object containing ordered key-value pairs
    Object(IndexMap<String, DocValue>),
    /// An array containing ordered values
    Array(Vec<DocValue>),
    /// A string value
    String(String),
    /// A number (integer or float)
    Number(DocNumber),
    /// A boolean
    Boolean(bool),
    /// An explicit null value
    Null,
}

impl DocValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, DocValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, DocValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::value::{DocValue, DocNumber};
    /// use indexmap::IndexMap;
    ///
    /// assert!(DocValue::Object(IndexMap::new()).is_container());
    /// assert!(DocValue::Array(vec![]).is_container());
    /// assert!(!DocValue::Number(DocNumber::Integer(42)).is_container());
    /// assert!(!DocValue::Null.is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, DocValue::Object(_) | DocValue::Array(_))
    }

    /// Looks up the value at a key.
    ///
    /// On objects, `Index` keys fall back to their string form, and on
    /// arrays, `Name` keys are honored when they parse as an index — the
    /// loose key coercion documents in the wild rely on. Lookup on a
    /// non-container is always absent.
    pub fn get(&self, key: &NodeKey) -> Option<&DocValue> {
        match self {
            DocValue::Object(map) => match key {
                NodeKey::Name(name) => map.get(name),
                NodeKey::Index(i) => map.get(i.to_string().as_str()),
            },
            DocValue::Array(items) => match key {
                NodeKey::Index(i) => items.get(*i),
                NodeKey::Name(name) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
            },
            _ => None,
        }
    }

    /// Mutable variant of [`DocValue::get`].
    pub fn get_mut(&mut self, key: &NodeKey) -> Option<&mut DocValue> {
        match self {
            DocValue::Object(map) => match key {
                NodeKey::Name(name) => map.get_mut(name),
                NodeKey::Index(i) => map.get_mut(i.to_string().as_str()),
            },
            DocValue::Array(items) => match key {
                NodeKey::Index(i) => items.get_mut(*i),
                NodeKey::Name(name) => {
                    let idx = name.parse::<usize>().ok()?;
                    items.get_mut(idx)
                }
            },
            _ => None,
        }
    }

    /// Sets the value at a key in a container.
    ///
    /// Writing past the end of an array fills the gap with `Null`. Writing a
    /// non-numeric name into an array is a no-op. Setting on a non-container
    /// is a no-op; callers materialize containers first.
    pub fn set(&mut self, key: &NodeKey, value: DocValue) {
        match self {
            DocValue::Object(map) => {
                let name = match key {
                    NodeKey::Name(name) => name.clone(),
                    NodeKey::Index(i) => i.to_string(),
                };
                map.insert(name, value);
            }
            DocValue::Array(items) => {
                let idx = match key {
                    NodeKey::Index(i) => Some(*i),
                    NodeKey::Name(name) => name.parse::<usize>().ok(),
                };
                if let Some(idx) = idx {
                    if idx >= items.len() {
                        items.resize(idx + 1, DocValue::Null);
                    }
                    items[idx] = value;
                }
            }
            _ => {}
        }
    }

    /// Removes the value at a key, returning it when present.
    ///
    /// Object removal preserves the order of the remaining keys. Array
    /// removal leaves a `Null` hole rather than shifting, so indices of the
    /// remaining elements stay stable while sibling branches of a wildcard
    /// operation are still being processed.
    pub fn remove(&mut self, key: &NodeKey) -> Option<DocValue> {
        match self {
            DocValue::Object(map) => match key {
                NodeKey::Name(name) => map.shift_remove(name),
                NodeKey::Index(i) => map.shift_remove(i.to_string().as_str()),
            },
            DocValue::Array(items) => {
                let idx = match key {
                    NodeKey::Index(i) => Some(*i),
                    NodeKey::Name(name) => name.parse::<usize>().ok(),
                }?;
                if idx < items.len() {
                    Some(std::mem::replace(&mut items[idx], DocValue::Null))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns the enumerable keys of a container, in enumeration order:
    /// ascending indices for arrays, insertion order for objects.
    ///
    /// Returns `None` for non-containers — the caller distinguishes "nothing
    /// to enumerate" from "an empty container", which returns `Some` of an
    /// empty vec.
    ///
    /// # Example
    ///
    /// ```
    /// use docpath::document::value::{DocValue, NodeKey};
    ///
    /// let arr = DocValue::Array(vec![DocValue::Null, DocValue::Boolean(true)]);
    /// assert_eq!(
    ///     arr.enumerable_keys(),
    ///     Some(vec![NodeKey::Index(0), NodeKey::Index(1)])
    /// );
    /// assert_eq!(DocValue::Null.enumerable_keys(), None);
    /// ```
    pub fn enumerable_keys(&self) -> Option<Vec<NodeKey>> {
        match self {
            DocValue::Object(map) => Some(map.keys().map(|k| NodeKey::Name(k.clone())).collect()),
            DocValue::Array(items) => Some((0..items.len()).map(NodeKey::Index).collect()),
            _ => None,
        }
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        DocValue::Number(DocNumber::Integer(i))
    }
}

impl From<f64> for DocValue {
    fn from(f: f64) -> Self {
        DocValue::Number(DocNumber::Float(f))
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> DocValue {
        let mut map = IndexMap::new();
        map.insert("alpha".to_string(), DocValue::from(1));
        map.insert("beta".to_string(), DocValue::from(2));
        map.insert("gamma".to_string(), DocValue::from(3));
        DocValue::Object(map)
    }

    #[test]
    fn test_get_by_name() {
        let doc = sample_object();
        assert_eq!(doc.get(&NodeKey::from("beta")), Some(&DocValue::from(2)));
        assert_eq!(doc.get(&NodeKey::from("missing")), None);
    }

    #[test]
    fn test_get_index_on_array() {
        let doc = DocValue::Array(vec![DocValue::from("a"), DocValue::from("b")]);
        assert_eq!(doc.get(&NodeKey::Index(1)), Some(&DocValue::from("b")));
        assert_eq!(doc.get(&NodeKey::Index(2)), None);
    }

    #[test]
    fn test_get_coerces_between_key_kinds() {
        let mut map = IndexMap::new();
        map.insert("0".to_string(), DocValue::from(true));
        let obj = DocValue::Object(map);
        assert_eq!(obj.get(&NodeKey::Index(0)), Some(&DocValue::from(true)));

        let arr = DocValue::Array(vec![DocValue::from(false)]);
        assert_eq!(arr.get(&NodeKey::from("0")), Some(&DocValue::from(false)));
        assert_eq!(arr.get(&NodeKey::from("zero")), None);
    }

    #[test]
    fn test_get_on_scalar_is_absent() {
        assert_eq!(DocValue::from(42).get(&NodeKey::from("any")), None);
        assert_eq!(DocValue::Null.get(&NodeKey::Index(0)), None);
    }

    #[test]
    fn test_set_extends_array_with_null() {
        let mut arr = DocValue::Array(vec![DocValue::from("a")]);
        arr.set(&NodeKey::Index(3), DocValue::from("d"));
        assert_eq!(
            arr,
            DocValue::Array(vec![
                DocValue::from("a"),
                DocValue::Null,
                DocValue::Null,
                DocValue::from("d"),
            ])
        );
    }

    #[test]
    fn test_set_non_numeric_name_on_array_is_noop() {
        let mut arr = DocValue::Array(vec![DocValue::from("a")]);
        arr.set(&NodeKey::from("name"), DocValue::from("x"));
        assert_eq!(arr, DocValue::Array(vec![DocValue::from("a")]));
    }

    #[test]
    fn test_remove_preserves_object_order() {
        let mut doc = sample_object();
        let removed = doc.remove(&NodeKey::from("beta"));
        assert_eq!(removed, Some(DocValue::from(2)));
        assert_eq!(
            doc.enumerable_keys(),
            Some(vec![NodeKey::from("alpha"), NodeKey::from("gamma")])
        );
    }

    #[test]
    fn test_remove_from_array_leaves_hole() {
        let mut arr = DocValue::Array(vec![DocValue::from("a"), DocValue::from("b")]);
        let removed = arr.remove(&NodeKey::Index(0));
        assert_eq!(removed, Some(DocValue::from("a")));
        assert_eq!(
            arr,
            DocValue::Array(vec![DocValue::Null, DocValue::from("b")])
        );
    }

    #[test]
    fn test_enumerable_keys_insertion_order() {
        let doc = sample_object();
        assert_eq!(
            doc.enumerable_keys(),
            Some(vec![
                NodeKey::from("alpha"),
                NodeKey::from("beta"),
                NodeKey::from("gamma"),
            ])
        );
    }

    #[test]
    fn test_enumerable_keys_empty_container() {
        assert_eq!(DocValue::Array(vec![]).enumerable_keys(), Some(vec![]));
        assert_eq!(
            DocValue::Object(IndexMap::new()).enumerable_keys(),
            Some(vec![])
        );
    }
}
