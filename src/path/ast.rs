//! Path expression types.

use std::fmt;
use std::str::FromStr;

use super::error::PathError;
use super::parser::Parser;
use crate::document::value::NodeKey;

/// A segment in a path expression.
///
/// The wildcard marker exists only here; once a traversal expands a wildcard
/// over the keys present in the document, the expanded branches carry
/// concrete `Name`/`Index` segments. A literal key spelled `*` in path text
/// must be escaped as `\*` and parses to `Name("*")`, so no escape handling
/// is needed past the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Named key (`property`, `['property']`)
    Name(String),
    /// Sequence index (`[0]`)
    Index(usize),
    /// Wildcard (`*` or `[*]`) - all enumerable keys
    Wildcard,
}

impl Segment {
    /// Returns true for the wildcard marker.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }

    /// The concrete key this segment addresses, `None` for the wildcard.
    pub fn as_key(&self) -> Option<NodeKey> {
        match self {
            Segment::Name(name) => Some(NodeKey::Name(name.clone())),
            Segment::Index(i) => Some(NodeKey::Index(*i)),
            Segment::Wildcard => None,
        }
    }
}

impl From<NodeKey> for Segment {
    fn from(key: NodeKey) -> Self {
        match key {
            NodeKey::Name(name) => Segment::Name(name),
            NodeKey::Index(i) => Segment::Index(i),
        }
    }
}

/// A complete parsed path expression: an ordered sequence of segments.
///
/// # Example
///
/// ```
/// use docpath::path::{DocPath, Segment};
///
/// let path: DocPath = "foo.bar[0].baz".parse().unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.segment(1), Some(&Segment::Name("bar".to_string())));
/// assert_eq!(path.to_string(), "foo.bar[0].baz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPath {
    segments: Vec<Segment>,
}

impl DocPath {
    /// Creates a path from the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the path has no segments. A zero-length path addresses
    /// nothing: traversing it is immediately done.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment at `index`, if any.
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Replaces the segment at `index`. Used by wildcard expansion to
    /// substitute a concrete key into a cloned branch path.
    pub fn set_segment(&mut self, index: usize, segment: Segment) {
        if index < self.segments.len() {
            self.segments[index] = segment;
        }
    }

    /// Iterates the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for DocPath {
    fn from(segments: Vec<Segment>) -> Self {
        DocPath::new(segments)
    }
}

/// A bare index is a valid one-segment path.
impl From<usize> for DocPath {
    fn from(index: usize) -> Self {
        DocPath::new(vec![Segment::Index(index)])
    }
}

impl FromStr for DocPath {
    type Err = PathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Parser::parse(input)
    }
}

/// Escapes structural characters in a name for dotted display.
fn escape_name(name: &str) -> String {
    if name == "*" {
        return "\\*".to_string();
    }
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == '\\' || ch == '.' || ch == '[' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for DocPath {
    /// Reconstructs the dotted/bracketed path text: names dot separated,
    /// indices bracketed, wildcards as `[*]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                Segment::Name(name) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", escape_name(name))?;
                }
                Segment::Index(i) => write!(f, "[{}]", i)?,
                Segment::Wildcard => write!(f, "[*]")?,
            }
            first = false;
        }
        Ok(())
    }
}
