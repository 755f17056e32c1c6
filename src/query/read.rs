//! Reading values at a path.

use crate::document::value::DocValue;
use crate::nodes::{NodeArena, NodeId};
use crate::path::DocPath;
use crate::traverse::Traversal;

/// Starts a lazy read of every terminal node `path` matches in `doc`.
///
/// Drives the engine breadth first with no depth-first descents: full
/// breadth expansion through every depth already reaches every wildcard
/// combination. Nodes on non-final segments are walked but not yielded.
pub fn read(path: &DocPath, doc: &DocValue) -> ReadNodes {
    ReadNodes {
        traversal: Traversal::new(path.clone(), doc),
    }
}

/// Lazy reader over a path's terminal values.
///
/// Absent values (the path ran past what exists in the document) yield
/// `None`.
pub fn read_values(path: &DocPath, doc: &DocValue) -> ReadValues {
    ReadValues {
        nodes: read(path, doc),
    }
}

/// Like [`read_values`], with a default substituted for absent values.
///
/// When the path matched nothing at all because a wildcard had no keys to
/// expand — the target was reachable but empty — the default is yielded
/// exactly once instead of nothing.
pub fn read_values_or(path: &DocPath, doc: &DocValue, default: DocValue) -> ReadValuesOr {
    ReadValuesOr {
        nodes: read(path, doc),
        default,
        yielded: 0,
        finished: false,
    }
}

/// Iterator over the terminal nodes a path matches, in breadth-first
/// (wildcard enumeration) order.
pub struct ReadNodes {
    traversal: Traversal,
}

impl ReadNodes {
    /// The visited-node tree built so far.
    pub fn arena(&self) -> &NodeArena {
        self.traversal.arena()
    }

    /// Mutable access to visited nodes, e.g. to assign values before a
    /// write-back.
    pub fn arena_mut(&mut self) -> &mut NodeArena {
        self.traversal.arena_mut()
    }

    /// Breakpoints recorded so far; complete once iteration has finished.
    pub fn breakpoints(&self) -> Vec<Option<NodeId>> {
        self.traversal.could_not_follow()
    }

    /// Hands back the underlying engine.
    pub fn into_traversal(self) -> Traversal {
        self.traversal
    }
}

impl Iterator for ReadNodes {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, _) = self.traversal.next()?;
            if self.traversal.arena().node(node).is_terminal_key() {
                return Some(node);
            }
        }
    }
}

/// Iterator over terminal values; `None` marks a terminal key that was
/// absent from the document.
pub struct ReadValues {
    nodes: ReadNodes,
}

impl ReadValues {
    pub fn breakpoints(&self) -> Vec<Option<NodeId>> {
        self.nodes.breakpoints()
    }
}

impl Iterator for ReadValues {
    type Item = Option<DocValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        Some(self.nodes.arena().node(node).value().cloned())
    }
}

/// Iterator over terminal values with a default for absence.
pub struct ReadValuesOr {
    nodes: ReadNodes,
    default: DocValue,
    yielded: usize,
    finished: bool,
}

impl Iterator for ReadValuesOr {
    type Item = DocValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.nodes.next() {
            Some(node) => {
                self.yielded += 1;
                Some(
                    self.nodes
                        .arena()
                        .node(node)
                        .value()
                        .cloned()
                        .unwrap_or_else(|| self.default.clone()),
                )
            }
            None => {
                self.finished = true;
                // Nothing matched, but a wildcard found the spot and it was
                // empty: report the default once for the reachable-but-empty
                // case.
                if self.yielded == 0 && !self.nodes.breakpoints().is_empty() {
                    Some(self.default.clone())
                } else {
                    None
                }
            }
        }
    }
}
