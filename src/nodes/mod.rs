//! Visited-node tree for path traversals.
//!
//! Every key a traversal visits is recorded as a [`PathNode`] in a
//! [`NodeArena`]. Nodes are addressed by index ([`NodeId`]), parent links are
//! indices rather than owning pointers, and children/sibling lists are only
//! appended to. Depth-0 nodes have no shared parent in the document, so the
//! arena chains them as ordered siblings in its root list — one synthetic
//! anchor for the whole traversal.
//!
//! Nodes live for one traversal: a later traversal over the same document
//! builds a fresh arena, and external document mutation is never reflected
//! back into already-recorded nodes.
//!
//! # Example
//!
//! ```
//! use docpath::document::value::{DocValue, NodeKey};
//! use docpath::nodes::NodeArena;
//!
//! let mut arena = NodeArena::new();
//! let foo = arena.add_root(NodeKey::from("foo"), Some(DocValue::Null), false);
//! let bar = arena.add_child(foo, NodeKey::Index(2), Some(DocValue::from(1)), true);
//!
//! assert_eq!(arena.node(bar).depth(), 1);
//! assert_eq!(arena.path(bar).to_string(), "foo[2]");
//! ```

use crate::document::value::{DocValue, NodeKey};
use crate::path::{DocPath, Segment};

/// Index of a node within its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Diagnostic write counter carried by each node.
///
/// Write operations bump this; nothing in the traversal engine reads it.
/// `Off` becomes `Count(1)` on the first write, counts increment after that,
/// and `On` sticks without counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepHistory {
    Off,
    On,
    Count(u32),
}

impl KeepHistory {
    /// Records one write through the node.
    pub fn bump(&mut self) {
        match self {
            KeepHistory::Off => *self = KeepHistory::Count(1),
            KeepHistory::Count(n) => *n += 1,
            KeepHistory::On => {}
        }
    }
}

/// One visited (key, value) pair.
///
/// `value` is `None` when the key was absent at visitation time — distinct
/// from an explicit `DocValue::Null`. The caller may overwrite the value
/// between traversal steps; the overwritten value is what a child traversal
/// and a later write-back see.
#[derive(Debug, Clone)]
pub struct PathNode {
    key: NodeKey,
    value: Option<DocValue>,
    depth: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    terminal: bool,
    keep_history: KeepHistory,
}

impl PathNode {
    /// The key this node was visited at.
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// The value recorded at visitation, or as last overwritten.
    pub fn value(&self) -> Option<&DocValue> {
        self.value.as_ref()
    }

    /// Mutable access to the recorded value, including its presence.
    pub fn value_mut(&mut self) -> &mut Option<DocValue> {
        &mut self.value
    }

    /// Overwrites the recorded value.
    pub fn set_value(&mut self, value: DocValue) {
        self.value = Some(value);
    }

    /// Distance from the path root: depth 0 is the first path segment.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The parent node, absent for depth-0 nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in visitation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True when this node sits on the path's final segment.
    pub fn is_terminal_key(&self) -> bool {
        self.terminal
    }

    pub fn keep_history(&self) -> KeepHistory {
        self.keep_history
    }

    pub fn keep_history_mut(&mut self) -> &mut KeepHistory {
        &mut self.keep_history
    }
}

/// Arena holding every node of one traversal.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<PathNode>,
    roots: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The depth-0 sibling chain, in visitation order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut PathNode {
        &mut self.nodes[id.0]
    }

    /// Adds (or revisits) a depth-0 node, chaining it as the next sibling.
    ///
    /// Exactly one node exists per distinct root key; a revisit refreshes the
    /// recorded value.
    pub fn add_root(&mut self, key: NodeKey, value: Option<DocValue>, terminal: bool) -> NodeId {
        if let Some(&existing) = self
            .roots
            .iter()
            .find(|&&id| self.nodes[id.0].key == key)
        {
            self.nodes[existing.0].value = value;
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(PathNode {
            key,
            value,
            depth: 0,
            parent: None,
            children: Vec::new(),
            terminal,
            keep_history: KeepHistory::Off,
        });
        self.roots.push(id);
        id
    }

    /// Adds (or revisits) a child under `parent`.
    ///
    /// Children are created lazily, exactly one per distinct key visited
    /// under a parent; a revisit refreshes the recorded value.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: NodeKey,
        value: Option<DocValue>,
        terminal: bool,
    ) -> NodeId {
        if let Some(&existing) = self.nodes[parent.0]
            .children
            .iter()
            .find(|&&id| self.nodes[id.0].key == key)
        {
            self.nodes[existing.0].value = value;
            return existing;
        }

        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(PathNode {
            key,
            value,
            depth,
            parent: Some(parent),
            children: Vec::new(),
            terminal,
            keep_history: KeepHistory::Off,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The ancestor chain of `id`, ordered from its depth-0 ancestor down.
    /// With `include_self` the node itself is the last entry.
    pub fn path_to_key(&self, id: NodeId, include_self: bool) -> Vec<NodeId> {
        let mut chain = Vec::with_capacity(self.nodes[id.0].depth + 1);
        if include_self {
            chain.push(id);
        }
        let mut current = self.nodes[id.0].parent;
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.nodes[ancestor.0].parent;
        }
        chain.reverse();
        chain
    }

    /// Reconstructs the concrete path from the root to `id`.
    pub fn path(&self, id: NodeId) -> DocPath {
        let segments = self
            .path_to_key(id, true)
            .into_iter()
            .map(|ancestor| Segment::from(self.nodes[ancestor.0].key.clone()))
            .collect();
        DocPath::new(segments)
    }
}
