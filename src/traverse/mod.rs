//! Resumable path traversal engine.
//!
//! [`Traversal`] is a single-pass cursor that walks a path expression
//! against a document and reports one visited key at a time. The caller
//! steers it: each [`Traversal::step`] takes a [`Directive`] that applies to
//! the previously reported node and returns either the next visited node or
//! the completed traversal's breakpoint list.
//!
//! Wildcard segments fan out over all keys present at that point of the
//! document, breadth first: every sibling branch advances one level before
//! any branch is pushed deeper. Passing [`Directive::Follow`] on a
//! wildcard-derived node instead descends that one branch depth first, then
//! resumes the breadth-first sweep of its siblings;
//! [`Traversal::cancel_follow`] abandons one such descent per call.
//!
//! Wildcard expansions that find nothing to expand (the value at that point
//! is not a container, or is an empty one) record the branch's parent node
//! in the breakpoint list instead of visiting anything.
//!
//! # Example
//!
//! ```
//! use docpath::document::parser::parse_json;
//! use docpath::path::DocPath;
//! use docpath::traverse::{Directive, StepResult, Traversal};
//!
//! let doc = parse_json(r#"{"foo": {"bar": [{"baz": 1}]}}"#).unwrap();
//! let path: DocPath = "foo.bar[0].baz".parse().unwrap();
//!
//! let mut traversal = Traversal::new(path, &doc);
//! let mut keys = Vec::new();
//! while let StepResult::Visited { node, .. } = traversal.step(Directive::Continue) {
//!     keys.push(traversal.arena().node(node).key().to_string());
//! }
//! assert_eq!(keys, ["foo", "bar", "0", "baz"]);
//! ```

use std::collections::VecDeque;

use crate::document::value::{DocValue, NodeKey};
use crate::nodes::{NodeArena, NodeId};
use crate::path::{DocPath, Segment};

/// Caller instruction applied to the most recently visited node.
///
/// A directive arriving after a terminal-key visit is ignored: the path ends
/// there, so there is nothing to push deeper or to unwind. The directive
/// passed to the very first `step` has no visited node to apply to and is
/// likewise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    /// Advance breadth first: queue the visited node's child level behind
    /// the pending sibling branches.
    #[default]
    Continue,
    /// Descend depth first into a wildcard-derived node before resuming its
    /// siblings. On a node that did not come from a wildcard expansion this
    /// degrades to `Continue`.
    Follow,
    /// Discard every pending branch and finish the traversal.
    Cancel,
}

/// Outcome of one engine step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// A key was visited. `wildcard` is true when the key came from a
    /// wildcard expansion, which is when `Follow` has an effect.
    Visited { node: NodeId, wildcard: bool },
    /// Traversal is complete. `breakpoints` lists the parent of every
    /// wildcard expansion that found no keys, in the order they were hit;
    /// an entry is `None` when the failed wildcard was the first path
    /// segment and so had no parent node.
    Done { breakpoints: Vec<Option<NodeId>> },
}

impl StepResult {
    /// True for the `Done` variant.
    pub fn is_done(&self) -> bool {
        matches!(self, StepResult::Done { .. })
    }
}

/// One queued branch: the next segment of `path` at `depth` is due to be
/// resolved against `doc`.
struct PendingVisit {
    depth: usize,
    parent: Option<NodeId>,
    path: DocPath,
    doc: Option<DocValue>,
    wildcard: bool,
}

/// The visit reported by the previous step, awaiting its directive.
struct Suspended {
    node: NodeId,
    depth: usize,
    path: DocPath,
    wildcard: bool,
}

impl Suspended {
    fn is_terminal(&self) -> bool {
        self.depth + 1 == self.path.len()
    }
}

/// A single forward-only traversal of one path over one document.
///
/// The engine owns a snapshot of the sub-document values it walks and the
/// [`NodeArena`] recording every visited key. Between steps the caller may
/// overwrite a visited node's value through [`Traversal::arena_mut`]; the
/// overwritten value is what descends into child visits and what a later
/// write-back commits. Mutating the original document mid-traversal is not
/// reflected into branches already queued.
///
/// Traversing again requires a new instance. The engine itself never fails:
/// missing keys are visited with an absent value, and empty wildcard
/// expansions become breakpoint entries.
pub struct Traversal {
    arena: NodeArena,
    queue: VecDeque<PendingVisit>,
    saved: Vec<VecDeque<PendingVisit>>,
    breakpoints: Vec<Option<NodeId>>,
    suspended: Option<Suspended>,
    finished: bool,
}

impl Traversal {
    /// Creates a traversal of `path` over `doc`.
    ///
    /// A zero-length path visits nothing and is immediately done.
    pub fn new(path: DocPath, doc: &DocValue) -> Self {
        let mut queue = VecDeque::new();
        let finished = path.is_empty();
        if !finished {
            queue.push_back(PendingVisit {
                depth: 0,
                parent: None,
                path,
                doc: Some(doc.clone()),
                wildcard: false,
            });
        }
        Self {
            arena: NodeArena::new(),
            queue,
            saved: Vec::new(),
            breakpoints: Vec::new(),
            suspended: None,
            finished,
        }
    }

    /// Number of `Follow` descents currently active.
    pub fn follow_depth(&self) -> usize {
        self.saved.len()
    }

    /// Snapshot of the breakpoints recorded so far.
    pub fn could_not_follow(&self) -> Vec<Option<NodeId>> {
        self.breakpoints.clone()
    }

    /// The visited-node tree built so far.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Mutable access to the visited-node tree, for overwriting node values
    /// between steps.
    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    /// Consumes the traversal, keeping the visited-node tree.
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// True once the traversal has reported `Done`.
    pub fn is_done(&self) -> bool {
        self.finished
    }

    /// Applies `directive` to the previously visited node and advances to
    /// the next visit or to completion.
    pub fn step(&mut self, directive: Directive) -> StepResult {
        if self.finished {
            return self.done_result();
        }

        if let Some(suspended) = self.suspended.take() {
            if !suspended.is_terminal() {
                match directive {
                    Directive::Cancel => {
                        self.queue.clear();
                        self.saved.clear();
                        self.finished = true;
                        return self.done_result();
                    }
                    Directive::Follow if suspended.wildcard => {
                        self.descend(suspended);
                    }
                    _ => {
                        self.push_child_visit(suspended);
                    }
                }
            }
        }

        self.run()
    }

    /// Abandons one active `Follow` descent and resumes the breadth-first
    /// sweep one level up, reporting its next visit. With no descent active
    /// the whole traversal finishes instead. Like any directive, a cancel
    /// arriving right after a terminal-key visit is ignored.
    pub fn cancel_follow(&mut self) -> StepResult {
        if self.finished {
            return self.done_result();
        }

        if let Some(suspended) = self.suspended.take() {
            if suspended.is_terminal() {
                return self.run();
            }
        }

        match self.saved.pop() {
            Some(outer) => {
                self.queue = outer;
                self.run()
            }
            None => {
                self.queue.clear();
                self.finished = true;
                self.done_result()
            }
        }
    }

    /// Queues the suspended node's child level at the back of the current
    /// queue. This is what keeps sibling wildcard branches breadth first:
    /// every pending branch advances one level before this one goes deeper.
    fn push_child_visit(&mut self, suspended: Suspended) {
        let doc = self.arena.node(suspended.node).value().cloned();
        self.queue.push_back(PendingVisit {
            depth: suspended.depth + 1,
            parent: Some(suspended.node),
            path: suspended.path,
            doc,
            wildcard: false,
        });
    }

    /// Starts a depth-first descent: parks the current queue and seeds a
    /// fresh one with the followed node's child level.
    fn descend(&mut self, suspended: Suspended) {
        let doc = self.arena.node(suspended.node).value().cloned();
        let outer = std::mem::take(&mut self.queue);
        self.saved.push(outer);
        self.queue.push_back(PendingVisit {
            depth: suspended.depth + 1,
            parent: Some(suspended.node),
            path: suspended.path,
            doc,
            wildcard: false,
        });
    }

    /// Drains the queue until a key is visited or everything is exhausted.
    /// Wildcard expansion happens in here and never reports a visit of its
    /// own.
    fn run(&mut self) -> StepResult {
        loop {
            let visit = match self.queue.pop_front() {
                Some(visit) => visit,
                None => {
                    // A drained nested queue resumes the parked outer sweep;
                    // a drained outermost queue is the end.
                    if let Some(outer) = self.saved.pop() {
                        self.queue = outer;
                        continue;
                    }
                    self.finished = true;
                    return self.done_result();
                }
            };

            let Some(segment) = visit.path.segment(visit.depth).cloned() else {
                continue;
            };

            match segment {
                Segment::Wildcard => self.expand_wildcard(visit),
                Segment::Name(name) => {
                    return self.visit_key(visit, NodeKey::Name(name));
                }
                Segment::Index(index) => {
                    return self.visit_key(visit, NodeKey::Index(index));
                }
            }
        }
    }

    /// Replaces a wildcard branch with one branch per key present, or
    /// records a breakpoint when there is nothing to expand. The key set is
    /// snapshotted here; keys appearing later are not picked up.
    fn expand_wildcard(&mut self, visit: PendingVisit) {
        let keys = visit.doc.as_ref().and_then(|doc| doc.enumerable_keys());
        match keys {
            Some(keys) if !keys.is_empty() => {
                for key in keys {
                    let mut branch = visit.path.clone();
                    branch.set_segment(visit.depth, Segment::from(key));
                    self.queue.push_back(PendingVisit {
                        depth: visit.depth,
                        parent: visit.parent,
                        path: branch,
                        doc: visit.doc.clone(),
                        wildcard: true,
                    });
                }
            }
            _ => self.breakpoints.push(visit.parent),
        }
    }

    /// Resolves a literal key against the branch's sub-document, records
    /// the node, and suspends. Keys under a non-container resolve to an
    /// absent value but are still visited.
    fn visit_key(&mut self, visit: PendingVisit, key: NodeKey) -> StepResult {
        let value = visit.doc.as_ref().and_then(|doc| doc.get(&key)).cloned();
        let terminal = visit.depth + 1 == visit.path.len();
        let node = match visit.parent {
            Some(parent) => self.arena.add_child(parent, key, value, terminal),
            None => self.arena.add_root(key, value, terminal),
        };
        let wildcard = visit.wildcard;
        self.suspended = Some(Suspended {
            node,
            depth: visit.depth,
            path: visit.path,
            wildcard,
        });
        StepResult::Visited { node, wildcard }
    }

    fn done_result(&self) -> StepResult {
        StepResult::Done {
            breakpoints: self.breakpoints.clone(),
        }
    }
}

/// The Continue-only drive: each item is a visited node and its wildcard
/// flag. Breakpoints remain available through
/// [`Traversal::could_not_follow`] after exhaustion.
impl Iterator for Traversal {
    type Item = (NodeId, bool);

    fn next(&mut self) -> Option<Self::Item> {
        match self.step(Directive::Continue) {
            StepResult::Visited { node, wildcard } => Some((node, wildcard)),
            StepResult::Done { .. } => None,
        }
    }
}
