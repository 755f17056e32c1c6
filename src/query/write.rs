//! Writing values at a path.

use indexmap::IndexMap;

use super::read::{read, ReadNodes};
use crate::document::value::DocValue;
use crate::nodes::{NodeArena, NodeId};
use crate::path::DocPath;

/// What a write or update did: the committed terminal nodes, the node tree
/// they live in, and the breakpoints of wildcard branches that had nothing
/// to expand.
#[derive(Debug)]
pub struct WriteReport {
    pub nodes: Vec<NodeId>,
    pub arena: NodeArena,
    pub breakpoints: Vec<Option<NodeId>>,
}

impl WriteReport {
    /// Reconstructed paths of the committed nodes.
    pub fn paths(&self) -> Vec<DocPath> {
        self.nodes.iter().map(|&id| self.arena.path(id)).collect()
    }
}

/// Assigns `value` at every terminal node `path` matches in `doc`, creating
/// missing intermediate containers.
///
/// Each matched node gets its diagnostic write counter bumped, the value
/// assigned, and its branch committed into the document. Absent
/// intermediate keys are materialized as an empty sequence when the next
/// key down is an index, else as an empty mapping; existing containers are
/// never replaced.
pub fn write(path: &DocPath, doc: &mut DocValue, value: DocValue) -> WriteReport {
    let mut nodes = read(path, &*doc);
    let mut committed = Vec::new();

    while let Some(id) = nodes.next() {
        let node = nodes.arena_mut().node_mut(id);
        node.keep_history_mut().bump();
        node.set_value(value.clone());
        write_node(nodes.arena(), id, doc);
        committed.push(id);
    }

    let breakpoints = nodes.breakpoints();
    WriteReport {
        nodes: committed,
        arena: nodes.into_traversal().into_arena(),
        breakpoints,
    }
}

/// Commits one already-positioned node's value into `doc`.
///
/// Walks the node's ancestor chain from the root down, materializing
/// containers where a key is absent or holds a scalar, then writes the
/// node's current value at its key. This is the per-branch commit `write`
/// and `update` use; it never re-traverses from the root.
pub fn write_node(arena: &NodeArena, node: NodeId, doc: &mut DocValue) {
    let chain = arena.path_to_key(node, true);
    let mut current = doc;

    for pair in chain.windows(2) {
        let key = arena.node(pair[0]).key();
        let next_key = arena.node(pair[1]).key();

        let passable = current.get(key).map(|v| v.is_container()).unwrap_or(false);
        if !passable {
            let empty = if next_key.is_index() {
                DocValue::Array(Vec::new())
            } else {
                DocValue::Object(IndexMap::new())
            };
            current.set(key, empty);
        }

        match DocValue::get_mut(current, key) {
            Some(inner) => current = inner,
            // The container would not take this key (a named key against a
            // sequence); the branch is unwritable.
            None => return,
        }
    }

    let terminal = arena.node(node);
    let value = terminal.value().cloned().unwrap_or(DocValue::Null);
    current.set(terminal.key(), value);
}

/// Stepwise write: yields each terminal node, committing the previous one
/// first.
///
/// Between steps the caller assigns a per-branch value; the node is
/// committed with whatever value it carries when the cursor moves on.
///
/// # Example
///
/// ```
/// use docpath::document::parser::parse_json;
/// use docpath::document::value::DocValue;
/// use docpath::query::update;
///
/// let mut doc = parse_json(r#"{"scores": {"a": 1, "b": 2}}"#).unwrap();
/// let path = "scores[*]".parse().unwrap();
///
/// let mut cursor = update(&path, &mut doc);
/// let mut branch = 0;
/// while let Some(node) = cursor.next_node() {
///     branch += 10;
///     cursor.set_value(node, DocValue::from(branch));
/// }
/// let report = cursor.finish();
/// assert_eq!(report.nodes.len(), 2);
/// ```
pub fn update<'d>(path: &DocPath, doc: &'d mut DocValue) -> Update<'d> {
    let nodes = read(path, &*doc);
    Update {
        nodes,
        doc,
        pending: None,
        committed: Vec::new(),
    }
}

/// Cursor for a stepwise [`update`].
pub struct Update<'d> {
    nodes: ReadNodes,
    doc: &'d mut DocValue,
    pending: Option<NodeId>,
    committed: Vec<NodeId>,
}

impl<'d> Update<'d> {
    /// Commits the previously yielded node, then yields the next terminal
    /// node.
    pub fn next_node(&mut self) -> Option<NodeId> {
        self.commit_pending();
        let id = self.nodes.next()?;
        self.pending = Some(id);
        Some(id)
    }

    /// Assigns the value that will be committed for `node`.
    pub fn set_value(&mut self, node: NodeId, value: DocValue) {
        self.nodes.arena_mut().node_mut(node).set_value(value);
    }

    pub fn arena(&self) -> &NodeArena {
        self.nodes.arena()
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        self.nodes.arena_mut()
    }

    /// Commits any still-pending node and reports what was written.
    pub fn finish(mut self) -> WriteReport {
        self.commit_pending();
        let breakpoints = self.nodes.breakpoints();
        WriteReport {
            nodes: std::mem::take(&mut self.committed),
            arena: self.nodes.into_traversal().into_arena(),
            breakpoints,
        }
    }

    fn commit_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.nodes.arena_mut().node_mut(id).keep_history_mut().bump();
            write_node(self.nodes.arena(), id, self.doc);
            self.committed.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;
    use crate::document::value::NodeKey;
    use crate::nodes::KeepHistory;
    use crate::query::read_values;

    fn path(text: &str) -> DocPath {
        text.parse().unwrap()
    }

    #[test]
    fn test_write_existing_path() {
        let mut doc = parse_json(r#"{"foo": {"bar": [{"baz": 1}]}}"#).unwrap();
        let report = write(&path("foo.bar[0].baz"), &mut doc, DocValue::from(42));

        assert_eq!(report.nodes.len(), 1);
        let values: Vec<_> = read_values(&path("foo.bar[0].baz"), &doc).collect();
        assert_eq!(values, vec![Some(DocValue::from(42))]);
    }

    #[test]
    fn test_write_materializes_missing_containers() {
        let mut doc = parse_json(r#"{"keep": true}"#).unwrap();
        write(&path("foo.bar[1].baz"), &mut doc, DocValue::from("deep"));

        let expected = parse_json(
            r#"{"keep": true, "foo": {"bar": [null, {"baz": "deep"}]}}"#,
        )
        .unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_write_array_vs_map_follows_next_segment() {
        let mut doc = parse_json("{}").unwrap();
        write(&path("a[0].b"), &mut doc, DocValue::from(1));

        let a = doc.get(&NodeKey::from("a")).unwrap();
        assert!(a.is_array());
        let first = a.get(&NodeKey::Index(0)).unwrap();
        assert!(first.is_object());
    }

    #[test]
    fn test_write_replaces_scalar_intermediate() {
        let mut doc = parse_json(r#"{"foo": 7}"#).unwrap();
        write(&path("foo.bar"), &mut doc, DocValue::from(1));
        let expected = parse_json(r#"{"foo": {"bar": 1}}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_write_keeps_existing_container_and_siblings() {
        let mut doc = parse_json(r#"{"foo": {"other": 1}}"#).unwrap();
        write(&path("foo.bar"), &mut doc, DocValue::from(2));
        let expected = parse_json(r#"{"foo": {"other": 1, "bar": 2}}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_write_through_wildcard_updates_every_branch() {
        let mut doc = parse_json(
            r#"{"foo": {"b1": [{"baz": 1}], "b2": [{"baz": 2}], "b3": [{"baz": 3}]}}"#,
        )
        .unwrap();
        let report = write(&path("foo[*][0].baz"), &mut doc, DocValue::Null);

        assert_eq!(report.nodes.len(), 3);
        let values: Vec<_> = read_values(&path("foo[*][0].baz"), &doc).collect();
        assert_eq!(values, vec![Some(DocValue::Null); 3]);
    }

    #[test]
    fn test_write_bumps_keep_history() {
        let mut doc = parse_json(r#"{"foo": 1}"#).unwrap();
        let report = write(&path("foo"), &mut doc, DocValue::from(2));
        let node = report.nodes[0];
        assert_eq!(
            report.arena.node(node).keep_history(),
            KeepHistory::Count(1)
        );
    }

    #[test]
    fn test_write_node_commits_single_branch() {
        let mut doc = parse_json(r#"{"foo": {"b1": {"x": 1}, "b2": {"x": 2}}}"#).unwrap();
        let mut nodes = read(&path("foo[*].x"), &doc);
        let first = nodes.next().unwrap();
        nodes.arena_mut().node_mut(first).set_value(DocValue::from(9));
        write_node(nodes.arena(), first, &mut doc);

        let expected = parse_json(r#"{"foo": {"b1": {"x": 9}, "b2": {"x": 2}}}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_update_commits_previous_on_next() {
        let mut doc = parse_json(r#"{"foo": {"bar": [{"baz": 1}]}}"#).unwrap();
        {
            let mut cursor = update(&path("foo.bar[0].baz"), &mut doc);
            let node = cursor.next_node().unwrap();
            cursor.set_value(node, DocValue::from("changed"));
            // Not committed yet; the commit happens on the next step.
            assert!(cursor.next_node().is_none());
            cursor.finish();
        }
        let values: Vec<_> = read_values(&path("foo.bar[0].baz"), &doc).collect();
        assert_eq!(values, vec![Some(DocValue::from("changed"))]);
    }

    #[test]
    fn test_update_assigns_distinct_values_per_branch() {
        let mut doc = parse_json(
            r#"{"foo": {"b1": [{"baz": 0}], "b2": [{"baz": 0}], "b3": [{"baz": 0}]}}"#,
        )
        .unwrap();
        {
            let mut cursor = update(&path("foo[*][0].baz"), &mut doc);
            let mut counter = 0;
            while let Some(node) = cursor.next_node() {
                counter += 1;
                cursor.set_value(node, DocValue::from(counter));
            }
            cursor.finish();
        }
        let values: Vec<_> = read_values(&path("foo[*][0].baz"), &doc).collect();
        assert_eq!(
            values,
            vec![
                Some(DocValue::from(1)),
                Some(DocValue::from(2)),
                Some(DocValue::from(3)),
            ]
        );
    }

    #[test]
    fn test_update_finish_commits_last_pending() {
        let mut doc = parse_json(r#"{"foo": 1}"#).unwrap();
        let report = {
            let mut cursor = update(&path("foo"), &mut doc);
            let node = cursor.next_node().unwrap();
            cursor.set_value(node, DocValue::from(5));
            cursor.finish()
        };
        assert_eq!(report.nodes.len(), 1);
        assert_eq!(doc.get(&NodeKey::from("foo")), Some(&DocValue::from(5)));
    }
}
