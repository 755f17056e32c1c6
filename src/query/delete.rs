//! Deleting values at a path.

use super::read::read;
use crate::document::value::DocValue;
use crate::nodes::{NodeArena, NodeId};
use crate::path::DocPath;

/// What a delete did: the paths actually removed, plus the node tree and
/// breakpoints of the underlying read.
#[derive(Debug)]
pub struct DeleteReport {
    pub removed: Vec<DocPath>,
    pub arena: NodeArena,
    pub breakpoints: Vec<Option<NodeId>>,
}

/// Removes the value at every terminal node `path` matches in `doc`,
/// touching only branches whose full chain already exists.
///
/// The chain walk mirrors [`super::write`]'s commit but never creates
/// anything: a branch whose intermediate key is absent or holds a
/// non-container is skipped untouched. Removing from a mapping preserves
/// the order of the remaining keys; removing from a sequence leaves a
/// `Null` hole so sibling indices stay stable.
pub fn delete(path: &DocPath, doc: &mut DocValue) -> DeleteReport {
    let mut nodes = read(path, &*doc);
    let mut terminals = Vec::new();
    for id in nodes.by_ref() {
        terminals.push(id);
    }
    let breakpoints = nodes.breakpoints();
    let arena = nodes.into_traversal().into_arena();

    let mut removed = Vec::new();
    for id in terminals {
        if delete_node(&arena, id, doc) {
            removed.push(arena.path(id));
        }
    }

    DeleteReport {
        removed,
        arena,
        breakpoints,
    }
}

/// Walks one branch of the live document and removes its terminal key.
/// Returns false without touching anything when the chain is incomplete.
fn delete_node(arena: &NodeArena, node: NodeId, doc: &mut DocValue) -> bool {
    let chain = arena.path_to_key(node, true);
    let mut current = doc;

    for pair in chain.windows(2) {
        let key = arena.node(pair[0]).key();
        match DocValue::get_mut(current, key) {
            Some(inner) if inner.is_container() => current = inner,
            _ => return false,
        }
    }

    current.remove(arena.node(node).key()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;
    use crate::query::read_values;

    fn path(text: &str) -> DocPath {
        text.parse().unwrap()
    }

    #[test]
    fn test_delete_existing_key() {
        let mut doc = parse_json(r#"{"foo": {"bar": 1, "other": 2}}"#).unwrap();
        let report = delete(&path("foo.bar"), &mut doc);

        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.removed[0].to_string(), "foo.bar");
        let expected = parse_json(r#"{"foo": {"other": 2}}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_delete_then_read_yields_nothing() {
        let mut doc = parse_json(r#"{"foo": {"bar": [{"baz": 1}]}}"#).unwrap();
        delete(&path("foo.bar[0].baz"), &mut doc);

        let values: Vec<_> = read_values(&path("foo.bar[0].baz"), &doc).collect();
        assert_eq!(values, vec![None]);
    }

    #[test]
    fn test_delete_missing_intermediate_is_noop() {
        let mut doc = parse_json(r#"{"foo": {}}"#).unwrap();
        let before = doc.clone();
        let report = delete(&path("foo.bar[0].baz"), &mut doc);

        assert!(report.removed.is_empty());
        // No containers were created along the way.
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_scalar_intermediate_is_noop() {
        let mut doc = parse_json(r#"{"foo": {"bar": 5}}"#).unwrap();
        let before = doc.clone();
        let report = delete(&path("foo.bar.baz"), &mut doc);

        assert!(report.removed.is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_array_element_leaves_hole() {
        let mut doc = parse_json(r#"{"items": [1, 2, 3]}"#).unwrap();
        delete(&path("items[1]"), &mut doc);

        let expected = parse_json(r#"{"items": [1, null, 3]}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_delete_through_wildcard_removes_each_branch() {
        let mut doc = parse_json(
            r#"{"foo": {"b1": {"baz": 1, "keep": 1}, "b2": {"baz": 2}, "b3": {}}}"#,
        )
        .unwrap();
        let report = delete(&path("foo[*].baz"), &mut doc);

        assert_eq!(report.removed.len(), 2);
        let expected = parse_json(r#"{"foo": {"b1": {"keep": 1}, "b2": {}, "b3": {}}}"#).unwrap();
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_delete_wildcard_over_array_keeps_sibling_indices() {
        let mut doc = parse_json(r#"{"rows": [{"x": 1}, {"x": 2}, {"x": 3}]}"#).unwrap();
        let report = delete(&path("rows[*].x"), &mut doc);

        assert_eq!(report.removed.len(), 3);
        let expected = parse_json(r#"{"rows": [{}, {}, {}]}"#).unwrap();
        assert_eq!(doc, expected);
    }
}
