//! Integration tests for the read operations.

use docpath::document::parser::parse_json;
use docpath::document::value::{DocValue, NodeKey};
use docpath::nodes::KeepHistory;
use docpath::path::DocPath;
use docpath::query::{read, read_values, read_values_or};

fn path(text: &str) -> DocPath {
    text.parse().unwrap()
}

#[test]
fn test_read_yields_one_node_for_existing_literal_path() {
    let doc = parse_json(r#"{"foo": {"bar": [{"baz": 11}]}}"#).unwrap();
    let mut nodes = read(&path("foo.bar[0].baz"), &doc);

    let node = nodes.next().expect("one terminal node");
    let recorded = nodes.arena().node(node);
    assert_eq!(recorded.key(), &NodeKey::from("baz"));
    assert_eq!(recorded.value(), Some(&DocValue::from(11)));
    assert!(recorded.is_terminal_key());
    assert_eq!(recorded.keep_history(), KeepHistory::Off);

    assert!(nodes.next().is_none());
    assert!(nodes.breakpoints().is_empty());
}

#[test]
fn test_read_value_matches_literal_indexing() {
    let doc = parse_json(r#"{"foo": {"bar": [{"baz": 11}]}}"#).unwrap();

    let by_indexing = doc
        .get(&NodeKey::from("foo"))
        .and_then(|v| v.get(&NodeKey::from("bar")))
        .and_then(|v| v.get(&NodeKey::Index(0)))
        .and_then(|v| v.get(&NodeKey::from("baz")))
        .cloned();

    let by_path: Vec<_> = read_values(&path("foo.bar[0].baz"), &doc).collect();
    assert_eq!(by_path, vec![by_indexing]);
}

#[test]
fn test_read_wildcard_yields_k_nodes_in_enumeration_order() {
    let doc = parse_json(
        r#"{"foo": {"b1": [{"baz": 1}], "b2": [{"baz": 2}], "b3": [{"baz": 3}], "b4": [{"baz": 4}]}}"#,
    )
    .unwrap();
    let values: Vec<_> = read_values(&path("foo[*][0].baz"), &doc).collect();
    assert_eq!(
        values,
        vec![
            Some(DocValue::from(1)),
            Some(DocValue::from(2)),
            Some(DocValue::from(3)),
            Some(DocValue::from(4)),
        ]
    );
}

#[test]
fn test_read_values_example_two_branches() {
    let doc = parse_json(r#"{"foo": {"b1": [{"baz": 1}], "b2": [{"baz": 2}]}}"#).unwrap();
    let values: Vec<_> = read_values(&path("foo[*][0].baz"), &doc).collect();
    assert_eq!(values, vec![Some(DocValue::from(1)), Some(DocValue::from(2))]);
}

#[test]
fn test_read_against_empty_wildcard_target() {
    let doc = parse_json(r#"{"foo": {}}"#).unwrap();
    let mut nodes = read(&path("foo[*].baz"), &doc);

    assert!(nodes.next().is_none());
    let breakpoints = nodes.breakpoints();
    assert_eq!(breakpoints.len(), 1);
    let foo = breakpoints[0].expect("breakpoint references the foo node");
    assert_eq!(nodes.arena().node(foo).key(), &NodeKey::from("foo"));
    assert_eq!(
        nodes.arena().node(foo).value(),
        Some(&parse_json("{}").unwrap())
    );
}

#[test]
fn test_read_missing_literal_path_yields_absent_terminal() {
    let doc = parse_json(r#"{"foo": {}}"#).unwrap();
    let mut nodes = read(&path("foo.bar[0].baz"), &doc);

    let node = nodes.next().expect("terminal node exists even when absent");
    assert_eq!(nodes.arena().node(node).value(), None);
    assert!(nodes.next().is_none());
}

#[test]
fn test_read_values_or_defaults_every_absent_branch() {
    let doc = parse_json(r#"{"rows": [{"x": 1}, {}, {"x": 3}]}"#).unwrap();
    let values: Vec<_> =
        read_values_or(&path("rows[*].x"), &doc, DocValue::from(0)).collect();
    assert_eq!(
        values,
        vec![DocValue::from(1), DocValue::from(0), DocValue::from(3)]
    );
}

#[test]
fn test_read_values_or_signals_reachable_but_empty_once() {
    let doc = parse_json(r#"{"foo": {}}"#).unwrap();
    let values: Vec<_> =
        read_values_or(&path("foo[*][0].baz"), &doc, DocValue::from("none")).collect();
    assert_eq!(values, vec![DocValue::from("none")]);
}

#[test]
fn test_read_values_without_default_yields_nothing_for_empty_wildcard() {
    let doc = parse_json(r#"{"foo": {}}"#).unwrap();
    let values: Vec<_> = read_values(&path("foo[*][0].baz"), &doc).collect();
    assert!(values.is_empty());
}

#[test]
fn test_read_null_is_a_value_not_absence() {
    let doc = parse_json(r#"{"foo": null}"#).unwrap();
    let values: Vec<_> =
        read_values_or(&path("foo"), &doc, DocValue::from("fallback")).collect();
    // null is present; the default only covers truly absent keys.
    assert_eq!(values, vec![DocValue::Null]);
}

#[test]
fn test_read_escaped_wildcard_addresses_literal_star_key() {
    let doc = parse_json(r#"{"foo": {"*": [{"baz": 5}], "other": [{"baz": 6}]}}"#).unwrap();
    let mut nodes = read(&path("foo.\\*[0].baz"), &doc);

    let node = nodes.next().expect("one branch, not a fan-out");
    assert_eq!(nodes.arena().node(node).value(), Some(&DocValue::from(5)));
    assert_eq!(nodes.arena().path(node).to_string(), "foo.\\*[0].baz");
    assert!(nodes.next().is_none());
}

#[test]
fn test_read_zero_length_path_yields_nothing() {
    let doc = parse_json(r#"{"foo": 1}"#).unwrap();
    let mut nodes = read(&DocPath::new(vec![]), &doc);
    assert!(nodes.next().is_none());
    assert!(nodes.breakpoints().is_empty());
}
