//! Document parsing and serialization.
//!
//! This module converts JSON and YAML text into the internal [`DocValue`]
//! representation and back. Parsing goes through `serde_json`/`serde_yaml`
//! and then converts into our ordered representation, so object key order is
//! preserved end to end.

use super::value::{DocNumber, DocValue};
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a document value.
///
/// # Example
///
/// ```
/// use docpath::document::parser::parse_json;
///
/// let doc = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert!(doc.is_object());
/// ```
pub fn parse_json(source: &str) -> Result<DocValue> {
    let value: JsonValue = serde_json::from_str(source).context("Failed to parse JSON")?;
    Ok(from_json(value))
}

/// Parses a YAML string into a document value.
pub fn parse_yaml(source: &str) -> Result<DocValue> {
    let value: YamlValue = serde_yaml::from_str(source).context("Failed to parse YAML")?;
    from_yaml(value)
}

/// Serializes a document value as JSON with the given indent width.
pub fn to_json_string(value: &DocValue, indent: usize) -> Result<String> {
    let json = to_json(value);
    let indent_bytes = vec![b' '; indent];
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(&json, &mut serializer).context("Failed to serialize JSON")?;
    String::from_utf8(out).context("Serialized JSON was not valid UTF-8")
}

/// Serializes a document value as YAML.
pub fn to_yaml_string(value: &DocValue) -> Result<String> {
    serde_yaml::to_string(&to_json(value)).context("Failed to serialize YAML")
}

/// Converts a `serde_json::Value` into a document value.
pub fn from_json(value: JsonValue) -> DocValue {
    match value {
        JsonValue::Null => DocValue::Null,
        JsonValue::Bool(b) => DocValue::Boolean(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DocValue::Number(DocNumber::Integer(i))
            } else {
                DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        JsonValue::String(s) => DocValue::String(s),
        JsonValue::Array(items) => DocValue::Array(items.into_iter().map(from_json).collect()),
        JsonValue::Object(map) => {
            let mut fields = IndexMap::new();
            for (key, val) in map {
                fields.insert(key, from_json(val));
            }
            DocValue::Object(fields)
        }
    }
}

/// Converts a `serde_yaml::Value` into a document value.
///
/// Mapping keys must be scalars; they are stored in string form.
pub fn from_yaml(value: YamlValue) -> Result<DocValue> {
    match value {
        YamlValue::Null => Ok(DocValue::Null),
        YamlValue::Bool(b) => Ok(DocValue::Boolean(b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(DocValue::Number(DocNumber::Integer(i)))
            } else {
                Ok(DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0))))
            }
        }
        YamlValue::String(s) => Ok(DocValue::String(s)),
        YamlValue::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(from_yaml(item)?);
            }
            Ok(DocValue::Array(out))
        }
        YamlValue::Mapping(map) => {
            let mut fields = IndexMap::new();
            for (key, val) in map {
                let key = match key {
                    YamlValue::String(s) => s,
                    YamlValue::Number(n) => n.to_string(),
                    YamlValue::Bool(b) => b.to_string(),
                    other => {
                        return Err(anyhow!("Unsupported YAML mapping key: {:?}", other));
                    }
                };
                fields.insert(key, from_yaml(val)?);
            }
            Ok(DocValue::Object(fields))
        }
        YamlValue::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Converts a document value into a `serde_json::Value`.
pub fn to_json(value: &DocValue) -> JsonValue {
    match value {
        DocValue::Null => JsonValue::Null,
        DocValue::Boolean(b) => JsonValue::Bool(*b),
        DocValue::Number(DocNumber::Integer(i)) => JsonValue::Number((*i).into()),
        DocValue::Number(DocNumber::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        DocValue::String(s) => JsonValue::String(s.clone()),
        DocValue::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        DocValue::Object(map) => {
            let mut fields = serde_json::Map::new();
            for (key, val) in map {
                fields.insert(key.clone(), to_json(val));
            }
            JsonValue::Object(fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::value::NodeKey;

    #[test]
    fn test_parse_json_preserves_key_order() {
        let doc = parse_json(r#"{"zebra": 1, "apple": 2, "mango": 3}"#).unwrap();
        assert_eq!(
            doc.enumerable_keys(),
            Some(vec![
                NodeKey::from("zebra"),
                NodeKey::from("apple"),
                NodeKey::from("mango"),
            ])
        );
    }

    #[test]
    fn test_parse_json_numbers() {
        let doc = parse_json(r#"{"int": 7, "float": 2.5}"#).unwrap();
        assert_eq!(doc.get(&NodeKey::from("int")), Some(&DocValue::from(7)));
        assert_eq!(doc.get(&NodeKey::from("float")), Some(&DocValue::from(2.5)));
    }

    #[test]
    fn test_parse_json_rejects_invalid() {
        assert!(parse_json("{not json").is_err());
    }

    #[test]
    fn test_parse_yaml_nested() {
        let doc = parse_yaml("foo:\n  bar:\n    - baz: 1\n").unwrap();
        let foo = doc.get(&NodeKey::from("foo")).unwrap();
        let bar = foo.get(&NodeKey::from("bar")).unwrap();
        assert!(bar.is_array());
    }

    #[test]
    fn test_json_round_trip() {
        let source = r#"{"a": [1, null, true], "b": {"c": "text"}}"#;
        let doc = parse_json(source).unwrap();
        let rendered = to_json_string(&doc, 2).unwrap();
        let reparsed = parse_json(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_yaml_round_trip() {
        let doc = parse_yaml("items:\n  - 1\n  - 2\nname: test\n").unwrap();
        let rendered = to_yaml_string(&doc).unwrap();
        let reparsed = parse_yaml(&rendered).unwrap();
        assert_eq!(doc, reparsed);
    }
}
