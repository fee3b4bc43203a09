//! # Document Parsing and Preview
//!
//! Parses YAML text via `serde_yaml`, then converts the YAML value tree into
//! a `serde_json::Value`. The workspace enables serde_json's
//! `preserve_order` feature, so mappings keep the order keys were
//! encountered in the source and every rendering is deterministic.
//!
//! ## Conversion rules
//!
//! - Merge keys (`<<`) are applied before conversion.
//! - Tags are stripped; the tagged inner value is kept.
//! - Scalar mapping keys are stringified (`1` → `"1"`, `true` → `"true"`,
//!   `~` → `"null"`). Sequence or mapping keys are rejected, and so are two
//!   keys that stringify to the same text (`1` and `"1"`).
//! - Floats without a JSON representation become their YAML spelling as a
//!   string: `.inf`, `-.inf`, `.nan`.
//!
//! [`check_syntax`] stops before conversion. Saving only requires that.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::DocumentError;

/// Parse YAML text into a document tree.
///
/// A text without any document (empty, whitespace or comments only)
/// parses to [`Value::Null`]. Multi-document streams are rejected.
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    yaml_to_json_value(parse_yaml(text)?)
}

/// Check that `text` is a single well-formed YAML document, without
/// requiring a JSON representation.
pub fn check_syntax(text: &str) -> Result<(), DocumentError> {
    parse_yaml(text).map(drop)
}

fn parse_yaml(text: &str) -> Result<serde_yaml::Value, DocumentError> {
    let mut documents = serde_yaml::Deserializer::from_str(text);
    let Some(first) = documents.next() else {
        return Ok(serde_yaml::Value::Null);
    };
    let mut yaml = serde_yaml::Value::deserialize(first)?;
    if documents.next().is_some() {
        return Err(DocumentError::Syntax {
            message: "expected a single document in the stream, but found another document"
                .to_string(),
            location: None,
        });
    }
    yaml.apply_merge()?;
    Ok(yaml)
}

/// Render a document as indented, Unicode-preserving JSON text.
pub fn to_pretty_json(doc: &Value) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(doc).map_err(|e| DocumentError::Unrepresentable(e.to_string()))
}

/// Preview text for a parsed document; `None` for an empty document.
pub fn render_preview(doc: &Value) -> Result<Option<String>, DocumentError> {
    if doc.is_null() {
        return Ok(None);
    }
    to_pretty_json(doc).map(Some)
}

/// Parse `text` and render its JSON preview in one step.
pub fn parse_and_preview(text: &str) -> Result<(Value, Option<String>), DocumentError> {
    let doc = parse_document(text)?;
    let preview = render_preview(&doc)?;
    Ok((doc, preview))
}

fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, DocumentError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => Ok(number_to_json(&n)),
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, DocumentError> =
                seq.into_iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::new();
            for (k, v) in map {
                let key = mapping_key(k)?;
                if obj.contains_key(&key) {
                    return Err(DocumentError::Unrepresentable(format!(
                        "mapping has more than one key that reads as {key:?}"
                    )));
                }
                obj.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(obj))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::from(u))
    } else {
        // serde_yaml spells non-finite floats `.inf`, `-.inf` and `.nan`.
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, DocumentError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(DocumentError::Unrepresentable(format!(
            "keys must be str, int, float, bool or None, not {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        _ => "scalar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn parses_simple_mapping_in_source_order() {
        let doc = parse_document("zeta: 1\nalpha: two\nmid: [true, null]\n").unwrap();
        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(doc["mid"], json!([true, null]));
    }

    #[test]
    fn empty_text_is_null_with_no_preview() {
        let (doc, preview) = parse_and_preview("").unwrap();
        assert!(doc.is_null());
        assert!(preview.is_none());

        let (doc, preview) = parse_and_preview("   \n# only a comment\n").unwrap();
        assert!(doc.is_null());
        assert!(preview.is_none());
    }

    #[test]
    fn preview_is_indented_and_keeps_unicode() {
        let (_, preview) = parse_and_preview("name: Ärztliche Übergabe\ncount: 2\n").unwrap();
        let preview = preview.unwrap();
        assert_eq!(
            preview,
            "{\n  \"name\": \"Ärztliche Übergabe\",\n  \"count\": 2\n}"
        );
    }

    #[test]
    fn scalar_root_has_preview() {
        let (doc, preview) = parse_and_preview("42").unwrap();
        assert_eq!(doc, json!(42));
        assert_eq!(preview.as_deref(), Some("42"));
    }

    #[test]
    fn unclosed_flow_sequence_is_syntax_error_with_location() {
        let err = parse_document("a: [1,2").unwrap_err();
        match &err {
            DocumentError::Syntax { location, .. } => assert!(location.is_some()),
            other => panic!("expected syntax error, got {other:?}"),
        }
        let text = err.to_string();
        assert!(text.starts_with("YAML parsing error: "), "got: {text}");
        assert!(text.contains(" at line "), "got: {text}");
        assert!(text.contains(", column "), "got: {text}");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = parse_document("a: 1\na: 2\n").unwrap_err();
        assert!(matches!(err, DocumentError::Syntax { .. }));
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let doc = parse_document("1: one\ntrue: yes\n~: nothing\n").unwrap();
        assert_eq!(doc["1"], json!("one"));
        assert_eq!(doc["true"], json!("yes"));
        assert_eq!(doc["null"], json!("nothing"));
    }

    #[test]
    fn complex_key_is_unrepresentable() {
        let err = parse_document("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, DocumentError::Unrepresentable(_)));
        assert!(err.to_string().starts_with("Unexpected error: "));
    }

    #[test]
    fn non_finite_floats_render_as_yaml_spelling() {
        let (doc, preview) = parse_and_preview("hi: .inf\nlo: -.inf\nodd: .nan\n").unwrap();
        assert_eq!(doc, json!({"hi": ".inf", "lo": "-.inf", "odd": ".nan"}));
        assert!(preview.unwrap().contains("\"hi\": \".inf\""));
    }

    #[test]
    fn keys_colliding_after_stringification_are_unrepresentable() {
        let err = parse_document("1: a\n\"1\": b\n").unwrap_err();
        assert!(matches!(err, DocumentError::Unrepresentable(_)));
        assert!(err.to_string().contains("\"1\""), "got: {err}");
    }

    #[test]
    fn check_syntax_accepts_what_json_cannot_hold() {
        assert!(check_syntax("maxDose: .inf\n").is_ok());
        assert!(check_syntax("? [a, b]\n: value\n").is_ok());
        assert!(check_syntax("1: a\n\"1\": b\n").is_ok());
        assert!(check_syntax("").is_ok());
    }

    #[test]
    fn check_syntax_rejects_malformed_yaml() {
        assert!(matches!(
            check_syntax("a: [1,2"),
            Err(DocumentError::Syntax { .. })
        ));
        assert!(check_syntax("a: 1\n---\nb: 2\n").is_err());
    }

    #[test]
    fn syntax_error_mentions_its_position_once() {
        let text = parse_document("a: [1,2").unwrap_err().to_string();
        assert_eq!(text.matches(" at line ").count(), 1, "got: {text}");
    }

    #[test]
    fn tags_are_stripped() {
        let doc = parse_document("value: !custom hello\n").unwrap();
        assert_eq!(doc["value"], json!("hello"));
    }

    #[test]
    fn multiple_documents_are_rejected() {
        let err = parse_document("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(matches!(err, DocumentError::Syntax { location: None, .. }));
    }

    #[test]
    fn explicit_empty_document_is_null() {
        assert!(parse_document("---\n").unwrap().is_null());
    }

    #[test]
    fn merge_keys_are_applied() {
        let text = "base: &base\n  a: 1\nderived:\n  <<: *base\n  b: 2\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc["derived"]["a"], json!(1));
        assert_eq!(doc["derived"]["b"], json!(2));
    }

    #[test]
    fn floats_survive_preview() {
        let doc = parse_document("ratio: 0.25\n").unwrap();
        assert_eq!(doc["ratio"], json!(0.25));
    }

    // ── Properties ──────────────────────────────────────────────────

    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|i| json!(i)),
            "[a-zA-Z0-9_ ]{0,12}".prop_map(Value::String),
        ]
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        arb_scalar().prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn preview_reparses_to_the_same_document(value in arb_value()) {
            let text = serde_yaml::to_string(&value).unwrap();
            let doc = parse_document(&text).unwrap();
            let preview = to_pretty_json(&doc).unwrap();
            let reparsed = parse_document(&preview).unwrap();
            prop_assert_eq!(reparsed, doc);
        }

        #[test]
        fn preview_is_deterministic(value in arb_value()) {
            let text = serde_yaml::to_string(&value).unwrap();
            let first = parse_and_preview(&text).unwrap();
            let second = parse_and_preview(&text).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
