#![allow(missing_docs)]

use hoconlite::{Map, Value};
use quickcheck::{Arbitrary, Gen, QuickCheck};
use rstest::rstest;

/// Converts a `serde_json` tree into ours.
fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().expect("finite")),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

fn reference(doc: &str) -> Map {
    match from_json(serde_json::from_str(doc).expect("reference decode")) {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[rstest]
#[case::flat(r#"{"a": 1, "b": "two", "c": true, "d": null}"#)]
#[case::nested(r#"{"a": {"b": {"c": {"d": [1, 2, {"e": []}]}}}}"#)]
#[case::compact(r#"{"k":[1,-2.5e-3,0,"s",{"x":{}}],"m":{"n":false}}"#)]
#[case::whitespace("\n{\r\n\t\"a\" :\t[ 1 ,\n 2 ] ,\n \"b\" : { }\n}\n")]
#[case::escapes(r#"{"esc": "\"\\\/\b\f\n\r\té😀", "kAy": 0}"#)]
#[case::unicode(r#"{"日本": "語", "emoji": "🦀"}"#)]
#[case::numbers(r#"{"n": [0, -0, 1.5, -1e10, 2E+3, 123456789012, 0.000001]}"#)]
#[case::keys_with_dots_and_spaces(r##"{"a.b": 1, " c ": 2, "#": 3}"##)]
#[case::deep_arrays(r#"{"a": [[[[]]], [[1]], [{"b": [{"c": null}]}]]}"#)]
fn matches_serde_json(#[case] doc: &str) {
    assert_eq!(hoconlite::parse_str(doc).unwrap(), reference(doc));
}

/// A JSON object with non-empty keys, built with `serde_json`.
#[derive(Debug, Clone)]
struct JsonObject(serde_json::Map<String, serde_json::Value>);

fn json_value(g: &mut Gen, depth: usize) -> serde_json::Value {
    let choices = if depth == 0 { 4 } else { 6 };
    match usize::arbitrary(g) % choices {
        0 => serde_json::Value::Null,
        1 => serde_json::Value::Bool(bool::arbitrary(g)),
        2 => {
            let n = i32::arbitrary(g);
            let scale = u8::arbitrary(g) % 4;
            serde_json::json!(f64::from(n) / 10f64.powi(i32::from(scale)))
        }
        3 => serde_json::Value::String(String::arbitrary(g)),
        4 => serde_json::Value::Array((0..usize::arbitrary(g) % 3).map(|_| json_value(g, depth - 1)).collect()),
        _ => serde_json::Value::Object(json_object(g, depth - 1)),
    }
}

fn json_object(g: &mut Gen, depth: usize) -> serde_json::Map<String, serde_json::Value> {
    (0..usize::arbitrary(g) % 4)
        .map(|_| {
            let mut key = String::arbitrary(g);
            if key.is_empty() {
                key.push('k');
            }
            (key, json_value(g, depth))
        })
        .collect()
}

impl Arbitrary for JsonObject {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        Self(json_object(g, depth))
    }
}

#[test]
fn serde_json_output_parses_to_the_same_tree() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(obj: JsonObject, pretty: bool) -> bool {
        let value = serde_json::Value::Object(obj.0);
        let doc = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .expect("encode");
        hoconlite::parse_str(&doc).ok() == Some(reference(&doc))
    }

    let tests = if is_ci::cached() { 5_000 } else { 500 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(JsonObject, bool) -> bool);
}
