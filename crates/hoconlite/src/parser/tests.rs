use super::*;

fn scan(doc: &str) -> Vec<(String, Value)> {
    let mut scanner = Scanner::default();
    scanner.feed(doc.as_bytes()).unwrap();
    scanner
        .finish()
        .unwrap()
        .into_iter()
        .map(|pair| (pair.path.join("."), pair.value))
        .collect()
}

fn pairs(expected: &[(&str, Value)]) -> Vec<(String, Value)> {
    expected
        .iter()
        .map(|(path, value)| ((*path).to_string(), value.clone()))
        .collect()
}

#[test]
fn statements_emit_in_order() {
    assert_eq!(
        scan("b: 1\na.c: two\na.d = true\n"),
        pairs(&[
            ("b", Value::from(1)),
            ("a.c", Value::from("two")),
            ("a.d", Value::from(true)),
        ])
    );
}

#[test]
fn braces_emit_placeholders() {
    assert_eq!(
        scan("a { b { } c: 1 }"),
        pairs(&[
            ("a", Value::Object(Map::new())),
            ("a.b", Value::Object(Map::new())),
            ("a.c", Value::from(1)),
        ])
    );
}

#[test]
fn only_brace_placeholders_open_objects() {
    let mut scanner = Scanner::default();
    scanner.feed(b"a { x: 1 }\nb: {}\nc: [{}]\n").unwrap();
    let flags: Vec<_> = scanner
        .finish()
        .unwrap()
        .into_iter()
        .map(|pair| (pair.path.join("."), pair.opens_object))
        .collect();
    assert_eq!(
        flags,
        [
            ("a".to_string(), true),
            ("a.x".to_string(), false),
            ("b".to_string(), true),
            ("c".to_string(), false),
        ]
    );
}

#[test]
fn root_brace_has_no_placeholder() {
    assert_eq!(scan("{ x: null }"), pairs(&[("x", Value::Null)]));
}

#[test]
fn array_placeholder_is_filled_in_place() {
    assert_eq!(
        scan("first: 0\nlist: [1, [2], {k: v}]\nlast: 3"),
        pairs(&[
            ("first", Value::from(0)),
            (
                "list",
                Value::from(vec![
                    Value::from(1),
                    Value::from(vec![2]),
                    Value::Object(Map::from([("k".to_string(), Value::from("v"))])),
                ])
            ),
            ("last", Value::from(3)),
        ])
    );
}

#[test]
fn dotted_key_scope_resets_after_array() {
    assert_eq!(
        scan("a { b.c: [1], d: 2 }"),
        pairs(&[
            ("a", Value::Object(Map::new())),
            ("a.b.c", Value::from(vec![1])),
            ("a.d", Value::from(2)),
        ])
    );
}

#[test]
fn finish_flushes_pending_tokens() {
    assert_eq!(scan("a: 12"), pairs(&[("a", Value::from(12))]));
    assert_eq!(scan("a: 1.5e2"), pairs(&[("a", Value::from(150.0))]));
    assert_eq!(scan("a: word"), pairs(&[("a", Value::from("word"))]));
    assert_eq!(scan("a: \"q\""), pairs(&[("a", Value::from("q"))]));
    assert_eq!(scan("a"), pairs(&[("a", Value::Null)]));
    assert_eq!(scan("a:"), pairs(&[("a", Value::Null)]));
}

#[test]
fn tokens_split_across_feeds() {
    let mut scanner = Scanner::default();
    for chunk in ["ke", "y: \"a\\", "u00", "41b\" # c", "om", "ment\nn: -1", "2.5"] {
        scanner.feed(chunk.as_bytes()).unwrap();
    }
    let emitted: Vec<_> = scanner.finish().unwrap().into_iter().map(|p| p.value).collect();
    assert_eq!(emitted, [Value::from("aAb"), Value::from(-12.5)]);
}

#[test]
fn offset_counts_across_feeds() {
    let mut scanner = Scanner::default();
    scanner.feed(b"abc: 1\n").unwrap();
    let err = scanner.feed(b"x: @").unwrap_err();
    let err = err.syntax().unwrap();
    assert_eq!(err.offset, 10);
}

#[test]
fn include_space_falls_back_to_key() {
    assert_eq!(
        scan("include .a: 1\ninclude\t{ b: 2 }"),
        pairs(&[
            ("include.a", Value::from(1)),
            ("include", Value::Object(Map::new())),
            ("include.b", Value::from(2)),
        ])
    );
}

#[test]
fn array_comments_and_newlines() {
    assert_eq!(
        scan("a: [ # start\n  x\n  # between\n  y, ]"),
        pairs(&[("a", Value::from(vec!["x", "y"]))])
    );
}

#[test]
fn mode_tracks_innermost_frame() {
    let mut scanner = Scanner::default();
    scanner.feed(b"a: [{b: ").unwrap();
    assert_eq!(scanner.mode(), Mode::Value);
    scanner.feed(b"1}").unwrap();
    assert_eq!(scanner.mode(), Mode::ArrayValue);
    scanner.feed(b"]").unwrap();
    assert_eq!(scanner.mode(), Mode::Value);
    scanner.feed(b"\n").unwrap();
    assert_eq!(scanner.mode(), Mode::Key);
}
