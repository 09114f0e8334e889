#![allow(missing_docs)]
#![allow(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use hoconlite::{Map, ParserOptions, Scanner, Value};

const SERVICE: &str = r#"
# service settings
server {
    host: localhost
    port = 8080
    tls.enabled: false
}
server.tls.cert: "/etc/ssl/svc.pem"
upstreams: [
    "10.0.0.1",
    "10.0.0.2",
]
limits: [{name: cpu, max: 2.5}, {name: mem, max: 512}]
debug
"#;

fn render_pairs(chunks: &[&str]) -> String {
    let mut scanner = Scanner::new(ParserOptions::default());
    for chunk in chunks {
        scanner.feed(chunk.as_bytes()).expect("feed");
    }
    let mut out = String::new();
    for pair in scanner.finish().expect("finish") {
        writeln!(out, "{} = {}", pair.path.join("."), pair.value).unwrap();
    }
    out
}

fn render_tree(doc: &str) -> String {
    let map: Map = hoconlite::parse_str(doc).expect("parse");
    Value::Object(map).to_string()
}

#[test]
fn snapshot_service_pairs() {
    insta::assert_snapshot!(render_pairs(&[SERVICE]), @r#"
    server = {}
    server.host = "localhost"
    server.port = 8080
    server.tls.enabled = false
    server.tls.cert = "/etc/ssl/svc.pem"
    upstreams = ["10.0.0.1","10.0.0.2"]
    limits = [{"max":2.5,"name":"cpu"},{"max":512,"name":"mem"}]
    debug = null
    "#);
}

#[test]
fn snapshot_service_pairs_chunked() {
    let (a, rest) = SERVICE.split_at(30);
    let (b, c) = rest.split_at(41);
    assert_eq!(render_pairs(&[a, b, c]), render_pairs(&[SERVICE]));
}

#[test]
fn snapshot_service_tree() {
    insta::assert_snapshot!(render_tree(SERVICE), @r#"{"debug":null,"limits":[{"max":2.5,"name":"cpu"},{"max":512,"name":"mem"}],"server":{"host":"localhost","port":8080,"tls":{"cert":"/etc/ssl/svc.pem","enabled":false}},"upstreams":["10.0.0.1","10.0.0.2"]}"#);
}

#[test]
fn snapshot_overrides_and_merges() {
    let doc = r#"
a { x: 1, y: [1, 2] }
a { y: [3], z: { deep: true } }
a.z.other = "yes"
b: { replaced: false }
b: 1
"#;
    insta::assert_snapshot!(render_tree(doc), @r#"{"a":{"x":1,"y":[3],"z":{"deep":true,"other":"yes"}},"b":1}"#);
}

#[test]
fn snapshot_escapes_render_as_json() {
    let doc = r#"s: "tab\tquote\"slash\/smile😀lone\uD800end""#;
    insta::assert_snapshot!(render_tree(doc), @r#"{"s":"tab\u0009quote\"slash/smile😀lone�end"}"#);
}
