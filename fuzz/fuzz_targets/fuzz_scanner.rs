#![no_main]
use arbitrary::Arbitrary;
use hoconlite::{ParserOptions, Scanner};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    doc: Vec<u8>,
    split_seed: u64,
}

const OPTIONS: ParserOptions = ParserOptions {
    allow_includes: false,
    max_include_depth: 0,
};

fn scan_whole(doc: &[u8]) -> Option<Vec<hoconlite::KvPair>> {
    let mut scanner = Scanner::new(OPTIONS);
    scanner.feed(doc).ok()?;
    scanner.finish().ok()
}

fn scan_chunked(doc: &[u8], split_seed: u64) -> Option<Vec<hoconlite::KvPair>> {
    let mut scanner = Scanner::new(OPTIONS);
    for chunk in split_into_chunks(doc, split_seed) {
        scanner.feed(chunk).ok()?;
    }
    scanner.finish().ok()
}

/// Splits `doc` into chunks of at least one byte whose sizes are derived
/// from `split_seed`. Chunks may end inside a UTF-8 sequence.
fn split_into_chunks(doc: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut seed = split_seed;
    let mut rest = doc;
    while !rest.is_empty() {
        let size = (seed as usize % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9_7F4A_7C15;
    }
    chunks
}

fuzz_target!(|input: Input| {
    let whole = scan_whole(&input.doc);
    let chunked = scan_chunked(&input.doc, input.split_seed);
    assert_eq!(whole, chunked, "chunking changed the result");
    if let Some(pairs) = whole {
        let _ = hoconlite::TreeBuilder::build(pairs);
    }
});
