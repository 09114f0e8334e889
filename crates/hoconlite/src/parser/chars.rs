//! Byte classification used by the scanner.
//!
//! The scanner works on raw bytes, so these predicates only ever look at a
//! single byte. Any byte at or above `0x80` belongs to a multi-byte UTF-8
//! sequence and is treated as a letter so that non-ASCII keys and bare values
//! can start a token; the continuation bytes are accepted by the bare-word
//! state as ordinary content.

/// Whitespace that separates tokens: space, tab, carriage return, newline.
#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

/// Whitespace that never ends a statement.
#[inline]
pub(crate) fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t')
}

/// Bytes that may start a bare key or bare value.
#[inline]
pub(crate) fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c >= 0x80
}

/// Control bytes are rejected inside every string form except for tab.
#[inline]
pub(crate) fn is_control(c: u8) -> bool {
    c < 0x20 && c != b'\t'
}
