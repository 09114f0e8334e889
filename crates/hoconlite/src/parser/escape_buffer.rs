//! Escape handling for quoted strings.
//!
//! The scanner validates escapes byte by byte while it scans (using
//! [`UnicodeEscapeBuffer`] to count the four hex digits of `\u`), and keeps the
//! raw bytes between the quotes in its parse buffer. [`unescape`] turns that
//! raw span into text once the token is complete.
//!
//! Surrogates are handled the way JSON decoders usually do: a high surrogate
//! escape followed by a low surrogate escape composes one code point, and any
//! surrogate that cannot be paired decodes to U+FFFD. Invalid UTF-8 in the raw
//! span is coerced to U+FFFD as well.

use bstr::{BString, ByteSlice};

use crate::parser::error::SyntaxErrorKind;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Accumulates the four hexadecimal digits of a `\uXXXX` escape into a UTF-16
/// code unit.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(c: u8) -> Option<u16> {
        match c {
            b'0'..=b'9' => Some(u16::from(c - b'0')),
            b'a'..=b'f' => Some(u16::from(c - b'a') + 10),
            b'A'..=b'F' => Some(u16::from(c - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(None)` while fewer than four digits have been seen and
    /// `Ok(Some(unit))` on the fourth, after which the buffer is empty again.
    /// A byte that is not a hex digit leaves the buffer untouched and returns
    /// `Err(byte)`.
    pub fn feed(&mut self, c: u8) -> Result<Option<u16>, u8> {
        let d = Self::hex_val(c).ok_or(c)?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Reads `\uXXXX` at the start of `raw`.
fn read_unit(raw: &[u8]) -> Option<u16> {
    let [b'\\', b'u', digits @ ..] = raw else {
        return None;
    };
    let digits = digits.get(..4)?;
    let mut buf = UnicodeEscapeBuffer::new();
    let mut unit = None;
    for &d in digits {
        unit = buf.feed(d).ok()?;
    }
    unit
}

/// Decodes the raw bytes of a quoted string (without the surrounding quotes).
pub(crate) fn unescape(raw: &[u8]) -> Result<String, SyntaxErrorKind> {
    let Some(first) = raw.find_byte(b'\\') else {
        return Ok(raw.to_str_lossy().into_owned());
    };

    let invalid = || SyntaxErrorKind::InvalidEscape(BString::from(raw));
    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first].to_str_lossy());

    let mut rest = &raw[first..];
    while !rest.is_empty() {
        let Some(pos) = rest.find_byte(b'\\') else {
            out.push_str(&rest.to_str_lossy());
            break;
        };
        out.push_str(&rest[..pos].to_str_lossy());
        rest = &rest[pos..];

        let escaped = *rest.get(1).ok_or_else(invalid)?;
        let simple = match escaped {
            b'"' => Some('"'),
            b'\\' => Some('\\'),
            b'/' => Some('/'),
            b'b' => Some('\u{0008}'),
            b'f' => Some('\u{000C}'),
            b'n' => Some('\n'),
            b'r' => Some('\r'),
            b't' => Some('\t'),
            b'u' => None,
            _ => return Err(invalid()),
        };
        if let Some(ch) = simple {
            out.push(ch);
            rest = &rest[2..];
            continue;
        }

        let unit = read_unit(rest).ok_or_else(invalid)?;
        rest = &rest[6..];
        if is_high_surrogate(unit) {
            if let Some(low) = read_unit(rest).filter(|u| is_low_surrogate(*u)) {
                let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                out.push(char::from_u32(code).unwrap_or(REPLACEMENT));
                rest = &rest[6..];
                continue;
            }
        }
        out.push(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT));
    }
    Ok(out)
}
