//! Lexical tags for the parse buffer and their coercion into values.

use bstr::ByteSlice;

use crate::{
    parser::{error::SyntaxErrorKind, escape_buffer::unescape, keyword::Keyword},
    value::Value,
};

/// What the bytes currently in the parse buffer represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TokenKind {
    /// Nothing was buffered: a key with no value.
    #[default]
    Null,
    /// Raw bytes between double quotes, escapes still encoded.
    Quoted,
    /// An unquoted run of text.
    Bare,
    Number,
    True,
    False,
    /// `include` in value position with no path following it.
    Include,
    /// An object or array that was already handed to the emitter.
    Composite,
}

impl TokenKind {
    /// Retags a bare word that spells a keyword.
    pub fn from_bare_word(token: &[u8]) -> Self {
        match Keyword::resolve(token) {
            Some(Keyword::True) => Self::True,
            Some(Keyword::False) => Self::False,
            Some(Keyword::Null) => Self::Null,
            Some(Keyword::Include) => Self::Include,
            None => Self::Bare,
        }
    }
}

/// Turns a completed token into a scalar value.
pub(crate) fn coerce(buf: &[u8], kind: TokenKind) -> Result<Value, SyntaxErrorKind> {
    match kind {
        TokenKind::Null | TokenKind::Composite => Ok(Value::Null),
        TokenKind::True => Ok(Value::Boolean(true)),
        TokenKind::False => Ok(Value::Boolean(false)),
        TokenKind::Quoted => unescape(buf).map(Value::String),
        TokenKind::Bare => Ok(Value::String(buf.to_str_lossy().into_owned())),
        TokenKind::Number => parse_number(buf).map(Value::Number),
        TokenKind::Include => Err(SyntaxErrorKind::MissingIncludePath),
    }
}

fn parse_number(buf: &[u8]) -> Result<f64, SyntaxErrorKind> {
    let invalid = || SyntaxErrorKind::InvalidNumber(buf.to_str_lossy().into_owned());
    let text = buf.to_str().map_err(|_| invalid())?;
    text.parse::<f64>().map_err(|_| invalid())
}
