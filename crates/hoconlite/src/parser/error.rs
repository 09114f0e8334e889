use bstr::BString;
use thiserror::Error;

/// A syntax error with the parse buffer and byte offset at which scanning
/// stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}, parse buffer {context:?} at offset {offset}")]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// Bytes of the token under construction when the error was raised.
    pub context: BString,
    /// Zero-based offset of the byte that triggered the error. Errors raised
    /// at end of input carry the input length.
    pub offset: u64,
}

/// The kinds of syntax error raised by the scanner and the value coercer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A byte that is not allowed in the current scanner state.
    #[error("invalid character {} {}", quote_byte(.byte), .context)]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Where the scanner was when it saw the byte.
        context: &'static str,
    },
    /// A numeric token that does not parse as a 64-bit float.
    #[error("number {0} parse error")]
    InvalidNumber(String),
    /// A malformed escape sequence inside a quoted string.
    #[error("invalid escape sequence in {0:?}")]
    InvalidEscape(BString),
    /// A key segment that is empty after trimming.
    #[error("empty key segment")]
    EmptyKey,
    /// A `}` without a matching `{`.
    #[error("unbalanced '}}'")]
    UnbalancedBrace,
    /// `include` without a file to include.
    #[error("include directive without a path")]
    MissingIncludePath,
    /// `include` seen while includes are disabled in the parser options.
    #[error("include directives are disabled")]
    IncludesDisabled,
    /// The input ended inside a token or an open scope.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The scanner was used again after it reported an error.
    #[error("scanner already failed")]
    ScannerFailed,
}

/// Formats `c` as a quoted character literal, escaping anything that is not
/// printable ASCII.
#[expect(clippy::trivially_copy_pass_by_ref)]
fn quote_byte(c: &u8) -> String {
    match *c {
        b'\'' => "'\\''".into(),
        b'"' => "'\"'".into(),
        c => format!("'{}'", c.escape_ascii()),
    }
}
