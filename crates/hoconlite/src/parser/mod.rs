//! Byte-driven scanner for configuration documents.
//!
//! Overview
//! - [`Scanner`] is a single-pass state machine. Every input byte goes through
//!   exactly one state function, which returns a [`Step`] telling the driver
//!   whether to append the byte to the parse buffer, skip it, or stop with the
//!   error it recorded.
//! - Alongside the lexical state the scanner tracks a [`Mode`] (are we reading
//!   a key, a value, or an array element) and a [`KeyPath`] of the key
//!   segments open at the current position. Completed statements are emitted
//!   as [`KvPair`]s; nothing is materialized into a tree until the caller hands
//!   the pairs to a [`TreeBuilder`].
//!
//! Scopes and frames
//! - `{` bookmarks the key path; `}` truncates back to the enclosing bookmark.
//!   Dotted keys (`a.b.c: 1`) push extra segments that are dropped as soon as
//!   the statement's value has been parsed.
//! - `[` emits a placeholder pair whose value is filled in when the matching
//!   `]` closes, so arrays keep their position in the emission order.
//! - An object inside an array cannot be described by key paths alone. It is
//!   scanned in its own object frame and materialized into a single element
//!   when its brace closes.
//!
//! Includes
//! - `include "file"` (or an unquoted path) in key or value position scans the
//!   named file to completion, synchronously, and splices its pairs into the
//!   emission stream under the current key path.
//!
//! Chunking
//! - [`Scanner::feed`] may be called with any partition of the input. All
//!   state lives in the scanner, so feeding `"a: 1"` in one call or one byte
//!   at a time produces the same pairs.

mod chars;
pub(crate) mod error;
mod escape_buffer;
mod keyword;
mod path;
mod token;

#[cfg(test)]
mod tests;

use bstr::{BString, ByteSlice};
use tracing::trace;

use self::{
    chars::{is_blank, is_control, is_letter, is_space},
    error::{SyntaxError, SyntaxErrorKind},
    escape_buffer::{UnicodeEscapeBuffer, unescape},
    keyword::Keyword,
    path::KeyPath,
    token::{TokenKind, coerce},
};
use crate::{
    error::{Error, Result},
    include::IncludeContext,
    options::ParserOptions,
    tree::TreeBuilder,
    value::{Map, Value},
};

/// One completed statement: a key path and the value bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct KvPair {
    /// Non-empty key segments, outermost first.
    pub path: Vec<String>,
    /// The value of the statement.
    pub value: Value,
    /// Emitted by a `{` rather than bound by a statement. The value is an
    /// empty object, and the path must name an object or nothing at all.
    pub opens_object: bool,
}

/// Outcome of feeding one byte to a state function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    SkipSpace,
    /// Append the byte to the parse buffer.
    Append,
    /// Stop; the error is in `Scanner::err`.
    Error,
}

/// What the scanner expects the current token to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Key,
    Value,
    ArrayValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeginKey,
    BeginValue,
    EndValue,
    InString,
    BareWord,
    StringEscape,
    StringEscapeUnicode,
    Neg,
    Zero,
    Integer,
    Dot,
    DotDigits,
    Exponent,
    ExponentSign,
    ExponentDigits,
    Comment,
    IncludeSpace,
    IncludePath,
    IncludeQuotedPath,
    Error,
}

/// Key path and emitted pairs of one object: the document root, or an object
/// nested in an array.
#[derive(Debug)]
struct ObjectFrame {
    path: KeyPath,
    pairs: Vec<KvPair>,
    mode: Mode,
}

impl ObjectFrame {
    fn new() -> Self {
        Self {
            path: KeyPath::new(),
            pairs: Vec::new(),
            mode: Mode::Key,
        }
    }

    fn emit(&mut self, value: Value) {
        let path = self.path.segments().to_vec();
        trace!(key = %path.join("."), kind = value.kind_name(), "emit");
        self.pairs.push(KvPair {
            path,
            value,
            opens_object: false,
        });
    }

    fn emit_open(&mut self) {
        let path = self.path.segments().to_vec();
        trace!(key = %path.join("."), "open object");
        self.pairs.push(KvPair {
            path,
            value: Value::Object(Map::new()),
            opens_object: true,
        });
    }
}

/// Where a closed array goes.
#[derive(Debug, Clone, Copy)]
enum ArrayTarget {
    /// Into the placeholder pair at this index of the enclosing object frame.
    Pair(usize),
    /// Onto the enclosing array.
    Element,
}

#[derive(Debug)]
enum Frame {
    Object(ObjectFrame),
    Array { target: ArrayTarget, items: Vec<Value> },
}

/// Incremental scanner turning document bytes into [`KvPair`]s.
///
/// # Examples
///
/// ```
/// use hoconlite::{ParserOptions, Scanner, Value};
///
/// let mut scanner = Scanner::new(ParserOptions::default());
/// scanner.feed(b"server { port: ").unwrap();
/// scanner.feed(b"8080 }\n").unwrap();
/// let pairs = scanner.finish().unwrap();
///
/// let last = pairs.last().unwrap();
/// assert_eq!(last.path, ["server", "port"]);
/// assert_eq!(last.value, Value::Number(8080.0));
/// ```
#[derive(Debug)]
pub struct Scanner {
    state: State,
    /// Index of the next byte to be fed.
    offset: u64,
    buffer: Vec<u8>,
    kind: TokenKind,
    /// Inside `"` in a bare key.
    in_quote: bool,
    escape: UnicodeEscapeBuffer,
    root: ObjectFrame,
    nested: Vec<Frame>,
    includes: IncludeContext,
    err: Option<Error>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Scanner {
    /// A scanner for a document that was not read from a file; relative
    /// includes resolve against the working directory.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::with_context(IncludeContext::detached(options))
    }

    pub(crate) fn with_context(includes: IncludeContext) -> Self {
        Self {
            state: State::BeginKey,
            offset: 0,
            buffer: Vec::new(),
            kind: TokenKind::Null,
            in_quote: false,
            escape: UnicodeEscapeBuffer::new(),
            root: ObjectFrame::new(),
            nested: Vec::new(),
            includes,
            err: None,
        }
    }

    /// Scans the next chunk of the document.
    ///
    /// # Errors
    ///
    /// The first syntax, include or merge error in the document. Once an
    /// error has been returned the scanner is unusable; later calls fail with
    /// [`SyntaxErrorKind::ScannerFailed`].
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        if self.state == State::Error {
            return Err(self.take_error());
        }
        for &c in chunk {
            match self.step(c) {
                Step::Append => self.buffer.push(c),
                Step::Error => return Err(self.take_error()),
                Step::Continue | Step::SkipSpace => {}
            }
            self.offset += 1;
        }
        Ok(())
    }

    /// Ends the document and returns the emitted pairs in order.
    ///
    /// A token that may end at a line break is completed as if one followed
    /// it.
    ///
    /// # Errors
    ///
    /// [`SyntaxErrorKind::UnexpectedEndOfInput`] if the input stops inside a
    /// token, an array, or a brace; otherwise whatever completing the last
    /// statement raises.
    pub fn finish(mut self) -> Result<Vec<KvPair>> {
        match self.state {
            State::Error => return Err(self.take_error()),
            State::InString
            | State::StringEscape
            | State::StringEscapeUnicode
            | State::Neg
            | State::Dot
            | State::Exponent
            | State::ExponentSign
            | State::IncludeQuotedPath => {
                return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEndOfInput));
            }
            State::BareWord if self.in_quote => {
                return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEndOfInput));
            }
            State::BeginKey | State::Comment => {}
            State::BareWord
            | State::BeginValue
            | State::EndValue
            | State::Zero
            | State::Integer
            | State::DotDigits
            | State::ExponentDigits
            | State::IncludeSpace
            | State::IncludePath => {
                if self.step(b'\n') == Step::Error {
                    return Err(self.take_error());
                }
            }
        }

        let accepted = matches!(self.state, State::BeginKey | State::Comment)
            && self.nested.is_empty()
            && self.root.path.depth() == 0
            && self.root.mode == Mode::Key;
        if !accepted {
            return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEndOfInput));
        }
        trace!(pairs = self.root.pairs.len(), bytes = self.offset, "scan complete");
        Ok(self.root.pairs)
    }

    fn step(&mut self, c: u8) -> Step {
        match self.state {
            State::BeginKey => self.begin_key(c),
            State::BeginValue => self.begin_value(c),
            State::EndValue => self.end_value(c),
            State::InString => self.in_string(c),
            State::BareWord => self.bare_word(c),
            State::StringEscape => self.string_escape(c),
            State::StringEscapeUnicode => self.string_escape_unicode(c),
            State::Neg => self.neg(c),
            State::Zero => self.zero(c),
            State::Integer => self.integer(c),
            State::Dot => self.dot(c),
            State::DotDigits => self.dot_digits(c),
            State::Exponent => self.exponent(c),
            State::ExponentSign => self.exponent_sign(c),
            State::ExponentDigits => self.exponent_digits(c),
            State::Comment => self.comment(c),
            State::IncludeSpace => self.include_space(c),
            State::IncludePath => self.include_path(c),
            State::IncludeQuotedPath => self.include_quoted_path(c),
            State::Error => Step::Error,
        }
    }

    // ------------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------------

    fn mode(&self) -> Mode {
        match self.nested.last() {
            Some(Frame::Array { .. }) => Mode::ArrayValue,
            Some(Frame::Object(frame)) => frame.mode,
            None => self.root.mode,
        }
    }

    fn object(&self) -> &ObjectFrame {
        self.nested
            .iter()
            .rev()
            .find_map(|frame| match frame {
                Frame::Object(object) => Some(object),
                Frame::Array { .. } => None,
            })
            .unwrap_or(&self.root)
    }

    fn object_mut(&mut self) -> &mut ObjectFrame {
        self.nested
            .iter_mut()
            .rev()
            .find_map(|frame| match frame {
                Frame::Object(object) => Some(object),
                Frame::Array { .. } => None,
            })
            .unwrap_or(&mut self.root)
    }

    fn start_token(&mut self, kind: TokenKind, state: State) {
        self.buffer.clear();
        self.kind = kind;
        self.state = state;
    }

    fn open_object(&mut self) -> Step {
        let frame = self.object_mut();
        if !frame.path.is_empty() {
            frame.emit_open();
        }
        frame.path.open_scope();
        frame.mode = Mode::Key;
        self.state = State::BeginKey;
        Step::Continue
    }

    fn open_element_object(&mut self) -> Step {
        let mut frame = ObjectFrame::new();
        frame.path.open_scope();
        self.nested.push(Frame::Object(frame));
        self.state = State::BeginKey;
        Step::Continue
    }

    fn close_object(&mut self) -> Step {
        let frame = self.object_mut();
        if let Err(kind) = frame.path.close_scope() {
            return self.fail(kind);
        }
        frame.mode = Mode::Key;
        let depth = frame.path.depth();

        if depth == 0 && matches!(self.nested.last(), Some(Frame::Object(_))) {
            if let Some(Frame::Object(frame)) = self.nested.pop() {
                return self.close_element_object(frame);
            }
        }
        self.state = State::BeginKey;
        Step::Continue
    }

    fn close_element_object(&mut self, frame: ObjectFrame) -> Step {
        let map = match TreeBuilder::build(frame.pairs) {
            Ok(map) => map,
            Err(err) => return self.fail_with(err),
        };
        if let Some(Frame::Array { items, .. }) = self.nested.last_mut() {
            items.push(Value::Object(map));
        }
        self.finish_composite()
    }

    fn open_array(&mut self) -> Step {
        let target = if self.mode() == Mode::ArrayValue {
            ArrayTarget::Element
        } else {
            let frame = self.object_mut();
            frame.emit(Value::Array(Vec::new()));
            let index = frame.pairs.len() - 1;
            frame.path.reset_to_scope();
            ArrayTarget::Pair(index)
        };
        self.nested.push(Frame::Array {
            target,
            items: Vec::new(),
        });
        self.state = State::BeginValue;
        Step::Continue
    }

    fn close_array(&mut self, c: u8) -> Step {
        let Some(Frame::Array { target, items }) = self.nested.pop() else {
            return self.invalid(c, "outside of an array");
        };
        let value = Value::Array(items);
        match target {
            ArrayTarget::Pair(index) => {
                if let Some(pair) = self.object_mut().pairs.get_mut(index) {
                    pair.value = value;
                }
            }
            ArrayTarget::Element => {
                if let Some(Frame::Array { items, .. }) = self.nested.last_mut() {
                    items.push(value);
                }
            }
        }
        self.finish_composite()
    }

    /// Marks the value just closed as already emitted.
    fn finish_composite(&mut self) -> Step {
        self.buffer.clear();
        self.kind = TokenKind::Composite;
        self.state = State::EndValue;
        Step::Continue
    }

    fn push_key(&mut self) -> core::result::Result<(), SyntaxErrorKind> {
        let segment = match self.kind {
            TokenKind::Quoted => unescape(&self.buffer)?,
            _ => self.buffer.trim_end_with(|c| c == ' ' || c == '\t').to_str_lossy().into_owned(),
        };
        if segment.is_empty() {
            return Err(SyntaxErrorKind::EmptyKey);
        }
        self.object_mut().path.push(segment);
        self.buffer.clear();
        Ok(())
    }

    /// Emits the statement's value and drops its dotted key segments.
    fn finish_statement(&mut self) -> core::result::Result<(), SyntaxErrorKind> {
        let value = match self.kind {
            TokenKind::Composite => None,
            kind => Some(coerce(&self.buffer, kind)?),
        };
        let frame = self.object_mut();
        if let Some(value) = value {
            frame.emit(value);
        }
        frame.path.reset_to_scope();
        frame.mode = Mode::Key;
        self.buffer.clear();
        self.kind = TokenKind::Null;
        Ok(())
    }

    fn push_element(&mut self) -> core::result::Result<(), SyntaxErrorKind> {
        if self.kind != TokenKind::Composite {
            let value = coerce(&self.buffer, self.kind)?;
            if let Some(Frame::Array { items, .. }) = self.nested.last_mut() {
                items.push(value);
            }
        }
        self.buffer.clear();
        self.kind = TokenKind::Null;
        Ok(())
    }

    fn run_include(&mut self) -> Result<()> {
        if !self.includes.options().allow_includes {
            return Err(self.syntax_error(SyntaxErrorKind::IncludesDisabled));
        }
        let target = self.buffer.trim_with(char::is_whitespace).to_str_lossy().into_owned();
        if target.is_empty() {
            return Err(self.syntax_error(SyntaxErrorKind::MissingIncludePath));
        }
        let pairs = self.includes.include(&target, self.object().path.segments())?;
        let frame = self.object_mut();
        frame.pairs.extend(pairs);
        frame.mode = Mode::Value;
        self.buffer.clear();
        self.kind = TokenKind::Composite;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // States
    // ------------------------------------------------------------------------

    fn begin_key(&mut self, c: u8) -> Step {
        if is_space(c) {
            return Step::SkipSpace;
        }
        match c {
            b'{' => self.open_object(),
            b'}' => self.close_object(),
            b',' => Step::Continue,
            b'#' => {
                self.state = State::Comment;
                Step::Continue
            }
            b'"' => {
                self.start_token(TokenKind::Quoted, State::InString);
                Step::Continue
            }
            c if is_letter(c) => {
                self.start_token(TokenKind::Bare, State::BareWord);
                self.in_quote = false;
                Step::Append
            }
            c => self.invalid(c, "looking for beginning of object key"),
        }
    }

    fn begin_value(&mut self, c: u8) -> Step {
        let mode = self.mode();
        match c {
            b' ' | b'\t' => Step::SkipSpace,
            b'\r' | b'\n' if mode == Mode::ArrayValue => Step::SkipSpace,
            b'{' if mode == Mode::ArrayValue => self.open_element_object(),
            b'{' => self.open_object(),
            b'[' => self.open_array(),
            b']' if mode == Mode::ArrayValue => self.close_array(c),
            b'#' if mode == Mode::ArrayValue => {
                self.state = State::Comment;
                Step::Continue
            }
            b'"' => {
                self.start_token(TokenKind::Quoted, State::InString);
                Step::Continue
            }
            b'-' => {
                self.start_token(TokenKind::Number, State::Neg);
                Step::Append
            }
            b'0' => {
                self.start_token(TokenKind::Number, State::Zero);
                Step::Append
            }
            b'1'..=b'9' => {
                self.start_token(TokenKind::Number, State::Integer);
                Step::Append
            }
            // Nothing after the separator: the value is null.
            b'\r' | b'\n' | b'#' => {
                self.start_token(TokenKind::Null, State::EndValue);
                self.end_value(c)
            }
            c if is_letter(c) => {
                self.start_token(TokenKind::Bare, State::BareWord);
                Step::Append
            }
            c => self.invalid(c, "looking for beginning of value"),
        }
    }

    fn to_end_value(&mut self, c: u8) -> Step {
        self.state = State::EndValue;
        self.end_value(c)
    }

    fn end_value(&mut self, c: u8) -> Step {
        if is_blank(c) {
            return Step::SkipSpace;
        }
        match self.mode() {
            Mode::Key => {
                if let Err(kind) = self.push_key() {
                    return self.fail(kind);
                }
                match c {
                    b':' | b'=' => {
                        self.object_mut().mode = Mode::Value;
                        self.state = State::BeginValue;
                        Step::Continue
                    }
                    b'.' => {
                        self.state = State::BeginKey;
                        Step::Continue
                    }
                    b'{' => self.open_object(),
                    // A key on its own is a statement with a null value.
                    b'\r' | b'\n' | b'#' => {
                        self.object_mut().mode = Mode::Value;
                        self.kind = TokenKind::Null;
                        self.end_value(c)
                    }
                    c => self.invalid(c, "after object key"),
                }
            }
            Mode::Value => {
                if let Err(kind) = self.finish_statement() {
                    return self.fail(kind);
                }
                match c {
                    b',' | b'\r' | b'\n' => {
                        self.state = State::BeginKey;
                        Step::Continue
                    }
                    b'}' => self.close_object(),
                    b'#' => {
                        self.state = State::Comment;
                        Step::Continue
                    }
                    c => self.invalid(c, "after object key:value pair"),
                }
            }
            Mode::ArrayValue => {
                if let Err(kind) = self.push_element() {
                    return self.fail(kind);
                }
                match c {
                    b',' | b'\r' | b'\n' => {
                        self.state = State::BeginValue;
                        Step::Continue
                    }
                    b']' => self.close_array(c),
                    b'#' => {
                        self.state = State::Comment;
                        Step::Continue
                    }
                    c => self.invalid(c, "after array element"),
                }
            }
        }
    }

    fn comment(&mut self, c: u8) -> Step {
        if matches!(c, b'\r' | b'\n') {
            self.state = if self.mode() == Mode::ArrayValue {
                State::BeginValue
            } else {
                State::BeginKey
            };
        }
        Step::Continue
    }

    fn in_string(&mut self, c: u8) -> Step {
        match c {
            b'"' => {
                self.state = State::EndValue;
                Step::Continue
            }
            b'\\' => {
                self.state = State::StringEscape;
                Step::Append
            }
            c if is_control(c) => self.invalid(c, "in string literal"),
            _ => Step::Append,
        }
    }

    fn string_escape(&mut self, c: u8) -> Step {
        match c {
            b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"' => {
                self.state = State::InString;
                Step::Append
            }
            b'u' => {
                self.escape.reset();
                self.state = State::StringEscapeUnicode;
                Step::Append
            }
            c => self.invalid(c, "in string escape code"),
        }
    }

    fn string_escape_unicode(&mut self, c: u8) -> Step {
        match self.escape.feed(c) {
            Ok(Some(_)) => {
                self.state = State::InString;
                Step::Append
            }
            Ok(None) => Step::Append,
            Err(c) => self.invalid(c, "in \\u hexadecimal character escape"),
        }
    }

    fn bare_word(&mut self, c: u8) -> Step {
        if self.in_quote {
            return match c {
                b'"' => {
                    self.in_quote = false;
                    Step::Continue
                }
                c if is_control(c) => self.invalid(c, "in quoted key segment"),
                _ => Step::Append,
            };
        }

        let mode = self.mode();
        let terminates = match mode {
            Mode::Key => matches!(c, b'.' | b':' | b'=' | b'{' | b'\r' | b'\n' | b'#'),
            Mode::Value => matches!(c, b',' | b'\r' | b'\n' | b'}' | b'#'),
            Mode::ArrayValue => matches!(c, b',' | b'\r' | b'\n' | b']' | b'#'),
        };
        if terminates {
            while self.buffer.last().is_some_and(|&b| is_blank(b)) {
                self.buffer.pop();
            }
            if mode != Mode::Key {
                self.kind = TokenKind::from_bare_word(&self.buffer);
            }
            return self.to_end_value(c);
        }

        match c {
            b'"' if mode == Mode::Key => {
                self.in_quote = true;
                Step::Continue
            }
            b' ' | b'\t'
                if mode != Mode::ArrayValue
                    && self.buffer == Keyword::Include.spelling().as_bytes() =>
            {
                self.state = State::IncludeSpace;
                Step::Continue
            }
            c if c == b'\\' || is_control(c) => self.invalid(c, "in bare string literal"),
            _ => Step::Append,
        }
    }

    fn neg(&mut self, c: u8) -> Step {
        match c {
            b'0' => {
                self.state = State::Zero;
                Step::Append
            }
            b'1'..=b'9' => {
                self.state = State::Integer;
                Step::Append
            }
            c => self.invalid(c, "in numeric literal"),
        }
    }

    fn zero(&mut self, c: u8) -> Step {
        match c {
            b'.' => {
                self.state = State::Dot;
                Step::Append
            }
            b'e' | b'E' => {
                self.state = State::Exponent;
                Step::Append
            }
            c => self.to_end_value(c),
        }
    }

    fn integer(&mut self, c: u8) -> Step {
        match c {
            b'0'..=b'9' => Step::Append,
            c => self.zero(c),
        }
    }

    fn dot(&mut self, c: u8) -> Step {
        match c {
            b'0'..=b'9' => {
                self.state = State::DotDigits;
                Step::Append
            }
            c => self.invalid(c, "after decimal point in numeric literal"),
        }
    }

    fn dot_digits(&mut self, c: u8) -> Step {
        match c {
            b'0'..=b'9' => Step::Append,
            b'e' | b'E' => {
                self.state = State::Exponent;
                Step::Append
            }
            c => self.to_end_value(c),
        }
    }

    fn exponent(&mut self, c: u8) -> Step {
        match c {
            b'+' | b'-' => {
                self.state = State::ExponentSign;
                Step::Append
            }
            c => self.exponent_sign(c),
        }
    }

    fn exponent_sign(&mut self, c: u8) -> Step {
        match c {
            b'0'..=b'9' => {
                self.state = State::ExponentDigits;
                Step::Append
            }
            c => self.invalid(c, "in exponent of numeric literal"),
        }
    }

    fn exponent_digits(&mut self, c: u8) -> Step {
        match c {
            b'0'..=b'9' => Step::Append,
            c => self.to_end_value(c),
        }
    }

    fn include_space(&mut self, c: u8) -> Step {
        if is_blank(c) {
            return Step::SkipSpace;
        }
        match c {
            // `include` was an ordinary key after all.
            b':' | b'=' | b'.' | b'{' | b'\r' | b'\n' | b'#' if self.mode() == Mode::Key => {
                self.kind = TokenKind::Bare;
                self.to_end_value(c)
            }
            b',' | b'}' | b']' | b'\r' | b'\n' | b'#' => self.fail(SyntaxErrorKind::MissingIncludePath),
            b'"' => {
                self.buffer.clear();
                self.state = State::IncludeQuotedPath;
                Step::Continue
            }
            c if is_control(c) => self.invalid(c, "in include path"),
            _ => {
                self.buffer.clear();
                self.state = State::IncludePath;
                Step::Append
            }
        }
    }

    fn include_path(&mut self, c: u8) -> Step {
        match c {
            b' ' | b'\t' | b',' | b'\r' | b'\n' | b'}' | b'#' => {
                if let Err(err) = self.run_include() {
                    return self.fail_with(err);
                }
                self.to_end_value(c)
            }
            c if is_control(c) => self.invalid(c, "in include path"),
            _ => Step::Append,
        }
    }

    fn include_quoted_path(&mut self, c: u8) -> Step {
        match c {
            b'"' => {
                if let Err(err) = self.run_include() {
                    return self.fail_with(err);
                }
                self.state = State::EndValue;
                Step::Continue
            }
            c if is_control(c) => self.invalid(c, "in include path"),
            _ => Step::Append,
        }
    }

    // ------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------

    fn syntax_error(&self, kind: SyntaxErrorKind) -> Error {
        Error::Syntax(SyntaxError {
            kind,
            context: BString::from(self.buffer.as_slice()),
            offset: self.offset,
        })
    }

    fn invalid(&mut self, byte: u8, context: &'static str) -> Step {
        self.fail(SyntaxErrorKind::InvalidCharacter { byte, context })
    }

    fn fail(&mut self, kind: SyntaxErrorKind) -> Step {
        let err = self.syntax_error(kind);
        self.fail_with(err)
    }

    fn fail_with(&mut self, err: Error) -> Step {
        self.err = Some(err);
        self.state = State::Error;
        Step::Error
    }

    fn take_error(&mut self) -> Error {
        self.err
            .take()
            .unwrap_or_else(|| self.syntax_error(SyntaxErrorKind::ScannerFailed))
    }
}
