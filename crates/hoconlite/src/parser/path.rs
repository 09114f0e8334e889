use crate::parser::error::SyntaxErrorKind;

/// The key segments currently open, with a bookmark at every `{`.
///
/// A bookmark records how many segments were open when its brace was seen.
/// Dotted keys push extra segments that only live for one statement;
/// [`KeyPath::reset_to_scope`] drops them again once the value is parsed.
#[derive(Debug, Default, Clone)]
pub(crate) struct KeyPath {
    segments: Vec<String>,
    bookmarks: Vec<usize>,
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: String) {
        self.segments.push(segment);
    }

    /// Bookmarks the current length at a `{`.
    pub fn open_scope(&mut self) {
        self.bookmarks.push(self.segments.len());
    }

    /// Pops the innermost bookmark at a `}` and truncates to the enclosing
    /// scope.
    pub fn close_scope(&mut self) -> Result<(), SyntaxErrorKind> {
        self.bookmarks.pop().ok_or(SyntaxErrorKind::UnbalancedBrace)?;
        self.reset_to_scope();
        Ok(())
    }

    /// Truncates to the innermost bookmark, or to the root outside any brace.
    pub fn reset_to_scope(&mut self) {
        let len = self.bookmarks.last().copied().unwrap_or(0);
        self.segments.truncate(len);
    }

    /// Number of open braces.
    pub fn depth(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &KeyPath) -> Vec<&str> {
        p.segments().iter().map(String::as_str).collect()
    }

    #[test]
    fn dotted_segments_reset_to_root() {
        let mut p = KeyPath::new();
        p.push("a".into());
        p.push("b".into());
        assert_eq!(path(&p), ["a", "b"]);
        p.reset_to_scope();
        assert!(p.is_empty());
    }

    #[test]
    fn scopes_keep_their_prefix() {
        let mut p = KeyPath::new();
        p.push("a".into());
        p.open_scope();
        p.push("b".into());
        p.push("c".into());
        p.reset_to_scope();
        assert_eq!(path(&p), ["a"]);
        assert_eq!(p.depth(), 1);

        p.close_scope().unwrap();
        assert!(p.is_empty());
        assert_eq!(p.depth(), 0);
    }

    #[test]
    fn closing_nested_scope_returns_to_enclosing_bookmark() {
        let mut p = KeyPath::new();
        p.push("a".into());
        p.open_scope();
        p.push("b".into());
        p.open_scope();
        p.push("c".into());
        p.close_scope().unwrap();
        assert_eq!(path(&p), ["a"]);
    }

    #[test]
    fn unbalanced_close_is_an_error() {
        let mut p = KeyPath::new();
        assert_eq!(p.close_scope(), Err(SyntaxErrorKind::UnbalancedBrace));
    }
}
