/// Bare words with a meaning of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    True,
    False,
    Null,
    Include,
}

/// `(spelling, keyword)` pairs. Matching is exact and case-sensitive.
const KEYWORDS: [(&[u8], Keyword); 4] = [
    (b"true", Keyword::True),
    (b"false", Keyword::False),
    (b"null", Keyword::Null),
    (b"include", Keyword::Include),
];

/// Longest spelling in [`KEYWORDS`]; longer tokens skip the table.
const MAX_KEYWORD_LEN: usize = 7;

impl Keyword {
    /// Looks up a completed, trimmed bare-word token.
    pub fn resolve(token: &[u8]) -> Option<Self> {
        if token.len() > MAX_KEYWORD_LEN {
            return None;
        }
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == token)
            .map(|(_, keyword)| *keyword)
    }

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Include => "include",
        }
    }
}
