/// Configuration options for the scanner and the file loader.
///
/// # Examples
///
/// ```rust
/// use hoconlite::{Loader, ParserOptions};
///
/// let loader = Loader::new(ParserOptions {
///     allow_includes: false,
///     ..Default::default()
/// });
/// assert!(loader.parse_str("include \"other.conf\"").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether `include` directives are honoured.
    ///
    /// When `false`, an include directive is a syntax error. Use this for
    /// documents from untrusted sources that must not touch the filesystem.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_includes: bool,

    /// How many includes may be nested inside one another.
    ///
    /// Cyclic includes are always rejected; this bounds chains of distinct
    /// files.
    ///
    /// # Default
    ///
    /// `16`
    pub max_include_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_includes: true,
            max_include_depth: 16,
        }
    }
}
