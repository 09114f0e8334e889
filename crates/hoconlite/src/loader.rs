//! Entry points that turn files, readers and in-memory documents into trees.

use std::{io::Read, path::Path};

use tracing::debug;

use crate::{
    error::{Error, Result},
    include::IncludeContext,
    options::ParserOptions,
    parser::Scanner,
    tree::TreeBuilder,
    value::Map,
};

const READ_CHUNK: usize = 8 * 1024;

/// Loads configuration documents with a fixed set of [`ParserOptions`].
///
/// The free functions [`load`], [`read`], [`parse_str`] and [`parse_bytes`]
/// use a `Loader` with default options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loader {
    options: ParserOptions,
}

impl Loader {
    /// A loader using `options`.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The options this loader was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Reads and parses the file at `path`.
    ///
    /// Relative paths are resolved against the working directory; includes in
    /// the file resolve against the file's own directory.
    ///
    /// # Errors
    ///
    /// I/O failure, the first syntax error, a failed include, an include
    /// cycle, or a key that passes through a scalar.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Map> {
        let path = path.as_ref();
        let path = std::path::absolute(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        let pairs = IncludeContext::detached(self.options).scan_file(&path)?;
        TreeBuilder::build(pairs)
    }

    /// Parses everything `reader` yields.
    ///
    /// # Errors
    ///
    /// [`Error::Read`] if the reader fails, otherwise as [`Loader::load`].
    pub fn read(&self, mut reader: impl Read) -> Result<Map> {
        let mut scanner = Scanner::new(self.options);
        let mut chunk = vec![0; READ_CHUNK];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::Read(err)),
            };
            scanner.feed(&chunk[..n])?;
        }
        TreeBuilder::build(scanner.finish()?)
    }

    /// Parses an in-memory document.
    ///
    /// # Errors
    ///
    /// As [`Loader::load`], except that there is no file to read.
    pub fn parse_bytes(&self, doc: &[u8]) -> Result<Map> {
        let mut scanner = Scanner::new(self.options);
        scanner.feed(doc)?;
        TreeBuilder::build(scanner.finish()?)
    }

    /// Parses an in-memory document.
    ///
    /// # Errors
    ///
    /// As [`Loader::parse_bytes`].
    pub fn parse_str(&self, doc: &str) -> Result<Map> {
        self.parse_bytes(doc.as_bytes())
    }
}

/// Reads and parses the file at `path` with default options.
///
/// # Examples
///
/// ```no_run
/// let config = hoconlite::load("app.conf")?;
/// println!("{} top-level keys", config.len());
/// # Ok::<(), hoconlite::Error>(())
/// ```
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load(path: impl AsRef<Path>) -> Result<Map> {
    Loader::default().load(path)
}

/// Parses everything `reader` yields with default options.
///
/// # Errors
///
/// See [`Loader::read`].
pub fn read(reader: impl Read) -> Result<Map> {
    Loader::default().read(reader)
}

/// Parses an in-memory document with default options.
///
/// # Errors
///
/// See [`Loader::parse_bytes`].
pub fn parse_bytes(doc: &[u8]) -> Result<Map> {
    Loader::default().parse_bytes(doc)
}

/// Parses an in-memory document with default options.
///
/// ```
/// use hoconlite::Value;
///
/// let config = hoconlite::parse_str("a.b.c: 1").unwrap();
/// assert_eq!(Value::Object(config).to_string(), r#"{"a":{"b":{"c":1}}}"#);
/// ```
///
/// # Errors
///
/// See [`Loader::parse_bytes`].
pub fn parse_str(doc: &str) -> Result<Map> {
    Loader::default().parse_str(doc)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::value::Value;

    /// Yields its data a few bytes at a time, then fails if asked to.
    struct Trickle<'a> {
        data: &'a [u8],
        fail_at_end: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() && self.fail_at_end {
                return Err(io::Error::other("wire cut"));
            }
            let n = self.data.len().min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_drains_small_reads() {
        let reader = Trickle {
            data: b"name: \"svc\"\nports: [80, 443]\n",
            fail_at_end: false,
        };
        let config = read(reader).unwrap();
        assert_eq!(config.get("name"), Some(&Value::from("svc")));
        assert_eq!(config.get("ports"), Some(&Value::from(vec![80, 443])));
    }

    #[test]
    fn read_surfaces_reader_errors() {
        let reader = Trickle {
            data: b"a: 1\n",
            fail_at_end: true,
        };
        assert!(matches!(read(reader), Err(Error::Read(_))));
    }

    #[test]
    fn includes_can_be_disabled() {
        let loader = Loader::new(ParserOptions {
            allow_includes: false,
            ..ParserOptions::default()
        });
        let err = loader.parse_str("include \"x.conf\"\n").unwrap_err();
        let syntax = err.syntax().unwrap();
        assert_eq!(
            syntax.kind,
            crate::parser::error::SyntaxErrorKind::IncludesDisabled
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err}");
    }
}
