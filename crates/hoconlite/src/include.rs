//! Resolution and scanning of `include` directives.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    options::ParserOptions,
    parser::{KvPair, Scanner},
};

/// Where a scanner's document came from, for resolving its includes.
#[derive(Debug, Clone)]
pub(crate) struct IncludeContext {
    /// Directory relative include paths are joined to. `None` means the
    /// process working directory.
    base_dir: Option<PathBuf>,
    /// Canonical paths of the files currently being loaded, outermost first.
    chain: Vec<PathBuf>,
    options: ParserOptions,
}

impl IncludeContext {
    /// A context for a document that was not read from a file.
    pub fn detached(options: ParserOptions) -> Self {
        Self {
            base_dir: None,
            chain: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn resolve(&self, target: &str) -> PathBuf {
        let target = Path::new(target);
        match &self.base_dir {
            Some(base) if target.is_relative() => base.join(target),
            _ => target.to_path_buf(),
        }
    }

    /// Reads and scans the file at `path` to completion.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<KvPair>> {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.chain.contains(&canonical) {
            return Err(Error::IncludeCycle { path: canonical });
        }
        if self.chain.len() > self.options.max_include_depth {
            return Err(Error::IncludeDepth {
                limit: self.options.max_include_depth,
                path: canonical,
            });
        }

        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), depth = self.chain.len(), "scanning file");

        let mut chain = self.chain.clone();
        let base_dir = canonical.parent().map(Path::to_path_buf);
        chain.push(canonical);
        let mut scanner = Scanner::with_context(IncludeContext {
            base_dir,
            chain,
            options: self.options,
        });
        scanner.feed(&bytes)?;
        scanner.finish()
    }

    /// Scans the file named by an include directive and prefixes its pairs
    /// with the scope the directive appeared in.
    pub fn include(&self, target: &str, prefix: &[String]) -> Result<Vec<KvPair>> {
        let path = self.resolve(target);
        debug!(include = target, path = %path.display(), scope = %prefix.join("."), "resolving include");
        let pairs = self.scan_file(&path).map_err(|source| Error::Include {
            statement: format!("include \"{target}\""),
            path: path.clone(),
            source: Box::new(source),
        })?;
        Ok(pairs
            .into_iter()
            .map(|pair| KvPair {
                path: prefix.iter().cloned().chain(pair.path).collect(),
                value: pair.value,
                opens_object: pair.opens_object,
            })
            .collect())
    }
}
