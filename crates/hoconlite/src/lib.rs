//! A parser for a human-friendly, JSON-superset configuration language.
//!
//! Documents are object bodies with dotted or brace-nested keys, arrays,
//! quoted or bare strings, numbers, booleans, `null`, `#` line comments and
//! `include` directives:
//!
//! ```text
//! # service settings
//! server {
//!     host: localhost
//!     port = 8080
//! }
//! server.tls.enabled: false
//! upstreams: ["10.0.0.1", "10.0.0.2"]
//! include "overrides.conf"
//! ```
//!
//! Any JSON object document is also a valid document.
//!
//! Parsing happens in two stages. A [`Scanner`] consumes bytes and emits an
//! ordered list of [`KvPair`]s, resolving includes as it meets them; a
//! [`TreeBuilder`] then folds those pairs into a nested [`Map`]. The
//! [`load`], [`read`], [`parse_str`] and [`parse_bytes`] functions run both
//! stages, and [`ConfigExt`] offers typed dotted-path lookups on the result.
//!
//! ```
//! use hoconlite::ConfigExt;
//!
//! let config = hoconlite::parse_str("server { host: localhost, port: 8080 }").unwrap();
//! assert_eq!(config.string("server.host"), Some("localhost"));
//! assert_eq!(config.int("server.port"), Some(8080));
//! ```

mod config;
mod error;
mod include;
mod loader;
mod options;
mod parser;
mod tree;
mod value;


pub use config::ConfigExt;
pub use error::{Error, Result};
pub use loader::{Loader, load, parse_bytes, parse_str, read};
pub use options::ParserOptions;
pub use parser::{
    KvPair, Scanner,
    error::{SyntaxError, SyntaxErrorKind},
};
pub use tree::TreeBuilder;
pub use value::{Array, Map, Value};
