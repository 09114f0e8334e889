//! Typed, dotted-path access to a loaded configuration tree.

use crate::{
    error::Result,
    tree::TreeBuilder,
    value::{Map, Value},
};

/// Lookups and overrides on a configuration [`Map`].
///
/// Paths are dotted (`"server.http.port"`); each segment names a key in an
/// object. A lookup that runs into a missing key or a non-object value finds
/// nothing.
///
/// ```
/// use hoconlite::ConfigExt;
///
/// let config = hoconlite::parse_str("server { port: 8080, hosts: [a, b] }").unwrap();
/// assert_eq!(config.int("server.port"), Some(8080));
/// assert_eq!(config.strings("server.hosts"), Some(vec!["a", "b"]));
/// assert_eq!(config.string_or("server.name", "anonymous"), "anonymous");
/// ```
pub trait ConfigExt {
    /// The value at `path`, if any.
    fn lookup(&self, path: &str) -> Option<&Value>;

    /// A number at `path`, truncated toward zero.
    #[allow(clippy::cast_possible_truncation)]
    fn int(&self, path: &str) -> Option<i64> {
        self.float(path).map(|n| n as i64)
    }

    /// [`ConfigExt::int`], or `default` when absent.
    fn int_or(&self, path: &str, default: i64) -> i64 {
        self.int(path).unwrap_or(default)
    }

    /// A number at `path`.
    fn float(&self, path: &str) -> Option<f64> {
        self.lookup(path).and_then(Value::as_f64)
    }

    /// [`ConfigExt::float`], or `default` when absent.
    fn float_or(&self, path: &str, default: f64) -> f64 {
        self.float(path).unwrap_or(default)
    }

    /// A string at `path`.
    fn string(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// [`ConfigExt::string`], or `default` when absent.
    fn string_or<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.string(path).unwrap_or(default)
    }

    /// A boolean at `path`.
    fn bool(&self, path: &str) -> Option<bool> {
        self.lookup(path).and_then(Value::as_bool)
    }

    /// [`ConfigExt::bool`], or `default` when absent.
    fn bool_or(&self, path: &str, default: bool) -> bool {
        self.bool(path).unwrap_or(default)
    }

    /// The string elements of the array at `path`.
    ///
    /// Elements of other types are skipped. An array without any string
    /// element counts as absent.
    fn strings(&self, path: &str) -> Option<Vec<&str>> {
        let items: Vec<&str> = self
            .lookup(path)?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        (!items.is_empty()).then_some(items)
    }

    /// [`ConfigExt::strings`], or `default` when absent.
    fn strings_or<'a>(&'a self, path: &str, default: Vec<&'a str>) -> Vec<&'a str> {
        self.strings(path).unwrap_or(default)
    }

    /// The boolean elements of the array at `path`, with the same rules as
    /// [`ConfigExt::strings`].
    fn bools(&self, path: &str) -> Option<Vec<bool>> {
        let items: Vec<bool> = self
            .lookup(path)?
            .as_array()?
            .iter()
            .filter_map(Value::as_bool)
            .collect();
        (!items.is_empty()).then_some(items)
    }

    /// [`ConfigExt::bools`], or `default` when absent.
    fn bools_or(&self, path: &str, default: Vec<bool>) -> Vec<bool> {
        self.bools(path).unwrap_or(default)
    }

    /// The object at `path`, if there is one.
    fn sub_config(&self, path: &str) -> Option<&Map> {
        self.lookup(path).and_then(Value::as_object)
    }

    /// Every top-level key with its value as an object, or `None` where the
    /// value is not an object.
    fn sub_configs(&self) -> impl Iterator<Item = (&str, Option<&Map>)>;

    /// Number of top-level keys.
    fn key_len(&self) -> usize;

    /// Binds `value` at `path`, deep-merging objects into objects.
    ///
    /// An empty path merges an object into the root and ignores any other
    /// value.
    ///
    /// # Errors
    ///
    /// [`Error::MergeType`](crate::Error::MergeType) if the path passes
    /// through a value that is not an object.
    fn merge(&mut self, path: &str, value: impl Into<Value>) -> Result<()>;
}

impl ConfigExt for Map {
    fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        let mut segments = path.split('.');
        let mut value = self.get(segments.next()?)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        Some(value)
    }

    fn sub_configs(&self) -> impl Iterator<Item = (&str, Option<&Map>)> {
        self.iter().map(|(key, value)| (key.as_str(), value.as_object()))
    }

    fn key_len(&self) -> usize {
        self.len()
    }

    fn merge(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments: Vec<String> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.').map(str::to_owned).collect()
        };
        let mut tree = TreeBuilder::from_map(std::mem::take(self));
        let result = tree.insert(&segments, value.into());
        *self = tree.finish();
        result
    }
}
