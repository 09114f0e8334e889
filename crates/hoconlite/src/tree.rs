//! Materializes emitted key/value pairs into a nested [`Map`].

use crate::{
    error::{Error, Result},
    parser::KvPair,
    value::{Map, Value},
};

/// Folds [`KvPair`]s, in emission order, into a configuration tree.
///
/// Intermediate objects are created on demand. A later pair at the same path
/// replaces the earlier value, except that two objects are merged key by key.
///
/// ```
/// use hoconlite::{TreeBuilder, Value};
///
/// let mut tree = TreeBuilder::new();
/// tree.insert(&["a".to_string(), "b".to_string()], Value::from(1)).unwrap();
/// tree.insert(&["a".to_string(), "c".to_string()], Value::from(true)).unwrap();
/// let root = Value::Object(tree.finish());
/// assert_eq!(root.to_string(), r#"{"a":{"b":1,"c":true}}"#);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Map,
}

impl TreeBuilder {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing tree.
    #[must_use]
    pub fn from_map(root: Map) -> Self {
        Self { root }
    }

    /// Binds `value` at `path`.
    ///
    /// An empty path merges an object into the root and ignores anything
    /// else.
    ///
    /// # Errors
    ///
    /// [`Error::MergeType`] if a proper prefix of `path` already holds a
    /// value that is not an object.
    pub fn insert(&mut self, path: &[String], value: Value) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            if let Value::Object(map) = value {
                merge_maps(&mut self.root, map);
            }
            return Ok(());
        };
        let node = descend(&mut self.root, path, parents.len())?;
        bind(node, last, value);
        Ok(())
    }

    /// Makes sure an object exists at `path`, as a `{` after a key does.
    ///
    /// An existing object is left alone. Unlike [`TreeBuilder::insert`], a
    /// value that is not an object is never replaced.
    ///
    /// # Errors
    ///
    /// [`Error::MergeType`] if `path`, or any prefix of it, holds a value
    /// that is not an object.
    pub fn open(&mut self, path: &[String]) -> Result<()> {
        descend(&mut self.root, path, path.len()).map(|_| ())
    }

    /// Inserts every pair in order.
    ///
    /// # Errors
    ///
    /// The first [`Error::MergeType`] raised by [`TreeBuilder::insert`].
    pub fn extend<I: IntoIterator<Item = KvPair>>(&mut self, pairs: I) -> Result<()> {
        for pair in pairs {
            if pair.opens_object {
                self.open(&pair.path)?;
            } else {
                self.insert(&pair.path, pair.value)?;
            }
        }
        Ok(())
    }

    /// The finished tree.
    #[must_use]
    pub fn finish(self) -> Map {
        self.root
    }

    /// Builds a tree from a complete pair stream.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::insert`].
    pub fn build<I: IntoIterator<Item = KvPair>>(pairs: I) -> Result<Map> {
        let mut tree = Self::new();
        tree.extend(pairs)?;
        Ok(tree.finish())
    }
}

/// Walks the first `depth` segments of `path`, creating missing objects.
fn descend<'a>(mut node: &'a mut Map, path: &[String], depth: usize) -> Result<&'a mut Map> {
    for (index, segment) in path[..depth].iter().enumerate() {
        let slot = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match slot {
            Value::Object(map) => map,
            other => {
                return Err(Error::MergeType {
                    key: path[..=index].join("."),
                    found: other.kind_name(),
                });
            }
        };
    }
    Ok(node)
}

fn bind(node: &mut Map, key: &str, value: Value) {
    let Some(slot) = node.get_mut(key) else {
        node.insert(key.to_owned(), value);
        return;
    };
    match (slot, value) {
        (Value::Object(existing), Value::Object(incoming)) => merge_maps(existing, incoming),
        (slot, value) => *slot = value,
    }
}

/// Deep-merges `incoming` into `target`; non-object values in `incoming` win.
fn merge_maps(target: &mut Map, incoming: Map) {
    for (key, value) in incoming {
        bind(target, &key, value);
    }
}
