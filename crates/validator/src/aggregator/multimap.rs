//! Insertion-ordered multi-value map

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;

/// Maps each key to an ordered, non-empty list of values.
///
/// A key is present iff its list is non-empty: removing the last value of a
/// key removes the key, and setting an empty list is a removal.
///
/// # Examples
///
/// ```rust
/// use keel_validator::aggregator::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.add("Name", 1);
/// map.add("Name", 2);
/// assert_eq!(map.get("Name"), [1, 2]);
///
/// map.set_range("Name", Vec::new());
/// assert!(!map.contains_key("Name"));
/// assert!(map.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueMap<K: Hash + Eq, V> {
    entries: IndexMap<K, Vec<V>>,
}

impl<K: Hash + Eq, V> MultiValueMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Appends `value` to the list for `key`.
    pub fn add(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    /// Appends every value to the list for `key`. An empty iterator adds nothing.
    pub fn add_range(&mut self, key: K, values: impl IntoIterator<Item = V>) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_some() {
            self.entries.entry(key).or_default().extend(values);
        }
    }

    /// Replaces the list for `key`. An empty list removes the key.
    ///
    /// Returns the previous list, if the key was present.
    pub fn set_range(&mut self, key: K, values: impl IntoIterator<Item = V>) -> Option<Vec<V>> {
        let values: Vec<V> = values.into_iter().collect();
        if values.is_empty() {
            self.entries.shift_remove(&key)
        } else {
            self.entries.insert(key, values)
        }
    }

    /// Removes `key` and its values.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key)
    }

    /// Removes the first occurrence of `value` from the list for `key`.
    ///
    /// Returns true if a value was removed.
    pub fn remove_value<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let Some(values) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(index) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(index);
        if values.is_empty() {
            self.entries.shift_remove(key);
        }
        true
    }

    /// The values for `key`, empty if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if `key` has at least one value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// `(key, values)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries.iter().map(|(key, values)| (key, values.as_slice()))
    }

    /// The number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Hash + Eq, V> Default for MultiValueMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
