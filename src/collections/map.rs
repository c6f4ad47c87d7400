// ============================================================================
// spark-collections - Map
// An insertion-ordered key/value store with copy-on-write updates
// ============================================================================

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

use indexmap::IndexMap;
use tracing::trace;

use crate::core::types::{Collection, Element, Shared};
use crate::semantics::identity::{ByIdentity, Identity, Lookup};
use crate::semantics::render::Render;

// =============================================================================
// MAP
// =============================================================================

/// An immutable map that remembers insertion order.
///
/// Keys are matched by reference equality ([`Identity`]): strings and numbers
/// by value, containers by instance. Any `Identity` type can be a key,
/// including other collections.
///
/// [`set`](Map::set) always copies the whole store. [`filter`](Collection::filter)
/// returns the receiver itself when it keeps every entry.
///
/// # Example
///
/// ```
/// use spark_collections::{Collection, Map};
///
/// let ages = Map::from([("alice", 25), ("bob", 30)]);
///
/// assert_eq!(ages.get("alice"), Some(&25));
/// assert_eq!(ages.keys(), vec!["alice", "bob"]);
///
/// let older = ages.set("alice", 26);
/// assert_eq!(older.get("alice"), Some(&26));
/// assert_eq!(ages.get("alice"), Some(&25));
///
/// // Keeping every entry returns the same map
/// assert!(ages.filter(|_, _| true).ptr_eq(&ages));
///
/// assert_eq!(ages.to_string(), "map<alice: 25, bob: 30>");
/// ```
pub struct Map<K, V> {
    /// The backing store
    entries: Shared<IndexMap<ByIdentity<K>, V>>,
}

impl<K, V> Map<K, V> {
    /// Create a new empty map.
    pub fn new() -> Self {
        Self::from_store(IndexMap::new())
    }

    fn from_store(entries: IndexMap<ByIdentity<K>, V>) -> Self {
        Self {
            entries: Shared::new(entries),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when both handles are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(&self.entries, &other.entries)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (&key.0, value))
    }
}

impl<K: Identity, V> Map<K, V> {
    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Returns true if the map contains `key`.
    ///
    /// Accepts any borrowed form of the key type, e.g. `&str` for `String`
    /// keys.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        self.entries.contains_key(&Lookup(key))
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        self.entries.get(&Lookup(key))
    }
}

impl<K: Clone + Identity, V: Clone> Map<K, V> {
    /// Copies the backing store for a write.
    fn copy_entries(&self) -> IndexMap<ByIdentity<K>, V> {
        trace!(len = self.entries.len(), "map store copied");
        self.entries.as_ref().clone()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<K> {
        self.entries.keys().map(|key| key.0.clone()).collect()
    }

    /// Values in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }

    // =========================================================================
    // SET / DELETE
    // =========================================================================

    /// Inserts or overwrites `key`, always returning a new map.
    ///
    /// An overwritten key keeps its original position.
    pub fn set(&self, key: K, value: V) -> Map<K, V> {
        let mut entries = self.copy_entries();
        entries.insert(ByIdentity(key), value);
        Map::from_store(entries)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    ///
    /// Returns the receiver if `key` is not present.
    pub fn delete<Q>(&self, key: &Q) -> Map<K, V>
    where
        K: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        if !self.has(key) {
            return self.clone();
        }
        let mut entries = self.copy_entries();
        entries.shift_remove(&Lookup(key));
        Map::from_store(entries)
    }
}

// =============================================================================
// COLLECTION CONTRACT
// =============================================================================

impl<K: Element, V: Element> Collection for Map<K, V> {
    type Key = K;
    type Item = V;
    type Mapped<U: Element> = Map<K, U>;

    fn size(&self) -> usize {
        self.len()
    }

    fn map<U, F>(&self, mut f: F) -> Map<K, U>
    where
        U: Element,
        F: FnMut(&V, &K) -> U,
    {
        Map::from_store(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), f(value, &key.0)))
                .collect(),
        )
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self.iter() {
            f(value, key);
        }
    }

    /// Returns the receiver when every entry is kept.
    fn filter<F>(&self, mut f: F) -> Map<K, V>
    where
        F: FnMut(&V, &K) -> bool,
    {
        let kept: IndexMap<ByIdentity<K>, V> = self
            .entries
            .iter()
            .filter(|(key, value)| f(value, &key.0))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if kept.len() == self.entries.len() {
            return self.clone();
        }
        Map::from_store(kept)
    }

    fn find<F>(&self, mut f: F) -> Option<&V>
    where
        F: FnMut(&V, &K) -> bool,
    {
        self.iter()
            .find(|(key, value)| f(value, key))
            .map(|(_, value)| value)
    }

    fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        F: FnMut(A, &V, &K) -> A,
    {
        self.iter()
            .fold(initial, |acc, (key, value)| f(acc, value, key))
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================
//
// A map can be built from a list of pairs, from a native key/value store, or
// from another `Map` (the reflexive `From`, which hands back the same
// instance). A later duplicate key overwrites the earlier value in place.
// =============================================================================

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Map<K, V> {
    /// Shares the store: the clone is the same instance.
    fn clone(&self) -> Self {
        Self {
            entries: Shared::clone(&self.entries),
        }
    }
}

impl<K: Identity, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map::from_store(
            iter.into_iter()
                .map(|(key, value)| (ByIdentity(key), value))
                .collect(),
        )
    }
}

impl<K: Identity, V> From<Vec<(K, V)>> for Map<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Identity, V, const N: usize> From<[(K, V); N]> for Map<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Identity, V, S> From<HashMap<K, V, S>> for Map<K, V> {
    /// Entry order follows the hash map's iteration order.
    fn from(store: HashMap<K, V, S>) -> Self {
        store.into_iter().collect()
    }
}

impl<K: Identity, V> From<BTreeMap<K, V>> for Map<K, V> {
    fn from(store: BTreeMap<K, V>) -> Self {
        store.into_iter().collect()
    }
}

impl<K: Identity, V, S: BuildHasher> From<IndexMap<K, V, S>> for Map<K, V> {
    fn from(store: IndexMap<K, V, S>) -> Self {
        store.into_iter().collect()
    }
}

// =============================================================================
// IDENTITY / RENDERING
// =============================================================================

impl<K, V> Identity for Map<K, V> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Shared::as_ptr(&self.entries), state)
    }
}

impl<K: Render, V: Render> Render for Map<K, V> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map<")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            key.render(f)?;
            f.write_str(": ")?;
            value.render(f)?;
        }
        f.write_str(">")
    }
}

impl<K: Render, V: Render> fmt::Display for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Map ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    #[test]
    fn create_empty_map() {
        let map: Map<String, i32> = Map::new();
        assert!(map.is_empty());
        assert_eq!(map.to_string(), "map<>");
    }

    #[test]
    fn create_from_pairs() {
        let map = Map::from(vec![("a", 1), ("b", 2)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), None);
        assert_eq!(map.keys(), vec!["a", "b"]);
        assert_eq!(map.values(), vec![1, 2]);
    }

    #[test]
    fn later_duplicate_overwrites_in_place() {
        let map = Map::from([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(map.keys(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn create_from_native_stores() {
        let mut ordered = IndexMap::new();
        ordered.insert(String::from("x"), 1);
        ordered.insert(String::from("y"), 2);
        let map = Map::from(ordered);
        assert_eq!(map.keys(), vec![String::from("x"), String::from("y")]);

        let mut sorted = BTreeMap::new();
        sorted.insert(2, "two");
        sorted.insert(1, "one");
        assert_eq!(Map::from(sorted).to_string(), "map<1: one, 2: two>");

        let mut hashed = HashMap::new();
        hashed.insert("k", 9);
        assert_eq!(Map::from(hashed).get("k"), Some(&9));
    }

    #[test]
    fn wrapping_a_map_returns_the_same_instance() {
        let map = Map::from([("a", 1)]);
        let wrapped = Map::from(map.clone());
        assert!(wrapped.ptr_eq(&map));
    }

    #[test]
    fn string_keys_query_by_str() {
        let map = Map::from([(String::from("name"), 1)]);
        assert!(map.has("name"));
        assert_eq!(map.get("name"), Some(&1));
        assert!(!map.has("other"));
    }

    #[test]
    fn set_always_copies() {
        let map = Map::from([("a", 1)]);

        let changed = map.set("a", 2);
        assert_eq!(changed.get("a"), Some(&2));
        assert_eq!(map.get("a"), Some(&1));

        // Even an identical write produces a new map
        let same_value = map.set("a", 1);
        assert!(!same_value.ptr_eq(&map));
    }

    #[test]
    fn set_appends_new_keys_at_end() {
        let map = Map::from([("b", 2)]).set("a", 1);
        assert_eq!(map.keys(), vec!["b", "a"]);
    }

    #[test]
    fn delete() {
        let map = Map::from([("a", 1), ("b", 2), ("c", 3)]);
        let removed = map.delete("b");
        assert_eq!(removed.keys(), vec!["a", "c"]);
        assert_eq!(map.len(), 3);

        assert!(map.delete("zzz").ptr_eq(&map));
    }

    #[test]
    fn filter_keeps_identity_when_nothing_removed() {
        let map = Map::from([("a", 1), ("b", 2)]);
        assert!(map.filter(|_, _| true).ptr_eq(&map));

        let odd = map.filter(|v, _| v % 2 == 1);
        assert!(!odd.ptr_eq(&map));
        assert_eq!(odd.keys(), vec!["a"]);
    }

    #[test]
    fn contract_operations() {
        let map = Map::from([("a", 1), ("b", 2), ("c", 3)]);

        let doubled = map.map(|v, _| v * 2);
        assert_eq!(doubled.to_string(), "map<a: 2, b: 4, c: 6>");

        assert_eq!(map.find(|v, _| *v > 1), Some(&2));
        assert_eq!(map.find(|_, k| *k == "c"), Some(&3));

        let joined = map.reduce(
            |mut acc, v, k| {
                acc.push_str(&format!("{}{}", k, v));
                acc
            },
            String::new(),
        );
        assert_eq!(joined, "a1b2c3");

        let mut keys = Vec::new();
        map.for_each(|_, k| keys.push(*k));
        assert_eq!(keys, vec!["a", "b", "c"]);

        assert_eq!(map.size(), 3);
    }

    #[test]
    fn containers_as_keys_compare_by_instance() {
        let first = Vector::from(vec![1, 2]);
        let lookalike = Vector::from(vec![1, 2]);

        let map = Map::from([(first.clone(), "first")]);
        assert_eq!(map.get(&first), Some(&"first"));
        assert_eq!(map.get(&lookalike), None);

        let both = map.set(lookalike.clone(), "lookalike");
        assert_eq!(both.len(), 2);
        assert_eq!(both.to_string(), "map<vec<1,2>: first, vec<1,2>: lookalike>");
    }

    #[test]
    fn debug_format() {
        let map = Map::from([("a", 1)]);
        assert_eq!(format!("{:?}", map), "Map {\"a\": 1}");
    }
}
