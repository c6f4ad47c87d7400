// ============================================================================
// spark-collections - Set
// A deduplicated sequence built on Vector
// ============================================================================

use std::fmt;
use std::hash::Hasher;

use tracing::trace;

use crate::collections::slots::IntoSlots;
use crate::collections::vec::Vector;
use crate::core::types::{Collection, Element};
use crate::semantics::identity::Identity;
use crate::semantics::render::{Render, render_slots};

// =============================================================================
// SET
// =============================================================================

/// An immutable set that keeps insertion order.
///
/// A `Set` wraps a [`Vector`] that never holds the same value twice.
/// Uniqueness is established in exactly one place, the constructor, which
/// runs [`Vector::unique`]. Every operation that could introduce a duplicate
/// goes back through it.
///
/// [`delete`](Set::delete) leaves a hole in the backing vector, just like
/// [`Vector::delete`], so [`size`](Collection::size) counts it until
/// [`compact`](Set::compact) is called.
///
/// # Example
///
/// ```
/// use spark_collections::Set;
///
/// let tags = Set::from(vec!["b", "a", "b", "c", "a"]);
/// assert_eq!(tags.to_vec(), vec!["b", "a", "c"]);
/// assert_eq!(tags.to_string(), "set<b,a,c>");
///
/// // Re-adding an existing value changes nothing
/// assert!(tags.add("a").ptr_eq(&tags));
///
/// let more = tags.concat(vec!["d", "a"]);
/// assert_eq!(more.to_string(), "set<b,a,c,d>");
/// ```
pub struct Set<T> {
    /// Backing sequence, unique by construction
    items: Vector<T>,
}

impl<T> Set<T> {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            items: Vector::new(),
        }
    }

    /// Number of slots in the backing vector, holes included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the backing vector has no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when both handles are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.items.ptr_eq(&other.items)
    }

    /// The backing sequence.
    pub fn as_vector(&self) -> &Vector<T> {
        &self.items
    }

    /// Iterates over present values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T: Clone + Identity> Set<T> {
    /// The single entry point that establishes uniqueness.
    fn from_vector(items: Vector<T>) -> Self {
        trace!(len = items.len(), "set rebuilt");
        Self {
            items: items.unique(),
        }
    }

    /// Present values in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.to_vec()
    }

    /// True if the set holds a value that is the same as `value`.
    pub fn has(&self, value: &T) -> bool {
        self.items.includes(value)
    }

    // =========================================================================
    // ADD / DELETE
    // =========================================================================

    /// Adds a value, returning the receiver if it is already present.
    pub fn add(&self, value: impl Into<T>) -> Set<T> {
        let value = value.into();
        if self.has(&value) {
            return self.clone();
        }
        self.concat([value])
    }

    /// Removes `value`, leaving a hole where it was.
    ///
    /// Returns the receiver if `value` is not present.
    pub fn delete(&self, value: &T) -> Set<T> {
        match self.items.index_of(value) {
            Some(index) => Set::from_vector(self.items.delete(index)),
            None => self.clone(),
        }
    }

    /// Drops the holes left behind by [`delete`](Set::delete).
    pub fn compact(&self) -> Set<T> {
        let compacted = self.items.compact();
        if compacted.ptr_eq(&self.items) {
            return self.clone();
        }
        Set::from_vector(compacted)
    }

    // =========================================================================
    // CONCAT
    // =========================================================================

    /// Appends the values of `other` and deduplicates the result.
    ///
    /// `other` may be a raw list, a [`Vector`] or another `Set`.
    pub fn concat<O>(&self, other: O) -> Set<T>
    where
        O: IntoSlots<T>,
    {
        Set::from_vector(self.items.concat(other))
    }
}

// =============================================================================
// COLLECTION CONTRACT
// =============================================================================

impl<T: Element> Collection for Set<T> {
    type Key = usize;
    type Item = T;
    type Mapped<U: Element> = Set<U>;

    fn size(&self) -> usize {
        self.items.len()
    }

    /// Values that map to the same result collapse into one.
    fn map<U, F>(&self, f: F) -> Set<U>
    where
        U: Element,
        F: FnMut(&T, &usize) -> U,
    {
        Set::from_vector(self.items.map(f))
    }

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T, &usize),
    {
        self.items.for_each(f)
    }

    fn filter<F>(&self, f: F) -> Set<T>
    where
        F: FnMut(&T, &usize) -> bool,
    {
        Set::from_vector(self.items.filter(f))
    }

    fn find<F>(&self, f: F) -> Option<&T>
    where
        F: FnMut(&T, &usize) -> bool,
    {
        self.items.find(f)
    }

    fn reduce<A, F>(&self, f: F, initial: A) -> A
    where
        F: FnMut(A, &T, &usize) -> A,
    {
        self.items.reduce(f, initial)
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Set<T> {
    /// Shares the store: the clone is the same instance.
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: Clone + Identity> From<Vector<T>> for Set<T> {
    fn from(items: Vector<T>) -> Self {
        Set::from_vector(items)
    }
}

impl<T: Clone + Identity> From<Vec<T>> for Set<T> {
    fn from(values: Vec<T>) -> Self {
        Set::from_vector(Vector::from(values))
    }
}

impl<T: Clone + Identity, const N: usize> From<[T; N]> for Set<T> {
    fn from(values: [T; N]) -> Self {
        Set::from_vector(Vector::from(values))
    }
}

impl<T: Clone + Identity> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set::from_vector(iter.into_iter().collect())
    }
}

// =============================================================================
// IDENTITY / RENDERING
// =============================================================================

impl<T> Identity for Set<T> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        self.items.identity_hash(state)
    }
}

impl<T: Render> Render for Set<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_slots(f, "set<", self.items.slots())
    }
}

impl<T: Render> fmt::Display for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Set")
            .field("items", &self.items)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_empty_set() {
        let set: Set<i32> = Set::new();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "set<>");
    }

    #[test]
    fn construction_dedups_in_first_occurrence_order() {
        let set = Set::from(vec![3, 1, 3, 2, 1, 2]);
        assert_eq!(set.size(), 3);
        assert_eq!(set.to_vec(), vec![3, 1, 2]);
        assert_eq!(set.to_string(), "set<3,1,2>");
    }

    #[test]
    fn construction_from_vector() {
        let vec = Vector::from(vec!["x", "y", "x"]);
        let set = Set::from(vec);
        assert_eq!(set.to_vec(), vec!["x", "y"]);
    }

    #[test]
    fn already_unique_vector_is_wrapped_as_is() {
        let vec = Vector::from(vec![1, 2, 3]);
        let set = Set::from(vec.clone());
        assert!(set.as_vector().ptr_eq(&vec));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let set = Set::from(vec![1, 2, 2, 3, 1]);
        let again = Set::from(set.to_vec());
        assert_eq!(again.to_string(), set.to_string());
    }

    #[test]
    fn has() {
        let set = Set::from(vec![1, 2]);
        assert!(set.has(&1));
        assert!(!set.has(&5));
    }

    #[test]
    fn delete_leaves_hole() {
        let set = Set::from(vec![1, 2, 3]);
        let removed = set.delete(&2);

        assert!(!removed.has(&2));
        assert_eq!(removed.size(), 3);
        assert_eq!(removed.to_string(), "set<1,,3>");

        // Original untouched
        assert!(set.has(&2));
    }

    #[test]
    fn delete_missing_returns_receiver() {
        let set = Set::from(vec![1, 2, 3]);
        assert!(set.delete(&9).ptr_eq(&set));
    }

    #[test]
    fn repeated_deletes_keep_separate_holes() {
        let set = Set::from(vec![1, 2, 3, 4]).delete(&2).delete(&3);
        assert_eq!(set.size(), 4);
        assert_eq!(set.to_string(), "set<1,,,4>");

        let compacted = set.compact();
        assert_eq!(compacted.to_string(), "set<1,4>");
        assert!(compacted.compact().ptr_eq(&compacted));
    }

    #[test]
    fn concat_dedups_combined_values() {
        let set = Set::from(vec![1, 2]);

        assert_eq!(set.concat(vec![2, 3]).to_vec(), vec![1, 2, 3]);
        assert_eq!(set.concat(&Vector::from(vec![3, 1])).to_vec(), vec![1, 2, 3]);
        assert_eq!(set.concat(&Set::from(vec![4, 4])).to_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn add() {
        let set = Set::from(vec![1, 2]);
        assert!(set.add(2).ptr_eq(&set));
        assert_eq!(set.add(3).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn contract_operations() {
        let set = Set::from(vec![1, 2, 3, 4]);

        // map re-dedups
        let parity = set.map(|v, _| v % 2);
        assert_eq!(parity.to_vec(), vec![1, 0]);

        assert_eq!(set.filter(|v, _| v % 2 == 0).to_string(), "set<2,4>");
        assert_eq!(set.find(|v, _| *v > 2), Some(&3));
        assert_eq!(set.reduce(|acc, v, _| acc * v, 1), 24);

        let mut visited = Vec::new();
        set.for_each(|v, _| visited.push(*v));
        assert_eq!(visited, vec![1, 2, 3, 4]);
    }

    #[test]
    fn collect_into_set() {
        let set: Set<char> = "hello".chars().collect();
        assert_eq!(set.to_string(), "set<h,e,l,o>");
    }

    #[test]
    fn debug_format() {
        let set = Set::from(vec![1]);
        assert!(format!("{:?}", set).contains("Set"));
    }
}
