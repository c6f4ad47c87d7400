// ============================================================================
// spark-collections - Type Definitions
// Shared store pointer, element bounds, and the collection contract
// ============================================================================

use std::fmt;

use crate::semantics::identity::Identity;
use crate::semantics::render::Render;

// =============================================================================
// SHARED STORE POINTER
// =============================================================================
//
// Every container keeps its backing store behind a shared, immutable pointer.
// Cloning a container clones the pointer, so both handles are the same
// instance. Writes never go through the pointer: they copy the store, edit
// the copy, and wrap it in a new pointer.
//
// With the `sync` feature the pointer is atomic and containers become
// Send + Sync whenever their elements are.
// =============================================================================

/// Pointer type holding every container's backing store.
#[cfg(not(feature = "sync"))]
pub type Shared<T> = std::rc::Rc<T>;

/// Pointer type holding every container's backing store.
#[cfg(feature = "sync")]
pub type Shared<T> = std::sync::Arc<T>;

// =============================================================================
// ELEMENT BOUND
// =============================================================================

/// Everything a value needs to live inside a collection that can be compared,
/// rendered, and copied into a fresh store.
///
/// Blanket-implemented; never implement it by hand.
pub trait Element: Clone + Identity + Render {}

impl<T: Clone + Identity + Render> Element for T {}

// =============================================================================
// COLLECTION CONTRACT
// =============================================================================

/// The operation set shared by [`Vector`](crate::Vector), [`Set`](crate::Set)
/// and [`Map`](crate::Map).
///
/// `toString` is the `Display` supertrait: every collection renders itself in
/// its textual form (`vec<...>`, `set<...>`, `map<...>`).
///
/// Callbacks receive `(value, key)`. For sequences the key is the slot index;
/// holes are skipped by everything except [`map`](Collection::map), which
/// keeps them in place.
///
/// # Example
///
/// ```
/// use spark_collections::{Collection, Vector};
///
/// let numbers = Vector::from(vec![1, 2, 3, 4]);
///
/// let doubled = numbers.map(|n, _| n * 2);
/// assert_eq!(doubled.to_string(), "vec<2,4,6,8>");
///
/// let even = numbers.filter(|n, _| n % 2 == 0);
/// assert_eq!(even.to_vec(), vec![2, 4]);
///
/// assert_eq!(numbers.find(|n, _| *n > 2), Some(&3));
/// assert_eq!(numbers.reduce(|sum, n, _| sum + n, 0), 10);
/// ```
pub trait Collection: fmt::Display {
    /// Key type passed to callbacks (`usize` for sequences).
    type Key;

    /// Stored value type.
    type Item;

    /// The collection `map` produces for a new value type.
    type Mapped<U: Element>: Collection<Key = Self::Key, Item = U>;

    /// Number of entries (slots, for sequences).
    fn size(&self) -> usize;

    /// Element-wise transform preserving keys and ordering.
    fn map<U, F>(&self, f: F) -> Self::Mapped<U>
    where
        U: Element,
        F: FnMut(&Self::Item, &Self::Key) -> U;

    /// Side-effecting iteration in order.
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Self::Item, &Self::Key);

    /// Keeps the entries for which `f` returns true, in order.
    fn filter<F>(&self, f: F) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool;

    /// First value matching `f` in iteration order.
    fn find<F>(&self, f: F) -> Option<&Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool;

    /// Left fold in iteration order.
    fn reduce<A, F>(&self, f: F, initial: A) -> A
    where
        F: FnMut(A, &Self::Item, &Self::Key) -> A;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, feature = "sync"))]
mod tests {
    use crate::{Map, Record, Set, Value, Vector};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn containers_are_send_and_sync() {
        assert_send_sync::<Vector<i32>>();
        assert_send_sync::<Set<i32>>();
        assert_send_sync::<Map<String, i32>>();
        assert_send_sync::<Value>();
        assert_send_sync::<Record>();
    }

    #[test]
    fn vector_crosses_threads() {
        let v = Vector::from(vec![1, 2, 3]);
        let shared = v.clone();
        let pushed = std::thread::spawn(move || shared.push(4)).join().unwrap();
        assert_eq!(pushed.to_string(), "vec<1,2,3,4>");
        assert_eq!(v.len(), 3);
    }
}
