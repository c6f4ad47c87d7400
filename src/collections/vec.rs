// ============================================================================
// spark-collections - Vector
// An immutable, index-addressed sequence with copy-on-write updates
// ============================================================================

use std::collections::HashSet;
use std::fmt;
use std::hash::Hasher;

use tracing::{debug, trace};

use crate::collections::slots::IntoSlots;
use crate::core::types::{Collection, Element, Shared};
use crate::semantics::identity::{ByIdentity, Identity};
use crate::semantics::render::{Render, render_slots};

// =============================================================================
// VECTOR
// =============================================================================

/// An immutable sequence.
///
/// Every slot either holds a value or is a *hole*. Holes appear when a value
/// is removed with [`delete`](Vector::delete), [`pop`](Vector::pop) or
/// [`shift`](Vector::shift): the slot stays and still counts toward
/// [`len`](Vector::len). Reading a hole yields `None`.
///
/// Updates never touch the receiver. They copy the backing store, edit the
/// copy, and return a new `Vector`. When an update would change nothing the
/// receiver itself is returned ([`ptr_eq`](Vector::ptr_eq) is true).
///
/// Cloning a `Vector` is cheap: the clone is the same instance.
///
/// # Example
///
/// ```
/// use spark_collections::Vector;
///
/// let v = Vector::from(vec![10, 20, 30]);
///
/// // Copy-on-write
/// let w = v.set(1, 25);
/// assert_eq!(v.get(1), Some(&20));
/// assert_eq!(w.get(1), Some(&25));
///
/// // Writing the same value is a no-op
/// assert!(v.set(1, 20).ptr_eq(&v));
///
/// // Deleting leaves a hole
/// let holed = v.delete(1);
/// assert_eq!(holed.len(), 3);
/// assert_eq!(holed.get(1), None);
/// assert_eq!(holed.to_string(), "vec<10,,30>");
/// ```
pub struct Vector<T> {
    /// The backing store; `None` marks a hole
    slots: Shared<Vec<Option<T>>>,
}

impl<T> Vector<T> {
    /// Create a new empty vector.
    pub fn new() -> Self {
        Self::from_slots(Vec::new())
    }

    pub(crate) fn from_slots(slots: Vec<Option<T>>) -> Self {
        Self {
            slots: Shared::new(slots),
        }
    }

    // =========================================================================
    // LENGTH
    // =========================================================================

    /// Number of slots, holes included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the vector has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when both handles are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(&self.slots, &other.slots)
    }

    // =========================================================================
    // GET
    // =========================================================================

    /// Returns the value at `index`, or `None` for a hole or an index past
    /// the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the first slot's value.
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the last slot's value.
    pub fn last(&self) -> Option<&T> {
        self.slots.last().and_then(Option::as_ref)
    }

    /// Index of the first present value matching `f`.
    pub fn find_index<F>(&self, mut f: F) -> Option<usize>
    where
        F: FnMut(&T, usize) -> bool,
    {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(index, slot)| match slot {
                Some(value) if f(value, index) => Some(index),
                _ => None,
            })
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// Iterates over present values, skipping holes.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().flatten()
    }

    /// Iterates over every slot, holes included.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Iterates over `(index, value)` for present values.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }

    /// Converts every element into a broader element type.
    ///
    /// ```
    /// use spark_collections::{Value, Vector};
    ///
    /// let numbers: Vector<Value> = Vector::from(vec![1_i64, 2]).widen();
    /// let mixed = numbers.push("three");
    /// assert_eq!(mixed.to_string(), "vec<1,2,three>");
    /// ```
    pub fn widen<U>(&self) -> Vector<U>
    where
        T: Clone + Into<U>,
    {
        Vector::from_slots(
            self.slots
                .iter()
                .map(|slot| slot.clone().map(Into::into))
                .collect(),
        )
    }
}

impl<T: Clone> Vector<T> {
    /// Copies the backing store for a write.
    fn copy_slots(&self) -> Vec<Option<T>> {
        trace!(len = self.slots.len(), "vector store copied");
        self.slots.as_ref().clone()
    }

    /// Present values in order; holes are skipped.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Every slot in order, holes as `None`.
    pub fn to_slots(&self) -> Vec<Option<T>> {
        self.slots.as_ref().clone()
    }

    // =========================================================================
    // SLICE
    // =========================================================================

    /// Copies the half-open range `lo..hi` into a new vector.
    ///
    /// Bounds are clamped to the length; an empty or inverted range yields an
    /// empty vector.
    pub fn slice(&self, lo: usize, hi: usize) -> Vector<T> {
        let hi = hi.min(self.len());
        let lo = lo.min(hi);
        Vector::from_slots(self.slots[lo..hi].to_vec())
    }

    // =========================================================================
    // PUSH / UNSHIFT
    // =========================================================================

    /// Appends a value.
    pub fn push(&self, value: impl Into<T>) -> Vector<T> {
        let mut slots = self.copy_slots();
        slots.push(Some(value.into()));
        Vector::from_slots(slots)
    }

    /// Prepends a value.
    pub fn unshift(&self, value: impl Into<T>) -> Vector<T> {
        let mut slots = Vec::with_capacity(self.len() + 1);
        slots.push(Some(value.into()));
        slots.extend(self.copy_slots());
        Vector::from_slots(slots)
    }

    // =========================================================================
    // POP / SHIFT
    // =========================================================================

    /// Removes the value in the last slot, leaving a hole.
    ///
    /// Returns the removed value (`None` if the slot was already a hole or
    /// the vector is empty) together with the resulting vector. The length
    /// does not shrink, so popping again hits the same hole.
    pub fn pop(&self) -> (Option<T>, Vector<T>) {
        match self.len().checked_sub(1) {
            Some(last) => self.take(last),
            None => (None, self.clone()),
        }
    }

    /// Removes the value in the first slot, leaving a hole.
    ///
    /// See [`pop`](Vector::pop) for the return value.
    pub fn shift(&self) -> (Option<T>, Vector<T>) {
        self.take(0)
    }

    fn take(&self, index: usize) -> (Option<T>, Vector<T>) {
        match self.get(index) {
            Some(value) => {
                let value = value.clone();
                (Some(value), self.delete(index))
            }
            None => (None, self.clone()),
        }
    }

    // =========================================================================
    // DELETE / COMPACT
    // =========================================================================

    /// Turns `index` into a hole.
    ///
    /// Returns the receiver if the slot is already a hole or out of range.
    /// Any present value is removed, including `0`, `false` and `""`.
    pub fn delete(&self, index: usize) -> Vector<T> {
        if self.get(index).is_none() {
            return self.clone();
        }
        let mut slots = self.copy_slots();
        slots[index] = None;
        Vector::from_slots(slots)
    }

    /// Drops every hole, shifting later values down.
    ///
    /// Returns the receiver if there are no holes.
    pub fn compact(&self) -> Vector<T> {
        if self.slots.iter().all(Option::is_some) {
            return self.clone();
        }
        Vector::from_slots(
            self.slots
                .iter()
                .filter(|slot| slot.is_some())
                .cloned()
                .collect(),
        )
    }

    // =========================================================================
    // CONCAT
    // =========================================================================

    /// Appends every slot of `other`.
    ///
    /// `other` may be a `Vec`, array, slice, [`Vector`] or [`Set`](crate::Set)
    /// of any element type convertible into `T`. Holes in a `Vector` operand
    /// are carried over as holes.
    pub fn concat<O>(&self, other: O) -> Vector<T>
    where
        O: IntoSlots<T>,
    {
        let mut slots = self.copy_slots();
        slots.extend(other.into_slots());
        Vector::from_slots(slots)
    }
}

impl<T: Clone + Identity> Vector<T> {
    // =========================================================================
    // SEARCH
    // =========================================================================

    /// True if some slot holds a value that is the same as `value`.
    pub fn includes(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Index of the first slot holding a value that is the same as `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.find_index(|candidate, _| candidate.same(value))
    }

    // =========================================================================
    // SET / UPDATE
    // =========================================================================

    /// Writes `value` at `index`.
    ///
    /// Returns the receiver when the slot already holds the same value.
    /// Writing past the end pads the gap with holes. An index whose padding
    /// cannot be allocated (e.g. `usize::MAX`) leaves the vector unchanged
    /// and returns the receiver.
    pub fn set(&self, index: usize, value: T) -> Vector<T> {
        if let Some(current) = self.get(index) {
            if current.same(&value) {
                return self.clone();
            }
        }
        let mut slots = self.copy_slots();
        if index >= slots.len() {
            let Some(len) = index.checked_add(1) else {
                debug!(index, "vector index out of addressable range");
                return self.clone();
            };
            if slots.try_reserve_exact(len - slots.len()).is_err() {
                debug!(index, "vector padding could not be allocated");
                return self.clone();
            }
            slots.resize(len, None);
        }
        slots[index] = Some(value);
        Vector::from_slots(slots)
    }

    /// Feeds the current value at `index` (possibly `None`) to `updater` and
    /// writes the result with [`set`](Vector::set), so an index `set` cannot
    /// reach returns the receiver.
    pub fn update<F>(&self, index: usize, updater: F) -> Vector<T>
    where
        F: FnOnce(Option<&T>) -> T,
    {
        let next = updater(self.get(index));
        self.set(index, next)
    }

    // =========================================================================
    // UNIQUE
    // =========================================================================

    /// Stable dedup: keeps the first occurrence of each value.
    ///
    /// Holes stay where they are and never collapse into one another.
    /// Returns the receiver when nothing was removed.
    pub fn unique(&self) -> Vector<T> {
        let mut seen = HashSet::with_capacity(self.len());
        let slots: Vec<Option<T>> = self
            .slots
            .iter()
            .filter(|slot| match slot {
                Some(value) => seen.insert(ByIdentity(value)),
                None => true,
            })
            .cloned()
            .collect();

        if slots.len() == self.len() {
            return self.clone();
        }
        Vector::from_slots(slots)
    }
}

// =============================================================================
// COLLECTION CONTRACT
// =============================================================================

impl<T: Element> Collection for Vector<T> {
    type Key = usize;
    type Item = T;
    type Mapped<U: Element> = Vector<U>;

    fn size(&self) -> usize {
        self.len()
    }

    /// Holes stay holes in the result.
    fn map<U, F>(&self, mut f: F) -> Vector<U>
    where
        U: Element,
        F: FnMut(&T, &usize) -> U,
    {
        Vector::from_slots(
            self.slots
                .iter()
                .enumerate()
                .map(|(index, slot)| slot.as_ref().map(|value| f(value, &index)))
                .collect(),
        )
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, &usize),
    {
        for (index, value) in self.entries() {
            f(value, &index);
        }
    }

    /// The result is dense: holes are dropped along with rejected values.
    fn filter<F>(&self, mut f: F) -> Vector<T>
    where
        F: FnMut(&T, &usize) -> bool,
    {
        Vector::from_slots(
            self.entries()
                .filter(|(index, value)| f(value, index))
                .map(|(_, value)| Some(value.clone()))
                .collect(),
        )
    }

    fn find<F>(&self, mut f: F) -> Option<&T>
    where
        F: FnMut(&T, &usize) -> bool,
    {
        self.entries()
            .find(|(index, value)| f(value, index))
            .map(|(_, value)| value)
    }

    fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        F: FnMut(A, &T, &usize) -> A,
    {
        self.entries()
            .fold(initial, |acc, (index, value)| f(acc, value, &index))
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Vector<T> {
    /// Shares the store: the clone is the same instance.
    fn clone(&self) -> Self {
        Self {
            slots: Shared::clone(&self.slots),
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_slots(values.into_iter().map(Some).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_slots(values.into_iter().map(Some).collect())
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slots(values.iter().cloned().map(Some).collect())
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().map(Some).collect())
    }
}

// =============================================================================
// IDENTITY / RENDERING
// =============================================================================

impl<T> Identity for Vector<T> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Shared::as_ptr(&self.slots), state)
    }
}

impl<T: Render> Render for Vector<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_slots(f, "vec<", self.slots())
    }
}

impl<T: Render> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("slots", &self.slots)
            .field("len", &self.slots.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
