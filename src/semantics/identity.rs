// ============================================================================
// spark-collections - Reference Equality
// Identity for objects, value equality for primitives
// ============================================================================
//
// Membership tests, key lookup, dedup and no-op detection all use one
// sameness check:
//
// - primitives (numbers, bool, char, strings) compare by value
// - containers and `Ref<T>` handles compare by instance (shared store pointer)
//
// There is no deep or structural comparison anywhere in the crate.
// ============================================================================

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::core::types::Shared;

// =============================================================================
// IDENTITY TRAIT
// =============================================================================

/// Reference equality.
///
/// `identity_hash` must agree with `same`: two values that are `same` must
/// feed identical data to the hasher. Types whose owned form borrows as
/// another `Identity` type (`String` as `str`, `Shared<str>` as `str`) hash
/// exactly like the borrowed form, which is what lets a `Map` keyed by owned
/// strings be queried with `&str`.
///
/// # Example
///
/// ```
/// use spark_collections::{Identity, Ref, Vector};
///
/// // Primitives compare by value
/// assert!(42_i64.same(&42));
/// assert!("hello".same(&"hello"));
///
/// // Containers compare by instance
/// let a = Vector::from(vec![1, 2, 3]);
/// let b = Vector::from(vec![1, 2, 3]);
/// assert!(a.same(&a.clone()));
/// assert!(!a.same(&b));
///
/// // Arbitrary objects get identity through Ref
/// let obj = Ref::new(vec![1, 2, 3]);
/// assert!(obj.same(&obj.clone()));
/// assert!(!obj.same(&Ref::new(vec![1, 2, 3])));
/// ```
pub trait Identity {
    /// True when both values are the same under reference equality.
    fn same(&self, other: &Self) -> bool;

    /// Feeds the identity of this value into `state`.
    fn identity_hash<H: Hasher>(&self, state: &mut H);
}

macro_rules! value_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }

                fn identity_hash<H: Hasher>(&self, state: &mut H) {
                    self.hash(state)
                }
            }
        )*
    };
}

value_identity!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
);

macro_rules! float_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                /// IEEE comparison: NaN is never the same as anything.
                fn same(&self, other: &Self) -> bool {
                    self == other
                }

                fn identity_hash<H: Hasher>(&self, state: &mut H) {
                    // 0.0 and -0.0 are the same number
                    let normalized = if *self == 0.0 { 0.0 } else { *self };
                    normalized.to_bits().hash(state)
                }
            }
        )*
    };
}

float_identity!(f32, f64);

impl Identity for Shared<str> {
    fn same(&self, other: &Self) -> bool {
        **self == **other
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        (**self).identity_hash(state)
    }
}

impl<T: Identity + ?Sized> Identity for &T {
    fn same(&self, other: &Self) -> bool {
        (**self).same(*other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        (**self).identity_hash(state)
    }
}

// =============================================================================
// HASHING ADAPTERS
// =============================================================================

/// Wraps a value so that `Hash` and `Eq` follow [`Identity`].
///
/// Used as the key type of the map's backing store and by the dedup pass.
#[derive(Clone, Copy, Debug)]
pub struct ByIdentity<T>(pub T);

impl<T: Identity> PartialEq for ByIdentity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.same(&other.0)
    }
}

impl<T: Identity> Eq for ByIdentity<T> {}

impl<T: Identity> Hash for ByIdentity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.identity_hash(state)
    }
}

/// Borrowed lookup key for stores keyed by [`ByIdentity`].
///
/// Lets `Map<String, _>` be queried with a `&str` without allocating.
pub(crate) struct Lookup<'a, Q: ?Sized>(pub(crate) &'a Q);

impl<Q: Identity + ?Sized> Hash for Lookup<'_, Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.identity_hash(state)
    }
}

impl<Q, K> indexmap::Equivalent<ByIdentity<K>> for Lookup<'_, Q>
where
    Q: Identity + ?Sized,
    K: Borrow<Q>,
{
    fn equivalent(&self, key: &ByIdentity<K>) -> bool {
        self.0.same(key.0.borrow())
    }
}

// =============================================================================
// OBJECT HANDLE
// =============================================================================

/// A shared handle giving any value reference-equality semantics.
///
/// Two `Ref`s are the same only if they point at the same allocation, no
/// matter what the pointee looks like. Renders through `Debug`.
pub struct Ref<T: ?Sized>(Shared<T>);

impl<T> Ref<T> {
    /// Allocates a new object.
    pub fn new(value: T) -> Self {
        Ref(Shared::new(value))
    }
}

impl<T: ?Sized> Ref<T> {
    /// True when both handles point at the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Shared::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Ref(Shared::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Ref<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> From<Shared<T>> for Ref<T> {
    fn from(shared: Shared<T>) -> Self {
        Ref(shared)
    }
}

impl<T: ?Sized> Identity for Ref<T> {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn identity_hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Shared::as_ptr(&self.0), state)
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&&*self.0).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
