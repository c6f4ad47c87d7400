// ============================================================================
// spark-collections - Collections
// Vector, Map, and Set with copy-on-write updates and instance identity
// ============================================================================
//
// Every collection holds its store behind a shared pointer. Cloning a handle
// yields the same instance; every write builds a new store and hands back a
// new instance, leaving the receiver untouched. Operations that would not
// change anything return the receiver itself.
// ============================================================================

mod map;
mod set;
mod slots;
mod vec;

pub use map::Map;
pub use set::Set;
pub use slots::IntoSlots;
pub use vec::Vector;
