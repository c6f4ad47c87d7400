// ============================================================================
// spark-collections - Immutable Collections with Reference Equality
// ============================================================================
//
// Vector, Map and Set that never change in place. Every update returns a new
// collection and leaves the receiver untouched; an update that would change
// nothing returns the receiver itself. Elements compare by reference
// equality: primitives by value, containers by instance.
//
// Records layer named, shape-checked fields on top of Map.
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;
pub mod record;
pub mod semantics;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::{Error, Result};
pub use crate::core::types::{Collection, Element, Shared};
pub use crate::core::value::{FromValue, Value};

pub use semantics::identity::{ByIdentity, Identity, Ref};
pub use semantics::render::{render, Render, Rendered};

// Re-export collections
pub use collections::{IntoSlots, Map, Set, Vector};

// Re-export records
pub use record::{record, Record, RecordFactory, RecordShape};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Sequence properties
    // =========================================================================

    #[test]
    fn set_then_get_reads_back_the_value() {
        let s = Vector::from(vec![1, 2, 3]);
        let t = s.set(1, 9);
        assert_eq!(t.get(1), Some(&9));
        assert!(!t.ptr_eq(&s));
    }

    #[test]
    fn set_with_the_same_value_is_the_receiver() {
        let s = Vector::from(vec![1, 2, 3]);
        assert!(s.set(1, 2).ptr_eq(&s));

        let inner = Vector::from(vec![0]);
        let nested = Vector::from(vec![inner.clone()]);
        assert!(nested.set(0, inner).ptr_eq(&nested));
        assert!(!nested.set(0, Vector::from(vec![0])).ptr_eq(&nested));
    }

    #[test]
    fn delete_leaves_a_hole() {
        let s = Vector::from([10, 20, 30]).delete(1);
        assert_eq!(s.size(), 3);
        assert_eq!(s.get(0), Some(&10));
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(2), Some(&30));
        assert_eq!(s.to_string(), "vec<10,,30>");
    }

    #[test]
    fn heterogeneous_concat() {
        let numbers: Vector<Value> = Vector::from([1, 2]).widen();
        let joined = numbers.concat(["a", "b"]);
        assert_eq!(joined.to_string(), "vec<1,2,a,b>");
    }

    // =========================================================================
    // Map properties
    // =========================================================================

    #[test]
    fn map_lookup_and_key_order() {
        let m = Map::from([("a", 1), ("b", 2)]);
        assert_eq!(m.get("a"), Some(&1));
        assert_eq!(m.keys(), vec!["a", "b"]);
    }

    #[test]
    fn map_filter_keeping_everything_is_the_receiver() {
        let m = Map::from([("a", 1), ("b", 2)]);
        assert!(m.filter(|_, _| true).ptr_eq(&m));
    }

    // =========================================================================
    // Set properties
    // =========================================================================

    #[test]
    fn set_size_counts_distinct_values() {
        let s = Set::from(vec!["x", "y", "x", "z", "y"]);
        assert_eq!(s.size(), 3);
        assert_eq!(s.to_vec(), vec!["x", "y", "z"]);
    }

    #[test]
    fn set_rebuild_renders_identically() {
        let list = vec![5, 3, 5, 1, 3];
        let s = Set::from(list);
        assert_eq!(Set::from(s.to_vec()).to_string(), s.to_string());
    }

    // =========================================================================
    // Record properties
    // =========================================================================

    #[test]
    fn record_chaining() -> Result<()> {
        let person = record("Person", ["name", "age"]);
        let p = person.create([("name", Value::from("Thomas")), ("age", Value::from(34))])?;

        let x = p.set("name", "X")?;
        assert_eq!(x.get("name"), Some(&Value::from("X")));
        assert_eq!(p.get("name"), Some(&Value::from("Thomas")));
        assert!(p.set("name", "Thomas")?.ptr_eq(&p));
        Ok(())
    }

    // =========================================================================
    // Macros
    // =========================================================================

    #[test]
    fn construction_macros() {
        let v: Vector<i32> = vector![];
        assert!(v.is_empty());
        assert_eq!(vector![1, 2].to_string(), "vec<1,2>");
        assert_eq!(set![1, 1, 2].to_string(), "set<1,2>");
        assert_eq!(map!(1 => "one").to_string(), "map<1: one>");
    }
}
