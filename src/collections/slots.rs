// ============================================================================
// spark-collections - Concat Operands
// Normalizes anything concat accepts into a flat list of slots
// ============================================================================

use crate::collections::{Set, Vector};

/// An operand for [`Vector::concat`] and [`Set::concat`].
///
/// Raw lists, arrays and slices become dense slot lists. A [`Vector`] keeps
/// its holes. A [`Set`] contributes its backing sequence. The element type
/// only has to convert into the receiver's, so a `Vector<Value>` can absorb a
/// `Vector<&str>`.
pub trait IntoSlots<T> {
    fn into_slots(self) -> Vec<Option<T>>;
}

impl<T, U: Into<T>> IntoSlots<T> for Vec<U> {
    fn into_slots(self) -> Vec<Option<T>> {
        self.into_iter().map(|value| Some(value.into())).collect()
    }
}

impl<T, U: Into<T>, const N: usize> IntoSlots<T> for [U; N] {
    fn into_slots(self) -> Vec<Option<T>> {
        self.into_iter().map(|value| Some(value.into())).collect()
    }
}

impl<T, U: Clone + Into<T>> IntoSlots<T> for &[U] {
    fn into_slots(self) -> Vec<Option<T>> {
        self.iter().map(|value| Some(value.clone().into())).collect()
    }
}

impl<T, U: Clone + Into<T>> IntoSlots<T> for &Vector<U> {
    fn into_slots(self) -> Vec<Option<T>> {
        self.slots()
            .map(|slot| slot.map(|value| value.clone().into()))
            .collect()
    }
}

impl<T, U: Clone + Into<T>> IntoSlots<T> for Vector<U> {
    fn into_slots(self) -> Vec<Option<T>> {
        (&self).into_slots()
    }
}

impl<T, U: Clone + Into<T>> IntoSlots<T> for &Set<U> {
    fn into_slots(self) -> Vec<Option<T>> {
        self.as_vector().into_slots()
    }
}

impl<T, U: Clone + Into<T>> IntoSlots<T> for Set<U> {
    fn into_slots(self) -> Vec<Option<T>> {
        self.as_vector().into_slots()
    }
}
