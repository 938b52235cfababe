//! Addressable payload slots.
//!
//! A `PayloadSlot<T>` is the owned, mutable-in-place destination the
//! dispatch step decodes into. Callers may hand the request builder a bare
//! value, a borrowed value or a slot they already built; `IntoPayloadSlot`
//! turns all three into a slot so the decode step always has somewhere to
//! write.

use std::ops::{Deref, DerefMut};

/// Owned destination for a decoded payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadSlot<T> {
    value: T,
}

impl<T> PayloadSlot<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replace the held value, returning the previous one.
    pub fn replace(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for PayloadSlot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for PayloadSlot<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

/// Conversion into an addressable slot for payloads of type `T`.
pub trait IntoPayloadSlot<T> {
    fn into_payload_slot(self) -> PayloadSlot<T>;
}

/// Already addressable: stored as is.
impl<T> IntoPayloadSlot<T> for PayloadSlot<T> {
    fn into_payload_slot(self) -> PayloadSlot<T> {
        self
    }
}

/// Bare value: moved into a fresh slot.
impl<T> IntoPayloadSlot<T> for T {
    fn into_payload_slot(self) -> PayloadSlot<T> {
        PayloadSlot::new(self)
    }
}

/// Borrowed value: copied into a fresh slot, the caller's value is never
/// written to.
impl<T: Clone> IntoPayloadSlot<T> for &T {
    fn into_payload_slot(self) -> PayloadSlot<T> {
        PayloadSlot::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Shape {
        name: String,
    }

    fn normalize<P: IntoPayloadSlot<Shape>>(payload: P) -> PayloadSlot<Shape> {
        payload.into_payload_slot()
    }

    #[test]
    fn bare_borrowed_and_slot_inputs_are_equivalent() {
        let shape = Shape {
            name: "x".to_string(),
        };
        let from_value = normalize(shape.clone());
        let from_ref = normalize(&shape);
        let from_slot = normalize(PayloadSlot::new(shape.clone()));
        assert_eq!(from_value, from_ref);
        assert_eq!(from_ref, from_slot);
    }

    #[test]
    fn borrowed_input_is_not_aliased() {
        let shape = Shape::default();
        let mut slot = normalize(&shape);
        slot.name = "written".to_string();
        assert_eq!(shape.name, "");
        assert_eq!(slot.get().name, "written");
    }

    #[test]
    fn replace_returns_previous_value() {
        let mut slot = PayloadSlot::new(1u32);
        assert_eq!(slot.replace(2), 1);
        assert_eq!(slot.into_inner(), 2);
    }
}
