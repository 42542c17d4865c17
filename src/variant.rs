use crate::label::Label;

/// A labeled value: one member of a union.
///
/// `Variant`s are never mutated after construction. Put one into a union with
/// [`Sum::new`](crate::Sum::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variant<L, P> {
    label: L,
    payload: P,
}

/// Combines a label and a payload into a [`Variant`].
///
/// # Examples
///
/// ```rust
/// use tvariant::variant;
///
/// tvariant::label! { pub struct Number; }
///
/// let v = variant(Number, 7);
/// assert_eq!(v.name(), "number");
/// assert_eq!(*v.payload(), 7);
/// ```
pub const fn variant<L, P>(label: L, payload: P) -> Variant<L, P> {
    Variant { label, payload }
}

impl<L, P> Variant<L, P> {
    pub const fn new(label: L, payload: P) -> Self {
        variant(label, payload)
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn into_parts(self) -> (L, P) {
        (self.label, self.payload)
    }
}

impl<L: Label, P> Variant<L, P> {
    /// The name of this variant's label.
    pub fn name(&self) -> &'static str {
        L::NAME
    }
}

#[cfg(test)]
mod tests {
    use std::string::{String, ToString};

    use super::*;

    crate::label! {
        struct Message;
    }

    #[test]
    fn accessors() {
        let v = variant(Message, "hello".to_string());
        assert_eq!(v.label(), &Message);
        assert_eq!(v.name(), "message");
        assert_eq!(v.payload(), "hello");

        let (label, payload): (Message, String) = v.clone().into_parts();
        assert_eq!(label, Message);
        assert_eq!(payload, "hello");
        assert_eq!(v.into_payload(), "hello");
    }

    #[test]
    fn runtime_labels() {
        let a = variant("number", 1);
        let b = Variant::new("number", 1);
        assert_eq!(a, b);
        assert_ne!(a, variant("string", 1));
    }
}
