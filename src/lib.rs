#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![warn(rust_2024_compatibility)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(test)]
extern crate std;

extern crate self as tvariant;

use core::{
    fmt,
    hash::{Hash, Hasher},
};

mod macros;

#[cfg(feature = "alloc")]
pub mod dynamic;
#[cfg(feature = "alloc")]
mod error;
mod guard;
pub mod index;
pub mod label;
pub mod matcher;
pub mod repr;
pub mod result;
mod variant;

/// Matches a union value arm by arm, like a `match` expression.
///
/// ```rust
/// use tvariant::{match_variant, Sum, Union};
///
/// tvariant::label! { pub struct Nothing; pub struct Number; pub struct Text; }
///
/// type Data = Union![Nothing => (), Number => f64, Text => String];
///
/// fn describe(data: Data) -> String {
///     match_variant!(data {
///         Nothing => "nothing".to_string(),
///         Number(n) if n < 0.0 => format!("negative {}", -n),
///         Number(n) => format!("number {n}"),
///         other => format!("some {}", other.label_name()),
///     })
/// }
///
/// assert_eq!(describe(Sum::of(Number, -2.0)), "negative 2");
/// assert_eq!(describe(Sum::of(Text, "hi".to_string())), "some text");
/// ```
///
/// An unguarded arm with an irrefutable payload pattern handles its label for
/// good, and later arms no longer see it. A catch-all arm (`_` or a lowercase
/// binding) receives the union of the labels that are left. Without one, every
/// label must be handled, or the expansion fails to type-check.
///
/// Arm bodies are plain expressions of the enclosing function, so `return`,
/// `?`, `break` and `continue` behave as they would in a `match`.
pub use tvariant_macros::match_variant;
/// Implements [`trait@Label`] for a unit struct.
///
/// See [`label!`] for the naming rules.
pub use tvariant_macros::Label;

#[cfg(feature = "alloc")]
pub use self::error::Error;
pub use self::{
    guard::isvariant,
    label::Label,
    matcher::{Match, Matcher},
    result::{err, iserr, isok, ok},
    variant::{variant, Variant},
};
use self::{
    index::Index,
    repr::{Cons, Select, SumList},
};

pub type Rem<S, L, U> = <S as Select<L, U>>::Remainder;
pub type PayloadOf<S, L, U> = <S as Select<L, U>>::Payload;

/// A value of the union whose members are the variants in the type list `S`.
///
/// Write the type with [`Union!`] and build values with [`Sum::new`] or
/// [`Sum::of`]. A value holds exactly one member and is never mutated.
pub struct Sum<S: SumList> {
    repr: S::Repr,
}

impl<L: Label, P> From<Variant<L, P>> for Sum![Variant<L, P>] {
    /// Construct a `Sum` of one variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tvariant::{variant, Sum, Variant};
    ///
    /// tvariant::label! { pub struct Answer; }
    ///
    /// let s: Sum![Variant<Answer, i32>] = variant(Answer, 42).into();
    /// assert_eq!(s.into_inner().into_payload(), 42);
    /// ```
    fn from(variant: Variant<L, P>) -> Self {
        Sum::new(variant)
    }
}

impl<L: Label, P> Sum![Variant<L, P>] {
    pub fn into_inner(self) -> Variant<L, P> {
        match self.repr {
            Cons::Here(variant) => variant,
            Cons::There(nil) => match nil {},
        }
    }
}

impl Sum![] {
    pub fn unreachable(self) -> ! {
        match self.repr {}
    }
}

impl<S: SumList> Sum<S> {
    /// Puts `variant` into the union. Labels that are not members of the
    /// union, or payloads of the wrong type, do not compile.
    pub fn new<L, P, U>(variant: Variant<L, P>) -> Self
    where
        L: Label,
        U: Index,
        S: Select<L, U, Payload = P>,
    {
        Sum {
            repr: S::inject(variant),
        }
    }

    /// Shorthand for `Sum::new(variant(label, payload))`.
    pub fn of<L, P, U>(label: L, payload: P) -> Self
    where
        L: Label,
        U: Index,
        S: Select<L, U, Payload = P>,
    {
        Self::new(variant(label, payload))
    }

    /// The position of the held member in the type list.
    pub fn tag(&self) -> u8 {
        S::tag(&self.repr)
    }

    /// The name of the held member's label.
    pub fn label_name(&self) -> &'static str {
        S::name(&self.repr)
    }

    /// Returns `true` iff the held member is labeled `L`.
    pub fn is<L, U>(&self) -> bool
    where
        L: Label,
        U: Index,
        S: Select<L, U>,
    {
        self.tag() == U::TAG
    }

    /// Narrows the union to the member labeled `L`, if it is the one held.
    pub fn get<L, U>(&self) -> Option<&Variant<L, PayloadOf<S, L, U>>>
    where
        L: Label,
        U: Index,
        S: Select<L, U>,
    {
        S::get(&self.repr)
    }

    /// Takes the member labeled `L` out of the union, or gives the union back
    /// unchanged.
    pub fn take<L, U>(self) -> Result<Variant<L, PayloadOf<S, L, U>>, Self>
    where
        L: Label,
        U: Index,
        S: Select<L, U>,
    {
        S::take(self.repr).map_err(|repr| Sum { repr })
    }

    /// Takes the member labeled `L` out of the union, or returns the union of
    /// the remaining members.
    pub fn try_unwrap<L, U>(self) -> Result<Variant<L, PayloadOf<S, L, U>>, Sum<Rem<S, L, U>>>
    where
        L: Label,
        U: Index,
        S: Select<L, U>,
    {
        S::try_unwrap(self.repr).map_err(|repr| Sum { repr })
    }

    /// Starts a handler map for this union. See [`Match`].
    pub fn matcher<R>() -> Match<S, S, R, ()> {
        Match::new()
    }

    /// The label names of the union, in declaration order.
    #[cfg(feature = "alloc")]
    pub fn label_names() -> alloc::vec::Vec<&'static str> {
        let mut names = alloc::vec::Vec::with_capacity(S::LEN.into());
        S::each_name(&mut |name| names.push(name));
        names
    }
}

impl<S: SumList> fmt::Debug for Sum<S>
where
    S::Repr: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr.fmt(f)
    }
}

impl<S: SumList> Clone for Sum<S>
where
    S::Repr: Clone,
{
    fn clone(&self) -> Self {
        Sum {
            repr: self.repr.clone(),
        }
    }
}

impl<S: SumList> Copy for Sum<S> where S::Repr: Copy {}

impl<S: SumList> PartialEq for Sum<S>
where
    S::Repr: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr
    }
}

impl<S: SumList> Eq for Sum<S> where S::Repr: Eq {}

impl<S: SumList> Hash for Sum<S>
where
    S::Repr: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        format,
        string::{String, ToString},
        vec,
    };

    use super::*;
    use crate::index::*;

    crate::label! {
        struct Nothing;
        #[label = "string"]
        struct Str;
        struct Number;
    }

    type Data = Union![Nothing => (), Str => String, Number => f64];

    #[test]
    fn basic() {
        let sum: Data = Sum::of(Str, "Hello World!".to_string());
        assert_eq!(sum.tag(), 1);
        assert_eq!(sum.label_name(), "string");
        assert!(sum.is::<Str, _>());
        assert!(!sum.is::<Number, _>());
        assert_eq!(
            sum.get::<Str, _>().map(Variant::payload),
            Some(&"Hello World!".to_string())
        );
        assert_eq!(sum.get::<_, U2>(), None);

        let sum = sum.take::<Number, _>().unwrap_err();
        assert_eq!(sum.label_name(), "string");

        let rest = sum.try_unwrap::<Nothing, _>().unwrap_err();
        assert_eq!(rest.tag(), 0);
        let v = rest.try_unwrap::<Str, _>().unwrap();
        assert_eq!(v.into_payload(), "Hello World!");
    }

    #[test]
    fn single() {
        let one: Sum![Variant<Number, f64>] = variant(Number, 1.5).into();
        assert_eq!(one.label_name(), "number");
        assert_eq!(one.into_inner().into_payload(), 1.5);
    }

    #[test]
    fn traits() {
        let a = Data::of(Number, 7.0);
        assert_eq!(a.clone(), a);
        assert_ne!(a, Data::of(Number, 8.0));
        assert_ne!(a, Data::of(Nothing, ()));
        assert_eq!(format!("{a:?}"), "Variant { label: Number, payload: 7.0 }");
    }

    #[test]
    fn label_names() {
        assert_eq!(Data::label_names(), vec!["nothing", "string", "number"]);
        assert_eq!(<Sum![]>::label_names(), std::vec::Vec::<&str>::new());
    }

    #[test]
    fn shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Data>();

        let sum = Data::of(Str, "shared".to_string());
        let name = std::thread::scope(|s| s.spawn(|| sum.label_name()).join().unwrap());
        assert_eq!(name, "string");
    }
}
