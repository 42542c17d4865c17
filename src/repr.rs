//! The module dealing with the underlying representation of the [`Sum`] type.
//!
//! # Implementation details
//!
//! A union is described by a type list of [`Variant`]s, and stored as a chain
//! of nested enums that mirrors that list:
//!
//! ```rust,no_run
//! # use tvariant::repr::{Cons, Nil};
//! # use tvariant::Variant;
//! # tvariant::label! { struct A; struct B; }
//! // The storage of `Union![A => i32, B => String]`.
//! type Storage = Cons<Variant<A, i32>, Cons<Variant<B, String>, Nil>>;
//! ```
//!
//! The position of the active member in that chain is its tag. Every
//! label-directed operation is implemented by walking the chain with a
//! type-level [`Index`] that the compiler infers from the label.
//!
//! [`Sum`]: crate::Sum

use core::fmt;

use crate::{
    index::{Index, UInt, UTerm},
    label::Label,
    variant::Variant,
};

/// The terminator of the underlying storage of the [`Sum`] type. It has no
/// values, which makes `Sum<()>` uninhabited.
///
/// [`Sum`]: crate::Sum
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nil {}

/// One link of the underlying storage of the [`Sum`] type: either the member
/// at this position, or one of the members after it.
///
/// [`Sum`]: crate::Sum
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cons<H, T> {
    Here(H),
    There(T),
}

impl fmt::Debug for Nil {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl<H: fmt::Debug, T: fmt::Debug> fmt::Debug for Cons<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cons::Here(head) => head.fmt(f),
            Cons::There(tail) => tail.fmt(f),
        }
    }
}

/// The trait that type lists of variants implement to support their
/// corresponding storage in the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub trait SumList {
    /// The underlying storage of the `Sum` type.
    type Repr;

    /// The number of members in the list.
    const LEN: u8;

    #[doc(hidden)]
    fn tag(repr: &Self::Repr) -> u8;

    #[doc(hidden)]
    fn name(repr: &Self::Repr) -> &'static str;

    /// Calls `f` with the label name of every member, in list order.
    fn each_name(f: &mut dyn FnMut(&'static str));
}

impl SumList for () {
    type Repr = Nil;

    const LEN: u8 = 0;

    fn tag(repr: &Nil) -> u8 {
        match *repr {}
    }

    fn name(repr: &Nil) -> &'static str {
        match *repr {}
    }

    fn each_name(_: &mut dyn FnMut(&'static str)) {}
}

impl<L: Label, P, Tail: SumList> SumList for (Variant<L, P>, Tail) {
    type Repr = Cons<Variant<L, P>, Tail::Repr>;

    const LEN: u8 = 1 + Tail::LEN;

    fn tag(repr: &Self::Repr) -> u8 {
        match repr {
            Cons::Here(_) => 0,
            Cons::There(tail) => 1 + Tail::tag(tail),
        }
    }

    fn name(repr: &Self::Repr) -> &'static str {
        match repr {
            Cons::Here(_) => L::NAME,
            Cons::There(tail) => Tail::name(tail),
        }
    }

    fn each_name(f: &mut dyn FnMut(&'static str)) {
        f(L::NAME);
        Tail::each_name(f)
    }
}

/// The trait that type lists implement to support manipulating the member
/// labeled `L`, found at index `U`.
///
/// A label that is not in the list has no implementation, so every operation
/// bounded by `Select` rejects it at compile time.
pub trait Select<L: Label, U: Index>: SumList {
    /// The payload type bound to `L` in this list.
    type Payload;

    /// The type list left over after removing the member labeled `L`.
    type Remainder: SumList;

    #[doc(hidden)]
    fn inject(variant: Variant<L, Self::Payload>) -> Self::Repr;

    #[doc(hidden)]
    fn get(repr: &Self::Repr) -> Option<&Variant<L, Self::Payload>>;

    #[doc(hidden)]
    fn take(repr: Self::Repr) -> Result<Variant<L, Self::Payload>, Self::Repr>;

    #[doc(hidden)]
    fn try_unwrap(
        repr: Self::Repr,
    ) -> Result<Variant<L, Self::Payload>, <Self::Remainder as SumList>::Repr>;

    #[doc(hidden)]
    fn from_remainder(repr: <Self::Remainder as SumList>::Repr) -> Self::Repr;
}

impl<L: Label, P, Tail: SumList> Select<L, UTerm> for (Variant<L, P>, Tail) {
    type Payload = P;
    type Remainder = Tail;

    fn inject(variant: Variant<L, P>) -> Self::Repr {
        Cons::Here(variant)
    }

    fn get(repr: &Self::Repr) -> Option<&Variant<L, P>> {
        match repr {
            Cons::Here(variant) => Some(variant),
            Cons::There(_) => None,
        }
    }

    fn take(repr: Self::Repr) -> Result<Variant<L, P>, Self::Repr> {
        match repr {
            Cons::Here(variant) => Ok(variant),
            other => Err(other),
        }
    }

    fn try_unwrap(repr: Self::Repr) -> Result<Variant<L, P>, Tail::Repr> {
        match repr {
            Cons::Here(variant) => Ok(variant),
            Cons::There(tail) => Err(tail),
        }
    }

    fn from_remainder(repr: Tail::Repr) -> Self::Repr {
        Cons::There(repr)
    }
}

impl<L, L2, P2, Tail, U> Select<L, UInt<U>> for (Variant<L2, P2>, Tail)
where
    L: Label,
    L2: Label,
    U: Index,
    Tail: Select<L, U>,
{
    type Payload = Tail::Payload;
    type Remainder = (Variant<L2, P2>, Tail::Remainder);

    fn inject(variant: Variant<L, Self::Payload>) -> Self::Repr {
        Cons::There(Tail::inject(variant))
    }

    fn get(repr: &Self::Repr) -> Option<&Variant<L, Self::Payload>> {
        match repr {
            Cons::Here(_) => None,
            Cons::There(tail) => Tail::get(tail),
        }
    }

    fn take(repr: Self::Repr) -> Result<Variant<L, Self::Payload>, Self::Repr> {
        match repr {
            Cons::Here(head) => Err(Cons::Here(head)),
            Cons::There(tail) => Tail::take(tail).map_err(Cons::There),
        }
    }

    fn try_unwrap(
        repr: Self::Repr,
    ) -> Result<Variant<L, Self::Payload>, <Self::Remainder as SumList>::Repr> {
        match repr {
            Cons::Here(head) => Err(Cons::Here(head)),
            Cons::There(tail) => Tail::try_unwrap(tail).map_err(Cons::There),
        }
    }

    fn from_remainder(repr: <Self::Remainder as SumList>::Repr) -> Self::Repr {
        match repr {
            Cons::Here(head) => Cons::Here(head),
            Cons::There(tail) => Cons::There(Tail::from_remainder(tail)),
        }
    }
}
