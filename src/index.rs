//! Type-level indices locating a member inside the type list of a [`Sum`].
//!
//! Indices are almost always inferred. They only show up in signatures so that
//! the compiler can tell which member a label refers to.
//!
//! [`Sum`]: crate::Sum
#![allow(missing_docs)]

use core::marker::PhantomData;

/// The index of the first member of a type list.
pub struct UTerm;

/// The index right after `U`.
pub struct UInt<U>(PhantomData<U>);

pub trait Index {
    /// The runtime tag of the member this index points at.
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = 1 + U::TAG;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
