use crate::{
    index::Index,
    label::Label,
    repr::{Select, SumList},
    Sum,
};

/// Builds a predicate that tests whether a union value holds the member
/// labeled `label`.
///
/// Labels that are not members of the union do not compile. After a positive
/// test, [`Sum::get`] narrows the value to the typed [`Variant`].
///
/// # Examples
///
/// ```rust
/// use tvariant::{isvariant, Sum, Union};
///
/// tvariant::label! { pub struct A; pub struct B; pub struct C; }
///
/// type X = Union![A => u8, B => f64, C => u8];
///
/// let is_a = isvariant(A);
/// assert!(is_a(&X::of(A, 5)));
/// assert!(!is_a(&X::of(C, 5)));
/// ```
///
/// ```rust,compile_fail
/// use tvariant::{isvariant, Union};
///
/// tvariant::label! { pub struct A; pub struct B; pub struct Z; }
///
/// type X = Union![A => u8, B => f64];
///
/// let is_z = isvariant(Z);
/// is_z(&X::of(A, 5));
/// ```
///
/// [`Variant`]: crate::Variant
pub fn isvariant<S, L, U>(_label: L) -> impl Fn(&Sum<S>) -> bool + Copy
where
    S: SumList + Select<L, U>,
    L: Label,
    U: Index,
{
    |value: &Sum<S>| value.is::<L, U>()
}
