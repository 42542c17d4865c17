//! Labels: the discriminants of a union.
//!
//! A label is a zero-sized marker type with a stable name. Declare labels with
//! [`label!`](crate::label!) or `#[derive(Label)]`:
//!
//! ```rust
//! use tvariant::Label;
//!
//! tvariant::label! {
//!     pub struct Nothing;
//!     #[label = "string"]
//!     pub struct Str;
//! }
//!
//! assert_eq!(Nothing::NAME, "nothing");
//! assert_eq!(Str::NAME, "string");
//! ```

use core::{fmt, hash::Hash};

/// A discriminant of a union.
///
/// Two labels are the same label iff they are the same type. [`NAME`] is only
/// used for display and for the runtime label sets of the
/// [`dynamic`](crate::dynamic) matcher.
///
/// [`NAME`]: Label::NAME
pub trait Label: Copy + Eq + Hash + fmt::Debug + 'static {
    /// The name of the label.
    const NAME: &'static str;
}

crate::label! {
    /// The label of the success member of a [`Result`](crate::result::Result).
    pub struct Ok;

    /// The label of the failure member of a [`Result`](crate::result::Result).
    pub struct Err;
}
