//! A two-member union for success-or-failure values.
//!
//! [`Result<T, E>`] is `Union![label::Ok => T, label::Err => E]`: an ordinary
//! union, so everything in this crate works on it, including [`Sum::matcher`]
//! and [`isvariant`](crate::isvariant).
//!
//! ```rust
//! use tvariant::{iserr, result::Result};
//!
//! fn parse(input: &str) -> Result<f64, std::num::ParseFloatError> {
//!     input.parse::<f64>().into()
//! }
//!
//! assert!(iserr(&parse("seven")));
//!
//! let parsed = parse("7");
//! assert_eq!(parsed.as_ok(), Some(&7.0));
//! assert_eq!(parsed.into_std(), Ok(7.0));
//! ```

use crate::{label, variant::variant, Sum, Variant};

/// The type list of [`Result<T, E>`].
pub type Members<T, E> = crate::T![Variant<label::Ok, T>, Variant<label::Err, E>];

/// Either `ok` with a `T`, or `err` with an `E`.
pub type Result<T, E> = Sum<Members<T, E>>;

/// Wraps a success value.
pub fn ok<T, E>(value: T) -> Result<T, E> {
    Sum::new(variant(label::Ok, value))
}

/// Wraps a failure value.
pub fn err<T, E>(value: E) -> Result<T, E> {
    Sum::new(variant(label::Err, value))
}

/// Returns `true` iff `value` is `ok`, whatever its payload.
pub fn isok<T, E>(value: &Result<T, E>) -> bool {
    value.is::<label::Ok, _>()
}

/// Returns `true` iff `value` is `err`, whatever its payload.
pub fn iserr<T, E>(value: &Result<T, E>) -> bool {
    value.is::<label::Err, _>()
}

impl<T, E> Sum<Members<T, E>> {
    /// Narrows to the success value.
    pub fn as_ok(&self) -> Option<&T> {
        self.get::<label::Ok, _>().map(Variant::payload)
    }

    /// Narrows to the failure value.
    pub fn as_err(&self) -> Option<&E> {
        self.get::<label::Err, _>().map(Variant::payload)
    }

    pub fn into_std(self) -> core::result::Result<T, E> {
        match self.try_unwrap::<label::Ok, _>() {
            Ok(value) => Ok(value.into_payload()),
            Err(rest) => Err(rest.into_inner().into_payload()),
        }
    }
}

impl<T, E> From<core::result::Result<T, E>> for Result<T, E> {
    fn from(value: core::result::Result<T, E>) -> Self {
        match value {
            Ok(value) => ok(value),
            Err(error) => err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for core::result::Result<T, E> {
    fn from(value: Result<T, E>) -> Self {
        value.into_std()
    }
}
