//! Handler maps and the reusable [`Matcher`] they build into.
//!
//! A handler map is assembled one label at a time, starting from
//! [`Sum::matcher`] (or [`Match::new`], or the [`matcher!`] macro). The map
//! tracks, in its type, which labels are still unhandled:
//!
//! - [`Match::build`] only exists once every label has a handler;
//! - [`Match::otherwise`] finishes a partial map with a fallback, which
//!   receives the entire unmatched value (label and payload), not just the
//!   payload.
//!
//! Handling a label twice, or handling a label that is not a member of the
//! union, does not compile.
//!
//! ```rust
//! use tvariant::{Sum, Union};
//!
//! tvariant::label! {
//!     pub struct Nothing;
//!     #[label = "string"]
//!     pub struct Str;
//!     pub struct Number;
//! }
//!
//! type Data = Union![Nothing => (), Str => String, Number => f64];
//!
//! let describe = Data::matcher()
//!     .on(Nothing, |()| "Nothing found".to_string())
//!     .on(Str, |v| format!("Found string: {v}"))
//!     .on(Number, |v| format!("Found number: {v}"))
//!     .build();
//!
//! assert_eq!(describe.call(Sum::of(Number, 7.0)), "Found number: 7");
//!
//! let kind = Data::matcher()
//!     .on(Str, |_| "text")
//!     .otherwise(|other: Data| other.label_name());
//!
//! assert_eq!(kind.call(Sum::of(Nothing, ())), "nothing");
//! ```
//!
//! ```rust,compile_fail
//! # use tvariant::Union;
//! # tvariant::label! { pub struct A; pub struct B; }
//! type AB = Union![A => (), B => ()];
//!
//! // `B` has no handler and there is no fallback.
//! let m = AB::matcher().on(A, |()| 0).build();
//! ```
//!
//! [`matcher!`]: crate::matcher!

use core::marker::PhantomData;

use crate::{
    index::Index,
    label::Label,
    repr::{Select, SumList},
    PayloadOf, Rem, Sum,
};

/// The handler of one label in a handler map.
pub struct On<L, U, F> {
    handler: F,
    _label: PhantomData<fn() -> (L, U)>,
}

impl<L, U, F: Clone> Clone for On<L, U, F> {
    fn clone(&self) -> Self {
        On {
            handler: self.handler.clone(),
            _label: PhantomData,
        }
    }
}

/// A handler map under construction.
///
/// `S` is the union's type list, `Pending` the labels that have no handler
/// yet, `R` the common result type and `H` the handlers added so far.
pub struct Match<S, Pending, R, H> {
    handlers: H,
    _marker: PhantomData<fn(S, Pending) -> R>,
}

impl<S: SumList, R> Match<S, S, R, ()> {
    pub fn new() -> Self {
        Match {
            handlers: (),
            _marker: PhantomData,
        }
    }
}

impl<S: SumList, R> Default for Match<S, S, R, ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SumList, Pending: SumList, R, H> Match<S, Pending, R, H> {
    /// Adds the handler of `label`. It receives the payload only.
    pub fn on<L, U, V, F>(
        self,
        _label: L,
        handler: F,
    ) -> Match<S, Rem<Pending, L, V>, R, (On<L, U, F>, H)>
    where
        L: Label,
        U: Index,
        V: Index,
        S: Select<L, U>,
        Pending: Select<L, V>,
        F: Fn(PayloadOf<S, L, U>) -> R,
    {
        let on = On {
            handler,
            _label: PhantomData,
        };
        Match {
            handlers: (on, self.handlers),
            _marker: PhantomData,
        }
    }

    /// Finishes the map with a fallback for every label without a handler.
    ///
    /// The fallback receives the whole value, so it can still look at the
    /// label.
    pub fn otherwise<F>(self, fallback: F) -> Matcher<S, R, H, Otherwise<F>>
    where
        H: Dispatch<S, R>,
        F: Fn(Sum<S>) -> R,
    {
        Matcher {
            handlers: self.handlers,
            fallback: Otherwise(fallback),
            _marker: PhantomData,
        }
    }
}

impl<S: SumList, R, H> Match<S, (), R, H> {
    /// Finishes a map that has a handler for every label.
    pub fn build(self) -> Matcher<S, R, H, Unmatched>
    where
        H: Dispatch<S, R>,
    {
        Matcher {
            handlers: self.handlers,
            fallback: Unmatched,
            _marker: PhantomData,
        }
    }
}

/// The trait that handler lists implement to dispatch a union value to the
/// handler of its label.
pub trait Dispatch<S: SumList, R> {
    /// Runs the handler of `value`'s label, or gives `value` back if there is
    /// none.
    fn dispatch(&self, value: Sum<S>) -> Result<R, Sum<S>>;
}

impl<S: SumList, R> Dispatch<S, R> for () {
    fn dispatch(&self, value: Sum<S>) -> Result<R, Sum<S>> {
        Err(value)
    }
}

impl<S, R, L, U, F, H> Dispatch<S, R> for (On<L, U, F>, H)
where
    L: Label,
    U: Index,
    S: Select<L, U>,
    F: Fn(PayloadOf<S, L, U>) -> R,
    H: Dispatch<S, R>,
{
    fn dispatch(&self, value: Sum<S>) -> Result<R, Sum<S>> {
        match value.take::<L, U>() {
            Ok(variant) => Ok((self.0.handler)(variant.into_payload())),
            Err(value) => self.1.dispatch(value),
        }
    }
}

/// What a [`Matcher`] does with a value none of its handlers accepts.
pub trait Fallback<S: SumList, R> {
    fn fallback(&self, value: Sum<S>) -> R;
}

/// The fallback of an exhaustive matcher.
///
/// The typed API never reaches it: every label has a handler. If it is reached
/// anyway, it panics with the label's name rather than produce a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unmatched;

impl<S: SumList, R> Fallback<S, R> for Unmatched {
    fn fallback(&self, value: Sum<S>) -> R {
        let label = value.label_name();
        tracing::error!(label, "no handler for the dispatched variant");
        panic!("no handler for label `{label}`")
    }
}

/// A fallback handler. It receives the entire unmatched value.
#[derive(Clone, Copy, Debug)]
pub struct Otherwise<F>(F);

impl<S: SumList, R, F> Fallback<S, R> for Otherwise<F>
where
    F: Fn(Sum<S>) -> R,
{
    fn fallback(&self, value: Sum<S>) -> R {
        (self.0)(value)
    }
}

/// A bound handler map, ready to dispatch any number of values.
///
/// Each call runs exactly one handler and returns its result unchanged. A
/// handler may return a future; the matcher does not poll it.
pub struct Matcher<S, R, H, D> {
    handlers: H,
    fallback: D,
    _marker: PhantomData<fn(S) -> R>,
}

impl<S, R, H: Clone, D: Clone> Clone for Matcher<S, R, H, D> {
    fn clone(&self) -> Self {
        Matcher {
            handlers: self.handlers.clone(),
            fallback: self.fallback.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, R, H, D> Matcher<S, R, H, D>
where
    S: SumList,
    H: Dispatch<S, R>,
    D: Fallback<S, R>,
{
    /// Runs the handler of `value`'s label, or the fallback.
    pub fn call(&self, value: Sum<S>) -> R {
        match self.handlers.dispatch(value) {
            Ok(ret) => ret,
            Err(value) => self.fallback.fallback(value),
        }
    }

    /// Borrows the matcher as a plain function, e.g. for `Iterator::map`.
    pub fn as_fn(&self) -> impl Fn(Sum<S>) -> R + '_ {
        move |value| self.call(value)
    }

    pub fn into_fn(self) -> impl Fn(Sum<S>) -> R {
        move |value| self.call(value)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        format,
        string::{String, ToString},
        vec,
        vec::Vec,
    };

    use super::*;
    use crate::{err, ok, result, Union};

    crate::label! {
        struct Nothing;
        #[label = "string"]
        struct Str;
        struct Number;
        struct All;
    }

    type PartialData = Union![Nothing => (), Str => String, Number => f64, All => Vec<String>];

    fn describe() -> impl Fn(PartialData) -> String {
        PartialData::matcher()
            .on(Nothing, |()| "Nothing found".to_string())
            .on(Str, |v| format!("Found string: {v}"))
            .on(Number, |v| format!("Found number: {v}"))
            .on(All, |v: Vec<String>| format!("Found all: {}", v.join(", ")))
            .build()
            .into_fn()
    }

    #[test]
    fn exhaustive() {
        let describe = describe();
        assert_eq!(describe(Sum::of(Nothing, ())), "Nothing found");
        assert_eq!(describe(Sum::of(Str, "abc".to_string())), "Found string: abc");
        assert_eq!(describe(Sum::of(Number, 7.0)), "Found number: 7");
        assert_eq!(
            describe(Sum::of(All, vec!["x".to_string(), "y".to_string()])),
            "Found all: x, y"
        );
    }

    #[test]
    fn only_the_matching_handler_runs() {
        let calls = [Cell::new(0), Cell::new(0), Cell::new(0)];
        type Abc = Union![Nothing => (), Str => &'static str, Number => f64];

        let m = Abc::matcher()
            .on(Number, |v: f64| {
                calls[2].set(calls[2].get() + 1);
                v as i64
            })
            .on(Nothing, |()| {
                calls[0].set(calls[0].get() + 1);
                -1
            })
            .on(Str, |v: &'static str| {
                calls[1].set(calls[1].get() + 1);
                v.len() as i64
            })
            .build();

        assert_eq!(m.call(Sum::of(Str, "four")), 4);
        assert_eq!(calls.iter().map(Cell::get).collect::<Vec<_>>(), [0, 1, 0]);
        assert_eq!(m.call(Sum::of(Number, 9.0)), 9);
        assert_eq!(m.call(Sum::of(Nothing, ())), -1);
        assert_eq!(calls.iter().map(Cell::get).collect::<Vec<_>>(), [1, 1, 1]);
    }

    #[test]
    fn fallback_receives_the_whole_value() {
        let m = PartialData::matcher()
            .on(Nothing, |()| String::new())
            .otherwise(|other: PartialData| {
                let number = other.get::<Number, _>().map(|v| *v.payload());
                format!("{}:{:?}", other.label_name(), number)
            });

        assert_eq!(m.call(Sum::of(Number, 2.5)), "number:Some(2.5)");
        assert_eq!(m.call(Sum::of(Str, "s".to_string())), "string:None");
        assert_eq!(m.call(Sum::of(Nothing, ())), "");
    }

    #[test]
    fn fallback_with_every_label_handled() {
        let m = result::Result::<u8, u8>::matcher()
            .on(crate::label::Ok, |v| v)
            .on(crate::label::Err, |v: u8| v + 100)
            .otherwise(|_| unreachable!());

        assert_eq!(m.call(ok(1)), 1);
        assert_eq!(m.call(err(1)), 101);
    }

    #[test]
    fn partial_result() {
        let m = result::Result::<i32, i32>::matcher()
            .on(crate::label::Ok, Some)
            .otherwise(|_| None);

        assert_eq!(m.call(ok(5)), Some(5));
        assert_eq!(m.call(err(5)), None);
    }

    #[test]
    fn matcher_macro_exhaustive() {
        let describe = crate::matcher!(PartialData {
            Nothing => |()| "Nothing found".to_string(),
            Str => |v| format!("Found string: {v}"),
            Number => |v| format!("Found number: {v}"),
            All => |v: Vec<String>| format!("Found all: {}", v.join(", ")),
        });

        assert_eq!(describe.call(Sum::of(Nothing, ())), "Nothing found");
        assert_eq!(describe.call(Sum::of(Number, 7.0)), "Found number: 7");
        assert_eq!(
            describe.call(Sum::of(All, vec!["x".to_string(), "y".to_string()])),
            "Found all: x, y"
        );
    }

    #[test]
    fn matcher_macro_with_fallback() {
        let to_option = crate::matcher!(result::Result<u8, u8> {
            crate::label::Ok => |v| Some(v),
            _ => |_| None,
        });
        assert_eq!(to_option.call(ok(5)), Some(5));
        assert_eq!(to_option.call(err(5)), None);

        let kind = crate::matcher!(PartialData {
            Str => |v: String| v,
            _ => |other: PartialData| {
                let number = other.get::<Number, _>().map(|v| *v.payload());
                format!("{}:{:?}", other.label_name(), number)
            }
        });
        assert_eq!(kind.call(Sum::of(Str, "s".to_string())), "s");
        assert_eq!(kind.call(Sum::of(Number, 2.5)), "number:Some(2.5)");
        assert_eq!(kind.call(Sum::of(Nothing, ())), "nothing:None");
    }

    #[test]
    fn reusable_and_idempotent() {
        let describe = describe();
        let value = PartialData::of(All, vec!["a".to_string()]);

        let first = describe(value.clone());
        let second = describe(value);
        assert_eq!(first, second);
        assert_eq!(describe(Sum::of(Number, 1.0)), "Found number: 1");
        assert_eq!(first, "Found all: a");
    }

    #[test]
    fn as_transformation() {
        let m = PartialData::matcher()
            .on(Str, |v: String| v.len())
            .otherwise(|_| 0);

        let values = vec![
            PartialData::of(Str, "abc".to_string()),
            PartialData::of(Nothing, ()),
            PartialData::of(Str, "de".to_string()),
        ];
        let lengths: Vec<usize> = values.into_iter().map(m.as_fn()).collect();
        assert_eq!(lengths, [3, 0, 2]);
    }

    #[test]
    #[should_panic(expected = "no handler for label `number`")]
    fn unmatched_panics_with_the_label() {
        Fallback::<_, ()>::fallback(&Unmatched, PartialData::of(Number, 0.0));
    }

    #[test]
    fn handler_panics_propagate() {
        let m = PartialData::matcher()
            .on(Number, |v: f64| -> f64 {
                if v < 0.0 {
                    panic!("negative");
                }
                v.sqrt()
            })
            .otherwise(|_| 0.0);

        assert_eq!(m.call(Sum::of(Number, 4.0)), 2.0);
        let result = std::panic::catch_unwind(|| m.call(Sum::of(Number, -1.0)));
        assert!(result.is_err());
    }
}
