//! Handler maps over labels only known at runtime.
//!
//! The typed [`Matcher`](crate::Matcher) proves exhaustiveness at compile
//! time. When labels come from outside the program (a config file, a message
//! header), the union is a declared set of label values instead, and the
//! handler map is checked against it when it is built, before the first
//! dispatch.
//!
//! ```rust
//! use tvariant::{dynamic::DynMatch, variant, Error};
//!
//! let m = DynMatch::new(["circle", "square"])
//!     .on("circle", |r: f64| 3.0 * r * r)
//!     .on("square", |a: f64| a * a)
//!     .build()?;
//!
//! assert_eq!(m.call(variant("square", 2.0)), 4.0);
//! assert_eq!(
//!     m.try_call(variant("hexagon", 1.0)),
//!     Err(Error::Undeclared { label: "hexagon".to_string() })
//! );
//!
//! let incomplete = DynMatch::new(["circle", "square"])
//!     .on("circle", |r: f64| 3.0 * r * r)
//!     .build();
//! assert_eq!(
//!     incomplete.err(),
//!     Some(Error::Missing { labels: vec!["square".to_string()] })
//! );
//! # Ok::<(), Error>(())
//! ```

use alloc::{
    boxed::Box,
    collections::{btree_map::Entry, BTreeMap},
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{error::Error, variant::Variant};

type Handler<'a, P, R> = Box<dyn Fn(P) -> R + 'a>;
type FallbackHandler<'a, K, P, R> = Box<dyn Fn(Variant<K, P>) -> R + 'a>;

/// A runtime handler map under construction.
pub struct DynMatch<'a, K, P, R> {
    declared: Vec<K>,
    handlers: BTreeMap<K, Handler<'a, P, R>>,
    fallback: Option<FallbackHandler<'a, K, P, R>>,
    duplicate: Option<String>,
}

impl<'a, K, P, R> DynMatch<'a, K, P, R>
where
    K: Ord + fmt::Display,
{
    /// Starts a handler map over the declared label set `labels`. Repeated
    /// labels are declared once, at their first position.
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut declared: Vec<K> = Vec::new();
        for label in labels {
            if !declared.contains(&label) {
                declared.push(label);
            }
        }
        DynMatch {
            declared,
            handlers: BTreeMap::new(),
            fallback: None,
            duplicate: None,
        }
    }

    /// Adds the handler of `label`. It receives the payload only.
    pub fn on<F>(mut self, label: K, handler: F) -> Self
    where
        F: Fn(P) -> R + 'a,
    {
        match self.handlers.entry(label) {
            Entry::Vacant(entry) => {
                entry.insert(Box::new(handler));
            }
            Entry::Occupied(entry) => {
                self.duplicate.get_or_insert_with(|| entry.key().to_string());
            }
        }
        self
    }

    /// Sets the fallback for every label without a handler. It receives the
    /// entire unmatched variant.
    pub fn otherwise<F>(mut self, fallback: F) -> Self
    where
        F: Fn(Variant<K, P>) -> R + 'a,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Checks the handler map against the declared labels.
    pub fn build(self) -> Result<DynMatcher<'a, K, P, R>, Error> {
        if let Some(label) = self.duplicate {
            return Err(Error::Duplicate { label });
        }
        if let Some(label) = self
            .handlers
            .keys()
            .find(|label| !self.declared.contains(*label))
        {
            return Err(Error::Undeclared {
                label: label.to_string(),
            });
        }
        if self.fallback.is_none() {
            let missing: Vec<String> = self
                .declared
                .iter()
                .filter(|label| !self.handlers.contains_key(*label))
                .map(ToString::to_string)
                .collect();
            if !missing.is_empty() {
                tracing::debug!(?missing, "rejecting a non-exhaustive handler map");
                return Err(Error::Missing { labels: missing });
            }
        }

        Ok(DynMatcher {
            declared: self.declared,
            handlers: self.handlers,
            fallback: self.fallback,
        })
    }
}

/// A validated runtime handler map, ready to dispatch any number of variants.
pub struct DynMatcher<'a, K, P, R> {
    declared: Vec<K>,
    handlers: BTreeMap<K, Handler<'a, P, R>>,
    fallback: Option<FallbackHandler<'a, K, P, R>>,
}

impl<K, P, R> DynMatcher<'_, K, P, R>
where
    K: Ord + fmt::Display,
{
    /// The declared labels, in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &K> {
        self.declared.iter()
    }

    /// Dispatches `value` to the handler of its label, or to the fallback.
    ///
    /// A label outside the declared set is an error even if there is a
    /// fallback.
    pub fn try_call(&self, value: Variant<K, P>) -> Result<R, Error> {
        if !self.declared.contains(value.label()) {
            tracing::error!(label = %value.label(), "dispatch on an undeclared label");
            return Err(Error::Undeclared {
                label: value.label().to_string(),
            });
        }
        if let Some(handler) = self.handlers.get(value.label()) {
            return Ok(handler(value.into_payload()));
        }
        match &self.fallback {
            Some(fallback) => Ok(fallback(value)),
            None => Err(Error::Missing {
                labels: alloc::vec![value.label().to_string()],
            }),
        }
    }

    /// Like [`try_call`](Self::try_call), but a label outside the declared set
    /// panics.
    pub fn call(&self, value: Variant<K, P>) -> R {
        match self.try_call(value) {
            Ok(ret) => ret,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K: fmt::Debug, P, R> fmt::Debug for DynMatcher<'_, K, P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMatcher")
            .field("declared", &self.declared)
            .field("handled", &self.handlers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, format, vec};

    use super::*;
    use crate::{variant, Label, Union};

    crate::label! {
        struct Nothing;
        #[label = "string"]
        struct Str;
        struct Number;
    }

    type Data = Union![Nothing => (), Str => String, Number => f64];

    fn shapes<'a>() -> DynMatch<'a, &'static str, f64, f64> {
        DynMatch::new(["circle", "square", "triangle"])
    }

    #[test]
    fn exhaustive() {
        let m = shapes()
            .on("circle", |r| 3.0 * r * r)
            .on("square", |a| a * a)
            .on("triangle", |a| a * a / 2.0)
            .build()
            .unwrap();

        assert_eq!(m.call(variant("circle", 1.0)), 3.0);
        assert_eq!(m.call(variant("square", 3.0)), 9.0);
        assert_eq!(m.try_call(variant("triangle", 2.0)), Ok(2.0));
        assert_eq!(
            m.labels().copied().collect::<Vec<_>>(),
            ["circle", "square", "triangle"]
        );
    }

    #[test]
    fn missing_labels_are_named() {
        let err = shapes().on("circle", |r| r).build().unwrap_err();
        assert_eq!(
            err,
            Error::Missing {
                labels: vec!["square".to_string(), "triangle".to_string()]
            }
        );
        assert_eq!(err.to_string(), "no handler for label(s) square, triangle");
    }

    #[test]
    fn declaration_order_is_kept() {
        let err = DynMatch::<&str, f64, f64>::new(["square", "circle", "square"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::Missing {
                labels: vec!["square".to_string(), "circle".to_string()]
            }
        );

        let m = DynMatch::new(["triangle", "circle", "square"])
            .on("circle", |r: f64| r)
            .otherwise(|_| 0.0)
            .build()
            .unwrap();
        assert_eq!(
            m.labels().copied().collect::<Vec<_>>(),
            ["triangle", "circle", "square"]
        );
    }

    #[test]
    fn undeclared_and_duplicate_handlers() {
        let err = shapes().on("hexagon", |r| r).build().unwrap_err();
        assert_eq!(
            err,
            Error::Undeclared {
                label: "hexagon".to_string()
            }
        );

        let err = shapes()
            .on("circle", |r| r)
            .on("circle", |r| r * 2.0)
            .otherwise(|_| 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "label `circle` has more than one handler");
    }

    #[test]
    fn fallback_receives_the_whole_variant() {
        let seen = RefCell::new(Vec::new());
        let m = shapes()
            .on("circle", |r| r)
            .otherwise(|v| {
                seen.borrow_mut().push(format!("{}={}", v.label(), v.payload()));
                -1.0
            })
            .build()
            .unwrap();

        assert_eq!(m.call(variant("square", 2.0)), -1.0);
        assert_eq!(m.call(variant("circle", 2.0)), 2.0);
        assert_eq!(*seen.borrow(), ["square=2"]);
    }

    #[test]
    fn undeclared_labels_are_faults() {
        let m = shapes().on("circle", |r| r).otherwise(|_| 0.0).build().unwrap();
        assert_eq!(
            m.try_call(variant("hexagon", 1.0)),
            Err(Error::Undeclared {
                label: "hexagon".to_string()
            })
        );
    }

    #[test]
    #[should_panic(expected = "label `hexagon` is not declared by this union")]
    fn call_panics_on_undeclared_labels() {
        let m = shapes().otherwise(|_| 0.0).build().unwrap();
        m.call(variant("hexagon", 1.0));
    }

    #[test]
    fn typed_union_labels() {
        let m = DynMatch::new(Data::label_names())
            .on(Nothing::NAME, |_: String| "none".to_string())
            .on(Str::NAME, |s: String| s)
            .on(Number::NAME, |n: String| format!("#{n}"))
            .build()
            .unwrap();
        assert_eq!(
            m.labels().copied().collect::<Vec<_>>(),
            ["nothing", "string", "number"]
        );

        let value = Data::of(Number, 4.0);
        let payload = value.get::<Number, _>().map(|v| v.payload().to_string());
        let dispatched = m.call(variant(value.label_name(), payload.unwrap_or_default()));
        assert_eq!(dispatched, "#4");
    }
}
