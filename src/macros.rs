/// Constructs a [`struct@Sum`] type from a list of [`Variant`] types.
///
/// [`Union`] is usually shorter to write.
///
/// # Examples
///
/// ```rust
/// use tvariant::{Sum, Variant};
///
/// tvariant::label! { pub struct Id; pub struct Name; }
///
/// type Key = Sum![Variant<Id, u64>, Variant<Name, String>];
/// let k: Key = Sum::of(Id, 42);
/// ```
///
/// [`Variant`]: crate::Variant
#[macro_export]
macro_rules! Sum {
    [$($t:ty),* $(,)?] => [$crate::Sum::<$crate::T![$($t,)*]>];
}

/// Constructs a [`struct@Sum`] type from `Label => Payload` pairs.
///
/// # Examples
///
/// ```rust
/// use tvariant::{Sum, Union};
///
/// tvariant::label! { pub struct Id; pub struct Name; }
///
/// type Key = Union![Id => u64, Name => String];
/// let k: Key = Sum::of(Name, "root".to_string());
/// assert_eq!(k.label_name(), "name");
/// ```
#[macro_export]
macro_rules! Union {
    [$($label:ty => $payload:ty),* $(,)?] => [
        $crate::Sum::<$crate::T![$($crate::Variant<$label, $payload>,)*]>
    ];
}

/// Constructs a tuple list (heterogeneous list) type from a list of types.
///
/// # Examples
///
/// ```rust
/// use tvariant::T;
///
/// type MyList = T![i32, u32, f64];
/// let list: MyList = (42i32, (42u32, (42.0f64, ())));
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}

/// Declares label marker types.
///
/// Each declared struct derives the usual comparison traits and [`Label`].
/// The label name is the snake-case struct name, unless overridden with
/// `#[label = "..."]`.
///
/// # Examples
///
/// ```rust
/// use tvariant::Label;
///
/// tvariant::label! {
///     /// Nothing was found.
///     pub struct Nothing;
///     #[label = "string"]
///     pub(crate) struct Str;
/// }
///
/// assert_eq!(Str::NAME, "string");
/// ```
///
/// [`Label`]: crate::Label
#[macro_export]
macro_rules! label {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident;)*) => {$(
        #[derive(
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::fmt::Debug,
            ::core::default::Default,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
            ::core::cmp::PartialOrd,
            ::core::cmp::Ord,
            ::core::hash::Hash,
            $crate::Label,
        )]
        $(#[$meta])*
        $vis struct $name;
    )*};
}

/// Builds a [`Matcher`] from a handler map.
///
/// Every label of the union needs a handler, unless the map ends with a
/// `_ => fallback` entry. The fallback receives the whole unmatched value, not
/// just its payload.
///
/// # Examples
///
/// ```rust
/// use tvariant::{matcher, result};
///
/// let to_option = matcher!(result::Result<u8, u8> {
///     tvariant::label::Ok => |v| Some(v),
///     _ => |_| None,
/// });
///
/// assert_eq!(to_option.call(tvariant::ok(5)), Some(5));
/// assert_eq!(to_option.call(tvariant::err(5)), None);
/// ```
///
/// A map that misses a label without a fallback does not compile:
///
/// ```rust,compile_fail
/// use tvariant::{matcher, result};
///
/// let m = matcher!(result::Result<u8, u8> {
///     tvariant::label::Ok => |v| v,
/// });
/// ```
///
/// [`Matcher`]: crate::matcher::Matcher
#[macro_export]
macro_rules! matcher {
    (@on $m:expr;) => {
        $m.build()
    };
    (@on $m:expr; _ => $fallback:expr $(,)?) => {
        $m.otherwise($fallback)
    };
    (@on $m:expr; $label:path => $handler:expr $(, $($rest:tt)*)?) => {
        $crate::matcher!(@on $m.on($label, $handler); $($($rest)*)?)
    };
    ($union:ty { $($map:tt)* }) => {
        $crate::matcher!(@on <$union>::matcher(); $($map)*)
    };
}
