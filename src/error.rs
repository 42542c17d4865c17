use alloc::{string::String, vec::Vec};

/// Errors of the [`dynamic`](crate::dynamic) matcher.
///
/// The typed API has no runtime errors: the same mistakes are compile errors
/// there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Some declared labels have no handler, and there is no fallback.
    #[error("no handler for label(s) {}", .labels.join(", "))]
    Missing { labels: Vec<String> },

    /// A label outside the declared label set.
    #[error("label `{label}` is not declared by this union")]
    Undeclared { label: String },

    /// A label was given two handlers.
    #[error("label `{label}` has more than one handler")]
    Duplicate { label: String },
}
