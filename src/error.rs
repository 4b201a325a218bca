//! Crate-wide error kinds.
//!
//! Every fallible operation in this crate returns [`error_stack::Result`]
//! wrapping an [`Error`] variant. A failure's kind is never lost or
//! converted into another kind, and nothing is retried or swallowed
//! internally.

use core::fmt::{self, Display, Formatter};

/// A crate-wide error kind.
///
/// This is used as the [`error_stack::Context`] for every
/// [`error_stack::Report`] produced by this crate.
#[derive(Debug)]
pub enum Error {
    /// The caller supplied a value that is structurally invalid: a voxel
    /// buffer whose length does not match the declared dimension sizes, an
    /// out-of-range dimension index, or a duplicate heap insert.
    InvalidArgument(String),
    /// An operation's precondition was violated: `IncreasePriority` with a
    /// non-improving key or an unknown element, `Read` on an absent
    /// annotation, or `Remove`/`First` on an empty heap.
    PreconditionViolation(String),
    /// An output file could not be created or written.
    Io(String),
    /// A defensive, implementer-only check failed (e.g. an axis index out
    /// of range in an `Annotation` accessor). Should never be observed in
    /// practice; a bug if it is.
    Logic(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::PreconditionViolation(msg) => write!(f, "precondition violation: {msg}"),
            Self::Io(msg) => write!(f, "io failure: {msg}"),
            Self::Logic(msg) => write!(f, "logic error: {msg}"),
        }
    }
}

impl error_stack::Context for Error {}

/// Convenience alias for this crate's fallible return type.
pub type Result<T> = error_stack::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_displays_without_panicking() {
        let variants = [
            Error::InvalidArgument("bad arg".to_string()),
            Error::PreconditionViolation("bad precondition".to_string()),
            Error::Io("bad io".to_string()),
            Error::Logic("bad logic".to_string()),
        ];
        for variant in variants {
            let rendered = variant.to_string();
            assert!(!rendered.is_empty());
        }
    }
}
