//! Canonical forms and keys for nested, unhashable values

mod form;
mod key;

pub use form::{canonicalize, Canonical};
pub use key::{dedup, CanonicalKey};
