//! Core data model types for pathkey

mod fingerprint;
mod value;

pub use fingerprint::Fingerprint;
pub use value::Value;
