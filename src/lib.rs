//! # pathkey
//!
//! Two small primitives for loosely structured graphs and nested data.
//!
//! ## Core Concepts
//!
//! - **Paths**: every forward walk from a start node to the terminal nodes
//!   it reaches in an adjacency mapping
//! - **Values**: nested data that may contain lists, sets and maps
//! - **Canonical keys**: values wrapped so they can be hashed, compared and
//!   sorted, then restored unchanged
//!
//! ## Example
//!
//! ```
//! use pathkey::{collect_paths, dedup, Value};
//! use std::collections::HashMap;
//!
//! let graph = HashMap::from([("a", vec!["b", "c"]), ("b", vec!["d"])]);
//! assert_eq!(collect_paths(&"a", &graph), vec![vec!["b", "d"], vec!["c"]]);
//!
//! let unique = dedup([
//!     Value::map([("a", 1), ("b", 2)]),
//!     Value::map([("b", 2), ("a", 1)]),
//! ])?;
//! assert_eq!(unique.len(), 1);
//! # Ok::<(), pathkey::Error>(())
//! ```

pub mod canonical;
pub mod graph;
pub mod model;

mod error;

pub use canonical::{canonicalize, dedup, Canonical, CanonicalKey};
pub use error::{Error, Result};
pub use graph::{collect_paths, collect_paths_into, Adjacency, PathCollector};
pub use model::{Fingerprint, Value};
