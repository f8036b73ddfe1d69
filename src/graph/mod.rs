//! Graph path enumeration

mod traversal;

pub use traversal::{collect_paths, collect_paths_into, Adjacency, PathCollector};
