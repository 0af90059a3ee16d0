//! Graph algorithms over the storage layer.
//!
//! Both entry points are pure reads: they take the registry and matrix by
//! shared reference and never mutate them.

pub mod shortest_path;
pub mod spanning_tree;

pub use shortest_path::{dijkstra, shortest_path, Route};
pub use spanning_tree::{build_mst, prim};
