//! Containment hierarchy built from a flat batch of elements.
//!
//! Elements are inserted one at a time under a sentinel root. Each insertion
//! can adopt existing siblings that fit inside the new element, or hand the
//! new element down to a sibling that contains it, so the final tree does
//! not depend on the batch being sorted by size.

mod tree;

pub use tree::{ElementTree, NodeId, NodeKind, Rejection, TreeBuilder};
