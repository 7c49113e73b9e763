//! D-ary Heaps for Rust
//!
//! This crate provides a d-way heap (d-ary heap): a priority queue whose
//! implicit tree gives every node up to `d` children, with a configurable
//! comparator and in-place priority updates.
//!
//! # Features
//!
//! - **Any branch factor**: `d >= 2`, chosen at construction
//! - **Any total order**: a comparator over priority keys decides what rises to the top
//! - **Priority updates**: a position index locates elements by priority, so
//!   `update_priority` runs in O(log_d n) without scanning the storage
//! - **Linear-time construction** from an initial element list
//! - **Graph algorithms**: Dijkstra and Prim built on `update_priority`
//!
//! # Example
//!
//! ```rust
//! use dway_heap::{DWayHeap, Element};
//!
//! let mut heap = DWayHeap::from_elements(
//!     3,
//!     vec![Element::new("x", 3), Element::new("y", 7), Element::new("z", 2)],
//! )
//! .unwrap();
//!
//! assert_eq!(heap.peek().unwrap().priority, 7);
//! heap.update_priority(&Element::new("z", 2), Element::new("z", 10)).unwrap();
//! assert_eq!(heap.extract_top().unwrap(), Element::new("z", 10));
//! ```

pub mod compare;
pub mod config;
pub mod dway;
pub mod element;
pub mod error;
pub mod graph;
mod positions;

// Re-export the main types for convenience
pub use compare::{default_compare, reverse_compare, CompareFn};
pub use config::{BranchFactor, HeapBuilder, DEFAULT_BRANCH_FACTOR};
pub use dway::DWayHeap;
pub use element::{Candidate, Element, IntoElement};
pub use error::HeapError;
