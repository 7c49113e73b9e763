//! Error type shared by every fallible heap operation

use std::fmt;

/// Error type for heap operations
///
/// Every operation that returns this error leaves the heap exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// The branch factor is not an integer or is smaller than 2
    InvalidBranchFactor(String),
    /// An element (pushed or used as an update target) is missing a field
    InvalidElement(&'static str),
    /// `peek` or `extract_top` was called on a heap with no elements
    EmptyHeap,
    /// `update_priority` was called with a priority that no stored element has
    ElementNotFound,
    /// A recorded position lies outside the current storage
    IndexOutOfRange { index: usize, len: usize },
    /// A child outranks its parent after construction
    ///
    /// This signals a defect in the heap itself, not a caller error.
    InvariantViolated { parent: usize, child: usize },
    /// The position index disagrees with the storage at `index`
    PositionMismatch { index: usize },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidBranchFactor(value) => {
                write!(f, "illegal argument for heap constructor: branch factor {value}")
            }
            HeapError::InvalidElement(field) => {
                write!(f, "illegal element: missing {field}")
            }
            HeapError::EmptyHeap => write!(f, "invalid status: empty heap"),
            HeapError::ElementNotFound => {
                write!(f, "out of range argument: element not stored in the heap")
            }
            HeapError::IndexOutOfRange { index, len } => {
                write!(f, "out of range: position {index} in a heap of size {len}")
            }
            HeapError::InvariantViolated { parent, child } => {
                write!(
                    f,
                    "heap properties violated: child {child} outranks parent {parent}"
                )
            }
            HeapError::PositionMismatch { index } => {
                write!(f, "heap properties violated: position {index} not indexed")
            }
        }
    }
}

impl std::error::Error for HeapError {}
