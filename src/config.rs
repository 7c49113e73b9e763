//! Heap configuration: the branch factor and a fluent builder
//!
//! # Example
//!
//! ```rust
//! use dway_heap::{DWayHeap, Element};
//!
//! let heap = DWayHeap::builder()
//!     .branch_factor(4)
//!     .elements(vec![Element::new("a", 3), Element::new("b", 8)])
//!     .compare(|a: &i32, b: &i32| b.cmp(a))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(heap.branch_factor(), 4);
//! assert_eq!(heap.peek().unwrap().priority, 3);
//! ```

use crate::compare::{default_compare, CompareFn};
use crate::dway::DWayHeap;
use crate::element::Element;
use crate::error::HeapError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Branch factor used when none is configured
pub const DEFAULT_BRANCH_FACTOR: usize = 2;

/// Number of children per node, always at least 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchFactor(usize);

impl BranchFactor {
    pub const BINARY: BranchFactor = BranchFactor(2);

    pub fn new(d: usize) -> Result<Self, HeapError> {
        if d < 2 {
            return Err(HeapError::InvalidBranchFactor(d.to_string()));
        }
        Ok(BranchFactor(d))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Index of the parent of a non-root node
    #[inline]
    pub(crate) fn parent(self, index: usize) -> usize {
        (index - 1) / self.0
    }

    #[inline]
    pub(crate) fn first_child(self, index: usize) -> usize {
        index * self.0 + 1
    }
}

impl Default for BranchFactor {
    fn default() -> Self {
        BranchFactor(DEFAULT_BRANCH_FACTOR)
    }
}

impl TryFrom<usize> for BranchFactor {
    type Error = HeapError;

    fn try_from(d: usize) -> Result<Self, Self::Error> {
        BranchFactor::new(d)
    }
}

impl FromStr for BranchFactor {
    type Err = HeapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = s
            .trim()
            .parse::<usize>()
            .map_err(|_| HeapError::InvalidBranchFactor(s.to_string()))?;
        BranchFactor::new(d)
    }
}

impl fmt::Display for BranchFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builder for [`DWayHeap`]
///
/// Defaults to a binary heap with no initial elements ordered by
/// [`default_compare`]. Nothing is validated until [`build`](Self::build).
pub struct HeapBuilder<T, P, C = CompareFn<P>> {
    branch_factor: usize,
    elements: Vec<Element<T, P>>,
    compare: C,
}

impl<T, P: PartialOrd> HeapBuilder<T, P> {
    pub fn new() -> Self {
        HeapBuilder {
            branch_factor: DEFAULT_BRANCH_FACTOR,
            elements: Vec::new(),
            compare: default_compare::<P>,
        }
    }
}

impl<T, P: PartialOrd> Default for HeapBuilder<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C> HeapBuilder<T, P, C> {
    /// Sets the number of children per node.
    pub fn branch_factor(mut self, d: usize) -> Self {
        self.branch_factor = d;
        self
    }

    /// Appends initial elements; they are heapified in one pass on build.
    pub fn elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = Element<T, P>>,
    {
        self.elements.extend(elements);
        self
    }

    /// Replaces the comparator.
    pub fn compare<F>(self, compare: F) -> HeapBuilder<T, P, F>
    where
        F: Fn(&P, &P) -> Ordering,
    {
        HeapBuilder {
            branch_factor: self.branch_factor,
            elements: self.elements,
            compare,
        }
    }
}

impl<T, P, C> HeapBuilder<T, P, C>
where
    P: Eq + Hash + Clone,
    C: Fn(&P, &P) -> Ordering,
{
    pub fn build(self) -> Result<DWayHeap<T, P, C>, HeapError> {
        DWayHeap::with_comparator(self.branch_factor, self.elements, self.compare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_factor_bounds() {
        assert!(BranchFactor::new(0).is_err());
        assert!(BranchFactor::new(1).is_err());
        assert_eq!(BranchFactor::new(2).unwrap(), BranchFactor::BINARY);
        assert_eq!(BranchFactor::try_from(16).unwrap().get(), 16);
        assert_eq!(BranchFactor::default().get(), DEFAULT_BRANCH_FACTOR);
    }

    #[test]
    fn test_branch_factor_from_str() {
        assert_eq!(" 4 ".parse::<BranchFactor>().unwrap().get(), 4);
        assert_eq!(
            "four".parse::<BranchFactor>(),
            Err(HeapError::InvalidBranchFactor("four".to_string()))
        );
        assert_eq!(
            "1".parse::<BranchFactor>(),
            Err(HeapError::InvalidBranchFactor("1".to_string()))
        );
        assert!("-3".parse::<BranchFactor>().is_err());
    }

    #[test]
    fn test_index_arithmetic() {
        let d = BranchFactor::new(3).unwrap();
        assert_eq!(d.first_child(0), 1);
        assert_eq!(d.first_child(2), 7);
        assert_eq!(d.parent(1), 0);
        assert_eq!(d.parent(3), 0);
        assert_eq!(d.parent(4), 1);
        assert_eq!(d.parent(9), 2);
    }

    #[test]
    fn test_builder_defaults() {
        let heap: DWayHeap<&str, i32> = HeapBuilder::new().build().unwrap();
        assert!(heap.is_empty());
        assert_eq!(heap.branch_factor(), DEFAULT_BRANCH_FACTOR);
    }

    #[test]
    fn test_builder_rejects_bad_branch_factor() {
        let result = HeapBuilder::<&str, i32>::new().branch_factor(1).build();
        assert_eq!(
            result.err(),
            Some(HeapError::InvalidBranchFactor("1".to_string()))
        );
    }

    #[test]
    fn test_builder_custom_compare() {
        let mut heap = HeapBuilder::new()
            .branch_factor(3)
            .elements(vec![
                Element::new("x", 3),
                Element::new("y", 7),
                Element::new("z", 2),
            ])
            .compare(|a: &i32, b: &i32| b.cmp(a))
            .build()
            .unwrap();
        assert_eq!(heap.extract_top().unwrap().task, "z");
        assert_eq!(heap.extract_top().unwrap().task, "x");
        assert_eq!(heap.extract_top().unwrap().task, "y");
    }
}
