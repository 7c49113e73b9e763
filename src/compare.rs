//! Comparators for priority keys
//!
//! A comparator answers "how does `a` rank against `b`": [`Ordering::Greater`]
//! means `a` belongs closer to the root. With [`default_compare`] larger keys
//! rank higher, so the heap keeps its maximum at the root.

use std::cmp::Ordering;

/// Function-pointer form of a comparator, used as the heap's default type
pub type CompareFn<P> = fn(&P, &P) -> Ordering;

/// Three-way ordering by `PartialOrd`
///
/// Keys that cannot be ordered against each other compare as equal.
pub fn default_compare<P: PartialOrd>(a: &P, b: &P) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Reversed [`default_compare`]: smaller keys rank higher (a min-heap)
pub fn reverse_compare<P: PartialOrd>(a: &P, b: &P) -> Ordering {
    default_compare(b, a)
}
