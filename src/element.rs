//! Heap elements and the shape check applied to incoming values
//!
//! An [`Element`] pairs a `task` payload with the `priority` key the heap
//! orders by. Values arriving from an input layer may be incomplete; they are
//! modelled by [`Candidate`] and only become elements once both fields are
//! present. The [`IntoElement`] trait is the single place where that check
//! happens, so `push` and `update_priority` accept either form.

use crate::error::HeapError;
use std::fmt;

/// A task together with its priority key
///
/// Inside the heap, elements are identified by `priority` alone: two elements
/// that share a priority belong to the same position group and are treated as
/// interchangeable by [`contains`](crate::DWayHeap::contains) and
/// [`update_priority`](crate::DWayHeap::update_priority).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element<T, P> {
    pub task: T,
    pub priority: P,
}

impl<T, P> Element<T, P> {
    pub fn new(task: T, priority: P) -> Self {
        Element { task, priority }
    }

    /// Splits the element into its `(task, priority)` parts
    pub fn into_parts(self) -> (T, P) {
        (self.task, self.priority)
    }
}

impl<T: fmt::Display, P: fmt::Display> fmt::Display for Element<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (priority: {})", self.task, self.priority)
    }
}

/// A possibly incomplete element, as collected by an input form
///
/// Either field may be missing; converting it with [`IntoElement`] fails with
/// [`HeapError::InvalidElement`] in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T, P> {
    pub task: Option<T>,
    pub priority: Option<P>,
}

impl<T, P> Candidate<T, P> {
    pub fn new(task: Option<T>, priority: Option<P>) -> Self {
        Candidate { task, priority }
    }
}

impl<T, P> Default for Candidate<T, P> {
    fn default() -> Self {
        Candidate {
            task: None,
            priority: None,
        }
    }
}

/// Conversion into a well-formed [`Element`]
///
/// Rejects values whose `task` or `priority` is missing. No other constraint
/// is placed on either field.
pub trait IntoElement<T, P> {
    fn into_element(self) -> Result<Element<T, P>, HeapError>;
}

impl<T, P> IntoElement<T, P> for Element<T, P> {
    fn into_element(self) -> Result<Element<T, P>, HeapError> {
        Ok(self)
    }
}

impl<T, P> IntoElement<T, P> for (T, P) {
    fn into_element(self) -> Result<Element<T, P>, HeapError> {
        Ok(Element::new(self.0, self.1))
    }
}

impl<T, P> IntoElement<T, P> for Candidate<T, P> {
    fn into_element(self) -> Result<Element<T, P>, HeapError> {
        let priority = self.priority.ok_or(HeapError::InvalidElement("priority"))?;
        let task = self.task.ok_or(HeapError::InvalidElement("task"))?;
        Ok(Element { task, priority })
    }
}
