//! D-ary heap with a priority-keyed position index
//!
//! A d-way heap (d-ary heap) generalizes the binary heap: every node has up
//! to `d` children, so the implicit tree is shallower and sift-up needs fewer
//! comparisons, at the price of `d` comparisons per level when sifting down.
//! For update-heavy workloads such as Dijkstra's and Prim's algorithms a
//! branch factor around 4 is usually the sweet spot.
//!
//! Storage is a dense vector; the children of index `i` live at
//! `i*d + 1 ..= i*d + d`. Next to the storage the heap keeps a position index
//! from priority key to the storage slots currently holding that key, which is
//! what lets [`DWayHeap::update_priority`] find its targets without scanning.
//!
//! The comparator decides what "top" means: a result of
//! [`Ordering::Greater`] places its first argument closer to the root. With
//! the default comparator the largest priority is on top.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity          |
//! |-------------------|---------------------|
//! | `push`            | O(log_d n)          |
//! | `peek`            | O(1)                |
//! | `extract_top`     | O(d log_d n)        |
//! | `update_priority` | O(k d log_d n) for a group of k elements |
//! | `contains`        | O(1) expected       |
//! | construction      | O(n)                |
//!
//! # Example
//!
//! ```rust
//! use dway_heap::{DWayHeap, Element};
//!
//! let mut heap = DWayHeap::new(2).unwrap();
//! heap.push(Element::new("A", 5)).unwrap();
//! heap.push(Element::new("B", 1)).unwrap();
//! heap.push(Element::new("C", 9)).unwrap();
//!
//! assert_eq!(heap.peek().unwrap(), Element::new("C", 9));
//! assert_eq!(heap.extract_top().unwrap(), Element::new("C", 9));
//!
//! heap.update_priority(&Element::new("B", 1), Element::new("B", 100))
//!     .unwrap();
//! assert_eq!(heap.peek().unwrap().priority, 100);
//! ```

use crate::compare::{default_compare, CompareFn};
use crate::config::{BranchFactor, HeapBuilder};
use crate::element::{Element, IntoElement};
use crate::error::HeapError;
use crate::positions::PositionIndex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// A d-ary heap ordered by a comparator over priority keys
///
/// Elements that share a priority form one position group: they are found,
/// and updated, together. Give every element a distinct priority when
/// elements must be addressed individually, for example by folding an
/// identifier into the key (see [`crate::graph`]).
#[derive(Clone)]
pub struct DWayHeap<T, P, C = CompareFn<P>> {
    elements: Vec<Element<T, P>>,
    positions: PositionIndex<P>,
    branch_factor: BranchFactor,
    compare: C,
}

impl<T, P> DWayHeap<T, P>
where
    P: PartialOrd + Eq + Hash + Clone,
{
    /// Creates an empty heap ordered by [`default_compare`] (maximum on top).
    ///
    /// # Errors
    /// [`HeapError::InvalidBranchFactor`] if `branch_factor < 2`.
    pub fn new(branch_factor: usize) -> Result<Self, HeapError> {
        Self::from_elements(branch_factor, Vec::new())
    }

    /// Builds a heap from `elements` in linear time, ordered by [`default_compare`].
    pub fn from_elements<I>(branch_factor: usize, elements: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = Element<T, P>>,
    {
        Self::with_comparator(
            branch_factor,
            elements,
            default_compare::<P> as CompareFn<P>,
        )
    }
}

impl<T, P: PartialOrd> DWayHeap<T, P> {
    /// Starts a [`HeapBuilder`] with the default configuration.
    pub fn builder() -> HeapBuilder<T, P> {
        HeapBuilder::new()
    }
}

impl<T, P, C> DWayHeap<T, P, C>
where
    P: Eq + Hash + Clone,
    C: Fn(&P, &P) -> Ordering,
{
    /// Builds a heap from `elements` ordered by `compare`.
    ///
    /// The initial elements are laid out in the given order and heapified
    /// bottom-up; the result is then verified.
    ///
    /// # Errors
    /// - [`HeapError::InvalidBranchFactor`] if `branch_factor < 2`
    /// - [`HeapError::InvariantViolated`] if the built heap fails verification
    pub fn with_comparator<I>(branch_factor: usize, elements: I, compare: C) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = Element<T, P>>,
    {
        let branch_factor = BranchFactor::new(branch_factor)?;
        let initial: Vec<Element<T, P>> = elements.into_iter().collect();

        let mut heap = DWayHeap {
            elements: Vec::with_capacity(initial.len()),
            positions: PositionIndex::with_capacity(initial.len()),
            branch_factor,
            compare,
        };
        heap.heapify(initial)?;
        Ok(heap)
    }

    /// Returns the number of children per node
    pub fn branch_factor(&self) -> usize {
        self.branch_factor.get()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if some stored element has the same priority as `elem`
    pub fn contains(&self, elem: &Element<T, P>) -> bool {
        self.positions.contains(&elem.priority)
    }

    /// Returns the stored element with this priority, if any
    ///
    /// When several elements share the priority, the one closest to the root
    /// is returned.
    pub fn contains_priority(&self, priority: &P) -> Option<&Element<T, P>> {
        self.positions
            .group(priority)?
            .iter()
            .min()
            .map(|&index| &self.elements[index])
    }

    /// Returns the storage indices holding elements with this priority
    pub fn positions_of(&self, priority: &P) -> Option<&[usize]> {
        self.positions.group(priority)
    }

    /// Iterates over the elements in storage order (not sorted order)
    pub fn iter(&self) -> std::slice::Iter<'_, Element<T, P>> {
        self.elements.iter()
    }

    /// Returns the elements in storage order
    pub fn as_slice(&self) -> &[Element<T, P>] {
        &self.elements
    }

    /// Inserts an element, restoring heap order.
    ///
    /// # Errors
    /// [`HeapError::InvalidElement`] if `elem` is missing its task or priority;
    /// the heap is left unchanged.
    ///
    /// # Time Complexity
    /// O(log_d n)
    pub fn push<E>(&mut self, elem: E) -> Result<&mut Self, HeapError>
    where
        E: IntoElement<T, P>,
    {
        let elem = elem.into_element()?;
        self.insert(elem);
        Ok(self)
    }

    /// Removes and returns the top element.
    ///
    /// The returned value is the stored element itself, not a copy.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if there is nothing to remove.
    ///
    /// # Time Complexity
    /// O(d log_d n)
    pub fn extract_top(&mut self) -> Result<Element<T, P>, HeapError> {
        if self.elements.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        let last = self.elements.len() - 1;
        let top = self.elements.swap_remove(0);
        self.positions.detach(&top.priority, 0);

        if last > 0 {
            // The former last element now sits at the root.
            self.positions
                .record(&self.elements[0].priority, 0, Some(last));
            self.sift_down(0);
        }

        Ok(top)
    }

    /// Removes and returns the top element, or `None` if the heap is empty
    pub fn pop(&mut self) -> Option<Element<T, P>> {
        self.extract_top().ok()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.positions.clear();
    }

    /// Drains the heap into a vector ordered top-first.
    pub fn into_sorted_vec(mut self) -> Vec<Element<T, P>> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(elem) = self.pop() {
            sorted.push(elem);
        }
        sorted
    }

    /// Verifies heap order and that the position index mirrors the storage.
    ///
    /// # Errors
    /// - [`HeapError::InvariantViolated`] for the first child that outranks its parent
    /// - [`HeapError::PositionMismatch`] for the first slot the index does not record
    pub fn check(&self) -> Result<(), HeapError> {
        self.check_heap_order()?;

        for (index, elem) in self.elements.iter().enumerate() {
            let recorded = self
                .positions
                .group(&elem.priority)
                .is_some_and(|group| group.contains(&index));
            if !recorded {
                return Err(HeapError::PositionMismatch { index });
            }
        }

        let n = self.elements.len();
        if self.positions.recorded() != n {
            return Err(HeapError::PositionMismatch { index: n });
        }
        Ok(())
    }

    fn insert(&mut self, elem: Element<T, P>) {
        let n = self.elements.len();
        self.set_position(elem, n, None);
        self.sift_up(n);
    }

    /// Writes `elem` into slot `index` (appending when `index == len`) and
    /// records it in the position index, dropping `old_index` from its group.
    ///
    /// Whatever occupied the slot before is dropped; the caller is responsible
    /// for its position record.
    fn set_position(&mut self, elem: Element<T, P>, index: usize, old_index: Option<usize>) {
        self.positions.record(&elem.priority, index, old_index);
        if index == self.elements.len() {
            self.elements.push(elem);
        } else {
            self.elements[index] = elem;
        }
    }

    /// Moves the element at `from` into slot `to`, recording its new position.
    ///
    /// The two slots trade contents, so the element being sifted is physically
    /// moved at every level. Only its position record is written once, when it
    /// comes to rest.
    fn relocate(&mut self, from: usize, to: usize) {
        self.elements.swap(from, to);
        self.positions.record(&self.elements[to].priority, to, Some(from));
    }

    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elements[a].priority, &self.elements[b].priority) == Ordering::Greater
    }

    /// Bubbles the element at `index` toward the root.
    ///
    /// Returns the index where it comes to rest.
    fn sift_up(&mut self, index: usize) -> usize {
        let mut i = index;

        while i > 0 {
            let parent = self.branch_factor.parent(i);
            if !self.outranks(i, parent) {
                break;
            }
            self.relocate(parent, i);
            i = parent;
        }

        if i != index {
            self.positions
                .record(&self.elements[i].priority, i, Some(index));
        }
        i
    }

    /// Pushes the element at `index` toward the leaves.
    ///
    /// Among siblings the first best child wins ties. Returns the index where
    /// the element comes to rest.
    fn sift_down(&mut self, index: usize) -> usize {
        let n = self.elements.len();
        let d = self.branch_factor.get();
        let mut i = index;

        loop {
            let first = self.branch_factor.first_child(i);
            if first >= n {
                break;
            }

            let mut best = first;
            for child in first + 1..(first + d).min(n) {
                if self.outranks(child, best) {
                    best = child;
                }
            }

            if !self.outranks(best, i) {
                break;
            }
            self.relocate(best, i);
            i = best;
        }

        if i != index {
            self.positions
                .record(&self.elements[i].priority, i, Some(index));
        }
        i
    }

    /// Lays out `initial` in order, then sifts down every inner node from the
    /// last one back to the root.
    fn heapify(&mut self, initial: Vec<Element<T, P>>) -> Result<(), HeapError> {
        for elem in initial {
            let index = self.elements.len();
            self.set_position(elem, index, None);
        }

        let n = self.elements.len();
        if n > 0 {
            let last_inner = (n - 1) / self.branch_factor.get();
            for index in (0..=last_inner).rev() {
                self.sift_down(index);
            }
        }

        let verified = self.check_heap_order();
        debug!(
            branch_factor = self.branch_factor.get(),
            len = n,
            verified = verified.is_ok(),
            "heapified initial elements"
        );
        verified
    }

    fn check_heap_order(&self) -> Result<(), HeapError> {
        let n = self.elements.len();
        let d = self.branch_factor.get();

        for parent in 0..n {
            let first = self.branch_factor.first_child(parent);
            if first >= n {
                break;
            }
            for child in first..(first + d).min(n) {
                if self.outranks(child, parent) {
                    return Err(HeapError::InvariantViolated { parent, child });
                }
            }
        }
        Ok(())
    }
}

impl<T, P, C> DWayHeap<T, P, C>
where
    T: Clone,
    P: Eq + Hash + Clone,
    C: Fn(&P, &P) -> Ordering,
{
    /// Returns a copy of the top element.
    ///
    /// The copy is independent of the heap: changing it cannot disturb heap
    /// order or the position index.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the heap has no elements.
    pub fn peek(&self) -> Result<Element<T, P>, HeapError> {
        self.elements.first().cloned().ok_or(HeapError::EmptyHeap)
    }

    /// Replaces every element whose priority equals `old_value.priority`
    /// with `new_value`, then restores heap order.
    ///
    /// When `new_value` ranks higher than `old_value`, the affected slots are
    /// sifted up in ascending index order; when it ranks lower they are
    /// sifted down in descending order. Either order guarantees that no sift
    /// disturbs a slot still waiting to be processed.
    ///
    /// # Errors
    /// - [`HeapError::ElementNotFound`] if no element has `old_value`'s priority
    /// - [`HeapError::InvalidElement`] if `new_value` is missing a field
    /// - [`HeapError::IndexOutOfRange`] if a recorded position lies past the
    ///   end of the storage, which only happens when the index is corrupt
    ///
    /// The heap is unchanged on error.
    pub fn update_priority<E>(
        &mut self,
        old_value: &Element<T, P>,
        new_value: E,
    ) -> Result<&mut Self, HeapError>
    where
        E: IntoElement<T, P>,
    {
        let mut indices: Vec<usize> = self
            .positions
            .group(&old_value.priority)
            .ok_or(HeapError::ElementNotFound)?
            .to_vec();
        let new_value = new_value.into_element()?;

        let n = self.elements.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= n) {
            return Err(HeapError::IndexOutOfRange { index, len: n });
        }

        let direction = (self.compare)(&new_value.priority, &old_value.priority);
        trace!(group = indices.len(), ?direction, "updating priority group");

        self.positions.take(&old_value.priority);
        if let Some((&last, rest)) = indices.split_last() {
            for &index in rest {
                self.set_position(new_value.clone(), index, None);
            }
            self.set_position(new_value, last, None);
        }

        match direction {
            Ordering::Greater => {
                indices.sort_unstable();
                for index in indices {
                    self.sift_up(index);
                }
            }
            Ordering::Less => {
                indices.sort_unstable_by(|a, b| b.cmp(a));
                for index in indices {
                    self.sift_down(index);
                }
            }
            Ordering::Equal => {}
        }

        Ok(self)
    }
}

impl<T, P, C> DWayHeap<T, P, C>
where
    T: fmt::Debug,
    P: fmt::Debug + Eq + Hash + Clone,
    C: Fn(&P, &P) -> Ordering,
{
    /// Emits every element in storage order at `trace` level.
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if there is nothing to show.
    pub fn log_contents(&self) -> Result<(), HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        for (index, elem) in self.elements.iter().enumerate() {
            trace!(index, task = ?elem.task, priority = ?elem.priority, "heap slot");
        }
        Ok(())
    }
}

impl<T, P, C> Extend<Element<T, P>> for DWayHeap<T, P, C>
where
    P: Eq + Hash + Clone,
    C: Fn(&P, &P) -> Ordering,
{
    fn extend<I: IntoIterator<Item = Element<T, P>>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T, P, C> IntoIterator for &'a DWayHeap<T, P, C> {
    type Item = &'a Element<T, P>;
    type IntoIter = std::slice::Iter<'a, Element<T, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: fmt::Debug, P: fmt::Debug, C> fmt::Debug for DWayHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DWayHeap")
            .field("branch_factor", &self.branch_factor)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

/// One line per element, in storage order
impl<T: fmt::Display, P: fmt::Display, C> fmt::Display for DWayHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.elements {
            writeln!(f, "{elem}")?;
        }
        Ok(())
    }
}
