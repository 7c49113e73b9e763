//! Extreme stress tests that really push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use dway_heap::{DWayHeap, Element};

/// Test massive numbers of pushes and extracts
fn test_massive_operations(d: usize) {
    let mut heap = DWayHeap::new(d).unwrap();

    for i in 0..1000 {
        heap.push(Element::new(i, i)).unwrap();
    }
    assert_eq!(heap.len(), 1000);

    for i in (0..1000).rev() {
        assert_eq!(heap.extract_top(), Ok(Element::new(i, i)));
    }
    assert!(heap.is_empty());
}

/// Test many priority raises
fn test_many_raises(d: usize) {
    let mut heap = DWayHeap::new(d).unwrap();

    for i in 0..500 {
        heap.push(Element::new(i, i)).unwrap();
    }

    // Raise every key above all originals, preserving relative order.
    for i in 0..500 {
        heap.update_priority(&Element::new(i, i), Element::new(i, 10_000 + i))
            .unwrap();
    }
    assert_eq!(heap.check(), Ok(()));

    for i in (0..500).rev() {
        assert_eq!(heap.extract_top(), Ok(Element::new(i, 10_000 + i)));
    }
}

/// Test alternating push and extract
fn test_alternating_ops(d: usize) {
    let mut heap = DWayHeap::new(d).unwrap();

    for i in 0..200 {
        heap.push(Element::new(i, i * 2)).unwrap();
        heap.push(Element::new(i + 1000, i * 2 + 1)).unwrap();
        assert!(heap.extract_top().is_ok());
    }
    assert_eq!(heap.len(), 200);
    assert_eq!(heap.check(), Ok(()));

    let mut last = i32::MAX;
    while let Some(elem) = heap.pop() {
        assert!(elem.priority <= last);
        last = elem.priority;
    }
}

/// Test a pseudo-random workload against a sorted model
fn test_random_workload(d: usize) {
    let mut heap = DWayHeap::new(d).unwrap();
    let mut model: Vec<i64> = Vec::new();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;

    for step in 0..5000 {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        match state % 4 {
            0 | 1 => {
                let p = (state >> 8) as i64 % 10_000;
                heap.push(Element::new(step, p)).unwrap();
                model.push(p);
            }
            2 => {
                if let Some(top) = heap.pop() {
                    let max = model.iter().copied().max().unwrap();
                    assert_eq!(top.priority, max);
                    let at = model.iter().position(|&p| p == max).unwrap();
                    model.swap_remove(at);
                }
            }
            _ => {
                if let Some(&old) = model.get((state >> 16) as usize % model.len().max(1)) {
                    let new = (state >> 24) as i64 % 10_000;
                    heap.update_priority(&Element::new(0, old), Element::new(step, new))
                        .unwrap();
                    for p in model.iter_mut().filter(|p| **p == old) {
                        *p = new;
                    }
                }
            }
        }
    }

    assert_eq!(heap.len(), model.len());
    assert_eq!(heap.check(), Ok(()));
}

/// Test bulk construction of a large heap
fn test_large_heapify(d: usize) {
    let elements = (0..20_000).map(|i| Element::new(i, (i * 7_919) % 20_011));
    let heap = DWayHeap::from_elements(d, elements).unwrap();
    assert_eq!(heap.len(), 20_000);
    assert_eq!(heap.check(), Ok(()));

    let sorted = heap.into_sorted_vec();
    assert!(sorted.windows(2).all(|w| w[0].priority >= w[1].priority));
}

#[test]
fn test_binary_massive_operations() {
    test_massive_operations(2);
}

#[test]
fn test_quaternary_massive_operations() {
    test_massive_operations(4);
}

#[test]
fn test_wide_massive_operations() {
    test_massive_operations(32);
}

#[test]
fn test_binary_many_raises() {
    test_many_raises(2);
}

#[test]
fn test_quaternary_many_raises() {
    test_many_raises(4);
}

#[test]
fn test_binary_alternating_ops() {
    test_alternating_ops(2);
}

#[test]
fn test_ternary_alternating_ops() {
    test_alternating_ops(3);
}

#[test]
fn test_binary_random_workload() {
    test_random_workload(2);
}

#[test]
fn test_quaternary_random_workload() {
    test_random_workload(4);
}

#[test]
fn test_octonary_random_workload() {
    test_random_workload(8);
}

#[test]
fn test_binary_large_heapify() {
    test_large_heapify(2);
}

#[test]
fn test_quaternary_large_heapify() {
    test_large_heapify(4);
}
