//! Branch factor comparison benchmarks
//!
//! Measures how the branch factor trades sift-up depth against sift-down
//! width on three workloads: push/extract cycles, bulk construction, and an
//! update-heavy Dijkstra run on a random graph.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench dway_bench
//!
//! # Only the Dijkstra workload
//! cargo bench --bench dway_bench -- dijkstra
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dway_heap::graph::{dijkstra, Graph};
use dway_heap::{DWayHeap, Element};

const BRANCH_FACTORS: [usize; 5] = [2, 3, 4, 8, 16];

/// Deterministic pseudo-random sequence (xorshift64)
fn pseudo_random(count: usize, seed: u64) -> Vec<u64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn random_graph(nodes: usize, edges_per_node: usize) -> Graph {
    let mut graph = Graph::new(nodes);
    let noise = pseudo_random(nodes * edges_per_node * 2, 0x9e37_79b9_7f4a_7c15);
    for (i, pair) in noise.chunks_exact(2).enumerate() {
        let from = i / edges_per_node;
        let to = (pair[0] % nodes as u64) as usize;
        graph.add_edge(from, to, pair[1] % 1_000 + 1);
    }
    graph
}

fn bench_push_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_extract");
    let keys = pseudo_random(10_000, 0x2545_f491_4f6c_dd1d);

    for d in BRANCH_FACTORS {
        group.bench_with_input(BenchmarkId::new("d", d), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = DWayHeap::new(d).unwrap();
                for (i, &key) in keys.iter().enumerate() {
                    heap.push(Element::new(i, key)).unwrap();
                }
                while let Some(top) = heap.pop() {
                    black_box(top);
                }
            })
        });
    }
    group.finish();
}

fn bench_heapify(c: &mut Criterion) {
    let mut group = c.benchmark_group("heapify");
    let keys = pseudo_random(50_000, 0xdead_beef_cafe_f00d);

    for d in BRANCH_FACTORS {
        group.bench_with_input(BenchmarkId::new("d", d), &keys, |b, keys| {
            b.iter(|| {
                let elements = keys.iter().enumerate().map(|(i, &key)| Element::new(i, key));
                black_box(DWayHeap::from_elements(d, elements).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(20);
    let graph = random_graph(5_000, 8);

    for d in BRANCH_FACTORS {
        group.bench_with_input(BenchmarkId::new("d", d), &graph, |b, graph| {
            b.iter(|| black_box(dijkstra(graph, 0, d).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_extract, bench_heapify, bench_dijkstra);
criterion_main!(benches);
