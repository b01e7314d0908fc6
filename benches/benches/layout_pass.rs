// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_layout::{LayoutParams, Tree};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Balanced tree with the given fanout and depth, uniform node sizes.
fn gen_balanced_tree(fanout: usize, depth: usize) -> Tree {
    let mut tree = Tree::new();
    let root = tree.insert(None, Size::new(80.0, 30.0));
    let mut frontier = vec![root];
    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in frontier {
            for _ in 0..fanout {
                next.push(tree.insert(Some(parent), Size::new(80.0, 30.0)));
            }
        }
        frontier = next;
    }
    tree
}

/// Random tree: each node attaches to a uniformly chosen earlier node, with
/// jittered intrinsic sizes.
fn gen_random_tree(n: usize, seed: u64) -> Tree {
    let mut rng = Rng::new(seed);
    let mut tree = Tree::new();
    let mut ids = Vec::with_capacity(n);
    ids.push(tree.insert(None, Size::new(80.0, 30.0)));
    for _ in 1..n {
        let parent = ids[(rng.next_u64() as usize) % ids.len()];
        let w = 40.0 + rng.next_f64() * 120.0;
        let h = 16.0 + rng.next_f64() * 40.0;
        ids.push(tree.insert(Some(parent), Size::new(w, h)));
    }
    tree
}

fn bench_balanced(c: &mut Criterion) {
    let params = LayoutParams::new(8.0, 40.0).unwrap();
    let mut group = c.benchmark_group("layout/balanced");
    for (fanout, depth) in [(2, 6), (4, 4), (8, 3)] {
        let tree = gen_balanced_tree(fanout, depth);
        let n = tree.len() as u64;
        group.throughput(Throughput::Elements(n));
        group.bench_function(format!("f{fanout}_d{depth}_n{n}"), |b| {
            b.iter(|| black_box(tree.layout(black_box(&params)).unwrap()));
        });
    }
    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let params = LayoutParams::new(8.0, 40.0).unwrap();
    let mut group = c.benchmark_group("layout/random");
    for n in [100, 1_000, 10_000] {
        let tree = gen_random_tree(n, 0x5eed_cafe);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{n}"), |b| {
            b.iter(|| black_box(tree.layout(black_box(&params)).unwrap()));
        });
    }
    group.finish();
}

fn bench_estimate_only(c: &mut Criterion) {
    let params = LayoutParams::new(8.0, 40.0).unwrap();
    let tree = gen_random_tree(10_000, 0x5eed_cafe);
    let root = tree.root().unwrap().unwrap();
    let mut group = c.benchmark_group("estimate");
    group.throughput(Throughput::Elements(tree.len() as u64));
    group.bench_function("n10000", |b| {
        b.iter(|| black_box(tree.estimate_size(black_box(root), black_box(&params))));
    });
    group.finish();
}

criterion_group!(benches, bench_balanced, bench_random, bench_estimate_only);
criterion_main!(benches);
