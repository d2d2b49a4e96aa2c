// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_quadtree::{NodeFlags, QuadTree};

const DOMAIN: f64 = 2000.0;

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
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn domain() -> Rect {
    Rect::new(0.0, 0.0, DOMAIN, DOMAIN)
}

fn gen_uniform_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * DOMAIN, rng.next_f64() * DOMAIN))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = spread + rng.next_f64() * (DOMAIN - 2.0 * spread);
        let cy = spread + rng.next_f64() * (DOMAIN - 2.0 * spread);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

fn build(points: &[Point]) -> QuadTree {
    let mut tree = QuadTree::new(domain()).unwrap();
    for pt in points {
        // Rare duplicates or degenerate pairs are fine to drop here.
        let _ = tree.insert(*pt);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for &count in &[1_000_usize, 10_000, 100_000] {
        let uniform = gen_uniform_points(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("uniform_{count}"), |b| {
            b.iter_batched(
                || uniform.clone(),
                |pts| black_box(build(&pts)),
                BatchSize::LargeInput,
            );
        });

        let clustered = gen_clustered_points(count / 100, 100, 4.0);
        group.bench_function(format!("clustered_{count}"), |b| {
            b.iter_batched(
                || clustered.clone(),
                |pts| black_box(build(&pts)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_traverse");
    let tree = build(&gen_uniform_points(50_000));
    group.throughput(Throughput::Elements(tree.node_count() as u64));
    group.bench_function("nodes_preorder", |b| {
        b.iter(|| black_box(tree.nodes().map(|n| n.bounds().area()).sum::<f64>()));
    });
    group.bench_function("occupied_leaves", |b| {
        b.iter(|| black_box(tree.nodes_with(NodeFlags::OCCUPIED).count()));
    });
    let probes = gen_uniform_points(1_000);
    group.bench_function("leaf_at_1k", |b| {
        b.iter(|| {
            let mut depth = 0_u64;
            for pt in &probes {
                if let Some(leaf) = tree.leaf_at(*pt) {
                    depth += u64::from(leaf.depth());
                }
            }
            black_box(depth)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_traverse);
criterion_main!(benches);
