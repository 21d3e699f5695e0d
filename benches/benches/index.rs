// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use scatter_engine::hit::{RaycastParams, raycast};
use scatter_index::{Aabb2D, KdIndex};

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
    /// Uniform in `[-1, 1)`.
    fn next_unit(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 52) as f64) - 1.0
    }
}

/// `count` points spread uniformly over data space.
fn gen_uniform_points(count: usize) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| (rng.next_unit(), rng.next_unit()))
        .collect()
}

/// `n_clusters` gaussian-ish blobs, the usual shape of embedding plots.
fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<(f64, f64)> = (0..n_clusters)
        .map(|_| (rng.next_unit() * 0.8, rng.next_unit() * 0.8))
        .collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_unit() + rng.next_unit()) * 0.5 * spread;
            let dy = (rng.next_unit() + rng.next_unit()) * 0.5 * spread;
            out.push((cx + dx, cy + dy));
        }
    }
    out
}

/// A regular polygon approximating a freehand lasso loop.
fn lasso_ring(center: (f64, f64), radius: f64, vertices: usize) -> Vec<(f64, f64)> {
    (0..vertices)
        .map(|i| {
            let t = i as f64 / vertices as f64 * core::f64::consts::TAU;
            (center.0 + radius * t.cos(), center.1 + radius * t.sin())
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/build");
    for &n in &[10_000usize, 100_000, 1_000_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("uniform", n), &points, |b, points| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(KdIndex::build(points)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/range");
    let points = gen_clustered_points(40, 25_000, 0.2);
    let index = KdIndex::build(points.iter().copied());

    // Half extents from a raycast box up to a zoomed-out viewport.
    for &half in &[0.01_f64, 0.1, 0.5] {
        let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
        let queries: Vec<Aabb2D> = (0..256)
            .map(|_| Aabb2D::around(rng.next_unit(), rng.next_unit(), half, half))
            .collect();
        group.bench_with_input(BenchmarkId::new("visit", half), &queries, |b, queries| {
            b.iter(|| {
                let mut hits = 0_usize;
                for q in queries {
                    index.visit_rect(*q, |_| hits += 1);
                }
                black_box(hits)
            });
        });
        group.bench_with_input(BenchmarkId::new("collect", half), &queries, |b, queries| {
            b.iter(|| {
                for q in queries {
                    black_box(index.query_rect(*q));
                }
            });
        });
    }
    group.finish();
}

fn bench_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/polygon");
    let points = gen_uniform_points(1_000_000);
    let index = KdIndex::build(points.iter().copied());

    for &vertices in &[16usize, 128, 1_024] {
        let ring = lasso_ring((0.1, -0.2), 0.4, vertices);
        group.bench_with_input(BenchmarkId::new("ring", vertices), &ring, |b, ring| {
            b.iter(|| black_box(index.query_polygon(ring)));
        });
    }
    group.finish();
}

fn bench_raycast(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/raycast");
    let params = RaycastParams {
        point_size: 6.0,
        scaling: 1.0,
        device_pixel_ratio: 2.0,
        width: 1_200.0,
        height: 800.0,
    };
    for &n in &[10_000usize, 1_000_000] {
        let index = KdIndex::build(gen_clustered_points(40, n / 40, 0.2));
        let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
        let probes: Vec<Point> = (0..1_024)
            .map(|_| Point::new(rng.next_unit(), rng.next_unit()))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::new("hover", n), &probes, |b, probes| {
            b.iter(|| {
                for p in probes {
                    black_box(raycast(&index, *p, &params));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_range, bench_polygon, bench_raycast);
criterion_main!(benches);
