// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use scatter_selection::Selection;
use std::time::Duration;

fn bench_commit_query_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/commit");

    // A lasso result is unique by construction; `replace_with_unique` should
    // stay linear, `replace_with_hashed` pays for hashing, and `replace_with`
    // is quadratic.
    for len in [128usize, 512, 2_048, 8_192] {
        let keys: Vec<u32> = (0..(len as u32)).rev().collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("replace_with", len), &keys, |b, keys| {
            b.iter_batched(
                Selection::<u32>::new,
                |mut sel| {
                    sel.replace_with(keys.iter().copied());
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("replace_with_unique", len),
            &keys,
            |b, keys| {
                b.iter_batched(
                    Selection::<u32>::new,
                    |mut sel| {
                        sel.replace_with_unique(keys.iter().copied());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("replace_with_hashed", len),
            &keys,
            |b, keys| {
                b.iter_batched(
                    Selection::<u32>::new,
                    |mut sel| {
                        sel.replace_with_hashed(keys.iter().copied());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_commit_select_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/commit_large");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    // A lasso around the whole plot; the quadratic variant is left out.
    for len in [131_072usize, 1_048_576] {
        let keys: Vec<u32> = (0..(len as u32)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(
            BenchmarkId::new("replace_with_unique", len),
            &keys,
            |b, keys| {
                b.iter_batched(
                    Selection::<u32>::new,
                    |mut sel| {
                        sel.replace_with_unique(keys.iter().copied());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("replace_with_hashed", len),
            &keys,
            |b, keys| {
                b.iter_batched(
                    Selection::<u32>::new,
                    |mut sel| {
                        sel.replace_with_hashed(keys.iter().copied());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_recommit_identical(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/recommit_identical");

    // Re-committing the same lasso compares against the current contents and
    // leaves the revision alone.
    for len in [2_048usize, 131_072] {
        let keys: Vec<u32> = (0..(len as u32)).collect();
        let mut sel = Selection::<u32>::new();
        sel.replace_with_unique(keys.iter().copied());
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("replace_with_unique", len), &keys, |b, keys| {
            b.iter(|| {
                sel.replace_with_unique(keys.iter().copied());
                black_box(sel.revision())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_commit_query_result,
    bench_commit_select_all,
    bench_recommit_identical
);
criterion_main!(benches);
