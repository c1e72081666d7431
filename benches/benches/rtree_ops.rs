// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use spatial_rtree::{Aabb2D, RTree};

type Item = (Aabb2D<f64>, u32);

const POINTS: usize = 100_000;

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

/// Uniform random lon/lat points.
fn gen_points(count: usize) -> Vec<Item> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let lon = rng.next_f64() * 360.0 - 180.0;
            let lat = rng.next_f64() * 180.0 - 90.0;
            (Aabb2D::from_point(lon, lat), i as u32)
        })
        .collect()
}

fn gen_random_rects(count: usize, extent: f64, size: f64) -> Vec<Item> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|i| {
            let x0 = rng.next_f64() * extent;
            let y0 = rng.next_f64() * extent;
            (Aabb2D::from_xywh(x0, y0, size, size), i as u32)
        })
        .collect()
}

fn bench_bulk_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_bulk_load");
    let points = gen_points(POINTS);
    group.throughput(Throughput::Elements(POINTS as u64));
    for max_entries in [16, 128] {
        group.bench_function(format!("points_m{max_entries}"), |b| {
            b.iter_batched(
                || points.clone(),
                |items| {
                    let tree: RTree<Item> = RTree::from_items(items, max_entries).unwrap();
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_insert");
    let rects = gen_random_rects(10_000, 2000.0, 4.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for max_entries in [16, 128] {
        group.bench_function(format!("one_by_one_m{max_entries}"), |b| {
            b.iter_batched(
                || RTree::<Item>::with_max_entries(max_entries).unwrap(),
                |mut tree| {
                    for r in rects.iter().copied() {
                        tree.insert(r);
                    }
                    black_box(tree.height());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("merge_batches_m16", |b| {
        b.iter_batched(
            RTree::<Item>::new,
            |mut tree| {
                for chunk in rects.chunks(1000) {
                    tree.load(chunk.iter().copied());
                }
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_search");
    let points = gen_points(POINTS);
    let query = Aabb2D::new(10.0, 10.0, 20.0, 20.0);
    for max_entries in [16, 128] {
        let tree: RTree<Item> = RTree::from_items(points.iter().copied(), max_entries).unwrap();
        group.bench_function(format!("box_m{max_entries}"), |b| {
            b.iter(|| black_box(tree.search(black_box(&query)).len()))
        });
        group.bench_function(format!("collides_m{max_entries}"), |b| {
            b.iter(|| black_box(tree.collides(black_box(&query))))
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_remove");
    let rects = gen_random_rects(10_000, 2000.0, 4.0);
    group.bench_function("remove_half_m16", |b| {
        b.iter_batched(
            || RTree::<Item>::from_items(rects.iter().copied(), 16).unwrap(),
            |mut t| {
                for r in rects.iter().step_by(2) {
                    black_box(t.remove(r));
                }
                black_box(t.len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bulk_load,
    bench_insert,
    bench_search,
    bench_remove
);
criterion_main!(benches);
