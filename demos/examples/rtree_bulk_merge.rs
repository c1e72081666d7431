// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk loading and merging.
//!
//! Pack a large batch, then merge a second batch from a different region and a few
//! stragglers into it.
//!
//! Run:
//! - `cargo run -p spatial_demos --example rtree_bulk_merge`

use spatial_rtree::{Aabb2D, RTreeI64};

fn grid(origin: i64, side: i64, step: i64) -> impl Iterator<Item = [i64; 2]> {
    (0..side * side).map(move |i| [origin + (i % side) * step, origin + (i / side) * step])
}

fn main() {
    let mut tree: RTreeI64<[i64; 2]> = RTreeI64::with_max_entries(9).unwrap();

    tree.load(grid(0, 100, 10));
    println!("packed {} points, height {}", tree.len(), tree.height());

    // A batch of similar size far away merges in as a sibling subtree.
    tree.load(grid(100_000, 100, 10));
    println!("merged to {} points, height {}", tree.len(), tree.height());

    // Small batches go through regular insertion.
    tree.load([[-5, -5], [-6, -6]]);
    println!("with stragglers: {} points, bounds {:?}", tree.len(), tree.bbox());

    let near_origin = tree.search(&Aabb2D::new(-10, -10, 25, 25));
    println!("{} points near the origin", near_origin.len());
    assert_eq!(near_origin.len(), 2 + 9);

    let far = Aabb2D::new(100_000, 100_000, 100_090, 100_000);
    assert_eq!(tree.search(&far).len(), 10);
}
