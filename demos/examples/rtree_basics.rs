// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Insert labelled boxes one at a time, search, test for collisions, and remove.
//!
//! Run:
//! - `cargo run -p spatial_demos --example rtree_basics`

use spatial_rtree::{Aabb2D, RTree};

fn main() {
    let mut tree: RTree<(Aabb2D<f64>, &str)> = RTree::new();
    tree.insert((Aabb2D::new(0.0, 0.0, 10.0, 10.0), "a"));
    tree.insert((Aabb2D::new(5.0, 5.0, 15.0, 15.0), "b"));
    tree.insert((Aabb2D::new(40.0, 40.0, 50.0, 50.0), "c"));
    println!("{tree:?}");
    println!("bounds: {:?}", tree.bbox());

    // Touching edges count as intersecting.
    let query = Aabb2D::new(10.0, 10.0, 12.0, 12.0);
    let mut hits: Vec<_> = tree.search(&query).into_iter().map(|it| it.1).collect();
    hits.sort_unstable();
    println!("hits for {query:?}: {hits:?}");
    assert_eq!(hits, ["a", "b"]);

    let empty_area = Aabb2D::new(20.0, 20.0, 30.0, 30.0);
    assert!(!tree.collides(&empty_area));

    // Removal matches by equality of the whole item.
    assert!(!tree.remove(&(Aabb2D::new(0.0, 0.0, 10.0, 10.0), "b")));
    assert!(tree.remove(&(Aabb2D::new(0.0, 0.0, 10.0, 10.0), "a")));
    println!("after removing a: {} items", tree.len());

    // Or by key, for items without a useful `PartialEq`.
    let probe = (Aabb2D::new(40.0, 40.0, 50.0, 50.0), "");
    assert!(tree.remove_with(&probe, |stored, probe| stored.0 == probe.0));
    assert_eq!(tree.iter().map(|it| it.1).collect::<Vec<_>>(), ["b"]);
}
