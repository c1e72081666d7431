// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Spatial R-tree: bulk load, insert, search, and remove.

use spatial_rtree::{Aabb2D, RTree};

fn main() {
    let cities = [
        (Aabb2D::from_point(2.35, 48.86), "Paris"),
        (Aabb2D::from_point(13.40, 52.52), "Berlin"),
        (Aabb2D::from_point(-0.13, 51.51), "London"),
        (Aabb2D::from_point(12.50, 41.90), "Rome"),
        (Aabb2D::from_point(-3.70, 40.42), "Madrid"),
        (Aabb2D::from_point(4.90, 52.37), "Amsterdam"),
        (Aabb2D::from_point(16.37, 48.21), "Vienna"),
        (Aabb2D::from_point(14.42, 50.09), "Prague"),
    ];

    let mut tree: RTree<(Aabb2D<f64>, &str)> = cities.into_iter().collect();
    println!("{tree:?}");

    // Add one more.
    tree.insert((Aabb2D::from_point(21.01, 52.23), "Warsaw"));

    // West/south/east/north box around central Europe.
    let central = Aabb2D::new(5.0, 45.0, 22.0, 55.0);
    let mut names: Vec<_> = tree.search(&central).into_iter().map(|c| c.1).collect();
    names.sort_unstable();
    println!("central Europe: {names:?}");

    let removed = tree.remove(&(Aabb2D::from_point(13.40, 52.52), "Berlin"));
    println!("removed Berlin: {removed}, {} left", tree.len());
    println!("anything near Berlin now: {}", tree.collides(&Aabb2D::new(13.0, 52.0, 14.0, 53.0)));
}
