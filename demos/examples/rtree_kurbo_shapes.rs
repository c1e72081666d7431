// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexing Kurbo shapes.
//!
//! Store shapes directly, use the tree for a coarse box query, then refine with exact
//! geometry.
//!
//! Run:
//! - `cargo run -p spatial_demos --example rtree_kurbo_shapes`

use kurbo::{Circle, Point, Rect, Shape};
use spatial_rtree::{Aabb2D, Bounded, RTree};

#[derive(Clone, Debug, PartialEq)]
enum Item {
    Circle(&'static str, Circle),
    Rect(&'static str, Rect),
}

impl Item {
    fn name(&self) -> &'static str {
        match self {
            Self::Circle(name, _) | Self::Rect(name, _) => name,
        }
    }

    fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(_, c) => c.contains(pt),
            Self::Rect(_, r) => r.contains(pt),
        }
    }
}

impl Bounded<f64> for Item {
    fn bbox(&self) -> Option<Aabb2D<f64>> {
        match self {
            Self::Circle(_, c) => c.bbox(),
            Self::Rect(_, r) => r.bbox(),
        }
    }
}

fn main() {
    let mut tree: RTree<Item> = RTree::new();
    tree.insert(Item::Circle("sun", Circle::new((50.0, 50.0), 20.0)));
    tree.insert(Item::Rect("house", Rect::new(100.0, 100.0, 160.0, 140.0)));
    tree.insert(Item::Circle("ball", Circle::new((120.0, 150.0), 5.0)));

    // Kurbo points are items too.
    let mut markers: RTree<Point> = RTree::new();
    markers.load([Point::new(1.0, 1.0), Point::new(55.0, 45.0)]);

    // A corner of the sun's bounding box is not inside the sun.
    for probe in [Point::new(35.0, 35.0), Point::new(55.0, 45.0), Point::new(118.0, 146.0)] {
        let candidates = tree.search(&Aabb2D::from_point(probe.x, probe.y));
        let exact: Vec<_> = candidates
            .iter()
            .filter(|item| item.contains(probe))
            .map(|item| item.name())
            .collect();
        println!(
            "{probe:?}: {} box hits, exact hits {exact:?}, markers {}",
            candidates.len(),
            markers.search(&Aabb2D::from_point(probe.x, probe.y)).len()
        );
    }

    let sun = Item::Circle("sun", Circle::new((50.0, 50.0), 20.0));
    assert!(tree.contains(&sun));
    let sky: Aabb2D<f64> = Rect::new(0.0, 0.0, 200.0, 90.0).into();
    assert!(tree.collides(&sky));
    assert!(tree.remove(&sun));
    assert!(!tree.collides(&sky));
}
