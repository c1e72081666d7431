// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Removal and condensing.

use alloc::vec::Vec;

use super::RTree;
use super::node::{Child, NodeIdx, item_bbox};
use crate::bounded::Bounded;
use crate::types::Scalar;

impl<I: Bounded<T>, T: Scalar> RTree<I, T> {
    /// Remove one stored item equal to `item`.
    ///
    /// Returns `false` and leaves the tree untouched if no equal item is stored. Only
    /// subtrees whose box contains `item`'s box are searched, so the item must report
    /// the same box it was inserted with.
    pub fn remove(&mut self, item: &I) -> bool
    where
        I: PartialEq,
    {
        self.remove_with(item, |a, b| a == b)
    }

    /// Remove one stored item for which `eq(stored, item)` holds.
    ///
    /// Useful when `I` has no `PartialEq`, or when items should be matched by a key.
    pub fn remove_with(&mut self, item: &I, mut eq: impl FnMut(&I, &I) -> bool) -> bool {
        let bbox = item_bbox(item);
        let mut path: Vec<NodeIdx> = Vec::new();
        // Position of each path node within its parent.
        let mut indexes: Vec<usize> = Vec::new();
        let mut next = Some(self.root);
        let mut i = 0;
        let mut going_up = false;

        while next.is_some() || !path.is_empty() {
            let idx = match next {
                Some(idx) => idx,
                None => {
                    let Some(idx) = path.pop() else {
                        break;
                    };
                    i = indexes.pop().unwrap_or(0);
                    going_up = true;
                    idx
                }
            };

            let node = &self.arena[idx];
            if node.leaf {
                let found = node.children.iter().position(|c| match c {
                    Child::Entry(entry) => eq(&entry.item, item),
                    Child::Node(_) => false,
                });
                if let Some(pos) = found {
                    self.arena[idx].children.remove(pos);
                    path.push(idx);
                    self.len -= 1;
                    self.condense(&path);
                    return true;
                }
            }

            let node = &self.arena[idx];
            if !going_up && !node.leaf && node.bbox.contains(&bbox) {
                path.push(idx);
                indexes.push(i);
                i = 0;
                next = node.children.first().and_then(Child::node);
            } else if let Some(&parent) = path.last() {
                i += 1;
                next = self.arena[parent].children.get(i).and_then(Child::node);
                going_up = false;
            } else {
                next = None;
            }
        }
        false
    }
}

impl<I, T: Scalar> RTree<I, T> {
    /// Walk `path` leaf-first, dropping emptied nodes and refitting the rest.
    fn condense(&mut self, path: &[NodeIdx]) {
        let mut dropped = 0;
        for (level, &idx) in path.iter().enumerate().rev() {
            if !self.arena[idx].children.is_empty() {
                self.arena.recompute_bbox(idx);
                continue;
            }
            if level == 0 {
                self.clear();
                break;
            }
            let siblings = &mut self.arena[path[level - 1]].children;
            if let Some(pos) = siblings.iter().position(|c| c.node() == Some(idx)) {
                siblings.remove(pos);
            }
            self.arena.release(idx);
            dropped += 1;
        }
        if dropped > 0 {
            log::trace!("condense dropped {dropped} emptied nodes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Aabb2D;
    use crate::rtree::fixture_points;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    type Item = (Aabb2D<f64>, u32);

    #[test]
    fn removes_from_both_ends() {
        let points = fixture_points();
        let n = points.len();
        let mut tree: RTree<Item> = points.iter().copied().collect();
        for item in points[..3].iter().chain(&points[n - 3..]) {
            assert!(tree.remove(item));
        }
        assert_eq!(tree.len(), n - 6);
        tree.assert_invariants(false);
        let mut left: Vec<u32> = tree.iter().map(|it| it.1).collect();
        left.sort_unstable();
        let expected: Vec<u32> = points[3..n - 3].iter().map(|it| it.1).collect();
        assert_eq!(left, expected);
    }

    #[test]
    fn absent_item_is_a_noop() {
        let points = fixture_points();
        let mut tree: RTree<Item> = points.iter().copied().collect();
        let bbox = tree.bbox();
        let nodes = tree.arena.live();
        assert!(!tree.remove(&(Aabb2D::from_point(13.0, 13.0), 0)));
        // Right box, wrong payload.
        assert!(!tree.remove(&(points[0].0, 12_345)));
        assert_eq!(tree.len(), points.len());
        assert_eq!(tree.bbox(), bbox);
        assert_eq!(tree.arena.live(), nodes);

        let mut empty: RTree<Item> = RTree::new();
        assert!(!empty.remove(&points[0]));
    }

    #[test]
    fn removing_everything_leaves_a_fresh_tree() {
        let points = fixture_points();
        let mut tree: RTree<Item> = points.iter().copied().collect();
        for item in &points {
            assert!(tree.remove(item));
        }
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.bbox(), None);
        assert_eq!(tree.arena.live(), 1);
        tree.assert_invariants(true);
    }

    #[test]
    fn duplicates_are_removed_one_at_a_time() {
        let item = (Aabb2D::new(1.0, 1.0, 2.0, 2.0), 7);
        let mut tree: RTree<Item> = RTree::new();
        tree.insert(item);
        tree.insert(item);
        assert!(tree.remove(&item));
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&item));
        assert!(tree.remove(&item));
        assert!(!tree.remove(&item));
    }

    #[test]
    fn remove_with_matches_by_key() {
        #[derive(Debug)]
        struct Tagged {
            bbox: Aabb2D<f64>,
            tag: u32,
        }
        impl Bounded<f64> for Tagged {
            fn bbox(&self) -> Option<Aabb2D<f64>> {
                Some(self.bbox)
            }
        }

        let mut tree: RTree<Tagged> = (0..30)
            .map(|i| Tagged {
                bbox: Aabb2D::from_point(f64::from(i), f64::from(i)),
                tag: i,
            })
            .collect();
        let probe = Tagged {
            bbox: Aabb2D::from_point(4.0, 4.0),
            tag: 4,
        };
        assert!(tree.remove_with(&probe, |a, b| a.tag == b.tag));
        assert!(!tree.remove_with(&probe, |a, b| a.tag == b.tag));
        assert_eq!(tree.len(), 29);
        tree.assert_invariants(false);
    }

    #[test]
    fn boxless_items_can_be_removed() {
        let boxless = Aabb2D::new(1.0, 1.0, 0.0, 0.0);
        let mut tree: RTree<Aabb2D<f64>> = (0..50)
            .map(|i| Aabb2D::from_point(f64::from(i), 0.0))
            .collect();
        tree.insert(boxless);
        assert_eq!(tree.len(), 51);
        assert!(tree.remove(&boxless));
        assert_eq!(tree.len(), 50);
        assert!(!tree.contains(&boxless));
        tree.assert_invariants(false);
    }

    #[test]
    fn random_insert_remove_sequences_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(99);
        for max in [4, 5, 16] {
            let mut tree: RTree<Item> = RTree::with_max_entries(max).unwrap();
            let mut live: Vec<Item> = Vec::new();
            let mut next_id = 0;
            for round in 0..20 {
                let count = rng.random_range(1..120);
                let batch: Vec<Item> = (0..count)
                    .map(|_| {
                        let x = rng.random_range(0.0..500.0);
                        let y = rng.random_range(0.0..500.0);
                        next_id += 1;
                        (Aabb2D::new(x, y, x + 3.0, y + 3.0), next_id)
                    })
                    .collect();
                if round % 2 == 0 {
                    tree.load(batch.iter().copied());
                } else {
                    for item in &batch {
                        tree.insert(*item);
                    }
                }
                live.extend(batch);

                live.shuffle(&mut rng);
                let remove_count = rng.random_range(0..=live.len() / 2);
                for item in live.drain(..remove_count) {
                    assert!(tree.remove(&item));
                }
                assert_eq!(tree.len(), live.len());
                tree.assert_invariants(false);
            }
            for item in &live {
                assert!(tree.contains(item));
            }
        }
    }
}
