// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OMT bulk loading.
//!
//! A batch is packed top-down into a balanced subtree by repeatedly partitioning it into
//! vertical slices by `min_x` and each slice into groups by `min_y`. The packed subtree is
//! then merged into whatever the tree already holds.

use alloc::vec;
use alloc::vec::Vec;

use super::RTree;
use super::node::{Child, Entry, Node, NodeIdx};
use crate::bounded::Bounded;
use crate::select::multi_select;
use crate::types::{Scalar, cmp_t};

impl<I: Bounded<T>, T: Scalar> RTree<I, T> {
    /// Bulk-insert `items`.
    ///
    /// Packing a batch first and merging it in is typically several times faster than
    /// inserting items one by one, and produces better-shaped nodes. Batches smaller than
    /// the minimum fill fall back to single insertion. An empty batch is a no-op.
    ///
    /// Loading into a non-empty tree works best when the batch is clustered in a
    /// different region from existing data, or is similar in size to it.
    pub fn load(&mut self, items: impl IntoIterator<Item = I>) {
        let entries: Vec<Entry<I, T>> = items.into_iter().map(Entry::new).collect();
        let n = entries.len();
        if n == 0 {
            return;
        }
        if n < self.params.min_entries() {
            for entry in entries {
                self.insert_entry(entry);
            }
            return;
        }

        let node = self.build(entries, 0);
        let root_height = self.arena[self.root].height;
        let node_height = self.arena[node].height;
        log::debug!("bulk load of {n} items packed to height {node_height}");

        if self.arena[self.root].children.is_empty() {
            let old = core::mem::replace(&mut self.root, node);
            self.arena.release(old);
        } else if root_height == node_height {
            log::debug!("merging packed subtree as a sibling of the root at height {root_height}");
            self.split_root(self.root, node);
        } else {
            let (base, other) = if root_height < node_height {
                (node, self.root)
            } else {
                (self.root, node)
            };
            self.root = base;
            let level = self.arena[base].height - self.arena[other].height - 1;
            log::debug!("merging subtree of height {} at level {level}", self.arena[other].height);
            let bbox = self.arena[other].bbox;
            self.insert_child(Child::Node(other), bbox, level);
        }
        self.len += n;
    }

    /// Pack `entries` into a subtree; a `height` of 0 derives the height from the count.
    fn build(&mut self, mut entries: Vec<Entry<I, T>>, height: usize) -> NodeIdx {
        let n = entries.len();
        let mut m = self.params.max_entries();

        if n <= m {
            let children: Vec<Child<I, T>> = entries.into_iter().map(Child::Entry).collect();
            let bbox = self.arena.children_bbox(&children);
            let mut idx = self.arena.alloc(Node {
                bbox,
                height: 1,
                leaf: true,
                children,
            });
            // Keep every leaf at the same depth when a small group lands above height 1.
            for h in 2..=height {
                idx = self.arena.alloc(Node {
                    bbox,
                    height: h,
                    leaf: false,
                    children: vec![Child::Node(idx)],
                });
            }
            return idx;
        }

        let height = if height == 0 {
            let (h, capacity_below) = target_height(n, m);
            // Root fan-out that fills the levels below as evenly as possible.
            m = n.div_ceil(capacity_below);
            h
        } else {
            height
        };
        debug_assert!(height >= 2, "an overfull group must be packed above the leaves");

        let per_group = n.div_ceil(m);
        let per_slice = per_group * ceil_sqrt(m);

        multi_select(&mut entries, 0, n - 1, per_slice, &mut |a, b| {
            cmp_t(a.bbox.min_x, b.bbox.min_x)
        });

        let mut children = Vec::new();
        let mut rest = entries.into_iter();
        loop {
            let mut slice: Vec<Entry<I, T>> = rest.by_ref().take(per_slice).collect();
            if slice.is_empty() {
                break;
            }
            let last = slice.len() - 1;
            multi_select(&mut slice, 0, last, per_group, &mut |a, b| {
                cmp_t(a.bbox.min_y, b.bbox.min_y)
            });
            let mut groups = slice.into_iter();
            loop {
                let group: Vec<Entry<I, T>> = groups.by_ref().take(per_group).collect();
                if group.is_empty() {
                    break;
                }
                children.push(Child::Node(self.build(group, height - 1)));
            }
        }

        let bbox = self.arena.children_bbox(&children);
        self.arena.alloc(Node {
            bbox,
            height,
            leaf: false,
            children,
        })
    }
}

/// Smallest `h` with `m^h >= n`, together with `m^(h - 1)`.
fn target_height(n: usize, m: usize) -> (usize, usize) {
    let mut height = 1;
    let mut capacity = m;
    let mut below = 1;
    while capacity < n {
        height += 1;
        below = capacity;
        capacity = capacity.saturating_mul(m);
    }
    (height, below)
}

fn ceil_sqrt(m: usize) -> usize {
    let r = m.isqrt();
    if r * r < m { r + 1 } else { r }
}
