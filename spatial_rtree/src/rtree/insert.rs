// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single insertion and overflow splitting.

use alloc::vec;
use alloc::vec::Vec;

use super::RTree;
use super::node::{Child, Entry, Node, NodeIdx};
use crate::bounded::Bounded;
use crate::types::{
    Aabb2D, Scalar, ScalarAcc, area, cmp_t, enlarged_area, intersection_area, lt, margin, min_t,
};

impl<I: Bounded<T>, T: Scalar> RTree<I, T> {
    /// Insert one item.
    ///
    /// The item's box is computed once here and cached. Items without a valid box are
    /// stored (and counted) but never match a search.
    pub fn insert(&mut self, item: I) {
        self.insert_entry(Entry::new(item));
    }
}

impl<I, T: Scalar> RTree<I, T> {
    pub(super) fn insert_entry(&mut self, entry: Entry<I, T>) {
        let bbox = entry.bbox;
        let level = self.arena[self.root].height - 1;
        self.insert_child(Child::Entry(entry), bbox, level);
        self.len += 1;
    }

    /// Attach `child` to a node at depth `level` (the root is level 0), splitting on overflow.
    pub(super) fn insert_child(&mut self, child: Child<I, T>, bbox: Aabb2D<T>, level: usize) {
        let path = self.choose_subtree(&bbox, level);
        let Some(&target) = path.last() else {
            return;
        };
        let node = &mut self.arena[target];
        node.children.push(child);
        node.bbox = node.bbox.union(&bbox);

        let max = self.params.max_entries();
        let mut level = Some(path.len() - 1);
        while let Some(l) = level {
            if self.arena[path[l]].children.len() <= max {
                break;
            }
            self.split(&path, l);
            level = l.checked_sub(1);
        }

        // Ancestors above the last split only need to grow.
        if let Some(l) = level {
            for &idx in &path[..=l] {
                let node = &mut self.arena[idx];
                node.bbox = node.bbox.union(&bbox);
            }
        }
    }

    /// Descend from the root toward the node at depth `level` needing the least enlargement.
    ///
    /// Returns the visited path, root first.
    fn choose_subtree(&self, bbox: &Aabb2D<T>, level: usize) -> Vec<NodeIdx> {
        let mut path = Vec::new();
        let mut idx = self.root;
        loop {
            path.push(idx);
            let node = &self.arena[idx];
            if node.leaf || path.len() - 1 == level {
                break;
            }

            // (enlargement, smallest area seen, child)
            let mut best: Option<(ScalarAcc<T>, ScalarAcc<T>, NodeIdx)> = None;
            for c in node.children.iter().filter_map(Child::node) {
                let cb = self.arena[c].bbox;
                let a = area(&cb);
                let enlargement = enlarged_area(bbox, &cb) - a;
                best = match best {
                    None => Some((enlargement, a, c)),
                    Some((e, min_area, _)) if lt(enlargement, e) => {
                        Some((enlargement, min_t(a, min_area), c))
                    }
                    Some((e, min_area, _)) if enlargement == e && lt(a, min_area) => {
                        Some((e, a, c))
                    }
                    keep => keep,
                };
            }
            match best {
                Some((_, _, c)) => idx = c,
                None => break,
            }
        }
        path
    }

    /// Split the overfull node `path[level]` into two, pushing the new sibling to its parent.
    fn split(&mut self, path: &[NodeIdx], level: usize) {
        let idx = path[level];
        let min = self.params.min_entries();
        let mut children = core::mem::take(&mut self.arena[idx].children);
        let total = children.len();

        self.choose_split_axis(&mut children, min, total);
        let at = self.choose_split_index(&children, min, total);
        let tail = children.split_off(at);

        let (height, leaf) = (self.arena[idx].height, self.arena[idx].leaf);
        let head_bbox = self.arena.children_bbox(&children);
        let tail_bbox = self.arena.children_bbox(&tail);
        let node = &mut self.arena[idx];
        node.children = children;
        node.bbox = head_bbox;
        let sibling = self.arena.alloc(Node {
            bbox: tail_bbox,
            height,
            leaf,
            children: tail,
        });
        log::trace!("split node at level {level}: {at} + {} children", total - at);

        if level > 0 {
            self.arena[path[level - 1]].children.push(Child::Node(sibling));
        } else {
            self.split_root(idx, sibling);
        }
    }

    /// Replace the root with a new node holding `a` and `b`, which must share a height.
    pub(super) fn split_root(&mut self, a: NodeIdx, b: NodeIdx) {
        let height = self.arena[a].height + 1;
        let bbox = self.arena[a].bbox.union(&self.arena[b].bbox);
        self.root = self.arena.alloc(Node {
            bbox,
            height,
            leaf: false,
            children: vec![Child::Node(a), Child::Node(b)],
        });
        log::trace!("root split, height now {height}");
    }

    /// Sort `children` along the axis whose candidate distributions have the least margin.
    fn choose_split_axis(&self, children: &mut [Child<I, T>], min: usize, total: usize) {
        let by_x = |a: &Child<I, T>, b: &Child<I, T>| {
            cmp_t(self.arena.child_bbox(a).min_x, self.arena.child_bbox(b).min_x)
        };
        let by_y = |a: &Child<I, T>, b: &Child<I, T>| {
            cmp_t(self.arena.child_bbox(a).min_y, self.arena.child_bbox(b).min_y)
        };

        children.sort_by(by_x);
        let x_margin = self.all_dist_margin(children, min, total);
        children.sort_by(by_y);
        let y_margin = self.all_dist_margin(children, min, total);

        if lt(x_margin, y_margin) {
            children.sort_by(by_x);
        }
    }

    /// Total margin of every split of `children` (in their current order) into a prefix
    /// and suffix of at least `min` each.
    fn all_dist_margin(&self, children: &[Child<I, T>], min: usize, total: usize) -> ScalarAcc<T> {
        let mut left = self.arena.span_bbox(children, 0, min);
        let mut right = self.arena.span_bbox(children, total - min, total);
        let mut sum = margin(&left) + margin(&right);

        for child in &children[min..total - min] {
            left = left.union(&self.arena.child_bbox(child));
            sum = sum + margin(&left);
        }
        for child in children[min..total - min].iter().rev() {
            right = right.union(&self.arena.child_bbox(child));
            sum = sum + margin(&right);
        }
        sum
    }

    /// Split position minimizing overlap between the halves, then their total area.
    fn choose_split_index(&self, children: &[Child<I, T>], min: usize, total: usize) -> usize {
        // (overlap, smallest area seen, index)
        let mut best: Option<(ScalarAcc<T>, ScalarAcc<T>, usize)> = None;
        for i in min..=total - min {
            let head = self.arena.span_bbox(children, 0, i);
            let tail = self.arena.span_bbox(children, i, total);
            let overlap = intersection_area(&head, &tail);
            let a = area(&head) + area(&tail);
            best = match best {
                None => Some((overlap, a, i)),
                Some((o, min_area, _)) if lt(overlap, o) => Some((overlap, min_t(a, min_area), i)),
                Some((o, min_area, _)) if overlap == o && lt(a, min_area) => Some((o, a, i)),
                keep => keep,
            };
        }
        best.map_or(total - min, |(_, _, i)| i)
    }
}
