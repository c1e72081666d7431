// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box queries.

use alloc::vec;
use alloc::vec::Vec;

use super::RTree;
use super::node::{Child, NodeIdx, item_bbox};
use crate::bounded::Bounded;
use crate::types::{Aabb2D, Scalar};

impl<I, T: Scalar> RTree<I, T> {
    /// All items whose boxes intersect `query`, edges inclusive.
    ///
    /// Subtrees lying entirely inside `query` are collected without further box tests.
    /// The order of results is unspecified.
    pub fn search(&self, query: &Aabb2D<T>) -> Vec<&I> {
        let mut result = Vec::new();
        if !query.intersects(&self.arena[self.root].bbox) {
            return result;
        }

        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            for child in &self.arena[idx].children {
                match child {
                    Child::Entry(entry) => {
                        if query.intersects(&entry.bbox) {
                            result.push(&entry.item);
                        }
                    }
                    Child::Node(c) => {
                        let cb = self.arena[*c].bbox;
                        if !query.intersects(&cb) {
                            continue;
                        }
                        if query.contains(&cb) {
                            self.collect_all(*c, &mut result);
                        } else {
                            stack.push(*c);
                        }
                    }
                }
            }
        }
        result
    }

    /// Whether any item's box intersects `query`.
    ///
    /// Cheaper than checking [`search`](Self::search) for emptiness; it returns on the first hit.
    pub fn collides(&self, query: &Aabb2D<T>) -> bool {
        if !query.intersects(&self.arena[self.root].bbox) {
            return false;
        }

        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx];
            for child in &node.children {
                let cb = self.arena.child_bbox(child);
                if !query.intersects(&cb) {
                    continue;
                }
                // A node box is only non-empty if some entry below it has a box.
                if node.leaf || query.contains(&cb) {
                    return true;
                }
                if let Some(c) = child.node() {
                    stack.push(c);
                }
            }
        }
        false
    }

    /// Push every boxed item under `idx`.
    fn collect_all<'a>(&'a self, idx: NodeIdx, result: &mut Vec<&'a I>) {
        let mut stack = vec![idx];
        while let Some(idx) = stack.pop() {
            for child in &self.arena[idx].children {
                match child {
                    Child::Entry(entry) if !entry.bbox.is_empty() => result.push(&entry.item),
                    Child::Entry(_) => {}
                    Child::Node(c) => stack.push(*c),
                }
            }
        }
    }
}

impl<I: Bounded<T> + PartialEq, T: Scalar> RTree<I, T> {
    /// Whether an item equal to `item` is stored.
    ///
    /// Only items sharing `item`'s box are compared. Items without a box are looked
    /// up by a full scan.
    pub fn contains(&self, item: &I) -> bool {
        let bbox = item_bbox(item);
        if bbox.is_empty() {
            return self.iter().any(|stored| stored == item);
        }
        self.search(&bbox).into_iter().any(|stored| stored == item)
    }

    /// Whether every item of `items` is stored.
    pub fn contains_all<'a>(&self, items: impl IntoIterator<Item = &'a I>) -> bool
    where
        I: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }
}
