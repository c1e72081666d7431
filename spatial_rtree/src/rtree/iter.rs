// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;

use super::node::{Arena, Child, NodeIdx};
use crate::types::Scalar;

/// Lazy depth-first iterator over the items of an [`RTree`](crate::RTree).
///
/// Created by [`RTree::iter`](crate::RTree::iter). Each call produces a fresh
/// traversal; the tree cannot be mutated while one is alive.
pub struct Iter<'a, I, T> {
    arena: &'a Arena<I, T>,
    // (node, index of the next child to visit)
    stack: Vec<(NodeIdx, usize)>,
}

impl<'a, I, T: Scalar> Iter<'a, I, T> {
    pub(super) fn new(arena: &'a Arena<I, T>, root: NodeIdx) -> Self {
        let mut stack = Vec::new();
        if !arena[root].children.is_empty() {
            stack.push((root, 0));
        }
        Self { arena, stack }
    }
}

impl<'a, I, T: Scalar> Iterator for Iter<'a, I, T> {
    type Item = &'a I;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, pos)) = self.stack.pop() {
            let node = &self.arena[idx];
            let Some(child) = node.children.get(pos) else {
                continue;
            };
            self.stack.push((idx, pos + 1));
            match child {
                Child::Entry(entry) => return Some(&entry.item),
                Child::Node(c) => self.stack.push((*c, 0)),
            }
        }
        None
    }
}

impl<I, T> Debug for Iter<'_, I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}
