// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena nodes and their children.

use alloc::vec::Vec;

use crate::bounded::Bounded;
use crate::types::{Aabb2D, Scalar};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A stored item together with the box derived for it at insertion.
pub(crate) struct Entry<I, T> {
    pub(crate) item: I,
    pub(crate) bbox: Aabb2D<T>,
}

impl<I, T: Scalar> Entry<I, T> {
    pub(crate) fn new(item: I) -> Self
    where
        I: Bounded<T>,
    {
        let bbox = item_bbox(&item);
        Self { item, bbox }
    }
}

/// The box an item is stored under; the empty box if it has no valid one.
pub(crate) fn item_bbox<I: Bounded<T>, T: Scalar>(item: &I) -> Aabb2D<T> {
    item.bbox()
        .filter(|b| !b.is_empty())
        .unwrap_or_else(Aabb2D::empty)
}

pub(crate) enum Child<I, T> {
    Node(NodeIdx),
    Entry(Entry<I, T>),
}

impl<I, T> Child<I, T> {
    pub(crate) fn node(&self) -> Option<NodeIdx> {
        match self {
            Self::Node(idx) => Some(*idx),
            Self::Entry(_) => None,
        }
    }
}

/// `leaf` is true iff `children` are entries; leaf-holding nodes have height 1.
pub(crate) struct Node<I, T> {
    pub(crate) bbox: Aabb2D<T>,
    pub(crate) height: usize,
    pub(crate) leaf: bool,
    pub(crate) children: Vec<Child<I, T>>,
}

impl<I, T: Scalar> Node<I, T> {
    pub(crate) fn empty_leaf() -> Self {
        Self {
            bbox: Aabb2D::empty(),
            height: 1,
            leaf: true,
            children: Vec::new(),
        }
    }
}

/// Node storage addressed by [`NodeIdx`]; released slots are recycled.
pub(crate) struct Arena<I, T> {
    nodes: Vec<Node<I, T>>,
    free: Vec<NodeIdx>,
}

impl<I, T: Scalar> Arena<I, T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<I, T>) -> NodeIdx {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx.get()] = node;
            idx
        } else {
            self.nodes.push(node);
            NodeIdx::new(self.nodes.len() - 1)
        }
    }

    /// Return a detached node's slot to the free list.
    pub(crate) fn release(&mut self, idx: NodeIdx) {
        let node = &mut self.nodes[idx.get()];
        node.children.clear();
        node.bbox = Aabb2D::empty();
        self.free.push(idx);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    /// Slots in use (allocated and not released).
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub(crate) fn child_bbox(&self, child: &Child<I, T>) -> Aabb2D<T> {
        match child {
            Child::Node(idx) => self[*idx].bbox,
            Child::Entry(entry) => entry.bbox,
        }
    }

    /// Union of the children's boxes; the empty box for no children.
    pub(crate) fn children_bbox(&self, children: &[Child<I, T>]) -> Aabb2D<T> {
        self.span_bbox(children, 0, children.len())
    }

    /// Union of the boxes of `children[from..to]`.
    pub(crate) fn span_bbox(&self, children: &[Child<I, T>], from: usize, to: usize) -> Aabb2D<T> {
        children[from..to]
            .iter()
            .fold(Aabb2D::empty(), |acc, c| acc.union(&self.child_bbox(c)))
    }

    pub(crate) fn recompute_bbox(&mut self, idx: NodeIdx) {
        let bbox = self.children_bbox(&self[idx].children);
        self[idx].bbox = bbox;
    }
}

impl<I, T> core::ops::Index<NodeIdx> for Arena<I, T> {
    type Output = Node<I, T>;

    fn index(&self, idx: NodeIdx) -> &Self::Output {
        &self.nodes[idx.get()]
    }
}

impl<I, T> core::ops::IndexMut<NodeIdx> for Arena<I, T> {
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Self::Output {
        &mut self.nodes[idx.get()]
    }
}
