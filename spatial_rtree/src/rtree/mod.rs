// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic R-tree generic over the stored item `I` and scalar `T: Scalar`.
//!
//! - `bulk`: OMT top-down packing and merging of batches into an existing tree.
//! - `insert`: enlargement-minimizing descent and R*-style axis/index splits.
//! - `remove`: iterative lookup followed by condensing the path to the root.
//! - `query`: box-intersection search and collision tests.
//! - `iter`: lazy depth-first traversal.
//!
//! Nodes live in an index-addressed arena without parent pointers; traversals carry
//! their own path stacks.

mod bulk;
mod insert;
mod iter;
mod node;
mod query;
mod remove;

use core::fmt::Debug;

use crate::bounded::Bounded;
use crate::error::Result;
use crate::params::Params;
use crate::types::{Aabb2D, Scalar};

pub use iter::Iter;
use node::{Arena, Node, NodeIdx};

/// A dynamic, bulk-loadable R-tree.
///
/// Items are any type implementing [`Bounded`]; their boxes are derived once on
/// insertion. The tree owns its items and hands out shared references from
/// [`search`](Self::search) and [`iter`](Self::iter).
///
/// ```
/// use spatial_rtree::{Aabb2D, RTree};
///
/// let mut tree: RTree<(Aabb2D<f64>, &str)> = RTree::new();
/// tree.insert((Aabb2D::new(0.0, 0.0, 1.0, 1.0), "a"));
/// tree.insert((Aabb2D::new(5.0, 5.0, 6.0, 6.0), "b"));
///
/// let hits = tree.search(&Aabb2D::new(0.5, 0.5, 2.0, 2.0));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].1, "a");
/// assert!(tree.remove(&(Aabb2D::new(0.0, 0.0, 1.0, 1.0), "a")));
/// assert_eq!(tree.len(), 1);
/// ```
pub struct RTree<I, T: Scalar = f64> {
    params: Params,
    root: NodeIdx,
    arena: Arena<I, T>,
    len: usize,
}

impl<I: Bounded<T>, T: Scalar> RTree<I, T> {
    /// Create an empty tree with the default capacity of 16 entries per node.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Create an empty tree with validated parameters.
    pub fn with_params(params: Params) -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::empty_leaf());
        Self {
            params,
            root,
            arena,
            len: 0,
        }
    }

    /// Create an empty tree holding at most `max_entries` children per node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaxEntriesTooSmall`](crate::Error::MaxEntriesTooSmall) if
    /// `max_entries < 4`.
    pub fn with_max_entries(max_entries: usize) -> Result<Self> {
        Ok(Self::with_params(Params::new(max_entries)?))
    }

    /// Create a tree and bulk-load `items` into it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaxEntriesTooSmall`](crate::Error::MaxEntriesTooSmall) if
    /// `max_entries < 4`; no items are consumed in that case.
    pub fn from_items(items: impl IntoIterator<Item = I>, max_entries: usize) -> Result<Self> {
        let mut tree = Self::with_max_entries(max_entries)?;
        tree.load(items);
        Ok(tree)
    }
}

impl<I, T: Scalar> RTree<I, T> {
    /// Drop every item and reset to an empty root.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.alloc(Node::empty_leaf());
        self.len = 0;
    }

    /// The capacity parameters this tree was built with.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.arena[self.root].children.is_empty()
    }

    /// Height of the root; 1 while all items fit in a single node.
    pub fn height(&self) -> usize {
        self.arena[self.root].height
    }

    /// Bounding box of everything stored, or `None` if no stored item has a box.
    pub fn bbox(&self) -> Option<Aabb2D<T>> {
        let bbox = self.arena[self.root].bbox;
        (!bbox.is_empty()).then_some(bbox)
    }

    /// Lazily iterate over all stored items in depth-first order.
    pub fn iter(&self) -> Iter<'_, I, T> {
        Iter::new(&self.arena, self.root)
    }
}

impl<I: Bounded<T>, T: Scalar> Default for RTree<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Bounded<T>, T: Scalar> FromIterator<I> for RTree<I, T> {
    fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
        let mut tree = Self::new();
        tree.load(iter);
        tree
    }
}

impl<I: Bounded<T>, T: Scalar> Extend<I> for RTree<I, T> {
    fn extend<It: IntoIterator<Item = I>>(&mut self, iter: It) {
        self.load(iter);
    }
}

impl<'a, I, T: Scalar> IntoIterator for &'a RTree<I, T> {
    type Item = &'a I;
    type IntoIter = Iter<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, T: Scalar> Debug for RTree<I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.params.max_entries())
            .field("min_entries", &self.params.min_entries())
            .field("len", &self.len)
            .field("height", &self.height())
            .field("arena_nodes", &self.arena.live())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases.
/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64<I> = RTree<I, i64>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32<I> = RTree<I, f32>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64<I> = RTree<I, f64>;

#[cfg(test)]
impl<I, T: Scalar> RTree<I, T> {
    /// Walk the whole tree and panic on any broken structural invariant.
    ///
    /// Checks box unions, heights, leaf flags, fan-out upper bounds and the item count.
    /// With `full_nodes`, also checks that non-root nodes hold at least `min_entries`
    /// children. Only pass `true` for trees built purely by [`insert`](Self::insert):
    /// bulk packing leaves a short last group per slice, and removal never refills
    /// nodes, so both may legitimately go below the minimum.
    pub(crate) fn assert_invariants(&self, full_nodes: bool) {
        use alloc::vec;

        let max = self.params.max_entries();
        let min = self.params.min_entries();
        let mut items = 0;
        let mut stack = vec![(self.root, true)];
        while let Some((idx, is_root)) = stack.pop() {
            let node = &self.arena[idx];
            let expected = self.arena.children_bbox(&node.children);
            assert_eq!(node.bbox, expected, "cached bbox differs from union of children");
            assert!(node.children.len() <= max, "node exceeds max_entries");
            if !is_root {
                assert!(!node.children.is_empty(), "non-root node without children");
                if full_nodes {
                    assert!(node.children.len() >= min, "non-root node below min_entries");
                }
            }
            assert_eq!(node.leaf, node.height == 1, "leaf flag disagrees with height");
            for child in &node.children {
                match (child.node(), node.leaf) {
                    (None, true) => items += 1,
                    (Some(c), false) => {
                        assert_eq!(
                            self.arena[c].height + 1,
                            node.height,
                            "child height must be one less than its parent's"
                        );
                        stack.push((c, false));
                    }
                    _ => panic!("node mixes entries and child nodes"),
                }
            }
        }
        assert_eq!(items, self.len, "item count differs from the size counter");
    }
}

/// 48 points spread over `0..=95` on both axes, tagged with their index.
#[cfg(test)]
#[rustfmt::skip]
pub(crate) fn fixture_points() -> alloc::vec::Vec<(Aabb2D<f64>, u32)> {
    const POINTS: [(f64, f64); 48] = [
        (0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (25.0, 0.0), (35.0, 10.0), (45.0, 20.0),
        (0.0, 25.0), (10.0, 35.0), (20.0, 45.0), (25.0, 25.0), (35.0, 35.0), (45.0, 45.0),
        (50.0, 0.0), (60.0, 10.0), (70.0, 20.0), (75.0, 0.0), (85.0, 10.0), (95.0, 20.0),
        (50.0, 25.0), (60.0, 35.0), (70.0, 45.0), (75.0, 25.0), (85.0, 35.0), (95.0, 45.0),
        (0.0, 50.0), (10.0, 60.0), (20.0, 70.0), (25.0, 50.0), (35.0, 60.0), (45.0, 70.0),
        (0.0, 75.0), (10.0, 85.0), (20.0, 95.0), (25.0, 75.0), (35.0, 85.0), (45.0, 95.0),
        (50.0, 50.0), (60.0, 60.0), (70.0, 70.0), (75.0, 50.0), (85.0, 60.0), (95.0, 70.0),
        (50.0, 75.0), (60.0, 85.0), (70.0, 95.0), (75.0, 75.0), (85.0, 85.0), (95.0, 95.0),
    ];
    (0_u32..)
        .zip(POINTS)
        .map(|(id, (x, y))| (Aabb2D::from_point(x, y), id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::vec::Vec;

    type Item = (Aabb2D<f64>, u32);

    fn pt(x: f64, y: f64, id: u32) -> Item {
        (Aabb2D::from_point(x, y), id)
    }

    #[test]
    fn new_tree_is_empty() {
        let tree: RTree<Item> = RTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.bbox(), None);
        assert_eq!(tree.iter().count(), 0);
        tree.assert_invariants(true);
    }

    #[test]
    fn rejects_small_max_entries() {
        assert_eq!(
            RTree::<Item>::with_max_entries(3).map(|_| ()),
            Err(Error::MaxEntriesTooSmall(3))
        );
        let err = RTree::<Item>::from_items([pt(0.0, 0.0, 0)], 2).map(|t| t.len());
        assert_eq!(err, Err(Error::MaxEntriesTooSmall(2)));
    }

    #[test]
    fn clear_resets_to_fresh_state() {
        let mut tree: RTree<Item> = (0..50).map(|i| pt(f64::from(i), 0.0, i)).collect();
        assert_eq!(tree.len(), 50);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.arena.live(), 1);
        tree.assert_invariants(true);
        tree.insert(pt(1.0, 1.0, 1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn extend_and_into_iterator() {
        let mut tree: RTree<Item> = RTree::new();
        tree.extend((0..20).map(|i| pt(f64::from(i), f64::from(i), i)));
        let mut ids: Vec<u32> = (&tree).into_iter().map(|it| it.1).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
        assert_eq!(tree.bbox(), Some(Aabb2D::new(0.0, 0.0, 19.0, 19.0)));
    }

    #[test]
    fn debug_is_concise() {
        let tree: RTree<Item> = RTree::new();
        let s = alloc::format!("{tree:?}");
        assert!(s.starts_with("RTree {"));
        assert!(s.contains("max_entries: 16"));
    }
}
