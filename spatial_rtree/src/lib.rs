// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=spatial_rtree --heading-base-level=0

//! Spatial R-tree: a dynamic, bulk-loadable 2D R-tree.
//!
//! Spatial R-tree indexes any item that can report an axis-aligned bounding box and answers
//! "which items intersect this box?" without scanning everything.
//!
//! - Insert items one at a time, or bulk-load batches with OMT (overlap-minimizing top-down)
//!   packing, which is several times faster and yields better-shaped nodes.
//! - Bulk-load into a non-empty tree; the packed batch is merged in at the right level.
//! - Remove items by equality (or a custom match), query by intersecting box, or just ask
//!   whether anything collides.
//!
//! It is generic over the scalar type `T` ([`f32`], [`f64`] or [`i64`]); box metrics used for
//! splitting are computed in widened accumulators (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use spatial_rtree::{Aabb2D, RTree};
//!
//! // Bulk-load a grid of labelled points.
//! let points = (0..100).map(|i| (Aabb2D::from_point(f64::from(i % 10), f64::from(i / 10)), i));
//! let mut tree: RTree<(Aabb2D<f64>, i32)> = RTree::from_items(points, 16).unwrap();
//! assert_eq!(tree.len(), 100);
//!
//! // Everything in the lower-left 3x3 block.
//! let hits = tree.search(&Aabb2D::new(0.0, 0.0, 2.0, 2.0));
//! assert_eq!(hits.len(), 9);
//! assert!(!tree.collides(&Aabb2D::new(1.5, 1.5, 1.6, 1.6)));
//!
//! // Single insertion and removal.
//! tree.insert((Aabb2D::new(20.0, 20.0, 21.0, 21.0), 100));
//! assert!(tree.remove(&(Aabb2D::from_point(0.0, 0.0), 0)));
//! assert_eq!(tree.len(), 100);
//! ```
//!
//! Items are anything implementing [`Bounded`]. Implementations are provided for
//! [`Aabb2D`], `[T; 2]` points and `(Aabb2D<T>, P)` pairs carrying a payload; with the
//! `kurbo` feature, Kurbo shapes can be stored directly.
//!
//! ## Choosing `max_entries`
//!
//! The node capacity defaults to 16. Larger values make bulk loading and insertion faster
//! and searches slower; values below 4 are rejected with [`Error::MaxEntriesTooSmall`].
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Items that report no box, or
//! an inverted one, are stored and counted but never match a search.

#![no_std]

extern crate alloc;

pub mod bounded;
pub mod error;
pub mod params;
mod rtree;
pub mod select;
pub mod types;

pub use bounded::Bounded;
pub use error::{Error, Result};
pub use params::Params;
pub use rtree::{Iter, RTree, RTreeF32, RTreeF64, RTreeI64};
pub use select::{multi_select, quick_select};
pub use types::{Aabb2D, Scalar, ScalarAcc, area, enlarged_area, intersection_area, margin};
