// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deriving bounding boxes from stored items.

use crate::types::{Aabb2D, Scalar};

/// Items that can report an axis-aligned bounding box.
///
/// The tree calls [`Bounded::bbox`] once when an item is inserted and keeps the
/// result next to the item. Returning `None` (or an inverted box) stores the item
/// without a box: it is counted, iterated and removable, but never reported by
/// [`RTree::search`](crate::RTree::search) or [`RTree::collides`](crate::RTree::collides).
pub trait Bounded<T: Scalar> {
    /// The item's bounding box, if it has one.
    fn bbox(&self) -> Option<Aabb2D<T>>;
}

impl<T: Scalar> Bounded<T> for Aabb2D<T> {
    fn bbox(&self) -> Option<Aabb2D<T>> {
        (!self.is_empty()).then_some(*self)
    }
}

/// A point `[x, y]`.
impl<T: Scalar> Bounded<T> for [T; 2] {
    fn bbox(&self) -> Option<Aabb2D<T>> {
        Some(Aabb2D::from_point(self[0], self[1]))
    }
}

/// A box paired with an arbitrary payload; only the box is used for indexing.
impl<T: Scalar, P> Bounded<T> for (Aabb2D<T>, P) {
    fn bbox(&self) -> Option<Aabb2D<T>> {
        self.0.bbox()
    }
}

impl<T: Scalar, B: Bounded<T> + ?Sized> Bounded<T> for &B {
    fn bbox(&self) -> Option<Aabb2D<T>> {
        (**self).bbox()
    }
}

#[cfg(feature = "kurbo")]
mod kurbo_impls {
    use kurbo::{BezPath, Circle, Ellipse, Line, Point, Rect, RoundedRect, Shape};

    use super::Bounded;
    use crate::types::Aabb2D;

    impl From<Rect> for Aabb2D<f64> {
        fn from(r: Rect) -> Self {
            // Kurbo rects may be built with swapped corners.
            let r = r.abs();
            Self::new(r.x0, r.y0, r.x1, r.y1)
        }
    }

    impl Bounded<f64> for Point {
        fn bbox(&self) -> Option<Aabb2D<f64>> {
            Some(Aabb2D::from_point(self.x, self.y))
        }
    }

    impl Bounded<f64> for BezPath {
        fn bbox(&self) -> Option<Aabb2D<f64>> {
            if self.elements().is_empty() {
                return None;
            }
            Some(self.bounding_box().into())
        }
    }

    macro_rules! bounded_via_shape {
        ($($ty:ty),* $(,)?) => {
            $(
                impl Bounded<f64> for $ty {
                    fn bbox(&self) -> Option<Aabb2D<f64>> {
                        Some(Shape::bounding_box(self).into())
                    }
                }
            )*
        };
    }

    bounded_via_shape!(Rect, RoundedRect, Line, Circle, Ellipse);
}
