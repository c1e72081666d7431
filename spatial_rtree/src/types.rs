// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding box type, scalar abstraction and box metrics.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// `min_x`/`min_y`/`max_x`/`max_y` correspond to west/south/east/north for
/// geographic data. Degenerate boxes (`min == max` on an axis, e.g. a point)
/// are valid and intersect anything that touches them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (west)
    pub min_x: T,
    /// Minimum y (south)
    pub min_y: T,
    /// Maximum x (east)
    pub max_x: T,
    /// Maximum y (north)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A degenerate box covering a single point.
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Return true if the AABB is inverted (no extent on some axis). Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }

    /// Whether the two boxes share at least one point (edges inclusive).
    pub fn intersects(&self, other: &Self) -> bool {
        le(other.min_x, self.max_x)
            && le(other.min_y, self.max_y)
            && le(self.min_x, other.max_x)
            && le(self.min_y, other.max_y)
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// The smallest box covering both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// The inverted box used as the identity of [`Aabb2D::union`].
    ///
    /// It intersects nothing and reports [`is_empty`](Self::is_empty).
    pub fn empty() -> Self {
        Self::new(T::highest(), T::highest(), T::lowest(), T::lowest())
    }

    /// Create an AABB from origin and size.
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self::new(x, y, T::add(x, w), T::add(y, h))
    }
}

/// Numeric scalar abstraction for 2D AABBs.
///
/// Box metrics (area, margin, overlap) are computed in a widened accumulator
/// type (f32→f64, f64→f64, i64→i128) so split and descent decisions compare
/// robustly.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type for area/margin computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Smallest representable coordinate (negative infinity for floats).
    fn lowest() -> Self;

    /// Largest representable coordinate (positive infinity for floats).
    fn highest() -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::MIN
    }

    #[inline]
    fn highest() -> Self {
        Self::MAX
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }
}

#[inline]
fn extent<T: Scalar>(lo: T, hi: T) -> T::Acc {
    T::widen(T::max_zero(T::sub(hi, lo)))
}

/// Area of an AABB in the widened accumulator type. Inverted boxes have zero area.
#[inline]
pub fn area<T: Scalar>(a: &Aabb2D<T>) -> T::Acc {
    extent(a.min_x, a.max_x) * extent(a.min_y, a.max_y)
}

/// Margin of an AABB: width plus height (half the perimeter).
#[inline]
pub fn margin<T: Scalar>(a: &Aabb2D<T>) -> T::Acc {
    extent(a.min_x, a.max_x) + extent(a.min_y, a.max_y)
}

/// Area of the overlap of two AABBs; zero when they are disjoint.
#[inline]
pub fn intersection_area<T: Scalar>(a: &Aabb2D<T>, b: &Aabb2D<T>) -> T::Acc {
    let min_x = max_t(a.min_x, b.min_x);
    let min_y = max_t(a.min_y, b.min_y);
    let max_x = min_t(a.max_x, b.max_x);
    let max_y = min_t(a.max_y, b.max_y);
    extent(min_x, max_x) * extent(min_y, max_y)
}

/// Area of the union of two AABBs.
#[inline]
pub fn enlarged_area<T: Scalar>(a: &Aabb2D<T>, b: &Aabb2D<T>) -> T::Acc {
    area(&a.union(b))
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Total order on coordinates for selection and sorting; incomparable values tie.
#[inline]
pub(crate) fn cmp_t<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_intersect() {
        let a = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&Aabb2D::new(10.5, 0.0, 11.0, 1.0)));
    }

    #[test]
    fn point_boxes_are_valid() {
        let p = Aabb2D::from_point(3_i64, 4);
        assert!(!p.is_empty());
        assert!(Aabb2D::new(0, 0, 5, 5).contains(&p));
        assert!(p.intersects(&p));
        assert_eq!(area(&p), 0);
        assert_eq!(margin(&p), 0);
    }

    #[test]
    fn empty_is_union_identity() {
        let e = Aabb2D::<f64>::empty();
        let a = Aabb2D::new(1.0, 2.0, 3.0, 4.0);
        assert!(e.is_empty());
        assert_eq!(e.union(&a), a);
        assert_eq!(a.union(&e), a);
        assert!(!e.intersects(&a));
        assert_eq!(area(&e), 0.0);
    }

    #[test]
    fn metrics_use_widened_accumulators() {
        let a = Aabb2D::new(0_i64, 0, i64::MAX / 2, 4);
        assert_eq!(area(&a), (i64::MAX / 2) as i128 * 4);

        let b = Aabb2D::new(0.0_f32, 0.0, 2.0, 3.0);
        assert_eq!(margin(&b), 5.0_f64);
    }

    #[test]
    fn overlap_and_enlargement() {
        let a = Aabb2D::new(0.0, 0.0, 4.0, 4.0);
        let b = Aabb2D::new(2.0, 2.0, 6.0, 6.0);
        assert_eq!(intersection_area(&a, &b), 4.0);
        assert_eq!(intersection_area(&a, &Aabb2D::new(5.0, 5.0, 6.0, 6.0)), 0.0);
        assert_eq!(enlarged_area(&a, &b), 36.0);
    }

    #[test]
    fn from_xywh_and_contains() {
        let r = Aabb2D::<f64>::from_xywh(1.0, 1.0, 2.0, 3.0);
        assert_eq!(r, Aabb2D::new(1.0, 1.0, 3.0, 4.0));
        assert!(r.contains(&Aabb2D::from_point(3.0, 4.0)));
        assert!(!r.contains(&Aabb2D::from_point(0.5, 2.0)));
    }
}
