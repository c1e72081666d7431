// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial ordering helpers used by the bulk loader.
//!
//! Both functions work on inclusive index ranges `left..=right` of a slice and only
//! establish as much order as the caller needs:
//!
//! - [`quick_select`] places the `k`-th smallest element at index `k`, with everything
//!   before it comparing `<=` and everything after it comparing `>=`.
//! - [`multi_select`] repeats that at bucket boundaries so every run of `n` elements is
//!   ordered relative to the other runs, without ordering elements inside a run.
//!
//! Ranges wider than 600 elements are first narrowed with a Floyd–Rivest sampling step,
//! which keeps the expected cost linear.

use alloc::vec;
use core::cmp::Ordering;

/// Width above which [`quick_select`] narrows the range by sampling first.
const SAMPLING_THRESHOLD: usize = 600;

/// Reorder `arr[left..=right]` so the element at `k` is the one a full sort would put there.
///
/// # Panics
///
/// Panics if `right` is out of bounds for `arr`, or `k` lies outside `left..=right`.
pub fn quick_select<T, F>(arr: &mut [T], k: usize, left: usize, right: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(
        left <= k && k <= right && right < arr.len(),
        "select index {k} must lie in {left}..={right} within a slice of {}",
        arr.len()
    );
    select_range(arr, k, left, right, compare);
}

fn select_range<T, F>(arr: &mut [T], k: usize, mut left: usize, mut right: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while right > left {
        if right - left > SAMPLING_THRESHOLD {
            let (new_left, new_right) = sample_bounds(k, left, right);
            select_range(arr, k, new_left, new_right, compare);
        }

        // The pivot value moves as elements are swapped; `p` tracks where it currently is.
        let mut p = k;
        let mut i = left;
        let mut j = right;

        swap_tracked(arr, left, k, &mut p);
        if compare(&arr[right], &arr[p]) == Ordering::Greater {
            swap_tracked(arr, left, right, &mut p);
        }

        while i < j {
            swap_tracked(arr, i, j, &mut p);
            i += 1;
            j -= 1;
            while compare(&arr[i], &arr[p]) == Ordering::Less {
                i += 1;
            }
            while compare(&arr[j], &arr[p]) == Ordering::Greater {
                j -= 1;
            }
        }

        if compare(&arr[left], &arr[p]) == Ordering::Equal {
            swap_tracked(arr, left, j, &mut p);
        } else {
            j += 1;
            swap_tracked(arr, j, right, &mut p);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            if j == 0 {
                break;
            }
            right = j - 1;
        }
    }
}

/// Floyd–Rivest window around `k` that contains the answer with high probability.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Sample bounds are clamped to the current range, which already fits in usize."
)]
fn sample_bounds(k: usize, left: usize, right: usize) -> (usize, usize) {
    let n = (right - left + 1) as f64;
    let m = (k - left + 1) as f64;
    let z = libm::log(n);
    let s = 0.5 * libm::exp(2.0 * z / 3.0);
    let sign = if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 };
    let sd = 0.5 * libm::sqrt(z * s * (n - s) / n) * sign;
    let k = k as f64;
    // Float-to-int `as` saturates, so a negative lower bound becomes 0 before clamping.
    let new_left = (libm::floor(k - m * s / n + sd) as usize).max(left);
    let new_right = (libm::floor(k + (n - m) * s / n + sd) as usize).min(right);
    (new_left, new_right)
}

#[inline]
fn swap_tracked<T>(arr: &mut [T], a: usize, b: usize, p: &mut usize) {
    arr.swap(a, b);
    if *p == a {
        *p = b;
    } else if *p == b {
        *p = a;
    }
}

/// Partially order `arr[left..=right]` into runs of `n` elements.
///
/// Afterwards, for consecutive runs starting at `left`, every element of a run compares
/// `<=` every element of any later run. Order inside a run is unspecified.
///
/// # Panics
///
/// Panics if `n` is zero or `right` is out of bounds for a non-empty range.
pub fn multi_select<T, F>(arr: &mut [T], left: usize, right: usize, n: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    assert!(n > 0, "multi_select bucket size must be positive");
    let mut stack = vec![(left, right)];

    while let Some((left, right)) = stack.pop() {
        // A range of at most `n` elements is a single bucket.
        if right < left || right - left < n {
            continue;
        }

        // Always a bucket boundary strictly inside the range.
        let mid = left + (right - left).div_ceil(2 * n) * n;
        quick_select(arr, mid, left, right, compare);

        stack.push((left, mid - 1));
        stack.push((mid, right));
    }
}
