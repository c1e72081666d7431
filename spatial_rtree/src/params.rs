// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node capacity configuration.

use crate::error::{Error, Result};

/// Node fan-out limits, fixed for the lifetime of a tree.
///
/// Larger capacities make loading and insertion faster and searches slower; the
/// default of 16 is a good balance for most data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    max_entries: usize,
    min_entries: usize,
}

impl Params {
    /// Default maximum number of children per node.
    pub const DEFAULT_MAX_ENTRIES: usize = 16;

    /// Smallest accepted value for `max_entries`.
    pub const MIN_MAX_ENTRIES: usize = 4;

    /// Validate `max_entries` and derive the minimum fill,
    /// `max(2, ceil(0.4 * max_entries))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaxEntriesTooSmall`] if `max_entries < 4`.
    pub fn new(max_entries: usize) -> Result<Self> {
        if max_entries < Self::MIN_MAX_ENTRIES {
            return Err(Error::MaxEntriesTooSmall(max_entries));
        }
        Ok(Self::derived(max_entries))
    }

    /// `max_entries` must already be validated.
    const fn derived(max_entries: usize) -> Self {
        let min_entries = (max_entries * 2).div_ceil(5);
        Self {
            max_entries,
            min_entries: if min_entries < 2 { 2 } else { min_entries },
        }
    }

    /// Maximum number of children per node.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum number of children a split leaves in each half.
    pub const fn min_entries(&self) -> usize {
        self.min_entries
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::derived(Self::DEFAULT_MAX_ENTRIES)
    }
}
