// Copyright 2025 the Spatial R-tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree construction.

use thiserror::Error;

/// Errors reported when configuring an [`RTree`](crate::RTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The node capacity is below the minimum of 4 entries.
    #[error("max_entries must be 4 or greater, got {0}")]
    MaxEntriesTooSmall(usize),
}

/// Result type for fallible tree operations.
pub type Result<T> = core::result::Result<T, Error>;
