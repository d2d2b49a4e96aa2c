// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision limits for [`QuadTree`](crate::QuadTree).

use crate::error::QuadTreeError;

/// Limits that bound how far the tree may subdivide.
///
/// Two distinct points that are very close together force a cascade of splits
/// until they land in different cells. These limits turn an arbitrarily deep
/// cascade into a [`QuadTreeError::DegenerateSplit`] instead.
/// Splitting also stops on its own once a cell is too small for its midpoint to be
/// representable, whatever the limits say.
///
/// ```
/// use understory_quadtree::QuadTreeConfig;
///
/// let config = QuadTreeConfig::default()
///     .with_max_depth(12)
///     .with_min_cell_size(0.5);
/// assert_eq!(config.max_depth, 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// Deepest allowed node depth. The root has depth `0`; must be at least `1`.
    pub max_depth: u32,
    /// Smallest allowed child width or height. A split that would produce a smaller
    /// cell is refused. `0.0` leaves only float resolution as the limit.
    pub min_cell_size: f64,
}

impl QuadTreeConfig {
    /// Default depth limit.
    pub const DEFAULT_MAX_DEPTH: u32 = 32;

    /// Set the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum cell size.
    #[must_use]
    pub const fn with_min_cell_size(mut self, min_cell_size: f64) -> Self {
        self.min_cell_size = min_cell_size;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), QuadTreeError> {
        if self.max_depth == 0 {
            return Err(QuadTreeError::InvalidConfig {
                reason: "max_depth must be at least 1",
            });
        }
        if !self.min_cell_size.is_finite() || self.min_cell_size < 0.0 {
            return Err(QuadTreeError::InvalidConfig {
                reason: "min_cell_size must be finite and non-negative",
            });
        }
        Ok(())
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            min_cell_size: 0.0,
        }
    }
}
