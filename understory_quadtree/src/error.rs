// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`QuadTree`](crate::QuadTree) construction and insertion.

use kurbo::{Point, Rect};
use thiserror::Error;

use crate::types::NodeId;

/// Errors that can occur while building or inserting into a quadtree.
///
/// Every variant is recoverable: a failed call leaves the tree exactly as it was
/// before the call.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum QuadTreeError {
    /// Bounds are not finite or do not have strictly positive width and height.
    #[error("invalid bounds {bounds:?}: extent must be finite and strictly positive")]
    InvalidBounds {
        /// The rejected bounds.
        bounds: Rect,
    },

    /// Subdivision limits are unusable.
    #[error("invalid quadtree config: {reason}")]
    InvalidConfig {
        /// Which limit is wrong.
        reason: &'static str,
    },

    /// The point is not inside the root bounds (half-open on the max edges).
    #[error("point {point:?} is outside the tree bounds {bounds:?}")]
    OutOfBounds {
        /// The rejected point.
        point: Point,
        /// Bounds of the root node.
        bounds: Rect,
    },

    /// A point with exactly the same coordinates is already stored.
    #[error("point {point:?} is already stored")]
    DuplicatePoint {
        /// The rejected point.
        point: Point,
    },

    /// Separating the point from its neighbor would need a split beyond the
    /// configured depth, below the minimum cell size, or below float resolution.
    #[error("cannot separate {point:?} from {existing:?}: no valid split below depth {depth}")]
    DegenerateSplit {
        /// The rejected point.
        point: Point,
        /// The stored point it collides with.
        existing: Point,
        /// Depth of the cell that could not be split.
        depth: u32,
    },

    /// Quadrant selection reached a node that does not contain the point.
    ///
    /// Children tile their parent exactly, so this indicates a bug in the tree.
    #[error("node {node:?} was selected for {point:?} but does not contain it")]
    Inconsistent {
        /// The node that was selected.
        node: NodeId,
        /// The point being placed.
        point: Point,
    },
}
