// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the quadtree: node identifiers, quadrants, flags, and cell geometry.

use kurbo::{Point, Rect};

/// Identifier for a node in a [`QuadTree`](crate::QuadTree).
///
/// Nodes are stored in a flat arena and are never removed, so a `NodeId` stays
/// valid for the lifetime of the tree that produced it.
/// Ids are not meaningful across different trees.
///
/// The root always has the first slot.
/// `u32` is ample for practical trees; behavior beyond `u32::MAX` nodes is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Arena slot of this node, useful as a dense key for per-node side tables.
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// One of the four equal quarters of a node's bounds.
///
/// "Top" is the half with the smaller y (screen coordinates, y grows downward).
/// Children are always stored and visited in the order of [`Quadrant::ALL`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Quadrant {
    /// Min-x, min-y quarter.
    TopLeft,
    /// Max-x, min-y quarter.
    TopRight,
    /// Min-x, max-y quarter.
    BottomLeft,
    /// Max-x, max-y quarter.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this quadrant in child order.
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// The quadrant of `bounds` that owns `pt`.
    ///
    /// Points on the vertical midline go right, points on the horizontal midline go
    /// to the bottom, matching the half-open containment of [`Rect::contains`].
    /// The result is only meaningful when `bounds` contains `pt`.
    pub fn select(bounds: Rect, pt: Point) -> Self {
        let mid = midpoint(bounds);
        match (pt.x < mid.x, pt.y < mid.y) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }

    /// The sub-rectangle of `bounds` covered by this quadrant.
    ///
    /// The four quadrants share the exact same midpoint coordinates, so they tile
    /// `bounds` with no gap or overlap.
    pub fn cut(self, bounds: Rect) -> Rect {
        let mid = midpoint(bounds);
        match self {
            Self::TopLeft => Rect::new(bounds.x0, bounds.y0, mid.x, mid.y),
            Self::TopRight => Rect::new(mid.x, bounds.y0, bounds.x1, mid.y),
            Self::BottomLeft => Rect::new(bounds.x0, mid.y, mid.x, bounds.y1),
            Self::BottomRight => Rect::new(mid.x, mid.y, bounds.x1, bounds.y1),
        }
    }
}

bitflags::bitflags! {
    /// Structural state of a node, used to filter traversal.
    ///
    /// An internal node has no flags set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node has no children.
        const LEAF     = 0b0000_0001;
        /// Node stores a point. Only leaves can be occupied.
        const OCCUPIED = 0b0000_0010;
    }
}

/// Midpoint of a rectangle, computed without overflowing for huge finite extents.
pub(crate) fn midpoint(r: Rect) -> Point {
    Point::new(0.5 * r.x0 + 0.5 * r.x1, 0.5 * r.y0 + 0.5 * r.y1)
}

/// Whether `r` can serve as tree bounds: finite corners and strictly positive extent.
pub(crate) fn is_valid_bounds(r: Rect) -> bool {
    r.x0.is_finite()
        && r.y0.is_finite()
        && r.x1.is_finite()
        && r.y1.is_finite()
        && r.x0 < r.x1
        && r.y0 < r.y1
}

/// Whether splitting `r` at its midpoint yields four cells of positive extent.
///
/// Fails once the cell is only a few ulps wide and the midpoint rounds onto an edge.
pub(crate) fn is_splittable(r: Rect) -> bool {
    let mid = midpoint(r);
    r.x0 < mid.x && mid.x < r.x1 && r.y0 < mid.y && mid.y < r.y1
}
