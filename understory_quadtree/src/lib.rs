// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a Kurbo-native point-region quadtree.
//!
//! Understory Quadtree is a small spatial index for 2D points over a fixed domain.
//!
//! - Each node covers a [`kurbo::Rect`]; leaves hold at most one [`kurbo::Point`].
//! - Inserting into an occupied leaf subdivides it lazily into four equal quadrants,
//!   cascading until the two points are in different leaves.
//! - A read-only traversal API ([`QuadTree::root`], [`NodeRef`], [`QuadTree::nodes`]) lets a
//!   renderer, serializer, or test walk the whole structure.
//!
//! The tree only grows: there is no removal or rebalancing.
//!
//! ## Containment
//!
//! Cells are half-open, like [`kurbo::Rect::contains`]: `x0 <= x < x1` and `y0 <= y < y1`.
//! A point on the root's right or bottom edge is out of bounds, and a point on an inner
//! split line belongs to the right or bottom cell. Children are cut at the exact midpoint
//! of their parent, so every point inside the root is owned by exactly one leaf.
//!
//! ## Bounded subdivision
//!
//! Very close points force deep cascades of splits. [`QuadTreeConfig`] caps the depth and
//! the minimum cell size; a cascade that would break a limit, or that would need cells
//! smaller than float resolution, is refused with [`QuadTreeError::DegenerateSplit`].
//! Exact duplicates are refused with [`QuadTreeError::DuplicatePoint`].
//! The whole cascade is planned before any node is created, so a refused insertion leaves
//! the tree untouched.
//!
//! ## Concurrency
//!
//! Insertion takes `&mut self`, so the borrow checker already serializes writers.
//! Share a tree across threads behind your own lock if you need to.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::{NodeFlags, QuadTree, QuadTreeError};
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
//! tree.insert(Point::new(10.0, 10.0)).unwrap();
//! assert!(tree.root().is_leaf());
//!
//! // A second point splits the root into four quadrants.
//! tree.insert(Point::new(90.0, 90.0)).unwrap();
//! let children = tree.root().children().unwrap();
//! assert_eq!(children[0].bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
//! assert_eq!(children[0].point(), Some(Point::new(10.0, 10.0)));
//! assert_eq!(children[3].point(), Some(Point::new(90.0, 90.0)));
//!
//! // Rejections are reported and leave the tree as it was.
//! let err = tree.insert(Point::new(100.0, 5.0)).unwrap_err();
//! assert!(matches!(err, QuadTreeError::OutOfBounds { .. }));
//!
//! // Walk the occupied leaves, e.g. to draw markers.
//! let markers: Vec<_> = tree.nodes_with(NodeFlags::OCCUPIED).filter_map(|n| n.point()).collect();
//! assert_eq!(markers.len(), 2);
//! ```
//!
//! ## Drawing the structure
//!
//! Outlining every node's bounds and marking every stored point is a plain pre-order walk:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::QuadTree;
//!
//! let mut tree = QuadTree::from_xywh(0.0, 0.0, 500.0, 500.0).unwrap();
//! for (x, y) in [(20.0, 30.0), (400.0, 80.0), (260.0, 410.0), (30.0, 60.0)] {
//!     tree.insert(Point::new(x, y)).unwrap();
//! }
//!
//! let mut outlines: Vec<Rect> = Vec::new();
//! let mut markers: Vec<Point> = Vec::new();
//! for node in tree.nodes() {
//!     outlines.push(node.bounds());
//!     markers.extend(node.point());
//! }
//! assert_eq!(outlines.len(), tree.node_count());
//! assert_eq!(markers.len(), tree.len());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod tree;
pub mod types;

pub use config::QuadTreeConfig;
pub use error::QuadTreeError;
pub use tree::{NodeRef, Nodes, QuadTree};
pub use types::{NodeFlags, NodeId, Quadrant};
