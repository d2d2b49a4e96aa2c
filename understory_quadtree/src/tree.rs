// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena storage, insertion, traversal.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect};
use tracing::{debug, trace};

use crate::config::QuadTreeConfig;
use crate::error::QuadTreeError;
use crate::types::{NodeFlags, NodeId, Quadrant, is_splittable, is_valid_bounds};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    Leaf(Option<Point>),
    Internal([NodeId; 4]),
}

#[derive(Clone, Debug)]
struct Node {
    bounds: Rect,
    depth: u32,
    cell: Cell,
}

impl Node {
    fn leaf(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            cell: Cell::Leaf(None),
        }
    }
}

/// Point-region quadtree over a fixed rectangular domain.
///
/// Leaves hold at most one point. Inserting into an occupied leaf splits it into four
/// equal quadrants, moves the resident point down, and repeats until the two points
/// sit in different leaves. Nodes are never removed, so the tree only grows.
#[derive(Clone)]
pub struct QuadTree {
    nodes: Vec<Node>, // arena; root at slot 0, children pushed four at a time
    config: QuadTreeConfig,
    len: usize,
    height: u32,
}

impl core::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("nodes_total", &self.nodes.len())
            .field("points", &self.len)
            .field("height", &self.height)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QuadTree {
    /// Create an empty tree covering `bounds` with the default [`QuadTreeConfig`].
    ///
    /// Fails with [`QuadTreeError::InvalidBounds`] unless `bounds` is finite with strictly
    /// positive width and height. Bounds are taken as given; an inverted `Rect` is rejected
    /// rather than normalized.
    pub fn new(bounds: Rect) -> Result<Self, QuadTreeError> {
        Self::with_config(bounds, QuadTreeConfig::default())
    }

    /// Create a tree covering `bounds` that already holds `point`.
    pub fn with_point(bounds: Rect, point: Point) -> Result<Self, QuadTreeError> {
        let mut tree = Self::new(bounds)?;
        tree.insert(point)?;
        Ok(tree)
    }

    /// Create an empty tree covering the rectangle at `(x, y)` with size `w × h`.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Result<Self, QuadTreeError> {
        Self::new(Rect::new(x, y, x + w, y + h))
    }

    /// Create an empty tree covering `bounds` with explicit subdivision limits.
    pub fn with_config(bounds: Rect, config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        if !is_valid_bounds(bounds) {
            return Err(QuadTreeError::InvalidBounds { bounds });
        }
        config.validate()?;
        Ok(Self {
            nodes: vec![Node::leaf(bounds, 0)],
            config,
            len: 0,
            height: 0,
        })
    }

    /// Insert a point, subdividing as needed. Returns the leaf that now stores it.
    ///
    /// Containment is half-open (see [`Rect::contains`]): a point on the root's right or
    /// bottom edge is out of bounds, and a point on an inner split line belongs to the
    /// right or bottom cell.
    ///
    /// On error the tree is left exactly as it was:
    /// - [`QuadTreeError::OutOfBounds`] if the root does not contain the point
    ///   (including non-finite coordinates).
    /// - [`QuadTreeError::DuplicatePoint`] if an identical point is already stored.
    /// - [`QuadTreeError::DegenerateSplit`] if separating it from its neighbor would break
    ///   the configured limits or float resolution. Limits are checked for the whole
    ///   cascade of splits before any node is created.
    pub fn insert(&mut self, point: Point) -> Result<NodeId, QuadTreeError> {
        let result = self.try_insert(point);
        if let Err(err) = &result {
            debug!(?point, %err, "quadtree insertion rejected");
        }
        result
    }

    fn try_insert(&mut self, point: Point) -> Result<NodeId, QuadTreeError> {
        let leaf = self.descend(point)?;
        let (bounds, depth, cell) = {
            let node = &self.nodes[leaf.idx()];
            (node.bounds, node.depth, node.cell)
        };
        let existing = match cell {
            Cell::Leaf(None) => {
                self.nodes[leaf.idx()].cell = Cell::Leaf(Some(point));
                self.len += 1;
                return Ok(leaf);
            }
            Cell::Leaf(Some(existing)) => existing,
            Cell::Internal(_) => return Err(QuadTreeError::Inconsistent { node: leaf, point }),
        };
        if existing == point {
            return Err(QuadTreeError::DuplicatePoint { point });
        }
        let splits = self.plan_splits(bounds, depth, existing, point)?;
        Ok(self.commit_splits(leaf, splits, existing, point))
    }

    /// Follow quadrant selection from the root down to the leaf owning `point`.
    fn descend(&self, point: Point) -> Result<NodeId, QuadTreeError> {
        let bounds = self.bounds();
        if !bounds.contains(point) {
            return Err(QuadTreeError::OutOfBounds { point, bounds });
        }
        let mut id = NodeId::ROOT;
        loop {
            let node = &self.nodes[id.idx()];
            let Cell::Internal(children) = node.cell else {
                return Ok(id);
            };
            let child = children[Quadrant::select(node.bounds, point).index()];
            if !self.nodes[child.idx()].bounds.contains(point) {
                return Err(QuadTreeError::Inconsistent { node: child, point });
            }
            id = child;
        }
    }

    /// Count the splits needed below a leaf at `bounds`/`depth` to separate two points.
    fn plan_splits(
        &self,
        mut bounds: Rect,
        mut depth: u32,
        existing: Point,
        point: Point,
    ) -> Result<u32, QuadTreeError> {
        let mut splits = 0;
        loop {
            if !self.can_split(bounds, depth) {
                return Err(QuadTreeError::DegenerateSplit {
                    point,
                    existing,
                    depth,
                });
            }
            splits += 1;
            let shared = Quadrant::select(bounds, existing);
            if shared != Quadrant::select(bounds, point) {
                return Ok(splits);
            }
            bounds = shared.cut(bounds);
            depth += 1;
        }
    }

    fn can_split(&self, bounds: Rect, depth: u32) -> bool {
        if depth >= self.config.max_depth || !is_splittable(bounds) {
            return false;
        }
        let first = Quadrant::TopLeft.cut(bounds);
        let last = Quadrant::BottomRight.cut(bounds);
        let smallest = first
            .width()
            .min(first.height())
            .min(last.width())
            .min(last.height());
        smallest >= self.config.min_cell_size
    }

    /// Apply a plan from [`Self::plan_splits`]. The last split separates the two points.
    fn commit_splits(
        &mut self,
        leaf: NodeId,
        splits: u32,
        existing: Point,
        point: Point,
    ) -> NodeId {
        let mut current = leaf;
        for _ in 1..splits {
            let bounds = self.nodes[current.idx()].bounds;
            current = self.split(current)[Quadrant::select(bounds, existing).index()];
        }
        let bounds = self.nodes[current.idx()].bounds;
        let children = self.split(current);
        let home = children[Quadrant::select(bounds, existing).index()];
        let target = children[Quadrant::select(bounds, point).index()];
        debug_assert_ne!(home, target, "split plan must separate the two points");
        self.nodes[home.idx()].cell = Cell::Leaf(Some(existing));
        self.nodes[target.idx()].cell = Cell::Leaf(Some(point));
        self.len += 1;
        target
    }

    /// Turn a leaf into an internal node with four empty children. Drops the leaf's point;
    /// the caller places it again.
    fn split(&mut self, id: NodeId) -> [NodeId; 4] {
        let (bounds, depth) = {
            let node = &self.nodes[id.idx()];
            (node.bounds, node.depth)
        };
        let base = self.nodes.len();
        self.nodes.extend(Quadrant::ALL.map(|q| Node::leaf(q.cut(bounds), depth + 1)));
        let children = core::array::from_fn(|i| NodeId::new(base + i));
        self.nodes[id.idx()].cell = Cell::Internal(children);
        self.height = self.height.max(depth + 1);
        trace!(node = ?id, depth, ?bounds, "split quadtree node");
        children
    }

    /// Bounds of the root node.
    pub fn bounds(&self) -> Rect {
        self.nodes[NodeId::ROOT.idx()].bounds
    }

    /// Subdivision limits in effect.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no point is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of nodes, internal and leaf.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves, empty or occupied.
    pub fn leaf_count(&self) -> usize {
        // Every split turns one leaf into four.
        let splits = (self.nodes.len() - 1) / 4;
        1 + 3 * splits
    }

    /// Depth of the deepest node. A tree that never split has height `0`.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id. Returns `None` for ids this tree never produced.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.idx() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Depth-first pre-order walk over every node, children in [`Quadrant::ALL`] order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// The pre-order walk restricted to nodes whose flags contain all of `flags`.
    ///
    /// `NodeFlags::OCCUPIED` yields every node that stores a point,
    /// `NodeFlags::LEAF` every cell a renderer would outline at the finest level.
    pub fn nodes_with(&self, flags: NodeFlags) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.nodes().filter(move |n| n.flags().contains(flags))
    }

    /// Stored points, in pre-order of their leaves.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes().filter_map(NodeRef::point)
    }

    /// The leaf whose bounds contain `point`, found by repeatedly picking the child that
    /// contains it. `None` if the root does not contain `point`.
    pub fn leaf_at(&self, point: Point) -> Option<NodeRef<'_>> {
        self.descend(point).ok().map(|id| NodeRef { tree: self, id })
    }

    /// Ids from the root down to the leaf containing `point`, inclusive.
    /// Empty if the root does not contain `point`.
    pub fn path_to(&self, point: Point) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut node = self.root();
        if !node.bounds().contains(point) {
            return path;
        }
        loop {
            path.push(node.id());
            match node.child_toward(point) {
                Some(child) => node = child,
                None => return path,
            }
        }
    }

    /// True if exactly this point is stored.
    pub fn contains_point(&self, point: Point) -> bool {
        self.leaf_at(point).and_then(NodeRef::point) == Some(point)
    }
}

/// Read-only view of a node, borrowed from its [`QuadTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a QuadTree,
    id: NodeId,
}

impl core::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("bounds", &self.bounds())
            .field("depth", &self.depth())
            .field("flags", &self.flags())
            .field("point", &self.point())
            .finish_non_exhaustive()
    }
}

impl<'a> NodeRef<'a> {
    fn node(self) -> &'a Node {
        &self.tree.nodes[self.id.idx()]
    }

    fn at(self, id: NodeId) -> Self {
        Self { tree: self.tree, id }
    }

    /// Id of this node.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Region covered by this node. Fixed when the node is created.
    pub fn bounds(self) -> Rect {
        self.node().bounds
    }

    /// Distance from the root, which has depth `0`.
    pub fn depth(self) -> u32 {
        self.node().depth
    }

    /// True if this node has no children.
    pub fn is_leaf(self) -> bool {
        matches!(self.node().cell, Cell::Leaf(_))
    }

    /// True if this node stores a point. Internal nodes never do.
    pub fn has_point(self) -> bool {
        self.point().is_some()
    }

    /// The stored point, if any.
    pub fn point(self) -> Option<Point> {
        match self.node().cell {
            Cell::Leaf(point) => point,
            Cell::Internal(_) => None,
        }
    }

    /// The four children in [`Quadrant::ALL`] order, or `None` for a leaf.
    pub fn children(self) -> Option<[Self; 4]> {
        match self.node().cell {
            Cell::Internal(children) => Some(children.map(|id| self.at(id))),
            Cell::Leaf(_) => None,
        }
    }

    /// The child covering quadrant `q`, or `None` for a leaf.
    pub fn child(self, q: Quadrant) -> Option<Self> {
        self.children().map(|children| children[q.index()])
    }

    /// The child that owns `point`, or `None` for a leaf.
    ///
    /// Only meaningful when this node contains `point`.
    pub fn child_toward(self, point: Point) -> Option<Self> {
        self.child(Quadrant::select(self.bounds(), point))
    }

    /// Structural flags of this node.
    pub fn flags(self) -> NodeFlags {
        match self.node().cell {
            Cell::Leaf(Some(_)) => NodeFlags::LEAF | NodeFlags::OCCUPIED,
            Cell::Leaf(None) => NodeFlags::LEAF,
            Cell::Internal(_) => NodeFlags::empty(),
        }
    }
}

/// Pre-order iterator over the nodes of a [`QuadTree`], returned by [`QuadTree::nodes`].
#[derive(Clone, Debug)]
pub struct Nodes<'a> {
    tree: &'a QuadTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Cell::Internal(children) = self.tree.nodes[id.idx()].cell {
            self.stack.extend(children.iter().rev());
        }
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}
