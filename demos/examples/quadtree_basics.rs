// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Insert two points into a 100×100 domain, watch the root split, and see how
//! out-of-bounds and duplicate insertions are reported.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_basics`

use kurbo::{Point, Rect};
use understory_demos::{init_tracing, render_tree};
use understory_quadtree::{NodeFlags, QuadTree};

fn main() {
    init_tracing("debug");

    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    tree.insert(Point::new(10.0, 10.0)).unwrap();
    println!("one point:\n{}", render_tree(&tree));

    // The second point splits the root; (10, 10) moves to the top-left child.
    let leaf = tree.insert(Point::new(90.0, 90.0)).unwrap();
    println!("two points:\n{}", render_tree(&tree));
    println!("(90, 90) stored in {leaf:?}");

    // Both are rejected and leave the tree as it was.
    if let Err(err) = tree.insert(Point::new(100.0, 50.0)) {
        println!("rejected: {err}");
    }
    if let Err(err) = tree.insert(Point::new(10.0, 10.0)) {
        println!("rejected: {err}");
    }

    let occupied = tree.nodes_with(NodeFlags::OCCUPIED).count();
    println!(
        "nodes: {}, leaves: {}, occupied: {occupied}, height: {}",
        tree.node_count(),
        tree.leaf_count(),
        tree.height()
    );
    assert_eq!(occupied, 2, "both points should be stored");
}
