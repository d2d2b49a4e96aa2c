// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random quadtree growth.
//!
//! Insert pseudo-random integer points into a 500×500 canvas, one per tick, and
//! print the resulting structure. Integer coordinates collide now and then, which
//! shows duplicate rejection. Set `RUST_LOG=trace` to see every split.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_random -- [count] [seed]`

use kurbo::Point;
use tracing::{info, warn};
use understory_demos::{init_tracing, render_tree};
use understory_quadtree::QuadTree;

const CANVAS: u64 = 500;

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_coord(&mut self) -> f64 {
        (self.next_u64() % CANVAS) as f64
    }
}

fn main() {
    init_tracing("info");

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(64);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|s| *s != 0)
        .unwrap_or(0x9E37_79B9_7F4A_7C15);

    let mut rng = Rng(seed);
    let mut tree = QuadTree::from_xywh(0.0, 0.0, CANVAS as f64, CANVAS as f64).unwrap();
    let mut rejected = 0_usize;
    for tick in 0..count {
        let pt = Point::new(rng.next_coord(), rng.next_coord());
        match tree.insert(pt) {
            Ok(leaf) => info!(tick, ?pt, ?leaf, "inserted"),
            Err(err) => {
                rejected += 1;
                warn!(tick, %err, "insert failed");
            }
        }
    }

    print!("{}", render_tree(&tree));
    println!(
        "points: {}, rejected: {rejected}, nodes: {}, height: {}",
        tree.len(),
        tree.node_count(),
        tree.height()
    );
}
