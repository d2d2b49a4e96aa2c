// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demo programs.
//!
//! The demos print structures as indented text instead of painting them.

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_quadtree::QuadTree;

/// Install a `tracing` subscriber that honors `RUST_LOG`, defaulting to `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Render a quadtree as one line per node, indented by depth.
///
/// Internal nodes show their bounds; leaves also show the stored point, or `-` when empty.
pub fn render_tree(tree: &QuadTree) -> String {
    let mut out = String::new();
    for node in tree.nodes() {
        let indent = "  ".repeat(node.depth() as usize);
        let marker = match (node.is_leaf(), node.point()) {
            (false, _) => String::from("+"),
            (true, Some(pt)) => format!("* ({:.1}, {:.1})", pt.x, pt.y),
            (true, None) => String::from("-"),
        };
        out.push_str(&format!("{indent}{} {marker}\n", fmt_rect(node.bounds())));
    }
    out
}

fn fmt_rect(r: Rect) -> String {
    format!(
        "[{:.1}, {:.1}, {:.1}x{:.1}]",
        r.x0,
        r.y0,
        r.width(),
        r.height()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn render_lists_every_node() {
        let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        tree.insert(Point::new(10.0, 10.0)).unwrap();
        tree.insert(Point::new(90.0, 90.0)).unwrap();
        let text = render_tree(&tree);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), tree.node_count());
        assert_eq!(lines[0], "[0.0, 0.0, 100.0x100.0] +");
        assert_eq!(lines[1], "  [0.0, 0.0, 50.0x50.0] * (10.0, 10.0)");
        assert_eq!(lines[2], "  [50.0, 0.0, 50.0x50.0] -");
        assert_eq!(lines[4], "  [50.0, 50.0, 50.0x50.0] * (90.0, 90.0)");
    }
}
