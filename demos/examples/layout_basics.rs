// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout basics.
//!
//! Build a small org-chart-shaped tree, run one layout pass, and print every
//! node's placed rectangle.
//!
//! Run:
//! - `cargo run -p canopy_demos --example layout_basics`

use canopy_layout::{LayoutParams, Tree};
use kurbo::Size;

fn main() {
    // Build a three-level tree
    let mut tree = Tree::new();
    let ceo = tree.insert(None, Size::new(120.0, 40.0));
    let eng = tree.insert(Some(ceo), Size::new(100.0, 36.0));
    let sales = tree.insert(Some(ceo), Size::new(100.0, 36.0));
    let backend = tree.insert(Some(eng), Size::new(90.0, 32.0));
    let frontend = tree.insert(Some(eng), Size::new(90.0, 32.0));
    let emea = tree.insert(Some(sales), Size::new(90.0, 32.0));

    let params = LayoutParams::new(12.0, 48.0).expect("separations are valid");
    let layout = tree.layout(&params).expect("tree has a single root");

    println!("overall bounds: {:?}", layout.size);
    for (label, id) in [
        ("ceo", ceo),
        ("eng", eng),
        ("sales", sales),
        ("backend", backend),
        ("frontend", frontend),
        ("emea", emea),
    ] {
        let rect = layout.placements.get(id).expect("every node is placed");
        println!("{label:>9}: {rect:?}");
    }

    // Siblings on a row are separated by exactly the configured gap
    let rb = layout.placements.get(backend).unwrap();
    let rf = layout.placements.get(frontend).unwrap();
    assert_eq!(rf.x0 - rb.x1, params.node_separation);
}
