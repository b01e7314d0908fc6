// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector paths.
//!
//! Run a layout pass, fold the connector segments into a single `BezPath`,
//! and print its SVG path string, ready to paste into an `<path d="...">`.
//!
//! Run:
//! - `cargo run -p canopy_demos --example connector_paths`

use canopy_layout::{LayoutParams, Tree, connectors_to_path};
use kurbo::Size;

fn main() {
    let mut tree = Tree::new();
    let root = tree.insert(None, Size::new(80.0, 30.0));
    let a = tree.insert(Some(root), Size::new(60.0, 20.0));
    let _b = tree.insert(Some(root), Size::new(60.0, 20.0));
    let _a1 = tree.insert(Some(a), Size::new(60.0, 20.0));
    let _a2 = tree.insert(Some(a), Size::new(60.0, 20.0));

    let params = LayoutParams::new(10.0, 40.0).expect("separations are valid");
    let layout = tree.layout(&params).expect("tree has a single root");

    println!("segments ({} total):", layout.connectors.len());
    for seg in &layout.connectors {
        println!("  {:?} -> {:?}", seg.p0, seg.p1);
    }

    let path = connectors_to_path(&layout.connectors);
    println!("svg: {}", path.to_svg());
}
