// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_layout --heading-base-level=0

//! Canopy Layout: a Kurbo-native tree-diagram layout engine.
//!
//! Canopy Layout is a reusable building block for org charts, mind maps, outline
//! views, and any UI that draws a rooted tree of boxes joined by connector lines.
//!
//! - Computes the bounding size of every subtree from per-node intrinsic sizes.
//! - Assigns every node an absolute content rectangle, centered top-down,
//!   children left-to-right with configurable gaps.
//! - Builds the parent-to-child connector skeleton as plain line segments.
//!
//! All three passes are pure functions over the tree: the same structure,
//! sizes, and parameters always produce the same result, and nothing is
//! retained between passes.
//!
//! ## Not a renderer
//!
//! This crate does not draw anything, does not animate, and does not decide
//! when to recompute. Upstream code owns the tree's content, queries intrinsic
//! sizes however it likes (text measurement, fixed boxes, ...), runs a layout
//! pass, and applies the resulting rectangles and segments to whatever surface
//! it renders with. Think of this as the arithmetic between a data model and a
//! scene, not a widget system.
//!
//! ## API overview
//!
//! - [`Tree`]: owned tree of nodes, each with an intrinsic content [`kurbo::Size`].
//! - [`NodeId`]: generational handle of a node.
//! - [`LayoutParams`]: sibling and row gaps, validated at construction.
//! - [`PlacementMap`]: per-pass map from node to placed rectangle.
//! - [`Layout`]: the full result of one pass (size, placements, connectors).
//!
//! Key operations:
//! - [`Tree::insert`] / [`Tree::remove`] / [`Tree::reparent`] to shape the tree.
//! - [`Tree::estimate_size`] → subtree bounding [`kurbo::Size`].
//! - [`Tree::place`] → populates a [`PlacementMap`] within given bounds.
//! - [`Tree::connectors`] → connector segments, normalized to their own origin.
//! - [`Tree::layout`] → all of the above in one pass from the tree's root.
//!
//! ## Well-formedness
//!
//! The layout functions are total over well-formed trees. Two caller-side data
//! bugs are handled explicitly rather than silently:
//! - more than one root is reported as [`TreeError::MultipleRoots`];
//! - a node inserted under a stale parent id is an orphan: it is silently
//!   excluded from placement and connectors (child lookup never discovers it),
//!   and [`Tree::validate`] reports it.
//!
//! ### Minimal usage
//!
//! ```
//! use canopy_layout::{Tree, LayoutParams};
//! use kurbo::Size;
//!
//! // Build a tiny tree: a root with two leaves.
//! let mut tree = Tree::new();
//! let root = tree.insert(None, Size::new(80.0, 30.0));
//! let a = tree.insert(Some(root), Size::new(60.0, 20.0));
//! let b = tree.insert(Some(root), Size::new(60.0, 20.0));
//!
//! // Lay it out with a 5px sibling gap and a 40px row gap.
//! let params = LayoutParams::new(5.0, 40.0).unwrap();
//! let layout = tree.layout(&params).unwrap();
//!
//! // Overall bounds: width = max(80, 60 + 60 + 5), height = 30 + 20 + 40.
//! assert_eq!(layout.size, Size::new(125.0, 90.0));
//!
//! // The two leaves sit 5px apart on the row below the root.
//! let ra = layout.placements.get(a).unwrap();
//! let rb = layout.placements.get(b).unwrap();
//! assert_eq!(rb.x0 - ra.x1, 5.0);
//!
//! // One connector per parent-child edge.
//! assert_eq!(layout.connectors.len(), 2);
//! ```
//!
//! ### Publishing results without feedback loops
//!
//! A host that republishes layout output into an observable system should only
//! do so when the output actually changed; [`Layout`] is `PartialEq` for
//! exactly this:
//!
//! ```
//! use canopy_layout::{Layout, LayoutParams, Tree};
//! use kurbo::Size;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, Size::new(40.0, 20.0));
//! let _leaf = tree.insert(Some(root), Size::new(40.0, 20.0));
//! let params = LayoutParams::new(10.0, 30.0).unwrap();
//!
//! let mut published = Layout::default();
//! for _ in 0..3 {
//!     let next = tree.layout(&params).unwrap();
//!     if next != published {
//!         published = next;
//!         // ...push to observers here...
//!     }
//! }
//! assert_eq!(published, tree.layout(&params).unwrap());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod connector;
mod layout;
mod tree;
mod types;

pub use connector::connectors_to_path;
pub use layout::{Layout, PlacementMap};
pub use tree::{Tree, TreeError};
pub use types::{LayoutParams, NodeId, ParamsError};
