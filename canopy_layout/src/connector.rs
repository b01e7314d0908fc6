// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector construction: line segments joining parents to their children.

use alloc::vec::Vec;
use kurbo::{BezPath, Line, Point};

use crate::layout::PlacementMap;
use crate::tree::Tree;
use crate::types::NodeId;

impl Tree {
    /// Build the connector skeleton for the subtree rooted at `id`.
    ///
    /// Each segment runs from a parent rectangle's center to a child
    /// rectangle's top-center. Segments come out in traversal order: a
    /// parent's connectors before its subtree's, children in declared order.
    /// A node without a placed rectangle contributes nothing (and an `id`
    /// absent from `map` yields an empty sequence).
    ///
    /// The result is normalized once so its minimum bound sits at the
    /// origin; segments are relative to the skeleton's own top-left, not to
    /// canvas coordinates.
    pub fn connectors(&self, id: NodeId, map: &PlacementMap) -> Vec<Line> {
        let mut segments = Vec::new();
        self.collect_connectors(id, map, &mut segments);
        normalize_to_origin(&mut segments);
        segments
    }

    fn collect_connectors(&self, id: NodeId, map: &PlacementMap, out: &mut Vec<Line>) {
        let Some(parent_rect) = map.get(id) else {
            return;
        };
        for &child in self.children(id) {
            if let Some(child_rect) = map.get(child) {
                out.push(Line::new(
                    parent_rect.center(),
                    Point::new(child_rect.center().x, child_rect.y0),
                ));
            }
            self.collect_connectors(child, map, out);
        }
    }
}

/// Shift all segments so the minimum endpoint bound lands at the origin.
fn normalize_to_origin(segments: &mut [Line]) {
    if segments.is_empty() {
        return;
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for seg in segments.iter() {
        for p in [seg.p0, seg.p1] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
    }
    for seg in segments.iter_mut() {
        seg.p0.x -= min_x;
        seg.p0.y -= min_y;
        seg.p1.x -= min_x;
        seg.p1.y -= min_y;
    }
}

/// Fold connector segments into a single [`BezPath`].
///
/// Emits a move-to/line-to pair per segment, so the path strokes as the
/// whole skeleton in one draw call.
pub fn connectors_to_path(segments: &[Line]) -> BezPath {
    let mut path = BezPath::new();
    for seg in segments {
        path.move_to(seg.p0);
        path.line_to(seg.p1);
    }
    path
}
