// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout passes: bottom-up subtree sizing and top-down placement.

use alloc::vec::Vec;
use kurbo::{Line, Point, Rect, Size};

use crate::tree::{Tree, TreeError};
use crate::types::{LayoutParams, NodeId};

/// Placed rectangles for one layout pass, keyed by [`NodeId`].
///
/// Built by [`Tree::place`], read by [`Tree::connectors`], and meant to be
/// discarded once the pass's results have been applied. Each rectangle is a
/// node's content box (top-left origin, intrinsic size); subtree bounds are
/// not stored, they are recomputed on demand.
///
/// Implements `PartialEq` so hosts can publish a new pass's output only when
/// it differs from the previous one, avoiding layout feedback loops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementMap {
    slots: Vec<Option<(u32, Rect)>>, // (generation, rect) per slot
}

impl PlacementMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The placed rectangle for `id`, if the node was placed by this pass.
    pub fn get(&self, id: NodeId) -> Option<Rect> {
        match self.slots.get(id.idx()) {
            Some(Some((generation, rect))) if *generation == id.generation() => Some(*rect),
            _ => None,
        }
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether no node has been placed.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Iterate placed `(id, rect)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.map(|(generation, rect)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                (NodeId::new(i as u32, generation), rect)
            })
        })
    }

    /// Drop all entries, keeping the allocation for reuse.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn set(&mut self, id: NodeId, rect: Rect) {
        if self.slots.len() <= id.idx() {
            self.slots.resize(id.idx() + 1, None);
        }
        self.slots[id.idx()] = Some((id.generation(), rect));
    }
}

/// Memoized subtree sizes for one pass, indexed by slot.
///
/// The tree and intrinsic sizes are immutable during a pass, so each subtree
/// size is computed once in a bottom-up walk and read everywhere else.
pub(crate) struct SizeCache(Vec<Option<Size>>);

impl SizeCache {
    pub(crate) fn new(slots: usize) -> Self {
        Self(alloc::vec![None; slots])
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<Size> {
        self.0.get(id.idx()).copied().flatten()
    }
}

/// The complete result of one layout pass.
///
/// Compare against the previously published value before applying it; the
/// pass is deterministic, so an unchanged tree yields an equal `Layout`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Bounding size of the whole tree.
    pub size: Size,
    /// Placed content rectangle per node.
    pub placements: PlacementMap,
    /// Parent-to-child connector segments, normalized to the layout origin.
    pub connectors: Vec<Line>,
}

impl Tree {
    /// Bounding size required to lay out `id` and all its descendants.
    ///
    /// - width: the wider of the node's own content and its children's
    ///   subtree widths plus one `node_separation` per gap.
    /// - height: own content height, plus the tallest child subtree and one
    ///   `row_separation` when children exist.
    ///
    /// A leaf's subtree size is exactly its intrinsic size. Stale ids yield
    /// [`Size::ZERO`].
    pub fn estimate_size(&self, id: NodeId, params: &LayoutParams) -> Size {
        let mut cache = SizeCache::new(self.slot_count());
        self.fill_sizes(id, params, &mut cache)
    }

    /// Place `id` and its subtree centered within `bounds`, recording each
    /// node's content rectangle in `map`. Returns the subtree's bounding size.
    ///
    /// The node is anchored by its top-center at the midpoint of the bounds'
    /// top edge. Children are placed left-to-right from the bounds' left
    /// edge, their row offset from the node's content bottom by
    /// `row_separation`, with exactly `node_separation` between adjacent
    /// subtree boxes.
    ///
    /// `bounds` is trusted: undersized or oversized bounds shift the visual
    /// result without clamping or warning.
    pub fn place(
        &self,
        id: NodeId,
        bounds: Rect,
        params: &LayoutParams,
        map: &mut PlacementMap,
    ) -> Size {
        let mut cache = SizeCache::new(self.slot_count());
        let size = self.fill_sizes(id, params, &mut cache);
        self.place_cached(id, bounds, params, &cache, map);
        size
    }

    /// Run a full pass: find the root, size it, place it from the origin,
    /// and build the connector segments.
    ///
    /// An empty tree yields a degenerate empty [`Layout`]. More than one
    /// root is a structural error, never a silent first-match.
    pub fn layout(&self, params: &LayoutParams) -> Result<Layout, TreeError> {
        let Some(root) = self.root()? else {
            return Ok(Layout::default());
        };
        let mut cache = SizeCache::new(self.slot_count());
        let size = self.fill_sizes(root, params, &mut cache);
        let mut placements = PlacementMap::new();
        self.place_cached(
            root,
            Rect::from_origin_size(Point::ORIGIN, size),
            params,
            &cache,
            &mut placements,
        );
        let connectors = self.connectors(root, &placements);
        Ok(Layout {
            size,
            placements,
            connectors,
        })
    }

    // --- internals ---

    fn fill_sizes(&self, id: NodeId, params: &LayoutParams, cache: &mut SizeCache) -> Size {
        let Some(node) = self.node_opt(id) else {
            return Size::ZERO;
        };
        let mut widths_sum = 0.0;
        let mut max_child_height = 0.0_f64;
        for &child in &node.children {
            let child_size = self.fill_sizes(child, params, cache);
            widths_sum += child_size.width;
            max_child_height = max_child_height.max(child_size.height);
        }
        let gaps = node.children.len().saturating_sub(1) as f64;
        let row_gap = if node.children.is_empty() {
            0.0
        } else {
            params.row_separation
        };
        let size = Size::new(
            node.size
                .width
                .max(widths_sum + params.node_separation * gaps),
            node.size.height + max_child_height + row_gap,
        );
        cache.0[id.idx()] = Some(size);
        size
    }

    fn place_cached(
        &self,
        id: NodeId,
        bounds: Rect,
        params: &LayoutParams,
        cache: &SizeCache,
        map: &mut PlacementMap,
    ) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let own = node.size;
        let origin = Point::new(bounds.center().x - own.width * 0.5, bounds.y0);
        map.set(id, Rect::from_origin_size(origin, own));

        let row_y = bounds.y0 + own.height + params.row_separation;
        let mut offset = 0.0;
        for &child in &node.children {
            let child_size = cache.get(child).unwrap_or(Size::ZERO);
            let child_bounds =
                Rect::from_origin_size(Point::new(bounds.x0 + offset, row_y), child_size);
            self.place_cached(child, child_bounds, params, cache, map);
            offset += child_size.width + params.node_separation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(node_separation: f64, row_separation: f64) -> LayoutParams {
        LayoutParams::new(node_separation, row_separation).unwrap()
    }

    #[test]
    fn single_node_size_and_placement() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(100.0, 40.0));
        let p = params(5.0, 40.0);

        assert_eq!(tree.estimate_size(root, &p), Size::new(100.0, 40.0));

        let mut map = PlacementMap::new();
        let bounds = Rect::new(0.0, 0.0, 200.0, 40.0);
        let size = tree.place(root, bounds, &p, &mut map);
        assert_eq!(size, Size::new(100.0, 40.0));
        assert_eq!(map.len(), 1);
        // Horizontally centered in the given bounds, anchored to its top.
        assert_eq!(map.get(root), Some(Rect::new(50.0, 0.0, 150.0, 40.0)));
    }

    #[test]
    fn leaf_size_is_intrinsic_size() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(80.0, 30.0));
        let leaf = tree.insert(Some(root), Size::new(60.0, 20.0));
        let p = params(5.0, 40.0);
        assert_eq!(
            tree.estimate_size(leaf, &p),
            tree.intrinsic_size(leaf).unwrap()
        );
    }

    #[test]
    fn two_children_size_and_gap() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(80.0, 30.0));
        let a = tree.insert(Some(root), Size::new(60.0, 20.0));
        let b = tree.insert(Some(root), Size::new(60.0, 20.0));
        let p = params(5.0, 40.0);

        // width = max(80, 60 + 60 + 5); height = 30 + 20 + 40.
        let size = tree.estimate_size(root, &p);
        assert_eq!(size, Size::new(125.0, 90.0));

        let mut map = PlacementMap::new();
        tree.place(root, Rect::from_origin_size(Point::ORIGIN, size), &p, &mut map);
        let ra = map.get(a).unwrap();
        let rb = map.get(b).unwrap();
        assert_eq!(ra, Rect::new(0.0, 70.0, 60.0, 90.0));
        assert_eq!(rb, Rect::new(65.0, 70.0, 125.0, 90.0));
        // Adjacent sibling extents are separated by exactly node_separation.
        assert_eq!(rb.x0 - ra.x1, 5.0);
    }

    #[test]
    fn single_child_adds_no_separation() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(10.0, 10.0));
        let _only = tree.insert(Some(root), Size::new(30.0, 10.0));
        let p = params(100.0, 5.0);
        // One child means zero gaps, so node_separation must not appear.
        assert_eq!(tree.estimate_size(root, &p), Size::new(30.0, 25.0));
    }

    #[test]
    fn rows_offset_by_row_separation() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(10.0, 10.0));
        let child = tree.insert(Some(root), Size::new(10.0, 10.0));
        let grandchild = tree.insert(Some(child), Size::new(10.0, 10.0));
        let p = params(5.0, 40.0);

        let layout = tree.layout(&p).unwrap();
        let r_root = layout.placements.get(root).unwrap();
        let r_child = layout.placements.get(child).unwrap();
        let r_grand = layout.placements.get(grandchild).unwrap();
        assert_eq!(r_child.y0 - r_root.y1, 40.0);
        assert_eq!(r_grand.y0 - r_child.y1, 40.0);
    }

    #[test]
    fn sibling_subtrees_do_not_overlap() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(20.0, 10.0));
        // Left child is a wide subtree, right child a single leaf.
        let left = tree.insert(Some(root), Size::new(10.0, 10.0));
        let _l1 = tree.insert(Some(left), Size::new(40.0, 10.0));
        let _l2 = tree.insert(Some(left), Size::new(40.0, 10.0));
        let right = tree.insert(Some(root), Size::new(10.0, 10.0));
        let p = params(8.0, 12.0);

        let left_size = tree.estimate_size(left, &p);
        let layout = tree.layout(&p).unwrap();

        // The right subtree's allotted extent starts exactly one gap after
        // the left subtree's extent ends.
        let r_right = layout.placements.get(right).unwrap();
        let right_slot_x0 = left_size.width + p.node_separation;
        assert_eq!(r_right.center().x, right_slot_x0 + 10.0 / 2.0);

        // Placed content boxes of the two subtrees stay in disjoint bands.
        let left_band_end = left_size.width;
        for id in [left, _l1, _l2] {
            assert!(layout.placements.get(id).unwrap().x1 <= left_band_end);
        }
        assert!(r_right.x0 >= left_band_end + p.node_separation);
    }

    #[test]
    fn place_matches_estimate_for_every_node() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(12.0, 7.0));
        let a = tree.insert(Some(root), Size::new(20.0, 9.0));
        let b = tree.insert(Some(root), Size::new(4.0, 3.0));
        let _a1 = tree.insert(Some(a), Size::new(6.0, 6.0));
        let _b1 = tree.insert(Some(b), Size::new(50.0, 2.0));
        let p = params(3.0, 11.0);

        for id in [root, a, b, _a1, _b1] {
            let mut map = PlacementMap::new();
            let size = tree.estimate_size(id, &p);
            let placed = tree.place(id, Rect::from_origin_size(Point::ORIGIN, size), &p, &mut map);
            assert_eq!(placed, size, "place must return the estimated subtree size");
        }
    }

    #[test]
    fn place_is_idempotent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(30.0, 10.0));
        let _a = tree.insert(Some(root), Size::new(10.0, 10.0));
        let _b = tree.insert(Some(root), Size::new(10.0, 10.0));
        let p = params(4.0, 16.0);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);

        let mut first = PlacementMap::new();
        tree.place(root, bounds, &p, &mut first);
        let mut second = PlacementMap::new();
        tree.place(root, bounds, &p, &mut second);
        assert_eq!(first, second);

        // And the whole pass, for the publish-on-change pattern.
        assert_eq!(tree.layout(&p).unwrap(), tree.layout(&p).unwrap());
    }

    #[test]
    fn empty_tree_layout_is_degenerate() {
        let tree = Tree::new();
        let layout = tree.layout(&params(5.0, 5.0)).unwrap();
        assert_eq!(layout, Layout::default());
        assert!(layout.placements.is_empty());
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn multiple_roots_is_an_error() {
        let mut tree = Tree::new();
        let _a = tree.insert(None, Size::new(1.0, 1.0));
        let _b = tree.insert(None, Size::new(1.0, 1.0));
        assert_eq!(
            tree.layout(&params(0.0, 0.0)),
            Err(TreeError::MultipleRoots)
        );
    }

    #[test]
    fn orphan_is_excluded_from_placement() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(10.0, 10.0));
        let _child = tree.insert(Some(root), Size::new(10.0, 10.0));
        let doomed = tree.insert(Some(root), Size::new(10.0, 10.0));
        tree.remove(doomed);
        let orphan = tree.insert(Some(doomed), Size::new(10.0, 10.0));

        let layout = tree.layout(&params(5.0, 5.0)).unwrap();
        assert_eq!(layout.placements.get(orphan), None);
        assert_eq!(layout.placements.len(), 2);
    }

    #[test]
    fn resizing_a_node_feeds_the_next_pass() {
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(30.0, 10.0));
        let leaf = tree.insert(Some(root), Size::new(30.0, 10.0));
        let p = params(0.0, 20.0);

        let before = tree.layout(&p).unwrap();
        tree.set_intrinsic_size(leaf, Size::new(60.0, 10.0));
        let after = tree.layout(&p).unwrap();
        assert_ne!(before, after);
        assert_eq!(after.size, Size::new(60.0, 40.0));
        assert_eq!(after.placements.get(leaf).unwrap().width(), 60.0);
    }

    #[test]
    fn wider_parent_keeps_children_at_left_edge() {
        // When the parent's own content is wider than the children row, the
        // children are laid out from the bounds' left edge, not centered.
        let mut tree = Tree::new();
        let root = tree.insert(None, Size::new(200.0, 10.0));
        let a = tree.insert(Some(root), Size::new(20.0, 10.0));
        let p = params(5.0, 10.0);

        let layout = tree.layout(&p).unwrap();
        assert_eq!(layout.size, Size::new(200.0, 30.0));
        let ra = layout.placements.get(a).unwrap();
        // Child subtree slot starts at x = 0 and is 20 wide; the child is
        // centered within it.
        assert_eq!(ra, Rect::new(0.0, 20.0, 20.0, 30.0));
    }
}
