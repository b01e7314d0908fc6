// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree storage: an owned, slotted arena of nodes with intrinsic sizes.

use alloc::vec::Vec;
use core::fmt;
use kurbo::Size;

use crate::types::NodeId;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) size: Size,
}

impl Node {
    fn new(generation: u32, parent: Option<NodeId>, size: Size) -> Self {
        Self {
            generation,
            parent,
            children: Vec::new(),
            size,
        }
    }
}

/// Structural error surfaced by [`Tree::root`] (and the layout driver).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// More than one live node has no parent.
    ///
    /// A well-formed layout tree has exactly one root. This is reported as an
    /// explicit error rather than silently picking the first match.
    MultipleRoots,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleRoots => write!(f, "tree has more than one root node"),
        }
    }
}

impl core::error::Error for TreeError {}

/// Owned layout tree.
///
/// Holds the structure (parent/child links, in declared order) and each node's
/// intrinsic content size. All layout output is derived from this on demand;
/// nothing layout-related is cached across passes.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node with the given intrinsic content size.
    ///
    /// With `parent: None` the node becomes a root. With a live parent it is
    /// appended to that parent's child list; child order is declaration order
    /// and determines left-to-right placement.
    ///
    /// A stale or dead `parent` id is a caller-side data bug: the node is
    /// still allocated (its id is returned) but it is never linked into any
    /// child list, so layout silently excludes it. [`Tree::validate`] reports
    /// such orphans.
    pub fn insert(&mut self, parent: Option<NodeId>, size: Size) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, parent, size));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, parent, size)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.node_mut(p).children.push(id);
        }
        id
    }

    /// Remove a node and its entire subtree from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (or detach it into a root if `None`).
    ///
    /// The node keeps its subtree. Reparenting under a stale parent id leaves
    /// the node orphaned, as with [`Tree::insert`].
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.node_mut(id).parent = new_parent;
        if let Some(p) = new_parent
            && self.is_alive(p)
        {
            self.node_mut(p).children.push(id);
        }
    }

    /// Update a node's intrinsic content size.
    pub fn set_intrinsic_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.size = size;
        }
    }

    /// Returns the intrinsic content size of a live node.
    pub fn intrinsic_size(&self, id: NodeId) -> Option<Size> {
        self.node_opt(id).map(|n| n.size)
    }

    /// Returns the parent of a live node (`None` for roots and stale ids).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Returns the children of a node in declared (placement) order.
    ///
    /// Stale ids yield an empty slice.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.is_none())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.generation())
            .unwrap_or(false)
    }

    /// Find the unique root: the single live node with no parent.
    ///
    /// Returns `Ok(None)` for an empty tree and
    /// [`TreeError::MultipleRoots`] when more than one parentless live node
    /// exists. An orphaned node (see [`Tree::insert`]) has a parent id and
    /// does not count as a root.
    pub fn root(&self) -> Result<Option<NodeId>, TreeError> {
        let mut root = None;
        for id in self.live_ids() {
            if self.node(id).parent.is_none() {
                if root.is_some() {
                    return Err(TreeError::MultipleRoots);
                }
                root = Some(id);
            }
        }
        Ok(root)
    }

    /// Integrity pass: ids of live nodes unreachable from any root.
    ///
    /// These are orphans (their parent id is stale or was never linked) and
    /// the descendants of orphans. Layout excludes them silently; hosts that
    /// want to surface the data bug can run this before laying out.
    pub fn validate(&self) -> Vec<NodeId> {
        let mut reachable = alloc::vec![false; self.nodes.len()];
        for id in self.live_ids() {
            if self.node(id).parent.is_none() {
                self.mark_reachable(id, &mut reachable);
            }
        }
        self.live_ids()
            .filter(|id| !reachable[id.idx()])
            .collect()
    }

    // --- internals ---

    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                NodeId::new(i as u32, n.generation)
            })
        })
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if !self.is_alive(parent) {
            // Orphan: the parent id was stale at insert time, nothing to unlink.
            return;
        }
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn mark_reachable(&self, id: NodeId, reachable: &mut [bool]) {
        reachable[id.idx()] = true;
        for &child in &self.node(id).children {
            self.mark_reachable(child, reachable);
        }
    }
}
