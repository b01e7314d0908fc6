// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layout tree: node identifiers and layout parameters.

use core::fmt;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Spacing parameters for one layout pass.
///
/// - `node_separation` is the horizontal gap between adjacent sibling subtree
///   bounding boxes.
/// - `row_separation` is the vertical gap between a parent's content and the
///   row its children occupy.
///
/// Construct via [`LayoutParams::new`] to get validation (negative or
/// non-finite separations are rejected with [`ParamsError`]). The fields are
/// public, so a struct literal bypasses validation; negative separations then
/// produce overlapping layouts rather than an error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutParams {
    /// Minimum horizontal gap between sibling subtrees.
    pub node_separation: f64,
    /// Vertical gap between a parent's content and its children's row.
    pub row_separation: f64,
}

impl LayoutParams {
    /// Create validated parameters.
    ///
    /// Returns an error if either separation is negative, NaN, or infinite.
    /// Zero is allowed and means nodes may touch.
    pub fn new(node_separation: f64, row_separation: f64) -> Result<Self, ParamsError> {
        for sep in [node_separation, row_separation] {
            if !sep.is_finite() {
                return Err(ParamsError::NonFiniteSeparation);
            }
            if sep < 0.0 {
                return Err(ParamsError::NegativeSeparation);
            }
        }
        Ok(Self {
            node_separation,
            row_separation,
        })
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_separation: 0.0,
            row_separation: 0.0,
        }
    }
}

/// Invalid [`LayoutParams`] passed to [`LayoutParams::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamsError {
    /// A separation was negative.
    NegativeSeparation,
    /// A separation was NaN or infinite.
    NonFiniteSeparation,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeSeparation => write!(f, "separation must be non-negative"),
            Self::NonFiniteSeparation => write!(f, "separation must be finite"),
        }
    }
}

impl core::error::Error for ParamsError {}
