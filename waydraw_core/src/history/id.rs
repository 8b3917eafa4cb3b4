// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! History node identity.

use core::fmt;

/// A handle to a node in a [`HistoryTree`](super::HistoryTree).
///
/// Nodes are never destroyed during a session, so a handle stays valid for
/// the lifetime of the tree that issued it. The raw index is the node's
/// creation sequence number: the root is `0` and every fork takes the next
/// value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
}

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self { idx: 0 };

    /// Returns the creation sequence number of the node.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.idx)
    }
}
