// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branching raster history.
//!
//! A *node* is one committed version of a drawing surface. Each node has:
//!
//! - An identity ([`NodeId`]) equal to its creation sequence number. Nodes
//!   are never destroyed while the tree lives, so handles never go stale.
//! - Lineage: a non-owning parent link and an ordered list of children. The
//!   child list records every branch ever explored from the node, not only
//!   the active one.
//! - A position in the tree-wide *chronological* sequence, which orders
//!   nodes by creation time regardless of lineage.
//! - An owned [`RasterBuffer`](crate::raster::RasterBuffer).
//!
//! [`HistoryTree`] navigates along both axes:
//!
//! ```text
//!        lineage (undo / redo)          time (step_earlier / step_later)
//!
//!              R                          R ── A ── B ── C
//!             / \
//!            A   C
//!            |
//!            B
//! ```
//!
//! # Commit discipline
//!
//! Only the current node's buffer is ever written, and only until something
//! forks from it. [`fork`](HistoryTree::fork) clones the current buffer into
//! a new child; [`fork_with`](HistoryTree::fork_with) adopts a buffer the
//! caller already rendered; [`fork_if_branching`](HistoryTree::fork_if_branching)
//! forks only when staying would hide an explored future.
//!
//! # Redo order
//!
//! [`undo`](HistoryTree::undo) moves the node it leaves to the end of its
//! parent's child list, and [`redo`](HistoryTree::redo) always follows the
//! last child. Redo therefore returns to whichever branch was most recently
//! departed from.

mod id;
mod traverse;
mod tree;

pub use id::NodeId;
pub use traverse::{Ancestors, Children, Chronological};
pub use tree::HistoryTree;
