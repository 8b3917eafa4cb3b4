// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays history storage with fork and navigation.

use alloc::vec::Vec;

use super::id::NodeId;
use super::traverse::{Ancestors, Children, Chronological};
use crate::list::{INVALID, Links, List};
use crate::raster::{RasterBuffer, RasterError};

/// A tree of raster snapshots with a movable `current` node.
///
/// Every node ever created is owned by the tree until it is dropped. Nodes
/// are addressed by [`NodeId`] handles and stored in parallel arrays; two
/// intrusive lists are threaded through the same slots:
///
/// - the *sibling* list of each node's children, used by
///   [`undo`](Self::undo)/[`redo`](Self::redo), and
/// - the single *chronological* list, used by
///   [`step_earlier`](Self::step_earlier)/[`step_later`](Self::step_later).
///
/// Only the buffer of the current node may be mutated, through
/// [`current_buffer_mut`](Self::current_buffer_mut). Forking freezes it by
/// moving `current` onto a fresh node.
#[derive(Debug)]
pub struct HistoryTree {
    // -- Topology --
    parent: Vec<u32>,
    children: Vec<List>,
    siblings: Links,

    // -- Chronology --
    chrono: Links,
    chronological: List,

    // -- Content --
    buffers: Vec<RasterBuffer>,
    width: u32,
    height: u32,

    // -- Cursor --
    current: u32,
}

impl HistoryTree {
    /// Creates a tree whose root holds a blank `width` x `height` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if the root buffer cannot be
    /// allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let root = RasterBuffer::new(width, height)?;
        let mut tree = Self {
            parent: Vec::new(),
            children: Vec::new(),
            siblings: Links::new(),
            chrono: Links::new(),
            chronological: List::EMPTY,
            buffers: Vec::new(),
            width,
            height,
            current: 0,
        };
        let idx = tree.push_slot(INVALID, root);
        tree.chrono.insert_last(idx, &mut tree.chronological);
        tree.current = idx;
        Ok(tree)
    }

    // -- Fork API --

    /// Commits the current buffer as a new version.
    ///
    /// The new node holds a clone of the current buffer, becomes the newest
    /// child of the current node and the newest element of the chronological
    /// sequence, and then becomes current. Forking from a node that already
    /// has children creates a sibling branch and leaves the existing branches
    /// untouched.
    pub fn fork(&mut self) -> NodeId {
        let buffer = self.buffers[self.current as usize].clone();
        self.attach(buffer)
    }

    /// Commits `buffer` as a new version without cloning the current buffer.
    ///
    /// Placement and the move of `current` are the same as for
    /// [`fork`](Self::fork); ownership of `buffer` moves into the tree.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::DimensionMismatch`] if `buffer` does not have
    /// the tree's dimensions. The tree is left unchanged.
    pub fn fork_with(&mut self, buffer: RasterBuffer) -> Result<NodeId, RasterError> {
        if buffer.dimensions() != self.dimensions() {
            return Err(RasterError::DimensionMismatch {
                expected: self.dimensions(),
                found: buffer.dimensions(),
            });
        }
        Ok(self.attach(buffer))
    }

    /// Forks only if the current node already has a child.
    ///
    /// On a leaf nothing happens and `None` is returned, so the caller keeps
    /// drawing into the current buffer. On a branch point this behaves
    /// exactly like [`fork`](Self::fork), so drawing after an undo never
    /// overwrites an explored future.
    pub fn fork_if_branching(&mut self) -> Option<NodeId> {
        if self.children[self.current as usize].is_empty() {
            None
        } else {
            Some(self.fork())
        }
    }

    // -- Navigation API --

    /// Moves `current` to its parent.
    ///
    /// The node being left is moved to the end of the parent's child list so
    /// that a following [`redo`](Self::redo) returns to it. Returns `false`
    /// (and does nothing) at the root.
    pub fn undo(&mut self) -> bool {
        let cur = self.current;
        let p = self.parent[cur as usize];
        if p == INVALID {
            return false;
        }

        let siblings = &mut self.children[p as usize];
        self.siblings.unlink(cur, Some(&mut *siblings));
        self.siblings.insert_last(cur, siblings);

        self.current = p;
        true
    }

    /// Moves `current` to its most recently visited child.
    ///
    /// Returns `false` (and does nothing) on a leaf.
    pub fn redo(&mut self) -> bool {
        match self.children[self.current as usize].last() {
            Some(child) => {
                self.current = child;
                true
            }
            None => false,
        }
    }

    /// Moves `current` to the previous node in creation order.
    ///
    /// Returns `false` (and does nothing) at the root.
    pub fn step_earlier(&mut self) -> bool {
        match self.chrono.prev(self.current) {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Moves `current` to the next node in creation order.
    ///
    /// Returns `false` (and does nothing) at the newest node.
    pub fn step_later(&mut self) -> bool {
        match self.chrono.next(self.current) {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    // -- Buffer access --

    /// Returns the buffer of the current node.
    #[must_use]
    pub fn current_buffer(&self) -> &RasterBuffer {
        &self.buffers[self.current as usize]
    }

    /// Returns the buffer of the current node for in-place drawing.
    ///
    /// Changes are not protected until the next fork commits them.
    pub fn current_buffer_mut(&mut self) -> &mut RasterBuffer {
        &mut self.buffers[self.current as usize]
    }

    /// Returns the buffer of any node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn buffer(&self, id: NodeId) -> &RasterBuffer {
        self.validate(id);
        &self.buffers[id.idx as usize]
    }

    // -- Queries --

    /// Returns the current node.
    #[inline]
    #[must_use]
    pub fn current(&self) -> NodeId {
        NodeId { idx: self.current }
    }

    /// Returns the root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes ever created, including the root.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.buffers.len()
    }

    /// Dimensions shared by every buffer in the tree.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the parent of a node, if any.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then_some(NodeId { idx: p })
    }

    /// Returns an iterator over the direct children of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self.siblings.iter(&self.children[id.idx as usize]))
    }

    /// Returns `true` if history has diverged at this node, i.e. it has at
    /// least one child.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn is_branch_point(&self, id: NodeId) -> bool {
        self.validate(id);
        !self.children[id.idx as usize].is_empty()
    }

    /// Returns an iterator over every node in creation order.
    #[must_use]
    pub fn chronological(&self) -> Chronological<'_> {
        Chronological::new(self.chrono.iter(&self.chronological))
    }

    /// Returns an iterator from `id` up to the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(&self.parent, id.idx)
    }

    /// Number of edges between `id` and the root.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }

    // -- Internal helpers --

    /// Panics if the handle does not belong to this tree.
    fn validate(&self, id: NodeId) {
        assert!(
            (id.idx as usize) < self.buffers.len(),
            "unknown NodeId: {id:?} (tree has {} nodes)",
            self.buffers.len()
        );
    }

    /// Allocates parallel-array slots for a node without linking it anywhere.
    fn push_slot(&mut self, parent: u32, buffer: RasterBuffer) -> u32 {
        let idx = self.siblings.push_unlinked();
        let chrono_idx = self.chrono.push_unlinked();
        debug_assert_eq!(idx, chrono_idx, "link tables out of step");
        self.parent.push(parent);
        self.children.push(List::EMPTY);
        self.buffers.push(buffer);
        idx
    }

    /// Appends a node under `current`, links it into both lists and makes it
    /// current.
    fn attach(&mut self, buffer: RasterBuffer) -> NodeId {
        let parent = self.current;
        let idx = self.push_slot(parent, buffer);
        self.siblings
            .insert_last(idx, &mut self.children[parent as usize]);
        self.chrono.insert_last(idx, &mut self.chronological);
        self.current = idx;
        NodeId { idx }
    }
}
