// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iterators over tree lineage and the chronological sequence.

use super::id::NodeId;
use crate::list;

/// An iterator over the direct children of a node, oldest branch first and
/// most recently visited branch last.
///
/// Created by [`HistoryTree::children`](super::HistoryTree::children).
#[derive(Debug)]
pub struct Children<'a> {
    inner: list::Iter<'a>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(inner: list::Iter<'a>) -> Self {
        Self { inner }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().map(|idx| NodeId { idx })
    }
}

/// An iterator over every node in creation order.
///
/// Created by [`HistoryTree::chronological`](super::HistoryTree::chronological).
#[derive(Debug)]
pub struct Chronological<'a> {
    inner: list::Iter<'a>,
}

impl<'a> Chronological<'a> {
    pub(crate) fn new(inner: list::Iter<'a>) -> Self {
        Self { inner }
    }
}

impl Iterator for Chronological<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().map(|idx| NodeId { idx })
    }
}

/// An iterator from a node up to the root, starting with the node itself.
///
/// Created by [`HistoryTree::ancestors`](super::HistoryTree::ancestors).
#[derive(Debug)]
pub struct Ancestors<'a> {
    parent: &'a [u32],
    current: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(parent: &'a [u32], start: u32) -> Self {
        Self {
            parent,
            current: start,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == list::INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.parent[idx as usize];
        Some(NodeId { idx })
    }
}
