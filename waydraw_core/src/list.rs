// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sentinel-free intrusive doubly-linked lists over arena slots.
//!
//! Elements are identified by raw `u32` slot indices into some arena owned
//! elsewhere. A [`Links`] table threads `prev`/`next` relations through those
//! slots, and a [`List`] only remembers its `first` and `last` element. The
//! list is non-circular: the first element's `prev` and the last element's
//! `next` are [`INVALID`], so no sentinel slot has to be allocated.
//!
//! A single [`Links`] table can carry many disjoint lists at once (every
//! node's child list shares one sibling table), as long as each slot is a
//! member of at most one of them.
//!
//! Unlinking an element that is not linked anywhere is a defined no-op.

use alloc::vec::Vec;

/// Sentinel value indicating "no element" in link and endpoint fields.
pub const INVALID: u32 = u32::MAX;

/// Endpoints of one list threaded through a [`Links`] table.
///
/// Plain bookkeeping: a default `List` is empty and needs no further
/// initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct List {
    first: u32,
    last: u32,
}

impl Default for List {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl List {
    /// A list with no elements.
    pub const EMPTY: Self = Self {
        first: INVALID,
        last: INVALID,
    };

    /// Returns the first element, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<u32> {
        (self.first != INVALID).then_some(self.first)
    }

    /// Returns the last element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<u32> {
        (self.last != INVALID).then_some(self.last)
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first == INVALID
    }
}

/// Per-slot `prev`/`next` links, stored as two parallel arrays.
#[derive(Clone, Debug, Default)]
pub struct Links {
    prev: Vec<u32>,
    next: Vec<u32>,
}

impl Links {
    /// Creates an empty link table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots in the table.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.prev.len()
    }

    /// Returns `true` if the table has no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prev.is_empty()
    }

    /// Appends one unlinked slot and returns its index.
    pub fn push_unlinked(&mut self) -> u32 {
        let idx = u32::try_from(self.prev.len()).unwrap_or(INVALID);
        assert!(idx != INVALID, "link table exceeds u32 slots");
        self.prev.push(INVALID);
        self.next.push(INVALID);
        idx
    }

    /// Returns the element after `elem`, if any.
    #[inline]
    #[must_use]
    pub fn next(&self, elem: u32) -> Option<u32> {
        let n = self.next[elem as usize];
        (n != INVALID).then_some(n)
    }

    /// Returns the element before `elem`, if any.
    #[inline]
    #[must_use]
    pub fn prev(&self, elem: u32) -> Option<u32> {
        let p = self.prev[elem as usize];
        (p != INVALID).then_some(p)
    }

    /// Removes `elem` from the list it is threaded through.
    ///
    /// If `list` is given, its endpoints are fixed when `elem` was its first
    /// or last element. Unlinking the sole member leaves the list empty.
    /// Unlinking an element that is not linked is a no-op.
    pub fn unlink(&mut self, elem: u32, list: Option<&mut List>) {
        let prev = self.prev[elem as usize];
        let next = self.next[elem as usize];

        if prev != INVALID {
            self.next[prev as usize] = next;
        }
        if next != INVALID {
            self.prev[next as usize] = prev;
        }

        if let Some(list) = list {
            if list.first == elem {
                list.first = next;
            }
            if list.last == elem {
                list.last = prev;
            }
        }

        self.prev[elem as usize] = INVALID;
        self.next[elem as usize] = INVALID;
    }

    /// Inserts the unlinked `elem` at the front of `list`.
    pub fn insert_first(&mut self, elem: u32, list: &mut List) {
        debug_assert!(
            self.prev[elem as usize] == INVALID
                && self.next[elem as usize] == INVALID
                && list.first != elem,
            "element {elem} is already linked"
        );

        self.prev[elem as usize] = INVALID;
        self.next[elem as usize] = list.first;
        if list.first != INVALID {
            self.prev[list.first as usize] = elem;
        } else {
            list.last = elem;
        }
        list.first = elem;
    }

    /// Inserts the unlinked `elem` at the back of `list`.
    pub fn insert_last(&mut self, elem: u32, list: &mut List) {
        debug_assert!(
            self.prev[elem as usize] == INVALID
                && self.next[elem as usize] == INVALID
                && list.last != elem,
            "element {elem} is already linked"
        );

        self.next[elem as usize] = INVALID;
        self.prev[elem as usize] = list.last;
        if list.last != INVALID {
            self.next[list.last as usize] = elem;
        } else {
            list.first = elem;
        }
        list.last = elem;
    }

    /// Returns an iterator over the elements of `list`, first to last.
    #[must_use]
    pub fn iter<'a>(&'a self, list: &List) -> Iter<'a> {
        Iter {
            links: self,
            current: list.first,
        }
    }
}

/// Forward iterator over the elements of a [`List`].
///
/// Created by [`Links::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    links: &'a Links,
    current: u32,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.links.next[idx as usize];
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn table(n: u32) -> Links {
        let mut links = Links::new();
        for _ in 0..n {
            links.push_unlinked();
        }
        links
    }

    fn collect(links: &Links, list: &List) -> Vec<u32> {
        links.iter(list).collect()
    }

    #[test]
    fn default_list_is_empty() {
        let links = table(0);
        let list = List::default();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert!(collect(&links, &list).is_empty());
    }

    #[test]
    fn insert_last_preserves_order() {
        let mut links = table(3);
        let mut list = List::EMPTY;
        links.insert_last(0, &mut list);
        links.insert_last(1, &mut list);
        links.insert_last(2, &mut list);
        assert_eq!(collect(&links, &list), vec![0, 1, 2]);
        assert_eq!(list.first(), Some(0));
        assert_eq!(list.last(), Some(2));
        assert_eq!(links.prev(0), None);
        assert_eq!(links.next(2), None);
    }

    #[test]
    fn insert_first_prepends() {
        let mut links = table(3);
        let mut list = List::EMPTY;
        links.insert_first(0, &mut list);
        links.insert_first(1, &mut list);
        links.insert_last(2, &mut list);
        assert_eq!(collect(&links, &list), vec![1, 0, 2]);
        assert_eq!(list.first(), Some(1));
        assert_eq!(list.last(), Some(2));
    }

    #[test]
    fn unlink_middle_and_endpoints() {
        let mut links = table(4);
        let mut list = List::EMPTY;
        for i in 0..4 {
            links.insert_last(i, &mut list);
        }

        links.unlink(1, Some(&mut list));
        assert_eq!(collect(&links, &list), vec![0, 2, 3]);

        links.unlink(0, Some(&mut list));
        assert_eq!(list.first(), Some(2));
        assert_eq!(links.prev(2), None);

        links.unlink(3, Some(&mut list));
        assert_eq!(list.last(), Some(2));
        assert_eq!(collect(&links, &list), vec![2]);
    }

    #[test]
    fn unlink_sole_member_empties_list() {
        let mut links = table(1);
        let mut list = List::EMPTY;
        links.insert_last(0, &mut list);
        links.unlink(0, Some(&mut list));
        assert!(list.is_empty());
        assert_eq!(list.last(), None);
    }

    #[test]
    fn unlink_is_idempotent() {
        let mut links = table(3);
        let mut list = List::EMPTY;
        for i in 0..3 {
            links.insert_last(i, &mut list);
        }

        links.unlink(2, Some(&mut list));
        links.unlink(2, Some(&mut list));
        assert_eq!(collect(&links, &list), vec![0, 1]);
        assert_eq!(list.last(), Some(1));

        // Never-linked slot.
        let fresh = links.push_unlinked();
        links.unlink(fresh, Some(&mut list));
        links.unlink(fresh, None);
        assert_eq!(collect(&links, &list), vec![0, 1]);
    }

    #[test]
    fn unlink_then_reinsert_last_moves_to_end() {
        let mut links = table(3);
        let mut list = List::EMPTY;
        for i in 0..3 {
            links.insert_last(i, &mut list);
        }

        links.unlink(0, Some(&mut list));
        links.insert_last(0, &mut list);
        assert_eq!(collect(&links, &list), vec![1, 2, 0]);

        // Re-splicing the element that is already last keeps the order.
        links.unlink(0, Some(&mut list));
        links.insert_last(0, &mut list);
        assert_eq!(collect(&links, &list), vec![1, 2, 0]);
    }

    #[test]
    fn one_table_carries_disjoint_lists() {
        let mut links = table(4);
        let mut evens = List::EMPTY;
        let mut odds = List::EMPTY;
        links.insert_last(0, &mut evens);
        links.insert_last(1, &mut odds);
        links.insert_last(2, &mut evens);
        links.insert_last(3, &mut odds);
        assert_eq!(collect(&links, &evens), vec![0, 2]);
        assert_eq!(collect(&links, &odds), vec![1, 3]);

        links.unlink(2, Some(&mut evens));
        assert_eq!(collect(&links, &evens), vec![0]);
        assert_eq!(collect(&links, &odds), vec![1, 3]);
    }
}
