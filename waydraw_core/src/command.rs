// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete history navigation commands.
//!
//! Hosts translate key presses into [`Command`] values and hand them to
//! [`HistoryTree::apply`] (or [`Canvas::apply`](crate::canvas::Canvas::apply)
//! for a per-output tree). Keysym lookup stays in the host; the default
//! binding is available as [`Command::from_key`].

use crate::history::HistoryTree;

/// A navigation command over a [`HistoryTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move to the parent version.
    Undo,
    /// Move to the most recently visited child version.
    Redo,
    /// Move to the previous version in creation order.
    StepEarlier,
    /// Move to the next version in creation order.
    StepLater,
}

impl Command {
    /// All commands, in binding order.
    pub const ALL: [Self; 4] = [Self::Undo, Self::Redo, Self::StepEarlier, Self::StepLater];

    /// Maps a translated key to a command using the default binding.
    ///
    /// | Key        | Command         |
    /// |------------|-----------------|
    /// | Ctrl+z     | `Undo`          |
    /// | Ctrl+Z     | `Redo`          |
    /// | Ctrl+x     | `StepEarlier`   |
    /// | Ctrl+X     | `StepLater`     |
    ///
    /// `key` is the already-translated character, so Shift is encoded in its
    /// case. Keys without Control never map to a command.
    #[must_use]
    pub fn from_key(key: char, ctrl: bool) -> Option<Self> {
        if !ctrl {
            return None;
        }
        match key {
            'z' => Some(Self::Undo),
            'Z' => Some(Self::Redo),
            'x' => Some(Self::StepEarlier),
            'X' => Some(Self::StepLater),
            _ => None,
        }
    }

    /// Short lowercase name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::StepEarlier => "earlier",
            Self::StepLater => "later",
        }
    }
}

impl HistoryTree {
    /// Applies a navigation command.
    ///
    /// Returns `true` if the current node changed, in which case the host
    /// should re-present the current buffer.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::StepEarlier => self.step_earlier(),
            Command::StepLater => self.step_later(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        assert_eq!(Command::from_key('z', true), Some(Command::Undo));
        assert_eq!(Command::from_key('Z', true), Some(Command::Redo));
        assert_eq!(Command::from_key('x', true), Some(Command::StepEarlier));
        assert_eq!(Command::from_key('X', true), Some(Command::StepLater));
    }

    #[test]
    fn keys_without_control_are_ignored() {
        for key in ['z', 'Z', 'x', 'X'] {
            assert_eq!(Command::from_key(key, false), None, "key {key}");
        }
        assert_eq!(Command::from_key('q', true), None);
    }

    #[test]
    fn apply_dispatches_to_tree() {
        let mut tree = HistoryTree::new(2, 2).unwrap();
        let root = tree.root();
        let a = tree.fork();

        assert!(tree.apply(Command::Undo));
        assert_eq!(tree.current(), root);
        assert!(tree.apply(Command::Redo));
        assert_eq!(tree.current(), a);
        assert!(tree.apply(Command::StepEarlier));
        assert_eq!(tree.current(), root);
        assert!(tree.apply(Command::StepLater));
        assert_eq!(tree.current(), a);
        assert!(!tree.apply(Command::StepLater));
        assert!(!tree.apply(Command::Redo));
    }

    #[test]
    fn names_are_distinct() {
        for (i, a) in Command::ALL.iter().enumerate() {
            for b in &Command::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
