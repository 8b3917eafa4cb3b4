// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output surface identification.
//!
//! An overlay covers every display with its own surface, and each surface
//! keeps its own drawing history. [`OutputId`] names one such surface. Hosts
//! assign the values (typically from the `wl_output` global name); the core
//! never interprets them.

use core::fmt;

/// Identifies one drawable output surface.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OutputId(pub u32);

impl fmt::Debug for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputId({})", self.0)
    }
}
