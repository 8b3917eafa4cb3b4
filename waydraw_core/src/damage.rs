// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Regions of an output that need re-presenting.

use kurbo::Rect;

/// A region of an output's buffer that changed since it was last presented.
///
/// Backends can forward this to `wl_surface.damage_buffer` (or equivalent)
/// to limit how much the compositor re-reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Damage {
    /// Nothing changed; the previous present is still valid.
    #[default]
    None,
    /// One axis-aligned rectangle in buffer pixels.
    Rect(Rect),
    /// The entire buffer.
    Full,
}

impl Damage {
    /// Returns `true` if nothing needs re-presenting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Rect(r) => r.is_zero_area(),
            Self::Full => false,
        }
    }

    /// Merges another damage region into this one.
    ///
    /// Rectangles merge into their bounding box; `Full` absorbs everything.
    pub fn merge(&mut self, other: &Self) {
        *self = match (*self, *other) {
            (Self::Full, _) | (_, Self::Full) => Self::Full,
            (Self::None, o) => o,
            (s, Self::None) => s,
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(a.union(b)),
        };
    }

    /// Restricts the region to `bounds`, expanding `Full` to `bounds` itself.
    ///
    /// The result is snapped outward to whole pixels. A rectangle that falls
    /// completely outside `bounds` becomes [`Damage::None`].
    #[must_use]
    pub fn clamp_to(&self, bounds: Rect) -> Self {
        match self {
            Self::None => Self::None,
            Self::Full => Self::Rect(bounds),
            Self::Rect(r) => {
                let clipped = r.expand().intersect(bounds);
                if clipped.is_zero_area() {
                    Self::None
                } else {
                    Self::Rect(clipped)
                }
            }
        }
    }
}
