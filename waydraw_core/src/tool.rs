// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-seat drawing tool state.
//!
//! A [`Tool`] is what the next stroke will look like: shape, width and
//! color. Each seat owns one; the [`Canvas`](crate::canvas::Canvas) reads it
//! when a stroke begins.

use crate::canvas::CanvasConfig;
use crate::stroke::ShapeKind;

/// Stroke colors, cycled with Tab and Shift+Tab. `0xAARRGGBB`, opaque.
pub const PALETTE: [u32; 6] = [
    0xffff_0000,
    0xff00_ff00,
    0xff00_00ff,
    0xffff_ff00,
    0xffff_00ff,
    0xff00_ffff,
];

impl ShapeKind {
    /// Maps a translated key to a shape using the default binding: `b`rush,
    /// `l`ine, `r`ectangle, `c`ircle.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'b' => Some(Self::Brush),
            'l' => Some(Self::Line),
            'r' => Some(Self::Rectangle),
            'c' => Some(Self::Circle),
            _ => None,
        }
    }
}

/// Shape, width and color of the next stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tool {
    kind: ShapeKind,
    width: f64,
    min_width: f64,
    scroll_sensitivity: f64,
    color_index: usize,
}

impl Tool {
    /// Creates a brush with the configured initial width and the first
    /// palette color.
    #[must_use]
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            kind: ShapeKind::Brush,
            width: config.initial_stroke_width.max(config.min_stroke_width),
            min_width: config.min_stroke_width,
            scroll_sensitivity: config.scroll_sensitivity,
            color_index: 0,
        }
    }

    /// The selected shape.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Selects a shape.
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Adjusts the width by a scroll-axis value, never going below the
    /// configured minimum.
    ///
    /// Returns `true` if the whole-pixel cursor size changed, so the host
    /// knows to redraw its cursor.
    pub fn scroll(&mut self, axis_value: f64) -> bool {
        let old = libm::ceil(self.width);
        self.width = (self.width + axis_value * self.scroll_sensitivity).max(self.min_width);
        libm::ceil(self.width) != old
    }

    /// The selected color as `0xAARRGGBB`.
    #[must_use]
    pub fn color(&self) -> u32 {
        PALETTE[self.color_index]
    }

    /// Selects the next palette color, wrapping around.
    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTE.len();
    }

    /// Selects the previous palette color, wrapping around.
    pub fn prev_color(&mut self) {
        self.color_index = self
            .color_index
            .checked_sub(1)
            .unwrap_or(PALETTE.len() - 1);
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::new(&CanvasConfig::DEFAULT)
    }
}
