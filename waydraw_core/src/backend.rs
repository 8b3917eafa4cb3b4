// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for putting pixels on screen.
//!
//! The core never talks to a compositor. A host owns the protocol objects
//! (on Wayland: a layer-shell surface per output plus an shm pool) and
//! implements [`Presenter`] to copy a buffer into them. The
//! [`Canvas`](crate::canvas::Canvas) decides *what* to present and *when*.

use crate::damage::Damage;
use crate::output::OutputId;
use crate::raster::RasterBuffer;

/// Hands finished pixels to the platform.
///
/// Implemented by shm/compositor glue and by test doubles.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_key(output: OutputId, key: char, ctrl: bool) {
///     if let Some(cmd) = Command::from_key(key, ctrl) {
///         canvas.apply(output, cmd, &mut Tracer::none());
///     }
/// }
///
/// fn on_frame_done() {
///     // Copies `buffer.as_bytes()` into the output's shm buffer, attaches,
///     // damages and commits the surface.
///     canvas.present(&mut shm_presenter, &mut Tracer::none());
/// }
/// ```
pub trait Presenter {
    /// Presents `buffer` on `output`.
    ///
    /// `damage` is already clamped to the buffer's bounds and is never
    /// empty.
    fn present(&mut self, output: OutputId, buffer: &RasterBuffer, damage: &Damage);
}
