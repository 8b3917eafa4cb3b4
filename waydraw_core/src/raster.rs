// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-size ARGB raster buffers.
//!
//! A [`RasterBuffer`] owns `width * height` packed pixels. Each pixel is a
//! native-endian `u32` in `0xAARRGGBB` order, which is the `ARGB8888` layout
//! `wl_shm` expects, so [`as_bytes`](RasterBuffer::as_bytes) can be copied
//! into a shared-memory pool without conversion. Color channels are
//! premultiplied by alpha, as `wl_shm` and Cairo expect; the only blend
//! this module performs is [`composite_over`](RasterBuffer::composite_over).
//!
//! Buffers are never resized after creation. The stride is always equal to
//! the width.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

/// A fully transparent pixel.
pub const TRANSPARENT: u32 = 0x0000_0000;

/// Errors from raster buffer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel storage for a `width` x `height` buffer could not be obtained.
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Two buffers that must share dimensions do not.
    DimensionMismatch {
        /// Dimensions required by the destination, as `(width, height)`.
        expected: (u32, u32),
        /// Dimensions of the buffer actually supplied.
        found: (u32, u32),
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation { width, height } => {
                write!(f, "failed to allocate {width}x{height} raster buffer")
            }
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "raster dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl core::error::Error for RasterError {}

/// An owned, fixed-size pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RasterBuffer {
    /// Creates a fully transparent buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if the pixel count overflows or
    /// the allocator cannot provide the storage.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let mut pixels = alloc_pixels(width, height)?;
        pixels.resize(area(width, height), TRANSPARENT);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a new buffer with the same dimensions and pixels.
    ///
    /// The copy is fully materialized; later writes to either buffer never
    /// affect the other.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if storage cannot be obtained.
    pub fn try_clone(&self) -> Result<Self, RasterError> {
        let mut pixels = alloc_pixels(self.width, self.height)?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Overwrites this buffer's pixels with those of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::DimensionMismatch`] if the dimensions differ,
    /// in which case `self` is left unchanged.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), RasterError> {
        if self.dimensions() != src.dimensions() {
            return Err(RasterError::DimensionMismatch {
                expected: self.dimensions(),
                found: src.dimensions(),
            });
        }
        self.pixels.copy_from_slice(&src.pixels);
        Ok(())
    }

    /// Paints `overlay` on top of this buffer with premultiplied
    /// source-over blending.
    ///
    /// Transparent overlay pixels leave the destination untouched and opaque
    /// ones replace it.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::DimensionMismatch`] if the dimensions differ,
    /// in which case `self` is left unchanged.
    pub fn composite_over(&mut self, overlay: &Self) -> Result<(), RasterError> {
        if self.dimensions() != overlay.dimensions() {
            return Err(RasterError::DimensionMismatch {
                expected: self.dimensions(),
                found: overlay.dimensions(),
            });
        }
        for (dst, &src) in self.pixels.iter_mut().zip(&overlay.pixels) {
            *dst = over(src, *dst);
        }
        Ok(())
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as `(width, height)`.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row stride in pixels. Always equal to the width.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.width
    }

    /// Row stride in bytes.
    #[inline]
    #[must_use]
    pub fn stride_bytes(&self) -> usize {
        self.width as usize * size_of::<u32>()
    }

    /// The buffer extent as a rectangle at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Row-major pixels.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable row-major pixels.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The pixels viewed as bytes, ready for a shared-memory copy.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of range.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Writes a pixel. Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = argb;
        }
    }

    /// Fills every pixel with `argb`.
    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Makes every pixel fully transparent.
    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Overwrites `dst` with the pixels of `src`.
///
/// Free-function form of [`RasterBuffer::copy_from`].
///
/// # Errors
///
/// Returns [`RasterError::DimensionMismatch`] if the dimensions differ.
pub fn copy_into(dst: &mut RasterBuffer, src: &RasterBuffer) -> Result<(), RasterError> {
    dst.copy_from(src)
}

/// Premultiplied source-over for one `0xAARRGGBB` pixel.
fn over(src: u32, dst: u32) -> u32 {
    let inv = 255 - (src >> 24);
    match inv {
        0 => src,
        255 if src == TRANSPARENT => dst,
        _ => [0, 8, 16, 24].iter().fold(0, |out, &shift| {
            let s = (src >> shift) & 0xff;
            let d = (dst >> shift) & 0xff;
            let c = (s + (d * inv + 127) / 255).min(255);
            out | (c << shift)
        }),
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Reserves exactly enough (empty) storage for a `width` x `height` buffer.
fn alloc_pixels(width: u32, height: u32) -> Result<Vec<u32>, RasterError> {
    let err = RasterError::Allocation { width, height };
    let len = (width as usize).checked_mul(height as usize).ok_or(err)?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| err)?;
    Ok(pixels)
}
