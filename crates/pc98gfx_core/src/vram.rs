/*
    pc98gfx

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    ---------------------------------------------------------------------------

    vram.rs

    Bit-plane memory.

*/

//! Plane memory abstraction and an in-memory implementation of the four graphics planes.
//!
//! A fully equipped display has four planes of 32k each. Plane memory is byte addressed;
//! each byte holds eight horizontally adjacent pixels, most significant bit leftmost.

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub const PLANE_COUNT: usize = 4;
pub const GFX_PLANE_SIZE: usize = 0x8000;

/// The four bit-planes. Bit `n` of a 4-bit color index lives in plane `n`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Bitplane {
    Blue = 0,
    Red = 1,
    Green = 2,
    Intensity = 3,
}

impl Bitplane {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The bit of a color index that this plane stores.
    #[inline]
    pub fn color_bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Indexed byte access to the four bit-planes.
pub trait PlaneMemory {
    /// Length of each plane in bytes.
    fn plane_len(&self) -> usize;
    fn read_u8(&self, plane: Bitplane, offset: usize) -> u8;
    fn write_u8(&mut self, plane: Bitplane, offset: usize, data: u8);
}

/// Four planes held in host memory.
///
/// Writes are also linearized into one 4bpp byte per pixel, so that a frontend or test can
/// inspect the frame without reassembling planes.
pub struct Vram {
    planes: [Box<[u8]>; PLANE_COUNT],
    linear_buf: Box<[u8]>,
}

impl Default for Vram {
    fn default() -> Self {
        Vram::new()
    }
}

impl Vram {
    pub fn new() -> Self {
        Vram::with_plane_len(GFX_PLANE_SIZE)
    }

    pub fn with_plane_len(len: usize) -> Self {
        Self {
            planes: std::array::from_fn(|_| vec![0; len].into_boxed_slice()),
            linear_buf: vec![0; len * 8].into_boxed_slice(),
        }
    }

    pub fn plane_slice(&self, plane: Bitplane) -> &[u8] {
        &self.planes[plane.index()]
    }

    /// Return the 4bpp color of the pixel at the given linear pixel index.
    #[inline]
    pub fn read_linear(&self, index: usize) -> u8 {
        self.linear_buf[index]
    }

    /// The 8 linear pixels covered by one plane byte offset.
    #[inline]
    pub fn pixels_at(&self, offset: usize) -> &[u8] {
        let start = offset * 8;
        &self.linear_buf[start..start + 8]
    }

    pub fn clear(&mut self) {
        for plane in self.planes.iter_mut() {
            plane.fill(0);
        }
        self.linear_buf.fill(0);
    }

    /// Rebuild the 8 linear pixels held by `offset` from the four planes.
    fn deplane(&mut self, offset: usize) {
        let pixels = &mut self.linear_buf[offset * 8..offset * 8 + 8];
        pixels.fill(0);
        for plane in Bitplane::iter() {
            let byte = self.planes[plane.index()][offset];
            for (n, pixel) in pixels.iter_mut().enumerate() {
                if byte & (0x80 >> n) != 0 {
                    *pixel |= plane.color_bit();
                }
            }
        }
    }
}

impl PlaneMemory for Vram {
    fn plane_len(&self) -> usize {
        self.planes[0].len()
    }

    #[inline]
    fn read_u8(&self, plane: Bitplane, offset: usize) -> u8 {
        self.planes[plane.index()][offset]
    }

    #[inline]
    fn write_u8(&mut self, plane: Bitplane, offset: usize, data: u8) {
        self.planes[plane.index()][offset] = data;
        self.deplane(offset);
    }
}
