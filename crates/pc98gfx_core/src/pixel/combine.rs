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

    pixel::combine.rs

    Draw mode logical operations and plane packing.

*/

//! The draw-mode combine function, shared by the pixel and byte write paths, and the
//! helpers that move colors in and out of plane bytes.

use crate::{
    state::DrawMode,
    vram::{Bitplane, PLANE_COUNT},
};
use strum::IntoEnumIterator;

impl DrawMode {
    /// Combine `src` into `dest`. Only bits set in `mask` may change; a single-pixel write
    /// passes that pixel's bit, a whole-byte write passes 0xFF.
    #[inline]
    pub fn combine(self, dest: u8, src: u8, mask: u8) -> u8 {
        match self {
            // Clear masked bits from dest, set them from src
            DrawMode::Replace => (src & mask) | (!mask & dest),
            DrawMode::And => (src | !mask) & dest,
            DrawMode::Or => (src & mask) | dest,
            DrawMode::Xor => (src & mask) ^ dest,
        }
    }
}

/// Extend the bit of `color` stored in `plane` to 8 bits.
#[inline]
pub fn expand_bit(color: u8, plane: Bitplane) -> u8 {
    match color & plane.color_bit() != 0 {
        true => 0xFF,
        false => 0x00,
    }
}

/// Expand a color into the byte written to each plane by a fill.
#[inline]
pub fn broadcast(color: u8) -> [u8; PLANE_COUNT] {
    let mut bytes = [0; PLANE_COUNT];
    for plane in Bitplane::iter() {
        bytes[plane.index()] = expand_bit(color, plane);
    }
    bytes
}

/// Pack 8 consecutive pixel colors into one byte per plane, leftmost pixel in the most
/// significant bit.
#[inline]
pub fn pack(colors: &[u8]) -> [u8; PLANE_COUNT] {
    let mut bytes = [0; PLANE_COUNT];
    for (n, color) in colors.iter().take(8).enumerate() {
        for plane in Bitplane::iter() {
            if color & plane.color_bit() != 0 {
                bytes[plane.index()] |= 0x80 >> n;
            }
        }
    }
    bytes
}

/// Unpack one byte per plane into 8 pixel colors. The inverse of [pack].
#[inline]
pub fn unpack(bytes: [u8; PLANE_COUNT], out: &mut [u8]) {
    for (n, color) in out.iter_mut().take(8).enumerate() {
        let mask = 0x80 >> n;
        *color = 0;
        for plane in Bitplane::iter() {
            if bytes[plane.index()] & mask != 0 {
                *color |= plane.color_bit();
            }
        }
    }
}
