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

    pixel::mod.rs

    Planar pixel read/write engine.

*/

//! The planar pixel engine.
//!
//! Pixel `(x, y)` lives at byte `y * (width / 8) + x / 8` of every plane, at bit
//! `7 - (x % 8)`. Range operations treat the rectangle from `(x1, y1)` to `(x2, y2)` as one
//! contiguous row-major run of pixels: pixels up to the first byte boundary are written
//! one at a time, the interior one byte per plane per 8 pixels, and the remainder one at a
//! time again.

mod combine;

pub use combine::{broadcast, expand_bit, pack, unpack};

use crate::{
    driver::Gfx,
    error::GfxError,
    io::GfxBus,
    state::DrawMode,
    vram::{Bitplane, PlaneMemory, PLANE_COUNT},
};
use strum::IntoEnumIterator;

pub const PIXELS_PER_BYTE: usize = 8;

/// The byte offset and bit mask of one pixel within every plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelAddress {
    pub offset: usize,
    pub mask: u8,
}

impl PixelAddress {
    #[inline]
    pub fn new(x: u32, y: u32, width: u32) -> Self {
        Self {
            offset: y as usize * (width as usize >> 3) + (x as usize >> 3),
            mask: 0x80 >> (x & 7),
        }
    }
}

/// Inclusive run of linear pixel indices (`y * width + x`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        log::trace!("Draw mode: {}", mode);
        self.state.draw_mode = mode;
    }

    #[inline]
    pub fn draw_mode(&self) -> DrawMode {
        self.state.draw_mode
    }

    /// Write a single pixel, combining each color bit into its plane under the current draw
    /// mode.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u8) -> Result<(), GfxError> {
        let addr = self.locate(x, y).or_else(|e| self.fail(e))?;
        self.plot(addr, color);
        Ok(())
    }

    /// Read a single pixel's 4-bit color.
    pub fn get_pixel(&mut self, x: u32, y: u32) -> Result<u8, GfxError> {
        let addr = self.locate(x, y).or_else(|e| self.fail(e))?;
        Ok(self.peek(addr))
    }

    /// Write `colors` to the run of pixels from `(x1, y1)` to `(x2, y2)` in row-major order.
    /// `colors` must hold at least one entry per pixel in the run.
    pub fn set_range(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, colors: &[u8]) -> Result<(), GfxError> {
        let span = self.span(x1, y1, x2, y2).or_else(|e| self.fail(e))?;
        if colors.len() < span.len() {
            return self.fail(GfxError::BufferTooSmall {
                needed:   span.len(),
                provided: colors.len(),
            });
        }

        let mut index = span.start;
        let mut n = 0;

        // Fill pixels up until we can do whole-byte addressing.
        while index % PIXELS_PER_BYTE != 0 && index <= span.end {
            self.plot(self.linear_address(index), colors[n]);
            index += 1;
            n += 1;
        }

        // Address whole bytes.
        while index + PIXELS_PER_BYTE - 1 <= span.end {
            let bytes = pack(&colors[n..n + PIXELS_PER_BYTE]);
            self.write_byte(self.linear_address(index).offset, bytes);
            index += PIXELS_PER_BYTE;
            n += PIXELS_PER_BYTE;
        }

        // Address leftover pixels.
        while index <= span.end {
            self.plot(self.linear_address(index), colors[n]);
            index += 1;
            n += 1;
        }
        Ok(())
    }

    /// Read the run of pixels from `(x1, y1)` to `(x2, y2)` into `out`, mirroring the access
    /// pattern of [Gfx::set_range]. Returns the number of pixels read.
    pub fn get_range(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, out: &mut [u8]) -> Result<usize, GfxError> {
        let span = self.span(x1, y1, x2, y2).or_else(|e| self.fail(e))?;
        if out.len() < span.len() {
            return self.fail(GfxError::BufferTooSmall {
                needed:   span.len(),
                provided: out.len(),
            });
        }

        let mut index = span.start;
        let mut n = 0;

        while index % PIXELS_PER_BYTE != 0 && index <= span.end {
            out[n] = self.peek(self.linear_address(index));
            index += 1;
            n += 1;
        }

        while index + PIXELS_PER_BYTE - 1 <= span.end {
            let bytes = self.read_byte(self.linear_address(index).offset);
            unpack(bytes, &mut out[n..n + PIXELS_PER_BYTE]);
            index += PIXELS_PER_BYTE;
            n += PIXELS_PER_BYTE;
        }

        while index <= span.end {
            out[n] = self.peek(self.linear_address(index));
            index += 1;
            n += 1;
        }
        Ok(n)
    }

    /// Fill the run of pixels from `(x1, y1)` to `(x2, y2)` with one color. Interior bytes are
    /// written as a broadcast of each color bit, so the cost is per byte rather than per pixel.
    pub fn fill_range(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, color: u8) -> Result<(), GfxError> {
        let span = self.span(x1, y1, x2, y2).or_else(|e| self.fail(e))?;
        let bytes = broadcast(color);

        let mut index = span.start;
        while index % PIXELS_PER_BYTE != 0 && index <= span.end {
            self.plot(self.linear_address(index), color);
            index += 1;
        }

        while index + PIXELS_PER_BYTE - 1 <= span.end {
            self.write_byte(self.linear_address(index).offset, bytes);
            index += PIXELS_PER_BYTE;
        }

        while index <= span.end {
            self.plot(self.linear_address(index), color);
            index += 1;
        }
        Ok(())
    }

    /// Validate a coordinate against the current geometry and the plane size.
    fn locate(&self, x: u32, y: u32) -> Result<PixelAddress, GfxError> {
        let (width, height) = (self.state.width, self.state.height);
        if x >= width || y >= height {
            return Err(GfxError::OutOfBounds { x, y, width, height });
        }
        let addr = PixelAddress::new(x, y, width);
        if addr.offset >= self.vram.plane_len() {
            return Err(GfxError::OutOfBounds { x, y, width, height });
        }
        Ok(addr)
    }

    fn span(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> Result<Span, GfxError> {
        self.locate(x1, y1)?;
        self.locate(x2, y2)?;
        let width = self.state.width as usize;
        let start = y1 as usize * width + x1 as usize;
        let end = y2 as usize * width + x2 as usize;
        if end < start {
            return Err(GfxError::InvalidRange { x1, y1, x2, y2 });
        }
        Ok(Span { start, end })
    }

    #[inline]
    fn linear_address(&self, index: usize) -> PixelAddress {
        let width = self.state.width as usize;
        PixelAddress::new((index % width) as u32, (index / width) as u32, self.state.width)
    }

    #[inline]
    fn plot(&mut self, addr: PixelAddress, color: u8) {
        let mode = self.state.draw_mode;
        for plane in Bitplane::iter() {
            let dest = self.vram.read_u8(plane, addr.offset);
            let data = mode.combine(dest, expand_bit(color, plane), addr.mask);
            self.vram.write_u8(plane, addr.offset, data);
        }
    }

    #[inline]
    fn peek(&self, addr: PixelAddress) -> u8 {
        let mut color = 0;
        for plane in Bitplane::iter() {
            if self.vram.read_u8(plane, addr.offset) & addr.mask != 0 {
                color |= plane.color_bit();
            }
        }
        color
    }

    #[inline]
    fn write_byte(&mut self, offset: usize, bytes: [u8; PLANE_COUNT]) {
        let mode = self.state.draw_mode;
        for plane in Bitplane::iter() {
            let data = match mode {
                DrawMode::Replace => bytes[plane.index()],
                _ => mode.combine(self.vram.read_u8(plane, offset), bytes[plane.index()], 0xFF),
            };
            self.vram.write_u8(plane, offset, data);
        }
    }

    #[inline]
    fn read_byte(&self, offset: usize) -> [u8; PLANE_COUNT] {
        let mut bytes = [0; PLANE_COUNT];
        for plane in Bitplane::iter() {
            bytes[plane.index()] = self.vram.read_u8(plane, offset);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sim::SimBus, state::GfxMode, vram::Vram};

    fn gfx_640x400() -> Gfx<SimBus, Vram> {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Graphics640x400x16).unwrap();
        gfx
    }

    #[test]
    fn addressing_is_msb_first() {
        let addr = PixelAddress::new(0, 0, 640);
        assert_eq!(addr, PixelAddress { offset: 0, mask: 0x80 });
        let addr = PixelAddress::new(7, 0, 640);
        assert_eq!(addr, PixelAddress { offset: 0, mask: 0x01 });
        let addr = PixelAddress::new(9, 2, 640);
        assert_eq!(addr, PixelAddress { offset: 2 * 80 + 1, mask: 0x40 });
    }

    #[test]
    fn set_pixel_writes_each_plane() {
        let mut gfx = gfx_640x400();
        gfx.set_pixel(9, 2, 0b1010).unwrap();
        let offset = 2 * 80 + 1;
        assert_eq!(gfx.vram().read_u8(Bitplane::Blue, offset), 0x00);
        assert_eq!(gfx.vram().read_u8(Bitplane::Red, offset), 0x40);
        assert_eq!(gfx.vram().read_u8(Bitplane::Green, offset), 0x00);
        assert_eq!(gfx.vram().read_u8(Bitplane::Intensity, offset), 0x40);
        assert_eq!(gfx.vram().read_linear(2 * 640 + 9), 0b1010);
    }

    #[test]
    fn replace_then_get_returns_color() {
        let mut gfx = gfx_640x400();
        let points = [(0, 0), (1, 0), (7, 0), (8, 0), (639, 0), (320, 200), (639, 399), (13, 397)];
        for (x, y) in points {
            for color in 0..16 {
                gfx.set_pixel(x, y, color).unwrap();
                assert_eq!(gfx.get_pixel(x, y).unwrap(), color, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn set_pixel_leaves_neighbours_alone() {
        let mut gfx = gfx_640x400();
        gfx.fill_range(0, 10, 15, 10, 0x9).unwrap();
        gfx.set_pixel(5, 10, 0x6).unwrap();
        for x in 0..16 {
            let expected = if x == 5 { 0x6 } else { 0x9 };
            assert_eq!(gfx.get_pixel(x, 10).unwrap(), expected);
        }
    }

    #[test]
    fn draw_modes_compose_bitwise() {
        let mut gfx = gfx_640x400();
        for mode in DrawMode::iter().filter(|m| *m != DrawMode::Replace) {
            for color1 in 0..16u8 {
                for color2 in 0..16u8 {
                    gfx.set_draw_mode(DrawMode::Replace);
                    gfx.set_pixel(100, 100, color1).unwrap();
                    gfx.set_draw_mode(mode);
                    gfx.set_pixel(100, 100, color2).unwrap();

                    let expected = match mode {
                        DrawMode::And => color1 & color2,
                        DrawMode::Or => color1 | color2,
                        DrawMode::Xor => color1 ^ color2,
                        DrawMode::Replace => unreachable!(),
                    };
                    assert_eq!(gfx.get_pixel(100, 100).unwrap(), expected, "{} {} {}", mode, color1, color2);
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut gfx = gfx_640x400();
        assert!(matches!(gfx.set_pixel(640, 0, 1), Err(GfxError::OutOfBounds { .. })));
        assert!(matches!(gfx.get_pixel(0, 400), Err(GfxError::OutOfBounds { .. })));
        assert!(gfx.last_error().is_some());

        let mut fresh = Gfx::simulated();
        assert!(matches!(fresh.set_pixel(0, 0, 1), Err(GfxError::OutOfBounds { .. })));
    }

    #[test]
    fn set_range_round_trips_misaligned() {
        let mut gfx = gfx_640x400();
        // Starts and ends mid-byte, spans three rows.
        let (x1, y1, x2, y2) = (3, 5, 21, 7);
        let count = (y2 as usize * 640 + x2 as usize) - (y1 as usize * 640 + x1 as usize) + 1;
        let colors: Vec<u8> = (0..count).map(|i| (i * 7 % 16) as u8).collect();

        gfx.set_range(x1, y1, x2, y2, &colors).unwrap();

        let mut index = 0;
        for y in y1..=y2 {
            let (from, to) = (if y == y1 { x1 } else { 0 }, if y == y2 { x2 } else { 639 });
            for x in from..=to {
                assert_eq!(gfx.get_pixel(x, y).unwrap(), colors[index], "pixel ({}, {})", x, y);
                index += 1;
            }
        }
        assert_eq!(index, count);
        // Pixels just outside the run are untouched.
        assert_eq!(gfx.get_pixel(2, 5).unwrap(), 0);
        assert_eq!(gfx.get_pixel(22, 7).unwrap(), 0);
    }

    #[test]
    fn set_range_round_trips_aligned() {
        let mut gfx = gfx_640x400();
        let colors: Vec<u8> = (0..64).map(|i| (15 - i % 16) as u8).collect();
        gfx.set_range(16, 30, 79, 30, &colors).unwrap();
        for (i, color) in colors.iter().enumerate() {
            assert_eq!(gfx.get_pixel(16 + i as u32, 30).unwrap(), *color);
        }
        assert_eq!(gfx.get_pixel(15, 30).unwrap(), 0);
        assert_eq!(gfx.get_pixel(80, 30).unwrap(), 0);
    }

    #[test]
    fn set_range_within_one_byte() {
        let mut gfx = gfx_640x400();
        gfx.set_range(2, 1, 5, 1, &[1, 2, 3, 4]).unwrap();
        let mut out = [0; 8];
        gfx.get_range(0, 1, 7, 1, &mut out).unwrap();
        assert_eq!(out, [0, 0, 1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn set_range_xor_twice_restores() {
        let mut gfx = gfx_640x400();
        let colors: Vec<u8> = (0..40).map(|i| (i % 16) as u8).collect();
        gfx.fill_range(0, 0, 639, 1, 0x3).unwrap();
        gfx.set_draw_mode(DrawMode::Xor);
        gfx.set_range(5, 0, 44, 0, &colors).unwrap();
        gfx.set_range(5, 0, 44, 0, &colors).unwrap();
        for x in 0..64 {
            assert_eq!(gfx.get_pixel(x, 0).unwrap(), 0x3);
        }
    }

    #[test]
    fn get_range_mirrors_set_range() {
        let mut gfx = gfx_640x400();
        // (630, 50) to (9, 52) inclusive is 10 + 640 + 10 pixels
        let colors: Vec<u8> = (0..660).map(|i| (i * 3 % 16) as u8).collect();
        gfx.set_range(630, 50, 9, 52, &colors).unwrap();
        let mut out = vec![0; 660];
        assert_eq!(gfx.get_range(630, 50, 9, 52, &mut out).unwrap(), 660);
        assert_eq!(out, colors);
    }

    #[test]
    fn range_errors() {
        let mut gfx = gfx_640x400();
        assert!(matches!(
            gfx.set_range(10, 5, 3, 5, &[0; 16]),
            Err(GfxError::InvalidRange { .. })
        ));
        assert!(matches!(
            gfx.set_range(0, 0, 15, 0, &[0; 8]),
            Err(GfxError::BufferTooSmall { needed: 16, provided: 8 })
        ));
        let mut out = [0; 4];
        assert!(matches!(
            gfx.get_range(0, 0, 7, 0, &mut out),
            Err(GfxError::BufferTooSmall { needed: 8, provided: 4 })
        ));
        assert!(matches!(
            gfx.fill_range(0, 0, 640, 0, 1),
            Err(GfxError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn fill_range_matches_pixel_path() {
        let ranges = [(0, 0, 639, 0), (3, 2, 17, 2), (5, 3, 2, 5), (8, 9, 15, 9), (1, 4, 6, 4)];
        for mode in DrawMode::iter() {
            for (x1, y1, x2, y2) in ranges {
                for color in [0x0u8, 0x5, 0xA, 0xF] {
                    let mut fast = gfx_640x400();
                    let mut slow = gfx_640x400();
                    for gfx in [&mut fast, &mut slow] {
                        gfx.fill_range(0, 0, 639, 9, 0x6).unwrap();
                        gfx.set_draw_mode(mode);
                    }

                    fast.fill_range(x1, y1, x2, y2, color).unwrap();

                    let (start, end) = (y1 * 640 + x1, y2 * 640 + x2);
                    for index in start..=end {
                        slow.set_pixel(index % 640, index / 640, color).unwrap();
                    }

                    for plane in Bitplane::iter() {
                        assert_eq!(
                            &fast.vram().plane_slice(plane)[..800],
                            &slow.vram().plane_slice(plane)[..800],
                            "{} ({}, {})-({}, {}) color {}",
                            mode,
                            x1,
                            y1,
                            x2,
                            y2,
                            color
                        );
                    }
                }
            }
        }
    }
}
