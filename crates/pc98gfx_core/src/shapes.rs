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

    shapes.rs

    Screen clear and filled rectangles.

*/

//! Filled shapes built on [Gfx::fill_range].

use crate::{driver::Gfx, error::GfxError, io::GfxBus, vram::PlaneMemory};

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    /// Fill the whole display with `color`.
    pub fn clear(&mut self, color: u8) -> Result<(), GfxError> {
        let (width, height) = (self.state.width, self.state.height);
        if width == 0 || height == 0 {
            return self.fail(GfxError::NoMode);
        }
        self.fill_range(0, 0, width - 1, height - 1, color)
    }

    /// Fill the rectangle with corners `(x1, y1)` and `(x2, y2)`, one scanline at a time.
    pub fn draw_rectangle(&mut self, x1: u32, y1: u32, x2: u32, y2: u32, color: u8) -> Result<(), GfxError> {
        for y in y1..=y2 {
            self.fill_range(x1, y, x2, y, color)?;
        }
        Ok(())
    }
}
