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

    banks.rs

    Display and drawing bank selection.

*/

//! Display and drawing bank selection.
//!
//! Graphics VRAM holds two banks. One is scanned out to the display while the other is the
//! target of drawing, which allows page flipping.

use crate::{
    driver::Gfx,
    io::{GfxBus, DISPLAY_BANK, DRAWING_BANK},
    vram::PlaneMemory,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BankSelect {
    Display,
    Drawing,
}

impl BankSelect {
    #[inline]
    pub fn port(self) -> u16 {
        match self {
            BankSelect::Display => DISPLAY_BANK,
            BankSelect::Drawing => DRAWING_BANK,
        }
    }
}

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    pub fn set_bank(&mut self, select: BankSelect, which: u8) {
        log::trace!("{:?} bank: {}", select, which);
        self.bus.write_u8(select.port(), which);
    }

    pub fn bank(&mut self, select: BankSelect) -> u8 {
        self.bus.read_u8(select.port()) & 0x01
    }

    /// Flip both the display and the drawing bank.
    pub fn swap_banks(&mut self) {
        for select in [BankSelect::Display, BankSelect::Drawing] {
            let current = self.bank(select);
            self.set_bank(select, 1 - current);
        }
    }
}
