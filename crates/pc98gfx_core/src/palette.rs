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

    palette.rs

    Palette capture, apply and save/restore.

*/

//! Palette register access.
//!
//! The palette is indexed: a write to the index port selects an entry, and the three
//! channel ports then read or write that entry's green, red and blue components.

use crate::{
    driver::Gfx,
    error::GfxError,
    io::{GfxBus, PALETTE_BLUE, PALETTE_GREEN, PALETTE_INDEX, PALETTE_RED},
    vram::PlaneMemory,
};

pub const DEFAULT_PALETTE_SIZE: usize = 16;
pub const PALETTE_MAX: usize = 256;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PaletteEntry {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A palette entry with premultiplied alpha. Each channel is divided by `a` when applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AlphaPaletteEntry {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl AlphaPaletteEntry {
    pub fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Resolve alpha. Returns None for a zero alpha.
    pub fn resolve(&self) -> Option<PaletteEntry> {
        match self.a {
            0 => None,
            a => Some(PaletteEntry::new(self.r / a, self.g / a, self.b / a)),
        }
    }
}

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    /// Read the first `dest.len()` palette entries into `dest`.
    pub fn capture_palette(&mut self, dest: &mut [PaletteEntry]) -> Result<(), GfxError> {
        self.check_palette_len(dest.len())?;
        for (i, entry) in dest.iter_mut().enumerate() {
            self.bus.write_u8(PALETTE_INDEX, i as u8);
            entry.r = self.bus.read_u8(PALETTE_RED);
            entry.g = self.bus.read_u8(PALETTE_GREEN);
            entry.b = self.bus.read_u8(PALETTE_BLUE);
        }
        Ok(())
    }

    /// Write `src` to the first `src.len()` palette entries.
    pub fn apply_palette(&mut self, src: &[PaletteEntry]) -> Result<(), GfxError> {
        self.check_palette_len(src.len())?;
        for (i, entry) in src.iter().enumerate() {
            self.write_palette_entry(i, entry);
        }
        Ok(())
    }

    /// Write alpha entries to the palette. Every entry is validated before the first write,
    /// so a zero alpha leaves the palette untouched.
    pub fn apply_palette_alpha(&mut self, src: &[AlphaPaletteEntry]) -> Result<(), GfxError> {
        self.check_palette_len(src.len())?;
        let resolved = src
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.resolve().ok_or(GfxError::ZeroAlpha { index }))
            .collect::<Result<Vec<PaletteEntry>, GfxError>>();
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(e) => return self.fail(e),
        };
        for (i, entry) in resolved.iter().enumerate() {
            self.write_palette_entry(i, entry);
        }
        Ok(())
    }

    /// Set the first `count` palette entries to black.
    pub fn clear_palette(&mut self, count: usize) -> Result<(), GfxError> {
        self.check_palette_len(count)?;
        let black = vec![PaletteEntry::default(); count];
        self.apply_palette(&black)
    }

    /// Capture the first `count` entries for [Gfx::restore_palette].
    pub fn save_palette(&mut self, count: usize) -> Result<(), GfxError> {
        self.check_palette_len(count)?;
        let mut saved = vec![PaletteEntry::default(); count];
        self.capture_palette(&mut saved)?;
        log::debug!("Saved {} palette entries", count);
        self.state.saved_palette = saved;
        Ok(())
    }

    pub fn restore_palette(&mut self) -> Result<(), GfxError> {
        let saved = std::mem::take(&mut self.state.saved_palette);
        let result = self.apply_palette(&saved);
        self.state.saved_palette = saved;
        result
    }

    fn write_palette_entry(&mut self, index: usize, entry: &PaletteEntry) {
        log::trace!("Palette {:02X}: {:?}", index, entry);
        self.bus.write_u8(PALETTE_INDEX, index as u8);
        self.bus.write_u8(PALETTE_RED, entry.r);
        self.bus.write_u8(PALETTE_GREEN, entry.g);
        self.bus.write_u8(PALETTE_BLUE, entry.b);
    }

    fn check_palette_len(&mut self, count: usize) -> Result<(), GfxError> {
        if count > PALETTE_MAX {
            return self.fail(GfxError::PaletteRange {
                count,
                max: PALETTE_MAX,
            });
        }
        Ok(())
    }
}
