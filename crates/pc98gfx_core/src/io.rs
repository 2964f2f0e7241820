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

    io.rs

    Port map, GDC commands, register layouts and bus traits.

*/

//! Port map, command bytes and collaborator traits for the display subsystem.
//!
//! The driver never touches hardware directly. All register traffic goes through a
//! [PortIo] implementation and all BIOS services through a [VideoBios] implementation,
//! so the same state machine can drive real hardware or a simulated register file.

use modular_bitfield::prelude::*;

/// Value returned by reads from unmapped ports.
pub const NO_IO_BYTE: u8 = 0xFF;

/*  Each GDC answers on two ports. Writes to the even port load a parameter into the FIFO,
    reads return the status register. Writes to the port two above issue a command.
*/
pub const GDC_TEXT_PARAM: u16 = 0x60;
pub const GDC_TEXT_STATUS: u16 = 0x60;
pub const GDC_TEXT_COMMAND: u16 = 0x62;
pub const GDC_GFX_PARAM: u16 = 0xA0;
pub const GDC_GFX_STATUS: u16 = 0xA0;
pub const GDC_GFX_COMMAND: u16 = 0xA2;
pub const GDC_COMMAND_OFFSET: u16 = 2;

// Artificial wait port. Each write stalls the bus for roughly 0.6us.
pub const MISC_WAIT: u16 = 0x5F;

// Mode flip-flop registers. Bits 1-7 select a flip-flop, bit 0 is its new value.
pub const MODE_FF1: u16 = 0x68;
pub const MODE_FF2: u16 = 0x6A;

pub const DISPLAY_BANK: u16 = 0xA4;
pub const DRAWING_BANK: u16 = 0xA6;

pub const PALETTE_INDEX: u16 = 0xA8;
pub const PALETTE_GREEN: u16 = 0xAA;
pub const PALETTE_RED: u16 = 0xAC;
pub const PALETTE_BLUE: u16 = 0xAE;

// GDC command bytes
pub const GDC_CMD_STOP: u8 = 0x0C;
pub const GDC_CMD_START: u8 = 0x0D;
pub const GDC_CMD_CURSOR_SHAPE: u8 = 0x4B;
pub const GDC_CMD_VSYNC_SLAVE: u8 = 0x6E;
pub const GDC_CMD_VSYNC_MASTER: u8 = 0x6F;

// Mode flip-flop 1 selects
pub const FF1_COLORS: u8 = 0x02; // 0: color, 1: monochrome
pub const FF1_LINES: u8 = 0x08; // 0: 400 lines, 1: 200 lines

// Mode flip-flop 2 selects
pub const FF2_COLORS: u8 = 0x00; // 1: 16 colors
pub const FF2_LOCK: u8 = 0x06; // 1: protected flip-flops may be written
pub const FF2_ENHANCED: u8 = 0x20; // 1: 256 colors
pub const FF2_LINES: u8 = 0x68; // 1: extended VRAM lines
pub const FF2_TEXT_CLOCK: u8 = 0x82; // 0: 2.5MHz, 1: 5MHz
pub const FF2_GFX_CLOCK: u8 = 0x84; // 0: 2.5MHz, 1: 5MHz

pub const VIDEO_BIOS_INTERRUPT: u8 = 0x18;

/// Encode a write to a mode flip-flop register.
#[inline]
pub fn flip_flop(select: u8, value: bool) -> u8 {
    (select & 0xFE) | value as u8
}

/// Video BIOS functions (INT 18h, function number in AH).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BiosFunction {
    ShowText = 0x0C,
    HideText = 0x0D,
    StartGraphics = 0x40,
    StopGraphics = 0x41,
    SetGraphicsMode = 0x42,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, BitfieldSpecifier)]
pub enum LineSelect {
    Reserved0,
    Lines200,
    Reserved2,
    Lines400,
}

/// The CH argument of [BiosFunction::SetGraphicsMode].
#[bitfield]
#[derive(Copy, Clone)]
pub struct ModeSelect {
    #[skip]
    unused: B4,
    pub back_bank: bool,
    pub monochrome: bool,
    #[bits = 2]
    pub lines: LineSelect,
}

/// GDC status register.
#[bitfield]
#[derive(Copy, Clone)]
pub struct GdcStatus {
    pub data_ready: bool,
    pub fifo_full: bool,
    pub fifo_empty: bool,
    pub drawing: bool,
    pub dma_execute: bool,
    pub vsync: bool,
    pub hblank: bool,
    pub light_pen: bool,
}

/// Byte-wide port access.
pub trait PortIo {
    fn read_u8(&mut self, port: u16) -> u8;
    fn write_u8(&mut self, port: u16, data: u8);
}

/// Legacy video BIOS access. `ch` is the CH register on entry; the return value is AH on
/// exit.
pub trait VideoBios {
    fn video_bios(&mut self, function: BiosFunction, ch: u8) -> u8;
}

/// Everything the state machine needs from the host.
pub trait GfxBus: PortIo + VideoBios {}

impl<T: PortIo + VideoBios> GfxBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_select_layout() {
        let ch = ModeSelect::new().with_lines(LineSelect::Lines400).into_bytes()[0];
        assert_eq!(ch, 3 << 6);
        let ch = ModeSelect::new().with_lines(LineSelect::Lines200).into_bytes()[0];
        assert_eq!(ch, 1 << 6);
        let ch = ModeSelect::new()
            .with_lines(LineSelect::Lines200)
            .with_monochrome(true)
            .with_back_bank(true)
            .into_bytes()[0];
        assert_eq!(ch, 0b0111_0000);
    }

    #[test]
    fn status_layout() {
        let status = GdcStatus::from_bytes([0x22]);
        assert!(status.fifo_full());
        assert!(status.vsync());
        assert!(!status.fifo_empty());
    }

    #[test]
    fn flip_flop_encoding() {
        assert_eq!(flip_flop(FF2_LOCK, true), 0x07);
        assert_eq!(flip_flop(FF2_LOCK, false), 0x06);
        assert_eq!(flip_flop(FF1_LINES, true), 0x09);
        assert_eq!(flip_flop(FF2_GFX_CLOCK, true), 0x85);
    }
}
