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

    sim.rs

    Simulated display register file.

*/

//! A simulated register file implementing [PortIo] and [VideoBios].
//!
//! Models just enough of the display hardware to observe what the driver does: the two
//! GDCs' command streams and status registers, both mode flip-flop registers including
//! the write protect, the palette, the bank registers and the BIOS visibility state. Every
//! bus access is logged in order as a [BusEvent].

use crate::{
    banks::BankSelect,
    command::Gdc,
    driver::Gfx,
    io::*,
    palette::{PaletteEntry, PALETTE_MAX},
    vram::Vram,
};

/// Status reads per simulated frame, and how many of them fall within vertical retrace.
pub const VSYNC_PERIOD: u32 = 16;
pub const VSYNC_READS: u32 = 4;

const FLIP_FLOP_COUNT: usize = 128;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Read(u16),
    Write(u16, u8),
    Bios(BiosFunction, u8),
}

#[derive(Clone, Debug, Default)]
pub struct SimGdc {
    running: bool,
    vsync_master: Option<bool>,
    last_command: Option<u8>,
    params: Vec<u8>,
    fifo_busy_reads: u32,
    status_reads: u32,
}

impl SimGdc {
    pub fn running(&self) -> bool {
        self.running
    }

    /// Some(true) once made VSYNC master, Some(false) once made slave.
    pub fn vsync_master(&self) -> Option<bool> {
        self.vsync_master
    }

    pub fn last_command(&self) -> Option<u8> {
        self.last_command
    }

    /// Parameters written since the last command.
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    fn in_vsync(&self) -> bool {
        self.status_reads % VSYNC_PERIOD >= VSYNC_PERIOD - VSYNC_READS
    }

    fn read_status(&mut self) -> u8 {
        let fifo_full = self.fifo_busy_reads > 0;
        self.fifo_busy_reads = self.fifo_busy_reads.saturating_sub(1);

        let status = GdcStatus::new()
            .with_fifo_full(fifo_full)
            .with_fifo_empty(!fifo_full)
            .with_vsync(self.in_vsync());
        self.status_reads = self.status_reads.wrapping_add(1);
        status.into_bytes()[0]
    }

    fn write_command(&mut self, command: u8) {
        match command {
            GDC_CMD_START => self.running = true,
            GDC_CMD_STOP => self.running = false,
            GDC_CMD_VSYNC_MASTER => self.vsync_master = Some(true),
            GDC_CMD_VSYNC_SLAVE => self.vsync_master = Some(false),
            _ => {}
        }
        self.last_command = Some(command);
        self.params.clear();
    }
}

pub struct SimBus {
    events: Vec<BusEvent>,
    gdc_text: SimGdc,
    gdc_gfx: SimGdc,
    ff1: [bool; FLIP_FLOP_COUNT],
    ff2: [bool; FLIP_FLOP_COUNT],
    palette: Box<[PaletteEntry]>,
    palette_index: u8,
    display_bank: u8,
    drawing_bank: u8,
    mode_select: ModeSelect,
    text_visible: bool,
    graphics_visible: bool,
}

impl Default for SimBus {
    fn default() -> Self {
        SimBus::new()
    }
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            gdc_text: SimGdc::default(),
            gdc_gfx: SimGdc::default(),
            ff1: [false; FLIP_FLOP_COUNT],
            ff2: [false; FLIP_FLOP_COUNT],
            palette: vec![PaletteEntry::default(); PALETTE_MAX].into_boxed_slice(),
            palette_index: 0,
            display_bank: 0,
            drawing_bank: 0,
            mode_select: ModeSelect::new(),
            text_visible: true,
            graphics_visible: false,
        }
    }

    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn gdc(&self, gdc: Gdc) -> &SimGdc {
        match gdc {
            Gdc::Text => &self.gdc_text,
            Gdc::Graphics => &self.gdc_gfx,
        }
    }

    fn gdc_mut(&mut self, gdc: Gdc) -> &mut SimGdc {
        match gdc {
            Gdc::Text => &mut self.gdc_text,
            Gdc::Graphics => &mut self.gdc_gfx,
        }
    }

    /// Report a full FIFO on the next `reads` status reads of `gdc`.
    pub fn set_fifo_busy(&mut self, gdc: Gdc, reads: u32) {
        self.gdc_mut(gdc).fifo_busy_reads = reads;
    }

    /// Whether the next status read of `gdc` will report VSYNC.
    pub fn in_vsync(&self, gdc: Gdc) -> bool {
        self.gdc(gdc).in_vsync()
    }

    pub fn ff1(&self, select: u8) -> bool {
        self.ff1[(select >> 1) as usize]
    }

    pub fn ff2(&self, select: u8) -> bool {
        self.ff2[(select >> 1) as usize]
    }

    /// Whether the protected mode flip-flops currently ignore writes.
    pub fn is_locked(&self) -> bool {
        !self.ff2(FF2_LOCK)
    }

    pub fn palette_entry(&self, index: usize) -> PaletteEntry {
        self.palette[index]
    }

    pub fn bank(&self, select: BankSelect) -> u8 {
        match select {
            BankSelect::Display => self.display_bank,
            BankSelect::Drawing => self.drawing_bank,
        }
    }

    /// The CH argument of the most recent BIOS mode select.
    pub fn mode_select(&self) -> ModeSelect {
        self.mode_select
    }

    pub fn text_visible(&self) -> bool {
        self.text_visible
    }

    pub fn graphics_visible(&self) -> bool {
        self.graphics_visible
    }

    fn write_ff2(&mut self, data: u8) {
        let select = data & 0xFE;
        if select != FF2_LOCK && self.is_locked() {
            log::warn!("Write to locked mode flip-flop {:02X} ignored", select);
            return;
        }
        self.ff2[(select >> 1) as usize] = data & 0x01 != 0;
    }

    fn palette_mut(&mut self) -> &mut PaletteEntry {
        &mut self.palette[self.palette_index as usize]
    }
}

impl PortIo for SimBus {
    fn read_u8(&mut self, port: u16) -> u8 {
        self.events.push(BusEvent::Read(port));
        match port {
            GDC_TEXT_STATUS => self.gdc_text.read_status(),
            GDC_GFX_STATUS => self.gdc_gfx.read_status(),
            DISPLAY_BANK => self.display_bank,
            DRAWING_BANK => self.drawing_bank,
            PALETTE_INDEX => self.palette_index,
            PALETTE_GREEN => self.palette[self.palette_index as usize].g,
            PALETTE_RED => self.palette[self.palette_index as usize].r,
            PALETTE_BLUE => self.palette[self.palette_index as usize].b,
            _ => NO_IO_BYTE,
        }
    }

    fn write_u8(&mut self, port: u16, data: u8) {
        log::trace!("Port {:04X} <- {:02X}", port, data);
        self.events.push(BusEvent::Write(port, data));
        match port {
            GDC_TEXT_PARAM => self.gdc_text.params.push(data),
            GDC_TEXT_COMMAND => self.gdc_text.write_command(data),
            GDC_GFX_PARAM => self.gdc_gfx.params.push(data),
            GDC_GFX_COMMAND => self.gdc_gfx.write_command(data),
            MODE_FF1 => self.ff1[(data >> 1) as usize] = data & 0x01 != 0,
            MODE_FF2 => self.write_ff2(data),
            DISPLAY_BANK => self.display_bank = data & 0x01,
            DRAWING_BANK => self.drawing_bank = data & 0x01,
            PALETTE_INDEX => self.palette_index = data,
            PALETTE_GREEN => self.palette_mut().g = data,
            PALETTE_RED => self.palette_mut().r = data,
            PALETTE_BLUE => self.palette_mut().b = data,
            _ => {}
        }
    }
}

impl VideoBios for SimBus {
    fn video_bios(&mut self, function: BiosFunction, ch: u8) -> u8 {
        log::trace!("INT {:02X} AH={:02X} CH={:02X}", VIDEO_BIOS_INTERRUPT, function as u8, ch);
        self.events.push(BusEvent::Bios(function, ch));
        match function {
            BiosFunction::ShowText => self.text_visible = true,
            BiosFunction::HideText => self.text_visible = false,
            BiosFunction::StartGraphics => self.graphics_visible = true,
            BiosFunction::StopGraphics => self.graphics_visible = false,
            BiosFunction::SetGraphicsMode => self.mode_select = ModeSelect::from_bytes([ch]),
        }
        0
    }
}

impl Gfx<SimBus, Vram> {
    /// A context over a fresh simulated bus and a full-size in-memory VRAM.
    pub fn simulated() -> Self {
        Gfx::new(SimBus::new(), Vram::new())
    }
}
