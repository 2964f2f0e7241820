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

    mode.rs

    Display mode transitions.

*/

//! Display mode transitions.
//!
//! Entering a mode is a fixed sequence: BIOS mode select, the GDC mode flip-flops, the
//! coprocessor hand-off, and finally the EGC flip-flops. Preconditions are checked before
//! the first port write; once writing begins, the transition runs to completion.

use crate::{
    command::Gdc,
    driver::Gfx,
    error::GfxError,
    io::{
        flip_flop, BiosFunction, GfxBus, LineSelect, ModeSelect, FF1_COLORS, FF1_LINES, FF2_COLORS, FF2_ENHANCED,
        FF2_LINES, FF2_LOCK, GDC_CMD_VSYNC_MASTER, GDC_CMD_VSYNC_SLAVE, MODE_FF1, MODE_FF2,
    },
    state::{Device, GfxMode},
    vram::PlaneMemory,
};

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    pub fn enter_mode(&mut self, mode: GfxMode) -> Result<(), GfxError> {
        if mode == GfxMode::None {
            return self.fail(GfxError::InvalidMode);
        }
        if mode.is_graphics() && !self.has_device(Device::GdcGfx) {
            return self.fail(GfxError::DeviceUnavailable(Device::GdcGfx));
        }
        if mode.is_enhanced() && !self.has_device(Device::Egc) {
            return self.fail(GfxError::DeviceUnavailable(Device::Egc));
        }

        log::debug!("enter_mode(): {} -> {}", self.state.mode, mode);

        let lines = match mode.is_high_res() {
            true => LineSelect::Lines400,
            false => LineSelect::Lines200,
        };
        let ch = ModeSelect::new().with_lines(lines).into_bytes()[0];
        self.bus.video_bios(BiosFunction::SetGraphicsMode, ch);

        if self.has_device(Device::GdcText) || self.has_device(Device::GdcGfx) {
            self.with_unlocked(|gfx| {
                gfx.bus.write_u8(MODE_FF1, flip_flop(FF1_COLORS, false));
                gfx.bus.write_u8(MODE_FF1, flip_flop(FF1_LINES, !mode.is_high_res()));
                gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_COLORS, mode.uses_16_colors()));
            });
            self.hand_off(mode);
        }

        if self.has_device(Device::Egc) {
            self.with_unlocked(|gfx| {
                gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_ENHANCED, mode.is_enhanced()));
                gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_LINES, mode.is_enhanced()));
            });
        }

        self.state.commit_mode(mode);
        Ok(())
    }

    #[inline]
    pub fn current_mode(&self) -> GfxMode {
        self.state.mode()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.state.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.state.height()
    }

    /// Run `f` with the protected mode flip-flops writable, locking them again afterwards.
    pub(crate) fn with_unlocked<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.bus.write_u8(MODE_FF2, flip_flop(FF2_LOCK, true));
        f(self);
        self.bus.write_u8(MODE_FF2, flip_flop(FF2_LOCK, false));
    }

    /// Start the GDC for `mode`, stop the other, and make the active one VSYNC master.
    ///
    /// Enable or disable may fail because the GDC is already in the requested state. That
    /// leaves `last_error` set but does not stop the transition.
    fn hand_off(&mut self, mode: GfxMode) {
        let (show, hide) = match mode {
            GfxMode::Text => (
                (BiosFunction::ShowText, Gdc::Text),
                (BiosFunction::StopGraphics, Gdc::Graphics),
            ),
            _ => (
                (BiosFunction::StartGraphics, Gdc::Graphics),
                (BiosFunction::HideText, Gdc::Text),
            ),
        };

        self.bus.video_bios(show.0, 0);
        if let Err(e) = self.enable_device(show.1.device()) {
            log::debug!("hand_off(): {}", e);
        }
        self.bus.video_bios(hide.0, 0);
        if let Err(e) = self.disable_device(hide.1.device()) {
            log::debug!("hand_off(): {}", e);
        }

        self.issue(show.1, GDC_CMD_VSYNC_MASTER, &[]);
        self.issue(hide.1, GDC_CMD_VSYNC_SLAVE, &[]);
    }
}
