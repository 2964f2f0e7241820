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

    driver.rs

    Graphics context and init/fini lifecycle.

*/

//! The graphics context and its init/fini lifecycle.

use crate::{
    banks::BankSelect,
    config::GfxConfig,
    error::GfxError,
    io::{flip_flop, GfxBus, FF2_GFX_CLOCK, FF2_TEXT_CLOCK, GDC_CMD_CURSOR_SHAPE, MODE_FF2},
    state::{DisplayState, GfxMode},
    vram::PlaneMemory,
};

/// A graphics context. Owns the display state, the port/BIOS collaborator and the plane
/// memory. Every operation in this crate is a method on this type.
pub struct Gfx<B: GfxBus, M: PlaneMemory> {
    pub(crate) state: DisplayState,
    pub(crate) bus: B,
    pub(crate) vram: M,
}

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    pub fn new(bus: B, vram: M) -> Self {
        Self {
            state: DisplayState::new(),
            bus,
            vram,
        }
    }

    /// Initialize the display: detect devices, enter the configured mode, clock both GDCs at
    /// 5MHz, select the default banks and save the palette for [Gfx::fini].
    pub fn init(&mut self, config: &GfxConfig) -> Result<(), GfxError> {
        self.state.reset();

        self.detect_devices_with(config.extra_device_set());
        if !self.has_devices() {
            return self.fail(GfxError::NoDevices);
        }

        self.enter_mode(config.mode)?;

        log::debug!("init(): Clocking GDCs at 5MHz");
        self.with_unlocked(|gfx| {
            gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_TEXT_CLOCK, true));
            gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_GFX_CLOCK, true));
        });

        self.set_bank(BankSelect::Display, 0);
        self.set_bank(BankSelect::Drawing, 1);

        self.issue_gfx(GDC_CMD_CURSOR_SHAPE, &[0x00]);

        self.set_draw_mode(config.draw_mode);
        self.save_palette(config.palette_size)?;

        log::debug!(
            "init(): Entered {} with devices {:02X}",
            self.state.mode,
            self.state.devices_present.bits()
        );
        Ok(())
    }

    /// Return to text mode, clock both GDCs back to 2.5MHz and restore the palette saved by
    /// [Gfx::init].
    pub fn fini(&mut self) -> Result<(), GfxError> {
        self.enter_mode(GfxMode::Text)?;

        log::debug!("fini(): Clocking GDCs at 2.5MHz");
        self.with_unlocked(|gfx| {
            gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_TEXT_CLOCK, false));
            gfx.bus.write_u8(MODE_FF2, flip_flop(FF2_GFX_CLOCK, false));
        });

        self.restore_palette()
    }

    #[inline]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn vram(&self) -> &M {
        &self.vram
    }

    pub fn vram_mut(&mut self) -> &mut M {
        &mut self.vram
    }

    pub fn into_parts(self) -> (DisplayState, B, M) {
        (self.state, self.bus, self.vram)
    }

    /// The most recent failure, if any. Not cleared by later successful calls.
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state.last_error = Some(message.into());
    }

    /// Record `err` as the last error and return it.
    pub(crate) fn fail<T>(&mut self, err: GfxError) -> Result<T, GfxError> {
        log::warn!("{}", err);
        self.state.last_error = Some(err.to_string());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        io::{FF2_COLORS, GDC_GFX_COMMAND, GDC_GFX_PARAM, PALETTE_INDEX},
        palette::PaletteEntry,
        sim::{BusEvent, SimBus},
        state::{Device, DrawMode},
        vram::Vram,
    };

    #[test]
    fn init_enters_configured_mode() {
        let mut gfx = Gfx::simulated();
        let config = GfxConfig {
            draw_mode: DrawMode::Xor,
            ..GfxConfig::default()
        };
        gfx.init(&config).unwrap();

        assert_eq!(gfx.current_mode(), GfxMode::Graphics640x400x16);
        assert_eq!((gfx.width(), gfx.height()), (640, 400));
        assert_eq!(gfx.draw_mode(), DrawMode::Xor);
        assert!(gfx.device_enabled(Device::GdcGfx));
        assert!(!gfx.device_enabled(Device::GdcText));

        let bus = gfx.bus();
        assert!(bus.ff2(FF2_TEXT_CLOCK));
        assert!(bus.ff2(FF2_GFX_CLOCK));
        assert!(bus.ff2(FF2_COLORS));
        assert!(bus.is_locked());
        assert_eq!(bus.bank(BankSelect::Display), 0);
        assert_eq!(bus.bank(BankSelect::Drawing), 1);
        assert_eq!(gfx.state().saved_palette().len(), 16);
    }

    #[test]
    fn init_issues_cursor_shape() {
        let mut gfx = Gfx::simulated();
        gfx.init(&GfxConfig::default()).unwrap();

        let events = gfx.bus().events();
        let pos = events
            .iter()
            .position(|e| *e == BusEvent::Write(GDC_GFX_COMMAND, GDC_CMD_CURSOR_SHAPE))
            .unwrap();
        assert_eq!(events[pos + 1], BusEvent::Write(GDC_GFX_PARAM, 0x00));
    }

    #[test]
    fn init_with_extra_devices() {
        let mut gfx = Gfx::simulated();
        let config = GfxConfig {
            mode: GfxMode::Graphics640x400x256,
            extra_devices: vec![Device::Egc],
            ..GfxConfig::default()
        };
        gfx.init(&config).unwrap();
        assert!(gfx.has_device(Device::Egc));
        assert_eq!(gfx.current_mode(), GfxMode::Graphics640x400x256);

        // Without the EGC declared, 256 colors is refused.
        let mut gfx = Gfx::simulated();
        let config = GfxConfig {
            mode: GfxMode::Graphics640x400x256,
            ..GfxConfig::default()
        };
        assert!(matches!(gfx.init(&config), Err(GfxError::DeviceUnavailable(Device::Egc))));
        assert_eq!(gfx.current_mode(), GfxMode::None);
    }

    #[test]
    fn init_rejects_oversized_palette() {
        let mut gfx = Gfx::simulated();
        let config = GfxConfig {
            palette_size: usize::MAX / 2,
            ..GfxConfig::default()
        };
        assert!(matches!(gfx.init(&config), Err(GfxError::PaletteRange { .. })));
        assert!(!gfx
            .bus()
            .events()
            .iter()
            .any(|e| matches!(e, BusEvent::Write(PALETTE_INDEX, _) | BusEvent::Read(PALETTE_INDEX))));
        assert!(gfx.state().saved_palette().is_empty());
    }

    #[test]
    fn init_resets_previous_state() {
        let mut gfx = Gfx::simulated();
        gfx.set_error("stale");
        gfx.set_draw_mode(DrawMode::Or);
        gfx.init(&GfxConfig::default()).unwrap();
        assert_ne!(gfx.last_error(), Some("stale"));
        assert_eq!(gfx.draw_mode(), DrawMode::Replace);
    }

    #[test]
    fn fini_restores_text_and_palette() {
        let mut gfx = Gfx::simulated();
        let original: Vec<PaletteEntry> = (0..16u8).map(|i| PaletteEntry::new(i, 15 - i, i / 2)).collect();
        gfx.apply_palette(&original).unwrap();

        gfx.init(&GfxConfig::default()).unwrap();
        gfx.clear_palette(16).unwrap();
        gfx.fini().unwrap();

        assert_eq!(gfx.current_mode(), GfxMode::Text);
        assert_eq!((gfx.width(), gfx.height()), (80, 25));
        assert!(gfx.device_enabled(Device::GdcText));
        assert!(!gfx.device_enabled(Device::GdcGfx));

        let bus = gfx.bus();
        assert!(!bus.ff2(FF2_TEXT_CLOCK));
        assert!(!bus.ff2(FF2_GFX_CLOCK));
        assert!(bus.is_locked());

        let mut restored = vec![PaletteEntry::default(); 16];
        gfx.capture_palette(&mut restored).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn fini_palette_writes_follow_text_mode() {
        let mut gfx = Gfx::simulated();
        gfx.init(&GfxConfig::default()).unwrap();
        gfx.bus_mut().clear_events();
        gfx.fini().unwrap();

        let events = gfx.bus().events();
        let first_palette = events
            .iter()
            .position(|e| matches!(e, BusEvent::Write(PALETTE_INDEX, _)))
            .unwrap();
        let last_bios = events.iter().rposition(|e| matches!(e, BusEvent::Bios(..))).unwrap();
        assert!(last_bios < first_palette);
    }

    #[test]
    fn fail_records_message() {
        let mut gfx = Gfx::new(SimBus::new(), Vram::new());
        let result: Result<(), _> = gfx.fail(GfxError::NoDevices);
        assert!(result.is_err());
        assert_eq!(gfx.last_error(), Some("No graphical devices available"));
    }
}
