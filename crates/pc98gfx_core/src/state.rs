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

    state.rs

    Display state, modes, draw modes and device flags.

*/

use crate::palette::PaletteEntry;

use serde_derive::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub const TEXT_COLUMNS: u32 = 80;
pub const TEXT_ROWS: u32 = 25;
pub const GFX_WIDTH: u32 = 640;
pub const GFX_HEIGHT_LOW: u32 = 200;
pub const GFX_HEIGHT_HIGH: u32 = 400;

/// Display modes, in hardware capability order. Comparisons between modes are meaningful:
/// every mode after [GfxMode::Text] is a graphics mode, and every mode from
/// [GfxMode::Graphics640x400x8] onward uses 400 lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Deserialize)]
pub enum GfxMode {
    None,
    Text,
    Graphics640x200x8,
    Graphics640x200x16,
    Graphics640x400x8,
    Graphics640x400x16,
    Graphics640x400x256,
}

impl Default for GfxMode {
    fn default() -> Self {
        GfxMode::None
    }
}

impl GfxMode {
    #[inline]
    pub fn is_graphics(&self) -> bool {
        *self > GfxMode::Text
    }

    /// 400-line modes.
    #[inline]
    pub fn is_high_res(&self) -> bool {
        *self >= GfxMode::Graphics640x400x8
    }

    /// Modes that require the 16-color flip-flop to be set.
    #[inline]
    pub fn uses_16_colors(&self) -> bool {
        *self == GfxMode::Graphics640x200x16 || *self >= GfxMode::Graphics640x400x16
    }

    /// Modes that require the EGC's enhanced (256-color) flip-flops.
    #[inline]
    pub fn is_enhanced(&self) -> bool {
        *self == GfxMode::Graphics640x400x256
    }

    /// Return the logical (width, height) of the mode. Text modes are measured in character
    /// cells, graphics modes in pixels.
    pub fn geometry(&self) -> (u32, u32) {
        match self {
            GfxMode::None => (0, 0),
            GfxMode::Text => (TEXT_COLUMNS, TEXT_ROWS),
            _ if self.is_high_res() => (GFX_WIDTH, GFX_HEIGHT_HIGH),
            _ => (GFX_WIDTH, GFX_HEIGHT_LOW),
        }
    }
}

/// The combine operation applied when a pixel or byte is written into a bit-plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Display, Deserialize)]
pub enum DrawMode {
    Replace,
    And,
    Or,
    Xor,
}

impl Default for DrawMode {
    fn default() -> Self {
        DrawMode::Replace
    }
}

/// Hardware units of the display subsystem. The discriminant is the unit's bit in a
/// [DeviceSet].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Display, Deserialize)]
#[repr(u8)]
pub enum Device {
    #[strum(to_string = "text GDC")]
    GdcText = 0x01,
    #[strum(to_string = "graphics GDC")]
    GdcGfx = 0x02,
    #[strum(to_string = "GRCG")]
    Grcg = 0x04,
    #[strum(to_string = "EGC")]
    Egc = 0x08,
}

impl Device {
    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeviceSet(u8);

impl DeviceSet {
    pub const EMPTY: DeviceSet = DeviceSet(0);

    #[inline]
    pub fn contains(&self, device: Device) -> bool {
        self.0 & device.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, device: Device) {
        self.0 |= device.bit();
    }

    #[inline]
    pub fn remove(&mut self, device: Device) {
        self.0 &= !device.bit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn union(self, other: DeviceSet) -> DeviceSet {
        DeviceSet(self.0 | other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Device> + '_ {
        Device::iter().filter(move |device| self.contains(*device))
    }
}

impl FromIterator<Device> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        let mut set = DeviceSet::EMPTY;
        for device in iter {
            set.insert(device);
        }
        set
    }
}

/// All mutable driver state. One instance lives inside each [crate::Gfx] context and is
/// threaded through every operation; there is no process-wide instance.
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    pub(crate) devices_present: DeviceSet,
    pub(crate) devices_enabled: DeviceSet,
    pub(crate) mode: GfxMode,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) draw_mode: DrawMode,
    pub(crate) saved_palette: Vec<PaletteEntry>,
    pub(crate) last_error: Option<String>,
}

impl DisplayState {
    pub fn new() -> Self {
        DisplayState::default()
    }

    /// Return every field to its power-on value.
    pub fn reset(&mut self) {
        *self = DisplayState::default();
    }

    #[inline]
    pub fn devices_present(&self) -> DeviceSet {
        self.devices_present
    }

    #[inline]
    pub fn devices_enabled(&self) -> DeviceSet {
        self.devices_enabled
    }

    #[inline]
    pub fn has_devices(&self) -> bool {
        !self.devices_present.is_empty()
    }

    #[inline]
    pub fn has_device(&self, device: Device) -> bool {
        self.devices_present.contains(device)
    }

    #[inline]
    pub fn device_enabled(&self, device: Device) -> bool {
        self.devices_enabled.contains(device)
    }

    #[inline]
    pub fn mode(&self) -> GfxMode {
        self.mode
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn saved_palette(&self) -> &[PaletteEntry] {
        &self.saved_palette
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn commit_mode(&mut self, mode: GfxMode) {
        let (width, height) = mode.geometry();
        self.mode = mode;
        self.width = width;
        self.height = height;
    }
}
