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

    error.rs

    Error type shared by all driver operations.

*/

use crate::state::Device;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GfxError {
    #[error("No graphical devices available")]
    NoDevices,
    #[error("Device not present: {0}")]
    DeviceUnavailable(Device),
    #[error("Device not enabled: {0}")]
    DeviceNotEnabled(Device),
    #[error("Device already enabled: {0}")]
    DeviceAlreadyEnabled(Device),
    #[error("Invalid mode: None")]
    InvalidMode,
    #[error("No display mode has been entered")]
    NoMode,
    #[error("Pixel ({x}, {y}) outside of {width}x{height} display")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    #[error("Range ({x1}, {y1})-({x2}, {y2}) ends before it starts")]
    InvalidRange { x1: u32, y1: u32, x2: u32, y2: u32 },
    #[error("Buffer too small: {needed} entries needed, {provided} provided")]
    BufferTooSmall { needed: usize, provided: usize },
    #[error("Palette of {count} entries exceeds {max} hardware entries")]
    PaletteRange { count: usize, max: usize },
    #[error("Palette entry {index} has zero alpha")]
    ZeroAlpha { index: usize },
    #[error("Error parsing configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Error reading configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}
