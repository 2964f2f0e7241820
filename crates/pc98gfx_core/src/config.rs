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

    config.rs

    Driver configuration, read from the [gfx] table of a TOML file.

*/

//! TOML configuration for [crate::Gfx::init].
//!
//! ```toml
//! [gfx]
//! mode = "Graphics640x400x16"
//! draw_mode = "Replace"
//! palette_size = 16
//! extra_devices = ["Egc"]
//! ```

use std::path::Path;

use crate::{
    error::GfxError,
    palette::DEFAULT_PALETTE_SIZE,
    state::{Device, DeviceSet, DrawMode, GfxMode},
};
use serde_derive::Deserialize;

const fn _default_mode() -> GfxMode {
    GfxMode::Graphics640x400x16
}

const fn _default_palette_size() -> usize {
    DEFAULT_PALETTE_SIZE
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GfxConfig {
    #[serde(default = "_default_mode")]
    pub mode: GfxMode,
    #[serde(default)]
    pub draw_mode: DrawMode,
    #[serde(default = "_default_palette_size")]
    pub palette_size: usize,
    /// Units that are fitted but cannot be probed.
    #[serde(default)]
    pub extra_devices: Vec<Device>,
}

impl Default for GfxConfig {
    fn default() -> Self {
        Self {
            mode: _default_mode(),
            draw_mode: DrawMode::default(),
            palette_size: _default_palette_size(),
            extra_devices: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    gfx: Option<GfxConfig>,
}

impl GfxConfig {
    /// Parse the `[gfx]` table of a TOML document. A document without one yields the
    /// defaults.
    pub fn from_toml_str(toml_string: impl AsRef<str>) -> Result<GfxConfig, GfxError> {
        let file: ConfigFile = toml::from_str(toml_string.as_ref())?;
        Ok(file.gfx.unwrap_or_default())
    }

    pub fn from_file<P>(path: P) -> Result<GfxConfig, GfxError>
    where
        P: AsRef<Path>,
    {
        log::debug!("Reading configuration from {}", path.as_ref().display());
        let toml_string = std::fs::read_to_string(path)?;
        GfxConfig::from_toml_str(toml_string)
    }

    pub fn extra_device_set(&self) -> DeviceSet {
        self.extra_devices.iter().copied().collect()
    }
}
