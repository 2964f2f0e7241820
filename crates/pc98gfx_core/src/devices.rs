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

    devices.rs

    Device detection, enable and disable.

*/

//! Device detection and enable/disable.
//!
//! The two GDCs cannot be probed, so detection presumes both exist. The GRCG and EGC
//! cannot be probed either; a host that knows they are fitted declares them through
//! [Gfx::detect_devices_with].

use crate::{
    command::Gdc,
    driver::Gfx,
    error::GfxError,
    io::{GfxBus, GDC_CMD_START, GDC_CMD_STOP},
    state::{Device, DeviceSet},
    vram::PlaneMemory,
};

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    pub fn detect_devices(&mut self) {
        self.detect_devices_with(DeviceSet::EMPTY);
    }

    /// Detect devices, additionally marking `extra` present.
    pub fn detect_devices_with(&mut self, extra: DeviceSet) {
        let detected: DeviceSet = [Device::GdcText, Device::GdcGfx].into_iter().collect();
        self.state.devices_present = detected.union(extra);
        log::debug!("Detected devices: {:02X}", self.state.devices_present.bits());
    }

    #[inline]
    pub fn has_devices(&self) -> bool {
        self.state.has_devices()
    }

    #[inline]
    pub fn has_device(&self, device: Device) -> bool {
        self.state.has_device(device)
    }

    #[inline]
    pub fn device_enabled(&self, device: Device) -> bool {
        self.state.device_enabled(device)
    }

    /// Start a device. GDCs are sent START; the GRCG and EGC need no command.
    pub fn enable_device(&mut self, device: Device) -> Result<(), GfxError> {
        if !self.has_device(device) {
            return self.fail(GfxError::DeviceUnavailable(device));
        }
        if self.device_enabled(device) {
            return self.fail(GfxError::DeviceAlreadyEnabled(device));
        }

        if let Some(gdc) = Gdc::for_device(device) {
            self.issue(gdc, GDC_CMD_START, &[]);
        }
        self.state.devices_enabled.insert(device);
        log::debug!("Enabled {}", device);
        Ok(())
    }

    /// Stop a device. GDCs are sent STOP; the GRCG and EGC need no command.
    pub fn disable_device(&mut self, device: Device) -> Result<(), GfxError> {
        if !self.has_device(device) {
            return self.fail(GfxError::DeviceUnavailable(device));
        }
        if !self.device_enabled(device) {
            return self.fail(GfxError::DeviceNotEnabled(device));
        }

        if let Some(gdc) = Gdc::for_device(device) {
            self.issue(gdc, GDC_CMD_STOP, &[]);
        }
        self.state.devices_enabled.remove(device);
        log::debug!("Disabled {}", device);
        Ok(())
    }
}
