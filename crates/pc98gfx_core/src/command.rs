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

    command.rs

    GDC command issue and FIFO wait.

*/

//! GDC command issue and FIFO readiness.

use crate::{
    driver::Gfx,
    io::{GdcStatus, GfxBus, GDC_COMMAND_OFFSET, GDC_GFX_PARAM, GDC_TEXT_PARAM, MISC_WAIT},
    state::{Device, GfxMode},
    vram::PlaneMemory,
};

/// One of the two uPD7220 display controllers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gdc {
    Text,
    Graphics,
}

impl Gdc {
    #[inline]
    pub fn param_port(self) -> u16 {
        match self {
            Gdc::Text => GDC_TEXT_PARAM,
            Gdc::Graphics => GDC_GFX_PARAM,
        }
    }

    #[inline]
    pub fn command_port(self) -> u16 {
        self.param_port() + GDC_COMMAND_OFFSET
    }

    /// Status is read from the parameter port.
    #[inline]
    pub fn status_port(self) -> u16 {
        self.param_port()
    }

    pub fn device(self) -> Device {
        match self {
            Gdc::Text => Device::GdcText,
            Gdc::Graphics => Device::GdcGfx,
        }
    }

    /// The GDC behind a device flag, if the device is a GDC.
    pub fn for_device(device: Device) -> Option<Gdc> {
        match device {
            Device::GdcText => Some(Gdc::Text),
            Device::GdcGfx => Some(Gdc::Graphics),
            Device::Grcg | Device::Egc => None,
        }
    }
}

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    /// Write `command` to the GDC's command port, then each of `params` in order to its
    /// parameter port. No acknowledgement is read.
    pub fn issue(&mut self, gdc: Gdc, command: u8, params: &[u8]) {
        log::trace!("{:?} GDC command {:02X} params {:02X?}", gdc, command, params);
        self.bus.write_u8(gdc.command_port(), command);
        for param in params {
            self.bus.write_u8(gdc.param_port(), *param);
        }
    }

    #[inline]
    pub fn issue_text(&mut self, command: u8, params: &[u8]) {
        self.issue(Gdc::Text, command, params);
    }

    #[inline]
    pub fn issue_gfx(&mut self, command: u8, params: &[u8]) {
        self.issue(Gdc::Graphics, command, params);
    }

    pub fn read_status(&mut self, gdc: Gdc) -> GdcStatus {
        GdcStatus::from_bytes([self.bus.read_u8(gdc.status_port())])
    }

    /// Spin until the active GDC's FIFO has room. The text GDC is polled in text mode, the
    /// graphics GDC otherwise. There is no timeout.
    pub fn wait_until_ready(&mut self) {
        let gdc = match self.state.mode {
            GfxMode::Text => Gdc::Text,
            _ => Gdc::Graphics,
        };
        while self.read_status(gdc).fifo_full() {
            self.bus.write_u8(MISC_WAIT, 0);
            self.bus.write_u8(MISC_WAIT, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        io::{GDC_GFX_STATUS, GDC_TEXT_STATUS},
        sim::BusEvent,
    };

    #[test]
    fn ports_are_offset_by_two() {
        assert_eq!(Gdc::Text.command_port(), 0x62);
        assert_eq!(Gdc::Graphics.command_port(), 0xA2);
        assert_eq!(Gdc::Graphics.status_port(), 0xA0);
        assert_eq!(Gdc::for_device(Device::GdcGfx), Some(Gdc::Graphics));
        assert_eq!(Gdc::for_device(Device::Egc), None);
        assert_eq!(Gdc::Text.device(), Device::GdcText);
    }

    #[test]
    fn issue_writes_command_then_params() {
        let mut gfx = Gfx::simulated();
        gfx.issue_gfx(0x47, &[0x28, 0x00]);
        assert_eq!(
            gfx.bus().events(),
            &[
                BusEvent::Write(0xA2, 0x47),
                BusEvent::Write(0xA0, 0x28),
                BusEvent::Write(0xA0, 0x00),
            ]
        );
        assert_eq!(gfx.bus().gdc(Gdc::Graphics).last_command(), Some(0x47));
        assert_eq!(gfx.bus().gdc(Gdc::Graphics).params(), &[0x28, 0x00]);
    }

    #[test]
    fn wait_polls_active_gdc() {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Text).unwrap();

        gfx.bus_mut().set_fifo_busy(Gdc::Text, 3);
        gfx.bus_mut().clear_events();
        gfx.wait_until_ready();

        let events = gfx.bus().events();
        let status_reads = events.iter().filter(|e| **e == BusEvent::Read(GDC_TEXT_STATUS)).count();
        let waits = events.iter().filter(|e| **e == BusEvent::Write(MISC_WAIT, 0)).count();
        assert_eq!(status_reads, 4);
        assert_eq!(waits, 6);
        assert!(!events.iter().any(|e| *e == BusEvent::Read(GDC_GFX_STATUS)));
    }

    #[test]
    fn wait_returns_immediately_when_ready() {
        let mut gfx = Gfx::simulated();
        gfx.wait_until_ready();
        assert_eq!(gfx.bus().events(), &[BusEvent::Read(GDC_GFX_STATUS)]);
    }
}
