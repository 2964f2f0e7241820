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

    vsync.rs

    Vertical retrace wait.

*/

use crate::{command::Gdc, driver::Gfx, io::GfxBus, vram::PlaneMemory};

impl<B: GfxBus, M: PlaneMemory> Gfx<B, M> {
    /// Spin until the graphics GDC enters vertical retrace, then until it leaves it. Returns
    /// at the start of the next active display period.
    pub fn wait_vsync(&mut self) {
        while !self.read_status(Gdc::Graphics).vsync() {}
        while self.read_status(Gdc::Graphics).vsync() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::GDC_GFX_STATUS, sim::BusEvent};

    #[test]
    fn waits_through_one_retrace() {
        let mut gfx = Gfx::simulated();
        gfx.wait_vsync();

        let reads = gfx
            .bus()
            .events()
            .iter()
            .filter(|e| **e == BusEvent::Read(GDC_GFX_STATUS))
            .count();
        // Active period, then retrace, then one read outside retrace.
        assert!(reads > 2);
        assert!(!gfx.bus().in_vsync(Gdc::Graphics));
    }

    #[test]
    fn waits_from_inside_retrace() {
        let mut gfx = Gfx::simulated();
        while !gfx.read_status(Gdc::Graphics).vsync() {}
        gfx.bus_mut().clear_events();

        // Already in retrace: the first loop exits at once, the second runs it out.
        gfx.wait_vsync();
        assert!(!gfx.bus().in_vsync(Gdc::Graphics));
        assert!(gfx.bus().events().len() >= 2);
    }
}
