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

    lib.rs

    Crate root.

*/

//! Graphics driver core for the PC-98 display subsystem: a text GDC, a graphics GDC
//! driving four bit-planes, and the optional GRCG and EGC.
//!
//! All operations are methods on a [Gfx] context, which owns the [DisplayState], a bus
//! implementing [PortIo] and [VideoBios], and a [PlaneMemory].

pub mod banks;
pub mod command;
pub mod config;
pub mod devices;
pub mod driver;
pub mod error;
pub mod io;
pub mod mode;
pub mod palette;
pub mod pixel;
pub mod shapes;
pub mod state;
pub mod vram;
pub mod vsync;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use banks::BankSelect;
pub use command::Gdc;
pub use config::GfxConfig;
pub use driver::Gfx;
pub use error::GfxError;
pub use io::{BiosFunction, GfxBus, PortIo, VideoBios};
pub use palette::{AlphaPaletteEntry, PaletteEntry};
pub use state::{Device, DeviceSet, DisplayState, DrawMode, GfxMode};
pub use vram::{Bitplane, PlaneMemory, Vram};
