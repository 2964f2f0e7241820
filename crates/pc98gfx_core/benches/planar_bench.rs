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

    benches::planar_bench.rs

    Benchmarks for the planar pixel engine.

*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pc98gfx_core::{DrawMode, Gfx, GfxMode};

pub fn planar_bench(c: &mut Criterion) {
    c.bench_function("planar_bench_clear", |b| {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Graphics640x400x16).unwrap();

        b.iter(|| {
            gfx.clear(black_box(0x7)).unwrap();
        });
    });

    c.bench_function("planar_bench_fill_misaligned_xor", |b| {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Graphics640x400x16).unwrap();
        gfx.set_draw_mode(DrawMode::Xor);

        b.iter(|| {
            gfx.fill_range(black_box(3), 10, black_box(636), 12, 0xA).unwrap();
        });
    });

    c.bench_function("planar_bench_set_pixel_row", |b| {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Graphics640x400x16).unwrap();

        b.iter(|| {
            for x in 0..640 {
                gfx.set_pixel(x, black_box(200), (x & 0x0F) as u8).unwrap();
            }
        });
    });

    c.bench_function("planar_bench_set_range_row", |b| {
        let mut gfx = Gfx::simulated();
        gfx.detect_devices();
        gfx.enter_mode(GfxMode::Graphics640x400x16).unwrap();
        let colors: Vec<u8> = (0..640).map(|i| (i & 0x0F) as u8).collect();

        b.iter(|| {
            gfx.set_range(0, black_box(200), 639, 200, &colors).unwrap();
        });
    });
}

criterion_group!(benches, planar_bench);
criterion_main!(benches);
