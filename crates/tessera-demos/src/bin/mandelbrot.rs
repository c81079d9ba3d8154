//! Interactive Mandelbrot viewer.
//!
//! WASD pans, the up/down arrows zoom, escape quits. Every frame recomputes
//! the escape-time iteration per logical pixel.

use anyhow::Result;

use tessera_engine::core::{App, EngineCtx};
use tessera_engine::input::Key;
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::time::FrameTime;
use tessera_engine::window::{Engine, EngineConfig};

const MAX_ITER: u32 = 100;

struct MandelbrotDemo {
    // View center in the complex plane.
    offset_x: f64,
    offset_y: f64,
    // Complex-plane units per logical pixel.
    scale: f64,
}

impl MandelbrotDemo {
    fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 0.0,
        }
    }
}

impl App for MandelbrotDemo {
    fn on_setup(&mut self, ctx: &mut EngineCtx<'_>) -> Result<()> {
        self.scale = 4.0 / ctx.width().min(ctx.height()) as f64;
        Ok(())
    }

    fn on_update(&mut self, ctx: &mut EngineCtx<'_>, time: FrameTime) -> Result<()> {
        if ctx.is_key_pressed(Key::Escape) {
            ctx.request_exit();
        }

        // Pan speed tracks the zoom level so movement feels constant.
        let pan = 200.0 * time.dt as f64 * self.scale;
        if ctx.is_key_pressed(Key::W) {
            self.offset_y -= pan;
        }
        if ctx.is_key_pressed(Key::S) {
            self.offset_y += pan;
        }
        if ctx.is_key_pressed(Key::A) {
            self.offset_x -= pan;
        }
        if ctx.is_key_pressed(Key::D) {
            self.offset_x += pan;
        }

        let zoom = 1.5 * time.dt as f64;
        if ctx.is_key_pressed(Key::ArrowUp) {
            self.scale *= 1.0 - zoom;
        }
        if ctx.is_key_pressed(Key::ArrowDown) {
            self.scale *= 1.0 + zoom;
        }

        let width = ctx.width() as i32;
        let height = ctx.height() as i32;

        for y in 0..height {
            for x in 0..width {
                let real = (x - width / 2) as f64 * self.scale + self.offset_x;
                let imag = (y - height / 2) as f64 * self.scale + self.offset_y;

                let iter = escape_time(real, imag);
                let (r, g, b) = iteration_color(iter);
                ctx.draw_pixel_rgb(x, y, r, g, b);
            }
        }

        Ok(())
    }
}

fn escape_time(real: f64, imag: f64) -> u32 {
    let mut zr = 0.0_f64;
    let mut zi = 0.0_f64;
    let mut iter = 0;

    while zr * zr + zi * zi <= 4.0 && iter < MAX_ITER {
        let next_zr = zr * zr - zi * zi + real;
        zi = 2.0 * zr * zi + imag;
        zr = next_zr;
        iter += 1;
    }

    iter
}

/// Smooth polynomial gradient for points outside the set; inside stays
/// black.
fn iteration_color(iter: u32) -> (u8, u8, u8) {
    if iter == MAX_ITER {
        return (0, 0, 0);
    }

    let t = iter as f64 / MAX_ITER as f64;
    let r = 9.0 * (1.0 - t) * t * t * t * 255.0;
    let g = 15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0;
    let b = 8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0;
    (r as u8, g as u8, b as u8)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Engine::run(
        EngineConfig::new(100, 60, "Tessera Mandelbrot").with_pixel_size(8),
        MandelbrotDemo::new(),
    )
}
