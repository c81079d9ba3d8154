//! Rotating wireframe square.
//!
//! Holding space recolors the square; pressing P toggles the rotation via
//! the edge-triggered key observer.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use tessera_engine::core::{App, EngineCtx};
use tessera_engine::input::{Key, KeyAction};
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::surface::Color;
use tessera_engine::time::FrameTime;
use tessera_engine::window::{Engine, EngineConfig};

const ROTATION_SPEED: f32 = 2.0; // radians per second

struct SquareDemo {
    angle: f32,
    center: (f32, f32),
    half_side: f32,
    paused: Rc<Cell<bool>>,
}

impl SquareDemo {
    fn new() -> Self {
        Self {
            angle: 0.0,
            center: (0.0, 0.0),
            half_side: 0.0,
            paused: Rc::new(Cell::new(false)),
        }
    }
}

impl App for SquareDemo {
    fn on_setup(&mut self, ctx: &mut EngineCtx<'_>) -> Result<()> {
        let (w, h) = (ctx.width() as f32, ctx.height() as f32);
        self.center = (w / 2.0, h / 2.0);
        self.half_side = w.min(h) / 6.0;

        let paused = self.paused.clone();
        ctx.set_key_callback(move |key, action| {
            if key == Key::P && action == KeyAction::Pressed {
                paused.set(!paused.get());
            }
        });

        Ok(())
    }

    fn on_update(&mut self, ctx: &mut EngineCtx<'_>, time: FrameTime) -> Result<()> {
        if ctx.is_key_pressed(Key::Escape) {
            ctx.request_exit();
        }

        let (sin, cos) = self.angle.sin_cos();
        let corners = [
            (-self.half_side, -self.half_side),
            (self.half_side, -self.half_side),
            (self.half_side, self.half_side),
            (-self.half_side, self.half_side),
        ]
        .map(|(x, y)| {
            (
                cos * x - sin * y + self.center.0,
                sin * x + cos * y + self.center.1,
            )
        });

        let color = if ctx.is_key_pressed(Key::Space) {
            Color::MAGENTA
        } else {
            Color::WHITE
        };

        for i in 0..4 {
            let (x1, y1) = corners[i];
            let (x2, y2) = corners[(i + 1) % 4];
            ctx.draw_line(x1 as i32, y1 as i32, x2 as i32, y2 as i32, color);
        }

        if !self.paused.get() {
            self.angle += ROTATION_SPEED * time.dt;
        }

        Ok(())
    }

    fn on_destroy(&mut self) {
        log::info!("square demo shutting down");
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Engine::run(
        EngineConfig::new(100, 100, "Tessera Square").with_pixel_size(8),
        SquareDemo::new(),
    )
}
