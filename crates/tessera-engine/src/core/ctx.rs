use crate::input::{InputState, Key, KeyAction, MouseButton};
use crate::render::Presenter;
use crate::surface::Color;

/// Per-callback engine context.
///
/// Borrows the presenter and input state for the duration of one hook
/// invocation. Drawing goes to the off-screen pixel surface; input queries
/// see the state as of the last event poll.
pub struct EngineCtx<'a> {
    presenter: &'a mut Presenter,
    input: &'a mut InputState,
    pixel_size: u32,
    exit_requested: &'a mut bool,
}

impl<'a> EngineCtx<'a> {
    pub(crate) fn new(
        presenter: &'a mut Presenter,
        input: &'a mut InputState,
        pixel_size: u32,
        exit_requested: &'a mut bool,
    ) -> Self {
        Self {
            presenter,
            input,
            pixel_size,
            exit_requested,
        }
    }

    // ── drawing ──────────────────────────────────────────────────────────

    /// Draws one pixel; out-of-bounds coordinates are silently ignored.
    #[inline]
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.presenter.set_pixel(x, y, color);
    }

    /// Draws one opaque pixel from RGB components.
    #[inline]
    pub fn draw_pixel_rgb(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.presenter.set_pixel_rgb(x, y, r, g, b);
    }

    /// Draws a line between the two points, endpoints included.
    #[inline]
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.presenter.draw_line(x1, y1, x2, y2, color);
    }

    /// Draws an opaque line from RGB components.
    #[inline]
    pub fn draw_line_rgb(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, r: u8, g: u8, b: u8) {
        self.presenter.draw_line(x1, y1, x2, y2, Color::rgb(r, g, b));
    }

    // ── input ────────────────────────────────────────────────────────────

    /// Whether `key` is currently held.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Whether `button` is currently held.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.is_mouse_pressed(button)
    }

    /// Cursor position in window coordinates; `(0, 0)` before the first
    /// cursor event.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.input.cursor_position()
    }

    /// Registers an observer invoked on every key event, for applications
    /// that want edge-triggered handling instead of per-frame polling.
    /// Replaces any previously registered observer.
    pub fn set_key_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Key, KeyAction) + 'static,
    {
        self.input.set_key_callback(callback);
    }

    // ── geometry ─────────────────────────────────────────────────────────

    /// Logical surface width in pixels.
    pub fn width(&self) -> u32 {
        self.presenter.width()
    }

    /// Logical surface height in pixels.
    pub fn height(&self) -> u32 {
        self.presenter.height()
    }

    /// Window width: logical width times the pixel scale factor.
    pub fn window_width(&self) -> u32 {
        self.presenter.width() * self.pixel_size
    }

    /// Window height: logical height times the pixel scale factor.
    pub fn window_height(&self) -> u32 {
        self.presenter.height() * self.pixel_size
    }

    /// How many window pixels one logical pixel spans per axis.
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    // ── control ──────────────────────────────────────────────────────────

    /// Asks the loop to exit after the current frame, as if the window had
    /// been closed.
    pub fn request_exit(&mut self) {
        *self.exit_requested = true;
    }
}
