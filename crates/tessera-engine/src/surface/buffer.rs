use super::color::Color;

const OPAQUE_BLACK: u32 = 0xFF00_0000;

/// Fixed-size off-screen pixel buffer.
///
/// One packed `0xAARRGGBB` word per cell, addressed by `row * width + col`.
/// Width and height are fixed at construction. Every cell always holds a
/// valid packed color; the buffer starts out (and clears to) opaque black.
///
/// Writes outside `[0, width) × [0, height)` are dropped and reads outside
/// return opaque black. Neither is an error.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelSurface {
    /// Creates a surface with all cells set to opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![OPAQUE_BLACK; width as usize * height as usize],
        }
    }

    /// Resets every cell to opaque black.
    pub fn clear(&mut self) {
        self.pixels.fill(OPAQUE_BLACK);
    }

    /// Writes `color` to cell `(x, y)`; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.packed();
        }
    }

    /// Like [`set_pixel`](Self::set_pixel) with alpha forced to 255.
    #[inline]
    pub fn set_pixel_rgb(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.set_pixel(x, y, Color::rgb(r, g, b));
    }

    /// Returns the color at `(x, y)`, or opaque black when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => Color::from_packed(self.pixels[i]),
            None => Color::BLACK,
        }
    }

    /// Rasterizes a line from `(x1, y1)` to `(x2, y2)` with Bresenham's
    /// algorithm. Both endpoints are drawn; segments reaching outside the
    /// surface are cut off by the per-pixel bounds check.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };

        let (mut x, mut y) = (x1, y1);
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Read-only view of the whole linear buffer, one packed word per cell.
    ///
    /// Used once per frame for the bulk GPU upload.
    #[inline]
    pub fn buffer(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cells(surface: &PixelSurface, color: Color) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.get_pixel(x, y) == color {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    // ── pixel access ─────────────────────────────────────────────────────

    #[test]
    fn set_then_get_round_trips_in_bounds() {
        let mut s = PixelSurface::new(8, 6);
        let c = Color::rgba(12, 34, 56, 78);
        for (x, y) in [(0, 0), (7, 0), (0, 5), (7, 5), (3, 2)] {
            s.set_pixel(x, y, c);
            assert_eq!(s.get_pixel(x, y), c, "cell ({x}, {y})");
        }
    }

    #[test]
    fn out_of_bounds_write_is_a_no_op() {
        let mut s = PixelSurface::new(4, 4);
        let before = s.buffer().to_vec();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            s.set_pixel(x, y, Color::WHITE);
        }
        assert_eq!(s.buffer(), &before[..]);
    }

    #[test]
    fn out_of_bounds_read_is_opaque_black() {
        let mut s = PixelSurface::new(4, 4);
        s.set_pixel(3, 3, Color::WHITE);
        for (x, y) in [(-1, 3), (3, -1), (4, 3), (3, 4)] {
            assert_eq!(s.get_pixel(x, y), Color::BLACK);
        }
    }

    #[test]
    fn rgb_write_forces_opaque_alpha() {
        let mut s = PixelSurface::new(2, 2);
        s.set_pixel_rgb(1, 1, 9, 8, 7);
        assert_eq!(s.get_pixel(1, 1), Color::rgba(9, 8, 7, 255));
    }

    #[test]
    fn clear_resets_every_cell() {
        for (w, h) in [(1, 1), (3, 5), (16, 16)] {
            let mut s = PixelSurface::new(w, h);
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    s.set_pixel(x, y, Color::CYAN);
                }
            }
            s.clear();
            assert!(s.buffer().iter().all(|&p| p == 0xFF00_0000));
        }
    }

    #[test]
    fn linear_layout_is_row_major() {
        let mut s = PixelSurface::new(4, 4);
        s.set_pixel(1, 1, Color::RED);
        assert_eq!(s.buffer()[1 * 4 + 1], 0xFFFF_0000);
    }

    // ── line rasterization ───────────────────────────────────────────────

    #[test]
    fn diagonal_line_is_exact() {
        let mut s = PixelSurface::new(8, 8);
        s.draw_line(0, 0, 3, 3, Color::GREEN);
        assert_eq!(set_cells(&s, Color::GREEN), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn horizontal_line_is_exact() {
        let mut s = PixelSurface::new(8, 8);
        s.draw_line(0, 0, 5, 0, Color::RED);
        let expected: Vec<_> = (0..=5).map(|x| (x, 0)).collect();
        assert_eq!(set_cells(&s, Color::RED), expected);
    }

    #[test]
    fn vertical_and_reversed_lines_cover_the_same_cells() {
        let mut down = PixelSurface::new(8, 8);
        let mut up = PixelSurface::new(8, 8);
        down.draw_line(2, 1, 2, 6, Color::WHITE);
        up.draw_line(2, 6, 2, 1, Color::WHITE);
        assert_eq!(set_cells(&down, Color::WHITE), set_cells(&up, Color::WHITE));
        assert_eq!(set_cells(&down, Color::WHITE).len(), 6);
    }

    #[test]
    fn single_point_line_sets_one_cell() {
        let mut s = PixelSurface::new(4, 4);
        s.draw_line(2, 2, 2, 2, Color::BLUE);
        assert_eq!(set_cells(&s, Color::BLUE), vec![(2, 2)]);
    }

    #[test]
    fn line_past_the_edge_draws_only_the_in_bounds_part() {
        let mut s = PixelSurface::new(4, 4);
        s.draw_line(2, 2, 9, 2, Color::YELLOW);
        assert_eq!(set_cells(&s, Color::YELLOW), vec![(2, 2), (3, 2)]);
    }

    #[test]
    fn fully_out_of_bounds_line_leaves_the_buffer_untouched() {
        let mut s = PixelSurface::new(4, 4);
        let before = s.buffer().to_vec();
        s.draw_line(-10, -3, -2, -8, Color::WHITE);
        assert_eq!(s.buffer(), &before[..]);
    }
}
