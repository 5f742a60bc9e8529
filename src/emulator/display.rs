use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// Rows of pixels, each pixel either 0 or 1.
pub type Screen = [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Screen = [[0; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The monochrome framebuffer, along with a flag telling the host
/// that it has changed since it was last drawn.
#[derive(Clone)]
pub struct Display {
    screen: Screen,
    redraw: bool,
}

impl Display {
    pub fn new() -> Display {
        Display {
            screen: EMPTY_SCREEN,
            redraw: false,
        }
    }

    /// Turn off every pixel.
    pub fn clear(&mut self) {
        self.screen = EMPTY_SCREEN;
        self.redraw = true;
    }

    /// The pixel at the given coordinates, wrapping around the edges.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.screen[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    /// XOR a sprite onto the screen with its top left corner at `(x, y)`.
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// Returns whether any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut any_collisions = false;
        for (dy, &row) in sprite.iter().enumerate() {
            let py = (y + dy) % SCREEN_HEIGHT;
            for dx in 0..8 {
                let new_pixel = row >> (7 - dx) & 1;
                let px = (x + dx) % SCREEN_WIDTH;
                let old_pixel = &mut self.screen[py][px];
                if new_pixel == 1 && *old_pixel == 1 {
                    any_collisions = true;
                }
                *old_pixel ^= new_pixel;
            }
        }
        self.redraw = true;
        any_collisions
    }

    /// An immutable view of every pixel.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    /// Read and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.redraw, false)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.screen {
            for c in row.iter() {
                write!(f, "{}", if *c == 1 { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(display: &Display) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for (y, row) in display.screen().iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                if *pixel == 1 {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn draws_bits_most_significant_first() {
        let mut display = Display::new();
        let collided = display.draw_sprite(0, 0, &[0b1000_0001]);
        assert!(!collided);
        assert_eq!(lit(&display), vec![(0, 0), (7, 0)]);
    }

    #[test]
    fn drawing_twice_cancels_out_and_collides() {
        let mut display = Display::new();
        let glyph = [0xF0, 0x90, 0x90, 0x90, 0xF0];
        assert!(!display.draw_sprite(10, 5, &glyph));
        assert!(display.draw_sprite(10, 5, &glyph));
        assert_eq!(lit(&display), vec![]);
    }

    #[test]
    fn wraps_horizontally() {
        let mut display = Display::new();
        display.draw_sprite(60, 0, &[0xFF]);
        assert_eq!(
            lit(&display),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (60, 0), (61, 0), (62, 0), (63, 0)]
        );
    }

    #[test]
    fn wraps_vertically() {
        let mut display = Display::new();
        display.draw_sprite(0, 31, &[0x80, 0x80]);
        assert_eq!(lit(&display), vec![(0, 0), (0, 31)]);
    }

    #[test]
    fn redraw_flag_is_consumed() {
        let mut display = Display::new();
        assert!(!display.redraw_requested());
        display.draw_sprite(0, 0, &[0x80]);
        assert!(display.take_redraw());
        assert!(!display.take_redraw());
        display.clear();
        assert!(display.take_redraw());
        assert_eq!(lit(&display), vec![]);
    }

    #[test]
    fn formats_lit_pixels_as_hashes() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, &[0xC0]);
        let rendered = display.to_string();
        let first_line = rendered.lines().next().unwrap();
        assert_eq!(first_line, format!("##{}", " ".repeat(SCREEN_WIDTH - 2)));
        assert_eq!(rendered.lines().count(), SCREEN_HEIGHT);
    }
}
