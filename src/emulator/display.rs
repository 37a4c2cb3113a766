use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The 64x32 monochrome screen, row-major with the origin at the top left.
/// Scaling and colours are up to the host.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Pixels,
}

impl Framebuffer {

    pub fn new() -> Framebuffer {
        Framebuffer { pixels: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// Coordinates wrap around the edges of the screen.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    pub fn set(&mut self, x: usize, y: usize, state: bool) {
        self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH] = state;
    }

    /// XOR a single pixel. Returns true if the pixel was turned off.
    pub fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH];
        *pixel = !*pixel;
        !*pixel
    }

    /// XOR an 8 pixel wide sprite onto the screen at (x, y), one byte per row,
    /// most significant bit leftmost. Pixels past an edge wrap to the other side.
    /// Returns true if any set pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x = x % SCREEN_WIDTH;
        let y = y % SCREEN_HEIGHT;
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if (byte >> (7 - col)) & 1 == 1 {
                    collision |= self.flip(x + col, y + row);
                }
            }
        }
        collision
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| row.iter().all(|pixel| !pixel))
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_framebuffer_is_blank() {
        assert!(Framebuffer::new().is_blank());
    }

    #[test]
    fn clear_clears() {
        let mut fb = Framebuffer::new();
        fb.set(3, 4, true);
        assert!(!fb.is_blank());
        fb.clear();
        assert!(fb.is_blank());
    }

    #[test]
    fn sprite_bits_are_msb_first() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 0, &[0b1000_0001]);
        assert!(fb.get(0, 0));
        assert!(!fb.get(1, 0));
        assert!(fb.get(7, 0));
        assert!(!fb.get(8, 0));
    }

    #[test]
    fn drawing_over_set_pixel_collides() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_sprite(10, 10, &[0xF0]), false);
        assert_eq!(fb.draw_sprite(13, 10, &[0x80]), true);
        assert!(!fb.get(13, 10));
        assert!(fb.get(12, 10));
    }

    #[test]
    fn collision_is_not_reset_by_later_pixels() {
        let mut fb = Framebuffer::new();
        fb.set(0, 0, true);
        // First pixel collides, the rest turn pixels on
        assert!(fb.draw_sprite(0, 0, &[0xFF, 0xFF]));
    }

    #[test]
    fn sprite_wraps_at_bottom_right_corner() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(63, 31, &[0xFF]);
        assert!(fb.get(63, 31));
        for x in 0..7 {
            assert!(fb.get(x, 31), "column {} should have wrapped", x);
        }
        assert!(!fb.get(7, 31));
        assert!(!fb.get(63, 0));
    }

    #[test]
    fn rows_wrap_to_top() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(0, 31, &[0x80, 0x80]);
        assert!(fb.get(0, 31));
        assert!(fb.get(0, 0));
    }

    #[test]
    fn origin_is_taken_modulo_screen_size() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(64 + 5, 32 + 2, &[0x80]);
        assert!(fb.get(5, 2));
    }

    #[test]
    fn display_renders_rows() {
        let mut fb = Framebuffer::new();
        fb.set(0, 0, true);
        let text = fb.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), SCREEN_WIDTH);
        assert!(first.starts_with("# "));
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
    }

    proptest! {
        #[test]
        fn drawing_twice_restores_screen(
            x in 0usize..256,
            y in 0usize..256,
            sprite in proptest::collection::vec(any::<u8>(), 1..16),
            noise in proptest::collection::vec((0usize..SCREEN_WIDTH, 0usize..SCREEN_HEIGHT), 0..64),
        ) {
            let mut fb = Framebuffer::new();
            for (px, py) in noise {
                fb.set(px, py, true);
            }
            let before = fb.clone();
            fb.draw_sprite(x, y, &sprite);
            fb.draw_sprite(x, y, &sprite);
            prop_assert!(fb == before);
        }

        #[test]
        fn second_draw_collides_iff_sprite_nonempty(
            x in 0usize..SCREEN_WIDTH,
            y in 0usize..SCREEN_HEIGHT,
            sprite in proptest::collection::vec(any::<u8>(), 1..16),
        ) {
            let mut fb = Framebuffer::new();
            prop_assert!(!fb.draw_sprite(x, y, &sprite));
            let any_bit = sprite.iter().any(|byte| *byte != 0);
            prop_assert_eq!(fb.draw_sprite(x, y, &sprite), any_bit);
        }
    }
}
