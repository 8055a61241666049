use crate::definitions::display::{HEIGHT, SPRITE_WIDTH, WIDTH};

/// A single row of pixels
pub type Row = [bool; WIDTH];

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Every pixel is either on or off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pixels: Box<[Row; HEIGHT]>,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    pub fn new() -> Self {
        Self {
            pixels: Box::new([[false; WIDTH]; HEIGHT]),
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// XORs the sprite rows onto the screen at `(x, y)`, most significant bit first.
    /// Coordinates wrap around the screen edges.
    ///
    /// Returns `true` if any pixel was switched from on to off.
    pub fn blit(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;

        for (i, row) in rows.iter().enumerate() {
            let py = (y + i) % HEIGHT;

            for j in 0..SPRITE_WIDTH {
                let mask = 0x80u8 >> j;
                if row & mask == 0 {
                    continue;
                }

                let px = (x + j) % WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }

    /// The pixel at the wrapped coordinates.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % HEIGHT][x % WIDTH]
    }

    /// Read only snapshot of all rows, top to bottom.
    pub fn rows(&self) -> &[Row] {
        &self.pixels[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(display: &Display) -> usize {
        display
            .rows()
            .iter()
            .map(|row| row.iter().filter(|&&p| p).count())
            .sum()
    }

    #[test]
    fn test_clear() {
        let mut display = Display::new();
        display.blit(10, 10, &[0xFF, 0xFF]);
        assert_eq!(lit(&display), 16);

        display.clear();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                assert!(!display.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_blit_msb_first() {
        let mut display = Display::new();
        let collision = display.blit(0, 0, &[0b1000_0001]);
        assert!(!collision);
        assert!(display.pixel(0, 0));
        assert!(!display.pixel(1, 0));
        assert!(display.pixel(7, 0));
        assert!(!display.pixel(8, 0));
    }

    #[test]
    fn test_blit_twice_restores() {
        let mut display = Display::new();
        display.blit(3, 4, &[0x3C]);
        let before = display.clone();

        let sprite = [0xF0, 0x90, 0x90, 0x90, 0xF0];
        assert!(!display.blit(1, 2, &sprite));
        // every pixel of the sprite is lit by now
        assert!(display.blit(1, 2, &sprite));
        assert_eq!(display, before);
    }

    #[test]
    fn test_collision_only_on_to_off() {
        let mut display = Display::new();
        display.blit(0, 0, &[0b1000_0000]);
        // turning on pixels next to lit ones is not a collision
        assert!(!display.blit(1, 0, &[0b1000_0000]));
        assert!(display.blit(0, 0, &[0b1000_0000]));
        assert!(!display.pixel(0, 0));
        assert!(display.pixel(1, 0));
    }

    #[test]
    fn test_wrap_horizontal() {
        let mut display = Display::new();
        display.blit(60, 0, &[0xFF]);
        for x in 60..64 {
            assert!(display.pixel(x, 0));
        }
        for x in 0..4 {
            assert!(display.pixel(x, 0));
        }
        assert!(!display.pixel(4, 0));
        assert_eq!(lit(&display), 8);
    }

    #[test]
    fn test_wrap_vertical() {
        let mut display = Display::new();
        display.blit(0, 30, &[0x80, 0x80, 0x80, 0x80]);
        assert!(display.pixel(0, 30));
        assert!(display.pixel(0, 31));
        assert!(display.rows()[0][0]);
        assert!(display.rows()[1][0]);
        assert_eq!(lit(&display), 4);
    }

    #[test]
    fn test_start_coordinates_wrap() {
        let mut display = Display::new();
        display.blit(64 + 2, 32 + 1, &[0x80]);
        assert!(display.rows()[1][2]);
    }
}
