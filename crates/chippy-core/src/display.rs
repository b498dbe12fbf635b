use crate::constants::{DISPLAY_WIDTH, HIRES_DISPLAY_HEIGHT, HIRES_DISPLAY_WIDTH};

/// The foreground colour a reset display starts out with
pub const DEFAULT_FOREGROUND: u8 = 0xFF;
/// The background colour a reset display starts out with
pub const DEFAULT_BACKGROUND: u8 = 0x00;

/// How a lit sprite pixel changes the cell it lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Cells hold 0 or 1 and a lit pixel flips the low bit
    Xor,
    /// Cells hold the foreground or background colour and a lit pixel swaps between them
    Overwrite,
}

/// The pixel plane. It is always sized for the 128x64 superchip resolution, only the first
/// `width * height` cells are part of the visible screen.
pub struct Display {
    pixels: [u8; HIRES_DISPLAY_WIDTH * HIRES_DISPLAY_HEIGHT],
    width: usize,
    foreground: u8,
    background: u8,
    explicit_colors: bool,
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        let mut display = Self {
            pixels: [DEFAULT_BACKGROUND; HIRES_DISPLAY_WIDTH * HIRES_DISPLAY_HEIGHT],
            width: DISPLAY_WIDTH,
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            explicit_colors: false,
            dirty: false,
        };
        display.clear();
        display
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.width / 2
    }

    pub fn foreground(&self) -> u8 {
        self.foreground
    }

    pub fn background(&self) -> u8 {
        self.background
    }

    /// The standard 64 wide screen uses xor drawing, until either the superchip resolution or
    /// explicit colours are switched on
    pub fn mode(&self) -> DrawMode {
        if self.width == HIRES_DISPLAY_WIDTH || self.explicit_colors {
            DrawMode::Overwrite
        } else {
            DrawMode::Xor
        }
    }

    /// The visible part of the plane, row after row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.width * self.height()]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the plane changed since the last call, and resets the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn clear(&mut self) {
        let background = self.background;
        let live = self.width * self.height();
        self.pixels[..live].fill(background);
        self.dirty = true;
    }

    /// Switches between the 64 and 128 pixel wide modes. Anything else is treated as 64.
    pub fn resize(&mut self, width: usize) {
        self.width = if width == HIRES_DISPLAY_WIDTH {
            HIRES_DISPLAY_WIDTH
        } else {
            DISPLAY_WIDTH
        };
        self.clear();
    }

    pub fn set_colors(&mut self, background: u8, foreground: u8) {
        self.background = background;
        self.foreground = foreground;
        self.explicit_colors = true;
        self.clear();
    }

    /// Draws a single lit sprite pixel, returns true on a collision.
    ///
    /// Positions are bounds checked on the linear offset into the visible plane, a pixel past the
    /// end is dropped rather than wrapped around to the top of the screen.
    pub fn plot(&mut self, x: usize, y: usize) -> bool {
        let offset = x + y * self.width;
        if offset >= self.width * self.height() {
            return false;
        }
        self.dirty = true;

        let mode = self.mode();
        let cell = &mut self.pixels[offset];
        match mode {
            DrawMode::Xor => {
                let collision = *cell & 1 == 1;
                *cell ^= 1;
                collision
            }
            DrawMode::Overwrite => {
                if *cell == self.foreground {
                    *cell = self.background;
                    true
                } else {
                    *cell = self.foreground;
                    false
                }
            }
        }
    }

    /// Moves every row down by `lines`, rows pushed off the bottom are lost
    pub fn scroll_down(&mut self, lines: usize) {
        let (width, height) = (self.width, self.height());
        let lines = lines.min(height);
        self.pixels
            .copy_within(0..(height - lines) * width, lines * width);
        self.pixels[..lines * width].fill(self.background);
        self.dirty = true;
    }

    /// Moves every row 4 pixels to the right
    pub fn scroll_right(&mut self) {
        let (width, background) = (self.width, self.background);
        let live = width * self.height();
        for row in self.pixels[..live].chunks_exact_mut(width) {
            row.copy_within(0..width - 4, 4);
            row[..4].fill(background);
        }
        self.dirty = true;
    }

    /// Moves every row 4 pixels to the left
    pub fn scroll_left(&mut self) {
        let (width, background) = (self.width, self.background);
        let live = width * self.height();
        for row in self.pixels[..live].chunks_exact_mut(width) {
            row.copy_within(4.., 0);
            row[width - 4..].fill(background);
        }
        self.dirty = true;
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
