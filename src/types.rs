// Core types shared by the kernel, the worker and the window.

/// Logical size of the plot "screen". Fixed for every run.
pub const CANVAS_WIDTH: usize = 320;
pub const CANVAS_HEIGHT: usize = 200;

#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: usize,      // always CANVAS_WIDTH
    pub height: usize,     // always CANVAS_HEIGHT
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl Canvas {
    /// A fresh 320x200 canvas filled with `background`.
    pub fn new(background: u32) -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            pixels: vec![background; CANVAS_WIDTH * CANVAS_HEIGHT],
        }
    }

    /// Color at (x,y), or None outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

impl std::fmt::Debug for Canvas {
    // 64000 pixels are useless in assertion output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// The two colors a plot is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub plot: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self { background: 0x00_00_00_00, plot: 0x00_FF_FF_00 } // black, yellow
    }
}
