//! Drawing surface abstraction and the CPU framebuffer behind it.

/// RGBA8 color, straight alpha.
pub type Rgba = [u8; 4];

/// Axis-aligned line segment in canvas pixel coordinates, 1px wide,
/// endpoints inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// Target of the render controller's drawing calls.
///
/// One `stroke_lines` call is one path: the whole grid is submitted as a
/// single batch with a single stroke color.
pub trait Painter {
    fn stroke_lines(&mut self, lines: &[Line], color: Rgba);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba);
}

/// CPU framebuffer the viewer paints into; the gpu layer uploads it as a
/// texture each presented frame. Pixels outside the canvas are clipped,
/// never errors.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major, tightly packed.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color at (x, y); test and debugging aid.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

impl Painter for PixelCanvas {
    fn stroke_lines(&mut self, lines: &[Line], color: Rgba) {
        for line in lines {
            if line.x0 == line.x1 {
                for y in line.y0.min(line.y1)..=line.y0.max(line.y1) {
                    self.set(line.x0, y, color);
                }
            } else if line.y0 == line.y1 {
                for x in line.x0.min(line.x1)..=line.x0.max(line.x1) {
                    self.set(x, line.y0, color);
                }
            }
            // Diagonal segments do not occur in this viewer.
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x_end = x.saturating_add(width).min(self.width) as usize;
        let y_end = y.saturating_add(height).min(self.height) as usize;
        let stride = self.width as usize;
        for row in y as usize..y_end {
            self.pixels[row * stride + x as usize..row * stride + x_end].fill(color);
        }
    }
}
