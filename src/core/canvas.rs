use super::display_context::DisplayContext;
use crate::math::{Color, PixelFormat};

/// Stamp requests the canvas understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    /// Fill every pixel with color
    Clear(Color),

    /// Draw filled circle at (cx, cy) with radius and color
    FilledCircle { cx: i32, cy: i32, radius: i32, color: Color },
}

/// Per-byte fade lookup: every value drops by one, floored at zero.
#[derive(Debug, Clone)]
pub struct FadeTable {
    lut: [u8; 256],
}

impl FadeTable {
    pub fn new() -> Self {
        let mut lut = [0u8; 256];
        for (value, faded) in lut.iter_mut().enumerate() {
            *faded = (value as u8).saturating_sub(1);
        }
        Self { lut }
    }

    /// Faded value of a single channel byte
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }
}

impl Default for FadeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulator image laid out exactly like the framebuffer
#[derive(Clone)]
pub struct Canvas {
    /// BGRX pixel rows, `stride` bytes each
    pixels: Vec<u8>,
    context: DisplayContext,
    format: PixelFormat,
}

impl Canvas {
    /// Create new all-zero canvas with the given geometry
    pub fn new(context: DisplayContext) -> Self {
        Self {
            pixels: vec![0; context.buffer_size()],
            context,
            format: PixelFormat::Bgrx,
        }
    }

    /// Execute single draw operation
    pub fn apply(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::FilledCircle { cx, cy, radius, color } => {
                self.stamp_circle(cx, cy, radius, color)
            }
        }
    }

    /// Fill every visible pixel with color. Row padding is left untouched.
    pub fn clear(&mut self, color: Color) {
        let row_bytes = self.context.row_bytes();
        let bgrx = color.to_bgrx();

        for row in self.pixels.chunks_exact_mut(self.context.stride()) {
            for px in row[..row_bytes].chunks_exact_mut(bgrx.len()) {
                px.copy_from_slice(&bgrx);
            }
        }
    }

    /// Set single pixel, silently skipping anything off-canvas
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(offset) = self.context.offset(x, y) {
            self.format.pack(color, &mut self.pixels, offset);
        }
    }

    /// Draw filled disc: every pixel with dx² + dy² <= radius² is overwritten.
    /// Only the part of the bounding box that lies on the canvas is visited.
    pub fn stamp_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let max_x = self.context.width() as i32 - 1;
        let max_y = self.context.height() as i32 - 1;

        let x0 = cx.saturating_sub(radius).max(0);
        let x1 = cx.saturating_add(radius).min(max_x);
        let y0 = cy.saturating_sub(radius).max(0);
        let y1 = cy.saturating_add(radius).min(max_y);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let r_sq = radius as i64 * radius as i64;
        for y in y0..=y1 {
            let dy = y as i64 - cy as i64;
            for x in x0..=x1 {
                let dx = x as i64 - cx as i64;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Fade every byte of the buffer one step, padding bytes included
    pub fn decay_all(&mut self, table: &FadeTable) {
        for byte in self.pixels.iter_mut() {
            *byte = table.apply(*byte);
        }
    }

    /// Read back pixel (x, y)
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.context
            .offset(x, y)
            .map(|offset| self.format.unpack(&self.pixels, offset))
    }

    /// Full frame in device layout, ready to be written at offset 0
    pub fn export_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn context(&self) -> DisplayContext {
        self.context
    }
}
