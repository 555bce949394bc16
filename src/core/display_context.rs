use super::error::{Error, Result};
use crate::math::BYTES_PER_PIXEL;

/// Reference panel width in pixels
pub const WIDTH: u32 = 800;
/// Reference panel height in pixels
pub const HEIGHT: u32 = 480;
/// Reference row length in bytes
pub const STRIDE: usize = 3200;

/// Display context - framebuffer geometry.
/// Fields are private so every instance has passed the stride check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Bytes per row, including trailing padding
    stride: usize,
}

impl DisplayContext {
    /// Create new display context. Rows must fit inside the stride.
    pub fn new(width: u32, height: u32, stride: usize) -> Result<Self> {
        if width == 0 || height == 0 || stride < width as usize * BYTES_PER_PIXEL {
            return Err(Error::InvalidGeometry { width, height, stride });
        }
        Ok(Self { width, height, stride })
    }

    /// Geometry of the reference 800x480 panel
    pub const fn reference() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            stride: STRIDE,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes per row that hold visible pixels
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Total number of visible pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of one full frame in bytes
    pub fn buffer_size(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Byte offset of pixel (x, y), or None if outside the visible area
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self::reference()
    }
}
