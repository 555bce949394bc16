use bytemuck::{Pod, Zeroable};

/// Bytes per pixel in the framebuffer encoding
pub const BYTES_PER_PIXEL: usize = 4;

/// One framebuffer pixel in device byte order (BGRX).
/// The fourth byte is padding; it is written as given and never interpreted.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub x: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    /// Color from red, green, blue with the padding byte zeroed
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, x: 0 }
    }

    /// Color from raw device bytes
    pub const fn from_bgrx(bytes: [u8; 4]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            x: bytes[3],
        }
    }

    /// Raw device bytes
    pub fn to_bgrx(self) -> [u8; 4] {
        bytemuck::cast(self)
    }
}

/// Raw pixel encoding of the display.
///
/// Only BGRX is supported: byte 0 blue, 1 green, 2 red, 3 unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Bgrx,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgrx => BYTES_PER_PIXEL,
        }
    }

    /// Write `color` into `buf` at byte `offset`
    pub fn pack(self, color: Color, buf: &mut [u8], offset: usize) {
        match self {
            PixelFormat::Bgrx => {
                buf[offset..offset + BYTES_PER_PIXEL].copy_from_slice(bytemuck::bytes_of(&color))
            }
        }
    }

    /// Read the color stored in `buf` at byte `offset`
    pub fn unpack(self, buf: &[u8], offset: usize) -> Color {
        match self {
            PixelFormat::Bgrx => {
                bytemuck::pod_read_unaligned(&buf[offset..offset + BYTES_PER_PIXEL])
            }
        }
    }
}
