mod color;

pub use color::{Color, PixelFormat, BYTES_PER_PIXEL};
