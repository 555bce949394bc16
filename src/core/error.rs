use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the rendering pipeline and its devices.
#[derive(Error, Debug)]
pub enum Error {
    /// A device node could not be opened.
    #[error("device {path} unavailable: {source}")]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input stream delivered a short record.
    #[error("truncated input record: got {got} of {expected} bytes")]
    ProtocolFraming { got: usize, expected: usize },
    /// Reading the input device failed for a reason other than "no data".
    #[error("input read failed: {0}")]
    InputRead(#[source] io::Error),
    /// A single frame write failed.
    #[error("frame write failed: {0}")]
    TransientWrite(#[source] io::Error),
    /// Frame writes kept failing; the display is considered gone.
    #[error("display unwritable after {failures} consecutive failures: {source}")]
    FatalWrite {
        failures: u32,
        #[source]
        source: io::Error,
    },
    /// Framebuffer geometry does not fit the pixel format.
    #[error("invalid geometry {width}x{height} with stride {stride}")]
    InvalidGeometry { width: u32, height: u32, stride: usize },
}

impl Error {
    /// Only a fatal write ends the frame cadence
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::FatalWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
