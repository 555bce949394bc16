use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use log::{info, warn};

use crate::core::{DisplayContext, Error, Result};

/// Consecutive failed writes after which the display is treated as gone
pub const MAX_CONSECUTIVE_FAILURES: u32 = 30;

/// Byte sink for whole frames
pub trait FrameSink {
    /// Write one complete frame starting at offset 0
    fn present(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Linear framebuffer device (or anything seekable standing in for one)
pub struct Framebuffer<W: Write + Seek> {
    device: W,
    frame_size: usize,
}

impl Framebuffer<File> {
    /// Open the framebuffer node for writing
    pub fn open(path: impl AsRef<Path>, context: &DisplayContext) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| Error::DeviceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        info!(
            "framebuffer opened: {} ({}x{}, stride {})",
            path.display(),
            context.width(),
            context.height(),
            context.stride()
        );
        Ok(Self::new(file, context))
    }
}

impl<W: Write + Seek> Framebuffer<W> {
    pub fn new(device: W, context: &DisplayContext) -> Self {
        Self {
            device,
            frame_size: context.buffer_size(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.device
    }

    pub fn into_inner(self) -> W {
        self.device
    }
}

impl<W: Write + Seek> FrameSink for Framebuffer<W> {
    fn present(&mut self, frame: &[u8]) -> io::Result<()> {
        if frame.len() != self.frame_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("frame is {} bytes, device expects {}", frame.len(), self.frame_size),
            ));
        }
        self.device.seek(SeekFrom::Start(0))?;
        self.device.write_all(frame)?;
        self.device.flush()
    }
}

/// Wraps a sink and turns a run of failed writes into a fatal error
pub struct Display<S: FrameSink> {
    sink: S,
    consecutive_failures: u32,
    max_failures: u32,
}

impl<S: FrameSink> Display<S> {
    pub fn new(sink: S, max_failures: u32) -> Self {
        Self {
            sink,
            consecutive_failures: 0,
            max_failures: max_failures.max(1),
        }
    }

    /// Write a frame. A single failure is logged and reported as
    /// `TransientWrite`; `max_failures` in a row become `FatalWrite`.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        match self.sink.present(frame) {
            Ok(()) => {
                self.consecutive_failures = 0;
                Ok(())
            }
            Err(source) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= self.max_failures {
                    return Err(Error::FatalWrite {
                        failures: self.consecutive_failures,
                        source,
                    });
                }
                warn!(
                    "frame write failed ({}/{}): {}",
                    self.consecutive_failures, self.max_failures, source
                );
                Err(Error::TransientWrite(source))
            }
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
