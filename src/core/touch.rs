use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use log::{debug, info};

use super::error::{Error, Result};

pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const BTN_TOUCH: u16 = 0x14a;

/// Size of one kernel input record on the wire
pub const EVENT_SIZE: usize = std::mem::size_of::<RawInputEvent>();

/// Kernel input record: `{u32 sec, u32 usec, u16 type, u16 code, i32 value}`, little-endian
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct RawInputEvent {
    pub sec: u32,
    pub usec: u32,
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl RawInputEvent {
    pub fn new(kind: u16, code: u16, value: i32) -> Self {
        Self { sec: 0, usec: 0, kind, code, value }
    }

    pub fn from_le_bytes(bytes: &[u8; EVENT_SIZE]) -> Self {
        let raw: RawInputEvent = bytemuck::pod_read_unaligned(bytes);
        Self {
            sec: u32::from_le(raw.sec),
            usec: u32::from_le(raw.usec),
            kind: u16::from_le(raw.kind),
            code: u16::from_le(raw.code),
            value: i32::from_le(raw.value),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; EVENT_SIZE] {
        let le = Self {
            sec: self.sec.to_le(),
            usec: self.usec.to_le(),
            kind: self.kind.to_le(),
            code: self.code.to_le(),
            value: self.value.to_le(),
        };
        bytemuck::cast(le)
    }
}

/// Latest touch sample. Only the most recent values survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchState {
    x: i32,
    y: i32,
    contact: bool,
}

impl TouchState {
    pub fn new(x: i32, y: i32, contact: bool) -> Self {
        Self { x, y, contact }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn contact(&self) -> bool {
        self.contact
    }

    /// Fold one event into the state, returns false for ignored events
    pub fn apply(&mut self, event: &RawInputEvent) -> bool {
        match (event.kind, event.code) {
            (EV_ABS, ABS_MT_POSITION_X) => self.x = event.value,
            (EV_ABS, ABS_MT_POSITION_Y) => self.y = event.value,
            (EV_KEY, BTN_TOUCH) => self.contact = event.value != 0,
            _ => return false,
        }
        true
    }
}

/// Drains a non-blocking input source into a `TouchState`
pub struct TouchDecoder<R: Read> {
    source: R,
}

impl TouchDecoder<File> {
    /// Open an evdev node in non-blocking mode
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| Error::DeviceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        info!("touch input opened: {}", path.display());
        Ok(Self::new(file))
    }
}

impl<R: Read> TouchDecoder<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Read every queued record and apply it.
    ///
    /// Returns the number of recognised events. "Would block" and end of
    /// stream both end the drain normally; a short record ends it with
    /// `ProtocolFraming` and leaves the state untouched by that record.
    pub fn poll(&mut self, state: &mut TouchState) -> Result<usize> {
        let mut applied = 0;
        let mut buf = [0u8; EVENT_SIZE];

        loop {
            match self.source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) if n < EVENT_SIZE => {
                    return Err(Error::ProtocolFraming { got: n, expected: EVENT_SIZE });
                }
                Ok(_) => {
                    let event = RawInputEvent::from_le_bytes(&buf);
                    if state.apply(&event) {
                        applied += 1;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::InputRead(e)),
            }
        }

        if applied > 0 {
            debug!("touch: {} events -> {:?}", applied, state);
        }
        Ok(applied)
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}
