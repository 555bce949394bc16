use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

/// Cancellation flag shared with the interrupt handler.
/// The handler only sets it; the render loop checks it between frames.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Hides the console cursor for its lifetime, shows it again on drop.
/// Terminal failures are logged and otherwise ignored.
pub struct CursorGuard<W: Write> {
    tty: Option<W>,
}

impl CursorGuard<std::fs::File> {
    pub fn acquire(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().write(true).open(path) {
            Ok(file) => Self::new(file),
            Err(e) => {
                warn!("cursor: cannot open {}: {}", path.display(), e);
                Self { tty: None }
            }
        }
    }
}

impl<W: Write> CursorGuard<W> {
    pub fn new(mut tty: W) -> Self {
        if let Err(e) = tty.write_all(HIDE_CURSOR).and_then(|_| tty.flush()) {
            warn!("cursor: hide failed: {}", e);
        }
        Self { tty: Some(tty) }
    }
}

impl<W: Write> Drop for CursorGuard<W> {
    fn drop(&mut self) {
        if let Some(tty) = self.tty.as_mut() {
            if let Err(e) = tty.write_all(SHOW_CURSOR).and_then(|_| tty.flush()) {
                warn!("cursor: restore failed: {}", e);
            }
        }
    }
}
