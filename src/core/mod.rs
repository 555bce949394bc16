pub mod canvas;
pub mod clock;
pub mod display_context;
pub mod error;
pub mod shutdown;
pub mod splatter;
pub mod timer;
pub mod touch;

pub use canvas::{Canvas, DrawOp, FadeTable};
pub use clock::{Clock, FrameInfo};
pub use display_context::DisplayContext;
pub use error::{Error, Result};
pub use shutdown::{CursorGuard, ShutdownToken};
pub use splatter::{SplatRate, SplatterGenerator};
pub use timer::{Accumulator, FpsMeter, FrameCap};
pub use touch::{RawInputEvent, TouchDecoder, TouchState};
