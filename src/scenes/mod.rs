use crate::core::{Canvas, TouchState};

mod ball;
mod trails;

pub use ball::BouncingBall;
pub use trails::TrailsScene;

/// Per-frame drawing logic driven by the render loop
pub trait Scene {
    /// Prepare the canvas before the first frame
    fn start(&mut self, canvas: &mut Canvas);

    /// Draw this frame's content; `delta` is the previous frame time in seconds
    fn draw(&mut self, canvas: &mut Canvas, touch: &TouchState, delta: f32);

    /// Runs after the frame has been written to the display
    fn after_present(&mut self, _canvas: &mut Canvas) {}

    /// Whether the scene reads touch input at all
    fn uses_touch(&self) -> bool {
        false
    }
}
