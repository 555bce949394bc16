pub mod cli;
pub mod core;
pub mod display;
pub mod math;
pub mod renderer;
pub mod scenes;

pub use renderer::{LoopState, RenderLoop};
