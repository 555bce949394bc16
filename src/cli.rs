// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::splatter::POINTS_PER_FRAME;
use crate::core::{FrameCap, SplatRate};
use crate::display::MAX_CONSECUTIVE_FAILURES;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// Touch splatter with fading trails
    #[default]
    Trails,
    /// Bouncing ball on a cleared screen
    Ball,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "touch-trails")]
#[command(about = "Touch-driven fading trails on a raw framebuffer", long_about = None)]
pub struct Cli {
    /// Framebuffer device
    #[arg(long = "fb", default_value = "/dev/fb0")]
    pub framebuffer: PathBuf,

    /// Touchscreen event device
    #[arg(long = "touch", default_value = "/dev/input/event0")]
    pub touch: PathBuf,

    /// Console whose cursor is hidden while running
    #[arg(long = "tty", default_value = "/dev/tty0")]
    pub tty: PathBuf,

    /// What to draw
    #[arg(long, value_enum, default_value_t = SceneKind::Trails)]
    pub scene: SceneKind,

    /// Upper bound on frames per second (unthrottled when absent)
    #[arg(long = "max-fps", value_parser = parse_max_fps)]
    pub max_fps: Option<f32>,

    /// Derive splats per frame from elapsed time instead of a fixed count
    #[arg(long = "points-per-second", value_parser = parse_positive)]
    pub points_per_second: Option<f32>,

    /// Consecutive failed frame writes before giving up
    #[arg(long = "max-write-failures", default_value_t = MAX_CONSECUTIVE_FAILURES)]
    pub max_write_failures: u32,
}

impl Cli {
    pub fn frame_cap(&self) -> Option<FrameCap> {
        self.max_fps.and_then(FrameCap::new)
    }

    pub fn splat_rate(&self) -> SplatRate {
        match self.points_per_second {
            Some(rate) => SplatRate::PerSecond { rate, cap: POINTS_PER_FRAME },
            None => SplatRate::default(),
        }
    }
}

fn parse_positive(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{s} is not a positive number"))
    }
}

fn parse_max_fps(s: &str) -> Result<f32, String> {
    let value = parse_positive(s)?;
    match FrameCap::new(value) {
        Some(_) => Ok(value),
        None => Err(format!("{s} fps gives no usable frame interval")),
    }
}
