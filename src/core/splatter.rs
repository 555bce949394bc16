use rand::Rng;
use rand_distr::StandardNormal;

use super::canvas::DrawOp;
use super::display_context::DisplayContext;
use super::timer::Accumulator;
use super::touch::TouchState;
use crate::math::Color;

/// Splats stamped per frame while touching
pub const POINTS_PER_FRAME: u32 = 3;
/// Standard deviation of the jitter around the touch point, in pixels
pub const SPREAD: f64 = 10.0;
/// Splat radius range, inclusive
pub const RADIUS_RANGE: (i32, i32) = (1, 2);
/// Channel range for splat colors, inclusive
pub const CHANNEL_RANGE: (u8, u8) = (150, 255);

/// How many splats a frame gets while touching
#[derive(Debug, Clone)]
pub enum SplatRate {
    /// Fixed count every frame
    Constant(u32),
    /// `rate` splats per second of contact, carrying fractions between
    /// frames, at most `cap` per frame
    PerSecond { rate: f32, cap: u32 },
}

impl Default for SplatRate {
    fn default() -> Self {
        SplatRate::Constant(POINTS_PER_FRAME)
    }
}

/// Produces randomly jittered, randomly colored stamp requests around the touch point
pub struct SplatterGenerator<R: Rng> {
    rng: R,
    context: DisplayContext,
    count: Count,
    spread: f64,
}

enum Count {
    Constant(u32),
    Timed(Accumulator),
}

impl<R: Rng> SplatterGenerator<R> {
    pub fn new(context: DisplayContext, rng: R, rate: SplatRate) -> Self {
        let count = match rate {
            SplatRate::Constant(n) => Count::Constant(n),
            SplatRate::PerSecond { rate, cap } => {
                Count::Timed(Accumulator::new(rate, cap.min(u8::MAX as u32) as u8))
            }
        };
        Self {
            rng,
            context,
            count,
            spread: SPREAD,
        }
    }

    /// Stamp requests for this frame. Empty when there is no contact.
    pub fn generate(&mut self, touch: &TouchState, delta: f32) -> Vec<DrawOp> {
        if !touch.contact() {
            // Timed budget only accrues during contact
            if let Count::Timed(acc) = &mut self.count {
                acc.reset();
            }
            return Vec::new();
        }

        let count = match &mut self.count {
            Count::Constant(n) => *n as usize,
            Count::Timed(acc) => acc.tick(delta).count(),
        };

        let (tx, ty) = touch.position();
        (0..count).map(|_| self.splat(tx, ty)).collect()
    }

    fn splat(&mut self, tx: i32, ty: i32) -> DrawOp {
        let radius = self.rng.gen_range(RADIUS_RANGE.0..=RADIUS_RANGE.1);

        let jitter_x: f64 = self.rng.sample(StandardNormal);
        let jitter_y: f64 = self.rng.sample(StandardNormal);
        let x = (tx as f64 + jitter_x * self.spread) as i32;
        let y = (ty as f64 + jitter_y * self.spread) as i32;

        let max_x = self.context.width() as i32 - radius - 1;
        let max_y = self.context.height() as i32 - radius - 1;

        DrawOp::FilledCircle {
            cx: x.min(max_x).max(radius),
            cy: y.min(max_y).max(radius),
            radius,
            color: self.color(),
        }
    }

    fn color(&mut self) -> Color {
        let (lo, hi) = CHANNEL_RANGE;
        let b = self.rng.gen_range(lo..=hi);
        let g = self.rng.gen_range(lo..=hi);
        let r = self.rng.gen_range(lo..=hi);
        Color::rgb(r, g, b)
    }
}
