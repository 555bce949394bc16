use rand::Rng;

use super::Scene;
use crate::core::{Canvas, FadeTable, SplatterGenerator, TouchState};
use crate::math::Color;

/// Touch splatter with fading trails
pub struct TrailsScene<R: Rng> {
    splatter: SplatterGenerator<R>,
    fade: FadeTable,
}

impl<R: Rng> TrailsScene<R> {
    pub fn new(splatter: SplatterGenerator<R>) -> Self {
        Self {
            splatter,
            fade: FadeTable::new(),
        }
    }
}

impl<R: Rng> Scene for TrailsScene<R> {
    fn start(&mut self, canvas: &mut Canvas) {
        canvas.clear(Color::BLACK);
    }

    fn draw(&mut self, canvas: &mut Canvas, touch: &TouchState, delta: f32) {
        for op in self.splatter.generate(touch, delta) {
            canvas.apply(&op);
        }
    }

    fn after_present(&mut self, canvas: &mut Canvas) {
        canvas.decay_all(&self.fade);
    }

    fn uses_touch(&self) -> bool {
        true
    }
}
