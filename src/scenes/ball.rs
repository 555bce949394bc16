use super::Scene;
use crate::core::{Canvas, DisplayContext, DrawOp, TouchState};
use crate::math::Color;

/// Solid ball bouncing off the panel edges, redrawn on a cleared canvas each frame
#[derive(Debug, Clone)]
pub struct BouncingBall {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    radius: i32,
    color: Color,
    background: Color,
    width: i32,
    height: i32,
}

impl BouncingBall {
    pub fn new(context: DisplayContext) -> Self {
        Self {
            x: context.width() as i32 / 2,
            y: context.height() as i32 / 2,
            dx: 3,
            dy: 2,
            radius: 30,
            color: Color::GREEN,
            background: Color::BLACK,
            width: context.width() as i32,
            height: context.height() as i32,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Advance one frame, reversing direction at the edges
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;

        if self.x <= self.radius || self.x >= self.width - self.radius {
            self.dx = -self.dx;
        }
        if self.y <= self.radius || self.y >= self.height - self.radius {
            self.dy = -self.dy;
        }
    }
}

impl Scene for BouncingBall {
    fn start(&mut self, canvas: &mut Canvas) {
        canvas.clear(self.background);
    }

    fn draw(&mut self, canvas: &mut Canvas, _touch: &TouchState, _delta: f32) {
        self.advance();
        canvas.apply(&DrawOp::Clear(self.background));
        canvas.apply(&DrawOp::FilledCircle {
            cx: self.x,
            cy: self.y,
            radius: self.radius,
            color: self.color,
        });
    }
}
