// motion.rs
//
// Pure stepping math for the demos. No scheduler types in here: a Sweep or
// Journey is advanced by whatever loop owns it, one call per frame.

use glam::Vec2;

/// Fixed-increment traversal: yields `begin`, `begin + step`, ... up to and
/// including `end`, one value per call.
#[derive(Debug, Clone)]
pub struct Sweep {
    next_x: f32,
    end_x: f32,
    step_x: f32,
}

impl Sweep {
    pub fn new(begin_x: f32, end_x: f32, step_x: f32) -> Self {
        Self {
            next_x: begin_x,
            end_x,
            step_x,
        }
    }

    /// The next position, or `None` once the traversal has passed the end.
    /// The comparison tolerates half a step of accumulated float error so
    /// the final on-grid position is never dropped. A non-positive step
    /// yields nothing.
    pub fn advance(&mut self) -> Option<f32> {
        if self.step_x <= 0.0 || self.next_x > self.end_x + self.step_x * 0.5 {
            return None;
        }
        let x = self.next_x;
        self.next_x += self.step_x;
        Some(x)
    }
}

/// Straight-line travel from a start toward a target at a fixed speed, in
/// world units per second. Position is a function of elapsed travel time.
#[derive(Debug, Clone, Copy)]
pub struct Journey {
    start: Vec2,
    target: Vec2,
    speed: f32,
    length: f32,
}

impl Journey {
    pub fn new(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            start,
            target,
            speed,
            length: start.distance(target),
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Position after `elapsed` seconds of travel, clamped to the target.
    pub fn position_at(&self, elapsed: f32) -> Vec2 {
        self.start.lerp(self.target, self.fraction(elapsed))
    }

    /// Whether the target has been reached after `elapsed` seconds.
    /// A zero-length journey has already arrived.
    pub fn arrived(&self, elapsed: f32) -> bool {
        self.fraction(elapsed) >= 1.0
    }

    /// Covered distance over total length, clamped to [0, 1].
    fn fraction(&self, elapsed: f32) -> f32 {
        if self.length <= f32::EPSILON {
            return 1.0;
        }
        (elapsed * self.speed / self.length).clamp(0.0, 1.0)
    }
}
