//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, so demo runs and tests are reproducible.

use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits give a full-precision f32 mantissa.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform point inside a disc of the given radius.
    pub fn in_disc(&mut self, radius: f32) -> Vec2 {
        let angle = self.next_f32() * std::f32::consts::TAU;
        // sqrt keeps the distribution uniform over area, not over radius.
        let r = self.next_f32().sqrt() * radius;
        Vec2::new(angle.cos(), angle.sin()) * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        // Should not get stuck at zero
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn floats_stay_in_unit_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let x = rng.next_f32();
            assert!((0.0..1.0).contains(&x), "out of range: {}", x);
        }
    }

    #[test]
    fn disc_points_stay_inside_the_radius() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let p = rng.in_disc(3.0);
            assert!(p.length() <= 3.0 + 1e-4, "escaped the disc: {:?}", p);
        }
    }
}
