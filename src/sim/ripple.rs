//! Click ripples
//!
//! Cosmetic only; they never touch game state.

use glam::Vec2;

use super::state::{Field, Ripple};
use crate::consts::*;

impl Ripple {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius: RIPPLE_MAX_RADIUS,
            alpha: RIPPLE_START_ALPHA,
        }
    }

    /// Grow and fade by one tick. Returns false once fully faded.
    pub fn advance(&mut self) -> bool {
        self.radius = (self.radius + RIPPLE_GROWTH).min(self.max_radius);
        self.alpha -= RIPPLE_FADE;
        self.alpha > 0.0
    }
}

pub fn spawn_ripple(field: &mut Field, origin: Vec2) {
    field.ripples.push(Ripple::new(origin));
}

/// Advance all ripples and drop the expired ones
pub fn advance_ripples(field: &mut Field) {
    field.ripples.retain_mut(Ripple::advance);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_grows_and_fades() {
        let mut ripple = Ripple::new(Vec2::new(10.0, 10.0));
        assert!(ripple.advance());
        assert_eq!(ripple.radius, RIPPLE_GROWTH);
        assert!(ripple.alpha < RIPPLE_START_ALPHA);
    }

    #[test]
    fn test_ripples_expire() {
        let mut field = Field::new(100.0, 100.0);
        spawn_ripple(&mut field, Vec2::ZERO);
        let mut ticks = 0;
        while !field.ripples.is_empty() {
            advance_ripples(&mut field);
            ticks += 1;
            assert!(ticks < 100, "ripple never expired");
        }
        // 0.5 / 0.015 ≈ 33.3
        assert!((33..=34).contains(&ticks));
    }

    #[test]
    fn test_radius_capped() {
        let mut ripple = Ripple::new(Vec2::ZERO);
        ripple.alpha = 10.0;
        for _ in 0..100 {
            ripple.advance();
        }
        assert_eq!(ripple.radius, RIPPLE_MAX_RADIUS);
    }
}
