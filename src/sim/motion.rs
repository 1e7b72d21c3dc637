//! Dot spawning and per-tick motion
//!
//! Dots move in straight lines and bounce off the surface edges with no
//! energy loss.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Dot, DotStyle, DotTint, Field};
use crate::consts::*;

/// Number of dots for a surface of the given size
pub fn dot_count(width: f32, height: f32) -> usize {
    if width <= 0.0 || height <= 0.0 {
        return 0;
    }
    (width * height / DOT_DENSITY).floor() as usize
}

/// Scatter a fresh set of dots over the surface
pub fn spawn_dots(width: f32, height: f32, seed: u64) -> Vec<Dot> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..dot_count(width, height))
        .map(|_| {
            let pos = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0 * MAX_DOT_SPEED,
                (rng.random::<f32>() - 0.5) * 2.0 * MAX_DOT_SPEED,
            );
            let radius = MIN_DOT_RADIUS + rng.random::<f32>() * DOT_RADIUS_SPREAD;
            let style = if rng.random_bool(HOLLOW_CHANCE) {
                DotStyle::Hollow
            } else {
                DotStyle::Solid
            };
            let tint = if rng.random_bool(ACCENT_CHANCE) {
                DotTint::Accent
            } else {
                DotTint::Ordinary
            };
            Dot {
                pos,
                vel,
                radius,
                style,
                tint,
            }
        })
        .collect()
}

/// Apply new surface bounds. Dots are only generated the first time, while the
/// field is still empty; later resizes keep the existing set.
pub fn fit_to_surface(field: &mut Field, width: f32, height: f32, seed: u64) {
    field.width = width;
    field.height = height;
    if field.dots.is_empty() {
        field.dots = spawn_dots(width, height, seed);
        log::info!(
            "Spawned {} dots for {}x{} surface",
            field.dots.len(),
            width,
            height
        );
    }
}

/// Advance every dot by one tick and reflect off the edges
pub fn advance_dots(field: &mut Field) {
    let (w, h) = (field.width, field.height);
    for dot in &mut field.dots {
        dot.pos += dot.vel;
        // Only flip when heading further out, so a dot stranded outside by a
        // shrinking surface drifts back instead of jittering at the edge.
        if (dot.pos.x < 0.0 && dot.vel.x < 0.0) || (dot.pos.x > w && dot.vel.x > 0.0) {
            dot.vel.x = -dot.vel.x;
        }
        if (dot.pos.y < 0.0 && dot.vel.y < 0.0) || (dot.pos.y > h && dot.vel.y > 0.0) {
            dot.vel.y = -dot.vel.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dot_count_from_area() {
        assert_eq!(dot_count(1500.0, 1000.0), 100);
        assert_eq!(dot_count(100.0, 100.0), 0);
        assert_eq!(dot_count(0.0, 800.0), 0);
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let a = spawn_dots(1200.0, 800.0, 42);
        let b = spawn_dots(1200.0, 800.0, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_spawned_dots_within_ranges() {
        for dot in spawn_dots(1920.0, 1080.0, 7) {
            assert!((0.0..=1920.0).contains(&dot.pos.x));
            assert!((0.0..=1080.0).contains(&dot.pos.y));
            assert!(dot.vel.x.abs() <= MAX_DOT_SPEED);
            assert!(dot.vel.y.abs() <= MAX_DOT_SPEED);
            assert!(dot.radius >= MIN_DOT_RADIUS);
            assert!(dot.radius <= MIN_DOT_RADIUS + DOT_RADIUS_SPREAD);
        }
    }

    #[test]
    fn test_resize_keeps_existing_dots() {
        let mut field = Field::default();
        fit_to_surface(&mut field, 1500.0, 1000.0, 1);
        let before = field.dots.clone();
        fit_to_surface(&mut field, 3000.0, 2000.0, 2);
        assert_eq!(field.dots, before);
        assert_eq!(field.width, 3000.0);
    }

    #[test]
    fn test_wall_bounce_inverts_velocity() {
        let mut field = Field::new(100.0, 100.0);
        field.dots.push(Dot::new(Vec2::new(99.8, 50.0), Vec2::new(0.4, 0.0), 3.0));
        advance_dots(&mut field);
        assert!(field.dots[0].pos.x > 100.0);
        assert_eq!(field.dots[0].vel.x, -0.4);
        advance_dots(&mut field);
        assert!(field.dots[0].pos.x < 100.0);
    }

    #[test]
    fn test_stranded_dot_drifts_back() {
        let mut field = Field::new(100.0, 100.0);
        field.dots.push(Dot::new(Vec2::new(150.0, 50.0), Vec2::new(-0.4, 0.0), 3.0));
        for _ in 0..10 {
            advance_dots(&mut field);
        }
        assert_eq!(field.dots[0].vel.x, -0.4);
        assert!(field.dots[0].pos.x < 150.0);
    }

    proptest! {
        #[test]
        fn prop_dots_stay_within_one_step(
            x in 0.0f32..400.0,
            y in 0.0f32..300.0,
            vx in -MAX_DOT_SPEED..MAX_DOT_SPEED,
            vy in -MAX_DOT_SPEED..MAX_DOT_SPEED,
            ticks in 1usize..2000,
        ) {
            let mut field = Field::new(400.0, 300.0);
            field.dots.push(Dot::new(Vec2::new(x, y), Vec2::new(vx, vy), 4.0));
            for _ in 0..ticks {
                advance_dots(&mut field);
                let dot = field.dots[0];
                prop_assert!(dot.pos.x >= -vx.abs() - 1e-3 && dot.pos.x <= 400.0 + vx.abs() + 1e-3);
                prop_assert!(dot.pos.y >= -vy.abs() - 1e-3 && dot.pos.y <= 300.0 + vy.abs() + 1e-3);
            }
        }
    }
}
