//! Scene drawing: ripples, dots, connections and the preview line

use glam::Vec2;

use super::palette::{self, ACCENT, ACCENT_SOFT, SLATE};
use super::{LINE_WIDTH, PREVIEW_DASH, Surface};
use crate::input::hovers;
use crate::sim::{Dot, DotStyle, DotTint, Field, Game, GameStatus};

fn base_color(dot: &Dot) -> &'static str {
    match dot.tint {
        DotTint::Accent => ACCENT,
        DotTint::Ordinary => SLATE,
    }
}

/// Color and fill for one dot given the hover/selection state
fn dot_paint(dot: &Dot, status: GameStatus, hovered: bool, selected: bool) -> (&'static str, bool) {
    let color = match status {
        GameStatus::Playing if selected => ACCENT,
        GameStatus::Playing if hovered => ACCENT_SOFT,
        GameStatus::Playing => base_color(dot),
        GameStatus::Idle | GameStatus::GameOver if hovered => ACCENT,
        GameStatus::Idle | GameStatus::GameOver => base_color(dot),
    };
    let filled = dot.style == DotStyle::Solid || hovered || selected;
    (color, filled)
}

/// Draw one frame of the overlay
pub fn draw_scene(surface: &mut impl Surface, field: &Field, game: &Game, pointer: Vec2, alpha: f32) {
    surface.clear();

    for ripple in &field.ripples {
        surface.stroke_circle(
            ripple.origin,
            ripple.radius,
            &palette::ripple(ripple.alpha),
            LINE_WIDTH,
        );
    }

    let status = game.status();
    let selected = game.selected().filter(|_| status == GameStatus::Playing);
    surface.set_alpha(alpha);
    for (index, dot) in field.dots.iter().enumerate() {
        let (color, filled) = dot_paint(dot, status, hovers(dot, pointer), selected == Some(index));
        if filled {
            surface.fill_circle(dot.pos, dot.radius, color);
        } else {
            surface.stroke_circle(dot.pos, dot.radius, color, LINE_WIDTH);
        }
    }
    surface.set_alpha(1.0);

    if !field.connections.is_empty() {
        let segments: Vec<(Vec2, Vec2)> = field.segments().collect();
        surface.stroke_segments(&segments, ACCENT, LINE_WIDTH);
    }

    if let Some(dot) = selected.and_then(|i| field.dot(i)) {
        surface.stroke_dashed(dot.pos, pointer, ACCENT, LINE_WIDTH, &PREVIEW_DASH);
    }
}
