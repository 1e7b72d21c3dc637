//! Rendering module
//!
//! The overlay draws through the `Surface` trait: a handful of 2D primitives
//! that map directly onto Canvas 2D calls in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

use glam::Vec2;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::draw_scene;

/// CSS colors used by the overlay
pub mod palette {
    /// Red accent: selection, connections, rare dots
    pub const ACCENT: &str = "#ef4444";
    /// Lighter red for hovered dots while playing
    pub const ACCENT_SOFT: &str = "#f87171";
    /// Ordinary dots
    pub const SLATE: &str = "#475569";

    /// Ripple ring color at the given opacity
    pub fn ripple(alpha: f32) -> String {
        format!("rgba(239, 68, 68, {alpha:.3})")
    }
}

/// Stroke dash pattern for the pending connection preview
pub const PREVIEW_DASH: [f32; 2] = [5.0, 5.0];
/// Width of connections, rings and hollow dot outlines
pub const LINE_WIDTH: f32 = 2.0;

/// 2D drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    /// Opacity applied to subsequent dot drawing
    fn set_alpha(&mut self, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32);
    /// Stroke every segment as part of one path
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], color: &str, width: f32);
    fn stroke_dashed(&mut self, from: Vec2, to: Vec2, color: &str, width: f32, dash: &[f32]);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _color: &str, _width: f32) {}
    fn stroke_segments(&mut self, _segments: &[(Vec2, Vec2)], _color: &str, _width: f32) {}
    fn stroke_dashed(&mut self, _from: Vec2, _to: Vec2, _color: &str, _width: f32, _dash: &[f32]) {
    }
}
