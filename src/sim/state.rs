//! Entity storage for the dot field
//!
//! Dots, connections and ripples live in plain vectors and are referenced by
//! index only. Dots are never removed, so a connection's indices stay valid for
//! the lifetime of the field.

use glam::Vec2;

/// How a dot is drawn when not highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotStyle {
    #[default]
    Solid,
    Hollow,
}

/// Color tag of a dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotTint {
    #[default]
    Ordinary,
    /// Rare red dot
    Accent,
}

/// A drifting dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub style: DotStyle,
    pub tint: DotTint,
}

impl Dot {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            style: DotStyle::Solid,
            tint: DotTint::Ordinary,
        }
    }

    /// True if `point` is within `radius + margin` of the center
    #[inline]
    pub fn reaches(&self, point: Vec2, margin: f32) -> bool {
        self.pos.distance(point) < self.radius + margin
    }
}

/// A committed line between two distinct dots (unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    a: usize,
    b: usize,
}

impl Connection {
    /// Normalizes the pair so `(a, b)` and `(b, a)` compare equal
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
        }
    }

    #[inline]
    pub fn ends(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    #[inline]
    pub fn touches(&self, dot: usize) -> bool {
        self.a == dot || self.b == dot
    }

    #[inline]
    pub fn shares_endpoint(&self, other: &Connection) -> bool {
        self.touches(other.a) || self.touches(other.b)
    }
}

/// Expanding ring left behind by a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
}

/// Live entities of the overlay plus the surface bounds
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub dots: Vec<Dot>,
    pub connections: Vec<Connection>,
    pub ripples: Vec<Ripple>,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn dot(&self, index: usize) -> Option<&Dot> {
        self.dots.get(index)
    }

    /// True if the unordered pair is already connected
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        let wanted = Connection::new(a, b);
        self.connections.iter().any(|c| *c == wanted)
    }

    /// Add a connection. Rejects self-loops, unknown dots and duplicates.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.dots.len() || b >= self.dots.len() || self.is_connected(a, b) {
            return false;
        }
        self.connections.push(Connection::new(a, b));
        true
    }

    /// Number of connections with `dot` as an endpoint
    pub fn degree(&self, dot: usize) -> usize {
        self.connections.iter().filter(|c| c.touches(dot)).count()
    }

    /// Endpoint positions of every connection, in insertion order
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.connections.iter().map(|c| {
            let (a, b) = c.ends();
            (self.dots[a].pos, self.dots[b].pos)
        })
    }

    pub fn clear_connections(&mut self) {
        self.connections.clear();
    }
}
