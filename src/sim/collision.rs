//! Crossing detection between committed connections
//!
//! The puzzle is lost when two connections cross. Connections that share a
//! dot can only meet at that dot, so they are never compared.

use glam::Vec2;

use super::state::Field;

/// Parametric segment test for P1P2 against P3P4.
///
/// Solves for λ (along P1P2) and γ (along P3P4); the segments cross when both
/// lie strictly inside (0, 1). Parallel and collinear segments (zero
/// determinant) never cross, and neither do segments that merely touch at an
/// endpoint.
pub fn segments_cross(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let det = (p2.x - p1.x) * (p4.y - p3.y) - (p4.x - p3.x) * (p2.y - p1.y);
    if det == 0.0 {
        return false;
    }
    let lambda = ((p4.y - p3.y) * (p4.x - p1.x) + (p3.x - p4.x) * (p4.y - p1.y)) / det;
    let gamma = ((p1.y - p2.y) * (p4.x - p1.x) + (p2.x - p1.x) * (p4.y - p1.y)) / det;
    (0.0 < lambda && lambda < 1.0) && (0.0 < gamma && gamma < 1.0)
}

/// First pair of crossing connections (by index), if any.
///
/// Exhaustive pairwise scan; connection counts stay in the tens.
pub fn find_crossing(field: &Field) -> Option<(usize, usize)> {
    let connections = &field.connections;
    for (i, first) in connections.iter().enumerate() {
        for (j, second) in connections.iter().enumerate().skip(i + 1) {
            if first.shares_endpoint(second) {
                continue;
            }
            let (a, b) = first.ends();
            let (c, d) = second.ends();
            if segments_cross(
                field.dots[a].pos,
                field.dots[b].pos,
                field.dots[c].pos,
                field.dots[d].pos,
            ) {
                return Some((i, j));
            }
        }
    }
    None
}

/// True if any two connections cross
#[inline]
pub fn has_crossing(field: &Field) -> bool {
    find_crossing(field).is_some()
}
