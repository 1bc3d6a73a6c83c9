//! Contact geometry for balls against the arm and each other
//!
//! Every test here is total: a degenerate direction (coincident centers,
//! zero-length segment) falls back to a fixed unit normal instead of
//! producing NaN.

use glam::Vec2;

const EPS: f32 = 1e-6;

/// Separation direction used when two points coincide
const FALLBACK_NORMAL: Vec2 = Vec2::Y;

/// Contact between a ball and an obstacle
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing from the obstacle toward the ball center
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Closest point to `p` on the segment `a`..`b`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPS {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Ball vs. capsule (a segment with thickness)
pub fn ball_capsule_contact(
    pos: Vec2,
    radius: f32,
    a: Vec2,
    b: Vec2,
    capsule_radius: f32,
) -> Option<Contact> {
    let closest = closest_point_on_segment(a, b, pos);
    point_contact(pos, closest, radius + capsule_radius)
}

/// Ball vs. solid circle obstacle
pub fn ball_circle_contact(
    pos: Vec2,
    radius: f32,
    center: Vec2,
    circle_radius: f32,
) -> Option<Contact> {
    point_contact(pos, center, radius + circle_radius)
}

/// Ball vs. the rim of a circle. The interior is open, so balls pass
/// through the mouth of a hoop but bounce off its ring.
pub fn ball_ring_contact(
    pos: Vec2,
    radius: f32,
    center: Vec2,
    ring_radius: f32,
) -> Option<Contact> {
    let offset = pos - center;
    let dist = offset.length();
    let radial = if dist < EPS {
        FALLBACK_NORMAL
    } else {
        offset / dist
    };
    let signed = dist - ring_radius;
    let penetration = radius - signed.abs();
    if penetration <= 0.0 {
        return None;
    }
    let normal = if signed >= 0.0 { radial } else { -radial };
    Some(Contact {
        normal,
        penetration,
    })
}

/// Contact against a point obstacle with combined radius `reach`
fn point_contact(pos: Vec2, point: Vec2, reach: f32) -> Option<Contact> {
    let offset = pos - point;
    let dist_sq = offset.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist < EPS {
        FALLBACK_NORMAL
    } else {
        offset / dist
    };
    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// One symmetric separation step for a ball pair. Returns the positional
/// corrections for each ball, or `None` when they do not overlap. The
/// overlap is split evenly; a single pass per tick means dense stacks
/// spread out over several frames rather than instantly.
pub fn separate_pair(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> Option<(Vec2, Vec2)> {
    let offset = p2 - p1;
    let dist = offset.length();
    let overlap = r1 + r2 - dist;
    if overlap <= 0.0 {
        return None;
    }
    let normal = if dist < EPS {
        FALLBACK_NORMAL
    } else {
        offset / dist
    };
    let half = normal * (overlap * 0.5);
    Some((-half, half))
}
