//! Armball - a planar 3-link arm catch-and-shoot arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, physics, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, raw input capture, and frame scheduling live outside this
//! crate. Callers feed already-interpreted commands in through
//! `sim::TickInput` once per frame and read the updated state snapshot
//! (arm pose, ball list, scores) back between ticks.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Simulation constants
pub mod consts {
    /// Maximum dt accepted per tick; frame hitches clamp here, no sub-stepping
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Baseline the arm sits on; balls crossing it are lost
    pub const FLOOR_Y: f32 = 0.0;
    /// Scene horizontal half-extent; the base carriage clamps to this
    pub const SCENE_HALF_WIDTH: f32 = 400.0;

    /// Default link lengths, root to tip
    pub const LINK_LENGTHS: [f32; 3] = [120.0, 100.0, 80.0];

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Arm segments are capsules of this radius for collision
    pub const ARM_CAPSULE_RADIUS: f32 = 6.0;
    /// The end effector is an extra circular obstacle of this radius
    pub const EFFECTOR_RADIUS: f32 = 8.0;

    /// Base carriage speed while a move command is held (units/s)
    pub const BASE_SPEED: f32 = 240.0;

    /// Catch-mode spawn rate default (balls/s)
    pub const DEFAULT_SPAWN_RATE: f32 = 1.0;
}

/// Normalize an angle into (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Wrap degrees into [0, 360)
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }
}
