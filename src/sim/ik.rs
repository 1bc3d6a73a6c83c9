//! Cyclic Coordinate Descent inverse kinematics
//!
//! The solver works on absolute joint orientations (cumulative angle sums)
//! rather than the relative angles directly. Each sweep walks the joints
//! tip-to-root, rotating one joint - and the whole chain below it - so the
//! end effector swings onto the pivot-to-target ray. Seeding from the arm's
//! current pose keeps consecutive solutions continuous, which is what makes
//! pointer-following look smooth.

use glam::Vec2;

use super::arm::Arm;
use crate::normalize_angle;

/// Sweep cap; reachable targets converge well inside it, and the solver
/// commits whatever pose it reached at the cap
pub const MAX_ITERATIONS: usize = 24;
/// End-effector distance at which the solve stops early
pub const TOLERANCE: f32 = 0.5;
/// Targets are pulled this far inside the reach boundary
pub const REACH_MARGIN: f32 = 1.0;

const EPS: f32 = 1e-6;

/// Clamp a requested target into the arm's reachable disc. Out-of-reach
/// targets shrink toward the root along the original ray.
pub fn clamp_to_workspace(base: Vec2, target: Vec2, reach: f32) -> Vec2 {
    let offset = target - base;
    let dist = offset.length();
    let max = reach - REACH_MARGIN;
    if dist <= max || dist < EPS {
        target
    } else {
        base + offset * (max / dist)
    }
}

/// Solve toward `target`, seeded from the arm's current angles. Always
/// terminates and commits the best pose reached; returns the clamped
/// effective target for caller feedback.
pub fn solve(arm: &mut Arm, target: Vec2) -> Vec2 {
    let base = arm.base();
    let lengths = arm.lengths;
    let target = clamp_to_workspace(base, target, arm.reach());
    let mut orientations = arm.orientations();

    'solve: for _ in 0..MAX_ITERATIONS {
        // Tip to root, recomputing the chain before every joint
        for joint in (0..3).rev() {
            let chain = chain_points(base, orientations, lengths);
            if chain[3].distance(target) < TOLERANCE {
                break 'solve;
            }
            let pivot = chain[joint];
            let to_effector = chain[3] - pivot;
            let to_target = target - pivot;
            // A target or effector sitting on the pivot has no direction
            if to_effector.length_squared() < EPS || to_target.length_squared() < EPS {
                continue;
            }
            // Rotating about the pivot carries every downstream link with it
            let delta = signed_angle(to_effector, to_target);
            for orientation in orientations[joint..].iter_mut() {
                *orientation = normalize_angle(*orientation + delta);
            }
        }
    }

    arm.set_orientations(orientations);
    target
}

/// Signed angle from `a` to `b`, in (-π, π]
#[inline]
fn signed_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b))
}

/// Joint chain from absolute orientations
fn chain_points(base: Vec2, orientations: [f32; 3], lengths: [f32; 3]) -> [Vec2; 4] {
    let mut points = [base; 4];
    for i in 0..3 {
        points[i + 1] = points[i] + Vec2::from_angle(orientations[i]) * lengths[i];
    }
    points
}
