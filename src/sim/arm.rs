//! Arm geometry and forward kinematics
//!
//! The arm is a chain of 3 links in the vertical plane, rooted on the
//! baseline at `(base_x, 0)`. Each joint angle is relative to the previous
//! link; the absolute orientation of link `i` is the cumulative sum of the
//! first `i + 1` relative angles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LINK_LENGTHS, SCENE_HALF_WIDTH};
use crate::{normalize_angle, wrap_degrees};

/// Pure forward kinematics: the 4-point joint chain (base, elbow, wrist,
/// end effector) for the given relative angles and base offset.
pub fn forward_kinematics(angles: [f32; 3], lengths: [f32; 3], base_x: f32) -> [Vec2; 4] {
    let mut points = [Vec2::new(base_x, 0.0); 4];
    let mut theta = 0.0;
    for i in 0..3 {
        theta += angles[i];
        points[i + 1] = points[i] + Vec2::from_angle(theta) * lengths[i];
    }
    points
}

/// The articulated arm: joint angles, link lengths, base carriage offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arm {
    /// Relative joint angles (radians)
    pub angles: [f32; 3],
    /// Link lengths, fixed for the life of the arm
    pub lengths: [f32; 3],
    /// Horizontal position of the root on the baseline
    pub base_x: f32,
}

impl Default for Arm {
    fn default() -> Self {
        // Upright starting pose, leaning slightly over the scene
        Self {
            angles: [
                90.0_f32.to_radians(),
                -30.0_f32.to_radians(),
                -30.0_f32.to_radians(),
            ],
            lengths: LINK_LENGTHS,
            base_x: 0.0,
        }
    }
}

impl Arm {
    pub fn new(lengths: [f32; 3]) -> Self {
        Self {
            lengths,
            ..Self::default()
        }
    }

    /// Root of the chain on the baseline
    #[inline]
    pub fn base(&self) -> Vec2 {
        Vec2::new(self.base_x, 0.0)
    }

    /// Maximum end-effector distance from the root
    #[inline]
    pub fn reach(&self) -> f32 {
        self.lengths.iter().sum()
    }

    /// Joint chain for the current pose
    pub fn pose(&self) -> [Vec2; 4] {
        forward_kinematics(self.angles, self.lengths, self.base_x)
    }

    /// Absolute orientation of the end link (cumulative angle sum)
    #[inline]
    pub fn effector_heading(&self) -> f32 {
        normalize_angle(self.angles.iter().sum())
    }

    /// Set angles from the degree boundary, wrapping each into [0, 360)
    pub fn set_angles_deg(&mut self, deg: [f32; 3]) {
        for (angle, d) in self.angles.iter_mut().zip(deg) {
            *angle = wrap_degrees(d).to_radians();
        }
    }

    /// Angles at the degree boundary, wrapped into [0, 360)
    pub fn angles_deg(&self) -> [f32; 3] {
        self.angles.map(|a| wrap_degrees(a.to_degrees()))
    }

    /// Relative angles as absolute orientations, each in (-π, π]
    pub fn orientations(&self) -> [f32; 3] {
        let mut sum = 0.0;
        let mut out = [0.0; 3];
        for (o, a) in out.iter_mut().zip(self.angles) {
            sum += a;
            *o = normalize_angle(sum);
        }
        out
    }

    /// Commit absolute orientations back as relative angles
    pub fn set_orientations(&mut self, orientations: [f32; 3]) {
        let mut prev = 0.0;
        for (angle, o) in self.angles.iter_mut().zip(orientations) {
            *angle = normalize_angle(o - prev);
            prev = o;
        }
    }

    /// Slide the base carriage, clamped to the scene bounds
    pub fn slide_base(&mut self, dx: f32) {
        self.base_x = (self.base_x + dx).clamp(-SCENE_HALF_WIDTH, SCENE_HALF_WIDTH);
    }
}
