//! Data-driven game balance
//!
//! Everything here is a plain number a designer might want to nudge without
//! touching simulation code. Scene geometry that gameplay logic depends on
//! structurally (link lengths, ball radius, floor) lives in `consts`.

use serde::{Deserialize, Serialize};

/// Balance parameters for the physics step and spawners
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward gravitational acceleration (length units/s²)
    pub gravity: f32,

    // === Catch-mode spawns ===
    /// Bottom of the spawn band above the baseline
    pub spawn_height: f32,
    /// Vertical extent of the spawn band
    pub spawn_height_band: f32,
    /// Horizontal spawn spread as a multiple of arm reach
    pub spawn_spread: f32,
    /// Maximum horizontal drift speed given to a spawned ball (units/s)
    pub spawn_drift: f32,

    // === Arm contact ===
    /// Velocity fraction kept after touching the arm
    pub arm_damping: f32,
    /// Seconds a ball stays frozen after touching the arm
    pub pin_duration: f32,
    /// Push-out margin past the contact surface
    pub contact_margin: f32,

    // === Ball-ball separation ===
    /// Velocity fraction kept by both balls after a separation push
    pub separation_damping: f32,

    // === Hoop rim ===
    /// Normal-velocity fraction kept (inverted) on a rim bounce
    pub hoop_normal_damping: f32,
    /// Tangential-velocity fraction kept on a rim bounce
    pub hoop_tangent_damping: f32,

    // === Shoot mode ===
    /// Speed of a released ball (units/s)
    pub launch_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 900.0,
            spawn_height: 420.0,
            spawn_height_band: 60.0,
            spawn_spread: 1.2,
            spawn_drift: 40.0,
            arm_damping: 0.35,
            pin_duration: 0.25,
            contact_margin: 0.5,
            separation_damping: 0.9,
            hoop_normal_damping: 0.3,
            hoop_tangent_damping: 0.8,
            launch_speed: 420.0,
        }
    }
}
