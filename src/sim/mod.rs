//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` per frame, dt clamped, no sub-stepping
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arm;
pub mod collision;
pub mod ik;
pub mod physics;
pub mod state;
pub mod tick;

pub use arm::{Arm, forward_kinematics};
pub use collision::{
    Contact, ball_capsule_contact, ball_circle_contact, ball_ring_contact,
    closest_point_on_segment, separate_pair,
};
pub use state::{Ball, Basin, ControlMode, GameEvent, GameMode, Hoop, SimState};
pub use tick::{TickInput, tick};
