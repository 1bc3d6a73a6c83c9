//! Per-tick ball physics
//!
//! Fixed-rule arcade step, applied to every live ball in order:
//! gravity + semi-implicit Euler, floor test, mode-dependent scoring,
//! arm capsule contact, hoop rim contact, then one mutual-separation
//! pass over all pairs. Nothing here can fail; degenerate directions
//! fall back to fixed normals inside the collision helpers.

use glam::Vec2;

use super::collision::{
    Contact, ball_capsule_contact, ball_circle_contact, ball_ring_contact, separate_pair,
};
use super::state::{Ball, GameEvent, GameMode, SimState};
use crate::consts::{ARM_CAPSULE_RADIUS, EFFECTOR_RADIUS, FLOOR_Y};
use crate::tuning::Tuning;

/// Advance every live ball by `dt`, appending scoring events. Dead balls
/// are only marked here; `tick` compacts the list afterwards.
pub fn step(state: &mut SimState, dt: f32, events: &mut Vec<GameEvent>) {
    let pose = state.pose;
    let basin = state.basin;
    let hoop = state.hoop;
    let mode = state.mode;
    let now = state.time;
    let tuning = state.tuning;

    for ball in &mut state.balls {
        if !ball.alive {
            continue;
        }

        if !ball.is_pinned(now) {
            // Semi-implicit Euler: velocity first, then position
            ball.vel.y -= tuning.gravity * dt;
            ball.pos += ball.vel * dt;
        }

        // Floor miss, checked before scoring and contact
        if ball.pos.y - ball.radius < FLOOR_Y {
            ball.alive = false;
            events.push(GameEvent::Missed { id: ball.id });
            continue;
        }

        // Mode-dependent scoring
        let scored = match mode {
            GameMode::Catch => basin.contains_ball(ball.pos, ball.radius),
            GameMode::Shoot => {
                let d = ball.pos - hoop.center;
                // Ascending gate keeps a falling ball from re-scoring
                ball.vel.y > 0.0
                    && d.y.abs() < ball.radius * 0.5
                    && d.x.abs() < hoop.radius - ball.radius * 0.5
            }
        };
        if scored {
            ball.alive = false;
            events.push(GameEvent::Scored { id: ball.id });
            continue;
        }

        // Arm contact: three segment capsules, then the effector circle.
        // Pinned balls still resolve contact so a moving arm carries them.
        for i in 0..3 {
            if let Some(contact) =
                ball_capsule_contact(ball.pos, ball.radius, pose[i], pose[i + 1], ARM_CAPSULE_RADIUS)
            {
                rest_on_arm(ball, &contact, now, &tuning);
            }
        }
        if let Some(contact) =
            ball_circle_contact(ball.pos, ball.radius, pose[3], EFFECTOR_RADIUS)
        {
            rest_on_arm(ball, &contact, now, &tuning);
        }

        // The hoop rim is a soft obstacle, independent of scoring
        if mode == GameMode::Shoot
            && let Some(contact) = ball_ring_contact(ball.pos, ball.radius, hoop.center, hoop.radius)
        {
            bounce_off_rim(ball, &contact, &tuning);
        }
    }

    // One separation pass per tick; stacks spread out across frames
    let count = state.balls.len();
    for i in 0..count {
        for j in (i + 1)..count {
            if !state.balls[i].alive || !state.balls[j].alive {
                continue;
            }
            let (p1, r1) = (state.balls[i].pos, state.balls[i].radius);
            let (p2, r2) = (state.balls[j].pos, state.balls[j].radius);
            if let Some((d1, d2)) = separate_pair(p1, r1, p2, r2) {
                state.balls[i].pos += d1;
                state.balls[j].pos += d2;
                state.balls[i].vel *= tuning.separation_damping;
                state.balls[j].vel *= tuning.separation_damping;
            }
        }
    }
}

/// Push the ball out of the arm, kill its fall, and pin it briefly so it
/// rests on the segment instead of tunneling through next tick
fn rest_on_arm(ball: &mut Ball, contact: &Contact, now: f32, tuning: &Tuning) {
    ball.pos += contact.normal * (contact.penetration + tuning.contact_margin);
    ball.vel *= tuning.arm_damping;
    if ball.vel.y < 0.0 {
        ball.vel.y = 0.0;
    }
    ball.pinned_until = now + tuning.pin_duration;
}

/// Soft bounce: damp tangential velocity, invert and heavily damp the
/// normal component
fn bounce_off_rim(ball: &mut Ball, contact: &Contact, tuning: &Tuning) {
    ball.pos += contact.normal * (contact.penetration + tuning.contact_margin);
    let tangent = Vec2::new(-contact.normal.y, contact.normal.x);
    let vn = ball.vel.dot(contact.normal);
    let vt = ball.vel.dot(tangent);
    ball.vel = tangent * (vt * tuning.hoop_tangent_damping)
        - contact.normal * (vn * tuning.hoop_normal_damping);
}
