//! Frame advance orchestration
//!
//! One `tick` per rendering frame: consume commands, move the base, run IK,
//! refresh the pose, spawn or shepherd balls, run physics, compact the dead.
//! dt is clamped to `MAX_DT`; there is no sub-stepping.

use glam::Vec2;

use super::ik;
use super::physics;
use super::state::{ControlMode, GameEvent, GameMode, SimState};
use crate::consts::{BASE_SPEED, MAX_DT};

/// Input commands for a single tick. Produced by the (external) UI and
/// input layers; consumed synchronously at the top of the tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Joint angle commands in degrees, applied in manual control only
    pub angles_deg: Option<[f32; 3]>,
    /// Pointer-follow goal in scene coordinates
    pub follow_target: Option<Vec2>,
    /// Pointer left the scene; drop the follow target
    pub clear_target: bool,
    /// Switch between manual angles and target following
    pub control: Option<ControlMode>,
    /// Switch between catch and shoot
    pub mode: Option<GameMode>,
    /// Catch-mode spawn rate (balls/s)
    pub spawn_rate: Option<f32>,
    /// Release the held ball (shoot mode)
    pub release: bool,
    /// Base carriage commands, continuous while held
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the simulation by one frame, returning the tick's scoring events
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = dt.clamp(0.0, MAX_DT);
    let mut events = Vec::new();

    // Consume queued commands
    if let Some(mode) = input.mode {
        state.set_mode(mode);
    }
    if let Some(control) = input.control {
        state.set_control(control);
    }
    if let Some(rate) = input.spawn_rate {
        state.spawn_rate = rate.max(0.0);
    }
    if let Some(target) = input.follow_target {
        state.follow_target = Some(target);
    }
    if input.clear_target {
        state.follow_target = None;
    }
    // Angles and IK never write in the same frame
    if state.control == ControlMode::Manual
        && let Some(deg) = input.angles_deg
    {
        state.arm.set_angles_deg(deg);
    }

    // Base carriage
    let mut dir = 0.0;
    if input.move_left {
        dir -= 1.0;
    }
    if input.move_right {
        dir += 1.0;
    }
    if dir != 0.0 {
        state.arm.slide_base(dir * BASE_SPEED * dt);
    }

    // IK toward the follow target
    state.active_target = None;
    if state.control == ControlMode::Follow
        && let Some(target) = state.follow_target
    {
        state.active_target = Some(ik::solve(&mut state.arm, target));
    }

    // Cache the pose for physics and the renderer
    state.pose = state.arm.pose();
    state.time += dt;

    match state.mode {
        GameMode::Catch => {
            // Fractional accumulator; long ticks may spawn more than once
            state.spawn_accum += state.spawn_rate * dt;
            while state.spawn_accum >= 1.0 {
                state.spawn_accum -= 1.0;
                state.spawn_ball();
            }
        }
        GameMode::Shoot => {
            if let Some(held) = &mut state.held {
                held.pos = state.pose[3];
            }
            if input.release {
                state.release_held();
            }
            if state.held.is_none() {
                state.attach_held();
            }
        }
    }

    physics::step(state, dt, &mut events);

    for event in &events {
        match event {
            GameEvent::Scored { .. } => state.hits += 1,
            GameEvent::Missed { .. } => state.misses += 1,
        }
    }
    state.balls.retain(|b| b.alive);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ball;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dt_is_clamped() {
        let mut state = SimState::new(5);
        tick(&mut state, &TickInput::default(), 1.0);
        assert!((state.time - MAX_DT).abs() < 1e-6);
    }

    #[test]
    fn test_floor_miss_counts_once() {
        let mut state = SimState::new(5);
        let id = state.next_entity_id();
        state
            .balls
            .push(Ball::new(id, Vec2::new(320.0, 12.0), Vec2::new(0.0, -300.0)));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, vec![GameEvent::Missed { id }]);
        assert_eq!(state.misses, 1);
        assert_eq!(state.hits, 0);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_basin_catch_scores_once() {
        let mut state = SimState::new(5);
        let id = state.next_entity_id();
        state
            .balls
            .push(Ball::new(id, state.basin.center, Vec2::ZERO));

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, vec![GameEvent::Scored { id }]);
        assert_eq!(state.hits, 1);
        assert_eq!(state.misses, 0);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_hoop_scores_only_when_ascending() {
        let mut state = SimState::new(5);
        tick(
            &mut state,
            &TickInput {
                mode: Some(GameMode::Shoot),
                ..Default::default()
            },
            DT,
        );

        // Descending through the hoop center: no score
        let id = state.next_entity_id();
        state
            .balls
            .push(Ball::new(id, state.hoop.center, Vec2::new(0.0, -100.0)));
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.hits, 0);
        state.balls.clear();

        // Ascending just below the center: score
        let id = state.next_entity_id();
        state.balls.push(Ball::new(
            id,
            state.hoop.center - Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 60.0),
        ));
        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, vec![GameEvent::Scored { id }]);
        assert_eq!(state.hits, 1);
    }

    #[test]
    fn test_spawn_accumulator_rate() {
        let mut state = SimState::new(5);
        let input = TickInput {
            spawn_rate: Some(2.0),
            ..Default::default()
        };
        // Rate 2/s over ~1 s of simulated time
        for _ in 0..34 {
            tick(&mut state, &input, 0.03);
        }
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_base_carriage_motion() {
        let mut state = SimState::new(5);
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, MAX_DT);
        assert!((state.arm.base_x - BASE_SPEED * MAX_DT).abs() < 1e-3);

        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, MAX_DT);
        assert!(state.arm.base_x.abs() < 1e-3);
    }

    #[test]
    fn test_follow_mode_tracks_target() {
        let mut state = SimState::new(5);
        let target = Vec2::new(150.0, 150.0);
        let input = TickInput {
            control: Some(ControlMode::Follow),
            follow_target: Some(target),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.active_target, Some(target));
        assert!(state.pose[3].distance(target) < 1.0);

        // Pointer leaves the scene
        let input = TickInput {
            clear_target: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.active_target.is_none());
    }

    #[test]
    fn test_manual_angles_ignored_while_following() {
        let mut state = SimState::new(5);
        let input = TickInput {
            control: Some(ControlMode::Follow),
            follow_target: Some(Vec2::new(150.0, 150.0)),
            angles_deg: Some([10.0, 10.0, 10.0]),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        // IK owned the angles this frame
        assert!(state.pose[3].distance(Vec2::new(150.0, 150.0)) < 1.0);
    }

    #[test]
    fn test_held_ball_tracks_effector_and_releases() {
        let mut state = SimState::new(5);
        tick(
            &mut state,
            &TickInput {
                mode: Some(GameMode::Shoot),
                ..Default::default()
            },
            DT,
        );
        let held = state.held.expect("shoot mode attaches a ball");
        assert_eq!(held.pos, state.pose[3]);

        // Swing the arm; the held ball follows
        let input = TickInput {
            angles_deg: Some([120.0, 340.0, 350.0]),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.held.unwrap().pos, state.pose[3]);

        // Release: one free ball at launch speed, a fresh held appears
        let before = state.balls.len();
        let input = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.balls.len(), before + 1);
        assert!(state.held.is_some());
    }

    #[test]
    fn test_mode_switch_resets_scene() {
        let mut state = SimState::new(5);
        let input = TickInput {
            spawn_rate: Some(30.0),
            ..Default::default()
        };
        for _ in 0..4 {
            tick(&mut state, &input, MAX_DT);
        }
        assert!(!state.balls.is_empty());

        tick(
            &mut state,
            &TickInput {
                mode: Some(GameMode::Shoot),
                ..Default::default()
            },
            DT,
        );
        // Only the fresh held ball remains
        assert!(state.balls.is_empty());
        assert!(state.held.is_some());
        assert_eq!(state.hits, 0);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = SimState::new(99_999);
        let mut b = SimState::new(99_999);

        let script = [
            TickInput {
                control: Some(ControlMode::Follow),
                spawn_rate: Some(4.0),
                follow_target: Some(Vec2::new(100.0, 120.0)),
                ..Default::default()
            },
            TickInput {
                follow_target: Some(Vec2::new(-80.0, 160.0)),
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..120 {
            for input in &script {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
        }

        assert_eq!(a.balls.len(), b.balls.len());
        assert_eq!(a.hits, b.hits);
        assert_eq!(a.misses, b.misses);
        for (x, y) in a.balls.iter().zip(b.balls.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.pos, y.pos);
        }
        assert!((a.arm.base_x - b.arm.base_x).abs() < 1e-6);
    }
}
