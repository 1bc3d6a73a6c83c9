//! Armball entry point
//!
//! Headless demo loop: runs a scripted session in each mode, logs scoring
//! events, and prints a JSON snapshot of the final state. A renderer would
//! drive the same `tick` API from its frame callback instead.

use glam::Vec2;

use armball::sim::{ControlMode, GameMode, SimState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("armball headless demo starting");

    let mut state = SimState::new(42);
    let dt = 1.0 / 60.0;

    // Catch mode: wave the arm around under IK while balls rain down
    let setup = TickInput {
        control: Some(ControlMode::Follow),
        spawn_rate: Some(2.0),
        ..Default::default()
    };
    tick(&mut state, &setup, dt);

    for i in 0..600 {
        let t = i as f32 * dt;
        let target = Vec2::new((t * 0.8).sin() * 200.0, 150.0 + (t * 1.3).cos() * 80.0);
        let input = TickInput {
            follow_target: Some(target),
            ..Default::default()
        };
        for event in tick(&mut state, &input, dt) {
            log::info!("catch: {event:?}");
        }
    }
    log::info!(
        "catch mode done: {} caught, {} missed",
        state.hits,
        state.misses
    );

    // Shoot mode: lob a ball at the hoop every couple of seconds
    let setup = TickInput {
        mode: Some(GameMode::Shoot),
        control: Some(ControlMode::Manual),
        angles_deg: Some([70.0, 340.0, 340.0]),
        ..Default::default()
    };
    tick(&mut state, &setup, dt);

    for i in 0..600 {
        let input = TickInput {
            release: i % 120 == 60,
            ..Default::default()
        };
        for event in tick(&mut state, &input, dt) {
            log::info!("shoot: {event:?}");
        }
    }
    log::info!(
        "shoot mode done: {} swished, {} missed",
        state.hits,
        state.misses
    );

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("snapshot failed: {e}"),
    }
}
