//! Long-running session behaviour: spawning, ramping and invariants

use lane_runner::consts::SIM_DT;
use lane_runner::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use lane_runner::Tuning;

/// A player that cannot die, so the ramp runs for as long as we like
fn immortal(seed: u64) -> GameState {
    let mut tuning = Tuning::default();
    tuning.player.start_hp = 1_000_000;
    GameState::new(seed, tuning)
}

#[test]
fn test_speed_level_ramps_every_interval() {
    let mut state = immortal(11);
    let input = TickInput::default();
    let mut levels = Vec::new();
    // 35 simulated seconds
    for _ in 0..(35 * 60) {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            if let GameEvent::LevelUp { level } = event {
                levels.push(level);
            }
        }
    }
    assert_eq!(levels, vec![2, 3, 4]);
    assert_eq!(state.speed_level(), 4);
    assert!((state.spawner.current_speed() - 370.0).abs() < 1e-3);
}

#[test]
fn test_elite_cap_holds_throughout() {
    let mut state = immortal(23);
    let input = TickInput::default();
    for _ in 0..(60 * 60) {
        tick(&mut state, &input, SIM_DT);
        for lane in 0..state.lanes.lane_count() {
            assert!(state.spawner.elite_count(lane) <= state.tuning.spawn.max_elite_per_lane);
        }
    }
}

#[test]
fn test_hp_never_exceeds_start() {
    let mut state = GameState::new(31, Tuning::default());
    let input = TickInput::default();
    for _ in 0..(90 * 60) {
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.hp <= state.player.max_hp());
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
}

#[test]
fn test_ready_shooters_always_fire() {
    let mut state = immortal(47);
    let input = TickInput::default();
    let mut shots = 0;
    for _ in 0..(40 * 60) {
        tick(&mut state, &input, SIM_DT);
        let events = state.drain_events();
        shots += events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyFired { .. }))
            .count();
        // A level up can shorten live intervals after this tick's volley
        if events.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })) {
            continue;
        }
        for enemy in &state.spawner.enemies {
            assert!(!enemy.can_shoot(), "{:?} left a shot pending", enemy.kind);
        }
    }
    assert!(shots > 0);
}

#[test]
fn test_game_over_freezes_world() {
    let mut state = GameState::new(5, Tuning::default());
    let input = TickInput::default();
    let mut steps = 0;
    while state.phase != GamePhase::GameOver && steps < 60 * 600 {
        tick(&mut state, &input, SIM_DT);
        steps += 1;
    }
    assert_eq!(state.phase, GamePhase::GameOver);

    let snapshot = (state.spawner.enemies.clone(), state.player.score, state.time_ticks);
    for _ in 0..120 {
        tick(&mut state, &input, SIM_DT);
    }
    assert_eq!(snapshot, (state.spawner.enemies.clone(), state.player.score, state.time_ticks));
}
