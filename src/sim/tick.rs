//! Fixed timestep simulation tick
//!
//! Applies the inputs gathered since the previous tick, then advances the
//! session one step in a fixed order: player, spawner, enemy fire,
//! projectiles, collisions, passive score, difficulty ramp.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::entities::{Bullet, LaserBeam};
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::EnemyAttack;

/// A lane-change request stamped with its input time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneChange {
    /// -1 = left, +1 = right
    pub direction: i32,
    /// Input timestamp in seconds, used for the cooldown check
    pub time: f64,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Lane changes in arrival order
    pub lane_changes: Vec<LaneChange>,
    /// Fire presses since the last tick
    pub fire_presses: u32,
    /// Pause toggle
    pub pause: bool,
    /// Restart (only honoured after game over)
    pub restart: bool,
}

impl TickInput {
    /// True if nothing was requested
    pub fn is_empty(&self) -> bool {
        self.lane_changes.is_empty() && self.fire_presses == 0 && !self.pause && !self.restart
    }

    pub fn clear(&mut self) {
        self.lane_changes.clear();
        self.fire_presses = 0;
        self.pause = false;
        self.restart = false;
    }
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if input.restart && state.phase == GamePhase::GameOver {
        state.reset();
    }

    // Paused and game-over sessions are frozen
    if state.phase != GamePhase::Playing {
        return;
    }

    for change in &input.lane_changes {
        state.steer(change.direction, change.time);
    }
    for _ in 0..input.fire_presses {
        state.fire();
    }

    step(state, dt);
}

/// One simulation step of a live session
fn step(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;
    state.elapsed += dt as f64;

    state.player.advance(dt);
    state.spawner.tick(dt, &mut state.rng);

    enemy_fire(state);

    for bullet in state.player_bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.advance(dt);
    }
    for laser in &mut state.lasers {
        laser.advance(dt);
    }

    let height = state.lanes.height();
    let margin = state.tuning.projectiles.despawn_margin;
    state.player_bullets.retain(|b| b.in_bounds(height, margin));
    state.enemy_bullets.retain(|b| b.in_bounds(height, margin));
    state.lasers.retain(|l| l.is_alive());

    resolve_collisions(state);

    // The final score is whatever it was at the moment of death
    if state.phase == GamePhase::GameOver {
        return;
    }

    award_passive_score(state, dt);
    ramp_difficulty(state, dt);
}

/// Let every ready shooter fire: Level2 drops a round bullet, Special
/// plants a laser and holds still while it burns.
fn enemy_fire(state: &mut GameState) {
    let projectiles = state.tuning.projectiles;
    for enemy in state.spawner.enemies.iter_mut() {
        if !enemy.can_shoot() {
            continue;
        }
        enemy.mark_fired();
        let pos = enemy.body.pos;
        match enemy.attack {
            EnemyAttack::None => continue,
            EnemyAttack::Bullet => {
                let muzzle = Vec2::new(pos.x, pos.y + enemy.body.size.y / 2.0);
                state.enemy_bullets.push(Bullet::enemy(
                    enemy.body.lane,
                    muzzle,
                    true,
                    projectiles.level2_bullet_color,
                    &projectiles,
                ));
            }
            EnemyAttack::Laser => {
                state.lasers.push(LaserBeam::new(
                    enemy.body.lane,
                    pos.x,
                    pos.y,
                    enemy.body.size.x,
                    enemy.color,
                    projectiles.laser_duration,
                ));
                enemy.channel_timer = projectiles.laser_duration;
            }
        }
        state.events.push(GameEvent::EnemyFired {
            kind: enemy.kind,
            lane: enemy.body.lane,
        });
    }
}

/// Points trickle in with time, faster at higher speed levels
fn award_passive_score(state: &mut GameState, dt: f32) {
    let rate = state.tuning.difficulty.passive_score_rate;
    state.passive_score += rate * dt * state.spawner.speed_level as f32;
    let whole = state.passive_score.floor();
    if whole >= 1.0 {
        state.player.add_score(whole as u64);
        state.passive_score -= whole;
    }
}

fn ramp_difficulty(state: &mut GameState, dt: f32) {
    state.difficulty_timer += dt;
    if state.difficulty_timer < state.tuning.difficulty.speed_increase_interval {
        return;
    }
    state.difficulty_timer = 0.0;
    state.spawner.increase_difficulty();

    let level = state.spawner.speed_level;
    let interval = state.tuning.shooting.interval_for_level(level);
    state.spawner.set_shoot_interval(interval);

    log::info!(
        "Speed level {} (spawn every {:.2}s, enemies fire every {:.2}s)",
        level,
        state.spawner.spawn_interval,
        interval
    );
    state.events.push(GameEvent::LevelUp { level });
}
