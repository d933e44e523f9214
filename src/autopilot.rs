//! Simple lane-dodging bot for headless runs
//!
//! Scores each lane by the threats heading for the player's row and steers
//! toward the quietest neighbour. Fires at whatever sits in its own lane.

use crate::platform::InputEvent;
use crate::sim::GameState;

/// How far above the player the bot looks for trouble (pixels)
const LOOKAHEAD: f32 = 420.0;
/// Enemies closer than this are worth a bullet
const FIRE_RANGE: f32 = 360.0;

const LASER_DANGER: f32 = 100.0;
const BULLET_DANGER: f32 = 3.0;
const ENEMY_DANGER: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Threat score for a lane: nearer threats weigh more
    pub fn danger(&self, state: &GameState, lane: usize) -> f32 {
        let player_y = state.player.y;
        let proximity = |y: f32| -> f32 {
            let gap = player_y - y;
            if (-state.player.size.y..LOOKAHEAD).contains(&gap) {
                1.0 - gap.max(0.0) / LOOKAHEAD
            } else {
                0.0
            }
        };

        let enemies: f32 = state
            .spawner
            .enemies
            .iter()
            .filter(|e| e.body.lane == lane)
            .map(|e| ENEMY_DANGER * proximity(e.body.pos.y + e.body.size.y / 2.0))
            .sum();
        let bullets: f32 = state
            .enemy_bullets
            .iter()
            .filter(|b| b.body.lane == lane)
            .map(|b| BULLET_DANGER * proximity(b.body.pos.y))
            .sum();
        let lasers = state
            .lasers
            .iter()
            .filter(|l| l.lane == lane && l.is_alive())
            .count() as f32
            * LASER_DANGER;
        // A charging Special will burn this lane soon
        let charging = state
            .spawner
            .enemies
            .iter()
            .filter(|e| e.body.lane == lane && e.is_channeling())
            .count() as f32
            * LASER_DANGER;

        enemies + bullets + lasers + charging
    }

    /// Inputs for this step
    pub fn decide(&mut self, state: &GameState) -> Vec<InputEvent> {
        let mut inputs = Vec::new();
        let player = &state.player;
        let lane = player.lane;

        if player.can_change_lane(state.elapsed) {
            let last = state.lanes.lane_count() - 1;
            let candidates = [Some(lane), lane.checked_sub(1), (lane < last).then_some(lane + 1)];
            let here = self.danger(state, lane);
            let best = candidates
                .into_iter()
                .flatten()
                .map(|l| (l, self.danger(state, l)))
                .fold((lane, here), |best, cand| if cand.1 < best.1 { cand } else { best });
            if best.0 < lane {
                inputs.push(InputEvent::MoveLeft);
            } else if best.0 > lane {
                inputs.push(InputEvent::MoveRight);
            }
        }

        let target_in_lane = state.spawner.enemies.iter().any(|e| {
            e.body.lane == lane && e.body.pos.y < player.y && player.y - e.body.pos.y < FIRE_RANGE
        });
        if target_in_lane && player.can_shoot() {
            inputs.push(InputEvent::Fire);
        }
        inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::{Enemy, EnemyKind, LaserBeam};
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(5, Tuning::default())
    }

    fn enemy(state: &GameState, lane: usize, y: f32) -> Enemy {
        let x = state.lanes.lane_center_x(lane as i64);
        Enemy::new(EnemyKind::Normal, lane, Vec2::new(x, y), 0.0, 2.0, &state.tuning.enemies)
    }

    #[test]
    fn test_idle_on_empty_road() {
        let s = state();
        assert!(Autopilot.decide(&s).is_empty());
    }

    #[test]
    fn test_dodges_laser() {
        let mut s = state();
        let x = s.player.current_x;
        s.lasers.push(LaserBeam::new(1, x, 100.0, 60.0, [230, 70, 70], 0.4));
        // Block the left lane so the bot goes right
        let e = enemy(&s, 0, 500.0);
        s.spawner.enemies.push(e);
        let inputs = Autopilot.decide(&s);
        assert_eq!(inputs, vec![InputEvent::MoveRight]);
    }

    #[test]
    fn test_fires_at_enemy_in_lane() {
        let mut s = state();
        let e = enemy(&s, 1, 400.0);
        s.spawner.enemies.push(e);
        let inputs = Autopilot.decide(&s);
        assert!(inputs.contains(&InputEvent::Fire));
    }

    #[test]
    fn test_no_fire_without_ammo() {
        let mut s = state();
        s.player.ammo = 0;
        let e = enemy(&s, 1, 400.0);
        s.spawner.enemies.push(e);
        assert!(!Autopilot.decide(&s).contains(&InputEvent::Fire));
    }
}
