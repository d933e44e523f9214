//! Player vehicle controller
//!
//! The logical lane is authoritative for shot placement; the visual x
//! slides toward the lane center over a short animation and is what
//! collisions use.

use glam::Vec2;

use super::collision::Aabb;
use super::lane::LaneGrid;
use crate::tuning::PlayerTuning;

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Logical lane
    pub lane: usize,
    /// Vertical center (fixed near the bottom of the play area)
    pub y: f32,
    pub size: Vec2,
    /// Visual horizontal center, may sit between lanes mid-animation
    pub current_x: f32,
    pub target_x: f32,
    lane_change_start_x: f32,
    lane_change_elapsed: f32,
    /// Input timestamp of the last accepted lane change (seconds)
    pub last_lane_change_time: f64,
    /// May go negative on the killing blow
    pub hp: i32,
    pub score: u64,
    pub coins: u32,
    pub ammo: u32,
    pub shoot_cooldown_timer: f32,
    pub invuln_timer: f32,
    tuning: PlayerTuning,
    lanes: LaneGrid,
}

impl Player {
    pub fn new(lanes: LaneGrid, tuning: PlayerTuning) -> Self {
        let lane = lanes.clamp_lane(tuning.start_lane as i64);
        let x = lanes.lane_center_x(lane as i64);
        Self {
            lane,
            y: lanes.height() - tuning.height,
            size: Vec2::new(tuning.width, tuning.height),
            current_x: x,
            target_x: x,
            lane_change_start_x: x,
            lane_change_elapsed: 0.0,
            last_lane_change_time: -999.0,
            hp: tuning.start_hp,
            score: 0,
            coins: 0,
            ammo: tuning.start_ammo,
            shoot_cooldown_timer: tuning.shoot_cooldown,
            invuln_timer: 0.0,
            tuning,
            lanes,
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.tuning.start_hp
    }

    pub fn color(&self) -> crate::Color {
        self.tuning.color
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    pub fn can_change_lane(&self, now: f64) -> bool {
        now - self.last_lane_change_time >= self.tuning.lane_change_cooldown
    }

    /// Shift one lane left (`-1`) or right (`+1`).
    ///
    /// Ignored during the cooldown window. Returns true when the logical
    /// lane actually changed; pushing against the edge changes nothing and
    /// does not restart the cooldown.
    pub fn change_lane(&mut self, direction: i32, now: f64) -> bool {
        if !self.can_change_lane(now) {
            return false;
        }
        let new_lane = self.lanes.clamp_lane(self.lane as i64 + direction as i64);
        if new_lane == self.lane {
            return false;
        }
        self.lane = new_lane;
        self.last_lane_change_time = now;
        self.lane_change_start_x = self.current_x;
        self.target_x = self.lanes.lane_center_x(new_lane as i64);
        self.lane_change_elapsed = 0.0;
        true
    }

    /// Advance animation and timers
    pub fn advance(&mut self, dt: f32) {
        if self.current_x != self.target_x {
            self.lane_change_elapsed += dt;
            let t = (self.lane_change_elapsed / self.tuning.lane_change_duration.max(0.0001)).min(1.0);
            self.current_x = if t >= 1.0 {
                self.target_x
            } else {
                self.lane_change_start_x + (self.target_x - self.lane_change_start_x) * t
            };
        }

        if self.shoot_cooldown_timer < self.tuning.shoot_cooldown {
            self.shoot_cooldown_timer += dt;
        }

        if self.invuln_timer > 0.0 {
            self.invuln_timer -= dt;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.ammo > 0 && self.shoot_cooldown_timer >= self.tuning.shoot_cooldown
    }

    /// Spend one round if allowed. Returns whether a bullet should spawn.
    pub fn consume_shot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }
        self.ammo -= 1;
        self.shoot_cooldown_timer = 0.0;
        true
    }

    /// Take damage unless invulnerable. Returns true if this hit was fatal.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.hp -= amount;
        self.invuln_timer = self.tuning.invuln_time;
        self.hp <= 0
    }

    /// Heal, never above the starting HP
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp());
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score += amount;
    }

    pub fn add_coin(&mut self, amount: u32) {
        self.coins += amount;
    }

    /// Where player bullets leave the car
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.current_x, self.y - self.size.y / 2.0)
    }

    /// Visual bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.current_x, self.y), self.size)
    }

    /// Collision bounds, shrunk to favour the player
    pub fn hitbox(&self) -> Aabb {
        let size = self.size * Vec2::new(self.tuning.hitbox_width_frac, self.tuning.hitbox_height_frac);
        Aabb::from_center(Vec2::new(self.current_x, self.y), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(LaneGrid::default(), PlayerTuning::default())
    }

    #[test]
    fn test_starts_centered() {
        let p = player();
        assert_eq!(p.lane, 1);
        assert_eq!(p.current_x, 240.0);
        assert_eq!(p.y, 620.0);
        assert_eq!(p.hp, 3);
        assert_eq!(p.ammo, 10);
    }

    #[test]
    fn test_lane_change_cooldown() {
        let mut p = player();
        assert!(p.change_lane(-1, 1.0));
        assert_eq!(p.lane, 0);
        // Within 0.12s: ignored
        assert!(!p.change_lane(1, 1.05));
        assert_eq!(p.lane, 0);
        assert!(p.change_lane(1, 1.2));
        assert_eq!(p.lane, 1);
    }

    #[test]
    fn test_lane_change_clamps_at_edge() {
        let mut p = player();
        assert!(p.change_lane(1, 1.0));
        assert!(!p.change_lane(1, 2.0));
        assert_eq!(p.lane, 2);
        assert_eq!(p.last_lane_change_time, 1.0);
    }

    #[test]
    fn test_visual_x_lags_logical_lane() {
        let mut p = player();
        p.change_lane(-1, 1.0);
        assert_eq!(p.lane, 0);
        assert_eq!(p.current_x, 240.0);

        p.advance(0.05);
        assert!((p.current_x - 160.0).abs() < 1e-3);

        p.advance(0.05);
        p.advance(0.05);
        assert_eq!(p.current_x, 80.0);
    }

    #[test]
    fn test_shooting_needs_ammo() {
        let mut p = player();
        p.ammo = 1;
        assert!(p.consume_shot());
        assert_eq!(p.ammo, 0);
        assert!(!p.consume_shot());
    }

    #[test]
    fn test_shoot_cooldown_gates_fire() {
        let tuning = PlayerTuning {
            shoot_cooldown: 0.25,
            ..PlayerTuning::default()
        };
        let mut p = Player::new(LaneGrid::default(), tuning);
        assert!(p.consume_shot());
        assert!(!p.consume_shot());
        p.advance(0.125);
        assert!(!p.consume_shot());
        p.advance(0.125);
        assert!(p.consume_shot());
        assert_eq!(p.ammo, 8);
    }

    #[test]
    fn test_invulnerability_blocks_second_hit() {
        let mut p = player();
        assert!(!p.apply_damage(1));
        assert_eq!(p.hp, 2);
        assert_eq!(p.invuln_timer, 1.0);

        p.advance(1.0 / 60.0);
        assert!(!p.apply_damage(1));
        assert_eq!(p.hp, 2);
    }

    #[test]
    fn test_fatal_hit_can_go_negative() {
        let mut p = player();
        p.hp = 1;
        assert!(p.apply_damage(3));
        assert_eq!(p.hp, -2);
    }

    #[test]
    fn test_heal_capped() {
        let mut p = player();
        p.heal(1);
        assert_eq!(p.hp, 3);
        p.hp = 1;
        p.heal(1);
        assert_eq!(p.hp, 2);
    }

    #[test]
    fn test_hitbox_smaller_than_visual() {
        let p = player();
        let hit = p.hitbox();
        let vis = p.bounds();
        assert!((hit.width() - 36.0).abs() < 1e-4);
        assert!((hit.height() - 70.0).abs() < 1e-4);
        assert_eq!(vis.width(), 60.0);
        assert_eq!(hit.center(), vis.center());
    }
}
