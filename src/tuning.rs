//! Data-driven game balance
//!
//! Every number the simulation consumes lives here, grouped by concern.
//! Defaults reproduce the classic three-lane runner balance; a JSON file
//! may override any subset of fields.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::sim::entities::{EnemyKind, PickupKind};

/// How an enemy attacks once its shot timer allows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAttack {
    /// Never shoots
    None,
    /// Drops a single round bullet down its lane
    Bullet,
    /// Channels a lane-wide laser, standing still while it burns
    Laser,
}

/// Per-kind enemy stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub color: Color,
    pub hp: i32,
    /// Multiplier on the current scroll speed
    pub speed_mult: f32,
    /// Delay before the very first shot after spawning (seconds)
    pub first_shot_delay: f32,
    pub attack: EnemyAttack,
    /// Score awarded when destroyed by bullets
    pub score: u64,
}

/// Enemy lookup table, one profile per kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub normal: EnemyProfile,
    pub level2: EnemyProfile,
    pub special: EnemyProfile,
    /// Enemy body size (all kinds share it)
    pub width: f32,
    pub height: f32,
}

impl EnemyTable {
    pub fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Normal => &self.normal,
            EnemyKind::Level2 => &self.level2,
            EnemyKind::Special => &self.special,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            normal: EnemyProfile {
                color: [70, 140, 230],
                hp: 1,
                speed_mult: 1.0,
                first_shot_delay: 0.0,
                attack: EnemyAttack::None,
                score: 50,
            },
            level2: EnemyProfile {
                color: [235, 210, 80],
                hp: 2,
                speed_mult: 0.75,
                first_shot_delay: 0.7,
                attack: EnemyAttack::Bullet,
                score: 100,
            },
            special: EnemyProfile {
                color: [230, 70, 70],
                hp: 3,
                speed_mult: 1.0,
                first_shot_delay: 1.5,
                attack: EnemyAttack::Laser,
                score: 200,
            },
            width: 60.0,
            height: 80.0,
        }
    }
}

/// Player vehicle tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub start_lane: usize,
    pub start_hp: i32,
    pub start_ammo: u32,
    /// Minimum time between shots (seconds)
    pub shoot_cooldown: f32,
    /// Grace period after taking damage (seconds)
    pub invuln_time: f32,
    /// Minimum time between lane changes (seconds)
    pub lane_change_cooldown: f64,
    /// Duration of the visual slide between lanes (seconds)
    pub lane_change_duration: f32,
    /// Hit-box size as a fraction of the visual bounds
    pub hitbox_width_frac: f32,
    pub hitbox_height_frac: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 100.0,
            color: [40, 210, 120],
            start_lane: 1,
            start_hp: 3,
            start_ammo: 10,
            shoot_cooldown: 0.0,
            invuln_time: 1.0,
            lane_change_cooldown: 0.12,
            lane_change_duration: 0.1,
            hitbox_width_frac: 0.6,
            hitbox_height_frac: 0.7,
        }
    }
}

/// Enemy fire-rate scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingTuning {
    /// Seconds between repeat shots at speed level 1
    pub base_interval: f32,
    pub min_interval: f32,
    pub decay_per_level: f32,
}

impl ShootingTuning {
    /// Repeat-shot interval for a speed level, floored at the minimum
    pub fn interval_for_level(&self, level: u32) -> f32 {
        let decayed = self.base_interval - self.decay_per_level * level.saturating_sub(1) as f32;
        decayed.max(self.min_interval)
    }
}

impl Default for ShootingTuning {
    fn default() -> Self {
        Self {
            base_interval: 2.0,
            min_interval: 0.6,
            decay_per_level: 0.15,
        }
    }
}

/// Bullets and lasers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Negative = upward
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_damage: i32,
    pub player_bullet_color: Color,
    /// Color of the round bullets fired by Level2 enemies
    pub level2_bullet_color: Color,
    /// Bullets are dropped once they leave [-margin, height + margin]
    pub despawn_margin: f32,
    pub laser_duration: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_bullet_speed: -600.0,
            enemy_bullet_speed: 380.0,
            bullet_width: 12.0,
            bullet_height: 24.0,
            bullet_damage: 1,
            player_bullet_color: [230, 230, 255],
            level2_bullet_color: [230, 60, 60],
            despawn_margin: 50.0,
            laser_duration: 0.4,
        }
    }
}

/// Pickup effects and spawn odds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub radius: f32,
    pub ammo_amount: u32,
    pub hp_amount: i32,
    pub coin_score: u64,
    /// Chance that an enemy spawn also drops a pickup
    pub spawn_chance: f32,
    /// Cumulative draw weights; the last kind absorbs any leftover mass
    pub ammo_weight: f32,
    pub hp_weight: f32,
    pub coin_weight: f32,
    /// Pickups scroll slightly slower than the road
    pub speed_mult: f32,
    /// How far above the enemy spawn point a pickup appears
    pub spawn_offset: f32,
    pub ammo_color: Color,
    pub hp_color: Color,
    pub coin_color: Color,
}

impl PickupTuning {
    pub fn color(&self, kind: PickupKind) -> Color {
        match kind {
            PickupKind::Ammo => self.ammo_color,
            PickupKind::Hp => self.hp_color,
            PickupKind::Coin => self.coin_color,
        }
    }

    pub fn weights(&self) -> [(PickupKind, f32); 3] {
        [
            (PickupKind::Ammo, self.ammo_weight),
            (PickupKind::Hp, self.hp_weight),
            (PickupKind::Coin, self.coin_weight),
        ]
    }
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            radius: 14.0,
            ammo_amount: 5,
            hp_amount: 1,
            coin_score: 15,
            spawn_chance: 0.35,
            ammo_weight: 0.4,
            hp_weight: 0.2,
            coin_weight: 0.6,
            speed_mult: 0.9,
            spawn_offset: 120.0,
            ammo_color: [80, 160, 255],
            hp_color: [80, 220, 140],
            coin_color: [240, 215, 80],
        }
    }
}

/// Enemy spawning and road speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub interval_start: f32,
    pub interval_min: f32,
    /// Spawn interval shrink per speed level
    pub interval_decay: f32,
    /// Scroll speed at level 1 (pixels / second)
    pub base_scroll_speed: f32,
    /// Scroll speed gained per level
    pub speed_step: f32,
    /// Enemy spawn height (above the viewport)
    pub spawn_y: f32,
    /// Cap on Level2 + Special enemies sharing a lane
    pub max_elite_per_lane: usize,
    pub normal_weight: f32,
    pub level2_weight: f32,
    pub special_weight: f32,
    /// Entities are pruned once `y - height` passes the bottom by this much
    pub prune_margin: f32,
}

impl SpawnTuning {
    pub fn enemy_weights(&self) -> [(EnemyKind, f32); 3] {
        [
            (EnemyKind::Normal, self.normal_weight),
            (EnemyKind::Level2, self.level2_weight),
            (EnemyKind::Special, self.special_weight),
        ]
    }

    /// Spawn interval for a speed level, floored at the minimum
    pub fn interval_for_level(&self, level: u32) -> f32 {
        let decayed = self.interval_start - self.interval_decay * level.saturating_sub(1) as f32;
        decayed.max(self.interval_min)
    }

    pub fn scroll_speed_for_level(&self, level: u32) -> f32 {
        self.base_scroll_speed + level.saturating_sub(1) as f32 * self.speed_step
    }
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval_start: 0.9,
            interval_min: 0.35,
            interval_decay: 0.02,
            base_scroll_speed: 250.0,
            speed_step: 40.0,
            spawn_y: -80.0,
            max_elite_per_lane: 1,
            normal_weight: 0.7,
            level2_weight: 0.2,
            special_weight: 0.1,
            prune_margin: 80.0,
        }
    }
}

/// Difficulty ramp and passive scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Seconds of play between speed level increases
    pub speed_increase_interval: f32,
    /// Passive points per second, multiplied by the speed level
    pub passive_score_rate: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            speed_increase_interval: 10.0,
            passive_score_rate: 60.0,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemies: EnemyTable,
    pub shooting: ShootingTuning,
    pub projectiles: ProjectileTuning,
    pub pickups: PickupTuning,
    pub spawn: SpawnTuning,
    pub difficulty: DifficultyTuning,
}

impl Tuning {
    /// Read tuning overrides from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = serde_json::from_str(&json)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning: {err:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_table_lookup() {
        let table = EnemyTable::default();
        assert_eq!(table.profile(EnemyKind::Normal).hp, 1);
        assert_eq!(table.profile(EnemyKind::Level2).hp, 2);
        assert_eq!(table.profile(EnemyKind::Special).hp, 3);
        assert_eq!(table.profile(EnemyKind::Special).attack, EnemyAttack::Laser);
        assert_eq!(table.profile(EnemyKind::Normal).score, 50);
    }

    #[test]
    fn test_shoot_interval_floor() {
        let shooting = ShootingTuning::default();
        assert_eq!(shooting.interval_for_level(1), 2.0);
        assert!((shooting.interval_for_level(2) - 1.85).abs() < 1e-5);
        assert_eq!(shooting.interval_for_level(50), 0.6);
    }

    #[test]
    fn test_spawn_interval_and_speed() {
        let spawn = SpawnTuning::default();
        assert_eq!(spawn.interval_for_level(1), 0.9);
        assert_eq!(spawn.interval_for_level(1000), 0.35);
        assert_eq!(spawn.scroll_speed_for_level(1), 250.0);
        assert_eq!(spawn.scroll_speed_for_level(3), 330.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "player": { "start_hp": 5 }, "spawn": { "max_elite_per_lane": 2 } }"#;
        let tuning: Tuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.player.start_hp, 5);
        assert_eq!(tuning.player.start_ammo, 10);
        assert_eq!(tuning.spawn.max_elite_per_lane, 2);
        assert_eq!(tuning.enemies, EnemyTable::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{ "projectiles": { "enemy_bullet_color": [1, 2, 3], "laser_duration": 0.5 } }"#;
        let tuning: Tuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.projectiles.laser_duration, 0.5);
        assert_eq!(tuning.projectiles.level2_bullet_color, [230, 60, 60]);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("lane_runner_no_such_tuning.json");
        assert_eq!(Tuning::load(&path), Tuning::default());
    }
}
