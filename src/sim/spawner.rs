//! Enemy and pickup spawning
//!
//! Spawns one enemy per interval in a random lane, optionally with a pickup,
//! and owns the road speed level that the difficulty ramp pushes up.

use glam::Vec2;
use rand::Rng;

use super::entities::{Enemy, EnemyKind, Pickup, PickupKind};
use super::lane::LaneGrid;
use crate::tuning::{EnemyTable, PickupTuning, SpawnTuning, Tuning};

/// Pick an entry by walking cumulative weights with a roll in [0, 1).
///
/// Weights are not normalised: if they sum to less than the roll, the last
/// entry takes the remaining mass.
pub fn select_weighted<T: Copy>(roll: f32, table: &[(T, f32)]) -> T {
    let mut cumulative = 0.0;
    for &(item, weight) in &table[..table.len() - 1] {
        cumulative += weight;
        if roll < cumulative {
            return item;
        }
    }
    table[table.len() - 1].0
}

/// Spawns enemies and pickups and tracks them until they scroll away
#[derive(Debug, Clone)]
pub struct Spawner {
    lanes: LaneGrid,
    spawn: SpawnTuning,
    enemy_table: EnemyTable,
    pickup_tuning: PickupTuning,
    base_shoot_interval: f32,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub time_since_last_spawn: f32,
    pub spawn_interval: f32,
    pub speed_level: u32,
    /// Repeat-shot interval handed to newly spawned shooters
    pub current_shoot_interval: f32,
}

impl Spawner {
    pub fn new(lanes: LaneGrid, tuning: &Tuning) -> Self {
        Self {
            lanes,
            spawn: tuning.spawn,
            enemy_table: tuning.enemies,
            pickup_tuning: tuning.pickups,
            base_shoot_interval: tuning.shooting.base_interval,
            enemies: Vec::new(),
            pickups: Vec::new(),
            time_since_last_spawn: 0.0,
            spawn_interval: tuning.spawn.interval_start,
            speed_level: 1,
            current_shoot_interval: tuning.shooting.base_interval,
        }
    }

    /// Road speed for the current level
    pub fn current_speed(&self) -> f32 {
        self.spawn.scroll_speed_for_level(self.speed_level)
    }

    /// Count Level2/Special enemies tagged with `lane`
    pub fn elite_count(&self, lane: usize) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.body.lane == lane && e.kind.is_elite())
            .count()
    }

    /// Accumulate time, spawn when due, then move and prune everything.
    /// Returns true if a spawn happened this tick.
    pub fn tick<R: Rng>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.time_since_last_spawn += dt;
        let spawned = self.time_since_last_spawn >= self.spawn_interval;
        if spawned {
            self.time_since_last_spawn = 0.0;
            self.spawn(rng);
        }

        for enemy in &mut self.enemies {
            enemy.advance(dt);
        }
        for pickup in &mut self.pickups {
            pickup.advance(dt);
        }

        let limit = self.lanes.height() + self.spawn.prune_margin;
        self.enemies
            .retain(|e| e.body.pos.y - e.body.size.y < limit);
        self.pickups
            .retain(|p| p.body.pos.y - p.body.size.y < limit);

        spawned
    }

    /// One spawn event: an enemy, and with some chance a pickup
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let lane_count = self.lanes.lane_count();
        let lane = rng.random_range(0..lane_count);
        let roll: f32 = rng.random();

        let kind = if self.elite_count(lane) >= self.spawn.max_elite_per_lane {
            EnemyKind::Normal
        } else {
            select_weighted(roll, &self.spawn.enemy_weights())
        };

        let x = self.lanes.lane_center_x(lane as i64);
        let y = self.spawn.spawn_y;
        let enemy = Enemy::new(
            kind,
            lane,
            Vec2::new(x, y),
            self.current_speed(),
            self.current_shoot_interval,
            &self.enemy_table,
        );
        log::debug!("Spawned {:?} enemy in lane {}", kind, lane);
        self.enemies.push(enemy);

        if rng.random::<f32>() < self.pickup_tuning.spawn_chance {
            let pickup_lane = rng.random_range(0..lane_count);
            let pickup_roll: f32 = rng.random();
            let pickup_kind: PickupKind = select_weighted(pickup_roll, &self.pickup_tuning.weights());
            let pos = Vec2::new(
                self.lanes.lane_center_x(pickup_lane as i64),
                y - self.pickup_tuning.spawn_offset,
            );
            self.pickups.push(Pickup::new(
                pickup_kind,
                pickup_lane,
                pos,
                self.current_speed(),
                &self.pickup_tuning,
            ));
        }
    }

    /// Raise the speed level and shrink the spawn interval
    pub fn increase_difficulty(&mut self) {
        self.speed_level += 1;
        self.spawn_interval = self.spawn.interval_for_level(self.speed_level);
    }

    /// Set the repeat-shot interval for new and live shooters
    pub fn set_shoot_interval(&mut self, interval: f32) {
        self.current_shoot_interval = interval;
        for enemy in self.enemies.iter_mut().filter(|e| e.kind.is_elite()) {
            if enemy.shoot_interval.is_some() {
                enemy.shoot_interval = Some(interval);
            }
        }
    }

    /// Back to level 1 with an empty road
    pub fn reset(&mut self) {
        self.enemies.clear();
        self.pickups.clear();
        self.time_since_last_spawn = 0.0;
        self.speed_level = 1;
        self.spawn_interval = self.spawn.interval_start;
        self.current_shoot_interval = self.base_shoot_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner() -> Spawner {
        Spawner::new(LaneGrid::default(), &Tuning::default())
    }

    #[test]
    fn test_select_weighted_thresholds() {
        let table = [(EnemyKind::Normal, 0.7), (EnemyKind::Level2, 0.2), (EnemyKind::Special, 0.1)];
        assert_eq!(select_weighted(0.0, &table), EnemyKind::Normal);
        assert_eq!(select_weighted(0.69, &table), EnemyKind::Normal);
        assert_eq!(select_weighted(0.75, &table), EnemyKind::Level2);
        assert_eq!(select_weighted(0.95, &table), EnemyKind::Special);
    }

    #[test]
    fn test_last_entry_absorbs_leftover_mass() {
        // Default pickup weights sum to 1.2; coin only wins above 0.6
        let weights = PickupTuning::default().weights();
        assert_eq!(select_weighted(0.3, &weights), PickupKind::Ammo);
        assert_eq!(select_weighted(0.5, &weights), PickupKind::Hp);
        assert_eq!(select_weighted(0.99, &weights), PickupKind::Coin);

        let short = [(PickupKind::Ammo, 0.1), (PickupKind::Hp, 0.1), (PickupKind::Coin, 0.1)];
        assert_eq!(select_weighted(0.9, &short), PickupKind::Coin);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut s = spawner();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(!s.tick(0.5, &mut rng));
        assert!(s.enemies.is_empty());
        assert!(s.tick(0.5, &mut rng));
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.time_since_last_spawn, 0.0);
    }

    #[test]
    fn test_spawned_enemy_placement() {
        let mut s = spawner();
        let mut rng = Pcg32::seed_from_u64(3);
        s.spawn(&mut rng);
        let e = &s.enemies[0];
        assert_eq!(e.body.pos.y, -80.0);
        assert_eq!(e.body.pos.x, s.lanes.lane_center_x(e.body.lane as i64));
        let mult = s.enemy_table.profile(e.kind).speed_mult;
        assert_eq!(e.body.speed, 250.0 * mult);
    }

    #[test]
    fn test_elite_cap_forces_normal() {
        let mut s = spawner();
        // Fill every lane with an elite
        for lane in 0..3 {
            let x = s.lanes.lane_center_x(lane as i64);
            let e = Enemy::new(EnemyKind::Special, lane, Vec2::new(x, 0.0), 0.0, 2.0, &s.enemy_table);
            s.enemies.push(e);
        }
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            s.spawn(&mut rng);
        }
        assert!(s.enemies[3..].iter().all(|e| e.kind == EnemyKind::Normal));
    }

    #[test]
    fn test_pickups_spawn_above_enemy() {
        let mut s = spawner();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            s.spawn(&mut rng);
        }
        assert!(!s.pickups.is_empty());
        assert!(s.pickups.len() < 100);
        for p in &s.pickups {
            assert_eq!(p.body.pos.y, -200.0);
            assert_eq!(p.body.speed, 225.0);
        }
    }

    #[test]
    fn test_prunes_past_bottom() {
        let mut s = spawner();
        let e = Enemy::new(EnemyKind::Normal, 0, Vec2::new(80.0, 875.0), 250.0, 2.0, &s.enemy_table);
        s.enemies.push(e);
        let mut rng = Pcg32::seed_from_u64(1);
        // 875 - 80 = 795 < 800: kept
        s.tick(0.0, &mut rng);
        assert_eq!(s.enemies.len(), 1);
        // Moves 10px: 885 - 80 = 805, past the 800 limit
        s.tick(0.04, &mut rng);
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_increase_difficulty() {
        let mut s = spawner();
        s.increase_difficulty();
        assert_eq!(s.speed_level, 2);
        assert!((s.spawn_interval - 0.88).abs() < 1e-6);
        assert_eq!(s.current_speed(), 290.0);
        for _ in 0..100 {
            s.increase_difficulty();
        }
        assert_eq!(s.spawn_interval, 0.35);
    }

    #[test]
    fn test_shoot_interval_propagates_to_live_shooters() {
        let mut s = spawner();
        let table = s.enemy_table;
        s.enemies.push(Enemy::new(EnemyKind::Normal, 0, Vec2::ZERO, 0.0, 2.0, &table));
        s.enemies.push(Enemy::new(EnemyKind::Level2, 1, Vec2::ZERO, 0.0, 2.0, &table));
        s.enemies.push(Enemy::new(EnemyKind::Special, 2, Vec2::ZERO, 0.0, 2.0, &table));

        s.set_shoot_interval(1.25);

        assert_eq!(s.enemies[0].shoot_interval, None);
        assert_eq!(s.enemies[1].shoot_interval, Some(1.25));
        assert_eq!(s.enemies[2].shoot_interval, Some(1.25));
        assert_eq!(s.current_shoot_interval, 1.25);
    }

    #[test]
    fn test_reset_restores_level_one() {
        let mut s = spawner();
        let mut rng = Pcg32::seed_from_u64(9);
        s.spawn(&mut rng);
        s.increase_difficulty();
        s.set_shoot_interval(0.6);
        s.reset();
        assert!(s.enemies.is_empty());
        assert_eq!(s.speed_level, 1);
        assert_eq!(s.spawn_interval, 0.9);
        assert_eq!(s.current_shoot_interval, 2.0);
    }
}
