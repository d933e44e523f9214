//! Collision detection and combat resolution
//!
//! Everything is an axis-aligned box. The resolver runs once per tick and
//! the order of its passes matters: body contact, player bullets, enemy
//! bullets, lasers, then pickups. Removals are decided during a pass and
//! applied with a single `retain` so each entity is dropped at most once.

use glam::Vec2;

use super::entities::PickupKind;
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::PickupTuning;

/// Damage dealt to the player by any contact (body, bullet or laser)
pub const CONTACT_DAMAGE: i32 = 1;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict intersection: boxes that only share an edge do not overlap,
    /// and an empty box never overlaps anything.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 || other.width() <= 0.0 || other.height() <= 0.0 {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Damage the player unless the run already ended this pass.
fn strike(player: &mut Player, phase: &mut GamePhase, events: &mut Vec<GameEvent>) {
    if *phase == GamePhase::GameOver {
        return;
    }
    let hp_before = player.hp;
    let died = player.apply_damage(CONTACT_DAMAGE);
    if player.hp != hp_before {
        events.push(GameEvent::PlayerHit { hp: player.hp });
    }
    if died {
        *phase = GamePhase::GameOver;
    }
}

/// Apply a pickup's effect to the player
pub fn apply_pickup(player: &mut Player, kind: PickupKind, tuning: &PickupTuning) {
    match kind {
        PickupKind::Ammo => player.ammo += tuning.ammo_amount,
        PickupKind::Hp => player.heal(tuning.hp_amount),
        PickupKind::Coin => {
            player.add_score(tuning.coin_score);
            player.add_coin(1);
        }
    }
}

/// Run every collision pass for one tick
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        player,
        spawner,
        player_bullets,
        enemy_bullets,
        lasers,
        phase,
        events,
        tuning,
        lanes,
        ..
    } = state;

    let hitbox = player.hitbox();
    let was_over = *phase == GamePhase::GameOver;

    // 1. Body contact. Enemies are solid obstacles and survive the hit.
    for enemy in &spawner.enemies {
        if hitbox.overlaps(&enemy.bounds()) {
            strike(player, phase, events);
        }
    }

    // 2. Player bullets stop in the first enemy they touch (list order).
    player_bullets.retain(|bullet| {
        let bounds = bullet.bounds();
        match spawner
            .enemies
            .iter_mut()
            .find(|enemy| bounds.overlaps(&enemy.bounds()))
        {
            Some(enemy) => {
                enemy.hp -= bullet.damage;
                false
            }
            None => true,
        }
    });
    spawner.enemies.retain(|enemy| {
        if !enemy.is_destroyed() {
            return true;
        }
        let score = tuning.enemies.profile(enemy.kind).score;
        player.add_score(score);
        events.push(GameEvent::EnemyDestroyed {
            kind: enemy.kind,
            score,
        });
        false
    });

    // 3. Enemy bullets are consumed on contact.
    enemy_bullets.retain(|bullet| {
        if *phase != GamePhase::GameOver && bullet.bounds().overlaps(&hitbox) {
            strike(player, phase, events);
            false
        } else {
            true
        }
    });

    // 4. Lasers hurt on every tick they overlap.
    for laser in lasers.iter().filter(|laser| laser.is_alive()) {
        if laser.bounds(lanes.height()).overlaps(&hitbox) {
            strike(player, phase, events);
        }
    }

    // 5. Pickups.
    spawner.pickups.retain(|pickup| {
        if *phase != GamePhase::GameOver && pickup.bounds().overlaps(&hitbox) {
            apply_pickup(player, pickup.kind, &tuning.pickups);
            events.push(GameEvent::PickupCollected { kind: pickup.kind });
            false
        } else {
            true
        }
    });

    // Kills later in the pass still count toward the final score.
    if !was_over && *phase == GamePhase::GameOver {
        log::info!("Game over with score {}", player.score);
        events.push(GameEvent::GameOver {
            score: player.score,
        });
    }
}
