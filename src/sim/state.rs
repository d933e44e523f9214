//! Game state and session lifecycle
//!
//! One `GameState` owns every live entity list. Sub-components borrow
//! disjoint fields during a tick; nothing is shared outside the session.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Bullet, EnemyKind, LaserBeam, PickupKind};
use super::lane::LaneGrid;
use super::player::Player;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by the player, resumes on the next pause toggle
    Paused,
    /// Run ended, waiting for a restart command
    GameOver,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { kind: EnemyKind, lane: usize },
    EnemyDestroyed { kind: EnemyKind, score: u64 },
    PlayerHit { hp: i32 },
    PickupCollected { kind: PickupKind },
    LevelUp { level: u32 },
    GameOver { score: u64 },
    Reset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub lanes: LaneGrid,
    pub phase: GamePhase,
    pub player: Player,
    pub spawner: Spawner,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub lasers: Vec<LaserBeam>,
    /// Seconds accumulated toward the next speed level
    pub difficulty_timer: f32,
    /// Fractional passive score not yet awarded
    pub passive_score: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since the session started
    pub elapsed: f64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the standard three-lane play area
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_lanes(seed, tuning, LaneGrid::default())
    }

    pub fn with_lanes(seed: u64, tuning: Tuning, lanes: LaneGrid) -> Self {
        log::info!("Starting session with seed {seed}");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            lanes,
            phase: GamePhase::Playing,
            player: Player::new(lanes, tuning.player),
            spawner: Spawner::new(lanes, &tuning),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            lasers: Vec::new(),
            difficulty_timer: 0.0,
            passive_score: 0.0,
            time_ticks: 0,
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn speed_level(&self) -> u32 {
        self.spawner.speed_level
    }

    /// Request a lane change at input time `now` (seconds)
    pub fn steer(&mut self, direction: i32, now: f64) -> bool {
        self.player.change_lane(direction, now)
    }

    /// Fire a player bullet if ammo and cooldown allow
    pub fn fire(&mut self) -> bool {
        if !self.player.consume_shot() {
            return false;
        }
        let bullet = Bullet::player(self.player.lane, self.player.muzzle(), &self.tuning.projectiles);
        self.player_bullets.push(bullet);
        self.events.push(GameEvent::PlayerFired);
        true
    }

    /// Fresh player and empty road at speed level 1. The RNG stream carries on.
    pub fn reset(&mut self) {
        log::info!("Session reset");
        self.player = Player::new(self.lanes, self.tuning.player);
        self.spawner.reset();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.lasers.clear();
        self.difficulty_timer = 0.0;
        self.passive_score = 0.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Reset);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
