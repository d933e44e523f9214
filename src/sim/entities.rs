//! Entity model
//!
//! Every moving thing shares a `Body` (lane tag, center position, size and a
//! signed vertical speed). Concrete entities embed a body and add their own
//! state. Positive speed moves down the screen, negative moves up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Color;
use crate::tuning::{EnemyAttack, EnemyProfile, EnemyTable, PickupTuning, ProjectileTuning};

/// Shared movable bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Lane the entity spawned in (a logical tag, not re-validated against `pos.x`)
    pub lane: usize,
    /// Center of the entity
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed in pixels per second
    pub speed: f32,
}

impl Body {
    pub fn new(lane: usize, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            lane,
            pos,
            size,
            speed,
        }
    }

    /// Move along the vertical axis
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Level2,
    Special,
}

impl EnemyKind {
    /// Level2 and Special enemies count toward the per-lane elite cap
    pub fn is_elite(self) -> bool {
        !matches!(self, EnemyKind::Normal)
    }
}

/// A hostile vehicle scrolling down a lane
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub hp: i32,
    pub color: Color,
    pub attack: EnemyAttack,
    /// Seconds between repeat shots (`None` for enemies that never shoot)
    pub shoot_interval: Option<f32>,
    /// Seconds before the first shot is allowed
    pub first_shot_delay: f32,
    /// Seconds since spawn or since the last shot
    pub since_last_shot: f32,
    pub has_fired: bool,
    /// While positive, a laser is charging and the enemy holds position
    pub channel_timer: f32,
}

impl Enemy {
    /// Spawn an enemy of `kind` moving at `scroll_speed` times its profile multiplier
    pub fn new(
        kind: EnemyKind,
        lane: usize,
        pos: Vec2,
        scroll_speed: f32,
        shoot_interval: f32,
        table: &EnemyTable,
    ) -> Self {
        let profile: &EnemyProfile = table.profile(kind);
        let shoots = profile.attack != EnemyAttack::None;
        Self {
            body: Body::new(
                lane,
                pos,
                Vec2::new(table.width, table.height),
                scroll_speed * profile.speed_mult,
            ),
            kind,
            hp: profile.hp,
            color: profile.color,
            attack: profile.attack,
            shoot_interval: shoots.then_some(shoot_interval),
            first_shot_delay: profile.first_shot_delay,
            since_last_shot: 0.0,
            has_fired: false,
            channel_timer: 0.0,
        }
    }

    pub fn is_channeling(&self) -> bool {
        self.attack == EnemyAttack::Laser && self.channel_timer > 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        if self.is_channeling() {
            self.channel_timer -= dt;
        } else {
            self.body.advance(dt);
        }
        if self.shoot_interval.is_some() {
            self.since_last_shot += dt;
        }
    }

    /// First shot waits for `first_shot_delay`, later shots for `shoot_interval`
    pub fn can_shoot(&self) -> bool {
        let Some(interval) = self.shoot_interval else {
            return false;
        };
        if self.has_fired {
            self.since_last_shot >= interval
        } else {
            self.since_last_shot >= self.first_shot_delay
        }
    }

    pub fn mark_fired(&mut self) {
        self.since_last_shot = 0.0;
        self.has_fired = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

/// A bullet fired by the player or an enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub damage: i32,
    pub from_player: bool,
    /// Round bullets use square bounds
    pub is_circle: bool,
    pub color: Color,
}

impl Bullet {
    /// Upward player shot
    pub fn player(lane: usize, pos: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            body: Body::new(
                lane,
                pos,
                Vec2::new(tuning.bullet_width, tuning.bullet_height),
                tuning.player_bullet_speed,
            ),
            damage: tuning.bullet_damage,
            from_player: true,
            is_circle: false,
            color: tuning.player_bullet_color,
        }
    }

    /// Downward enemy shot; round bullets get square bounds
    pub fn enemy(lane: usize, pos: Vec2, is_circle: bool, color: Color, tuning: &ProjectileTuning) -> Self {
        let height = if is_circle {
            tuning.bullet_width
        } else {
            tuning.bullet_height
        };
        Self {
            body: Body::new(
                lane,
                pos,
                Vec2::new(tuning.bullet_width, height),
                tuning.enemy_bullet_speed,
            ),
            damage: tuning.bullet_damage,
            from_player: false,
            is_circle,
            color,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.body.advance(dt);
    }

    /// Still inside the vertical band `(-margin, height + margin)`
    pub fn in_bounds(&self, height: f32, margin: f32) -> bool {
        -margin < self.body.pos.y && self.body.pos.y < height + margin
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

/// A stationary beam burning down a lane from the firing point
#[derive(Debug, Clone, PartialEq)]
pub struct LaserBeam {
    pub lane: usize,
    pub x: f32,
    /// Firing height; the beam covers everything below it
    pub start_y: f32,
    pub width: f32,
    pub color: Color,
    pub duration: f32,
    pub elapsed: f32,
}

impl LaserBeam {
    pub fn new(lane: usize, x: f32, start_y: f32, width: f32, color: Color, duration: f32) -> Self {
        Self {
            lane,
            x,
            start_y,
            width,
            color,
            duration,
            elapsed: 0.0,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Strip from `start_y` to the bottom of the play area
    pub fn bounds(&self, play_height: f32) -> Aabb {
        let height = (play_height - self.start_y).max(0.0);
        Aabb::new(
            Vec2::new(self.x - self.width / 2.0, self.start_y),
            Vec2::new(self.x + self.width / 2.0, self.start_y + height),
        )
    }
}

/// Pickup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Ammo,
    Hp,
    Coin,
}

/// A round collectible scrolling with the road
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(kind: PickupKind, lane: usize, pos: Vec2, scroll_speed: f32, tuning: &PickupTuning) -> Self {
        let diameter = tuning.radius * 2.0;
        Self {
            body: Body::new(
                lane,
                pos,
                Vec2::splat(diameter),
                scroll_speed * tuning.speed_mult,
            ),
            kind,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.body.advance(dt);
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
