//! Draw-list renderer
//!
//! Turns a read-only view of the session into a flat list of
//! [`DrawCommand`]s in painter's order. Whatever presents the frame (a
//! window, a terminal, a test) only has to rasterise those commands; the
//! renderer never writes to simulation state.

pub mod hud;
pub mod shapes;
pub mod sprites;

use glam::Vec2;

use crate::Color;
use crate::sim::{GamePhase, GameState};

pub use sprites::{AssetDir, NoSprites, SpriteCache, SpriteLoader};

/// Where a text position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopRight,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// HUD text (22 px)
    Normal,
    /// Overlay titles (40 px)
    Large,
}

impl FontSize {
    pub fn pixels(self) -> u32 {
        match self {
            FontSize::Normal => 22,
            FontSize::Large => 40,
        }
    }
}

/// One primitive in canvas coordinates (480x720, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Filled rounded rectangle
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
        radius: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// A cached sprite, looked up by the same key through [`Renderer::sprite`]
    Sprite {
        name: &'static str,
        center: Vec2,
        width: u32,
        height: u32,
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: TextAnchor,
        size: FontSize,
        color: Color,
    },
}

/// Placement of the base canvas inside a window of another size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    /// Top-left corner of the scaled canvas in window pixels
    pub offset: Vec2,
    pub size: Vec2,
}

/// Uniformly scale `base` to fit `window`, centered with bars on the short axis
pub fn letterbox(base: Vec2, window: Vec2) -> Letterbox {
    let scale = (window.x / base.x).min(window.y / base.y);
    let size = (base * scale).floor();
    let offset = ((window - size) / 2.0).floor();
    Letterbox {
        scale,
        offset,
        size,
    }
}

/// Builds frames and owns the sprite cache
pub struct Renderer<L: SpriteLoader = NoSprites> {
    sprites: SpriteCache<L>,
}

impl Default for Renderer<NoSprites> {
    fn default() -> Self {
        Self::new(NoSprites)
    }
}

impl<L: SpriteLoader> Renderer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            sprites: SpriteCache::new(loader),
        }
    }

    /// Resolve a `DrawCommand::Sprite` to the loaded sprite
    pub fn sprite(&mut self, name: &str, width: u32, height: u32) -> Option<&L::Sprite> {
        self.sprites.get(name, width, height)
    }

    fn sprite_or(
        &mut self,
        name: &'static str,
        center: Vec2,
        size: Vec2,
        fallback: DrawCommand,
    ) -> DrawCommand {
        let (width, height) = (size.x as u32, size.y as u32);
        if self.sprites.has(name, width, height) {
            DrawCommand::Sprite {
                name,
                center,
                width,
                height,
            }
        } else {
            fallback
        }
    }

    /// Full frame: background, lanes, entities, HUD, then overlays
    pub fn build_frame(&mut self, state: &GameState, best: u64) -> Vec<DrawCommand> {
        let lanes = &state.lanes;
        let mut cmds = vec![DrawCommand::Clear {
            color: shapes::BACKGROUND_COLOR,
        }];
        cmds.extend(shapes::lane_lines(lanes));

        for enemy in &state.spawner.enemies {
            let cmd = self.sprite_or(
                sprites::enemy_sprite(enemy.kind),
                enemy.body.pos,
                enemy.body.size,
                shapes::enemy(enemy),
            );
            cmds.push(cmd);
        }
        for pickup in &state.spawner.pickups {
            let color = state.tuning.pickups.color(pickup.kind);
            let cmd = self.sprite_or(
                sprites::pickup_sprite(pickup.kind),
                pickup.body.pos,
                pickup.body.size,
                shapes::pickup(pickup, color),
            );
            cmds.push(cmd);
        }
        cmds.extend(
            state
                .lasers
                .iter()
                .filter(|l| l.is_alive())
                .map(|l| shapes::laser(l, lanes.height())),
        );
        cmds.extend(state.enemy_bullets.iter().map(shapes::bullet));
        cmds.extend(state.player_bullets.iter().map(shapes::bullet));

        let player = &state.player;
        let cmd = self.sprite_or(
            sprites::PLAYER_SPRITE,
            Vec2::new(player.current_x, player.y),
            player.size,
            shapes::player(player),
        );
        cmds.push(cmd);

        cmds.extend(hud::top_panel(player, state.speed_level(), best, lanes.width()));

        match state.phase {
            GamePhase::GameOver => {
                cmds.extend(hud::game_over(player.score, best, lanes.width(), lanes.height()));
            }
            GamePhase::Paused => cmds.push(DrawCommand::Text {
                text: "PAUSED".to_string(),
                pos: Vec2::new(lanes.width() / 2.0, lanes.height() / 2.0),
                anchor: TextAnchor::Center,
                size: FontSize::Large,
                color: [240, 240, 240],
            }),
            GamePhase::Playing => {}
        }
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::{Enemy, EnemyKind};

    #[test]
    fn test_letterbox_wide_window() {
        let lb = letterbox(Vec2::new(480.0, 720.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(lb.scale, 1.5);
        assert_eq!(lb.size, Vec2::new(720.0, 1080.0));
        assert_eq!(lb.offset, Vec2::new(600.0, 0.0));
    }

    #[test]
    fn test_letterbox_exact_fit() {
        let lb = letterbox(Vec2::new(480.0, 720.0), Vec2::new(960.0, 1440.0));
        assert_eq!(lb.scale, 2.0);
        assert_eq!(lb.offset, Vec2::ZERO);
    }

    #[test]
    fn test_frame_order() {
        let mut state = GameState::new(1, Tuning::default());
        let e = Enemy::new(EnemyKind::Normal, 0, Vec2::new(80.0, 100.0), 0.0, 2.0, &state.tuning.enemies);
        state.spawner.enemies.push(e);
        state.fire();

        let mut renderer = Renderer::new(NoSprites);
        let cmds = renderer.build_frame(&state, 0);

        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        assert!(matches!(cmds[1], DrawCommand::Line { .. }));
        assert!(matches!(cmds[2], DrawCommand::Line { .. }));
        // Enemy body falls back to its table color
        assert!(matches!(cmds[3], DrawCommand::Rect { color: [70, 140, 230], .. }));
        // Player bullet then the player itself
        assert!(matches!(cmds[4], DrawCommand::Rect { color: [230, 230, 255], .. }));
        assert!(matches!(cmds[5], DrawCommand::Rect { color: [40, 210, 120], .. }));
    }

    #[test]
    fn test_game_over_overlay_only_when_over() {
        let mut state = GameState::new(1, Tuning::default());
        let mut renderer = Renderer::new(NoSprites);
        let count_titles = |cmds: &[DrawCommand]| {
            cmds.iter()
                .filter(|c| matches!(c, DrawCommand::Text { size: FontSize::Large, .. }))
                .count()
        };
        assert_eq!(count_titles(&renderer.build_frame(&state, 0)), 0);
        state.phase = GamePhase::GameOver;
        assert_eq!(count_titles(&renderer.build_frame(&state, 0)), 1);
    }

    #[test]
    fn test_expired_lasers_not_drawn() {
        let mut state = GameState::new(1, Tuning::default());
        let mut beam = crate::sim::LaserBeam::new(0, 80.0, 0.0, 60.0, [1, 2, 3], 0.4);
        beam.elapsed = 0.5;
        state.lasers.push(beam);
        let mut renderer = Renderer::new(NoSprites);
        let cmds = renderer.build_frame(&state, 0);
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect { color: [1, 2, 3], .. })));
    }
}
