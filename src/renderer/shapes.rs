//! Procedural shapes for entities without sprites

use glam::Vec2;

use super::DrawCommand;
use crate::Color;
use crate::sim::{Bullet, Enemy, LaneGrid, LaserBeam, Pickup, Player};

pub const BACKGROUND_COLOR: Color = [20, 20, 30];
pub const LANE_LINE_COLOR: Color = [70, 70, 90];
pub const LANE_LINE_WIDTH: f32 = 2.0;

/// Corner radius for vehicles and plain bullets
const ENTITY_RADIUS: f32 = 6.0;
const PLAYER_RADIUS: f32 = 8.0;
const LASER_RADIUS: f32 = 4.0;

/// Add `amount` to every channel, saturating at 255
pub fn brighten(color: Color, amount: u8) -> Color {
    color.map(|c| c.saturating_add(amount))
}

/// Blink phase while invulnerable: alternates every 1/20 s
pub fn flash_phase(invuln_timer: f32) -> u32 {
    ((invuln_timer * 20.0).floor() as i64).rem_euclid(2) as u32
}

/// Player body color for the current frame
pub fn player_color(player: &Player) -> Color {
    let color = player.color();
    if player.is_invulnerable() && flash_phase(player.invuln_timer) == 0 {
        brighten(color, 40)
    } else {
        color
    }
}

/// Vertical separators between lanes
pub fn lane_lines(lanes: &LaneGrid) -> impl Iterator<Item = DrawCommand> + '_ {
    lanes.separators().map(move |x| DrawCommand::Line {
        from: Vec2::new(x, 0.0),
        to: Vec2::new(x, lanes.height()),
        width: LANE_LINE_WIDTH,
        color: LANE_LINE_COLOR,
    })
}

fn body_rect(center: Vec2, size: Vec2, color: Color, radius: f32) -> DrawCommand {
    DrawCommand::Rect {
        min: center - size / 2.0,
        size,
        color,
        radius,
    }
}

pub fn enemy(enemy: &Enemy) -> DrawCommand {
    body_rect(enemy.body.pos, enemy.body.size, enemy.color, ENTITY_RADIUS)
}

pub fn pickup(pickup: &Pickup, color: Color) -> DrawCommand {
    DrawCommand::Circle {
        center: pickup.body.pos,
        radius: pickup.body.size.x / 2.0,
        color,
    }
}

pub fn bullet(bullet: &Bullet) -> DrawCommand {
    if bullet.is_circle {
        DrawCommand::Circle {
            center: bullet.body.pos,
            radius: bullet.body.size.x / 2.0,
            color: bullet.color,
        }
    } else {
        body_rect(bullet.body.pos, bullet.body.size, bullet.color, ENTITY_RADIUS)
    }
}

pub fn laser(laser: &LaserBeam, play_height: f32) -> DrawCommand {
    let strip = laser.bounds(play_height);
    DrawCommand::Rect {
        min: strip.min,
        size: strip.max - strip.min,
        color: laser.color,
        radius: LASER_RADIUS,
    }
}

pub fn player(player: &Player) -> DrawCommand {
    body_rect(
        Vec2::new(player.current_x, player.y),
        player.size,
        player_color(player),
        PLAYER_RADIUS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::PlayerTuning;

    #[test]
    fn test_brighten_saturates() {
        assert_eq!(brighten([40, 210, 120], 40), [80, 250, 160]);
        assert_eq!(brighten([230, 250, 0], 40), [255, 255, 40]);
    }

    #[test]
    fn test_flash_phase_alternates() {
        assert_eq!(flash_phase(1.0), 0);
        assert_eq!(flash_phase(0.97), 1);
        assert_eq!(flash_phase(0.93), 0);
        assert_eq!(flash_phase(0.04), 0);
    }

    #[test]
    fn test_player_flashes_only_while_invulnerable() {
        let mut p = Player::new(LaneGrid::default(), PlayerTuning::default());
        assert_eq!(player_color(&p), [40, 210, 120]);
        p.invuln_timer = 1.0;
        assert_eq!(player_color(&p), [80, 250, 160]);
        p.invuln_timer = 0.97;
        assert_eq!(player_color(&p), [40, 210, 120]);
    }

    #[test]
    fn test_lane_lines() {
        let lines: Vec<_> = lane_lines(&LaneGrid::default()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            DrawCommand::Line {
                from: Vec2::new(160.0, 0.0),
                to: Vec2::new(160.0, 720.0),
                width: LANE_LINE_WIDTH,
                color: LANE_LINE_COLOR,
            }
        );
    }

    #[test]
    fn test_laser_strip_reaches_bottom() {
        let beam = LaserBeam::new(0, 80.0, 300.0, 60.0, [230, 70, 70], 0.4);
        match laser(&beam, 720.0) {
            DrawCommand::Rect { min, size, .. } => {
                assert_eq!(min, Vec2::new(50.0, 300.0));
                assert_eq!(size, Vec2::new(60.0, 420.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
