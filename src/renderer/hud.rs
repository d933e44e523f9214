//! HUD overlays: top status panel and the game-over screen

use glam::Vec2;

use super::{DrawCommand, FontSize, TextAnchor};
use crate::Color;
use crate::sim::Player;

const TEXT_COLOR: Color = [240, 240, 240];
const COIN_TEXT_COLOR: Color = [240, 220, 120];
const HEART_FULL: Color = [220, 80, 80];
const HEART_EMPTY: Color = [80, 50, 50];
const HEART_SIZE: f32 = 18.0;
const HEART_GAP: f32 = 4.0;
const MARGIN: f32 = 16.0;
const RIGHT_MARGIN: f32 = 20.0;

const GAME_OVER_TITLE: &str = "GAME OVER";
const GAME_OVER_TITLE_COLOR: Color = [255, 220, 220];
const RESTART_HINT: &str = "Press ENTER to restart / ESC to quit";
const RESTART_HINT_COLOR: Color = [200, 200, 230];

fn text(text: String, pos: Vec2, anchor: TextAnchor, size: FontSize, color: Color) -> DrawCommand {
    DrawCommand::Text {
        text,
        pos,
        anchor,
        size,
        color,
    }
}

/// Score, best and speed level on the left; hearts, ammo and coins on the right
pub fn top_panel(player: &Player, speed_level: u32, best: u64, width: f32) -> Vec<DrawCommand> {
    let mut cmds = vec![
        text(
            format!("Score: {}", player.score),
            Vec2::new(MARGIN, 10.0),
            TextAnchor::TopLeft,
            FontSize::Normal,
            TEXT_COLOR,
        ),
        text(
            format!("Best: {best}"),
            Vec2::new(MARGIN, 32.0),
            TextAnchor::TopLeft,
            FontSize::Normal,
            TEXT_COLOR,
        ),
        text(
            format!("Speed Lv: {speed_level}"),
            Vec2::new(MARGIN, 54.0),
            TextAnchor::TopLeft,
            FontSize::Normal,
            TEXT_COLOR,
        ),
    ];

    let max_hp = player.max_hp().max(0);
    for i in 0..max_hp {
        let color = if i < player.hp { HEART_FULL } else { HEART_EMPTY };
        let x = width - RIGHT_MARGIN - (max_hp - i) as f32 * (HEART_SIZE + HEART_GAP);
        cmds.push(DrawCommand::Rect {
            min: Vec2::new(x, 10.0),
            size: Vec2::splat(HEART_SIZE),
            color,
            radius: 4.0,
        });
    }

    cmds.push(text(
        format!("Ammo: {}", player.ammo),
        Vec2::new(width - RIGHT_MARGIN, 40.0),
        TextAnchor::TopRight,
        FontSize::Normal,
        TEXT_COLOR,
    ));
    cmds.push(text(
        format!("Coins: {}", player.coins),
        Vec2::new(width - RIGHT_MARGIN, 64.0),
        TextAnchor::TopRight,
        FontSize::Normal,
        COIN_TEXT_COLOR,
    ));
    cmds
}

/// Centered title, final score and restart hint
pub fn game_over(score: u64, best: u64, width: f32, height: f32) -> Vec<DrawCommand> {
    let center = Vec2::new(width / 2.0, height / 2.0);
    vec![
        text(
            GAME_OVER_TITLE.to_string(),
            center - Vec2::new(0.0, 60.0),
            TextAnchor::Center,
            FontSize::Large,
            GAME_OVER_TITLE_COLOR,
        ),
        text(
            format!("Score: {score}  Best: {best}"),
            center,
            TextAnchor::Center,
            FontSize::Normal,
            TEXT_COLOR,
        ),
        text(
            RESTART_HINT.to_string(),
            center + Vec2::new(0.0, 40.0),
            TextAnchor::Center,
            FontSize::Normal,
            RESTART_HINT_COLOR,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LaneGrid;
    use crate::tuning::PlayerTuning;

    fn texts(cmds: &[DrawCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_top_panel_contents() {
        let mut player = Player::new(LaneGrid::default(), PlayerTuning::default());
        player.score = 1234;
        player.coins = 2;
        player.hp = 2;
        let cmds = top_panel(&player, 3, 5000, 480.0);
        assert_eq!(
            texts(&cmds),
            vec!["Score: 1234", "Best: 5000", "Speed Lv: 3", "Ammo: 10", "Coins: 2"]
        );

        let hearts: Vec<Color> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(hearts, vec![HEART_FULL, HEART_FULL, HEART_EMPTY]);
    }

    #[test]
    fn test_hearts_right_aligned() {
        let player = Player::new(LaneGrid::default(), PlayerTuning::default());
        let cmds = top_panel(&player, 1, 0, 480.0);
        let last = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { min, size, .. } => Some(min.x + size.x),
                _ => None,
            })
            .last();
        // Rightmost heart ends one gap short of the right margin
        assert_eq!(last, Some(480.0 - RIGHT_MARGIN - HEART_GAP));
    }

    #[test]
    fn test_game_over_lines() {
        let cmds = game_over(900, 1200, 480.0, 720.0);
        assert_eq!(texts(&cmds)[1], "Score: 900  Best: 1200");
        assert_eq!(cmds.len(), 3);
    }
}
