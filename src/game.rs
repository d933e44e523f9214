//! Host-side session wrapper
//!
//! Owns one simulation session plus the collaborators around it: the frame
//! clock, the high score record, display settings and audio. Input events
//! are queued and applied at the start of the next fixed step.

use std::path::PathBuf;

use crate::audio::AudioManager;
use crate::consts::SIM_DT;
use crate::highscores::HighScores;
use crate::platform::{FrameClock, InputEvent, TimedInput};
use crate::renderer::{DrawCommand, Renderer, SpriteLoader};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, LaneChange, TickInput, tick};
use crate::tuning::Tuning;

/// A running game
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub high_scores: HighScores,
    pub settings: Settings,
    settings_path: Option<PathBuf>,
    clock: FrameClock,
    input: TickInput,
    audio: AudioManager,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, high_scores: HighScores, settings: Settings) -> Self {
        let mut audio = AudioManager::default();
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        Self {
            state: GameState::new(seed, tuning),
            high_scores,
            settings,
            settings_path: None,
            clock: FrameClock::default(),
            input: TickInput::default(),
            audio,
            running: true,
        }
    }

    /// Persist settings changes (zoom, fullscreen) to this file
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Swap the audio manager, keeping the configured volume and mute state
    pub fn with_audio(mut self, mut audio: AudioManager) -> Self {
        audio.set_music_volume(self.settings.music_volume);
        audio.set_muted(self.settings.muted);
        self.audio = audio;
        self
    }

    pub fn start_music(&mut self, track: &str) {
        self.audio.start_music(track);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Best score including the run in progress
    pub fn best(&self) -> u64 {
        self.high_scores.best().max(self.state.player.score)
    }

    /// Queue an input event for the next step, or apply host commands now
    pub fn handle(&mut self, input: TimedInput) {
        match input.event {
            InputEvent::MoveLeft => self.input.lane_changes.push(LaneChange {
                direction: -1,
                time: input.time,
            }),
            InputEvent::MoveRight => self.input.lane_changes.push(LaneChange {
                direction: 1,
                time: input.time,
            }),
            InputEvent::Fire => self.input.fire_presses += 1,
            InputEvent::Pause => self.input.pause = !self.input.pause,
            InputEvent::Restart => self.input.restart = true,
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.running = false;
            }
            InputEvent::ToggleFullscreen => {
                self.settings.toggle_fullscreen();
                self.save_settings();
            }
            InputEvent::ZoomIn => {
                if self.settings.zoom_in() {
                    self.save_settings();
                }
            }
            InputEvent::ZoomOut => {
                if self.settings.zoom_out() {
                    self.save_settings();
                }
            }
        }
    }

    fn save_settings(&self) {
        if let Some(path) = &self.settings_path {
            self.settings.save(path);
        }
    }

    /// Advance by a variable frame delta; runs zero or more fixed steps.
    /// Returns the events produced, in order.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let steps = self.clock.advance(dt);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
        }
        events
    }

    /// Exactly one fixed step, consuming queued input
    pub fn step(&mut self) -> Vec<GameEvent> {
        tick(&mut self.state, &self.input, SIM_DT);
        self.input.clear();

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.high_scores.submit(*score);
            }
        }
        self.audio.handle_events(&events);
        events
    }

    /// Draw list for the current state
    pub fn draw<L: SpriteLoader>(&self, renderer: &mut Renderer<L>) -> Vec<DrawCommand> {
        renderer.build_frame(&self.state, self.best())
    }
}
