//! Audio collaborator
//!
//! The game only asks for a looping music track and short cues keyed off
//! simulation events. Playback lives behind [`AudioBackend`]; every failure
//! is logged and swallowed so a missing device or file never ends a run.

use crate::sim::{EnemyKind, GameEvent};

/// Default looping music track, relative to the asset directory
pub const DEFAULT_MUSIC_TRACK: &str = "bgm.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Level2 bullet or Special laser
    EnemyShot,
    EnemyLaser,
    /// Enemy destroyed by bullets
    Explosion,
    /// Player took damage
    Hurt,
    PickupCollect,
    LevelUp,
    GameOver,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::PlayerFired => SoundEffect::Shoot,
            GameEvent::EnemyFired {
                kind: EnemyKind::Special,
                ..
            } => SoundEffect::EnemyLaser,
            GameEvent::EnemyFired { .. } => SoundEffect::EnemyShot,
            GameEvent::EnemyDestroyed { .. } => SoundEffect::Explosion,
            GameEvent::PlayerHit { .. } => SoundEffect::Hurt,
            GameEvent::PickupCollected { .. } => SoundEffect::PickupCollect,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
            GameEvent::Reset => return None,
        };
        Some(effect)
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start `track` looping forever at `volume` (0.0 - 1.0)
    fn play_loop(&mut self, track: &str, volume: f32) -> anyhow::Result<()>;

    fn stop(&mut self);

    /// One-shot cue; backends without effects ignore it
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Silent backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play_loop(&mut self, _track: &str, _volume: f32) -> anyhow::Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Volume handed to one-shot effects
const EFFECT_VOLUME: f32 = 1.0;

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("music_volume", &self.music_volume)
            .field("muted", &self.muted)
            .field("music_playing", &self.music_playing)
            .finish_non_exhaustive()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            music_volume: 0.35,
            muted: false,
            music_playing: false,
        }
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Muting stops the music; unmuting does not restart it
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Fire-and-forget background loop
    pub fn start_music(&mut self, track: &str) {
        if self.muted {
            log::debug!("Audio muted, not starting {track}");
            return;
        }
        match self.backend.play_loop(track, self.music_volume) {
            Ok(()) => {
                log::info!("Playing {track} at volume {:.2}", self.music_volume);
                self.music_playing = true;
            }
            Err(err) => {
                log::warn!("Cannot play music: {err:#}");
                self.music_playing = false;
            }
        }
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.backend.stop();
            self.music_playing = false;
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        if let Err(err) = self.backend.play_effect(effect, EFFECT_VOLUME) {
            log::debug!("Dropped {effect:?}: {err:#}");
        }
    }

    /// Play the cue for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
