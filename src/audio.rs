//! Sound effect dispatch
//!
//! The game only says which effect to play. Synthesis and playback belong to
//! an `AudioBackend`; without one (or after it fails) audio is silently off.

use thiserror::Error;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bird flapped
    Jump,
    /// Obstacle cleared or enemy destroyed
    Score,
    /// Run ended
    GameOver,
    /// Shooter fired a projectile
    Shot,
}

/// Receives effect notifications from the game
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("failed to play {effect:?}: {reason}")]
    Playback { effect: SoundEffect, reason: String },
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from saved preferences
    pub fn from_settings(settings: &Settings, backend: Option<Box<dyn AudioBackend>>) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_effect(effect, vol) {
            log::warn!("{} - audio disabled", e);
            self.backend = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeBackend {
        played: Rc<RefCell<Vec<(SoundEffect, f32)>>>,
        fail: bool,
    }

    impl AudioBackend for FakeBackend {
        fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::DeviceUnavailable("unplugged".into()));
            }
            self.played.borrow_mut().push((effect, volume));
            Ok(())
        }
    }

    #[test]
    fn test_plays_at_effective_volume() {
        let backend = FakeBackend::default();
        let mut audio = AudioManager::new(Some(Box::new(backend.clone())));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Jump);
        assert_eq!(*backend.played.borrow(), vec![(SoundEffect::Jump, 0.25)]);
    }

    #[test]
    fn test_muted_is_silent() {
        let backend = FakeBackend::default();
        let mut audio = AudioManager::new(Some(Box::new(backend.clone())));
        audio.set_muted(true);
        audio.play(SoundEffect::Shot);
        assert!(backend.played.borrow().is_empty());
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::default();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(1.0);
        assert_eq!(audio.effective_volume(), 1.0);
    }

    #[test]
    fn test_failing_backend_is_dropped() {
        let backend = FakeBackend {
            fail: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Some(Box::new(backend)));
        assert!(audio.is_enabled());
        audio.play(SoundEffect::Score);
        assert!(!audio.is_enabled());
        // Still safe to call
        audio.play(SoundEffect::GameOver);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.4,
            muted: false,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(&settings, None);
        assert!((audio.effective_volume() - 0.2).abs() < 1e-6);
        assert!(!audio.is_enabled());
    }
}
