//! Spatial audio cues
//!
//! The simulation never touches an audio device. It asks an [`AudioBackend`]
//! for a playable instance of a [`SoundEffect`], pans it by world position and
//! plays it. The [`AudioManager`] applies the player's volume settings on top.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use thiserror::Error;

use crate::pan_for_position;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ship fires a pair of projectiles
    Projectile,
    /// Explosion sprite spawned (impact or destruction)
    ExplosionSmall,
    /// Enemy destroyed
    ExplosionLarge,
    /// Ship engine loop
    ShipAmbient,
}

/// Audio playback failure reported by a backend
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
    #[error("no audio loaded for {0:?}")]
    MissingClip(SoundEffect),
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// A single playable instance of a loaded clip
pub trait PlayableSound {
    /// Set the instance gain (0.0 - 1.0)
    fn set_gain(&mut self, gain: f32);

    /// Set the panner position directly
    fn set_pan(&mut self, pan: Vec3);

    /// Pan by world position: each axis divided by the world half-extent
    fn set_pan_by_position(&mut self, position: Vec3) {
        self.set_pan(pan_for_position(position));
    }

    /// Start playback
    fn play(&mut self, looped: bool) -> Result<(), AudioError>;
}

/// Creates playable instances of preloaded clips
pub trait AudioBackend {
    fn create_playable_instance(&self, effect: SoundEffect) -> Box<dyn PlayableSound>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Build a manager with volumes taken from settings
    pub fn with_settings(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Manager that plays nothing
    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a one-shot cue panned to `position`
    pub fn cue(&self, effect: SoundEffect, position: Vec3) -> Result<(), AudioError> {
        let mut instance = self.prepare(effect, position);
        log::trace!("cue {:?} at {:?}", effect, position);
        instance.play(false)
    }

    /// Start a looping cue and hand back the instance so it can be re-panned
    pub fn start_loop(
        &self,
        effect: SoundEffect,
        position: Vec3,
    ) -> Result<Box<dyn PlayableSound>, AudioError> {
        let mut instance = self.prepare(effect, position);
        instance.play(true)?;
        Ok(instance)
    }

    fn prepare(&self, effect: SoundEffect, position: Vec3) -> Box<dyn PlayableSound> {
        let mut instance = self.backend.create_playable_instance(effect);
        instance.set_gain(self.effective_volume());
        instance.set_pan_by_position(position);
        instance
    }
}

/// Backend for headless runs: every instance is a no-op
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentBackend;

struct SilentSound;

impl PlayableSound for SilentSound {
    fn set_gain(&mut self, _gain: f32) {}
    fn set_pan(&mut self, _pan: Vec3) {}
    fn play(&mut self, _looped: bool) -> Result<(), AudioError> {
        Ok(())
    }
}

impl AudioBackend for SilentBackend {
    fn create_playable_instance(&self, _effect: SoundEffect) -> Box<dyn PlayableSound> {
        Box::new(SilentSound)
    }
}

/// A cue captured by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCue {
    pub effect: SoundEffect,
    pub pan: Vec3,
    pub gain: f32,
    pub looped: bool,
}

/// Backend that records every played cue, for the headless runner and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    cues: Rc<RefCell<Vec<RecordedCue>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cues played so far
    pub fn cues(&self) -> Vec<RecordedCue> {
        self.cues.borrow().clone()
    }

    /// Number of cues played for one effect
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.cues.borrow().iter().filter(|c| c.effect == effect).count()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

struct RecordingSound {
    effect: SoundEffect,
    pan: Vec3,
    gain: f32,
    /// Index of this instance's entry once played
    recorded: Option<usize>,
    log: Rc<RefCell<Vec<RecordedCue>>>,
}

impl PlayableSound for RecordingSound {
    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn set_pan(&mut self, pan: Vec3) {
        self.pan = pan;
        // Playing instances (engine loops) follow their source
        if let Some(index) = self.recorded {
            if let Some(cue) = self.log.borrow_mut().get_mut(index) {
                cue.pan = pan;
            }
        }
    }

    fn play(&mut self, looped: bool) -> Result<(), AudioError> {
        let mut log = self.log.borrow_mut();
        self.recorded = Some(log.len());
        log.push(RecordedCue {
            effect: self.effect,
            pan: self.pan,
            gain: self.gain,
            looped,
        });
        Ok(())
    }
}

impl AudioBackend for RecordingBackend {
    fn create_playable_instance(&self, effect: SoundEffect) -> Box<dyn PlayableSound> {
        Box::new(RecordingSound {
            effect,
            pan: Vec3::ZERO,
            gain: 1.0,
            recorded: None,
            log: Rc::clone(&self.cues),
        })
    }
}
