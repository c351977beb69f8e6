//! Per-frame simulation step
//!
//! Advances every part of the game in a fixed order. Collisions run last so
//! they see this frame's positions; entities spent in a collision are removed
//! by their own collection on the next frame.

use thiserror::Error;

use super::enemies::HitContext;
use super::state::GameState;
use crate::audio::AudioError;

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire button held
    pub fire: bool,
    /// Ship stick
    pub ship_vx: f32,
    pub ship_vy: f32,
    /// Camera motion this frame
    pub camera_vx: f32,
    pub camera_vy: f32,
    /// Camera motion accumulated by pointer lock since the last frame
    pub camera_cumulative_vx: f32,
    pub camera_cumulative_vy: f32,
}

/// A frame could not be completed
#[derive(Debug, Error)]
pub enum SimError {
    #[error("audio cue failed: {0}")]
    Audio(#[from] AudioError),
}

/// Advance the game by `elapsed_ms`. Returns the number of projectile hits.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> Result<usize, SimError> {
    debug_assert!(
        elapsed_ms.is_finite() && elapsed_ms >= 0.0,
        "bad frame time {elapsed_ms}"
    );

    state.camera.update(elapsed_ms, input, &mut state.enemies);
    state.ship.update(input, &mut state.projectiles, &state.audio)?;
    state.enemies.update(elapsed_ms);
    state.projectiles.update(elapsed_ms);
    state.explosions.update(elapsed_ms);
    state.video.update(elapsed_ms);

    let mut ctx = HitContext {
        explosions: &mut state.explosions,
        audio: &state.audio,
        score: &mut state.score,
    };
    let hits = state
        .resolver
        .update(&mut state.projectiles, &mut state.enemies, &mut ctx)?;

    state.time_ms += f64::from(elapsed_ms);
    state.frame += 1;
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, PlayableSound, RecordingBackend, SoundEffect};
    use crate::consts::*;
    use crate::faces::FaceAssets;
    use crate::scene::FaceTexture;
    use crate::settings::Settings;
    use crate::sim::camera::IntroStage;
    use glam::Vec3;

    const FRAME_MS: f32 = 16.0;

    fn new_game(backend: RecordingBackend) -> GameState {
        GameState::new(&Settings::default(), FaceAssets::placeholder(), Box::new(backend)).unwrap()
    }

    fn run_frames(state: &mut GameState, input: &TickInput, frames: usize) -> usize {
        (0..frames).map(|_| tick(state, input, FRAME_MS).unwrap()).sum()
    }

    #[test]
    fn test_intro_spawns_first_wave_after_hold() {
        let mut state = new_game(RecordingBackend::new());
        let idle = TickInput::default();

        // 1000ms of holding overhead (the first frame only places the camera)
        run_frames(&mut state, &idle, 63);
        assert!(state.enemies.is_empty());
        run_frames(&mut state, &idle, 1);
        assert_eq!(state.enemies.len(), 18);
        assert_eq!(state.enemies.wave(), 1);
        assert!(state.enemies.enemies().iter().all(|e| e.face_texture == FaceTexture::Hidden));
    }

    #[test]
    fn test_intro_ends_in_free_look_with_faces() {
        let mut state = new_game(RecordingBackend::new());
        let idle = TickInput::default();
        let mut frames = 0;
        while state.camera.stage != IntroStage::FreeLook {
            tick(&mut state, &idle, FRAME_MS).unwrap();
            frames += 1;
            assert!(frames < 2000);
        }
        assert!(state.enemies.enemies().iter().all(|e| e.face_texture == FaceTexture::Static));
        assert_eq!(state.enemies.wave(), 1);
    }

    #[test]
    fn test_video_setting_shows_live_feed() {
        let settings = Settings {
            video_enabled: true,
            ..Settings::default()
        };
        let mut state = GameState::new(
            &settings,
            FaceAssets::placeholder(),
            Box::new(RecordingBackend::new()),
        )
        .unwrap();
        state.enemies.reset_wave(true);
        tick(&mut state, &TickInput::default(), FRAME_MS).unwrap();
        assert!(state.enemies.video_enabled());
        assert!(state.enemies.enemies().iter().all(|e| e.face_texture == FaceTexture::LiveFeed));
    }

    #[test]
    fn test_held_fire_respects_interval() {
        let backend = RecordingBackend::new();
        let mut state = new_game(backend.clone());
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };

        // 10 frames of 16ms = 160ms: shots at 0 and 112
        run_frames(&mut state, &fire, 10);
        assert_eq!(backend.count(SoundEffect::Projectile), 2);
    }

    #[test]
    fn test_shot_into_formation_scores() {
        let backend = RecordingBackend::new();
        let mut state = new_game(backend.clone());
        state.camera.stage = IntroStage::FreeLook;
        state.enemies.reset_wave(true);
        let offset = state.enemies.group_position();
        for handle in state.enemies.active_handles() {
            let enemy = state.enemies.get_mut(handle).unwrap();
            enemy.position = enemy.target_position;
            enemy.set_position(offset);
        }

        // Line the left shot up with the front-left enemy
        state.ship.position = Vec3::new(-650.0 + PROJECTILE_SPREAD_X, -300.0, 0.0);
        state.ship.sensitivity = 0.0;
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        let hits = run_frames(&mut state, &fire, 40);

        assert!(hits >= ENEMY_HP as usize);
        assert!(state.score.value() >= u64::from(ENEMY_SCORE_VALUE));
        assert!(backend.count(SoundEffect::ExplosionLarge) >= 1);
    }

    struct BrokenBackend;

    struct BrokenSound;

    impl PlayableSound for BrokenSound {
        fn set_gain(&mut self, _gain: f32) {}
        fn set_pan(&mut self, _pan: Vec3) {}
        fn play(&mut self, looped: bool) -> Result<(), AudioError> {
            if looped {
                Ok(())
            } else {
                Err(AudioError::Unavailable)
            }
        }
    }

    impl AudioBackend for BrokenBackend {
        fn create_playable_instance(&self, _effect: SoundEffect) -> Box<dyn PlayableSound> {
            Box::new(BrokenSound)
        }
    }

    #[test]
    fn test_audio_failure_propagates() {
        let mut state =
            GameState::new(&Settings::default(), FaceAssets::placeholder(), Box::new(BrokenBackend))
                .unwrap();
        let fire = TickInput {
            fire: true,
            ..TickInput::default()
        };
        let err = tick(&mut state, &fire, FRAME_MS).unwrap_err();
        assert!(matches!(err, SimError::Audio(AudioError::Unavailable)));
    }
}
