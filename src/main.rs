//! Facewave entry point
//!
//! Headless runner: plays a scripted session against placeholder faces with a
//! recording audio backend and logs how it went. Pass a settings JSON path as
//! the first argument; the optional second argument is the session length in
//! seconds.

use std::process::ExitCode;

use facewave::Settings;
use facewave::audio::{RecordingBackend, SoundEffect};
use facewave::faces::FaceAssets;
use facewave::scene::RenderBuffer;
use facewave::sim::{GameState, IntroStage, TickInput, tick};

/// Simulation frame length (ms)
const FRAME_MS: f32 = 1000.0 / 60.0;
const DEFAULT_SESSION_SECS: f32 = 30.0;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let session_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_SESSION_SECS);

    log::info!("Facewave (headless) starting, {session_secs}s session");

    let backend = RecordingBackend::new();
    let mut state = match GameState::new(&settings, FaceAssets::placeholder(), Box::new(backend.clone())) {
        Ok(state) => state,
        Err(err) => {
            log::error!("could not start game: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut buffer = RenderBuffer::new();
    state.add_to(&mut buffer);

    let frames = (session_secs * 1000.0 / FRAME_MS) as u64;
    let mut last_wave = 0;
    let mut hits = 0;
    for _ in 0..frames {
        let input = scripted_input(&state);
        match tick(&mut state, &input, FRAME_MS) {
            Ok(n) => hits += n,
            Err(err) => {
                log::error!("frame {} failed: {err}", state.frame);
                return ExitCode::FAILURE;
            }
        }

        buffer.clear();
        state.render(&mut buffer);

        if state.enemies.wave() != last_wave {
            last_wave = state.enemies.wave();
            log::info!("t={:.1}s wave {} score {}", state.time_ms / 1000.0, last_wave, state.score.value());
        }
    }

    log::info!(
        "session over after {} frames: score {}, {} hits, {} shots, {} kills, {} instances on screen",
        state.frame,
        state.score.value(),
        hits,
        backend.count(SoundEffect::Projectile),
        backend.count(SoundEffect::ExplosionLarge),
        buffer.instance_count()
    );
    ExitCode::SUCCESS
}

/// Once the intro is over, hold fire and sweep the ship across the formation
fn scripted_input(state: &GameState) -> TickInput {
    if state.camera.stage != IntroStage::FreeLook {
        return TickInput::default();
    }
    let t = (state.time_ms / 1000.0) as f32;
    TickInput {
        fire: true,
        ship_vx: (t * 0.8).sin(),
        ship_vy: (t * 0.5).cos() * 0.5,
        ..TickInput::default()
    }
}
