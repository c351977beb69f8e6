//! Facewave - a lane shooter against waves of face cubes
//!
//! Core modules:
//! - `sim`: Frame simulation (enemy waves, projectiles, explosions, collisions, camera)
//! - `audio`: Spatial audio cue capability and mixer
//! - `faces`: Face image sets and texture compositing
//! - `video`: Live video feed notifications
//! - `scene`: Render instances handed to the rendering backend
//! - `score`: Score sink
//! - `settings`: Player/config settings

pub mod audio;
pub mod faces;
pub mod scene;
pub mod score;
pub mod settings;
pub mod sim;
pub mod video;

pub use score::{Score, ScoreSink};
pub use settings::{ConfigError, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Tween snaps to its target once an axis is within this distance
    pub const TWEEN_SNAP_DISTANCE: f32 = 10.0;
    /// Tween divisor for enemies settling into formation
    pub const ENEMY_TWEEN_DIVISOR: f32 = 7.0;
    /// Tween divisor for the intro camera sweep
    pub const CAMERA_TWEEN_DIVISOR: f32 = 30.0;

    /// Enemy cube extents
    pub const ENEMY_WIDTH: f32 = 300.0;
    pub const ENEMY_HEIGHT: f32 = 300.0;
    pub const ENEMY_DEPTH: f32 = 300.0;
    pub const ENEMY_HP: i32 = 3;
    pub const ENEMY_SCORE_VALUE: u32 = 100;
    /// Rotation target an enemy starts rolling toward (radians)
    pub const ENEMY_ROLL_ANGLE: f32 = 0.1;

    /// Wave formation
    pub const WAVE_RANKS: usize = 3;
    pub const WAVE_COLUMNS: usize = 3;
    pub const WAVE_ROWS: usize = 2;
    pub const WAVE_COLUMN_MARGIN: f32 = 400.0;
    pub const WAVE_ROW_MARGIN: f32 = 250.0;
    pub const WAVE_RANK_STEP_Z: f32 = -750.0;
    /// Group position every wave starts from
    pub const WAVE_START_Z: f32 = -900.0;
    /// Sideways drift speed added on every new wave (units/ms)
    pub const WAVE_DRIFT_ACCEL: f32 = 0.1;
    /// Initial forward step per edge bounce
    pub const WAVE_START_STEP_Z: f32 = 10.0;
    pub const GROUP_BOUND_X: f32 = 150.0;
    pub const GROUP_BOUND_Z: f32 = 1600.0;

    /// Face texture buffer edge (pixels)
    pub const FACE_TEXTURE_SIZE: u32 = 128;

    /// Projectiles
    pub const PROJECTILE_SPEED_Z: f32 = -2.0;
    pub const PROJECTILE_BOUND_Z: f32 = -3500.0;
    pub const PROJECTILE_HORIZON_DEPTH: f32 = 2000.0;
    pub const PROJECTILE_SPREAD_X: f32 = 140.0;
    pub const PROJECTILE_SCALE: f32 = 1.5;
    pub const PROJECTILE_STRENGTH: i32 = 1;
    /// Minimum time between two shots (ms)
    pub const FIRE_INTERVAL_MS: f64 = 100.0;

    /// Explosions
    pub const EXPLOSION_POOL_SIZE: usize = 10;
    pub const EXPLOSION_FRAME_MS: f32 = 30.0;
    pub const EXPLOSION_FRAMES_X: u32 = 5;
    pub const EXPLOSION_FRAMES_Y: u32 = 5;
    pub const EXPLOSION_SMALL_SCALE: f32 = 2.0;
    pub const EXPLOSION_LARGE_SCALE: f32 = 4.5;
    pub const EXPLOSION_OPACITY: f32 = 0.9;

    /// Camera
    pub const CAMERA_BOUND: f32 = 2800.0;
    pub const CAMERA_HOLD_MS: f32 = 1000.0;
    pub const CAMERA_REVEAL_DELAY_MS: f32 = 100.0;

    /// Ship
    pub const SHIP_START_Y: f32 = -250.0;
    pub const SHIP_BOUND: f32 = 700.0;
    pub const SHIP_BANK_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    /// Positional audio half-extent per axis
    pub const AUDIO_WORLD_EXTENT: f32 = 500.0;

    /// Live video frame interval (ms)
    pub const VIDEO_FRAME_MS: f32 = 100.0;
}

/// Whether every component of a vector is finite
#[inline]
pub fn is_finite_vec3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Map a world position to an audio pan (each axis divided by the world half-extent)
#[inline]
pub fn pan_for_position(position: Vec3) -> Vec3 {
    position / consts::AUDIO_WORLD_EXTENT
}
