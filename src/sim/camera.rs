//! Scripted intro camera and free look
//!
//! The camera opens high above the lane looking down, spawns the first wave,
//! sweeps down behind the ship, reveals the enemy faces and then hands control
//! to the player. Each stage is a variant of [`IntroStage`] with its own
//! handler; [`Camera::update`] is the only place that dispatches on it.

use glam::{Mat4, Vec3};

use super::enemies::EnemyCollection;
use super::tick::TickInput;
use super::tween::{tween_axis, tween_toward};
use crate::consts::*;

/// Steps of the intro sequence, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroStage {
    /// Place the camera overhead
    Establish,
    /// Wait, then spawn the first wave with hidden faces
    HoldOverhead,
    /// Wait, then aim the sweep
    HoldBeforeSweep,
    /// Tween down behind the ship
    Sweep,
    /// Wait briefly, then show enemy faces
    RevealFaces,
    /// Player-controlled; terminal
    FreeLook,
}

impl IntroStage {
    fn next(self) -> Self {
        match self {
            Self::Establish => Self::HoldOverhead,
            Self::HoldOverhead => Self::HoldBeforeSweep,
            Self::HoldBeforeSweep => Self::Sweep,
            Self::Sweep => Self::RevealFaces,
            Self::RevealFaces | Self::FreeLook => Self::FreeLook,
        }
    }

    /// Player input moves the camera from this stage on
    pub fn accepts_input(self) -> bool {
        self >= Self::RevealFaces
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub stage: IntroStage,
    /// Time spent in the current stage (ms)
    pub elapsed_in_stage: f32,
    pub position: Vec3,
    pub look_at: Vec3,
    pub target_position: Vec3,
    pub target_look_at: Vec3,
    pub up: Vec3,
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Camera {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            stage: IntroStage::Establish,
            elapsed_in_stage: 0.0,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
            target_position: Vec3::ZERO,
            target_look_at: Vec3::ZERO,
            up: Vec3::Y,
            sensitivity,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        log::info!("camera intro: {:?} -> {:?}", self.stage, next);
        self.stage = next;
        self.elapsed_in_stage = 0.0;
    }

    pub fn update(&mut self, elapsed: f32, input: &TickInput, enemies: &mut EnemyCollection) {
        self.elapsed_in_stage += elapsed;

        match self.stage {
            IntroStage::Establish => self.establish(),
            IntroStage::HoldOverhead => self.hold_overhead(enemies),
            IntroStage::HoldBeforeSweep => self.hold_before_sweep(),
            IntroStage::Sweep => self.sweep(),
            IntroStage::RevealFaces => self.reveal_faces(enemies),
            IntroStage::FreeLook => {}
        }

        if self.stage.accepts_input() {
            self.free_look(input);
        }
    }

    fn establish(&mut self) {
        self.position = Vec3::new(0.0, 4000.0, -500.0);
        self.up = Vec3::NEG_Z;
        self.look_at = Vec3::new(0.0, 0.0, -1000.0);
        self.advance();
    }

    fn hold_overhead(&mut self, enemies: &mut EnemyCollection) {
        if self.elapsed_in_stage > CAMERA_HOLD_MS {
            enemies.reset_wave(false);
            self.advance();
        }
    }

    fn hold_before_sweep(&mut self) {
        if self.elapsed_in_stage > CAMERA_HOLD_MS {
            self.target_position = Vec3::new(0.0, 0.0, 1500.0);
            self.target_look_at = Vec3::ZERO;
            self.advance();
        }
    }

    /// Only the look-at depth is tweened; its x/y already match
    fn sweep(&mut self) {
        let position_at_rest = tween_toward(&mut self.position, self.target_position, CAMERA_TWEEN_DIVISOR);
        let look_at_rest = tween_axis(&mut self.look_at.z, self.target_look_at.z, CAMERA_TWEEN_DIVISOR);
        self.up = Vec3::Y;

        if position_at_rest && look_at_rest {
            self.advance();
        }
    }

    fn reveal_faces(&mut self, enemies: &mut EnemyCollection) {
        if self.elapsed_in_stage > CAMERA_REVEAL_DELAY_MS {
            enemies.apply_texture();
            self.advance();
        }
    }

    fn free_look(&mut self, input: &TickInput) {
        self.position.x -= (input.camera_cumulative_vx + input.camera_vx) * self.sensitivity;
        self.position.y += (input.camera_cumulative_vy + input.camera_vy) * self.sensitivity;
        self.position.x = self.position.x.clamp(-CAMERA_BOUND, CAMERA_BOUND);
        self.position.y = self.position.y.clamp(-CAMERA_BOUND, CAMERA_BOUND);
        self.up = Vec3::Y;
    }
}
