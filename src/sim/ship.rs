//! The player's ship
//!
//! Moves in the plane in front of the camera, banks into its motion, fires
//! through the projectile collection and carries a looping engine sound that
//! follows it around.

use glam::Vec3;

use super::projectile::ProjectileCollection;
use super::tick::TickInput;
use crate::audio::{AudioError, AudioManager, PlayableSound, SoundEffect};
use crate::consts::*;

pub struct Ship {
    pub position: Vec3,
    /// Pitch (x) and bank (z), radians
    pub rotation: Vec3,
    pub target_rotation: Vec3,
    pub sensitivity: f32,
    engine: Box<dyn PlayableSound>,
}

impl Ship {
    /// Place the ship and start its engine loop
    pub fn new(audio: &AudioManager, sensitivity: f32) -> Result<Self, AudioError> {
        let position = Vec3::new(0.0, SHIP_START_Y, 0.0);
        let engine = audio.start_loop(SoundEffect::ShipAmbient, position)?;
        Ok(Self {
            position,
            rotation: Vec3::ZERO,
            target_rotation: Vec3::ZERO,
            sensitivity,
            engine,
        })
    }

    /// Returns whether a shot was fired this frame
    pub fn update(
        &mut self,
        input: &TickInput,
        projectiles: &mut ProjectileCollection,
        audio: &AudioManager,
    ) -> Result<bool, AudioError> {
        let fired = if input.fire {
            projectiles.create_projectile(self.position, audio)?
        } else {
            false
        };

        self.position.x += input.ship_vx * self.sensitivity;
        self.position.y -= input.ship_vy * self.sensitivity;
        self.target_rotation.z = bank_toward(input.ship_vx);
        self.target_rotation.x = -bank_toward(input.ship_vy);

        self.rotation.x += (self.target_rotation.x - self.rotation.x) / 2.0;
        self.rotation.z += (self.target_rotation.z - self.rotation.z) / 2.0;

        self.position.x = self.position.x.clamp(-SHIP_BOUND, SHIP_BOUND);
        self.position.y = self.position.y.clamp(-SHIP_BOUND, SHIP_BOUND);

        self.engine.set_pan_by_position(self.position);
        Ok(fired)
    }
}

/// Bank angle for a stick value: sign only, zero when centred
fn bank_toward(v: f32) -> f32 {
    if v > 0.0 {
        SHIP_BANK_ANGLE
    } else if v < 0.0 {
        -SHIP_BANK_ANGLE
    } else {
        0.0
    }
}
