//! Player projectiles
//!
//! Shots fly straight down the lane at constant speed, fade out over the last
//! stretch before the far bound and deactivate once they pass it. The
//! collection throttles firing against its own clock, which advances by the
//! `elapsed` passed to [`ProjectileCollection::update`].

use glam::Vec3;

use super::enemy::Enemy;
use crate::audio::{AudioError, AudioManager, SoundEffect};
use crate::consts::*;
use crate::scene::{LayerId, LayerKind, RenderGroup, RenderInstance};

/// Index of a projectile in its collection's storage, valid until the next update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle(pub usize);

/// A single shot
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    /// Units per ms; z only
    pub velocity: Vec3,
    pub active: bool,
    /// Damage dealt on hit
    pub strength: i32,
    pub opacity: f32,
}

impl Projectile {
    pub fn new(position: Vec3) -> Self {
        debug_assert!(crate::is_finite_vec3(position), "projectile at non-finite position");
        Self {
            position,
            velocity: Vec3::new(0.0, 0.0, PROJECTILE_SPEED_Z),
            active: true,
            strength: PROJECTILE_STRENGTH,
            opacity: 1.0,
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        if !self.active {
            return;
        }

        self.position.z += self.velocity.z * elapsed;

        // Fade over the last stretch before the far bound
        let horizon = PROJECTILE_BOUND_Z + PROJECTILE_HORIZON_DEPTH;
        if self.position.z < horizon {
            let horizon_fraction = (horizon - self.position.z) / PROJECTILE_HORIZON_DEPTH;
            self.opacity = (self.opacity * (1.0 - horizon_fraction)).max(0.0);
        }

        if self.position.z < PROJECTILE_BOUND_Z {
            self.active = false;
        }
    }

    pub fn collides_with(&self, target: &Enemy) -> bool {
        target.collides_with(self.position)
    }

    /// Spent on an enemy
    pub fn on_collision(&mut self) {
        self.active = false;
    }

    pub fn render_instance(&self) -> RenderInstance {
        RenderInstance {
            position: self.position,
            scale: Vec3::splat(PROJECTILE_SCALE),
            opacity: self.opacity,
            ..RenderInstance::default()
        }
    }
}

/// Live projectiles plus the fire-rate clock
#[derive(Debug, Clone, Default)]
pub struct ProjectileCollection {
    projectiles: Vec<Projectile>,
    /// Total time fed to `update` (ms)
    clock_ms: f64,
    last_fired_ms: Option<f64>,
    layer: Option<LayerId>,
}

impl ProjectileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to(&mut self, group: &mut impl RenderGroup) {
        self.layer = Some(group.attach_layer("projectiles", LayerKind::Sprites));
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.projectiles.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ProjectileHandle) -> Option<&mut Projectile> {
        self.projectiles.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Handles of every projectile still in flight, in firing order
    pub fn active_handles(&self) -> Vec<ProjectileHandle> {
        self.projectiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(i, _)| ProjectileHandle(i))
            .collect()
    }

    /// Fire a pair of shots either side of `origin` if the gun has cooled down.
    /// Returns whether anything was fired.
    pub fn create_projectile(&mut self, origin: Vec3, audio: &AudioManager) -> Result<bool, AudioError> {
        if let Some(last) = self.last_fired_ms {
            if self.clock_ms - last < FIRE_INTERVAL_MS {
                return Ok(false);
            }
        }

        let spread = Vec3::new(PROJECTILE_SPREAD_X, 0.0, 0.0);
        self.projectiles.push(Projectile::new(origin - spread));
        self.projectiles.push(Projectile::new(origin + spread));
        self.last_fired_ms = Some(self.clock_ms);

        audio.cue(SoundEffect::Projectile, origin)?;
        Ok(true)
    }

    pub fn update(&mut self, elapsed: f32) {
        self.clock_ms += f64::from(elapsed);
        for projectile in &mut self.projectiles {
            projectile.update(elapsed);
        }
        self.projectiles.retain(|p| p.active);
    }

    pub fn render(&self, group: &mut impl RenderGroup) {
        let Some(layer) = self.layer else { return };
        for projectile in self.projectiles.iter().filter(|p| p.active) {
            group.submit(layer, projectile.render_instance());
        }
    }
}
