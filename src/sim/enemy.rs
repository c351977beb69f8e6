//! A single enemy cube
//!
//! Enemies tween from a scatter position into their formation slot, roll back
//! and forth around their depth axis, and are destroyed once their hit points
//! run out. Destruction side effects (audio, explosion, score) are carried out
//! by the owning [`EnemyCollection`](super::enemies::EnemyCollection).

use glam::Vec3;
use image::RgbaImage;

use super::tween::tween_toward;
use crate::consts::*;
use crate::is_finite_vec3;
use crate::scene::{FaceTexture, RenderInstance};

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Bounds {
    /// Box centred on `center` with the given full extents
    pub fn around(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            top: center.y - half.y,
            bottom: center.y + half.y,
            near: center.z + half.z,
            far: center.z - half.z,
        }
    }

    /// Strict containment; points on a face are outside
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x > self.left
            && p.x < self.right
            && p.y > self.top
            && p.y < self.bottom
            && p.z > self.far
            && p.z < self.near
    }
}

/// Result of applying damage to an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Enemy was already destroyed; nothing happened
    Ignored,
    /// Enemy took damage and is still alive
    Damaged { hp: i32 },
    /// This hit destroyed the enemy
    Destroyed { position: Vec3 },
}

/// A single enemy cube
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Slot index within its rank
    pub id: usize,
    /// Local position inside the enemy group
    pub position: Vec3,
    /// Formation slot the enemy tweens toward
    pub target_position: Vec3,
    pub hp: i32,
    pub hp_total: i32,
    pub active: bool,
    pub size: Vec3,
    pub score_value: u32,
    /// Roll around the depth axis (radians)
    pub rotation: f32,
    pub target_rotation: f32,
    pub rotation_direction: i8,
    pub rotate_divisor: f32,
    /// Front face tint (0-255), drops with hp
    pub shade: f32,
    pub face_texture: FaceTexture,
    pub texture_revision: u32,
    face_image: RgbaImage,
    bounds: Bounds,
}

impl Enemy {
    pub fn new(
        id: usize,
        spawn_position: Vec3,
        target_position: Vec3,
        rotate_divisor: f32,
        face_image: RgbaImage,
    ) -> Self {
        assert!(
            is_finite_vec3(spawn_position) && is_finite_vec3(target_position),
            "enemy {id} spawned at non-finite position"
        );
        assert!(rotate_divisor > 0.0, "rotate divisor must be positive");

        Self {
            id,
            position: spawn_position,
            target_position,
            hp: ENEMY_HP,
            hp_total: ENEMY_HP,
            active: true,
            size: Vec3::new(ENEMY_WIDTH, ENEMY_HEIGHT, ENEMY_DEPTH),
            score_value: ENEMY_SCORE_VALUE,
            rotation: 0.0,
            target_rotation: ENEMY_ROLL_ANGLE,
            rotation_direction: 1,
            rotate_divisor,
            shade: 255.0,
            face_texture: FaceTexture::Hidden,
            texture_revision: 0,
            face_image,
            bounds: Bounds::default(),
        }
    }

    /// The enemy's own composited face image
    pub fn face_image(&self) -> &RgbaImage {
        &self.face_image
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Switch the front face texture and flag it for re-upload
    pub fn set_texture(&mut self, texture: FaceTexture) {
        self.face_texture = texture;
        self.mark_texture_dirty();
    }

    /// The shared texture content changed
    pub fn mark_texture_dirty(&mut self) {
        self.texture_revision = self.texture_revision.wrapping_add(1);
    }

    /// Recompute the world box from local position plus the group offset
    pub fn set_position(&mut self, parent_offset: Vec3) {
        debug_assert!(is_finite_vec3(parent_offset), "non-finite group offset");
        self.bounds = Bounds::around(self.position + parent_offset, self.size);
    }

    /// Center of the world box
    pub fn mid_position(&self) -> Vec3 {
        let b = &self.bounds;
        Vec3::new(
            b.left + self.size.x / 2.0,
            b.top + self.size.y / 2.0,
            b.far + self.size.z / 2.0,
        )
    }

    /// Point just in front of the near face, used for impact flashes
    pub fn front_position(&self) -> Vec3 {
        Vec3::new(self.bounds.left, self.bounds.top, self.bounds.near + 50.0)
    }

    pub fn collides_with(&self, point: Vec3) -> bool {
        self.bounds.contains(point)
    }

    /// Take damage; reports destruction exactly once
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        debug_assert!(amount >= 0, "negative damage {amount} on enemy {}", self.id);
        if !self.active {
            return DamageOutcome::Ignored;
        }

        self.hp = self.hp.saturating_sub(amount.max(0)).clamp(0, self.hp_total);
        self.shade = 255.0 * (self.hp as f32 / self.hp_total as f32);

        if self.hp == 0 {
            self.active = false;
            let position = self.mid_position();
            log::debug!("enemy {} destroyed at {:?}", self.id, position);
            DamageOutcome::Destroyed { position }
        } else {
            DamageOutcome::Damaged { hp: self.hp }
        }
    }

    pub fn update(&mut self, _elapsed: f32) {
        if !self.active {
            return;
        }

        tween_toward(&mut self.position, self.target_position, ENEMY_TWEEN_DIVISOR);
        self.roll();
    }

    /// Ease toward the roll target and bounce between +/- target
    fn roll(&mut self) {
        self.rotation += (self.target_rotation - self.rotation) / self.rotate_divisor;

        if self.rotation_direction == -1 && self.rotation < self.target_rotation + 0.001 {
            self.rotation = self.target_rotation - 0.01;
            self.target_rotation = -self.target_rotation;
            self.rotation_direction = 1;
        } else if self.rotation_direction == 1 && self.rotation > self.target_rotation - 0.001 {
            self.rotation = self.target_rotation + 0.01;
            self.target_rotation = -self.target_rotation;
            self.rotation_direction = -1;
        }
    }

    pub fn render_instance(&self, parent_offset: Vec3) -> RenderInstance {
        RenderInstance {
            position: self.position + parent_offset,
            rotation: Vec3::new(0.0, 0.0, self.rotation),
            shade: self.shade,
            face: Some(self.face_texture),
            texture_revision: self.texture_revision,
            ..RenderInstance::default()
        }
    }
}
