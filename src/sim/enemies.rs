//! The active enemy wave
//!
//! An [`EnemyCollection`] owns every live [`Enemy`], lays out new waves,
//! drifts the whole formation sideways (stepping it in depth on every edge
//! bounce), switches face textures between static images and the live video
//! feed, and spawns the next wave as soon as the current one is cleared.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::enemy::{DamageOutcome, Enemy};
use super::explosion::ExplosionCollection;
use crate::audio::{AudioError, AudioManager, SoundEffect};
use crate::consts::*;
use crate::faces::{FaceAssets, composite_layers};
use crate::scene::{FaceTexture, LayerId, LayerKind, RenderGroup};
use crate::score::ScoreSink;
use crate::video::{VideoEvent, VideoEvents};

/// Index of an enemy in its collection's storage, valid until the next update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyHandle(pub usize);

/// Collaborators an enemy hit may need
pub struct HitContext<'a> {
    pub explosions: &'a mut ExplosionCollection,
    pub audio: &'a AudioManager,
    pub score: &'a mut dyn ScoreSink,
}

/// Owns the current wave of enemies
pub struct EnemyCollection {
    enemies: Vec<Enemy>,
    group_position: Vec3,
    /// Sideways drift (x, units/ms) and depth step per edge bounce (z)
    group_velocity: Vec3,
    face_set_index: usize,
    assets: FaceAssets,
    rng: Pcg32,
    video: Option<VideoEvents>,
    video_enabled: bool,
    /// No automatic wave until `reset_wave` is called
    waves_held: bool,
    wave: u32,
    layer: Option<LayerId>,
}

impl EnemyCollection {
    pub fn new(assets: FaceAssets, seed: u64) -> Self {
        Self {
            enemies: Vec::with_capacity(WAVE_RANKS * WAVE_COLUMNS * WAVE_ROWS),
            group_position: Vec3::ZERO,
            group_velocity: Vec3::new(0.0, 0.0, WAVE_START_STEP_Z),
            face_set_index: 1,
            assets,
            rng: Pcg32::seed_from_u64(seed),
            video: None,
            video_enabled: false,
            waves_held: false,
            wave: 0,
            layer: None,
        }
    }

    /// Receive video enable/disable/frame notifications from this channel
    pub fn with_video(mut self, events: VideoEvents) -> Self {
        self.video = Some(events);
        self
    }

    /// Keep the lane empty until something calls [`reset_wave`](Self::reset_wave)
    pub fn hold_waves(&mut self) {
        self.waves_held = true;
    }

    pub fn add_to(&mut self, group: &mut impl RenderGroup) {
        self.layer = Some(group.attach_layer("enemies", LayerKind::Cubes));
    }

    // === Accessors ===

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn get(&self, handle: EnemyHandle) -> Option<&Enemy> {
        self.enemies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: EnemyHandle) -> Option<&mut Enemy> {
        self.enemies.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Handles of every enemy still alive, in spawn order
    pub fn active_handles(&self) -> Vec<EnemyHandle> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, _)| EnemyHandle(i))
            .collect()
    }

    pub fn group_position(&self) -> Vec3 {
        self.group_position
    }

    pub fn group_velocity(&self) -> Vec3 {
        self.group_velocity
    }

    pub fn face_set_index(&self) -> usize {
        self.face_set_index
    }

    pub fn video_enabled(&self) -> bool {
        self.video_enabled
    }

    /// Number of waves spawned so far
    pub fn wave(&self) -> u32 {
        self.wave
    }

    // === Waves ===

    /// Replace the lane with a fresh wave using the next face set
    pub fn reset_wave(&mut self, apply_texture_now: bool) {
        self.waves_held = false;
        self.next_face_set();
        self.group_position = Vec3::new(0.0, 0.0, WAVE_START_Z);

        self.enemies.clear();
        for rank in 0..WAVE_RANKS {
            self.create_rank(rank);
        }
        self.set_position();

        if apply_texture_now {
            self.apply_texture();
        }

        // Each wave drifts a little faster, keeping its current direction
        let vx = self.group_velocity.x;
        self.group_velocity.x = vx.signum() * (vx.abs() + WAVE_DRIFT_ACCEL);

        self.wave += 1;
        log::info!(
            "wave {} spawned: {} enemies, face set {}",
            self.wave,
            self.enemies.len(),
            self.face_set_index
        );
    }

    /// Step to the next face set, wrapping past the end to 1 (0 is reserved)
    fn next_face_set(&mut self) {
        self.face_set_index += 1;
        if self.face_set_index >= self.assets.sets.len() {
            self.face_set_index = 1;
        }
    }

    fn create_rank(&mut self, rank: usize) {
        let columns = WAVE_COLUMNS as f32;
        let rows = WAVE_ROWS as f32;
        let total_width = ENEMY_WIDTH * columns + WAVE_COLUMN_MARGIN * (columns - 2.0);
        let total_height = ENEMY_HEIGHT * rows + WAVE_ROW_MARGIN * (rows - 2.0);

        let x_offset = -total_width / 2.0;
        let y_offset = -total_height / 2.0;
        let z = WAVE_RANK_STEP_Z * rank as f32;
        let rotate_divisor = 10.0 / (rank as f32 + 1.0);

        let set = &self.assets.sets[self.face_set_index];
        for i in 0..WAVE_COLUMNS * WAVE_ROWS {
            let column = (i % WAVE_COLUMNS) as f32;
            let row = (i / WAVE_COLUMNS) as f32;
            let slot = Vec3::new(
                x_offset + column * (ENEMY_WIDTH + WAVE_COLUMN_MARGIN),
                y_offset + row * (ENEMY_HEIGHT + WAVE_ROW_MARGIN),
                z,
            );

            let face = &set.faces[self.rng.random_range(0..set.faces.len())];
            let image = composite_layers(
                &[&self.assets.back, face, &self.assets.fore],
                FACE_TEXTURE_SIZE,
            );

            // Fly in from somewhere far off
            let scatter = Vec3::new(
                self.rng.random_range(-2500.0..2500.0),
                self.rng.random_range(-2500.0..2500.0),
                self.rng.random_range(-51_000.0..-1000.0),
            );

            self.enemies
                .push(Enemy::new(i, slot + scatter, slot, rotate_divisor, image));
        }
    }

    // === Textures ===

    /// Show either the live feed or each enemy's own face on every live enemy
    pub fn apply_texture(&mut self) {
        let texture = if self.video_enabled {
            FaceTexture::LiveFeed
        } else {
            FaceTexture::Static
        };
        for enemy in &mut self.enemies {
            enemy.set_texture(texture);
        }
    }

    pub fn set_video_enabled(&mut self, enabled: bool) {
        self.video_enabled = enabled;
        log::debug!("enemy faces use {}", if enabled { "live video" } else { "static images" });
        self.apply_texture();
    }

    fn poll_video(&mut self) {
        let Some(video) = &self.video else { return };
        for event in video.drain() {
            match event {
                VideoEvent::Enabled => self.set_video_enabled(true),
                VideoEvent::Disabled => self.set_video_enabled(false),
                VideoEvent::FrameUpdated => {
                    for enemy in &mut self.enemies {
                        enemy.mark_texture_dirty();
                    }
                }
            }
        }
    }

    // === Motion ===

    /// Clamp the drift and refresh every enemy's world box
    fn set_position(&mut self) {
        if self.group_position.x > GROUP_BOUND_X {
            self.group_position.x = GROUP_BOUND_X;
            self.hit_edge_x();
        } else if self.group_position.x < -GROUP_BOUND_X {
            self.group_position.x = -GROUP_BOUND_X;
            self.hit_edge_x();
        }

        for enemy in &mut self.enemies {
            enemy.set_position(self.group_position);
        }
    }

    fn hit_edge_x(&mut self) {
        self.group_velocity.x = -self.group_velocity.x;

        let step = self.group_velocity.z;
        let mut hit_edge_z = false;
        for enemy in &mut self.enemies {
            enemy.target_position.z += step;
            if (enemy.target_position.z >= GROUP_BOUND_Z && step > 0.0)
                || (enemy.target_position.z <= -GROUP_BOUND_Z && step < 0.0)
            {
                hit_edge_z = true;
            }
        }

        if hit_edge_z {
            self.group_velocity.z = -self.group_velocity.z;
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.poll_video();

        self.group_position.x += self.group_velocity.x * elapsed;
        for enemy in &mut self.enemies {
            enemy.update(elapsed);
        }
        self.set_position();

        let before = self.enemies.len();
        self.enemies.retain(|e| e.active);
        if before != self.enemies.len() {
            log::debug!("{} enemies left", self.enemies.len());
        }

        if self.enemies.is_empty() && !self.waves_held {
            self.reset_wave(true);
        }
    }

    // === Collisions ===

    /// A projectile struck `handle`: impact flash, damage, and destruction effects
    pub fn hit(
        &mut self,
        handle: EnemyHandle,
        projectile_position: Vec3,
        strength: i32,
        ctx: &mut HitContext<'_>,
    ) -> Result<DamageOutcome, AudioError> {
        let Some(enemy) = self.enemies.get_mut(handle.0) else {
            debug_assert!(false, "hit on stale enemy handle {:?}", handle);
            return Ok(DamageOutcome::Ignored);
        };
        if !enemy.active {
            return Ok(DamageOutcome::Ignored);
        }

        let outcome = enemy.apply_damage(strength);
        let score_value = enemy.score_value;
        let mut flash = enemy.front_position();
        flash.x = projectile_position.x;
        flash.y = projectile_position.y;

        // Credit and effects land before any cue can fail
        if let DamageOutcome::Destroyed { position } = outcome {
            ctx.score.increment(score_value);
            ctx.explosions.create_large_explosion(position, ctx.audio)?;
            ctx.audio.cue(SoundEffect::ExplosionLarge, position)?;
        }
        ctx.explosions.create_small_explosion(flash, ctx.audio)?;

        Ok(outcome)
    }

    pub fn render(&self, group: &mut impl RenderGroup) {
        let Some(layer) = self.layer else { return };
        for enemy in self.enemies.iter().filter(|e| e.active) {
            group.submit(layer, enemy.render_instance(self.group_position));
        }
    }
}
