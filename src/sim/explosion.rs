//! Sprite-sheet explosions
//!
//! Explosions come from a fixed pool of [`EXPLOSION_POOL_SIZE`] sprites reused
//! round-robin. A new explosion always takes the next slot, even if that slot
//! is still playing, so at most ten explosions are ever visible.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{AudioError, AudioManager, SoundEffect};
use crate::consts::*;
use crate::scene::{LayerId, LayerKind, RenderGroup, RenderInstance};

/// One animated explosion sprite
#[derive(Debug, Clone)]
pub struct Explosion {
    pub frame_x: u32,
    pub frame_y: u32,
    /// Time accumulated toward the next frame (ms)
    pub elapsed: f32,
    pub active: bool,
    pub position: Vec3,
    pub scale: f32,
    /// Sprite rotation, fixed per pool slot
    pub rotation: f32,
}

impl Explosion {
    pub fn new(rotation: f32) -> Self {
        Self {
            frame_x: 0,
            frame_y: 0,
            elapsed: 0.0,
            active: false,
            position: Vec3::ZERO,
            scale: 1.0,
            rotation,
        }
    }

    /// Restart the animation from the first cell
    pub fn init(&mut self, position: Vec3, scale: f32) {
        debug_assert!(crate::is_finite_vec3(position), "explosion at non-finite position");
        self.elapsed = 0.0;
        self.frame_x = 0;
        self.frame_y = 0;
        self.active = true;
        self.position = position;
        self.scale = scale;
    }

    /// Advance one cell: along the row, then down to the next row
    fn next_frame(&mut self) {
        self.frame_x += 1;
        if self.frame_x >= EXPLOSION_FRAMES_X {
            self.frame_x = 0;
            self.frame_y += 1;
        }
        if self.frame_y >= EXPLOSION_FRAMES_Y {
            self.active = false;
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        if !self.active {
            return;
        }
        self.elapsed += elapsed;
        if self.elapsed >= EXPLOSION_FRAME_MS {
            self.elapsed -= EXPLOSION_FRAME_MS;
            self.next_frame();
        }
    }

    /// Sprite-sheet cell offset for the current frame
    pub fn uv_offset(&self) -> Vec2 {
        Vec2::new(
            self.frame_x as f32 / EXPLOSION_FRAMES_X as f32,
            self.frame_y as f32 / EXPLOSION_FRAMES_Y as f32,
        )
    }

    pub fn uv_scale() -> Vec2 {
        Vec2::new(
            1.0 / EXPLOSION_FRAMES_X as f32,
            1.0 / EXPLOSION_FRAMES_Y as f32,
        )
    }

    pub fn render_instance(&self) -> RenderInstance {
        RenderInstance {
            position: self.position,
            rotation: Vec3::new(0.0, 0.0, self.rotation),
            scale: Vec3::new(self.scale, self.scale, 1.0),
            opacity: EXPLOSION_OPACITY,
            uv_offset: self.uv_offset(),
            uv_scale: Self::uv_scale(),
            ..RenderInstance::default()
        }
    }
}

/// Fixed pool of reusable explosions
#[derive(Debug, Clone)]
pub struct ExplosionCollection {
    pool: Vec<Explosion>,
    /// Slots currently in the render group
    attached: [bool; EXPLOSION_POOL_SIZE],
    next_slot: usize,
    layer: Option<LayerId>,
}

impl ExplosionCollection {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = (0..EXPLOSION_POOL_SIZE)
            .map(|_| Explosion::new(rng.random_range(0.0..std::f32::consts::TAU)))
            .collect();
        Self {
            pool,
            attached: [false; EXPLOSION_POOL_SIZE],
            next_slot: 0,
            layer: None,
        }
    }

    pub fn add_to(&mut self, group: &mut impl RenderGroup) {
        self.layer = Some(group.attach_layer("explosions", LayerKind::SpriteSheets));
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Slot the next explosion will take
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    pub fn slot(&self, index: usize) -> &Explosion {
        &self.pool[index]
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached[index]
    }

    /// Explosions currently playing in the render group
    pub fn active_count(&self) -> usize {
        self.attached.iter().filter(|a| **a).count()
    }

    pub fn create_small_explosion(
        &mut self,
        position: Vec3,
        audio: &AudioManager,
    ) -> Result<usize, AudioError> {
        self.create_explosion(position, EXPLOSION_SMALL_SCALE, audio)
    }

    pub fn create_large_explosion(
        &mut self,
        position: Vec3,
        audio: &AudioManager,
    ) -> Result<usize, AudioError> {
        self.create_explosion(position, EXPLOSION_LARGE_SCALE, audio)
    }

    /// Restart the next pool slot at `position`; returns the slot used
    fn create_explosion(
        &mut self,
        position: Vec3,
        scale: f32,
        audio: &AudioManager,
    ) -> Result<usize, AudioError> {
        let slot = self.next_slot;
        self.pool[slot].init(position, scale);
        self.attached[slot] = true;
        self.next_slot = (self.next_slot + 1) % EXPLOSION_POOL_SIZE;

        audio.cue(SoundEffect::ExplosionSmall, position)?;
        Ok(slot)
    }

    pub fn update(&mut self, elapsed: f32) {
        for (explosion, attached) in self.pool.iter_mut().zip(self.attached.iter_mut()) {
            if !*attached {
                continue;
            }
            explosion.update(elapsed);
            if !explosion.active {
                *attached = false;
            }
        }
    }

    pub fn render(&self, group: &mut impl RenderGroup) {
        let Some(layer) = self.layer else { return };
        for (explosion, attached) in self.pool.iter().zip(self.attached.iter()) {
            if *attached {
                group.submit(layer, explosion.render_instance());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBackend;
    use proptest::prelude::*;

    #[test]
    fn test_frames_advance_along_rows_then_finish() {
        let mut explosion = Explosion::new(0.0);
        explosion.init(Vec3::ZERO, 2.0);

        explosion.update(29.0);
        assert_eq!((explosion.frame_x, explosion.frame_y), (0, 0));
        // Exactly one frame interval is enough
        explosion.update(1.0);
        assert_eq!((explosion.frame_x, explosion.frame_y), (1, 0));

        for _ in 0..4 {
            explosion.update(30.0);
        }
        assert_eq!((explosion.frame_x, explosion.frame_y), (0, 1));
        assert_eq!(explosion.uv_offset(), Vec2::new(0.0, 0.2));

        // 25 cells in total; the 25th advance runs off the sheet
        for _ in 0..19 {
            explosion.update(30.0);
        }
        assert!(explosion.active);
        assert_eq!((explosion.frame_x, explosion.frame_y), (4, 4));
        explosion.update(30.0);
        assert!(!explosion.active);

        // Does not loop
        explosion.update(300.0);
        assert!(!explosion.active);
    }

    #[test]
    fn test_small_and_large_scales_and_audio() {
        let backend = RecordingBackend::new();
        let audio = AudioManager::new(Box::new(backend.clone()));
        let mut explosions = ExplosionCollection::new(1);

        let small = explosions.create_small_explosion(Vec3::X, &audio).unwrap();
        let large = explosions.create_large_explosion(Vec3::Y, &audio).unwrap();
        assert_eq!(explosions.slot(small).scale, EXPLOSION_SMALL_SCALE);
        assert_eq!(explosions.slot(large).scale, EXPLOSION_LARGE_SCALE);
        assert_eq!(backend.count(SoundEffect::ExplosionSmall), 2);
        assert_eq!(explosions.active_count(), 2);
    }

    #[test]
    fn test_reuse_truncates_playing_slot() {
        let audio = AudioManager::silent();
        let mut explosions = ExplosionCollection::new(1);
        for _ in 0..EXPLOSION_POOL_SIZE {
            explosions.create_small_explosion(Vec3::ZERO, &audio).unwrap();
        }
        explosions.update(30.0);
        assert_eq!(explosions.slot(0).frame_x, 1);

        let slot = explosions
            .create_large_explosion(Vec3::new(5.0, 5.0, 5.0), &audio)
            .unwrap();
        assert_eq!(slot, 0);
        assert_eq!(explosions.slot(0).frame_x, 0);
        assert_eq!(explosions.slot(0).position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(explosions.pool_size(), EXPLOSION_POOL_SIZE);
    }

    #[test]
    fn test_finished_explosions_leave_render_group() {
        let audio = AudioManager::silent();
        let mut explosions = ExplosionCollection::new(1);
        explosions.create_small_explosion(Vec3::ZERO, &audio).unwrap();
        for _ in 0..25 {
            explosions.update(30.0);
        }
        assert_eq!(explosions.active_count(), 0);
        assert!(!explosions.is_attached(0));
        assert_eq!(explosions.pool_size(), EXPLOSION_POOL_SIZE);
    }

    proptest! {
        #[test]
        fn prop_nth_creation_reuses_slot_mod_pool(creations in 1usize..60, step in 0.0f32..200.0) {
            let audio = AudioManager::silent();
            let mut explosions = ExplosionCollection::new(7);
            for n in 0..creations {
                let slot = explosions.create_small_explosion(Vec3::ZERO, &audio).unwrap();
                prop_assert_eq!(slot, n % EXPLOSION_POOL_SIZE);
                explosions.update(step);
                prop_assert_eq!(explosions.pool_size(), EXPLOSION_POOL_SIZE);
            }
        }
    }
}
