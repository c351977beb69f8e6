//! Game state
//!
//! Everything one running game owns: the camera, the ship, the three entity
//! collections, score, audio and the video feed.

use crate::audio::{AudioBackend, AudioManager};
use crate::faces::FaceAssets;
use crate::scene::RenderGroup;
use crate::score::Score;
use crate::settings::Settings;
use crate::video::{self, VideoFeed};

use super::camera::Camera;
use super::collision::CollisionResolver;
use super::enemies::EnemyCollection;
use super::explosion::ExplosionCollection;
use super::projectile::ProjectileCollection;
use super::ship::Ship;
use super::tick::SimError;

/// Complete game state
pub struct GameState {
    pub camera: Camera,
    pub ship: Ship,
    pub enemies: EnemyCollection,
    pub projectiles: ProjectileCollection,
    pub explosions: ExplosionCollection,
    pub resolver: CollisionResolver,
    pub score: Score,
    pub audio: AudioManager,
    /// Sending side of the enemy face video channel
    pub video: VideoFeed,
    /// Total simulated time (ms)
    pub time_ms: f64,
    /// Frames simulated so far
    pub frame: u64,
}

impl GameState {
    /// Create a new game. The first wave is spawned by the camera intro.
    pub fn new(
        settings: &Settings,
        assets: FaceAssets,
        backend: Box<dyn AudioBackend>,
    ) -> Result<Self, SimError> {
        let audio = AudioManager::with_settings(backend, settings);
        let (mut video, video_events) = video::channel();

        let mut enemies = EnemyCollection::new(assets, settings.seed).with_video(video_events);
        enemies.hold_waves();

        if settings.video_enabled {
            video.enable();
        }

        let ship = Ship::new(&audio, settings.ship_sensitivity)?;
        log::info!("new game, seed {:#x}", settings.seed);

        Ok(Self {
            camera: Camera::new(settings.camera_sensitivity),
            ship,
            enemies,
            projectiles: ProjectileCollection::new(),
            explosions: ExplosionCollection::new(settings.seed.wrapping_add(1)),
            resolver: CollisionResolver::new(),
            score: Score::new(),
            audio,
            video,
            time_ms: 0.0,
            frame: 0,
        })
    }

    /// Register every collection's layer with the render group
    pub fn add_to(&mut self, group: &mut impl RenderGroup) {
        self.enemies.add_to(group);
        self.projectiles.add_to(group);
        self.explosions.add_to(group);
    }

    /// Submit this frame's instances
    pub fn render(&self, group: &mut impl RenderGroup) {
        self.enemies.render(group);
        self.projectiles.render(group);
        self.explosions.render(group);
    }
}
