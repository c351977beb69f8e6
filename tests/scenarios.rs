//! End-to-end gameplay scenarios driven through the public API

use facewave::Settings;
use facewave::audio::{AudioManager, RecordingBackend, SoundEffect};
use facewave::consts::*;
use facewave::faces::FaceAssets;
use facewave::score::Score;
use facewave::sim::{
    EnemyCollection, ExplosionCollection, GameState, HitContext, IntroStage, ProjectileCollection,
    TickInput, tick,
};
use glam::Vec3;

#[test]
fn empty_lane_fills_with_three_ranks() {
    let mut enemies = EnemyCollection::new(FaceAssets::placeholder(), 11);
    enemies.update(16.0);

    assert_eq!(enemies.len(), WAVE_RANKS * WAVE_COLUMNS * WAVE_ROWS);
    for (i, enemy) in enemies.enemies().iter().enumerate() {
        let rank = i / (WAVE_COLUMNS * WAVE_ROWS);
        assert_eq!(enemy.target_position.z, WAVE_RANK_STEP_Z * rank as f32);
        assert_eq!(enemy.hp, ENEMY_HP);
    }
}

#[test]
fn last_kill_brings_next_wave_in_same_frame() {
    let backend = RecordingBackend::new();
    let audio = AudioManager::new(Box::new(backend.clone()));
    let mut enemies = EnemyCollection::new(FaceAssets::placeholder(), 12);
    let mut explosions = ExplosionCollection::new(12);
    let mut score = Score::new();
    enemies.reset_wave(true);
    let first_set = enemies.face_set_index();

    let handles = enemies.active_handles();
    {
        let mut ctx = HitContext {
            explosions: &mut explosions,
            audio: &audio,
            score: &mut score,
        };
        for &handle in &handles[..handles.len() - 1] {
            enemies.hit(handle, Vec3::ZERO, ENEMY_HP, &mut ctx).unwrap();
        }
    }
    enemies.update(16.0);
    assert_eq!(enemies.len(), 1);

    {
        let mut ctx = HitContext {
            explosions: &mut explosions,
            audio: &audio,
            score: &mut score,
        };
        // Storage was compacted; the survivor is now first
        let survivor = enemies.active_handles()[0];
        enemies.hit(survivor, Vec3::ZERO, ENEMY_HP, &mut ctx).unwrap();
    }
    enemies.update(16.0);

    assert_eq!(enemies.len(), 18);
    assert_eq!(enemies.wave(), 2);
    assert_ne!(enemies.face_set_index(), first_set);
    assert_eq!(score.value(), 18 * u64::from(ENEMY_SCORE_VALUE));
    assert_eq!(backend.count(SoundEffect::ExplosionLarge), 18);
    assert_eq!(explosions.pool_size(), EXPLOSION_POOL_SIZE);
}

#[test]
fn fire_rate_limit_on_collection_clock() {
    let audio = AudioManager::silent();
    let mut projectiles = ProjectileCollection::new();

    assert!(projectiles.create_projectile(Vec3::ZERO, &audio).unwrap());
    projectiles.update(50.0);
    assert!(!projectiles.create_projectile(Vec3::ZERO, &audio).unwrap());
    projectiles.update(100.0);
    assert!(projectiles.create_projectile(Vec3::ZERO, &audio).unwrap());
    assert_eq!(projectiles.len(), 4);
}

#[test]
fn full_session_keeps_invariants() {
    let backend = RecordingBackend::new();
    let mut state = GameState::new(
        &Settings::default(),
        FaceAssets::placeholder(),
        Box::new(backend.clone()),
    )
    .unwrap();

    for frame in 0..3000u32 {
        let input = if state.camera.stage == IntroStage::FreeLook {
            TickInput {
                fire: true,
                ship_vx: if (frame / 120) % 2 == 0 { 1.0 } else { -1.0 },
                ..TickInput::default()
            }
        } else {
            TickInput::default()
        };
        tick(&mut state, &input, 16.0).unwrap();

        assert!(state.explosions.active_count() <= EXPLOSION_POOL_SIZE);
        assert!(state.enemies.enemies().iter().all(|e| e.hp >= 0 && e.hp <= e.hp_total));
        assert!(state.ship.position.x.abs() <= SHIP_BOUND);
        assert!(state.enemies.group_position().x.abs() <= GROUP_BOUND_X);
        if state.enemies.wave() > 0 {
            assert!(!state.enemies.is_empty());
        }
    }

    assert_eq!(state.camera.stage, IntroStage::FreeLook);
    assert!(backend.count(SoundEffect::Projectile) > 0);
    assert_eq!(
        state.score.value(),
        backend.count(SoundEffect::ExplosionLarge) as u64 * u64::from(ENEMY_SCORE_VALUE)
    );
}
