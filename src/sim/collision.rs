//! Projectile versus enemy collisions
//!
//! Boxes are axis-aligned and containment is tested against the projectile's
//! position only. Each projectile can hit at most one enemy per pass; when
//! boxes overlap the enemy spawned first wins.

use super::enemies::{EnemyCollection, EnemyHandle, HitContext};
use super::projectile::ProjectileCollection;
use crate::audio::AudioError;

/// Pairs every projectile in flight with the first live enemy it is inside
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve this frame's contacts. Returns the number of projectiles spent.
    pub fn update(
        &self,
        projectiles: &mut ProjectileCollection,
        enemies: &mut EnemyCollection,
        ctx: &mut HitContext<'_>,
    ) -> Result<usize, AudioError> {
        let mut contacts = 0;

        for handle in projectiles.active_handles() {
            let Some(projectile) = projectiles.get(handle) else {
                continue;
            };
            let (position, strength) = (projectile.position, projectile.strength);

            // Re-check liveness: an earlier projectile may have destroyed the enemy
            let target = (0..enemies.len()).map(EnemyHandle).find(|&h| {
                enemies
                    .get(h)
                    .is_some_and(|e| e.active && e.collides_with(position))
            });

            if let Some(target) = target {
                enemies.hit(target, position, strength, ctx)?;
                if let Some(projectile) = projectiles.get_mut(handle) {
                    projectile.on_collision();
                }
                contacts += 1;
            }
        }

        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::consts::*;
    use crate::faces::FaceAssets;
    use crate::score::Score;
    use crate::sim::explosion::ExplosionCollection;
    use crate::sim::projectile::ProjectileHandle;
    use glam::Vec3;

    /// A wave with every enemy already in its formation slot
    fn settled_wave() -> EnemyCollection {
        let mut enemies = EnemyCollection::new(FaceAssets::placeholder(), 3);
        enemies.reset_wave(true);
        let offset = enemies.group_position();
        for handle in enemies.active_handles() {
            let enemy = enemies.get_mut(handle).unwrap();
            enemy.position = enemy.target_position;
            enemy.set_position(offset);
        }
        enemies
    }

    fn fire_at(projectiles: &mut ProjectileCollection, center: Vec3) {
        let audio = AudioManager::silent();
        // Shots land at center.x +/- spread; aim the left one at `center`
        let origin = center + Vec3::new(PROJECTILE_SPREAD_X, 0.0, 0.0);
        assert!(projectiles.create_projectile(origin, &audio).unwrap());
    }

    #[test]
    fn test_overlapping_boxes_earliest_enemy_wins() {
        let mut enemies = settled_wave();
        let offset = enemies.group_position();
        {
            let second = enemies.get_mut(EnemyHandle(1)).unwrap();
            second.position = Vec3::new(-550.0, -300.0, 0.0);
            second.target_position = second.position;
            second.set_position(offset);
        }

        let point = Vec3::new(-600.0, -300.0, -900.0);
        assert!(enemies.get(EnemyHandle(0)).unwrap().collides_with(point));
        assert!(enemies.get(EnemyHandle(1)).unwrap().collides_with(point));

        let mut projectiles = ProjectileCollection::new();
        fire_at(&mut projectiles, point);

        let audio = AudioManager::silent();
        let mut explosions = ExplosionCollection::new(1);
        let mut score = Score::new();
        let mut ctx = HitContext {
            explosions: &mut explosions,
            audio: &audio,
            score: &mut score,
        };
        let contacts = CollisionResolver::new()
            .update(&mut projectiles, &mut enemies, &mut ctx)
            .unwrap();

        assert_eq!(contacts, 1);
        assert_eq!(enemies.get(EnemyHandle(0)).unwrap().hp, ENEMY_HP - 1);
        assert_eq!(enemies.get(EnemyHandle(1)).unwrap().hp, ENEMY_HP);
        assert!(!projectiles.get(ProjectileHandle(0)).unwrap().active);
        assert!(projectiles.get(ProjectileHandle(1)).unwrap().active);
    }

    #[test]
    fn test_destroyed_enemy_is_skipped_later_in_pass() {
        let mut enemies = settled_wave();
        enemies.get_mut(EnemyHandle(0)).unwrap().hp = 1;

        // Two pairs fired at the same enemy, one collection clock apart
        let point = Vec3::new(-650.0, -300.0, -900.0);
        let mut projectiles = ProjectileCollection::new();
        fire_at(&mut projectiles, point);
        projectiles.update(FIRE_INTERVAL_MS as f32);
        for p in [0, 1] {
            projectiles.get_mut(ProjectileHandle(p)).unwrap().position = point;
        }
        fire_at(&mut projectiles, point);
        projectiles.get_mut(ProjectileHandle(2)).unwrap().position = point;

        let audio = AudioManager::silent();
        let mut explosions = ExplosionCollection::new(1);
        let mut score = Score::new();
        let mut ctx = HitContext {
            explosions: &mut explosions,
            audio: &audio,
            score: &mut score,
        };
        let contacts = CollisionResolver::new()
            .update(&mut projectiles, &mut enemies, &mut ctx)
            .unwrap();

        assert_eq!(contacts, 1);
        assert!(!enemies.get(EnemyHandle(0)).unwrap().active);
        assert_eq!(score.value(), u64::from(ENEMY_SCORE_VALUE));
        let still_flying = projectiles.active_handles();
        assert!(!still_flying.contains(&ProjectileHandle(0)));
        assert!(still_flying.contains(&ProjectileHandle(2)));
    }

    #[test]
    fn test_misses_leave_everything_untouched() {
        let mut enemies = settled_wave();
        let mut projectiles = ProjectileCollection::new();
        fire_at(&mut projectiles, Vec3::new(0.0, 2000.0, -900.0));

        let audio = AudioManager::silent();
        let mut explosions = ExplosionCollection::new(1);
        let mut score = Score::new();
        let mut ctx = HitContext {
            explosions: &mut explosions,
            audio: &audio,
            score: &mut score,
        };
        let contacts = CollisionResolver::new()
            .update(&mut projectiles, &mut enemies, &mut ctx)
            .unwrap();

        assert_eq!(contacts, 0);
        assert_eq!(projectiles.active_handles().len(), 2);
        assert_eq!(explosions.active_count(), 0);
        assert!(enemies.enemies().iter().all(|e| e.hp == ENEMY_HP));
    }
}
