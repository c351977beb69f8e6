//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - Enemy waves: formation layout, tweened motion, bounded drift
//! - Projectiles with fire-rate throttling and horizon fade
//! - Pooled sprite-sheet explosions
//! - Projectile/enemy box collisions
//! - Scripted intro camera and the player's ship
//!
//! No rendering or platform dependencies: output goes through
//! [`RenderGroup`](crate::scene::RenderGroup) and audio through
//! [`AudioManager`](crate::audio::AudioManager).

pub mod camera;
pub mod collision;
pub mod enemies;
pub mod enemy;
pub mod explosion;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod tween;

pub use camera::{Camera, IntroStage};
pub use collision::CollisionResolver;
pub use enemies::{EnemyCollection, EnemyHandle, HitContext};
pub use enemy::{Bounds, DamageOutcome, Enemy};
pub use explosion::{Explosion, ExplosionCollection};
pub use projectile::{Projectile, ProjectileCollection, ProjectileHandle};
pub use ship::Ship;
pub use state::GameState;
pub use tick::{SimError, TickInput, tick};
pub use tween::{tween_axis, tween_toward};
