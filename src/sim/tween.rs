//! Exponential-decay tweening
//!
//! Each axis closes `1 / divisor` of its remaining distance per step and snaps
//! exactly onto the target once it is within [`TWEEN_SNAP_DISTANCE`].

use glam::Vec3;

use crate::consts::TWEEN_SNAP_DISTANCE;
use crate::is_finite_vec3;

/// Step one axis toward its target. Returns true if the axis is at rest.
#[inline]
pub fn tween_axis(current: &mut f32, target: f32, divisor: f32) -> bool {
    let delta = target - *current;
    if delta.abs() > TWEEN_SNAP_DISTANCE {
        *current += delta / divisor;
        false
    } else {
        *current = target;
        true
    }
}

/// Step every axis of `current` toward `target`. Returns true once all axes are at rest.
pub fn tween_toward(current: &mut Vec3, target: Vec3, divisor: f32) -> bool {
    debug_assert!(divisor > 1.0, "tween divisor must exceed 1, got {divisor}");
    debug_assert!(
        is_finite_vec3(*current) && is_finite_vec3(target),
        "tween on non-finite position {current:?} -> {target:?}"
    );

    // Every axis must step, so no short-circuiting here
    let x = tween_axis(&mut current.x, target.x, divisor);
    let y = tween_axis(&mut current.y, target.y, divisor);
    let z = tween_axis(&mut current.z, target.z, divisor);
    x && y && z
}
