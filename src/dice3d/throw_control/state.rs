//! Throw Control State
//!
//! Contains the throw sampler, the seeded RNG resource and the one-shot
//! deferred throw.

use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dice3d::types::ThrowSetting;

/// Written when the user asks for the throw.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ThrowRequested;

/// Marker for the Material button that starts the throw
#[derive(Component)]
pub struct ThrowButton;

/// Random source for throws. Seed it to replay the same throw.
#[derive(Resource)]
pub struct ThrowRng(pub StdRng);

impl ThrowRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for ThrowRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Initial body state of a throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowParams {
    pub position: Vec3,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
}

/// Sample a throw from the configured ranges.
///
/// One jitter `r` in `[0, spawn_jitter)` moves the spawn point along the
/// diagonal and adds to the horizontal velocity; the vertical velocity gets its
/// own jitter.
pub fn sample_throw(throw: &ThrowSetting, rng: &mut impl Rng) -> ThrowParams {
    let lift = rng.gen::<f32>() * throw.vertical_jitter;
    let jitter = rng.gen::<f32>() * throw.spawn_jitter;

    let tilt = throw.tilt_degrees.to_radians();
    let tilt_x = (rng.gen::<f32>() * 2.0 - 1.0) * tilt;
    let tilt_z = (rng.gen::<f32>() * 2.0 - 1.0) * tilt;

    let base = throw.base_velocity();
    let spin = throw.spin;
    let mut spin_axis = || rng.gen::<f32>() * 2.0 * spin - spin;

    ThrowParams {
        position: throw.spawn_origin() + Vec3::splat(jitter),
        rotation: Quat::from_xyzw(tilt_x, 0.0, tilt_z, 1.0).normalize(),
        linvel: Vec3::new(base.x + jitter, base.y + lift, base.z + jitter),
        angvel: Vec3::new(spin_axis(), spin_axis(), spin_axis()),
    }
}

/// One-shot task with an explicit due time on the app clock.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredThrow {
    due_at: Option<Duration>,
}

impl DeferredThrow {
    pub fn schedule(&mut self, now: Duration, delay: Duration) {
        self.due_at = Some(now + delay);
    }

    /// Drop a pending throw. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due_at.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.due_at
    }

    /// Consume the task if it is due at `now`. Fires at most once per schedule.
    pub fn take_if_due(&mut self, now: Duration) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}
