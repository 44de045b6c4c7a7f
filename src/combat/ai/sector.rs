//! Combat domain: the independent continuous-sector attack loop.
//!
//! Runs forever on whatever entity carries [`SectorSweep`]: pick a
//! random angle inside the sector, show one wide telegraph, let its
//! expiry produce the strike, rest, repeat. Deliberately decoupled
//! from the scheduler's mutual exclusion.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::ai::forward_angle;
use crate::combat::components::{SectorSweep, StrikeSpec};
use crate::combat::resources::{AttackRng, BossTuning};
use crate::combat::spawn::spawn_telegraph_hazard;

/// Uniform random aim offset in degrees, within the sector.
pub(crate) fn pick_sector_angle(rng: &mut impl Rng, half_angle: f32) -> f32 {
    rng.random_range(-half_angle..=half_angle)
}

pub(crate) fn update_sector_sweeps(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BossTuning>,
    mut rng: ResMut<AttackRng>,
    mut query: Query<(&Transform, &mut SectorSweep)>,
) {
    let dt = time.delta_secs();

    for (transform, mut sweep) in &mut query {
        sweep.timer -= dt;
        if sweep.timer > 0.0 {
            continue;
        }

        let offset = pick_sector_angle(&mut rng.0, sweep.half_angle);
        let angle = forward_angle(transform) + offset.to_radians();
        spawn_telegraph_hazard(
            &mut commands,
            transform.translation.truncate(),
            angle,
            Vec2::new(tuning.hazard_length, tuning.sector_hazard_width),
            sweep.warning_time,
            Some(StrikeSpec {
                damage: tuning.attack_damage,
                lifetime: tuning.strike_lifetime,
                size: Vec2::new(tuning.hazard_length, tuning.hazard_width),
            }),
        );

        // Next telegraph comes one warning plus one rest later
        sweep.timer = sweep.warning_time + sweep.rest_time;
    }
}
