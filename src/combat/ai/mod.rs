mod boss;
mod sector;

pub(crate) use boss::{
    handle_start_pattern_requests, run_active_patterns, update_attack_timer, update_facing,
};
pub(crate) use sector::update_sector_sweeps;

#[cfg(test)]
pub(crate) use boss::{agent_facing, facing_step};
#[cfg(test)]
pub(crate) use sector::pick_sector_angle;

use bevy::prelude::*;

/// Forward direction of an agent, radians in the arena plane.
pub(crate) fn forward_angle(transform: &Transform) -> f32 {
    (transform.rotation * Vec3::X).truncate().to_angle()
}
