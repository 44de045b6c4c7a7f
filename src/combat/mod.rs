//! Combat domain: the boss encounter core.
//!
//! Hazards, the pattern library, the attack scheduler, facing control,
//! and the damage channel. One plugin owns the whole encounter brain.

mod ai;
mod components;
mod events;
mod patterns;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    ActivePattern, Boss, BossAgent, Hazard, HazardLifetime, Health, SectorSweep, StrikeSpec,
    Telegraph,
};
pub use events::{
    DamageEvent, DeathEvent, HealthChangedEvent, PatternCompletedEvent, StartPatternEvent,
};
pub use patterns::{AttackPattern, PatternCursor, PatternId, PatternStep};
pub use resources::{AttackRng, BossTuning};
pub use spawn::attach_sector_sweep;

use bevy::prelude::*;

use crate::combat::ai::{
    handle_start_pattern_requests, run_active_patterns, update_attack_timer,
    update_facing, update_sector_sweeps,
};
use crate::combat::resources::load_boss_tuning;
use crate::combat::spawn::spawn_encounter;
use crate::combat::systems::{apply_damage, detect_hazard_hits, tick_hazard_lifetimes};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BossTuning>()
            .init_resource::<AttackRng>()
            .add_message::<DamageEvent>()
            .add_message::<HealthChangedEvent>()
            .add_message::<DeathEvent>()
            .add_message::<StartPatternEvent>()
            .add_message::<PatternCompletedEvent>()
            .add_systems(Startup, (load_boss_tuning, spawn_encounter).chain())
            .add_systems(
                Update,
                (
                    update_facing,
                    update_attack_timer,
                    handle_start_pattern_requests,
                    run_active_patterns,
                    update_sector_sweeps,
                    tick_hazard_lifetimes,
                    detect_hazard_hits,
                    apply_damage,
                )
                    .chain(),
            );
    }
}
