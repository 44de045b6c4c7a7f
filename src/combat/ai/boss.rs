//! Combat domain: boss facing control and the attack scheduler.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::combat::ai::forward_angle;
use crate::combat::components::{ActivePattern, Boss, BossAgent, StrikeSpec};
use crate::combat::events::{PatternCompletedEvent, StartPatternEvent};
use crate::combat::patterns::{PatternId, PatternStep};
use crate::combat::resources::BossTuning;
use crate::combat::spawn::{spawn_strike_hazard, spawn_telegraph_hazard};
use crate::movement::Player;

/// Degenerate-direction guard: closer than this, facing is left alone.
const MIN_TARGET_DISTANCE_SQ: f32 = 1e-4;

/// One bounded rotation step toward a target direction. The turn is
/// clamped to `max_step_deg` (an angular clamp, not a smoothing
/// factor), and a degenerate target direction leaves facing unchanged.
pub(crate) fn facing_step(current: f32, to_target: Vec2, max_step_deg: f32) -> f32 {
    if to_target.length_squared() < MIN_TARGET_DISTANCE_SQ {
        return current;
    }
    let mut diff = (to_target.to_angle() - current).rem_euclid(TAU);
    if diff > PI {
        diff -= TAU;
    }
    let max_step = max_step_deg.to_radians();
    current + diff.clamp(-max_step, max_step)
}

/// The facing decision for one tick of one boss: orientation is frozen
/// for as long as a pattern is executing, otherwise it takes one
/// clamped step toward the target.
pub(crate) fn agent_facing(agent: &BossAgent, current: f32, to_target: Vec2, dt: f32) -> f32 {
    if !agent.can_rotate {
        return current;
    }
    facing_step(current, to_target, agent.rotation_speed * dt)
}

/// Rotate idle bosses toward the tracked target at a bounded angular
/// rate. Never moves position.
pub(crate) fn update_facing(
    time: Res<Time>,
    player_query: Query<&Transform, With<Player>>,
    mut boss_query: Query<(&mut Transform, &BossAgent), (With<Boss>, Without<Player>)>,
) {
    let Some(player_transform) = player_query.iter().next() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let dt = time.delta_secs();

    for (mut transform, agent) in &mut boss_query {
        let to_target = player_pos - transform.translation.truncate();
        let current = forward_angle(&transform);
        let next = agent_facing(agent, current, to_target, dt);
        if next != current {
            transform.rotation = Quat::from_rotation_z(next);
        }
    }
}

/// Timer-driven cycling: tick the attack countdown while idle and start
/// the next pattern in the cyclic sequence when it expires. With no
/// target present the boss holds fire.
pub(crate) fn update_attack_timer(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BossTuning>,
    player_query: Query<(), With<Player>>,
    mut boss_query: Query<(Entity, &Transform, &mut BossAgent), With<Boss>>,
) {
    if player_query.is_empty() {
        return;
    }
    let dt = time.delta_secs();

    for (entity, transform, mut agent) in &mut boss_query {
        if agent.is_attacking {
            continue;
        }
        agent.attack_timer -= dt;
        if agent.attack_timer > 0.0 {
            continue;
        }
        agent.attack_timer = tuning.time_between_attacks;

        let Some(&raw) = tuning.attack_sequence.get(agent.sequence_index) else {
            debug!("Attack sequence is empty, boss stays idle");
            continue;
        };
        let Some(id) = PatternId::from_raw(raw) else {
            // Bad sequence entry: skip the slot, keep the cadence
            warn!("Unknown attack id {raw} in sequence, skipping slot");
            agent.advance_sequence(tuning.attack_sequence.len());
            continue;
        };

        agent.begin_pattern();
        let base_angle = forward_angle(transform);
        commands
            .entity(entity)
            .insert(ActivePattern::new(id.build(&tuning), base_angle, true));
        info!("Boss starting pattern {:?}", id);
    }
}

/// Direct selection: start the requested pattern on every idle boss.
/// Requests arriving mid-pattern are dropped without touching the
/// in-progress state.
pub(crate) fn handle_start_pattern_requests(
    mut commands: Commands,
    mut requests: MessageReader<StartPatternEvent>,
    tuning: Res<BossTuning>,
    mut boss_query: Query<(Entity, &Transform, &mut BossAgent), With<Boss>>,
) {
    for request in requests.read() {
        for (entity, transform, mut agent) in &mut boss_query {
            if !agent.begin_pattern() {
                debug!(
                    "Dropping {:?} request: a pattern is already executing",
                    request.pattern
                );
                continue;
            }
            let base_angle = forward_angle(transform);
            commands.entity(entity).insert(ActivePattern::new(
                request.pattern.build(&tuning),
                base_angle,
                false,
            ));
        }
    }
}

/// Drive every executing pattern forward by one tick, spawning the
/// telegraphs and strikes its steps call for. Patterns always run to
/// their natural end; completion returns the agent to idle and, for
/// timer-started patterns, advances the cyclic sequence.
pub(crate) fn run_active_patterns(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BossTuning>,
    mut completed: MessageWriter<PatternCompletedEvent>,
    mut boss_query: Query<(Entity, &Transform, &mut BossAgent, &mut ActivePattern)>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut agent, mut active) in &mut boss_query {
        let origin = transform.translation.truncate();
        let base_angle = active.base_angle;
        let strike_size = Vec2::new(tuning.hazard_length, tuning.hazard_width);

        let ActivePattern {
            pattern, cursor, ..
        } = &mut *active;

        let finished = cursor.advance(pattern, dt, |step| match step {
            PatternStep::Telegraphs { angles, lifetime } => {
                for offset in angles {
                    spawn_telegraph_hazard(
                        &mut commands,
                        origin,
                        base_angle + offset.to_radians(),
                        strike_size,
                        *lifetime,
                        None,
                    );
                }
            }
            PatternStep::Strikes { angles } => {
                for offset in angles {
                    spawn_strike_hazard(
                        &mut commands,
                        origin,
                        base_angle + offset.to_radians(),
                        StrikeSpec {
                            damage: tuning.attack_damage,
                            lifetime: tuning.strike_lifetime,
                            size: strike_size,
                        },
                    );
                }
            }
            PatternStep::Wait(_) => {}
        });

        if finished {
            let name = active.pattern.name;
            commands.entity(entity).remove::<ActivePattern>();
            agent.finish_pattern();
            if active.from_cycle {
                agent.advance_sequence(tuning.attack_sequence.len());
            }
            completed.write(PatternCompletedEvent { boss: entity, name });
            debug!("Pattern {name} completed");
        }
    }
}
