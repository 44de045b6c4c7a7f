//! Combat domain: unit tests for the pattern library, scheduler state,
//! and the damage channel.

use bevy::app::App;
use bevy::ecs::message::Messages;
use bevy::prelude::{Update, Vec2};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use super::ai::{agent_facing, facing_step, pick_sector_angle};
use super::components::{BossAgent, Hazard, Health};
use super::events::{DamageEvent, DeathEvent, HealthChangedEvent};
use super::patterns::{
    AttackPattern, PatternCursor, PatternId, PatternStep, cross_then_diagonal, double_wave,
    full_circle, spiral,
};
use super::resources::BossTuning;
use super::systems::apply_damage;
use crate::core::ScreenShakeEvent;

// -----------------------------------------------------------------------------
// Pattern library
// -----------------------------------------------------------------------------

#[test]
fn test_all_patterns_pair_telegraphs_with_strikes() {
    let tuning = BossTuning::default();
    for pattern in [
        cross_then_diagonal(&tuning),
        full_circle(&tuning),
        spiral(&tuning),
        double_wave(&tuning),
    ] {
        let telegraphs = pattern.telegraph_angles();
        let strikes = pattern.strike_angles();
        assert_eq!(
            telegraphs.len(),
            strikes.len(),
            "pattern '{}' must pair every telegraph with a strike",
            pattern.name
        );
        assert_eq!(telegraphs, strikes, "pattern '{}'", pattern.name);
    }
}

#[test]
fn test_cross_then_diagonal_volleys() {
    let tuning = BossTuning::default();
    let pattern = cross_then_diagonal(&tuning);

    assert_eq!(
        pattern.steps[0],
        PatternStep::Telegraphs {
            angles: vec![0.0, 90.0, 180.0, 270.0],
            lifetime: tuning.warning_duration,
        }
    );
    assert_eq!(pattern.steps[1], PatternStep::Wait(tuning.warning_duration));
    assert_eq!(
        pattern.steps[2],
        PatternStep::Strikes {
            angles: vec![0.0, 90.0, 180.0, 270.0],
        }
    );
    assert_eq!(
        pattern.steps[3],
        PatternStep::Wait(tuning.delay_between_patterns)
    );
    assert_eq!(
        pattern.steps[4],
        PatternStep::Telegraphs {
            angles: vec![45.0, 135.0, 225.0, 315.0],
            lifetime: tuning.warning_duration,
        }
    );
}

#[test]
fn test_full_circle_generates_twelve_interleaved_pairs() {
    let tuning = BossTuning::default();
    assert_eq!(tuning.full_circle_angle_step, 30.0);
    let pattern = full_circle(&tuning);

    let expected: Vec<f32> = (0..12).map(|i| i as f32 * 30.0).collect();
    assert_eq!(pattern.telegraph_angles(), expected);
    assert_eq!(pattern.strike_angles(), expected);

    // Interleaved per angle: telegraph, warning wait, strike, interval wait
    for i in 0..12 {
        let group = &pattern.steps[i * 4..i * 4 + 4];
        assert!(matches!(&group[0], PatternStep::Telegraphs { angles, .. } if angles.len() == 1));
        assert_eq!(
            group[1],
            PatternStep::Wait(tuning.full_circle_warning_duration)
        );
        assert!(matches!(&group[2], PatternStep::Strikes { angles } if angles.len() == 1));
        assert_eq!(group[3], PatternStep::Wait(tuning.full_circle_hit_interval));
    }
    assert_eq!(
        pattern.steps.last(),
        Some(&PatternStep::Wait(tuning.delay_between_patterns))
    );
}

#[test]
fn test_spiral_uses_fixed_fine_step() {
    let tuning = BossTuning::default();
    let pattern = spiral(&tuning);
    assert_eq!(pattern.telegraph_angles().len(), 24);
    assert!(matches!(
        pattern.steps[0],
        PatternStep::Telegraphs { lifetime, .. } if lifetime == 0.15
    ));
    assert_eq!(pattern.steps[1], PatternStep::Wait(0.15));
}

#[test]
fn test_double_wave_mirrors_with_fixed_gap() {
    let tuning = BossTuning::default();
    let pattern = double_wave(&tuning);

    assert_eq!(
        pattern.telegraph_angles(),
        vec![-90.0, -70.0, -50.0, -30.0, -10.0, 10.0, 30.0, 50.0, 70.0, 90.0]
    );
    // Fixed half-second gap between the two waves
    assert_eq!(pattern.steps[3], PatternStep::Wait(0.5));
    assert_eq!(
        pattern.steps.last(),
        Some(&PatternStep::Wait(tuning.delay_between_patterns))
    );
}

#[test]
fn test_pattern_id_raw_mapping() {
    assert_eq!(PatternId::from_raw(2), Some(PatternId::CrossThenDiagonal));
    assert_eq!(PatternId::from_raw(3), Some(PatternId::FullCircle));
    assert_eq!(PatternId::from_raw(4), Some(PatternId::Spiral));
    assert_eq!(PatternId::from_raw(5), Some(PatternId::DoubleWave));
    assert_eq!(PatternId::from_raw(0), None);
    assert_eq!(PatternId::from_raw(9), None);
}

// -----------------------------------------------------------------------------
// Pattern cursor
// -----------------------------------------------------------------------------

fn wait_only(durations: &[f32]) -> AttackPattern {
    AttackPattern {
        name: "waits",
        steps: durations.iter().map(|&d| PatternStep::Wait(d)).collect(),
    }
}

#[test]
fn test_cursor_carries_remainder_across_waits() {
    let pattern = wait_only(&[0.25, 0.25]);
    let mut cursor = PatternCursor::default();

    // 0.375 finishes the first wait and eats 0.125 of the second
    assert!(!cursor.advance(&pattern, 0.375, |_| {}));
    assert_eq!(cursor.step_index, 1);
    assert!((cursor.elapsed - 0.125).abs() < 1e-6);

    // The remaining 0.125 completes the pattern: 0.5 total for 0.5 of waits
    assert!(cursor.advance(&pattern, 0.125, |_| {}));
}

#[test]
fn test_cursor_emits_spawn_steps_in_order_without_skipping() {
    let tuning = BossTuning::default();
    let pattern = cross_then_diagonal(&tuning);
    let mut cursor = PatternCursor::default();

    let mut emitted = Vec::new();
    let mut finished = false;
    // Coarse ticks: spawn steps between waits must still all fire
    for _ in 0..100 {
        finished = cursor.advance(&pattern, 0.25, |step| emitted.push(step.clone()));
        if finished {
            break;
        }
    }
    assert!(finished);

    let spawned: Vec<_> = pattern
        .steps
        .iter()
        .filter(|s| !matches!(s, PatternStep::Wait(_)))
        .cloned()
        .collect();
    assert_eq!(emitted, spawned);
}

#[test]
fn test_full_circle_strike_timing() {
    let tuning = BossTuning::default();
    let pattern = full_circle(&tuning);
    let mut cursor = PatternCursor::default();

    let dt = 0.05;
    let mut clock = 0.0;
    let mut strike_times = Vec::new();
    loop {
        let finished = cursor.advance(&pattern, dt, |step| {
            if let PatternStep::Strikes { angles } = step {
                strike_times.push((angles[0], clock + dt));
            }
        });
        clock += dt;
        if finished {
            break;
        }
    }

    assert_eq!(strike_times.len(), 12);
    // Each angle's strike lands one warning after its telegraph, one
    // interval plus one warning after the previous strike
    let period = tuning.full_circle_warning_duration + tuning.full_circle_hit_interval;
    for (i, (angle, time)) in strike_times.iter().enumerate() {
        assert_eq!(*angle, i as f32 * 30.0);
        let expected = i as f32 * period + tuning.full_circle_warning_duration;
        assert!(
            (time - expected).abs() < dt + 1e-6,
            "strike {i} at {time}, expected ~{expected}"
        );
    }
}

// -----------------------------------------------------------------------------
// Scheduler state
// -----------------------------------------------------------------------------

#[test]
fn test_agent_flag_invariant() {
    let mut agent = BossAgent::new(120.0, 3.0);
    assert!(!agent.is_attacking);
    assert!(agent.can_rotate);

    assert!(agent.begin_pattern());
    assert!(agent.is_attacking);
    assert!(!agent.can_rotate);

    agent.finish_pattern();
    assert!(!agent.is_attacking);
    assert!(agent.can_rotate);
}

#[test]
fn test_start_request_while_executing_is_dropped() {
    let mut agent = BossAgent::new(120.0, 3.0);
    assert!(agent.begin_pattern());

    // A second start request is refused and the agent stays executing
    assert!(!agent.begin_pattern());
    assert!(agent.is_attacking);
    assert!(!agent.can_rotate);
}

#[test]
fn test_cyclic_sequence_wraps() {
    let tuning = BossTuning::default();
    let sequence = &tuning.attack_sequence;
    let mut agent = BossAgent::new(120.0, 3.0);

    let mut executed = Vec::new();
    for _ in 0..5 {
        executed.push(sequence[agent.sequence_index]);
        agent.advance_sequence(sequence.len());
    }

    assert_eq!(executed, vec![2, 3, 4, 5, 2]);
    assert_eq!(executed[4], executed[0]);
}

#[test]
fn test_advance_sequence_handles_empty() {
    let mut agent = BossAgent::new(120.0, 3.0);
    agent.advance_sequence(0);
    assert_eq!(agent.sequence_index, 0);
}

// -----------------------------------------------------------------------------
// Facing controller
// -----------------------------------------------------------------------------

#[test]
fn test_facing_step_clamps_turn_rate() {
    // Target 90 degrees off, clamp at 10 degrees per step
    let next = facing_step(0.0, Vec2::Y, 10.0);
    assert!((next - 10.0_f32.to_radians()).abs() < 1e-5);
}

#[test]
fn test_facing_step_snaps_inside_clamp() {
    let target = Vec2::from_angle(5.0_f32.to_radians());
    let next = facing_step(0.0, target, 10.0);
    assert!((next - 5.0_f32.to_radians()).abs() < 1e-5);
}

#[test]
fn test_facing_step_takes_shortest_arc() {
    // From +170 toward -170 degrees: 20 degrees through the wraparound
    let current = 170.0_f32.to_radians();
    let target = Vec2::from_angle(-170.0_f32.to_radians());
    let next = facing_step(current, target, 30.0);
    assert!((next - 190.0_f32.to_radians()).abs() < 1e-4);
}

#[test]
fn test_facing_step_ignores_degenerate_direction() {
    let current = 1.2;
    assert_eq!(facing_step(current, Vec2::ZERO, 10.0), current);
}

#[test]
fn test_facing_frozen_while_attacking() {
    let mut agent = BossAgent::new(120.0, 3.0);
    assert!(agent.begin_pattern());

    // However many ticks pass mid-pattern, orientation never moves
    let start = 0.3;
    let mut angle = start;
    for _ in 0..20 {
        angle = agent_facing(&agent, angle, Vec2::Y, 0.016);
    }
    assert_eq!(angle, start);

    // Back to idle, rotation resumes toward the target
    agent.finish_pattern();
    let next = agent_facing(&agent, angle, Vec2::Y, 0.016);
    assert!(next > angle);
}

// -----------------------------------------------------------------------------
// Damageable
// -----------------------------------------------------------------------------

#[test]
fn test_take_damage_reduces_health() {
    let mut health = Health::new(100.0);
    assert_eq!(health.take_damage(30.0), 30.0);
    assert_eq!(health.current(), 70.0);
    assert!(!health.is_dead());
}

#[test]
fn test_overkill_dies_once_then_noop() {
    let mut health = Health::new(100.0);
    assert_eq!(health.take_damage(150.0), 100.0);
    assert!(health.is_dead());
    assert_eq!(health.current(), 0.0);

    // Post-death damage and heal are no-ops
    assert_eq!(health.take_damage(10.0), 0.0);
    assert_eq!(health.heal(50.0), 0.0);
    assert_eq!(health.current(), 0.0);
    assert!(health.is_dead());
}

#[test]
fn test_invulnerable_blocks_damage() {
    let mut health = Health::new(100.0);
    health.set_invulnerable(true);
    assert_eq!(health.take_damage(40.0), 0.0);
    assert_eq!(health.current(), 100.0);

    health.set_invulnerable(false);
    assert_eq!(health.take_damage(40.0), 40.0);
}

#[test]
fn test_shake_only_fires_for_damage_that_lands() {
    let mut app = App::new();
    app.add_message::<DamageEvent>()
        .add_message::<HealthChangedEvent>()
        .add_message::<DeathEvent>()
        .add_message::<ScreenShakeEvent>()
        .add_systems(Update, apply_damage);

    let source = app.world_mut().spawn_empty().id();
    let mut health = Health::new(100.0);
    health.set_invulnerable(true);
    let target = app.world_mut().spawn(health).id();

    app.world_mut()
        .resource_mut::<Messages<DamageEvent>>()
        .write(DamageEvent {
            source,
            target,
            amount: 25.0,
        });
    app.update();

    // Blocked by invulnerability: no camera feedback
    assert!(
        app.world()
            .resource::<Messages<ScreenShakeEvent>>()
            .is_empty()
    );

    app.world_mut()
        .get_mut::<Health>(target)
        .unwrap()
        .set_invulnerable(false);
    app.world_mut()
        .resource_mut::<Messages<DamageEvent>>()
        .write(DamageEvent {
            source,
            target,
            amount: 25.0,
        });
    app.update();

    assert!(
        !app.world()
            .resource::<Messages<ScreenShakeEvent>>()
            .is_empty()
    );
    assert_eq!(
        app.world().get::<Health>(target).map(Health::current),
        Some(75.0)
    );
}

#[test]
fn test_heal_clamps_to_max() {
    let mut health = Health::new(100.0);
    health.take_damage(30.0);
    assert_eq!(health.heal(50.0), 30.0);
    assert_eq!(health.current(), 100.0);
    assert_eq!(health.percent(), 1.0);
}

// -----------------------------------------------------------------------------
// Hazards
// -----------------------------------------------------------------------------

#[test]
fn test_hazard_deals_damage_at_most_once() {
    let mut hazard = Hazard::new(10.0);
    assert!(!hazard.has_dealt_damage());

    assert!(hazard.try_deal());
    assert!(hazard.has_dealt_damage());

    // Overlaps on later ticks are ignored
    assert!(!hazard.try_deal());
    assert!(!hazard.try_deal());
}

// -----------------------------------------------------------------------------
// Sector sweep
// -----------------------------------------------------------------------------

#[test]
fn test_sector_angles_stay_in_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..200 {
        let angle = pick_sector_angle(&mut rng, 30.0);
        assert!((-30.0..=30.0).contains(&angle), "angle {angle} out of sector");
    }
}

#[test]
fn test_sector_angles_are_deterministic_with_seed() {
    let mut a = ChaCha8Rng::seed_from_u64(7);
    let mut b = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..20 {
        assert_eq!(pick_sector_angle(&mut a, 45.0), pick_sector_angle(&mut b, 45.0));
    }
}
