//! Combat domain: hazard lifecycle and the damage channel.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Hazard, HazardLifetime, Health, Telegraph};
use crate::combat::events::{DamageEvent, DeathEvent, HealthChangedEvent};
use crate::combat::spawn::spawn_strike_at;
use crate::core::ScreenShakeEvent;

/// Count down hazard lifetimes. Expiring telegraphs hand over to their
/// strike at the same frozen transform; expiring strikes just go away.
pub(crate) fn tick_hazard_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HazardLifetime, &Transform, Option<&Telegraph>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut lifetime, transform, telegraph) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 > 0.0 {
            continue;
        }
        if let Some(Telegraph { strike: Some(spec) }) = telegraph {
            spawn_strike_at(&mut commands, *transform, *spec);
        }
        commands.entity(entity).despawn();
    }
}

/// Resolve strike overlaps. Each hazard damages at most once; targets
/// without health, or already dead, count as harmless hits and the
/// hazard keeps waiting for its own expiry.
pub(crate) fn detect_hazard_hits(
    mut collisions: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hazard_query: Query<&mut Hazard>,
    target_query: Query<&Health>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hazard_entity, target_entity) in pairs {
            let Ok(mut hazard) = hazard_query.get_mut(hazard_entity) else {
                continue;
            };
            if hazard.has_dealt_damage() {
                continue;
            }

            let Ok(health) = target_query.get(target_entity) else {
                debug!("Hazard overlapped {target_entity:?} with no health, harmless hit");
                continue;
            };
            if health.is_dead() {
                continue;
            }

            if hazard.try_deal() {
                damage_events.write(DamageEvent {
                    source: hazard_entity,
                    target: target_entity,
                    amount: hazard.damage,
                });
            }
        }
    }
}

/// Drain damage events into health, notifying collaborators of changes
/// and of the (single) death transition. Camera feedback fires only
/// for damage that actually landed, so invulnerable targets produce
/// no shake.
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut changed_events: MessageWriter<HealthChangedEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut shake_events: MessageWriter<ScreenShakeEvent>,
    mut query: Query<&mut Health>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = query.get_mut(event.target) else {
            continue;
        };

        let applied = health.take_damage(event.amount);
        if applied <= 0.0 {
            continue;
        }

        changed_events.write(HealthChangedEvent {
            entity: event.target,
            current: health.current(),
            max: health.max(),
        });
        shake_events.write(ScreenShakeEvent::default());

        if health.is_dead() {
            info!("Entity {:?} died", event.target);
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}
