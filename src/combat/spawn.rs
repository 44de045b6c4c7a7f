//! Combat domain: boss and hazard spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{
    Boss, BossAgent, Hazard, HazardLifetime, Health, SectorSweep, StrikeSpec, Telegraph,
};
use crate::combat::resources::BossTuning;
use crate::movement::GameLayer;

const BOSS_HEALTH: f32 = 500.0;

/// Bundle for spawning a boss with its scheduler state
#[derive(Bundle)]
pub struct BossBundle {
    pub boss: Boss,
    pub agent: BossAgent,
    pub health: Health,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
}

impl BossBundle {
    pub fn new(position: Vec2, tuning: &BossTuning) -> Self {
        Self {
            boss: Boss,
            agent: BossAgent::new(tuning.rotation_speed, tuning.start_attack_delay),
            health: Health::new(BOSS_HEALTH),
            sprite: Sprite {
                color: Color::srgb(0.9, 0.1, 0.1),
                custom_size: Some(Vec2::splat(80.0)),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::circle(40.0),
            collision_layers: CollisionLayers::new(GameLayer::Boss, [GameLayer::Player]),
        }
    }
}

pub(crate) fn spawn_encounter(mut commands: Commands, tuning: Res<BossTuning>) {
    commands.spawn(BossBundle::new(Vec2::ZERO, &tuning));
}

/// Attach the independent sector-sweep loop to a boss. Not part of the
/// cyclic sequence; it runs its own perpetual telegraph/strike cadence.
pub fn attach_sector_sweep(commands: &mut Commands, boss: Entity, tuning: &BossTuning) {
    commands.entity(boss).insert(SectorSweep::new(
        tuning.sector_half_angle,
        tuning.sector_warning_time,
        tuning.sector_rest_time,
    ));
}

/// World transform for a beam hazard extending outward from `origin`
/// along `angle` (radians).
pub fn beam_transform(origin: Vec2, angle: f32, length: f32) -> Transform {
    let center = origin + Vec2::from_angle(angle) * (length * 0.5);
    Transform::from_xyz(center.x, center.y, 1.0).with_rotation(Quat::from_rotation_z(angle))
}

/// Spawn a damaging strike hazard extending outward from `origin`.
/// Despawns at lifetime expiry whether or not it ever hit anything.
pub fn spawn_strike_hazard(
    commands: &mut Commands,
    origin: Vec2,
    angle: f32,
    spec: StrikeSpec,
) -> Entity {
    spawn_strike_at(commands, beam_transform(origin, angle, spec.size.x), spec)
}

/// Spawn a strike hazard at an exact world transform (used by expiring
/// telegraphs, whose transform is frozen at spawn time).
pub fn spawn_strike_at(commands: &mut Commands, transform: Transform, spec: StrikeSpec) -> Entity {
    commands
        .spawn((
            Hazard::new(spec.damage),
            HazardLifetime(spec.lifetime),
            Sprite {
                color: Color::srgba(1.0, 0.2, 0.2, 0.8),
                custom_size: Some(spec.size),
                ..default()
            },
            transform,
            Collider::rectangle(spec.size.x, spec.size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::BossHazard, [GameLayer::Player]),
        ))
        .id()
}

/// Spawn a warning hazard. Carries no collider; at expiry it spawns
/// `strike` at its own frozen transform, if one is configured.
pub fn spawn_telegraph_hazard(
    commands: &mut Commands,
    origin: Vec2,
    angle: f32,
    size: Vec2,
    lifetime: f32,
    strike: Option<StrikeSpec>,
) -> Entity {
    commands
        .spawn((
            Telegraph { strike },
            HazardLifetime(lifetime),
            Sprite {
                color: Color::srgba(1.0, 0.6, 0.1, 0.35),
                custom_size: Some(size),
                ..default()
            },
            beam_transform(origin, angle, size.x),
        ))
        .id()
}
