//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::patterns::PatternId;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

/// Emitted whenever an entity's health actually changes, for UI/audio
/// collaborators.
#[derive(Debug)]
pub struct HealthChangedEvent {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

impl Message for HealthChangedEvent {}

/// Emitted exactly once, on the death transition.
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Direct pattern-selection request. Starts immediately when the boss
/// is idle, silently dropped while a pattern is executing.
#[derive(Debug)]
pub struct StartPatternEvent {
    pub pattern: PatternId,
}

impl Message for StartPatternEvent {}

#[derive(Debug)]
pub struct PatternCompletedEvent {
    pub boss: Entity,
    pub name: &'static str,
}

impl Message for PatternCompletedEvent {}
