//! Movement domain: the player target and physics layers.
//!
//! The boss only ever consumes the player as a read-only position query,
//! so this module stays minimal: a marker, layer filtering, and enough
//! kinematic drive to walk the target around the arena.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Health;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// The boss body
    Boss,
    /// Boss hazards (telegraphs carry no collider, strikes damage the player)
    BossHazard,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self { max_speed: 260.0 }
    }
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, apply_movement);
    }
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        Health::new(100.0),
        Sprite {
            color: Color::srgb(0.2, 0.6, 0.9),
            custom_size: Some(Vec2::splat(24.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -220.0, 0.0),
        RigidBody::Kinematic,
        Collider::rectangle(24.0, 24.0),
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Player, [GameLayer::Boss, GameLayer::BossHazard]),
        LinearVelocity::ZERO,
    ));
}

fn apply_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }

    for mut velocity in &mut query {
        velocity.0 = axis.normalize_or_zero() * tuning.max_speed;
    }
}
