//! Core domain: camera setup and the screen-shake feedback channel.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use rand::Rng;

/// Fire-and-forget camera feedback. `None` fields fall back to the
/// configured defaults. Safe to emit when no camera exists.
#[derive(Debug, Default)]
pub struct ScreenShakeEvent {
    pub duration: Option<f32>,
    pub magnitude: Option<f32>,
}

impl Message for ScreenShakeEvent {}

/// Shake state for the main camera. A new event restarts the shake.
#[derive(Resource, Debug)]
pub struct ScreenShake {
    pub default_duration: f32,
    pub default_magnitude: f32,
    remaining: f32,
    magnitude: f32,
    rest_position: Option<Vec3>,
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self {
            default_duration: 0.1,
            default_magnitude: 0.2,
            remaining: 0.0,
            magnitude: 0.0,
            rest_position: None,
        }
    }
}

impl ScreenShake {
    /// Restart the shake, replacing any shake still in progress.
    pub fn start(&mut self, duration: Option<f32>, magnitude: Option<f32>) {
        self.remaining = duration.unwrap_or(self.default_duration);
        self.magnitude = magnitude.unwrap_or(self.default_magnitude);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenShake>()
            .add_message::<ScreenShakeEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (start_screen_shake, apply_screen_shake).chain());
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn start_screen_shake(
    mut events: MessageReader<ScreenShakeEvent>,
    mut shake: ResMut<ScreenShake>,
) {
    for event in events.read() {
        shake.start(event.duration, event.magnitude);
    }
}

fn apply_screen_shake(
    time: Res<Time>,
    mut shake: ResMut<ScreenShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(mut transform) = camera_query.iter_mut().next() else {
        return;
    };

    if !shake.is_active() {
        return;
    }

    // Remember where the camera rests so it can be restored afterwards
    let rest = *shake
        .rest_position
        .get_or_insert(transform.translation);

    shake.remaining -= time.delta_secs();
    if shake.remaining <= 0.0 {
        transform.translation = rest;
        shake.rest_position = None;
        return;
    }

    let mut rng = rand::rng();
    let offset = Vec2::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    ) * shake.magnitude;
    transform.translation = rest + offset.extend(0.0);
}

#[cfg(test)]
mod tests {
    use super::ScreenShake;

    #[test]
    fn test_shake_defaults_fill_missing_fields() {
        let mut shake = ScreenShake::default();
        assert!(!shake.is_active());

        shake.start(None, None);
        assert!(shake.is_active());
        assert_eq!(shake.magnitude, shake.default_magnitude);
        assert_eq!(shake.remaining, shake.default_duration);
    }

    #[test]
    fn test_new_shake_replaces_running_shake() {
        let mut shake = ScreenShake::default();
        shake.start(Some(5.0), Some(1.0));
        shake.start(Some(0.2), None);
        assert_eq!(shake.remaining, 0.2);
        assert_eq!(shake.magnitude, shake.default_magnitude);
    }
}
