//! Debug harness for exercising the boss outside the attack cycle.
//!
//! Keys 2-5 request the matching library pattern directly (dropped if
//! one is already running), 6 attaches the independent sector-sweep
//! loop, I toggles player invulnerability, H heals the player.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{
    Boss, BossTuning, Health, PatternId, SectorSweep, StartPatternEvent, attach_sector_sweep,
};
use crate::movement::Player;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (request_patterns, toggle_player_state));
    }
}

fn request_patterns(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    tuning: Res<BossTuning>,
    mut requests: MessageWriter<StartPatternEvent>,
    boss_query: Query<Entity, (With<Boss>, Without<SectorSweep>)>,
) {
    let hotkeys = [
        (KeyCode::Digit2, PatternId::CrossThenDiagonal),
        (KeyCode::Digit3, PatternId::FullCircle),
        (KeyCode::Digit4, PatternId::Spiral),
        (KeyCode::Digit5, PatternId::DoubleWave),
    ];
    for (key, pattern) in hotkeys {
        if keyboard.just_pressed(key) {
            requests.write(StartPatternEvent { pattern });
        }
    }

    if keyboard.just_pressed(KeyCode::Digit6) {
        for boss in &boss_query {
            attach_sector_sweep(&mut commands, boss, &tuning);
            info!("Sector sweep attached to {boss:?}");
        }
    }
}

fn toggle_player_state(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<&mut Health, With<Player>>,
) {
    if keyboard.just_pressed(KeyCode::KeyI) {
        for mut health in &mut player_query {
            let value = !health.is_invulnerable();
            health.set_invulnerable(value);
            info!("Player invulnerability: {value}");
        }
    }

    if keyboard.just_pressed(KeyCode::KeyH) {
        for mut health in &mut player_query {
            let restored = health.heal(25.0);
            info!("Player healed {restored}, HP {}/{}", health.current(), health.max());
        }
    }
}
