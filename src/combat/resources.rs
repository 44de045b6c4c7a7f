//! Combat domain: boss tuning and the injectable attack RNG.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const BOSS_TUNING_PATH: &str = "assets/data/boss_tuning.ron";

/// All boss encounter tuning. Loadable from RON, with compiled
/// defaults matching the reference encounter.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Maximum turn rate toward the target, degrees per second
    pub rotation_speed: f32,
    pub attack_damage: f32,
    /// How long strikes persist waiting for an overlap
    pub strike_lifetime: f32,
    /// Warning duration for batched volleys
    pub warning_duration: f32,
    pub full_circle_warning_duration: f32,
    pub full_circle_hit_interval: f32,
    pub full_circle_angle_step: f32,
    /// Pause between halves of a pattern and after its last strike
    pub delay_between_patterns: f32,
    /// Repeating countdown between timer-driven attacks
    pub time_between_attacks: f32,
    /// Grace period before the first attack of the encounter
    pub start_attack_delay: f32,
    /// Cyclic attack sequence, raw pattern ids
    pub attack_sequence: Vec<u8>,
    /// Half-width of the sector-sweep aim cone, degrees
    pub sector_half_angle: f32,
    pub sector_warning_time: f32,
    pub sector_rest_time: f32,
    /// Strike/telegraph beam dimensions
    pub hazard_length: f32,
    pub hazard_width: f32,
    /// Sector telegraphs are wider than the beam hazards
    pub sector_hazard_width: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            rotation_speed: 120.0,
            attack_damage: 10.0,
            strike_lifetime: 0.5,
            warning_duration: 0.6,
            full_circle_warning_duration: 0.3,
            full_circle_hit_interval: 0.1,
            full_circle_angle_step: 30.0,
            delay_between_patterns: 1.0,
            time_between_attacks: 3.0,
            start_attack_delay: 3.0,
            attack_sequence: vec![2, 3, 4, 5],
            sector_half_angle: 30.0,
            sector_warning_time: 1.5,
            sector_rest_time: 2.0,
            hazard_length: 240.0,
            hazard_width: 28.0,
            sector_hazard_width: 120.0,
        }
    }
}

/// Error type for tuning-load failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn load_tuning_file(path: &Path) -> Result<BossTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron::Options::default()
        .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Load boss tuning from assets at startup, falling back to the
/// compiled defaults when the file is missing or malformed.
pub(crate) fn load_boss_tuning(mut commands: Commands) {
    match load_tuning_file(Path::new(BOSS_TUNING_PATH)) {
        Ok(tuning) => {
            info!("Loaded boss tuning from {}", BOSS_TUNING_PATH);
            commands.insert_resource(tuning);
        }
        Err(err) => {
            warn!("{err}; using default boss tuning");
            commands.insert_resource(BossTuning::default());
        }
    }
}

/// Random-number source for attack aim. Injected as a resource so
/// tests and the debug harness can fix the seed.
#[derive(Resource, Debug)]
pub struct AttackRng(pub ChaCha8Rng);

impl AttackRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for AttackRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}
