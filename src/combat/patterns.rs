//! Combat domain: the attack pattern library and its step interpreter.
//!
//! Every pattern is an ordered list of steps over angle offsets from the
//! boss's forward direction at pattern start. Telegraph steps place the
//! warnings, strike steps place the damage, wait steps suspend the
//! pattern without blocking the rest of the simulation.

use crate::combat::resources::BossTuning;

/// One step of an attack pattern. Angles are degrees, clockwise offsets
/// from the frozen pattern-start orientation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternStep {
    /// Place non-damaging warnings at the given offsets
    Telegraphs { angles: Vec<f32>, lifetime: f32 },
    /// Suspend the pattern for the given duration
    Wait(f32),
    /// Place damaging strikes at the given offsets
    Strikes { angles: Vec<f32> },
}

/// An immutable attack-pattern definition.
#[derive(Debug, Clone)]
pub struct AttackPattern {
    pub name: &'static str,
    pub steps: Vec<PatternStep>,
}

impl AttackPattern {
    /// Telegraph offsets placed over the whole pattern, in order.
    pub fn telegraph_angles(&self) -> Vec<f32> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PatternStep::Telegraphs { angles, .. } => Some(angles.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Strike offsets placed over the whole pattern, in order.
    pub fn strike_angles(&self) -> Vec<f32> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PatternStep::Strikes { angles } => Some(angles.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

/// Library pattern ids. The raw values are the attack numbers used by
/// the configured cyclic sequence (and the debug harness hotkeys).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    CrossThenDiagonal = 2,
    FullCircle = 3,
    Spiral = 4,
    DoubleWave = 5,
}

impl PatternId {
    /// Resolve a raw sequence entry. Unknown ids are a configuration
    /// error the scheduler degrades on rather than aborting.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            2 => Some(Self::CrossThenDiagonal),
            3 => Some(Self::FullCircle),
            4 => Some(Self::Spiral),
            5 => Some(Self::DoubleWave),
            _ => None,
        }
    }

    pub fn build(self, tuning: &BossTuning) -> AttackPattern {
        match self {
            Self::CrossThenDiagonal => cross_then_diagonal(tuning),
            Self::FullCircle => full_circle(tuning),
            Self::Spiral => spiral(tuning),
            Self::DoubleWave => double_wave(tuning),
        }
    }
}

/// Telegraph a set of angles, wait out the warning, strike them all.
fn volley(angles: &[f32], warning: f32, steps: &mut Vec<PatternStep>) {
    steps.push(PatternStep::Telegraphs {
        angles: angles.to_vec(),
        lifetime: warning,
    });
    steps.push(PatternStep::Wait(warning));
    steps.push(PatternStep::Strikes {
        angles: angles.to_vec(),
    });
}

/// Cross at 0/90/180/270, then the diagonals at 45/135/225/315.
pub fn cross_then_diagonal(tuning: &BossTuning) -> AttackPattern {
    let mut steps = Vec::new();
    volley(&[0.0, 90.0, 180.0, 270.0], tuning.warning_duration, &mut steps);
    steps.push(PatternStep::Wait(tuning.delay_between_patterns));
    volley(&[45.0, 135.0, 225.0, 315.0], tuning.warning_duration, &mut steps);
    steps.push(PatternStep::Wait(tuning.delay_between_patterns));
    AttackPattern {
        name: "cross_then_diagonal",
        steps,
    }
}

/// Rotating single-point sweep: telegraph and strike are interleaved
/// per angle rather than batched.
fn interleaved_sweep(
    name: &'static str,
    angle_step: f32,
    warning: f32,
    hit_interval: f32,
    trailing_delay: f32,
) -> AttackPattern {
    let mut steps = Vec::new();
    let mut angle = 0.0;
    while angle < 360.0 {
        volley(&[angle], warning, &mut steps);
        steps.push(PatternStep::Wait(hit_interval));
        angle += angle_step;
    }
    steps.push(PatternStep::Wait(trailing_delay));
    AttackPattern { name, steps }
}

pub fn full_circle(tuning: &BossTuning) -> AttackPattern {
    interleaved_sweep(
        "full_circle",
        tuning.full_circle_angle_step,
        tuning.full_circle_warning_duration,
        tuning.full_circle_hit_interval,
        tuning.delay_between_patterns,
    )
}

/// Like the full circle but with a fixed fine step and fixed timings,
/// independent of the full-circle tuning.
pub fn spiral(tuning: &BossTuning) -> AttackPattern {
    interleaved_sweep("spiral", 15.0, 0.15, 0.15, tuning.delay_between_patterns)
}

/// Five strikes sweeping the left flank, a short gap, then the
/// mirrored five on the right.
pub fn double_wave(tuning: &BossTuning) -> AttackPattern {
    let mut steps = Vec::new();
    volley(
        &[-90.0, -70.0, -50.0, -30.0, -10.0],
        tuning.warning_duration,
        &mut steps,
    );
    steps.push(PatternStep::Wait(0.5));
    volley(
        &[10.0, 30.0, 50.0, 70.0, 90.0],
        tuning.warning_duration,
        &mut steps,
    );
    steps.push(PatternStep::Wait(tuning.delay_between_patterns));
    AttackPattern {
        name: "double_wave",
        steps,
    }
}

/// Execution position inside a running pattern: current step plus the
/// time already spent in it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PatternCursor {
    pub step_index: usize,
    pub elapsed: f32,
}

impl PatternCursor {
    /// Advance by one tick's worth of time, emitting every spawn step
    /// crossed. Spawn steps are instantaneous; `Wait` steps consume the
    /// tick budget, carrying remainders across step boundaries so long
    /// ticks do not stretch the pattern. Returns true once the final
    /// step has completed.
    pub fn advance(
        &mut self,
        pattern: &AttackPattern,
        dt: f32,
        mut emit: impl FnMut(&PatternStep),
    ) -> bool {
        let mut budget = dt;
        while let Some(step) = pattern.steps.get(self.step_index) {
            match step {
                PatternStep::Telegraphs { .. } | PatternStep::Strikes { .. } => {
                    emit(step);
                    self.step_index += 1;
                }
                PatternStep::Wait(duration) => {
                    let remaining = duration - self.elapsed;
                    if budget < remaining {
                        self.elapsed += budget;
                        return false;
                    }
                    budget -= remaining;
                    self.elapsed = 0.0;
                    self.step_index += 1;
                }
            }
        }
        true
    }
}
