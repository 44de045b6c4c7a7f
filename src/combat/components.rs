//! Combat domain: components for the boss agent, hazards, and health.

use bevy::prelude::*;

use crate::combat::patterns::{AttackPattern, PatternCursor};

/// Health component for damageable entities.
///
/// `dead` is monotonic: once an entity dies it stays dead, and both
/// `take_damage` and `heal` become no-ops. Damage is also gated by the
/// invulnerability flag.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
    invulnerable: bool,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
            dead: false,
        }
    }

    /// Apply damage, returning the amount actually removed.
    /// No-op while dead or invulnerable.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if self.dead || self.invulnerable {
            return 0.0;
        }
        let actual = amount.min(self.current);
        self.current -= actual;
        if self.current <= 0.0 {
            self.current = 0.0;
            self.dead = true;
        }
        actual
    }

    /// Restore health up to the maximum, returning the amount restored.
    /// No-op once dead.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.dead {
            return 0.0;
        }
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn set_invulnerable(&mut self, value: bool) {
        self.invulnerable = value;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

#[derive(Component, Debug)]
pub struct Boss;

/// Attack-scheduler state for a boss.
///
/// Invariant: `can_rotate == !is_attacking` at every observation point
/// outside the begin/finish transition itself.
#[derive(Component, Debug)]
pub struct BossAgent {
    /// Maximum turn rate toward the target, degrees per second
    pub rotation_speed: f32,
    /// Countdown to the next timer-driven attack; ticks only while idle
    pub attack_timer: f32,
    /// Position in the cyclic attack sequence
    pub sequence_index: usize,
    pub is_attacking: bool,
    pub can_rotate: bool,
}

impl BossAgent {
    pub fn new(rotation_speed: f32, start_attack_delay: f32) -> Self {
        Self {
            rotation_speed,
            attack_timer: start_attack_delay,
            sequence_index: 0,
            is_attacking: false,
            can_rotate: true,
        }
    }

    /// Enter the executing state. Returns false (and changes nothing) if
    /// a pattern is already running.
    pub fn begin_pattern(&mut self) -> bool {
        if self.is_attacking {
            return false;
        }
        self.is_attacking = true;
        self.can_rotate = false;
        true
    }

    /// Return to idle after a pattern has run to completion.
    pub fn finish_pattern(&mut self) {
        self.is_attacking = false;
        self.can_rotate = true;
    }

    /// Step the cyclic sequence index, wrapping at the sequence length.
    pub fn advance_sequence(&mut self, sequence_len: usize) {
        if sequence_len > 0 {
            self.sequence_index = (self.sequence_index + 1) % sequence_len;
        }
    }
}

/// The single currently-executing pattern on a boss. Its presence is
/// the Executing state; removal returns the agent to Idle.
#[derive(Component, Debug)]
pub struct ActivePattern {
    pub pattern: AttackPattern,
    pub cursor: PatternCursor,
    /// Forward orientation frozen at pattern start; angle offsets are
    /// relative to this, never re-sampled mid-pattern.
    pub base_angle: f32,
    /// Timer-driven patterns advance the cyclic index on completion,
    /// directly-requested ones do not.
    pub from_cycle: bool,
}

impl ActivePattern {
    pub fn new(pattern: AttackPattern, base_angle: f32, from_cycle: bool) -> Self {
        Self {
            pattern,
            cursor: PatternCursor::default(),
            base_angle,
            from_cycle,
        }
    }
}

/// Parameters for the strike a telegraph produces when it expires.
#[derive(Debug, Clone, Copy)]
pub struct StrikeSpec {
    pub damage: f32,
    pub lifetime: f32,
    pub size: Vec2,
}

/// A damaging strike hazard. Damage applies at most once per instance,
/// however many overlap events arrive before expiry.
#[derive(Component, Debug)]
pub struct Hazard {
    pub damage: f32,
    has_dealt_damage: bool,
}

impl Hazard {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            has_dealt_damage: false,
        }
    }

    /// Claim this hazard's single damage application. True exactly once.
    pub fn try_deal(&mut self) -> bool {
        if self.has_dealt_damage {
            return false;
        }
        self.has_dealt_damage = true;
        true
    }

    pub fn has_dealt_damage(&self) -> bool {
        self.has_dealt_damage
    }
}

/// A non-damaging warning hazard. When its lifetime expires it spawns
/// the strike described by `strike` at its own frozen transform, or
/// simply despawns when the pattern issues the strikes itself.
#[derive(Component, Debug)]
pub struct Telegraph {
    pub strike: Option<StrikeSpec>,
}

/// Remaining lifetime for transient hazard entities.
#[derive(Component, Debug)]
pub struct HazardLifetime(pub f32);

/// Perpetual sector-sweep loop: telegraph a random angle inside the
/// sector, strike when the telegraph expires, rest, repeat. Runs
/// independently of the scheduler's mutual exclusion.
#[derive(Component, Debug)]
pub struct SectorSweep {
    /// Half-width of the aim sector, degrees either side of forward
    pub half_angle: f32,
    /// How long the warning is shown before the strike
    pub warning_time: f32,
    /// Pause after each strike before the next telegraph
    pub rest_time: f32,
    /// Countdown to the next telegraph
    pub timer: f32,
}

impl SectorSweep {
    pub fn new(half_angle: f32, warning_time: f32, rest_time: f32) -> Self {
        Self {
            half_angle,
            warning_time,
            rest_time,
            timer: 0.0,
        }
    }
}
