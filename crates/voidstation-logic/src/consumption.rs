//! Passive resource drain logic.
//!
//! The station constantly loses oxygen to crew breathing and power to
//! lighting. When the station oxygen tank runs dry the operator breathes
//! from a personal reserve; when that is empty too, health drains. All
//! functions are pure; the engine applies the returned deltas.

use serde::{Deserialize, Serialize};

/// Passive oxygen drain per second at the normal rate.
pub const BREATHE_DRAIN_PER_SECOND: f32 = 0.05;
/// Passive power drain per second per active light fixture.
pub const POWER_DRAIN_PER_LIGHT_PER_SECOND: f32 = 0.05;
/// Emergency drain rate, used by the harness to fast-forward depletion.
pub const SURGE_DRAIN_PER_SECOND: f32 = 100.0;
/// Personal oxygen reserve drain per second once the station tank is dry.
pub const RESERVE_DRAIN_PER_SECOND: f32 = 1.0;
/// Health lost per second once the personal reserve is dry.
pub const SUFFOCATION_DAMAGE_PER_SECOND: f32 = 1.0;
/// Below this the station oxygen tank counts as empty.
pub const OXYGEN_EMPTY_EPSILON: f32 = 0.001;

/// How hard the passive drains run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrainMode {
    /// No passive drain at all.
    Stopped,
    /// Normal play rate.
    Slow,
    /// Accelerated rate for depletion testing.
    Fast,
}

impl DrainMode {
    /// Base drain in units per second for this mode.
    pub fn rate(self) -> f32 {
        match self {
            DrainMode::Stopped => 0.0,
            DrainMode::Slow => BREATHE_DRAIN_PER_SECOND,
            DrainMode::Fast => SURGE_DRAIN_PER_SECOND,
        }
    }
}

/// Oxygen units the crew breathes over `delta_seconds`.
pub fn breathing_drain(mode: DrainMode, delta_seconds: f32) -> f32 {
    mode.rate() * delta_seconds
}

/// Power units the lights draw over `delta_seconds`. Scales with the number
/// of fixtures.
pub fn lighting_drain(mode: DrainMode, light_count: u32, delta_seconds: f32) -> f32 {
    mode.rate() * light_count as f32 * delta_seconds
}

/// Drain a tank, clamping at empty. Returns `(new_amount, actually_drained)`
/// so the caller can meter real consumption.
pub fn drain_tank(amount: f32, drain: f32) -> (f32, f32) {
    let drained = drain.clamp(0.0, amount.max(0.0));
    (amount - drained, drained)
}

/// Whether the station oxygen tank counts as empty for the reserve chain.
pub fn station_oxygen_empty(oxygen_amount: f32) -> bool {
    oxygen_amount < OXYGEN_EMPTY_EPSILON
}

/// Personal reserve drained over `delta_seconds`, nonzero only while the
/// station tank is empty.
pub fn reserve_drain(station_oxygen: f32, delta_seconds: f32) -> f32 {
    if station_oxygen_empty(station_oxygen) {
        RESERVE_DRAIN_PER_SECOND * delta_seconds
    } else {
        0.0
    }
}

/// Health lost to suffocation over `delta_seconds`, nonzero only once the
/// personal reserve is dry.
pub fn suffocation_damage(reserve_remaining: f32, delta_seconds: f32) -> f32 {
    if reserve_remaining <= 0.0 {
        SUFFOCATION_DAMAGE_PER_SECOND * delta_seconds
    } else {
        0.0
    }
}

/// Lights stay on only while the power tank holds anything.
pub fn lights_powered(power_amount: f32) -> bool {
    power_amount > 0.0
}
