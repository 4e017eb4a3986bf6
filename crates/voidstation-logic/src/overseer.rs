//! The station overseer: the AI that grades shifts and ratchets its
//! standards.
//!
//! Policy-driven, efficiency-focused, indifferent to operator comfort. Not
//! evil, not emotional, just corporate optimization. Its difficulty state is
//! the only thing that survives shift boundaries: strictness climbs and
//! tolerance falls a little after every completed shift.

use crate::constants::standards;
use crate::evaluation::{self, ShiftEvaluation};
use crate::metrics::ShiftMetrics;
use serde::{Deserialize, Serialize};

/// Strictness at the first shift.
pub const INITIAL_STRICTNESS: f32 = 1.0;
/// Strictness never exceeds this cap.
pub const STRICTNESS_CAP: f32 = 3.0;
/// Tolerance at the first shift.
pub const INITIAL_TOLERANCE: f32 = 0.7;
/// Tolerance never drops below this floor.
pub const TOLERANCE_FLOOR: f32 = 0.3;
/// How much strictness rises per completed shift. Tolerance falls at half
/// this rate.
pub const PROGRESSION_RATE: f32 = 0.05;

/// Process-lifetime difficulty state. Strictness only rises, tolerance only
/// falls; both are bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overseer {
    strictness: f32,
    tolerance: f32,
    shifts_completed: u32,
    progression_rate: f32,
}

impl Default for Overseer {
    fn default() -> Self {
        Self::new()
    }
}

impl Overseer {
    pub fn new() -> Self {
        Self {
            strictness: INITIAL_STRICTNESS,
            tolerance: INITIAL_TOLERANCE,
            shifts_completed: 0,
            progression_rate: PROGRESSION_RATE,
        }
    }

    /// Build an overseer with a custom escalation rate, for scenario tuning.
    pub fn with_progression_rate(rate: f32) -> Self {
        Self {
            progression_rate: rate.max(0.0),
            ..Self::new()
        }
    }

    pub fn strictness(&self) -> f32 {
        self.strictness
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn shifts_completed(&self) -> u32 {
        self.shifts_completed
    }

    /// Grade a finished shift at the current strictness.
    pub fn evaluate_shift(&self, metrics: &ShiftMetrics, now: f64) -> ShiftEvaluation {
        evaluation::evaluate_shift(metrics, now, self.strictness)
    }

    /// Tighten standards after a shift: strictness up to its cap, tolerance
    /// down to its floor. Never moves either value the other way.
    pub fn increment_shift_progression(&mut self) {
        self.shifts_completed += 1;
        self.strictness = (self.strictness + self.progression_rate).min(STRICTNESS_CAP);
        self.tolerance = (self.tolerance - self.progression_rate * 0.5).max(TOLERANCE_FLOOR);
    }

    /// Which standards band the current strictness falls in.
    pub fn standards_band(&self) -> u8 {
        if self.strictness < 1.2 {
            standards::STANDARD
        } else if self.strictness < 1.5 {
            standards::ELEVATED
        } else if self.strictness < 2.0 {
            standards::HIGH
        } else if self.strictness < 2.5 {
            standards::MAXIMUM
        } else {
            standards::CRITICAL
        }
    }

    /// Read-only status text for the monitor screen.
    pub fn status_report(&self) -> String {
        format!(
            "SYSTEM STATUS\n\
             Shifts Monitored: {}\n\
             Performance Standards: {}\n\
             Efficiency Requirement: {:.0}%",
            self.shifts_completed,
            standards::label(self.standards_band()),
            self.tolerance * 100.0,
        )
    }
}
