//! Session win/lose determination.
//!
//! A play session ends when the operator runs out of health or banks enough
//! credits to buy their way off the station. Checked by the host after each
//! tick; the shift loop itself never ends the session.

use serde::{Deserialize, Serialize};

/// Terminal state of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Still playing.
    Ongoing,
    /// Credit goal reached.
    Won,
    /// Operator health hit zero.
    Lost,
}

/// Decide the session outcome. Death takes precedence over a simultaneous
/// credit win.
pub fn session_outcome(health: f32, credits: f32, win_credits: f32) -> SessionOutcome {
    if health <= 0.0 {
        SessionOutcome::Lost
    } else if credits >= win_credits {
        SessionOutcome::Won
    } else {
        SessionOutcome::Ongoing
    }
}
