//! Per-shift performance accumulator.
//!
//! One `ShiftMetrics` instance is owned by the active shift: created when the
//! shift starts, finalized when it ends, and reset wholesale by the next
//! `start_shift`. Room counting is idempotent per room type, so re-entering a
//! room never double-counts an attempt.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything the overseer sees about a single shift.
///
/// Counters only move upward while the shift is open. Timestamps are seconds
/// on the engine's monotonic sim clock; `shift_end_time == 0.0` means the
/// shift is still open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftMetrics {
    // Task performance
    pub tasks_attempted: u32,
    pub tasks_completed: u32,
    pub tasks_abandoned: u32,

    // Resource management
    pub resources_consumed: f32,
    pub money_earned: f32,

    // Time tracking
    pub shift_start_time: f64,
    pub shift_end_time: f64,

    // Safety
    pub contamination_events: u32,
    pub health_lost: f32,

    // Idempotence bookkeeping: which room types were entered / completed
    rooms_entered: BTreeSet<u8>,
    rooms_completed: BTreeSet<u8>,
    room_entry_time: BTreeMap<u8, f64>,
    room_time_spent: BTreeMap<u8, f64>,
}

impl ShiftMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new shift at `now`, discarding anything accumulated so far.
    /// Safe to call over an unfinished shift.
    pub fn start_shift(&mut self, now: f64) {
        *self = Self::default();
        self.shift_start_time = now;
    }

    /// Finalize timing and derive the abandonment count: rooms entered but
    /// never completed. Never negative, since completion implies entry.
    pub fn end_shift(&mut self, now: f64) {
        self.shift_end_time = now;
        self.tasks_abandoned = (self.rooms_entered.len() as u32)
            .saturating_sub(self.rooms_completed.len() as u32);
    }

    /// Count an attempt the first time each room type is entered this shift.
    pub fn record_room_entered(&mut self, room: u8, now: f64) {
        if self.rooms_entered.insert(room) {
            self.room_entry_time.insert(room, now);
            self.tasks_attempted += 1;
        }
    }

    /// Count a completion the first time each room type is completed.
    pub fn record_room_completed(&mut self, room: u8, now: f64) {
        if self.rooms_completed.insert(room) {
            self.tasks_completed += 1;
            if let Some(entered) = self.room_entry_time.get(&room) {
                self.room_time_spent.insert(room, now - entered);
            }
        }
    }

    /// Record a room exit. Changes no counters; abandonment is derived at
    /// shift end. Returns true when the exit walked away from an unfinished
    /// task, so the caller can log it.
    pub fn record_room_exited(&mut self, room: u8, was_completed: bool, now: f64) -> bool {
        let abandoned = !was_completed
            && self.rooms_entered.contains(&room)
            && !self.rooms_completed.contains(&room);
        if abandoned {
            if let Some(entered) = self.room_entry_time.get(&room) {
                self.room_time_spent.insert(room, now - entered);
            }
        }
        abandoned
    }

    /// Record one contamination timer expiration. The caller is responsible
    /// for edge-triggering: at most one call per expiration.
    pub fn record_contamination_event(&mut self) {
        self.contamination_events += 1;
    }

    /// Accumulate health damage taken this shift. Negative amounts are
    /// ignored to keep the counter monotonic.
    pub fn record_health_loss(&mut self, amount: f32) {
        self.health_lost += amount.max(0.0);
    }

    /// Accumulate station resources drained this shift.
    pub fn record_resources_consumed(&mut self, amount: f32) {
        self.resources_consumed += amount.max(0.0);
    }

    /// Accumulate credits produced this shift.
    pub fn record_money_earned(&mut self, amount: f32) {
        self.money_earned += amount.max(0.0);
    }

    // ── Derived values ──────────────────────────────────────────────────

    /// Shift duration in seconds. For a still-open shift, measured up to
    /// `now`.
    pub fn shift_duration(&self, now: f64) -> f64 {
        if self.shift_end_time > 0.0 {
            self.shift_end_time - self.shift_start_time
        } else {
            now - self.shift_start_time
        }
    }

    /// Fraction of attempted tasks that were completed, 0 when nothing was
    /// attempted.
    pub fn completion_rate(&self) -> f32 {
        if self.tasks_attempted == 0 {
            0.0
        } else {
            self.tasks_completed as f32 / self.tasks_attempted as f32
        }
    }

    /// Fraction of attempted tasks that were abandoned.
    pub fn abandonment_rate(&self) -> f32 {
        if self.tasks_attempted == 0 {
            0.0
        } else {
            self.tasks_abandoned as f32 / self.tasks_attempted as f32
        }
    }

    /// Credits earned per unit of resource drained, 0 when nothing was
    /// consumed.
    pub fn efficiency_ratio(&self) -> f32 {
        if self.resources_consumed <= 0.0 {
            0.0
        } else {
            self.money_earned / self.resources_consumed
        }
    }

    /// Mean seconds spent per completed task.
    pub fn average_task_time(&self) -> f64 {
        if self.tasks_completed == 0 {
            return 0.0;
        }
        let total: f64 = self.room_time_spent.values().sum();
        total / self.tasks_completed as f64
    }

    /// A shift with no violations, no damage, no abandonment, and full
    /// completion.
    pub fn is_perfect_shift(&self) -> bool {
        self.contamination_events == 0
            && self.health_lost == 0.0
            && self.tasks_abandoned == 0
            && self.tasks_attempted > 0
            && self.completion_rate() == 1.0
    }

    /// Plain-text shift summary for logs and the headless harness.
    pub fn summary(&self, now: f64) -> String {
        format!(
            "=== SHIFT SUMMARY ===\n\
             Duration: {:.1}s\n\
             Tasks: {}/{} completed\n\
             Abandoned: {}\n\
             Resources: {:.0} consumed\n\
             Revenue: ${:.0}\n\
             Efficiency: {:.2}:1\n\
             Safety: {} violations, {:.0} damage\n\
             Perfect: {}",
            self.shift_duration(now),
            self.tasks_completed,
            self.tasks_attempted,
            self.tasks_abandoned,
            self.resources_consumed,
            self.money_earned,
            self.efficiency_ratio(),
            self.contamination_events,
            self.health_lost,
            self.is_perfect_shift(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::room_types;

    #[test]
    fn test_start_shift_resets_everything() {
        let mut m = ShiftMetrics::new();
        m.start_shift(10.0);
        m.record_room_entered(room_types::POWER, 11.0);
        m.record_money_earned(50.0);
        m.record_contamination_event();

        m.start_shift(100.0);
        assert_eq!(m.tasks_attempted, 0);
        assert_eq!(m.money_earned, 0.0);
        assert_eq!(m.contamination_events, 0);
        assert_eq!(m.shift_start_time, 100.0);
        assert_eq!(m.shift_end_time, 0.0);
    }

    #[test]
    fn test_room_entry_idempotent() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_entered(room_types::POWER, 2.0);
        m.record_room_entered(room_types::POWER, 3.0);
        assert_eq!(m.tasks_attempted, 1);

        m.record_room_entered(room_types::OXYGEN, 4.0);
        assert_eq!(m.tasks_attempted, 2);
    }

    #[test]
    fn test_room_completion_idempotent() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_completed(room_types::POWER, 5.0);
        m.record_room_completed(room_types::POWER, 6.0);
        assert_eq!(m.tasks_completed, 1);
    }

    #[test]
    fn test_abandonment_derived_at_end() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_entered(room_types::OXYGEN, 2.0);
        m.record_room_completed(room_types::POWER, 10.0);
        m.end_shift(600.0);
        assert_eq!(m.tasks_abandoned, 1);
    }

    #[test]
    fn test_empty_shift_abandons_nothing() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.end_shift(0.0);
        assert_eq!(m.tasks_abandoned, 0);
        assert_eq!(m.tasks_attempted, 0);
    }

    #[test]
    fn test_exit_flags_abandonment_without_counting() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);

        assert!(m.record_room_exited(room_types::POWER, false, 20.0));
        assert_eq!(m.tasks_abandoned, 0); // only derived at end_shift

        m.record_room_entered(room_types::OXYGEN, 30.0);
        m.record_room_completed(room_types::OXYGEN, 40.0);
        assert!(!m.record_room_exited(room_types::OXYGEN, true, 41.0));
    }

    #[test]
    fn test_duration_open_and_closed() {
        let mut m = ShiftMetrics::new();
        m.start_shift(100.0);
        assert!((m.shift_duration(160.0) - 60.0).abs() < 1e-9);
        m.end_shift(700.0);
        // Once closed, `now` no longer matters
        assert!((m.shift_duration(9999.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_amounts_ignored() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_health_loss(-5.0);
        m.record_money_earned(-100.0);
        m.record_resources_consumed(-1.0);
        assert_eq!(m.health_lost, 0.0);
        assert_eq!(m.money_earned, 0.0);
        assert_eq!(m.resources_consumed, 0.0);
    }

    #[test]
    fn test_efficiency_ratio_guard() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_money_earned(300.0);
        assert_eq!(m.efficiency_ratio(), 0.0);
        m.record_resources_consumed(100.0);
        assert!((m.efficiency_ratio() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_task_time() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 10.0);
        m.record_room_completed(room_types::POWER, 40.0); // 30s
        m.record_room_entered(room_types::OXYGEN, 50.0);
        m.record_room_completed(room_types::OXYGEN, 60.0); // 10s
        assert!((m.average_task_time() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_shift() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_completed(room_types::POWER, 2.0);
        m.end_shift(600.0);
        assert!(m.is_perfect_shift());

        let mut n = m.clone();
        n.record_contamination_event();
        assert!(!n.is_perfect_shift());
    }

    #[test]
    fn test_zero_activity_shift_not_perfect() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.end_shift(600.0);
        assert!(!m.is_perfect_shift());
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_completed(room_types::POWER, 2.0);
        m.end_shift(300.0);
        let s = m.summary(300.0);
        assert!(s.contains("1/1 completed"));
        assert!(s.contains("Duration: 300.0s"));
    }
}
