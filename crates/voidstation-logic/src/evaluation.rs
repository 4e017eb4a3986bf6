//! Shift scoring and classification.
//!
//! The overseer grades each shift on four weighted axes (completion,
//! efficiency, time, safety), compresses the result by its current
//! strictness, and maps the final score onto a fixed ladder of seven
//! performance tiers. Scoring is a pure function of the metrics snapshot
//! plus the strictness scalar.

use crate::metrics::ShiftMetrics;
use serde::{Deserialize, Serialize};

/// Weight of the task completion axis in the overall score.
pub const COMPLETION_WEIGHT: f32 = 0.4;
/// Weight of the resource efficiency axis.
pub const EFFICIENCY_WEIGHT: f32 = 0.3;
/// Weight of the shift timing axis.
pub const TIME_WEIGHT: f32 = 0.2;
/// Weight of the safety axis.
pub const SAFETY_WEIGHT: f32 = 0.1;

/// Target revenue per unit of resource: earn $3 for every unit drained.
pub const IDEAL_EFFICIENCY_RATIO: f32 = 3.0;
/// Expected shift duration in seconds; deviation in either direction is
/// penalized symmetrically.
pub const EXPECTED_SHIFT_SECONDS: f32 = 600.0;
/// Completion score lost per abandoned task.
pub const ABANDONMENT_PENALTY: f32 = 0.1;
/// Safety score lost per contamination event.
pub const CONTAMINATION_PENALTY: f32 = 0.2;
/// Safety score lost per 100 points of health damage.
pub const HEALTH_DAMAGE_PENALTY: f32 = 0.3;

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Performance tiers, worst to best. `Ord` follows tier quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    UnproductiveShift,
    InefficientProcess,
    SuboptimalBehavior,
    AcceptablePerformance,
    AdequateAsset,
    EfficientOperator,
    ExemplaryOperator,
}

/// Tiers in lookup order: highest threshold first. The walk must start at
/// the top, or a low qualifying tier would win over a higher one.
const TIERS_DESCENDING: [Classification; 7] = [
    Classification::ExemplaryOperator,
    Classification::EfficientOperator,
    Classification::AdequateAsset,
    Classification::AcceptablePerformance,
    Classification::SuboptimalBehavior,
    Classification::InefficientProcess,
    Classification::UnproductiveShift,
];

impl Classification {
    /// Minimum overall score for this tier at strictness 1.0.
    pub fn base_threshold(self) -> f32 {
        match self {
            Classification::ExemplaryOperator => 0.95,
            Classification::EfficientOperator => 0.85,
            Classification::AdequateAsset => 0.70,
            Classification::AcceptablePerformance => 0.55,
            Classification::SuboptimalBehavior => 0.40,
            Classification::InefficientProcess => 0.25,
            Classification::UnproductiveShift => 0.0,
        }
    }

    /// The label the overseer prints on the evaluation screen.
    pub fn label(self) -> &'static str {
        match self {
            Classification::ExemplaryOperator => "EXEMPLARY OPERATOR",
            Classification::EfficientOperator => "EFFICIENT OPERATOR",
            Classification::AdequateAsset => "ADEQUATE ASSET",
            Classification::AcceptablePerformance => "ACCEPTABLE PERFORMANCE",
            Classification::SuboptimalBehavior => "SUBOPTIMAL BEHAVIOR",
            Classification::InefficientProcess => "INEFFICIENT PROCESS",
            Classification::UnproductiveShift => "UNPRODUCTIVE SHIFT",
        }
    }

    /// Map an overall score to a tier. Thresholds scale up with strictness,
    /// so every tier gets harder to reach as the overseer escalates.
    pub fn from_score(score: f32, strictness: f32) -> Self {
        for tier in TIERS_DESCENDING {
            if score >= tier.base_threshold() * strictness {
                return tier;
            }
        }
        Classification::UnproductiveShift
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The overseer's verdict on one shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftEvaluation {
    pub overall_score: f32,
    pub completion_score: f32,
    pub efficiency_score: f32,
    pub time_score: f32,
    pub safety_score: f32,
    pub classification: Classification,
    /// Formatted report for the evaluation screen.
    pub report: String,
    /// Behavioral patterns the overseer noticed, one line each.
    pub observations: Vec<String>,
}

/// Completion axis: completion rate minus an abandonment penalty. A shift
/// with no attempted tasks scores 0; doing nothing is never rewarded.
pub fn completion_score(metrics: &ShiftMetrics) -> f32 {
    if metrics.tasks_attempted == 0 {
        return 0.0;
    }
    let penalty = metrics.tasks_abandoned as f32 * ABANDONMENT_PENALTY;
    clamp01(metrics.completion_rate() - penalty)
}

/// Efficiency axis: revenue-to-consumption ratio against the ideal. Zero
/// consumption scores 0, which also guards the division.
pub fn efficiency_score(metrics: &ShiftMetrics) -> f32 {
    if metrics.resources_consumed <= 0.0 {
        return 0.0;
    }
    let ratio = metrics.money_earned / metrics.resources_consumed;
    clamp01(ratio / IDEAL_EFFICIENCY_RATIO)
}

/// Time axis: symmetric penalty for running short or long of the expected
/// shift length.
pub fn time_score(duration_seconds: f64) -> f32 {
    let deviation =
        (duration_seconds as f32 - EXPECTED_SHIFT_SECONDS).abs() / EXPECTED_SHIFT_SECONDS;
    clamp01(1.0 - deviation)
}

/// Safety axis: contamination events and health damage both cost score.
pub fn safety_score(metrics: &ShiftMetrics) -> f32 {
    let contamination = metrics.contamination_events as f32 * CONTAMINATION_PENALTY;
    let damage = (metrics.health_lost / 100.0) * HEALTH_DAMAGE_PENALTY;
    clamp01(1.0 - contamination - damage)
}

/// Grade a finished shift. `now` resolves the duration of a shift that was
/// never formally ended; `strictness` compresses the achievable score.
pub fn evaluate_shift(metrics: &ShiftMetrics, now: f64, strictness: f32) -> ShiftEvaluation {
    let completion = completion_score(metrics);
    let efficiency = efficiency_score(metrics);
    let time = time_score(metrics.shift_duration(now));
    let safety = safety_score(metrics);

    let weighted = completion * COMPLETION_WEIGHT
        + efficiency * EFFICIENCY_WEIGHT
        + time * TIME_WEIGHT
        + safety * SAFETY_WEIGHT;
    let overall = clamp01(weighted / strictness);

    let classification = Classification::from_score(overall, strictness);

    let mut evaluation = ShiftEvaluation {
        overall_score: overall,
        completion_score: completion,
        efficiency_score: efficiency,
        time_score: time,
        safety_score: safety,
        classification,
        report: String::new(),
        observations: Vec::new(),
    };
    evaluation.report = build_report(metrics, &evaluation);
    evaluation.observations = build_observations(metrics, &evaluation);
    evaluation
}

/// Deterministic report text. Sections for abandonment and safety appear
/// only when their counts are nonzero.
fn build_report(metrics: &ShiftMetrics, evaluation: &ShiftEvaluation) -> String {
    let mut report = String::from("SHIFT EVALUATION REPORT\n");
    report.push_str(&format!(
        "Classification: {}\n\n",
        evaluation.classification
    ));

    report.push_str("TASK COMPLETION\n");
    report.push_str(&format!("Tasks Attempted: {}\n", metrics.tasks_attempted));
    report.push_str(&format!("Tasks Completed: {}\n", metrics.tasks_completed));
    if metrics.tasks_abandoned > 0 {
        report.push_str(&format!("Tasks Abandoned: {}\n", metrics.tasks_abandoned));
    }

    report.push_str("\nRESOURCE EFFICIENCY\n");
    report.push_str(&format!(
        "Resources Consumed: {:.0} units\n",
        metrics.resources_consumed
    ));
    report.push_str(&format!(
        "Revenue Generated: ${:.0}\n",
        metrics.money_earned
    ));
    // Display ratio floors the denominator at 1 so an idle shift prints a
    // finite number; the efficiency *score* still treats it as zero.
    let display_ratio = metrics.money_earned / metrics.resources_consumed.max(1.0);
    report.push_str(&format!("Efficiency Ratio: {:.2}:1\n", display_ratio));

    if metrics.contamination_events > 0 || metrics.health_lost > 0.0 {
        report.push_str("\nSAFETY PROTOCOLS\n");
        if metrics.contamination_events > 0 {
            report.push_str(&format!(
                "Protocol Violations: {}\n",
                metrics.contamination_events
            ));
        }
        if metrics.health_lost > 0.0 {
            report.push_str(&format!("Health Damage: {:.0} units\n", metrics.health_lost));
        }
    }

    report
}

/// Independent pattern checks, each contributing at most one line. No check
/// depends on another.
fn build_observations(metrics: &ShiftMetrics, evaluation: &ShiftEvaluation) -> Vec<String> {
    let mut observations = Vec::new();

    if metrics.tasks_attempted > 0 && metrics.tasks_completed == metrics.tasks_attempted {
        observations.push("Note: 100% completion rate observed.".to_string());
    }

    if evaluation.time_score < 0.5 && evaluation.completion_score > 0.9 {
        observations.push("Note: Extended shift duration for completion.".to_string());
    }

    if evaluation.efficiency_score < 0.5 {
        observations.push("Advisory: Resource consumption exceeds production value.".to_string());
    }

    if metrics.contamination_events > 2 {
        observations.push("Warning: Multiple safety protocol violations detected.".to_string());
    }

    if metrics.tasks_abandoned > metrics.tasks_completed {
        observations.push("Note: High task abandonment ratio detected.".to_string());
    }

    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::room_types;

    /// A clean ten-minute shift: both rooms worked, 3:1 efficiency, no
    /// incidents.
    fn perfect_metrics() -> ShiftMetrics {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_completed(room_types::POWER, 100.0);
        m.record_room_entered(room_types::OXYGEN, 150.0);
        m.record_room_completed(room_types::OXYGEN, 250.0);
        m.record_resources_consumed(100.0);
        m.record_money_earned(300.0);
        m.end_shift(600.0);
        m
    }

    #[test]
    fn test_perfect_shift_is_exemplary() {
        let m = perfect_metrics();
        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert!((eval.completion_score - 1.0).abs() < 1e-6);
        assert!((eval.efficiency_score - 1.0).abs() < 1e-6);
        assert!((eval.time_score - 1.0).abs() < 1e-6);
        assert!((eval.safety_score - 1.0).abs() < 1e-6);
        assert!((eval.overall_score - 1.0).abs() < 1e-6);
        assert_eq!(eval.classification, Classification::ExemplaryOperator);
    }

    #[test]
    fn test_ten_task_reference_scenario() {
        // 10 attempted, 10 completed, 3:1 efficiency, exactly on time, no
        // incidents: every axis lands at 1.0.
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        for room in 0..10u8 {
            m.record_room_entered(room, 1.0);
            m.record_room_completed(room, 2.0);
        }
        m.record_resources_consumed(100.0);
        m.record_money_earned(300.0);
        m.end_shift(600.0);

        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert_eq!(m.tasks_attempted, 10);
        assert_eq!(m.tasks_abandoned, 0);
        assert!((eval.completion_score - 1.0).abs() < 1e-6);
        assert!((eval.efficiency_score - 1.0).abs() < 1e-6);
        assert!((eval.time_score - 1.0).abs() < 1e-6);
        assert!((eval.safety_score - 1.0).abs() < 1e-6);
        assert_eq!(eval.classification, Classification::ExemplaryOperator);
    }

    #[test]
    fn test_no_attempts_zeroes_completion() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_resources_consumed(100.0);
        m.record_money_earned(300.0);
        m.end_shift(600.0);

        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert_eq!(eval.completion_score, 0.0);
        // Lost the full 0.4 completion weight
        assert!((eval.overall_score - 0.6).abs() < 1e-6);
        assert_ne!(eval.classification, Classification::ExemplaryOperator);
        assert_eq!(eval.classification, Classification::AcceptablePerformance);
    }

    #[test]
    fn test_no_consumption_zeroes_efficiency() {
        let mut m = perfect_metrics();
        m.resources_consumed = 0.0;
        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert_eq!(eval.efficiency_score, 0.0);
    }

    #[test]
    fn test_safety_clamps_at_zero() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        for _ in 0..6 {
            m.record_contamination_event();
        }
        m.end_shift(600.0);
        // 6 * 0.2 = 1.2 worth of penalty, clamped
        assert_eq!(safety_score(&m), 0.0);
    }

    #[test]
    fn test_time_score_symmetric() {
        assert!((time_score(600.0) - 1.0).abs() < 1e-6);
        let short = time_score(300.0);
        let long = time_score(900.0);
        assert!((short - long).abs() < 1e-6);
        assert!((short - 0.5).abs() < 1e-6);
        // Extreme overrun clamps rather than going negative
        assert_eq!(time_score(10_000.0), 0.0);
    }

    #[test]
    fn test_abandonment_penalty() {
        let mut m = ShiftMetrics::new();
        m.start_shift(0.0);
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_entered(room_types::OXYGEN, 2.0);
        m.record_room_completed(room_types::POWER, 10.0);
        m.end_shift(600.0);
        // rate 0.5 minus one abandonment * 0.1
        assert!((completion_score(&m) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_overall_always_in_unit_interval() {
        // Sweep a grid of hostile inputs; the clamp invariant must hold.
        for attempted in [0u32, 1, 10, 100] {
            for contamination in [0u32, 3, 50] {
                for strictness in [1.0f32, 1.5, 3.0] {
                    let mut m = ShiftMetrics::new();
                    m.start_shift(0.0);
                    for r in 0..attempted.min(2) {
                        m.record_room_entered(r as u8, 1.0);
                    }
                    for _ in 0..contamination {
                        m.record_contamination_event();
                    }
                    m.record_resources_consumed(1.0);
                    m.record_money_earned(1_000_000.0);
                    m.record_health_loss(10_000.0);
                    m.end_shift(50_000.0);
                    let eval = evaluate_shift(&m, 50_000.0, strictness);
                    assert!((0.0..=1.0).contains(&eval.overall_score));
                }
            }
        }
    }

    #[test]
    fn test_classification_monotonic_in_score() {
        for strictness in [1.0f32, 1.3, 2.0, 3.0] {
            let mut previous = Classification::UnproductiveShift;
            let mut score = 0.0f32;
            while score <= 1.0 {
                let tier = Classification::from_score(score, strictness);
                assert!(tier >= previous, "tier dropped at score {}", score);
                previous = tier;
                score += 0.01;
            }
        }
    }

    #[test]
    fn test_thresholds_scale_with_strictness() {
        // 0.95 qualifies as exemplary only at strictness 1.0
        assert_eq!(
            Classification::from_score(0.95, 1.0),
            Classification::ExemplaryOperator
        );
        assert_ne!(
            Classification::from_score(0.95, 1.2),
            Classification::ExemplaryOperator
        );
        // At max strictness even a flawless score only clears tiers whose
        // scaled threshold fits under 1.0 (0.25 * 3.0 = 0.75)
        assert_eq!(
            Classification::from_score(1.0, 3.0),
            Classification::InefficientProcess
        );
    }

    #[test]
    fn test_lowest_tier_always_reachable() {
        assert_eq!(
            Classification::from_score(0.0, 3.0),
            Classification::UnproductiveShift
        );
    }

    #[test]
    fn test_report_sections_conditional() {
        let m = perfect_metrics();
        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert!(eval.report.contains("SHIFT EVALUATION REPORT"));
        assert!(eval.report.contains("Tasks Attempted: 2"));
        assert!(!eval.report.contains("Tasks Abandoned"));
        assert!(!eval.report.contains("SAFETY PROTOCOLS"));

        let mut messy = perfect_metrics();
        messy.record_contamination_event();
        messy.record_health_loss(25.0);
        let eval = evaluate_shift(&messy, 600.0, 1.0);
        assert!(eval.report.contains("SAFETY PROTOCOLS"));
        assert!(eval.report.contains("Protocol Violations: 1"));
        assert!(eval.report.contains("Health Damage: 25 units"));
    }

    #[test]
    fn test_observations() {
        let m = perfect_metrics();
        let eval = evaluate_shift(&m, 600.0, 1.0);
        assert!(eval
            .observations
            .iter()
            .any(|o| o.contains("100% completion")));

        let mut risky = ShiftMetrics::new();
        risky.start_shift(0.0);
        risky.record_room_entered(room_types::POWER, 1.0);
        for _ in 0..3 {
            risky.record_contamination_event();
        }
        risky.end_shift(600.0);
        let eval = evaluate_shift(&risky, 600.0, 1.0);
        assert!(eval.observations.iter().any(|o| o.starts_with("Warning")));
        assert!(eval
            .observations
            .iter()
            .any(|o| o.contains("abandonment ratio")));
    }

    #[test]
    fn test_strictness_compresses_score() {
        let m = perfect_metrics();
        let lenient = evaluate_shift(&m, 600.0, 1.0);
        let strict = evaluate_shift(&m, 600.0, 2.0);
        assert!(strict.overall_score < lenient.overall_score);
        assert!((strict.overall_score - 0.5).abs() < 1e-6);
    }
}
