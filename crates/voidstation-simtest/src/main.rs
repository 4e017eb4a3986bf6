//! VoidStation Headless Simulation Harness
//!
//! Validates pure simulation logic and data without a frontend.
//! Runs entirely in-process: no rendering, no input, no networking.
//!
//! Usage:
//!   cargo run -p voidstation-simtest
//!   cargo run -p voidstation-simtest -- --verbose

use voidstation_core::prelude::*;
use voidstation_logic::constants::room_types;
use voidstation_logic::consumption::{self, DrainMode};
use voidstation_logic::evaluation::{self, Classification};
use voidstation_logic::manifest::{validate_manifest, StationManifest};
use voidstation_logic::metrics::ShiftMetrics;
use voidstation_logic::overseer::{Overseer, STRICTNESS_CAP, TOLERANCE_FLOOR};
use voidstation_logic::puzzles;
use voidstation_logic::session::SessionOutcome;

// ── Station manifest (same JSON the generator consumes) ─────────────────
const MANIFEST_JSON: &str = include_str!("../../../data/station_manifest.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== VoidStation Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Station manifest validation
    results.extend(validate_station_manifest(verbose));

    // 2. Metrics accumulator sweep
    results.extend(validate_metrics(verbose));

    // 3. Evaluation scoring properties
    results.extend(validate_evaluation(verbose));

    // 4. Overseer progression
    results.extend(validate_overseer(verbose));

    // 5. Shift lifecycle on a live engine
    results.extend(validate_lifecycle(verbose));

    // 6. Consumption math
    results.extend(validate_consumption(verbose));

    // 7. Puzzle scaling sweep
    results.extend(validate_puzzles(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Station Manifest ─────────────────────────────────────────────────

fn validate_station_manifest(verbose: bool) -> Vec<TestResult> {
    println!("--- Station Manifest ---");
    let mut results = Vec::new();

    let manifest: StationManifest = match serde_json::from_str(MANIFEST_JSON) {
        Ok(m) => m,
        Err(e) => {
            results.push(TestResult {
                name: "manifest_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "manifest_valid".into(),
        passed: validate_manifest(&manifest).is_ok(),
        detail: match validate_manifest(&manifest) {
            Ok(()) => format!("'{}', {} rooms", manifest.name, manifest.rooms.len()),
            Err(e) => format!("{}", e),
        },
    });

    // Every known room type appears exactly once
    let mut coverage = true;
    for rt in room_types::ALL {
        let count = manifest.rooms.iter().filter(|r| r.room_type == rt).count();
        if count != 1 {
            coverage = false;
        }
    }
    results.push(TestResult {
        name: "manifest_room_coverage".into(),
        passed: coverage,
        detail: "each room type defined exactly once".into(),
    });

    // The generator accepts the manifest
    let engine = StationEngine::new(StationConfig::from_manifest(&manifest));
    results.push(TestResult {
        name: "manifest_generates_station".into(),
        passed: engine.room_count() == manifest.rooms.len(),
        detail: format!("{} room entities spawned", engine.room_count()),
    });

    if verbose {
        for room in &manifest.rooms {
            println!(
                "  {:14} type={} tank={}/{} limit={}s lights={}",
                room.name,
                room.room_type,
                room.tank_required,
                room.tank_capacity,
                room.contamination_limit,
                room.light_count
            );
        }
    }

    results
}

// ── 2. Metrics ──────────────────────────────────────────────────────────

fn validate_metrics(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shift Metrics ---");
    let mut results = Vec::new();

    // Idempotent room counting survives hammering
    let mut m = ShiftMetrics::new();
    m.start_shift(0.0);
    for _ in 0..50 {
        m.record_room_entered(room_types::POWER, 1.0);
        m.record_room_entered(room_types::OXYGEN, 2.0);
        m.record_room_completed(room_types::POWER, 3.0);
    }
    results.push(TestResult {
        name: "metrics_idempotent_counting".into(),
        passed: m.tasks_attempted == 2 && m.tasks_completed == 1,
        detail: format!(
            "50 repeats -> attempted={} completed={}",
            m.tasks_attempted, m.tasks_completed
        ),
    });

    m.end_shift(600.0);
    results.push(TestResult {
        name: "metrics_abandonment_derived".into(),
        passed: m.tasks_abandoned == 1,
        detail: format!("abandoned={}", m.tasks_abandoned),
    });

    // Start-then-end round trip leaves clean zeros
    let mut empty = ShiftMetrics::new();
    empty.start_shift(100.0);
    empty.end_shift(100.0);
    results.push(TestResult {
        name: "metrics_empty_round_trip".into(),
        passed: empty.tasks_abandoned == 0 && empty.tasks_attempted == 0,
        detail: "immediate end -> abandoned=0".into(),
    });

    // Monotonic counters ignore negative amounts
    let mut guarded = ShiftMetrics::new();
    guarded.start_shift(0.0);
    guarded.record_health_loss(-10.0);
    guarded.record_money_earned(-10.0);
    results.push(TestResult {
        name: "metrics_negative_guarded".into(),
        passed: guarded.health_lost == 0.0 && guarded.money_earned == 0.0,
        detail: "negative amounts ignored".into(),
    });

    results
}

// ── 3. Evaluation ───────────────────────────────────────────────────────

fn validate_evaluation(verbose: bool) -> Vec<TestResult> {
    println!("--- Shift Evaluation ---");
    let mut results = Vec::new();

    // Reference scenario: a flawless ten-minute shift
    let mut flawless = ShiftMetrics::new();
    flawless.start_shift(0.0);
    flawless.record_room_entered(room_types::POWER, 1.0);
    flawless.record_room_completed(room_types::POWER, 100.0);
    flawless.record_room_entered(room_types::OXYGEN, 200.0);
    flawless.record_room_completed(room_types::OXYGEN, 300.0);
    flawless.record_resources_consumed(100.0);
    flawless.record_money_earned(300.0);
    flawless.end_shift(600.0);

    let eval = evaluation::evaluate_shift(&flawless, 600.0, 1.0);
    results.push(TestResult {
        name: "eval_flawless_scenario".into(),
        passed: (eval.overall_score - 1.0).abs() < 1e-6
            && eval.classification == Classification::ExemplaryOperator,
        detail: format!(
            "score={:.2} tier={}",
            eval.overall_score, eval.classification
        ),
    });

    // Zero-attempt variant loses exactly the completion weight
    let mut idle = flawless.clone();
    idle.start_shift(0.0);
    idle.record_resources_consumed(100.0);
    idle.record_money_earned(300.0);
    idle.end_shift(600.0);
    let eval_idle = evaluation::evaluate_shift(&idle, 600.0, 1.0);
    results.push(TestResult {
        name: "eval_zero_attempts".into(),
        passed: eval_idle.completion_score == 0.0
            && (eval_idle.overall_score - 0.6).abs() < 1e-6
            && eval_idle.classification < Classification::ExemplaryOperator,
        detail: format!(
            "score={:.2} tier={}",
            eval_idle.overall_score, eval_idle.classification
        ),
    });

    // Six contamination events clamp safety at zero
    let mut hazardous = ShiftMetrics::new();
    hazardous.start_shift(0.0);
    for _ in 0..6 {
        hazardous.record_contamination_event();
    }
    hazardous.end_shift(600.0);
    results.push(TestResult {
        name: "eval_safety_clamps".into(),
        passed: evaluation::safety_score(&hazardous) == 0.0,
        detail: "6 events -> safety=0, not negative".into(),
    });

    // Clamp invariant over a hostile input sweep
    let mut all_in_range = true;
    for money in [0.0f32, 10.0, 1e6] {
        for resources in [0.0f32, 1.0, 1e5] {
            for duration in [0.0f64, 600.0, 90_000.0] {
                for strictness in [1.0f32, 2.0, 3.0] {
                    let mut m = ShiftMetrics::new();
                    m.start_shift(0.0);
                    m.record_money_earned(money);
                    m.record_resources_consumed(resources);
                    m.end_shift(duration);
                    let e = evaluation::evaluate_shift(&m, duration, strictness);
                    if !(0.0..=1.0).contains(&e.overall_score) {
                        all_in_range = false;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "eval_clamp_invariant".into(),
        passed: all_in_range,
        detail: "81 hostile combos stay in [0,1]".into(),
    });

    // Classification is monotonic in score at fixed strictness
    let mut monotonic = true;
    for strictness in [1.0f32, 1.5, 2.5] {
        let mut prev = Classification::UnproductiveShift;
        for step in 0..=100 {
            let tier = Classification::from_score(step as f32 / 100.0, strictness);
            if tier < prev {
                monotonic = false;
            }
            prev = tier;
        }
    }
    results.push(TestResult {
        name: "eval_classification_monotonic".into(),
        passed: monotonic,
        detail: "rising score never drops a tier".into(),
    });

    if verbose {
        println!("  Tier ladder at strictness 1.0 / 2.0:");
        for step in (0..=10).rev() {
            let score = step as f32 / 10.0;
            println!(
                "    {:.1} -> {:24} / {}",
                score,
                Classification::from_score(score, 1.0).label(),
                Classification::from_score(score, 2.0).label()
            );
        }
    }

    results
}

// ── 4. Overseer ─────────────────────────────────────────────────────────

fn validate_overseer(_verbose: bool) -> Vec<TestResult> {
    println!("--- Overseer Progression ---");
    let mut results = Vec::new();

    let mut overseer = Overseer::new();
    let mut monotonic = true;
    let mut last = (overseer.strictness(), overseer.tolerance());
    for _ in 0..200 {
        overseer.increment_shift_progression();
        if overseer.strictness() < last.0 || overseer.tolerance() > last.1 {
            monotonic = false;
        }
        last = (overseer.strictness(), overseer.tolerance());
    }
    results.push(TestResult {
        name: "overseer_monotonic".into(),
        passed: monotonic,
        detail: "strictness never falls, tolerance never rises".into(),
    });

    results.push(TestResult {
        name: "overseer_bounded".into(),
        passed: overseer.strictness() <= STRICTNESS_CAP
            && overseer.tolerance() >= TOLERANCE_FLOOR,
        detail: format!(
            "after 200 shifts: strictness={:.2} tolerance={:.2}",
            overseer.strictness(),
            overseer.tolerance()
        ),
    });

    results.push(TestResult {
        name: "overseer_status_text".into(),
        passed: overseer.status_report().contains("Shifts Monitored: 200"),
        detail: "status mentions shift count".into(),
    });

    results
}

// ── 5. Shift lifecycle ──────────────────────────────────────────────────

fn validate_lifecycle(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shift Lifecycle ---");
    let mut results = Vec::new();

    let mut engine = StationEngine::new(StationConfig::default());
    engine.set_drain_mode(DrainMode::Stopped);

    // Misuse is a warned no-op
    let before_phase = engine.phase();
    engine.continue_to_next_shift();
    let ended_idle = engine.end_shift().is_none();
    results.push(TestResult {
        name: "lifecycle_guards".into(),
        passed: ended_idle && engine.phase() == before_phase,
        detail: "end/continue while idle are no-ops".into(),
    });

    // One full cycle: Idle -> InProgress -> Debrief -> Idle
    engine.start_shift();
    let in_progress = engine.phase() == ShiftPhase::InProgress;
    engine.enter_room(room_types::POWER);
    engine.update(1.0);
    engine.exit_room(room_types::POWER);
    let eval_present = engine.end_shift().is_some();
    let debrief = engine.phase() == ShiftPhase::Debrief;
    engine.continue_to_next_shift();
    results.push(TestResult {
        name: "lifecycle_full_cycle".into(),
        passed: in_progress && eval_present && debrief && engine.phase() == ShiftPhase::Idle,
        detail: "Idle -> InProgress -> Debrief -> Idle".into(),
    });

    // Countdown timeout is the only implicit ending
    engine.start_shift();
    let mut ticks = 0;
    while engine.phase() == ShiftPhase::InProgress && ticks < 700 {
        engine.update(1.0);
        ticks += 1;
    }
    results.push(TestResult {
        name: "lifecycle_auto_timeout".into(),
        passed: engine.phase() == ShiftPhase::Debrief && (595..=605).contains(&ticks),
        detail: format!("shift force-ended after {} ticks", ticks),
    });
    engine.continue_to_next_shift();

    // Difficulty persisted across both shifts
    results.push(TestResult {
        name: "lifecycle_difficulty_persists".into(),
        passed: engine.overseer().shifts_completed() == 2
            && engine.overseer().strictness() > 1.0,
        detail: format!(
            "{} shifts, strictness={:.2}",
            engine.overseer().shifts_completed(),
            engine.overseer().strictness()
        ),
    });

    // Session outcome plumbing
    let outcome = engine.session_outcome();
    engine.add_credits(1_000_000.0);
    results.push(TestResult {
        name: "lifecycle_session_outcome".into(),
        passed: outcome == SessionOutcome::Ongoing
            && engine.session_outcome() == SessionOutcome::Won,
        detail: "ongoing until the credit goal lands".into(),
    });

    results
}

// ── 6. Consumption ──────────────────────────────────────────────────────

fn validate_consumption(_verbose: bool) -> Vec<TestResult> {
    println!("--- Consumption ---");
    let mut results = Vec::new();

    // Drain scales linearly with fixtures and time
    let single = consumption::lighting_drain(DrainMode::Slow, 1, 1.0);
    let scaled = consumption::lighting_drain(DrainMode::Slow, 8, 10.0);
    results.push(TestResult {
        name: "consumption_linear_scaling".into(),
        passed: (scaled - single * 80.0).abs() < 1e-6,
        detail: format!("1 light/1s={:.3} 8 lights/10s={:.3}", single, scaled),
    });

    // Tanks clamp at empty and report true drain
    let (left, drained) = consumption::drain_tank(3.0, 10.0);
    results.push(TestResult {
        name: "consumption_tank_clamps".into(),
        passed: left == 0.0 && (drained - 3.0).abs() < 1e-6,
        detail: "overdraw drains only what exists".into(),
    });

    // Suffocation chain ordering: station air, then reserve, then health
    let chain_ok = consumption::reserve_drain(50.0, 1.0) == 0.0
        && consumption::reserve_drain(0.0, 1.0) > 0.0
        && consumption::suffocation_damage(10.0, 1.0) == 0.0
        && consumption::suffocation_damage(0.0, 1.0) > 0.0;
    results.push(TestResult {
        name: "consumption_suffocation_chain".into(),
        passed: chain_ok,
        detail: "tank -> reserve -> health ordering holds".into(),
    });

    // A starved engine run actually hurts the operator
    let mut engine = StationEngine::new(StationConfig::default());
    engine.set_drain_mode(DrainMode::Fast);
    for _ in 0..150 {
        engine.update(1.0);
    }
    results.push(TestResult {
        name: "consumption_depletion_hurts".into(),
        passed: engine.operator_health() < 100.0,
        detail: format!(
            "after fast-drain run: health={:.0}",
            engine.operator_health()
        ),
    });

    results
}

// ── 7. Puzzles ──────────────────────────────────────────────────────────

fn validate_puzzles(verbose: bool) -> Vec<TestResult> {
    println!("--- Room Tasks ---");
    let mut results = Vec::new();

    // Grid and tank counts stay in bounds across all levels
    let mut bounds_ok = true;
    for level in 0..=50 {
        let size = puzzles::fuse_grid_size(level);
        let faults = puzzles::fuse_fault_count(level, size * size);
        let tanks = puzzles::disposal_tank_count(level);
        if !(3..=5).contains(&size) {
            bounds_ok = false;
        }
        if faults == 0 || faults > (size * size) / 2 {
            bounds_ok = false;
        }
        if !(5..=15).contains(&tanks) {
            bounds_ok = false;
        }
    }
    results.push(TestResult {
        name: "puzzles_scaling_bounds".into(),
        passed: bounds_ok,
        detail: "levels 0-50: grid 3-5, faults 1..half, tanks 5-15".into(),
    });

    // Difficulty grows with level
    results.push(TestResult {
        name: "puzzles_difficulty_grows".into(),
        passed: puzzles::fuse_grid_size(9) > puzzles::fuse_grid_size(1)
            && puzzles::disposal_tank_count(4) > puzzles::disposal_tank_count(1),
        detail: format!(
            "grid {}->{}, tanks {}->{}",
            puzzles::fuse_grid_size(1),
            puzzles::fuse_grid_size(9),
            puzzles::disposal_tank_count(1),
            puzzles::disposal_tank_count(4)
        ),
    });

    // Solving every fault solves the board; solving disposes solves the task
    let mut grid = puzzles::FuseGrid::new(4, [0, 5, 10, 15]);
    let mut toggles = 0;
    for index in 0..grid.cell_count() {
        if grid.is_faulty(index) {
            grid.toggle(index);
            toggles += 1;
        }
    }
    results.push(TestResult {
        name: "puzzles_fuse_solvable".into(),
        passed: grid.is_solved() && toggles == 4,
        detail: format!("solved in {} toggles", toggles),
    });

    let mut disposal = puzzles::TankDisposal::new(7);
    let mut disposals = 0;
    while !disposal.is_solved() {
        disposal.dispose();
        disposals += 1;
    }
    results.push(TestResult {
        name: "puzzles_disposal_solvable".into(),
        passed: disposals == 7,
        detail: format!("solved in {} disposals", disposals),
    });

    if verbose {
        println!("  Task difficulty by storage level:");
        for level in 1..=6 {
            println!(
                "    level {}: {}x{} grid / {} faults, {} tanks",
                level,
                puzzles::fuse_grid_size(level),
                puzzles::fuse_grid_size(level),
                puzzles::fuse_fault_count(level, puzzles::fuse_grid_size(level).pow(2)),
                puzzles::disposal_tank_count(level)
            );
        }
    }

    results
}
