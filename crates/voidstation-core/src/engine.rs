//! Station engine: the main entry point for running a session.
//!
//! Owns the ECS world plus everything that crosses entity boundaries: the
//! shift lifecycle, the active metrics, the overseer, credits, and the room
//! tasks. The host calls [`StationEngine::update`] once per frame; the
//! evaluator itself only runs at shift boundaries.

use crate::components::{
    ContaminationTimer, GasMask, Health, OxygenReserve, Room, StorageTank, WorkStation,
};
use crate::generation::{self, generate_station, StationConfig, StationLayout};
use crate::systems::{consumption_system, contamination_system, work_system};
use hecs::{Entity, World};
use std::collections::BTreeMap;
use voidstation_logic::constants::room_types;
use voidstation_logic::consumption::DrainMode;
use voidstation_logic::evaluation::ShiftEvaluation;
use voidstation_logic::metrics::ShiftMetrics;
use voidstation_logic::overseer::Overseer;
use voidstation_logic::puzzles::RoomPuzzle;
use voidstation_logic::session::{self, SessionOutcome};
use voidstation_logic::upgrades;

/// Seconds between work station cycles.
const WORK_INTERVAL_SECONDS: f64 = 1.0;

/// Where the shift lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPhase {
    /// No shift running; starting one is armed.
    Idle,
    /// Countdown running, metrics accumulating.
    InProgress,
    /// Shift ended; its evaluation awaits acknowledgement.
    Debrief,
}

/// Main simulation engine.
pub struct StationEngine {
    /// ECS world containing rooms, tanks, the work station, the operator.
    pub world: World,
    layout: StationLayout,
    /// Simulation time in seconds since session start.
    sim_time: f64,

    // Shift lifecycle
    phase: ShiftPhase,
    shift_length: f32,
    countdown: f32,
    metrics: ShiftMetrics,
    overseer: Overseer,
    pending_evaluation: Option<ShiftEvaluation>,

    // Economy
    credits: f32,
    win_credits: f32,

    // Moment-to-moment state
    drain_mode: DrainMode,
    current_room: Option<u8>,
    puzzles: BTreeMap<u8, RoomPuzzle>,
    working: bool,
    last_work_time: f64,
}

impl StationEngine {
    /// Generate a station and wrap it in a fresh engine.
    pub fn new(config: StationConfig) -> Self {
        let mut world = World::new();
        let layout = generate_station(&mut world, &config);
        Self {
            world,
            layout,
            sim_time: 0.0,
            phase: ShiftPhase::Idle,
            shift_length: config.shift_length,
            countdown: 0.0,
            metrics: ShiftMetrics::new(),
            overseer: Overseer::new(),
            pending_evaluation: None,
            credits: 0.0,
            win_credits: config.win_credits,
            drain_mode: DrainMode::Slow,
            current_room: None,
            puzzles: BTreeMap::new(),
            working: false,
            last_work_time: 0.0,
        }
    }

    // ── Tick ────────────────────────────────────────────────────────────

    /// Advance the simulation by `delta_seconds`.
    pub fn update(&mut self, delta_seconds: f32) {
        self.sim_time += delta_seconds as f64;

        // Passive drains and contamination run whether or not a shift is
        // active; they only count toward metrics while one is.
        let consumption = consumption_system(&mut self.world, self.drain_mode, delta_seconds);
        let contamination = contamination_system(&mut self.world, delta_seconds);

        if self.phase == ShiftPhase::InProgress {
            self.metrics
                .record_resources_consumed(consumption.station_total());
            self.metrics
                .record_health_loss(consumption.health_lost + contamination.health_lost);
            for _ in 0..contamination.new_events {
                self.metrics.record_contamination_event();
            }
        }

        self.ensure_puzzle_for_current_room();

        // The work station cycles once per second while enabled.
        if self.working {
            while self.sim_time - self.last_work_time >= WORK_INTERVAL_SECONDS {
                self.last_work_time += WORK_INTERVAL_SECONDS;
                match work_system(&mut self.world) {
                    Some(report) => {
                        self.credits += report.earned;
                        if self.phase == ShiftPhase::InProgress {
                            self.metrics.record_money_earned(report.earned);
                            self.metrics.record_resources_consumed(report.consumed);
                        }
                    }
                    None => {
                        log::warn!("Work station halted: a room is out of resources");
                        self.working = false;
                        break;
                    }
                }
            }
        }

        if self.phase == ShiftPhase::InProgress {
            self.countdown -= delta_seconds;
            if self.countdown <= 0.0 {
                log::info!("Shift countdown expired, forcing shift end");
                self.end_shift();
            }
        }
    }

    // ── Shift lifecycle ─────────────────────────────────────────────────

    /// Begin a shift. Warns and does nothing unless the engine is idle.
    pub fn start_shift(&mut self) {
        if self.phase != ShiftPhase::Idle {
            log::warn!("Cannot start a shift: one is already in progress or awaiting acknowledgement");
            return;
        }
        self.metrics.start_shift(self.sim_time);
        self.countdown = self.shift_length;
        self.phase = ShiftPhase::InProgress;
        log::info!("Shift {} started", self.overseer.shifts_completed() + 1);
    }

    /// End the running shift: finalize metrics, evaluate, escalate the
    /// overseer, and hold the evaluation for the presentation layer. Warns
    /// and returns `None` when no shift is running.
    pub fn end_shift(&mut self) -> Option<&ShiftEvaluation> {
        if self.phase != ShiftPhase::InProgress {
            log::warn!("Cannot end a shift: none is in progress");
            return None;
        }
        self.metrics.end_shift(self.sim_time);
        let evaluation = self.overseer.evaluate_shift(&self.metrics, self.sim_time);
        log::info!(
            "Shift {} evaluated: {} (score {:.2})",
            self.overseer.shifts_completed() + 1,
            evaluation.classification,
            evaluation.overall_score
        );
        self.overseer.increment_shift_progression();
        self.pending_evaluation = Some(evaluation);
        self.phase = ShiftPhase::Debrief;
        self.pending_evaluation.as_ref()
    }

    /// Acknowledge the evaluation screen and re-arm `start_shift`. Overseer
    /// difficulty persists for the life of the engine.
    pub fn continue_to_next_shift(&mut self) {
        if self.phase != ShiftPhase::Debrief {
            log::warn!("No shift evaluation awaiting acknowledgement");
            return;
        }
        self.pending_evaluation = None;
        self.phase = ShiftPhase::Idle;
    }

    // ── Rooms & tasks ───────────────────────────────────────────────────

    /// Operator walks into a room: arms its contamination timer and, during
    /// a shift, counts the attempt.
    pub fn enter_room(&mut self, room_type: u8) {
        if !room_types::is_valid(room_type) {
            log::warn!("Ignoring entry into unknown room type {}", room_type);
            return;
        }
        match self.current_room {
            Some(current) if current == room_type => return,
            Some(current) => self.exit_room(current),
            None => {}
        }
        self.current_room = Some(room_type);

        let mask_level = self.mask_level();
        if let Some(entity) = self.room_entity(room_type) {
            let base_limit = self
                .world
                .get::<&Room>(entity)
                .map(|room| room.base_contamination_limit)
                .unwrap_or(0.0);
            if let Ok(mut timer) = self.world.get::<&mut ContaminationTimer>(entity) {
                timer.set_limit(upgrades::mask_room_time(base_limit, mask_level));
                timer.enter();
            }
        }

        if self.phase == ShiftPhase::InProgress {
            self.metrics.record_room_entered(room_type, self.sim_time);
        }
        log::info!("Operator entered {} room", room_types::label(room_type));
    }

    /// Operator leaves a room: disarms its timer and discards any unsolved
    /// task.
    pub fn exit_room(&mut self, room_type: u8) {
        if self.current_room != Some(room_type) {
            log::warn!(
                "Operator is not in the {} room",
                room_types::label(room_type)
            );
            return;
        }
        self.current_room = None;
        self.puzzles.remove(&room_type);

        let was_completed = self
            .room_entity(room_type)
            .and_then(|entity| self.world.get::<&StorageTank>(entity).ok().map(|t| t.has_resource()))
            .unwrap_or(false);

        if let Some(entity) = self.room_entity(room_type) {
            if let Ok(mut timer) = self.world.get::<&mut ContaminationTimer>(entity) {
                timer.leave();
            }
        }

        if self.phase == ShiftPhase::InProgress {
            let abandoned = self
                .metrics
                .record_room_exited(room_type, was_completed, self.sim_time);
            if abandoned {
                log::info!("Task abandoned in {} room", room_types::label(room_type));
            }
        }
    }

    /// Flip one switch on the active fuse board. Returns true when the board
    /// is solved, which refills the room's tank.
    pub fn toggle_fuse(&mut self, room_type: u8, index: u32) -> bool {
        let solved = match self.puzzles.get_mut(&room_type) {
            Some(RoomPuzzle::Fuse(grid)) => grid.toggle(index),
            _ => {
                log::warn!(
                    "No fuse board active in {} room",
                    room_types::label(room_type)
                );
                return false;
            }
        };
        if solved {
            self.complete_room_task(room_type);
        }
        solved
    }

    /// Drop one loose tank into the disposal zone. Returns true when the
    /// task is solved, which refills the room's tank.
    pub fn dispose_tank(&mut self, room_type: u8) -> bool {
        let solved = match self.puzzles.get_mut(&room_type) {
            Some(RoomPuzzle::Disposal(task)) => task.dispose(),
            _ => {
                log::warn!(
                    "No disposal task active in {} room",
                    room_types::label(room_type)
                );
                return false;
            }
        };
        if solved {
            self.complete_room_task(room_type);
        }
        solved
    }

    fn complete_room_task(&mut self, room_type: u8) {
        self.puzzles.remove(&room_type);
        if let Some(entity) = self.room_entity(room_type) {
            if let Ok(mut tank) = self.world.get::<&mut StorageTank>(entity) {
                tank.fill();
            }
        }
        if self.phase == ShiftPhase::InProgress {
            self.metrics.record_room_completed(room_type, self.sim_time);
        }
        log::info!("{} storage refilled", room_types::label(room_type));
    }

    /// A starved, occupied room presents its task.
    fn ensure_puzzle_for_current_room(&mut self) {
        let Some(room_type) = self.current_room else {
            return;
        };
        if self.puzzles.contains_key(&room_type) {
            return;
        }
        let Some(entity) = self.room_entity(room_type) else {
            return;
        };
        let (starved, level) = match self.world.get::<&StorageTank>(entity) {
            Ok(tank) => (!tank.has_resource(), tank.level),
            Err(_) => return,
        };
        if !starved {
            return;
        }
        let mut rng = rand::thread_rng();
        if let Some(puzzle) = generation::generate_room_puzzle(room_type, level, &mut rng) {
            log::info!("Task active in {} room", room_types::label(room_type));
            self.puzzles.insert(room_type, puzzle);
        }
    }

    // ── Work station ────────────────────────────────────────────────────

    /// Enable the work station. Fails when any room is starved.
    pub fn start_work(&mut self) -> bool {
        if !crate::systems::can_work(&mut self.world) {
            log::warn!("Cannot start work: a room is out of resources");
            return false;
        }
        self.working = true;
        self.last_work_time = self.sim_time;
        true
    }

    pub fn stop_work(&mut self) {
        self.working = false;
    }

    pub fn is_working(&self) -> bool {
        self.working
    }

    // ── Upgrades ────────────────────────────────────────────────────────

    /// Upgrade a room's storage tank. Returns false when unaffordable or the
    /// room is unknown.
    pub fn upgrade_storage(&mut self, room_type: u8) -> bool {
        let Some(entity) = self.room_entity(room_type) else {
            return false;
        };
        let cost = match self.world.get::<&StorageTank>(entity) {
            Ok(tank) => tank.upgrade_cost(),
            Err(_) => return false,
        };
        if !upgrades::can_afford(self.credits, cost) {
            return false;
        }
        self.credits -= cost;
        if let Ok(mut tank) = self.world.get::<&mut StorageTank>(entity) {
            tank.apply_upgrade();
        }
        true
    }

    /// Upgrade the work station's production rate.
    pub fn upgrade_workstation(&mut self) -> bool {
        let cost = match self.world.get::<&WorkStation>(self.layout.workstation) {
            Ok(station) => station.upgrade_cost(),
            Err(_) => return false,
        };
        if !upgrades::can_afford(self.credits, cost) {
            return false;
        }
        self.credits -= cost;
        if let Ok(mut station) = self.world.get::<&mut WorkStation>(self.layout.workstation) {
            station.apply_upgrade();
        }
        true
    }

    /// Upgrade the gas mask and stretch every room's contamination limit.
    pub fn upgrade_mask(&mut self) -> bool {
        let cost = match self.world.get::<&GasMask>(self.layout.operator) {
            Ok(mask) => mask.upgrade_cost(),
            Err(_) => return false,
        };
        if !upgrades::can_afford(self.credits, cost) {
            return false;
        }
        self.credits -= cost;
        if let Ok(mut mask) = self.world.get::<&mut GasMask>(self.layout.operator) {
            mask.apply_upgrade();
        }
        let mask_level = self.mask_level();
        for (_, (room, timer)) in self
            .world
            .query_mut::<(&Room, &mut ContaminationTimer)>()
        {
            timer.set_limit(upgrades::mask_room_time(
                room.base_contamination_limit,
                mask_level,
            ));
        }
        true
    }

    /// Upgrade the personal oxygen reserve capacity.
    pub fn upgrade_reserve(&mut self) -> bool {
        let cost = match self.world.get::<&OxygenReserve>(self.layout.operator) {
            Ok(reserve) => reserve.upgrade_cost(),
            Err(_) => return false,
        };
        if !upgrades::can_afford(self.credits, cost) {
            return false;
        }
        self.credits -= cost;
        if let Ok(mut reserve) = self.world.get::<&mut OxygenReserve>(self.layout.operator) {
            reserve.apply_upgrade();
        }
        true
    }

    /// Buy a full heal, priced at the missing health.
    pub fn heal(&mut self) -> bool {
        let cost = match self.world.get::<&Health>(self.layout.operator) {
            Ok(health) => upgrades::heal_cost(health.max, health.current),
            Err(_) => return false,
        };
        if !upgrades::can_afford(self.credits, cost) {
            return false;
        }
        self.credits -= cost;
        if let Ok(mut health) = self.world.get::<&mut Health>(self.layout.operator) {
            health.heal_to_full();
        }
        true
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn phase(&self) -> ShiftPhase {
        self.phase
    }

    pub fn credits(&self) -> f32 {
        self.credits
    }

    /// Host-facing credit grant, e.g. for scripted bonuses.
    pub fn add_credits(&mut self, amount: f32) {
        self.credits += amount.max(0.0);
    }

    pub fn overseer(&self) -> &Overseer {
        &self.overseer
    }

    pub fn metrics(&self) -> &ShiftMetrics {
        &self.metrics
    }

    /// The evaluation waiting on the debrief screen, if any.
    pub fn pending_evaluation(&self) -> Option<&ShiftEvaluation> {
        self.pending_evaluation.as_ref()
    }

    /// Seconds left on the shift countdown; 0 outside a shift.
    pub fn shift_time_remaining(&self) -> f32 {
        if self.phase == ShiftPhase::InProgress {
            self.countdown.max(0.0)
        } else {
            0.0
        }
    }

    pub fn current_room(&self) -> Option<u8> {
        self.current_room
    }

    /// Number of rooms on the station.
    pub fn room_count(&self) -> usize {
        self.layout.rooms.len()
    }

    /// The task currently presented by a room, if any.
    pub fn active_puzzle(&self, room_type: u8) -> Option<&RoomPuzzle> {
        self.puzzles.get(&room_type)
    }

    pub fn set_drain_mode(&mut self, mode: DrainMode) {
        self.drain_mode = mode;
    }

    pub fn drain_mode(&self) -> DrainMode {
        self.drain_mode
    }

    pub fn operator_health(&self) -> f32 {
        self.world
            .get::<&Health>(self.layout.operator)
            .map(|health| health.current)
            .unwrap_or(0.0)
    }

    /// Win/lose state of the whole session.
    pub fn session_outcome(&self) -> SessionOutcome {
        session::session_outcome(self.operator_health(), self.credits, self.win_credits)
    }

    fn mask_level(&self) -> u32 {
        self.world
            .get::<&GasMask>(self.layout.operator)
            .map(|mask| mask.level)
            .unwrap_or(1)
    }

    fn room_entity(&self, room_type: u8) -> Option<Entity> {
        self.layout.rooms.iter().copied().find(|&entity| {
            self.world
                .get::<&Room>(entity)
                .map(|room| room.room_type == room_type)
                .unwrap_or(false)
        })
    }
}
