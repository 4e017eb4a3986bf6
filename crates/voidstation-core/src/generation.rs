//! Station generation: build the world a session runs in.

use crate::components::{
    ContaminationTimer, GasMask, Health, Operator, OxygenReserve, Room, StorageTank, WorkStation,
};
use hecs::{Entity, World};
use rand::Rng;
use voidstation_logic::constants::room_types;
use voidstation_logic::manifest::{RoomSpec, StationManifest};
use voidstation_logic::puzzles::{
    self, FuseGrid, PuzzleKind, RoomPuzzle, TankDisposal,
};

/// Everything needed to generate a station.
#[derive(Debug, Clone)]
pub struct StationConfig {
    pub name: String,
    pub rooms: Vec<RoomSpec>,
    /// Credits per work cycle at level 1.
    pub workstation_production: f32,
    /// Shift countdown length in seconds.
    pub shift_length: f32,
    /// Credits needed to win the session.
    pub win_credits: f32,
    pub operator_health: f32,
    pub oxygen_reserve_capacity: f32,
}

impl Default for StationConfig {
    fn default() -> Self {
        let room = |name: &str, room_type| RoomSpec {
            name: name.to_string(),
            room_type,
            tank_capacity: 100.0,
            tank_required: 10.0,
            contamination_limit: 30.0,
            light_count: 4,
        };
        Self {
            name: "Relay Station K-7".to_string(),
            rooms: vec![
                room("Power Bay", room_types::POWER),
                room("Oxygen Plant", room_types::OXYGEN),
            ],
            workstation_production: 3.0,
            shift_length: 600.0,
            win_credits: 10_000.0,
            operator_health: 100.0,
            oxygen_reserve_capacity: 100.0,
        }
    }
}

impl StationConfig {
    /// Build a config from a validated station manifest, keeping the default
    /// operator loadout.
    pub fn from_manifest(manifest: &StationManifest) -> Self {
        Self {
            name: manifest.name.clone(),
            rooms: manifest.rooms.clone(),
            workstation_production: manifest.workstation_production,
            shift_length: manifest.shift_length,
            win_credits: manifest.win_credits,
            ..Self::default()
        }
    }
}

/// Entity handles for the generated station.
#[derive(Debug, Clone)]
pub struct StationLayout {
    pub rooms: Vec<Entity>,
    pub workstation: Entity,
    pub operator: Entity,
}

/// Spawn rooms, tanks, the work station, and the operator.
pub fn generate_station(world: &mut World, config: &StationConfig) -> StationLayout {
    let mut rooms = Vec::with_capacity(config.rooms.len());
    for spec in &config.rooms {
        let entity = world.spawn((
            Room::new(spec.name.clone(), spec.room_type)
                .with_lights(spec.light_count)
                .with_contamination_limit(spec.contamination_limit),
            StorageTank::new(spec.tank_capacity, spec.tank_required),
            ContaminationTimer::new(spec.contamination_limit),
        ));
        rooms.push(entity);
    }

    let workstation = world.spawn((WorkStation::new(config.workstation_production),));
    let operator = world.spawn((
        Operator,
        Health::new(config.operator_health),
        OxygenReserve::new(config.oxygen_reserve_capacity),
        GasMask::new(),
    ));

    StationLayout {
        rooms,
        workstation,
        operator,
    }
}

/// Generate a fuse board for a storage level: grid size and fault count
/// scale with the level, fault positions are random but distinct.
pub fn generate_fuse_grid(level: u32, rng: &mut impl Rng) -> FuseGrid {
    let size = puzzles::fuse_grid_size(level);
    let cells = size * size;
    let fault_target = puzzles::fuse_fault_count(level, cells);

    let mut faults = std::collections::BTreeSet::new();
    while (faults.len() as u32) < fault_target {
        faults.insert(rng.gen_range(0..cells));
    }
    FuseGrid::new(size, faults)
}

/// Generate the disposal task for a storage level.
pub fn generate_tank_disposal(level: u32) -> TankDisposal {
    TankDisposal::new(puzzles::disposal_tank_count(level))
}

/// Generate the task a room presents at its current storage level.
pub fn generate_room_puzzle(room_type: u8, level: u32, rng: &mut impl Rng) -> Option<RoomPuzzle> {
    match PuzzleKind::for_room(room_type)? {
        PuzzleKind::FuseGrid => Some(RoomPuzzle::Fuse(generate_fuse_grid(level, rng))),
        PuzzleKind::TankDisposal => Some(RoomPuzzle::Disposal(generate_tank_disposal(level))),
    }
}
