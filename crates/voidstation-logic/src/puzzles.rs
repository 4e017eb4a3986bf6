//! Room task puzzles.
//!
//! Each room type has a task the operator must finish to refill its storage
//! tank: the power room has a fuse board with mis-set switches, the oxygen
//! room has loose tanks to haul into a disposal zone. Both are plain state
//! machines here; the engine decides when they appear and what a solve pays
//! out. Difficulty scales with the room's storage level.

use crate::constants::room_types;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Smallest fuse grid edge (3x3 at level 1).
pub const FUSE_GRID_BASE: u32 = 3;
/// Largest fuse grid edge.
pub const FUSE_GRID_MAX: u32 = 5;
/// Tanks to dispose at level 1.
pub const DISPOSAL_BASE_TANKS: u32 = 5;
/// Extra tanks per storage level above 1.
pub const DISPOSAL_TANKS_PER_LEVEL: u32 = 2;
/// Disposal task never asks for more than this.
pub const DISPOSAL_MAX_TANKS: u32 = 15;

/// Which task a room presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleKind {
    FuseGrid,
    TankDisposal,
}

impl PuzzleKind {
    /// The task wired to each room type.
    pub fn for_room(room_type: u8) -> Option<Self> {
        match room_type {
            room_types::POWER => Some(PuzzleKind::FuseGrid),
            room_types::OXYGEN => Some(PuzzleKind::TankDisposal),
            _ => None,
        }
    }
}

/// Fuse grid edge length for a storage level: grows every two levels.
pub fn fuse_grid_size(level: u32) -> u32 {
    (FUSE_GRID_BASE + level.saturating_sub(1) / 2).clamp(FUSE_GRID_BASE, FUSE_GRID_MAX)
}

/// How many switches start in the wrong position at a storage level.
/// Always at least one, never more than half the board.
pub fn fuse_fault_count(level: u32, cell_count: u32) -> u32 {
    level.clamp(1, (cell_count / 2).max(1))
}

/// Tank count for the disposal task at a storage level.
pub fn disposal_tank_count(level: u32) -> u32 {
    (DISPOSAL_BASE_TANKS + level.saturating_sub(1) * DISPOSAL_TANKS_PER_LEVEL)
        .clamp(DISPOSAL_BASE_TANKS, DISPOSAL_MAX_TANKS)
}

/// Fuse board state: a square grid of switches, some in the wrong position.
/// Solved when no switch is wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuseGrid {
    size: u32,
    faults: BTreeSet<u32>,
}

impl FuseGrid {
    /// Build a grid with the given faulty cell indices. Out-of-range indices
    /// are dropped.
    pub fn new(size: u32, faults: impl IntoIterator<Item = u32>) -> Self {
        let cells = size * size;
        let faults = faults.into_iter().filter(|&i| i < cells).collect();
        Self { size, faults }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn cell_count(&self) -> u32 {
        self.size * self.size
    }

    pub fn faults_remaining(&self) -> u32 {
        self.faults.len() as u32
    }

    pub fn is_faulty(&self, index: u32) -> bool {
        self.faults.contains(&index)
    }

    /// Flip one switch. A faulty switch becomes correct and vice versa.
    /// Returns true when the toggle solved the board.
    pub fn toggle(&mut self, index: u32) -> bool {
        if index < self.cell_count() && !self.faults.remove(&index) {
            self.faults.insert(index);
        }
        self.is_solved()
    }

    pub fn is_solved(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Tank disposal state: haul `target` tanks into the disposal zone. Solved
/// when the last one lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankDisposal {
    target: u32,
    disposed: u32,
}

impl TankDisposal {
    pub fn new(target: u32) -> Self {
        Self {
            target: target.max(1),
            disposed: 0,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn remaining(&self) -> u32 {
        self.target - self.disposed
    }

    /// Drop one tank into the zone. Extra disposals past the target are
    /// ignored. Returns true when the task is now solved.
    pub fn dispose(&mut self) -> bool {
        if self.disposed < self.target {
            self.disposed += 1;
        }
        self.is_solved()
    }

    pub fn is_solved(&self) -> bool {
        self.disposed >= self.target
    }
}

/// A live puzzle instance attached to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomPuzzle {
    Fuse(FuseGrid),
    Disposal(TankDisposal),
}

impl RoomPuzzle {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            RoomPuzzle::Fuse(_) => PuzzleKind::FuseGrid,
            RoomPuzzle::Disposal(_) => PuzzleKind::TankDisposal,
        }
    }

    pub fn is_solved(&self) -> bool {
        match self {
            RoomPuzzle::Fuse(grid) => grid.is_solved(),
            RoomPuzzle::Disposal(task) => task.is_solved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_puzzle_union() {
        let fuse = RoomPuzzle::Fuse(FuseGrid::new(3, [1]));
        assert_eq!(fuse.kind(), PuzzleKind::FuseGrid);
        assert!(!fuse.is_solved());

        let disposal = RoomPuzzle::Disposal(TankDisposal::new(1));
        assert_eq!(disposal.kind(), PuzzleKind::TankDisposal);
        assert!(!disposal.is_solved());
    }

    #[test]
    fn test_puzzle_kind_per_room() {
        assert_eq!(
            PuzzleKind::for_room(room_types::POWER),
            Some(PuzzleKind::FuseGrid)
        );
        assert_eq!(
            PuzzleKind::for_room(room_types::OXYGEN),
            Some(PuzzleKind::TankDisposal)
        );
        assert_eq!(PuzzleKind::for_room(77), None);
    }

    #[test]
    fn test_fuse_grid_size_scaling() {
        assert_eq!(fuse_grid_size(1), 3);
        assert_eq!(fuse_grid_size(2), 3);
        assert_eq!(fuse_grid_size(3), 4);
        assert_eq!(fuse_grid_size(5), 5);
        // Capped at 5x5 no matter the level
        assert_eq!(fuse_grid_size(50), 5);
        // Level 0 behaves like level 1
        assert_eq!(fuse_grid_size(0), 3);
    }

    #[test]
    fn test_fuse_fault_count_bounds() {
        assert_eq!(fuse_fault_count(1, 9), 1);
        assert_eq!(fuse_fault_count(3, 9), 3);
        // Never more than half the board
        assert_eq!(fuse_fault_count(10, 9), 4);
        // Always at least one fault, even on a degenerate board
        assert_eq!(fuse_fault_count(0, 1), 1);
    }

    #[test]
    fn test_disposal_tank_count_scaling() {
        assert_eq!(disposal_tank_count(1), 5);
        assert_eq!(disposal_tank_count(2), 7);
        assert_eq!(disposal_tank_count(6), 15);
        assert_eq!(disposal_tank_count(100), 15);
        assert_eq!(disposal_tank_count(0), 5);
    }

    #[test]
    fn test_fuse_grid_solve() {
        let mut grid = FuseGrid::new(3, [0, 4, 8]);
        assert_eq!(grid.faults_remaining(), 3);
        assert!(!grid.is_solved());

        assert!(!grid.toggle(0));
        assert!(!grid.toggle(4));
        assert!(grid.toggle(8));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_fuse_grid_toggle_can_regress() {
        let mut grid = FuseGrid::new(3, [0]);
        // Toggling a correct switch creates a new fault
        assert!(!grid.toggle(5));
        assert_eq!(grid.faults_remaining(), 2);
        assert!(!grid.toggle(5));
        assert!(grid.toggle(0));
    }

    #[test]
    fn test_fuse_grid_ignores_out_of_range() {
        let mut grid = FuseGrid::new(3, [0, 99]);
        assert_eq!(grid.faults_remaining(), 1);
        assert!(grid.toggle(0));
        // Out-of-range toggle neither solves nor faults
        let mut fresh = FuseGrid::new(3, [2]);
        assert!(!fresh.toggle(100));
        assert_eq!(fresh.faults_remaining(), 1);
    }

    #[test]
    fn test_tank_disposal_flow() {
        let mut task = TankDisposal::new(3);
        assert_eq!(task.remaining(), 3);
        assert!(!task.dispose());
        assert!(!task.dispose());
        assert!(task.dispose());
        assert!(task.is_solved());
        // Extra disposals stay solved without overflowing
        assert!(task.dispose());
        assert_eq!(task.remaining(), 0);
    }

    #[test]
    fn test_tank_disposal_minimum_target() {
        let task = TankDisposal::new(0);
        assert_eq!(task.target(), 1);
    }
}
