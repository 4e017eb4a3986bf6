//! Station structure components: Room, StorageTank, ContaminationTimer,
//! WorkStation.

use serde::{Deserialize, Serialize};
use voidstation_logic::upgrades;

/// A physical room on the station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Room type ID from `voidstation_logic::constants::room_types`.
    pub room_type: u8,
    /// Light fixtures drawing passive power while the station has any.
    pub light_count: u32,
    /// Contamination limit before mask bonuses are applied.
    pub base_contamination_limit: f32,
}

impl Room {
    pub fn new(name: impl Into<String>, room_type: u8) -> Self {
        Self {
            name: name.into(),
            room_type,
            light_count: 0,
            base_contamination_limit: 30.0,
        }
    }

    pub fn with_lights(mut self, count: u32) -> Self {
        self.light_count = count;
        self
    }

    pub fn with_contamination_limit(mut self, seconds: f32) -> Self {
        self.base_contamination_limit = seconds;
        self
    }
}

/// A room's resource storage tank. Starts full; the room counts as starved
/// once `amount` drops below `required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageTank {
    pub level: u32,
    pub amount: f32,
    pub capacity: f32,
    pub required: f32,
}

impl StorageTank {
    pub fn new(capacity: f32, required: f32) -> Self {
        Self {
            level: 1,
            amount: capacity,
            capacity,
            required,
        }
    }

    /// Whether the room has enough resource to operate.
    pub fn has_resource(&self) -> bool {
        self.amount >= self.required
    }

    /// Fill level as a fraction of capacity.
    pub fn fraction(&self) -> f32 {
        if self.capacity <= 0.0 {
            0.0
        } else {
            (self.amount / self.capacity).clamp(0.0, 1.0)
        }
    }

    /// Top the tank up to capacity.
    pub fn fill(&mut self) {
        self.amount = self.capacity;
    }

    /// Take up to `amount` out of the tank, clamping at empty. Returns how
    /// much actually came out.
    pub fn draw(&mut self, amount: f32) -> f32 {
        let drawn = amount.clamp(0.0, self.amount.max(0.0));
        self.amount -= drawn;
        drawn
    }

    /// Cost of the next upgrade at the current level.
    pub fn upgrade_cost(&self) -> f32 {
        upgrades::storage_upgrade_cost(upgrades::STORAGE_BASE_COST, self.level)
    }

    /// Raise the level, grow capacity, and refill.
    pub fn apply_upgrade(&mut self) {
        self.capacity = upgrades::storage_upgraded_capacity(
            self.capacity,
            upgrades::STORAGE_UPGRADE_FACTOR,
            self.level,
        );
        self.level += 1;
        self.fill();
    }
}

/// What one contamination timer tick meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Room unoccupied, timer idle.
    Idle,
    /// Counting down, not yet expired.
    Counting,
    /// Expired on this tick exactly; record the contamination event now.
    JustExpired,
    /// Already expired earlier; contamination damage continues.
    Contaminating,
}

/// Per-room contamination countdown. Runs only while the operator occupies
/// the room and fires its event exactly once per stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContaminationTimer {
    pub limit: f32,
    pub remaining: f32,
    pub occupied: bool,
    expired: bool,
}

impl ContaminationTimer {
    pub fn new(limit: f32) -> Self {
        Self {
            limit,
            remaining: 0.0,
            occupied: false,
            expired: false,
        }
    }

    /// Operator walked in: arm the countdown.
    pub fn enter(&mut self) {
        self.occupied = true;
        self.remaining = self.limit;
        self.expired = false;
    }

    /// Operator left: disarm and clear the expiry latch.
    pub fn leave(&mut self) {
        self.occupied = false;
        self.remaining = 0.0;
        self.expired = false;
    }

    /// Mask upgrades lengthen the limit; a running countdown keeps its
    /// current remaining time.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance the countdown. `JustExpired` is returned at most once per
    /// stay, so callers can edge-trigger the contamination event.
    pub fn tick(&mut self, delta_seconds: f32) -> TimerTick {
        if !self.occupied {
            return TimerTick::Idle;
        }
        if self.expired {
            return TimerTick::Contaminating;
        }
        self.remaining -= delta_seconds;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.expired = true;
            TimerTick::JustExpired
        } else {
            TimerTick::Counting
        }
    }
}

/// The credit-producing work station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkStation {
    pub level: u32,
    /// Credits produced per work cycle.
    pub production: f32,
}

impl WorkStation {
    pub fn new(production: f32) -> Self {
        Self {
            level: 1,
            production,
        }
    }

    pub fn upgrade_cost(&self) -> f32 {
        upgrades::workstation_upgrade_cost(upgrades::WORKSTATION_BASE_COST, self.level)
    }

    pub fn apply_upgrade(&mut self) {
        self.production = upgrades::workstation_upgraded_production(
            self.production,
            upgrades::WORKSTATION_UPGRADE_FACTOR,
            self.level,
        );
        self.level += 1;
    }
}
