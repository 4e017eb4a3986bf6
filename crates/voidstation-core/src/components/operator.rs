//! Operator components: the human keeping the station alive.

use serde::{Deserialize, Serialize};
use voidstation_logic::upgrades;

/// Marker component identifying an entity as the operator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Operator;

/// Operator health pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub max: f32,
    pub current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { max, current: max }
    }

    /// Apply damage, clamping at zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    pub fn heal_to_full(&mut self) {
        self.current = self.max;
    }

    pub fn missing(&self) -> f32 {
        (self.max - self.current).max(0.0)
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

/// Personal oxygen reserve, breathed once the station oxygen tank is dry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OxygenReserve {
    pub level: u32,
    pub capacity: f32,
    pub current: f32,
}

impl OxygenReserve {
    pub fn new(capacity: f32) -> Self {
        Self {
            level: 1,
            capacity,
            current: capacity,
        }
    }

    /// Breathe down the reserve, clamping at empty. Returns the amount
    /// actually consumed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        let drained = amount.clamp(0.0, self.current.max(0.0));
        self.current -= drained;
        drained
    }

    /// Station air is back: the reserve tops up.
    pub fn refill(&mut self) {
        self.current = self.capacity;
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn upgrade_cost(&self) -> f32 {
        upgrades::reserve_upgrade_cost(self.level)
    }

    pub fn apply_upgrade(&mut self) {
        self.capacity = upgrades::reserve_upgraded_capacity(self.capacity);
        self.level += 1;
    }
}

/// Gas mask; higher levels stretch every room's contamination timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GasMask {
    pub level: u32,
}

impl GasMask {
    pub fn new() -> Self {
        Self { level: 1 }
    }

    /// Effective contamination limit for a room with the given base limit.
    pub fn room_time(&self, base_limit: f32) -> f32 {
        upgrades::mask_room_time(base_limit, self.level)
    }

    pub fn upgrade_cost(&self) -> f32 {
        upgrades::mask_upgrade_cost(self.level)
    }

    pub fn apply_upgrade(&mut self) {
        self.level += 1;
    }
}

impl Default for GasMask {
    fn default() -> Self {
        Self::new()
    }
}
