//! Upgrade cost and effect formulas.
//!
//! Credits earned at the work station buy bigger tanks, faster production,
//! longer contamination timers, a larger personal oxygen reserve, and
//! healing. Formulas only; the engine owns the purchase flow.

/// Base cost of the first storage tank upgrade.
pub const STORAGE_BASE_COST: f32 = 300.0;
/// Capacity growth factor applied per storage upgrade.
pub const STORAGE_UPGRADE_FACTOR: f32 = 1.5;
/// Base cost of the first work station upgrade.
pub const WORKSTATION_BASE_COST: f32 = 500.0;
/// Production growth factor applied per work station upgrade.
pub const WORKSTATION_UPGRADE_FACTOR: f32 = 3.5;
/// Base cost of the first gas mask upgrade.
pub const MASK_BASE_COST: f32 = 200.0;
/// Extra seconds of contamination timer per mask level above 1.
pub const MASK_TIME_BONUS_PER_LEVEL: f32 = 5.0;
/// Flat part of the oxygen reserve upgrade cost.
pub const RESERVE_COST_OFFSET: f32 = 9.0;

/// Cost of the next storage tank upgrade at `level`.
pub fn storage_upgrade_cost(base_cost: f32, level: u32) -> f32 {
    base_cost * level.max(1) as f32
}

/// Capacity after upgrading a tank from `level`.
pub fn storage_upgraded_capacity(capacity: f32, upgrade_factor: f32, level: u32) -> f32 {
    capacity * upgrade_factor * level.max(1) as f32
}

/// Cost of the next work station upgrade at `level`.
pub fn workstation_upgrade_cost(base_cost: f32, level: u32) -> f32 {
    base_cost * level.max(1) as f32
}

/// Production rate after upgrading a work station from `level`.
pub fn workstation_upgraded_production(production: f32, upgrade_factor: f32, level: u32) -> f32 {
    production * upgrade_factor * level.max(1) as f32
}

/// Cost of the next gas mask upgrade at `level`.
pub fn mask_upgrade_cost(level: u32) -> f32 {
    MASK_BASE_COST * level.max(1) as f32
}

/// Contamination timer for a room given its base limit and the mask level.
pub fn mask_room_time(base_limit: f32, mask_level: u32) -> f32 {
    base_limit + mask_level.saturating_sub(1) as f32 * MASK_TIME_BONUS_PER_LEVEL
}

/// Cost of the next oxygen reserve upgrade at `level`.
pub fn reserve_upgrade_cost(level: u32) -> f32 {
    level as f32 + RESERVE_COST_OFFSET
}

/// Reserve capacity after one upgrade: one more unit of air.
pub fn reserve_upgraded_capacity(capacity: f32) -> f32 {
    capacity + 1.0
}

/// Healing is priced at exactly the missing health.
pub fn heal_cost(max_health: f32, current_health: f32) -> f32 {
    (max_health - current_health).max(0.0)
}

/// Affordability gate used by every purchase.
pub fn can_afford(credits: f32, cost: f32) -> bool {
    credits >= cost
}
