//! Passive consumption system: breathing, lighting, and the suffocation
//! chain.

use crate::components::{Health, Operator, OxygenReserve, Room, StorageTank};
use hecs::World;
use voidstation_logic::constants::room_types;
use voidstation_logic::consumption::{self, DrainMode};

/// What one consumption tick drained and cost.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsumptionReport {
    /// Station oxygen units breathed.
    pub oxygen_drained: f32,
    /// Station power units drawn by lighting.
    pub power_drained: f32,
    /// Personal reserve units breathed (station tank was dry).
    pub reserve_drained: f32,
    /// Health lost to suffocation (reserve was dry too).
    pub health_lost: f32,
}

impl ConsumptionReport {
    /// Total station resources drained this tick.
    pub fn station_total(&self) -> f32 {
        self.oxygen_drained + self.power_drained
    }
}

/// Drain station tanks for breathing and lighting, then run the operator's
/// reserve chain when the oxygen tank is dry.
pub fn consumption_system(
    world: &mut World,
    mode: DrainMode,
    delta_seconds: f32,
) -> ConsumptionReport {
    let mut report = ConsumptionReport::default();

    // Lighting draw scales with every fixture on the station.
    let light_count: u32 = world
        .query_mut::<&Room>()
        .into_iter()
        .map(|(_, room)| room.light_count)
        .sum();

    let breathing = consumption::breathing_drain(mode, delta_seconds);
    let lighting = consumption::lighting_drain(mode, light_count, delta_seconds);

    let mut oxygen_remaining = 0.0;
    for (_, (room, tank)) in world.query_mut::<(&Room, &mut StorageTank)>() {
        match room.room_type {
            room_types::OXYGEN => {
                report.oxygen_drained += tank.draw(breathing);
                oxygen_remaining = tank.amount;
            }
            room_types::POWER => {
                report.power_drained += tank.draw(lighting);
            }
            _ => {}
        }
    }

    // Reserve chain: personal air while the station tank is dry, then
    // health once the reserve runs out. A healthy station tank refills the
    // reserve.
    for (_, (_, reserve, health)) in
        world.query_mut::<(&Operator, &mut OxygenReserve, &mut Health)>()
    {
        if consumption::station_oxygen_empty(oxygen_remaining) {
            let wanted = consumption::reserve_drain(oxygen_remaining, delta_seconds);
            report.reserve_drained += reserve.drain(wanted);
            let damage = consumption::suffocation_damage(reserve.current, delta_seconds);
            if damage > 0.0 {
                health.damage(damage);
                report.health_lost += damage;
            }
        } else {
            reserve.refill();
        }
    }

    report
}
