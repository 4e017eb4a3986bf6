//! Work station system: turns room resources into credits.

use crate::components::{Room, StorageTank, WorkStation};
use hecs::World;

/// What one work cycle produced and consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkReport {
    /// Credits produced.
    pub earned: f32,
    /// Resource units drawn from room tanks.
    pub consumed: f32,
}

/// Work requires every room tank to hold at least its required amount.
pub fn can_work(world: &mut World) -> bool {
    world
        .query_mut::<(&Room, &StorageTank)>()
        .into_iter()
        .all(|(_, (_, tank))| tank.has_resource())
}

/// Run one work cycle: draw `required * level` from every room tank and
/// produce the station's credit output. Returns `None` without touching any
/// tank when the station cannot work.
pub fn work_system(world: &mut World) -> Option<WorkReport> {
    if !can_work(world) {
        return None;
    }

    let mut level = 0;
    let mut earned = 0.0;
    for (_, station) in world.query_mut::<&WorkStation>() {
        level = station.level;
        earned = station.production;
    }
    if level == 0 {
        return None;
    }

    let mut consumed = 0.0;
    for (_, (_, tank)) in world.query_mut::<(&Room, &mut StorageTank)>() {
        consumed += tank.draw(tank.required * level as f32);
    }

    Some(WorkReport { earned, consumed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidstation_logic::constants::room_types;

    fn spawn_station(world: &mut World, amounts: [f32; 2]) {
        let mut power = StorageTank::new(100.0, 10.0);
        power.amount = amounts[0];
        let mut oxygen = StorageTank::new(100.0, 10.0);
        oxygen.amount = amounts[1];
        world.spawn((Room::new("Power Bay", room_types::POWER), power));
        world.spawn((Room::new("Oxygen Plant", room_types::OXYGEN), oxygen));
        world.spawn((WorkStation::new(3.0),));
    }

    #[test]
    fn test_work_consumes_and_earns() {
        let mut world = World::new();
        spawn_station(&mut world, [100.0, 100.0]);

        let report = work_system(&mut world).expect("station should work");
        assert_eq!(report.earned, 3.0);
        // required 10 per room at level 1
        assert_eq!(report.consumed, 20.0);
    }

    #[test]
    fn test_no_work_when_starved() {
        let mut world = World::new();
        spawn_station(&mut world, [100.0, 5.0]);

        assert!(!can_work(&mut world));
        assert!(work_system(&mut world).is_none());

        // The healthy tank was not drawn down
        for (_, (room, tank)) in world.query_mut::<(&Room, &StorageTank)>() {
            if room.room_type == room_types::POWER {
                assert_eq!(tank.amount, 100.0);
            }
        }
    }

    #[test]
    fn test_upgraded_station_draws_more() {
        let mut world = World::new();
        spawn_station(&mut world, [100.0, 100.0]);
        for (_, station) in world.query_mut::<&mut WorkStation>() {
            station.apply_upgrade();
        }

        let report = work_system(&mut world).expect("station should work");
        assert!(report.earned > 3.0);
        // level 2 draws 2x required per room
        assert_eq!(report.consumed, 40.0);
    }

    #[test]
    fn test_work_runs_tanks_toward_starvation() {
        let mut world = World::new();
        spawn_station(&mut world, [25.0, 25.0]);

        assert!(work_system(&mut world).is_some()); // 25 -> 15
        assert!(work_system(&mut world).is_some()); // 15 -> 5
        assert!(work_system(&mut world).is_none()); // starved
    }
}
