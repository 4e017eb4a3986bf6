//! Contamination system: per-room safety countdowns and their damage.

use crate::components::{ContaminationTimer, Health, Operator, Room, TimerTick};
use hecs::World;

/// Health lost per second while standing in a contaminated room.
pub const CONTAMINATION_DAMAGE_PER_SECOND: f32 = 5.0;

/// What one contamination tick produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContaminationReport {
    /// Timers that expired on this tick. Each is one contamination event.
    pub new_events: u32,
    /// Damage dealt by already-contaminated rooms.
    pub health_lost: f32,
}

/// Advance every room's contamination timer and apply contamination damage
/// to the operator. Expiry is edge-triggered: a timer contributes to
/// `new_events` exactly once per stay.
pub fn contamination_system(world: &mut World, delta_seconds: f32) -> ContaminationReport {
    let mut report = ContaminationReport::default();

    for (_, (_, timer)) in world.query_mut::<(&Room, &mut ContaminationTimer)>() {
        match timer.tick(delta_seconds) {
            TimerTick::JustExpired => {
                report.new_events += 1;
                report.health_lost += CONTAMINATION_DAMAGE_PER_SECOND * delta_seconds;
            }
            TimerTick::Contaminating => {
                report.health_lost += CONTAMINATION_DAMAGE_PER_SECOND * delta_seconds;
            }
            TimerTick::Idle | TimerTick::Counting => {}
        }
    }

    if report.health_lost > 0.0 {
        for (_, (_, health)) in world.query_mut::<(&Operator, &mut Health)>() {
            health.damage(report.health_lost);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidstation_logic::constants::room_types;

    fn spawn_room(world: &mut World, limit: f32) -> hecs::Entity {
        world.spawn((
            Room::new("Power Bay", room_types::POWER),
            ContaminationTimer::new(limit),
        ))
    }

    fn spawn_operator(world: &mut World) {
        world.spawn((Operator, Health::new(100.0)));
    }

    fn enter(world: &mut World, room: hecs::Entity) {
        world
            .get::<&mut ContaminationTimer>(room)
            .unwrap()
            .enter();
    }

    fn health_of(world: &mut World) -> f32 {
        let mut value = 0.0;
        for (_, (_, health)) in world.query_mut::<(&Operator, &Health)>() {
            value = health.current;
        }
        value
    }

    #[test]
    fn test_no_events_while_unoccupied() {
        let mut world = World::new();
        spawn_room(&mut world, 5.0);
        spawn_operator(&mut world);

        let report = contamination_system(&mut world, 100.0);
        assert_eq!(report, ContaminationReport::default());
        assert_eq!(health_of(&mut world), 100.0);
    }

    #[test]
    fn test_single_event_per_stay() {
        let mut world = World::new();
        let room = spawn_room(&mut world, 5.0);
        spawn_operator(&mut world);
        enter(&mut world, room);

        let before = contamination_system(&mut world, 3.0);
        assert_eq!(before.new_events, 0);

        let expiry = contamination_system(&mut world, 3.0);
        assert_eq!(expiry.new_events, 1);

        // Lingering hurts but fires no further events
        let lingering = contamination_system(&mut world, 2.0);
        assert_eq!(lingering.new_events, 0);
        assert!(lingering.health_lost > 0.0);
    }

    #[test]
    fn test_damage_applied_to_operator() {
        let mut world = World::new();
        let room = spawn_room(&mut world, 1.0);
        spawn_operator(&mut world);
        enter(&mut world, room);

        contamination_system(&mut world, 2.0); // expires, 10 damage
        contamination_system(&mut world, 2.0); // 10 more
        assert!((health_of(&mut world) - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_leaving_stops_damage() {
        let mut world = World::new();
        let room = spawn_room(&mut world, 1.0);
        spawn_operator(&mut world);
        enter(&mut world, room);
        contamination_system(&mut world, 2.0);

        world.get::<&mut ContaminationTimer>(room).unwrap().leave();
        let report = contamination_system(&mut world, 10.0);
        assert_eq!(report, ContaminationReport::default());
    }
}
