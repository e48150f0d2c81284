use crate::ecs::components::{Body, Newborn};
use crate::events::Event;

/// Scale gained per growth tick.
const GROWTH_STEP: f32 = 0.1;
/// Scale at which a newborn counts as grown.
const GROWN_SCALE: f32 = 0.6;

/// Advance every newborn one growth step. Runs on the slow growth cadence
/// (minutes apart), not per frame.
pub fn update(world: &mut hecs::World, events: &mut Vec<Event>) {
    let mut grown = Vec::new();

    for (entity, (body, _)) in world.query_mut::<(&mut Body, &Newborn)>() {
        if body.scale < GROWN_SCALE {
            body.scale += GROWTH_STEP;
            // Accumulated float error would leave scale at 0.60000004.
            if body.scale > GROWN_SCALE - 0.01 && body.scale < GROWN_SCALE + 0.01 {
                body.scale = GROWN_SCALE;
            }
        }
        if body.scale >= GROWN_SCALE {
            body.scale = body.scale.min(GROWN_SCALE);
            grown.push(entity);
        }
    }

    for entity in grown {
        let _ = world.remove_one::<Newborn>(entity);
        log::debug!("pet {entity:?} is fully grown");
        events.push(Event::GrewUp { pet: entity });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::Placement;
    use crate::world::{PetWorld, WorkArea};

    const AREA: WorkArea = WorkArea {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn newborns_grow_in_steps_to_the_cap_then_stop() {
        let mut w = PetWorld::with_seed(AREA, 5);
        let parent = w.spawn_pet(Placement::Home).unwrap();
        let child = w.spawn_pet(Placement::Newborn { parent }).unwrap();
        assert!((w.ecs.get::<&Body>(child).unwrap().scale - 0.2).abs() < 1e-5);

        let mut events = Vec::new();
        update(&mut w.ecs, &mut events); // 0.3
        update(&mut w.ecs, &mut events); // 0.4
        update(&mut w.ecs, &mut events); // 0.5
        assert!(events.is_empty());
        update(&mut w.ecs, &mut events); // 0.6 exactly, grown
        assert_eq!(w.ecs.get::<&Body>(child).unwrap().scale, 0.6);
        assert!(events.contains(&Event::GrewUp { pet: child }));
        assert!(w.ecs.get::<&Newborn>(child).is_err());

        // Further growth ticks leave everyone alone.
        events.clear();
        update(&mut w.ecs, &mut events);
        assert!(events.is_empty());
        assert_eq!(w.ecs.get::<&Body>(child).unwrap().scale, 0.6);
    }

    #[test]
    fn grown_pets_never_join_the_growth_pass() {
        let mut w = PetWorld::with_seed(AREA, 5);
        let adult = w.spawn_pet(Placement::Home).unwrap();
        let before = w.ecs.get::<&Body>(adult).unwrap().scale;

        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(w.ecs.get::<&Body>(adult).unwrap().scale, before);
    }
}
