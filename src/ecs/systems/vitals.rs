use crate::ecs::components::{Behavior, BehaviorState, Dragging, Vitals};
use crate::ecs::systems::behavior::{EXHAUSTED_THRESHOLD, TIRED_THRESHOLD};
use crate::events::Event;

/// Fast ticks between vitals updates (~1 s at the 16 ms tick rate).
pub const VITALS_WINDOW_TICKS: u32 = 60;
/// Health lost per window while moving.
const WALK_DECAY: i32 = 2;
/// Health regained per window while idling.
const IDLE_REGEN: i32 = 2;
/// Health regained per window while sleeping.
const SLEEP_REGEN: i32 = 5;

/// Apply one vitals window: moving pets tire, resting pets recover.
/// Threshold crossings feed straight back into behavior.
pub fn update(world: &mut hecs::World, events: &mut Vec<Event>) {
    for (entity, (behavior, vitals, dragging)) in
        world.query_mut::<(&mut Behavior, &mut Vitals, Option<&Dragging>)>()
    {
        if dragging.is_some() {
            continue;
        }

        match behavior.state {
            BehaviorState::Walking | BehaviorState::Tired => {
                vitals.lose(WALK_DECAY);
                if vitals.health <= EXHAUSTED_THRESHOLD {
                    behavior.state = BehaviorState::Sleeping;
                    events.push(Event::StateChanged {
                        pet: entity,
                        state: BehaviorState::Sleeping,
                    });
                } else if behavior.state == BehaviorState::Walking
                    && vitals.health <= TIRED_THRESHOLD
                {
                    behavior.state = BehaviorState::Tired;
                    events.push(Event::StateChanged {
                        pet: entity,
                        state: BehaviorState::Tired,
                    });
                }
            }
            BehaviorState::Idle => {
                if !vitals.is_full() {
                    let before = vitals.health;
                    vitals.gain(IDLE_REGEN);
                    // Climbing back over the tired line swaps the idle sprite.
                    if before <= TIRED_THRESHOLD && vitals.health > TIRED_THRESHOLD {
                        events.push(Event::StateChanged {
                            pet: entity,
                            state: BehaviorState::Idle,
                        });
                    }
                }
            }
            BehaviorState::Sleeping => {
                if !vitals.is_full() {
                    vitals.gain(SLEEP_REGEN);
                }
                if vitals.is_full() {
                    behavior.state = BehaviorState::Idle;
                    events.push(Event::StateChanged {
                        pet: entity,
                        state: BehaviorState::Idle,
                    });
                }
            }
            BehaviorState::ReturningHome => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Position;
    use crate::pet::Placement;
    use crate::world::{PetWorld, WorkArea};

    const AREA: WorkArea = WorkArea {
        width: 800.0,
        height: 600.0,
    };

    fn pet_with(state: BehaviorState, health: i32) -> (PetWorld, hecs::Entity) {
        let mut w = PetWorld::with_seed(AREA, 9);
        let pet = w.spawn_pet(Placement::Home).unwrap();
        {
            let mut b = w.ecs.get::<&mut Behavior>(pet).unwrap();
            b.state = state;
        }
        {
            let mut v = w.ecs.get::<&mut Vitals>(pet).unwrap();
            v.max_health = 100;
            v.health = health;
        }
        (w, pet)
    }

    fn health_of(w: &PetWorld, pet: hecs::Entity) -> i32 {
        w.ecs.get::<&Vitals>(pet).unwrap().health
    }

    fn state_of(w: &PetWorld, pet: hecs::Entity) -> BehaviorState {
        w.ecs.get::<&Behavior>(pet).unwrap().state
    }

    #[test]
    fn walking_decays_and_crossing_exhaustion_forces_sleep() {
        let (mut w, pet) = pet_with(BehaviorState::Walking, EXHAUSTED_THRESHOLD + 1);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(health_of(&w, pet), EXHAUSTED_THRESHOLD - 1);
        assert_eq!(state_of(&w, pet), BehaviorState::Sleeping);
        assert!(events.contains(&Event::StateChanged {
            pet,
            state: BehaviorState::Sleeping
        }));
    }

    #[test]
    fn walking_crossing_the_tired_line_degrades_to_tired() {
        let (mut w, pet) = pet_with(BehaviorState::Walking, TIRED_THRESHOLD + 1);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(state_of(&w, pet), BehaviorState::Tired);
    }

    #[test]
    fn idle_regen_reaffirms_idle_when_recovering_past_tired() {
        let (mut w, pet) = pet_with(BehaviorState::Idle, TIRED_THRESHOLD);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(health_of(&w, pet), TIRED_THRESHOLD + 2);
        assert!(events.contains(&Event::StateChanged {
            pet,
            state: BehaviorState::Idle
        }));
    }

    #[test]
    fn sleep_regen_exits_to_idle_at_full_health() {
        let (mut w, pet) = pet_with(BehaviorState::Sleeping, 97);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(health_of(&w, pet), 100);
        assert_eq!(state_of(&w, pet), BehaviorState::Idle);
    }

    #[test]
    fn health_never_leaves_its_bounds() {
        let (mut w, pet) = pet_with(BehaviorState::Walking, 1);
        let mut events = Vec::new();
        for _ in 0..100 {
            update(&mut w.ecs, &mut events);
            let v = *w.ecs.get::<&Vitals>(pet).unwrap();
            assert!(v.health >= 0 && v.health <= v.max_health);
        }

        let (mut w, pet) = pet_with(BehaviorState::Sleeping, 1);
        for _ in 0..100 {
            update(&mut w.ecs, &mut events);
            let v = *w.ecs.get::<&Vitals>(pet).unwrap();
            assert!(v.health >= 0 && v.health <= v.max_health);
        }
    }

    #[test]
    fn dragged_pets_neither_decay_nor_recover() {
        let (mut w, pet) = pet_with(BehaviorState::Walking, 80);
        let pos = w.ecs.get::<&Position>(pet).unwrap().0;
        w.ecs
            .insert_one(pet, crate::ecs::components::Dragging { start: pos })
            .unwrap();
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(health_of(&w, pet), 80);
    }

    #[test]
    fn decay_after_a_held_decision_still_forces_sleep() {
        // A slow tick that held (no transition) does not protect the pet:
        // the next decay window crossing the threshold forces Sleeping.
        let (mut w, pet) = pet_with(BehaviorState::Tired, EXHAUSTED_THRESHOLD + 2);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(state_of(&w, pet), BehaviorState::Sleeping);
    }

    #[test]
    fn returning_home_is_exempt_from_vitals() {
        let (mut w, pet) = pet_with(BehaviorState::ReturningHome, 40);
        let mut events = Vec::new();
        update(&mut w.ecs, &mut events);
        assert_eq!(health_of(&w, pet), 40);
    }
}
