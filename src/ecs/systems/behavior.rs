use crate::ecs::components::{Behavior, BehaviorState, Dragging, FallVelocity, Vitals};
use crate::events::Event;

/// Health at/below which a pet is forced to sleep.
pub const EXHAUSTED_THRESHOLD: i32 = 20;
/// Health at/below which walking degrades to the slower Tired gait.
pub const TIRED_THRESHOLD: i32 = 50;
/// Environment load above which every awake pet gets Tired.
pub const HIGH_LOAD_THRESHOLD: f32 = 60.0;
/// Chance per slow tick that an eligible pet simply keeps doing what it was.
const HOLD_CHANCE: f64 = 0.4;
/// Percentage roll below this picks Idle; the rest walk (or trudge).
const IDLE_ROLL_CUTOFF: u32 = 60;

/// Outcome of one slow-tick decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep the current state untouched.
    Hold,
    /// Switch to `state`; `direction`, when set, replaces the walk direction.
    To {
        state: BehaviorState,
        direction: Option<i8>,
    },
}

/// Decide a pet's next behavior state.
///
/// Pure given the supplied random source: identical inputs and an
/// identically seeded RNG produce identical transition sequences. Rules
/// apply in priority order; the first that fires wins.
pub fn next_state(
    current: BehaviorState,
    walk_direction: i8,
    health: i32,
    max_health: i32,
    env_load: f32,
    has_target: bool,
    rng: &mut fastrand::Rng,
) -> Transition {
    // Sleep is sticky until fully rested.
    if current == BehaviorState::Sleeping && health < max_health {
        return Transition::Hold;
    }

    if health <= EXHAUSTED_THRESHOLD {
        return Transition::To {
            state: BehaviorState::Sleeping,
            direction: None,
        };
    }

    if env_load > HIGH_LOAD_THRESHOLD {
        if current == BehaviorState::Tired {
            return Transition::Hold;
        }
        let direction = if walk_direction == 0 {
            Some(random_direction(rng))
        } else {
            None
        };
        return Transition::To {
            state: BehaviorState::Tired,
            direction,
        };
    }

    if has_target {
        // Something to chase: idle pets get moving, everyone else keeps on.
        if current == BehaviorState::Idle {
            let state = if health <= TIRED_THRESHOLD {
                BehaviorState::Tired
            } else {
                BehaviorState::Walking
            };
            return Transition::To {
                state,
                direction: None,
            };
        }
        return Transition::Hold;
    }

    // Hesitation: not every eligible tick has to change anything.
    if rng.f64() < HOLD_CHANCE {
        return Transition::Hold;
    }

    let roll = rng.u32(0..100);
    if roll < IDLE_ROLL_CUTOFF {
        return Transition::To {
            state: BehaviorState::Idle,
            direction: None,
        };
    }

    let state = if health <= TIRED_THRESHOLD {
        BehaviorState::Tired
    } else {
        BehaviorState::Walking
    };
    Transition::To {
        state,
        direction: Some(random_direction(rng)),
    }
}

fn random_direction(rng: &mut fastrand::Rng) -> i8 {
    if rng.bool() {
        1
    } else {
        -1
    }
}

/// Run one slow behavior tick over every pet.
pub fn update(
    world: &mut hecs::World,
    env_load: f32,
    any_projectiles: bool,
    rng: &mut fastrand::Rng,
    events: &mut Vec<Event>,
) {
    for (entity, (behavior, vitals, vel, dragging)) in world
        .query_mut::<(&mut Behavior, &Vitals, &FallVelocity, Option<&Dragging>)>()
    {
        // No decisions mid-drag, mid-air, or mid-walk-home.
        if dragging.is_some()
            || vel.0 != 0.0
            || behavior.state == BehaviorState::ReturningHome
        {
            continue;
        }

        let has_target = any_projectiles && vitals.health > EXHAUSTED_THRESHOLD;
        let transition = next_state(
            behavior.state,
            behavior.walk_direction,
            vitals.health,
            vitals.max_health,
            env_load,
            has_target,
            rng,
        );

        match transition {
            Transition::Hold => {}
            Transition::To { state, direction } => {
                if let Some(d) = direction {
                    behavior.walk_direction = d;
                }
                let changed = state != behavior.state;
                behavior.state = state;
                // Idle is re-emitted even unchanged: the sprite swaps between
                // the rested and tired idle animations as health moves.
                if changed || state == BehaviorState::Idle {
                    events.push(Event::StateChanged { pet: entity, state });
                }
            }
        }
    }
}
