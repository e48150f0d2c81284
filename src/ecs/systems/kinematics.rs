use crate::ecs::components::{
    Behavior, BehaviorState, Body, Dragging, FallVelocity, Position, PrevPosition, Vitals,
    WalkSpeed,
};
use crate::events::Event;
use crate::world::WorkArea;

/// Gravity applied to a falling pet each tick (pixels/tick²).
const GRAVITY: f32 = 2.0;
/// Bounce elasticity on landing.
const BOUNCE: f32 = -0.4;
/// Landings slower than this don't bounce at all.
const BOUNCE_THRESHOLD: f32 = 2.0;
/// How far above the floor still counts as grounded.
const FLOOR_EPSILON: f32 = 2.0;
/// Walk speed while Tired, regardless of the pet's own speed.
const TIRED_SPEED: f32 = 1.0;
/// Home position offset from the right edge of the work area.
pub const HOME_MARGIN: f32 = 20.0;

/// Integrate vertical fall/bounce and grounded walking for every pet.
/// Pets being dragged are left entirely alone.
pub fn advance(world: &mut hecs::World, area: WorkArea, events: &mut Vec<Event>) {
    for (entity, (pos, prev_pos, vel, behavior, vitals, body, walk_speed, dragging)) in world
        .query_mut::<(
            &mut Position,
            &mut PrevPosition,
            &mut FallVelocity,
            &mut Behavior,
            &Vitals,
            &Body,
            &WalkSpeed,
            Option<&Dragging>,
        )>()
    {
        if dragging.is_some() {
            continue;
        }

        prev_pos.0 = pos.0;

        let size = body.size();
        let floor = area.floor_for(size);

        if pos.0.y < floor - FLOOR_EPSILON {
            // Airborne: fall, and bounce if the landing is hard enough.
            vel.0 += GRAVITY;
            pos.0.y += vel.0;

            if pos.0.y >= floor {
                pos.0.y = floor;
                vel.0 = if vel.0.abs() > BOUNCE_THRESHOLD {
                    vel.0 * BOUNCE
                } else {
                    0.0
                };

                // A fully rested sleeper that touches down wakes up.
                if behavior.state == BehaviorState::Sleeping && vitals.is_full() {
                    behavior.state = BehaviorState::Idle;
                    events.push(Event::StateChanged {
                        pet: entity,
                        state: BehaviorState::Idle,
                    });
                }
            }
        } else {
            vel.0 = 0.0;
            if (pos.0.y - floor).abs() > FLOOR_EPSILON {
                pos.0.y = floor;
            }

            if matches!(
                behavior.state,
                BehaviorState::Walking | BehaviorState::Tired | BehaviorState::ReturningHome
            ) {
                let speed = if behavior.state == BehaviorState::Tired {
                    TIRED_SPEED
                } else {
                    walk_speed.0
                };

                if behavior.state == BehaviorState::ReturningHome {
                    let target = area.width - size.x - HOME_MARGIN;
                    let dx = target - pos.0.x;
                    if dx.abs() <= speed {
                        pos.0.x = target;
                        behavior.state = BehaviorState::Idle;
                        events.push(Event::StateChanged {
                            pet: entity,
                            state: BehaviorState::Idle,
                        });
                    } else {
                        behavior.walk_direction = if dx > 0.0 { 1 } else { -1 };
                        pos.0.x += speed * behavior.walk_direction as f32;
                    }
                } else {
                    pos.0.x += speed * behavior.walk_direction as f32;

                    // Reflecting patrol at the screen edges.
                    if pos.0.x <= 0.0 {
                        behavior.walk_direction = 1;
                    } else if pos.0.x + size.x >= area.width {
                        behavior.walk_direction = -1;
                    }
                }
            }
        }

        // Nothing may rest or walk fully off-screen.
        pos.0.x = pos.0.x.clamp(0.0, (area.width - size.x).max(0.0));
    }
}
