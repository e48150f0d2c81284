use hecs::Entity;

use crate::ecs::components::BehaviorState;

/// Things the platform layer reacts to: sprite swaps, tooltip refreshes,
/// sounds. Emitted during ticks and drained once per frame via
/// [`crate::world::PetWorld::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pet entered the world (initial spawn, swarm, or breeding).
    Spawned { pet: Entity },
    /// A pet was closed and released its projectiles.
    Closed { pet: Entity },
    /// Behavior state changed (or was re-affirmed after a vitals crossing);
    /// the platform picks the matching animation.
    StateChanged { pet: Entity, state: BehaviorState },
    /// The user caught a thrown ball; one food was added to the pantry.
    FoodGained { pet: Entity },
    /// A food projectile was eaten on contact: health and scale went up.
    FoodEaten { pet: Entity },
    /// A toy ball was kicked away by a pet.
    BallKicked { index: usize },
    /// Feeding progress completed and a newborn appeared.
    Bred { parent: Entity, child: Entity },
    /// A newborn reached full size and stopped growing.
    GrewUp { pet: Entity },
}
