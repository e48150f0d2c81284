pub mod behavior;
pub mod chase;
pub mod growth;
pub mod kinematics;
pub mod separation;
pub mod vitals;

use crate::events::Event;
use crate::projectile::Projectiles;
use crate::world::WorkArea;
use separation::PetSnapshot;

/// Run all fast-cadence systems for one simulation tick.
///
/// `run_vitals` is set by the driver once per vitals window so decay/regen
/// stays on its own slower beat inside the fast tick.
#[allow(clippy::too_many_arguments)]
pub fn fast_tick(
    world: &mut hecs::World,
    projectiles: &mut Projectiles,
    area: WorkArea,
    run_vitals: bool,
    rng: &mut fastrand::Rng,
    separation_buf: &mut Vec<PetSnapshot>,
    events: &mut Vec<Event>,
) {
    // 1. Drop anything closed last tick before touching live bodies
    projectiles.sweep();

    // 2. Projectile physics (gravity, friction, bounces)
    projectiles.advance(area);

    // 3. Inter-pet soft repulsion
    separation::update(world, rng, separation_buf);

    // 4. Vitals decay/regen on its window
    if run_vitals {
        vitals::update(world, events);
    }

    // 5. Targeting + ball contact (eat food, kick toys)
    chase::update(world, projectiles, rng, events);

    // 6. Pet kinematics (fall, bounce, walk, clamp)
    kinematics::advance(world, area, events);
}

/// Run the slow behavior cadence: one state decision per pet.
pub fn slow_tick(
    world: &mut hecs::World,
    projectiles: &Projectiles,
    env_load: f32,
    rng: &mut fastrand::Rng,
    events: &mut Vec<Event>,
) {
    behavior::update(world, env_load, projectiles.any_live(), rng, events);
}

/// Run the growth cadence for newborns.
pub fn growth_tick(world: &mut hecs::World, events: &mut Vec<Event>) {
    growth::update(world, events);
}
