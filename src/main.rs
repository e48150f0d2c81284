use std::thread;
use std::time::Duration;

use instant::Instant;

use deskpet::pet::Placement;
use deskpet::scheduler::Driver;
use deskpet::world::{PetWorld, WorkArea};

/// Demo work area when no platform layer is attached.
const DEMO_AREA: WorkArea = WorkArea {
    width: 1920.0,
    height: 1080.0,
};
/// How long the headless demo runs.
const DEMO_SECONDS: u64 = 60;

fn main() {
    env_logger::init();
    log::info!("deskpet demo starting up");

    let mut world = PetWorld::new(DEMO_AREA);
    let mut driver = Driver::new();

    let first = match world.spawn_pet(Placement::Home) {
        Ok(pet) => pet,
        Err(e) => {
            log::error!("Fatal error: {e}");
            std::process::exit(1);
        }
    };
    world.summon_swarm();

    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut threw_ball = false;
    let mut scattered = false;

    while started.elapsed().as_secs() < DEMO_SECONDS {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        // Stand-in for the platform's environment-load signal.
        let env_load = 30.0 + 25.0 * (started.elapsed().as_secs_f64() * 0.1).sin() as f32;

        driver.pump(&mut world, dt, env_load);

        // Script a little activity partway through.
        let elapsed = started.elapsed().as_secs();
        if elapsed >= 5 && !threw_ball {
            world.throw_ball(Some(first));
            log::info!("threw a ball for the pets to chase");
            threw_ball = true;
        }
        if elapsed >= 20 && !scattered {
            world.scatter_food(None);
            log::info!("scattered food from above");
            scattered = true;
        }

        for event in world.drain_events() {
            log::debug!("event: {event:?}");
        }

        thread::sleep(Duration::from_millis(16));
    }

    log::info!(
        "demo done: {} pets live after {} ticks",
        world.population(),
        world.fast_ticks(),
    );
}
