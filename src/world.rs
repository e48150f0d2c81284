use glam::Vec2;

use crate::ecs::components::{
    Behavior, BehaviorState, Body, Dragging, FallVelocity, Pantry, Position, PrevPosition,
    Species, SpriteFrame, Vitals, BREED_FEED_COUNT,
};
use crate::ecs::systems::{self, behavior::EXHAUSTED_THRESHOLD, kinematics::HOME_MARGIN,
    separation, vitals::VITALS_WINDOW_TICKS};
use crate::error::ActionError;
use crate::events::Event;
use crate::pet::{self, Placement, DEFAULT_SPECIES};
use crate::projectile::{Projectiles, BALL_SIZE, BALL_TTL_TICKS};

/// Hard cap on live pets.
pub const POPULATION_CAP: usize = 20;
/// Pets added per swarm summon (still cap-gated).
const SWARM_SIZE: usize = 5;
/// Food balls per scatter.
const SCATTER_COUNT: usize = 15;
/// Health restored per stored food eaten.
const FEED_HEAL: i32 = 30;
/// Drags shorter than this count as poking the pet.
const DRAG_POKE_THRESHOLD: f32 = 5.0;
/// Health lost when poked.
const DRAG_PENALTY: i32 = 5;

/// Usable screen bounds. Read fresh each tick; the platform layer updates it
/// when the display configuration changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkArea {
    pub width: f32,
    pub height: f32,
}

impl WorkArea {
    /// Floor y-coordinate for a body of the given size.
    pub fn floor_for(&self, size: Vec2) -> f32 {
        self.height - size.y
    }
}

/// The whole simulation: live pets, live projectiles, RNG, and the event
/// queue the platform layer drains each frame.
///
/// Explicitly owned by the caller — tests build as many isolated worlds as
/// they like, nothing hides in a global.
pub struct PetWorld {
    pub ecs: hecs::World,
    pub projectiles: Projectiles,
    rng: fastrand::Rng,
    work_area: WorkArea,
    events: Vec<Event>,
    separation_buf: Vec<separation::PetSnapshot>,
    vitals_ticks: u32,
    fast_ticks: u64,
}

impl PetWorld {
    pub fn new(work_area: WorkArea) -> Self {
        Self::with_rng(work_area, fastrand::Rng::new())
    }

    /// Deterministic world for tests and replays.
    pub fn with_seed(work_area: WorkArea, seed: u64) -> Self {
        Self::with_rng(work_area, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(work_area: WorkArea, rng: fastrand::Rng) -> Self {
        Self {
            ecs: hecs::World::new(),
            projectiles: Projectiles::new(),
            rng,
            work_area,
            events: Vec::with_capacity(64),
            separation_buf: separation::snapshot_buffer(),
            vitals_ticks: 0,
            fast_ticks: 0,
        }
    }

    pub fn work_area(&self) -> WorkArea {
        self.work_area
    }

    pub fn set_work_area(&mut self, area: WorkArea) {
        self.work_area = area;
    }

    pub fn population(&self) -> usize {
        self.ecs.query::<&Behavior>().iter().count()
    }

    pub fn fast_ticks(&self) -> u64 {
        self.fast_ticks
    }

    // -----------------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------------

    /// One fast simulation tick: physics, contacts, collision responses.
    pub fn fast_tick(&mut self) {
        self.vitals_ticks += 1;
        let run_vitals = self.vitals_ticks >= VITALS_WINDOW_TICKS;
        if run_vitals {
            self.vitals_ticks = 0;
        }

        systems::fast_tick(
            &mut self.ecs,
            &mut self.projectiles,
            self.work_area,
            run_vitals,
            &mut self.rng,
            &mut self.separation_buf,
            &mut self.events,
        );
        self.fast_ticks += 1;
    }

    /// One slow behavior tick. `env_load` is the caller-supplied environment
    /// load signal in percent; above the high-load threshold pets get tired.
    pub fn slow_tick(&mut self, env_load: f32) {
        systems::slow_tick(
            &mut self.ecs,
            &self.projectiles,
            env_load,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// One growth tick for newborns.
    pub fn growth_tick(&mut self) {
        systems::growth_tick(&mut self.ecs, &mut self.events);
    }

    /// Take everything emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Pets
    // -----------------------------------------------------------------------

    /// Spawn a pet, rejecting once the population cap is reached.
    pub fn spawn_pet(&mut self, placement: Placement) -> Result<hecs::Entity, ActionError> {
        if self.population() >= POPULATION_CAP {
            return Err(ActionError::PopulationFull {
                cap: POPULATION_CAP,
            });
        }
        if let Placement::Newborn { parent } = placement {
            if !self.ecs.contains(parent) {
                return Err(ActionError::UnknownPet);
            }
        }

        let pet = pet::spawn(&mut self.ecs, &mut self.rng, self.work_area, placement);
        log::info!("spawned pet {pet:?} ({} live)", self.population());
        self.events.push(Event::Spawned { pet });
        Ok(pet)
    }

    /// Spawn up to [`SWARM_SIZE`] pets at random spots. Returns how many the
    /// cap allowed.
    pub fn summon_swarm(&mut self) -> usize {
        let mut spawned = 0;
        for _ in 0..SWARM_SIZE {
            if self.spawn_pet(Placement::Random).is_err() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Close a pet; its projectiles go with it.
    pub fn close_pet(&mut self, pet: hecs::Entity) -> Result<(), ActionError> {
        self.ecs
            .despawn(pet)
            .map_err(|_| ActionError::UnknownPet)?;
        self.projectiles.close_owned_by(pet);
        log::info!("closed pet {pet:?} ({} live)", self.population());
        self.events.push(Event::Closed { pet });
        Ok(())
    }

    /// Feed one stored food to a pet. Three feeds breed a newborn.
    pub fn feed(&mut self, pet: hecs::Entity) -> Result<(), ActionError> {
        let bred;
        {
            let (pantry, vitals, behavior) = self
                .ecs
                .query_one_mut::<(&mut Pantry, &mut Vitals, &mut Behavior)>(pet)
                .map_err(|_| ActionError::UnknownPet)?;

            if pantry.food_count == 0 {
                return Err(ActionError::NoFood);
            }
            if vitals.is_full() {
                return Err(ActionError::HealthFull);
            }

            pantry.food_count -= 1;
            vitals.gain(FEED_HEAL);
            pantry.fed_count += 1;
            bred = pantry.fed_count >= BREED_FEED_COUNT;
            if bred {
                pantry.fed_count = 0;
            }

            if matches!(
                behavior.state,
                BehaviorState::Sleeping | BehaviorState::Tired
            ) {
                behavior.state = BehaviorState::Idle;
                self.events.push(Event::StateChanged {
                    pet,
                    state: BehaviorState::Idle,
                });
            }
        }

        if bred {
            match self.spawn_pet(Placement::Newborn { parent: pet }) {
                Ok(child) => self.events.push(Event::Bred { parent: pet, child }),
                Err(err) => log::debug!("breeding blocked: {err}"),
            }
        }
        Ok(())
    }

    /// Reset a pet to the bottom-right home corner.
    pub fn snap_home(&mut self, pet: hecs::Entity) -> Result<(), ActionError> {
        let size = self
            .ecs
            .get::<&Body>(pet)
            .map(|b| b.size())
            .map_err(|_| ActionError::UnknownPet)?;
        let home = Vec2::new(
            self.work_area.width - size.x - HOME_MARGIN,
            self.work_area.floor_for(size),
        );
        if let Ok(mut pos) = self.ecs.get::<&mut Position>(pet) {
            pos.0 = home;
        }
        if let Ok(mut prev) = self.ecs.get::<&mut PrevPosition>(pet) {
            prev.0 = home;
        }
        if let Ok(mut vel) = self.ecs.get::<&mut FallVelocity>(pet) {
            vel.0 = 0.0;
        }
        if let Ok(mut behavior) = self.ecs.get::<&mut Behavior>(pet) {
            if !matches!(
                behavior.state,
                BehaviorState::Tired | BehaviorState::Sleeping
            ) {
                behavior.state = BehaviorState::Idle;
                self.events.push(Event::StateChanged {
                    pet,
                    state: BehaviorState::Idle,
                });
            }
        }
        Ok(())
    }

    /// Pick the sprite folder for a pet (inherited by its offspring).
    pub fn set_species(&mut self, pet: hecs::Entity, name: &str) -> Result<(), ActionError> {
        let mut species = self
            .ecs
            .get::<&mut Species>(pet)
            .map_err(|_| ActionError::UnknownPet)?;
        species.0 = if name.trim().is_empty() {
            DEFAULT_SPECIES.to_string()
        } else {
            name.to_string()
        };
        Ok(())
    }

    /// Register the decoded pixels of a pet's current frame for the pixel
    /// overlap test.
    pub fn set_sprite(&mut self, pet: hecs::Entity, frame: SpriteFrame) -> Result<(), ActionError> {
        self.ecs
            .insert_one(pet, frame)
            .map_err(|_| ActionError::UnknownPet)
    }

    // -----------------------------------------------------------------------
    // Dragging
    // -----------------------------------------------------------------------

    /// The user grabbed a pet: physics and AI let go of it.
    pub fn drag_begin(&mut self, pet: hecs::Entity) -> Result<(), ActionError> {
        let start = self
            .ecs
            .get::<&Position>(pet)
            .map(|p| p.0)
            .map_err(|_| ActionError::UnknownPet)?;
        let _ = self.ecs.insert_one(pet, Dragging { start });

        if let Ok(mut vel) = self.ecs.get::<&mut FallVelocity>(pet) {
            vel.0 = 0.0;
        }

        // Wake it up to be carried, unless it's sleeping off a deficit.
        let keep_sleeping = self
            .ecs
            .query_one_mut::<(&Behavior, &Vitals)>(pet)
            .map(|(b, v)| b.state == BehaviorState::Sleeping && !v.is_full())
            .unwrap_or(false);
        if !keep_sleeping {
            if let Ok(mut behavior) = self.ecs.get::<&mut Behavior>(pet) {
                behavior.state = BehaviorState::Idle;
            }
            self.events.push(Event::StateChanged {
                pet,
                state: BehaviorState::Idle,
            });
        }
        Ok(())
    }

    /// Position update while the user holds the pet.
    pub fn drag_move(&mut self, pet: hecs::Entity, to: Vec2) -> Result<(), ActionError> {
        if !self.ecs.contains(pet) {
            return Err(ActionError::UnknownPet);
        }
        if self.ecs.get::<&Dragging>(pet).is_err() {
            return Ok(()); // not dragging; stale input
        }
        if let Ok(mut pos) = self.ecs.get::<&mut Position>(pet) {
            if let Ok(mut prev) = self.ecs.get::<&mut PrevPosition>(pet) {
                prev.0 = pos.0;
            }
            pos.0 = to;
        }
        Ok(())
    }

    /// The user let go. A near-zero total displacement was a poke, which
    /// annoys the pet: it loses health and storms home (or collapses asleep).
    pub fn drag_end(&mut self, pet: hecs::Entity) -> Result<(), ActionError> {
        let drag = match self.ecs.remove_one::<Dragging>(pet) {
            Ok(d) => d,
            Err(hecs::ComponentError::NoSuchEntity) => return Err(ActionError::UnknownPet),
            Err(hecs::ComponentError::MissingComponent(_)) => return Ok(()),
        };

        let pos = self
            .ecs
            .get::<&Position>(pet)
            .map(|p| p.0)
            .map_err(|_| ActionError::UnknownPet)?;

        if (pos - drag.start).length() < DRAG_POKE_THRESHOLD {
            let health = {
                let mut vitals = self
                    .ecs
                    .get::<&mut Vitals>(pet)
                    .map_err(|_| ActionError::UnknownPet)?;
                vitals.lose(DRAG_PENALTY);
                vitals.health
            };
            let state = if health > EXHAUSTED_THRESHOLD {
                BehaviorState::ReturningHome
            } else {
                BehaviorState::Sleeping
            };
            if let Ok(mut behavior) = self.ecs.get::<&mut Behavior>(pet) {
                behavior.state = state;
            }
            self.events.push(Event::StateChanged { pet, state });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Projectiles
    // -----------------------------------------------------------------------

    /// Throw a toy ball in from the top of the screen. Catching it earns the
    /// owning pet one stored food.
    pub fn throw_ball(&mut self, owner: Option<hecs::Entity>) -> usize {
        let pos = Vec2::new((self.work_area.width - BALL_SIZE) * 0.5, 0.0);
        let vel = Vec2::new(self.rng.f32() * 6.0 - 3.0, 2.0);
        self.projectiles
            .spawn(pos, vel, false, Some(BALL_TTL_TICKS), owner)
    }

    /// Rain food from above the work area.
    pub fn scatter_food(&mut self, owner: Option<hecs::Entity>) {
        for _ in 0..SCATTER_COUNT {
            let pos = Vec2::new(
                self.rng.f32() * (self.work_area.width - 2.0 * BALL_SIZE).max(0.0),
                self.rng.f32() * -2.0 * BALL_SIZE,
            );
            let vel = Vec2::new(
                self.rng.i32(-3..4) as f32,
                self.rng.i32(2..8) as f32,
            );
            self.projectiles
                .spawn(pos, vel, true, Some(BALL_TTL_TICKS), owner);
        }
    }

    /// The user clicked a ball. A caught toy is banked as food for the pet
    /// that threw it.
    pub fn catch_ball(&mut self, index: usize) -> bool {
        let Some(ball) = self.projectiles.catch(index) else {
            return false;
        };
        if !ball.is_food {
            if let Some(owner) = ball.owner {
                if let Ok(mut pantry) = self.ecs.get::<&mut Pantry>(owner) {
                    pantry.food_count += 1;
                }
                if self.ecs.contains(owner) {
                    self.events.push(Event::FoodGained { pet: owner });
                }
            }
        }
        true
    }
}
