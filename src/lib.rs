//! Desktop pet simulation engine.
//!
//! Pets walk, idle, sleep and chase thrown food across the screen work area.
//! This crate is the simulation core only: physics, the behavior state
//! machine, and pixel-accurate sprite collision. Window creation, menus,
//! sprite loading and rendering live in the platform layer, which feeds in
//! work-area bounds, decoded sprite pixels and drag gestures, and renders
//! whatever [`world::PetWorld`] reports back.

pub mod collision;
pub mod ecs;
pub mod error;
pub mod events;
pub mod pet;
pub mod projectile;
pub mod scheduler;
pub mod world;
