use glam::Vec2;

use crate::ecs::components::*;
use crate::ecs::systems::kinematics::HOME_MARGIN;
use crate::world::WorkArea;

/// Unscaled pet sprite dimensions in pixels.
pub const BASE_SIZE: Vec2 = Vec2::new(100.0, 100.0);
/// Newborns appear this far to the side of their parent.
const NEWBORN_OFFSET_X: f32 = -50.0;
/// Species used when the platform layer hasn't registered any.
pub const DEFAULT_SPECIES: &str = "Default";

/// Where a new pet starts out.
#[derive(Debug, Clone, Copy)]
pub enum Placement {
    /// Grounded at the bottom-right home corner.
    Home,
    /// Random spot anywhere in the work area (it falls from there).
    Random,
    /// Small-scale offspring next to its parent.
    Newborn { parent: hecs::Entity },
}

/// Spawn one pet with randomized individual attributes.
///
/// Every individual rolls its own max health, walk speed and (except for
/// newborns) starting size, so a swarm never moves in lockstep.
pub fn spawn(
    ecs: &mut hecs::World,
    rng: &mut fastrand::Rng,
    area: WorkArea,
    placement: Placement,
) -> hecs::Entity {
    let max_health = rng.i32(80..200);
    let walk_speed = 1.0 + rng.f32() * 3.0;
    let name = generate_pet_name(rng);

    let (pos, scale, species, is_newborn) = match placement {
        Placement::Home => {
            let scale = 0.4 + rng.f32() * 0.4;
            let size = BASE_SIZE * scale;
            let pos = Vec2::new(area.width - size.x - HOME_MARGIN, area.height - size.y);
            (pos, scale, DEFAULT_SPECIES.to_string(), false)
        }
        Placement::Random => {
            let scale = 0.4 + rng.f32() * 0.4;
            let pos = Vec2::new(
                rng.f32() * (area.width - BASE_SIZE.x).max(0.0),
                rng.f32() * (area.height - BASE_SIZE.y).max(0.0),
            );
            (pos, scale, DEFAULT_SPECIES.to_string(), false)
        }
        Placement::Newborn { parent } => {
            let parent_pos = ecs
                .get::<&Position>(parent)
                .map(|p| p.0)
                .unwrap_or(Vec2::new(area.width * 0.5, area.height * 0.5));
            let species = ecs
                .get::<&Species>(parent)
                .map(|s| s.0.clone())
                .unwrap_or_else(|_| DEFAULT_SPECIES.to_string());
            let pos = parent_pos + Vec2::new(NEWBORN_OFFSET_X, 0.0);
            (pos, SCALE_MIN, species, true)
        }
    };

    let entity = ecs.spawn((
        Position(pos),
        PrevPosition(pos),
        FallVelocity(0.0),
        Body {
            base_size: BASE_SIZE,
            scale,
        },
        Vitals::new(max_health),
        Behavior {
            state: BehaviorState::Idle,
            walk_direction: 1,
        },
        WalkSpeed(walk_speed),
        Pantry::default(),
        PetName(name),
        Species(species),
    ));

    if is_newborn {
        let _ = ecs.insert_one(entity, Newborn);
    }

    entity
}

/// Generate a procedural pet name from name parts.
fn generate_pet_name(rng: &mut fastrand::Rng) -> String {
    const PREFIXES: &[&str] = &[
        "", "", "", "", "", "Sir ", "Lady ", "Professor ", "Captain ",
        "Dr. ", "Little ", "Big ", "Lord ", "Princess ",
    ];
    const NAMES: &[&str] = &[
        "Mochi", "Noodle", "Biscuit", "Pebble", "Dumpling", "Waffles",
        "Pudding", "Clover", "Sprout", "Pickle", "Momo", "Tofu",
        "Bubbles", "Acorn", "Maple", "Pumpkin", "Cocoa", "Marble",
        "Beans", "Nugget", "Pixel", "Widget", "Cookie", "Pretzel",
        "Taro", "Yuzu", "Boba", "Churro", "Crumpet", "Gumdrop",
    ];
    const SUFFIXES: &[&str] = &[
        "", "", "", "", "", " Jr.", " III", " the Great", " the Round",
    ];
    format!(
        "{}{}{}",
        PREFIXES[rng.usize(0..PREFIXES.len())],
        NAMES[rng.usize(0..NAMES.len())],
        SUFFIXES[rng.usize(0..SUFFIXES.len())],
    )
}
