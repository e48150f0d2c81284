use glam::Vec2;

use crate::collision::{pixel_overlap, Rect};
use crate::ecs::components::{Behavior, Body, Dragging, FallVelocity, Position, SpriteFrame};

/// Positional nudge applied per tick while two pets overlap.
const PUSH_AMOUNT: f32 = 2.0;
/// Push vectors shorter than this are degenerate (pets stacked exactly).
const DEGENERATE_LENGTH: f32 = 1.0;
/// Damp factor for vertical velocity when landing on another pet.
const LANDING_DAMP: f32 = -0.1;

/// Pet state captured for the pair pass, so the push math reads a stable
/// snapshot while writes go through the world.
pub struct PetSnapshot {
    entity: hecs::Entity,
    pos: Vec2,
    rect: Rect,
    dragging: bool,
    /// Right-facing sprites render mirrored.
    flipped: bool,
}

/// Soft inter-pet repulsion: every overlapping pair pushes apart a little
/// each tick until the overlap resolves. Dragged pets still repel others but
/// are never moved themselves.
///
/// The population cap keeps this O(n²) pass trivially cheap; no spatial
/// structure is warranted for 20 bodies.
pub fn update(world: &mut hecs::World, rng: &mut fastrand::Rng, snapshots: &mut Vec<PetSnapshot>) {
    snapshots.clear();
    for (entity, (pos, body, behavior, dragging)) in world
        .query::<(&Position, &Body, &Behavior, Option<&Dragging>)>()
        .iter()
    {
        snapshots.push(PetSnapshot {
            entity,
            pos: pos.0,
            rect: body.rect(pos.0),
            dragging: dragging.is_some(),
            flipped: behavior.walk_direction == 1,
        });
    }

    for i in 0..snapshots.len() {
        if snapshots[i].dragging {
            continue;
        }
        for j in 0..snapshots.len() {
            if i == j || !snapshots[i].rect.intersects(&snapshots[j].rect) {
                continue;
            }

            let mut push = snapshots[i].pos - snapshots[j].pos;
            if push.length() < DEGENERATE_LENGTH {
                // Stacked exactly: break the tie with a small random vector,
                // biased upward so pets pop apart rather than into the floor.
                push = Vec2::new(rng.f32() * 10.0 - 5.0, rng.f32() * -5.0);
            }
            let push = push.normalize_or_zero();
            if push == Vec2::ZERO {
                continue;
            }

            if let Ok(mut pos) = world.get::<&mut Position>(snapshots[i].entity) {
                pos.0 += push * PUSH_AMOUNT;
            }

            // Falling onto the other pet damps the fall, but only when the
            // sprites visibly touch; transparent corners don't count.
            if snapshots[i].pos.y < snapshots[j].pos.y && confirmed_contact(world, &snapshots[i], &snapshots[j]) {
                if let Ok(mut vel) = world.get::<&mut FallVelocity>(snapshots[i].entity) {
                    if vel.0 > 0.0 {
                        vel.0 *= LANDING_DAMP;
                    }
                }
            }
        }
    }
}

/// Pixel-confirm a bbox overlap when both pets carry decoded sprite frames.
/// Without pixel data the bbox result stands; a missing buffer is a platform
/// gap, not a reason to stop simulating.
fn confirmed_contact(world: &hecs::World, a: &PetSnapshot, b: &PetSnapshot) -> bool {
    let frame_a = world.get::<&SpriteFrame>(a.entity);
    let frame_b = world.get::<&SpriteFrame>(b.entity);
    match (frame_a, frame_b) {
        (Ok(fa), Ok(fb)) => pixel_overlap(&fa, a.rect, a.flipped, &fb, b.rect, b.flipped),
        _ => true,
    }
}

/// Reusable snapshot buffer, owned by the world so the per-tick pass
/// allocates nothing.
pub fn snapshot_buffer() -> Vec<PetSnapshot> {
    Vec::with_capacity(crate::world::POPULATION_CAP)
}
