use glam::Vec2;

use crate::ecs::components::{Behavior, BehaviorState, Body, Dragging, Position, Vitals};
use crate::ecs::systems::behavior::{EXHAUSTED_THRESHOLD, TIRED_THRESHOLD};
use crate::events::Event;
use crate::projectile::Projectiles;

/// Speed imposed on a kicked ball.
const KICK_STRENGTH: f32 = 40.0;
/// Health restored by eating a food projectile on contact.
const FOOD_HEAL: i32 = 20;
/// Growth gained per food projectile eaten.
const FOOD_GROWTH: f32 = 0.05;
/// Horizontal distance under which a pet stops re-facing its target.
const FACING_DEADBAND: f32 = 10.0;

/// Projectile targeting and contact resolution.
///
/// Each awake pet faces the projectile with the smallest horizontal distance
/// to its center (first found wins a tie) and resolves contacts against every
/// ball its bounding box touches: food is eaten, toys are kicked.
pub fn update(
    world: &mut hecs::World,
    projectiles: &mut Projectiles,
    rng: &mut fastrand::Rng,
    events: &mut Vec<Event>,
) {
    if !projectiles.any_live() {
        return;
    }

    for (entity, (pos, body, behavior, vitals, dragging)) in world.query_mut::<(
        &Position,
        &mut Body,
        &mut Behavior,
        &mut Vitals,
        Option<&Dragging>,
    )>() {
        if dragging.is_some() || vitals.health <= EXHAUSTED_THRESHOLD {
            continue;
        }
        if !matches!(
            behavior.state,
            BehaviorState::Idle | BehaviorState::Walking | BehaviorState::Tired
        ) {
            continue;
        }

        let center = pos.0 + body.size() * 0.5;
        let rect = body.rect(pos.0);

        let mut closest: Option<(f32, f32)> = None; // (|dx|, ball center x)
        for idx in 0..projectiles.balls.len() {
            let ball = projectiles.balls[idx];
            if ball.closed {
                continue;
            }

            if rect.intersects(&ball.rect()) {
                if ball.is_food {
                    projectiles.balls[idx].closed = true;
                    body.grow(FOOD_GROWTH);
                    vitals.gain(FOOD_HEAL);
                    events.push(Event::FoodEaten { pet: entity });
                    continue;
                }

                let mut dir = (ball.center() - center).normalize_or_zero();
                if dir == Vec2::ZERO {
                    // Dead-center contact: punt it upward somewhere random.
                    dir = Vec2::new(rng.f32() - 0.5, -1.0);
                }
                projectiles.kick(idx, dir * KICK_STRENGTH);
                events.push(Event::BallKicked { index: idx });
            }

            let dist = (ball.center().x - center.x).abs();
            if closest.map_or(true, |(best, _)| dist < best) {
                closest = Some((dist, ball.center().x));
            }
        }

        if let Some((_, target_x)) = closest {
            if (target_x - center.x).abs() > FACING_DEADBAND {
                behavior.walk_direction = if target_x > center.x { 1 } else { -1 };
                if behavior.state == BehaviorState::Idle {
                    let state = if vitals.health <= TIRED_THRESHOLD {
                        BehaviorState::Tired
                    } else {
                        BehaviorState::Walking
                    };
                    behavior.state = state;
                    events.push(Event::StateChanged { pet: entity, state });
                }
            }
        }
    }
}
