use glam::Vec2;

use crate::collision::Rect;
use crate::world::WorkArea;

/// Gravity applied to a projectile each tick (pixels/tick²).
const GRAVITY: f32 = 0.5;
/// Bounce elasticity: velocity retained (and reversed) on impact.
const ELASTICITY: f32 = -0.7;
/// Air friction applied to both velocity components each tick.
const FRICTION: f32 = 0.98;
/// Extra horizontal friction on a floor bounce.
const GROUND_FRICTION: f32 = 0.9;
/// |vy| below this while resting on the floor snaps to exactly zero.
const REST_EPSILON: f32 = 1.0;
/// Rendered ball diameter in pixels.
pub const BALL_SIZE: f32 = 40.0;
/// Max live projectiles — oldest is dropped when at capacity.
const MAX_BALLS: usize = 64;
/// Auto-expiry for thrown/scattered balls, in fast ticks (~30 s).
pub const BALL_TTL_TICKS: u32 = 1875;

/// A thrown ball or a piece of food with simple rigid-body physics.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Food is consumed on pet contact; toys get kicked instead.
    pub is_food: bool,
    /// Remaining fast ticks before auto-expiry, if any.
    pub ttl: Option<u32>,
    /// Pet that spawned this projectile; closing it cascades here.
    pub owner: Option<hecs::Entity>,
    /// Marked for removal at the next sweep (caught, eaten, or expired).
    pub closed: bool,
}

impl Projectile {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Manages all live projectiles.
pub struct Projectiles {
    pub balls: Vec<Projectile>,
}

impl Projectiles {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(MAX_BALLS),
        }
    }

    pub fn spawn(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        is_food: bool,
        ttl: Option<u32>,
        owner: Option<hecs::Entity>,
    ) -> usize {
        if self.balls.len() >= MAX_BALLS {
            self.balls.remove(0);
        }
        self.balls.push(Projectile {
            pos,
            vel,
            size: Vec2::splat(BALL_SIZE),
            is_food,
            ttl,
            owner,
            closed: false,
        });
        self.balls.len() - 1
    }

    /// Integrate one fast tick for every live projectile.
    ///
    /// Gravity, then motion, then air friction, then boundary reflection
    /// against the work area. A near-still ball resting on the floor has its
    /// vertical velocity snapped to exactly zero so it cannot micro-bounce
    /// forever.
    pub fn advance(&mut self, area: WorkArea) {
        for ball in self.balls.iter_mut().filter(|b| !b.closed) {
            ball.vel.y += GRAVITY;
            ball.pos += ball.vel;
            ball.vel *= FRICTION;

            let floor = area.height - ball.size.y;
            if ball.pos.y > floor {
                ball.pos.y = floor;
                ball.vel.y *= ELASTICITY;
                ball.vel.x *= GROUND_FRICTION;
                if ball.vel.y.abs() < REST_EPSILON {
                    ball.vel.y = 0.0;
                }
            } else if ball.pos.y < 0.0 && ball.vel.y < 0.0 {
                // Ceiling. Balls scattered in from above the work area are
                // still inbound and pass through untouched.
                ball.pos.y = 0.0;
                ball.vel.y *= ELASTICITY;
            }

            let right_wall = area.width - ball.size.x;
            if ball.pos.x < 0.0 {
                ball.pos.x = 0.0;
                ball.vel.x *= ELASTICITY;
            } else if ball.pos.x > right_wall {
                ball.pos.x = right_wall;
                ball.vel.x *= ELASTICITY;
            }

            if let Some(ttl) = ball.ttl.as_mut() {
                *ttl = ttl.saturating_sub(1);
                if *ttl == 0 {
                    ball.closed = true;
                }
            }
        }
    }

    /// Externally imposed velocity, used when a pet kicks a toy ball.
    pub fn kick(&mut self, index: usize, vel: Vec2) {
        if let Some(ball) = self.balls.get_mut(index) {
            ball.vel = vel;
        }
    }

    /// User clicked a ball. Returns the ball if it was still live.
    pub fn catch(&mut self, index: usize) -> Option<Projectile> {
        let ball = self.balls.get_mut(index)?;
        if ball.closed {
            return None;
        }
        ball.closed = true;
        Some(*ball)
    }

    /// Mark every projectile owned by `pet` for removal.
    pub fn close_owned_by(&mut self, pet: hecs::Entity) {
        for ball in &mut self.balls {
            if ball.owner == Some(pet) {
                ball.closed = true;
            }
        }
    }

    /// Drop closed projectiles. Runs at the top of each fast tick so nothing
    /// mid-tick ever dereferences a removed ball.
    pub fn sweep(&mut self) {
        self.balls.retain(|b| !b.closed);
    }

    pub fn any_live(&self) -> bool {
        self.balls.iter().any(|b| !b.closed)
    }
}
