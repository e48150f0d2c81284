use glam::Vec2;

use crate::collision::Rect;

/// Current world position in screen pixels (top-left of the bounding box).
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Previous tick's position — used for render interpolation.
#[derive(Debug, Clone, Copy)]
pub struct PrevPosition(pub Vec2);

/// Vertical fall speed in pixels/tick. Horizontal motion is recomputed from
/// behavior state each tick and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct FallVelocity(pub f32);

/// Bounding box: rendered size is `base_size * scale`.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    /// Unscaled sprite dimensions in pixels.
    pub base_size: Vec2,
    /// Growth scale, clamped to [`SCALE_MIN`, `SCALE_MAX`].
    pub scale: f32,
}

/// Smallest allowed growth scale (freshly bred newborn).
pub const SCALE_MIN: f32 = 0.2;
/// Largest allowed growth scale (a very well-fed pet).
pub const SCALE_MAX: f32 = 2.0;

impl Body {
    pub fn size(&self) -> Vec2 {
        self.base_size * self.scale
    }

    pub fn rect(&self, pos: Vec2) -> Rect {
        Rect::new(pos, self.size())
    }

    /// Grow by `amount`, clamped to the scale range.
    pub fn grow(&mut self, amount: f32) {
        self.scale = (self.scale + amount).clamp(SCALE_MIN, SCALE_MAX);
    }
}

/// Health pool. Always kept within [0, max_health].
#[derive(Debug, Clone, Copy)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
}

impl Vitals {
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn gain(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn lose(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_full(&self) -> bool {
        self.health >= self.max_health
    }
}

/// Current behavior state plus facing.
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub state: BehaviorState,
    /// -1 left, 0 none, 1 right. Right-facing sprites render mirrored.
    pub walk_direction: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BehaviorState {
    Idle,
    Walking,
    Sleeping,
    Tired,
    ReturningHome,
}

/// Walk speed in pixels/tick — randomized per individual at spawn.
#[derive(Debug, Clone, Copy)]
pub struct WalkSpeed(pub f32);

/// Stored food and feeding progress toward breeding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pantry {
    pub food_count: u32,
    /// Feeds since the last breed; breeding triggers at [`BREED_FEED_COUNT`].
    pub fed_count: u32,
}

/// Feeds required before a pet breeds a newborn.
pub const BREED_FEED_COUNT: u32 = 3;

/// Marks a pet currently held by the user. Physics and AI leave it alone
/// until the drag ends.
#[derive(Debug, Clone, Copy)]
pub struct Dragging {
    /// Position when the drag began — a near-zero total displacement on
    /// release counts as poking the pet and costs it health.
    pub start: Vec2,
}

/// Marks a freshly bred pet still growing on the growth cadence.
#[derive(Debug, Clone, Copy)]
pub struct Newborn;

/// Pet name for tooltips.
#[derive(Debug, Clone)]
pub struct PetName(pub String);

/// Sprite-folder species, inherited by offspring.
#[derive(Debug, Clone)]
pub struct Species(pub String);

/// Decoded sprite pixels for the pet's current frame, registered by the
/// platform layer. 4 bytes per pixel, alpha last.
#[derive(Debug, Clone)]
pub struct SpriteFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl SpriteFrame {
    /// Alpha byte at native pixel (x, y), if in range.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.data.get(idx).copied()
    }
}
