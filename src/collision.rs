//! Pixel-accurate sprite overlap testing.
//!
//! Bounding boxes lie: most pet sprites are mostly transparent, so two
//! rectangles can intersect while the pets visibly never touch. This module
//! maps the screen-space intersection of two bounding boxes back into each
//! sprite's native pixel buffer and looks for a pixel where both alphas are
//! nonzero.

use glam::Vec2;

use crate::ecs::components::SpriteFrame;

/// Axis-aligned screen-space rectangle (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.right()
            && other.min.x < self.right()
            && self.min.y < other.bottom()
            && other.min.y < self.bottom()
    }

    /// Overlapping region, or `None` when the rectangles are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Vec2::new(
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        if max.x <= min.x || max.y <= min.y {
            return None;
        }
        Some(Rect::new(min, max - min))
    }
}

/// True pixel collision between two sprites rendered at `rect_a` / `rect_b`.
///
/// Walks every screen pixel in the bounding-box intersection, maps it back
/// into each sprite's native buffer (undoing the display scale, mirroring x
/// for flipped sprites) and short-circuits on the first pixel where both
/// alpha bytes are nonzero. The bbox reject keeps the common disjoint case
/// O(1); the worst case is O(intersection area).
///
/// Fail-safe: an empty pixel buffer or a degenerate rectangle reports no
/// collision rather than failing the tick.
pub fn pixel_overlap(
    sprite_a: &SpriteFrame,
    rect_a: Rect,
    flipped_a: bool,
    sprite_b: &SpriteFrame,
    rect_b: Rect,
    flipped_b: bool,
) -> bool {
    if sprite_a.data.is_empty() || sprite_b.data.is_empty() {
        return false;
    }
    if sprite_a.width == 0 || sprite_a.height == 0 || sprite_b.width == 0 || sprite_b.height == 0 {
        return false;
    }
    if rect_a.size.x < 1.0 || rect_a.size.y < 1.0 || rect_b.size.x < 1.0 || rect_b.size.y < 1.0 {
        return false;
    }

    let inter = match rect_a.intersection(&rect_b) {
        Some(r) => r,
        None => return false,
    };

    // Native pixels per screen pixel for each sprite.
    let scale_ax = sprite_a.width as f32 / rect_a.size.x;
    let scale_ay = sprite_a.height as f32 / rect_a.size.y;
    let scale_bx = sprite_b.width as f32 / rect_b.size.x;
    let scale_by = sprite_b.height as f32 / rect_b.size.y;

    let y_start = inter.min.y as i32;
    let y_end = inter.bottom() as i32;
    let x_start = inter.min.x as i32;
    let x_end = inter.right() as i32;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let ax = ((x as f32 - rect_a.min.x) * scale_ax) as i32;
            let ay = ((y as f32 - rect_a.min.y) * scale_ay) as i32;
            let bx = ((x as f32 - rect_b.min.x) * scale_bx) as i32;
            let by = ((y as f32 - rect_b.min.y) * scale_by) as i32;

            let ax = if flipped_a {
                sprite_a.width as i32 - 1 - ax
            } else {
                ax
            };
            let bx = if flipped_b {
                sprite_b.width as i32 - 1 - bx
            } else {
                bx
            };

            // Rounding at rect edges can map just outside the buffer.
            if ax < 0 || ay < 0 || bx < 0 || by < 0 {
                continue;
            }
            let alpha_a = match sprite_a.alpha_at(ax as u32, ay as u32) {
                Some(a) => a,
                None => continue,
            };
            let alpha_b = match sprite_b.alpha_at(bx as u32, by as u32) {
                Some(a) => a,
                None => continue,
            };

            if alpha_a > 0 && alpha_b > 0 {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a frame where `opaque` decides per-pixel alpha.
    fn frame(w: u32, h: u32, opaque: impl Fn(u32, u32) -> bool) -> SpriteFrame {
        let mut data = vec![0u8; (w * h * 4) as usize];
        for y in 0..h {
            for x in 0..w {
                if opaque(x, y) {
                    data[((y * w + x) * 4 + 3) as usize] = 255;
                }
            }
        }
        SpriteFrame {
            width: w,
            height: h,
            data,
        }
    }

    fn solid(w: u32, h: u32) -> SpriteFrame {
        frame(w, h, |_, _| true)
    }

    #[test]
    fn disjoint_rects_never_collide() {
        let a = solid(8, 8);
        let b = solid(8, 8);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        let rb = Rect::new(Vec2::new(100.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!pixel_overlap(&a, ra, false, &b, rb, false));
    }

    #[test]
    fn solid_overlap_collides() {
        let a = solid(8, 8);
        let b = solid(8, 8);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        let rb = Rect::new(Vec2::new(4.0, 4.0), Vec2::new(8.0, 8.0));
        assert!(pixel_overlap(&a, ra, false, &b, rb, false));
    }

    #[test]
    fn transparent_overlap_region_reports_no_collision() {
        // Boxes overlap by one column, but both sprites are transparent there:
        // A is opaque only on its left half, B only on its right half.
        let a = frame(8, 8, |x, _| x < 4);
        let b = frame(8, 8, |x, _| x >= 4);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        let rb = Rect::new(Vec2::new(7.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(ra.intersects(&rb));
        assert!(!pixel_overlap(&a, ra, false, &b, rb, false));
    }

    #[test]
    fn flip_mirrors_the_opaque_half() {
        // A is opaque only on its native left half. Flipped, that half lands
        // on the right side of its rect, which is where B overlaps it.
        let a = frame(8, 8, |x, _| x < 4);
        let b = solid(8, 8);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        let rb = Rect::new(Vec2::new(6.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!pixel_overlap(&a, ra, false, &b, rb, false));
        assert!(pixel_overlap(&a, ra, true, &b, rb, false));
    }

    #[test]
    fn scaled_sprite_maps_back_to_native_pixels() {
        // 4x4 native buffer displayed at 16x16: each native pixel covers a
        // 4x4 screen block. Only the native bottom-right pixel is opaque.
        let a = frame(4, 4, |x, y| x == 3 && y == 3);
        let b = solid(8, 8);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(16.0, 16.0));

        // Overlapping A's top-left screen region: transparent there.
        let rb = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!pixel_overlap(&a, ra, false, &b, rb, false));

        // Overlapping A's bottom-right screen region: opaque there.
        let rb = Rect::new(Vec2::new(12.0, 12.0), Vec2::new(8.0, 8.0));
        assert!(pixel_overlap(&a, ra, false, &b, rb, false));
    }

    #[test]
    fn empty_buffer_is_fail_safe() {
        let a = SpriteFrame {
            width: 8,
            height: 8,
            data: Vec::new(),
        };
        let b = solid(8, 8);
        let r = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!pixel_overlap(&a, r, false, &b, r, false));
    }

    #[test]
    fn degenerate_rect_is_fail_safe() {
        let a = solid(8, 8);
        let b = solid(8, 8);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 8.0));
        let rb = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(!pixel_overlap(&a, ra, false, &b, rb, false));
    }

    #[test]
    fn repeated_calls_agree() {
        let a = frame(8, 8, |x, y| (x + y) % 2 == 0);
        let b = frame(8, 8, |x, y| (x + y) % 2 == 1);
        let ra = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0));
        let rb = Rect::new(Vec2::new(3.0, 1.0), Vec2::new(8.0, 8.0));
        let first = pixel_overlap(&a, ra, false, &b, rb, false);
        let second = pixel_overlap(&a, ra, false, &b, rb, false);
        assert_eq!(first, second);
    }

    #[test]
    fn rect_intersection_basics() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Vec2::new(5.0, 5.0));
        assert_eq!(i.size, Vec2::new(5.0, 5.0));

        let c = Rect::new(Vec2::new(20.0, 20.0), Vec2::new(4.0, 4.0));
        assert!(a.intersection(&c).is_none());
        assert!(!a.intersects(&c));
    }
}
