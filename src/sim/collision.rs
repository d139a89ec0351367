//! Axis-aligned bounding-box collision
//!
//! Every hit test in the game is a rectangle overlap between two sprites
//! (or a sprite and a free-standing missile rectangle).

use glam::Vec2;

use super::sprite::Sprite;

/// An axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

impl From<&Sprite> for Aabb {
    fn from(sprite: &Sprite) -> Self {
        Self::new(sprite.x(), sprite.y(), sprite.w(), sprite.h())
    }
}

/// Separating-axis overlap test. Touching edges count as a hit.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    !(b.pos.x > a.right() || b.right() < a.pos.x || b.pos.y > a.bottom() || b.bottom() < a.pos.y)
}

/// Overlap test between two sprites, ignoring visibility
#[inline]
pub fn sprites_intersect(a: &Sprite, b: &Sprite) -> bool {
    intersects(&Aabb::from(a), &Aabb::from(b))
}
