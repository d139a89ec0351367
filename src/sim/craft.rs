//! Combatants: a sprite plus combat state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::sprite::Sprite;
use crate::consts::{ALIEN_POPULATION, ALIEN_TYPES};

/// A combat entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    pub sprite: Sprite,
    /// Mid-explosion; stays visible until the explosion animation completes
    pub exploding: bool,
    /// Position of this craft's in-flight missile, if one is launched
    pub missile: Option<Vec2>,
}

impl Craft {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite,
            exploding: false,
            missile: None,
        }
    }

    /// Clear combat state
    pub fn reset_combat(&mut self) {
        self.exploding = false;
        self.missile = None;
    }

    /// Alive for collision purposes: on screen and not already blowing up
    pub fn is_live(&self) -> bool {
        self.sprite.visible && !self.exploding
    }
}

/// Identifies one craft inside the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CraftId {
    Player,
    Alien { kind: usize, slot: usize },
    BigBlue,
    Asteroid,
    Quarter(Quarter),
}

impl CraftId {
    /// Every alien id in grid order, type-major
    pub fn aliens() -> impl Iterator<Item = CraftId> {
        (0..ALIEN_TYPES)
            .flat_map(|kind| (0..ALIEN_POPULATION).map(move |slot| CraftId::Alien { kind, slot }))
    }
}

/// The four pieces an asteroid breaks into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [
        Quarter::UpperLeft,
        Quarter::UpperRight,
        Quarter::LowerLeft,
        Quarter::LowerRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quarter::UpperLeft => 0,
            Quarter::UpperRight => 1,
            Quarter::LowerLeft => 2,
            Quarter::LowerRight => 3,
        }
    }

    fn is_left(self) -> bool {
        matches!(self, Quarter::UpperLeft | Quarter::LowerLeft)
    }

    fn is_upper(self) -> bool {
        matches!(self, Quarter::UpperLeft | Quarter::UpperRight)
    }

    /// Fixed outward drift
    pub fn velocity(self) -> Vec2 {
        let dx = if self.is_left() { -0.25 } else { 0.25 };
        let dy = if self.is_upper() { -1.0 } else { 1.0 };
        Vec2::new(dx, dy)
    }

    /// Offset of this quarter's sub-rectangle within an asteroid of the
    /// given pixel size
    pub fn offset(self, asteroid_width: u32, asteroid_height: u32) -> Vec2 {
        let x = if self.is_left() { 0 } else { asteroid_width / 2 };
        let y = if self.is_upper() { 0 } else { asteroid_height / 2 };
        Vec2::new(x as f32, y as f32)
    }

    /// Has the piece left the screen through one of its two outward edges
    pub fn has_escaped(self, sprite: &Sprite, width: f32, height: f32) -> bool {
        let past_side = if self.is_left() {
            sprite.x() < -sprite.w()
        } else {
            sprite.x() > width
        };
        let past_end = if self.is_upper() {
            sprite.y() < -sprite.h()
        } else {
            sprite.y() > height
        };
        past_side || past_end
    }
}

/// Asteroid debris
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub quarters: [Craft; 4],
    /// Quarters still on screen; a new asteroid may only appear at zero
    pub remaining: u8,
}

impl Debris {
    pub fn new(sprites: [Sprite; 4]) -> Self {
        Self {
            quarters: sprites.map(Craft::new),
            remaining: 0,
        }
    }

    pub fn get(&self, quarter: Quarter) -> &Craft {
        &self.quarters[quarter.index()]
    }

    pub fn get_mut(&mut self, quarter: Quarter) -> &mut Craft {
        &mut self.quarters[quarter.index()]
    }

    /// Hide every piece and forget the count
    pub fn clear(&mut self) {
        for craft in &mut self.quarters {
            craft.sprite.visible = false;
            craft.reset_combat();
        }
        self.remaining = 0;
    }

    /// Visible pieces with their bounding boxes
    pub fn visible_boxes(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.quarters
            .iter()
            .filter(|q| q.sprite.visible)
            .map(|q| Aabb::from(&q.sprite))
    }
}
