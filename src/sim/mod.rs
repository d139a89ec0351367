//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (aliens type-major, then slot)
//! - No platform dependencies

pub mod collision;
pub mod craft;
pub mod explosion;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{Aabb, intersects, sprites_intersect};
pub use craft::{Craft, CraftId, Debris, Quarter};
pub use explosion::{ExplosionStep, explode};
pub use sprite::{SheetId, Sprite};
pub use state::{Controls, Direction, GamePhase, GameState, Roster};
pub use tick::{spawn_at_random, tick};
