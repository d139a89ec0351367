//! Fixed timestep simulation step
//!
//! One call advances every mover by one frame in a fixed order: big-blue,
//! its missile, the alien wave, the player, the player missile, the
//! asteroid and its debris. Collisions are resolved as each mover moves.

use glam::Vec2;

use super::collision::{Aabb, intersects, sprites_intersect};
use super::craft::Quarter;
use super::state::{Direction, GameState};
use crate::consts::*;

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    move_big_blue(state);
    move_big_blue_missile(state);
    move_aliens(state);
    move_player(state);
    move_player_missile(state);
    move_asteroid(state);
    move_debris(state);
}

/// Random arrivals, evaluated once per running frame before the step
pub fn spawn_at_random(state: &mut GameState) {
    if !state.big_blue.sprite.visible && state.rare_event(BIG_BLUE_SPAWN_THRESHOLD) {
        state.reset_big_blue();
        state.big_blue.sprite.visible = true;
        log::debug!("big-blue enters");
    }

    if !state.asteroid.sprite.visible
        && state.debris.remaining == 0
        && state.rare_event(ASTEROID_SPAWN_THRESHOLD)
    {
        state.reset_asteroid();
    }
}

// --- Big-blue ---

fn move_big_blue(state: &mut GameState) {
    let sprite = &mut state.big_blue.sprite;

    // A hit that is never followed up wears off
    if sprite.animated {
        state.big_blue_hit_ticks += 1;
        if state.big_blue_hit_ticks == BIG_BLUE_HIT_TIMEOUT {
            sprite.stop_animation();
            state.big_blue_hit_ticks = 0;
        }
    } else {
        state.big_blue_hit_ticks = 0;
    }

    sprite.pos.x += BIG_BLUE_DX;

    if sprite.x() < -sprite.w() {
        sprite.pos.x = state.width;
    }
}

fn move_big_blue_missile(state: &mut GameState) {
    if state.big_blue_missile.visible {
        let missile = &mut state.big_blue_missile;
        missile.pos.y += ENEMY_MISSILE_SPEED;

        if missile.y() > state.height {
            missile.pos.y = 0.0;
            missile.visible = false;
            return;
        }

        if sprites_intersect(missile, &state.player.sprite) {
            missile.pos.y = 0.0;
            missile.visible = false;
            state.player.exploding = true;
        }
        return;
    }

    if state.chance_in_1024(state.level) && state.big_blue.sprite.visible {
        let origin = state.big_blue.sprite.pos;
        state.big_blue_missile.pos = origin + Vec2::new(0.0, BIG_BLUE_MISSILE_DROP);
        state.big_blue_missile.visible = true;
    }
}

/// A hit on big-blue: the first starts its warning animation, a second
/// while it is still animating destroys it.
fn strike_big_blue(state: &mut GameState) {
    let sprite = &mut state.big_blue.sprite;
    if sprite.animated {
        sprite.stop_animation();
        state.big_blue.exploding = true;
        state.score.award(BIG_BLUE_POINTS);
        log::debug!("big-blue destroyed");
    } else {
        sprite.animated = true;
    }
}

// --- Aliens ---

fn move_aliens(state: &mut GameState) {
    let mut alive = 0;

    for kind in 0..state.alien_types {
        for slot in 0..ALIEN_POPULATION {
            move_alien_missile(state, kind, slot);

            if state.aliens[kind][slot].sprite.visible {
                alive += 1;
                player_missile_hits_alien(state, kind, slot);
                debris_hits_alien(state, kind, slot);
                move_alien_ship(state, kind, slot);
                fire_alien_missile(state, kind, slot);
            }
        }
    }

    if alive == 0 {
        state.level_up();
    }
}

/// Drop this alien's missile and test it against the player.
///
/// Every in-flight missile is tested at its own position.
fn move_alien_missile(state: &mut GameState, kind: usize, slot: usize) {
    let alien = &mut state.aliens[kind][slot];
    let Some(mut pos) = alien.missile else {
        return;
    };

    pos.y += ENEMY_MISSILE_SPEED;
    if pos.y > state.height {
        alien.missile = None;
        return;
    }
    alien.missile = Some(pos);

    let missile = Aabb::new(
        pos.x,
        pos.y,
        state.alien_missile.w(),
        state.alien_missile.h(),
    );
    if intersects(&missile, &Aabb::from(&state.player.sprite)) {
        alien.missile = None;
        state.player.exploding = true;
    }
}

fn player_missile_hits_alien(state: &mut GameState, kind: usize, slot: usize) {
    let alien = &mut state.aliens[kind][slot];
    if !state.player_missile.visible || !alien.is_live() {
        return;
    }

    if sprites_intersect(&alien.sprite, &state.player_missile) {
        alien.exploding = true;
        state.player_missile.visible = false;
        state.score.award(ALIEN_POINTS);
    }
}

fn debris_hits_alien(state: &mut GameState, kind: usize, slot: usize) {
    let alien = &mut state.aliens[kind][slot];

    for piece in state.debris.visible_boxes() {
        if alien.exploding {
            return;
        }
        if intersects(&Aabb::from(&alien.sprite), &piece) {
            alien.exploding = true;
            state.score.award(ALIEN_POINTS);
        }
    }
}

fn move_alien_ship(state: &mut GameState, kind: usize, slot: usize) {
    // Vertical patrol only starts once every alien type is in play
    let patrolling = state.level > ALIEN_TYPES as u32;
    let dive = patrolling && state.rare_event(ALIEN_DIVE_THRESHOLD);

    let sprite = &mut state.aliens[kind][slot].sprite;
    sprite.pos.x += sprite.vel.x;
    if patrolling {
        sprite.pos.y += sprite.vel.y;
    }

    if sprite.x() > state.width - sprite.w() || sprite.x() < 0.0 {
        sprite.vel.x = -sprite.vel.x;
    }

    if !patrolling {
        return;
    }

    if dive {
        sprite.vel.y = 1.0;
    }

    if sprite.y() > ALIEN_MAX_Y || sprite.y() < ALIEN_MIN_Y {
        sprite.vel.y = -sprite.vel.y;
    }
}

fn fire_alien_missile(state: &mut GameState, kind: usize, slot: usize) {
    if !state.chance_in_1024(state.level) || state.aliens[kind][slot].missile.is_some() {
        return;
    }

    let alien = &mut state.aliens[kind][slot];
    let sprite = &alien.sprite;
    alien.missile = Some(Vec2::new(
        sprite.x() + (sprite.width / 2) as f32,
        sprite.bottom(),
    ));
}

// --- Player ---

/// Steer toward a target x that runs ahead of the ship while a direction is
/// held. The target only moves while the ship has caught up with it.
fn move_player(state: &mut GameState) {
    let controls = &mut state.controls;
    let sprite = &mut state.player.sprite;

    match controls.held {
        Some(Direction::Left) if controls.target_x >= sprite.x() => controls.target_x -= 2.0,
        Some(Direction::Right) if controls.target_x <= sprite.x() => controls.target_x += 2.0,
        _ => {}
    }

    if sprite.x() > controls.target_x {
        if sprite.x() > 0.0 {
            sprite.pos.x -= 1.0;
        }
    } else if sprite.x() < controls.target_x && sprite.x() < state.width - sprite.w() {
        sprite.pos.x += 1.0;
    }
}

fn move_player_missile(state: &mut GameState) {
    if !state.player_missile.visible {
        return;
    }

    state.player_missile.pos.y -= PLAYER_MISSILE_SPEED;

    if state.player_missile.y() < LINE_Y {
        state.player_missile.visible = false;
        return;
    }

    if state.big_blue.is_live()
        && sprites_intersect(&state.big_blue.sprite, &state.player_missile)
    {
        state.player_missile.visible = false;
        strike_big_blue(state);
    }
}

// --- Asteroid ---

fn move_asteroid(state: &mut GameState) {
    if !state.asteroid.sprite.visible {
        return;
    }

    state.asteroid.sprite.step();

    if state.player_missile.visible
        && state.asteroid.is_live()
        && sprites_intersect(&state.asteroid.sprite, &state.player_missile)
    {
        state.player_missile.visible = false;
        state.score.award(ASTEROID_POINTS);
        state.break_asteroid();
        state.asteroid.exploding = true;
        log::debug!("asteroid broken at {:?}", state.asteroid.sprite.pos);
    }

    let sprite = &state.asteroid.sprite;
    if sprite.x() > state.width || sprite.y() > state.height || sprite.x() < -sprite.w() {
        state.asteroid.sprite.visible = false;
        if state.asteroid.exploding {
            state.asteroid.exploding = false;
            state.cancel_explosion();
        }
    }
}

fn move_debris(state: &mut GameState) {
    if state.debris.remaining == 0 {
        return;
    }

    for quarter in Quarter::ALL {
        let piece = &mut state.debris.quarters[quarter.index()];
        if !piece.sprite.visible {
            continue;
        }

        piece.sprite.step();

        if quarter.has_escaped(&piece.sprite, state.width, state.height) {
            piece.sprite.visible = false;
            state.debris.remaining = state.debris.remaining.saturating_sub(1);
        }
    }

    debris_hits_big_blue(state);
}

fn debris_hits_big_blue(state: &mut GameState) {
    for quarter in Quarter::ALL {
        if !state.big_blue.is_live() {
            return;
        }
        let piece = &state.debris.get(quarter).sprite;
        if piece.visible && sprites_intersect(&state.big_blue.sprite, piece) {
            strike_big_blue(state);
        }
    }
}
