//! Explosion animation gate
//!
//! A single explosion visual is shared by every craft. Each rendered frame,
//! every craft marked exploding recentres it on itself and advances it one
//! step. When the animation reaches its last frame the craft is finished:
//! the player trades a life for it, anything else disappears.

use glam::Vec2;

use super::craft::CraftId;
use super::state::GameState;

/// What the renderer must do for one explosion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionStep {
    /// Where the explosion visual sits this frame
    pub pos: Vec2,
    /// Frame to draw, if the exploding craft is on screen
    pub frame: Option<usize>,
    /// Queue the explosion sound now
    pub start_sound: bool,
    /// The animation completed on this step
    pub finished: bool,
}

/// Advance the explosion of `id` by one rendered frame
pub fn explode(state: &mut GameState, id: CraftId) -> ExplosionStep {
    let sprite = &state.craft(id).sprite;
    let pos = Vec2::new(
        sprite.x() + (sprite.width / 2) as f32 - (state.explosion.width / 2) as f32,
        sprite.y() + (sprite.height / 2) as f32 - (state.explosion.height / 2) as f32,
    );
    let craft_visible = sprite.visible;

    state.explosion.visible = true;
    state.explosion.pos = pos;

    let mut frame = None;
    if craft_visible {
        frame = Some(state.explosion.current_frame);
        state.explosion.advance_animation();

        if state.explosion.on_last_frame() {
            state.explosion.current_frame = 0;
            state.craft_mut(id).exploding = false;

            if id == CraftId::Player && state.lives > 0 {
                state.lives -= 1;
                log::info!("Player destroyed, {} lives left", state.lives);
            } else {
                state.craft_mut(id).sprite.visible = false;
            }

            state.explosion_sounding = false;
            return ExplosionStep {
                pos,
                frame,
                start_sound: false,
                finished: true,
            };
        }
    }

    let start_sound = !state.explosion_sounding;
    state.explosion_sounding = true;

    ExplosionStep {
        pos,
        frame,
        start_sound,
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::tests::running_state;

    /// Step until the animation completes, returning the number of steps
    fn run_to_completion(state: &mut GameState, id: CraftId) -> usize {
        for steps in 1..=100 {
            if explode(state, id).finished {
                return steps;
            }
        }
        panic!("explosion never finished");
    }

    #[test]
    fn test_player_explosion_costs_a_life() {
        let mut state = running_state(1);
        state.lives = 3;
        state.player.exploding = true;
        run_to_completion(&mut state, CraftId::Player);
        assert_eq!(state.lives, 2);
        assert!(!state.player.exploding);
        assert!(state.player.sprite.visible);
    }

    #[test]
    fn test_alien_explosion_hides_alien() {
        let mut state = running_state(1);
        let id = CraftId::Alien { kind: 0, slot: 3 };
        state.craft_mut(id).exploding = true;
        run_to_completion(&mut state, id);
        let alien = state.craft(id);
        assert!(!alien.sprite.visible);
        assert!(!alien.exploding);
    }

    #[test]
    fn test_animation_length_matches_sheet() {
        let mut state = running_state(1);
        state.big_blue.sprite.visible = true;
        state.big_blue.exploding = true;
        // 8 frames, no delay: last frame reached after 7 advances
        assert_eq!(run_to_completion(&mut state, CraftId::BigBlue), 7);
        assert_eq!(state.explosion.current_frame, 0);
    }

    #[test]
    fn test_sound_queued_once_per_explosion() {
        let mut state = running_state(1);
        state.player.exploding = true;
        let first = explode(&mut state, CraftId::Player);
        let second = explode(&mut state, CraftId::Player);
        assert!(first.start_sound);
        assert!(!second.start_sound);

        run_to_completion(&mut state, CraftId::Player);
        assert!(!state.explosion_sounding);

        state.player.exploding = true;
        assert!(explode(&mut state, CraftId::Player).start_sound);
    }

    #[test]
    fn test_explosion_centred_on_craft() {
        let mut state = running_state(1);
        state.asteroid.sprite.visible = true;
        state.asteroid.sprite.pos = Vec2::new(100.0, 200.0);
        let step = explode(&mut state, CraftId::Asteroid);
        // 64x64 asteroid and 64x64 explosion share a centre
        assert_eq!(step.pos, Vec2::new(100.0, 200.0));
        assert_eq!(step.frame, Some(0));
    }

    #[test]
    fn test_hidden_craft_never_finishes() {
        let mut state = running_state(1);
        state.player.sprite.visible = false;
        state.player.exploding = true;
        for _ in 0..20 {
            let step = explode(&mut state, CraftId::Player);
            assert_eq!(step.frame, None);
            assert!(!step.finished);
        }
        assert_eq!(state.lives, 3);
    }
}
