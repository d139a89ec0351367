//! Render step
//!
//! Draws one running frame in a fixed back-to-front order and drives every
//! active explosion. Drawing a sprite advances its animation, so this step
//! mutates the game state; it never moves anything.

mod hud;
mod overlay;

pub use overlay::render_paused;

use crate::assets::Assets;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::ALIEN_POPULATION;
use crate::platform::{AudioSink, Canvas, Rect};
use crate::sim::{CraftId, GameState, Quarter, Sprite, explode};

/// Draw one running frame. Does not present.
pub fn render_frame<P>(platform: &mut P, state: &mut GameState, assets: &Assets, audio: &AudioManager)
where
    P: Canvas + AudioSink + ?Sized,
{
    draw_background(platform, state, assets);

    // === Aliens, with their explosions and missiles ===
    for kind in 0..state.alien_types {
        for slot in 0..ALIEN_POPULATION {
            let alien = &mut state.aliens[kind][slot];
            draw_sprite(platform, assets, &mut alien.sprite);

            if alien.exploding {
                run_explosion(platform, state, assets, audio, CraftId::Alien { kind, slot });
            }

            if let Some(pos) = state.aliens[kind][slot].missile {
                state.alien_missile.pos = pos;
                draw_sprite(platform, assets, &mut state.alien_missile);
            }
        }
    }

    draw_sprite(platform, assets, &mut state.big_blue.sprite);
    draw_sprite(platform, assets, &mut state.asteroid.sprite);
    for quarter in Quarter::ALL {
        draw_sprite(platform, assets, &mut state.debris.get_mut(quarter).sprite);
    }

    if state.big_blue.exploding {
        run_explosion(platform, state, assets, audio, CraftId::BigBlue);
    }
    if state.asteroid.exploding {
        run_explosion(platform, state, assets, audio, CraftId::Asteroid);
    }

    draw_sprite(platform, assets, &mut state.player.sprite);
    if state.player.exploding {
        run_explosion(platform, state, assets, audio, CraftId::Player);
    }

    draw_sprite(platform, assets, &mut state.player_missile);
    draw_sprite(platform, assets, &mut state.big_blue_missile);

    // === HUD ===
    hud::draw_lives(platform, state, assets);
    state.score.tick();
    hud::draw_scores(platform, state, assets);

    draw_sprite(platform, assets, &mut state.line);
}

/// Draw the sprite's current frame at its truncated position, then advance
/// its animation. Hidden sprites are skipped entirely.
pub fn draw_sprite<C: Canvas + ?Sized>(canvas: &mut C, assets: &Assets, sprite: &mut Sprite) {
    if !sprite.visible {
        return;
    }

    canvas.draw(assets.frame(sprite), None, sprite_rect(sprite));
    sprite.advance_animation();
}

/// Destination rectangle of a sprite at its current position
fn sprite_rect(sprite: &Sprite) -> Rect {
    Rect::new(
        sprite.x() as i32,
        sprite.y() as i32,
        sprite.width,
        sprite.height,
    )
}

/// One step of the shared explosion for `id`
fn run_explosion<P>(
    platform: &mut P,
    state: &mut GameState,
    assets: &Assets,
    audio: &AudioManager,
    id: CraftId,
) where
    P: Canvas + AudioSink + ?Sized,
{
    let step = explode(state, id);

    if let Some(frame) = step.frame {
        let sheet = assets.sheet(state.explosion.sheet);
        if let Some(&texture) = sheet.frames.get(frame) {
            let dst = Rect::new(
                step.pos.x as i32,
                step.pos.y as i32,
                sheet.width,
                sheet.height,
            );
            platform.draw(texture, None, dst);
        }
    }

    if step.start_sound {
        audio.play(platform, SoundEffect::Explosion);
    }
}

/// Vertically scrolling background, drawn as two slices of one image.
/// Scrolls one pixel per rendered frame and wraps at the image height.
fn draw_background<C: Canvas + ?Sized>(canvas: &mut C, state: &mut GameState, assets: &Assets) {
    let texture = assets.frame(&state.background);
    let (width, height) = (state.background.width, state.background.height);
    let offset = state.background_offset.min(height);

    // Top of the image slides down from the offset
    let lower = height - offset;
    if lower > 0 {
        canvas.draw(
            texture,
            Some(Rect::new(0, 0, width, lower)),
            Rect::new(0, offset as i32, width, lower),
        );
    }

    // Its bottom fills the gap above
    if offset > 0 {
        canvas.draw(
            texture,
            Some(Rect::new(0, lower as i32, width, offset)),
            Rect::new(0, 0, width, offset),
        );
    }

    state.background_offset = (offset + 1) % height.max(1);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::settings::Settings;
    use crate::sim::GamePhase;

    pub(super) fn setup() -> (HeadlessPlatform, Assets, GameState, AudioManager) {
        let mut platform = HeadlessPlatform::new();
        let settings = Settings::default();
        let assets = Assets::load(&mut platform, &settings).unwrap();
        let audio = AudioManager::new(&mut platform, &settings);
        let mut state = GameState::new(&assets.roster, 1);
        state.phase = GamePhase::Running;
        (platform, assets, state, audio)
    }

    fn names(platform: &HeadlessPlatform) -> Vec<String> {
        platform
            .last_frame
            .iter()
            .filter_map(|call| platform.texture_name(call.texture))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_draw_order() {
        let (mut platform, assets, mut state, audio) = setup();
        render_frame(&mut platform, &mut state, &assets, &audio);
        platform.present();

        let names = names(&platform);
        assert_eq!(names.first().map(String::as_str), Some("background00"));
        assert_eq!(names.last().map(String::as_str), Some("line00"));
        assert_eq!(platform.drawn_in_last_frame("purple"), 10);
        // 3 lives icons + the ship itself
        assert_eq!(platform.drawn_in_last_frame("player"), 4);
        assert_eq!(platform.drawn_in_last_frame("text:0"), 14);
        assert_eq!(platform.drawn_in_last_frame("bigblue"), 0);

        let aliens_end = names.iter().rposition(|n| n.starts_with("purple")).unwrap();
        let ship = names.iter().rposition(|n| n.starts_with("player")).unwrap();
        assert!(aliens_end < ship);
    }

    #[test]
    fn test_background_scrolls_in_two_slices() {
        let (mut platform, assets, mut state, audio) = setup();
        state.background_offset = 100;
        render_frame(&mut platform, &mut state, &assets, &audio);
        platform.present();

        let slices: Vec<_> = platform.last_frame[..2].to_vec();
        assert_eq!(slices[0].src, Some(Rect::new(0, 0, 600, 700)));
        assert_eq!(slices[0].dst, Rect::new(0, 100, 600, 700));
        assert_eq!(slices[1].src, Some(Rect::new(0, 700, 600, 100)));
        assert_eq!(slices[1].dst, Rect::new(0, 0, 600, 100));
        assert_eq!(state.background_offset, 101);

        state.background_offset = 799;
        render_frame(&mut platform, &mut state, &assets, &audio);
        assert_eq!(state.background_offset, 0);
    }

    #[test]
    fn test_drawing_advances_animation() {
        let (mut platform, assets, mut state, _) = setup();
        let mut sprite = state.aliens[0][0].sprite.clone();
        draw_sprite(&mut platform, &assets, &mut sprite);
        draw_sprite(&mut platform, &assets, &mut sprite);
        draw_sprite(&mut platform, &assets, &mut sprite);
        platform.present();
        let names = names(&platform);
        assert_eq!(names, vec!["purple00", "purple01", "purple00"]);

        state.player.sprite.visible = false;
        draw_sprite(&mut platform, &assets, &mut state.player.sprite);
        assert!(platform.frame_draws.is_empty());
    }

    #[test]
    fn test_sprite_positions_truncate() {
        let (mut platform, assets, mut state, _) = setup();
        state.player.sprite.pos = Vec2::new(10.9, 20.5);
        draw_sprite(&mut platform, &assets, &mut state.player.sprite);
        assert_eq!(platform.frame_draws[0].dst, Rect::new(10, 20, 32, 32));
    }

    #[test]
    fn test_alien_missiles_share_one_visual() {
        let (mut platform, assets, mut state, audio) = setup();
        state.aliens[0][1].missile = Some(Vec2::new(40.0, 200.0));
        state.aliens[0][6].missile = Some(Vec2::new(300.0, 400.0));
        render_frame(&mut platform, &mut state, &assets, &audio);
        platform.present();

        let missiles: Vec<_> = platform
            .last_frame
            .iter()
            .filter(|c| {
                platform
                    .texture_name(c.texture)
                    .is_some_and(|n| n.starts_with("missile0"))
            })
            .map(|c| (c.dst.x, c.dst.y))
            .collect();
        assert_eq!(missiles, vec![(40, 200), (300, 400)]);
    }

    #[test]
    fn test_explosion_sound_starts_once() {
        let (mut platform, assets, mut state, audio) = setup();
        state.player.exploding = true;
        render_frame(&mut platform, &mut state, &assets, &audio);
        platform.present();
        render_frame(&mut platform, &mut state, &assets, &audio);
        platform.present();

        assert_eq!(platform.sounds.len(), 1);
        assert_eq!(platform.drawn_in_last_frame("explosion"), 1);
    }

    #[test]
    fn test_player_explosion_plays_out() {
        let (mut platform, assets, mut state, audio) = setup();
        state.player.exploding = true;
        for _ in 0..8 {
            render_frame(&mut platform, &mut state, &assets, &audio);
        }
        assert_eq!(state.lives, 2);
        assert!(!state.player.exploding);
        assert!(!state.explosion_sounding);
    }
}
