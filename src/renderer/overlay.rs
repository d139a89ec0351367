//! Pause and game-over overlay
//!
//! Drawn instead of the running frame while paused: the frozen snapshot of
//! the last running frame with the help text centred on top. Nothing here
//! advances an animation.

use crate::assets::{Assets, TextLabel};
use crate::consts::{HEIGHT, WIDTH};
use crate::platform::{Canvas, Rect, TextureId};
use crate::sim::{GameState, Sprite};

const GAME_OVER_RISE: i32 = 40;
const HELP_GAP: u32 = 10;
const MISSILE_ICON_INSET: i32 = 24;
const PLAYER_ICON_INSET: i32 = 40;

/// Draw the paused screen. Does not present.
pub fn render_paused<C: Canvas + ?Sized>(
    canvas: &mut C,
    state: &GameState,
    assets: &Assets,
    snapshot: Option<TextureId>,
) {
    match snapshot {
        Some(texture) => canvas.draw(texture, None, Rect::new(0, 0, WIDTH, HEIGHT)),
        None => draw_icon(canvas, assets, &state.background, 0, 0),
    }

    let centre_x = (WIDTH / 2) as i32;
    let centre_y = (HEIGHT / 2) as i32;

    if state.lives == 0 {
        let text = assets.text.game_over;
        draw_label(
            canvas,
            text,
            centre_x - half(text.width),
            centre_y - half(text.height) - GAME_OVER_RISE,
        );
    }

    let mut offset = 0;
    for text in assets.text.help {
        draw_label(
            canvas,
            text,
            centre_x - half(text.width),
            centre_y - half(text.height) + offset,
        );
        offset += (text.height + HELP_GAP) as i32;
    }

    // Key glyphs that the first two help lines refer to
    let [fire, steer, ..] = assets.text.help;
    draw_icon(
        canvas,
        assets,
        &state.player_missile,
        centre_x - half(fire.width) - MISSILE_ICON_INSET,
        centre_y - half(fire.height) + HELP_GAP as i32,
    );
    draw_icon(
        canvas,
        assets,
        &state.player.sprite,
        centre_x - half(steer.width) - PLAYER_ICON_INSET,
        centre_y - half(steer.height) + (fire.height + HELP_GAP) as i32,
    );
}

fn half(length: u32) -> i32 {
    (length / 2) as i32
}

fn draw_label<C: Canvas + ?Sized>(canvas: &mut C, text: TextLabel, x: i32, y: i32) {
    canvas.draw(text.texture, None, Rect::new(x, y, text.width, text.height));
}

/// A sprite's current frame at a fixed spot, regardless of visibility
fn draw_icon<C: Canvas + ?Sized>(canvas: &mut C, assets: &Assets, sprite: &Sprite, x: i32, y: i32) {
    canvas.draw(
        assets.frame(sprite),
        None,
        Rect::new(x, y, sprite.width, sprite.height),
    );
}
