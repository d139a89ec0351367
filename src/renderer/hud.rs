//! Lives strip and score strips

use crate::assets::Assets;
use crate::consts::{SCORE_DIGITS, WIDTH};
use crate::platform::{Canvas, Rect};
use crate::sim::GameState;

const LIVES_Y: i32 = 10;
const LIVES_GAP: u32 = 2;
const SCORE_X: i32 = 5;
const HIGH_SCORE_X: i32 = WIDTH as i32 - 120;
const SCORE_Y: i32 = 1;

/// One player icon per life, centred horizontally. Icons show the ship's
/// current frame without advancing it.
pub(super) fn draw_lives<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, assets: &Assets) {
    let icon = &state.player.sprite;
    let texture = assets.frame(icon);
    let step = icon.width + LIVES_GAP;
    let lives = u32::from(state.lives);

    let mut x = (WIDTH / 2) as i32 - (step * lives / 2) as i32;
    for _ in 0..lives {
        canvas.draw(texture, None, Rect::new(x, LIVES_Y, icon.width, icon.height));
        x += step as i32;
    }
}

pub(super) fn draw_scores<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, assets: &Assets) {
    draw_digits(canvas, assets, &state.score.visible_score.digits, SCORE_X);
    draw_digits(canvas, assets, &state.score.visible_high.digits, HIGH_SCORE_X);
}

fn draw_digits<C: Canvas + ?Sized>(
    canvas: &mut C,
    assets: &Assets,
    digits: &[u8; SCORE_DIGITS],
    mut x: i32,
) {
    for &digit in digits {
        let glyph = assets.text.digits[usize::from(digit)];
        canvas.draw(glyph.texture, None, Rect::new(x, SCORE_Y, glyph.width, glyph.height));
        x += glyph.width as i32;
    }
}
