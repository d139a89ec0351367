//! Positioned, optionally animated visuals
//!
//! A sprite never owns its image frames. It names a frame sheet by
//! `SheetId`; the sheet lives in the asset arena and is shared by every
//! sprite cloned from the same master (all aliens of one type, for example),
//! while position and animation state stay per-sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a frame sheet in the asset arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(pub usize);

/// A visual entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub sheet: SheetId,
    /// Top-left corner; sub-pixel motion accumulates here
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub animated: bool,
    /// Frame currently shown, in `0..=frame_count`
    pub current_frame: usize,
    /// Index of the last frame in the sheet
    pub frame_count: usize,
    /// Frames to hold each animation frame for
    pub frame_delay: u32,
    /// Countdown until the next frame advance
    pub frame_timer: u32,
}

impl Sprite {
    /// A hidden, static sprite at the origin showing frame 0 of `sheet`
    pub fn new(sheet: SheetId, width: u32, height: u32, frame_count: usize) -> Self {
        Self {
            sheet,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            width,
            height,
            visible: false,
            animated: false,
            current_frame: 0,
            frame_count,
            frame_delay: 0,
            frame_timer: 0,
        }
    }

    /// A fresh sprite sharing this sprite's frames, with default state
    pub fn share_frames(&self) -> Self {
        Self::new(self.sheet, self.width, self.height, self.frame_count)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn h(&self) -> f32 {
        self.height as f32
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.w()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.h()
    }

    /// Move by the sprite's own velocity
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Advance the animation after the current frame has been drawn.
    ///
    /// Holds each frame for `frame_delay` extra draws and wraps back to the
    /// first frame after the last.
    pub fn advance_animation(&mut self) {
        if !self.animated {
            return;
        }

        if self.frame_timer != 0 {
            self.frame_timer -= 1;
            return;
        }

        self.frame_timer = self.frame_delay;

        if self.current_frame < self.frame_count {
            self.current_frame += 1;
        } else {
            self.current_frame = 0;
        }
    }

    /// Stop animating and rewind to the first frame
    pub fn stop_animation(&mut self) {
        self.animated = false;
        self.current_frame = 0;
        self.frame_timer = 0;
    }

    /// Has the animation reached its last frame
    pub fn on_last_frame(&self) -> bool {
        self.current_frame == self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animated(frame_count: usize, delay: u32) -> Sprite {
        let mut sprite = Sprite::new(SheetId(0), 8, 8, frame_count);
        sprite.animated = true;
        sprite.frame_delay = delay;
        sprite
    }

    #[test]
    fn test_animation_wraps_after_last_frame() {
        let mut sprite = animated(2, 0);
        let frames: Vec<usize> = (0..4)
            .map(|_| {
                sprite.advance_animation();
                sprite.current_frame
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_frame_delay_holds_frames() {
        let mut sprite = animated(1, 2);
        // First advance happens immediately, then each frame holds for 2 draws
        sprite.advance_animation();
        assert_eq!(sprite.current_frame, 1);
        sprite.advance_animation();
        sprite.advance_animation();
        assert_eq!(sprite.current_frame, 1);
        sprite.advance_animation();
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn test_static_sprite_never_advances() {
        let mut sprite = Sprite::new(SheetId(0), 8, 8, 3);
        sprite.advance_animation();
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn test_stop_animation_rewinds() {
        let mut sprite = animated(3, 1);
        sprite.advance_animation();
        sprite.stop_animation();
        assert!(!sprite.animated);
        assert_eq!(sprite.current_frame, 0);
        assert_eq!(sprite.frame_timer, 0);
    }

    #[test]
    fn test_shared_clone_keeps_sheet_but_not_state() {
        let mut master = animated(3, 1);
        master.pos = Vec2::new(10.0, 20.0);
        master.visible = true;
        let clone = master.share_frames();
        assert_eq!(clone.sheet, master.sheet);
        assert_eq!(clone.frame_count, 3);
        assert_eq!(clone.pos, Vec2::ZERO);
        assert!(!clone.visible);
    }
}
