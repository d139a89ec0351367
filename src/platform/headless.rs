//! In-memory platform backend
//!
//! Implements every capability without a window or audio device. Draw calls
//! and sounds are recorded, input is scripted per presented frame and time
//! is virtual (sleeping advances the clock instantly). Used by the test
//! suite and by the binary's demo session.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::time::Duration;

use super::{
    AssetLoader, AudioSink, Canvas, ClipId, Clock, InputEvent, InputSource, Rect, TextureId,
};
use crate::consts::{HEIGHT, WIDTH};
use crate::error::PlatformError;

/// Frame size and count reported for each known sprite stem
const DEFAULT_SPRITES: &[(&str, u32, u32, usize)] = &[
    ("bigblue", 100, 100, 4),
    ("player", 32, 32, 2),
    ("purple", 32, 24, 2),
    ("green", 32, 24, 2),
    ("yellow", 32, 24, 2),
    ("cyan", 32, 24, 2),
    ("background", WIDTH, HEIGHT, 1),
    ("explosion", 64, 64, 8),
    ("missile", 4, 12, 2),
    ("playmis", 4, 12, 2),
    ("line", 500, 2, 1),
    ("missiles", 12, 16, 1),
    ("asteroid", 64, 64, 1),
    ("ul", 32, 32, 1),
    ("ur", 32, 32, 1),
    ("ll", 32, 32, 1),
    ("lr", 32, 32, 1),
];

/// Glyph cell used for rendered text
const GLYPH_WIDTH: u32 = 8;
const GLYPH_HEIGHT: u32 = 16;

/// A recorded `Canvas::draw` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureId,
    pub src: Option<Rect>,
    pub dst: Rect,
}

/// Headless implementation of all platform capabilities
#[derive(Debug)]
pub struct HeadlessPlatform {
    next_id: u32,
    texture_sizes: HashMap<TextureId, (u32, u32)>,
    texture_names: HashMap<TextureId, String>,
    sprite_sizes: HashMap<String, (u32, u32, usize)>,
    missing_stems: HashSet<String>,
    text_fails: bool,
    capture_fails: bool,
    audio_available: bool,
    display: Option<(u32, u32)>,
    /// Draw calls since the last `present`
    pub frame_draws: Vec<DrawCall>,
    /// Draw calls of the most recently presented frame
    pub last_frame: Vec<DrawCall>,
    live_snapshots: HashSet<TextureId>,
    /// Total number of snapshots ever captured
    pub snapshots_taken: usize,
    /// Every clip started, in order
    pub sounds: Vec<ClipId>,
    /// Number of `stop_all` calls
    pub sound_stops: usize,
    script: BTreeMap<u64, VecDeque<InputEvent>>,
    quit_after: Option<u64>,
    /// Number of frames presented so far
    pub frames_presented: u64,
    clock: Duration,
    /// Virtual time spent producing each presented frame
    pub frame_cost: Duration,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        let sprite_sizes = DEFAULT_SPRITES
            .iter()
            .map(|&(stem, w, h, frames)| (stem.to_string(), (w, h, frames)))
            .collect();
        Self {
            next_id: 1,
            texture_sizes: HashMap::new(),
            texture_names: HashMap::new(),
            sprite_sizes,
            missing_stems: HashSet::new(),
            text_fails: false,
            capture_fails: false,
            audio_available: true,
            display: Some((1920, 1080)),
            frame_draws: Vec::new(),
            last_frame: Vec::new(),
            live_snapshots: HashSet::new(),
            snapshots_taken: 0,
            sounds: Vec::new(),
            sound_stops: 0,
            script: BTreeMap::new(),
            quit_after: None,
            frames_presented: 0,
            clock: Duration::ZERO,
            frame_cost: Duration::ZERO,
        }
    }

    /// Override the frame size and count reported for `stem`
    pub fn with_sprite(mut self, stem: &str, width: u32, height: u32, frames: usize) -> Self {
        self.sprite_sizes
            .insert(stem.to_string(), (width, height, frames));
        self
    }

    /// Make loading `stem` fail as if its first frame were missing
    pub fn with_missing_sprite(mut self, stem: &str) -> Self {
        self.missing_stems.insert(stem.to_string());
        self
    }

    /// Report these monitor bounds (`None` makes the query fail)
    pub fn with_display(mut self, bounds: Option<(u32, u32)>) -> Self {
        self.display = bounds;
        self
    }

    /// Simulate a machine without a usable audio device
    pub fn without_audio(mut self) -> Self {
        self.audio_available = false;
        self
    }

    /// Make every `render_text` call fail
    pub fn with_failing_text(mut self) -> Self {
        self.text_fails = true;
        self
    }

    /// Make `capture_frame` fail (or succeed again)
    pub fn set_capture_fails(&mut self, fails: bool) {
        self.capture_fails = fails;
    }

    /// Deliver `Quit` once `frames` frames have been presented
    pub fn with_quit_after(mut self, frames: u64) -> Self {
        self.quit_after = Some(frames);
        self
    }

    /// Queue `event` for delivery once `frame` frames have been presented
    pub fn schedule(&mut self, frame: u64, event: InputEvent) {
        self.script.entry(frame).or_default().push_back(event);
    }

    /// Queue `event` for delivery on the next poll
    pub fn push_event(&mut self, event: InputEvent) {
        self.schedule(self.frames_presented, event);
    }

    /// Number of captured snapshots not yet released
    pub fn live_snapshots(&self) -> usize {
        self.live_snapshots.len()
    }

    /// Name a texture was created from (sprite stem with frame index, or text)
    pub fn texture_name(&self, texture: TextureId) -> Option<&str> {
        self.texture_names.get(&texture).map(String::as_str)
    }

    /// Draw calls in the last presented frame that used a texture whose
    /// name starts with `prefix`
    pub fn drawn_in_last_frame(&self, prefix: &str) -> usize {
        self.last_frame
            .iter()
            .filter(|call| {
                self.texture_name(call.texture)
                    .is_some_and(|name| name.starts_with(prefix))
            })
            .count()
    }

    fn allocate(&mut self, name: String, size: (u32, u32)) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.texture_sizes.insert(id, size);
        self.texture_names.insert(id, name);
        id
    }
}

impl Canvas for HeadlessPlatform {
    fn display_bounds(&self) -> Result<(u32, u32), PlatformError> {
        self.display
            .ok_or_else(|| PlatformError::new("no display bounds available"))
    }

    fn draw(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect) {
        self.frame_draws.push(DrawCall { texture, src, dst });
    }

    fn texture_size(&self, texture: TextureId) -> (u32, u32) {
        self.texture_sizes.get(&texture).copied().unwrap_or((0, 0))
    }

    fn capture_frame(&mut self) -> Result<TextureId, PlatformError> {
        if self.capture_fails {
            return Err(PlatformError::new("frame read-back failed"));
        }
        let id = self.allocate(format!("snapshot{}", self.snapshots_taken), (WIDTH, HEIGHT));
        self.live_snapshots.insert(id);
        self.snapshots_taken += 1;
        Ok(id)
    }

    fn release(&mut self, texture: TextureId) {
        self.live_snapshots.remove(&texture);
        self.texture_sizes.remove(&texture);
        self.texture_names.remove(&texture);
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.frame_draws);
        self.frames_presented += 1;
        self.clock += self.frame_cost;
    }
}

impl AssetLoader for HeadlessPlatform {
    fn load_frames(&mut self, stem: &str) -> Result<Vec<TextureId>, PlatformError> {
        if self.missing_stems.contains(stem) {
            return Err(PlatformError::new(format!("failed to load {stem}00")));
        }
        let (w, h, count) = self
            .sprite_sizes
            .get(stem)
            .copied()
            .unwrap_or((16, 16, 1));
        Ok((0..count)
            .map(|i| self.allocate(format!("{stem}{i:02}"), (w, h)))
            .collect())
    }

    fn render_text(&mut self, text: &str) -> Result<TextureId, PlatformError> {
        if self.text_fails {
            return Err(PlatformError::new("font rasteriser unavailable"));
        }
        let width = GLYPH_WIDTH * text.chars().count() as u32;
        Ok(self.allocate(format!("text:{text}"), (width, GLYPH_HEIGHT)))
    }

    fn load_clip(&mut self, name: &str) -> Result<ClipId, PlatformError> {
        if !self.audio_available {
            return Err(PlatformError::new("no audio device"));
        }
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("headless clip {name} -> {id}");
        Ok(ClipId(id))
    }
}

impl AudioSink for HeadlessPlatform {
    fn play_one_shot(&mut self, clip: ClipId) {
        self.sounds.push(clip);
    }

    fn stop_all(&mut self) {
        self.sound_stops += 1;
    }
}

impl InputSource for HeadlessPlatform {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let due = self
            .script
            .range(..=self.frames_presented)
            .next()
            .map(|(&frame, _)| frame);
        if let Some(frame) = due {
            let queue = self.script.get_mut(&frame)?;
            let event = queue.pop_front();
            if queue.is_empty() {
                self.script.remove(&frame);
            }
            if event.is_some() {
                return event;
            }
        }
        match self.quit_after {
            Some(limit) if self.frames_presented >= limit => Some(InputEvent::Quit),
            _ => None,
        }
    }
}

impl Clock for HeadlessPlatform {
    fn now(&self) -> Duration {
        self.clock
    }

    fn sleep(&mut self, duration: Duration) {
        self.clock += duration;
    }
}
