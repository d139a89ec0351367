//! Platform abstraction layer
//!
//! The game core never opens windows, decodes images or talks to an audio
//! device. Everything it needs from the outside world is expressed as a
//! narrow capability trait here:
//! - `Canvas`: draw textures, capture the last frame, present
//! - `AssetLoader`: frame sequences, text rasterisation, sound clips
//! - `AudioSink`: one-shot clip playback
//! - `InputSource`: non-blocking event polling
//! - `Clock`: monotonic time and sleeping
//!
//! `headless` provides an in-memory implementation of all of them.

pub mod headless;

use std::time::Duration;

use crate::error::PlatformError;

pub use headless::HeadlessPlatform;

/// Opaque handle to a drawable owned by the backend (image frame, rendered
/// text or captured snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque handle to a pre-loaded sound clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub u32);

/// Integer screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Keys the game reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Up,
    /// `N`: new game
    Restart,
    /// `P`: pause / play
    Pause,
    /// `Q`: quit
    Quit,
    Other,
}

impl Key {
    /// Fire is bound to both space and cursor up
    pub fn is_fire(self) -> bool {
        matches!(self, Key::Space | Key::Up)
    }
}

/// Input events delivered by `InputSource::poll_event`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// The visible drawing surface
pub trait Canvas {
    /// Size of the monitor the surface lives on, used for the startup
    /// minimum-resolution check.
    fn display_bounds(&self) -> Result<(u32, u32), PlatformError>;

    /// Blit `texture` (optionally a sub-rectangle of it) to `dst`.
    fn draw(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect);

    /// Pixel dimensions of a texture
    fn texture_size(&self, texture: TextureId) -> (u32, u32);

    /// Read back the currently rendered frame into a new texture.
    fn capture_frame(&mut self) -> Result<TextureId, PlatformError>;

    /// Release a texture created by `capture_frame`.
    fn release(&mut self, texture: TextureId);

    /// Flip the rendered frame to the screen.
    fn present(&mut self);
}

/// One-time asset acquisition
pub trait AssetLoader {
    /// Load the numbered frame sequence sharing `stem` (`stem00`, `stem01`, ...)
    /// until the first missing index.
    fn load_frames(&mut self, stem: &str) -> Result<Vec<TextureId>, PlatformError>;

    /// Rasterise `text` into a reusable texture.
    fn render_text(&mut self, text: &str) -> Result<TextureId, PlatformError>;

    /// Load a sound clip. Failure here is never fatal.
    fn load_clip(&mut self, name: &str) -> Result<ClipId, PlatformError>;
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play_one_shot(&mut self, clip: ClipId);
    fn stop_all(&mut self);
}

/// Non-blocking input polling
pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Monotonic high-resolution time
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Everything the game loop needs in one bound
pub trait Platform: Canvas + AssetLoader + AudioSink + InputSource + Clock {}

impl<T: Canvas + AssetLoader + AudioSink + InputSource + Clock> Platform for T {}
