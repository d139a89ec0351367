//! Sound effects over the platform's audio capability
//!
//! Audio is optional. A clip that fails to load is logged once and the game
//! plays silent from then on.

use crate::platform::{AssetLoader, AudioSink, ClipId};
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Any craft starts exploding
    Explosion,
}

impl SoundEffect {
    /// Clip name handed to the loader
    pub fn clip_name(self) -> &'static str {
        match self {
            SoundEffect::Explosion => "explode",
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    explosion: Option<ClipId>,
    muted: bool,
}

impl AudioManager {
    /// Load every clip up front. Never fails.
    pub fn new<L: AssetLoader + ?Sized>(loader: &mut L, settings: &Settings) -> Self {
        if settings.muted {
            log::info!("Audio muted by settings");
            return Self {
                explosion: None,
                muted: true,
            };
        }

        let name = SoundEffect::Explosion.clip_name();
        let explosion = match loader.load_clip(name) {
            Ok(clip) => Some(clip),
            Err(err) => {
                log::warn!("Failed to load sound \"{name}\" ({err}) - audio disabled");
                None
            }
        };

        Self {
            explosion,
            muted: false,
        }
    }

    /// Nothing will ever be heard
    pub fn is_silent(&self) -> bool {
        self.muted || self.explosion.is_none()
    }

    /// Play a sound effect, cutting off whatever is still playing
    pub fn play<S: AudioSink + ?Sized>(&self, sink: &mut S, effect: SoundEffect) {
        if self.muted {
            return;
        }

        let clip = match effect {
            SoundEffect::Explosion => self.explosion,
        };
        let Some(clip) = clip else { return };

        sink.stop_all();
        sink.play_one_shot(clip);
    }
}
