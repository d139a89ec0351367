//! Loop controller
//!
//! Owns the world state and everything loaded at startup, dispatches input,
//! switches between running and paused and paces running frames to the
//! target rate. One call to `run_frame` is one loop iteration: poll one
//! event, then either draw the pause overlay or render and step the world.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::{Assets, check_display};
use crate::audio::AudioManager;
use crate::consts::GAME_TITLE;
use crate::error::GameError;
use crate::platform::{Canvas, Clock, InputEvent, Key, Platform, TextureId};
use crate::renderer::{render_frame, render_paused};
use crate::settings::Settings;
use crate::sim::{Direction, GamePhase, GameState, spawn_at_random, tick};

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lives: u8,
    /// Simulation steps taken
    pub frames: u64,
}

/// A running game session
pub struct Game {
    pub state: GameState,
    assets: Assets,
    settings: Settings,
    audio: AudioManager,
    /// Frozen copy of the last running frame, shown under the pause overlay
    pause_screen: Option<TextureId>,
    frame_start: Duration,
}

impl Game {
    /// Check the display, load every asset and build a fresh world.
    ///
    /// The game starts paused; the first key press starts play.
    pub fn new<P: Platform + ?Sized>(platform: &mut P, settings: Settings) -> Result<Self, GameError> {
        check_display(&*platform)?;
        let assets = Assets::load(platform, &settings)?;
        let audio = AudioManager::new(platform, &settings);
        if audio.is_silent() {
            log::info!("Playing without sound");
        }

        let seed = settings.seed.unwrap_or_else(rand::random);
        let state = GameState::new(&assets.roster, seed);
        log::info!("{GAME_TITLE} initialized with seed: {seed}");

        Ok(Self {
            state,
            assets,
            settings,
            audio,
            pause_screen: None,
            frame_start: platform.now(),
        })
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn pause_screen(&self) -> Option<TextureId> {
        self.pause_screen
    }

    /// Run until quit, returning the session report
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) -> SessionSummary {
        log::info!("Entering main loop");
        while self.run_frame(platform) == LoopControl::Continue {}

        let summary = self.summary();
        log::info!(
            "Quit after {} frames: score {}, high score {}, level {}",
            summary.frames,
            summary.score,
            summary.high_score,
            summary.level
        );
        summary
    }

    /// One loop iteration
    pub fn run_frame<P: Platform + ?Sized>(&mut self, platform: &mut P) -> LoopControl {
        if let Some(event) = platform.poll_event() {
            if self.handle_event(platform, event) == LoopControl::Quit {
                return LoopControl::Quit;
            }
        }

        if self.state.phase.is_paused() {
            render_paused(platform, &self.state, &self.assets, self.pause_screen);
            platform.present();
            platform.sleep(self.settings.pacing_sleep());
            return LoopControl::Continue;
        }

        if self.state.lives == 0 {
            self.state.phase = GamePhase::GameOver;
            self.capture_pause_screen(platform);
            log::info!(
                "Game over: score {}, level {}",
                self.state.score.score,
                self.state.level
            );
            return LoopControl::Continue;
        }

        render_frame(platform, &mut self.state, &self.assets, &self.audio);
        spawn_at_random(&mut self.state);
        tick(&mut self.state);
        platform.present();

        self.wait_for_next_frame(platform);
        LoopControl::Continue
    }

    /// Apply one input event
    pub fn handle_event<C: Canvas + ?Sized>(&mut self, canvas: &mut C, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::Quit => {
                log::info!("Window closed");
                LoopControl::Quit
            }
            InputEvent::KeyDown(key) => self.key_down(canvas, key),
            InputEvent::KeyUp(key) => {
                // Releases always count, even while paused
                match key {
                    Key::Left => self.state.controls.release(Direction::Left),
                    Key::Right => self.state.controls.release(Direction::Right),
                    _ => {}
                }
                LoopControl::Continue
            }
        }
    }

    fn key_down<C: Canvas + ?Sized>(&mut self, canvas: &mut C, key: Key) -> LoopControl {
        if key == Key::Quit {
            log::info!("Quit requested");
            return LoopControl::Quit;
        }

        let paused = self.state.phase.is_paused();
        if paused {
            // Before any pause snapshot exists, the first key just starts play
            if self.pause_screen.is_none() {
                self.state.phase = GamePhase::Running;
                log::info!("Game started");
                return LoopControl::Continue;
            }
            if !matches!(key, Key::Pause | Key::Restart) {
                return LoopControl::Continue;
            }
        }

        match key {
            Key::Left => self.state.controls.press(Direction::Left),
            Key::Right => self.state.controls.press(Direction::Right),
            fire if fire.is_fire() => self.state.launch_player_missile(),
            Key::Restart if paused => {
                self.state.restart();
                log::info!("New game");
            }
            Key::Pause => self.toggle_pause(canvas),
            _ => {}
        }
        LoopControl::Continue
    }

    /// Pause or resume. Ignored once the player is out of lives.
    fn toggle_pause<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        if self.state.lives == 0 {
            return;
        }

        if self.state.phase.is_paused() {
            self.state.phase = GamePhase::Running;
            log::info!("Resumed");
        } else {
            self.state.phase = GamePhase::Paused;
            self.capture_pause_screen(canvas);
            log::info!("Paused");
        }
    }

    /// Replace the pause snapshot. On failure the previous one is kept.
    fn capture_pause_screen<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        match canvas.capture_frame() {
            Ok(texture) => {
                if let Some(old) = self.pause_screen.replace(texture) {
                    canvas.release(old);
                }
            }
            Err(err) => log::warn!("Could not capture pause screen ({err}), keeping the previous one"),
        }
    }

    /// Sleep in short slices until a full frame interval has passed since
    /// the previous frame started
    fn wait_for_next_frame<K: Clock + ?Sized>(&mut self, clock: &mut K) {
        let interval = self.settings.frame_interval();
        let nap = self.settings.pacing_sleep().max(Duration::from_micros(1));

        loop {
            let now = clock.now();
            if now.saturating_sub(self.frame_start) >= interval {
                self.frame_start = now;
                return;
            }
            clock.sleep(nap);
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.state.seed,
            score: self.state.score.score,
            high_score: self.state.score.high.max(self.state.score.score),
            level: self.state.level,
            lives: self.state.lives,
            frames: self.state.time_ticks,
        }
    }

    /// Release the pause snapshot and return the final report
    pub fn shutdown<C: Canvas + ?Sized>(mut self, canvas: &mut C) -> SessionSummary {
        if let Some(texture) = self.pause_screen.take() {
            canvas.release(texture);
        }
        self.summary()
    }
}
