//! Ship XB11 - headless demo session
//!
//! Runs the game against the in-memory platform with a scripted player and
//! prints the session summary as JSON. An optional first argument names a
//! JSON settings file.

use std::process::ExitCode;

use ship_xb11::platform::{HeadlessPlatform, InputEvent, Key};
use ship_xb11::{Game, Settings};

/// Frames between shots of the scripted player
const FIRE_EVERY: u64 = 20;
/// Frames the scripted player holds each direction
const SWEEP_FRAMES: u64 = 90;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ship XB11 (headless) starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(message) => {
            log::error!("{message}");
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut platform = HeadlessPlatform::new().with_quit_after(settings.demo_frames);
    script_player(&mut platform, settings.demo_frames);

    let mut game = match Game::new(&mut platform, settings) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Startup failed: {err}");
            eprintln!("ship-xb11: {err}");
            return ExitCode::FAILURE;
        }
    };

    game.run(&mut platform);
    let summary = game.shutdown(&mut platform);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::warn!("Could not serialize session summary: {err}"),
    }
    ExitCode::SUCCESS
}

fn load_settings() -> Result<Settings, String> {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("Using default settings");
        return Ok(Settings::default());
    };

    let json = std::fs::read_to_string(&path)
        .map_err(|err| format!("could not read settings file {path}: {err}"))?;
    let settings = Settings::from_json(&json)
        .map_err(|err| format!("invalid settings file {path}: {err}"))?;
    log::info!("Loaded settings from {path}");
    Ok(settings)
}

/// A player that starts the game, fires steadily and sweeps side to side
fn script_player(platform: &mut HeadlessPlatform, frames: u64) {
    platform.schedule(1, InputEvent::KeyDown(Key::Space));

    for frame in (FIRE_EVERY..frames).step_by(FIRE_EVERY as usize) {
        platform.schedule(frame, InputEvent::KeyDown(Key::Space));
        platform.schedule(frame + 1, InputEvent::KeyUp(Key::Space));
    }

    let mut direction = Key::Left;
    for start in (SWEEP_FRAMES..frames).step_by(SWEEP_FRAMES as usize) {
        platform.schedule(start, InputEvent::KeyDown(direction));
        platform.schedule(start + SWEEP_FRAMES - 1, InputEvent::KeyUp(direction));
        direction = if direction == Key::Left { Key::Right } else { Key::Left };
    }
}
