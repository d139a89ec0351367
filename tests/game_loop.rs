//! Whole sessions driven through the headless platform

use ship_xb11::platform::{Canvas, HeadlessPlatform, InputEvent, Key};
use ship_xb11::sim::GamePhase;
use ship_xb11::{Game, GameError, LoopControl, Settings};

fn seeded(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Settings::default()
    }
}

fn key(platform: &mut HeadlessPlatform, frame: u64, key: Key) {
    platform.schedule(frame, InputEvent::KeyDown(key));
}

#[test]
fn test_session_runs_until_quit() {
    let mut platform = HeadlessPlatform::new().with_quit_after(120);
    key(&mut platform, 1, Key::Other);

    let mut game = Game::new(&mut platform, seeded(3)).unwrap();
    let summary = game.run(&mut platform);

    assert!(summary.frames > 100);
    assert_eq!(summary.seed, 3);
    assert_eq!(platform.frames_presented, 120);
}

#[test]
fn test_same_seed_same_session() {
    let play = || {
        let mut platform = HeadlessPlatform::new().with_quit_after(2000);
        key(&mut platform, 1, Key::Other);
        for frame in (10..2000).step_by(15) {
            key(&mut platform, frame, Key::Space);
        }
        let mut game = Game::new(&mut platform, seeded(77)).unwrap();
        let summary = game.run(&mut platform);
        (summary, game.state.player.sprite.pos, game.state.aliens_alive())
    };

    assert_eq!(play(), play());
}

#[test]
fn test_pause_snapshots_are_replaced_not_leaked() {
    let mut platform = HeadlessPlatform::new().with_quit_after(60);
    key(&mut platform, 1, Key::Other);
    for frame in [10, 15, 20, 25, 30, 35] {
        key(&mut platform, frame, Key::Pause);
    }

    let mut game = Game::new(&mut platform, seeded(1)).unwrap();
    game.run(&mut platform);

    assert_eq!(platform.snapshots_taken, 3);
    assert_eq!(platform.live_snapshots(), 1);

    game.shutdown(&mut platform);
    assert_eq!(platform.live_snapshots(), 0);
}

#[test]
fn test_paused_session_freezes_world() {
    let mut platform = HeadlessPlatform::new();
    key(&mut platform, 1, Key::Other);
    key(&mut platform, 5, Key::Pause);

    let mut game = Game::new(&mut platform, seeded(1)).unwrap();
    // Starts paused with no snapshot; the pause key is what captures one
    while game.pause_screen().is_none() {
        game.run_frame(&mut platform);
    }
    assert_eq!(game.state.phase, GamePhase::Paused);
    let ticks = game.state.time_ticks;
    assert!(ticks > 0);
    let aliens = game.state.aliens[0][0].sprite.pos;

    for _ in 0..50 {
        game.run_frame(&mut platform);
    }
    assert_eq!(game.state.time_ticks, ticks);
    assert_eq!(game.state.aliens[0][0].sprite.pos, aliens);
    assert_eq!(platform.drawn_in_last_frame("snapshot"), 1);
    assert_eq!(platform.drawn_in_last_frame("text:Game Over!"), 0);
}

#[test]
fn test_game_over_then_new_game() {
    let mut platform = HeadlessPlatform::new();
    key(&mut platform, 1, Key::Other);

    let mut game = Game::new(&mut platform, seeded(9)).unwrap();
    game.run_frame(&mut platform);
    game.run_frame(&mut platform);
    assert_eq!(game.state.phase, GamePhase::Running);

    game.state.score.award(120);
    game.run_frame(&mut platform);
    game.state.lives = 0;
    game.run_frame(&mut platform);
    assert_eq!(game.state.phase, GamePhase::GameOver);

    game.run_frame(&mut platform);
    assert_eq!(platform.drawn_in_last_frame("text:Game Over!"), 1);

    // Pause cannot leave game over, fire keys do nothing
    assert_eq!(
        game.handle_event(&mut platform, InputEvent::KeyDown(Key::Pause)),
        LoopControl::Continue
    );
    game.handle_event(&mut platform, InputEvent::KeyDown(Key::Space));
    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert!(!game.state.player_missile.visible);

    game.handle_event(&mut platform, InputEvent::KeyDown(Key::Restart));
    assert_eq!(game.state.phase, GamePhase::Running);
    assert_eq!(game.state.lives, 3);
    assert_eq!(game.state.level, 1);
    assert_eq!(game.state.score.score, 0);

    // High score outlives the game it was set in
    for _ in 0..200 {
        game.run_frame(&mut platform);
    }
    assert!(game.summary().high_score >= 120);
}

#[test]
fn test_quit_key_while_paused() {
    let mut platform = HeadlessPlatform::new();
    key(&mut platform, 1, Key::Quit);

    let mut game = Game::new(&mut platform, seeded(1)).unwrap();
    let summary = game.run(&mut platform);
    assert_eq!(summary.frames, 0);
    assert_eq!(game.state.phase, GamePhase::Paused);
}

#[test]
fn test_missing_sprite_aborts_startup() {
    let mut platform = HeadlessPlatform::new().with_missing_sprite("asteroid");
    let err = Game::new(&mut platform, seeded(1)).err().unwrap();
    assert!(matches!(err, GameError::Backend { .. }));
    assert!(err.to_string().contains("asteroid"));
}

#[test]
fn test_small_display_aborts_startup() {
    let mut platform = HeadlessPlatform::new().with_display(Some((640, 480)));
    let err = Game::new(&mut platform, seeded(1)).err().unwrap();
    assert!(matches!(err, GameError::DisplayTooSmall { .. }));
}

#[test]
fn test_unknown_display_still_starts() {
    let mut platform = HeadlessPlatform::new().with_display(None);
    assert!(Game::new(&mut platform, seeded(1)).is_ok());
}

#[test]
fn test_silent_session_without_audio() {
    let mut platform = HeadlessPlatform::new().without_audio();
    key(&mut platform, 1, Key::Other);

    let mut game = Game::new(&mut platform, seeded(1)).unwrap();
    game.run_frame(&mut platform);
    game.run_frame(&mut platform);
    game.state.player.exploding = true;
    for _ in 0..10 {
        game.run_frame(&mut platform);
    }

    assert_eq!(game.state.lives, 2);
    assert!(platform.sounds.is_empty());
}

#[test]
fn test_summary_serializes() {
    let mut platform = HeadlessPlatform::new();
    let game = Game::new(&mut platform, seeded(5)).unwrap();
    let json = serde_json::to_value(game.shutdown(&mut platform)).unwrap();
    assert_eq!(json["seed"], 5);
    assert_eq!(json["lives"], 3);
    assert_eq!(json["level"], 1);
}

#[test]
fn test_capture_from_canvas_trait() {
    // Capability traits are object safe
    let mut platform = HeadlessPlatform::new();
    let canvas: &mut dyn Canvas = &mut platform;
    let snapshot = canvas.capture_frame().unwrap();
    canvas.release(snapshot);
    assert_eq!(platform.live_snapshots(), 0);
}
