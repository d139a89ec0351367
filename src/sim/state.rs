//! Game state and wave/entity lifecycle
//!
//! One aggregate holds the whole world. Subsystems receive it by mutable
//! reference; nothing lives in statics.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::craft::{Craft, CraftId, Debris, Quarter};
use super::sprite::Sprite;
use crate::consts::*;
use crate::score::Score;

/// Current phase of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Running,
    /// Frozen on the pause snapshot with the help overlay
    Paused,
    /// Out of lives: paused with the game-over overlay
    GameOver,
}

impl GamePhase {
    pub fn is_paused(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Horizontal direction held by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Held direction and the x the player ship is steering toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub held: Option<Direction>,
    pub target_x: f32,
}

impl Controls {
    /// Pressing a direction replaces whatever was held
    pub fn press(&mut self, direction: Direction) {
        self.held = Some(direction);
    }

    /// Releasing only clears the direction if it is the one held
    pub fn release(&mut self, direction: Direction) {
        if self.held == Some(direction) {
            self.held = None;
        }
    }
}

/// Master sprites, one per visual, as produced by asset loading
#[derive(Debug, Clone)]
pub struct Roster {
    pub big_blue: Sprite,
    pub player: Sprite,
    pub aliens: [Sprite; ALIEN_TYPES],
    pub background: Sprite,
    pub explosion: Sprite,
    pub alien_missile: Sprite,
    pub player_missile: Sprite,
    pub line: Sprite,
    pub big_blue_missile: Sprite,
    pub asteroid: Sprite,
    pub quarters: [Sprite; 4],
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    /// Current level (1-based); drives type unlocks and aggression
    pub level: u32,
    pub lives: u8,
    /// Number of alien types in the current wave
    pub alien_types: usize,
    pub score: Score,
    pub controls: Controls,
    pub player: Craft,
    pub player_missile: Sprite,
    /// Next muzzle in `LAUNCHER_X`
    pub launcher: usize,
    /// Alien grid indexed `[type][slot]`; every slot of a type shares that
    /// type's frame sheet
    pub aliens: [[Craft; ALIEN_POPULATION]; ALIEN_TYPES],
    /// Shared visual used to draw every alien missile
    pub alien_missile: Sprite,
    pub big_blue: Craft,
    /// Frames big-blue has spent in its hit animation
    pub big_blue_hit_ticks: u32,
    pub big_blue_missile: Sprite,
    pub asteroid: Craft,
    pub debris: Debris,
    /// Shared explosion visual
    pub explosion: Sprite,
    /// The explosion sound has been queued for the running explosion
    pub explosion_sounding: bool,
    pub background: Sprite,
    /// Vertical scroll of the background, in pixels
    pub background_offset: u32,
    pub line: Sprite,
    /// Simulation steps taken
    pub time_ticks: u64,
}

impl GameState {
    /// Build the world from master sprites. The game starts paused, waiting
    /// for the first key press.
    pub fn new(roster: &Roster, seed: u64) -> Self {
        let mut player = Craft::new(roster.player.share_frames());
        player.sprite.pos = Vec2::new(
            (WIDTH / 2 - roster.player.width / 2) as f32,
            HEIGHT as f32 - roster.player.h() - 20.0,
        );
        player.sprite.animated = true;
        player.sprite.frame_delay = 1;
        player.sprite.visible = true;

        let aliens = std::array::from_fn(|kind| {
            std::array::from_fn(|_| {
                let mut craft = Craft::new(roster.aliens[kind].share_frames());
                craft.sprite.animated = true;
                craft
            })
        });

        let mut explosion = roster.explosion.share_frames();
        explosion.animated = true;

        let mut alien_missile = roster.alien_missile.share_frames();
        alien_missile.frame_delay = 3;
        alien_missile.animated = true;
        alien_missile.visible = true;

        let mut player_missile = roster.player_missile.share_frames();
        player_missile.frame_delay = 3;
        player_missile.animated = true;

        let mut line = roster.line.share_frames();
        line.pos = Vec2::new(LINE_X, LINE_Y);
        line.visible = true;

        let mut quarters = roster.quarters.clone().map(|q| q.share_frames());
        for quarter in &mut quarters {
            quarter.animated = true;
        }

        let mut background = roster.background.share_frames();
        background.visible = true;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Paused,
            width: WIDTH as f32,
            height: HEIGHT as f32,
            level: 1,
            lives: START_LIVES,
            alien_types: 1,
            score: Score::new(),
            controls: Controls {
                held: None,
                target_x: 0.0,
            },
            player,
            player_missile,
            launcher: 0,
            aliens,
            alien_missile,
            big_blue: Craft::new(roster.big_blue.share_frames()),
            big_blue_hit_ticks: 0,
            big_blue_missile: roster.big_blue_missile.share_frames(),
            asteroid: Craft::new(roster.asteroid.share_frames()),
            debris: Debris::new(quarters),
            explosion,
            explosion_sounding: false,
            background,
            background_offset: 0,
            line,
            time_ticks: 0,
        };

        state.reset_game();
        state
    }

    // === Random gates ===

    /// True with probability `n / 1024`
    pub(crate) fn chance_in_1024(&mut self, n: u32) -> bool {
        self.rng.random_range(0..MISSILE_ODDS_RANGE) < n
    }

    /// True when a draw from `0..8192` exceeds `threshold`
    pub(crate) fn rare_event(&mut self, threshold: u32) -> bool {
        self.rng.random_range(0..SPAWN_ODDS_RANGE) > threshold
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    // === Lookup ===

    pub fn craft(&self, id: CraftId) -> &Craft {
        match id {
            CraftId::Player => &self.player,
            CraftId::Alien { kind, slot } => &self.aliens[kind][slot],
            CraftId::BigBlue => &self.big_blue,
            CraftId::Asteroid => &self.asteroid,
            CraftId::Quarter(q) => self.debris.get(q),
        }
    }

    pub fn craft_mut(&mut self, id: CraftId) -> &mut Craft {
        match id {
            CraftId::Player => &mut self.player,
            CraftId::Alien { kind, slot } => &mut self.aliens[kind][slot],
            CraftId::BigBlue => &mut self.big_blue,
            CraftId::Asteroid => &mut self.asteroid,
            CraftId::Quarter(q) => self.debris.get_mut(q),
        }
    }

    /// Aliens belonging to the current wave
    pub fn active_aliens(&self) -> impl Iterator<Item = &Craft> {
        self.aliens[..self.alien_types].iter().flatten()
    }

    /// Number of visible aliens in the current wave
    pub fn aliens_alive(&self) -> usize {
        self.active_aliens().filter(|a| a.sprite.visible).count()
    }

    // === Lifecycle ===

    /// New game: score, level, lives, wave, crafts. The high score and the
    /// player's position survive.
    pub fn reset_game(&mut self) {
        self.score.reset();
        self.level = 1;
        self.lives = START_LIVES;
        self.alien_types = 1;
        self.reset_aliens();
        self.reset_big_blue();
        self.reset_player();
        self.kill_asteroid();
        self.cancel_explosion();
    }

    /// Rewind the shared explosion so the next one starts fresh and audible
    pub fn cancel_explosion(&mut self) {
        self.explosion.current_frame = 0;
        self.explosion.frame_timer = 0;
        self.explosion.visible = false;
        self.explosion_sounding = false;
    }

    /// New game, resumed immediately
    pub fn restart(&mut self) {
        self.reset_game();
        self.phase = GamePhase::Running;
    }

    /// Put every alien of the current wave back in formation; types beyond
    /// the wave are hidden
    pub fn reset_aliens(&mut self) {
        const LEADER_X: f32 = 5.0;
        const LEADER_Y: f32 = 20.0;
        const SPACING: f32 = 20.0;

        for (kind, row) in self.aliens.iter_mut().enumerate() {
            let active = kind < self.alien_types;
            for (slot, alien) in row.iter_mut().enumerate() {
                alien.reset_combat();
                alien.sprite.visible = active;
                if !active {
                    continue;
                }
                let dx = if kind % 2 == 1 { 2.0 } else { -2.0 };
                alien.sprite.vel = Vec2::new(dx, 0.1);
                alien.sprite.pos = Vec2::new(
                    LEADER_X + slot as f32 * (alien.sprite.w() + SPACING),
                    LEADER_Y + (kind + 1) as f32 * (alien.sprite.h() + SPACING),
                );
            }
        }
    }

    /// Park big-blue off the right edge, hidden
    pub fn reset_big_blue(&mut self) {
        self.big_blue.reset_combat();
        self.big_blue.sprite.stop_animation();
        self.big_blue.sprite.visible = false;
        self.big_blue.sprite.pos = Vec2::new(self.width, (HEIGHT / 2) as f32);
        self.big_blue.sprite.frame_delay = 3;
        self.big_blue_hit_ticks = 0;
        self.big_blue_missile.visible = false;
    }

    pub fn reset_player(&mut self) {
        self.player.reset_combat();
        self.player_missile.pos = Vec2::ZERO;
        self.player_missile.visible = false;
        self.player.sprite.visible = true;
        self.controls = Controls {
            held: None,
            target_x: self.player.sprite.x(),
        };
    }

    /// Remove the asteroid and all of its debris
    pub fn kill_asteroid(&mut self) {
        self.asteroid.sprite.visible = false;
        self.asteroid.exploding = false;
        self.debris.clear();
    }

    /// Launch a fresh asteroid from a random side
    pub fn reset_asteroid(&mut self) {
        let from_left = self.coin_flip();
        let drop = if self.coin_flip() { 128.0 } else { 0.0 };
        self.asteroid.reset_combat();
        self.debris.clear();

        let sprite = &mut self.asteroid.sprite;
        sprite.pos = Vec2::new(
            if from_left { -sprite.w() } else { self.width },
            LINE_Y + drop,
        );
        sprite.vel = Vec2::new(if from_left { 1.0 } else { -1.0 }, 1.0);
        sprite.visible = true;
        log::debug!("asteroid enters at {:?}", sprite.pos);
    }

    /// Replace the asteroid with its four quarters
    pub fn break_asteroid(&mut self) {
        let origin = self.asteroid.sprite.pos;
        let (w, h) = (self.asteroid.sprite.width, self.asteroid.sprite.height);

        for quarter in Quarter::ALL {
            let piece = self.debris.get_mut(quarter);
            piece.reset_combat();
            piece.sprite.pos = origin + quarter.offset(w, h);
            piece.sprite.vel = quarter.velocity();
            piece.sprite.visible = true;
        }
        self.debris.remaining = 4;
    }

    /// Wave cleared: next level, another alien type, an extra life
    pub fn level_up(&mut self) {
        self.level += 1;
        if self.alien_types < ALIEN_TYPES {
            self.alien_types += 1;
        }
        if self.lives < MAX_LIVES {
            self.lives += 1;
        }
        self.reset_aliens();
        log::info!(
            "Level {} ({} alien types, {} lives)",
            self.level,
            self.alien_types,
            self.lives
        );
    }

    /// Fire from the next muzzle, unless a player missile is already up
    pub fn launch_player_missile(&mut self) {
        if self.player_missile.visible {
            return;
        }
        let offset = LAUNCHER_X[self.launcher % LAUNCHER_X.len()];
        self.player_missile.visible = true;
        self.player_missile.pos = self.player.sprite.pos + Vec2::new(offset, 0.0);
        self.launcher = (self.launcher + 1) % LAUNCHER_X.len();
    }
}
