//! One-time asset loading
//!
//! Every frame sequence is loaded once into an arena of frame sheets. The
//! sprites in the game state refer to sheets by `SheetId` and never own
//! textures, so the alien grid shares one sheet per type. Text used by the
//! HUD and the pause overlay is rendered once and its size cached.

use crate::consts::{ALIEN_TYPES, HEIGHT, WIDTH};
use crate::error::GameError;
use crate::platform::{AssetLoader, Canvas, TextureId};
use crate::settings::Settings;
use crate::sim::{Roster, SheetId, Sprite};

/// Alien type stems, in type order
const ALIEN_STEMS: [&str; ALIEN_TYPES] = ["purple", "green", "yellow", "cyan"];
/// Quarter stems, in `Quarter::ALL` order
const QUARTER_STEMS: [&str; 4] = ["ul", "ur", "ll", "lr"];

pub const GAME_OVER_TEXT: &str = "Game Over! (Press n for new game)";
pub const HELP_TEXT: [&str; 5] = [
    " - Space or cursor up.",
    " - Cursor left / right.",
    "P - Pause / Play",
    "N - New Game",
    "Q - Quit",
];

/// A loaded frame sequence
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSheet {
    pub frames: Vec<TextureId>,
    /// Size of the first frame; every frame is drawn at this size
    pub width: u32,
    pub height: u32,
}

/// A rendered string and its size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLabel {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Cached text for the HUD and overlays
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    pub digits: [TextLabel; 10],
    pub game_over: TextLabel,
    pub help: [TextLabel; 5],
}

/// Everything loaded at startup
#[derive(Debug, Clone)]
pub struct Assets {
    sheets: Vec<FrameSheet>,
    /// Master sprites handed to `GameState::new`
    pub roster: Roster,
    pub text: UiText,
}

impl Assets {
    /// Load every sprite sheet and render the cached text.
    ///
    /// Any failure is fatal; nothing partially loaded is kept.
    pub fn load<P>(platform: &mut P, settings: &Settings) -> Result<Self, GameError>
    where
        P: AssetLoader + Canvas + ?Sized,
    {
        let mut loader = SheetLoader {
            platform: &mut *platform,
            prefix: &settings.asset_stem_prefix,
            sheets: Vec::new(),
        };

        let big_blue = loader.sprite("bigblue")?;
        let player = loader.sprite("player")?;
        let mut aliens = Vec::with_capacity(ALIEN_TYPES);
        for stem in ALIEN_STEMS {
            aliens.push(loader.sprite(stem)?);
        }
        let background = loader.sprite("background")?;
        let explosion = loader.sprite("explosion")?;
        let alien_missile = loader.sprite("missile")?;
        let player_missile = loader.sprite("playmis")?;
        let line = loader.sprite("line")?;
        let big_blue_missile = loader.sprite("missiles")?;
        let asteroid = loader.sprite("asteroid")?;
        let mut quarters = Vec::with_capacity(QUARTER_STEMS.len());
        for stem in QUARTER_STEMS {
            quarters.push(loader.sprite(stem)?);
        }

        let roster = Roster {
            big_blue,
            player,
            aliens: into_array(aliens),
            background,
            explosion,
            alien_missile,
            player_missile,
            line,
            big_blue_missile,
            asteroid,
            quarters: into_array(quarters),
        };

        let sheets = loader.sheets;
        let text = UiText {
            digits: render_all(platform, std::array::from_fn(|d| d.to_string()))?,
            game_over: render(platform, GAME_OVER_TEXT)?,
            help: render_all(platform, HELP_TEXT.map(str::to_string))?,
        };

        let assets = Self {
            sheets,
            roster,
            text,
        };
        log::info!("Loaded {} frame sheets", assets.sheet_count());
        Ok(assets)
    }

    pub fn sheet(&self, id: SheetId) -> &FrameSheet {
        &self.sheets[id.0]
    }

    /// Texture for the sprite's current frame
    pub fn frame(&self, sprite: &Sprite) -> TextureId {
        let frames = &self.sheet(sprite.sheet).frames;
        frames[sprite.current_frame.min(frames.len() - 1)]
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

/// Minimum-resolution check. A failing bounds query is not fatal.
pub fn check_display<C: Canvas + ?Sized>(canvas: &C) -> Result<(), GameError> {
    match canvas.display_bounds() {
        Ok((width, height)) if width < WIDTH || height < HEIGHT => {
            Err(GameError::DisplayTooSmall {
                width,
                height,
                min_width: WIDTH,
                min_height: HEIGHT,
            })
        }
        Ok(_) => Ok(()),
        Err(err) => {
            log::warn!("Could not query display bounds ({err}), assuming {WIDTH}x{HEIGHT}");
            Ok(())
        }
    }
}

struct SheetLoader<'a, P: ?Sized> {
    platform: &'a mut P,
    prefix: &'a str,
    sheets: Vec<FrameSheet>,
}

impl<P: AssetLoader + Canvas + ?Sized> SheetLoader<'_, P> {
    /// Load `stem` into a new sheet and return a master sprite for it
    fn sprite(&mut self, stem: &str) -> Result<Sprite, GameError> {
        let path = format!("{}{stem}", self.prefix);
        let frames = self
            .platform
            .load_frames(&path)
            .map_err(|err| GameError::backend(format!("load sprite \"{path}\""), err))?;
        let Some(&first) = frames.first() else {
            return Err(GameError::NoFrames { stem: path });
        };

        let (width, height) = self.platform.texture_size(first);
        let id = SheetId(self.sheets.len());
        let sprite = Sprite::new(id, width, height, frames.len() - 1);
        log::debug!("sprite {path}: {} frames of {width}x{height}", frames.len());

        self.sheets.push(FrameSheet {
            frames,
            width,
            height,
        });
        Ok(sprite)
    }
}

fn render<P: AssetLoader + Canvas + ?Sized>(
    platform: &mut P,
    text: &str,
) -> Result<TextLabel, GameError> {
    let texture = platform
        .render_text(text)
        .map_err(|err| GameError::backend(format!("render text \"{text}\""), err))?;
    let (width, height) = platform.texture_size(texture);
    Ok(TextLabel {
        texture,
        width,
        height,
    })
}

fn render_all<P: AssetLoader + Canvas + ?Sized, const N: usize>(
    platform: &mut P,
    texts: [String; N],
) -> Result<[TextLabel; N], GameError> {
    let mut labels = Vec::with_capacity(N);
    for text in &texts {
        labels.push(render(platform, text)?);
    }
    Ok(into_array(labels))
}

/// Vec of known length into a fixed array
fn into_array<T, const N: usize>(items: Vec<T>) -> [T; N] {
    match items.try_into() {
        Ok(array) => array,
        Err(items) => unreachable!("expected {N} items, got {}", items.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn test_load_builds_roster() {
        let mut platform = HeadlessPlatform::new();
        let assets = Assets::load(&mut platform, &Settings::default()).unwrap();

        assert_eq!(assets.sheet_count(), 17);
        assert_eq!(assets.roster.big_blue.width, 100);
        assert_eq!(assets.roster.explosion.frame_count, 7);
        assert_eq!(assets.roster.aliens[2].height, 24);
        assert_eq!(assets.roster.line.width, 500);

        let frame = assets.frame(&assets.roster.aliens[3]);
        assert_eq!(platform.texture_name(frame), Some("cyan00"));
    }

    #[test]
    fn test_text_is_cached_with_sizes() {
        let mut platform = HeadlessPlatform::new();
        let assets = Assets::load(&mut platform, &Settings::default()).unwrap();

        assert_eq!(platform.texture_name(assets.text.digits[7].texture), Some("text:7"));
        assert_eq!(assets.text.digits[7].width, 8);
        assert_eq!(assets.text.help[2].width, 8 * 16);
        assert_eq!(
            platform.texture_name(assets.text.game_over.texture),
            Some("text:Game Over! (Press n for new game)")
        );
    }

    #[test]
    fn test_missing_sprite_names_the_operation() {
        let mut platform = HeadlessPlatform::new().with_missing_sprite("yellow");
        let err = Assets::load(&mut platform, &Settings::default()).unwrap_err();
        assert!(matches!(err, GameError::Backend { .. }));
        assert!(err.to_string().contains("load sprite \"yellow\""));
    }

    #[test]
    fn test_empty_sheet_is_rejected() {
        let mut platform = HeadlessPlatform::new().with_sprite("line", 500, 2, 0);
        let err = Assets::load(&mut platform, &Settings::default()).unwrap_err();
        assert!(matches!(err, GameError::NoFrames { ref stem } if stem == "line"));
    }

    #[test]
    fn test_text_failure_is_fatal() {
        let mut platform = HeadlessPlatform::new().with_failing_text();
        let err = Assets::load(&mut platform, &Settings::default()).unwrap_err();
        assert!(err.to_string().starts_with("render text \"0\" failed"));
    }

    #[test]
    fn test_stem_prefix_reaches_loader() {
        let mut platform = HeadlessPlatform::new().with_missing_sprite("gfx/player");
        let settings = Settings {
            asset_stem_prefix: "gfx/".to_string(),
            ..Settings::default()
        };
        let err = Assets::load(&mut platform, &settings).unwrap_err();
        assert!(err.to_string().contains("gfx/player"));
    }

    #[test]
    fn test_display_check() {
        assert!(check_display(&HeadlessPlatform::new()).is_ok());
        assert!(check_display(&HeadlessPlatform::new().with_display(None)).is_ok());
        let err = check_display(&HeadlessPlatform::new().with_display(Some((1024, 768))));
        assert!(matches!(
            err,
            Err(GameError::DisplayTooSmall {
                width: 1024,
                height: 768,
                ..
            })
        ));
    }
}
