/// Tunable game constants, optionally overridden from a RON file.
///
/// Every field has a default, so a partial file only needs the keys it
/// changes.  A missing file is not an error; a broken one falls back to the
/// defaults with a warning.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_FILE: &str = "space_shooter.ron";

// ── Fixed gameplay constants ──────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 40;
/// Units moved per tick for each held direction.
pub const PLAYER_SPEED: i32 = 5;
/// Gap between the ship's bottom edge and the field bottom at spawn.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_MAX_SHIELD: i32 = 100;
/// Shield lost per enemy rammed.
pub const RAM_SHIELD_DAMAGE: i32 = 20;

pub const ENEMY_WIDTH: i32 = 30;
pub const ENEMY_HEIGHT: i32 = 24;
pub const ENEMY_HEALTH: i32 = 30;
pub const ENEMY_MIN_SPEED: i32 = 1;
pub const ENEMY_MAX_SPEED: i32 = 3;
/// Respawn band above the field, inclusive.
pub const ENEMY_SPAWN_Y_MIN: i32 = -100;
pub const ENEMY_SPAWN_Y_MAX: i32 = -40;
pub const ENEMY_KILL_SCORE: u32 = 10;

pub const BULLET_WIDTH: i32 = 5;
pub const BULLET_HEIGHT: i32 = 10;
pub const BULLET_SPEED: i32 = 7;
pub const BULLET_DAMAGE: i32 = 10;

pub const POWERUP_SIZE: i32 = 20;
pub const POWERUP_SPEED: i32 = 2;
/// Shield restored by a shield pickup, half-open range.
pub const SHIELD_PICKUP_MIN: i32 = 10;
pub const SHIELD_PICKUP_MAX: i32 = 30;

pub const EXPLOSION_SIZE: i32 = 50;
pub const EXPLOSION_FRAME_MS: u64 = 50;
pub const EXPLOSION_FRAMES: u32 = 8;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: ron::error::SpannedError },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "read {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "parse {}: {source}", path.display()),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub tick_rate: u32,
    /// Enemies alive at all times during a run.
    pub enemy_count: usize,
    /// Probability that a destroyed enemy drops a power-up.
    pub powerup_drop_chance: f64,
    /// A shot is allowed once strictly more than this has elapsed.
    pub shoot_delay_ms: u64,
    /// Time each boosted power level lasts before dropping one level.
    pub power_decay_ms: u64,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            tick_rate: 60,
            enemy_count: 8,
            powerup_drop_chance: 0.1,
            shoot_delay_ms: 250,
            power_decay_ms: 5000,
            high_score_path: PathBuf::from("highscore.txt"),
            log_path: PathBuf::from("space_shooter.log"),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Load `path`, or the defaults when it is absent or unusable.
    ///
    /// The second element carries the reason a present file was rejected,
    /// so the caller can log it once logging is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= ENEMY_WIDTH.max(PLAYER_WIDTH) {
            return Err(ConfigError::Invalid(format!(
                "field_width {} is too small",
                self.field_width
            )));
        }
        if self.field_height <= PLAYER_HEIGHT + PLAYER_BOTTOM_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "field_height {} is too small",
                self.field_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::Invalid(format!(
                "powerup_drop_chance {} is outside 0..=1",
                self.powerup_drop_chance
            )));
        }
        Ok(())
    }

    /// Milliseconds per tick at the configured rate.
    pub fn tick_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate.max(1))
    }
}
