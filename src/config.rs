//! Game tuning and preferences
//!
//! Every constant the simulation and renderer use lives here. Defaults
//! reproduce the classic 800x600 demo; an inline JSON override can be
//! supplied through the `BITMAP_PONG_CONFIG` environment variable.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_H, SCREEN_W};

/// Environment variable holding an inline JSON config
pub const CONFIG_ENV: &str = "BITMAP_PONG_CONFIG";

/// When a match is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameOverRule {
    /// Someone scored past `floor` and leads by at least `margin`
    WinByMargin { floor: u16, margin: u16 },
    /// Someone reached `target`
    FirstTo { target: u16 },
}

impl Default for GameOverRule {
    fn default() -> Self {
        GameOverRule::WinByMargin {
            floor: 15,
            margin: 2,
        }
    }
}

impl GameOverRule {
    /// Whether the score pair ends the match
    pub fn is_over(&self, left: u16, right: u16) -> bool {
        match *self {
            GameOverRule::WinByMargin { floor, margin } => {
                left.max(right) > floor && left.abs_diff(right) >= margin
            }
            GameOverRule::FirstTo { target } => left >= target || right >= target,
        }
    }
}

/// Config parse/validation failure
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "{err}"),
            ConfigError::Invalid(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Ball ===
    /// Edge length of the square ball
    pub ball_size: f32,
    /// Speed at every serve (pixels/s)
    pub ball_initial_speed: f32,
    /// Multiplier applied on each paddle hit (1.0 disables the ramp)
    pub ball_speed_gain: f32,
    /// Speed cap as a multiple of the initial speed
    pub ball_speed_cap_factor: f32,
    /// Half-width of the random departure cone (radians)
    pub serve_spread: f32,
    /// Extra departure angle at the paddle tip (radians, 0 disables)
    pub impact_bias: f32,
    /// Gap left between ball box and paddle face after a hit
    pub paddle_snap_epsilon: f32,

    // === Paddles ===
    /// Distance from the screen edge to the paddle's outer face
    pub paddle_margin: f32,
    pub paddle_length: f32,
    pub paddle_width: f32,
    /// Vertical speed while a direction is held (pixels/s)
    pub paddle_speed: f32,

    // === Match ===
    pub game_over: GameOverRule,

    // === Score display ===
    /// Atlas pixel to screen pixel factor
    pub glyph_scale: u32,
    /// Gap between digit cells and from the top edge
    pub glyph_spacing: u32,

    // === Loop / audio ===
    pub frame_sleep_ms: u64,
    pub tone_frequency: f32,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_W,
            screen_height: SCREEN_H,

            ball_size: 16.0,
            ball_initial_speed: 282.842_712,
            ball_speed_gain: 1.01,
            ball_speed_cap_factor: 3.0,
            serve_spread: PI * 0.25,
            impact_bias: PI * 0.10,
            paddle_snap_epsilon: 0.5,

            paddle_margin: 50.0,
            paddle_length: 120.0,
            paddle_width: 24.0,
            paddle_speed: 250.0,

            game_over: GameOverRule::default(),

            glyph_scale: 10,
            glyph_spacing: 10,

            frame_sleep_ms: 15,
            tone_frequency: 286.94,
            muted: false,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `BITMAP_PONG_CONFIG`, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(json) if !json.trim().is_empty() => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {CONFIG_ENV}");
                Ok(config)
            }
            _ => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the physics cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid("screen dimensions must be positive"));
        }
        if self.ball_size <= 0.0 || self.ball_size >= self.screen_height as f32 {
            return Err(ConfigError::Invalid("ball_size must fit the screen"));
        }
        if self.paddle_length <= 0.0 || self.paddle_length > self.screen_height as f32 {
            return Err(ConfigError::Invalid("paddle_length must fit the screen"));
        }
        if self.paddle_width <= 0.0 {
            return Err(ConfigError::Invalid("paddle_width must be positive"));
        }
        if self.paddle_margin < 0.0
            || self.paddle_margin * 2.0 + self.paddle_width * 2.0 >= self.screen_width as f32
        {
            return Err(ConfigError::Invalid("paddles must fit the screen width"));
        }
        if self.ball_initial_speed <= 0.0 || self.paddle_speed < 0.0 {
            return Err(ConfigError::Invalid("speeds must be positive"));
        }
        if self.ball_speed_gain < 1.0 {
            return Err(ConfigError::Invalid("ball_speed_gain must be at least 1"));
        }
        if self.ball_speed_cap_factor < 1.0 {
            return Err(ConfigError::Invalid(
                "ball_speed_cap_factor must be at least 1",
            ));
        }
        if self.serve_spread < 0.0 || self.impact_bias < 0.0 || self.paddle_snap_epsilon < 0.0 {
            return Err(ConfigError::Invalid("angles and epsilon must not be negative"));
        }
        if self.glyph_scale == 0 {
            return Err(ConfigError::Invalid("glyph_scale must be positive"));
        }
        match self.game_over {
            GameOverRule::WinByMargin { margin: 0, .. } => {
                Err(ConfigError::Invalid("win margin must be positive"))
            }
            GameOverRule::FirstTo { target: 0 } => {
                Err(ConfigError::Invalid("win target must be positive"))
            }
            _ => Ok(()),
        }
    }

    /// Half of the ball edge
    #[inline]
    pub fn half_ball(&self) -> f32 {
        self.ball_size * 0.5
    }

    /// Maximum ball speed
    #[inline]
    pub fn ball_speed_cap(&self) -> f32 {
        self.ball_initial_speed * self.ball_speed_cap_factor
    }

    /// Left edge of the left paddle
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// Left edge of the right paddle
    pub fn right_paddle_x(&self) -> f32 {
        self.screen_width as f32 - self.paddle_margin - self.paddle_width
    }

    /// Clamp paddle Y to the legal band
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let half_length = self.paddle_length / 2.0;
        y.clamp(half_length, self.screen_height as f32 - half_length)
    }
}
