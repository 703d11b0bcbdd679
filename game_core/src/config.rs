use serde::Deserialize;

use crate::{ConfigError, KeyBindings, Paddle, Params, PlayerId};

/// Playing field dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: Params::ARENA_WIDTH,
            height: Params::ARENA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Gap kept between the paddle and the top/bottom walls
    pub buffer: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: Params::PADDLE_WIDTH,
            height: Params::PADDLE_HEIGHT,
            speed: Params::PADDLE_SPEED,
            buffer: Params::PADDLE_BUFFER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallConfig {
    pub size: f32,
    pub speed: f32,
    pub spin_factor: f32,
    pub serve_offset: f32,
    pub serve_half_angle_deg: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            size: Params::BALL_SIZE,
            speed: Params::BALL_SPEED,
            spin_factor: Params::SPIN_FACTOR,
            serve_offset: Params::SERVE_OFFSET,
            serve_half_angle_deg: Params::SERVE_HALF_ANGLE_DEG,
        }
    }
}

impl BallConfig {
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }
}

/// Skill-shaping constants shared by both AI controllers
///
/// Together with the key bindings, the only settings a host may load.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub laziness: f32,
    pub competitiveness: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            laziness: Params::LAZINESS,
            competitiveness: Params::COMPETITIVENESS,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("laziness", self.laziness)?;
        non_negative("competitiveness", self.competitiveness)?;
        if self.laziness + self.competitiveness <= 0.0 {
            return Err(ConfigError::DegenerateSkillRange);
        }
        Ok(())
    }
}

/// Game configuration
///
/// Geometry and physics always come from `Params`; hosts only swap in
/// their own `AiConfig` and `KeyBindings` through [`Config::with_overrides`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub arena: ArenaConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub ai: AiConfig,
    pub keys: KeyBindings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(ai: AiConfig, keys: KeyBindings) -> Self {
        Self {
            ai,
            keys,
            ..Self::default()
        }
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        non_negative("paddle.buffer", self.paddle.buffer)?;
        positive("ball.size", self.ball.size)?;
        positive("ball.speed", self.ball.speed)?;
        non_negative("ball.spin_factor", self.ball.spin_factor)?;
        non_negative("ball.serve_offset", self.ball.serve_offset)?;
        non_negative("ball.serve_half_angle_deg", self.ball.serve_half_angle_deg)?;

        if self.paddle_min_y() > self.paddle_max_y() {
            return Err(ConfigError::PaddleDoesNotFit {
                paddle_height: self.paddle.height,
                arena_height: self.arena.height,
            });
        }

        self.validate_court()?;
        self.ai.validate()?;
        self.keys.validate()
    }

    /// Both serve spots must sit inside the arena with the left one
    /// strictly left of the right one
    fn validate_court(&self) -> Result<(), ConfigError> {
        let left_serve_x = self.paddle_column_x(PlayerId::One)
            + self.paddle.width
            + self.ball.serve_offset;
        let right_serve_x = self.paddle_column_x(PlayerId::Two) - self.ball.serve_offset;

        if left_serve_x <= 0.0 || right_serve_x >= self.arena.width || left_serve_x >= right_serve_x
        {
            return Err(ConfigError::CourtTooNarrow {
                arena_width: self.arena.width,
                left_serve_x,
                right_serve_x,
            });
        }
        Ok(())
    }

    /// Left edge of the column a player's paddle slides in
    pub fn paddle_column_x(&self, player: PlayerId) -> f32 {
        match player {
            PlayerId::One => Params::LEFT_COLUMN_X,
            PlayerId::Two => self.arena.width - Params::RIGHT_COLUMN_INSET,
        }
    }

    pub fn paddle_min_y(&self) -> f32 {
        self.paddle.buffer
    }

    pub fn paddle_max_y(&self) -> f32 {
        self.arena.height - self.paddle.buffer - self.paddle.height
    }

    /// Paddle centred vertically in its column
    pub fn spawn_paddle(&self, player: PlayerId) -> Paddle {
        Paddle {
            y: self.arena.height / 2.0 - self.paddle.height / 2.0,
            height: self.paddle.height,
            width: self.paddle.width,
            speed: self.paddle.speed,
            column_x: self.paddle_column_x(player),
            min_y: self.paddle_min_y(),
            max_y: self.paddle_max_y(),
        }
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeTuning { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}
