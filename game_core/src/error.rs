use thiserror::Error;

/// Rejected match configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("skill must lie in [0, 1], got {0}")]
    SkillOutOfRange(f32),

    #[error("{name} must be a finite value >= 0, got {value}")]
    NegativeTuning { name: &'static str, value: f32 },

    #[error("laziness + competitiveness must be > 0")]
    DegenerateSkillRange,

    #[error("{name} must be a finite value > 0, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("paddle of height {paddle_height} does not fit between buffers in an arena {arena_height} high")]
    PaddleDoesNotFit {
        paddle_height: f32,
        arena_height: f32,
    },

    #[error("arena {arena_width} wide leaves no court: serve spots at x={left_serve_x} and x={right_serve_x}")]
    CourtTooNarrow {
        arena_width: f32,
        left_serve_x: f32,
        right_serve_x: f32,
    },

    #[error("key {key:?} is bound to more than one action")]
    DuplicateKeyBinding { key: String },
}
