use rand::Rng;

use crate::{AiConfig, ConfigError, GameRng};

/// AI strength in `[0, 1]`; 1 is a perfect, mistake-free player
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Skill(f32);

impl Skill {
    pub const MIN: Skill = Skill(0.0);
    pub const MAX: Skill = Skill(1.0);

    pub fn new(value: f32) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::SkillOutOfRange(value))
        }
    }

    /// Skill from the live score gap: trailing players get stronger
    ///
    /// `deficit` is the opponent's score minus ours. At a level score the
    /// result is `laziness / (laziness + competitiveness)`.
    pub fn from_score_gap(deficit: i64, ai: &AiConfig) -> Self {
        let raw = (deficit as f32 + ai.laziness) / (ai.competitiveness + ai.laziness);
        Self(raw.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_perfect(self) -> bool {
        self.0 >= 1.0
    }

    /// 50-100ms for a perfect player, 100-300ms otherwise
    pub fn reaction_time_ms(self, rng: &mut GameRng) -> f32 {
        if self.is_perfect() {
            50.0 + rng.0.gen::<f32>() * 50.0
        } else {
            100.0 + (1.0 - self.0) * 200.0
        }
    }

    pub fn mistake_probability(self) -> f32 {
        if self.is_perfect() {
            0.0
        } else {
            0.08 + (1.0 - self.0) * 0.3
        }
    }
}
