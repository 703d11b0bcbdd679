use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use game_core::{AiConfig, Config, KeyBindings};
use serde::Deserialize;

// Runner settings plus the only game settings a host may change: AI
// skill shaping and key bindings.

pub const DEFAULT_SEED: u64 = 0x5EED;
pub const DEFAULT_TICKS: u64 = 60 * 60 * 3;
pub const DEFAULT_FRAME_MS: u64 = 1000 / 60;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub seed: u64,
    pub ticks: u64,
    pub frame_ms: u64,
    pub ai: AiConfig,
    pub keys: KeyBindings,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ticks: DEFAULT_TICKS,
            frame_ms: DEFAULT_FRAME_MS,
            ai: AiConfig::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl RunnerConfig {
    /// Defaults, then the optional JSON file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn game(&self) -> Config {
        Config::with_overrides(self.ai, self.keys.clone())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Unparseable values are ignored, like the server port settings
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let parse = |key: &str| var(key).and_then(|v| v.parse::<u64>().ok());

        if let Some(seed) = parse("MATCH_SEED") {
            self.seed = seed;
        }
        if let Some(ticks) = parse("MATCH_TICKS") {
            self.ticks = ticks;
        }
        if let Some(frame_ms) = parse("MATCH_FRAME_MS") {
            self.frame_ms = frame_ms;
        }
    }
}
