//! Logical keys and the per-tick held-key snapshot
//!
//! The host debounces physical key events; the core only sees which logical
//! keys are held on a given tick and re-applies them every tick they stay held.

use serde::Deserialize;

use crate::{ConfigError, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up1,
    Down1,
    Ai1,
    Up2,
    Down2,
    Ai2,
}

impl LogicalKey {
    pub fn player(self) -> PlayerId {
        match self {
            LogicalKey::Up1 | LogicalKey::Down1 | LogicalKey::Ai1 => PlayerId::One,
            LogicalKey::Up2 | LogicalKey::Down2 | LogicalKey::Ai2 => PlayerId::Two,
        }
    }
}

/// Physical keys for one player
#[derive(Debug, Clone, PartialEq)]
pub struct KeySet {
    pub up: String,
    pub down: String,
    pub ai: String,
}

/// Loaded bindings; any key left out keeps its default
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "KeyBindingOverrides")]
pub struct KeyBindings {
    pub player1: KeySet,
    pub player2: KeySet,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player1: KeySet {
                up: "Q".into(),
                down: "A".into(),
                ai: "Z".into(),
            },
            player2: KeySet {
                up: "O".into(),
                down: "K".into(),
                ai: "M".into(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeySetOverrides {
    up: Option<String>,
    down: Option<String>,
    ai: Option<String>,
}

impl KeySetOverrides {
    fn apply(self, keys: &mut KeySet) {
        if let Some(up) = self.up {
            keys.up = up;
        }
        if let Some(down) = self.down {
            keys.down = down;
        }
        if let Some(ai) = self.ai {
            keys.ai = ai;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyBindingOverrides {
    player1: KeySetOverrides,
    player2: KeySetOverrides,
}

impl From<KeyBindingOverrides> for KeyBindings {
    fn from(overrides: KeyBindingOverrides) -> Self {
        let mut bindings = KeyBindings::default();
        overrides.player1.apply(&mut bindings.player1);
        overrides.player2.apply(&mut bindings.player2);
        bindings
    }
}

impl KeyBindings {
    fn table(&self) -> [(&str, LogicalKey); 6] {
        [
            (self.player1.up.as_str(), LogicalKey::Up1),
            (self.player1.down.as_str(), LogicalKey::Down1),
            (self.player1.ai.as_str(), LogicalKey::Ai1),
            (self.player2.up.as_str(), LogicalKey::Up2),
            (self.player2.down.as_str(), LogicalKey::Down2),
            (self.player2.ai.as_str(), LogicalKey::Ai2),
        ]
    }

    /// Map a physical key name to its action (case-insensitive)
    pub fn resolve(&self, key: &str) -> Option<LogicalKey> {
        self.table()
            .into_iter()
            .find(|(bound, _)| bound.eq_ignore_ascii_case(key))
            .map(|(_, logical)| logical)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.table();
        for (i, (key, _)) in table.iter().enumerate() {
            if table[i + 1..]
                .iter()
                .any(|(other, _)| other.eq_ignore_ascii_case(key))
            {
                return Err(ConfigError::DuplicateKeyBinding {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Help line shown next to the arena
    pub fn instructions(&self) -> String {
        format!(
            "Press {}/{}, or {}/{} to control a paddle; and {} or {} to hand control back to the AI.",
            self.player1.up,
            self.player1.down,
            self.player2.up,
            self.player2.down,
            self.player1.ai,
            self.player2.ai
        )
    }
}

/// Held keys for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerKeys {
    pub up: bool,
    pub down: bool,
    pub ai: bool,
}

/// Level-triggered input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    players: [PlayerKeys; 2],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = LogicalKey>) -> Self {
        let mut snapshot = Self::new();
        for key in keys {
            snapshot.press(key);
        }
        snapshot
    }

    /// Build from physical key names, ignoring unbound keys
    pub fn from_held<'a>(held: impl IntoIterator<Item = &'a str>, bindings: &KeyBindings) -> Self {
        Self::from_keys(held.into_iter().filter_map(|key| bindings.resolve(key)))
    }

    pub fn press(&mut self, key: LogicalKey) {
        let keys = &mut self.players[key.player().index()];
        match key {
            LogicalKey::Up1 | LogicalKey::Up2 => keys.up = true,
            LogicalKey::Down1 | LogicalKey::Down2 => keys.down = true,
            LogicalKey::Ai1 | LogicalKey::Ai2 => keys.ai = true,
        }
    }

    pub fn player(&self, player: PlayerId) -> PlayerKeys {
        self.players[player.index()]
    }
}
