use std::fmt;

use crate::PlayerId;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Time {
    pub tick: u64,   // Ticks simulated so far
    pub now_ms: u64, // Host clock at the current tick
}

impl Time {
    pub fn new(now_ms: u64) -> Self {
        Self { tick: 0, now_ms }
    }

    /// Advance to the next tick; a clock that goes backwards is held in place
    pub fn advance(&mut self, now_ms: u64) {
        self.tick += 1;
        self.now_ms = self.now_ms.max(now_ms);
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, player: PlayerId) {
        match player {
            PlayerId::One => self.player1 += 1,
            PlayerId::Two => self.player2 += 1,
        }
    }

    pub fn of(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }

    /// Opponent's points minus this player's points
    pub fn deficit(&self, player: PlayerId) -> i64 {
        i64::from(self.of(player.opponent())) - i64::from(self.of(player))
    }
}

/// Random number generator shared by serves, mistakes, and jitter
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyPhase {
    /// Ball frozen at the server's paddle until the receiver releases it
    Serving,
    Playing,
}

/// Serve/rally state of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    pub serving: PlayerId,
    pub phase: RallyPhase,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            serving: PlayerId::One,
            phase: RallyPhase::Serving,
        }
    }

    /// True if this player's input would release a waiting serve
    pub fn awaits_release_from(&self, player: PlayerId) -> bool {
        self.phase == RallyPhase::Serving && self.serving != player
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoreboard label for one paddle's controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlReadout {
    Human,
    Ai(f32),
}

impl ControlReadout {
    /// Skill rounded to two decimals, if an AI is in control
    pub fn skill(&self) -> Option<f32> {
        match self {
            ControlReadout::Ai(skill) => Some((skill * 100.0).round() / 100.0),
            ControlReadout::Human => None,
        }
    }
}

impl fmt::Display for ControlReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.skill() {
            Some(skill) => write!(f, "AI: {skill:.2}"),
            None => f.write_str("Human"),
        }
    }
}

/// Scoreboard notification raised on every point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    pub scorer: PlayerId,
    pub score: Score,
    pub controls: [ControlReadout; 2],
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub scored: Option<ScoreUpdate>,
    pub served: bool,
    pub ball_hit_paddle: Option<PlayerId>,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
