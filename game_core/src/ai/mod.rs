//! Adaptive AI controller
//!
//! Each autonomous paddle owns an [`AiController`]. Every tick it reads the
//! ball and both paddles through an [`AiView`], recomputes its aim point
//! once its reaction window has elapsed, and emits a one-step movement
//! toward that aim. Below perfect skill it aims loosely and occasionally
//! makes deliberate mistakes.

pub mod prediction;
pub mod skill;

pub use prediction::*;
pub use skill::*;

use rand::Rng;
use tracing::trace;

use crate::{Ball, GameRng, Paddle, Params, PlayerId};

/// Read-only picture of the ball and own paddle handed to the controller
/// each tick
#[derive(Debug, Clone, Copy)]
pub struct AiView<'a> {
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub court: Court,
    pub now_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Still,
}

impl Direction {
    /// -1 = up, 0 = stop, 1 = down
    pub fn dir(self) -> i8 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Still => 0,
        }
    }
}

/// Movement intent emitted for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiMovement {
    pub direction: Direction,
    pub step: f32,
}

impl AiMovement {
    pub fn still() -> Self {
        Self {
            direction: Direction::Still,
            step: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MistakeKind {
    /// Aim 30-100px past the ball
    Overshoot,
    /// Travel only 30-70% of the way to the ball
    Undershoot,
    /// Aim at the ball mirrored about the paddle centre
    WrongDirection,
}

impl MistakeKind {
    fn pick(rng: &mut GameRng) -> Self {
        match rng.0.gen_range(0..3) {
            0 => MistakeKind::Overshoot,
            1 => MistakeKind::Undershoot,
            _ => MistakeKind::WrongDirection,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiController {
    player: PlayerId,
    skill: Skill,
    reaction_time_ms: f32,
    mistake_probability: f32,
    last_decision_ms: u64,
    next_mistake_ms: u64,
    wrong_direction_until: Option<u64>,
    target_y: Option<f32>,
    last_ball_vx: f32,
    bounce_pending: bool,
    mistakes: u64,
}

impl AiController {
    pub fn new(player: PlayerId, skill: Skill, now_ms: u64, rng: &mut GameRng) -> Self {
        let mut ai = Self {
            player,
            skill,
            reaction_time_ms: 0.0,
            mistake_probability: 0.0,
            last_decision_ms: now_ms,
            next_mistake_ms: now_ms,
            wrong_direction_until: None,
            target_y: None,
            last_ball_vx: 0.0,
            bounce_pending: false,
            mistakes: 0,
        };
        ai.set_skill(skill, rng);
        ai.reset(now_ms, rng);
        ai
    }

    pub fn skill(&self) -> Skill {
        self.skill
    }

    pub fn mistake_probability(&self) -> f32 {
        self.mistake_probability
    }

    /// Last computed aim point, if a decision has been made this rally
    pub fn target_y(&self) -> Option<f32> {
        self.target_y
    }

    pub fn is_going_wrong_way(&self) -> bool {
        self.wrong_direction_until.is_some()
    }

    /// Mistakes injected since this controller was created
    pub fn mistakes_made(&self) -> u64 {
        self.mistakes
    }

    /// Re-derive reaction time and mistake rate from a new skill
    pub fn set_skill(&mut self, skill: Skill, rng: &mut GameRng) {
        self.skill = skill;
        self.reaction_time_ms = skill.reaction_time_ms(rng);
        self.mistake_probability = skill.mistake_probability();
    }

    /// Start of a rally: forget the old aim and re-arm the mistake timer
    pub fn reset(&mut self, now_ms: u64, rng: &mut GameRng) {
        self.last_decision_ms = now_ms;
        self.target_y = None;
        self.next_mistake_ms = now_ms + rng.0.gen_range(2000..5000);
        self.last_ball_vx = 0.0;
        self.wrong_direction_until = None;
        self.bounce_pending = false;
    }

    /// Decide this tick's paddle movement
    pub fn decide(&mut self, view: &AiView, rng: &mut GameRng) -> AiMovement {
        let now = view.now_ms;
        let ball_vx = view.ball.vel.x;

        if self.last_ball_vx != 0.0 && sign(ball_vx) != sign(self.last_ball_vx) {
            self.bounce_pending = true;
        }
        self.last_ball_vx = ball_vx;

        if now.saturating_sub(self.last_decision_ms) as f32 > self.reaction_time_ms {
            self.make_decision(view, rng);
            self.last_decision_ms = now;
        }

        if let Some(until) = self.wrong_direction_until {
            if now > until {
                self.wrong_direction_until = None;
                self.target_y = Some(self.aim(view, rng));
                trace!(player = ?self.player, "recovered from wrong-direction mistake");
            }
        }

        let Some(target) = self.target_y else {
            return AiMovement::still();
        };

        let diff = target - view.paddle.center_y();
        if diff.abs() <= Params::AI_DEADBAND {
            return AiMovement::still();
        }

        AiMovement {
            direction: if diff > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            },
            step: view.paddle.speed,
        }
    }

    fn make_decision(&mut self, view: &AiView, rng: &mut GameRng) {
        let now = view.now_ms;
        let mut mistake = None;

        if !self.skill.is_perfect() && now > self.next_mistake_ms {
            if rng.0.gen::<f32>() < self.mistake_probability {
                mistake = Some(MistakeKind::pick(rng));
            }
            self.next_mistake_ms = now + rng.0.gen_range(2000..6000);
        }

        if std::mem::take(&mut self.bounce_pending)
            && !self.skill.is_perfect()
            && rng.0.gen::<f32>() < (1.0 - self.skill.value()) * Params::BOUNCE_MISTAKE_WEIGHT
        {
            mistake = Some(MistakeKind::WrongDirection);
            self.wrong_direction_until = Some(now + rng.0.gen_range(200..500));
        }

        match mistake {
            Some(kind) => {
                self.mistakes += 1;
                self.target_y = Some(self.mistaken_aim(kind, view, rng));
                trace!(player = ?self.player, ?kind, skill = self.skill.value(), "ai mistake");
            }
            // Hold the wrong aim until the recovery deadline
            None if self.wrong_direction_until.is_some() => {}
            None => self.target_y = Some(self.aim(view, rng)),
        }
    }

    /// Aim between the ball's current y (skill 0) and its predicted
    /// interception (skill 1), with jitter below perfect skill
    fn aim(&self, view: &AiView, rng: &mut GameRng) -> f32 {
        let current = view.ball.pos.y;
        let predicted = predict_interception(view.ball, view.paddle, self.player, &view.court);
        let skill = self.skill.value();
        let target = current + (predicted - current) * skill;

        if self.skill.is_perfect() {
            target
        } else {
            target + (1.0 - skill) * Params::AI_TRACKING_ERROR * (rng.0.gen::<f32>() - 0.5)
        }
    }

    fn mistaken_aim(&self, kind: MistakeKind, view: &AiView, rng: &mut GameRng) -> f32 {
        let ball_y = view.ball.pos.y;
        let center = view.paddle.center_y();
        match kind {
            MistakeKind::Overshoot => {
                let overshoot = rng.0.gen_range(30.0f32..100.0);
                if ball_y > center {
                    ball_y + overshoot
                } else {
                    ball_y - overshoot
                }
            }
            MistakeKind::Undershoot => center + (ball_y - center) * rng.0.gen_range(0.3f32..0.7),
            MistakeKind::WrongDirection => center - (ball_y - center),
        }
    }
}

fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
