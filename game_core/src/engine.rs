use glam::Vec2;
use hecs::World;
use tracing::info;

use crate::{
    capture, control_readouts, create_ball, create_player, place_ball_for_serve, step, AiController,
    Ball, Config, ConfigError, Control, ControlReadout, Events, GameRng, InputSnapshot,
    MatchSnapshot, MatchState, PlayerId, PlayerSlot, Score, Skill, Time,
};

/// A running match: the world plus every resource `step` needs
///
/// Starts with both paddles under AI control and player one waiting to
/// serve. The host calls [`MatchEngine::tick`] once per frame with the held
/// keys and its clock. Everything else is read through copies.
pub struct MatchEngine {
    world: World,
    time: Time,
    config: Config,
    score: Score,
    match_state: MatchState,
    events: Events,
    rng: GameRng,
}

impl MatchEngine {
    pub fn new(config: Config, seed: u64, now_ms: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut world = World::new();
        let score = Score::new();

        for player in PlayerId::ALL {
            let skill = Skill::from_score_gap(score.deficit(player), &config.ai);
            let ai = AiController::new(player, skill, now_ms, &mut rng);
            create_player(
                &mut world,
                player,
                config.spawn_paddle(player),
                Control::Autonomous(ai),
            );
        }

        let center = Vec2::new(config.arena.width / 2.0, config.arena.height / 2.0);
        create_ball(&mut world, Ball::new(center, Vec2::ZERO, config.ball.speed));

        let mut match_state = MatchState::new();
        place_ball_for_serve(&mut world, &config, &mut match_state);

        info!(
            seed,
            laziness = config.ai.laziness,
            competitiveness = config.ai.competitiveness,
            "match created"
        );

        Ok(Self {
            world,
            time: Time::new(now_ms),
            config,
            score,
            match_state,
            events: Events::new(),
            rng,
        })
    }

    /// Advance one frame; returns what happened during it
    pub fn tick(&mut self, input: &InputSnapshot, now_ms: u64) -> &Events {
        self.time.advance(now_ms);
        step(
            &mut self.world,
            &self.time,
            &self.config,
            input,
            &mut self.score,
            &mut self.match_state,
            &mut self.events,
            &mut self.rng,
        );
        &self.events
    }

    /// Frame for the renderer; `None` only if entities were removed by hand
    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        capture(&self.world, self.time.tick, &self.score, &self.match_state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    pub fn controls(&self) -> [ControlReadout; 2] {
        control_readouts(&self.world)
    }

    /// Current skill of a player's AI, `None` while a human steers
    pub fn skill(&self, player: PlayerId) -> Option<Skill> {
        self.world
            .query::<(&PlayerSlot, &Control)>()
            .iter()
            .find(|(_e, (slot, _))| slot.id == player)
            .and_then(|(_e, (_, control))| control.ai().map(AiController::skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogicalKey, RallyPhase, ScoreUpdate};

    const FRAME_MS: u64 = 16;

    impl MatchEngine {
        fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
            for (_e, ball) in self.world.query_mut::<&mut Ball>() {
                ball.pos = pos;
                ball.vel = vel;
            }
        }

        /// Tick idle until the receiving AI releases the serve
        fn tick_until_playing(&mut self, now: &mut u64) {
            for _ in 0..10 {
                if self.match_state.phase == RallyPhase::Playing {
                    return;
                }
                *now += FRAME_MS;
                self.tick(&InputSnapshot::new(), *now);
            }
            panic!("serve was never released");
        }

        /// Push the ball past the defender's edge and tick once
        fn force_point(&mut self, scorer: PlayerId, now: &mut u64) -> ScoreUpdate {
            self.tick_until_playing(now);
            let (x, vx) = match scorer {
                PlayerId::One => (self.config.arena.width + 1.0, 5.0),
                PlayerId::Two => (-1.0, -5.0),
            };
            self.place_ball(Vec2::new(x, 300.0), Vec2::new(vx, 0.0));

            *now += FRAME_MS;
            self.tick(&InputSnapshot::new(), *now)
                .scored
                .expect("ball left the arena")
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::new();
        config.ai.competitiveness = -3.0;
        assert!(matches!(
            MatchEngine::new(config, 1, 0),
            Err(ConfigError::NegativeTuning {
                name: "competitiveness",
                ..
            })
        ));
    }

    #[test]
    fn test_new_match_waits_for_player_one_serve() {
        let engine = MatchEngine::new(Config::new(), 1, 0).expect("engine");
        let snapshot = engine.snapshot().expect("snapshot");

        assert_eq!(snapshot.state, MatchState::new());
        assert_eq!(
            snapshot.ball.pos,
            snapshot.paddles[0].serve_position(PlayerId::One, engine.config.ball.serve_offset)
        );
        assert_eq!(snapshot.controls, [ControlReadout::Ai(0.625); 2]);
    }

    #[test]
    fn test_ball_frozen_while_receiver_idle() {
        let mut engine = MatchEngine::new(Config::new(), 1, 0).expect("engine");
        // Receiver is human and keeps still, so nobody releases the serve
        for (_e, (slot, control)) in engine.world.query_mut::<(&PlayerSlot, &mut Control)>() {
            if slot.id == PlayerId::Two {
                *control = Control::Human;
            }
        }
        let before = engine.snapshot().expect("snapshot").ball;

        for frame in 1..100u64 {
            engine.tick(&InputSnapshot::new(), frame * 16);
        }

        let after = engine.snapshot().expect("snapshot").ball;
        assert_eq!(before, after, "Ball must not move while serving");
        assert_eq!(engine.match_state().phase, RallyPhase::Serving);
    }

    #[test]
    fn test_skill_hidden_for_human() {
        let mut engine = MatchEngine::new(Config::new(), 1, 0).expect("engine");
        engine.tick(&InputSnapshot::from_keys([LogicalKey::Down1]), 16);

        assert_eq!(engine.skill(PlayerId::One), None);
        assert!(engine.skill(PlayerId::Two).is_some());
        assert_eq!(engine.controls()[0], ControlReadout::Human);
    }

    #[test]
    fn test_adaptive_skill_after_unanswered_points() {
        let mut engine = MatchEngine::new(Config::new(), 7, 0).expect("engine");
        let mut now = 0;
        assert_eq!(engine.controls(), [ControlReadout::Ai(0.625); 2], "5 / (5 + 3)");

        let mut last = (0.625f32, 0.625f32);
        for point in 1..=5u32 {
            let update = engine.force_point(PlayerId::One, &mut now);

            assert_eq!(update.scorer, PlayerId::One);
            assert_eq!(
                update.score,
                Score {
                    player1: point,
                    player2: 0
                }
            );

            let p1 = update.controls[0].skill().expect("player one is AI");
            let p2 = update.controls[1].skill().expect("player two is AI");
            assert!(p1 <= last.0, "Leader should not get stronger");
            assert!(p2 >= last.1, "Trailer should not get weaker");
            last = (p1, p2);
        }

        assert_eq!(engine.skill(PlayerId::One), Some(Skill::MIN));
        assert_eq!(engine.skill(PlayerId::Two), Some(Skill::MAX));
    }

    #[test]
    fn test_serve_geometry_after_point() {
        let mut engine = MatchEngine::new(Config::new(), 3, 0).expect("engine");
        let mut now = 0;

        engine.force_point(PlayerId::Two, &mut now);

        let snapshot = engine.snapshot().expect("snapshot");
        let server = snapshot.paddles[PlayerId::Two.index()];
        assert_eq!(
            snapshot.state,
            MatchState {
                serving: PlayerId::Two,
                phase: RallyPhase::Serving
            }
        );
        assert_eq!(
            snapshot.ball.pos,
            server.serve_position(PlayerId::Two, engine.config.ball.serve_offset)
        );
        assert_eq!(snapshot.ball.vel, Vec2::new(-engine.config.ball.speed, 0.0));
    }
}
