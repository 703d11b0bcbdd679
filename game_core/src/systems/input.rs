use hecs::World;
use tracing::debug;

use crate::ai::{AiController, AiView, Court, Skill};
use crate::{
    Ball, Config, Control, GameRng, InputSnapshot, MatchState, Paddle, PlayerSlot, Score, Time,
};

/// Recompute every AI's skill from the live score gap
pub fn update_skills(world: &mut World, score: &Score, config: &Config, rng: &mut GameRng) {
    for (_entity, (slot, control)) in world.query_mut::<(&PlayerSlot, &mut Control)>() {
        if let Some(ai) = control.ai_mut() {
            ai.set_skill(Skill::from_score_gap(score.deficit(slot.id), &config.ai), rng);
        }
    }
}

/// Resolve human-vs-AI control for both paddles and move them one step
///
/// Held keys win over the AI: up/down take the paddle over, the AI key hands
/// it back without moving that tick. Returns true when the player waiting to
/// receive was active this tick, which releases the serve.
#[allow(clippy::too_many_arguments)]
pub fn apply_controls(
    world: &mut World,
    input: &InputSnapshot,
    time: &Time,
    score: &Score,
    match_state: &MatchState,
    config: &Config,
    rng: &mut GameRng,
) -> bool {
    // Copy the ball first; AI reads it while paddles are borrowed mutably
    let ball = {
        let mut query = world.query::<&Ball>();
        query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(ball) = ball else {
        return false;
    };
    let court = Court {
        height: config.arena.height,
        ball_half_size: config.ball.half_size(),
    };

    let mut release_serve = false;

    for (_entity, (slot, paddle, control)) in
        world.query_mut::<(&PlayerSlot, &mut Paddle, &mut Control)>()
    {
        let keys = input.player(slot.id);

        let active = if keys.ai {
            if !control.is_ai() {
                let skill = Skill::from_score_gap(score.deficit(slot.id), &config.ai);
                *control = Control::Autonomous(AiController::new(slot.id, skill, time.now_ms, rng));
                debug!(player = ?slot.id, "control handed back to AI");
            }
            true
        } else if keys.up || keys.down {
            if control.is_ai() {
                *control = Control::Human;
                debug!(player = ?slot.id, "human took control");
            }
            paddle.step(if keys.up { -1 } else { 1 }, paddle.speed);
            true
        } else if let Control::Autonomous(ai) = control {
            let own = *paddle;
            let view = AiView {
                ball: &ball,
                paddle: &own,
                court,
                now_ms: time.now_ms,
            };
            let movement = ai.decide(&view, rng);
            paddle.step(movement.direction.dir(), movement.step);
            true
        } else {
            false
        };

        if active && match_state.awaits_release_from(slot.id) {
            release_serve = true;
        }
    }

    release_serve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_player, find_paddle, LogicalKey, PlayerId, RallyPhase};
    use glam::Vec2;
    use proptest::prelude::*;

    struct Fixture {
        world: World,
        config: Config,
        time: Time,
        score: Score,
        state: MatchState,
        rng: GameRng,
    }

    fn setup(ai: bool) -> Fixture {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let mut world = World::new();
        for player in PlayerId::ALL {
            let control = if ai {
                Control::Autonomous(AiController::new(player, Skill::MAX, 0, &mut rng))
            } else {
                Control::Human
            };
            create_player(&mut world, player, config.spawn_paddle(player), control);
        }
        create_ball(
            &mut world,
            Ball::new(Vec2::new(400.0, 100.0), Vec2::new(5.0, 0.0), config.ball.speed),
        );
        Fixture {
            world,
            config,
            time: Time::new(0),
            score: Score::new(),
            state: MatchState::new(),
            rng,
        }
    }

    fn run(f: &mut Fixture, input: InputSnapshot) -> bool {
        apply_controls(
            &mut f.world,
            &input,
            &f.time,
            &f.score,
            &f.state,
            &f.config,
            &mut f.rng,
        )
    }

    fn paddle_y(world: &World, player: PlayerId) -> f32 {
        find_paddle(world, player).expect("paddle").y
    }

    fn is_ai(world: &World, player: PlayerId) -> bool {
        world
            .query::<(&PlayerSlot, &Control)>()
            .iter()
            .find(|(_e, (slot, _))| slot.id == player)
            .map(|(_e, (_, control))| control.is_ai())
            .unwrap_or(false)
    }

    #[test]
    fn test_human_key_takes_over_and_moves() {
        let mut f = setup(true);
        let start = paddle_y(&f.world, PlayerId::One);

        run(&mut f, InputSnapshot::from_keys([LogicalKey::Up1]));

        assert!(!is_ai(&f.world, PlayerId::One), "Up key switches to human");
        assert!(is_ai(&f.world, PlayerId::Two));
        assert_eq!(paddle_y(&f.world, PlayerId::One), start - 8.0);
    }

    #[test]
    fn test_ai_key_hands_back_without_moving() {
        let mut f = setup(false);
        let start = paddle_y(&f.world, PlayerId::Two);

        run(&mut f, InputSnapshot::from_keys([LogicalKey::Ai2, LogicalKey::Down2]));

        assert!(is_ai(&f.world, PlayerId::Two), "AI key has priority");
        assert_eq!(paddle_y(&f.world, PlayerId::Two), start);
    }

    #[test]
    fn test_idle_human_paddle_stays_put() {
        let mut f = setup(false);
        let start = paddle_y(&f.world, PlayerId::One);

        let released = run(&mut f, InputSnapshot::new());

        assert_eq!(paddle_y(&f.world, PlayerId::One), start);
        assert!(!released, "Nobody was active");
    }

    #[test]
    fn test_receiver_input_releases_serve() {
        let mut f = setup(false);
        // Player one serves; only player two's input counts
        assert!(!run(&mut f, InputSnapshot::from_keys([LogicalKey::Down1])));
        assert!(run(&mut f, InputSnapshot::from_keys([LogicalKey::Down2])));
    }

    #[test]
    fn test_receiver_ai_releases_serve() {
        let mut f = setup(true);
        assert!(run(&mut f, InputSnapshot::new()));

        f.state.phase = RallyPhase::Playing;
        assert!(!run(&mut f, InputSnapshot::new()), "Nothing to release while playing");
    }

    #[test]
    fn test_ai_tracks_ball() {
        let mut f = setup(true);
        f.state.phase = RallyPhase::Playing;
        let start = paddle_y(&f.world, PlayerId::Two);

        for tick in 1..=20u64 {
            f.time.advance(tick * 16);
            run(&mut f, InputSnapshot::new());
        }

        assert!(
            paddle_y(&f.world, PlayerId::Two) < start,
            "Right AI should climb toward a ball at y=100"
        );
    }

    #[test]
    fn test_update_skills_follows_score() {
        let mut f = setup(true);
        f.score.player1 = 3;

        update_skills(&mut f.world, &f.score, &f.config, &mut f.rng);

        for (_e, (slot, control)) in f.world.query::<(&PlayerSlot, &Control)>().iter() {
            let skill = control.ai().expect("ai").skill().value();
            match slot.id {
                PlayerId::One => assert!((skill - 0.25).abs() < 1e-6),
                PlayerId::Two => assert_eq!(skill, 1.0),
            }
        }
    }

    fn key_strategy() -> impl Strategy<Value = Vec<LogicalKey>> {
        prop::collection::vec(
            prop::sample::select(vec![
                LogicalKey::Up1,
                LogicalKey::Down1,
                LogicalKey::Ai1,
                LogicalKey::Up2,
                LogicalKey::Down2,
                LogicalKey::Ai2,
            ]),
            0..3,
        )
    }

    proptest! {
        /// Paddles never leave [min_y, max_y], whoever steers them
        #[test]
        fn prop_paddles_stay_in_bounds(
            ticks in prop::collection::vec(key_strategy(), 1..300),
            ball_y in 0.0f32..594.0,
        ) {
            let mut f = setup(true);
            f.state.phase = RallyPhase::Playing;
            for (_e, ball) in f.world.query_mut::<&mut Ball>() {
                ball.pos.y = ball_y;
            }

            for (tick, keys) in ticks.into_iter().enumerate() {
                f.time.advance(tick as u64 * 16);
                run(&mut f, InputSnapshot::from_keys(keys));
                for player in PlayerId::ALL {
                    let paddle = find_paddle(&f.world, player).expect("paddle");
                    prop_assert!(paddle.min_y <= paddle.y && paddle.y <= paddle.max_y);
                }
            }
        }
    }
}
