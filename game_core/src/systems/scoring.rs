use crate::{
    control_readouts, place_ball_for_serve, update_skills, Ball, Config, Control, Events,
    GameRng, MatchState, PlayerId, Score, ScoreUpdate, Time,
};
use hecs::World;
use tracing::info;

/// Check if ball left the arena (scoring)
#[allow(clippy::too_many_arguments)]
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    time: &Time,
    score: &mut Score,
    match_state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let ball_x = {
        let mut query = world.query::<&Ball>();
        query.iter().next().map(|(_e, ball)| ball.pos.x)
    };

    let scorer = match ball_x {
        Some(x) if x <= 0.0 => PlayerId::Two,
        Some(x) if x >= config.arena.width => PlayerId::One,
        _ => return,
    };

    score.increment(scorer);
    match_state.serving = scorer;
    place_ball_for_serve(world, config, match_state);

    // New rally for both controllers
    for (_entity, control) in world.query_mut::<&mut Control>() {
        if let Some(ai) = control.ai_mut() {
            ai.reset(time.now_ms, rng);
        }
    }

    // Scoreboard gets the skill implied by the new score
    update_skills(world, score, config, rng);
    let controls = control_readouts(world);

    info!(
        ?scorer,
        player1 = score.player1,
        player2 = score.player2,
        p1 = %controls[0],
        p2 = %controls[1],
        "point scored"
    );

    events.scored = Some(ScoreUpdate {
        scorer,
        score: *score,
        controls,
    });
}
