use crate::{find_paddle, Ball, Config, Events, GameRng, MatchState, RallyPhase};
use glam::Vec2;
use hecs::World;
use rand::Rng;
use tracing::debug;

/// Freeze the ball at the server's paddle and wait for the receiver
pub fn place_ball_for_serve(world: &mut World, config: &Config, match_state: &mut MatchState) {
    let server = match_state.serving;
    match_state.phase = RallyPhase::Serving;

    let Some(paddle) = find_paddle(world, server) else {
        return;
    };

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = paddle.serve_position(server, config.ball.serve_offset);
        ball.vel = Vec2::new(ball.speed * server.serve_direction(), 0.0);
    }
}

/// Release a waiting serve at a random angle within the serve cone
pub fn serve_ball(
    world: &mut World,
    config: &Config,
    match_state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    if match_state.phase != RallyPhase::Serving {
        return;
    }
    match_state.phase = RallyPhase::Playing;

    let half_angle = config.ball.serve_half_angle_deg;
    let angle = rng.0.gen_range(-half_angle..=half_angle).to_radians();
    let direction = match_state.serving.serve_direction();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let base = ball.speed * direction;
        ball.vel = Vec2::new(base * angle.cos(), base * angle.sin());
        debug!(server = ?match_state.serving, vel = ?ball.vel, "serve released");
    }
    events.served = true;
}
