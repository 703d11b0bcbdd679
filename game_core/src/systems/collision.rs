use crate::{Ball, Config, Events, Paddle, PlayerId, PlayerSlot};
use hecs::World;
use tracing::trace;

/// Bounce off the top/bottom walls by flipping vertical velocity
///
/// The ball is not pushed back inside, so it may sit past the wall for one
/// tick before the flipped velocity carries it back.
pub fn reflect_off_walls(ball: &mut Ball, arena_height: f32, ball_half_size: f32) -> bool {
    if ball.pos.y <= ball_half_size || ball.pos.y >= arena_height - ball_half_size {
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// Bounce the ball off one paddle, adding spin from the hit offset
///
/// Only fires while the ball travels toward this paddle's side, overlaps its
/// column horizontally, and has its centre within the paddle's vertical span.
/// Spin is unbounded, so repeated off-centre hits keep steepening the angle.
pub fn resolve_paddle_collision(
    player: PlayerId,
    paddle: &Paddle,
    ball: &mut Ball,
    ball_half_size: f32,
    spin_factor: f32,
) -> bool {
    let left = ball.pos.x - ball_half_size;
    let right = ball.pos.x + ball_half_size;
    let column_right = paddle.column_x + paddle.width;

    let hit = player.is_incoming(ball.vel.x)
        && right >= paddle.column_x
        && left <= column_right
        && ball.pos.y >= paddle.y
        && ball.pos.y <= paddle.y + paddle.height;

    if hit {
        ball.vel.x = -ball.vel.x;
        ball.vel.y += (ball.pos.y - paddle.center_y()) * spin_factor;
    }
    hit
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    // Collect paddles first so the ball can be borrowed mutably below
    let paddles: Vec<(PlayerId, Paddle)> = world
        .query::<(&PlayerSlot, &Paddle)>()
        .iter()
        .map(|(_e, (slot, paddle))| (slot.id, *paddle))
        .collect();

    let half = config.ball.half_size();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if reflect_off_walls(ball, config.arena.height, half) {
            events.ball_hit_wall = true;
        }

        for (player, paddle) in &paddles {
            if resolve_paddle_collision(*player, paddle, ball, half, config.ball.spin_factor) {
                trace!(?player, vel = ?ball.vel, "paddle hit");
                events.ball_hit_paddle = Some(*player);
            }
        }
    }
}
