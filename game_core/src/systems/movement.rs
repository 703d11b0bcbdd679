use crate::Ball;
use hecs::World;

/// Integrate one fixed tick: position += velocity
pub fn advance(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        advance(ball);
    }
}
