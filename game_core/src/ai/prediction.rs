use crate::{Ball, Paddle, Params, PlayerId};

/// Vertical extent the ball bounces between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Court {
    pub height: f32,
    pub ball_half_size: f32,
}

impl Court {
    pub fn top(&self) -> f32 {
        self.ball_half_size
    }

    pub fn bottom(&self) -> f32 {
        self.height - self.ball_half_size
    }
}

/// Predict the ball's y when it reaches the paddle's face
///
/// Steps the ball one velocity at a time, reflecting off the walls. A ball
/// heading away from the paddle predicts its current y. Gives up after
/// `Params::PREDICTION_MAX_STEPS` steps and returns the last simulated y.
pub fn predict_interception(ball: &Ball, paddle: &Paddle, player: PlayerId, court: &Court) -> f32 {
    if !player.is_incoming(ball.vel.x) {
        return ball.pos.y;
    }

    let face_x = match player {
        PlayerId::One => paddle.column_x + paddle.width,
        PlayerId::Two => paddle.column_x,
    };
    let reached = |x: f32| match player {
        PlayerId::One => x <= face_x,
        PlayerId::Two => x >= face_x,
    };

    let mut pos = ball.pos;
    let mut vel = ball.vel;
    for _ in 0..Params::PREDICTION_MAX_STEPS {
        if reached(pos.x) {
            break;
        }

        pos += vel;

        if pos.y <= court.top() || pos.y >= court.bottom() {
            vel.y = -vel.y;
            pos.y = pos.y.clamp(court.top(), court.bottom());
        }
    }

    pos.y
}
