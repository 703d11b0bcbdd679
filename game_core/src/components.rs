use glam::Vec2;

use crate::AiController;

/// Which side of the table a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    /// Left paddle, serves to the right
    One,
    /// Right paddle, serves to the left
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Horizontal sign of a serve hit by this player
    pub fn serve_direction(self) -> f32 {
        match self {
            PlayerId::One => 1.0,
            PlayerId::Two => -1.0,
        }
    }

    /// True if a ball with this horizontal velocity is heading to our side
    pub fn is_incoming(self, velocity_x: f32) -> bool {
        match self {
            PlayerId::One => velocity_x < 0.0,
            PlayerId::Two => velocity_x > 0.0,
        }
    }
}

/// Tags a player entity with its seat
#[derive(Debug, Clone, Copy)]
pub struct PlayerSlot {
    pub id: PlayerId,
}

/// Paddle component - a player's bat, sliding vertically in a fixed column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub y: f32, // Top edge
    pub height: f32,
    pub width: f32,
    pub speed: f32, // Pixels per tick
    pub column_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Paddle {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move one step up (-1) or down (+1), clamped to the legal range
    pub fn step(&mut self, dir: i8, distance: f32) {
        if dir != 0 {
            self.y = (self.y + dir.signum() as f32 * distance).clamp(self.min_y, self.max_y);
        }
    }

    /// Where a ball sits while this paddle's owner waits to serve
    pub fn serve_position(&self, player: PlayerId, serve_offset: f32) -> Vec2 {
        let x = match player {
            PlayerId::One => self.column_x + self.width + serve_offset,
            PlayerId::Two => self.column_x - serve_offset,
        };
        Vec2::new(x, self.center_y())
    }
}

/// Ball component - the one ball of the match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Serve speed; the live velocity may grow past it through spin
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, speed: f32) -> Self {
        Self { pos, vel, speed }
    }
}

/// Who steers a paddle this tick
#[derive(Debug, Clone)]
pub enum Control {
    Human,
    Autonomous(AiController),
}

impl Control {
    pub fn is_ai(&self) -> bool {
        matches!(self, Control::Autonomous(_))
    }

    pub fn ai(&self) -> Option<&AiController> {
        match self {
            Control::Autonomous(ai) => Some(ai),
            Control::Human => None,
        }
    }

    pub fn ai_mut(&mut self) -> Option<&mut AiController> {
        match self {
            Control::Autonomous(ai) => Some(ai),
            Control::Human => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle() -> Paddle {
        Paddle {
            y: 100.0,
            height: 96.0,
            width: 24.0,
            speed: 8.0,
            column_x: 60.0,
            min_y: 24.0,
            max_y: 474.0,
        }
    }

    #[test]
    fn test_paddle_step_clamps_at_top() {
        let mut paddle = paddle();
        paddle.y = 27.0;
        paddle.step(-1, paddle.speed);
        assert_eq!(paddle.y, paddle.min_y, "Paddle should stop at min_y");
    }

    #[test]
    fn test_paddle_step_clamps_at_bottom() {
        let mut paddle = paddle();
        paddle.y = 470.0;
        paddle.step(1, paddle.speed);
        assert_eq!(paddle.y, paddle.max_y, "Paddle should stop at max_y");
    }

    #[test]
    fn test_paddle_step_zero_is_noop() {
        let mut paddle = paddle();
        paddle.step(0, paddle.speed);
        assert_eq!(paddle.y, 100.0);
    }

    #[test]
    fn test_serve_positions() {
        let paddle = paddle();
        assert_eq!(
            paddle.serve_position(PlayerId::One, 20.0),
            Vec2::new(60.0 + 24.0 + 20.0, 148.0)
        );
        assert_eq!(
            paddle.serve_position(PlayerId::Two, 20.0),
            Vec2::new(40.0, 148.0)
        );
    }

    #[test]
    fn test_player_id_helpers() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.serve_direction(), -1.0);
        assert!(PlayerId::One.is_incoming(-3.0));
        assert!(!PlayerId::Two.is_incoming(-3.0));
    }
}
