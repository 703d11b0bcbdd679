/// Game tuning parameters for Pongdriaan
///
/// Distances are in pixels and speeds in pixels per tick. Times are in
/// milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (800x600 canvas minus one gridline)
    pub const GRIDLINE: f32 = 6.0;
    pub const ARENA_WIDTH: f32 = 800.0 - Self::GRIDLINE;
    pub const ARENA_HEIGHT: f32 = 600.0 - Self::GRIDLINE;

    // Ball
    pub const BALL_SIZE: f32 = 2.0 * Self::GRIDLINE;
    pub const BALL_SPEED: f32 = 5.0;
    pub const SPIN_FACTOR: f32 = 0.1;
    pub const SERVE_OFFSET: f32 = 20.0;
    pub const SERVE_HALF_ANGLE_DEG: f32 = 30.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = Self::BALL_SIZE + Self::GRIDLINE * 2.0;
    pub const PADDLE_HEIGHT: f32 = Self::BALL_SIZE * 8.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    pub const PADDLE_BUFFER: f32 = Self::BALL_SIZE * 2.0;
    pub const LEFT_COLUMN_X: f32 = 60.0;
    pub const RIGHT_COLUMN_INSET: f32 = 70.0;

    // AI
    pub const LAZINESS: f32 = 5.0;
    pub const COMPETITIVENESS: f32 = 3.0;
    pub const AI_DEADBAND: f32 = 10.0;
    pub const AI_TRACKING_ERROR: f32 = 20.0;
    pub const PREDICTION_MAX_STEPS: u32 = 1000;
    pub const BOUNCE_MISTAKE_WEIGHT: f32 = 0.4;
}
