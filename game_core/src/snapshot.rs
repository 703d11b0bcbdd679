//! Read-only views for the renderer and scoreboard

use hecs::World;

use crate::{
    find_paddle, Ball, Control, ControlReadout, MatchState, Paddle, PlayerId, PlayerSlot, Score,
};

/// Copy of everything a renderer draws in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub ball: Ball,
    pub paddles: [Paddle; 2],
    pub score: Score,
    pub state: MatchState,
    pub controls: [ControlReadout; 2],
}

/// Scoreboard label per player, indexed by `PlayerId::index`
pub fn control_readouts(world: &World) -> [ControlReadout; 2] {
    let mut readouts = [ControlReadout::Human; 2];
    for (_entity, (slot, control)) in world.query::<(&PlayerSlot, &Control)>().iter() {
        if let Some(ai) = control.ai() {
            readouts[slot.id.index()] = ControlReadout::Ai(ai.skill().value());
        }
    }
    readouts
}

/// Capture the current frame; `None` until the ball and both paddles exist
pub fn capture(
    world: &World,
    tick: u64,
    score: &Score,
    state: &MatchState,
) -> Option<MatchSnapshot> {
    let ball = {
        let mut query = world.query::<&Ball>();
        query.iter().next().map(|(_e, ball)| *ball)
    }?;
    let paddles = [
        find_paddle(world, PlayerId::One)?,
        find_paddle(world, PlayerId::Two)?,
    ];

    Some(MatchSnapshot {
        tick,
        ball,
        paddles,
        score: *score,
        state: *state,
        controls: control_readouts(world),
    })
}
