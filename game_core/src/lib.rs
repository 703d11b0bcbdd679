//! Simulation and decision engine for Pongdriaan
//!
//! Deterministic, fixed-step: one call to [`step`] is one frame. The ball,
//! both paddles and their controllers live in a `hecs::World`; everything
//! else is passed in as a resource.

pub mod ai;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use ai::*;
pub use components::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use input::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;
pub use systems::*;

use hecs::World;

/// Run one tick of the match simulation
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    input: &InputSnapshot,
    score: &mut Score,
    match_state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Skill follows the live score gap
    update_skills(world, score, config, rng);

    // 2. Human input or AI moves each paddle; the receiver may release the serve
    if apply_controls(world, input, time, score, match_state, config, rng) {
        serve_ball(world, config, match_state, events, rng);
    }

    // Ball stays frozen while waiting for a serve
    if match_state.phase != RallyPhase::Playing {
        return;
    }

    // 3. Move ball
    move_ball(world);

    // 4. Check collisions (ball vs walls, paddles)
    check_collisions(world, config, events);

    // 5. Check scoring (ball exited arena) and set up the next serve
    check_scoring(world, config, time, score, match_state, events, rng);
}

/// Helper to create a player entity
pub fn create_player(
    world: &mut World,
    id: PlayerId,
    paddle: Paddle,
    control: Control,
) -> hecs::Entity {
    world.spawn((PlayerSlot { id }, paddle, control))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

/// Copy of a player's paddle
pub fn find_paddle(world: &World, player: PlayerId) -> Option<Paddle> {
    world
        .query::<(&PlayerSlot, &Paddle)>()
        .iter()
        .find(|(_e, (slot, _))| slot.id == player)
        .map(|(_e, (_, paddle))| *paddle)
}
