//! Stateful game logic.
//!
//! - [`GameState`] - board plus cumulative score, advanced by `do_action` and
//!   `add_random_tile`
//! - [`TileSource`] - where spawned tiles come from; [`TileSpawner`] is the seeded random
//!   source, [`ScriptedTileSource`] replays fixed picks
//! - [`Seed`] - 128-bit seed for reproducible spawning and exploration
//!
//! A move and the following spawn are separate steps so that learners can observe the
//! afterstate (the board right after the move, before the spawn).

pub use self::{game_state::*, seed::*, tile_source::*};

mod game_state;
mod seed;
mod tile_source;
