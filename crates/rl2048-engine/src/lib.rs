//! Game engine for 2048.
//!
//! - [`core`] holds the pure data structures: [`Board`], [`Action`] and the single-line
//!   compaction rule every move is built from.
//! - [`engine`] holds the stateful parts: [`GameState`] (board + score), tile sources and
//!   the [`Seed`] used to make spawning reproducible.
//!
//! # Example
//!
//! ```
//! use rl2048_engine::{GameState, Seed, TileSpawner};
//!
//! let mut tiles = TileSpawner::with_seed(Seed::from_u64(7));
//! let mut state = GameState::new(4, &mut tiles);
//!
//! while let Some(&action) = state.available_actions().first() {
//!     state.do_action(action);
//!     state.add_random_tile(&mut tiles);
//! }
//!
//! assert!(state.is_game_over());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("board size must be at least {min}, got {size}")]
    TooSmall { size: usize, min: usize },
    #[display("board must be square: row {row} has {actual} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("exponent {exponent} at ({row}, {col}) exceeds the maximum of {max}")]
    ExponentTooLarge {
        row: usize,
        col: usize,
        exponent: u8,
        max: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown action `{name}` (expected left, up, right or down)")]
pub struct ParseActionError {
    name: String,
}
