use serde::{Deserialize, Serialize};

use super::TileSource;
use crate::{Action, ActionSet, Board};

/// A tile placed by [`GameState::add_random_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub exponent: u8,
}

/// Board plus cumulative score.
///
/// A turn is split into [`Self::do_action`] (the move, yielding the afterstate) and
/// [`Self::add_random_tile`] (the spawn, yielding the next state). The state is `Clone` but
/// not `Copy`; snapshots are always explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    score: u64,
}

impl GameState {
    pub const INITIAL_TILES: usize = 2;

    /// Creates an empty `size`×`size` board with two spawned tiles.
    ///
    /// # Panics
    ///
    /// Panics if `size` is smaller than [`Board::MIN_SIZE`].
    pub fn new(size: usize, tiles: &mut impl TileSource) -> Self {
        let mut state = Self::from_board(Board::empty(size));
        for _ in 0..Self::INITIAL_TILES {
            state.add_random_tile(&mut *tiles);
        }
        state
    }

    /// Starts from `board` with a score of 0.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self::with_score(board, 0)
    }

    #[must_use]
    pub fn with_score(board: Board, score: u64) -> Self {
        Self { board, score }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn available_actions(&self) -> ActionSet {
        self.board.available_actions()
    }

    #[must_use]
    pub fn is_action_available(&self, action: Action) -> bool {
        self.board.can_shift(action)
    }

    /// Applies `action`, adds the merge reward to the score and returns it.
    ///
    /// No tile is spawned; call [`Self::add_random_tile`] afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `action` is not available.
    pub fn do_action(&mut self, action: Action) -> u64 {
        assert!(
            self.is_action_available(action),
            "action {action} is not available on\n{}",
            self.board
        );
        let reward = self.board.shift(action);
        self.score = self.score.saturating_add(reward);
        reward
    }

    /// Places a new tile on an empty cell chosen by `tiles`.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell.
    pub fn add_random_tile(&mut self, mut tiles: impl TileSource) -> SpawnedTile {
        let empty: Vec<_> = self.board.empty_cells().collect();
        assert!(!empty.is_empty(), "no empty cell to spawn a tile on");

        let (row, col) = empty[tiles.pick_cell(empty.len())];
        let exponent = tiles.pick_exponent();
        self.board.set(row, col, exponent);
        SpawnedTile { row, col, exponent }
    }

    /// Returns `true` if no action is available.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.available_actions().is_empty()
    }
}
