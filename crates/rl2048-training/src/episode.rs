//! Playing single episodes.

use std::mem;

use rl2048_agent::{agent::Agent, transition::Transition};
use rl2048_engine::{Action, Board, GameState, TileSource};

use crate::replay::ReplayLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOptions {
    /// Feed every transition to the agent.
    pub learn: bool,
    /// Keep a [`ReplayLog`] of the game.
    pub record_replay: bool,
    /// Stop after this many moves even if the game is not over.
    pub move_limit: Option<usize>,
}

impl Default for EpisodeOptions {
    fn default() -> Self {
        Self {
            learn: true,
            record_replay: false,
            move_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub score: u64,
    pub moves: usize,
    /// Value of the highest tile, e.g. 2048.
    pub max_tile: u64,
    pub game_over: bool,
    pub replay: Option<ReplayLog>,
}

/// A game in progress, tracking the previous afterstate between moves.
#[derive(Debug, Clone)]
pub struct Episode {
    state: GameState,
    prev_meta: Board,
    moves: usize,
}

impl Episode {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        let prev_meta = state.board().clone();
        Self {
            state,
            prev_meta,
            moves: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Plays the move `agent` chooses, `None` when the game is over.
    pub fn step(&mut self, agent: &mut Agent, tiles: impl TileSource) -> Option<Transition> {
        let action = agent.choose_action(self.state.board())?;
        Some(self.step_with(action, tiles))
    }

    /// Plays `action`, spawns a tile and returns the resulting transition.
    ///
    /// # Panics
    ///
    /// Panics if `action` is not available.
    pub fn step_with(&mut self, action: Action, mut tiles: impl TileSource) -> Transition {
        let prev_state = self.state.board().clone();
        let reward = self.state.do_action(action);
        let meta = self.state.board().clone();
        self.state.add_random_tile(&mut tiles);
        self.moves += 1;

        let prev_meta = mem::replace(&mut self.prev_meta, meta.clone());
        Transition::new(
            prev_state,
            prev_meta,
            action,
            reward,
            meta,
            self.state.board().clone(),
        )
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}

/// Plays one full game with `agent` choosing every move.
pub fn play_episode(
    agent: &mut Agent,
    tiles: &mut impl TileSource,
    options: &EpisodeOptions,
) -> EpisodeOutcome {
    agent.begin_episode();
    let state = GameState::new(agent.config().board_size, &mut *tiles);
    let mut episode = Episode::new(state);
    let mut replay = options
        .record_replay
        .then(|| ReplayLog::new(episode.state()));

    while options
        .move_limit
        .is_none_or(|limit| episode.moves() < limit)
    {
        let Some(transition) = episode.step(agent, &mut *tiles) else {
            break;
        };
        if options.learn {
            agent.learn(&transition);
        }
        if let Some(replay) = &mut replay {
            replay.record(episode.state());
        }
    }

    let moves = episode.moves();
    let state = episode.into_state();
    let outcome = EpisodeOutcome {
        score: state.score(),
        moves,
        max_tile: 1 << state.board().max_exponent(),
        game_over: state.is_game_over(),
        replay,
    };
    log::debug!(
        "episode finished: score={} moves={} max_tile={}",
        outcome.score,
        outcome.moves,
        outcome.max_tile
    );
    outcome
}
