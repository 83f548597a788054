use rl2048_engine::{Action, Board};

/// One observed move, as fed to [`Agent::learn`](crate::agent::Agent::learn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Full board before the move.
    pub prev_state: Board,
    /// Afterstate of the previous move; the initial board for the first move of an episode.
    pub prev_meta: Board,
    pub action: Action,
    pub reward: u64,
    /// Board right after the move, before the spawn.
    pub meta: Board,
    /// Board after the spawn.
    pub next_state: Board,
    pub terminal: bool,
}

impl Transition {
    /// Builds a transition, marking it terminal when `next_state` has no available action.
    #[must_use]
    pub fn new(
        prev_state: Board,
        prev_meta: Board,
        action: Action,
        reward: u64,
        meta: Board,
        next_state: Board,
    ) -> Self {
        let terminal = next_state.available_actions().is_empty();
        Self {
            prev_state,
            prev_meta,
            action,
            reward,
            meta,
            next_state,
            terminal,
        }
    }

    /// The reward as a value-function quantity.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn reward_value(&self) -> f64 {
        self.reward as f64
    }
}
