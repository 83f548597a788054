use rl2048_engine::{Board, GameState};
use serde::{Deserialize, Serialize};

/// Score and board at one point of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub score: u64,
    pub board: Board,
}

/// Verbose record of one game: the initial state, then the state after every move and spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    frames: Vec<ReplayFrame>,
}

impl ReplayLog {
    /// Starts a log with `initial` as its first frame.
    #[must_use]
    pub fn new(initial: &GameState) -> Self {
        let mut log = Self { frames: vec![] };
        log.record(initial);
        log
    }

    pub fn record(&mut self, state: &GameState) {
        self.frames.push(ReplayFrame {
            score: state.score(),
            board: state.board().clone(),
        });
    }

    #[must_use]
    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    /// Number of moves recorded (one less than the number of frames).
    #[must_use]
    pub fn moves(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    #[must_use]
    pub fn last(&self) -> Option<&ReplayFrame> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests {
    use rl2048_engine::{Action, ScriptedTileSource};

    use super::*;

    #[test]
    fn test_records_initial_state_and_each_step() {
        let mut tiles = ScriptedTileSource::new([(0, 1), (0, 1), (0, 1)]);
        let mut state = GameState::new(2, &mut tiles);
        let mut log = ReplayLog::new(&state);

        state.do_action(Action::Right);
        state.add_random_tile(&mut tiles);
        log.record(&state);

        assert_eq!(log.frames().len(), 2);
        assert_eq!(log.moves(), 1);
        assert_eq!(log.frames()[0].score, 0);
        assert_eq!(log.frames()[1].score, 4);
        assert_eq!(log.last().unwrap().board, *state.board());
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::with_score(
            Board::from_rows(vec![vec![1, 0], vec![0, 2]]).unwrap(),
            12,
        );
        let log = ReplayLog::new(&state);
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"frames":[{"score":12,"board":[[1,0],[0,2]]}]}"#);
    }
}
