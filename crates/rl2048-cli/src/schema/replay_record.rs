use rl2048_training::{episode::EpisodeOutcome, replay::ReplayLog};
use serde::{Deserialize, Serialize};

/// Replay file written by `rl2048 play`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayRecord {
    pub model: String,
    pub trials: usize,
    pub score: u64,
    pub moves: usize,
    pub max_tile: u64,
    pub replay: ReplayLog,
}

impl ReplayRecord {
    pub(crate) fn new(model: String, trials: usize, outcome: EpisodeOutcome) -> Option<Self> {
        let EpisodeOutcome {
            score,
            moves,
            max_tile,
            replay,
            ..
        } = outcome;
        Some(Self {
            model,
            trials,
            score,
            moves,
            max_tile,
            replay: replay?,
        })
    }
}
