//! Multi-episode training and evaluation loops.

use rl2048_agent::agent::Agent;
use rl2048_engine::TileSource;

use crate::{
    episode::{EpisodeOptions, EpisodeOutcome, play_episode},
    score_history::ScoreHistory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingOptions {
    pub episodes: usize,
    pub move_limit: Option<usize>,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            episodes: 1000,
            move_limit: None,
        }
    }
}

/// Plays `options.episodes` learning episodes and returns their scores.
///
/// `on_episode` is called after every episode with its index and outcome.
pub fn train<F>(
    agent: &mut Agent,
    tiles: &mut impl TileSource,
    options: &TrainingOptions,
    mut on_episode: F,
) -> ScoreHistory
where
    F: FnMut(usize, &EpisodeOutcome),
{
    let episode_options = EpisodeOptions {
        learn: true,
        record_replay: false,
        move_limit: options.move_limit,
    };

    let mut history = ScoreHistory::new();
    for i in 0..options.episodes {
        let outcome = play_episode(agent, tiles, &episode_options);
        history.push(outcome.score);
        on_episode(i, &outcome);
    }

    if let Some(stats) = history.summary() {
        log::info!(
            "trained {} episodes: mean={:.1} max={:.0}",
            stats.count,
            stats.mean,
            stats.max
        );
    }
    history
}

/// Plays `trials` recorded episodes and keeps the first one with the highest score.
///
/// `options.record_replay` is forced on. Returns `None` when `trials` is zero.
pub fn best_of(
    agent: &mut Agent,
    tiles: &mut impl TileSource,
    trials: usize,
    options: &EpisodeOptions,
) -> Option<EpisodeOutcome> {
    let options = EpisodeOptions {
        record_replay: true,
        ..*options
    };
    let mut best: Option<EpisodeOutcome> = None;
    for trial in 0..trials {
        let outcome = play_episode(agent, tiles, &options);
        log::debug!("trial {trial}: score={}", outcome.score);
        if best.as_ref().is_none_or(|b| outcome.score > b.score) {
            best = Some(outcome);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use rl2048_agent::config::{AgentConfig, Algorithm};
    use rl2048_engine::{Seed, TileSpawner};

    use super::*;

    fn small_agent(algorithm: Algorithm) -> Agent {
        let config = AgentConfig {
            board_size: 3,
            max_exponent: 11,
            ..AgentConfig::defaults_for(algorithm)
        };
        Agent::new(config, Seed::from_u64(5)).unwrap()
    }

    #[test]
    fn test_train_records_every_episode() {
        for algorithm in Algorithm::ALL {
            let mut agent = small_agent(algorithm);
            let mut tiles = TileSpawner::with_seed(Seed::from_u64(6));
            let mut seen = vec![];
            let options = TrainingOptions {
                episodes: 5,
                move_limit: None,
            };
            let history = train(&mut agent, &mut tiles, &options, |i, outcome| {
                assert!(outcome.game_over);
                seen.push((i, outcome.score));
            });

            assert_eq!(history.len(), 5);
            let expected: Vec<_> = history.scores().iter().copied().enumerate().collect();
            assert_eq!(seen, expected);
            assert!(
                agent.snapshot().table.iter().any(|v| *v != 0.0),
                "{algorithm} learned nothing"
            );
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let run = || {
            let mut agent = small_agent(Algorithm::Sarsa);
            let mut tiles = TileSpawner::with_seed(Seed::from_u64(7));
            let options = TrainingOptions {
                episodes: 3,
                move_limit: None,
            };
            let history = train(&mut agent, &mut tiles, &options, |_, _| {});
            (history, agent.snapshot().table)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_best_of_keeps_highest_score() {
        let mut agent = small_agent(Algorithm::TdZero);
        let mut tiles = TileSpawner::with_seed(Seed::from_u64(8));
        let options = EpisodeOptions {
            learn: false,
            ..EpisodeOptions::default()
        };
        let best = best_of(&mut agent, &mut tiles, 4, &options).unwrap();
        let replay = best.replay.as_ref().unwrap();
        assert_eq!(replay.last().unwrap().score, best.score);

        let mut agent = small_agent(Algorithm::TdZero);
        let mut tiles = TileSpawner::with_seed(Seed::from_u64(8));
        let max = (0..4)
            .map(|_| play_episode(&mut agent, &mut tiles, &options).score)
            .max()
            .unwrap();
        assert_eq!(best.score, max);

        assert!(best_of(&mut agent, &mut tiles, 0, &options).is_none());
    }
}
