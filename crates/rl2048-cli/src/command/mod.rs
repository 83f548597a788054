use clap::{Parser, Subcommand};
use rand::Rng as _;
use rl2048_engine::Seed;

use self::{play::PlayArg, predict::PredictArg, scores::ScoresArg, train::TrainArg};

mod play;
mod predict;
mod scores;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train a new agent or continue training a saved one
    Train(#[clap(flatten)] TrainArg),
    /// Play best-of-N games with a saved agent and write the best replay
    Play(#[clap(flatten)] PlayArg),
    /// Print per-action confidence of a saved agent for a board
    Predict(#[clap(flatten)] PredictArg),
    /// Summarize a scores file
    Scores(#[clap(flatten)] ScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Predict(arg) => predict::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
    }
    Ok(())
}

/// Independent seeds for the agent's exploration and the tile spawner.
fn seeds(seed: Option<u64>) -> (Seed, Seed) {
    match seed {
        Some(seed) => {
            let mut rng = Seed::from_u64(seed).rng();
            (rng.random(), rng.random())
        }
        None => {
            let mut rng = rand::rng();
            (rng.random(), rng.random())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        assert_eq!(seeds(Some(3)), seeds(Some(3)));
        let (agent, tiles) = seeds(Some(3));
        assert_ne!(agent, tiles);
    }
}
