use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use rl2048_engine::TileSpawner;
use rl2048_training::{episode::EpisodeOptions, trainer::best_of};

use crate::{
    schema::replay_record::ReplayRecord,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Model file to play with
    #[arg(long)]
    model: PathBuf,
    /// Number of games to play; the highest-scoring one is kept
    #[arg(long, default_value_t = 10)]
    trials: usize,
    /// Keep learning while playing
    #[arg(long)]
    learn: bool,
    /// Override the model's exploration rate
    #[arg(long)]
    epsilon: Option<f64>,
    /// Stop each game after this many moves
    #[arg(long)]
    max_moves: Option<usize>,
    /// Seed for exploration and tile spawning
    #[arg(long)]
    seed: Option<u64>,
    /// Output replay file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    ensure!(arg.trials > 0, "--trials must be positive");
    let (agent_seed, tile_seed) = super::seeds(arg.seed);

    let model = util::read_model_file(&arg.model)?;
    let mut agent = model
        .to_agent(agent_seed)
        .with_context(|| format!("Failed to restore agent from {}", arg.model.display()))?;
    if let Some(epsilon) = arg.epsilon {
        agent.set_epsilon(epsilon);
    }

    let mut tiles = TileSpawner::with_seed(tile_seed);
    let options = EpisodeOptions {
        learn: arg.learn,
        record_replay: true,
        move_limit: arg.max_moves,
    };
    let best = best_of(&mut agent, &mut tiles, arg.trials, &options)
        .context("No game was played")?;
    let record = ReplayRecord::new(model.name, arg.trials, best)
        .context("Best game has no replay")?;

    eprintln!(
        "Best of {} games: score {} in {} moves, max tile {}",
        record.trials, record.score, record.moves, record.max_tile
    );
    util::save_json(&record, arg.output.as_deref())?;
    Ok(())
}
