use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use rl2048_agent::{
    agent::Agent,
    config::{AgentConfig, Algorithm},
    value_table::ValueFloor,
};
use rl2048_engine::TileSpawner;
use rl2048_training::trainer::{TrainingOptions, train};

use crate::{schema::agent_model::AgentModel, util};

const PROGRESS_WINDOW: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
enum FloorPolicy {
    None,
    Zero,
}

impl From<FloorPolicy> for ValueFloor {
    fn from(policy: FloorPolicy) -> Self {
        match policy {
            FloorPolicy::None => ValueFloor::None,
            FloorPolicy::Zero => ValueFloor::Zero,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Learning algorithm: q_learning, sarsa, td_zero or td_meta [default: td_zero]
    #[arg(long, conflicts_with_all = ["config", "resume"])]
    algorithm: Option<Algorithm>,
    /// Number of episodes to play
    #[arg(long, default_value_t = 1000)]
    episodes: usize,
    /// Learning rate
    #[arg(long)]
    alpha: Option<f64>,
    /// Discount factor
    #[arg(long)]
    gamma: Option<f64>,
    /// Exploration rate
    #[arg(long)]
    epsilon: Option<f64>,
    #[arg(long, conflicts_with = "resume")]
    board_size: Option<usize>,
    /// Largest exponent the encoder distinguishes
    #[arg(long, conflicts_with = "resume")]
    max_exponent: Option<u8>,
    /// Floor applied to updated values: none or zero
    #[arg(long)]
    value_floor: Option<FloorPolicy>,
    /// Stop each episode after this many moves
    #[arg(long)]
    max_moves: Option<usize>,
    /// Seed for exploration and tile spawning
    #[arg(long)]
    seed: Option<u64>,
    /// Agent configuration file (JSON)
    #[arg(long, conflicts_with = "resume")]
    config: Option<PathBuf>,
    /// Model file to continue training from
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Model name [default: agent tag]
    #[arg(long)]
    name: Option<String>,
    /// Output model file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// File to write per-episode scores to
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Append to the scores file instead of overwriting it
    #[arg(long, requires = "scores")]
    append: bool,
}

impl TrainArg {
    fn apply_overrides(&self, config: &mut AgentConfig) {
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(max_exponent) = self.max_exponent {
            config.max_exponent = max_exponent;
        }
        if let Some(floor) = self.value_floor {
            config.value_floor = floor.into();
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    ensure!(arg.episodes > 0, "--episodes must be positive");
    let (agent_seed, tile_seed) = super::seeds(arg.seed);

    let (mut agent, previous_episodes, previous_name) = match &arg.resume {
        Some(path) => {
            let mut model = util::read_model_file(path)?;
            arg.apply_overrides(&mut model.snapshot.config);
            let agent = model
                .to_agent(agent_seed)
                .with_context(|| format!("Failed to restore agent from {}", path.display()))?;
            log::info!(
                "resuming {} after {} episodes",
                model.name,
                model.episodes
            );
            (agent, model.episodes, Some(model.name))
        }
        None => {
            let mut config = match &arg.config {
                Some(path) => util::read_json_file("config", path)?,
                None => AgentConfig::defaults_for(arg.algorithm.unwrap_or(Algorithm::TdZero)),
            };
            arg.apply_overrides(&mut config);
            let agent = Agent::new(config, agent_seed)?;
            (agent, 0, None)
        }
    };

    let name = arg
        .name
        .clone()
        .or(previous_name)
        .unwrap_or_else(|| agent.tag());
    log::info!("training {name} for {} episodes", arg.episodes);

    let progress = ProgressBar::new(arg.episodes as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} episodes ({eta}) {msg}",
        )?
        .progress_chars("=>-"),
    );

    let mut tiles = TileSpawner::with_seed(tile_seed);
    let options = TrainingOptions {
        episodes: arg.episodes,
        move_limit: arg.max_moves,
    };
    let mut window_total = 0;
    let history = train(&mut agent, &mut tiles, &options, |i, outcome| {
        window_total += outcome.score;
        if (i + 1) % PROGRESS_WINDOW == 0 {
            progress.set_message(format!(
                "last {PROGRESS_WINDOW} mean: {}",
                window_total / PROGRESS_WINDOW as u64
            ));
            window_total = 0;
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    let model = AgentModel::new(name, previous_episodes + arg.episodes, &agent);
    util::save_json(&model, arg.output.as_deref())?;
    if let Some(path) = &arg.scores {
        util::write_scores_file(path, &history, arg.append)?;
    }

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Episodes: {}", model.episodes);
    if let Some(stats) = history.summary() {
        eprintln!("  Scores (this run):");
        eprintln!("    Min:    {:.0}", stats.min);
        eprintln!("    Max:    {:.0}", stats.max);
        eprintln!("    Mean:   {:.1}", stats.mean);
        eprintln!("    Median: {:.1}", stats.median);
    }

    Ok(())
}
