use std::{
    io::{self, Read as _},
    path::PathBuf,
};

use anyhow::{Context as _, ensure};
use rl2048_engine::Board;

use crate::{service::ModelService, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Model file to query
    #[arg(long)]
    model: PathBuf,
    /// Board as a JSON array of rows of exponents, e.g. `[[1,0],[0,2]]`; read from stdin if omitted
    #[arg(conflicts_with = "ping")]
    board: Option<String>,
    /// Only check that the model loads
    #[arg(long)]
    ping: bool,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let service = ModelService::new(arg.model.clone());
    if arg.ping {
        ensure!(
            service.ping(),
            "Model {} failed to load",
            arg.model.display()
        );
        eprintln!("Model {} is healthy", arg.model.display());
        return Ok(());
    }

    let board = match &arg.board {
        Some(text) => parse_board(text)?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read board from stdin")?;
            parse_board(&text)?
        }
    };

    let confidence = service.predict(&board)?;
    util::save_json(&confidence, None)?;
    Ok(())
}

fn parse_board(text: &str) -> anyhow::Result<Board> {
    serde_json::from_str(text).context("Failed to parse board JSON")
}
