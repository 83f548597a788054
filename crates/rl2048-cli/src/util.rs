use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use rl2048_training::score_history::ScoreHistory;

use crate::schema::agent_model::AgentModel;

/// Opens `path` for writing, or stdout when there is no path.
fn open_output(path: Option<&Path>, append: bool) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout().lock()));
    };
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn output_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "stdout".to_owned(), |path| path.display().to_string())
}

/// Writes `value` as pretty JSON to `path`, or to stdout.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut output = open_output(path, false)?;
    serde_json::to_writer_pretty(&mut output, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(output))
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to write JSON to {}", output_name(path)))
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn read_model_file<P>(path: P) -> anyhow::Result<AgentModel>
where
    P: AsRef<Path>,
{
    read_json_file("model", path)
}

pub fn read_scores_file<P>(path: P) -> anyhow::Result<ScoreHistory>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open scores file: {}", path.display()))?;
    ScoreHistory::read_from(BufReader::new(file))
        .with_context(|| format!("Failed to parse scores file: {}", path.display()))
}

/// Writes `history` one score per line, after any existing scores when `append` is set.
pub fn write_scores_file(path: &Path, history: &ScoreHistory, append: bool) -> anyhow::Result<()> {
    let output = open_output(Some(path), append)?;
    history
        .write_to(output)
        .with_context(|| format!("Failed to write scores to {}", path.display()))
}
