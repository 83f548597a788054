//! Load-once prediction service.

use std::{
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock, PoisonError},
};

use rl2048_agent::agent::{ActionConfidence, Agent};
use rl2048_engine::{Board, Seed};

use crate::util;

/// Answers per-action confidence queries for the model stored at `path`.
///
/// The model is read on first use and never reloaded. Concurrent first callers wait for a
/// single load.
#[derive(Debug)]
pub struct ModelService {
    path: PathBuf,
    model: OnceLock<Agent>,
    loading: Mutex<()>,
}

impl ModelService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            model: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    pub fn get_model(&self) -> anyhow::Result<&Agent> {
        self.get_or_load(load_agent)
    }

    fn get_or_load<F>(&self, load: F) -> anyhow::Result<&Agent>
    where
        F: FnOnce(&Path) -> anyhow::Result<Agent>,
    {
        if let Some(agent) = self.model.get() {
            return Ok(agent);
        }
        let _loading = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(agent) = self.model.get() {
            return Ok(agent);
        }
        let agent = load(&self.path)?;
        Ok(self.model.get_or_init(|| agent))
    }

    /// `true` once the model has been loaded successfully.
    pub fn ping(&self) -> bool {
        self.get_model().is_ok()
    }

    pub fn predict(&self, board: &Board) -> anyhow::Result<ActionConfidence> {
        let confidence = self.get_model()?.predict(board)?;
        Ok(confidence)
    }
}

fn load_agent(path: &Path) -> anyhow::Result<Agent> {
    let model = util::read_model_file(path)?;
    let agent = model.to_agent(Seed::from_u64(0))?;
    log::info!("loaded model {} from {}", model.name, path.display());
    Ok(agent)
}
