use chrono::{DateTime, Utc};
use rl2048_agent::agent::{Agent, AgentSnapshot};
use rl2048_engine::Seed;
use serde::{Deserialize, Serialize};

/// Model file: a named, timestamped agent snapshot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Episodes trained in total, including resumed runs.
    pub episodes: usize,
    #[serde(flatten)]
    pub snapshot: AgentSnapshot,
}

impl AgentModel {
    pub(crate) fn new(name: String, episodes: usize, agent: &Agent) -> Self {
        Self {
            name,
            trained_at: Utc::now(),
            episodes,
            snapshot: agent.snapshot(),
        }
    }

    pub(crate) fn to_agent(&self, seed: Seed) -> anyhow::Result<Agent> {
        let agent = Agent::from_snapshot(self.snapshot.clone(), seed)?;
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use rl2048_agent::config::{AgentConfig, Algorithm};

    use super::*;

    #[test]
    fn test_model_file_roundtrip() {
        let config = AgentConfig {
            board_size: 2,
            max_exponent: 4,
            ..AgentConfig::defaults_for(Algorithm::QLearning)
        };
        let agent = Agent::new(config, Seed::from_u64(0)).unwrap();
        let model = AgentModel::new(agent.tag(), 10, &agent);

        let json = serde_json::to_string(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "q_learning_rowcolblock_a025e0001g9999");
        assert_eq!(value["episodes"], 10);
        assert_eq!(value["config"]["algorithm"], "q_learning");
        assert_eq!(value["table"].as_array().unwrap().len(), (2 * 2 * 25 + 625) * 4);

        let parsed: AgentModel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.snapshot, model.snapshot);
        assert_eq!(parsed.to_agent(Seed::from_u64(1)).unwrap().snapshot(), agent.snapshot());
    }
}
