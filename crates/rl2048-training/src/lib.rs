//! Episode driver and training loops for n-tuple 2048 agents.
//!
//! An episode alternates between the agent and the engine:
//!
//! ```text
//! choose action → move (reward, afterstate) → spawn tile → Transition → Agent::learn
//! ```
//!
//! - [`episode`]: one game, optionally learning and recording a [`replay::ReplayLog`]
//! - [`trainer`]: many learning episodes, best-of-N evaluation
//! - [`score_history`]: per-episode scores, rolling averages and the one-score-per-line file format
//!
//! # Example
//!
//! ```
//! use rl2048_agent::{agent::Agent, config::{AgentConfig, Algorithm}};
//! use rl2048_engine::{Seed, TileSpawner};
//! use rl2048_training::trainer::{TrainingOptions, train};
//!
//! let config = AgentConfig {
//!     board_size: 3,
//!     ..AgentConfig::defaults_for(Algorithm::TdZero)
//! };
//! let mut agent = Agent::new(config, Seed::from_u64(1)).unwrap();
//! let mut tiles = TileSpawner::with_seed(Seed::from_u64(2));
//! let options = TrainingOptions { episodes: 3, move_limit: None };
//! let history = train(&mut agent, &mut tiles, &options, |_, _| {});
//! assert_eq!(history.len(), 3);
//! ```

pub mod episode;
pub mod replay;
pub mod score_history;
pub mod trainer;
