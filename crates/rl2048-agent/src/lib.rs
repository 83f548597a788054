//! Linear TD agents for 2048 built on n-tuple features.
//!
//! The crate is layered bottom-up:
//!
//! 1. **Encoding** ([`tuple_encoder`]) - maps a board to a fixed set of feature addresses
//!    ([`tuple_encoder::RowColBlock`]: rows, columns and 2×2 blocks).
//! 2. **Value storage** ([`value_table`], [`model`]) - a flat `f64` table indexed by those
//!    addresses, optionally per action; a value is the sum of the addressed entries.
//! 3. **Learning** ([`learning_rule`], [`policy`]) - Q-learning, SARSA, TD(0) and TD over
//!    meta-states, sharing one ε-greedy policy with randomized tie-breaking.
//! 4. **Agent** ([`agent`]) - ties the above together behind `choose_action`, `learn` and
//!    `predict`, and converts to and from an [`agent::AgentSnapshot`] for persistence.
//!
//! # Example
//!
//! ```
//! use rl2048_agent::{
//!     agent::Agent,
//!     config::{AgentConfig, Algorithm},
//! };
//! use rl2048_engine::{Board, Seed};
//!
//! let agent = Agent::new(AgentConfig::defaults_for(Algorithm::TdMeta), Seed::from_u64(0)).unwrap();
//! let board: Board = serde_json::from_str("[[1,1,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,2]]").unwrap();
//! let confidence = agent.predict(&board).unwrap();
//! assert!(confidence.left > confidence.up);
//! ```
//!
//! Everything is single-threaded; an agent exclusively owns its table and updates are applied
//! in transition order.

pub mod agent;
pub mod config;
pub mod learning_rule;
pub mod model;
pub mod policy;
pub mod transition;
pub mod tuple_encoder;
pub mod value_table;
