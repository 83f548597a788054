//! Agent configuration and per-algorithm defaults.

use std::{fmt, str::FromStr};

use rl2048_engine::Board;
use serde::{Deserialize, Serialize};

use crate::{
    tuple_encoder::{EncoderError, RowColBlock, TupleEncoder as _},
    value_table::ValueFloor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    QLearning,
    Sarsa,
    TdZero,
    TdMeta,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [Self::QLearning, Self::Sarsa, Self::TdZero, Self::TdMeta];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::QLearning => "q_learning",
            Self::Sarsa => "sarsa",
            Self::TdZero => "td_zero",
            Self::TdMeta => "td_meta",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown algorithm `{name}` (expected q_learning, sarsa, td_zero or td_meta)")]
pub struct ParseAlgorithmError {
    name: String,
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts the ids with `-` or `_` and in any case, e.g. `td-meta` or `Q_LEARNING`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == normalized)
            .ok_or_else(|| ParseAlgorithmError { name: s.to_owned() })
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("learning rate must be in (0, 1], got {alpha}")]
    Alpha { alpha: f64 },
    #[display("discount factor must be in [0, 1], got {gamma}")]
    Gamma { gamma: f64 },
    #[display("exploration rate must be in [0, 1], got {epsilon}")]
    Epsilon { epsilon: f64 },
    #[display("invalid encoder: {source}")]
    Encoder { source: EncoderError },
}

/// Hyperparameters and encoder settings of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub algorithm: Algorithm,
    pub board_size: usize,
    pub max_exponent: u8,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub value_floor: ValueFloor,
}

impl AgentConfig {
    /// Defaults of `algorithm` on a 4×4 board.
    ///
    /// | algorithm  | α      | γ      | ε      | floor |
    /// |------------|--------|--------|--------|-------|
    /// | q_learning | 0.025  | 0.9999 | 0.0001 | zero  |
    /// | sarsa      | 0.01   | 0.75   | 0.001  | zero  |
    /// | td_zero    | 0.02   | 0.9999 | 0.0001 | zero  |
    /// | td_meta    | 0.0025 | 0.99   | 0.01   | none  |
    #[must_use]
    pub fn defaults_for(algorithm: Algorithm) -> Self {
        let (alpha, gamma, epsilon, value_floor) = match algorithm {
            Algorithm::QLearning => (0.025, 0.9999, 0.0001, ValueFloor::Zero),
            Algorithm::Sarsa => (0.01, 0.75, 0.001, ValueFloor::Zero),
            Algorithm::TdZero => (0.02, 0.9999, 0.0001, ValueFloor::Zero),
            Algorithm::TdMeta => (0.0025, 0.99, 0.01, ValueFloor::None),
        };
        Self {
            algorithm,
            board_size: Board::DEFAULT_SIZE,
            max_exponent: RowColBlock::DEFAULT_MAX_EXPONENT,
            alpha,
            gamma,
            epsilon,
            value_floor,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::Alpha { alpha: self.alpha });
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(ConfigError::Gamma { gamma: self.gamma });
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::Epsilon {
                epsilon: self.epsilon,
            });
        }
        self.encoder()?;
        Ok(())
    }

    pub fn encoder(&self) -> Result<RowColBlock, ConfigError> {
        RowColBlock::new(self.board_size, self.max_exponent)
            .map_err(|source| ConfigError::Encoder { source })
    }

    /// Identifier such as `td_zero_rowcolblock_a02e0001g9999`.
    ///
    /// The hyperparameters are written as the digits after their decimal point.
    ///
    /// # Panics
    ///
    /// Panics if the encoder configuration is invalid.
    #[must_use]
    pub fn tag(&self) -> String {
        let encoder = self
            .encoder()
            .unwrap_or_else(|e| panic!("cannot tag an invalid config: {e}"));
        format!(
            "{}_{}_a{}e{}g{}",
            self.algorithm,
            encoder.name(),
            fraction_digits(self.alpha),
            fraction_digits(self.epsilon),
            fraction_digits(self.gamma),
        )
    }
}

fn fraction_digits(value: f64) -> String {
    let repr = value.to_string();
    match repr.split_once('.') {
        Some((_, fraction)) => fraction.to_owned(),
        None => "0".to_owned(),
    }
}
