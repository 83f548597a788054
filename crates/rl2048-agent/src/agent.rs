//! The learning agent: encoder, value table, learning rule and exploration policy.

use rl2048_engine::{Action, Board, Seed};
use serde::{Deserialize, Serialize};

use crate::{
    config::{AgentConfig, ConfigError},
    learning_rule::{BoxedLearningRule, rule_for},
    model::ValueModel,
    policy::Policy,
    transition::Transition,
    tuple_encoder::{EncoderError, TupleEncoder as _},
    value_table::{TableLengthError, ValueTable},
};

/// Per-action values, `None` for unavailable actions. Indexed by [`Action::index`].
pub type ActionValues = [Option<f64>; Action::LEN];

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AgentError {
    #[display("invalid agent configuration: {source}")]
    Config { source: ConfigError },
    #[display("invalid snapshot: {source}")]
    Snapshot { source: TableLengthError },
}

/// Everything needed to restore an agent: its configuration and the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub config: AgentConfig,
    pub table: Vec<f64>,
}

/// Relative preference of each action on a board.
///
/// Available actions get their value divided by the sum over available actions; when that
/// sum is zero the raw values are reported instead. Unavailable actions get 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionConfidence {
    #[serde(rename = "Left")]
    pub left: f64,
    #[serde(rename = "Up")]
    pub up: f64,
    #[serde(rename = "Right")]
    pub right: f64,
    #[serde(rename = "Down")]
    pub down: f64,
}

impl ActionConfidence {
    #[must_use]
    pub fn from_array([left, up, right, down]: [f64; Action::LEN]) -> Self {
        Self {
            left,
            up,
            right,
            down,
        }
    }

    #[must_use]
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Left => self.left,
            Action::Up => self.up,
            Action::Right => self.right,
            Action::Down => self.down,
        }
    }
}

/// A linear TD agent.
///
/// The table is the only state carried across episodes; [`Self::begin_episode`] drops
/// anything tied to the previous game.
///
/// # Example
///
/// ```
/// use rl2048_agent::{
///     agent::Agent,
///     config::{AgentConfig, Algorithm},
///     transition::Transition,
/// };
/// use rl2048_engine::{GameState, Seed, TileSpawner};
///
/// let config = AgentConfig::defaults_for(Algorithm::TdZero);
/// let mut agent = Agent::new(config, Seed::from_u64(1)).unwrap();
/// let mut tiles = TileSpawner::with_seed(Seed::from_u64(2));
/// let mut state = GameState::new(4, &mut tiles);
///
/// agent.begin_episode();
/// let mut prev_meta = state.board().clone();
/// while let Some(action) = agent.choose_action(state.board()) {
///     let prev_state = state.board().clone();
///     let reward = state.do_action(action);
///     let meta = state.board().clone();
///     state.add_random_tile(&mut tiles);
///     let transition = Transition::new(
///         prev_state,
///         prev_meta,
///         action,
///         reward,
///         meta.clone(),
///         state.board().clone(),
///     );
///     agent.learn(&transition);
///     prev_meta = meta;
/// }
/// assert!(state.is_game_over());
/// ```
#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    model: ValueModel,
    rule: BoxedLearningRule,
    policy: Policy,
    /// Action a rule committed to, valid only for the given board.
    committed: Option<(Board, Action)>,
}

impl Agent {
    /// Creates an agent with a zero-initialised table.
    ///
    /// `seed` drives exploration only; tile spawning uses its own source.
    pub fn new(config: AgentConfig, seed: Seed) -> Result<Self, AgentError> {
        config
            .validate()
            .map_err(|source| AgentError::Config { source })?;
        let encoder = config
            .encoder()
            .map_err(|source| AgentError::Config { source })?;
        let rule = rule_for(config.algorithm);
        let model = ValueModel::new(Box::new(encoder), rule.layout());
        Ok(Self::from_parts(config, model, rule, seed))
    }

    /// Restores an agent from a snapshot, validating the table length against the config.
    pub fn from_snapshot(snapshot: AgentSnapshot, seed: Seed) -> Result<Self, AgentError> {
        let AgentSnapshot { config, table } = snapshot;
        config
            .validate()
            .map_err(|source| AgentError::Config { source })?;
        let encoder = config
            .encoder()
            .map_err(|source| AgentError::Config { source })?;
        let rule = rule_for(config.algorithm);
        let table = ValueTable::from_values(encoder.num_tuple_states(), rule.layout(), table)
            .map_err(|source| AgentError::Snapshot { source })?;
        let model = ValueModel::with_table(Box::new(encoder), table);
        Ok(Self::from_parts(config, model, rule, seed))
    }

    fn from_parts(
        config: AgentConfig,
        model: ValueModel,
        rule: BoxedLearningRule,
        seed: Seed,
    ) -> Self {
        let policy = Policy::new(config.epsilon, seed);
        Self {
            config,
            model,
            rule,
            policy,
            committed: None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            config: self.config.clone(),
            table: self.model.table().values().to_vec(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &ValueModel {
        &self.model
    }

    /// See [`AgentConfig::tag`].
    #[must_use]
    pub fn tag(&self) -> String {
        self.config.tag()
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.config.epsilon = epsilon;
        self.policy.set_epsilon(epsilon);
    }

    /// Forgets per-episode state.
    pub fn begin_episode(&mut self) {
        self.committed = None;
    }

    /// Chooses an action for `board`, `None` when no action is available.
    ///
    /// If the learning rule committed to an action for exactly this board during the last
    /// update, that action is returned.
    pub fn choose_action(&mut self, board: &Board) -> Option<Action> {
        if let Some((committed_board, action)) = self.committed.take()
            && committed_board == *board
            && board.can_shift(action)
        {
            return Some(action);
        }
        let actions = board.available_actions();
        let (model, rule) = (&self.model, &self.rule);
        self.policy
            .choose(&actions, |action| rule.action_value(model, board, action))
    }

    /// Values the policy ranks by, for every available action.
    #[must_use]
    pub fn action_values(&self, board: &Board) -> ActionValues {
        Action::ALL.map(|action| {
            board
                .can_shift(action)
                .then(|| self.value_of(board, action))
        })
    }

    /// Value of `action` on `board` as seen by the learning rule.
    #[must_use]
    pub fn value_of(&self, board: &Board, action: Action) -> f64 {
        self.rule.action_value(&self.model, board, action)
    }

    /// Value of `board` itself.
    ///
    /// For action-keyed tables this is the best value over available actions (0 when there is
    /// none).
    #[must_use]
    pub fn state_value(&self, board: &Board) -> f64 {
        if self.rule.layout().is_state_keyed() {
            return self.model.value(board, None);
        }
        board
            .available_actions()
            .into_iter()
            .map(|action| self.model.value(board, Some(action)))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Applies one TD update and returns the step added to each credited entry.
    ///
    /// # Panics
    ///
    /// Panics if the transition's boards do not have the configured size.
    pub fn learn(&mut self, transition: &Transition) -> f64 {
        let target = self
            .rule
            .target(&self.model, &mut self.policy, transition);
        let features = self.model.features(target.origin);
        let estimate = self.model.table().sum(&features, target.key);
        let error = self.config.alpha
            * (transition.reward_value() + self.config.gamma * target.bootstrap - estimate);
        self.model
            .update(&features, target.key, error, self.config.value_floor);

        log::trace!(
            "{} {}: reward={} estimate={estimate:.4} bootstrap={:.4} error={error:.4}",
            self.config.algorithm,
            transition.action,
            transition.reward,
            target.bootstrap,
        );

        self.committed = target
            .next_action
            .map(|action| (transition.next_state.clone(), action));
        error
    }

    /// Confidence of each action on an externally supplied board.
    pub fn predict(&self, board: &Board) -> Result<ActionConfidence, EncoderError> {
        self.model.encoder().check_board(board)?;
        let values = self.action_values(board);
        let total: f64 = values.iter().flatten().sum();
        Ok(ActionConfidence::from_array(values.map(|value| {
            match value {
                None => 0.0,
                Some(value) if total != 0.0 => value / total,
                Some(value) => value,
            }
        })))
    }
}
