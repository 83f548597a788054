//! Learning rules: how actions are valued and what each transition is pulled towards.
//!
//! Every rule is a linear TD learner over the same [`ValueModel`]. A rule defines two things:
//!
//! 1. **Action value** - the number the shared ε-greedy [`Policy`] ranks available actions by
//! 2. **TD target** - for a [`Transition`], which board is updated (the origin), under which
//!    key, and the bootstrap value the update is pulled towards
//!
//! The [`Agent`](crate::agent::Agent) then applies the shared update
//!
//! ```text
//! error = α · (reward + γ · bootstrap − estimate(origin))
//! ```
//!
//! to every table entry addressed by the origin's features. The bootstrap is 0 when the
//! next state is terminal.
//!
//! | rule         | table keyed by   | action value            | bootstrap                  | origin     |
//! |--------------|------------------|-------------------------|----------------------------|------------|
//! | [`QLearning`] | feature × action | Σ Q(f, a)              | max_a' Q(next, a')         | prev state |
//! | [`Sarsa`]    | feature × action | Σ Q(f, a)               | Q(next, a'), a' from policy | prev state |
//! | [`TdZero`]   | feature          | r(a) + V(afterstate)    | V(next state)              | prev state |
//! | [`TdMeta`]   | feature          | r(a) + V(afterstate)    | V(meta)                    | prev meta  |
//!
//! SARSA commits to the action it bootstrapped from: that action is the one played next.

use std::fmt;

use rl2048_engine::{Action, Board};

use crate::{
    config::Algorithm, model::ValueModel, policy::Policy, transition::Transition,
    value_table::TableLayout,
};

pub use self::{q_learning::QLearning, sarsa::Sarsa, td_meta::TdMeta, td_zero::TdZero};

mod q_learning;
mod sarsa;
mod td_meta;
mod td_zero;

/// Where a transition's update goes and what it is pulled towards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdTarget<'a> {
    /// Board whose features are credited.
    pub origin: &'a Board,
    /// Key for action-keyed tables, `None` for state-keyed ones.
    pub key: Option<Action>,
    /// Value of the successor, 0 when the next state is terminal.
    pub bootstrap: f64,
    /// Action the rule committed to for the next state, if any.
    pub next_action: Option<Action>,
}

pub trait LearningRule: fmt::Debug + Send + Sync {
    fn algorithm(&self) -> Algorithm;
    fn layout(&self) -> TableLayout;
    fn clone_boxed(&self) -> BoxedLearningRule;

    /// Value used to rank `action` on `board`. The action must be available.
    #[must_use]
    fn action_value(&self, model: &ValueModel, board: &Board, action: Action) -> f64;

    /// Computes the TD target of `transition` under the current table.
    fn target<'a>(
        &self,
        model: &ValueModel,
        policy: &mut Policy,
        transition: &'a Transition,
    ) -> TdTarget<'a>;
}

pub type BoxedLearningRule = Box<dyn LearningRule>;

impl Clone for BoxedLearningRule {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Creates the rule implementing `algorithm`.
#[must_use]
pub fn rule_for(algorithm: Algorithm) -> BoxedLearningRule {
    match algorithm {
        Algorithm::QLearning => Box::new(QLearning),
        Algorithm::Sarsa => Box::new(Sarsa),
        Algorithm::TdZero => Box::new(TdZero),
        Algorithm::TdMeta => Box::new(TdMeta),
    }
}

/// `reward + V(afterstate)` of `action` on `board`.
#[expect(clippy::cast_precision_loss)]
fn afterstate_value(model: &ValueModel, board: &Board, action: Action) -> f64 {
    let (after, reward) = board.shifted(action);
    reward as f64 + model.value(&after, None)
}

/// Best Q value over the available actions of `board`.
fn max_action_value(model: &ValueModel, board: &Board) -> f64 {
    board
        .available_actions()
        .into_iter()
        .map(|action| model.value(board, Some(action)))
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple_encoder::RowColBlock;

    pub(super) fn model(layout: TableLayout) -> ValueModel {
        ValueModel::new(Box::new(RowColBlock::new(2, 4).unwrap()), layout)
    }

    #[test]
    fn test_rule_for_matches_algorithm() {
        for algorithm in Algorithm::ALL {
            let rule = rule_for(algorithm);
            assert_eq!(rule.algorithm(), algorithm);
            assert_eq!(rule.clone().algorithm(), algorithm);
        }
        assert!(rule_for(Algorithm::QLearning).layout().is_action_keyed());
        assert!(rule_for(Algorithm::Sarsa).layout().is_action_keyed());
        assert!(rule_for(Algorithm::TdZero).layout().is_state_keyed());
        assert!(rule_for(Algorithm::TdMeta).layout().is_state_keyed());
    }

    #[test]
    fn test_afterstate_value_includes_reward() {
        let mut model = model(TableLayout::StateKeyed);
        let board = Board::from_ascii(
            r"
            1 1
            . .
            ",
        );
        let (after, _) = board.shifted(Action::Left);
        let features = model.features(&after);
        model.update(&features, None, 0.5, crate::value_table::ValueFloor::None);

        assert_eq!(features.len(), 5);
        let expected = 4.0 + 0.5 * 5.0;
        assert!((afterstate_value(&model, &board, Action::Left) - expected).abs() < 1e-12);
    }
}
