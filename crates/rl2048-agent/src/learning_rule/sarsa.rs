use rl2048_engine::{Action, Board};

use super::{BoxedLearningRule, LearningRule, TdTarget};
use crate::{
    config::Algorithm, model::ValueModel, policy::Policy, transition::Transition,
    value_table::TableLayout,
};

/// On-policy SARSA: bootstraps from the action the policy picks for the next state.
///
/// The picked action is returned as [`TdTarget::next_action`] and the agent plays it on the
/// next move, so the bootstrapped action and the played action never diverge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sarsa;

impl LearningRule for Sarsa {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sarsa
    }

    fn layout(&self) -> TableLayout {
        TableLayout::ActionKeyed
    }

    fn clone_boxed(&self) -> BoxedLearningRule {
        Box::new(*self)
    }

    fn action_value(&self, model: &ValueModel, board: &Board, action: Action) -> f64 {
        model.value(board, Some(action))
    }

    fn target<'a>(
        &self,
        model: &ValueModel,
        policy: &mut Policy,
        transition: &'a Transition,
    ) -> TdTarget<'a> {
        let next = &transition.next_state;
        let next_action = if transition.terminal {
            None
        } else {
            policy.choose(&next.available_actions(), |action| {
                self.action_value(model, next, action)
            })
        };
        let bootstrap = next_action.map_or(0.0, |action| model.value(next, Some(action)));
        TdTarget {
            origin: &transition.prev_state,
            key: Some(transition.action),
            bootstrap,
            next_action,
        }
    }
}
