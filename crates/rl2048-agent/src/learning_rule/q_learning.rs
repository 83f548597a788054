use rl2048_engine::{Action, Board};

use super::{BoxedLearningRule, LearningRule, TdTarget, max_action_value};
use crate::{
    config::Algorithm, model::ValueModel, policy::Policy, transition::Transition,
    value_table::TableLayout,
};

/// Off-policy Q-learning: bootstraps from the best action of the next state.
#[derive(Debug, Clone, Copy, Default)]
pub struct QLearning;

impl LearningRule for QLearning {
    fn algorithm(&self) -> Algorithm {
        Algorithm::QLearning
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
        _policy: &mut Policy,
        transition: &'a Transition,
    ) -> TdTarget<'a> {
        let bootstrap = if transition.terminal {
            0.0
        } else {
            max_action_value(model, &transition.next_state)
        };
        TdTarget {
            origin: &transition.prev_state,
            key: Some(transition.action),
            bootstrap,
            next_action: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rl2048_engine::Seed;

    use super::*;
    use crate::{learning_rule::tests::model, value_table::ValueFloor};

    #[test]
    fn test_bootstraps_from_best_next_action() {
        let mut model = model(TableLayout::ActionKeyed);
        let prev = Board::from_ascii(
            r"
            1 .
            . .
            ",
        );
        let next = Board::from_ascii(
            r"
            . 1
            . 1
            ",
        );
        let features = model.features(&next);
        model.update(&features, Some(Action::Left), 1.0, ValueFloor::None);
        model.update(&features, Some(Action::Up), 2.0, ValueFloor::None);
        // Right is unavailable on `next`, its value must be ignored
        model.update(&features, Some(Action::Right), 9.0, ValueFloor::None);

        let transition = Transition::new(
            prev.clone(),
            prev.clone(),
            Action::Right,
            0,
            next.clone(),
            next.clone(),
        );
        let mut policy = Policy::new(0.0, Seed::from_u64(0));
        let target = QLearning.target(&model, &mut policy, &transition);
        assert_eq!(target.key, Some(Action::Right));
        assert_eq!(target.origin, &prev);
        let expected = model.value(&next, Some(Action::Up));
        assert!((target.bootstrap - expected).abs() < 1e-12);
    }
}
