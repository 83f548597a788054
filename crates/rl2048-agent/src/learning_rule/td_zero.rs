use rl2048_engine::{Action, Board};

use super::{BoxedLearningRule, LearningRule, TdTarget, afterstate_value};
use crate::{
    config::Algorithm, model::ValueModel, policy::Policy, transition::Transition,
    value_table::TableLayout,
};

/// TD(0) on state values with a one-step afterstate lookahead for action selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TdZero;

impl LearningRule for TdZero {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TdZero
    }

    fn layout(&self) -> TableLayout {
        TableLayout::StateKeyed
    }

    fn clone_boxed(&self) -> BoxedLearningRule {
        Box::new(*self)
    }

    fn action_value(&self, model: &ValueModel, board: &Board, action: Action) -> f64 {
        afterstate_value(model, board, action)
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
            model.value(&transition.next_state, None)
        };
        TdTarget {
            origin: &transition.prev_state,
            key: None,
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

    fn transition(prev_state: &str, action: Action, spawn: (usize, usize, u8)) -> Transition {
        let prev_state = Board::from_ascii(prev_state);
        let (meta, reward) = prev_state.shifted(action);
        let mut next_state = meta.clone();
        next_state.set(spawn.0, spawn.1, spawn.2);
        Transition::new(
            prev_state.clone(),
            prev_state,
            action,
            reward,
            meta,
            next_state,
        )
    }

    #[test]
    fn test_bootstraps_from_next_state() {
        let mut model = model(TableLayout::StateKeyed);
        let transition = transition(
            r"
            2 .
            . 1
            ",
            Action::Up,
            (1, 0, 1),
        );
        let next_features = model.features(&transition.next_state);
        model.update(&next_features, None, 1.0, ValueFloor::None);
        // the afterstate shares two features with the next state
        assert!((model.value(&transition.meta, None) - 2.0).abs() < 1e-12);

        let mut policy = Policy::new(0.0, Seed::from_u64(0));
        let target = TdZero.target(&model, &mut policy, &transition);
        assert_eq!(target.origin, &transition.prev_state);
        assert_eq!(target.key, None);
        assert_eq!(target.next_action, None);
        assert!((target.bootstrap - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_bootstrap_is_zero() {
        let mut model = model(TableLayout::StateKeyed);
        let transition = transition(
            r"
            1 2
            . 3
            ",
            Action::Down,
            (0, 0, 3),
        );
        assert!(transition.terminal);
        let next_features = model.features(&transition.next_state);
        model.update(&next_features, None, 1.0, ValueFloor::None);

        let mut policy = Policy::new(0.0, Seed::from_u64(0));
        let target = TdZero.target(&model, &mut policy, &transition);
        assert!(target.bootstrap.abs() < 1e-12);
    }
}
