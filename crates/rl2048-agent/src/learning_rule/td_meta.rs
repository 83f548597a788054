use rl2048_engine::{Action, Board};

use super::{BoxedLearningRule, LearningRule, TdTarget, afterstate_value};
use crate::{
    config::Algorithm, model::ValueModel, policy::Policy, transition::Transition,
    value_table::TableLayout,
};

/// TD(0) over meta-states (afterstates).
///
/// The previous afterstate is pulled towards `reward + γ·V(current afterstate)`, so the table
/// learns the value of boards right after a move, before the random spawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TdMeta;

impl LearningRule for TdMeta {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TdMeta
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
            model.value(&transition.meta, None)
        };
        TdTarget {
            origin: &transition.prev_meta,
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

    #[test]
    fn test_credits_previous_meta_state() {
        let mut model = model(TableLayout::StateKeyed);
        let prev_meta = Board::from_ascii(
            r"
            2 .
            . .
            ",
        );
        let prev_state = Board::from_ascii(
            r"
            2 .
            . 1
            ",
        );
        let (meta, reward) = prev_state.shifted(Action::Up);
        let mut next_state = meta.clone();
        next_state.set(1, 0, 1);

        let meta_features = model.features(&meta);
        model.update(&meta_features, None, 1.0, ValueFloor::None);

        let transition = Transition::new(
            prev_state,
            prev_meta.clone(),
            Action::Up,
            reward,
            meta,
            next_state,
        );
        let mut policy = Policy::new(0.0, Seed::from_u64(0));
        let target = TdMeta.target(&model, &mut policy, &transition);
        assert_eq!(target.origin, &prev_meta);
        assert_eq!(target.key, None);
        assert!((target.bootstrap - 5.0).abs() < 1e-12);
    }
}
