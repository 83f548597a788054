//! ε-greedy action selection with randomized tie-breaking.

use arrayvec::ArrayVec;
use rand::{Rng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use rl2048_engine::{Action, ActionSet, Seed};

/// Exploration policy shared by every learning rule.
///
/// With probability ε an available action is chosen uniformly; otherwise the action with the
/// highest value is chosen, breaking exact ties uniformly at random.
#[derive(Debug, Clone)]
pub struct Policy {
    epsilon: f64,
    rng: Pcg32,
}

impl Policy {
    #[must_use]
    pub fn new(epsilon: f64, seed: Seed) -> Self {
        Self {
            epsilon,
            rng: seed.rng(),
        }
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Chooses one of `actions`, `None` if there are none.
    pub fn choose(
        &mut self,
        actions: &[Action],
        value: impl FnMut(Action) -> f64,
    ) -> Option<Action> {
        if actions.is_empty() {
            return None;
        }
        if self.epsilon > 0.0 && self.rng.random::<f64>() < self.epsilon {
            return actions.choose(&mut self.rng).copied();
        }
        self.argmax(actions, value)
    }

    /// Uniform choice among the actions whose value equals the maximum.
    #[expect(clippy::float_cmp)]
    pub fn argmax(
        &mut self,
        actions: &[Action],
        mut value: impl FnMut(Action) -> f64,
    ) -> Option<Action> {
        let scored: ArrayVec<(Action, f64), { Action::LEN }> =
            actions.iter().map(|&action| (action, value(action))).collect();
        let max = scored
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        let best: ActionSet = scored
            .iter()
            .filter(|(_, v)| *v == max)
            .map(|(action, _)| *action)
            .collect();
        // NaN values never compare equal
        best.choose(&mut self.rng)
            .or_else(|| actions.choose(&mut self.rng))
            .copied()
    }
}
