use rl2048_engine::Action;
use serde::{Deserialize, Serialize};

/// How table entries are keyed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum TableLayout {
    /// One entry per feature address.
    StateKeyed,
    /// One entry per `(feature address, action)`, at `feature × 4 + action`.
    ActionKeyed,
}

impl TableLayout {
    #[must_use]
    pub const fn entries_per_feature(self) -> usize {
        match self {
            Self::StateKeyed => 1,
            Self::ActionKeyed => Action::LEN,
        }
    }
}

/// Clamp applied to every entry written by an update.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueFloor {
    #[default]
    None,
    Zero,
}

impl ValueFloor {
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Zero => value.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("value table has {actual} entries, expected {expected}")]
pub struct TableLengthError {
    pub expected: usize,
    pub actual: usize,
}

/// Flat table of learned values.
///
/// Zero-initialised, never resized. Entries are only changed through [`Self::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    layout: TableLayout,
    values: Vec<f64>,
}

impl ValueTable {
    #[must_use]
    pub fn new(num_features: usize, layout: TableLayout) -> Self {
        Self {
            layout,
            values: vec![0.0; num_features * layout.entries_per_feature()],
        }
    }

    /// Restores a table from persisted values.
    pub fn from_values(
        num_features: usize,
        layout: TableLayout,
        values: Vec<f64>,
    ) -> Result<Self, TableLengthError> {
        let expected = num_features * layout.entries_per_feature();
        if values.len() != expected {
            return Err(TableLengthError {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { layout, values })
    }

    #[must_use]
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Index of `feature` (and `action` for an action-keyed table).
    ///
    /// # Panics
    ///
    /// Panics if `action` is given for a state-keyed table or missing for an action-keyed one.
    #[must_use]
    pub fn slot(&self, feature: usize, action: Option<Action>) -> usize {
        match (self.layout, action) {
            (TableLayout::StateKeyed, None) => feature,
            (TableLayout::ActionKeyed, Some(action)) => feature * Action::LEN + action.index(),
            (layout, action) => panic!("{layout:?} table cannot be keyed by {action:?}"),
        }
    }

    #[must_use]
    pub fn get(&self, feature: usize, action: Option<Action>) -> f64 {
        self.values[self.slot(feature, action)]
    }

    /// Sum of the entries addressed by `features`.
    #[must_use]
    pub fn sum(&self, features: &[usize], action: Option<Action>) -> f64 {
        features
            .iter()
            .map(|&feature| self.get(feature, action))
            .sum()
    }

    /// Adds `delta` to every entry addressed by `features`, then applies `floor`.
    ///
    /// A feature listed twice receives the delta twice.
    pub fn add(&mut self, features: &[usize], action: Option<Action>, delta: f64, floor: ValueFloor) {
        for &feature in features {
            let slot = self.slot(feature, action);
            self.values[slot] = floor.apply(self.values[slot] + delta);
        }
    }
}
