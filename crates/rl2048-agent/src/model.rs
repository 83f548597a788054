use rl2048_engine::{Action, Board};

use crate::{
    tuple_encoder::{BoxedTupleEncoder, FeatureSet},
    value_table::{TableLayout, ValueFloor, ValueTable},
};

/// Linear value function: encoder plus the table its addresses index.
#[derive(Debug, Clone)]
pub struct ValueModel {
    encoder: BoxedTupleEncoder,
    table: ValueTable,
}

impl ValueModel {
    /// Creates a zero-initialised model.
    #[must_use]
    pub fn new(encoder: BoxedTupleEncoder, layout: TableLayout) -> Self {
        let table = ValueTable::new(encoder.num_tuple_states(), layout);
        Self { encoder, table }
    }

    /// Pairs an encoder with an existing table.
    ///
    /// # Panics
    ///
    /// Panics if the table was not sized for this encoder.
    #[must_use]
    pub fn with_table(encoder: BoxedTupleEncoder, table: ValueTable) -> Self {
        assert_eq!(
            table.len(),
            encoder.num_tuple_states() * table.layout().entries_per_feature(),
            "value table does not match the encoder"
        );
        Self { encoder, table }
    }

    #[must_use]
    pub fn encoder(&self) -> &BoxedTupleEncoder {
        &self.encoder
    }

    #[must_use]
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    #[must_use]
    pub fn features(&self, board: &Board) -> FeatureSet {
        self.encoder.encode(board)
    }

    /// `V(board)` for a state-keyed table, `Q(board, action)` for an action-keyed one.
    #[must_use]
    pub fn value(&self, board: &Board, action: Option<Action>) -> f64 {
        self.table.sum(&self.features(board), action)
    }

    pub fn update(&mut self, features: &[usize], action: Option<Action>, delta: f64, floor: ValueFloor) {
        self.table.add(features, action, delta, floor);
    }
}
