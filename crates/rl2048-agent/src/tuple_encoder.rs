//! Board encoding: compressing a board into addressable tuple features.
//!
//! A tuple is a fixed group of cells. Its address is the cell exponents read as the digits of
//! a mixed-radix number (radix `max_exponent + 1`, first cell least significant), offset so
//! that every tuple position owns a disjoint range of the value table. Two boards therefore
//! share a feature exactly when they agree on every cell of that tuple at the same position.
//!
//! # RowColBlock
//!
//! [`RowColBlock`] is the scheme used by the agents. For an N×N board it uses:
//!
//! - N row tuples (N cells each, left to right)
//! - N column tuples (N cells each, top to bottom)
//! - (N−1)² overlapping 2×2 block tuples, in row-major order of their top-left cell
//!
//! With `R = max_exponent + 1` the address ranges are:
//!
//! ```text
//! rows:    [0,        N·R^N)               pos·R^N + Σc cell(pos, c)·R^c
//! columns: [N·R^N,    2N·R^N)      N·R^N + pos·R^N + Σr cell(r, pos)·R^r
//! blocks:  [2N·R^N,   2N·R^N + (N−1)²·R^4)
//!          2N·R^N + pos·R^4 + (r,c)·R^0 + (r,c+1)·R^1 + (r+1,c)·R^2 + (r+1,c+1)·R^3
//! ```
//!
//! Exponents above `max_exponent` are saturated to `max_exponent` when encoding.

use std::fmt;

use rl2048_engine::Board;
use serde::{Deserialize, Serialize};

/// Ordered feature addresses of one board, `(tuple kind, position)` order.
pub type FeatureSet = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EncoderError {
    #[display("board size must be at least {min}, got {size}")]
    SizeTooSmall { size: usize, min: usize },
    #[display("max exponent must be in 1..={limit}, got {max_exponent}")]
    MaxExponentOutOfRange { max_exponent: u8, limit: u8 },
    #[display("encoder needs more than {limit} table entries")]
    TableTooLarge { limit: usize },
    #[display("board is {actual}x{actual}, the encoder expects {expected}x{expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },
    #[display("exponent {exponent} at ({row}, {col}) exceeds the encoder maximum of {max}")]
    ExponentTooLarge {
        row: usize,
        col: usize,
        exponent: u8,
        max: u8,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TupleKind {
    #[display("row")]
    Row,
    #[display("column")]
    Column,
    #[display("block")]
    Block,
}

/// Tuple recovered from an address by [`TupleEncoder::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedTuple {
    pub kind: TupleKind,
    pub position: usize,
    /// Member-cell exponents, in digit order.
    pub exponents: Vec<u8>,
}

/// Deterministic mapping from a board to feature addresses.
pub trait TupleEncoder: fmt::Debug + Send + Sync {
    /// Short identifier used in agent tags.
    fn name(&self) -> &str;
    fn board_size(&self) -> usize;
    fn max_exponent(&self) -> u8;
    /// Number of features per board.
    fn num_tuples(&self) -> usize;
    /// Size of the address space; every address is below this.
    fn num_tuple_states(&self) -> usize;
    fn clone_boxed(&self) -> BoxedTupleEncoder;

    /// Encodes `board` into exactly [`Self::num_tuples`] addresses.
    ///
    /// # Panics
    ///
    /// Panics if the board size differs from [`Self::board_size`].
    #[must_use]
    fn encode(&self, board: &Board) -> FeatureSet;

    /// Inverts an address, `None` when it is outside the address space.
    #[must_use]
    fn decode(&self, address: usize) -> Option<DecodedTuple>;

    /// Checks that an externally supplied board can be encoded without saturation.
    fn check_board(&self, board: &Board) -> Result<(), EncoderError> {
        if board.size() != self.board_size() {
            return Err(EncoderError::BoardSizeMismatch {
                expected: self.board_size(),
                actual: board.size(),
            });
        }
        for (i, &exponent) in board.cells().iter().enumerate() {
            if exponent > self.max_exponent() {
                return Err(EncoderError::ExponentTooLarge {
                    row: i / board.size(),
                    col: i % board.size(),
                    exponent,
                    max: self.max_exponent(),
                });
            }
        }
        Ok(())
    }
}

pub type BoxedTupleEncoder = Box<dyn TupleEncoder>;

impl Clone for BoxedTupleEncoder {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Rows, columns and 2×2 blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowColBlock {
    size: usize,
    max_exponent: u8,
    radix: usize,
    /// `R^N`, states of one line tuple.
    line_states: usize,
    /// `R^4`, states of one block tuple.
    block_states: usize,
    num_tuple_states: usize,
}

impl RowColBlock {
    pub const DEFAULT_MAX_EXPONENT: u8 = 15;
    pub const EXPONENT_LIMIT: u8 = Board::MAX_EXPONENT;
    /// Largest address space accepted, in state-keyed entries.
    pub const MAX_TUPLE_STATES: usize = 1 << 28;
    const BLOCK_CELLS: u32 = 4;

    pub fn new(size: usize, max_exponent: u8) -> Result<Self, EncoderError> {
        if size < Board::MIN_SIZE {
            return Err(EncoderError::SizeTooSmall {
                size,
                min: Board::MIN_SIZE,
            });
        }
        if !(1..=Self::EXPONENT_LIMIT).contains(&max_exponent) {
            return Err(EncoderError::MaxExponentOutOfRange {
                max_exponent,
                limit: Self::EXPONENT_LIMIT,
            });
        }

        let too_large = EncoderError::TableTooLarge {
            limit: Self::MAX_TUPLE_STATES,
        };
        let radix = usize::from(max_exponent) + 1;
        let line_states = u32::try_from(size)
            .ok()
            .and_then(|n| radix.checked_pow(n))
            .ok_or_else(|| too_large.clone())?;
        let block_states = radix.pow(Self::BLOCK_CELLS);
        let num_blocks = (size - 1) * (size - 1);
        let num_tuple_states = (2 * size)
            .checked_mul(line_states)
            .zip(num_blocks.checked_mul(block_states))
            .and_then(|(lines, blocks)| lines.checked_add(blocks))
            .filter(|states| *states <= Self::MAX_TUPLE_STATES)
            .ok_or(too_large)?;

        Ok(Self {
            size,
            max_exponent,
            radix,
            line_states,
            block_states,
            num_tuple_states,
        })
    }

    fn mixed_radix(&self, digits: impl IntoIterator<Item = u8>) -> usize {
        let mut place = 1;
        let mut value = 0;
        for digit in digits {
            value += usize::from(digit.min(self.max_exponent)) * place;
            place *= self.radix;
        }
        value
    }

    #[expect(clippy::cast_possible_truncation)]
    fn digits(&self, mut value: usize, count: usize) -> Vec<u8> {
        (0..count)
            .map(|_| {
                // radix <= 32
                let digit = (value % self.radix) as u8;
                value /= self.radix;
                digit
            })
            .collect()
    }

    fn column_base(&self) -> usize {
        self.size * self.line_states
    }

    fn block_base(&self) -> usize {
        2 * self.size * self.line_states
    }
}

impl TupleEncoder for RowColBlock {
    fn name(&self) -> &str {
        "rowcolblock"
    }

    fn board_size(&self) -> usize {
        self.size
    }

    fn max_exponent(&self) -> u8 {
        self.max_exponent
    }

    fn num_tuples(&self) -> usize {
        2 * self.size + (self.size - 1) * (self.size - 1)
    }

    fn num_tuple_states(&self) -> usize {
        self.num_tuple_states
    }

    fn clone_boxed(&self) -> BoxedTupleEncoder {
        Box::new(self.clone())
    }

    fn encode(&self, board: &Board) -> FeatureSet {
        let n = self.size;
        assert_eq!(
            board.size(),
            n,
            "board size {} does not match encoder size {n}",
            board.size()
        );

        let mut features = Vec::with_capacity(self.num_tuples());
        for row in 0..n {
            let pattern = self.mixed_radix(board.row(row).iter().copied());
            features.push(row * self.line_states + pattern);
        }
        for col in 0..n {
            let pattern = self.mixed_radix((0..n).map(|row| board.get(row, col)));
            features.push(self.column_base() + col * self.line_states + pattern);
        }
        for row in 0..n - 1 {
            for col in 0..n - 1 {
                let position = row * (n - 1) + col;
                let pattern = self.mixed_radix([
                    board.get(row, col),
                    board.get(row, col + 1),
                    board.get(row + 1, col),
                    board.get(row + 1, col + 1),
                ]);
                features.push(self.block_base() + position * self.block_states + pattern);
            }
        }
        features
    }

    fn decode(&self, address: usize) -> Option<DecodedTuple> {
        if address >= self.num_tuple_states {
            return None;
        }
        if address < self.block_base() {
            let tuple = address / self.line_states;
            let (kind, position) = if tuple < self.size {
                (TupleKind::Row, tuple)
            } else {
                (TupleKind::Column, tuple - self.size)
            };
            let exponents = self.digits(address % self.line_states, self.size);
            return Some(DecodedTuple {
                kind,
                position,
                exponents,
            });
        }

        let offset = address - self.block_base();
        Some(DecodedTuple {
            kind: TupleKind::Block,
            position: offset / self.block_states,
            exponents: self.digits(offset % self.block_states, Self::BLOCK_CELLS as usize),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_sizes() {
        let encoder = RowColBlock::new(4, 15).unwrap();
        assert_eq!(encoder.num_tuples(), 17);
        assert_eq!(encoder.num_tuple_states(), 8 * 65_536 + 9 * 65_536);
    }

    #[test]
    fn test_encode_empty_board() {
        let encoder = RowColBlock::new(4, 15).unwrap();
        let features = encoder.encode(&Board::empty(4));
        let expected: Vec<usize> = (0..17).map(|tuple| tuple * 65_536).collect();
        assert_eq!(features, expected);
    }

    #[test]
    fn test_encode_addresses() {
        let encoder = RowColBlock::new(4, 15).unwrap();
        let board = Board::from_ascii(
            r"
            1 2 . .
            . . . .
            . . . .
            . . . 3
            ",
        );
        let features = encoder.encode(&board);
        assert_eq!(features.len(), 17);
        // row 0: 1 + 2·16
        assert_eq!(features[0], 33);
        // row 3: 3·16^3
        assert_eq!(features[3], 3 * 65_536 + 3 * 4096);
        // column 0 and 1
        assert_eq!(features[4], 4 * 65_536 + 1);
        assert_eq!(features[5], 5 * 65_536 + 2);
        // column 3: 3·16^3
        assert_eq!(features[7], 7 * 65_536 + 3 * 4096);
        // block 0: (0,0)=1, (0,1)=2
        assert_eq!(features[8], 8 * 65_536 + 1 + 2 * 16);
        // block 8 (bottom right): (3,3)=3 is the fourth digit
        assert_eq!(features[16], 16 * 65_536 + 3 * 4096);
        assert!(features.iter().all(|&f| f < encoder.num_tuple_states()));
    }

    #[test]
    fn test_encode_saturates_large_exponents() {
        let encoder = RowColBlock::new(2, 3).unwrap();
        let low = Board::from_rows(vec![vec![3, 0], vec![0, 0]]).unwrap();
        let high = Board::from_rows(vec![vec![9, 0], vec![0, 0]]).unwrap();
        assert_eq!(encoder.encode(&low), encoder.encode(&high));
        assert!(encoder.check_board(&high).is_err());
        assert!(encoder.check_board(&low).is_ok());
    }

    #[test]
    fn test_addresses_are_collision_free() {
        // every board over a 2x2 grid with exponents 0..=2
        let encoder = RowColBlock::new(2, 2).unwrap();
        let mut seen = HashSet::new();
        for code in 0..3_u32.pow(4) {
            let cells: Vec<u8> = (0..4)
                .map(|i| u8::try_from(code / 3_u32.pow(i) % 3).unwrap())
                .collect();
            let board = Board::from_rows(vec![cells[..2].to_vec(), cells[2..].to_vec()]).unwrap();
            for address in encoder.encode(&board) {
                let tuple = encoder.decode(address).unwrap();
                let expected: Vec<u8> = match tuple.kind {
                    TupleKind::Row => board.row(tuple.position).to_vec(),
                    TupleKind::Column => (0..2).map(|r| board.get(r, tuple.position)).collect(),
                    TupleKind::Block => board.cells().to_vec(),
                };
                assert_eq!(tuple.exponents, expected, "{board}");
                seen.insert(address);
            }
        }
        // every address is reachable
        assert_eq!(seen.len(), encoder.num_tuple_states());
    }

    #[test]
    fn test_decode_out_of_range() {
        let encoder = RowColBlock::new(3, 4).unwrap();
        assert!(encoder.decode(encoder.num_tuple_states() - 1).is_some());
        assert_eq!(encoder.decode(encoder.num_tuple_states()), None);
    }

    #[test]
    fn test_distinct_positions_get_distinct_addresses() {
        let encoder = RowColBlock::new(3, 4).unwrap();
        let board = Board::from_ascii(
            r"
            1 1 1
            1 1 1
            1 1 1
            ",
        );
        let features = encoder.encode(&board);
        let unique: HashSet<_> = features.iter().collect();
        assert_eq!(unique.len(), encoder.num_tuples());
    }

    #[test]
    fn test_invalid_configurations() {
        assert_eq!(
            RowColBlock::new(1, 15),
            Err(EncoderError::SizeTooSmall { size: 1, min: 2 })
        );
        assert!(matches!(
            RowColBlock::new(4, 0),
            Err(EncoderError::MaxExponentOutOfRange { .. })
        ));
        assert!(matches!(
            RowColBlock::new(4, 32),
            Err(EncoderError::MaxExponentOutOfRange { .. })
        ));
        assert!(matches!(
            RowColBlock::new(8, 15),
            Err(EncoderError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn test_check_board_size() {
        let encoder = RowColBlock::new(4, 15).unwrap();
        assert_eq!(
            encoder.check_board(&Board::empty(3)),
            Err(EncoderError::BoardSizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
