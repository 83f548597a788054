use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    action::{Action, ActionSet},
    line::{can_compact_left, compact_left},
};
use crate::BoardError;

/// Square grid of tile exponents.
///
/// A cell holds `0` when empty and `k` for a tile worth `2^k`. Cells are stored row-major.
/// All four moves are implemented by rotating the grid so that the move becomes "left",
/// compacting each row with [`compact_left`] and rotating back.
///
/// The board serializes as a JSON array of rows:
///
/// ```
/// use rl2048_engine::Board;
///
/// let board: Board = serde_json::from_str("[[1,0],[0,2]]").unwrap();
/// assert_eq!(board.get(1, 1), 2);
/// assert_eq!(serde_json::to_string(&board).unwrap(), "[[1,0],[0,2]]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    pub const MIN_SIZE: usize = 2;
    pub const DEFAULT_SIZE: usize = 4;
    /// Largest exponent accepted from external data. Merges may still create larger tiles.
    pub const MAX_EXPONENT: u8 = 31;

    /// Creates an empty `size`×`size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is smaller than [`Board::MIN_SIZE`].
    #[must_use]
    pub fn empty(size: usize) -> Self {
        assert!(
            size >= Self::MIN_SIZE,
            "board size must be at least {}, got {size}",
            Self::MIN_SIZE
        );
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Builds a board from rows of exponents, validating shape and exponent range.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < Self::MIN_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: Self::MIN_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            for (col, &exponent) in values.iter().enumerate() {
                if exponent > Self::MAX_EXPONENT {
                    return Err(BoardError::ExponentTooLarge {
                        row,
                        col,
                        exponent,
                        max: Self::MAX_EXPONENT,
                    });
                }
            }
            cells.extend(values);
        }

        Ok(Self { size, cells })
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, exponent: u8) {
        self.cells[row * self.size + col] = exponent;
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..][..self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.size)
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Coordinates of the empty cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, exponent)| **exponent == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|exponent| **exponent == 0).count()
    }

    /// Highest exponent on the board, `0` for an empty board.
    #[must_use]
    pub fn max_exponent(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Returns the board rotated by `turns` counter-clockwise quarter turns.
    ///
    /// One turn maps `new[i][j] = old[j][n - 1 - i]`.
    #[must_use]
    pub fn rotated(&self, turns: usize) -> Self {
        let mut board = self.clone();
        for _ in 0..turns % 4 {
            board = board.rotated_ccw();
        }
        board
    }

    fn rotated_ccw(&self) -> Self {
        let n = self.size;
        let mut cells = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                cells[i * n + j] = self.cells[j * n + (n - 1 - i)];
            }
        }
        Self { size: n, cells }
    }

    /// Applies `action` in place and returns the merge reward. No tile is spawned.
    ///
    /// An unavailable action leaves the board unchanged and returns `0`.
    pub fn shift(&mut self, action: Action) -> u64 {
        let turns = action.quarter_turns();
        let mut view = self.rotated(turns);
        let size = view.size;
        let reward = view
            .cells
            .chunks_exact_mut(size)
            .map(compact_left)
            .fold(0, u64::saturating_add);
        *self = view.rotated((4 - turns) % 4);
        reward
    }

    /// Like [`Self::shift`], but returns the shifted copy.
    #[must_use]
    pub fn shifted(&self, action: Action) -> (Self, u64) {
        let mut board = self.clone();
        let reward = board.shift(action);
        (board, reward)
    }

    /// Returns `true` if `action` would change the board.
    #[must_use]
    pub fn can_shift(&self, action: Action) -> bool {
        self.rotated(action.quarter_turns())
            .rows()
            .any(can_compact_left)
    }

    /// Actions that change the board, in [`Action::ALL`] order.
    #[must_use]
    pub fn available_actions(&self) -> ActionSet {
        Action::ALL
            .into_iter()
            .filter(|action| self.can_shift(*action))
            .collect()
    }

    /// Parses a board from whitespace-separated exponents, `.` for empty cells.
    ///
    /// # Panics
    ///
    /// Panics if the rows are not square or a token is not a valid exponent.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<u8>> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| match token {
                        "." => 0,
                        _ => token
                            .parse()
                            .unwrap_or_else(|e| panic!("invalid cell `{token}`: {e}")),
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows).unwrap_or_else(|e| panic!("invalid board art: {e}"))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &exponent) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if exponent == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", 1_u64 << exponent)?;
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let board = Board::from_ascii(
            r"
            1 2
            3 4
            ",
        );
        let expected = Board::from_ascii(
            r"
            2 4
            1 3
            ",
        );
        assert_eq!(board.rotated(1), expected);
        assert_eq!(board.rotated(4), board);
        assert_eq!(board.rotated(1).rotated(3), board);
    }

    #[test]
    fn test_shift_each_direction() {
        let board = Board::from_ascii(
            r"
            1 . 1 .
            . . . .
            . 2 . .
            . 2 . 3
            ",
        );

        let (left, reward) = board.shifted(Action::Left);
        assert_eq!(
            left,
            Board::from_ascii(
                r"
                2 . . .
                . . . .
                2 . . .
                2 3 . .
                "
            )
        );
        assert_eq!(reward, 4);

        let (right, reward) = board.shifted(Action::Right);
        assert_eq!(
            right,
            Board::from_ascii(
                r"
                . . . 2
                . . . .
                . . . 2
                . . 2 3
                "
            )
        );
        assert_eq!(reward, 4);

        let (up, reward) = board.shifted(Action::Up);
        assert_eq!(
            up,
            Board::from_ascii(
                r"
                1 3 1 3
                . . . .
                . . . .
                . . . .
                "
            )
        );
        assert_eq!(reward, 8);

        let (down, reward) = board.shifted(Action::Down);
        assert_eq!(
            down,
            Board::from_ascii(
                r"
                . . . .
                . . . .
                . . . .
                1 3 1 3
                "
            )
        );
        assert_eq!(reward, 8);
    }

    #[test]
    fn test_available_actions() {
        let board = Board::from_ascii(
            r"
            1 2
            . .
            ",
        );
        assert_eq!(board.available_actions().as_slice(), &[Action::Down]);

        let stuck = Board::from_ascii(
            r"
            1 2
            2 1
            ",
        );
        assert!(stuck.available_actions().is_empty());

        let empty = Board::empty(3);
        assert!(empty.available_actions().is_empty());
    }

    #[test]
    fn test_shift_unavailable_is_noop() {
        let board = Board::from_ascii(
            r"
            1 2
            . .
            ",
        );
        let (shifted, reward) = board.shifted(Action::Left);
        assert_eq!(shifted, board);
        assert_eq!(reward, 0);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_ascii(
            r"
            1 .
            . 2
            ",
        );
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), [(0, 1), (1, 0)]);
        assert_eq!(board.count_empty(), 2);
        assert_eq!(board.max_exponent(), 2);
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            Board::from_rows(vec![vec![0]]),
            Err(BoardError::TooSmall { size: 1, min: 2 })
        );
        assert_eq!(
            Board::from_rows(vec![vec![0, 0], vec![0]]),
            Err(BoardError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert!(matches!(
            Board::from_rows(vec![vec![0, 32], vec![0, 0]]),
            Err(BoardError::ExponentTooLarge { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_ragged_rows() {
        let result = serde_json::from_str::<Board>("[[1,2],[3]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_ascii(
            r"
            1 .
            . 11
            ",
        );
        assert_eq!(board.to_string(), "     2      .\n     .   2048");
    }
}
