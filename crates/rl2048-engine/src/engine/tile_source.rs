use std::collections::VecDeque;

use rand::Rng as _;
use rand_pcg::Pcg32;

use super::Seed;

/// Source of the randomness used when a tile is spawned.
///
/// A spawn asks for a cell among the `empty` empty cells (indexed in row-major order)
/// and for the exponent of the new tile.
pub trait TileSource {
    /// Returns an index in `0..empty`.
    fn pick_cell(&mut self, empty: usize) -> usize;

    /// Returns the exponent of the spawned tile.
    fn pick_exponent(&mut self) -> u8;
}

impl<T> TileSource for &mut T
where
    T: TileSource + ?Sized,
{
    fn pick_cell(&mut self, empty: usize) -> usize {
        (**self).pick_cell(empty)
    }

    fn pick_exponent(&mut self) -> u8 {
        (**self).pick_exponent()
    }
}

/// Random tile source: uniform cell, exponent 1 (a "2") with probability 0.9, else 2.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: Pcg32,
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSpawner {
    pub const SMALL_TILE_PROBABILITY: f64 = 0.9;

    /// Creates a spawner with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic spawning.
    #[must_use]
    pub fn with_seed(seed: Seed) -> Self {
        Self { rng: seed.rng() }
    }
}

impl TileSource for TileSpawner {
    fn pick_cell(&mut self, empty: usize) -> usize {
        self.rng.random_range(0..empty)
    }

    fn pick_exponent(&mut self) -> u8 {
        if self.rng.random_bool(Self::SMALL_TILE_PROBABILITY) {
            1
        } else {
            2
        }
    }
}

/// Tile source that replays a fixed list of `(empty-cell index, exponent)` picks.
///
/// # Example
///
/// ```
/// use rl2048_engine::{Board, GameState, ScriptedTileSource};
///
/// let mut tiles = ScriptedTileSource::new([(0, 1), (0, 2)]);
/// let state = GameState::new(2, &mut tiles);
/// assert_eq!(state.board(), &Board::from_rows(vec![vec![1, 2], vec![0, 0]]).unwrap());
/// assert!(tiles.is_exhausted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTileSource {
    picks: VecDeque<(usize, u8)>,
    pending_exponent: Option<u8>,
}

impl ScriptedTileSource {
    pub fn new(picks: impl IntoIterator<Item = (usize, u8)>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            pending_exponent: None,
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.picks.is_empty() && self.pending_exponent.is_none()
    }
}

impl TileSource for ScriptedTileSource {
    /// # Panics
    ///
    /// Panics if the script is exhausted or the scripted index is out of range.
    fn pick_cell(&mut self, empty: usize) -> usize {
        let (cell, exponent) = self
            .picks
            .pop_front()
            .expect("scripted tile source exhausted");
        assert!(
            cell < empty,
            "scripted cell {cell} out of range for {empty} empty cells"
        );
        self.pending_exponent = Some(exponent);
        cell
    }

    fn pick_exponent(&mut self) -> u8 {
        self.pending_exponent
            .take()
            .expect("pick_exponent called before pick_cell")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawner_is_deterministic() {
        let mut a = TileSpawner::with_seed(Seed::from_u64(3));
        let mut b = TileSpawner::with_seed(Seed::from_u64(3));
        for empty in (1..=16).rev() {
            assert_eq!(a.pick_cell(empty), b.pick_cell(empty));
            assert_eq!(a.pick_exponent(), b.pick_exponent());
        }
    }

    #[test]
    fn test_spawner_exponent_distribution() {
        let mut spawner = TileSpawner::with_seed(Seed::from_u64(11));
        let n = 10_000;
        let fours = (0..n).filter(|_| spawner.pick_exponent() == 2).count();
        // expected 1000
        assert!((800..1200).contains(&fours), "fours = {fours}");
    }

    #[test]
    fn test_spawner_cell_in_range() {
        let mut spawner = TileSpawner::with_seed(Seed::from_u64(5));
        for _ in 0..1000 {
            assert!(spawner.pick_cell(3) < 3);
        }
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_source_panics_when_exhausted() {
        let mut tiles = ScriptedTileSource::default();
        tiles.pick_cell(4);
    }
}
