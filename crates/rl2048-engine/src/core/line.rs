//! The single-line compaction rule.
//!
//! A move is defined once, for one line moving towards index 0; [`Board`](super::Board)
//! applies it to every row of a rotated view.

/// Compacts `line` towards index 0 and returns the reward.
///
/// Cells are scanned from index 0 upwards. A non-empty tile merges into the most recent
/// destination slot when both exponents are equal and that slot has not absorbed a merge yet
/// during this pass; otherwise it slides into the next free slot. Each merge increments the
/// destination exponent and adds `2^(new exponent)` to the reward. The reward saturates at
/// `u64::MAX` instead of overflowing.
///
/// ```
/// use rl2048_engine::compact_left;
///
/// let mut line = [1, 1, 1, 0];
/// assert_eq!(compact_left(&mut line), 4);
/// assert_eq!(line, [2, 1, 0, 0]);
/// ```
pub fn compact_left(line: &mut [u8]) -> u64 {
    let mut reward: u64 = 0;
    let mut candidate: Option<usize> = None;
    let mut candidate_merged = false;

    for col in 0..line.len() {
        let exponent = line[col];
        if exponent == 0 {
            continue;
        }
        match candidate {
            Some(dest) if !candidate_merged && line[dest] == exponent => {
                line[col] = 0;
                line[dest] += 1;
                reward = reward.saturating_add(tile_value(line[dest]));
                candidate_merged = true;
            }
            _ => {
                let dest = candidate.map_or(0, |c| c + 1);
                if dest != col {
                    line[dest] = exponent;
                    line[col] = 0;
                }
                candidate = Some(dest);
                candidate_merged = false;
            }
        }
    }

    reward
}

/// `2^exponent`, saturating at `u64::MAX`.
#[must_use]
pub fn tile_value(exponent: u8) -> u64 {
    1_u64.checked_shl(u32::from(exponent)).unwrap_or(u64::MAX)
}

/// Returns `true` if [`compact_left`] would change `line`.
///
/// That is the case when an empty cell sits left of a tile, or two equal tiles are adjacent.
#[must_use]
pub fn can_compact_left(line: &[u8]) -> bool {
    let mut seen_empty = false;
    for (col, &exponent) in line.iter().enumerate() {
        if exponent == 0 {
            seen_empty = true;
            continue;
        }
        if seen_empty || (col > 0 && line[col - 1] == exponent) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compacted(line: [u8; 4]) -> ([u8; 4], u64) {
        let mut line = line;
        let reward = compact_left(&mut line);
        (line, reward)
    }

    #[test]
    fn test_three_equal_tiles_merge_once() {
        assert_eq!(compacted([1, 1, 1, 0]), ([2, 1, 0, 0], 4));
    }

    #[test]
    fn test_two_pairs_merge_separately() {
        assert_eq!(compacted([1, 1, 2, 2]), ([2, 3, 0, 0], 4 + 8));
        assert_eq!(compacted([3, 3, 3, 3]), ([4, 4, 0, 0], 16 + 16));
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        // 2 + 2 -> 4, the incoming 4 must not join it
        assert_eq!(compacted([1, 1, 2, 0]), ([2, 2, 0, 0], 4));
    }

    #[test]
    fn test_slides_across_gaps() {
        assert_eq!(compacted([0, 0, 0, 5]), ([5, 0, 0, 0], 0));
        assert_eq!(compacted([0, 3, 0, 3]), ([4, 0, 0, 0], 16));
        assert_eq!(compacted([2, 0, 1, 0]), ([2, 1, 0, 0], 0));
    }

    #[test]
    fn test_unchanged_lines() {
        for line in [[0, 0, 0, 0], [1, 2, 3, 4], [1, 2, 0, 0], [4, 0, 0, 0]] {
            assert!(!can_compact_left(&line), "{line:?}");
            assert_eq!(compacted(line), (line, 0));
        }
    }

    #[test]
    fn test_can_compact_matches_compaction() {
        // every line over exponents 0..=3
        for code in 0..4_u32.pow(4) {
            let line: [u8; 4] = std::array::from_fn(|i| ((code >> (2 * i)) & 0b11) as u8);
            let (after, _) = compacted(line);
            assert_eq!(can_compact_left(&line), after != line, "{line:?}");
        }
    }

    #[test]
    fn test_reward_sums_created_tiles() {
        // one merge per destination slot, reward counts every created tile
        let (after, reward) = compacted([2, 2, 2, 2]);
        assert_eq!(after, [3, 3, 0, 0]);
        assert_eq!(reward, 8 + 8);
    }

    #[test]
    fn test_large_exponents_do_not_overflow() {
        assert_eq!(compacted([31, 31, 0, 0]), ([32, 0, 0, 0], 1 << 32));
        assert_eq!(
            compacted([30, 30, 30, 30]),
            ([31, 31, 0, 0], (1 << 31) + (1 << 31))
        );
        assert_eq!(compacted([63, 63, 0, 0]), ([64, 0, 0, 0], u64::MAX));
        assert_eq!(tile_value(11), 2048);
    }
}
