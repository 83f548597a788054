//! Rolling averages.

use serde::{Deserialize, Serialize};

/// One point of a rolling-average curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    /// Centre of the window: `start index + window / 2`.
    pub x: usize,
    pub mean: f64,
}

/// Means of every full window of `window` consecutive values.
///
/// The point for the window starting at `i` is placed at `x = i + window / 2`. Fewer values
/// than `window` yield an empty curve.
///
/// ```
/// use rl2048_stats::rolling::{RollingPoint, rolling_mean};
///
/// let curve = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
/// assert_eq!(
///     curve,
///     [
///         RollingPoint { x: 1, mean: 2.0 },
///         RollingPoint { x: 2, mean: 3.0 },
///         RollingPoint { x: 3, mean: 4.0 },
///     ]
/// );
/// ```
///
/// # Panics
///
/// Panics if `window` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<RollingPoint> {
    assert!(window > 0, "window must be positive");
    if values.len() < window {
        return vec![];
    }

    let n = window as f64;
    let mut sum: f64 = values[..window].iter().sum();
    let mut points = Vec::with_capacity(values.len() - window + 1);
    points.push(RollingPoint {
        x: window / 2,
        mean: sum / n,
    });
    for start in 1..=values.len() - window {
        sum += values[start + window - 1] - values[start - 1];
        points.push(RollingPoint {
            x: start + window / 2,
            mean: sum / n,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input() {
        assert!(rolling_mean(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let values = [4.0, 8.0, 15.0];
        let curve = rolling_mean(&values, 1);
        assert_eq!(curve.len(), 3);
        for (i, point) in curve.iter().enumerate() {
            assert_eq!(point.x, i);
            assert_eq!(point.mean, values[i]);
        }
    }

    #[test]
    fn test_even_window() {
        let curve = rolling_mean(&[0.0, 10.0, 20.0, 30.0], 2);
        let xs: Vec<_> = curve.iter().map(|p| p.x).collect();
        let means: Vec<_> = curve.iter().map(|p| p.mean).collect();
        assert_eq!(xs, [1, 2, 3]);
        assert_eq!(means, [5.0, 15.0, 25.0]);
    }

    #[test]
    #[should_panic(expected = "window")]
    fn test_zero_window() {
        let _ = rolling_mean(&[1.0], 0);
    }
}
