//! Per-episode scores and their summaries.

use std::io::{self, BufRead, Write};

use rl2048_stats::{
    descriptive::DescriptiveStats,
    percentiles::Percentiles,
    rolling::{RollingPoint, rolling_mean},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ScoreHistoryError {
    #[display("failed to read scores")]
    Io { source: io::Error },
    #[display("invalid score `{text}` on line {line}")]
    InvalidScore {
        line: usize,
        text: String,
        source: std::num::ParseIntError,
    },
}

/// Final scores of consecutive episodes, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreHistory {
    scores: Vec<u64>,
}

impl ScoreHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_scores(scores: Vec<u64>) -> Self {
        Self { scores }
    }

    pub fn push(&mut self, score: u64) {
        self.scores.push(score);
    }

    pub fn append(&mut self, other: &Self) {
        self.scores.extend_from_slice(&other.scores);
    }

    #[must_use]
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[expect(clippy::cast_precision_loss)]
    fn values(&self) -> Vec<f64> {
        self.scores.iter().map(|&s| s as f64).collect()
    }

    /// Moving average over `window` episodes.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    #[must_use]
    pub fn rolling_average(&self, window: usize) -> Vec<RollingPoint> {
        rolling_mean(&self.values(), window)
    }

    /// Summary of the whole history, `None` when empty.
    #[must_use]
    pub fn summary(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.values())
    }

    /// Nearest-rank percentiles of the scores at `points` (in percent).
    #[must_use]
    pub fn percentiles(&self, points: &[f64]) -> Percentiles {
        Percentiles::new(&self.values(), points)
    }

    /// Summary of the last `n` episodes.
    #[must_use]
    pub fn recent_summary(&self, n: usize) -> Option<DescriptiveStats> {
        let start = self.scores.len().saturating_sub(n);
        Self::from_scores(self.scores[start..].to_vec()).summary()
    }

    /// Writes one score per line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for score in &self.scores {
            writeln!(writer, "{score}")?;
        }
        writer.flush()
    }

    /// Reads one score per line, skipping blank lines.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, ScoreHistoryError> {
        let mut scores = vec![];
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ScoreHistoryError::Io { source })?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let score = text
                .parse()
                .map_err(|source| ScoreHistoryError::InvalidScore {
                    line: i + 1,
                    text: text.to_owned(),
                    source,
                })?;
            scores.push(score);
        }
        Ok(Self { scores })
    }
}

impl Extend<u64> for ScoreHistory {
    fn extend<T: IntoIterator<Item = u64>>(&mut self, iter: T) {
        self.scores.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let history = ScoreHistory::from_scores(vec![100, 400, 200, 300]);
        let stats = history.summary().unwrap();
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 250.0).abs() < 1e-9);
        assert!((stats.max - 400.0).abs() < 1e-9);
        assert!(ScoreHistory::new().summary().is_none());

        let percentiles = history.percentiles(&[50.0]);
        assert_eq!(percentiles.get(50.0), Some(300.0));

        let recent = history.recent_summary(2).unwrap();
        assert!((recent.mean - 250.0).abs() < 1e-9);
        assert!((recent.min - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_average() {
        let history = ScoreHistory::from_scores(vec![0, 10, 20, 30]);
        let curve = history.rolling_average(2);
        let means: Vec<_> = curve.iter().map(|p| p.mean).collect();
        assert_eq!(means, [5.0, 15.0, 25.0]);
        assert_eq!(curve[0].x, 1);
        assert!(history.rolling_average(5).is_empty());
    }

    #[test]
    fn test_text_format() {
        let history = ScoreHistory::from_scores(vec![1024, 0, 36]);
        let mut buf = vec![];
        history.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "1024\n0\n36\n");

        let read = ScoreHistory::read_from(&buf[..]).unwrap();
        assert_eq!(read, history);
    }

    #[test]
    fn test_read_skips_blank_and_reports_bad_lines() {
        let read = ScoreHistory::read_from("12\n\n  34 \n".as_bytes()).unwrap();
        assert_eq!(read.scores(), [12, 34]);

        let err = ScoreHistory::read_from("12\nabc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ScoreHistoryError::InvalidScore { line: 2, .. }));
        assert_eq!(err.to_string(), "invalid score `abc` on line 2");
    }

    #[test]
    fn test_append() {
        let mut history = ScoreHistory::from_scores(vec![1, 2]);
        history.append(&ScoreHistory::from_scores(vec![3]));
        history.extend([4, 5]);
        assert_eq!(history.scores(), [1, 2, 3, 4, 5]);
    }
}
