use std::path::PathBuf;

use anyhow::ensure;
use rl2048_stats::rolling::RollingPoint;
use serde::Serialize;

use crate::util;

const PERCENTILE_POINTS: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Scores file, one score per line
    input: PathBuf,
    /// Rolling average window
    #[arg(long, default_value_t = 30)]
    window: usize,
    /// Output path for the rolling average curve (JSON)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RollingCurve {
    window: usize,
    points: Vec<RollingPoint>,
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    ensure!(arg.window > 0, "--window must be positive");
    let history = util::read_scores_file(&arg.input)?;
    let Some(stats) = history.summary() else {
        eprintln!("{}: no scores", arg.input.display());
        return Ok(());
    };

    let percentiles = history.percentiles(&PERCENTILE_POINTS);

    eprintln!("{}: {} episodes", arg.input.display(), stats.count);
    eprintln!("  Min:     {:.0}", stats.min);
    eprintln!("  Max:     {:.0}", stats.max);
    eprintln!("  Mean:    {:.1}", stats.mean);
    eprintln!("  Std dev: {:.1}", stats.std_dev);
    for (point, value) in percentiles.iter() {
        eprintln!("  P{point:<2}:     {value:.0}");
    }

    let curve = history.rolling_average(arg.window);
    match (curve.first(), curve.last()) {
        (Some(first), Some(last)) => eprintln!(
            "  Rolling mean ({}): {:.1} -> {:.1}",
            arg.window, first.mean, last.mean
        ),
        _ => eprintln!(
            "  Rolling mean ({}): fewer scores than the window",
            arg.window
        ),
    }

    if let Some(path) = arg.output.as_deref() {
        let curve = RollingCurve {
            window: arg.window,
            points: curve,
        };
        util::save_json(&curve, Some(path))?;
    }
    Ok(())
}
