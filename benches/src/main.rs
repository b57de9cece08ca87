use clap::Parser;
use eyre::{Result, WrapErr};
use realdata_bench::{Engine, Stopwatch, init_tracing, print_summary, results::BenchmarkResults};
use realdata_harness::{Aggregator, DatasetLoader, Gate, HarnessConfig, Suite, SuiteStatus};
use std::path::PathBuf;

/// Time multi-way bitmap unions over the real-roaring-datasets collection
#[derive(Debug, Parser)]
#[command(name = "realdata-bench", version)]
struct Cli {
    /// Timed iterations per dataset
    #[arg(long, short = 'n', default_value_t = 10)]
    iterations: u32,

    /// Datasets to run, comma separated. Defaults to BENCH_DATASETS, then every dataset
    #[arg(long, value_delimiter = ',')]
    datasets: Vec<String>,

    /// Aggregators to run
    #[arg(long, value_delimiter = ',', default_value = "par-or,fast-or")]
    aggregators: Vec<Aggregator>,

    /// Root of the real-roaring-datasets checkout. Overrides BENCH_DATASETS_DIR
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Only run when BENCH_REAL_DATA enables the real-data suites
    #[arg(long)]
    respect_gate: bool,

    /// Write a markdown report
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write the raw results as JSON
    #[arg(long)]
    output_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = HarnessConfig::load().wrap_err("invalid BENCH_* configuration")?;
    if let Some(dir) = cli.dir {
        config.datasets_dir = Some(dir);
    }
    if !cli.datasets.is_empty() {
        config.datasets = Some(cli.datasets);
    }
    if !cli.respect_gate {
        config.real_data = Gate::Enabled;
    }

    let loader = DatasetLoader::from_config(&config);
    let mut results = BenchmarkResults::new();
    let mut datasets = Vec::new();
    for &aggregator in &cli.aggregators {
        let suite = Suite::from_config(aggregator.suite_name(), &config)?;
        datasets = suite.datasets().to_vec();

        println!(
            "Running {} over {} datasets ({} iterations each)",
            suite.name(),
            datasets.len(),
            cli.iterations
        );
        let mut stopwatch = Stopwatch::new(cli.iterations);
        let report = suite.run(
            &loader,
            |bitmaps: &[Engine]| aggregator.aggregate(bitmaps),
            &mut stopwatch,
        );
        print_summary(&report);
        if report.status == SuiteStatus::Skipped {
            return Ok(());
        }
        results.record(aggregator, &report, stopwatch.into_timings());
    }

    let markdown = results.generate_markdown(&cli.aggregators, &datasets);
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &markdown)
                .wrap_err_with(|| format!("failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("\n{markdown}"),
    }
    if let Some(path) = &cli.output_json {
        results.write_json(path)?;
        println!("Results written to {}", path.display());
    }

    if results.has_failures() {
        eyre::bail!("some datasets could not be loaded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["realdata-bench"]).unwrap();
        assert_eq!(cli.iterations, 10);
        assert_eq!(cli.aggregators, Aggregator::ALL);
        assert!(cli.datasets.is_empty());
        assert!(!cli.respect_gate);
    }

    #[test]
    fn parses_lists() {
        let cli = Cli::try_parse_from([
            "realdata-bench",
            "--datasets",
            "census1881,wikileaks-noquotes",
            "--aggregators",
            "fast-or",
            "-n",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.datasets, ["census1881", "wikileaks-noquotes"]);
        assert_eq!(cli.aggregators, [Aggregator::FastOr]);
        assert_eq!(cli.iterations, 3);

        assert!(Cli::try_parse_from(["realdata-bench", "--aggregators", "and"]).is_err());
    }
}
