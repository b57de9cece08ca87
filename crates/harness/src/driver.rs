//! Drives one timed sub-test per dataset.

use crate::{
    config::{ConfigError, Gate, HarnessConfig},
    error::{DatasetError, display_chain},
    loader::DatasetSource,
};
use realdata_engine::Bitmap;
use std::fmt;

/// The timing facility sub-tests are registered with.
///
/// Implementations own iteration counts and reporting. The driver hands over a routine only
/// once the dataset is loaded, so nothing but the aggregation is timed.
pub trait Measurement {
    /// Registers the sub-test `name` and runs `routine` as many times as the facility wants.
    ///
    /// The value returned by `routine` keeps the aggregation from being optimized away. It may
    /// be reported but never influences timing.
    fn measure(&mut self, name: &str, routine: &mut dyn FnMut() -> u64);
}

/// Overall result of a suite run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuiteStatus {
    /// The gate was disabled, no dataset was touched.
    Skipped,
    /// Every dataset loaded and was measured.
    Passed,
    /// At least one dataset failed to load.
    Failed,
}

impl fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skipped => "skipped",
            Self::Passed => "passed",
            Self::Failed => "failed",
        })
    }
}

/// What happened to one dataset sub-test.
#[derive(Debug)]
pub struct DatasetOutcome {
    pub dataset: &'static str,
    /// Number of bitmaps the aggregation ran over, or why the dataset could not be loaded.
    pub result: Result<usize, DatasetError>,
}

#[derive(Debug)]
pub struct SuiteReport {
    pub suite: String,
    pub status: SuiteStatus,
    pub outcomes: Vec<DatasetOutcome>,
}

impl SuiteReport {
    pub fn failures(&self) -> impl Iterator<Item = &DatasetError> {
        self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().err())
    }
}

/// A named run of one aggregation over the registered datasets.
#[derive(Clone, Debug)]
pub struct Suite {
    name: String,
    gate: Gate,
    datasets: Vec<&'static str>,
}

impl Suite {
    pub fn new(name: impl Into<String>, gate: Gate, datasets: Vec<&'static str>) -> Self {
        Self { name: name.into(), gate, datasets }
    }

    /// Builds the suite `name` from the gate and dataset selection of `config`.
    ///
    /// The dataset selection is not validated when the gate is disabled.
    pub fn from_config(
        name: impl Into<String>,
        config: &HarnessConfig,
    ) -> Result<Self, ConfigError> {
        let gate = config.gate();
        let datasets = if gate.is_enabled() { config.selected_datasets()? } else { Vec::new() };
        Ok(Self::new(name, gate, datasets))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datasets(&self) -> &[&'static str] {
        &self.datasets
    }

    /// Runs `aggregate` over every dataset, in order, one sub-test each.
    ///
    /// Each dataset is loaded once with compaction enabled and its bitmaps are dropped when its
    /// sub-test ends. A load failure aborts that sub-test only.
    pub fn run<B, S, M>(
        &self,
        source: &S,
        aggregate: impl Fn(&[B]) -> u64,
        measurement: &mut M,
    ) -> SuiteReport
    where
        B: Bitmap,
        S: DatasetSource<B> + ?Sized,
        M: Measurement + ?Sized,
    {
        let suite = self.name.as_str();
        if !self.gate.is_enabled() {
            info!(suite, "skipping real-data suite, set BENCH_REAL_DATA=true to enable it");
            return SuiteReport {
                suite: self.name.clone(),
                status: SuiteStatus::Skipped,
                outcomes: Vec::new(),
            };
        }

        info!(suite, datasets = self.datasets.len(), "running real-data suite");
        let mut outcomes = Vec::with_capacity(self.datasets.len());
        for &dataset in &self.datasets {
            let result = match source.load(dataset, true) {
                Ok(bitmaps) => {
                    measurement.measure(dataset, &mut || aggregate(&bitmaps));
                    Ok(bitmaps.len())
                }
                Err(err) => {
                    error!(suite, dataset, "{}", display_chain(&err));
                    Err(err)
                }
            };
            outcomes.push(DatasetOutcome { dataset, result });
        }

        let status = if outcomes.iter().all(|outcome| outcome.result.is_ok()) {
            SuiteStatus::Passed
        } else {
            SuiteStatus::Failed
        };
        info!(suite, %status, "finished real-data suite");
        SuiteReport { suite: self.name.clone(), status, outcomes }
    }
}
