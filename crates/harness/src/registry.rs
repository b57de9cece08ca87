//! The datasets of the `real-roaring-datasets` collection.

use std::path::{Path, PathBuf};

/// Known datasets, in the order their sub-tests run.
pub const REAL_DATASETS: &[&str] = &[
    "census-income_srt",
    "census-income",
    "census1881_srt",
    "census1881",
    "dimension_003",
    "dimension_008",
    "dimension_033",
    "uscensus2000",
    "weather_sept_85_srt",
    "weather_sept_85",
    "wikileaks-noquotes_srt",
    "wikileaks-noquotes",
];

/// Returns the registered identifier equal to `name`.
pub fn lookup(name: &str) -> Option<&'static str> {
    REAL_DATASETS.iter().copied().find(|known| *known == name)
}

/// Path of the archive holding `dataset` inside `repository`.
pub fn archive_path(repository: &Path, dataset: &str) -> PathBuf {
    repository.join(format!("{dataset}.zip"))
}
