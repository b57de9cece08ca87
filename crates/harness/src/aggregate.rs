//! The aggregations timed by the suites.

use realdata_engine::Bitmap;
use std::{fmt, str::FromStr};

/// Cardinality of the union of `bitmaps`, computed across the rayon worker pool.
pub fn par_or_cardinality<B: Bitmap>(bitmaps: &[B]) -> u64 {
    B::par_union(bitmaps).cardinality()
}

/// Cardinality of the union of `bitmaps`, computed on the calling thread.
pub fn fast_or_cardinality<B: Bitmap>(bitmaps: &[B]) -> u64 {
    B::fast_union(bitmaps).cardinality()
}

/// Names one of the union strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Aggregator {
    ParOr,
    FastOr,
}

impl Aggregator {
    pub const ALL: [Self; 2] = [Self::ParOr, Self::FastOr];

    pub fn name(self) -> &'static str {
        match self {
            Self::ParOr => "par-or",
            Self::FastOr => "fast-or",
        }
    }

    /// Name of the benchmark group holding one sub-test per dataset.
    pub fn suite_name(self) -> String {
        format!("real-data-{}", self.name())
    }

    /// Runs the aggregation over `bitmaps`.
    pub fn aggregate<B: Bitmap>(self, bitmaps: &[B]) -> u64 {
        match self {
            Self::ParOr => par_or_cardinality(bitmaps),
            Self::FastOr => fast_or_cardinality(bitmaps),
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "par-or" | "par_or" | "paror" => Ok(Self::ParOr),
            "fast-or" | "fast_or" | "fastor" => Ok(Self::FastOr),
            _ => Err(format!("unknown aggregator `{s}`, expected `par-or` or `fast-or`")),
        }
    }
}
