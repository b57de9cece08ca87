//! # realdata-harness
//!
//! Loads the archived real-world membership lists of the `real-roaring-datasets` collection
//! into bitmaps and drives timed multi-way unions over them, one sub-test per dataset.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod aggregate;
pub use aggregate::{Aggregator, fast_or_cardinality, par_or_cardinality};

pub mod config;
pub use config::{ConfigError, Gate, HarnessConfig};

pub mod driver;
pub use driver::{DatasetOutcome, Measurement, Suite, SuiteReport, SuiteStatus};

pub mod error;
pub use error::{DatasetError, ErrorKind, TokenError};

pub mod loader;
pub use loader::{DatasetLoader, DatasetSource};

pub mod registry;
pub use registry::REAL_DATASETS;

pub use realdata_engine::Bitmap;
