//! Harness configuration, read once from the `BENCH_`-prefixed environment.

use crate::registry::{self, REAL_DATASETS};
use figment::{Figment, providers::Env};
use serde::{Deserialize, Deserializer};
use std::{env, path::PathBuf};

/// Prefix of every environment variable read by [`HarnessConfig::load`].
pub const ENV_PREFIX: &str = "BENCH_";

/// Variables read verbatim instead of through figment, whose `Env` provider coerces values that
/// look like numbers or booleans.
const REAL_DATA_VAR: &str = "BENCH_REAL_DATA";
const DATASETS_DIR_VAR: &str = "BENCH_DATASETS_DIR";

/// Default criterion sample size for a dataset sub-test.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Switch enabling the whole real-data suite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gate {
    Enabled,
    #[default]
    Disabled,
}

impl Gate {
    /// Resolves a raw environment value.
    ///
    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts. Anything else,
    /// including an unset value, disables the gate.
    pub fn from_value(value: Option<&str>) -> Self {
        value.and_then(parse_bool).map(Self::from).unwrap_or_default()
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl From<bool> for Gate {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Errors while building a [`HarnessConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to extract harness config: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("unknown dataset `{0}`. Known datasets: {known}", known = REAL_DATASETS.join(", "))]
    UnknownDataset(String),
}

/// Configuration of a real-data suite run.
///
/// | Env var              | Field          |
/// |----------------------|----------------|
/// | `BENCH_REAL_DATA`    | `real_data`    |
/// | `BENCH_DATASETS_DIR` | `datasets_dir` |
/// | `BENCH_DATASETS`     | `datasets`     |
/// | `BENCH_SAMPLE_SIZE`  | `sample_size`  |
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Whether the suite runs at all. Never fails to parse, see [`Gate::from_value`].
    #[serde(skip)]
    pub real_data: Gate,
    /// Root of a `real-roaring-datasets` checkout.
    #[serde(skip)]
    pub datasets_dir: Option<PathBuf>,
    /// Restricts the suite to these datasets. `None` runs every registered dataset.
    #[serde(deserialize_with = "deserialize_list")]
    pub datasets: Option<Vec<String>>,
    /// Samples collected per dataset sub-test.
    pub sample_size: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            real_data: Gate::Disabled,
            datasets_dir: None,
            datasets: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl HarnessConfig {
    /// Reads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: Self =
            Self::figment().extract().map_err(|err| ConfigError::Extract(Box::new(err)))?;
        config.real_data = Gate::from_value(env::var(REAL_DATA_VAR).ok().as_deref());
        config.datasets_dir =
            env::var_os(DATASETS_DIR_VAR).filter(|dir| !dir.is_empty()).map(PathBuf::from);
        Ok(config)
    }

    /// The figment [`HarnessConfig::load`] extracts from.
    ///
    /// The gate and the repository root are not part of it, they are read verbatim by
    /// [`HarnessConfig::load`].
    pub fn figment() -> Figment {
        Figment::new().merge(Env::prefixed(ENV_PREFIX).ignore(&["real_data", "datasets_dir"]))
    }

    pub fn gate(&self) -> Gate {
        self.real_data
    }

    /// The datasets to run, in registry order.
    ///
    /// Fails if [`HarnessConfig::datasets`] names a dataset that is not registered.
    pub fn selected_datasets(&self) -> Result<Vec<&'static str>, ConfigError> {
        let Some(wanted) = &self.datasets else { return Ok(REAL_DATASETS.to_vec()) };
        if let Some(unknown) = wanted.iter().find(|name| registry::lookup(name).is_none()) {
            return Err(ConfigError::UnknownDataset(unknown.clone()));
        }
        Ok(REAL_DATASETS
            .iter()
            .copied()
            .filter(|known| wanted.iter().any(|name| name == known))
            .collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    List(Vec<String>),
    Text(String),
}

fn deserialize_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let items = match Option::<RawList>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawList::List(items)) => items,
        Some(RawList::Text(text)) => text.split(',').map(str::to_string).collect(),
    };
    let items: Vec<_> =
        items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
    Ok(Some(items))
}
