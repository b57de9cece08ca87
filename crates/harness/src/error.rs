//! Errors raised while loading a dataset

use std::{error::Error, io, path::PathBuf};

/// Why a single token of an archive entry could not be read as a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("empty token")]
    Empty,
    #[error("invalid digit found in token")]
    InvalidDigit,
    #[error("number too large to fit in u32")]
    OutOfRange,
}

/// Failure to turn a dataset archive into bitmaps.
///
/// Any of these aborts the whole load; no bitmaps are returned for the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(
        "cannot load dataset {dataset}: the dataset repository is not configured. \
         Set BENCH_DATASETS_DIR or disable BENCH_REAL_DATA"
    )]
    Unconfigured { dataset: String },
    #[error(
        "cannot load dataset {dataset}: repository {} does not exist. \
         Run `git clone https://github.com/RoaringBitmap/real-roaring-datasets {}`",
        .path.display(),
        .path.display()
    )]
    RepositoryMissing { dataset: String, path: PathBuf },
    #[error("dataset {dataset} does not exist, tried path: {}", .path.display())]
    DatasetMissing { dataset: String, path: PathBuf },
    #[error("failed to open archive {} of dataset {dataset}", .path.display())]
    ArchiveOpen {
        dataset: String,
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("failed to read entry {entry} of dataset {dataset}")]
    EntryIo {
        dataset: String,
        entry: String,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {token:?} as u32 in entry {entry} of dataset {dataset}: {reason}")]
    Parse { dataset: String, entry: String, token: String, reason: TokenError },
}

/// Fieldless mirror of [`DatasetError`], for callers that branch on the failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unconfigured,
    RepositoryMissing,
    DatasetMissing,
    ArchiveOpen,
    EntryIo,
    Parse,
}

impl DatasetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unconfigured { .. } => ErrorKind::Unconfigured,
            Self::RepositoryMissing { .. } => ErrorKind::RepositoryMissing,
            Self::DatasetMissing { .. } => ErrorKind::DatasetMissing,
            Self::ArchiveOpen { .. } => ErrorKind::ArchiveOpen,
            Self::EntryIo { .. } => ErrorKind::EntryIo,
            Self::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// The dataset the failed load was for.
    pub fn dataset(&self) -> &str {
        match self {
            Self::Unconfigured { dataset } |
            Self::RepositoryMissing { dataset, .. } |
            Self::DatasetMissing { dataset, .. } |
            Self::ArchiveOpen { dataset, .. } |
            Self::EntryIo { dataset, .. } |
            Self::Parse { dataset, .. } => dataset,
        }
    }
}

/// Displays an error and all of its sources in a single line.
pub fn display_chain(error: &(dyn Error + 'static)) -> String {
    dedup_chain(error).join("; ")
}

/// Collects the messages of `error` and its sources, dropping a source whose message is already
/// contained in the previous one.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut next = Some(error);
    while let Some(err) = next {
        causes.push(err.to_string().trim().to_string());
        next = err.source();
    }
    // Deduplicate the common pattern `msg1: msg2; msg2` -> `msg1: msg2`.
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}
