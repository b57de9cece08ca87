//! Turns dataset archives into bitmaps.
//!
//! A dataset is a zip archive named `<dataset>.zip` in the repository root. Every entry of the
//! archive is a flat text file holding a comma-separated list of decimal `u32` members and
//! becomes exactly one bitmap.

use crate::{
    config::HarnessConfig,
    error::{DatasetError, TokenError},
    registry,
};
use realdata_engine::Bitmap;
use std::{
    fs::File,
    io::{self, Read, Seek},
    path::{Path, PathBuf},
    time::Instant,
};
use zip::{ZipArchive, result::ZipError};

/// Anything that can produce the bitmaps of a dataset.
pub trait DatasetSource<B: Bitmap> {
    /// Loads every bitmap of `dataset`, in archive order, compacting each one if `optimize` is
    /// set.
    fn load(&self, dataset: &str, optimize: bool) -> Result<Vec<B>, DatasetError>;
}

/// Loads datasets from a `real-roaring-datasets` checkout on disk.
#[derive(Clone, Debug, Default)]
pub struct DatasetLoader {
    repository: Option<PathBuf>,
}

impl DatasetLoader {
    /// Creates a loader reading archives from `repository`.
    ///
    /// A loader without a repository fails every load with [`DatasetError::Unconfigured`].
    pub fn new(repository: Option<PathBuf>) -> Self {
        Self { repository }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.datasets_dir.clone())
    }

    pub fn repository(&self) -> Option<&Path> {
        self.repository.as_deref()
    }

    /// Resolves the archive of `dataset`, checking that both the repository and the archive
    /// exist.
    pub fn archive_path(&self, dataset: &str) -> Result<PathBuf, DatasetError> {
        let repository = self
            .repository
            .as_deref()
            .ok_or_else(|| DatasetError::Unconfigured { dataset: dataset.to_string() })?;

        if !repository.is_dir() {
            return Err(DatasetError::RepositoryMissing {
                dataset: dataset.to_string(),
                path: repository.to_path_buf(),
            });
        }

        let path = registry::archive_path(repository, dataset);
        if !path.exists() {
            return Err(DatasetError::DatasetMissing { dataset: dataset.to_string(), path });
        }
        Ok(path)
    }

    /// Loads every bitmap of `dataset`.
    pub fn load_bitmaps<B: Bitmap>(
        &self,
        dataset: &str,
        optimize: bool,
    ) -> Result<Vec<B>, DatasetError> {
        let path = self.archive_path(dataset)?;
        let file = File::open(&path).map_err(|err| DatasetError::ArchiveOpen {
            dataset: dataset.to_string(),
            path: path.clone(),
            source: ZipError::Io(err),
        })?;
        read_archive(dataset, &path, file, optimize)
    }
}

impl<B: Bitmap> DatasetSource<B> for DatasetLoader {
    fn load(&self, dataset: &str, optimize: bool) -> Result<Vec<B>, DatasetError> {
        self.load_bitmaps(dataset, optimize)
    }
}

/// Reads the bitmaps of `dataset` from an already opened archive.
///
/// `path` is only used to describe errors.
pub fn read_archive<B: Bitmap, R: Read + Seek>(
    dataset: &str,
    path: &Path,
    reader: R,
    optimize: bool,
) -> Result<Vec<B>, DatasetError> {
    let start = Instant::now();
    let mut archive = ZipArchive::new(reader).map_err(|source| DatasetError::ArchiveOpen {
        dataset: dataset.to_string(),
        path: path.to_path_buf(),
        source,
    })?;

    let mut bitmaps = Vec::with_capacity(archive.len());
    let mut content = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .name_for_index(index)
            .map_or_else(|| format!("#{index}"), ToString::to_string);
        let entry_io = |source: io::Error| DatasetError::EntryIo {
            dataset: dataset.to_string(),
            entry: entry.clone(),
            source,
        };

        content.clear();
        let mut file = archive.by_index(index).map_err(|err| entry_io(err.into()))?;
        file.read_to_end(&mut content).map_err(entry_io)?;
        drop(file);

        let mut bitmap: B =
            parse_entry(&content).map_err(|(token, reason)| DatasetError::Parse {
                dataset: dataset.to_string(),
                entry: entry.clone(),
                token,
                reason,
            })?;
        if optimize {
            bitmap.optimize();
        }
        trace!(dataset, %entry, cardinality = bitmap.cardinality(), "loaded entry");
        bitmaps.push(bitmap);
    }

    debug!(
        dataset,
        bitmaps = bitmaps.len(),
        optimize,
        elapsed = ?start.elapsed(),
        "loaded dataset"
    );
    Ok(bitmaps)
}

/// Builds a bitmap from one comma-separated member list.
///
/// Tokens are trimmed of Unicode whitespace. Invalid UTF-8 is replaced and then rejected as an
/// invalid digit. On failure returns the offending token, trimmed, along with the reason it was
/// rejected.
pub fn parse_entry<B: Bitmap>(content: &[u8]) -> Result<B, (String, TokenError)> {
    let content = String::from_utf8_lossy(content);
    let mut bitmap = B::new();
    for token in content.split(',') {
        let token = token.trim();
        let member =
            parse_member(token.as_bytes()).map_err(|reason| (token.to_string(), reason))?;
        bitmap.insert(member);
    }
    Ok(bitmap)
}

/// Parses an unsigned base-10 `u32`. Signs are rejected.
pub fn parse_member(token: &[u8]) -> Result<u32, TokenError> {
    if token.is_empty() {
        return Err(TokenError::Empty);
    }
    token.iter().try_fold(0u32, |value, &byte| {
        if !byte.is_ascii_digit() {
            return Err(TokenError::InvalidDigit);
        }
        value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u32::from(byte - b'0')))
            .ok_or(TokenError::OutOfRange)
    })
}
