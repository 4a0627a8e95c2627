//! Saving layout configurations to timestamp-named files.
//!
//! Each save produces a new `<yyyyMMddHHmmss>.txt` file holding one encoded
//! record. The record is first written to a temporary file in the destination
//! directory and then renamed into place, so a failed save never leaves a
//! partial file under a final name.

use chrono::{Local, NaiveDateTime};
use formation_core::{codec, CodecError, LayoutConfig};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Extension of saved layout files.
pub const LAYOUT_FILE_EXTENSION: &str = "txt";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Saves within the same second get a numeric suffix; give up after this many.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Failure to save or read a layout file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The destination directory could not be created.
    #[error("failed to create layout directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// The file could not be written or moved into place.
    #[error("failed to write layout file in {}: {source}", .dir.display())]
    Write {
        /// Destination directory.
        dir: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// Every candidate name for this timestamp is taken.
    #[error("no free layout file name for {stem} in {}", .dir.display())]
    NameExhausted {
        /// Destination directory.
        dir: PathBuf,
        /// Timestamp stem that collided.
        stem: String,
    },
    /// A saved file could not be read.
    #[error("failed to read layout file {}: {source}", .path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// The record could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Save `config` into `dir`, named after the current local time.
///
/// Names use a 24-hour clock (`%H`), not the 12-hour `hh` of older layout
/// files, so morning and evening saves never share a name.
pub fn save_config(config: &LayoutConfig, dir: &Path) -> Result<PathBuf, PersistError> {
    save_config_at(config, dir, Local::now().naive_local())
}

/// Save `config` into `dir`, named after `timestamp`.
///
/// Creates `dir` if needed. Returns the path of the new file.
pub fn save_config_at(
    config: &LayoutConfig,
    dir: &Path,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, PersistError> {
    let contents = codec::encode(config)?;

    fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| PersistError::Write {
        dir: dir.to_path_buf(),
        source,
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(contents.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;

    let stem = timestamp.format(TIMESTAMP_FORMAT).to_string();
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(file_name(&stem, attempt));
        match staged.persist_noclobber(&path) {
            Ok(_) => {
                info!(path = %path.display(), shape = %config.shape(), "saved layout");
                return Ok(path);
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "layout file name taken, trying next");
                staged = err.file;
            }
            Err(err) => return Err(write_err(err.error)),
        }
    }

    Err(PersistError::NameExhausted {
        dir: dir.to_path_buf(),
        stem,
    })
}

/// Read and decode a saved layout file.
pub fn read_config(path: &Path) -> Result<LayoutConfig, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(codec::decode(&text)?)
}

fn file_name(stem: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{stem}.{LAYOUT_FILE_EXTENSION}")
    } else {
        format!("{stem}-{attempt}.{LAYOUT_FILE_EXTENSION}")
    }
}
