use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const DOWNLOADS_SUBDIR: &str = "Downloads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("output file name {name:?} is empty or not a plain file name")]
    InvalidFileName { name: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Destination for produced files, the command-line counterpart of a
/// browser download.
#[derive(Debug, Clone)]
pub struct StorageService {
    output_dir: PathBuf,
}

impl StorageService {
    pub const fn with_paths(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// `output_dir` when configured, else `~/Downloads`.
    pub fn with_default_paths(output_dir: Option<&Path>) -> StorageResult<Self> {
        if let Some(dir) = output_dir {
            return Ok(Self::with_paths(dir.to_path_buf()));
        }
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut dir = PathBuf::from(home);
        dir.push(DOWNLOADS_SUBDIR);
        Ok(Self::with_paths(dir))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn allocate_target_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        validate_file_name(file_name)?;
        Ok(self.output_dir.join(file_name))
    }

    /// Writes `bytes` as `file_name` in the output directory, replacing any
    /// existing file of that name.
    pub fn save_output(&self, file_name: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        let target = self.allocate_target_path(file_name)?;
        save_overwrite(&target, bytes)?;
        tracing::debug!(path = %target.display(), bytes = bytes.len(), "saved output");
        Ok(target)
    }
}

fn validate_file_name(file_name: &str) -> StorageResult<()> {
    let plain = Path::new(file_name)
        .file_name()
        .is_some_and(|name| name == file_name);
    if file_name.is_empty() || !plain {
        return Err(StorageError::InvalidFileName {
            name: file_name.to_string(),
        });
    }
    Ok(())
}

fn save_overwrite<D: AsRef<Path>>(destination: D, bytes: &[u8]) -> StorageResult<()> {
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let _ = fs::remove_file(destination);
    fs::write(destination, bytes)?;
    Ok(())
}
