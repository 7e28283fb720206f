//! Filesystem adapter error types.

use std::path::PathBuf;

use roomconf_domain::error::RoomConfError;

/// Errors specific to the filesystem adapter.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Reading the sections file failed.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the configuration file failed.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sections file is not a JSON object.
    #[error("invalid sections file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<FsError> for RoomConfError {
    fn from(err: FsError) -> Self {
        Self::Storage(Box::new(err))
    }
}
