//! JSON file section source.

use std::future::Future;
use std::path::{Path, PathBuf};

use roomconf_app::ports::SectionSource;
use roomconf_domain::error::RoomConfError;
use roomconf_domain::section::RawSections;

use crate::error::FsError;

/// Reads split sections from a JSON file shaped
/// `{"devices": [...], "groups": [...], "scenes": [...], "remoteControls": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<RawSections, FsError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FsError::Read {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| FsError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl SectionSource for JsonFileSource {
    fn load(&self) -> impl Future<Output = Result<RawSections, RoomConfError>> + Send {
        async move {
            let sections = self.read().await?;
            tracing::debug!(path = %self.path.display(), "loaded sections");
            Ok(sections)
        }
    }
}
