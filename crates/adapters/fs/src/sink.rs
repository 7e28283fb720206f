//! JSON file configuration sink.

use std::future::Future;
use std::path::{Path, PathBuf};

use roomconf_app::ports::{ConfigurationSink, Submission};
use roomconf_domain::error::RoomConfError;

use crate::error::FsError;

/// File name used when exporting the configuration without an explicit path.
pub const DEFAULT_FILE_NAME: &str = "room_configuration.json";

/// Writes each submitted document to a file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, document_json: String) -> Result<(), FsError> {
        let write_error = |source| FsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(&self.path, document_json)
            .await
            .map_err(write_error)
    }
}

impl ConfigurationSink for JsonFileSink {
    fn submit(
        &self,
        document_json: String,
    ) -> impl Future<Output = Result<Submission, RoomConfError>> + Send {
        async move {
            let bytes = document_json.len();
            self.write(document_json).await?;
            tracing::info!(path = %self.path.display(), bytes, "configuration exported");
            Ok(Submission::accepted())
        }
    }
}
