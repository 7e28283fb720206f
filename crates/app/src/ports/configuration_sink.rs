//! Configuration sink port: hands the compiled document to its consumer.
//!
//! The same serialized bytes are used whether the consumer is a file export
//! or an upload to the control backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use roomconf_domain::error::RoomConfError;

/// Acknowledgement returned by a sink.
///
/// A sink that was reached but refused the document reports
/// `success: false` with a message, rather than an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl Submission {
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            error_msg: None,
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_msg: Some(message.into()),
        }
    }
}

/// Receives serialized configuration documents.
pub trait ConfigurationSink {
    /// Submit one pretty-printed document.
    fn submit(
        &self,
        document_json: String,
    ) -> impl Future<Output = Result<Submission, RoomConfError>> + Send;
}

impl<T: ConfigurationSink + Send + Sync> ConfigurationSink for std::sync::Arc<T> {
    fn submit(
        &self,
        document_json: String,
    ) -> impl Future<Output = Result<Submission, RoomConfError>> + Send {
        (**self).submit(document_json)
    }
}
