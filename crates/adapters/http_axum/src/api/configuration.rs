//! JSON handler for publishing a configuration to the sink.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use roomconf_app::ports::{ConfigurationSink, Submission};
use roomconf_domain::section::RawSections;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the publish endpoint.
pub enum PublishResponse {
    Accepted(Json<Submission>),
    /// The sink was reached but refused the document.
    Refused(Json<Submission>),
}

impl IntoResponse for PublishResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => json.into_response(),
            Self::Refused(json) => (StatusCode::BAD_GATEWAY, json).into_response(),
        }
    }
}

/// `POST /api/configuration`
pub async fn publish<K>(
    State(state): State<AppState<K>>,
    Json(sections): Json<RawSections>,
) -> Result<PublishResponse, ApiError>
where
    K: ConfigurationSink + Send + Sync + 'static,
{
    let submission = state.configuration_service.publish(&sections).await?;
    if submission.success {
        Ok(PublishResponse::Accepted(Json(submission)))
    } else {
        Ok(PublishResponse::Refused(Json(submission)))
    }
}
