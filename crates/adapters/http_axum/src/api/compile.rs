//! JSON handler for full compilation.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roomconf_app::ports::ConfigurationSink;
use roomconf_domain::document::ConfigDocument;
use roomconf_domain::section::RawSections;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of a successful compilation.
#[derive(Serialize)]
pub struct CompileBody {
    pub document: ConfigDocument,
}

/// Possible responses from the compile endpoint.
pub enum CompileResponse {
    Ok(Json<CompileBody>),
}

impl IntoResponse for CompileResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/compile`
pub async fn compile<K>(
    State(state): State<AppState<K>>,
    Json(sections): Json<RawSections>,
) -> Result<CompileResponse, ApiError>
where
    K: ConfigurationSink + Send + Sync + 'static,
{
    let document = state
        .configuration_service
        .compile(&sections)
        .into_result()?;
    Ok(CompileResponse::Ok(Json(CompileBody { document })))
}
