//! JSON handler for the device identification step.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roomconf_app::ports::ConfigurationSink;
use roomconf_domain::registry::DeviceRegistry;
use roomconf_domain::section::RawSections;

use crate::error::ApiError;
use crate::state::AppState;

/// Identified devices, keyed by name.
#[derive(Serialize)]
pub struct DevicesBody {
    pub devices: DeviceRegistry,
}

/// Possible responses from the device validation endpoint.
pub enum ValidateResponse {
    Ok(Json<DevicesBody>),
}

impl IntoResponse for ValidateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/validate/devices`
pub async fn validate<K>(
    State(state): State<AppState<K>>,
    Json(sections): Json<RawSections>,
) -> Result<ValidateResponse, ApiError>
where
    K: ConfigurationSink + Send + Sync + 'static,
{
    let devices = state.configuration_service.validate_devices(&sections)?;
    Ok(ValidateResponse::Ok(Json(DevicesBody { devices })))
}
