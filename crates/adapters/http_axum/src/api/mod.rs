//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod compile;
#[allow(clippy::missing_errors_doc)]
pub mod configuration;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::post;

use roomconf_app::ports::ConfigurationSink;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<K>() -> Router<AppState<K>>
where
    K: ConfigurationSink + Send + Sync + 'static,
{
    Router::new()
        .route("/compile", post(compile::compile::<K>))
        .route("/validate/devices", post(devices::validate::<K>))
        .route("/configuration", post(configuration::publish::<K>))
}
