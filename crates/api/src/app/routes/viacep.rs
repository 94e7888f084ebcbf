//! ViaCEP proxy: resolves a Brazilian zip code to its full address
//! information via the external ViaCEP API.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};
use percent_encoding::percent_decode_str;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Callers sometimes double-encode the zip code (a `%` in the value gets
/// re-encoded in transit), so decode twice on top of the framework's own
/// query decoding.
fn double_decode(raw: &str) -> String {
    let once = percent_decode_str(raw).decode_utf8_lossy().into_owned();
    percent_decode_str(&once).decode_utf8_lossy().into_owned()
}

pub async fn get_viacep(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ZipCodeQuery>,
) -> axum::response::Response {
    let zip_code = double_decode(&query.zip_code);

    match services.viacep_lookup(&zip_code).await {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Success",
                "data": data,
            })),
        )
            .into_response(),
        Err(err) => errors::service_error_to_response(err),
    }
}
