//! Routes for controlling sales orders.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Get sales orders that are open via the online store api, with Brazilian
/// addresses enriched from ViaCEP.
pub async fn get_sales_order(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.enriched_open_sales().await {
        Ok(sales) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Success",
                "sales_data": sales,
            })),
        )
            .into_response(),
        Err(err) => errors::service_error_to_response(err),
    }
}

/// Ingest all enriched sales orders into storage, closing each sale at the
/// online store as it lands.
pub async fn add_order(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ingest_orders().await {
        Ok(added) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Added Orders",
                "orders": added.iter().map(dto::order_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(err) => errors::service_error_to_response(err),
    }
}

/// Get orders with pending invoice status.
pub async fn get_pending_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.pending_invoices().await {
        Ok(pending) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "There are pending orders",
                "orders": pending
                    .iter()
                    .map(dto::pending_order_to_json)
                    .collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(err) => errors::service_error_to_response(err),
    }
}

/// Transition one order's invoice to `Completed`.
pub async fn complete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<dto::CompleteOrderForm>,
) -> axum::response::Response {
    match services.complete_order(form.order_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("Order {} completed successfully", form.order_id),
            })),
        )
            .into_response(),
        Err(err) => errors::service_error_to_response(err),
    }
}
