use axum::{
    Router,
    routing::{get, post, put},
};

pub mod orders;
pub mod system;
pub mod viacep;

/// Router for the whole service surface. Paths are flat; callers predate
/// any nesting scheme.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/get_sales_order", get(orders::get_sales_order))
        .route("/add_order", post(orders::add_order))
        .route("/get_pending_invoices", get(orders::get_pending_invoices))
        .route("/complete_order", put(orders::complete_order))
        .route("/get_viacep/", get(viacep::get_viacep))
}
