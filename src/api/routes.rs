use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/payment-methods", get(list_payment_methods))
        .route("/api/payment-methods/:method_id/fields", get(payment_fields))
        .route(
            "/api/payment-methods/:method_id/orders/:order_id/process",
            post(process_payment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
