use crate::application::{
    CheckoutContext, CheckoutService, ErrorResponse, FieldsQuery, ProcessPaymentResponse,
};
use crate::domain::errors::DomainError;
use crate::infrastructure::SessionNotifier;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{error, info};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub checkout_service: Arc<CheckoutService>,
    pub notifier: Arc<SessionNotifier>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(code: &str, err: DomainError) -> ApiError {
    let status = match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::OrderNotFound(_) | DomainError::UnknownPaymentMethod(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse::new(code.to_string(), err.localized_message())),
    )
}

/// 可用支付方式列表
pub async fn list_payment_methods(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.checkout_service.available_methods())
}

/// 渲染支付字段
pub async fn payment_fields(
    State(state): State<AppState>,
    Path(method_id): Path<String>,
    Query(query): Query<FieldsQuery>,
) -> Result<Html<String>, ApiError> {
    let context = CheckoutContext::from(query);

    state
        .checkout_service
        .payment_fields(&method_id, &context)
        .await
        .map(Html)
        .map_err(|e| {
            error!("Payment fields error: {}", e);
            error_response("FIELDS_ERROR", e)
        })
}

/// 处理支付
pub async fn process_payment(
    State(state): State<AppState>,
    Path((method_id, order_id)): Path<(String, u64)>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Received payment request for order {} via {}", order_id, method_id);

    let result = state
        .checkout_service
        .process_payment(&method_id, order_id)
        .await;
    let messages = state.notifier.take_notices(order_id).await;

    match result {
        Ok(result) => Ok(Json(ProcessPaymentResponse { result, messages })),
        Err(e) => {
            error!("Payment processing error: {}", e);
            Err(error_response("PAYMENT_ERROR", e))
        }
    }
}

/// 健康检查
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
