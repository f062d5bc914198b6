use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;

pub mod config;
pub mod data;

pub use config::ServerConfig;
pub use data::{seed_payments, Payment};

pub const PAYMENTS_PATH: &str = "/api/payments";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsQuery {
    pub search: Option<String>,
    pub currency: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsResponse {
    pub payments: Vec<Payment>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Payment not found")]
    NotFound,
    #[error("Unauthorized access")]
    Unauthorized,
    #[error("Internal Server Error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    payments: Arc<Vec<Payment>>,
    default_page_size: u32,
}

pub fn app() -> Router {
    app_with_config(&ServerConfig::default())
}

pub fn app_with_config(config: &ServerConfig) -> Router {
    let state = AppState {
        payments: Arc::new(seed_payments()),
        default_page_size: config.page_size,
    };
    Router::new()
        .route(PAYMENTS_PATH, get(list_payments))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_config(listener: TcpListener, config: &ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}

async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentsQuery>,
) -> Result<Json<PaymentsResponse>, AppError> {
    log::info!("GET {PAYMENTS_PATH} {query:?}");
    let search = query.search.unwrap_or_default().to_lowercase();
    let currency = query.currency.unwrap_or_default();
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(state.default_page_size);

    match search.as_str() {
        "pay_404" => return Err(AppError::NotFound),
        "401" => return Err(AppError::Unauthorized),
        "pay_500" => return Err(AppError::Internal),
        _ => {}
    }

    let filtered: Vec<&Payment> = state
        .payments
        .iter()
        .filter(|p| search.is_empty() || matches_search(p, &search))
        .filter(|p| currency.is_empty() || p.currency == currency)
        .collect();

    if filtered.is_empty() {
        return Err(AppError::NotFound);
    }

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let payments = filtered
        .iter()
        .skip(start)
        .take(page_size as usize)
        .copied()
        .cloned()
        .collect();

    Ok(Json(PaymentsResponse {
        payments,
        total: filtered.len(),
        page,
        page_size,
    }))
}

/// Case-insensitive substring match on id, status and currency. `needle`
/// is already lower-cased.
fn matches_search(payment: &Payment, needle: &str) -> bool {
    [&payment.id, &payment.status, &payment.currency]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
