use super::AppState;
use super::error::ApiResult;
use crate::core::currency::{QUOTE_BASE, QUOTE_TARGET, RateQuote};
use crate::core::HeadlineSummary;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

const RATE_UNAVAILABLE: &str = "Unable to fetch rate";

/// GET /api/currency-rate/
async fn currency_rate(State(state): State<Arc<AppState>>) -> Response {
    match state.rates.get_rate(QUOTE_BASE, QUOTE_TARGET).await {
        Ok(rate) => Json(RateQuote::new(QUOTE_BASE, QUOTE_TARGET, rate)).into_response(),
        Err(e) => {
            warn!(error = %e, "Currency rate upstream failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": RATE_UNAVAILABLE })),
            )
                .into_response()
        }
    }
}

/// GET /api/news/
async fn top_headlines(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<HeadlineSummary>>> {
    let headlines = state.headlines.top_headlines().await?;
    Ok(Json(headlines))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency-rate/", get(currency_rate))
        .route("/news/", get(top_headlines))
}
