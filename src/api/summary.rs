use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::summary::{DateRange, SpendingSummary, summarize};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
struct SummaryParams {
    start: Option<String>,
    end: Option<String>,
}

fn parse_bound(name: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{name} must be a YYYY-MM-DD date"))),
        None => Ok(None),
    }
}

/// GET /api/summary/?start=YYYY-MM-DD&end=YYYY-MM-DD
async fn spending_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<SpendingSummary>> {
    let range = DateRange {
        start: parse_bound("start", params.start.as_deref())?,
        end: parse_bound("end", params.end.as_deref())?,
    };
    let expenses = state.expenses.list().await?;
    Ok(Json(summarize(&expenses, range)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/summary/", get(spending_summary))
}
