use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::core::{Expense, ExpenseDraft};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

type Draft = Result<Json<ExpenseDraft>, JsonRejection>;

fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn body(payload: Draft) -> ApiResult<ExpenseDraft> {
    payload
        .map(|Json(draft)| draft)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn list_expenses(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = state.expenses.list().await?;
    Ok(Json(expenses))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    payload: Draft,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let draft = body(payload)?;
    let expense = state.expenses.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Expense>> {
    let expense = state.expenses.retrieve(parse_id(&id)?).await?;
    Ok(Json(expense))
}

async fn replace_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Draft,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let draft = body(payload)?;
    let expense = state.expenses.update(id, &draft, false).await?;
    Ok(Json(expense))
}

async fn patch_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Draft,
) -> ApiResult<Json<Expense>> {
    let id = parse_id(&id)?;
    let draft = body(payload)?;
    let expense = state.expenses.update(id, &draft, true).await?;
    Ok(Json(expense))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.expenses.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses/", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}/",
            get(get_expense)
                .put(replace_expense)
                .patch(patch_expense)
                .delete(delete_expense),
        )
}
