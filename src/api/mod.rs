//! HTTP surface.

pub mod error;
mod expenses;
mod proxy;
mod summary;

use crate::core::{CurrencyRateProvider, HeadlineProvider};
use crate::expenses::ExpenseService;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Everything a request handler can reach.
pub struct AppState {
    pub expenses: ExpenseService,
    pub rates: Arc<dyn CurrencyRateProvider>,
    pub headlines: Arc<dyn HeadlineProvider>,
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(expenses::router())
        .merge(proxy::router())
        .merge(summary::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
