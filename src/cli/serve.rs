use crate::api::{AppState, app_router};
use crate::core::config::AppConfig;
use crate::expenses::ExpenseService;
use crate::providers::{ExchangeRateApiProvider, NewsDataProvider};
use crate::store::DiskExpenseStore;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Wires the disk store and upstream providers described by `config`.
pub fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let data_path = config.default_data_path()?;
    let store = DiskExpenseStore::open(&data_path)?;

    let rates = ExchangeRateApiProvider::new(&config.providers.exchange_rate.base_url)
        .context("Failed to build exchange rate client")?;

    let news = &config.providers.news;
    if news.api_key.is_none() {
        warn!("NEWS_API_KEY is not set, /api/news/ will return no headlines");
    }
    let headlines = NewsDataProvider::new(&news.base_url, news.api_key.clone())
        .context("Failed to build news client")?;

    Ok(Arc::new(AppState {
        expenses: ExpenseService::new(Arc::new(store)),
        rates: Arc::new(rates),
        headlines: Arc::new(headlines),
    }))
}

pub async fn run(config: &AppConfig, listen: Option<SocketAddr>) -> Result<()> {
    let state = build_state(config)?;
    let addr = listen.unwrap_or(config.server.listen_addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
