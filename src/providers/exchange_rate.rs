use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;

/// Rates from exchangerate-api.com, fetched fresh on every call.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let url = format!("{}/v4/latest/{}", self.base_url, from);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, from))?;

        // anything but 200 is treated as unavailable, including other 2xx
        if response.status() != reqwest::StatusCode::OK {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                from
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", from, e))?;

        data.rates
            .get(to)
            .copied()
            .filter(|rate| *rate != 0.0)
            .ok_or_else(|| anyhow!("No rate found for currency pair: {}{}", from, to))
    }
}
