//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const QUOTE_BASE: &str = "USD";
pub const QUOTE_TARGET: &str = "INR";

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

/// A single exchange rate as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    pub base: String,
    pub target: String,
    pub rate: f64,
}

impl RateQuote {
    pub fn new(base: &str, target: &str, rate: f64) -> Self {
        RateQuote {
            base: base.to_string(),
            target: target.to_string(),
            rate,
        }
    }
}
