//! Headline abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Upper bound on headlines returned per request.
pub const MAX_HEADLINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineSummary {
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub published: Option<String>,
}

#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Returns at most [`MAX_HEADLINES`] headlines in upstream order.
    ///
    /// An unavailable upstream yields an empty list; a malformed record is
    /// an error.
    async fn top_headlines(&self) -> Result<Vec<HeadlineSummary>>;
}
