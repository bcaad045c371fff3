use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::news::{HeadlineProvider, HeadlineSummary, MAX_HEADLINES};

const TOPICS: &str = "technology,finance";
const COUNTRY: &str = "in";
const LANGUAGES: &str = "en,hi";
const CATEGORY: &str = "technology";

/// Technology and finance headlines from newsdata.io.
pub struct NewsDataProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl NewsDataProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .build()?;
        Ok(NewsDataProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn request_url(&self) -> Result<Url> {
        let mut params = vec![
            ("q", TOPICS),
            ("country", COUNTRY),
            ("language", LANGUAGES),
            ("category", CATEGORY),
        ];
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.as_str()));
        }
        let endpoint = format!("{}/api/1/news", self.base_url);
        Url::parse_with_params(&endpoint, &params)
            .with_context(|| format!("Invalid news endpoint: {endpoint}"))
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    results: Vec<Value>,
}

// Required keys may carry `null`; only an absent key is malformed.
#[derive(Debug, Deserialize)]
struct Article {
    #[serde(deserialize_with = "nullable")]
    title: Option<String>,
    #[serde(deserialize_with = "nullable")]
    link: Option<String>,
    #[serde(deserialize_with = "nullable")]
    source_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(rename = "pubDate", deserialize_with = "nullable")]
    pub_date: Option<String>,
}

fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl From<Article> for HeadlineSummary {
    fn from(article: Article) -> Self {
        HeadlineSummary {
            title: article.title,
            link: article.link,
            source: article.source_name,
            image: article.image_url,
            published: article.pub_date,
        }
    }
}

#[async_trait]
impl HeadlineProvider for NewsDataProvider {
    #[instrument(name = "NewsDataFetch", skip(self))]
    async fn top_headlines(&self) -> Result<Vec<HeadlineSummary>> {
        let url = self.request_url()?;
        debug!(
            "Requesting headlines from {}{}",
            self.base_url,
            url.path()
        );
        if self.api_key.is_none() {
            warn!("No news API key configured, upstream will likely reject the request");
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for headlines", e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(%status, "Headline upstream unavailable, returning no headlines");
            return Ok(Vec::new());
        }

        let text = response.text().await?;
        let data: NewsResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse headlines response: {}", e))?;

        // Only the records that are returned get inspected; one bad record
        // among them fails the whole batch.
        data.results
            .into_iter()
            .take(MAX_HEADLINES)
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Article>(record)
                    .map(HeadlineSummary::from)
                    .map_err(|e| anyhow!("Malformed headline record {}: {}", index, e))
            })
            .collect()
    }
}
