use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::api_types::{ApiArticle, ArticleList, GeoFeature, GeoResponse};
use crate::categories::EventCategory;
use crate::config::PipelineConfig;

const GDELT_GEO_API: &str = "https://api.gdeltproject.org/api/v2/geo/geo";
const GDELT_DOC_API: &str = "https://api.gdeltproject.org/api/v2/doc/doc";

const GEO_TIMESPAN: &str = "24h";
const GEO_MAX_POINTS: u32 = 100;
const DOC_MAX_RECORDS: u32 = 100;

/// The two outbound query shapes, abstracted so the pipeline can run
/// against canned or failing sources in tests.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn geo_features(&self, category: EventCategory) -> Result<Vec<GeoFeature>>;
    async fn articles(&self, category: EventCategory) -> Result<Vec<ApiArticle>>;
}

/// Live GDELT client. Both calls are read-only and best-effort; the
/// builder-level timeout is the only cancellation there is.
pub struct GdeltClient {
    client: Client,
}

impl GdeltClient {
    pub fn new(cfg: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl EventSource for GdeltClient {
    async fn geo_features(&self, category: EventCategory) -> Result<Vec<GeoFeature>> {
        let start = std::time::Instant::now();
        debug!("Fetching geo features - category={}", category.slug());

        let max_points = GEO_MAX_POINTS.to_string();
        let resp = self
            .client
            .get(GDELT_GEO_API)
            .query(&[
                ("query", category.geo_query()),
                ("format", "geojson"),
                ("timespan", GEO_TIMESPAN),
                ("maxpoints", max_points.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("geo request failed for {}", category.slug()))?
            .error_for_status()
            .with_context(|| format!("geo request rejected for {}", category.slug()))?;

        let body: GeoResponse = resp
            .json()
            .await
            .with_context(|| format!("decoding geo response for {}", category.slug()))?;

        info!(
            "Geo fetch completed - category={}, duration={:.2}s, features={}",
            category.slug(),
            start.elapsed().as_secs_f32(),
            body.features.len()
        );
        Ok(body.features)
    }

    async fn articles(&self, category: EventCategory) -> Result<Vec<ApiArticle>> {
        let start = std::time::Instant::now();
        debug!("Fetching articles - category={}", category.slug());

        let max_records = DOC_MAX_RECORDS.to_string();
        let resp = self
            .client
            .get(GDELT_DOC_API)
            .query(&[
                ("query", category.doc_query()),
                ("mode", "artlist"),
                ("format", "json"),
                ("maxrecords", max_records.as_str()),
                ("sort", "datedesc"),
            ])
            .send()
            .await
            .with_context(|| format!("article request failed for {}", category.slug()))?
            .error_for_status()
            .with_context(|| format!("article request rejected for {}", category.slug()))?;

        let body: ArticleList = resp
            .json()
            .await
            .with_context(|| format!("decoding article response for {}", category.slug()))?;

        info!(
            "Article fetch completed - category={}, duration={:.2}s, articles={}",
            category.slug(),
            start.elapsed().as_secs_f32(),
            body.articles.len()
        );
        Ok(body.articles)
    }
}
