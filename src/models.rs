use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categories::EventCategory;

/// One map-renderable event. Built once per pipeline run and immutable after
/// that; ids are unique within a batch but not stable across fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub id: String,
    pub category: EventCategory,
    pub lat: f64,
    pub lon: f64,
    /// Synthetic "attack origin" point, randomly offset from the event
    /// location. Cosmetic only: it lets the consumer draw a direction and is
    /// not a real-world measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_lon: Option<f64>,
    pub aggressor_name: String,
    pub aggressor_code: String,
    pub target_name: String,
    pub occurred_at: DateTime<Utc>,
    /// Known historical start of a long-running conflict; drives
    /// duration-oriented ordering when the consumer asks for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub bearing_degrees: f64,
    /// Goldstein-like signed intensity; more negative = more severe.
    pub severity_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casualty_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub title: String,
}
