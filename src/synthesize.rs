use chrono::{Duration, Utc};
use rand::Rng;

use crate::api_types::{ApiArticle, GeoFeature};
use crate::categories::EventCategory;
use crate::config::PipelineConfig;
use crate::dates::normalize_timestamp;
use crate::geo::{initial_bearing, jittered_origin};
use crate::heuristics::{
    conflict_start_date, extract_actor, extract_casualties, extract_country, names_overlap,
};
use crate::models::NormalizedEvent;

/// Upstream marks failed geocoding with an error marker in the place name.
const ERROR_SENTINEL: &str = "ERROR";

/// Generic actors too vague to report as an aggressor; features that
/// resolve to one of these are dropped rather than rendered.
const TOO_VAGUE_ACTORS: &[&str] = &["Armed Forces"];

/// Join one geocoded feature with its candidate article into a normalized
/// event. Returns None when the feature is unusable (no name, error
/// sentinel, no coordinates) or when actor resolution is rejected; the
/// caller just moves on to the next feature.
pub fn synthesize(
    feature: &GeoFeature,
    article: Option<&ApiArticle>,
    category: EventCategory,
    index: usize,
    cfg: &PipelineConfig,
) -> Option<NormalizedEvent> {
    let location_name = feature.location_name()?;
    if location_name.to_uppercase().contains(ERROR_SENTINEL) {
        return None;
    }
    let (lon, lat) = feature.lon_lat()?;

    let target_country = extract_country(location_name);
    let title = article
        .map(|a| a.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(location_name);

    let actor = extract_actor(title, &target_country, category);
    if actor.name.is_empty()
        || names_overlap(&actor.name, &target_country)
        || TOO_VAGUE_ACTORS.contains(&actor.name.as_str())
    {
        return None;
    }

    let occurred_at = article
        .and_then(|a| a.seendate.as_deref())
        .or(feature.properties.date.as_deref())
        .map(normalize_timestamp)
        .unwrap_or_else(|| synthetic_recent_instant(cfg.recency_window_hours));

    let (origin_lat, origin_lon) = jittered_origin(lat, lon, cfg.origin_spread_degrees);
    let bearing_degrees = initial_bearing(origin_lat, origin_lon, lat, lon);

    // Negated tone: the provider scores hostile coverage negative, the
    // feed wants severity to grow as tone falls.
    let severity_score = article
        .and_then(|a| a.tone)
        .map(|tone| -tone)
        .unwrap_or_else(|| category.default_severity());

    let started_at = match category {
        EventCategory::Conflict | EventCategory::CivilWar => conflict_start_date(&target_country),
        _ => None,
    };

    let target_name = if target_country.is_empty() {
        location_name.to_string()
    } else {
        target_country
    };

    Some(NormalizedEvent {
        id: format!(
            "{}-{}-{}",
            category.slug(),
            index,
            Utc::now().timestamp_millis()
        ),
        category,
        lat,
        lon,
        origin_lat: Some(origin_lat),
        origin_lon: Some(origin_lon),
        aggressor_name: actor.name,
        aggressor_code: actor.code,
        target_name,
        occurred_at,
        started_at,
        bearing_degrees,
        severity_score,
        casualty_count: extract_casualties(title, cfg.casualty_ceiling),
        source_url: article
            .and_then(|a| a.url.clone())
            .or_else(|| feature.properties.url.clone()),
        title: title.to_string(),
    })
}

/// A plausible instant within the recency window, used when the provider
/// supplies no timestamp at all. Keeps the feed looking live; explicitly
/// not a measurement.
fn synthetic_recent_instant(window_hours: i64) -> chrono::DateTime<Utc> {
    let mut rng = rand::thread_rng();
    Utc::now()
        - Duration::hours(rng.gen_range(0..window_hours.max(1)))
        - Duration::minutes(rng.gen_range(0..60))
}
