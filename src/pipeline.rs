use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use tracing::{debug, info, warn};

use crate::categories::EventCategory;
use crate::config::PipelineConfig;
use crate::fallback::fallback_events;
use crate::fetch::EventSource;
use crate::models::NormalizedEvent;
use crate::synthesize::synthesize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Most recent events first.
    Recency,
    /// Longest-running conflicts first, recency breaking ties.
    Duration,
}

/// Run one collection and return the renderable batch. This never fails:
/// category errors degrade to empty categories, a sparse merge is topped
/// up from the curated set, and a total failure returns the curated set
/// verbatim. Retrying is the caller's polling loop, not ours.
pub async fn collect_events(
    source: &impl EventSource,
    cfg: &PipelineConfig,
    order: SortOrder,
) -> Vec<NormalizedEvent> {
    let start = std::time::Instant::now();

    let mut events = match collect_live(source, cfg).await {
        Ok(events) => events,
        Err(err) => {
            warn!("Pipeline collection failed - serving fallback dataset: {err:#}");
            return fallback_events();
        }
    };

    let live = events.len();
    if events.is_empty() || live < cfg.min_viable_events {
        for event in fallback_events() {
            if events.len() >= cfg.fallback_top_up {
                break;
            }
            events.push(event);
        }
        info!(
            "Fallback augmentation - live={}, total={}",
            live,
            events.len()
        );
    }

    sort_events(&mut events, order);

    info!(
        "Collection completed - duration={:.2}s, live={}, total={}",
        start.elapsed().as_secs_f32(),
        live,
        events.len()
    );
    events
}

/// Fan out over every category concurrently and merge whatever survives.
/// One category's failure must not abort its siblings, so each task folds
/// its own result and errors are only logged at the join.
async fn collect_live(
    source: &impl EventSource,
    cfg: &PipelineConfig,
) -> Result<Vec<NormalizedEvent>> {
    let tasks = EventCategory::ALL
        .iter()
        .map(|&category| async move { (category, collect_category(source, category, cfg).await) });

    let results = futures::future::join_all(tasks).await;

    let mut merged = Vec::new();
    for (category, result) in results {
        match result {
            Ok(events) => {
                debug!(
                    "Category collected - category={}, events={}",
                    category.slug(),
                    events.len()
                );
                merged.extend(events);
            }
            Err(err) => {
                warn!(
                    "Category collection failed - category={}: {err:#}",
                    category.slug()
                );
            }
        }
    }
    Ok(merged)
}

async fn collect_category(
    source: &impl EventSource,
    category: EventCategory,
    cfg: &PipelineConfig,
) -> Result<Vec<NormalizedEvent>> {
    let (features, articles) = tokio::join!(source.geo_features(category), source.articles(category));

    // No features means nothing to synthesize; a dead article feed only
    // costs us headlines, the features still stand on their own.
    let features = features?;
    let articles = articles.unwrap_or_else(|err| {
        warn!(
            "Article fetch failed - category={}, pairing placeholders: {err:#}",
            category.slug()
        );
        Vec::new()
    });

    let mut out = Vec::new();
    let mut seen_locations = HashSet::new();

    for (index, feature) in features.iter().enumerate() {
        if out.len() >= cfg.max_events_per_category {
            break;
        }
        let Some((lon, lat)) = feature.lon_lat() else {
            continue;
        };
        // One event per rounded coordinate pair per category.
        let location_key = (lon.round() as i64, lat.round() as i64);
        if seen_locations.contains(&location_key) {
            continue;
        }

        // Cycle the article pool when it is shorter than the feature list.
        let article = if articles.is_empty() {
            None
        } else {
            Some(&articles[index % articles.len()])
        };

        if let Some(event) = synthesize(feature, article, category, index, cfg) {
            seen_locations.insert(location_key);
            out.push(event);
        }
    }

    Ok(out)
}

fn sort_events(events: &mut [NormalizedEvent], order: SortOrder) {
    match order {
        SortOrder::Recency => events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at)),
        SortOrder::Duration => events.sort_by(|a, b| {
            let a_start = a.started_at.unwrap_or(DateTime::<Utc>::MAX_UTC);
            let b_start = b.started_at.unwrap_or(DateTime::<Utc>::MAX_UTC);
            a_start
                .cmp(&b_start)
                .then_with(|| b.occurred_at.cmp(&a.occurred_at))
        }),
    }
}
