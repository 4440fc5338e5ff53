/// Pipeline tuning thresholds. None of these are protocol constants;
/// they stay adjustable rather than buried in the collection loop.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Accepted events per category before the synthesis loop stops.
    pub max_events_per_category: usize,
    /// Below this merged total, curated fallback entries are appended.
    pub min_viable_events: usize,
    /// Hard cap on batch size while topping up from the fallback set.
    pub fallback_top_up: usize,
    /// Casualty figures at or above this are treated as parse noise.
    pub casualty_ceiling: u32,
    /// Full width, in degrees, of the cosmetic origin jitter.
    pub origin_spread_degrees: f64,
    /// Window for synthesized timestamps when the provider gives none.
    pub recency_window_hours: i64,
    /// Per-request timeout for both outbound provider calls.
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_events_per_category: 15,
            min_viable_events: 5,
            fallback_top_up: 20,
            casualty_ceiling: 10_000,
            origin_spread_degrees: 8.0,
            recency_window_hours: 24,
            request_timeout_secs: 8,
        }
    }
}
