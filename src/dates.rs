use chrono::{DateTime, TimeZone, Utc};

/// Normalize a provider timestamp into a UTC instant.
///
/// Accepts the compact digit form ("20240115080000", variable length) and
/// the separator form ("20240115T080000Z"); anything shorter than a full
/// date, or that does not form a valid calendar instant, normalizes to now.
/// The provider occasionally emits corrupted future timestamps, so results
/// past now also collapse to now.
pub fn normalize_timestamp(raw: &str) -> DateTime<Utc> {
    normalize_timestamp_at(raw, Utc::now())
}

fn normalize_timestamp_at(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 8 {
        return now;
    }

    let field = |range: std::ops::Range<usize>| digits.get(range).and_then(|s| s.parse().ok());

    let Some(year) = digits.get(0..4).and_then(|s| s.parse::<i32>().ok()) else {
        return now;
    };
    let (Some(month), Some(day)) = (field(4..6), field(6..8)) else {
        return now;
    };
    // Missing trailing fields default to noon, on the hour.
    let hour = field(8..10).unwrap_or(12);
    let minute = field(10..12).unwrap_or(0);
    let second = field(12..14).unwrap_or(0);

    match Utc
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
    {
        Some(instant) if instant <= now => instant,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn compact_form_with_separator() {
        let parsed = normalize_timestamp_at("20240115T080000Z", anchor());
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T08:00:00+00:00");
    }

    #[test]
    fn date_only_defaults_to_noon() {
        let parsed = normalize_timestamp_at("20240115", anchor());
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T12:00:00+00:00");
    }

    #[test]
    fn partial_time_defaults_remaining_fields_to_zero() {
        let parsed = normalize_timestamp_at("2024011509", anchor());
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T09:00:00+00:00");
    }

    #[test]
    fn malformed_input_falls_back_to_now() {
        assert_eq!(normalize_timestamp_at("abcd", anchor()), anchor());
        assert_eq!(normalize_timestamp_at("", anchor()), anchor());
        assert_eq!(normalize_timestamp_at("2024", anchor()), anchor());
    }

    #[test]
    fn invalid_calendar_values_fall_back_to_now() {
        assert_eq!(normalize_timestamp_at("20241399120000", anchor()), anchor());
    }

    #[test]
    fn future_timestamps_are_rejected() {
        assert_eq!(normalize_timestamp_at("20990101120000", anchor()), anchor());
    }

    #[test]
    fn live_entry_point_never_returns_the_future() {
        let parsed = normalize_timestamp("20990101120000");
        assert!(parsed <= Utc::now());
    }
}
