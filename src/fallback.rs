use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::categories::EventCategory;
use crate::models::NormalizedEvent;

/// Hand-curated set of well-known ongoing events, used whenever live
/// retrieval fails or under-returns. Timestamps are offsets from now so
/// the entries stay plausible; everything else is fixed.
pub fn fallback_events() -> Vec<NormalizedEvent> {
    let now = Utc::now();

    let known = |id: &str,
                 category: EventCategory,
                 lat: f64,
                 lon: f64,
                 aggressor: (&str, &str),
                 target: &str,
                 title: &str,
                 hours_ago: i64,
                 bearing_degrees: f64,
                 severity_score: f64,
                 started: Option<(i32, u32, u32)>|
     -> NormalizedEvent {
        NormalizedEvent {
            id: id.to_string(),
            category,
            lat,
            lon,
            origin_lat: None,
            origin_lon: None,
            aggressor_name: aggressor.0.to_string(),
            aggressor_code: aggressor.1.to_string(),
            target_name: target.to_string(),
            occurred_at: now - Duration::hours(hours_ago),
            started_at: started.and_then(|(y, m, d)| start_of(y, m, d)),
            bearing_degrees,
            severity_score,
            casualty_count: None,
            source_url: None,
            title: title.to_string(),
        }
    };

    vec![
        known(
            "known-1",
            EventCategory::Conflict,
            48.3794,
            31.1656,
            ("Russia", "RUS"),
            "Ukraine",
            "Continued strikes across eastern Ukraine",
            2,
            270.0,
            -9.0,
            Some((2022, 2, 24)),
        ),
        known(
            "known-2",
            EventCategory::Conflict,
            31.5,
            34.5,
            ("Israel", "ISR"),
            "Gaza",
            "Operations continue in Gaza",
            1,
            180.0,
            -9.0,
            Some((2023, 10, 7)),
        ),
        known(
            "known-3",
            EventCategory::Conflict,
            31.8,
            34.8,
            ("Hamas", "PSE"),
            "Israel",
            "Rocket fire toward southern Israel",
            3,
            45.0,
            -8.0,
            Some((2023, 10, 7)),
        ),
        known(
            "known-4",
            EventCategory::CivilWar,
            15.5,
            32.5,
            ("RSF", "SDN"),
            "Khartoum",
            "Fighting around Khartoum",
            6,
            45.0,
            -8.0,
            Some((2023, 4, 15)),
        ),
        known(
            "known-5",
            EventCategory::CivilWar,
            21.0,
            96.0,
            ("Myanmar Military", "MMR"),
            "Myanmar Rebels",
            "Junta offensive in central Myanmar",
            8,
            90.0,
            -7.0,
            Some((2021, 2, 1)),
        ),
        known(
            "known-6",
            EventCategory::Conflict,
            33.8,
            35.5,
            ("Hezbollah", "LBN"),
            "Israel Border",
            "Cross-border exchanges in south Lebanon",
            5,
            200.0,
            -6.0,
            None,
        ),
        known(
            "known-7",
            EventCategory::Conflict,
            15.3,
            44.2,
            ("Houthis", "YEM"),
            "Saudi Arabia",
            "Drone activity out of northern Yemen",
            12,
            0.0,
            -7.0,
            Some((2014, 9, 21)),
        ),
        known(
            "known-8",
            EventCategory::Terrorism,
            2.0,
            45.3,
            ("Al-Shabaab", "SOM"),
            "Somalia",
            "Al-Shabaab attack near Mogadishu",
            14,
            135.0,
            -6.0,
            None,
        ),
        known(
            "known-9",
            EventCategory::Terrorism,
            35.2,
            40.1,
            ("ISIS", "ISIS"),
            "Syria",
            "ISIS remnants active in eastern Syria",
            16,
            270.0,
            -6.0,
            None,
        ),
        known(
            "known-10",
            EventCategory::Conflict,
            13.5,
            2.1,
            ("Wagner Group", "RUS"),
            "Niger",
            "Wagner presence reported in Niger",
            18,
            180.0,
            -4.0,
            None,
        ),
        known(
            "known-11",
            EventCategory::Terrorism,
            11.8,
            13.1,
            ("Boko Haram", "NGA"),
            "Nigeria",
            "Boko Haram raid in Borno state",
            20,
            90.0,
            -6.0,
            None,
        ),
        known(
            "known-12",
            EventCategory::Protest,
            35.6892,
            51.389,
            ("Protesters", ""),
            "Iran",
            "Street protests in Tehran",
            9,
            0.0,
            -2.0,
            None,
        ),
        known(
            "known-13",
            EventCategory::Cyber,
            37.5665,
            126.978,
            ("Lazarus Group", "PRK"),
            "South Korea",
            "Intrusion campaign against Seoul exchanges",
            22,
            315.0,
            -4.0,
            None,
        ),
    ]
}

fn start_of(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}
