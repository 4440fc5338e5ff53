use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

use crate::categories::EventCategory;

/// Table-driven text heuristics. All tables are ordered and matched first
/// hit wins; order encodes precedence (specific non-state actors before
/// nation matches, overlapping aliases resolved by declaration order), so
/// these stay slices rather than maps.

/// Country names and well-known aliases, matched case-insensitively as
/// substrings of the location text.
const COUNTRY_ALIASES: &[(&str, &[&str])] = &[
    ("Ukraine", &["ukraine", "ukrainian"]),
    ("Russia", &["russia", "russian"]),
    ("Israel", &["israel", "israeli"]),
    ("Palestine", &["palestine", "palestinian"]),
    ("Syria", &["syria", "syrian"]),
    ("Iraq", &["iraq", "iraqi"]),
    ("Yemen", &["yemen", "yemeni"]),
    ("Sudan", &["sudan", "sudanese"]),
    ("Somalia", &["somalia", "somali"]),
    ("Ethiopia", &["ethiopia", "ethiopian"]),
    ("Myanmar", &["myanmar", "burma", "burmese"]),
    ("Afghanistan", &["afghanistan", "afghan"]),
    ("Pakistan", &["pakistan", "pakistani"]),
    ("Lebanon", &["lebanon", "lebanese"]),
    ("Iran", &["iran", "iranian"]),
    ("Libya", &["libya", "libyan"]),
    ("Mali", &["mali"]),
    ("Nigeria", &["nigeria", "nigerian"]),
    ("DR Congo", &["congo", "drc"]),
];

/// Known city (and region) names, checked after the country table misses.
const CITY_COUNTRIES: &[(&str, &str)] = &[
    ("kyiv", "Ukraine"),
    ("kiev", "Ukraine"),
    ("kharkiv", "Ukraine"),
    ("odessa", "Ukraine"),
    ("donetsk", "Ukraine"),
    ("luhansk", "Ukraine"),
    ("mariupol", "Ukraine"),
    ("zaporizhzhia", "Ukraine"),
    ("moscow", "Russia"),
    ("st. petersburg", "Russia"),
    ("tel aviv", "Israel"),
    ("jerusalem", "Israel"),
    ("haifa", "Israel"),
    ("gaza", "Palestine"),
    ("west bank", "Palestine"),
    ("ramallah", "Palestine"),
    ("damascus", "Syria"),
    ("aleppo", "Syria"),
    ("idlib", "Syria"),
    ("baghdad", "Iraq"),
    ("mosul", "Iraq"),
    ("basra", "Iraq"),
    ("sanaa", "Yemen"),
    ("aden", "Yemen"),
    ("khartoum", "Sudan"),
    ("darfur", "Sudan"),
    ("mogadishu", "Somalia"),
    ("addis ababa", "Ethiopia"),
    ("tigray", "Ethiopia"),
    ("yangon", "Myanmar"),
    ("naypyidaw", "Myanmar"),
    ("kabul", "Afghanistan"),
    ("kandahar", "Afghanistan"),
    ("islamabad", "Pakistan"),
    ("karachi", "Pakistan"),
    ("beirut", "Lebanon"),
    ("tehran", "Iran"),
    ("tripoli", "Libya"),
    ("benghazi", "Libya"),
    ("bamako", "Mali"),
    ("lagos", "Nigeria"),
    ("abuja", "Nigeria"),
    ("kinshasa", "DR Congo"),
    ("goma", "DR Congo"),
];

/// Resolve a country from free-form location text: country/alias table,
/// then city table, then the last comma-delimited segment as-is.
pub fn extract_country(location: &str) -> String {
    let lower = location.to_lowercase();

    for (country, aliases) in COUNTRY_ALIASES {
        if aliases.iter().any(|alias| lower.contains(alias)) {
            return (*country).to_string();
        }
    }

    for (city, country) in CITY_COUNTRIES {
        if lower.contains(city) {
            return (*country).to_string();
        }
    }

    location
        .rsplit(',')
        .next()
        .unwrap_or(location)
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub code: String,
}

struct ActorRule {
    name: &'static str,
    code: &'static str,
    keywords: &'static [&'static str],
    /// Some entries only make sense within one category (named threat
    /// actors in cyber); None applies everywhere.
    category: Option<EventCategory>,
}

const ACTOR_RULES: &[ActorRule] = &[
    // Cyber threat actors first: more specific than any nation match.
    ActorRule {
        name: "Lazarus Group",
        code: "PRK",
        keywords: &["lazarus"],
        category: Some(EventCategory::Cyber),
    },
    ActorRule {
        name: "Fancy Bear",
        code: "RUS",
        keywords: &["fancy bear", "apt28", "apt 28"],
        category: Some(EventCategory::Cyber),
    },
    ActorRule {
        name: "Killnet",
        code: "RUS",
        keywords: &["killnet"],
        category: Some(EventCategory::Cyber),
    },
    ActorRule {
        name: "Anonymous",
        code: "",
        keywords: &["anonymous"],
        category: Some(EventCategory::Cyber),
    },
    ActorRule {
        name: "Russia",
        code: "RUS",
        keywords: &["russia", "russian", "moscow", "kremlin", "putin"],
        category: None,
    },
    ActorRule {
        name: "Ukraine",
        code: "UKR",
        keywords: &["ukraine", "ukrainian", "kyiv", "zelensky"],
        category: None,
    },
    ActorRule {
        name: "United States",
        code: "USA",
        keywords: &[
            "united states",
            "u.s.",
            "us ",
            "american",
            "pentagon",
            "washington",
        ],
        category: None,
    },
    ActorRule {
        name: "Israel",
        code: "ISR",
        keywords: &["israel", "israeli", "idf", "netanyahu", "tel aviv"],
        category: None,
    },
    ActorRule {
        name: "Hamas",
        code: "PSE",
        keywords: &["hamas"],
        category: None,
    },
    ActorRule {
        name: "Hezbollah",
        code: "LBN",
        keywords: &["hezbollah", "hizballah"],
        category: None,
    },
    ActorRule {
        name: "Iran",
        code: "IRN",
        keywords: &["iran", "iranian", "tehran", "irgc"],
        category: None,
    },
    ActorRule {
        name: "China",
        code: "CHN",
        keywords: &["china", "chinese", "beijing", "pla"],
        category: None,
    },
    ActorRule {
        name: "NATO Forces",
        code: "NATO",
        keywords: &["nato", "alliance forces"],
        category: None,
    },
    ActorRule {
        name: "Turkey",
        code: "TUR",
        keywords: &["turkey", "turkish", "ankara", "erdogan"],
        category: None,
    },
    ActorRule {
        name: "Saudi Arabia",
        code: "SAU",
        keywords: &["saudi", "riyadh"],
        category: None,
    },
    ActorRule {
        name: "Houthis",
        code: "YEM",
        keywords: &["houthi", "houthis"],
        category: None,
    },
    ActorRule {
        name: "Syria",
        code: "SYR",
        keywords: &["syria", "syrian", "assad", "damascus"],
        category: None,
    },
    ActorRule {
        name: "Sudan Armed Forces",
        code: "SDN",
        keywords: &["sudan", "sudanese", "saf", "rsf"],
        category: None,
    },
    ActorRule {
        name: "Ethiopia",
        code: "ETH",
        keywords: &["ethiopia", "ethiopian"],
        category: None,
    },
    ActorRule {
        name: "France",
        code: "FRA",
        keywords: &["france", "french"],
        category: None,
    },
    ActorRule {
        name: "United Kingdom",
        code: "GBR",
        keywords: &["uk ", "britain", "british"],
        category: None,
    },
    ActorRule {
        name: "North Korea",
        code: "PRK",
        keywords: &["north korea", "dprk", "pyongyang", "kim jong"],
        category: None,
    },
    ActorRule {
        name: "South Korea",
        code: "KOR",
        keywords: &["south korea", "seoul"],
        category: None,
    },
    ActorRule {
        name: "Myanmar Military",
        code: "MMR",
        keywords: &["myanmar", "burmese", "junta"],
        category: None,
    },
    ActorRule {
        name: "Taliban",
        code: "AFG",
        keywords: &["taliban"],
        category: None,
    },
    ActorRule {
        name: "ISIS",
        code: "ISIS",
        keywords: &["isis", "islamic state", "daesh", "isil"],
        category: None,
    },
    ActorRule {
        name: "Al-Qaeda",
        code: "AQI",
        keywords: &["al-qaeda", "al qaeda", "aqap"],
        category: None,
    },
    ActorRule {
        name: "Al-Shabaab",
        code: "SOM",
        keywords: &["al-shabaab", "shabaab"],
        category: None,
    },
    ActorRule {
        name: "Boko Haram",
        code: "NGA",
        keywords: &["boko haram"],
        category: None,
    },
    ActorRule {
        name: "Wagner Group",
        code: "RUS",
        keywords: &["wagner"],
        category: None,
    },
    ActorRule {
        name: "India",
        code: "IND",
        keywords: &["india", "indian"],
        category: None,
    },
    ActorRule {
        name: "Pakistan",
        code: "PAK",
        keywords: &["pakistan", "pakistani"],
        category: None,
    },
];

/// Bidirectional case-insensitive containment. Deliberately blunt: it is
/// the same check the matching tables rely on, so "Sudan" and "South
/// Sudan" collide here exactly as they do at extraction time.
pub fn names_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Find the aggressor in a headline. An entry is eligible only when its
/// name is distinct from the target country; otherwise a country would be
/// reported as its own aggressor whenever its name appears in the title.
pub fn extract_actor(title: &str, target_country: &str, category: EventCategory) -> Actor {
    let title_lower = title.to_lowercase();

    for rule in ACTOR_RULES {
        if let Some(only) = rule.category {
            if only != category {
                continue;
            }
        }
        if names_overlap(rule.name, target_country) {
            continue;
        }
        if rule.keywords.iter().any(|kw| title_lower.contains(kw)) {
            return Actor {
                name: rule.name.to_string(),
                code: rule.code.to_string(),
            };
        }
    }

    let (name, code) = category.default_actor();
    Actor {
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn casualty_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // Ordered: leading-count phrasings, then trailing-count, then the
        // "death toll" form. First pattern whose capture survives the
        // plausibility bounds wins.
        [
            r"(?i)\b(\d{1,6})\s+(?:people\s+|civilians\s+|soldiers\s+)?(?:killed|dead|died|deaths|casualties)\b",
            r"(?i)\bkill(?:s|ed|ing)?\s+(?:at\s+least\s+|more\s+than\s+|over\s+)?(\d{1,6})\b",
            r"(?i)\bat\s+least\s+(\d{1,6})\s+(?:killed|dead|died)\b",
            r"(?i)\bdeath\s+toll\s+(?:rises\s+|climbs\s+)?to\s+(\d{1,6})\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid casualty regex"))
        .collect()
    })
}

/// Pull a casualty figure out of a headline. Figures outside (0, ceiling)
/// are treated as parse noise, not data.
pub fn extract_casualties(title: &str, ceiling: u32) -> Option<u32> {
    for re in casualty_patterns() {
        if let Some(caps) = re.captures(title) {
            if let Ok(n) = caps[1].parse::<u32>() {
                if n > 0 && n < ceiling {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Start dates of well-known long-running conflicts, keyed on the target
/// country. Feeds the duration anchor on synthesized events.
const CONFLICT_START_DATES: &[(&str, (i32, u32, u32))] = &[
    ("ukraine", (2022, 2, 24)),
    ("sudan", (2023, 4, 15)),
    ("myanmar", (2021, 2, 1)),
    ("yemen", (2014, 9, 21)),
    ("syria", (2011, 3, 15)),
    ("somalia", (2009, 1, 31)),
    ("israel", (2023, 10, 7)),
    ("palestine", (2023, 10, 7)),
];

pub fn conflict_start_date(target_country: &str) -> Option<DateTime<Utc>> {
    let lower = target_country.to_lowercase();
    CONFLICT_START_DATES
        .iter()
        .find(|(country, _)| lower.contains(country))
        .and_then(|(_, (y, m, d))| Utc.with_ymd_and_hms(*y, *m, *d, 0, 0, 0).single())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_from_direct_name() {
        assert_eq!(extract_country("Eastern Ukraine"), "Ukraine");
        assert_eq!(extract_country("SUDAN border region"), "Sudan");
    }

    #[test]
    fn country_from_known_city() {
        assert_eq!(extract_country("Mogadishu suburb"), "Somalia");
        assert_eq!(extract_country("near Goma"), "DR Congo");
    }

    #[test]
    fn country_table_wins_over_city_table() {
        // "Kharkiv, Ukraine" hits the country table before the city table
        // is ever consulted.
        assert_eq!(extract_country("Kharkiv, Ukraine"), "Ukraine");
        assert_eq!(extract_country("Kharkiv"), "Ukraine");
    }

    #[test]
    fn country_alias_order_resolves_congo() {
        // "Congo" maps to DR Congo by declaration order, not to any other
        // reading of the name.
        assert_eq!(extract_country("Congo river basin"), "DR Congo");
    }

    #[test]
    fn country_falls_back_to_last_segment() {
        assert_eq!(extract_country("Vavuniya, Sri Lanka"), "Sri Lanka");
        assert_eq!(extract_country("Atlantis"), "Atlantis");
    }

    #[test]
    fn actor_matched_from_title_keywords() {
        let actor = extract_actor(
            "Russian forces strike Kharkiv, killing 12",
            "Ukraine",
            EventCategory::Conflict,
        );
        assert_eq!(actor.name, "Russia");
        assert_eq!(actor.code, "RUS");
    }

    #[test]
    fn actor_never_equals_target() {
        // Title mentions Ukraine first, but Ukraine is the target; the
        // scan must keep going and settle on Russia.
        let actor = extract_actor(
            "Ukraine frontline shelled by Russian artillery",
            "Ukraine",
            EventCategory::Conflict,
        );
        assert_eq!(actor.name, "Russia");
    }

    #[test]
    fn actor_distinctness_is_bidirectional() {
        assert!(names_overlap("Sudan", "South Sudan"));
        assert!(names_overlap("sudan armed forces", "Sudan Armed Forces"));
        assert!(!names_overlap("Russia", "Ukraine"));
        assert!(!names_overlap("", "Ukraine"));
    }

    #[test]
    fn cyber_actor_only_matches_in_cyber() {
        let cyber = extract_actor(
            "Lazarus hackers hit exchange",
            "South Korea",
            EventCategory::Cyber,
        );
        assert_eq!(cyber.name, "Lazarus Group");
        assert_eq!(cyber.code, "PRK");

        // Same title in conflict falls through to the generic default.
        let conflict = extract_actor(
            "Lazarus hackers hit exchange",
            "South Korea",
            EventCategory::Conflict,
        );
        assert_eq!(conflict.name, "Armed Forces");
    }

    #[test]
    fn actor_default_is_category_specific() {
        let protest = extract_actor(
            "Protesters clash with police",
            "France",
            EventCategory::Protest,
        );
        assert_eq!(protest.name, "Protesters");
        assert_eq!(protest.code, "");

        let terror = extract_actor("Blast hits market", "Iraq", EventCategory::Terrorism);
        assert_eq!(terror.name, "Militants");
    }

    #[test]
    fn casualties_leading_count() {
        assert_eq!(
            extract_casualties("12 killed in overnight strikes", 10_000),
            Some(12)
        );
        assert_eq!(
            extract_casualties("At least 40 dead after flooding of camp", 10_000),
            Some(40)
        );
    }

    #[test]
    fn casualties_trailing_count() {
        assert_eq!(
            extract_casualties("Russian forces strike Kharkiv, killing 12", 10_000),
            Some(12)
        );
        assert_eq!(
            extract_casualties("Airstrike kills at least 7", 10_000),
            Some(7)
        );
    }

    #[test]
    fn casualties_death_toll_phrasing() {
        assert_eq!(
            extract_casualties("Death toll rises to 89 after quake", 10_000),
            Some(89)
        );
    }

    #[test]
    fn casualties_rejects_zero_and_absurd_counts() {
        assert_eq!(extract_casualties("0 killed in standoff", 10_000), None);
        assert_eq!(extract_casualties("Plague kills 50000", 10_000), None);
        assert_eq!(extract_casualties("No numbers here", 10_000), None);
    }

    #[test]
    fn start_date_known_for_long_running_wars() {
        let started = conflict_start_date("Ukraine").unwrap();
        assert_eq!(started.format("%Y-%m-%d").to_string(), "2022-02-24");
        assert!(conflict_start_date("France").is_none());
    }
}
