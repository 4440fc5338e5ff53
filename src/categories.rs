use serde::{Deserialize, Serialize};

/// The fixed category set. Each variant carries its own provider query
/// expressions and extraction defaults, so adding a category is one new
/// variant plus match arms rather than string-keyed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Conflict,
    CivilWar,
    Protest,
    Cyber,
    Terrorism,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Conflict,
        EventCategory::CivilWar,
        EventCategory::Protest,
        EventCategory::Cyber,
        EventCategory::Terrorism,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            EventCategory::Conflict => "conflict",
            EventCategory::CivilWar => "civil_war",
            EventCategory::Protest => "protest",
            EventCategory::Cyber => "cyber",
            EventCategory::Terrorism => "terrorism",
        }
    }

    /// Thematic filter for the geocoded-feature query.
    pub fn geo_query(self) -> &'static str {
        match self {
            EventCategory::Conflict => "theme:ARMEDCONFLICT",
            EventCategory::CivilWar => "theme:REBELLION",
            EventCategory::Protest => "theme:PROTEST",
            EventCategory::Cyber => "theme:CYBER_ATTACK",
            EventCategory::Terrorism => "theme:TERROR",
        }
    }

    /// Thematic filter for the article-list query; broader than the geo
    /// filter so the headline pool does not run dry.
    pub fn doc_query(self) -> &'static str {
        match self {
            EventCategory::Conflict => {
                "theme:ARMEDCONFLICT OR theme:MILITARY_ATTACK OR theme:WAR"
            }
            EventCategory::CivilWar => "theme:REBELLION OR theme:ARMEDCONFLICT",
            EventCategory::Protest => "theme:PROTEST OR theme:RIOT",
            EventCategory::Cyber => "theme:CYBER_ATTACK OR theme:HACKER",
            EventCategory::Terrorism => "theme:TERROR OR theme:SUICIDE_ATTACK",
        }
    }

    /// Severity assigned when the paired article carries no tone field.
    pub fn default_severity(self) -> f64 {
        match self {
            EventCategory::Conflict => -5.0,
            EventCategory::CivilWar => -6.0,
            EventCategory::Protest => -2.0,
            EventCategory::Cyber => -3.0,
            EventCategory::Terrorism => -7.0,
        }
    }

    /// Generic actor reported when no table entry matches the title.
    /// Codes are empty: these are labels, not resolvable entities.
    pub fn default_actor(self) -> (&'static str, &'static str) {
        match self {
            EventCategory::Conflict | EventCategory::CivilWar => ("Armed Forces", ""),
            EventCategory::Protest => ("Protesters", ""),
            EventCategory::Cyber => ("Unknown Hackers", ""),
            EventCategory::Terrorism => ("Militants", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tags_are_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&EventCategory::CivilWar).unwrap(),
            r#""civil_war""#
        );
        let parsed: EventCategory = serde_json::from_str(r#""terrorism""#).unwrap();
        assert_eq!(parsed, EventCategory::Terrorism);
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = EventCategory::ALL.iter().map(|c| c.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), EventCategory::ALL.len());
    }
}
