use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Wire types for the two GDELT query shapes. Everything is lenient: the
/// provider omits fields freely and the pipeline degrades instead of failing.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoFeature {
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: GeoProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    /// GeoJSON order: [lon, lat].
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub featurename: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl GeoFeature {
    /// Place label, trying the property names the provider actually uses.
    pub fn location_name(&self) -> Option<&str> {
        self.properties
            .name
            .as_deref()
            .or(self.properties.featurename.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Compact provider timestamp, e.g. "20240115T080000Z".
    #[serde(default)]
    pub seendate: Option<String>,
    /// Document tone; the provider serializes this as a number or a string
    /// depending on endpoint.
    #[serde(default, deserialize_with = "tone_from_any")]
    pub tone: Option<f64>,
}

fn tone_from_any<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_accepts_number_or_string() {
        let a: ApiArticle = serde_json::from_str(r#"{"title":"t","tone":-3.5}"#).unwrap();
        assert_eq!(a.tone, Some(-3.5));

        let b: ApiArticle = serde_json::from_str(r#"{"title":"t","tone":"-7.25"}"#).unwrap();
        assert_eq!(b.tone, Some(-7.25));

        let c: ApiArticle = serde_json::from_str(r#"{"title":"t","tone":"n/a"}"#).unwrap();
        assert_eq!(c.tone, None);
    }

    #[test]
    fn location_name_falls_back_to_featurename() {
        let f: GeoFeature = serde_json::from_str(
            r#"{"geometry":{"coordinates":[34.5,31.5]},"properties":{"featurename":"Gaza"}}"#,
        )
        .unwrap();
        assert_eq!(f.location_name(), Some("Gaza"));
        assert_eq!(f.lon_lat(), Some((34.5, 31.5)));
    }

    #[test]
    fn missing_coordinates_yield_none() {
        let f: GeoFeature =
            serde_json::from_str(r#"{"properties":{"name":"Nowhere"}}"#).unwrap();
        assert_eq!(f.lon_lat(), None);
    }
}
