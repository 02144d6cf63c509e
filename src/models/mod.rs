use serde::{Deserialize, Deserializer, Serialize};

pub mod country;
pub mod query;

pub use country::country_code_to_name;
pub use query::{FilterKind, Query, QueryCategory, SearchTerm, Ticket};

/// Poster shown when the backend has no artwork for a record
pub const PLACEHOLDER_POSTER: &str = "placeholder.jpg";

/// One recommendation as returned by the backend
///
/// Immutable once received; lives for a single render cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    #[serde(rename = "movie_title")]
    pub title: String,
    #[serde(rename = "poster", default, deserialize_with = "blank_as_none")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub trailer_id: String,
}

impl RecommendationRecord {
    pub fn new(title: impl Into<String>, poster_url: Option<&str>, trailer_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster_url: poster_url.map(str::to_string),
            trailer_id: trailer_id.into(),
        }
    }

    /// Poster URL with the placeholder substituted for missing artwork
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(PLACEHOLDER_POSTER)
    }
}

/// Full detail for a single title, fetched on tile activation
///
/// Never cached: each activation re-fetches. The text fields arrive
/// pre-formatted by the backend (e.g. "Runtime: 2 hr 28 min").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    #[serde(rename = "movie_title", default, deserialize_with = "text_field")]
    pub title: String,
    #[serde(rename = "poster", default, deserialize_with = "blank_as_none")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "text_field")]
    pub trailer_id: String,
    #[serde(default, deserialize_with = "text_field")]
    pub top_cast: String,
    #[serde(default, deserialize_with = "text_field")]
    pub director: String,
    #[serde(default, deserialize_with = "text_field")]
    pub country: String,
    #[serde(default, deserialize_with = "text_field")]
    pub genre: String,
    #[serde(default, deserialize_with = "text_field")]
    pub runtime: String,
    #[serde(default, deserialize_with = "text_field")]
    pub imdb_score: String,
}

impl MovieDetail {
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(PLACEHOLDER_POSTER)
    }
}

/// Raw answer of the geolocation service
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeoLocation {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
}

/// Viewer location, computed once per session to seed the automatic list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub country_code: String,
    pub country_name: String,
    pub region: String,
}

impl LocationInfo {
    pub fn from_geolocation(geo: GeoLocation) -> Self {
        let country_name = country_code_to_name(&geo.country).to_string();
        Self {
            country_code: geo.country,
            country_name,
            region: geo.region,
        }
    }

    /// The location parameter sent with the automatic recommendation request
    pub fn query_location(&self) -> String {
        self.country_name.to_lowercase()
    }

    pub fn display_line(&self) -> String {
        format!("Your Location: {}, {}", self.country_name, self.region)
    }
}

// ============================================================================
// Backend response envelopes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AutoRecommendationsResponse {
    pub automatic_recommendations: Vec<RecommendationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrailerResponse {
    #[serde(default)]
    pub movie_details: Option<MovieDetail>,
}

/// Accepts strings, numbers and null, yielding display text
fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
