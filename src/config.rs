use serde::Deserialize;
use std::time::Duration;

/// Client configuration loaded from `MOVIE_RECS_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Geolocation lookup endpoint
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,

    /// Number of records requested for the location-seeded list
    #[serde(default = "default_auto_recommendations")]
    pub auto_recommendations: u32,

    /// Per-request timeout in seconds. Unset means requests may hang forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_geolocation_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_auto_recommendations() -> u32 {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            geolocation_url: default_geolocation_url(),
            auto_recommendations: default_auto_recommendations(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("MOVIE_RECS_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Builds the shared HTTP client honouring the optional timeout
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.auto_recommendations, 12);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_envy_overrides() {
        let vars = vec![
            ("MOVIE_RECS_BACKEND_URL".to_string(), "http://backend:8080".to_string()),
            ("MOVIE_RECS_REQUEST_TIMEOUT_SECS".to_string(), "5".to_string()),
        ];
        let config: Config = envy::prefixed("MOVIE_RECS_").from_iter(vars).unwrap();
        assert_eq!(config.backend_url, "http://backend:8080");
        assert_eq!(config.geolocation_url, "https://ipapi.co/json/");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }
}
