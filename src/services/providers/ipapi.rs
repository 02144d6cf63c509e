/// ipapi.co style geolocation lookup
use crate::{
    error::{ClientError, ClientResult},
    models::GeoLocation,
    services::providers::GeoLocator,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct IpApiLocator {
    http_client: HttpClient,
    url: String,
}

impl IpApiLocator {
    pub fn new(http_client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self) -> ClientResult<GeoLocation> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ExternalApi(format!(
                "Geolocation lookup returned status {}: {}",
                status, body
            )));
        }

        let location: GeoLocation = response.json().await?;
        if location.country.is_empty() {
            return Err(ClientError::ExternalApi(
                "Geolocation response has no country".to_string(),
            ));
        }

        tracing::info!(
            country = %location.country,
            region = %location.region,
            "Viewer location resolved"
        );

        Ok(location)
    }
}
