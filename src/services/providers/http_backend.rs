/// HTTP implementation of the recommendation backend
///
/// Talks JSON to the recommender's endpoints. Non-2xx statuses and payloads
/// that fail to deserialize become `ClientError`s; the one exception is a 404
/// from `fetch_trailer`, which the backend uses for "no detail available".
use crate::{
    error::{ClientError, ClientResult},
    models::{
        AutoRecommendationsResponse, AutocompleteResponse, FilterKind, MovieDetail,
        RecommendationRecord, RecommendationsResponse, TrailerResponse,
    },
    services::providers::RecommendationBackend,
};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Checks the status and decodes the JSON body
    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> ClientResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ExternalApi(format!(
                "{} returned status {}: {}",
                endpoint, status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint = endpoint,
                response = %body,
                "Failed to deserialize backend response"
            );
            ClientError::MalformedPayload(format!("{}: {}", endpoint, e))
        })
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn auto_recommendations(
        &self,
        location: &str,
        count: u32,
    ) -> ClientResult<Vec<RecommendationRecord>> {
        let count = count.to_string();
        let response = self
            .http_client
            .get(self.endpoint("auto_recommendations"))
            .query(&[("location", location), ("num_recommendations", count.as_str())])
            .send()
            .await?;

        let body: AutoRecommendationsResponse =
            Self::decode("auto_recommendations", response).await?;
        Ok(body.automatic_recommendations)
    }

    async fn recommendations(&self, title: &str) -> ClientResult<Vec<RecommendationRecord>> {
        let response = self
            .http_client
            .post(self.endpoint("recommendations"))
            .form(&[("movieTitle", title)])
            .send()
            .await?;

        let body: RecommendationsResponse = Self::decode("recommendations", response).await?;
        Ok(body.recommendations)
    }

    async fn filtered_recommendations(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> ClientResult<Vec<RecommendationRecord>> {
        let response = self
            .http_client
            .get(self.endpoint("filtered_recommendations"))
            .query(&[("filterType", kind.as_str()), ("filterValue", value)])
            .send()
            .await?;

        let body: RecommendationsResponse =
            Self::decode("filtered_recommendations", response).await?;
        Ok(body.recommendations)
    }

    async fn filtered_recommendations_by_year(
        &self,
        year: &str,
    ) -> ClientResult<Vec<RecommendationRecord>> {
        let response = self
            .http_client
            .get(self.endpoint("filtered_recommendations_by_year"))
            .query(&[("year", year)])
            .send()
            .await?;

        let body: RecommendationsResponse =
            Self::decode("filtered_recommendations_by_year", response).await?;
        Ok(body.recommendations)
    }

    async fn autocomplete(&self, term: &str) -> ClientResult<Vec<String>> {
        let response = self
            .http_client
            .get(self.endpoint("autocomplete"))
            .query(&[("term", term)])
            .send()
            .await?;

        let body: AutocompleteResponse = Self::decode("autocomplete", response).await?;
        Ok(body.titles)
    }

    async fn fetch_trailer(&self, title: &str) -> ClientResult<Option<MovieDetail>> {
        let response = self
            .http_client
            .post(self.endpoint("fetch_trailer"))
            .form(&[("movie_title", title)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: TrailerResponse = Self::decode("fetch_trailer", response).await?;
        Ok(body.movie_details)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
