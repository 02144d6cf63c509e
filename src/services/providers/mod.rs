/// External collaborators of the client
///
/// The recommendation engine and the geolocation lookup are reached only
/// through these traits. `HttpBackend` and `IpApiLocator` are the production
/// implementations; tests substitute mocks.
use crate::{
    error::ClientResult,
    models::{FilterKind, GeoLocation, MovieDetail, RecommendationRecord},
};

pub mod http_backend;
pub mod ipapi;

pub use http_backend::HttpBackend;
pub use ipapi::IpApiLocator;

/// Recommendation backend, one method per endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// `GET /auto_recommendations`
    async fn auto_recommendations(
        &self,
        location: &str,
        count: u32,
    ) -> ClientResult<Vec<RecommendationRecord>>;

    /// `POST /recommendations` with the search form
    async fn recommendations(&self, title: &str) -> ClientResult<Vec<RecommendationRecord>>;

    /// `GET /filtered_recommendations`
    async fn filtered_recommendations(
        &self,
        kind: FilterKind,
        value: &str,
    ) -> ClientResult<Vec<RecommendationRecord>>;

    /// `GET /filtered_recommendations_by_year`
    async fn filtered_recommendations_by_year(
        &self,
        year: &str,
    ) -> ClientResult<Vec<RecommendationRecord>>;

    /// `GET /autocomplete`
    async fn autocomplete(&self, term: &str) -> ClientResult<Vec<String>>;

    /// `POST /fetch_trailer`
    ///
    /// `Ok(None)` means the backend answered but had no detail for the title.
    async fn fetch_trailer(&self, title: &str) -> ClientResult<Option<MovieDetail>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Approximate viewer location lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> ClientResult<GeoLocation>;
}
