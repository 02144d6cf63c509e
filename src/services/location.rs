use std::sync::Arc;

use crate::{
    error::ClientResult,
    models::LocationInfo,
    services::providers::GeoLocator,
    view::{Region, View},
};

/// Resolves the viewer's approximate location, once per session
#[derive(Clone)]
pub struct LocationResolver {
    locator: Arc<dyn GeoLocator>,
    view: Arc<dyn View>,
}

impl LocationResolver {
    pub fn new(locator: Arc<dyn GeoLocator>, view: Arc<dyn View>) -> Self {
        Self { locator, view }
    }

    /// Single attempt, no retry. On success the location line is written to
    /// the page; on failure the error is returned untouched for the caller to
    /// branch on.
    pub async fn resolve_location(&self) -> ClientResult<LocationInfo> {
        let geo = self.locator.locate().await.map_err(|e| {
            tracing::warn!(error = %e, "Geolocation lookup failed");
            e
        })?;

        let info = LocationInfo::from_geolocation(geo);
        self.view.set_text(Region::Location, &info.display_line());
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::models::GeoLocation;
    use crate::services::providers::MockGeoLocator;
    use crate::view::MemoryView;

    #[tokio::test]
    async fn test_resolve_writes_location_line() {
        let mut locator = MockGeoLocator::new();
        locator.expect_locate().times(1).returning(|| {
            Ok(GeoLocation {
                country: "NL".to_string(),
                region: "North Holland".to_string(),
            })
        });
        let view = Arc::new(MemoryView::new());
        let resolver = LocationResolver::new(Arc::new(locator), view.clone());

        let info = resolver.resolve_location().await.unwrap();

        assert_eq!(info.country_name, "Netherlands");
        assert_eq!(info.query_location(), "netherlands");
        assert_eq!(
            view.text_content(Region::Location),
            "Your Location: Netherlands, North Holland"
        );
    }

    #[tokio::test]
    async fn test_resolve_failure_leaves_page_untouched() {
        let mut locator = MockGeoLocator::new();
        locator
            .expect_locate()
            .times(1)
            .returning(|| Err(ClientError::ExternalApi("429".to_string())));
        let view = Arc::new(MemoryView::new());
        let resolver = LocationResolver::new(Arc::new(locator), view.clone());

        assert!(resolver.resolve_location().await.is_err());
        assert_eq!(view.text_content(Region::Location), "");
    }
}
