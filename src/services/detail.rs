use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::ClientResult,
    render::{external_trailer_url, DetailDocument},
    services::dispatcher::RequestDispatcher,
    view::View,
};

/// What a tile activation ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    /// A detail view was opened and populated
    Opened(Uuid),
    /// The backend answered without detail; nothing was shown
    Absent,
    /// The request failed; nothing was shown
    Failed,
}

/// Drives the detail view opened on tile activation
#[derive(Clone)]
pub struct DetailViewController {
    dispatcher: RequestDispatcher,
    view: Arc<dyn View>,
}

impl DetailViewController {
    pub fn new(dispatcher: RequestDispatcher, view: Arc<dyn View>) -> Self {
        Self { dispatcher, view }
    }

    /// Fetches detail for `title` and, if present, opens a new context with it.
    ///
    /// Every activation re-fetches; nothing is cached between activations.
    pub async fn activate_detail(&self, title: &str) -> DetailOutcome {
        let detail = match self.dispatcher.fetch_detail(title).await {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                tracing::info!(title = %title, "No movie details available");
                return DetailOutcome::Absent;
            }
            // fetch_detail logs every failure it returns
            Err(_) => return DetailOutcome::Failed,
        };

        let document = match DetailDocument::build(&detail) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(title = %title, error = %e, "Failed to build detail view");
                return DetailOutcome::Failed;
            }
        };

        let context = self.view.open_auxiliary();
        context.populate(document);

        tracing::info!(
            title = %title,
            trailer_id = %detail.trailer_id,
            context = %context.id(),
            "Detail view opened"
        );
        DetailOutcome::Opened(context.id())
    }

    /// Opens the canonical watch page for a trailer in another new context
    pub fn open_external_trailer(&self, trailer_id: &str) -> ClientResult<()> {
        let url = external_trailer_url(trailer_id)?;
        tracing::debug!(trailer_id = %trailer_id, "Opening external trailer");
        self.view.open_external(url.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::events::UiEvent;
    use crate::models::MovieDetail;
    use crate::services::providers::MockRecommendationBackend;
    use crate::view::MemoryView;

    fn controller(mock: MockRecommendationBackend) -> (DetailViewController, Arc<MemoryView>) {
        let view = Arc::new(MemoryView::new());
        let dispatcher = RequestDispatcher::new(Arc::new(mock), view.clone());
        (DetailViewController::new(dispatcher, view.clone()), view)
    }

    fn detail(title: &str) -> MovieDetail {
        MovieDetail {
            title: title.to_string(),
            trailer_id: "8hP9D6kZseM".to_string(),
            director: "Director: Ridley Scott".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_activate_opens_populated_context() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer()
            .withf(|title| title == "Gladiator")
            .times(1)
            .returning(|title| Ok(Some(detail(title))));
        let (controller, view) = controller(mock);

        let outcome = controller.activate_detail("Gladiator").await;

        let contexts = view.auxiliary_contexts();
        assert_eq!(contexts.len(), 1);
        assert_eq!(outcome, DetailOutcome::Opened(contexts[0].id()));
        let document = contexts[0].document().unwrap();
        assert!(document.to_html().contains("Director: Ridley Scott"));
    }

    #[tokio::test]
    async fn test_absent_detail_opens_nothing() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer().times(1).returning(|_| Ok(None));
        let (controller, view) = controller(mock);

        assert_eq!(controller.activate_detail("Nope").await, DetailOutcome::Absent);
        assert!(view.auxiliary_contexts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_opens_nothing() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer()
            .returning(|_| Err(ClientError::ExternalApi("500".to_string())));
        let (controller, view) = controller(mock);

        assert_eq!(controller.activate_detail("Heat").await, DetailOutcome::Failed);
        assert!(view.auxiliary_contexts().is_empty());
    }

    #[tokio::test]
    async fn test_repeat_activation_refetches() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer()
            .times(2)
            .returning(|title| Ok(Some(detail(title))));
        let (controller, view) = controller(mock);

        controller.activate_detail("Alien").await;
        controller.activate_detail("Alien").await;

        assert_eq!(view.auxiliary_contexts().len(), 2);
    }

    #[tokio::test]
    async fn test_poster_opens_external_trailer() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer()
            .returning(|title| Ok(Some(detail(title))));
        let (controller, view) = controller(mock);
        controller.activate_detail("Blade Runner").await;

        let event = view.auxiliary_contexts()[0].click_poster().unwrap();
        let UiEvent::PosterClick { trailer_id } = event else {
            panic!("expected poster click");
        };
        controller.open_external_trailer(&trailer_id).unwrap();

        assert_eq!(
            view.external_urls(),
            vec!["https://www.youtube.com/watch?v=8hP9D6kZseM".to_string()]
        );
    }
}
