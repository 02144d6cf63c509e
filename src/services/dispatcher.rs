/// Request dispatch
///
/// One operation per request category. Each takes validated parameters,
/// raises the category's loading indicator for the duration of the call and
/// hands back a `Settled` result tagged with the ticket it was issued under.
/// Failures are logged here and returned as values; nothing is retried.
use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::{ClientError, ClientResult},
    models::{FilterKind, MovieDetail, Query, QueryCategory, RecommendationRecord, SearchTerm, Ticket},
    models::query::EMPTY_SEARCH_PROMPT,
    services::{loading::LoadingGuard, providers::RecommendationBackend, sequence::SequenceTracker},
    view::{Indicator, Region, View},
};

/// Shortest term the autocomplete endpoint is asked about
pub const AUTOCOMPLETE_MIN_CHARS: usize = 2;

/// Outcome of one dispatched request
#[derive(Debug)]
pub struct Settled<T> {
    /// `None` when the request was short-circuited locally
    pub ticket: Option<Ticket>,
    pub result: ClientResult<T>,
}

impl<T> Settled<T> {
    fn local(result: ClientResult<T>) -> Self {
        Self {
            ticket: None,
            result,
        }
    }
}

fn indicator_for(category: QueryCategory) -> Option<Indicator> {
    match category {
        QueryCategory::Auto => Some(Indicator::AutoLoading),
        QueryCategory::Results => Some(Indicator::MovieLoading),
        QueryCategory::Autocomplete => None,
    }
}

#[derive(Clone)]
pub struct RequestDispatcher {
    backend: Arc<dyn RecommendationBackend>,
    view: Arc<dyn View>,
    sequences: Arc<SequenceTracker>,
}

impl RequestDispatcher {
    pub fn new(backend: Arc<dyn RecommendationBackend>, view: Arc<dyn View>) -> Self {
        Self {
            backend,
            view,
            sequences: Arc::new(SequenceTracker::new()),
        }
    }

    /// Whether `ticket` is still the latest issued for its category
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequences.is_current(ticket)
    }

    /// Issues `query` against the backend
    #[instrument(skip_all, fields(backend = self.backend.name(), query = %query))]
    pub async fn dispatch(&self, query: Query) -> Settled<Vec<RecommendationRecord>> {
        let category = query.category();
        let ticket = self.sequences.issue(category);
        let _loading = indicator_for(category).map(|i| LoadingGuard::show(self.view.clone(), i));

        let result = match &query {
            Query::Auto { location, count } => {
                self.backend.auto_recommendations(location, *count).await
            }
            Query::Search { title } => self.backend.recommendations(title.as_str()).await,
            Query::Filter { kind, value } => {
                self.backend.filtered_recommendations(*kind, value).await
            }
            Query::Year { year } => self.backend.filtered_recommendations_by_year(year).await,
        };

        match &result {
            Ok(records) => tracing::info!(
                seq = ticket.seq,
                results = records.len(),
                "Recommendation request settled"
            ),
            Err(e) => tracing::error!(seq = ticket.seq, error = %e, "Recommendation request failed"),
        }

        Settled {
            ticket: Some(ticket),
            result,
        }
    }

    pub async fn fetch_auto_recommendations(
        &self,
        location: &str,
        count: u32,
    ) -> Settled<Vec<RecommendationRecord>> {
        self.dispatch(Query::Auto {
            location: location.to_string(),
            count,
        })
        .await
    }

    /// Searches by title; a blank title shows the prompt and sends nothing
    pub async fn search(&self, raw_title: &str) -> Settled<Vec<RecommendationRecord>> {
        match SearchTerm::parse(raw_title) {
            Ok(title) => {
                self.view.set_text(Region::Prompt, "");
                self.dispatch(Query::Search { title }).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Search rejected before dispatch");
                self.view.set_text(Region::Prompt, EMPTY_SEARCH_PROMPT);
                Settled::local(Err(e))
            }
        }
    }

    pub async fn filter_by(&self, kind: FilterKind, value: &str) -> Settled<Vec<RecommendationRecord>> {
        self.dispatch(Query::Filter {
            kind,
            value: value.to_string(),
        })
        .await
    }

    pub async fn filter_by_year(&self, year: &str) -> Settled<Vec<RecommendationRecord>> {
        self.dispatch(Query::Year {
            year: year.to_string(),
        })
        .await
    }

    /// Title suggestions for a partially typed term
    ///
    /// Terms shorter than `AUTOCOMPLETE_MIN_CHARS` yield nothing without a
    /// network call but still supersede any suggestions in flight; failures
    /// yield an empty list.
    pub async fn autocomplete(&self, term: &str) -> Settled<Vec<String>> {
        let ticket = self.sequences.issue(QueryCategory::Autocomplete);
        if term.chars().count() < AUTOCOMPLETE_MIN_CHARS {
            return Settled {
                ticket: Some(ticket),
                result: Ok(Vec::new()),
            };
        }

        let titles = match self.backend.autocomplete(term).await {
            Ok(titles) => titles,
            Err(e) => {
                tracing::error!(term = %term, error = %e, "Autocomplete request failed");
                Vec::new()
            }
        };

        Settled {
            ticket: Some(ticket),
            result: Ok(titles),
        }
    }

    /// Full detail for one title; `Ok(None)` when the backend has none
    pub async fn fetch_detail(&self, title: &str) -> ClientResult<Option<MovieDetail>> {
        if title.trim().is_empty() {
            let e = ClientError::InvalidInput("Detail title cannot be empty".to_string());
            tracing::debug!(error = %e, "Detail request rejected before dispatch");
            return Err(e);
        }

        let result = self.backend.fetch_trailer(title).await;
        if let Err(e) = &result {
            tracing::error!(title = %title, error = %e, "Error fetching movie details");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockRecommendationBackend;
    use crate::view::MemoryView;

    fn record(title: &str) -> RecommendationRecord {
        RecommendationRecord::new(title, None, "tid")
    }

    fn dispatcher(mock: MockRecommendationBackend) -> (RequestDispatcher, Arc<MemoryView>) {
        let view = Arc::new(MemoryView::new());
        (RequestDispatcher::new(Arc::new(mock), view.clone()), view)
    }

    fn named(mut mock: MockRecommendationBackend) -> MockRecommendationBackend {
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_blank_search_sends_nothing_and_prompts() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_recommendations().never();
        let (dispatcher, view) = dispatcher(mock);

        for blank in ["", "   ", "\t\n"] {
            let settled = dispatcher.search(blank).await;
            assert!(settled.ticket.is_none());
            assert!(matches!(settled.result, Err(ClientError::InvalidInput(_))));
            assert_eq!(view.text_content(Region::Prompt), EMPTY_SEARCH_PROMPT);
        }
        assert!(view.indicator_history(Indicator::MovieLoading).is_empty());
    }

    #[tokio::test]
    async fn test_search_clears_prompt_and_trims() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_recommendations()
            .withf(|title| title == "Avatar")
            .times(1)
            .returning(|_| Ok(vec![record("Aliens")]));
        let (dispatcher, view) = dispatcher(mock);
        view.set_text(Region::Prompt, EMPTY_SEARCH_PROMPT);

        let settled = dispatcher.search("  Avatar  ").await;

        assert_eq!(settled.result.unwrap().len(), 1);
        assert_eq!(view.text_content(Region::Prompt), "");
    }

    #[tokio::test]
    async fn test_loading_released_on_success() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_auto_recommendations()
            .withf(|location, count| location == "japan" && *count == 12)
            .returning(|_, _| Ok(vec![record("Akira")]));
        let (dispatcher, view) = dispatcher(mock);

        assert!(!view.indicator_visible(Indicator::AutoLoading));
        let settled = dispatcher.fetch_auto_recommendations("japan", 12).await;

        assert!(settled.result.is_ok());
        assert_eq!(view.indicator_history(Indicator::AutoLoading), vec![true, false]);
        assert!(view.indicator_history(Indicator::MovieLoading).is_empty());
    }

    #[tokio::test]
    async fn test_loading_released_on_failure() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_filtered_recommendations()
            .returning(|_, _| Err(ClientError::ExternalApi("500".to_string())));
        let (dispatcher, view) = dispatcher(mock);

        let settled = dispatcher.filter_by(FilterKind::Country, "Japan").await;

        assert!(settled.result.is_err());
        assert_eq!(view.indicator_history(Indicator::MovieLoading), vec![true, false]);
    }

    #[tokio::test]
    async fn test_filter_passes_kind_and_value() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_filtered_recommendations()
            .withf(|kind, value| *kind == FilterKind::Genre && value == "Comedy")
            .times(1)
            .returning(|_, _| Ok(vec![]));
        let (dispatcher, _view) = dispatcher(mock);

        let settled = dispatcher.filter_by(FilterKind::Genre, "Comedy").await;
        assert!(settled.result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_year_filter_uses_results_category() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_filtered_recommendations_by_year()
            .withf(|year| year == "1999")
            .returning(|_| Ok(vec![record("The Matrix")]));
        let (dispatcher, view) = dispatcher(mock);

        let settled = dispatcher.filter_by_year("1999").await;

        assert_eq!(settled.ticket.map(|t| t.category), Some(QueryCategory::Results));
        assert_eq!(view.indicator_history(Indicator::MovieLoading), vec![true, false]);
    }

    #[tokio::test]
    async fn test_autocomplete_short_term_skips_network() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_autocomplete().never();
        let (dispatcher, _view) = dispatcher(mock);

        for term in ["", "a", "é"] {
            let settled = dispatcher.autocomplete(term).await;
            assert!(settled.ticket.is_some());
            assert!(settled.result.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_short_term_supersedes_pending_suggestions() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_autocomplete()
            .times(1)
            .returning(|_| Ok(vec!["Alien".to_string()]));
        let (dispatcher, _view) = dispatcher(mock);

        let longer = dispatcher.autocomplete("al").await.ticket.unwrap();
        let shorter = dispatcher.autocomplete("a").await.ticket.unwrap();

        assert!(!dispatcher.is_current(longer));
        assert!(dispatcher.is_current(shorter));
    }

    #[tokio::test]
    async fn test_autocomplete_failure_yields_empty_list() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_autocomplete()
            .returning(|_| Err(ClientError::ExternalApi("503".to_string())));
        let (dispatcher, _view) = dispatcher(mock);

        let settled = dispatcher.autocomplete("ava").await;
        assert!(settled.ticket.is_some());
        assert!(settled.result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_newer_ticket_supersedes_older() {
        let mut mock = named(MockRecommendationBackend::new());
        mock.expect_recommendations().returning(|_| Ok(vec![]));
        let (dispatcher, _view) = dispatcher(mock);

        let first = dispatcher.search("Alien").await.ticket.unwrap();
        let second = dispatcher.search("Aliens").await.ticket.unwrap();

        assert!(!dispatcher.is_current(first));
        assert!(dispatcher.is_current(second));
    }

    #[tokio::test]
    async fn test_fetch_detail_absent() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer().returning(|_| Ok(None));
        let (dispatcher, _view) = dispatcher(mock);

        assert_eq!(dispatcher.fetch_detail("Unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_detail_blank_title_is_rejected() {
        let mut mock = MockRecommendationBackend::new();
        mock.expect_fetch_trailer().never();
        let (dispatcher, _view) = dispatcher(mock);

        assert!(dispatcher.fetch_detail("  ").await.is_err());
    }
}
