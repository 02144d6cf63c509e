/// Page session
///
/// Wires the location resolver, dispatcher, renderer and detail controller to
/// one host view. Each public operation corresponds to a user action or the
/// initial page load and reports a typed outcome.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{
    models::{FilterKind, RecommendationRecord},
    render::{Element, Node, ResultRenderer, TILE_CLASS},
    services::{
        dispatcher::{RequestDispatcher, Settled},
        detail::{DetailOutcome, DetailViewController},
        location::LocationResolver,
        providers::{GeoLocator, RecommendationBackend},
    },
    view::{Region, View},
};

/// Class carried by filter chips
pub const FILTER_CHIP_CLASS: &str = "filter-item";
pub const SIDEBAR_OPEN_CLASS: &str = "sidebar-open";

/// Regions holding tiles, each with one delegated click subscription
const TILE_REGIONS: [Region; 2] = [Region::AutomaticRecommendations, Region::Recommendations];
const CHIP_REGIONS: [Region; 3] = [Region::GenreFilters, Region::CountryFilters, Region::YearFilters];

/// What a recommendation query did to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Tiles were rendered
    Rendered(usize),
    /// The empty placeholder was rendered
    Empty,
    /// The request failed or could not be issued
    Failed,
    /// A newer request of the same category was issued meanwhile; nothing rendered
    Stale,
    /// Input failed validation; no request was sent
    Rejected,
}

#[derive(Clone)]
pub struct Page {
    view: Arc<dyn View>,
    dispatcher: RequestDispatcher,
    renderer: ResultRenderer,
    detail: DetailViewController,
    location: LocationResolver,
    auto_count: u32,
    bound: Arc<AtomicBool>,
}

impl Page {
    pub fn new(
        backend: Arc<dyn RecommendationBackend>,
        locator: Arc<dyn GeoLocator>,
        view: Arc<dyn View>,
        auto_count: u32,
    ) -> Self {
        let dispatcher = RequestDispatcher::new(backend, view.clone());
        Self {
            renderer: ResultRenderer::new(view.clone()),
            detail: DetailViewController::new(dispatcher.clone(), view.clone()),
            location: LocationResolver::new(locator, view.clone()),
            dispatcher,
            view,
            auto_count,
            bound: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribes to clicks on the stable containers. Safe to call repeatedly;
    /// only the first call subscribes.
    pub fn bind(&self) {
        if self.bound.swap(true, Ordering::SeqCst) {
            return;
        }
        for region in TILE_REGIONS {
            self.view.delegate_clicks(region, TILE_CLASS);
        }
        for region in CHIP_REGIONS {
            self.view.delegate_clicks(region, FILTER_CHIP_CLASS);
        }
    }

    /// Page load: resolve the location, then request the location-seeded list.
    ///
    /// A failed lookup skips the automatic list entirely.
    pub async fn load(&self) -> QueryOutcome {
        self.bind();

        let location = match self.location.resolve_location().await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping automatic recommendations");
                return QueryOutcome::Failed;
            }
        };

        let settled = self
            .dispatcher
            .fetch_auto_recommendations(&location.query_location(), self.auto_count)
            .await;
        self.settle(settled, Region::AutomaticRecommendations)
    }

    pub async fn search(&self, raw_title: &str) -> QueryOutcome {
        let settled = self.dispatcher.search(raw_title).await;
        let outcome = self.settle(settled, Region::Recommendations);
        if outcome != QueryOutcome::Rejected {
            self.view.scroll_into_view(Region::Recommendations);
        }
        outcome
    }

    pub async fn filter(&self, kind: FilterKind, value: &str) -> QueryOutcome {
        let settled = self.dispatcher.filter_by(kind, value).await;
        let outcome = self.settle(settled, Region::Recommendations);
        self.view.scroll_into_view(Region::Recommendations);
        outcome
    }

    pub async fn filter_by_year(&self, year: &str) -> QueryOutcome {
        let settled = self.dispatcher.filter_by_year(year).await;
        let outcome = self.settle(settled, Region::Recommendations);
        self.view.scroll_into_view(Region::Recommendations);
        outcome
    }

    /// Suggestions for the search box, also written to the suggestion list.
    /// A superseded answer is dropped and yields an empty list.
    pub async fn autocomplete(&self, term: &str) -> Vec<String> {
        let settled = self.dispatcher.autocomplete(term).await;
        if let Some(ticket) = settled.ticket {
            if !self.dispatcher.is_current(ticket) {
                tracing::debug!(term = %term, seq = ticket.seq, "Discarding stale suggestions");
                return Vec::new();
            }
        }

        let titles = settled.result.unwrap_or_default();
        let items: Vec<Node> = titles
            .iter()
            .map(|title| Node::from(Element::new("li").text(title.as_str())))
            .collect();
        self.view.replace_children(Region::Suggestions, items);
        titles
    }

    pub async fn activate_detail(&self, title: &str) -> DetailOutcome {
        self.detail.activate_detail(title).await
    }

    pub fn open_external_trailer(&self, trailer_id: &str) -> bool {
        match self.detail.open_external_trailer(trailer_id) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(trailer_id = %trailer_id, error = %e, "Cannot open trailer");
                false
            }
        }
    }

    pub fn toggle_sidebar(&self) {
        self.view.toggle_class(Region::Sidebar, SIDEBAR_OPEN_CLASS);
    }

    /// Renders a settled result unless a newer request superseded it
    fn settle(&self, settled: Settled<Vec<RecommendationRecord>>, target: Region) -> QueryOutcome {
        if let Some(ticket) = settled.ticket {
            if !self.dispatcher.is_current(ticket) {
                tracing::debug!(region = %target, seq = ticket.seq, "Discarding stale response");
                return QueryOutcome::Stale;
            }
        }

        match settled.result {
            Ok(records) if records.is_empty() => {
                self.renderer.render(&records, target);
                QueryOutcome::Empty
            }
            Ok(records) => QueryOutcome::Rendered(self.renderer.render(&records, target)),
            Err(e) if e.is_validation() => QueryOutcome::Rejected,
            Err(_) => {
                self.renderer.render_error(target);
                QueryOutcome::Failed
            }
        }
    }
}
