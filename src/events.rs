/// UI event routing
///
/// Maps page gestures onto page operations. Tile and chip clicks arrive
/// through the delegated subscriptions on their stable containers and are
/// dispatched by inspecting the click origin, so re-rendering tiles never
/// adds handlers.
use crate::{
    models::FilterKind,
    page::{Page, QueryOutcome, FILTER_CHIP_CLASS},
    render::{TileData, TILE_CLASS},
    services::detail::DetailOutcome,
    view::{ClickEvent, Region},
};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    HamburgerToggle,
    /// Search form submitted with the current title field
    FormSubmit { title: String },
    /// Search field edited
    TitleInput { term: String },
    /// Click delivered by a delegated subscription
    Click(ClickEvent),
    /// Poster clicked inside a detail view
    PosterClick { trailer_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    SidebarToggled,
    Query(QueryOutcome),
    Suggestions(Vec<String>),
    Detail(DetailOutcome),
    ExternalOpened(bool),
    Ignored,
}

#[derive(Clone)]
pub struct EventRouter {
    page: Page,
}

impl EventRouter {
    /// Binds the page's delegated subscriptions and returns the router
    pub fn new(page: Page) -> Self {
        page.bind();
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn route(&self, event: UiEvent) -> RouteOutcome {
        match event {
            UiEvent::HamburgerToggle => {
                self.page.toggle_sidebar();
                RouteOutcome::SidebarToggled
            }
            UiEvent::FormSubmit { title } => RouteOutcome::Query(self.page.search(&title).await),
            UiEvent::TitleInput { term } => {
                RouteOutcome::Suggestions(self.page.autocomplete(&term).await)
            }
            UiEvent::Click(click) => self.route_click(click).await,
            UiEvent::PosterClick { trailer_id } => {
                RouteOutcome::ExternalOpened(self.page.open_external_trailer(&trailer_id))
            }
        }
    }

    async fn route_click(&self, click: ClickEvent) -> RouteOutcome {
        match click.region {
            Region::AutomaticRecommendations | Region::Recommendations => {
                let Some(tile) = click.origin.find_class(TILE_CLASS).and_then(TileData::from_tile)
                else {
                    return RouteOutcome::Ignored;
                };
                RouteOutcome::Detail(self.page.activate_detail(&tile.title).await)
            }
            Region::GenreFilters | Region::CountryFilters | Region::YearFilters => {
                if !click.origin.has_class(FILTER_CHIP_CLASS) {
                    return RouteOutcome::Ignored;
                }
                let label = click.origin.text_content();
                let label = label.trim();
                let outcome = match click.region {
                    Region::GenreFilters => self.page.filter(FilterKind::Genre, label).await,
                    Region::CountryFilters => self.page.filter(FilterKind::Country, label).await,
                    _ => self.page.filter_by_year(label).await,
                };
                RouteOutcome::Query(outcome)
            }
            _ => RouteOutcome::Ignored,
        }
    }
}
