/// Host page abstraction
///
/// The orchestration core never touches a concrete page. It talks to a `View`,
/// which owns the stable regions of the page, the loading indicators and the
/// ability to open new browsing contexts. `MemoryView` is the in-process
/// implementation used by the binary and the tests.
use std::fmt::Display;

use uuid::Uuid;

use crate::render::{DetailDocument, Node};

pub mod memory;

pub use memory::{ClickEvent, MemoryAuxContext, MemoryView};

/// Stable containers of the page; their children are recreated freely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    AutomaticRecommendations,
    Recommendations,
    Location,
    Prompt,
    Suggestions,
    Sidebar,
    GenreFilters,
    CountryFilters,
    YearFilters,
}

impl Region {
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::AutomaticRecommendations => "automaticRecommendationsList",
            Region::Recommendations => "recommendationsList",
            Region::Location => "location",
            Region::Prompt => "promptMessage",
            Region::Suggestions => "suggestions",
            Region::Sidebar => "sidebar",
            Region::GenreFilters => "genreContent",
            Region::CountryFilters => "countryContent",
            Region::YearFilters => "yearContent",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Loading indicators, one per request category that has one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    AutoLoading,
    MovieLoading,
}

/// A freshly opened top-level browsing context
///
/// It inherits nothing from the host page, so whatever it shows must be fully
/// described by the document handed to `populate`.
pub trait AuxiliaryContext: Send + Sync {
    fn id(&self) -> Uuid;

    fn populate(&self, document: DetailDocument);
}

/// Capabilities the client needs from the host page
pub trait View: Send + Sync {
    /// Removes every child of `region` and inserts `nodes` in order
    fn replace_children(&self, region: Region, nodes: Vec<Node>);

    fn set_text(&self, region: Region, text: &str);

    fn set_indicator(&self, indicator: Indicator, visible: bool);

    fn toggle_class(&self, region: Region, class: &str);

    fn scroll_into_view(&self, region: Region);

    /// Subscribes once to clicks inside `region` whose origin sits in an
    /// element carrying `class`. Children of the region may be replaced
    /// without touching the subscription.
    fn delegate_clicks(&self, region: Region, class: &'static str);

    fn open_auxiliary(&self) -> Box<dyn AuxiliaryContext>;

    fn open_external(&self, url: &str);

    fn clear(&self, region: Region) {
        self.replace_children(region, Vec::new());
    }
}
