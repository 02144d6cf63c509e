use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::{
    events::UiEvent,
    render::{markup::escape, DetailDocument, Element, Node, TILE_CLASS},
    view::{AuxiliaryContext, Indicator, Region, View},
};

/// Click delivered through a delegated subscription
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub region: Region,
    /// Nearest element between the click target and the region carrying a
    /// subscribed class
    pub origin: Element,
}

#[derive(Debug, Default)]
struct RegionState {
    children: Vec<Node>,
    text: Option<String>,
    classes: HashSet<String>,
}

#[derive(Default)]
struct PageState {
    regions: HashMap<Region, RegionState>,
    indicators: HashMap<Indicator, bool>,
    indicator_history: Vec<(Indicator, bool)>,
    scrolls: Vec<Region>,
    subscriptions: HashMap<Region, Vec<&'static str>>,
    auxiliary: Vec<Arc<MemoryAuxContext>>,
    external: Vec<String>,
}

/// In-memory page
///
/// Keeps the same state a browser page would (region children, indicator
/// visibility, class lists) plus a log of the side effects that leave the page,
/// so callers can inspect exactly what happened.
#[derive(Default)]
pub struct MemoryView {
    state: Mutex<PageState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn children(&self, region: Region) -> Vec<Node> {
        self.state()
            .regions
            .get(&region)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }

    pub fn html(&self, region: Region) -> String {
        let mut out = String::new();
        for node in self.children(region) {
            node.write_html(&mut out);
        }
        out
    }

    /// Text of the region: explicit text if set, otherwise its children's text
    pub fn text_content(&self, region: Region) -> String {
        let state = self.state();
        match state.regions.get(&region) {
            Some(RegionState { text: Some(text), .. }) => text.clone(),
            Some(r) => r.children.iter().map(Node::text_content).collect(),
            None => String::new(),
        }
    }

    /// Number of top-level children carrying `class`
    pub fn count_class(&self, region: Region, class: &str) -> usize {
        self.children(region)
            .iter()
            .filter_map(Node::as_element)
            .filter(|el| el.has_class(class))
            .count()
    }

    pub fn tile_titles(&self, region: Region) -> Vec<String> {
        self.children(region)
            .iter()
            .filter_map(Node::as_element)
            .filter(|el| el.has_class(TILE_CLASS))
            .filter_map(|el| el.find_tag("h3").map(Element::text_content))
            .collect()
    }

    pub fn has_class(&self, region: Region, class: &str) -> bool {
        self.state()
            .regions
            .get(&region)
            .map(|r| r.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn indicator_visible(&self, indicator: Indicator) -> bool {
        self.state().indicators.get(&indicator).copied().unwrap_or(false)
    }

    /// Every visibility change of `indicator`, oldest first
    pub fn indicator_history(&self, indicator: Indicator) -> Vec<bool> {
        self.state()
            .indicator_history
            .iter()
            .filter(|(i, _)| *i == indicator)
            .map(|(_, visible)| *visible)
            .collect()
    }

    pub fn scrolls(&self) -> Vec<Region> {
        self.state().scrolls.clone()
    }

    pub fn subscription_count(&self, region: Region) -> usize {
        self.state()
            .subscriptions
            .get(&region)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn auxiliary_contexts(&self) -> Vec<Arc<MemoryAuxContext>> {
        self.state().auxiliary.clone()
    }

    pub fn external_urls(&self) -> Vec<String> {
        self.state().external.clone()
    }

    /// Simulates a click on the node reached by following `path` (child
    /// indices) from the region root.
    ///
    /// Returns an event only when a delegated subscription on the region
    /// matches an element on the way from the target up to the region.
    pub fn click(&self, region: Region, path: &[usize]) -> Option<UiEvent> {
        let state = self.state();
        let classes = state.subscriptions.get(&region)?;
        let mut nodes = &state.regions.get(&region)?.children;

        let mut chain: Vec<&Element> = Vec::with_capacity(path.len());
        for &index in path {
            let element = nodes.get(index)?.as_element()?;
            chain.push(element);
            nodes = &element.children;
        }

        let origin = chain
            .iter()
            .rev()
            .find(|el| classes.iter().any(|class| el.has_class(class)))?;

        Some(UiEvent::Click(ClickEvent {
            region,
            origin: (*origin).clone(),
        }))
    }

    /// Clicks the poster image of the tile at `index`
    pub fn click_tile(&self, region: Region, index: usize) -> Option<UiEvent> {
        self.click(region, &[index, 0])
    }

    /// Snapshot of the whole page, region by region
    pub fn render_page(&self) -> String {
        let order = [
            Region::Location,
            Region::AutomaticRecommendations,
            Region::Prompt,
            Region::Suggestions,
            Region::Recommendations,
        ];
        let mut out = String::new();
        for region in order {
            let text = self
                .state()
                .regions
                .get(&region)
                .and_then(|r| r.text.clone());
            let body = match text {
                Some(text) => escape(&text),
                None => self.html(region),
            };
            out.push_str(&format!("<div id=\"{}\">{}</div>\n", region.element_id(), body));
        }
        out
    }
}

impl View for MemoryView {
    fn replace_children(&self, region: Region, nodes: Vec<Node>) {
        let mut state = self.state();
        let entry = state.regions.entry(region).or_default();
        entry.text = None;
        entry.children = nodes;
    }

    fn set_text(&self, region: Region, text: &str) {
        let mut state = self.state();
        let entry = state.regions.entry(region).or_default();
        entry.children.clear();
        entry.text = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    fn set_indicator(&self, indicator: Indicator, visible: bool) {
        let mut state = self.state();
        state.indicators.insert(indicator, visible);
        state.indicator_history.push((indicator, visible));
    }

    fn toggle_class(&self, region: Region, class: &str) {
        let mut state = self.state();
        let classes = &mut state.regions.entry(region).or_default().classes;
        if !classes.remove(class) {
            classes.insert(class.to_string());
        }
    }

    fn scroll_into_view(&self, region: Region) {
        self.state().scrolls.push(region);
    }

    fn delegate_clicks(&self, region: Region, class: &'static str) {
        self.state().subscriptions.entry(region).or_default().push(class);
    }

    fn open_auxiliary(&self) -> Box<dyn AuxiliaryContext> {
        let context = Arc::new(MemoryAuxContext::new());
        self.state().auxiliary.push(context.clone());
        Box::new(SharedAuxContext(context))
    }

    fn open_external(&self, url: &str) {
        self.state().external.push(url.to_string());
    }
}

/// Auxiliary browsing context held in memory
pub struct MemoryAuxContext {
    id: Uuid,
    document: Mutex<Option<DetailDocument>>,
}

impl MemoryAuxContext {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            document: Mutex::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document(&self) -> Option<DetailDocument> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clicks the poster, which carries the open-external action
    pub fn click_poster(&self) -> Option<UiEvent> {
        let document = self.document()?;
        let trailer_id = document.poster_trailer_id()?.to_string();
        Some(UiEvent::PosterClick { trailer_id })
    }
}

/// Handle given to the caller while the view keeps its own reference
struct SharedAuxContext(Arc<MemoryAuxContext>);

impl AuxiliaryContext for SharedAuxContext {
    fn id(&self) -> Uuid {
        self.0.id
    }

    fn populate(&self, document: DetailDocument) {
        *self
            .0
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(title: &str) -> Node {
        Element::new("div")
            .class("movie")
            .child(Element::new("img").class("playTrailer"))
            .child(Element::new("h3").text(title))
            .into()
    }

    #[test]
    fn test_click_without_subscription_is_ignored() {
        let view = MemoryView::new();
        view.replace_children(Region::Recommendations, vec![tile("Heat")]);

        assert!(view.click_tile(Region::Recommendations, 0).is_none());
    }

    #[test]
    fn test_click_resolves_closest_subscribed_ancestor() {
        let view = MemoryView::new();
        view.delegate_clicks(Region::Recommendations, "movie");
        view.replace_children(Region::Recommendations, vec![tile("Heat"), tile("Ronin")]);

        match view.click_tile(Region::Recommendations, 1) {
            Some(UiEvent::Click(click)) => {
                assert_eq!(click.region, Region::Recommendations);
                assert!(click.origin.has_class("movie"));
                assert_eq!(click.origin.text_content(), "Ronin");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_click_out_of_range() {
        let view = MemoryView::new();
        view.delegate_clicks(Region::Recommendations, "movie");
        view.replace_children(Region::Recommendations, vec![tile("Heat")]);

        assert!(view.click_tile(Region::Recommendations, 5).is_none());
    }

    #[test]
    fn test_toggle_class() {
        let view = MemoryView::new();
        view.toggle_class(Region::Sidebar, "sidebar-open");
        assert!(view.has_class(Region::Sidebar, "sidebar-open"));
        view.toggle_class(Region::Sidebar, "sidebar-open");
        assert!(!view.has_class(Region::Sidebar, "sidebar-open"));
    }

    #[test]
    fn test_set_text_replaces_children() {
        let view = MemoryView::new();
        view.replace_children(Region::Prompt, vec![tile("Heat")]);
        view.set_text(Region::Prompt, "Please enter a title");
        assert_eq!(view.text_content(Region::Prompt), "Please enter a title");
        view.set_text(Region::Prompt, "");
        assert_eq!(view.text_content(Region::Prompt), "");
    }

    #[test]
    fn test_indicator_history() {
        let view = MemoryView::new();
        view.set_indicator(Indicator::AutoLoading, true);
        view.set_indicator(Indicator::AutoLoading, false);
        view.set_indicator(Indicator::MovieLoading, true);

        assert_eq!(view.indicator_history(Indicator::AutoLoading), vec![true, false]);
        assert!(view.indicator_visible(Indicator::MovieLoading));
    }
}
