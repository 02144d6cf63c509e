/// Result rendering
///
/// Turns a list of recommendation records into tile nodes for a target
/// region. Rendering always replaces the region's children, so repeating a
/// render never accumulates tiles.
use std::sync::Arc;

use crate::{
    models::RecommendationRecord,
    view::{Region, View},
};

pub mod detail_page;
pub mod markup;

pub use detail_page::{external_trailer_url, trailer_embed_url, DetailDocument};
pub use markup::{Element, Node};

/// Class carried by every tile; the delegated click subscription matches on it
pub const TILE_CLASS: &str = "movie";
pub const PLACEHOLDER_CLASS: &str = "placeholder";

pub const EMPTY_PLACEHOLDER: &str = "No recommendations found.";
pub const ERROR_PLACEHOLDER: &str = "Error fetching recommendations. Please try again later.";

/// Data a tile carries so activation needs no further lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileData {
    pub title: String,
    pub trailer_id: String,
}

impl TileData {
    /// Reads the tile behind a click origin: the heading text names the title
    pub fn from_tile(tile: &Element) -> Option<Self> {
        let title = tile
            .find_tag("h3")
            .map(Element::text_content)
            .or_else(|| {
                tile.find_tag("img")
                    .and_then(|img| img.attr_value("data-title"))
                    .map(str::to_string)
            })?;
        let trailer_id = tile
            .find_tag("img")
            .and_then(|img| img.attr_value("data-youtube-id"))
            .unwrap_or_default()
            .to_string();
        Some(Self { title, trailer_id })
    }
}

/// Builds the tile for one record
pub fn tile(record: &RecommendationRecord) -> Element {
    Element::new("div")
        .class(TILE_CLASS)
        .child(
            Element::new("img")
                .class("playTrailer")
                .attr("src", record.poster_or_placeholder())
                .attr("alt", record.title.as_str())
                .attr("data-youtube-id", record.trailer_id.as_str())
                .attr("data-title", record.title.as_str()),
        )
        .child(Element::new("h3").text(record.title.as_str()))
}

pub fn placeholder(message: &str) -> Element {
    Element::new("p").class(PLACEHOLDER_CLASS).text(message)
}

/// Writes record lists into page regions
#[derive(Clone)]
pub struct ResultRenderer {
    view: Arc<dyn View>,
}

impl ResultRenderer {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self { view }
    }

    /// Replaces `target` with one tile per record, in response order.
    ///
    /// An empty list renders a single placeholder. Returns the number of
    /// tiles written.
    pub fn render(&self, records: &[RecommendationRecord], target: Region) -> usize {
        let nodes: Vec<Node> = if records.is_empty() {
            vec![placeholder(EMPTY_PLACEHOLDER).into()]
        } else {
            records.iter().map(|record| Node::from(tile(record))).collect()
        };

        self.view.replace_children(target, nodes);

        tracing::debug!(region = %target, tiles = records.len(), "Rendered recommendations");
        records.len()
    }

    pub fn render_error(&self, target: Region) {
        self.view
            .replace_children(target, vec![placeholder(ERROR_PLACEHOLDER).into()]);
    }
}
