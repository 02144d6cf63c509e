use reqwest::Url;

use crate::{
    error::{ClientError, ClientResult},
    models::MovieDetail,
    render::markup::{escape, Element},
};

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const WATCH_BASE: &str = "https://www.youtube.com/watch";

/// Marks the element whose click opens the external trailer
pub const OPEN_TRAILER_ACTION: &str = "open-trailer";

const EMBED_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Narrow viewports shrink the embed and the poster
const RESPONSIVE_RULES: &str = "@media (max-width: 600px) {\
.youtube-video { width: 426px; height: 260px; }\
.poster-image { width: 150px; height: auto; }\
}";

const BODY_STYLE: &str = "font-family: Arial, sans-serif; background-color: #1e1e1e; color: #fff; \
padding: 20px; box-sizing: border-box; display: flex; flex-direction: column; height: 100%;";

const LAYOUT_STYLE: &str = "display: flex; flex-direction: row; justify-content: space-around; \
align-items: center; text-align: center;";
const METADATA_ROW_STYLE: &str =
    "display: flex; justify-content: flex-start; align-items: center; width: 100%; margin-top: 20px;";
const POSTER_STYLE: &str = "max-width: 200px; margin-left: 50px; margin-right: 20px; cursor: pointer;";
const TEXT_COLUMN_STYLE: &str = "flex: 1; display: flex; flex-direction: column; text-align: left;";

/// Embed URL for a trailer, with the id percent-encoded as a path segment
pub fn trailer_embed_url(trailer_id: &str) -> ClientResult<Url> {
    let mut url = Url::parse(EMBED_BASE).map_err(|e| ClientError::Internal(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Internal("embed base cannot be a base URL".to_string()))?
        .pop_if_empty()
        .push(trailer_id);
    Ok(url)
}

/// Canonical watch page opened by the poster's secondary action
pub fn external_trailer_url(trailer_id: &str) -> ClientResult<Url> {
    Url::parse_with_params(WATCH_BASE, &[("v", trailer_id)])
        .map_err(|e| ClientError::Internal(e.to_string()))
}

/// Self-contained content of a detail view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailDocument {
    pub title: String,
    pub head_style: String,
    pub body_style: String,
    pub body: Element,
}

impl DetailDocument {
    /// Two-pane layout: trailer embed on the left, poster and metadata on the right
    pub fn build(detail: &MovieDetail) -> ClientResult<Self> {
        let embed = Element::new("iframe")
            .class("youtube-video")
            .attr("width", "854")
            .attr("height", "480")
            .attr("src", trailer_embed_url(&detail.trailer_id)?.to_string())
            .attr("frameborder", "0")
            .attr("allow", EMBED_ALLOW)
            .attr("allowfullscreen", "");

        let poster = Element::new("div")
            .attr("data-action", OPEN_TRAILER_ACTION)
            .attr("data-trailer-id", detail.trailer_id.as_str())
            .child(
                Element::new("img")
                    .class("poster-image")
                    .attr("src", detail.poster_or_placeholder())
                    .attr("alt", detail.title.as_str())
                    .style(POSTER_STYLE),
            );

        let mut text = Element::new("div")
            .style("text-align: left;")
            .child(Element::new("h2").style("margin-top: 20px;").text("Movie Details:"))
            .child(Element::new("h3").style("color: red;").text(detail.title.as_str()));
        for line in [
            &detail.top_cast,
            &detail.director,
            &detail.country,
            &detail.genre,
            &detail.runtime,
            &detail.imdb_score,
        ] {
            text = text.child(Element::new("p").style("text-align: left;").text(line.as_str()));
        }

        let body = Element::new("div")
            .class("display-content")
            .style(LAYOUT_STYLE)
            .child(Element::new("div").style("flex: 1;").child(embed))
            .child(
                Element::new("div")
                    .class("movie-details")
                    .style(METADATA_ROW_STYLE)
                    .child(poster)
                    .child(Element::new("div").style(TEXT_COLUMN_STYLE).child(text)),
            );

        Ok(Self {
            title: detail.title.clone(),
            head_style: RESPONSIVE_RULES.to_string(),
            body_style: BODY_STYLE.to_string(),
            body,
        })
    }

    /// Trailer id bound to the poster's open-external action
    pub fn poster_trailer_id(&self) -> Option<&str> {
        find_action(&self.body, OPEN_TRAILER_ACTION).and_then(|el| el.attr_value("data-trailer-id"))
    }

    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>\
<body style=\"{}\">{}</body></html>",
            escape(&self.title),
            self.head_style,
            escape(&self.body_style),
            self.body.to_html()
        )
    }
}

fn find_action<'a>(element: &'a Element, action: &str) -> Option<&'a Element> {
    if element.attr_value("data-action") == Some(action) {
        return Some(element);
    }
    element
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .find_map(|child| find_action(child, action))
}
