use std::fmt::Write;

/// Elements serialised without a closing tag
const VOID_TAGS: &[&str] = &["img", "br", "meta"];

/// A node in a structured view tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(element) => element.text_content(),
            Node::Text(text) => text.clone(),
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&escape(text)),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element with attributes and children
///
/// Attribute values and text are escaped on serialisation, so backend
/// strings can be injected without sanitising them first.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, style: &str) -> Self {
        self.attr("style", style)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// First descendant (depth-first) with the given tag
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.children.iter().filter_map(Node::as_element).find_map(|child| {
            if child.tag == tag {
                Some(child)
            } else {
                child.find_tag(tag)
            }
        })
    }

    /// First descendant-or-self carrying the given class
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find_class(class))
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes text for use in element content and quoted attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let img = Element::new("img").attr("src", "a.jpg").attr("alt", "A");
        assert_eq!(img.to_html(), r#"<img src="a.jpg" alt="A">"#);
    }

    #[test]
    fn test_nested_serialisation_escapes_text_and_attrs() {
        let el = Element::new("div")
            .class("movie")
            .child(Element::new("h3").text("Tom & Jerry"))
            .attr("data-title", "\"quoted\"");
        assert_eq!(
            el.to_html(),
            r#"<div class="movie" data-title="&quot;quoted&quot;"><h3>Tom &amp; Jerry</h3></div>"#
        );
    }

    #[test]
    fn test_queries() {
        let el = Element::new("div")
            .class("movie tile")
            .child(Element::new("img").class("playTrailer"))
            .child(Element::new("h3").text("Heat"));

        assert!(el.has_class("tile"));
        assert!(!el.has_class("mov"));
        assert_eq!(el.find_tag("h3").map(Element::text_content), Some("Heat".to_string()));
        assert!(el.find_class("playTrailer").is_some());
        assert_eq!(el.text_content(), "Heat");
    }
}
