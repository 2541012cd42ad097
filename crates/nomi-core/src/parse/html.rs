use std::collections::BTreeMap;
use std::collections::HashSet;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

use crate::error::Result;
use crate::types::EntitySpan;

use super::DocumentParser;

/// Where an annotation tag's entity label comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelStrategy {
    /// Use the uppercased tag name (`<per>` → `"PER"`).
    TagName,
    /// Use the value of the named attribute, falling back to the uppercased
    /// tag name when the attribute is absent.
    Attribute(String),
}

impl Default for LabelStrategy {
    fn default() -> Self {
        Self::TagName
    }
}

/// Parses inline-annotated HTML into clean text and entity spans.
///
/// Every element that is not in the excluded set is treated as an
/// annotation: its text content becomes an entity span, labeled per the
/// configured [`LabelStrategy`], with the element's attributes carried
/// along. Excluded (structural) elements contribute their text but no
/// span. Span offsets are tracked against the accumulated clean text, so
/// nested annotations — when enabled — get correct offsets even in the
/// middle of an enclosing span.
///
/// # Examples
/// ```rust
/// use nomi_core::parse::{DocumentParser, HtmlTagParser};
///
/// let parser = HtmlTagParser::new();
/// let (text, spans) = parser.parse("<p><per>Barack Obama</per> visited</p>").unwrap();
///
/// assert_eq!(text, "Barack Obama visited");
/// assert_eq!(spans[0].label, "PER");
/// assert_eq!(&text[spans[0].start..spans[0].end], "Barack Obama");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlTagParser {
    label_strategy: LabelStrategy,
    excluded_tags: HashSet<String>,
    allow_nested: bool,
}

impl Default for HtmlTagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlTagParser {
    /// Creates a parser labeling by tag name, with the default structural
    /// exclusions (`html`, `body`, `div`, `p`, `span`) and nesting
    /// disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            label_strategy: LabelStrategy::TagName,
            excluded_tags: ["html", "body", "div", "p", "span"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            allow_nested: false,
        }
    }

    /// Sets the label strategy.
    #[must_use]
    pub fn with_label_strategy(mut self, strategy: LabelStrategy) -> Self {
        self.label_strategy = strategy;
        self
    }

    /// Replaces the set of excluded (structural) tags.
    #[must_use]
    pub fn with_excluded_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables annotation of nested tags.
    ///
    /// When disabled, only the outermost annotation tag produces a span;
    /// its descendants contribute text only.
    #[must_use]
    pub fn with_allow_nested(mut self, allow_nested: bool) -> Self {
        self.allow_nested = allow_nested;
        self
    }

    fn is_annotation_tag(&self, name: &str) -> bool {
        !self.excluded_tags.contains(name)
    }

    fn extract_label(&self, element: &scraper::node::Element) -> String {
        match &self.label_strategy {
            LabelStrategy::TagName => element.name().to_uppercase(),
            LabelStrategy::Attribute(attribute) => element
                .attr(attribute)
                .map(str::to_string)
                .unwrap_or_else(|| element.name().to_uppercase()),
        }
    }

    fn walk(
        &self,
        node: NodeRef<'_, Node>,
        out: &mut String,
        entities: &mut Vec<EntitySpan>,
    ) -> Result<()> {
        match node.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(element) => {
                if self.is_annotation_tag(element.name()) {
                    let start = out.len();
                    if self.allow_nested {
                        for child in node.children() {
                            self.walk(child, out, entities)?;
                        }
                    } else if let Some(element_ref) = ElementRef::wrap(node) {
                        for piece in element_ref.text() {
                            out.push_str(piece);
                        }
                    }
                    let end = out.len();

                    let attributes: BTreeMap<String, String> = element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect();
                    let span = EntitySpan::new(
                        out[start..end].to_string(),
                        start,
                        end,
                        self.extract_label(element),
                    )?
                    .with_attributes(attributes);
                    entities.push(span);
                } else {
                    for child in node.children() {
                        self.walk(child, out, entities)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl DocumentParser for HtmlTagParser {
    fn parse(&self, doc: &str) -> Result<(String, Vec<EntitySpan>)> {
        let html = Html::parse_fragment(doc);
        let mut text = String::new();
        let mut entities = Vec::new();

        // The fragment parser wraps content in a synthetic <html> element;
        // start below it so the wrapper can never become an annotation.
        for child in html.root_element().children() {
            self.walk(child, &mut text, &mut entities)?;
        }

        Ok((text, entities))
    }
}
