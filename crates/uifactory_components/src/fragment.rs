use crate::error::{ComponentError, ComponentResult};
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};

/// The original children of an element, detached once and cached.
///
/// Templates never receive the children themselves, only lookups into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFragment {
    html: String,
}

impl ContentFragment {
    pub fn capture(body: &str) -> Self {
        Self {
            html: body.trim().to_string(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Outer markup of every element matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> ComponentResult<Vec<String>> {
        let parsed = Selector::parse(selector).map_err(|e| ComponentError::Selector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        let fragment = Html::parse_fragment(&self.html);
        let matches = fragment.select(&parsed).map(|el| el.html()).collect();
        Ok(matches)
    }

    pub fn select_first(&self, selector: &str) -> ComponentResult<Option<String>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// The lookup object handed to templates as `contents`: `html` holds the
    /// whole fragment and every tag name maps to its first element's markup.
    pub fn to_value(&self) -> Value {
        let mut lookup = Map::new();
        lookup.insert("html".to_string(), Value::String(self.html.clone()));

        let fragment = Html::parse_fragment(&self.html);
        let root = fragment.root_element();
        for node in root.descendants().skip(1) {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            let tag = el.value().name().to_string();
            if tag == "html" {
                continue;
            }
            lookup
                .entry(tag)
                .or_insert_with(|| Value::String(el.html()));
        }
        Value::Object(lookup)
    }
}
