//! Small helpers over rendered field markup.

use scraper::{ElementRef, Html};
use std::borrow::Cow;

fn top_level_elements(fragment: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    fragment.root_element().children().filter_map(ElementRef::wrap)
}

/// Inner markup of the first top-level element, trimmed.
///
/// Rendering `<div class="form-group"><input></div>` yields `<input>`, so the
/// result can be placed inside an existing wrapper without nesting it twice.
pub fn first_inner_html(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    top_level_elements(&fragment)
        .next()
        .map(|el| el.inner_html().trim().to_string())
        .unwrap_or_default()
}

/// Concatenated inner markup of the top-level elements carrying `class`.
/// Everything else, wrappers included, is dropped.
pub fn stitch_class_fragments(markup: &str, class: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    top_level_elements(&fragment)
        .filter(|el| el.value().classes().any(|c| c == class))
        .map(|el| el.inner_html().trim().to_string())
        .collect()
}

pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
