use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::error::SiteError;
use crate::viewport::Rect;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or(SiteError::NoDocument)
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, SiteError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Like `query_selector`, but a missing element is an error.
pub fn require(parent: &Element, selector: &'static str) -> Result<Element, SiteError> {
    parent
        .query_selector(selector)?
        .ok_or(SiteError::MissingElement(selector))
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

/// The layout viewport in client coordinates, the frame `get_bounding_client_rect` uses.
pub fn viewport_rect(window: &Window) -> Rect {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    Rect::new(0.0, 0.0, width, viewport_height(window))
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}
