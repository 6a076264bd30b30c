use gloo_console::log;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::error::SiteError;
use crate::links::{anchor_selector, ClickEvent};
use crate::page::dom::query_all;

fn on_click<F>(element: &Element, handler: F) -> Result<(), SiteError>
where
    F: FnMut(MouseEvent) + 'static,
{
    let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    element.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// In-page links scroll smoothly instead of jumping.
pub fn wire_smooth_scroll(document: &Document) -> Result<(), SiteError> {
    for anchor in query_all(document, r##"a[href^="#"]"##)? {
        let document = document.clone();
        let link = anchor.clone();
        on_click(&anchor, move |e| {
            e.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            if let Ok(Some(target)) = document.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

/// Logs WhatsApp and phone link clicks.
pub fn wire_click_tracking(document: &Document) -> Result<(), SiteError> {
    let selector = ClickEvent::ALL
        .iter()
        .map(|event| event.selector())
        .collect::<Vec<_>>()
        .join(", ");
    for link in query_all(document, &selector)? {
        let href_source = link.clone();
        on_click(&link, move |_| {
            let href = href_source.get_attribute("href").unwrap_or_default();
            if let Some(event) = ClickEvent::for_href(&href) {
                log!(event.label());
            }
        })?;
    }
    Ok(())
}
