use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::Settings;
use crate::debounce::debounce;
use crate::error::SiteError;
use crate::page::dom::{query_all, viewport_height};
use crate::scheduler::BrowserScheduler;
use crate::scroll::{parallax_offset, parallax_transform, RevealOnScroll};

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Moves the hero background at half the scroll speed. Runs on every scroll event.
pub fn wire_parallax(window: &Window, document: &Document, settings: &Settings) -> Result<(), SiteError> {
    let (Some(hero), Some(background)) = (
        query_html(document, ".hero-section"),
        query_html(document, ".hero-background"),
    ) else {
        return Ok(());
    };

    let rate = settings.parallax_rate;
    let window_clone = window.clone();
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let scrolled = window_clone.scroll_y().unwrap_or(0.0);
        if let Some(offset) = parallax_offset(scrolled, f64::from(hero.offset_height()), rate) {
            let _ = background
                .style()
                .set_property("transform", &parallax_transform(offset));
        }
    });
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

/// Adds `revealed` to `.reveal-on-scroll` elements, checked 10ms after scrolling settles.
pub fn wire_reveal_on_scroll(
    window: &Window,
    document: &Document,
    scheduler: BrowserScheduler,
    settings: &Settings,
) -> Result<(), SiteError> {
    let elements = query_all(document, ".reveal-on-scroll")?;
    if elements.is_empty() {
        return Ok(());
    }

    let reveal = Rc::new(RefCell::new(RevealOnScroll::new(settings.reveal_offset_px, elements)));
    let window_clone = window.clone();
    let sweep = debounce(scheduler, settings.reveal_debounce_ms, move |()| {
        let height = viewport_height(&window_clone);
        let revealed = reveal
            .borrow_mut()
            .sweep(height, |el| el.get_bounding_client_rect().top());
        for element in revealed {
            let _ = element.class_list().add_1("revealed");
        }
        debug!("{} reveal-on-scroll elements pending", reveal.borrow().pending());
    });

    let on_scroll = {
        let sweep = sweep.clone();
        Closure::<dyn FnMut()>::new(move || sweep.trigger(()))
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    // Elements already above the fold reveal without waiting for a scroll.
    sweep.trigger(());
    Ok(())
}
