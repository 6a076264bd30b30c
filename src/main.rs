use chrono::Datelike;
use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

mod config;
mod contact;
mod counter;
mod debounce;
mod error;
mod links;
mod scheduler;
mod scroll;
mod toast;
mod viewport;
mod page {
    pub mod dom;
    pub mod form;
    pub mod images;
    pub mod links;
    pub mod observers;
    pub mod scroll;
    pub mod styles;
    pub mod toast;
}

use config::Settings;
use error::SiteError;
use scheduler::BrowserScheduler;

fn report(feature: &str, result: Result<(), SiteError>) {
    match result {
        Ok(()) => info!("Wired {}", feature),
        Err(e) => error!("Could not wire {}: {}", feature, e),
    }
}

fn set_current_year(document: &Document) -> Result<(), SiteError> {
    if let Some(el) = document.get_element_by_id("currentYear") {
        el.set_text_content(Some(&chrono::Local::now().year().to_string()));
    }
    Ok(())
}

/// Attaches every interactive feature to the already rendered page. A feature whose
/// markup is missing is skipped; one that fails is logged and the rest still run.
fn boot(settings: &Settings) -> Result<(), SiteError> {
    let window = page::dom::window()?;
    let document = page::dom::document()?;
    let scheduler = BrowserScheduler;

    report("footer year", set_current_year(&document));
    report("smooth scrolling", page::links::wire_smooth_scroll(&document));
    report("contact form", page::form::wire(&document, scheduler, settings));
    report("reveal styles", page::styles::inject(&document, page::styles::REVEAL_STYLES));
    report("reveal animations", page::observers::wire_reveal(&window, &document, scheduler, settings));
    report("parallax", page::scroll::wire_parallax(&window, &document, settings));
    report("click tracking", page::links::wire_click_tracking(&document));
    report("image fade-in", page::images::wire_fade_in(&document));
    report("image styles", page::styles::inject(&document, page::styles::IMAGE_STYLES));
    report("lazy images", page::images::wire_lazy(&window, &document));
    report(
        "reveal on scroll",
        page::scroll::wire_reveal_on_scroll(&window, &document, scheduler, settings),
    );
    Ok(())
}

/// `document.readyState` is "loading" until the markup has been parsed.
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn start() -> Result<(), SiteError> {
    let document = page::dom::document()?;
    if !still_parsing(&document.ready_state()) {
        return boot(&Settings::default());
    }

    let on_ready = Closure::<dyn FnMut()>::new(|| {
        if let Err(e) = boot(&Settings::default()) {
            error!("Page setup failed: {}", e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site scripts");
    if let Err(e) = start() {
        error!("Page setup failed: {}", e);
    }
}
