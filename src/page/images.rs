use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::error::SiteError;
use crate::page::dom::query_all;
use crate::page::observers::{observe_once, supported};
use crate::viewport::ObserverOptions;

/// Adds `loaded` to every image once it has loaded, so the CSS can fade it in.
pub fn wire_fade_in(document: &Document) -> Result<(), SiteError> {
    for element in query_all(document, "img")? {
        let Ok(img) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let on_load = {
            let img = img.clone();
            Closure::<dyn FnMut()>::new(move || {
                let _ = img.class_list().add_1("loaded");
            })
        };
        img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        on_load.forget();

        if img.complete() {
            let _ = img.class_list().add_1("loaded");
        }
    }
    Ok(())
}

/// Swaps `data-src` into `src` when an image scrolls into view.
pub fn wire_lazy(window: &Window, document: &Document) -> Result<(), SiteError> {
    if !supported(window) {
        log::info!("IntersectionObserver unavailable, images load eagerly");
        return Ok(());
    }
    let images: Vec<(Element, ())> = query_all(document, "img[data-src]")?
        .into_iter()
        .map(|img| (img, ()))
        .collect();

    observe_once(images, ObserverOptions::lazy_images(), |element, ()| {
        if let Some(img) = element.dyn_ref::<HtmlImageElement>() {
            let src = img
                .get_attribute("data-src")
                .filter(|src| !src.is_empty())
                .unwrap_or_else(|| img.src());
            img.set_src(&src);
        }
        let _ = element.class_list().remove_1("lazy");
    })
}
