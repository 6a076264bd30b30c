use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use crate::config::Settings;
use crate::counter::{CounterAnimation, CounterAnimator, CounterDisplay};
use crate::error::SiteError;
use crate::debounce::debounce;
use crate::page::dom::{query_all, viewport_rect};
use crate::scheduler::BrowserScheduler;
use crate::viewport::{Intersection, ObserverOptions, Rect, ViewportObserver};

pub const REVEAL_SELECTOR: &str = ".stats-card, .service-card, .feature-card, .portfolio-item, \
     .testimonial-card, .process-step, .benefit-item";
pub const COUNTER_SELECTOR: &str = ".stats-number";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reveal {
    Animate,
    Counter,
}

struct DomCounter(Element);

impl CounterDisplay for DomCounter {
    fn render(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

pub fn supported(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Watches `elements` and calls `on_fire` once per element when it becomes visible.
///
/// The platform observer reports initial visibility on its own, so elements already on
/// screen fire right after registration.
pub fn observe_once<P, F>(
    elements: Vec<(Element, P)>,
    options: ObserverOptions,
    on_fire: F,
) -> Result<(), SiteError>
where
    P: 'static,
    F: Fn(Element, P) + 'static,
{
    if elements.is_empty() {
        return Ok(());
    }

    let watch = Rc::new(RefCell::new(ViewportObserver::new(options)));
    let callback = {
        let watch = watch.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let samples = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    });
                let fired = watch.borrow_mut().process(samples);
                for (element, payload) in fired {
                    observer.unobserve(&element);
                    on_fire(element, payload);
                }
                debug!("{} elements still watched", watch.borrow().len());
            },
        )
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for (element, payload) in elements {
        observer.observe(&element);
        watch.borrow_mut().observe(element, payload);
    }
    callback.forget();
    Ok(())
}

/// Fades cards in as they enter the viewport and starts the stats counters.
pub fn wire_reveal(
    window: &Window,
    document: &Document,
    scheduler: BrowserScheduler,
    settings: &Settings,
) -> Result<(), SiteError> {
    let mut elements: Vec<(Element, Reveal)> = query_all(document, REVEAL_SELECTOR)?
        .into_iter()
        .map(|el| (el, Reveal::Animate))
        .collect();
    elements.extend(
        query_all(document, COUNTER_SELECTOR)?
            .into_iter()
            .map(|el| (el, Reveal::Counter)),
    );

    let animator = CounterAnimator::new(scheduler);
    let duration_ms = settings.counter_duration_ms;
    let frame_ms = settings.frame_ms;
    let options = ObserverOptions::reveal(settings.reveal_threshold, settings.reveal_bottom_margin_px);

    let fire = move |element: Element, kind: Reveal| {
        let _ = element.class_list().add_1("animate-in");
        if kind == Reveal::Counter {
            let text = element.text_content().unwrap_or_default();
            if let Some(animation) = CounterAnimation::from_text(&text, duration_ms, frame_ms) {
                animator.start(animation, Rc::new(DomCounter(element)));
            }
        }
    };

    if !supported(window) {
        return observe_by_layout(window, scheduler, settings, elements, options, fire);
    }
    observe_once(elements, options, fire)
}

/// Same contract as [`observe_once`] for browsers without `IntersectionObserver`:
/// element bounds are sampled against the viewport now and after scrolling settles.
fn observe_by_layout<P, F>(
    window: &Window,
    scheduler: BrowserScheduler,
    settings: &Settings,
    elements: Vec<(Element, P)>,
    options: ObserverOptions,
    on_fire: F,
) -> Result<(), SiteError>
where
    P: 'static,
    F: Fn(Element, P) + 'static,
{
    if elements.is_empty() {
        return Ok(());
    }

    let watch = Rc::new(RefCell::new(ViewportObserver::new(options)));
    for (element, payload) in elements {
        watch.borrow_mut().observe(element, payload);
    }

    let window_clone = window.clone();
    let check = debounce(scheduler, settings.reveal_debounce_ms, move |()| {
        if watch.borrow().is_empty() {
            return;
        }
        let viewport = viewport_rect(&window_clone);
        let samples = watch.borrow().measure_pending(viewport, |element| {
            let bounds = element.get_bounding_client_rect();
            Rect::new(bounds.top(), bounds.left(), bounds.width(), bounds.height())
        });
        let fired = watch.borrow_mut().process(samples);
        for (element, payload) in fired {
            on_fire(element, payload);
        }
        debug!("{} elements still watched by layout", watch.borrow().len());
    });

    let on_scroll = {
        let check = check.clone();
        Closure::<dyn FnMut()>::new(move || check.trigger(()))
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    check.trigger(());
    Ok(())
}
