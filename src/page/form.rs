use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::Settings;
use crate::contact::{ContactForm, FieldMark, FormField, FormSurface, LoggedTransport};
use crate::error::SiteError;
use crate::page::dom::set_style;
use crate::page::toast::DomToast;
use crate::scheduler::BrowserScheduler;
use crate::toast::{or_logged, Toaster};

const SENDING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#;

pub struct DomContactForm {
    form: HtmlFormElement,
    submit: Option<Element>,
    original_label: RefCell<Option<String>>,
}

impl DomContactForm {
    pub fn new(form: HtmlFormElement) -> Self {
        let submit = form.query_selector(".form-submit").ok().flatten();
        Self {
            form,
            submit,
            original_label: RefCell::new(None),
        }
    }

    fn field(&self, field: FormField) -> Option<Element> {
        self.form
            .query_selector(&format!(r#"[name="{}"]"#, field.name()))
            .ok()
            .flatten()
    }
}

impl FormSurface for DomContactForm {
    fn value(&self, field: FormField) -> String {
        match self.field(field) {
            Some(el) => {
                if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                    input.value()
                } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                    area.value()
                } else {
                    String::new()
                }
            }
            None => String::new(),
        }
    }

    fn mark(&self, field: FormField, mark: FieldMark) {
        if let Some(el) = self.field(field) {
            set_style(&el, "border-color", mark.border_color());
        }
    }

    fn set_busy(&self, busy: bool) {
        let Some(button) = &self.submit else {
            return;
        };
        if busy {
            *self.original_label.borrow_mut() = Some(button.inner_html());
            button.set_inner_html(SENDING_LABEL);
            let _ = button.set_attribute("disabled", "");
        } else {
            if let Some(label) = self.original_label.borrow_mut().take() {
                button.set_inner_html(&label);
            }
            let _ = button.remove_attribute("disabled");
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

/// Hooks `#contactForm` up to validation and the simulated send. The form is wired
/// even without a `#toast`; its messages then only reach the console.
pub fn wire(
    document: &Document,
    scheduler: BrowserScheduler,
    settings: &Settings,
) -> Result<(), SiteError> {
    let Some(form) = document.get_element_by_id("contactForm") else {
        return Ok(());
    };
    let form: HtmlFormElement = form
        .dyn_into()
        .map_err(|_| SiteError::MissingElement("form#contactForm"))?;

    let toaster = Toaster::new(
        scheduler,
        or_logged(DomToast::find(document)),
        settings.toast_hide_ms,
    );
    let contact = ContactForm::new(
        scheduler,
        Rc::new(DomContactForm::new(form.clone())),
        toaster,
        LoggedTransport,
        settings.submit_latency_ms,
    );

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        e.prevent_default();
        let outcome = contact.submit();
        info!("Contact form submit: {:?}", outcome);
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
