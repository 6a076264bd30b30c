use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::scheduler::Scheduler;
use crate::toast::{ToastSurface, Toaster};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const ERROR_TITLE: &str = "Error";
pub const SENT_TITLE: &str = "Data sent!";
pub const SENT_MESSAGE: &str = "We'll contact you soon.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Message,
    ];

    /// The input's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Message => "message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMark {
    Normal,
    Invalid,
}

impl FieldMark {
    pub fn border_color(self) -> &'static str {
        match self {
            FieldMark::Normal => "var(--border)",
            FieldMark::Invalid => "var(--destructive)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields.")]
    MissingFields(Vec<FormField>),
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormSubmission {
    pub fn collect<F>(mut read: F) -> Self
    where
        F: FnMut(FormField) -> String,
    {
        Self {
            name: read(FormField::Name),
            email: read(FormField::Email),
            phone: read(FormField::Phone),
            message: read(FormField::Message),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    /// Every required field's mark, in `FormField::REQUIRED` order.
    pub fn required_marks(&self) -> Vec<(FormField, FieldMark)> {
        FormField::REQUIRED
            .iter()
            .map(|&field| {
                let mark = if self.value(field).trim().is_empty() {
                    FieldMark::Invalid
                } else {
                    FieldMark::Normal
                };
                (field, mark)
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<FormField> = self
            .required_marks()
            .into_iter()
            .filter(|(_, mark)| *mark == FieldMark::Invalid)
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// The `#contactForm` element and its submit button.
pub trait FormSurface {
    fn value(&self, field: FormField) -> String;
    fn mark(&self, field: FormField, mark: FieldMark);
    /// Busy swaps the button label for a spinner and disables it; not busy restores it.
    fn set_busy(&self, busy: bool);
    fn reset(&self);
}

/// Hands a validated submission to whoever delivers it.
pub trait Transport {
    fn deliver(&self, submission: &FormSubmission);
}

/// Stand-in transport: there is no backend yet, so the payload is only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggedTransport;

impl Transport for LoggedTransport {
    fn deliver(&self, submission: &FormSubmission) {
        match serde_json::to_string(submission) {
            Ok(payload) => info!("Contact form payload: {}", payload),
            Err(e) => warn!("Could not serialize contact form payload: {}", e),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Sending,
    /// A previous submission is still in flight.
    Busy,
}

pub struct ContactForm<S, F, T, D>
where
    S: Scheduler,
    F: FormSurface + ?Sized,
    T: ToastSurface + ?Sized,
{
    scheduler: S,
    surface: Rc<F>,
    toaster: Toaster<S, T>,
    transport: Rc<D>,
    latency_ms: u32,
    phase: Rc<Cell<SubmitPhase>>,
}

impl<S, F, T, D> ContactForm<S, F, T, D>
where
    S: Scheduler,
    F: FormSurface + ?Sized + 'static,
    T: ToastSurface + ?Sized + 'static,
    D: Transport + 'static,
{
    pub fn new(
        scheduler: S,
        surface: Rc<F>,
        toaster: Toaster<S, T>,
        transport: D,
        latency_ms: u32,
    ) -> Self {
        Self {
            scheduler,
            surface,
            toaster,
            transport: Rc::new(transport),
            latency_ms,
            phase: Rc::new(Cell::new(SubmitPhase::Idle)),
        }
    }

    /// Runs one submit: validate, mark fields, then simulate the round trip.
    pub fn submit(&self) -> SubmitOutcome {
        if self.phase.get() == SubmitPhase::Submitting {
            debug!("Ignoring submit while sending");
            return SubmitOutcome::Busy;
        }

        let submission = FormSubmission::collect(|field| self.surface.value(field));
        for (field, mark) in submission.required_marks() {
            self.surface.mark(field, mark);
        }

        if let Err(err) = submission.validate() {
            if err == ValidationError::InvalidEmail {
                self.surface.mark(FormField::Email, FieldMark::Invalid);
            }
            warn!("Contact form rejected: {:?}", err);
            self.toaster.error(ERROR_TITLE, &err.to_string());
            return SubmitOutcome::Rejected(err);
        }

        self.phase.set(SubmitPhase::Submitting);
        self.surface.set_busy(true);
        self.transport.deliver(&submission);

        let surface = self.surface.clone();
        let toaster = self.toaster.clone();
        let phase = self.phase.clone();
        self.scheduler.detached(self.latency_ms, move || {
            surface.reset();
            surface.set_busy(false);
            phase.set(SubmitPhase::Idle);
            toaster.success(SENT_TITLE, SENT_MESSAGE);
        });
        SubmitOutcome::Sending
    }
}
