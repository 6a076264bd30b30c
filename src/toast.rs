use std::fmt::Display;
use std::rc::Rc;

use log::{info, warn};
use serde::Serialize;

use crate::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastIcon {
    pub class_name: &'static str,
    pub color: &'static str,
}

impl Severity {
    pub fn icon(self) -> ToastIcon {
        match self {
            Severity::Success => ToastIcon {
                class_name: "fas fa-check-circle toast-icon",
                color: "#10B981",
            },
            Severity::Error => ToastIcon {
                class_name: "fas fa-exclamation-circle toast-icon",
                color: "#EF4444",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToastState {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

/// The single `#toast` element.
pub trait ToastSurface {
    fn render(&self, state: &ToastState);
    fn set_visible(&self, visible: bool);
}

/// Stand-in for a page without a `#toast`: messages only reach the console.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggedToast;

impl ToastSurface for LoggedToast {
    fn render(&self, state: &ToastState) {
        warn!("No toast on the page, dropping {:?}: {} {}", state.severity, state.title, state.message);
    }

    fn set_visible(&self, _visible: bool) {}
}

/// Uses the found surface, or falls back to [`LoggedToast`] when the lookup failed.
pub fn or_logged<T, E>(found: Result<T, E>) -> Rc<dyn ToastSurface>
where
    T: ToastSurface + 'static,
    E: Display,
{
    match found {
        Ok(surface) => Rc::new(surface),
        Err(e) => {
            warn!("Toast unavailable ({}), messages go to the console", e);
            Rc::new(LoggedToast)
        }
    }
}

/// Shows a toast and hides it again `hide_after_ms` later.
///
/// Hide timers are never cancelled. A toast shown 1s after another one is hidden by the
/// first one's timer 4s later.
pub struct Toaster<S: Scheduler, T: ToastSurface + ?Sized> {
    scheduler: S,
    surface: Rc<T>,
    hide_after_ms: u32,
}

impl<S: Scheduler, T: ToastSurface + ?Sized> Clone for Toaster<S, T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            surface: self.surface.clone(),
            hide_after_ms: self.hide_after_ms,
        }
    }
}

impl<S: Scheduler, T: ToastSurface + ?Sized + 'static> Toaster<S, T> {
    pub fn new(scheduler: S, surface: Rc<T>, hide_after_ms: u32) -> Self {
        Self { scheduler, surface, hide_after_ms }
    }

    pub fn show(&self, title: &str, message: &str, severity: Severity) {
        let state = ToastState {
            title: title.to_string(),
            message: message.to_string(),
            severity,
        };
        info!("Toast ({:?}): {} {}", severity, title, message);
        self.surface.render(&state);
        self.surface.set_visible(true);

        let surface = self.surface.clone();
        self.scheduler
            .detached(self.hide_after_ms, move || surface.set_visible(false));
    }

    pub fn success(&self, title: &str, message: &str) {
        self.show(title, message, Severity::Success);
    }

    pub fn error(&self, title: &str, message: &str) {
        self.show(title, message, Severity::Error);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Records what the toast would look like.
    #[derive(Default)]
    pub struct FakeToast {
        pub shown: RefCell<Vec<ToastState>>,
        pub visible: Cell<bool>,
    }

    impl FakeToast {
        pub fn last(&self) -> Option<ToastState> {
            self.shown.borrow().last().cloned()
        }
    }

    impl ToastSurface for FakeToast {
        fn render(&self, state: &ToastState) {
            self.shown.borrow_mut().push(state.clone());
        }

        fn set_visible(&self, visible: bool) {
            self.visible.set(visible);
        }
    }
}
