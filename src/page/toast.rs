use web_sys::{Document, Element};

use crate::error::SiteError;
use crate::page::dom::{require, set_style};
use crate::toast::{ToastState, ToastSurface};

pub struct DomToast {
    root: Element,
    title: Element,
    description: Element,
    icon: Element,
}

impl DomToast {
    pub fn find(document: &Document) -> Result<Self, SiteError> {
        let root = document
            .get_element_by_id("toast")
            .ok_or(SiteError::MissingElement("#toast"))?;
        Ok(Self {
            title: require(&root, ".toast-title")?,
            description: require(&root, ".toast-description")?,
            icon: require(&root, ".toast-icon")?,
            root,
        })
    }
}

impl ToastSurface for DomToast {
    fn render(&self, state: &ToastState) {
        self.title.set_text_content(Some(&state.title));
        self.description.set_text_content(Some(&state.message));

        let icon = state.severity.icon();
        self.icon.set_class_name(icon.class_name);
        set_style(&self.icon, "color", icon.color);
    }

    fn set_visible(&self, visible: bool) {
        let classes = self.root.class_list();
        let _ = if visible {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
    }
}
