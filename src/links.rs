/// Clicks worth counting. There is no analytics backend; they go to the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickEvent {
    WhatsApp,
    Phone,
}

impl ClickEvent {
    pub const ALL: [ClickEvent; 2] = [ClickEvent::WhatsApp, ClickEvent::Phone];

    pub fn selector(self) -> &'static str {
        match self {
            ClickEvent::WhatsApp => r#"a[href*="wa.me"]"#,
            ClickEvent::Phone => r#"a[href^="tel:"]"#,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClickEvent::WhatsApp => "WhatsApp button clicked",
            ClickEvent::Phone => "Phone button clicked",
        }
    }

    pub fn for_href(href: &str) -> Option<Self> {
        if href.contains("wa.me") {
            Some(ClickEvent::WhatsApp)
        } else if href.starts_with("tel:") {
            Some(ClickEvent::Phone)
        } else {
            None
        }
    }
}

/// The selector an in-page link points at. A bare `#` points nowhere.
pub fn anchor_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(href),
        _ => None,
    }
}
