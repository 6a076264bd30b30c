use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the page. None of these reach the visitor; they are logged.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global `window` available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element `{0}` is missing")]
    MissingElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SiteError::Js(message)
    }
}
