//! Error type for the tooltip crate.
//!
//! Expected conditions ("no content", "no fitting position") are outcomes, not
//! errors. [`TooltipError`] covers bad configuration and a browser that refuses
//! a DOM call.

use wasm_bindgen::JsValue;

/// Error returned by settings parsing and the browser layer.
#[derive(Debug, thiserror::Error)]
pub enum TooltipError {
    /// The settings object could not be deserialized.
    #[error("invalid tooltip settings: {0}")]
    Settings(#[from] serde_json::Error),
    /// No global `window` (not running in a browser main thread).
    #[error("no window available")]
    NoWindow,
    /// The window has no document.
    #[error("no document available")]
    NoDocument,
    /// The document has no body to append the tooltip box to.
    #[error("document has no body")]
    NoBody,
    /// A page callback called back into the widget while it was handling an event.
    #[error("tooltip widget is busy; callbacks must not call back into it")]
    Busy,
    /// A DOM call threw; the payload is the debug rendering of the JS value.
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl TooltipError {
    /// Wrap a thrown JS value.
    #[must_use]
    pub fn dom(err: &JsValue) -> Self {
        Self::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<TooltipError> for JsValue {
    fn from(err: TooltipError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
