use thiserror::Error;

/// Reasons a visual could not attach to the page.
///
/// None of these reach the user: mount code propagates them with `?` and the
/// entry point turns them into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("element `{0}` has an unexpected type")]
    WrongElement(String),
    #[error("rendering context `{0}` unavailable")]
    NoContext(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SurfaceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type Result<T> = std::result::Result<T, SurfaceError>;
