// src/error.rs
use thiserror::Error;

/// Python code raised while running. Carries the runtime's own description
/// of the error (traceback included when the runtime provides one).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ExecutionFailure(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializationError {
    #[error("runtime loader unavailable: {0}")]
    LoaderMissing(String),
    #[error("runtime setup failed: {0}")]
    SetupFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed workbench config: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid log level `{0}`")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuiError {
    #[error("editor error: {0}")]
    EditorError(String),
    #[error("element `{0}` is missing from the page")]
    MissingElement(String),
    #[error("wasm binding error: {0}")]
    WasmBindingError(String),
}

/// Best-effort text for a value thrown across the JS boundary.
pub(crate) fn describe_js_error(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.to_string());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
