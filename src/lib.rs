//! Browser Python workbench: a CodeMirror editor bound to a Pyodide runtime,
//! with an output transcript and the editor text kept in local storage.

pub mod config;
pub mod editor;
pub mod error;
pub mod gui;
pub mod runtime;
pub mod shortcuts;
pub mod storage;
pub mod telemetry;
pub mod transcript;
pub mod workbench;

use std::rc::Rc;

use tracing::Level;

use crate::config::WorkbenchConfig;

/// Mounts the workbench into the page body.
pub fn start() {
    console_error_panic_hook::set_once();

    let (config, config_error) = WorkbenchConfig::from_document();
    telemetry::init(config.log_level().unwrap_or(Level::INFO));
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "falling back to the default workbench config");
    }

    tracing::info!(storage_key = %config.storage_key, "starting python workbench");
    yew::Renderer::<gui::App>::with_props(gui::AppProps {
        config: Rc::new(config),
    })
    .render();
}
