// src/config.rs
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::ConfigError;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "workbench-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    // Persistence
    pub storage_key: String,
    pub default_snippet: String,

    // Runtime
    pub pyodide_index_url: String,

    // UI
    pub banners: Banners,
    pub editor: EditorOptions,
    pub shortcuts: ShortcutKeys,

    pub log_level: String,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        WorkbenchConfig {
            storage_key: "codeContent".to_string(),
            default_snippet: "print('Hello world')".to_string(),
            pyodide_index_url: "https://cdn.jsdelivr.net/pyodide/v0.19.1/full/".to_string(),
            banners: Banners::default(),
            editor: EditorOptions::default(),
            shortcuts: ShortcutKeys::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banners {
    pub initializing: String,
    pub ready: String,
}

impl Default for Banners {
    fn default() -> Self {
        Banners {
            initializing: "Initializing...".to_string(),
            ready: "LCM Dev Env v1 ready".to_string(),
        }
    }
}

/// Options handed to the editor widget when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub mode: String,
    pub python_version: u8,
    pub theme: String,
    pub line_numbers: bool,
    pub indent_unit: u8,
    pub match_brackets: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            mode: "python".to_string(),
            python_version: 3,
            theme: "dracula".to_string(),
            line_numbers: true,
            indent_unit: 4,
            match_brackets: true,
        }
    }
}

/// Keys pressed together with Ctrl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutKeys {
    pub run: String,
    pub clear: String,
}

impl Default for ShortcutKeys {
    fn default() -> Self {
        ShortcutKeys {
            run: "r".to_string(),
            clear: "l".to_string(),
        }
    }
}

impl WorkbenchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorkbenchConfig = serde_json::from_str(json)?;
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Reads overrides from the page. A missing element means defaults; a
    /// malformed one is reported and also yields defaults.
    pub fn from_document() -> (Self, Option<ConfigError>) {
        let text = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
            _ => (Self::default(), None),
        }
    }
}
