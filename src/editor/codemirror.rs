// src/editor/codemirror.rs
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlTextAreaElement;

use super::EditorSurface;
use crate::config::EditorOptions;
use crate::error::{describe_js_error, GuiError};

#[wasm_bindgen]
extern "C" {
    /// `CodeMirror` global from the CodeMirror 5 bundle loaded by the page.
    type CodeMirror;

    #[wasm_bindgen(static_method_of = CodeMirror, js_name = fromTextArea, catch)]
    fn from_text_area(textarea: &HtmlTextAreaElement, options: &JsValue) -> Result<CodeMirror, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &CodeMirror) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &CodeMirror, value: &str);
}

/// CodeMirror instance replacing a `<textarea>` on the page.
pub struct CodeMirrorEditor {
    inner: CodeMirror,
}

impl CodeMirrorEditor {
    pub fn attach(textarea: &HtmlTextAreaElement, options: &EditorOptions) -> Result<Self, GuiError> {
        let js_options = build_options(options)
            .map_err(|err| GuiError::WasmBindingError(describe_js_error(&err)))?;
        let inner = CodeMirror::from_text_area(textarea, &js_options)
            .map_err(|err| GuiError::EditorError(describe_js_error(&err)))?;

        tracing::debug!(mode = %options.mode, theme = %options.theme, "editor attached");
        Ok(CodeMirrorEditor { inner })
    }
}

impl EditorSurface for CodeMirrorEditor {
    fn text(&self) -> String {
        self.inner.get_value()
    }

    fn set_text(&self, text: &str) {
        self.inner.set_value(text);
    }
}

fn build_options(options: &EditorOptions) -> Result<JsValue, JsValue> {
    let mode = Object::new();
    Reflect::set(&mode, &"name".into(), &options.mode.as_str().into())?;
    Reflect::set(&mode, &"version".into(), &options.python_version.into())?;

    let js = Object::new();
    Reflect::set(&js, &"mode".into(), &mode)?;
    Reflect::set(&js, &"theme".into(), &options.theme.as_str().into())?;
    Reflect::set(&js, &"lineNumbers".into(), &options.line_numbers.into())?;
    Reflect::set(&js, &"indentUnit".into(), &options.indent_unit.into())?;
    Reflect::set(&js, &"matchBrackets".into(), &options.match_brackets.into())?;
    Ok(js.into())
}
