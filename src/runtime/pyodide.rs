// src/runtime/pyodide.rs
use std::rc::Rc;

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::{InputProvider, PythonRuntime, RuntimeLoader};
use crate::error::{describe_js_error, ExecutionFailure, InitializationError};

/// Python module name under which host callables are exposed.
const HOST_MODULE: &str = "host";

const SETUP: &str = "import sys";

// Fresh stdout buffer and host-backed input() before every run.
const PRELUDE: &str = "\
import io
import builtins
import host
sys.stdout = io.StringIO()
builtins.input = host.input
";

const READ_STDOUT: &str = "sys.stdout.getvalue()";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = loadPyodide, catch)]
    fn load_pyodide(config: &JsValue) -> Result<Promise, JsValue>;

    /// Interface object resolved by `loadPyodide`.
    type Pyodide;

    #[wasm_bindgen(method, js_name = runPython, catch)]
    fn run_python(this: &Pyodide, code: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = registerJsModule, catch)]
    fn register_js_module(this: &Pyodide, name: &str, module: &JsValue) -> Result<(), JsValue>;
}

/// Loads Pyodide from `index_url` and wires the host input capability in.
pub struct PyodideLoader {
    index_url: String,
    input: Rc<dyn InputProvider>,
}

impl PyodideLoader {
    pub fn new(index_url: impl Into<String>, input: Rc<dyn InputProvider>) -> Self {
        PyodideLoader {
            index_url: index_url.into(),
            input,
        }
    }

    fn host_module(&self) -> Result<(Object, Closure<dyn Fn(JsValue) -> JsValue>), JsValue> {
        let input = Rc::clone(&self.input);
        let host_input = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |prompt: JsValue| {
            let prompt = prompt.as_string().unwrap_or_default();
            match input.request_input(&prompt) {
                Some(answer) => JsValue::from_str(&answer),
                None => JsValue::NULL,
            }
        });

        let module = Object::new();
        Reflect::set(&module, &"input".into(), host_input.as_ref())?;
        Ok((module, host_input))
    }
}

impl RuntimeLoader for PyodideLoader {
    type Runtime = PyodideRuntime;

    async fn load(&self) -> Result<PyodideRuntime, InitializationError> {
        let setup_failed = |err: JsValue| InitializationError::SetupFailed(describe_js_error(&err));

        let config = Object::new();
        Reflect::set(&config, &"indexURL".into(), &self.index_url.as_str().into()).map_err(setup_failed)?;

        let promise = load_pyodide(&config)
            .map_err(|err| InitializationError::LoaderMissing(describe_js_error(&err)))?;
        let handle: Pyodide = JsFuture::from(promise).await.map_err(setup_failed)?.unchecked_into();

        let (module, host_input) = self.host_module().map_err(setup_failed)?;
        handle.register_js_module(HOST_MODULE, &module).map_err(setup_failed)?;
        handle.run_python(SETUP).map_err(setup_failed)?;

        tracing::info!(index_url = %self.index_url, "pyodide loaded");
        Ok(PyodideRuntime {
            handle,
            _host_input: host_input,
        })
    }
}

pub struct PyodideRuntime {
    handle: Pyodide,
    // referenced from Python through the host module
    _host_input: Closure<dyn Fn(JsValue) -> JsValue>,
}

impl PyodideRuntime {
    fn run(&self, code: &str) -> Result<JsValue, ExecutionFailure> {
        self.handle
            .run_python(code)
            .map_err(|err| ExecutionFailure(describe_js_error(&err)))
    }
}

impl PythonRuntime for PyodideRuntime {
    fn execute(&self, code: &str) -> Result<String, ExecutionFailure> {
        self.run(PRELUDE)?;
        self.run(code)?;
        Ok(self.run(READ_STDOUT)?.as_string().unwrap_or_default())
    }
}

/// `window.prompt`, as a plain page would answer `input()`.
pub struct PromptInput;

impl InputProvider for PromptInput {
    fn request_input(&self, prompt: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message(prompt) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %describe_js_error(&err), "prompt failed");
                None
            }
        }
    }
}
