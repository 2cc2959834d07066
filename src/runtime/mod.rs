// src/runtime/mod.rs
//
// Runtime bridge: one lazily initialized Python runtime per session, runs
// serialized through the session.

pub mod pyodide;

use std::cell::Cell;

use tokio::sync::{Mutex, OnceCell};

use crate::error::{ExecutionFailure, InitializationError, RunError};

pub use pyodide::{PromptInput, PyodideLoader, PyodideRuntime};

/// Host callable the executed code reaches through `input()`.
pub trait InputProvider {
    /// `None` when the user dismissed the request.
    fn request_input(&self, prompt: &str) -> Option<String>;
}

/// An initialized runtime.
pub trait PythonRuntime {
    /// Runs `code` with stdout redirected to a fresh in-memory buffer and
    /// returns everything written to it.
    fn execute(&self, code: &str) -> Result<String, ExecutionFailure>;
}

/// Performs the one-time setup producing a runtime.
#[allow(async_fn_in_trait)]
pub trait RuntimeLoader {
    type Runtime: PythonRuntime;

    async fn load(&self) -> Result<Self::Runtime, InitializationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Owns the runtime handle and the single execution slot.
///
/// Setup runs at most once successfully; concurrent `initialize` callers all
/// wait on the same attempt. A failed attempt is not cached: the next caller
/// starts a new one.
pub struct Session<L: RuntimeLoader> {
    loader: L,
    runtime: OnceCell<L::Runtime>,
    run_slot: Mutex<()>,

    // Bookkeeping
    pending_inits: Cell<usize>,
    load_attempts: Cell<usize>,
}

impl<L: RuntimeLoader> Session<L> {
    pub fn new(loader: L) -> Self {
        Session {
            loader,
            runtime: OnceCell::new(),
            run_slot: Mutex::new(()),
            pending_inits: Cell::new(0),
            load_attempts: Cell::new(0),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.runtime.initialized() {
            SessionState::Ready
        } else if self.pending_inits.get() > 0 {
            SessionState::Initializing
        } else {
            SessionState::Uninitialized
        }
    }

    /// Number of times the loader has been invoked.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.get()
    }

    pub async fn initialize(&self) -> Result<&L::Runtime, InitializationError> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        self.pending_inits.set(self.pending_inits.get() + 1);
        let result = self
            .runtime
            .get_or_try_init(|| async {
                self.load_attempts.set(self.load_attempts.get() + 1);
                tracing::info!(attempt = self.load_attempts.get(), "initializing python runtime");
                self.loader.load().await
            })
            .await;
        self.pending_inits.set(self.pending_inits.get() - 1);

        match &result {
            Ok(_) => tracing::debug!("python runtime ready"),
            Err(err) => tracing::error!(error = %err, "python runtime setup failed"),
        }
        result
    }

    /// Waits for the runtime, then runs `code` alone.
    pub async fn run(&self, code: &str) -> Result<String, RunError> {
        let runtime = self.initialize().await?;
        let _slot = self.run_slot.lock().await;

        tracing::debug!(bytes = code.len(), "running python code");
        let output = runtime.execute(code)?;
        Ok(output)
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tokio::sync::Notify;

    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn run_returns_captured_stdout() {
        let session = Session::new(FakeLoader::default());
        let output = session.run("print('Hello world')").await.unwrap();
        assert_eq!(output, "Hello world\n");
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn python_errors_come_back_as_failures() {
        let session = Session::new(FakeLoader::default());
        let err = session.run("raise ValueError('boom')").await.unwrap_err();

        match err {
            RunError::Execution(ExecutionFailure(text)) => assert!(text.contains("ValueError: boom")),
            other => panic!("unexpected error: {other:?}"),
        }

        // the session is still usable afterwards
        assert_eq!(session.run("print('ok')").await.unwrap(), "ok\n");
    }

    #[tokio::test]
    async fn concurrent_initialize_loads_once() {
        let gate = Rc::new(Notify::new());
        let session = Session::new(FakeLoader::gated(gate.clone()));

        let (a, b, c, _) = tokio::join!(
            session.initialize(),
            session.initialize(),
            session.run("print('queued')"),
            async {
                tokio::task::yield_now().await;
                assert_eq!(session.state(), SessionState::Initializing);
                gate.notify_one();
            }
        );

        assert!(std::ptr::eq(a.unwrap(), b.unwrap()));
        assert_eq!(c.unwrap(), "queued\n");
        assert_eq!(session.load_attempts(), 1);
        assert_eq!(session.loader.calls.get(), 1);
    }

    #[tokio::test]
    async fn failed_setup_is_retried_by_next_run() {
        let session = Session::new(FakeLoader::failing(1));

        let err = session.run("print('first')").await.unwrap_err();
        assert!(matches!(err, RunError::Initialization(InitializationError::SetupFailed(_))));
        assert_eq!(session.state(), SessionState::Uninitialized);

        assert_eq!(session.run("print('second')").await.unwrap(), "second\n");
        assert_eq!(session.load_attempts(), 2);
    }

    #[tokio::test]
    async fn input_goes_through_injected_provider() {
        let input = Rc::new(ScriptedInput {
            answers: RefCell::new(vec!["Ada".into()]),
            prompts: RefCell::new(Vec::new()),
        });
        let session = Session::new(FakeLoader {
            input: Some(input.clone()),
            ..Default::default()
        });

        let output = session.run("input('name? ')").await.unwrap();
        assert_eq!(output, "Ada\n");
        assert_eq!(*input.prompts.borrow(), vec!["name? ".to_string()]);
    }
}
