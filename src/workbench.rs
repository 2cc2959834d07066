// src/workbench.rs
use std::cell::RefCell;

use crate::editor::EditorSurface;
use crate::error::RunError;
use crate::runtime::{RuntimeLoader, Session, SessionState};
use crate::shortcuts::Action;
use crate::storage::{CodeStore, KeyValueStore};
use crate::transcript::Transcript;

/// Status lines shown while the runtime comes up.
#[derive(Debug, Clone)]
pub struct StatusLines {
    pub initializing: String,
    pub ready: String,
}

/// The session object the page holds: runtime, persisted code and the
/// output transcript, plus the Run and Clear actions over them.
pub struct Workbench<L: RuntimeLoader, S> {
    // Execution
    session: Session<L>,

    // Persistence
    store: CodeStore<S>,
    default_snippet: String,

    // Output
    transcript: RefCell<Transcript>,
    status: StatusLines,
}

impl<L: RuntimeLoader, S: KeyValueStore> Workbench<L, S> {
    pub fn new(session: Session<L>, store: CodeStore<S>, default_snippet: impl Into<String>, status: StatusLines) -> Self {
        let mut transcript = Transcript::new();
        transcript.set_status(status.initializing.clone());

        Workbench {
            session,
            store,
            default_snippet: default_snippet.into(),
            transcript: RefCell::new(transcript),
            status,
        }
    }

    /// Puts the last saved code (or the default snippet) into the editor.
    pub fn restore(&self, editor: &impl EditorSurface) {
        let code = self.store.load_or(&self.default_snippet);
        editor.set_text(&code);
    }

    /// Background initialization kicked off at page load.
    pub async fn warm_up(&self) {
        match self.session.initialize().await {
            Ok(_) => self.transcript.borrow_mut().set_status(self.status.ready.clone()),
            Err(err) => self
                .transcript
                .borrow_mut()
                .set_status(format!("Initialization failed: {err}")),
        }
    }

    pub async fn perform(&self, action: Action, editor: &impl EditorSurface) {
        match action {
            Action::Run => self.run(editor.text()).await,
            Action::Clear => self.clear(),
        }
    }

    /// Executes `code`, appends the outcome to the transcript and persists `code`.
    pub async fn run(&self, code: String) {
        let entry = match self.session.run(&code).await {
            Ok(output) => output,
            Err(RunError::Execution(failure)) => {
                tracing::debug!(error = %failure, "python code raised");
                failure.to_string()
            }
            Err(RunError::Initialization(err)) => {
                let line = format!("Initialization failed: {err}");
                self.transcript.borrow_mut().set_status(line.clone());
                line
            }
        };

        let mut transcript = self.transcript.borrow_mut();
        if self.session.state() == SessionState::Ready && transcript.has_status() {
            transcript.set_status(self.status.ready.clone());
        }
        transcript.append(&entry);
        drop(transcript);

        self.store.save(&code);
    }

    pub fn clear(&self) {
        self.transcript.borrow_mut().clear();
    }

    pub fn transcript_text(&self) -> String {
        self.transcript.borrow().render()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }
}
