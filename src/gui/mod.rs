// src/gui/mod.rs
use std::rc::Rc;

use web_sys::HtmlTextAreaElement;
use yew::{html, Component, Context, Html, NodeRef, Properties};

use crate::config::WorkbenchConfig;
use crate::editor::CodeMirrorEditor;
use crate::runtime::{PromptInput, PyodideLoader, Session};
use crate::shortcuts::{Action, ShortcutListener, ShortcutMap};
use crate::storage::{BrowserStorage, CodeStore};
use crate::workbench::{StatusLines, Workbench};

type PageWorkbench = Workbench<PyodideLoader, BrowserStorage>;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<WorkbenchConfig>,
}

pub enum AppMessage {
    Perform(Action),
    Refresh,
}

pub struct App {
    // Core components
    workbench: Rc<PageWorkbench>,
    editor: Option<Rc<CodeMirrorEditor>>,
    code_ref: NodeRef,

    // Integration
    _shortcuts: Option<ShortcutListener>,
}

impl App {
    fn build_workbench(config: &WorkbenchConfig) -> PageWorkbench {
        let loader = PyodideLoader::new(config.pyodide_index_url.clone(), Rc::new(PromptInput));

        let store = match BrowserStorage::local() {
            Ok(storage) => CodeStore::new(storage, config.storage_key.clone()),
            Err(err) => {
                tracing::warn!(error = %err, "editor text will not survive a reload");
                CodeStore::detached(config.storage_key.clone())
            }
        };

        Workbench::new(
            Session::new(loader),
            store,
            config.default_snippet.clone(),
            StatusLines {
                initializing: config.banners.initializing.clone(),
                ready: config.banners.ready.clone(),
            },
        )
    }

    fn attach_editor(&mut self, ctx: &Context<Self>) {
        let Some(textarea) = self.code_ref.cast::<HtmlTextAreaElement>() else {
            tracing::error!("code textarea was not rendered");
            return;
        };

        match CodeMirrorEditor::attach(&textarea, &ctx.props().config.editor) {
            Ok(editor) => {
                self.workbench.restore(&editor);
                self.editor = Some(Rc::new(editor));
            }
            Err(err) => tracing::error!(error = %err, "editor widget unavailable"),
        }
    }
}

impl Component for App {
    type Message = AppMessage;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let workbench = Rc::new(Self::build_workbench(config));

        // Start loading the runtime right away
        let warming = Rc::clone(&workbench);
        ctx.link().send_future(async move {
            warming.warm_up().await;
            AppMessage::Refresh
        });

        let link = ctx.link().clone();
        let shortcuts = ShortcutListener::install(ShortcutMap::new(&config.shortcuts), move |action| {
            link.send_message(AppMessage::Perform(action));
        });
        let shortcuts = match shortcuts {
            Ok(listener) => Some(listener),
            Err(err) => {
                tracing::warn!(error = %err, "keyboard shortcuts disabled");
                None
            }
        };

        App {
            workbench,
            editor: None,
            code_ref: NodeRef::default(),
            _shortcuts: shortcuts,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMessage::Perform(Action::Run) => {
                let Some(editor) = self.editor.clone() else {
                    tracing::warn!("run requested before the editor was attached");
                    return false;
                };
                let workbench = Rc::clone(&self.workbench);
                ctx.link().send_future(async move {
                    workbench.perform(Action::Run, &*editor).await;
                    AppMessage::Refresh
                });
                false
            }
            AppMessage::Perform(Action::Clear) => {
                self.workbench.clear();
                true
            }
            AppMessage::Refresh => true,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="workbench">
                <div class="workbench-editor">
                    <textarea id="code" ref={self.code_ref.clone()} />
                </div>
                <div class="workbench-controls">
                    <button id="run-btn" onclick={link.callback(|_| AppMessage::Perform(Action::Run))}>
                        { "Run" }
                    </button>
                    <button id="clear-btn" onclick={link.callback(|_| AppMessage::Perform(Action::Clear))}>
                        { "Clear" }
                    </button>
                </div>
                <textarea id="output" class="workbench-output" readonly=true
                    value={self.workbench.transcript_text()} />
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.attach_editor(ctx);
        }
    }
}
