// src/editor/mod.rs
//
// Editor adapter: whole-buffer access to the text-editing widget.

pub mod codemirror;

use std::cell::RefCell;

pub use codemirror::CodeMirrorEditor;

/// Whole-buffer access to an editing surface. No validation and no error
/// conditions: any text, including the empty string, goes in and comes out.
pub trait EditorSurface {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// Plain in-memory buffer with the same contract as the on-page widget.
#[derive(Debug, Default)]
pub struct BufferEditor {
    buffer: RefCell<String>,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        BufferEditor {
            buffer: RefCell::new(text.into()),
        }
    }
}

impl EditorSurface for BufferEditor {
    fn text(&self) -> String {
        self.buffer.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.buffer.borrow_mut() = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_replaces_whole_text() {
        let editor = BufferEditor::new("x = 1\n");
        editor.set_text("print(x)");
        assert_eq!(editor.text(), "print(x)");
    }

    #[test]
    fn buffer_accepts_empty_text() {
        let editor = BufferEditor::new("something");
        editor.set_text("");
        assert_eq!(editor.text(), "");
    }
}
