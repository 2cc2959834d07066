// src/transcript.rs

/// Line written before every execution entry.
pub const ENTRY_SEPARATOR: &str = ">>> \n";

/// Text of the output panel: a replaceable status line followed by the
/// entries appended during this session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    status: Option<String>,
    entries: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: &str) {
        self.entries.push_str(ENTRY_SEPARATOR);
        self.entries.push_str(text);
        self.entries.push('\n');
    }

    /// Replaces the status line; appended entries are left alone.
    pub fn set_status(&mut self, line: impl Into<String>) {
        self.status = Some(line.into());
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    pub fn clear(&mut self) {
        self.status = None;
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        match &self.status {
            Some(status) => format!("{status}\n{}", self.entries),
            None => self.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_wraps_text_in_separator_and_newline() {
        let mut transcript = Transcript::new();
        transcript.append("Hello world\n");
        assert_eq!(transcript.render(), ">>> \nHello world\n\n");
    }

    #[test]
    fn entries_accumulate_in_order() {
        let mut transcript = Transcript::new();
        transcript.append("1\n");
        transcript.append("2\n");
        assert_eq!(transcript.render(), ">>> \n1\n\n>>> \n2\n\n");
    }

    #[test]
    fn status_line_is_replaced_not_appended() {
        let mut transcript = Transcript::new();
        transcript.set_status("Initializing...");
        transcript.append("early\n");
        transcript.set_status("LCM Dev Env v1 ready");

        assert_eq!(transcript.render(), "LCM Dev Env v1 ready\n>>> \nearly\n\n");
    }

    #[test]
    fn clear_empties_everything() {
        let mut transcript = Transcript::new();
        transcript.set_status("ready");
        transcript.append("a\n");
        transcript.clear();

        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");

        transcript.clear();
        assert_eq!(transcript.render(), "");
    }
}
