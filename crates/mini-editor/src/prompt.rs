//! Message-bar prompts: save-as, open, search.
//!
//! A prompt is a nested read/dispatch/render loop. Entering it pushes the
//! [`Prompt`](crate::keymap::Keymap::Prompt) key-map over the whole chain;
//! the prompt handler edits [`PromptState::input`] until Enter or Escape
//! sets an outcome, and the loop then pops the override and restores the
//! previous mode.

use tracing::debug;

use crate::editor::Editor;
use crate::error::{EditorError, Result};
use crate::keymap::Keymap;
use crate::mode::EditorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs,
    Open,
    Search,
}

impl PromptKind {
    /// Message-bar text with `input` in place.
    #[must_use]
    pub fn render(self, input: &str) -> String {
        match self {
            Self::SaveAs => format!("Save as: {input} (ESC to cancel)"),
            Self::Open => format!("Open: {input} (ESC to cancel)"),
            Self::Search => format!("Search: {input} (Use ESC/Arrows/Enter)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Submitted,
    Cancelled,
}

/// An active prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
    pub outcome: Option<PromptOutcome>,
}

impl PromptState {
    #[must_use]
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        self.kind.render(&self.input)
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Editor {
    /// Run a prompt to completion and return what the user typed.
    ///
    /// # Errors
    ///
    /// [`EditorError::PromptCancelled`] on Escape; fatal input/output errors
    /// are returned after the dispatcher and mode have been restored.
    pub fn prompt(&mut self, kind: PromptKind) -> Result<String> {
        let saved_mode = self.mode;
        self.dispatcher.push_override(Keymap::Prompt);
        self.mode = EditorMode::Prompt;
        self.prompt = Some(PromptState::new(kind));
        debug!(?kind, "prompt opened");

        let result = self.prompt_loop();

        self.dispatcher.pop_override();
        self.mode = saved_mode;
        let state = self.prompt.take();
        self.set_message("");
        result?;

        match state {
            Some(PromptState {
                outcome: Some(PromptOutcome::Submitted),
                input,
                ..
            }) => {
                debug!(?kind, %input, "prompt submitted");
                Ok(input)
            }
            _ => {
                debug!(?kind, "prompt cancelled");
                Err(EditorError::PromptCancelled)
            }
        }
    }

    fn prompt_loop(&mut self) -> Result<()> {
        loop {
            let Some(state) = self.prompt.as_ref() else {
                return Ok(());
            };
            if state.is_finished() {
                return Ok(());
            }
            let text = state.display();
            self.set_message(text);
            self.refresh_screen()?;
            let key = self.keys.read_key()?;
            self.dispatch(key)?;
        }
    }
}
