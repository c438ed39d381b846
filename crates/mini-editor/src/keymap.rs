//! Key dispatch — an ordered chain of key-maps.
//!
//! Each key is offered to the key-maps of the active chain in priority
//! order. The first one that claims it consumes it; unclaimed keys are
//! dropped.
//!
//! ```text
//!   Command:  [Global, Command]
//!   Insert:   [Global, Insert ]      set_mode swaps slot 1 only
//!   Prompt:   [Prompt]               push_override / pop_override
//! ```
//!
//! The key-maps themselves are a closed set, so they are an enum and the
//! handlers are `Editor` methods rather than trait objects.

use mini_term::input::{KeyCode, KeyEvent};
use tracing::debug;

use crate::editor::Editor;
use crate::error::Result;
use crate::mode::EditorMode;
use crate::prompt::{PromptKind, PromptOutcome};
use crate::search::SearchStep;

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keymap {
    /// Keys that work in Command and Insert mode alike.
    Global,
    Command,
    Insert,
    /// Claims every key while a prompt is open.
    Prompt,
}

impl Keymap {
    /// The mode-specific key-map for `mode`.
    #[must_use]
    pub const fn for_mode(mode: EditorMode) -> Self {
        match mode {
            EditorMode::Command => Self::Command,
            EditorMode::Insert => Self::Insert,
            EditorMode::Prompt => Self::Prompt,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Index of the mode-specific key-map in the base chain.
const MODE_SLOT: usize = 1;

/// The active key-map chain plus the chains shadowed by overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    chain: Vec<Keymap>,
    saved: Vec<Vec<Keymap>>,
}

impl Dispatcher {
    /// Command-mode chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: vec![Keymap::Global, Keymap::Command],
            saved: Vec::new(),
        }
    }

    #[must_use]
    pub fn chain(&self) -> &[Keymap] {
        &self.chain
    }

    /// Swap the mode-specific slot of the base chain. While overridden the
    /// change lands in the shadowed chain and shows up on pop.
    pub fn set_mode_slot(&mut self, keymap: Keymap) {
        let base = self.saved.first_mut().unwrap_or(&mut self.chain);
        if let Some(slot) = base.get_mut(MODE_SLOT) {
            *slot = keymap;
        }
    }

    /// Replace the whole chain with `keymap` until the matching pop.
    pub fn push_override(&mut self, keymap: Keymap) {
        let shadowed = std::mem::replace(&mut self.chain, vec![keymap]);
        self.saved.push(shadowed);
    }

    /// Restore the chain shadowed by the last override. Returns `false` if
    /// there was none.
    pub fn pop_override(&mut self) -> bool {
        match self.saved.pop() {
            Some(chain) => {
                self.chain = chain;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_overridden(&self) -> bool {
        !self.saved.is_empty()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

impl Editor {
    /// Offer `key` to each key-map of the active chain. Returns whether any
    /// claimed it.
    ///
    /// # Errors
    ///
    /// Only fatal errors escape; everything else has been reported on the
    /// message bar by the handler.
    pub fn dispatch(&mut self, key: KeyEvent) -> Result<bool> {
        let chain = self.dispatcher.chain().to_vec();
        for keymap in chain {
            let claimed = match keymap {
                Keymap::Global => self.handle_global(key)?,
                Keymap::Command => self.handle_command(key)?,
                Keymap::Insert => self.handle_insert(key),
                Keymap::Prompt => self.handle_prompt(key),
            };
            if claimed {
                debug!(?keymap, ?key, "key claimed");
                return Ok(true);
            }
        }
        debug!(?key, "key dropped");
        Ok(false)
    }

    fn handle_global(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.is_empty() {
            match key.code {
                KeyCode::Up => self.set_relative_y(-1),
                KeyCode::Down => self.set_relative_y(1),
                KeyCode::Left => self.set_relative_x(-1),
                KeyCode::Right => self.set_relative_x(1),
                KeyCode::Home => self.set_absolute_x(0),
                KeyCode::End => self.set_max_x(),
                KeyCode::PageUp => self.page_up(),
                KeyCode::PageDown => self.page_down(),
                _ => return Ok(false),
            }
            return Ok(true);
        }

        if key.is_ctrl('q') {
            self.quit_command();
        } else if key.is_ctrl('s') {
            self.save_command()?;
        } else if key.is_ctrl('o') {
            self.open_command()?;
        } else if key.is_ctrl('f') {
            self.find_command()?;
        } else if key.is_ctrl('c') {
            self.set_mode(EditorMode::Command);
        } else if key.is_ctrl('w') {
            self.delete_until(' ');
        } else if key.is_ctrl('l') {
            // redraw happens every cycle anyway
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn handle_command(&mut self, key: KeyEvent) -> Result<bool> {
        if key == KeyEvent::plain(KeyCode::Escape) {
            return Ok(true);
        }
        let Some(ch) = key.printable() else {
            return Ok(false);
        };
        match ch {
            'h' => self.set_relative_x(-1),
            'j' => self.set_relative_y(1),
            'k' => self.set_relative_y(-1),
            'l' => self.set_relative_x(1),
            'i' => self.set_mode(EditorMode::Insert),
            'a' => {
                self.set_relative_x(1);
                self.set_mode(EditorMode::Insert);
            }
            'o' => self.open_line_below(),
            '0' => self.set_absolute_x(0),
            '$' => self.set_max_x(),
            'G' => self.set_max_y(),
            'g' => self.set_absolute_y(0),
            'D' => self.delete_current_row(),
            'C' => self.clear_current_row(),
            'x' => self.delete_under_cursor(),
            'w' => self.word_forward(),
            'b' => self.word_back(),
            '/' => self.find_command()?,
            'n' => self.find_again(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn handle_insert(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Escape => self.set_mode(EditorMode::Command),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Tab if key.modifiers.is_empty() => self.insert_char('\t'),
            _ if key.is_ctrl('h') => self.delete_char(),
            _ => match key.printable() {
                Some(ch) => self.insert_char(ch),
                None => return false,
            },
        }
        true
    }

    /// Edit the prompt input. Claims every key.
    fn handle_prompt(&mut self, key: KeyEvent) -> bool {
        let Some(state) = self.prompt.as_mut() else {
            return false;
        };

        let mut step = SearchStep::Restart;
        match key.code {
            KeyCode::Escape => state.outcome = Some(PromptOutcome::Cancelled),
            KeyCode::Enter => state.outcome = Some(PromptOutcome::Submitted),
            KeyCode::Backspace | KeyCode::Delete => {
                state.input.pop();
            }
            KeyCode::Down | KeyCode::Right => step = SearchStep::Next,
            KeyCode::Up | KeyCode::Left => step = SearchStep::Previous,
            _ if key.is_ctrl('h') => {
                state.input.pop();
            }
            _ => {
                if let Some(ch) = key.printable() {
                    state.input.push(ch);
                }
            }
        }

        if state.kind == PromptKind::Search && !state.is_finished() {
            let query = state.input.clone();
            if let Some(session) = self.search.as_mut() {
                session.step(
                    &query,
                    step,
                    &mut self.doc,
                    &mut self.cursor,
                    &mut self.viewport,
                );
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
