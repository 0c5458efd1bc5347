//! An editing session: a working design plus its undo/redo history.
//!
//! The session is the only place that records snapshots. Every successful
//! edit records the resulting design, which also discards anything that
//! was waiting to be redone.

use anyhow::Result;

use crate::command::Command;
use crate::design::ProcessDesign;
use crate::history::{generate_session_id, HistoryConfig, HistoryManager, HistoryState};

/// What applying a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The design was edited and a snapshot recorded.
    Edited,
    /// An undo was requested; `moved` is false if there was nothing to undo.
    Undo { moved: bool },
    /// A redo was requested; `moved` is false if there was nothing to redo.
    Redo { moved: bool },
    /// The caller asked to see the design.
    Show,
}

/// Owns the working design and its history for one editing lifetime.
#[derive(Debug)]
pub struct DesignSession {
    design: ProcessDesign,
    history: HistoryManager,
}

impl DesignSession {
    /// Starts a session whose history begins at `design`.
    pub fn new(design: ProcessDesign, config: &HistoryConfig) -> Self {
        let history = HistoryManager::new(generate_session_id(), design.to_snapshot(), config.clone());
        tracing::debug!(session = %history.session_id(), "Started design session");
        Self { design, history }
    }

    /// Starts a session on an empty design with the configured layout.
    pub fn with_default_layout(config: &HistoryConfig) -> Self {
        Self::new(ProcessDesign::with_layout(config.default_group_count), config)
    }

    /// The design as currently rendered.
    pub fn design(&self) -> &ProcessDesign {
        &self.design
    }

    pub fn history(&self) -> &HistoryState {
        self.history.state()
    }

    pub fn session_id(&self) -> &str {
        self.history.session_id()
    }

    /// Applies an edit to the design and records the result.
    ///
    /// The edit runs against a copy; if it fails, the design and the
    /// history are left untouched.
    ///
    /// # Errors
    ///
    /// Returns whatever error the edit produced.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut ProcessDesign) -> Result<T>) -> Result<T> {
        let mut draft = self.design.clone();
        let value = f(&mut draft)?;
        self.history.record(draft.to_snapshot());
        self.design = draft;
        Ok(value)
    }

    /// Steps back one edit. Returns `false` if already at the initial design.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.sync_design();
        }
        moved
    }

    /// Steps forward one undone edit. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.sync_design();
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Runs a parsed command against the session.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit command fails validation.
    pub fn apply(&mut self, command: &Command) -> Result<Applied> {
        match command {
            Command::Edit(edit) => {
                self.edit(|design| edit.apply_to(design))?;
                Ok(Applied::Edited)
            }
            Command::Undo => Ok(Applied::Undo { moved: self.undo() }),
            Command::Redo => Ok(Applied::Redo { moved: self.redo() }),
            Command::Show => Ok(Applied::Show),
        }
    }

    /// Rebuilds the working design from the history's rendered document.
    fn sync_design(&mut self) {
        let document = self.history.state().document();
        self.design.replace_contents(&document);
    }
}
