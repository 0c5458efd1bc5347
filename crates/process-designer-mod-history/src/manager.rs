/// Undo/redo transitions over a snapshot history.
///
/// The transitions are pure functions from one `HistoryState` to the next.
/// `HistoryManager` wraps them for callers that prefer to own a single
/// mutable history.
use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::snapshot::{default_groups, Snapshot};
use crate::state::HistoryState;

/// Steps the history back by one snapshot.
///
/// Returns `state` unchanged when only the initial snapshot is left.
/// The undone snapshot goes to the front of the redo stack. If the snapshot
/// that becomes current has no groups, the rendered groups are regenerated
/// with the default layout.
pub fn undo(state: &HistoryState) -> HistoryState {
    if state.undo_stack.len() <= 1 {
        return state.clone();
    }

    let mut undo_stack = state.undo_stack.clone();
    let mut redo_stack = state.redo_stack.clone();
    let Some(current) = undo_stack.pop() else {
        return state.clone();
    };
    redo_stack.push_front(current);

    let Some(snapshot) = undo_stack.last() else {
        return state.clone();
    };
    let groups = if snapshot.groups.is_empty() {
        default_groups(state.default_group_count)
    } else {
        snapshot.groups.clone()
    };

    HistoryState {
        groups,
        steps: snapshot.steps.clone(),
        resources: snapshot.resources.clone(),
        undo_stack,
        redo_stack,
        default_group_count: state.default_group_count,
    }
}

/// Steps the history forward by one snapshot.
///
/// Returns `state` unchanged when the undo stack is empty or there is
/// nothing to redo. The rendered document is copied verbatim from the
/// redone snapshot; empty groups are not regenerated here.
pub fn redo(state: &HistoryState) -> HistoryState {
    if state.undo_stack.is_empty() {
        return state.clone();
    }

    let mut redo_stack = state.redo_stack.clone();
    let Some(current) = redo_stack.pop_front() else {
        return state.clone();
    };
    let mut undo_stack = state.undo_stack.clone();
    undo_stack.push(Arc::clone(&current));

    HistoryState {
        groups: current.groups.clone(),
        steps: current.steps.clone(),
        resources: current.resources.clone(),
        undo_stack,
        redo_stack,
        default_group_count: state.default_group_count,
    }
}

/// Records a new snapshot produced by a normal edit.
///
/// The snapshot becomes current and the redo stack is cleared, since the
/// undone branch is no longer reachable from the new timeline.
pub fn record_snapshot(state: &HistoryState, snapshot: Snapshot) -> HistoryState {
    let snapshot = Arc::new(snapshot);
    let mut undo_stack = state.undo_stack.clone();
    undo_stack.push(Arc::clone(&snapshot));

    HistoryState {
        groups: snapshot.groups.clone(),
        steps: snapshot.steps.clone(),
        resources: snapshot.resources.clone(),
        undo_stack,
        redo_stack: Default::default(),
        default_group_count: state.default_group_count,
    }
}

/// Owns the history of a single editing session.
pub struct HistoryManager {
    state: HistoryState,
    config: HistoryConfig,
    /// Tag used in log output to tell sessions apart.
    session_id: String,
}

impl std::fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("session_id", &self.session_id)
            .field("undo_len", &self.state.undo_depth())
            .field("redo_len", &self.state.redo_depth())
            .finish()
    }
}

impl HistoryManager {
    /// Creates a manager seeded with `initial` as the only snapshot.
    pub fn new(session_id: String, initial: Snapshot, config: HistoryConfig) -> Self {
        Self {
            state: HistoryState::new(initial, &config),
            config,
            session_id,
        }
    }

    /// Creates a manager seeded with the default empty layout.
    pub fn with_default_layout(session_id: String, config: HistoryConfig) -> Self {
        let initial = Snapshot::initial(config.default_group_count);
        Self::new(session_id, initial, config)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// The full history value.
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// Records a snapshot after an edit and clears the redo stack.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.state = record_snapshot(&self.state, snapshot);
        tracing::debug!(
            session = %self.session_id,
            undo = self.state.undo_depth(),
            "Recorded snapshot"
        );
    }

    /// Undoes one step. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let next = undo(&self.state);
        let moved = next.undo_depth() != self.state.undo_depth();
        self.state = next;
        if moved {
            tracing::debug!(
                session = %self.session_id,
                undo = self.state.undo_depth(),
                redo = self.state.redo_depth(),
                "Undo"
            );
        } else {
            tracing::trace!(session = %self.session_id, "Nothing to undo");
        }
        moved
    }

    /// Redoes one step. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let next = redo(&self.state);
        let moved = next.redo_depth() != self.state.redo_depth();
        self.state = next;
        if moved {
            tracing::debug!(
                session = %self.session_id,
                undo = self.state.undo_depth(),
                redo = self.state.redo_depth(),
                "Redo"
            );
        } else {
            tracing::trace!(session = %self.session_id, "Nothing to redo");
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Discards all history and starts over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.state = HistoryState::new(initial, &self.config);
        tracing::debug!(session = %self.session_id, "History reset");
    }
}
