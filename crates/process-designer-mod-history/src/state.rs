/// The history value threaded through undo/redo transitions.
use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::HistoryConfig;
use crate::snapshot::{Group, Resource, Snapshot, Step};

/// A linear edit history plus the document currently shown to the user.
///
/// `groups`, `steps` and `resources` are the rendered document. They normally
/// equal the last element of `undo_stack`, except right after an undo that
/// regenerated the default group layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub groups: Vec<Group>,
    pub steps: Vec<Step>,
    pub resources: Vec<Resource>,
    /// Oldest first. The last element is the current snapshot.
    pub undo_stack: Vec<Arc<Snapshot>>,
    /// Most recently undone first.
    pub redo_stack: VecDeque<Arc<Snapshot>>,
    /// Size of the layout regenerated when undo lands on a snapshot
    /// without groups.
    pub default_group_count: u32,
}

impl HistoryState {
    /// Seeds a history with a single initial snapshot.
    pub fn new(initial: Snapshot, config: &HistoryConfig) -> Self {
        let initial = Arc::new(initial);
        Self {
            groups: initial.groups.clone(),
            steps: initial.steps.clone(),
            resources: initial.resources.clone(),
            undo_stack: vec![initial],
            redo_stack: VecDeque::new(),
            default_group_count: config.default_group_count,
        }
    }

    /// Seeds a history with the default empty layout.
    pub fn initial(config: &HistoryConfig) -> Self {
        Self::new(Snapshot::initial(config.default_group_count), config)
    }

    /// Builds a state from explicit stacks, taking the rendered document
    /// from the last undo entry (or leaving it empty if there is none).
    pub fn from_stacks(
        undo_stack: Vec<Arc<Snapshot>>,
        redo_stack: VecDeque<Arc<Snapshot>>,
        config: &HistoryConfig,
    ) -> Self {
        let (groups, steps, resources) = match undo_stack.last() {
            Some(current) => (
                current.groups.clone(),
                current.steps.clone(),
                current.resources.clone(),
            ),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };
        Self {
            groups,
            steps,
            resources,
            undo_stack,
            redo_stack,
            default_group_count: config.default_group_count,
        }
    }

    /// The snapshot at the top of the undo stack.
    pub fn current(&self) -> Option<&Arc<Snapshot>> {
        self.undo_stack.last()
    }

    /// The rendered document as a standalone snapshot.
    pub fn document(&self) -> Snapshot {
        Snapshot {
            groups: self.groups.clone(),
            steps: self.steps.clone(),
            resources: self.resources.clone(),
        }
    }

    /// Whether an undo would move the timeline. The initial snapshot
    /// can never be undone.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Whether a redo would move the timeline.
    pub fn can_redo(&self) -> bool {
        !self.undo_stack.is_empty() && !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
