// Re-exports from process-designer-mod-history.
// The design model is built on the history crate's snapshot types.
pub use process_designer_mod_history::config::{self, generate_session_id};
pub use process_designer_mod_history::{
    Group, HistoryConfig, HistoryManager, HistoryState, Resource, ResourceId, ResourceKind,
    Snapshot, Step, StepId,
};
