/// Undo/redo history for the process designer.
///
/// Keeps a linear timeline of immutable design snapshots as two stacks.
/// Transitions are pure functions over `HistoryState`; `HistoryManager`
/// owns a state for callers that want a mutable handle. History lives only
/// for the duration of an editing session.
pub mod config;
pub mod manager;
pub mod snapshot;
pub mod state;

pub use config::HistoryConfig;
pub use manager::{record_snapshot, redo, undo, HistoryManager};
pub use snapshot::{Group, Resource, ResourceId, ResourceKind, Snapshot, Step, StepId};
pub use state::HistoryState;
