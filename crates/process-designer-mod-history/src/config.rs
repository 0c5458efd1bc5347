/// Configuration and utility functions for the history system.
use std::sync::atomic::{AtomicU64, Ordering};

use process_designer_config::DesignerConfig;

/// Number of empty groups in a freshly created design layout.
pub const DEFAULT_GROUP_COUNT: u32 = 2;

/// Configuration for the history system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Number of empty groups regenerated when undo lands on a
    /// snapshot without any groups.
    pub default_group_count: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_group_count: DEFAULT_GROUP_COUNT,
        }
    }
}

impl From<&DesignerConfig> for HistoryConfig {
    fn from(config: &DesignerConfig) -> Self {
        Self {
            default_group_count: config.default_group_count.max(1),
        }
    }
}

/// Counter for generating unique editing session IDs within a process.
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique ID for an editing session, used to tag log output.
pub fn generate_session_id() -> String {
    let count = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("design-{count}")
}
