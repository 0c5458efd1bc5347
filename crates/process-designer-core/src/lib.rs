//! Editing core for the process designer.
//!
//! A design is a set of steps arranged into ordered groups, with resources
//! assigned to steps. `DesignSession` applies edits and keeps the undo/redo
//! history provided by `process-designer-mod-history`.

pub mod command;
pub mod design;
pub mod history;
pub mod io;
pub mod script;
pub mod session;

pub use command::{parse_line, Command, Edit};
pub use design::ProcessDesign;
pub use script::{run_script, ScriptSummary};
pub use session::{Applied, DesignSession};
