//! Replays a line-oriented command script against a session.

use std::io::BufRead;

use anyhow::{Context, Result};

use crate::command::parse_line;
use crate::design::ProcessDesign;
use crate::session::{Applied, DesignSession};

/// Tally of one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands the session accepted, including undo/redo with nothing to move.
    pub applied: usize,
    /// Lines that did not parse as a command.
    pub invalid: usize,
    /// Commands the session rejected.
    pub failed: usize,
}

/// Applies every command in `reader` to the session.
///
/// Lines that don't parse and commands that fail are logged and skipped;
/// the rest of the script still runs. `on_show` receives the design each
/// time the script asks to see it.
///
/// # Errors
///
/// Returns an error if the reader fails or `on_show` fails.
pub fn run_script(
    session: &mut DesignSession,
    reader: impl BufRead,
    mut on_show: impl FnMut(&ProcessDesign) -> Result<()>,
) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read script")?;
        let line_no = index + 1;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("line {line_no}: {e}");
                summary.invalid += 1;
                continue;
            }
        };

        match session.apply(&command) {
            Ok(applied) => {
                summary.applied += 1;
                match applied {
                    Applied::Show => on_show(session.design())?,
                    Applied::Undo { moved: false } => tracing::info!("line {line_no}: nothing to undo"),
                    Applied::Redo { moved: false } => tracing::info!("line {line_no}: nothing to redo"),
                    _ => tracing::debug!("line {line_no}: {command:?} -> {applied:?}"),
                }
            }
            Err(e) => {
                tracing::warn!("line {line_no}: {command:?} failed: {e:#}");
                summary.failed += 1;
            }
        }
    }

    let history = session.history();
    tracing::info!(
        session = %session.session_id(),
        undo = history.undo_depth(),
        redo = history.redo_depth(),
        applied = summary.applied,
        invalid = summary.invalid,
        failed = summary.failed,
        "Script finished"
    );
    Ok(summary)
}
