//! Reading and writing design files.
//!
//! Designs are stored as JSON. Only the design itself is written; undo
//! history never leaves the editing session.

use std::path::Path;

use anyhow::{Context, Result};

use crate::design::ProcessDesign;

/// Loads a design from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid design, or
/// breaks the design's consistency rules (see [`ProcessDesign::validate`]).
pub fn load_design(path: &Path) -> Result<ProcessDesign> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read design file: {}", path.display()))?;
    let design: ProcessDesign = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse design file: {}", path.display()))?;
    design
        .validate()
        .with_context(|| format!("inconsistent design file: {}", path.display()))?;
    tracing::debug!(
        "Loaded design from {} ({} groups, {} steps, {} resources)",
        path.display(),
        design.groups.len(),
        design.steps.len(),
        design.resources.len()
    );
    Ok(design)
}

/// Serializes a design to JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn design_to_json(design: &ProcessDesign, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(design)
    } else {
        serde_json::to_string(design)
    };
    json.context("failed to serialize design")
}

/// Writes a design to `path` as JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_design(design: &ProcessDesign, path: &Path, pretty: bool) -> Result<()> {
    let json = design_to_json(design, pretty)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write design file: {}", path.display()))?;
    tracing::debug!("Saved design to {}", path.display());
    Ok(())
}
