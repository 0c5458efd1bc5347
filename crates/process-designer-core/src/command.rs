//! Line-oriented edit commands, as read from designer scripts.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::design::ProcessDesign;
use crate::history::{ResourceId, ResourceKind, StepId};

/// One user action against a design session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Changes the design and records a snapshot.
    Edit(Edit),
    Undo,
    Redo,
    Show,
}

/// A change to the design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    AddGroup,
    RemoveGroup(u32),
    AddStep(String),
    RenameStep(StepId, String),
    RemoveStep(StepId),
    PlaceStep {
        step: StepId,
        group: u32,
        index: Option<usize>,
    },
    UnplaceStep(StepId),
    AddResource(ResourceKind, String),
    RemoveResource(ResourceId),
    Assign(StepId, ResourceId),
    Unassign(StepId, ResourceId),
}

impl Edit {
    /// Applies the change to `design`.
    ///
    /// # Errors
    ///
    /// Returns an error if the design rejects the change.
    pub fn apply_to(&self, design: &mut ProcessDesign) -> Result<()> {
        match self {
            Self::AddGroup => design.add_group().map(|_| ()),
            Self::RemoveGroup(key) => design.remove_group(*key),
            Self::AddStep(name) => design.add_step(name).map(|_| ()),
            Self::RenameStep(id, name) => design.rename_step(*id, name),
            Self::RemoveStep(id) => design.remove_step(*id),
            Self::PlaceStep { step, group, index } => {
                design.place_step(*step, *group, index.unwrap_or(usize::MAX))
            }
            Self::UnplaceStep(id) => design.unplace_step(*id),
            Self::AddResource(kind, name) => design.add_resource(name, *kind).map(|_| ()),
            Self::RemoveResource(id) => design.remove_resource(*id),
            Self::Assign(step, resource) => design.assign_resource(*step, *resource),
            Self::Unassign(step, resource) => design.unassign_resource(*step, *resource),
        }
    }
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns an error if the line is not a valid command.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().context("empty command")?;
        let args: Vec<&str> = parts.collect();

        let edit = match verb {
            "add-group" => {
                expect_args(verb, &args, 0)?;
                Edit::AddGroup
            }
            "remove-group" => {
                expect_args(verb, &args, 1)?;
                Edit::RemoveGroup(number(&args, 0, "group key")?)
            }
            "add-step" => Edit::AddStep(rest(verb, &args, 0)?),
            "rename-step" => {
                Edit::RenameStep(number(&args, 0, "step id")?, rest(verb, &args, 1)?)
            }
            "remove-step" => {
                expect_args(verb, &args, 1)?;
                Edit::RemoveStep(number(&args, 0, "step id")?)
            }
            "place" => {
                if !(2..=3).contains(&args.len()) {
                    bail!("usage: place <step> <group> [index]");
                }
                let index = if args.len() == 3 {
                    Some(number(&args, 2, "index")?)
                } else {
                    None
                };
                Edit::PlaceStep {
                    step: number(&args, 0, "step id")?,
                    group: number(&args, 1, "group key")?,
                    index,
                }
            }
            "unplace" => {
                expect_args(verb, &args, 1)?;
                Edit::UnplaceStep(number(&args, 0, "step id")?)
            }
            "add-resource" => {
                let kind = args
                    .first()
                    .context("usage: add-resource <kind> <name>")?
                    .parse::<ResourceKind>()
                    .map_err(|e| anyhow!(e))?;
                Edit::AddResource(kind, rest(verb, &args, 1)?)
            }
            "remove-resource" => {
                expect_args(verb, &args, 1)?;
                Edit::RemoveResource(number(&args, 0, "resource id")?)
            }
            "assign" => {
                expect_args(verb, &args, 2)?;
                Edit::Assign(number(&args, 0, "step id")?, number(&args, 1, "resource id")?)
            }
            "unassign" => {
                expect_args(verb, &args, 2)?;
                Edit::Unassign(number(&args, 0, "step id")?, number(&args, 1, "resource id")?)
            }
            "undo" | "redo" | "show" => {
                expect_args(verb, &args, 0)?;
                return Ok(match verb {
                    "undo" => Self::Undo,
                    "redo" => Self::Redo,
                    _ => Self::Show,
                });
            }
            other => bail!("unknown command: {other}"),
        };
        Ok(Self::Edit(edit))
    }
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<()> {
    if args.len() != count {
        bail!("{verb} takes {count} argument(s), got {}", args.len());
    }
    Ok(())
}

fn number<T: FromStr>(args: &[&str], index: usize, what: &str) -> Result<T> {
    let raw = args
        .get(index)
        .with_context(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|_| anyhow!("invalid {what}: {raw}"))
}

/// Joins the arguments from `from` onwards into a name.
fn rest(verb: &str, args: &[&str], from: usize) -> Result<String> {
    let name = args.get(from..).unwrap_or_default().join(" ");
    if name.is_empty() {
        bail!("{verb} needs a name");
    }
    Ok(name)
}
