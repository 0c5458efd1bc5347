//! The editable process design: groups of steps plus the resources they use.
//!
//! Every editing operation validates its input before touching the design,
//! so a failed edit leaves the design exactly as it was.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::history::{Group, Resource, ResourceId, ResourceKind, Snapshot, Step, StepId};

/// Longest accepted step or resource name unless configured otherwise.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 120;

fn default_max_name_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

/// A process design as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDesign {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(skip, default = "default_max_name_length")]
    max_name_length: usize,
}

impl Default for ProcessDesign {
    fn default() -> Self {
        Self::from(&Snapshot::initial(crate::history::config::DEFAULT_GROUP_COUNT))
    }
}

impl From<&Snapshot> for ProcessDesign {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            groups: snapshot.groups.clone(),
            steps: snapshot.steps.clone(),
            resources: snapshot.resources.clone(),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl From<&ProcessDesign> for Snapshot {
    fn from(design: &ProcessDesign) -> Self {
        design.to_snapshot()
    }
}

impl ProcessDesign {
    /// Creates a design with `group_count` empty groups.
    pub fn with_layout(group_count: u32) -> Self {
        Self::from(&Snapshot::initial(group_count))
    }

    /// Sets the longest accepted name for subsequent edits.
    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max.max(1);
        self
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Captures the current contents for the history stacks.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            groups: self.groups.clone(),
            steps: self.steps.clone(),
            resources: self.resources.clone(),
        }
    }

    /// Replaces the contents with `snapshot`, keeping the editing limits.
    pub fn replace_contents(&mut self, snapshot: &Snapshot) {
        self.groups = snapshot.groups.clone();
        self.steps = snapshot.steps.clone();
        self.resources = snapshot.resources.clone();
    }

    // --- Lookups ---

    pub fn group(&self, key: u32) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Returns the key of the group holding `step`, if it is placed.
    pub fn group_of(&self, step: StepId) -> Option<u32> {
        self.groups
            .iter()
            .find(|g| g.steps.contains(&step))
            .map(|g| g.key)
    }

    /// Steps that are not placed in any group, in definition order.
    pub fn unplaced_steps(&self) -> Vec<StepId> {
        self.steps
            .iter()
            .map(|s| s.id)
            .filter(|id| self.group_of(*id).is_none())
            .collect()
    }

    // --- Groups ---

    /// Appends an empty group and returns its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the highest key in use is already `u32::MAX`.
    pub fn add_group(&mut self) -> Result<u32> {
        let key = match self.groups.iter().map(|g| g.key).max() {
            Some(max) => max.checked_add(1).context("group key space exhausted")?,
            None => 0,
        };
        self.groups.push(Group::empty(key));
        Ok(key)
    }

    /// Removes a group. Its steps stay defined but become unplaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the group doesn't exist or is the only one left.
    pub fn remove_group(&mut self, key: u32) -> Result<()> {
        let index = self
            .groups
            .iter()
            .position(|g| g.key == key)
            .with_context(|| format!("no group with key {key}"))?;
        if self.groups.len() == 1 {
            bail!("cannot remove the last group");
        }
        self.groups.remove(index);
        Ok(())
    }

    // --- Steps ---

    /// Defines a new, unplaced step.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or too long.
    pub fn add_step(&mut self, name: &str) -> Result<StepId> {
        let name = self.checked_name(name)?;
        let id = next_id(self.steps.iter().map(|s| s.id)).context("step id space exhausted")?;
        self.steps.push(Step {
            id,
            name,
            resources: Vec::new(),
        });
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns an error if the step doesn't exist or the name is invalid.
    pub fn rename_step(&mut self, id: StepId, name: &str) -> Result<()> {
        let name = self.checked_name(name)?;
        let step = self.step_mut(id)?;
        step.name = name;
        Ok(())
    }

    /// Deletes a step and removes it from whichever group holds it.
    ///
    /// # Errors
    ///
    /// Returns an error if the step doesn't exist.
    pub fn remove_step(&mut self, id: StepId) -> Result<()> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == id)
            .with_context(|| format!("no step with id {id}"))?;
        self.steps.remove(index);
        for group in &mut self.groups {
            group.steps.retain(|s| *s != id);
        }
        Ok(())
    }

    /// Moves a step into `group_key` at `index` (clamped to the group's end).
    ///
    /// A step lives in at most one group, so it is first taken out of
    /// wherever it currently is.
    ///
    /// # Errors
    ///
    /// Returns an error if the step or the group doesn't exist.
    pub fn place_step(&mut self, id: StepId, group_key: u32, index: usize) -> Result<()> {
        if self.step(id).is_none() {
            bail!("no step with id {id}");
        }
        if self.group(group_key).is_none() {
            bail!("no group with key {group_key}");
        }
        for group in &mut self.groups {
            group.steps.retain(|s| *s != id);
        }
        let group = self.group_mut(group_key)?;
        let index = index.min(group.steps.len());
        group.steps.insert(index, id);
        Ok(())
    }

    /// Takes a step out of its group without deleting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the step doesn't exist or isn't placed.
    pub fn unplace_step(&mut self, id: StepId) -> Result<()> {
        if self.group_of(id).is_none() {
            bail!("step {id} is not placed in any group");
        }
        for group in &mut self.groups {
            group.steps.retain(|s| *s != id);
        }
        Ok(())
    }

    // --- Resources ---

    /// # Errors
    ///
    /// Returns an error if the name is empty or too long.
    pub fn add_resource(&mut self, name: &str, kind: ResourceKind) -> Result<ResourceId> {
        let name = self.checked_name(name)?;
        let id = next_id(self.resources.iter().map(|r| r.id))
            .context("resource id space exhausted")?;
        self.resources.push(Resource { id, name, kind });
        Ok(id)
    }

    /// Deletes a resource and detaches it from every step.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource doesn't exist.
    pub fn remove_resource(&mut self, id: ResourceId) -> Result<()> {
        let index = self
            .resources
            .iter()
            .position(|r| r.id == id)
            .with_context(|| format!("no resource with id {id}"))?;
        self.resources.remove(index);
        for step in &mut self.steps {
            step.resources.retain(|r| *r != id);
        }
        Ok(())
    }

    /// Assigns a resource to a step. Assigning twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the step or the resource doesn't exist.
    pub fn assign_resource(&mut self, step: StepId, resource: ResourceId) -> Result<()> {
        if self.resource(resource).is_none() {
            bail!("no resource with id {resource}");
        }
        let step = self.step_mut(step)?;
        if !step.resources.contains(&resource) {
            step.resources.push(resource);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the step doesn't exist or doesn't use the resource.
    pub fn unassign_resource(&mut self, step: StepId, resource: ResourceId) -> Result<()> {
        let step = self.step_mut(step)?;
        let before = step.resources.len();
        step.resources.retain(|r| *r != resource);
        if step.resources.len() == before {
            bail!("step {} does not use resource {resource}", step.id);
        }
        Ok(())
    }

    // --- Consistency ---

    /// Checks the rules every edit operation relies on.
    ///
    /// Group keys, step ids and resource ids are unique; a step sits in at
    /// most one group, at most once; groups only reference defined steps and
    /// steps only reference defined resources, each at most once.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first broken rule.
    pub fn validate(&self) -> Result<()> {
        let mut group_keys = HashSet::new();
        for group in &self.groups {
            if !group_keys.insert(group.key) {
                bail!("duplicate group key {}", group.key);
            }
        }

        let mut step_ids = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id) {
                bail!("duplicate step id {}", step.id);
            }
        }

        let mut resource_ids = HashSet::new();
        for resource in &self.resources {
            if !resource_ids.insert(resource.id) {
                bail!("duplicate resource id {}", resource.id);
            }
        }

        let mut placed = HashSet::new();
        for group in &self.groups {
            for step in &group.steps {
                if !step_ids.contains(step) {
                    bail!("group {} references unknown step {step}", group.key);
                }
                if !placed.insert(*step) {
                    bail!("step {step} is placed more than once");
                }
            }
        }

        for step in &self.steps {
            let mut seen = HashSet::new();
            for resource in &step.resources {
                if !resource_ids.contains(resource) {
                    bail!("step {} references unknown resource {resource}", step.id);
                }
                if !seen.insert(*resource) {
                    bail!("step {} lists resource {resource} twice", step.id);
                }
            }
        }

        Ok(())
    }

    // --- Internal helpers ---

    fn step_mut(&mut self, id: StepId) -> Result<&mut Step> {
        self.steps
            .iter_mut()
            .find(|s| s.id == id)
            .with_context(|| format!("no step with id {id}"))
    }

    fn group_mut(&mut self, key: u32) -> Result<&mut Group> {
        self.groups
            .iter_mut()
            .find(|g| g.key == key)
            .with_context(|| format!("no group with key {key}"))
    }

    fn checked_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            bail!("name must not be empty");
        }
        let len = name.chars().count();
        if len > self.max_name_length {
            bail!(
                "name is {len} characters long, the limit is {}",
                self.max_name_length
            );
        }
        Ok(name.to_string())
    }
}

/// Next free id after the highest one in use, starting at 1.
/// `None` once the id space is used up.
fn next_id(ids: impl Iterator<Item = u64>) -> Option<u64> {
    match ids.max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
