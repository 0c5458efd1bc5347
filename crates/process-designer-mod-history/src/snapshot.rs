/// Snapshot types captured by the history stacks.
use serde::{Deserialize, Serialize};

/// Identifier of a step within a design.
pub type StepId = u64;

/// Identifier of a resource within a design.
pub type ResourceId = u64;

/// An ordered container of steps in the designer layout.
///
/// Only step IDs are stored; the step definitions live in
/// [`Snapshot::steps`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Group {
    pub key: u32,
    pub steps: Vec<StepId>,
}

impl Group {
    /// Creates an empty group with the given key.
    pub fn empty(key: u32) -> Self {
        Self {
            key,
            steps: Vec::new(),
        }
    }
}

/// A unit of work in a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    /// Resources assigned to this step, in assignment order.
    #[serde(default)]
    pub resources: Vec<ResourceId>,
}

/// Category of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Person,
    Equipment,
    Material,
    #[default]
    Other,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Person => "person",
            Self::Equipment => "equipment",
            Self::Material => "material",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "person" => Ok(Self::Person),
            "equipment" => Ok(Self::Equipment),
            "material" => Ok(Self::Material),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}

/// Something a step consumes: a person, a machine, a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub kind: ResourceKind,
}

/// Immutable capture of a design at one point in its history.
///
/// The history stacks share snapshots through `Arc`, so moving one
/// between the undo and redo stacks never copies its contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Snapshot {
    /// Creates the snapshot a new editing session starts from:
    /// `group_count` empty groups, no steps, no resources.
    pub fn initial(group_count: u32) -> Self {
        Self {
            groups: default_groups(group_count),
            steps: Vec::new(),
            resources: Vec::new(),
        }
    }
}

/// Builds the default layout: `count` empty groups keyed `0..count`.
pub fn default_groups(count: u32) -> Vec<Group> {
    (0..count).map(Group::empty).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_groups_layout() {
        let groups = default_groups(2);
        assert_eq!(groups, vec![Group::empty(0), Group::empty(1)]);
        assert!(groups.iter().all(|g| g.steps.is_empty()));
    }

    #[test]
    fn test_default_groups_zero() {
        assert!(default_groups(0).is_empty());
    }

    #[test]
    fn test_default_groups_keys_follow_count() {
        let groups = default_groups(5);
        let keys: Vec<u32> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_initial_snapshot() {
        let snap = Snapshot::initial(2);
        assert_eq!(snap.groups.len(), 2);
        assert!(snap.steps.is_empty());
        assert!(snap.resources.is_empty());
    }

    #[test]
    fn test_resource_kind_parse_case_insensitive() {
        assert_eq!("Person".parse::<ResourceKind>(), Ok(ResourceKind::Person));
        assert_eq!(
            "EQUIPMENT".parse::<ResourceKind>(),
            Ok(ResourceKind::Equipment)
        );
        assert!("robot".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resource_kind_display_matches_parse() {
        for kind in [
            ResourceKind::Person,
            ResourceKind::Equipment,
            ResourceKind::Material,
            ResourceKind::Other,
        ] {
            assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_snapshot_missing_fields_get_defaults() {
        let snap: Snapshot = serde_json::from_str(r#"{"steps": []}"#).expect("parse");
        assert!(snap.groups.is_empty());
        assert!(snap.resources.is_empty());
    }

    #[test]
    fn test_resource_kind_serializes_lowercase() {
        let resource = Resource {
            id: 1,
            name: "Forklift".to_string(),
            kind: ResourceKind::Equipment,
        };
        let json = serde_json::to_string(&resource).expect("serialize");
        assert!(json.contains(r#""kind":"equipment""#));
    }
}
