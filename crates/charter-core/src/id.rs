//! Identifier newtypes for all charter entities.
//!
//! Every identifier is an opaque, stable value backed by a UUID (v7, so ids
//! sort roughly by creation time). Each entity kind gets its own newtype to
//! keep template ids, instance ids and project ids from being mixed up at
//! compile time. The wire form is a plain string (`serde(transparent)`).

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[derive(Debug, Display, From, Into)]
        #[debug("{_0}")]
        #[display("{_0}")]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an identifier from an existing UUID.
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::from_str(s)?))
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a governance template.
    GovernanceTemplateId
}

entity_id! {
    /// Unique identifier for a workflow template.
    WorkflowTemplateId
}

entity_id! {
    /// Unique identifier for a checklist item template.
    ChecklistItemTemplateId
}

entity_id! {
    /// Unique identifier for a project.
    ProjectId
}

entity_id! {
    /// Unique identifier for a workflow instance within a project.
    WorkflowInstanceId
}

entity_id! {
    /// Unique identifier for a checklist item instance within a project.
    ChecklistItemInstanceId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ChecklistItemTemplateId::new();
        let parsed: ChecklistItemTemplateId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_transparent() {
        let id = WorkflowTemplateId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: WorkflowTemplateId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ProjectId::new();
        let b = ProjectId::new();
        assert_ne!(a, b);
    }
}
