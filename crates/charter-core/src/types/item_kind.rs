//! Checklist item kind enumeration.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kind of work a checklist item template represents.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    /// A unit of work to be carried out.
    #[default]
    Task,

    /// A sign-off required from a responsible party.
    Approval,

    /// A document to be produced or collected.
    Document,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_wire_form() {
        assert_eq!(ItemKind::Task.to_string(), "task");
        assert_eq!(ItemKind::Approval.to_string(), "approval");
        assert_eq!(ItemKind::from_str("document").unwrap(), ItemKind::Document);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(ItemKind::from_str("milestone").is_err());
    }
}
