//! Dense integer ordering among sibling entities.
//!
//! Workflows under a template and checklist items under a workflow both
//! carry an `order` value that is unique among siblings. New entities
//! append at the end; reordering swaps order values with the adjacent
//! neighbour, so no renumbering pass is ever needed as long as this
//! module is the only order mutator.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{EngineError, EngineResult};

/// Direction of an adjacent move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MoveDirection {
    /// Towards the front of the sibling list.
    Up,
    /// Towards the back of the sibling list.
    Down,
}

/// The two order updates produced by a successful adjacent move.
///
/// Both assignments must be persisted for the sibling set to stay
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSwap<I> {
    /// The moved entity with its new order value.
    pub moved: (I, i32),
    /// The displaced neighbour with its new order value.
    pub displaced: (I, i32),
}

/// Returns the order value for a new sibling: one past the current
/// maximum, or 0 for the first sibling.
pub fn initial_order(existing: impl IntoIterator<Item = i32>) -> i32 {
    existing
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Plans an adjacent swap for `target` within `siblings`.
///
/// Siblings are taken in any order; a working copy is sorted by order
/// value with a stable sort, so equal orders keep their input sequence.
/// Returns `Ok(None)` when the target is already at the boundary for the
/// requested direction, and [`EngineError::InvalidMove`] when the target
/// is not in the sibling set at all.
pub fn move_adjacent<I>(
    siblings: &[(I, i32)],
    target: &I,
    direction: MoveDirection,
) -> EngineResult<Option<OrderSwap<I>>>
where
    I: Clone + Eq + std::fmt::Display,
{
    let mut ranked: Vec<&(I, i32)> = siblings.iter().collect();
    ranked.sort_by_key(|(_, order)| *order);

    let position = ranked
        .iter()
        .position(|(id, _)| id == target)
        .ok_or_else(|| EngineError::InvalidMove {
            reason: format!("{target} is not among its siblings"),
        })?;

    let neighbour = match direction {
        MoveDirection::Up => position.checked_sub(1),
        MoveDirection::Down => (position + 1 < ranked.len()).then_some(position + 1),
    };
    let Some(neighbour) = neighbour else {
        // Already first (up) or last (down).
        return Ok(None);
    };

    let (target_id, target_order) = ranked[position].clone();
    let (neighbour_id, neighbour_order) = ranked[neighbour].clone();
    Ok(Some(OrderSwap {
        moved: (target_id, neighbour_order),
        displaced: (neighbour_id, target_order),
    }))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_initial_order_empty() {
        assert_eq!(initial_order([]), 0);
    }

    #[test]
    fn test_initial_order_appends() {
        assert_eq!(initial_order([0, 1, 2]), 3);
        // Gaps and unsorted input do not matter, only the maximum.
        assert_eq!(initial_order([5, 1, 3]), 6);
    }

    #[test]
    fn test_move_up_swaps_with_previous() {
        let siblings = [("a", 0), ("b", 1), ("c", 2)];
        let swap = move_adjacent(&siblings, &"b", MoveDirection::Up)
            .unwrap()
            .unwrap();
        assert_eq!(swap.moved, ("b", 0));
        assert_eq!(swap.displaced, ("a", 1));
    }

    #[test]
    fn test_move_down_swaps_with_next() {
        let siblings = [("a", 0), ("b", 1), ("c", 2)];
        let swap = move_adjacent(&siblings, &"b", MoveDirection::Down)
            .unwrap()
            .unwrap();
        assert_eq!(swap.moved, ("b", 2));
        assert_eq!(swap.displaced, ("c", 1));
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let siblings = [("a", 0), ("b", 1)];
        assert!(
            move_adjacent(&siblings, &"a", MoveDirection::Up)
                .unwrap()
                .is_none()
        );
        assert!(
            move_adjacent(&siblings, &"b", MoveDirection::Down)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_single_sibling_is_always_noop() {
        let siblings = [("only", 0)];
        for direction in [MoveDirection::Up, MoveDirection::Down] {
            assert!(
                move_adjacent(&siblings, &"only", direction)
                    .unwrap()
                    .is_none()
            );
        }
    }

    #[test]
    fn test_unsorted_input_is_ranked_by_order() {
        let siblings = [("c", 2), ("a", 0), ("b", 1)];
        let swap = move_adjacent(&siblings, &"c", MoveDirection::Up)
            .unwrap()
            .unwrap();
        assert_eq!(swap.moved, ("c", 1));
        assert_eq!(swap.displaced, ("b", 2));
    }

    #[test]
    fn test_missing_target_is_invalid_move() {
        let siblings = [("a", 0)];
        let err = move_adjacent(&siblings, &"ghost", MoveDirection::Up).unwrap_err();
        assert!(matches!(err, crate::EngineError::InvalidMove { .. }));
    }

    #[test]
    fn test_direction_wire_form() {
        assert_eq!(MoveDirection::Up.to_string(), "up");
        assert_eq!(MoveDirection::from_str("down").unwrap(), MoveDirection::Down);
    }
}
