//! Display ordering for collections that carry an integer order field.
//!
//! Moves are planned on a local copy of the sorted list. A move swaps two
//! neighbours and assigns each of them its new array position as order value;
//! the rest of the collection is not renumbered. `plan_renumber` repairs
//! duplicates and gaps separately.

use crate::api::{Club, Entity, GymClass, Package, SiteBanner};

pub trait Orderable: Entity {
    /// Wire name of the order field.
    const ORDER_FIELD: &'static str = "order";

    fn order(&self) -> i64;

    fn set_order(&mut self, order: i64);
}

impl Orderable for GymClass {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Orderable for Club {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Orderable for Package {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Orderable for SiteBanner {
    const ORDER_FIELD: &'static str = "position";

    fn order(&self) -> i64 {
        self.position
    }

    fn set_order(&mut self, order: i64) {
        self.position = order;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan<T> {
    /// The list after the move, with new order values applied.
    pub items: Vec<T>,
    /// One update per record whose order value must be written.
    pub updates: Vec<OrderUpdate>,
}

/// Stable: records with equal order keep their relative position.
pub fn sort_by_order<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

pub fn target_index(len: usize, index: usize, direction: MoveDirection) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|target| *target < len),
    }
}

/// `None` when the move would leave the list bounds.
pub fn plan_move<T: Orderable>(
    items: &[T],
    index: usize,
    direction: MoveDirection,
) -> Option<ReorderPlan<T>> {
    let target = target_index(items.len(), index, direction)?;
    let mut next = items.to_vec();
    next.swap(index, target);

    let mut updates = Vec::with_capacity(2);
    for position in [index, target] {
        let item = &mut next[position];
        item.set_order(position as i64);
        updates.push(OrderUpdate {
            id: item.id().to_string(),
            order: position as i64,
        });
    }
    Some(ReorderPlan {
        items: next,
        updates,
    })
}

/// Rewrites order values to 0..n in the current display order, emitting
/// updates only for records whose value changes.
pub fn plan_renumber<T: Orderable>(items: &[T]) -> ReorderPlan<T> {
    let mut next = items.to_vec();
    sort_by_order(&mut next);
    let mut updates = Vec::new();
    for (position, item) in next.iter_mut().enumerate() {
        let wanted = position as i64;
        if item.order() != wanted {
            item.set_order(wanted);
            updates.push(OrderUpdate {
                id: item.id().to_string(),
                order: wanted,
            });
        }
    }
    ReorderPlan {
        items: next,
        updates,
    }
}

/// Order value for a record appended to the end of the collection.
pub fn next_order<T: Orderable>(items: &[T]) -> i64 {
    items
        .iter()
        .map(Orderable::order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, order: i64) -> GymClass {
        GymClass {
            id: id.into(),
            name: id.to_uppercase(),
            description: None,
            category: None,
            duration_minutes: None,
            intensity: None,
            image_url: None,
            is_active: true,
            order,
        }
    }

    fn ids(items: &[GymClass]) -> Vec<&str> {
        items.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn moving_first_item_up_is_a_no_op() {
        let items = vec![class("a", 0), class("b", 1)];
        assert!(plan_move(&items, 0, MoveDirection::Up).is_none());
    }

    #[test]
    fn moving_last_item_down_is_a_no_op() {
        let items = vec![class("a", 0), class("b", 1), class("c", 2)];
        assert!(plan_move(&items, 2, MoveDirection::Down).is_none());
        assert!(plan_move(&items, 7, MoveDirection::Up).is_none());
        assert!(plan_move::<GymClass>(&[], 0, MoveDirection::Down).is_none());
    }

    #[test]
    fn moving_middle_item_swaps_two_records_and_plans_two_updates() {
        let items = vec![class("a", 0), class("b", 1), class("c", 2)];
        let plan = plan_move(&items, 1, MoveDirection::Up).unwrap();
        assert_eq!(ids(&plan.items), vec!["b", "a", "c"]);
        assert_eq!(
            plan.updates,
            vec![
                OrderUpdate { id: "a".into(), order: 1 },
                OrderUpdate { id: "b".into(), order: 0 },
            ]
        );
        assert_eq!(plan.items[2].order, 2);
    }

    #[test]
    fn new_order_comes_from_position_not_from_old_values() {
        let items = vec![class("a", 10), class("b", 20), class("c", 30)];
        let plan = plan_move(&items, 1, MoveDirection::Down).unwrap();
        assert_eq!(ids(&plan.items), vec!["a", "c", "b"]);
        assert_eq!(
            plan.updates,
            vec![
                OrderUpdate { id: "c".into(), order: 1 },
                OrderUpdate { id: "b".into(), order: 2 },
            ]
        );
        // untouched record keeps its stale value
        assert_eq!(plan.items[0].order, 10);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut items = vec![class("b", 1), class("a", 0), class("c", 1)];
        sort_by_order(&mut items);
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn renumber_only_touches_records_out_of_place() {
        let items = vec![class("a", 0), class("b", 5), class("c", 5), class("d", 3)];
        let plan = plan_renumber(&items);
        assert_eq!(ids(&plan.items), vec!["a", "d", "b", "c"]);
        assert_eq!(
            plan.updates,
            vec![
                OrderUpdate { id: "d".into(), order: 1 },
                OrderUpdate { id: "b".into(), order: 2 },
                OrderUpdate { id: "c".into(), order: 3 },
            ]
        );
        assert!(plan_renumber(&plan.items).updates.is_empty());
    }

    #[test]
    fn next_order_appends_after_the_largest_value() {
        assert_eq!(next_order::<GymClass>(&[]), 0);
        assert_eq!(next_order(&[class("a", 4), class("b", 2)]), 5);
    }

    #[test]
    fn banners_use_the_position_field() {
        assert_eq!(<SiteBanner as Orderable>::ORDER_FIELD, "position");
        assert_eq!(<GymClass as Orderable>::ORDER_FIELD, "order");
    }
}
