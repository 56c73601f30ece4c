// SPDX-License-Identifier: MIT OR Apache-2.0
//! Facade wiring the sequencer, derived view, and cursor together for the
//! timeline widget's callback hooks.

use crate::action::{ActionId, PlacedAction, TimeMs};
use crate::rotation::Rotation;
use crate::view::TimelineView;

/// Interactive rotation planner.
///
/// The widget drives this through three gesture hooks (`on_add`, `on_move`,
/// `on_remove`) plus the cursor handlers for drag feedback; it renders the
/// [`TimelineView`] and must treat the returned items, not its raw pointer
/// coordinates, as the source of truth for start times. A hook returning
/// `None` means the gesture was a no-op; either way the widget cancels its
/// native default handling.
#[derive(Debug, Clone, Default)]
pub struct RotationPlanner {
    rotation: Rotation,
    view: TimelineView,
}

impl RotationPlanner {
    /// Create an empty planner
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop gesture: place an action at its requested start time.
    ///
    /// Returns the placement with its reconciled start.
    pub fn on_add(&mut self, item: PlacedAction) -> Option<PlacedAction> {
        let id = item.id;
        let events = self.rotation.add(vec![item]);
        if events.is_empty() {
            return None;
        }
        self.view.apply_all(&events);
        self.rotation.get(id).cloned()
    }

    /// Drag-move gesture: move placements to new requested start times.
    ///
    /// Returns the moved placements with their reconciled starts, in
    /// sequence order.
    pub fn on_move(&mut self, items: Vec<PlacedAction>) -> Option<Vec<PlacedAction>> {
        if items.is_empty() {
            return None;
        }
        let ids: Vec<ActionId> = items.iter().map(|item| item.id).collect();
        let events = self.rotation.move_items(items);
        self.view.apply_all(&events);
        Some(
            self.rotation
                .items()
                .iter()
                .filter(|item| ids.contains(&item.id))
                .cloned()
                .collect(),
        )
    }

    /// Delete gesture: remove placements by id. Absent ids are ignored;
    /// returns `None` when nothing was removed.
    pub fn on_remove(&mut self, ids: &[ActionId]) -> Option<()> {
        let events = self.rotation.remove(ids);
        if events.is_empty() {
            return None;
        }
        self.view.apply_all(&events);
        Some(())
    }

    /// Drag entered the timeline: show the cursor at the snapped time
    pub fn cursor_entered(&mut self, time: TimeMs) {
        self.cursor_moved(time);
    }

    /// Drag moved across the timeline: snap and update the cursor in place
    pub fn cursor_moved(&mut self, time: TimeMs) {
        let snapped = self.rotation.closest_snap_point(time);
        self.view.set_cursor(snapped);
    }

    /// Drag left the timeline or dropped: remove the cursor. Abandoning a
    /// drag leaves no residual state.
    pub fn cursor_left(&mut self) {
        self.view.clear_cursor();
    }

    /// Get the rotation
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Get the renderable segment set
    pub fn view(&self) -> &TimelineView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::view::SegmentId;

    fn ruin_iii() -> Action {
        Action::new("SMN", "Ruin III")
            .with_potency(310)
            .with_cast_time(1500)
            .with_next_gcd(2500)
    }

    #[test]
    fn test_add_returns_reconciled_start() {
        let mut planner = RotationPlanner::new();
        let accepted = planner
            .on_add(PlacedAction::new(&ruin_iii(), 500))
            .unwrap();

        assert_eq!(accepted.start, 0);
        assert_eq!(planner.view().len(), 2); // action + background
    }

    #[test]
    fn test_drag_feedback_snaps_cursor() {
        let mut planner = RotationPlanner::new();
        planner.on_add(PlacedAction::new(&ruin_iii(), 0));

        planner.cursor_entered(1000);
        assert_eq!(planner.view().cursor(), Some(1500));

        planner.cursor_moved(2700);
        assert_eq!(planner.view().cursor(), Some(2500));

        planner.cursor_left();
        assert_eq!(planner.view().cursor(), None);
    }

    #[test]
    fn test_cursor_on_empty_timeline_defaults_to_zero() {
        let mut planner = RotationPlanner::new();
        planner.cursor_entered(42_000);
        assert_eq!(planner.view().cursor(), Some(0));
    }

    #[test]
    fn test_move_returns_moved_items() {
        let mut planner = RotationPlanner::new();
        planner.on_add(PlacedAction::new(&ruin_iii(), 0));
        let second = planner
            .on_add(PlacedAction::new(&ruin_iii(), 2500))
            .unwrap();

        let mut request = second.clone();
        request.start = 100;
        let moved = planner.on_move(vec![request]).unwrap();

        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, second.id);
        assert_eq!(moved[0].start, 0);
    }

    #[test]
    fn test_remove_keeps_view_consistent() {
        let mut planner = RotationPlanner::new();
        let first = planner.on_add(PlacedAction::new(&ruin_iii(), 0)).unwrap();
        planner.on_add(PlacedAction::new(&ruin_iii(), 2500));

        assert!(planner.on_remove(&[first.id]).is_some());
        assert!(planner.view().get(&SegmentId::Action(first.id)).is_none());
        assert!(planner
            .view()
            .get(&SegmentId::Background(first.id))
            .is_none());
        // Survivor repinned to 0 in both the rotation and the view
        let survivor = planner.rotation().items()[0].clone();
        assert_eq!(survivor.start, 0);
        let segment = planner
            .view()
            .get(&SegmentId::Action(survivor.id))
            .unwrap();
        assert_eq!(segment.start(), 0);
    }

    #[test]
    fn test_remove_absent_id_rejected() {
        let mut planner = RotationPlanner::new();
        assert!(planner.on_remove(&[ActionId::new()]).is_none());
    }
}
