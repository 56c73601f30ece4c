// SPDX-License-Identifier: MIT OR Apache-2.0
//! Derived timeline view: the renderable segment set projected from the
//! rotation, plus the interactive placement cursor.

use crate::action::{ActionId, PlacedAction, TimeMs};
use crate::event::RotationEvent;
use crate::rotation::Rotation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier for a displayable segment.
///
/// Background segments derive their id from their source placement, and the
/// cursor has a single reserved id, so neither can collide with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentId {
    /// A placed action shown as-is
    Action(ActionId),
    /// The synthesized GCD recovery window behind a placed action
    Background(ActionId),
    /// The single prospective-placement cursor
    Cursor,
}

/// A segment the timeline widget can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Pass-through of a placed action
    Action(PlacedAction),
    /// GCD recovery window drawn behind its source action
    Background {
        /// Source placement id
        source: ActionId,
        /// Window start (the source's start)
        start: TimeMs,
        /// Window end (`start + next_gcd`)
        end: TimeMs,
    },
    /// Prospective insertion marker during an interactive drag
    Cursor {
        /// Snapped cursor position
        start: TimeMs,
        /// Marker end (same as start, a zero-width range)
        end: TimeMs,
    },
}

impl Segment {
    /// Get the segment's id
    pub fn id(&self) -> SegmentId {
        match self {
            Self::Action(item) => SegmentId::Action(item.id),
            Self::Background { source, .. } => SegmentId::Background(*source),
            Self::Cursor { .. } => SegmentId::Cursor,
        }
    }

    /// Get the segment's start time
    pub fn start(&self) -> TimeMs {
        match self {
            Self::Action(item) => item.start,
            Self::Background { start, .. } | Self::Cursor { start, .. } => *start,
        }
    }

    /// Get the segment's end time
    pub fn end(&self) -> TimeMs {
        match self {
            Self::Action(item) => item.occupancy_end(),
            Self::Background { end, .. } | Self::Cursor { end, .. } => *end,
        }
    }
}

/// Incrementally maintained projection from the rotation to its renderable
/// segments.
///
/// Consuming the sequencer's event batches keeps this equal to a full
/// replay of the projection over the current sequence: a GCD placement
/// yields itself plus one background segment, an oGCD yields only itself,
/// and no background ever outlives its source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineView {
    segments: IndexMap<SegmentId, Segment>,
}

impl TimelineView {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the full rotation from scratch.
    ///
    /// The incremental state always matches this, cursor aside; tests lean
    /// on that equivalence.
    pub fn project(rotation: &Rotation) -> Self {
        let mut view = Self::new();
        for item in rotation.items() {
            view.upsert_action(item);
        }
        view
    }

    /// Apply one sequencer event
    pub fn apply(&mut self, event: &RotationEvent) {
        match event {
            RotationEvent::Added(item) | RotationEvent::Updated(item) => {
                self.upsert_action(item);
            }
            RotationEvent::Removed(id) => {
                self.segments.swap_remove(&SegmentId::Action(*id));
                self.segments.swap_remove(&SegmentId::Background(*id));
            }
        }
    }

    /// Apply a whole event batch in order
    pub fn apply_all(&mut self, events: &[RotationEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    /// Create or move the cursor segment; repeated calls with the same time
    /// are idempotent
    pub fn set_cursor(&mut self, snapped: TimeMs) {
        self.segments.insert(
            SegmentId::Cursor,
            Segment::Cursor {
                start: snapped,
                end: snapped,
            },
        );
    }

    /// Remove the cursor segment; removing an absent cursor is a no-op
    pub fn clear_cursor(&mut self) {
        self.segments.swap_remove(&SegmentId::Cursor);
    }

    /// Get the cursor position, if a drag is in progress
    pub fn cursor(&self) -> Option<TimeMs> {
        match self.segments.get(&SegmentId::Cursor) {
            Some(Segment::Cursor { start, .. }) => Some(*start),
            _ => None,
        }
    }

    /// Get a segment by id
    pub fn get(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Iterate over all segments
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Get the segment count
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the view holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Insert or update-in-place the segments for one placement. Updating
    /// keeps the derived background id stable so the widget never sees a
    /// remove/add flicker.
    fn upsert_action(&mut self, item: &PlacedAction) {
        self.segments
            .insert(SegmentId::Action(item.id), Segment::Action(item.clone()));
        if let Some(end) = item.gcd_end() {
            self.segments.insert(
                SegmentId::Background(item.id),
                Segment::Background {
                    source: item.id,
                    start: item.start,
                    end,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn ruin_iii() -> Action {
        Action::new("SMN", "Ruin III")
            .with_cast_time(1500)
            .with_next_gcd(2500)
    }

    fn fester() -> Action {
        Action::new("SMN", "Fester").with_potency(300)
    }

    /// Check the no-orphans invariant against a rotation
    fn assert_matches_projection(view: &TimelineView, rotation: &Rotation) {
        let replayed = TimelineView::project(rotation);
        let mut incremental = view.clone();
        incremental.clear_cursor();
        assert_eq!(incremental.len(), replayed.len());
        for segment in replayed.segments() {
            assert_eq!(incremental.get(&segment.id()), Some(segment));
        }
    }

    #[test]
    fn test_gcd_add_emits_background() {
        let mut view = TimelineView::new();
        let item = PlacedAction::new(&ruin_iii(), 0);
        view.apply(&RotationEvent::Added(item.clone()));

        assert_eq!(view.len(), 2);
        let background = view.get(&SegmentId::Background(item.id)).unwrap();
        assert_eq!(background.start(), 0);
        assert_eq!(background.end(), 2500);
    }

    #[test]
    fn test_ogcd_add_has_no_background() {
        let mut view = TimelineView::new();
        let item = PlacedAction::new(&fester(), 500);
        view.apply(&RotationEvent::Added(item.clone()));

        assert_eq!(view.len(), 1);
        assert!(view.get(&SegmentId::Background(item.id)).is_none());
    }

    #[test]
    fn test_update_moves_background_in_place() {
        let mut view = TimelineView::new();
        let mut item = PlacedAction::new(&ruin_iii(), 0);
        view.apply(&RotationEvent::Added(item.clone()));

        item.start = 2500;
        view.apply(&RotationEvent::Updated(item.clone()));

        assert_eq!(view.len(), 2);
        let background = view.get(&SegmentId::Background(item.id)).unwrap();
        assert_eq!(background.start(), 2500);
        assert_eq!(background.end(), 5000);
    }

    #[test]
    fn test_remove_takes_background_with_it() {
        let mut view = TimelineView::new();
        let item = PlacedAction::new(&ruin_iii(), 0);
        view.apply(&RotationEvent::Added(item.clone()));
        view.apply(&RotationEvent::Removed(item.id));

        assert!(view.is_empty());
    }

    #[test]
    fn test_incremental_state_equals_replay() {
        let mut rotation = Rotation::new();
        let mut view = TimelineView::new();

        let batch = rotation.add(vec![
            PlacedAction::new(&ruin_iii(), 0),
            PlacedAction::new(&ruin_iii(), 3000),
        ]);
        view.apply_all(&batch);
        assert_matches_projection(&view, &rotation);

        let batch = rotation.add(vec![PlacedAction::new(&fester(), 1600)]);
        view.apply_all(&batch);
        assert_matches_projection(&view, &rotation);

        let victim = rotation.items()[0].id;
        let batch = rotation.remove(&[victim]);
        view.apply_all(&batch);
        assert_matches_projection(&view, &rotation);
        assert!(view.get(&SegmentId::Background(victim)).is_none());
    }

    #[test]
    fn test_cursor_is_single_and_idempotent() {
        let mut view = TimelineView::new();
        view.set_cursor(1500);
        view.set_cursor(1500);
        view.set_cursor(2500);

        assert_eq!(view.len(), 1);
        assert_eq!(view.cursor(), Some(2500));

        view.clear_cursor();
        view.clear_cursor();
        assert!(view.is_empty());
        assert_eq!(view.cursor(), None);
    }
}
