// SPDX-License-Identifier: MIT OR Apache-2.0
//! The rotation sequencer: an ordered sequence of placed actions with
//! start-time recalculation and snap point maintenance.

use crate::action::{ActionId, PlacedAction, TimeMs};
use crate::event::{diff_events, RotationEvent};
use crate::snap::SnapIndex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered rotation of placed actions.
///
/// The sequence is always sorted by start time ascending (stable on ties),
/// the first item is pinned to start 0, and consecutive items never overlap
/// their occupancy windows. Every mutation runs one atomic recalculation
/// pass, rebuilds the snap index, and returns the resulting change batch.
///
/// Only the sequencer mutates the sequence; everything else (snap index,
/// derived views, the cursor) reads it or consumes its events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rotation {
    items: Vec<PlacedAction>,
    snap: SnapIndex,
}

impl Rotation {
    /// Create an empty rotation
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert actions at their requested start times.
    ///
    /// The earliest requested start is snapped through the index (an empty
    /// index snaps to 0) to pick the insertion point; every item from that
    /// point onward is then recalculated to a legal start.
    pub fn add(&mut self, items: Vec<PlacedAction>) -> Vec<RotationEvent> {
        if items.is_empty() {
            return Vec::new();
        }

        let before = self.snapshot();
        let insert_index = self.splice_in(items);
        self.recalculate_from(insert_index);
        tracing::debug!(
            "Added actions at index {insert_index}, rotation length {}",
            self.items.len()
        );
        self.finish(&before)
    }

    /// Remove placements by id.
    ///
    /// Ids not present in the sequence are silently ignored; removing only
    /// absent ids is a no-op and returns an empty batch.
    pub fn remove(&mut self, ids: &[ActionId]) -> Vec<RotationEvent> {
        let before = self.snapshot();
        let Some(remove_index) = self.filter_out(ids) else {
            return Vec::new();
        };
        self.recalculate_from(remove_index);
        tracing::debug!(
            "Removed actions, recalculated from index {remove_index}, rotation length {}",
            self.items.len()
        );
        self.finish(&before)
    }

    /// Move placements to new requested start times.
    ///
    /// Equivalent to remove-then-add, performed as one atomic pass so a
    /// moved id surfaces as a single `Updated` event rather than a
    /// remove/add pair. An empty moving set is a no-op.
    pub fn move_items(&mut self, items: Vec<PlacedAction>) -> Vec<RotationEvent> {
        if items.is_empty() {
            return Vec::new();
        }

        let before = self.snapshot();
        let ids: Vec<ActionId> = items.iter().map(|item| item.id).collect();
        let remove_index = self.filter_out(&ids).unwrap_or(usize::MAX);
        let insert_index = self.splice_in(items);
        self.recalculate_from(remove_index.min(insert_index));
        tracing::debug!(
            "Moved {} actions, rotation length {}",
            ids.len(),
            self.items.len()
        );
        self.finish(&before)
    }

    /// Get the snap point closest to `time`; 0 when the rotation is empty
    pub fn closest_snap_point(&self, time: TimeMs) -> TimeMs {
        self.snap.nearest(time)
    }

    /// Get the snap index
    pub fn snap_index(&self) -> &SnapIndex {
        &self.snap
    }

    /// Get the placed actions, sorted by start ascending
    pub fn items(&self) -> &[PlacedAction] {
        &self.items
    }

    /// Get a placement by id
    pub fn get(&self, id: ActionId) -> Option<&PlacedAction> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Get the number of placed actions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the rotation holds no actions
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Splice incoming items into the sequence at the snapped insertion
    /// point and return that index.
    fn splice_in(&mut self, mut incoming: Vec<PlacedAction>) -> usize {
        // Stable sort keeps equal requested starts in caller order
        incoming.sort_by_key(|item| item.start);
        let snapped = self.snap.nearest(incoming[0].start);
        let insert_index = self.items.partition_point(|item| item.start < snapped);
        self.items.splice(insert_index..insert_index, incoming);
        insert_index
    }

    /// Drop the given ids and return the first index needing recalculation,
    /// or `None` when nothing was removed.
    fn filter_out(&mut self, ids: &[ActionId]) -> Option<usize> {
        let min_removed_start = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .map(|item| item.start)
            .min()?;
        self.items.retain(|item| !ids.contains(&item.id));
        Some(
            self.items
                .partition_point(|item| item.start < min_removed_start),
        )
    }

    /// Recompute start times left to right from `start_index`.
    ///
    /// The first item of the sequence is pinned to 0. A GCD item starts at
    /// whichever comes later of the previous item's occupancy end and the
    /// most recent GCD item's recovery end; an oGCD weaves in at the
    /// previous item's occupancy end without touching the GCD clock.
    fn recalculate_from(&mut self, start_index: usize) {
        for i in start_index..self.items.len() {
            let new_start = if i == 0 {
                0
            } else {
                let next_action_available = self.items[i - 1].occupancy_end();
                if self.items[i].is_gcd() {
                    let next_gcd_available = self.items[..i]
                        .iter()
                        .rev()
                        .find_map(PlacedAction::gcd_end)
                        .unwrap_or(0);
                    next_action_available.max(next_gcd_available)
                } else {
                    next_action_available
                }
            };
            self.items[i].start = new_start;
        }
    }

    /// Rebuild the snap index and diff against the pre-mutation snapshot
    fn finish(&mut self, before: &IndexMap<ActionId, TimeMs>) -> Vec<RotationEvent> {
        self.snap.rebuild(&self.items);
        debug_assert!(
            self.items.windows(2).all(|w| w[0].start <= w[1].start),
            "rotation must stay sorted by start"
        );
        diff_events(before, &self.items)
    }

    fn snapshot(&self) -> IndexMap<ActionId, TimeMs> {
        self.items.iter().map(|item| (item.id, item.start)).collect()
    }
}
