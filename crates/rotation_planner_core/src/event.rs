// SPDX-License-Identifier: MIT OR Apache-2.0
//! Change events published by the rotation sequencer.

use crate::action::{ActionId, PlacedAction, TimeMs};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single change to the rotation's placed-action sequence.
///
/// Every mutating sequencer operation returns one batch of these, computed
/// after the whole recalculation pass; consumers never observe a partially
/// recalculated sequence. A moved item surfaces as [`RotationEvent::Updated`],
/// not as a remove/add pair, so downstream views can update in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RotationEvent {
    /// An action was placed into the sequence (start already reconciled)
    Added(PlacedAction),
    /// An existing placement's start time changed
    Updated(PlacedAction),
    /// A placement left the sequence
    Removed(ActionId),
}

/// Diff a pre-mutation snapshot of `(id, start)` pairs against the
/// post-mutation sequence. Removals come first, then adds and updates in
/// sequence order.
pub(crate) fn diff_events(
    before: &IndexMap<ActionId, TimeMs>,
    after: &[PlacedAction],
) -> Vec<RotationEvent> {
    let mut events = Vec::new();

    for id in before.keys() {
        if !after.iter().any(|item| item.id == *id) {
            events.push(RotationEvent::Removed(*id));
        }
    }

    for item in after {
        match before.get(&item.id) {
            None => events.push(RotationEvent::Added(item.clone())),
            Some(&old_start) if old_start != item.start => {
                events.push(RotationEvent::Updated(item.clone()));
            }
            Some(_) => {}
        }
    }

    events
}
