// SPDX-License-Identifier: MIT OR Apache-2.0
//! Action definitions and timeline placements.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp or duration in milliseconds since the rotation origin.
///
/// All time handling inside the core uses this representation; external
/// formats (dates, pixel offsets) are converted at the boundary.
pub type TimeMs = i64;

/// Minimum occupancy any action reserves before the next action may begin,
/// whether or not it is subject to the global cooldown.
pub const ANIMATION_LOCK_MS: TimeMs = 500;

/// Unique identifier for a placed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Uuid);

impl ActionId {
    /// Create a new random action ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable ability definition from a job's action catalog.
///
/// Definitions are shared input data; placing one on the timeline copies it
/// by value (see [`PlacedAction`]), so later catalog edits never alter an
/// existing rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Owning job abbreviation (identity is the pair (job, name))
    pub job: String,
    /// Action name
    pub name: String,
    /// Base damage value, opaque to the sequencer
    pub potency: i32,
    /// Time the action takes to resolve
    pub cast_time: TimeMs,
    /// Time before another GCD-class action may start; 0 marks an oGCD
    pub next_gcd: TimeMs,
    /// Recast time, carried through but not interpreted here
    pub cooldown: TimeMs,
    /// MP cost, carried through but not interpreted here
    pub mp_cost: i32,
}

impl Action {
    /// Create a new action definition
    pub fn new(job: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            name: name.into(),
            potency: 0,
            cast_time: 0,
            next_gcd: 0,
            cooldown: 0,
            mp_cost: 0,
        }
    }

    /// Set the potency
    pub fn with_potency(mut self, potency: i32) -> Self {
        self.potency = potency;
        self
    }

    /// Set the cast time in milliseconds
    pub fn with_cast_time(mut self, cast_time: TimeMs) -> Self {
        self.cast_time = cast_time;
        self
    }

    /// Set the GCD recovery time in milliseconds (0 for an oGCD)
    pub fn with_next_gcd(mut self, next_gcd: TimeMs) -> Self {
        self.next_gcd = next_gcd;
        self
    }

    /// Set the cooldown in milliseconds
    pub fn with_cooldown(mut self, cooldown: TimeMs) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the MP cost
    pub fn with_mp_cost(mut self, mp_cost: i32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    /// Whether this action is subject to the global cooldown
    pub fn is_gcd(&self) -> bool {
        self.next_gcd > 0
    }
}

/// One occurrence of an action on the timeline.
///
/// `start` carries the caller's requested time until the sequencer
/// reconciles it; after any mutation it holds the recalculated legal start.
/// It is the only field that changes after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAction {
    /// Unique placement ID, stable across recalculation
    pub id: ActionId,
    /// Absolute start time in milliseconds
    pub start: TimeMs,
    /// Owned copy of the action definition
    pub action: Action,
}

impl PlacedAction {
    /// Place an action at a requested start time, copying the definition
    pub fn new(action: &Action, start: TimeMs) -> Self {
        Self {
            id: ActionId::new(),
            start,
            action: action.clone(),
        }
    }

    /// Whether the placed action is subject to the global cooldown
    pub fn is_gcd(&self) -> bool {
        self.action.is_gcd()
    }

    /// Time this placement occupies before the next action may begin
    pub fn occupancy_end(&self) -> TimeMs {
        self.start + self.action.cast_time.max(ANIMATION_LOCK_MS)
    }

    /// End of the GCD recovery window, if this is a GCD action
    pub fn gcd_end(&self) -> Option<TimeMs> {
        self.is_gcd().then(|| self.start + self.action.next_gcd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_classification() {
        let gcd = Action::new("SMN", "Ruin III").with_next_gcd(2500);
        let ogcd = Action::new("SMN", "Fester");
        assert!(gcd.is_gcd());
        assert!(!ogcd.is_gcd());
    }

    #[test]
    fn test_placement_copies_definition() {
        let mut def = Action::new("SMN", "Ruin III")
            .with_potency(310)
            .with_cast_time(1500)
            .with_next_gcd(2500);
        let placed = PlacedAction::new(&def, 0);

        // Catalog edits must not reach existing placements
        def.potency = 9999;
        assert_eq!(placed.action.potency, 310);
    }

    #[test]
    fn test_occupancy_respects_animation_lock() {
        let instant = Action::new("SMN", "Summon Bahamut").with_next_gcd(2500);
        let cast = Action::new("SMN", "Ruin III")
            .with_cast_time(1500)
            .with_next_gcd(2500);

        assert_eq!(PlacedAction::new(&instant, 1000).occupancy_end(), 1500);
        assert_eq!(PlacedAction::new(&cast, 1000).occupancy_end(), 2500);
    }

    #[test]
    fn test_gcd_end() {
        let gcd = Action::new("SMN", "Ruin III").with_next_gcd(2500);
        let ogcd = Action::new("SMN", "Fester");
        assert_eq!(PlacedAction::new(&gcd, 1000).gcd_end(), Some(3500));
        assert_eq!(PlacedAction::new(&ogcd, 1000).gcd_end(), None);
    }
}
