// SPDX-License-Identifier: MIT OR Apache-2.0
//! Snap point index over the current rotation.

use crate::action::{PlacedAction, TimeMs, ANIMATION_LOCK_MS};
use serde::{Deserialize, Serialize};

/// Sorted set of legal placement timestamps derived from the rotation.
///
/// Rebuilt wholesale after every structural mutation; rotations are small
/// enough (seconds to minutes of actions) that O(n log n) per rebuild is
/// fine, while lookups stay O(log n).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapIndex {
    points: Vec<TimeMs>,
}

impl SnapIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from the current sequence.
    ///
    /// Each item contributes its start; GCD items also contribute their GCD
    /// end and, when casted, their cast end; oGCD items contribute their
    /// animation lock end.
    pub fn rebuild(&mut self, items: &[PlacedAction]) {
        self.points.clear();
        for item in items {
            self.points.push(item.start);
            if item.is_gcd() {
                self.points.push(item.start + item.action.next_gcd);
                if item.action.cast_time > 0 {
                    self.points.push(item.start + item.action.cast_time);
                }
            } else {
                self.points.push(item.start + ANIMATION_LOCK_MS);
            }
        }
        self.points.sort_unstable();
        self.points.dedup();
    }

    /// Find the snap point closest to `time`.
    ///
    /// Ties between two equidistant neighbors break toward the earlier
    /// timestamp. An empty index yields 0; this never fails.
    pub fn nearest(&self, time: TimeMs) -> TimeMs {
        if self.points.is_empty() {
            return 0;
        }

        let idx = self.points.partition_point(|&p| p < time);
        if idx == 0 {
            return self.points[0];
        }
        if idx == self.points.len() {
            return self.points[idx - 1];
        }

        let before = self.points[idx - 1];
        let after = self.points[idx];
        if time - before <= after - time {
            before
        } else {
            after
        }
    }

    /// Get all snap points, sorted ascending
    pub fn points(&self) -> &[TimeMs] {
        &self.points
    }

    /// Get the number of snap points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
