// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rotation sequencing engine for the timeline planner.
//!
//! This crate maintains the temporal arrangement of a rotation:
//! - Ordered sequence of placed actions with start-time recalculation
//! - GCD/oGCD weaving under a fixed animation lock
//! - Snap point index for legal placement lookup
//! - Derived timeline segments (actions plus GCD recovery backgrounds)
//! - Interactive placement cursor
//!
//! ## Architecture
//!
//! The [`Rotation`] sequencer exclusively owns the sequence; every mutation
//! is one synchronous, atomic recalculation pass that returns a typed
//! [`RotationEvent`] batch. The [`TimelineView`] consumes those batches to
//! stay a pure projection of the sequence, and [`RotationPlanner`] wires
//! both behind the widget's gesture hooks. Rendering, drag pixel math, and
//! the action catalog live outside this crate.

pub mod action;
pub mod event;
pub mod planner;
pub mod rotation;
pub mod snap;
pub mod view;

pub use action::{Action, ActionId, PlacedAction, TimeMs, ANIMATION_LOCK_MS};
pub use event::RotationEvent;
pub use planner::RotationPlanner;
pub use rotation::Rotation;
pub use snap::SnapIndex;
pub use view::{Segment, SegmentId, TimelineView};
