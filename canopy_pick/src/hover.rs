// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover edge detection for the mousemove family.
//!
//! ## Overview
//!
//! Enter and leave are not raised by the input source; they are derived. The
//! tracker keeps two slots — the node currently considered `entered`, and the
//! recipient computed for the previous mousemove dispatch (`leave_pending`) —
//! and diffs each new selection result against them, emitting the ordered
//! steps the dispatcher should deliver: the move itself, an enter edge when
//! the target changed, then a leave edge for the previous target.
//!
//! The machine runs on every mousemove-family dispatch, not only on pointer
//! motion: occlusion can change without the cursor moving (a node drifting
//! into the ray), so hosts may re-dispatch mousemove once per frame after
//! updating the intersection list.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_pick::hover::{HoverStep, HoverTracker};
//! let mut h: HoverTracker<u32> = HoverTracker::new();
//! assert_eq!(
//!     h.advance(Some(&1), true).as_slice(),
//!     [HoverStep::Move(1), HoverStep::Enter(1)]
//! );
//! assert_eq!(h.advance(None, false).as_slice(), [HoverStep::Leave(1)]);
//! ```

use smallvec::SmallVec;

/// A delivery the hover machine requests, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverStep<K> {
    /// Deliver mousemove to the current target.
    Move(K),
    /// Deliver mouseenter to the current target.
    Enter(K),
    /// Deliver mouseleave to the previous target.
    Leave(K),
}

/// Two-slot edge detector turning per-frame selection results into
/// enter/leave transitions.
///
/// At most one node is considered entered at any time. `leave_pending` always
/// reflects the recipient computed for the previous mousemove-family
/// dispatch, which is what the next dispatch diffs against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker<K> {
    entered: Option<K>,
    leave_pending: Option<K>,
}

impl<K: Clone + Eq> HoverTracker<K> {
    /// Empty tracker: nothing hovered.
    pub fn new() -> Self {
        Self {
            entered: None,
            leave_pending: None,
        }
    }

    /// The node currently considered entered, if any.
    pub fn entered(&self) -> Option<&K> {
        self.entered.as_ref()
    }

    /// The recipient of the previous mousemove-family dispatch.
    pub fn leave_pending(&self) -> Option<&K> {
        self.leave_pending.as_ref()
    }

    /// Advance the machine with this dispatch's selection result.
    ///
    /// `target_accepts_leave` reports whether the selected target has
    /// mouseleave delivery enabled. A target that does not is dropped from
    /// the entered slot after a leave edge — it is never considered held
    /// across frames, so its enter edge fires again while hovered.
    pub fn advance(
        &mut self,
        target: Option<&K>,
        target_accepts_leave: bool,
    ) -> SmallVec<[HoverStep<K>; 3]> {
        let mut steps = SmallVec::new();

        if let Some(t) = target {
            steps.push(HoverStep::Move(t.clone()));
            if self.entered.as_ref() != Some(t) {
                steps.push(HoverStep::Enter(t.clone()));
                self.entered = Some(t.clone());
            }
        }

        if self.leave_pending.as_ref() != target {
            if let Some(prev) = self.leave_pending.take() {
                steps.push(HoverStep::Leave(prev));
                self.entered = match target {
                    Some(t) if target_accepts_leave => Some(t.clone()),
                    _ => None,
                };
            }
        }

        self.leave_pending = target.cloned();
        steps
    }

    /// Drop any bookkeeping that refers to `node`.
    ///
    /// Called on unregistration so a node removed during an active hover is
    /// never referenced by later dispatches.
    pub fn forget(&mut self, node: &K) {
        if self.entered.as_ref() == Some(node) {
            self.entered = None;
        }
        if self.leave_pending.as_ref() == Some(node) {
            self.leave_pending = None;
        }
    }

    /// Reset both slots.
    pub fn clear(&mut self) {
        self.entered = None;
        self.leave_pending = None;
    }
}
