// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking across mousedown / mousemove / mouseup deliveries.
//!
//! ## Usage
//!
//! 1) Start from a mousedown listener with [`DragState::start`], recording the
//!    pressed target and position.
//! 2) On each mousemove delivery, call [`DragState::update`] for the movement
//!    delta since the previous position.
//! 3) Call [`DragState::total_offset`] for the cumulative offset from the
//!    anchor, and [`DragState::end`] from the mouseup listener.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_pick::drag::DragState;
//! use kurbo::Point;
//!
//! let mut drag: DragState<u32> = DragState::new();
//! drag.start(7, Point::new(10.0, 20.0));
//! assert!(drag.is_dragging());
//!
//! let delta = drag.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//!
//! let total = drag.total_offset(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!((total.x, total.y), (5.0, 5.0));
//!
//! drag.end();
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Tracks an in-progress drag: the originating target, the anchor position,
/// and the last seen position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState<K> {
    origin: Option<(K, Point)>,
    last: Option<Point>,
}

impl<K: Clone> DragState<K> {
    /// No drag in progress.
    pub fn new() -> Self {
        Self {
            origin: None,
            last: None,
        }
    }

    /// Begin a drag on `target` anchored at `pos`.
    pub fn start(&mut self, target: K, pos: Point) {
        self.origin = Some((target, pos));
        self.last = Some(pos);
    }

    /// Feed a new position; returns the delta since the previous one while a
    /// drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.origin.as_ref()?;
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    /// Total offset from the anchor position.
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.origin.as_ref().map(|(_, start)| pos - *start)
    }

    /// The target the drag started on.
    pub fn target(&self) -> Option<&K> {
        self.origin.as_ref().map(|(t, _)| t)
    }

    /// End the drag and reset state.
    pub fn end(&mut self) {
        self.origin = None;
        self.last = None;
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_without_start_returns_nothing() {
        let mut drag: DragState<u32> = DragState::new();
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn deltas_chain_from_the_last_position() {
        let mut drag: DragState<u32> = DragState::new();
        drag.start(1, Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(3.0, 0.0)), Some(Vec2::new(3.0, 0.0)));
        assert_eq!(drag.update(Point::new(3.0, 4.0)), Some(Vec2::new(0.0, 4.0)));
        assert_eq!(
            drag.total_offset(Point::new(3.0, 4.0)),
            Some(Vec2::new(3.0, 4.0))
        );
    }

    #[test]
    fn target_is_held_until_end() {
        let mut drag: DragState<u32> = DragState::new();
        drag.start(9, Point::ZERO);
        assert_eq!(drag.target(), Some(&9));
        drag.end();
        assert_eq!(drag.target(), None);
        assert_eq!(drag.update(Point::new(1.0, 0.0)), None);
    }
}
