// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the engine: event kinds, flag masks, raw input samples,
//! ray hits, payloads, and the collaborator traits.
//!
//! ## Overview
//!
//! These types describe the engine's protocol and its inputs/outputs. They
//! are referenced by the [`dispatcher`](crate::dispatcher) and implemented or
//! consumed by downstream hosts.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

/// Kinds of pointer events routed by the engine.
///
/// This is a closed set. [`MouseEnter`](Self::MouseEnter) and
/// [`MouseLeave`](Self::MouseLeave) are never forwarded by the host; they are
/// derived from mousemove dispatches by the hover machine
/// ([`HoverTracker`](crate::hover::HoverTracker)).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Press-and-release recognized by the host.
    Click,
    /// Two clicks in quick succession, recognized by the host.
    DblClick,
    /// Context-menu trigger (usually the secondary button).
    ContextMenu,
    /// Scroll wheel.
    Wheel,
    /// Pointer motion; drives the hover machine.
    MouseMove,
    /// Button press.
    MouseDown,
    /// Button release.
    MouseUp,
    /// Derived: the selected target changed to this node.
    MouseEnter,
    /// Derived: the previously selected target is no longer selected.
    MouseLeave,
    /// Touch contact began.
    TouchStart,
    /// Touch contact moved.
    TouchMove,
    /// Touch contact lifted.
    TouchEnd,
    /// Touch contact was interrupted.
    TouchCancel,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Click,
        Self::DblClick,
        Self::ContextMenu,
        Self::Wheel,
        Self::MouseMove,
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseEnter,
        Self::MouseLeave,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::TouchCancel,
    ];

    /// Number of kinds in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// The single-bit [`EventMask`] for this kind.
    pub const fn mask(self) -> EventMask {
        EventMask::from_bits_truncate(1 << self as u32)
    }

    /// Index into per-kind tables.
    pub(crate) const fn idx(self) -> usize {
        self as usize
    }

    /// Kinds synthesized by the hover machine rather than bound to a raw
    /// host event.
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::MouseEnter | Self::MouseLeave)
    }
}

bitflags::bitflags! {
    /// Per-event-kind flag set.
    ///
    /// Each registered target carries two of these: the `enabled` mask gates
    /// whether a selected target actually receives delivery, and the `deep`
    /// mask lets a target win selection priority over nearer targets that
    /// have not opted in. Both default to empty.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventMask: u16 {
        /// [`EventKind::Click`].
        const CLICK = 1 << 0;
        /// [`EventKind::DblClick`].
        const DBL_CLICK = 1 << 1;
        /// [`EventKind::ContextMenu`].
        const CONTEXT_MENU = 1 << 2;
        /// [`EventKind::Wheel`].
        const WHEEL = 1 << 3;
        /// [`EventKind::MouseMove`].
        const MOUSE_MOVE = 1 << 4;
        /// [`EventKind::MouseDown`].
        const MOUSE_DOWN = 1 << 5;
        /// [`EventKind::MouseUp`].
        const MOUSE_UP = 1 << 6;
        /// [`EventKind::MouseEnter`].
        const MOUSE_ENTER = 1 << 7;
        /// [`EventKind::MouseLeave`].
        const MOUSE_LEAVE = 1 << 8;
        /// [`EventKind::TouchStart`].
        const TOUCH_START = 1 << 9;
        /// [`EventKind::TouchMove`].
        const TOUCH_MOVE = 1 << 10;
        /// [`EventKind::TouchEnd`].
        const TOUCH_END = 1 << 11;
        /// [`EventKind::TouchCancel`].
        const TOUCH_CANCEL = 1 << 12;
    }
}

/// Which button a mouse-family sample refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerButton {
    /// The primary button (usually left).
    Primary,
    /// The secondary button (usually right).
    Secondary,
    /// The middle button.
    Middle,
    /// Any other button, by host index.
    Other(u8),
}

/// A raw input sample forwarded by the host alongside a dispatch.
///
/// Interceptors only run for dispatches that carry one; re-dispatching
/// without a sample (for example a per-frame mousemove re-evaluation) skips
/// interception and goes straight to the enabled-gate and listeners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawPointer {
    /// Position in the pointer surface's device coordinates.
    pub position: Point,
    /// Button for the press/release/click family.
    pub button: Option<PointerButton>,
    /// Wheel scroll delta.
    pub scroll: Vec2,
    /// Identifier of the touch contact for the touch family.
    pub touch: Option<u64>,
}

impl RawPointer {
    /// A plain motion sample at `position`.
    pub const fn motion(position: Point) -> Self {
        Self {
            position,
            button: None,
            scroll: Vec2::ZERO,
            touch: None,
        }
    }

    /// A button sample for the press/release/click family.
    pub const fn press(position: Point, button: PointerButton) -> Self {
        Self {
            position,
            button: Some(button),
            scroll: Vec2::ZERO,
            touch: None,
        }
    }

    /// A wheel sample with the given scroll delta.
    pub const fn wheel(position: Point, scroll: Vec2) -> Self {
        Self {
            position,
            button: None,
            scroll,
            touch: None,
        }
    }

    /// A touch sample for contact `id`.
    pub const fn contact(position: Point, id: u64) -> Self {
        Self {
            position,
            button: None,
            scroll: Vec2::ZERO,
            touch: Some(id),
        }
    }
}

/// The payload handed to interceptors and listeners.
#[derive(Clone, Debug)]
pub struct TargetEvent<K> {
    /// Event kind being delivered.
    pub kind: EventKind,
    /// The recipient target.
    pub target: K,
    /// Raw host input, when the dispatch originated from one.
    pub input: Option<RawPointer>,
}

/// A single ray-caster result: a pick leaf and its distance from the camera.
///
/// Casters return hits ordered nearest-first; the engine relies on that order
/// and does not re-sort.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit<K> {
    /// The geometry leaf that was struck.
    pub leaf: K,
    /// Distance along the ray; lower is nearer.
    pub distance: f32,
}

/// Device-pixel bounds of the surface that produces pointer input.
///
/// Raw positions are mapped into normalized device coordinates: x rightward
/// in `[-1, 1]`, y upward in `[-1, 1]`, origin at the surface center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSurface {
    /// The surface rectangle in device pixels.
    pub bounds: Rect,
}

impl PointerSurface {
    /// Surface with the given device-pixel bounds.
    pub const fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Surface of the given size with its origin at zero.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Map a device-pixel position to normalized device coordinates.
    pub fn to_ndc(&self, position: Point) -> Point {
        let b = self.bounds;
        Point::new(
            (position.x - b.x0) / b.width() * 2.0 - 1.0,
            -((position.y - b.y0) / b.height() * 2.0 - 1.0),
        )
    }
}

/// Scene access consumed by the engine: subtree traversal only.
///
/// The engine never walks parent links and never mutates the scene; this is
/// the whole surface it needs from a scene graph. `K` is the host's node key.
pub trait SceneWalk<K> {
    /// Visit `node` and every descendant. Order is not significant.
    fn visit_subtree(&self, node: &K, visit: &mut dyn FnMut(&K));

    /// Returns `true` when `node` has children of its own.
    fn has_children(&self, node: &K) -> bool;

    /// Returns `true` when `node` carries pickable geometry, i.e. can appear
    /// as a leaf in ray-cast results.
    fn is_pick_leaf(&self, node: &K) -> bool;
}

/// Geometry intersection collaborator.
///
/// Given the host camera and a normalized pointer position, produces the
/// pick-leaf hits under the subtrees of `roots`, nearest first. The scene is
/// passed in per call so casters stay stateless (the same shape as a hit-test
/// helper taking the tree it queries).
pub trait RayCast<K, C, S> {
    /// Cast the pointer ray and append hits, nearest first, to `out`.
    ///
    /// `out` is cleared by the caller; implementations only append.
    fn cast(&self, scene: &S, camera: &C, pointer: Point, roots: &[K], out: &mut Vec<RayHit<K>>);
}
