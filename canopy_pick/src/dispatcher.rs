// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatch façade: registration, per-frame intersection state, hover
//! edges, and the interceptor pipeline.
//!
//! ## Overview
//!
//! [`Dispatcher`] owns the target registry, the normalized pointer position,
//! the camera and pointer surface handles, the frame's intersection list, the
//! hover tracker, and the interception table. Hosts drive it with three kinds
//! of calls:
//!
//! - **Input**: [`Dispatcher::pointer_moved`] (or [`Dispatcher::set_pointer`]
//!   for pre-normalized coordinates) and [`Dispatcher::dispatch`] for
//!   discrete events, forwarded synchronously as they occur.
//! - **Frame tick**: [`Dispatcher::update`] once per render frame, which
//!   re-resolves the pointer ray into the intersection list. Pure
//!   computation; nothing is delivered here.
//! - **Configuration**: registration, enable/disable flags, listeners, and
//!   interceptors.
//!
//! ## Delivery pipeline
//!
//! Every dispatch selects at most one recipient from the intersection list
//! (nearest target, overridden by the first deep-flagged target in
//! near-to-far order), then runs the launch pipeline: enabled-gate →
//! interceptor (only when a raw sample is present) → listeners, unless the
//! interceptor vetoed through its [`AbortHandle`]. Mousemove dispatches are
//! routed through the hover machine first, which can add mouseenter and
//! mouseleave deliveries to the same pipeline.
//!
//! All of this is single-threaded and synchronous: every call runs to
//! completion on the calling thread, and the only cancellation that exists is
//! the per-dispatch abort handle.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::Point;

use crate::hover::{HoverStep, HoverTracker};
use crate::intercept::{AbortHandle, InterceptTable};
use crate::registry::{ListenerId, TargetRegistry};
use crate::select;
use crate::types::{EventKind, PointerSurface, RawPointer, RayCast, RayHit, SceneWalk, TargetEvent};

/// Pointer-driven event dispatcher over a 3D scene.
///
/// Generic over the node key `K`, the host camera type `C` (opaque to the
/// engine, passed through to the caster), the scene traversal `S`, and the
/// ray caster `R`. Multiple dispatchers can coexist; there is no shared
/// state between instances.
///
/// Construction takes every collaborator up front, so a camera or surface can
/// never be missing at [`update`](Self::update) time.
pub struct Dispatcher<K, C, S, R> {
    scene: S,
    caster: R,
    camera: C,
    surface: PointerSurface,
    /// Current pointer position in normalized device coordinates. Starts at
    /// (1, 1) — parked in a corner until the first move arrives.
    pointer: Point,
    registry: TargetRegistry<K>,
    intersections: Vec<K>,
    scratch_hits: Vec<RayHit<K>>,
    hover: HoverTracker<K>,
    interceptors: InterceptTable<K>,
    captured: Option<K>,
}

impl<K, C, S, R> Dispatcher<K, C, S, R>
where
    K: Clone + Eq + Hash,
    S: SceneWalk<K>,
    R: RayCast<K, C, S>,
{
    /// Create a dispatcher from its collaborators.
    pub fn new(scene: S, caster: R, camera: C, surface: PointerSurface) -> Self {
        Self {
            scene,
            caster,
            camera,
            surface,
            pointer: Point::new(1.0, 1.0),
            registry: TargetRegistry::new(),
            intersections: Vec::new(),
            scratch_hits: Vec::new(),
            hover: HoverTracker::new(),
            interceptors: InterceptTable::new(),
            captured: None,
        }
    }

    /// Replace the camera handed to the ray caster.
    pub fn set_camera(&mut self, camera: C) {
        self.camera = camera;
    }

    /// Replace the pointer surface used for device → NDC conversion.
    pub fn set_surface(&mut self, surface: PointerSurface) {
        self.surface = surface;
    }

    /// Shared access to the scene collaborator.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene collaborator.
    ///
    /// Geometry and transforms may change freely between frames; the next
    /// [`update`](Self::update) observes them. Re-parenting a registered
    /// subtree is not tracked — unregister and re-register around it.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    // ---- Registration ------------------------------------------------------

    /// Opt a scene node into interaction. No-op if already registered.
    pub fn register(&mut self, node: K) {
        self.registry.register(node, &self.scene);
    }

    /// Register every node of an ordered collection.
    pub fn register_many(&mut self, nodes: impl IntoIterator<Item = K>) {
        for node in nodes {
            self.register(node);
        }
    }

    /// Remove a node from interaction. No-op if not registered.
    ///
    /// All of the node's listeners are detached, its descendant
    /// back-references are cleared, and any hover or capture bookkeeping that
    /// refers to it is dropped, so no later dispatch references the node.
    pub fn unregister(&mut self, node: &K) {
        if !self.registry.is_registered(node) {
            return;
        }
        self.registry.unregister(node, &self.scene);
        self.hover.forget(node);
        self.intersections.retain(|k| k != node);
        if self.captured.as_ref() == Some(node) {
            self.captured = None;
        }
    }

    /// Unregister a collection, in reverse of the given order.
    pub fn unregister_many(&mut self, nodes: &[K]) {
        for node in nodes.iter().rev() {
            self.unregister(node);
        }
    }

    /// Whether `node` is currently registered.
    pub fn is_registered(&self, node: &K) -> bool {
        self.registry.is_registered(node)
    }

    /// Unregister every target and reset all transient state.
    ///
    /// Host-level input bindings are the host's to detach; after this call
    /// the dispatcher is as-new and can be reused.
    pub fn dispose(&mut self) {
        let targets: Vec<K> = self.registry.roots().to_vec();
        self.unregister_many(&targets);
        self.hover.clear();
        self.intersections.clear();
        self.captured = None;
    }

    // ---- Frame tick --------------------------------------------------------

    /// Re-resolve the pointer ray into the frame's intersection list.
    ///
    /// Casts against the subtrees of all registered targets, maps each struck
    /// leaf to its owner, and deduplicates keeping nearest-first order. Pure
    /// computation: nothing is delivered until a discrete event is dispatched
    /// against the stored list. Call once per render frame, before any
    /// dispatch that depends on spatial selection.
    pub fn update(&mut self) {
        self.scratch_hits.clear();
        self.caster.cast(
            &self.scene,
            &self.camera,
            self.pointer,
            self.registry.roots(),
            &mut self.scratch_hits,
        );
        let Self {
            scratch_hits,
            registry,
            intersections,
            ..
        } = self;
        select::resolve_intersections(
            scratch_hits,
            |leaf| registry.resolve_owner(leaf),
            intersections,
        );
    }

    /// The frame's intersection list: registered targets along the pointer
    /// ray, nearest first, deduplicated.
    pub fn intersections(&self) -> &[K] {
        &self.intersections
    }

    // ---- Input -------------------------------------------------------------

    /// Record a pointer move in device coordinates and dispatch the mousemove
    /// family.
    ///
    /// The stored position feeds the next [`update`](Self::update); the
    /// dispatch itself selects against the intersection list of the previous
    /// one, exactly as if the host had forwarded the raw event twice.
    pub fn pointer_moved(&mut self, device_pos: Point) {
        self.pointer = self.surface.to_ndc(device_pos);
        self.dispatch(EventKind::MouseMove, Some(RawPointer::motion(device_pos)));
    }

    /// Store a pre-normalized pointer position without dispatching.
    pub fn set_pointer(&mut self, ndc: Point) {
        self.pointer = ndc;
    }

    /// Current pointer position in normalized device coordinates.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Route a discrete event against the current intersection list.
    ///
    /// Selects the recipient (§ deep override), then runs the launch
    /// pipeline. Mousemove is special-cased through the hover machine, which
    /// may add mouseenter/mouseleave deliveries; those two kinds are derived
    /// only and ignored if forwarded here directly. Dispatching without a raw
    /// sample (`input = None`) skips interceptors — useful for per-frame
    /// mousemove re-evaluation when only occlusion changed.
    pub fn dispatch(&mut self, kind: EventKind, input: Option<RawPointer>) {
        if kind.is_derived() {
            return;
        }
        let target = self.select(kind);
        if kind == EventKind::MouseMove {
            self.advance_hover(target, input);
        } else {
            self.launch(target.as_ref(), kind, input.as_ref());
        }
    }

    /// Capture all selection onto `node` until released with `None`.
    ///
    /// While set, every dispatch routes to the captured node regardless of
    /// the intersection list (enabled-gating still applies). Typical use is
    /// holding a drag's target while the pointer leaves its geometry.
    pub fn capture(&mut self, node: Option<K>) {
        self.captured = node;
    }

    /// The node currently considered hovered, if any.
    pub fn entered(&self) -> Option<&K> {
        self.hover.entered()
    }

    // ---- Flags, listeners, interception ------------------------------------

    /// Enable delivery of `kind` (or every kind) to `node`.
    pub fn enable(&mut self, node: &K, kind: Option<EventKind>) {
        self.registry.set_enabled(node, kind, true);
    }

    /// Disable delivery of `kind` (or every kind) to `node`.
    pub fn disable(&mut self, node: &K, kind: Option<EventKind>) {
        self.registry.set_enabled(node, kind, false);
    }

    /// Let `node` win selection through nearer targets for `kind` (or every
    /// kind).
    pub fn enable_deep(&mut self, node: &K, kind: Option<EventKind>) {
        self.registry.set_deep(node, kind, true);
    }

    /// Clear the deep-priority flag for `kind` (or every kind).
    pub fn disable_deep(&mut self, node: &K, kind: Option<EventKind>) {
        self.registry.set_deep(node, kind, false);
    }

    /// Attach a listener to `node` for `kind`; implicitly enables the kind.
    ///
    /// Returns `None` when the node is not registered.
    pub fn on(
        &mut self,
        node: &K,
        kind: EventKind,
        listener: impl FnMut(&TargetEvent<K>) + 'static,
    ) -> Option<ListenerId> {
        self.registry.attach(node, kind, Box::new(listener))
    }

    /// Detach listeners from `node`: one by id, all of a kind, or all.
    ///
    /// Removing the last listener for a kind implicitly disables it.
    pub fn off(&mut self, node: &K, kind: Option<EventKind>, listener: Option<ListenerId>) {
        self.registry.detach(node, kind, listener);
    }

    /// Number of listeners attached to `node` for `kind`.
    pub fn listener_count(&self, node: &K, kind: EventKind) -> usize {
        self.registry.listener_count(node, kind)
    }

    /// Install the interceptor for `kind`, replacing any existing one.
    ///
    /// The interceptor runs synchronously before listener delivery for every
    /// dispatch of `kind` that carries a raw sample, and may veto through the
    /// [`AbortHandle`]. Interceptors are trusted code: a panic propagates.
    pub fn intercept(
        &mut self,
        kind: EventKind,
        interceptor: impl FnMut(&TargetEvent<K>, &AbortHandle) + 'static,
    ) {
        self.interceptors.set(kind, Box::new(interceptor));
    }

    // ---- Pipeline ----------------------------------------------------------

    fn select(&self, kind: EventKind) -> Option<K> {
        if let Some(captured) = &self.captured {
            return Some(captured.clone());
        }
        select::select_target(&self.intersections, |k| {
            self.registry.deep_enabled(k, kind)
        })
    }

    fn advance_hover(&mut self, target: Option<K>, input: Option<RawPointer>) {
        let accepts_leave = target
            .as_ref()
            .is_some_and(|t| self.registry.enabled(t, EventKind::MouseLeave));
        let steps = self.hover.advance(target.as_ref(), accepts_leave);
        for step in steps {
            match step {
                HoverStep::Move(t) => self.launch(Some(&t), EventKind::MouseMove, input.as_ref()),
                HoverStep::Enter(t) => self.launch(Some(&t), EventKind::MouseEnter, input.as_ref()),
                HoverStep::Leave(t) => self.launch(Some(&t), EventKind::MouseLeave, input.as_ref()),
            }
        }
    }

    fn launch(&mut self, target: Option<&K>, kind: EventKind, input: Option<&RawPointer>) {
        let Some(target) = target else { return };
        if !self.registry.enabled(target, kind) {
            return;
        }
        let event = TargetEvent {
            kind,
            target: target.clone(),
            input: input.copied(),
        };
        let abort = AbortHandle::new();
        if event.input.is_some() {
            self.interceptors.run(kind, &event, &abort);
        }
        if abort.is_deliverable() {
            self.registry.notify(target, &event);
        }
    }
}

impl<K, C, S, R> core::fmt::Debug for Dispatcher<K, C, S, R>
where
    K: Clone + Eq + Hash + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pointer", &self.pointer)
            .field("targets", &self.registry.len())
            .field("intersections", &self.intersections)
            .field("entered", &self.hover.entered())
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}
