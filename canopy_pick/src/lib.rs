// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Pick: pointer hit-test and dispatch for 3D scene graphs.
//!
//! ## Overview
//!
//! This crate routes pointer input to the nodes of a 3D scene. Hosts register
//! the subset of scene nodes that should be interactive, forward raw pointer
//! input, and call [`Dispatcher::update`] once per frame. The engine resolves
//! the pointer ray into an ordered intersection list, picks exactly one
//! recipient per dispatched event, derives enter/leave edges for hover, and
//! delivers through an interceptor pipeline that can veto delivery before
//! listeners run.
//!
//! It does not perform geometry intersection itself. Scene traversal and ray
//! casting are consumed through the [`SceneWalk`](types::SceneWalk) and
//! [`RayCast`](types::RayCast) traits, so any scene representation — a
//! full 3D scene graph, a billboard list, a BVH — can drive it.
//!
//! ## Selection
//!
//! - The ray caster reports `(leaf, distance)` hits nearest-first; the engine
//!   maps each leaf to its registered owner and deduplicates to the nearest
//!   occurrence ([`select::resolve_intersections`]).
//! - Per event kind, the nearest target is the default recipient; the first
//!   target in near-to-far order with its deep flag set wins instead
//!   ([`select::select_target`]). An occluded node that opted into deep
//!   handling claims priority over nearer nodes that did not.
//! - Delivery is gated per target and kind by the enabled flag; a selected
//!   but disabled target receives nothing and no interceptor runs.
//!
//! ## Workflow
//!
//! 1) Register — [`Dispatcher::register`] opts a node (and its pick leaves)
//!    into interaction; [`Dispatcher::on`] attaches listeners and implicitly
//!    enables the listened kind.
//! 2) Update — once per frame, [`Dispatcher::update`] recomputes the
//!    intersection list for the current pointer. No events fire here.
//! 3) Dispatch — forward discrete input via [`Dispatcher::dispatch`] (or
//!    [`Dispatcher::pointer_moved`] for motion). Mousemove dispatches drive
//!    the hover machine, which synthesizes mouseenter/mouseleave edges.
//!
//! ## Minimal example
//!
//! ```
//! # #[cfg(feature = "flat_scene_adapter")] {
//! use canopy_pick::Dispatcher;
//! use canopy_pick::adapters::flat_scene::{FlatCaster, FlatScene};
//! use canopy_pick::types::{EventKind, PointerSurface, RawPointer};
//! use kurbo::{Point, Rect};
//!
//! let mut scene = FlatScene::new();
//! let panel = scene.add_leaf(None, Rect::new(-0.5, -0.5, 0.5, 0.5), 2.0);
//!
//! let mut d = Dispatcher::new(scene, FlatCaster, (), PointerSurface::from_size(800.0, 600.0));
//! d.register(panel);
//! d.on(&panel, EventKind::Click, |ev| assert_eq!(ev.kind, EventKind::Click));
//!
//! d.set_pointer(Point::ZERO);
//! d.update();
//! d.dispatch(EventKind::Click, Some(RawPointer::motion(Point::new(400.0, 300.0))));
//! # }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod drag;
pub mod hover;
pub mod intercept;
pub mod registry;
pub mod select;
pub mod types;

pub use dispatcher::Dispatcher;
