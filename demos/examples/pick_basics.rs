// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking basics.
//!
//! Two overlapping panels at different depths: the nearer one receives clicks
//! by default, until the occluded one opts into deep handling and claims
//! priority.
//!
//! Run:
//! - `cargo run -p canopy_demos --example pick_basics`

use std::cell::RefCell;
use std::rc::Rc;

use canopy_pick::Dispatcher;
use canopy_pick::adapters::flat_scene::{FlatCaster, FlatNodeId, FlatScene};
use canopy_pick::types::{EventKind, PointerSurface, RawPointer};
use kurbo::{Point, Rect};

fn main() {
    let mut scene = FlatScene::new();
    // Both panels cover the center of the view; `front` is nearer.
    let front = scene.add_leaf(None, Rect::new(-0.5, -0.5, 0.5, 0.5), 1.0);
    let back = scene.add_leaf(None, Rect::new(-0.6, -0.6, 0.6, 0.6), 3.0);

    let mut d = Dispatcher::new(
        scene,
        FlatCaster,
        (),
        PointerSurface::from_size(800.0, 600.0),
    );
    d.register(front);
    d.register(back);

    let clicks: Rc<RefCell<Vec<FlatNodeId>>> = Rc::new(RefCell::new(Vec::new()));
    for node in [front, back] {
        let log = Rc::clone(&clicks);
        d.on(&node, EventKind::Click, move |ev| {
            log.borrow_mut().push(ev.target);
        });
    }

    // Pointer over the center; both panels are along the ray.
    d.pointer_moved(Point::new(400.0, 300.0));
    d.update();
    println!("== Intersections ==\n  {:?}", d.intersections());
    assert_eq!(d.intersections(), &[front, back]);

    let sample = Some(RawPointer::motion(Point::new(400.0, 300.0)));

    // Nearest wins by default.
    d.dispatch(EventKind::Click, sample);
    assert_eq!(clicks.borrow_mut().drain(..).collect::<Vec<_>>(), [front]);
    println!("== Click (default) ==\n  front panel");

    // The occluded panel claims deep priority for clicks.
    d.enable_deep(&back, Some(EventKind::Click));
    d.dispatch(EventKind::Click, sample);
    assert_eq!(clicks.borrow_mut().drain(..).collect::<Vec<_>>(), [back]);
    println!("== Click (deep) ==\n  back panel");
}
