// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking across mousedown / mousemove / mouseup.
//!
//! A mousedown on the panel anchors a drag; pointer capture keeps routing to
//! the panel even when the cursor slides off its geometry, and the drag state
//! reports per-move deltas plus the total offset.
//!
//! Run:
//! - `cargo run -p canopy_demos --example drag_offsets`

use std::cell::RefCell;
use std::rc::Rc;

use canopy_pick::Dispatcher;
use canopy_pick::adapters::flat_scene::{FlatCaster, FlatNodeId, FlatScene};
use canopy_pick::drag::DragState;
use canopy_pick::types::{EventKind, PointerButton, PointerSurface, RawPointer};
use kurbo::{Point, Rect};

fn main() {
    let mut scene = FlatScene::new();
    let panel = scene.add_leaf(None, Rect::new(-0.25, -0.25, 0.25, 0.25), 1.0);

    let mut d = Dispatcher::new(
        scene,
        FlatCaster,
        (),
        PointerSurface::from_size(800.0, 600.0),
    );
    d.register(panel);

    let drag: Rc<RefCell<DragState<FlatNodeId>>> = Rc::new(RefCell::new(DragState::new()));

    let on_down = Rc::clone(&drag);
    d.on(&panel, EventKind::MouseDown, move |ev| {
        if let Some(input) = ev.input {
            on_down.borrow_mut().start(ev.target, input.position);
        }
    });
    let on_move = Rc::clone(&drag);
    d.on(&panel, EventKind::MouseMove, move |ev| {
        if let Some(input) = ev.input
            && let Some(delta) = on_move.borrow_mut().update(input.position)
        {
            println!("  delta ({}, {})", delta.x, delta.y);
        }
    });
    let on_up = Rc::clone(&drag);
    d.on(&panel, EventKind::MouseUp, move |ev| {
        if let Some(input) = ev.input {
            let total = on_up.borrow().total_offset(input.position);
            println!("  released after {total:?}");
        }
        on_up.borrow_mut().end();
    });

    // Press on the panel center.
    d.pointer_moved(Point::new(400.0, 300.0));
    d.update();
    println!("== Press ==");
    d.dispatch(
        EventKind::MouseDown,
        Some(RawPointer::press(Point::new(400.0, 300.0), PointerButton::Primary)),
    );
    assert!(drag.borrow().is_dragging());
    assert_eq!(drag.borrow().target(), Some(&panel));

    // Capture the panel so the drag survives leaving its geometry.
    d.capture(Some(panel));

    println!("== Drag ==");
    for pos in [Point::new(460.0, 300.0), Point::new(520.0, 340.0)] {
        d.pointer_moved(pos);
        d.update();
    }
    let total = drag.borrow().total_offset(Point::new(520.0, 340.0)).unwrap();
    assert_eq!((total.x, total.y), (120.0, 40.0));

    println!("== Release ==");
    d.dispatch(
        EventKind::MouseUp,
        Some(RawPointer::press(Point::new(520.0, 340.0), PointerButton::Primary)),
    );
    d.capture(None);
    assert!(!drag.borrow().is_dragging());
}
