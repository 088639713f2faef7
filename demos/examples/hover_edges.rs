// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover enter/leave edges.
//!
//! Drives a few frames over a single panel: entering, leaving, re-entering,
//! and finally an occlusion change with the pointer standing still — the
//! panel is moved out from under the cursor and the leave edge still fires.
//!
//! Run:
//! - `cargo run -p canopy_demos --example hover_edges`

use std::cell::RefCell;
use std::rc::Rc;

use canopy_pick::Dispatcher;
use canopy_pick::adapters::flat_scene::{FlatCaster, FlatNodeId, FlatScene};
use canopy_pick::types::{EventKind, PointerSurface};
use kurbo::{Point, Rect};

type Log = Rc<RefCell<Vec<(EventKind, FlatNodeId)>>>;

/// One host frame: store the pointer, re-resolve intersections, re-evaluate
/// the mousemove family.
fn frame(
    d: &mut Dispatcher<FlatNodeId, (), FlatScene, FlatCaster>,
    ndc: Point,
    log: &Log,
) -> Vec<(EventKind, FlatNodeId)> {
    d.set_pointer(ndc);
    d.update();
    d.dispatch(EventKind::MouseMove, None);
    log.borrow_mut().drain(..).collect()
}

fn main() {
    let mut scene = FlatScene::new();
    let panel = scene.add_leaf(None, Rect::new(-0.5, -0.5, 0.5, 0.5), 2.0);

    let mut d = Dispatcher::new(
        scene,
        FlatCaster,
        (),
        PointerSurface::from_size(800.0, 600.0),
    );
    d.register(panel);

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::MouseEnter, EventKind::MouseLeave] {
        let l = Rc::clone(&log);
        d.on(&panel, kind, move |ev| l.borrow_mut().push((ev.kind, ev.target)));
    }

    let over = Point::new(0.0, 0.0);
    let away = Point::new(0.9, 0.9);

    let ev = frame(&mut d, over, &log);
    println!("== Enter ==\n  {ev:?}");
    assert_eq!(ev, [(EventKind::MouseEnter, panel)]);

    let ev = frame(&mut d, away, &log);
    println!("== Leave ==\n  {ev:?}");
    assert_eq!(ev, [(EventKind::MouseLeave, panel)]);

    let ev = frame(&mut d, over, &log);
    println!("== Re-enter ==\n  {ev:?}");
    assert_eq!(ev, [(EventKind::MouseEnter, panel)]);

    // The pointer stays put; the panel slides away. Occlusion alone drives
    // the edge.
    d.scene_mut()
        .place_leaf(panel, Rect::new(0.7, 0.7, 0.9, 0.9), 2.0);
    let ev = frame(&mut d, over, &log);
    println!("== Leave (panel moved) ==\n  {ev:?}");
    assert_eq!(ev, [(EventKind::MouseLeave, panel)]);
}
