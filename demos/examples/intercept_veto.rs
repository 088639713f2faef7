// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interception and veto.
//!
//! A privileged observer sees every click before delivery and can veto it
//! through the abort handle. The veto suppresses that one dispatch only; the
//! next click starts with a fresh handle.
//!
//! Run:
//! - `cargo run -p canopy_demos --example intercept_veto`

use std::cell::RefCell;
use std::rc::Rc;

use canopy_pick::Dispatcher;
use canopy_pick::adapters::flat_scene::{FlatCaster, FlatScene};
use canopy_pick::types::{EventKind, PointerSurface, RawPointer};
use kurbo::{Point, Rect};

fn main() {
    let mut scene = FlatScene::new();
    let panel = scene.add_leaf(None, Rect::new(-0.5, -0.5, 0.5, 0.5), 1.0);

    let mut d = Dispatcher::new(
        scene,
        FlatCaster,
        (),
        PointerSurface::from_size(800.0, 600.0),
    );
    d.register(panel);

    let delivered = Rc::new(RefCell::new(0_u32));
    let count = Rc::clone(&delivered);
    d.on(&panel, EventKind::Click, move |_| {
        *count.borrow_mut() += 1;
    });

    // While the shield is up, clicks are observed but never delivered.
    let shield = Rc::new(RefCell::new(true));
    let gate = Rc::clone(&shield);
    d.intercept(EventKind::Click, move |ev, abort| {
        println!("  interceptor saw click on {:?}", ev.target);
        if *gate.borrow() {
            abort.veto();
        }
    });

    d.pointer_moved(Point::new(400.0, 300.0));
    d.update();
    let sample = Some(RawPointer::motion(Point::new(400.0, 300.0)));

    println!("== Click (shield up) ==");
    d.dispatch(EventKind::Click, sample);
    assert_eq!(*delivered.borrow(), 0);

    println!("== Click (shield down) ==");
    *shield.borrow_mut() = false;
    d.dispatch(EventKind::Click, sample);
    assert_eq!(*delivered.borrow(), 1);
}
