// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use canopy_pick::Dispatcher;
use canopy_pick::adapters::flat_scene::{FlatCaster, FlatNodeId, FlatScene};
use canopy_pick::types::{EventKind, PointerSurface, RawPointer};
use kurbo::{Point, Rect};

type Pick = Dispatcher<FlatNodeId, (), FlatScene, FlatCaster>;

/// Build an n×n grid of registered leaves tiling NDC space, with a full-view
/// backdrop behind them so the pointer always crosses at least two targets.
fn grid_dispatcher(n: usize) -> Pick {
    let mut scene = FlatScene::new();
    let mut leaves = Vec::with_capacity(n * n + 1);
    let cell = 2.0 / n as f64;
    for y in 0..n {
        for x in 0..n {
            let x0 = -1.0 + x as f64 * cell;
            let y0 = -1.0 + y as f64 * cell;
            leaves.push(scene.add_leaf(None, Rect::new(x0, y0, x0 + cell, y0 + cell), 1.0));
        }
    }
    leaves.push(scene.add_leaf(None, Rect::new(-1.0, -1.0, 1.0, 1.0), 10.0));

    let mut d = Dispatcher::new(
        scene,
        FlatCaster,
        (),
        PointerSurface::from_size(1024.0, 1024.0),
    );
    for leaf in &leaves {
        d.register(*leaf);
        d.enable(leaf, Some(EventKind::Click));
        d.enable(leaf, Some(EventKind::MouseMove));
    }
    d.set_pointer(Point::new(0.013, 0.017));
    d
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for n in [8_usize, 16, 32] {
        let mut d = grid_dispatcher(n);
        group.throughput(Throughput::Elements((n * n + 1) as u64));
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| {
                d.update();
                black_box(d.intersections().len())
            });
        });
    }
    group.finish();
}

fn bench_dispatch_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_click");
    for n in [8_usize, 16, 32] {
        let mut d = grid_dispatcher(n);
        d.update();
        let sample = Some(RawPointer::motion(Point::new(512.0, 512.0)));
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| d.dispatch(EventKind::Click, black_box(sample)));
        });
    }
    group.finish();
}

fn bench_mousemove_family(c: &mut Criterion) {
    let mut group = c.benchmark_group("mousemove_family");
    for n in [8_usize, 16, 32] {
        let mut d = grid_dispatcher(n);
        d.update();
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| d.dispatch(EventKind::MouseMove, None));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_update,
    bench_dispatch_click,
    bench_mousemove_family
);
criterion_main!(benches);
