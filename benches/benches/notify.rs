// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Vec2;
use trellis_notify::{
    ChangeKind, ComponentKind, DependencyObserver, NotificationHub, NotifyError, Observable,
};
use trellis_scene::{Point, Polygon};

const GEOMETRY: ChangeKind = ChangeKind::new(0);

#[derive(Default)]
struct Sink(Cell<u64>);

impl DependencyObserver for Sink {
    fn dependency_dirtied(
        &self,
        _: ComponentKind,
        _: &NotificationHub,
        change: ChangeKind,
    ) -> Result<(), NotifyError> {
        self.0.set(self.0.get() + u64::from(change.index()) + 1);
        Ok(())
    }
}

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn hub_with(n: usize) -> (NotificationHub, Vec<Rc<Sink>>) {
    let hub = NotificationHub::default();
    let sinks: Vec<_> = (0..n).map(|_| Rc::new(Sink::default())).collect();
    for sink in &sinks {
        hub.attach(sink);
    }
    (hub, sinks)
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("trellis_notify");
    group.sample_size(50);

    // 0 and 1 hit the inline storage paths; the rest the list.
    for &n in &[0_usize, 1, 2, 16, 256] {
        let (hub, sinks) = hub_with(n);
        group.bench_function(format!("dirty_fan_out(n={n})"), |b| {
            b.iter(|| {
                hub.dirty(black_box(GEOMETRY)).unwrap();
            });
        });
        black_box(sinks);

        let (hub, sinks) = hub_with(n);
        let _frozen = hub.frozen();
        group.bench_function(format!("dirty_frozen(n={n})"), |b| {
            b.iter(|| {
                hub.dirty(black_box(GEOMETRY)).unwrap();
            });
        });
        black_box(sinks);
    }

    for &(n, ops) in &[(4_usize, 256_u32), (64_usize, 1_024_u32)] {
        group.bench_function(format!("attach_detach_churn(n={n},ops={ops})"), |b| {
            b.iter_batched(
                || {
                    let sinks: Vec<_> = (0..n).map(|_| Rc::new(Sink::default())).collect();
                    (NotificationHub::default(), sinks, Lcg::new(0x7E11_0000_0000_0001))
                },
                |(hub, sinks, mut rng)| {
                    for _ in 0..ops {
                        let sink = &sinks[rng.gen_range_usize(n)];
                        if rng.next_u32() % 2 == 0 {
                            hub.attach(sink);
                        } else {
                            hub.detach(sink);
                        }
                    }
                    black_box(hub.dependent_count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    for &n in &[3_usize, 64] {
        let vertices: Vec<_> = (0..n)
            .map(|i| Rc::new(Point::new((i as f64, 0.0))))
            .collect();
        let polygon = Polygon::new(vertices);
        let sink = Rc::new(Sink::default());
        polygon.hub().attach(&sink);
        group.bench_function(format!("polygon_translate(n={n})"), |b| {
            b.iter(|| {
                polygon.translate(black_box(Vec2::new(1.0, 0.0))).unwrap();
            });
        });
        black_box(sink.0.get());
    }

    group.finish();
}

criterion_group!(benches, bench_notify);
criterion_main!(benches);
