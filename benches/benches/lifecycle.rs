// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_overlay::{Anchor, Environment, Invalidation, Overlay, OverlayId, Overlays};

struct Host {
    anchors: Vec<Rect>,
}

impl Environment for Host {
    type AnchorHandle = usize;

    fn visible_screen(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 390.0, 844.0))
    }

    fn resolve_anchor(&self, handle: &usize) -> Option<Rect> {
        self.anchors.get(*handle).copied()
    }

    fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
        8.0 * text.len() as f64 + 32.0
    }
}

fn gen_host(n: usize) -> Host {
    let anchors = (0..n)
        .map(|i| {
            let y = (i as f64 * 61.0) % 800.0;
            Rect::new(16.0, y, 374.0, y + 44.0)
        })
        .collect();
    Host { anchors }
}

fn populate(host: &Host, rows: usize) -> (Overlays<String, usize>, Vec<OverlayId>) {
    let mut overlays = Overlays::new();
    let items: Vec<String> = (0..rows).map(|i| format!("Row {i}")).collect();
    let ids = (0..host.anchors.len())
        .map(|h| {
            let mut o = Overlay::new()
                .with_anchor(Anchor::view(h))
                .with_items(items.clone());
            o.set_bottom_offset(Vec2::new(0.0, 44.0));
            overlays.insert(o)
        })
        .collect();
    (overlays, ids)
}

fn bench_show_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    for &rows in &[5usize, 50] {
        let host = gen_host(64);
        group.bench_function(format!("show_displace_rows{rows}"), |b| {
            b.iter_batched(
                || populate(&host, rows),
                |(mut overlays, ids)| {
                    // Each show cancels the previous overlay.
                    for id in &ids {
                        black_box(overlays.show(*id, &host));
                    }
                    black_box(overlays.drain_events().count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    let host = gen_host(64);
    group.bench_function("flush_after_environment_change", |b| {
        b.iter_batched(
            || {
                let (mut overlays, ids) = populate(&host, 20);
                overlays.show(ids[0], &host);
                overlays.drain_events().for_each(drop);
                overlays
            },
            |mut overlays| {
                overlays.invalidate_all(Invalidation::ENVIRONMENT);
                overlays.flush_all(&host);
                black_box(overlays.drain_events().count());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_show_churn);
criterion_main!(benches);
