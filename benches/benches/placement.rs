// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_overlay_layout::{
    AnchorKind, AnchorRegion, Direction, LayoutConfig, Obscuring, compute_layout,
};

const SCREEN: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Anchors scattered over the screen, about a third of them bar items.
fn gen_anchors(count: usize, seed: u64) -> Vec<AnchorRegion> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x = rng.next_f64() * (SCREEN.width() - 60.0);
        let y = rng.next_f64() * (SCREEN.height() - 44.0);
        let w = 40.0 + rng.next_f64() * 300.0;
        let kind = if rng.next_u64() % 3 == 0 {
            AnchorKind::BarItem
        } else {
            AnchorKind::Generic
        };
        out.push(AnchorRegion::new(Rect::new(x, y, x + w, y + 44.0), kind));
    }
    out
}

fn bench_directions(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let anchors = gen_anchors(1024, 0x5eed);
    for direction in [Direction::Any, Direction::Bottom, Direction::Top] {
        for &rows in &[3usize, 12, 48] {
            let config = LayoutConfig {
                direction,
                bottom_offset: Vec2::new(0.0, 44.0),
                row_count: rows,
                ..Default::default()
            };
            group.throughput(Throughput::Elements(anchors.len() as u64));
            group.bench_function(format!("{direction:?}_rows{rows}"), |b| {
                b.iter(|| {
                    let mut shown = 0_usize;
                    for a in &anchors {
                        let layout = compute_layout(
                            Some(*a),
                            &config,
                            Some(SCREEN),
                            Obscuring::NONE,
                            &mut || 180.0,
                        );
                        shown += usize::from(layout.can_be_displayed);
                    }
                    black_box(shown);
                });
            });
        }
    }
    group.finish();
}

fn bench_obscured(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout_obscured");
    let anchors = gen_anchors(1024, 0xfeed);
    let config = LayoutConfig {
        bottom_offset: Vec2::new(0.0, 44.0),
        row_count: 12,
        ..Default::default()
    };
    let keyboard = Obscuring::covering_from(520.0);
    group.throughput(Throughput::Elements(anchors.len() as u64));
    group.bench_function("keyboard_any_rows12", |b| {
        b.iter(|| {
            let mut offscreen = 0.0;
            for a in &anchors {
                offscreen += compute_layout(Some(*a), &config, Some(SCREEN), keyboard, &mut || {
                    180.0
                })
                .offscreen_height;
            }
            black_box(offscreen);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_directions, bench_obscured);
criterion_main!(benches);
