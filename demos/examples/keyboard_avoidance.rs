// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a visible dropdown clear of the software keyboard.
//!
//! The host forwards keyboard notifications to an [`ObscuringTracker`], invalidates every
//! overlay, and flushes once per frame. A dropdown that still fits one row becomes scrollable;
//! one that does not is hidden.
//!
//! Run:
//! - `cargo run -p understory_demos --example keyboard_avoidance`

use kurbo::{Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_overlay::{
    Anchor, Direction, Environment, Invalidation, Obscuring, ObscuringTracker, Overlay, Overlays,
};

struct Host {
    screen: Rect,
    search_field: Rect,
    keyboard: ObscuringTracker,
}

impl Environment for Host {
    type AnchorHandle = ();

    fn visible_screen(&self) -> Option<Rect> {
        Some(self.screen)
    }

    fn resolve_anchor(&self, _handle: &()) -> Option<Rect> {
        Some(self.search_field)
    }

    fn obscuring(&self) -> Obscuring {
        self.keyboard.signal()
    }

    fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
        8.0 * text.chars().count() as f64 + 32.0
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut host = Host {
        screen: Rect::new(0.0, 0.0, 390.0, 844.0),
        search_field: Rect::new(16.0, 100.0, 374.0, 144.0),
        keyboard: ObscuringTracker::new(),
    };

    let suggestions: Vec<String> = (1..=8).map(|i| format!("Suggestion {i}")).collect();
    let mut dropdown = Overlay::new()
        .with_anchor(Anchor::view(()))
        .with_items(suggestions);
    dropdown.set_direction(Direction::Bottom);
    dropdown.set_bottom_offset(Vec2::new(0.0, 44.0));

    let mut overlays = Overlays::new();
    let id = overlays.insert(dropdown);
    overlays.show(id, &host);
    let before = overlays.get(id).unwrap().last_layout().unwrap();
    tracing::info!(
        target: "demo",
        visible = before.visible_height,
        scrollable = before.is_scrollable(),
        "no_keyboard"
    );

    // Rows span 144..496. A keyboard from 420 leaves room down to 400.
    host.keyboard.will_show(Rect::new(0.0, 420.0, 390.0, 844.0));
    overlays.invalidate_all(Invalidation::ENVIRONMENT);
    overlays.flush_all(&host);
    let tall = overlays.get(id).unwrap().last_layout().unwrap();
    tracing::info!(
        target: "demo",
        visible = tall.visible_height,
        scrollable = tall.is_scrollable(),
        "tall_keyboard"
    );
    assert!(overlays.get(id).unwrap().is_shown());
    assert!(tall.is_scrollable());

    // Only 16 points remain below the field: not even one row.
    host.keyboard.will_show(Rect::new(0.0, 180.0, 390.0, 844.0));
    overlays.invalidate_all(Invalidation::ENVIRONMENT);
    overlays.flush_all(&host);
    tracing::info!(
        target: "demo",
        shown = overlays.get(id).unwrap().is_shown(),
        "huge_keyboard"
    );
    assert_eq!(overlays.visible(), None);

    host.keyboard.will_hide(Rect::new(0.0, 844.0, 390.0, 1268.0));
    let outcome = overlays.show(id, &host);
    tracing::info!(target: "demo", shown = outcome.displayed, "keyboard_gone");
    assert!(outcome.displayed);

    for event in overlays.drain_events() {
        tracing::info!(target: "demo", ?event, "event");
    }
}
