// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menus hanging off navigation bar items.
//!
//! A menu anchored to a trailing bar item right-aligns with the item. Menus do not keep a
//! selected row, and opening one cancels whatever overlay was visible.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_bar_item`

use std::collections::HashMap;

use kurbo::{Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_overlay::{Anchor, Environment, Overlay, OverlayEvent, Overlays};

struct Host {
    screen: Rect,
    frames: HashMap<&'static str, Rect>,
}

impl Environment for Host {
    type AnchorHandle = &'static str;

    fn visible_screen(&self) -> Option<Rect> {
        Some(self.screen)
    }

    fn resolve_anchor(&self, handle: &&'static str) -> Option<Rect> {
        self.frames.get(handle).copied()
    }

    fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
        8.0 * text.chars().count() as f64 + 32.0
    }
}

fn menu(
    anchor: Anchor<&'static str>,
    items: Vec<&'static str>,
) -> Overlay<&'static str, &'static str> {
    let mut menu = Overlay::new().with_anchor(anchor).with_items(items);
    // Hang below the 44 point bar.
    menu.set_bottom_offset(Vec2::new(0.0, 44.0));
    menu
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = Host {
        screen: Rect::new(0.0, 0.0, 390.0, 844.0),
        frames: HashMap::from([
            ("filter", Rect::new(16.0, 47.0, 56.0, 91.0)),
            ("more", Rect::new(334.0, 47.0, 374.0, 91.0)),
        ]),
    };

    let mut overlays = Overlays::new();
    let filter = overlays.insert(menu(
        Anchor::bar_item("filter"),
        vec!["All", "Unread", "Flagged"],
    ));
    let more = overlays.insert(menu(
        Anchor::bar_item("more"),
        vec!["Share", "Rename", "Duplicate", "Delete"],
    ));

    overlays.show(filter, &host);
    let leading = overlays.get(filter).unwrap().last_layout().unwrap();
    tracing::info!(target: "demo", frame = ?leading.frame(), "leading_menu");
    assert_eq!(leading.x, 16.0);

    overlays.show(more, &host);
    let trailing = overlays.get(more).unwrap().last_layout().unwrap();
    tracing::info!(target: "demo", frame = ?trailing.frame(), "trailing_menu");
    // Right edge lines up with the bar item's right edge.
    assert_eq!(trailing.x + trailing.width, 374.0);
    assert!(!overlays.get(filter).unwrap().is_shown());

    overlays.row_tapped(more, 3);
    assert_eq!(overlays.get(more).unwrap().selected_index(), None);

    for event in overlays.drain_events() {
        let who = if event.overlay() == filter { "filter" } else { "more" };
        match event {
            OverlayEvent::SelectionChanged { item, .. } => {
                tracing::info!(target: "demo", who, item, "picked");
            }
            OverlayEvent::Canceled(_) => tracing::info!(target: "demo", who, "canceled"),
            OverlayEvent::Hidden(_) => tracing::info!(target: "demo", who, "hidden"),
            OverlayEvent::Shown { .. } => tracing::info!(target: "demo", who, "shown"),
            _ => {}
        }
    }
}
