// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A currency dropdown: show, pick a row, show again.
//!
//! The dropdown sits under a form field near the bottom of the screen, so it flips above the
//! field. Picking a row hides it and keeps the selection for the next time it opens.
//!
//! Run:
//! - `cargo run -p understory_demos --example dropdown_basics`
//! - `RUST_LOG=overlay=trace cargo run -p understory_demos --example dropdown_basics`

use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_overlay::{
    Anchor, Direction, Environment, Interaction, InteractionOutcome, Overlay, OverlayEvent,
    Overlays,
};

struct Host {
    screen: Rect,
    field: Rect,
}

impl Environment for Host {
    type AnchorHandle = &'static str;

    fn visible_screen(&self) -> Option<Rect> {
        Some(self.screen)
    }

    fn resolve_anchor(&self, handle: &&'static str) -> Option<Rect> {
        (*handle == "currency_field").then_some(self.field)
    }

    fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
        // Fixed-pitch font plus horizontal insets.
        8.0 * text.chars().count() as f64 + 32.0
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Currency {
    code: &'static str,
    name: &'static str,
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

fn log_events(overlays: &mut Overlays<Currency, &'static str>) {
    for event in overlays.drain_events() {
        match event {
            OverlayEvent::Shown { layout, .. } | OverlayEvent::Relayout { layout, .. } => {
                tracing::info!(
                    target: "demo",
                    frame = ?layout.frame(),
                    direction = ?layout.resolved_direction,
                    "{}",
                    event_name(&event)
                );
            }
            other => tracing::info!(target: "demo", event = ?other, "{}", event_name(&other)),
        }
    }
}

fn event_name<T>(event: &OverlayEvent<T>) -> &'static str {
    match event {
        OverlayEvent::WillShow(_) => "WillShow",
        OverlayEvent::Shown { .. } => "Shown",
        OverlayEvent::Relayout { .. } => "Relayout",
        OverlayEvent::Hidden(_) => "Hidden",
        OverlayEvent::Canceled(_) => "Canceled",
        OverlayEvent::SelectionChanged { .. } => "SelectionChanged",
        OverlayEvent::Highlight { .. } => "Highlight",
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = Host {
        screen: Rect::new(0.0, 0.0, 390.0, 844.0),
        field: Rect::new(16.0, 720.0, 374.0, 764.0),
    };

    let currencies = vec![
        Currency {
            code: "EUR",
            name: "Euro",
        },
        Currency {
            code: "USD",
            name: "US Dollar",
        },
        Currency {
            code: "UAH",
            name: "Ukrainian Hryvnia",
        },
        Currency {
            code: "GBP",
            name: "Pound Sterling",
        },
    ];

    let mut dropdown = Overlay::new()
        .with_anchor(Anchor::view("currency_field"))
        .with_items(currencies.clone());
    // Below the field rather than over it.
    dropdown.set_bottom_offset(Vec2::new(0.0, host.field.height()));

    let mut overlays = Overlays::new();
    let id = overlays.insert(dropdown);

    tracing::info!(target: "demo", "open");
    let outcome = overlays.show(id, &host);
    log_events(&mut overlays);
    assert!(outcome.displayed);
    let layout = overlays.get(id).unwrap().last_layout().unwrap();
    assert_eq!(layout.resolved_direction, Direction::Top);
    assert_eq!(overlays.get(id).unwrap().direction(), Direction::Any);

    tracing::info!(target: "demo", "pick_uah");
    assert!(overlays.row_tapped(id, 2));
    log_events(&mut overlays);
    assert_eq!(overlays.visible(), None);

    tracing::info!(target: "demo", "open_again");
    overlays.show(id, &host);
    log_events(&mut overlays);
    let selected = overlays.get(id).unwrap().selected_item().cloned();
    if let Some(currency) = &selected {
        tracing::info!(target: "demo", %currency, "selection_restored");
    }
    assert_eq!(selected, Some(currencies[2].clone()));

    tracing::info!(target: "demo", "tap_outside");
    let outcome = overlays.interact(id, Point::new(200.0, 100.0), Interaction::Tap);
    log_events(&mut overlays);
    tracing::info!(target: "demo", ?outcome, "interaction");
    assert_eq!(outcome, InteractionOutcome::Dismissed);
}
