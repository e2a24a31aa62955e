// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: dropdowns and menus with a single-visible lifecycle.
//!
//! An overlay is a panel of selectable rows anchored to a view or a bar item.
//! This crate owns what happens around the placement computed by [`understory_overlay_layout`]:
//!
//! - At most one overlay is visible at a time. Showing a second one cancels the first.
//! - Every show runs a layout pass; an overlay that cannot fit one row is not shown and the caller
//!   learns how much did not fit.
//! - Row selection survives hiding, is cleared when the rows change, and is dropped right away for
//!   menus anchored to bar items.
//! - Interactions outside the panel dismiss it according to its [`DismissMode`].
//!
//! ## Where this fits
//!
//! The crate is headless. The host supplies geometry and text measurement through
//! [`Environment`], and receives [`OverlayEvent`]s describing what to put on screen.
//! Nothing here draws, animates, or subscribes to platform notifications.
//!
//! ## API overview
//!
//! - [`Overlays`]: container and lifecycle service. Owns the overlays, the
//!   [`VisibilityRegistry`], and the event queue.
//! - [`Overlay`]: one overlay's configuration, rows, and selection.
//! - [`OverlayId`]: generational handle of an overlay.
//! - [`Anchor`]: what an overlay is attached to.
//! - [`Invalidation`]: why a layout pass is pending.
//!
//! Key operations:
//! - [`Overlays::show`] → [`ShowOutcome`]; [`Overlays::hide`]; [`Overlays::cancel`].
//! - [`Overlays::select_row_at`], [`Overlays::deselect_row_at`], [`Overlays::row_tapped`].
//! - [`Overlays::flush`]: run deferred layout after setters or environment changes.
//! - [`Overlays::interact`]: route a pointer interaction through the modal backdrop.
//! - [`Overlays::drain_events`]: take the queued [`OverlayEvent`]s.
//!
//! ### Minimal usage
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use understory_overlay::{Anchor, Environment, Overlay, OverlayEvent, Overlays};
//!
//! struct Host;
//!
//! impl Environment for Host {
//!     type AnchorHandle = &'static str;
//!
//!     fn visible_screen(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 400.0, 800.0))
//!     }
//!
//!     fn resolve_anchor(&self, handle: &&'static str) -> Option<Rect> {
//!         (*handle == "currency").then(|| Rect::new(20.0, 100.0, 220.0, 140.0))
//!     }
//!
//!     fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
//!         8.0 * text.len() as f64
//!     }
//! }
//!
//! let mut overlays = Overlays::new();
//! let mut dropdown = Overlay::new()
//!     .with_anchor(Anchor::view("currency"))
//!     .with_items(vec!["EUR", "USD", "UAH"]);
//! dropdown.set_bottom_offset(Vec2::new(0.0, 40.0));
//! let id = overlays.insert(dropdown);
//!
//! assert!(overlays.show(id, &Host).displayed);
//! assert_eq!(overlays.visible(), Some(id));
//!
//! // The user picks "USD".
//! overlays.row_tapped(id, 1);
//! assert_eq!(overlays.get(id).unwrap().selected_item(), Some(&"USD"));
//! assert_eq!(overlays.visible(), None);
//!
//! let picked = overlays.drain_events().find_map(|event| match event {
//!     OverlayEvent::SelectionChanged { item, .. } => Some(item),
//!     _ => None,
//! });
//! assert_eq!(picked, Some("USD"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod anchor;
pub mod environment;
pub mod error;
pub mod event;
pub mod overlay;
pub mod overlays;
pub mod registry;
pub mod selection;
pub mod types;

pub use anchor::Anchor;
pub use environment::{Environment, ObscuringTracker};
pub use error::OverlayError;
pub use event::OverlayEvent;
pub use overlay::{Overlay, RowFormatter};
pub use overlays::Overlays;
pub use registry::VisibilityRegistry;
pub use selection::SelectionState;
pub use types::{
    DismissMode, Interaction, InteractionOutcome, Invalidation, OverlayId, OverlayState,
    ShowOutcome,
};

pub use understory_overlay_layout::{
    AnchorKind, Direction, LayoutConfig, LayoutError, LayoutResult, Obscuring,
};
