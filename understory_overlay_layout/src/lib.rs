// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay_layout --heading-base-level=0

//! Understory Overlay Layout: Kurbo-native placement for anchored overlays.
//!
//! This crate answers one question for dropdowns, menus, and popovers: given an anchor rectangle,
//! a list of rows, and the current screen, where does the panel go and does it fit at all?
//!
//! - Chooses between showing the panel below or above its anchor ([`Direction`]).
//! - Measures how much of the content would fall off screen, or under an obscuring region such as a
//!   software keyboard ([`Obscuring`]).
//! - Widens narrow panels to their content, and shifts or shrinks panels that bleed off the right edge.
//! - Reports a [`LayoutResult`] whose [`can_be_displayed`](LayoutResult::can_be_displayed) is the
//!   verdict: at least one full row must be visible.
//!
//! ## Not a lifecycle
//!
//! Layout is a pure function of its inputs.
//! It does not track which overlay is visible, does not hold selection, and never mutates the
//! caller's configuration: the requested [`LayoutConfig::direction`] stays as the caller set it and
//! the winning direction is reported separately in [`LayoutResult::resolved_direction`].
//! See `understory_overlay` for the show/hide/cancel state machine built on top of this crate.
//!
//! ## Content width
//!
//! When no explicit width is configured, the panel must be at least as wide as its widest row.
//! Measuring rows is the caller's business, so the engine asks a [`FittingWidth`] for the value.
//! It asks lazily and at most once per pass; any `FnMut() -> f64` closure works.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use understory_overlay_layout::{
//!     AnchorKind, AnchorRegion, Direction, LayoutConfig, Obscuring, compute_layout,
//! };
//!
//! let screen = Rect::new(0.0, 0.0, 400.0, 800.0);
//! // A button near the bottom of the screen.
//! let anchor = AnchorRegion::new(Rect::new(20.0, 700.0, 220.0, 740.0), AnchorKind::Generic);
//! let config = LayoutConfig {
//!     bottom_offset: Vec2::new(0.0, 40.0),
//!     row_height: 44.0,
//!     row_count: 5,
//!     ..Default::default()
//! };
//!
//! let layout = compute_layout(Some(anchor), &config, Some(screen), Obscuring::NONE, &mut || 120.0);
//!
//! // There is no room below, so the panel flips above the anchor.
//! assert_eq!(layout.resolved_direction, Direction::Top);
//! assert_eq!(layout.offscreen_height, 0.0);
//! assert!(layout.can_be_displayed);
//! // The caller's intent is untouched.
//! assert_eq!(config.direction, Direction::Any);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{FittingWidth, compute_layout};
pub use error::LayoutError;
pub use types::{
    AnchorKind, AnchorRegion, DEFAULT_ROW_HEIGHT, Direction, EDGE_PADDING, LayoutConfig,
    LayoutResult, Obscuring,
};
