// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities consumed by overlays.
//!
//! ## Overview
//!
//! Overlays do not talk to a windowing system. Everything they need from the host goes through
//! [`Environment`]:
//!
//! - the bounds of the visible screen, if there is one;
//! - the current frame of an anchor handle, if the anchor still exists;
//! - the latest obscuring-region signal (see [`ObscuringTracker`]);
//! - the width of a rendered row.
//!
//! All of these are read at layout time. Nothing is cached between passes.

use kurbo::Rect;
use understory_overlay_layout::Obscuring;

/// Capabilities the host provides to overlays.
pub trait Environment {
    /// Host handle for anchors, such as a widget id.
    type AnchorHandle;

    /// Bounds of the active display surface, or `None` when there is no visible window.
    fn visible_screen(&self) -> Option<Rect>;

    /// Current window-space frame of an anchor, or `None` if the anchor is gone.
    fn resolve_anchor(&self, handle: &Self::AnchorHandle) -> Option<Rect>;

    /// Latest obscuring-region signal. Defaults to none.
    fn obscuring(&self) -> Obscuring {
        Obscuring::NONE
    }

    /// Width needed to render a row showing `text` at `row_height` without clipping.
    fn measure_row(&self, text: &str, row_height: f64) -> f64;
}

/// Tracks a software keyboard, or any other surface that slides over the bottom of the screen.
///
/// Feed it from the host's keyboard notifications and hand [`ObscuringTracker::signal`] to the
/// layout through [`Environment::obscuring`]. After a change, call
/// [`Overlays::invalidate_all`](crate::Overlays::invalidate_all) with
/// [`Invalidation::ENVIRONMENT`](crate::Invalidation::ENVIRONMENT) so shown overlays are laid
/// out again on the next flush.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ObscuringTracker {
    visible: bool,
    frame: Rect,
}

impl ObscuringTracker {
    /// A tracker with no visible region.
    pub const fn new() -> Self {
        Self {
            visible: false,
            frame: Rect::ZERO,
        }
    }

    /// The region is about to appear with the given final frame.
    pub fn will_show(&mut self, frame: Rect) {
        self.visible = true;
        self.frame = frame;
        tracing::debug!(target: "overlay.environment", top = frame.min_y(), "obscuring_will_show");
    }

    /// The region is about to disappear; `frame` is its final frame.
    pub fn will_hide(&mut self, frame: Rect) {
        self.visible = false;
        self.frame = frame;
        tracing::debug!(target: "overlay.environment", "obscuring_will_hide");
    }

    /// Whether the region is on screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last reported frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Signal for the layout engine.
    pub fn signal(&self) -> Obscuring {
        Obscuring {
            active: self.visible,
            top_edge: self.frame.min_y(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use alloc::vec::Vec;

    use super::*;

    /// Fixed screen, anchors by id, and rows ten units per character.
    #[derive(Clone, Debug)]
    pub(crate) struct TestEnv {
        pub(crate) screen: Option<Rect>,
        pub(crate) anchors: Vec<(u32, Rect)>,
        pub(crate) obscuring: ObscuringTracker,
    }

    impl TestEnv {
        pub(crate) fn new(screen: Rect) -> Self {
            Self {
                screen: Some(screen),
                anchors: Vec::new(),
                obscuring: ObscuringTracker::new(),
            }
        }

        pub(crate) fn with_anchor(mut self, id: u32, frame: Rect) -> Self {
            self.anchors.push((id, frame));
            self
        }
    }

    impl Environment for TestEnv {
        type AnchorHandle = u32;

        fn visible_screen(&self) -> Option<Rect> {
            self.screen
        }

        fn resolve_anchor(&self, handle: &u32) -> Option<Rect> {
            self.anchors
                .iter()
                .find(|(id, _)| id == handle)
                .map(|(_, frame)| *frame)
        }

        fn obscuring(&self) -> Obscuring {
            self.obscuring.signal()
        }

        fn measure_row(&self, text: &str, _row_height: f64) -> f64 {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Test strings are short."
            )]
            let chars = text.chars().count() as f64;
            chars * 10.0
        }
    }
}
