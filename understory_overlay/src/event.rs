// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications.
//!
//! [`Overlays`](crate::Overlays) queues an [`OverlayEvent`] for every observable transition.
//! The host drains the queue with [`Overlays::drain_events`](crate::Overlays::drain_events) and
//! applies each event to its visual surface: inserting the panel and running the entrance
//! animation on [`Shown`](OverlayEvent::Shown), moving it on
//! [`Relayout`](OverlayEvent::Relayout), running the exit animation on
//! [`Hidden`](OverlayEvent::Hidden), and so on.
//! State transitions are committed before the event is queued; nothing waits on animations.

use understory_overlay_layout::LayoutResult;

use crate::types::OverlayId;

/// A lifecycle notification.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent<T> {
    /// The overlay is about to be laid out for showing.
    WillShow(OverlayId),
    /// The overlay is now shown with this placement.
    Shown {
        /// The overlay.
        overlay: OverlayId,
        /// Where to put the panel.
        layout: LayoutResult,
    },
    /// A shown overlay was laid out again after its inputs changed.
    Relayout {
        /// The overlay.
        overlay: OverlayId,
        /// Where to move the panel.
        layout: LayoutResult,
    },
    /// The overlay left the screen.
    Hidden(OverlayId),
    /// The overlay was dismissed rather than hidden by the application: by the user, or because
    /// another overlay displaced it.
    Canceled(OverlayId),
    /// The user picked a row.
    SelectionChanged {
        /// The overlay.
        overlay: OverlayId,
        /// Row index.
        index: usize,
        /// Row item.
        item: T,
    },
    /// The highlighted row of a shown overlay changed.
    Highlight {
        /// The overlay.
        overlay: OverlayId,
        /// Highlighted row, or `None` to clear.
        row: Option<usize>,
    },
}

impl<T> OverlayEvent<T> {
    /// The overlay this event concerns.
    pub fn overlay(&self) -> OverlayId {
        match self {
            Self::WillShow(id) | Self::Hidden(id) | Self::Canceled(id) => *id,
            Self::Shown { overlay, .. }
            | Self::Relayout { overlay, .. }
            | Self::SelectionChanged { overlay, .. }
            | Self::Highlight { overlay, .. } => *overlay,
        }
    }
}
