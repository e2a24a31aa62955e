// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for overlays: identifiers, states, flags, and outcomes.

/// Identifier for an overlay held by [`Overlays`](crate::Overlays).
///
/// This is a small, copyable handle that stays stable while the overlay lives but becomes
/// invalid once the overlay is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `OverlayId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `OverlayId`.
///
/// ### Liveness
///
/// Use [`Overlays::is_alive`](crate::Overlays::is_alive) to check whether an `OverlayId` still
/// refers to a live overlay. Stale ids never alias a different live overlay because the
/// generation must match. The [visibility registry](crate::registry::VisibilityRegistry) relies on
/// this to hold ids without owning overlays.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(pub(crate) u32, pub(crate) u32);

impl OverlayId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Visibility state of a single overlay.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum OverlayState {
    /// Not on screen. Every overlay starts here.
    #[default]
    Hidden,
    /// On screen and occupying the visibility registry.
    Shown,
}

/// How the user can dismiss an overlay by interacting outside of it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissMode {
    /// A completed tap outside the overlay dismisses it.
    #[default]
    OnTap,
    /// Any interaction outside the overlay dismisses it, without waiting for a tap.
    Automatic,
    /// The user cannot dismiss the overlay; only the application hides it.
    Manual,
}

/// Kind of pointer interaction routed to an overlay.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Interaction {
    /// A pointer went down, or any other raw contact.
    Press,
    /// A completed tap gesture.
    Tap,
}

/// What happened to an interaction routed through [`Overlays::interact`](crate::Overlays::interact).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InteractionOutcome {
    /// The overlay is not on screen; the interaction belongs to whatever is underneath.
    PassThrough,
    /// The interaction landed on the overlay's rows; deliver it to the content.
    Forward,
    /// The interaction landed outside and the modal backdrop swallowed it.
    Absorbed,
    /// The interaction landed outside and canceled the overlay.
    Dismissed,
}

/// Result of [`Overlays::show`](crate::Overlays::show).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShowOutcome {
    /// Whether the overlay is now shown.
    pub displayed: bool,
    /// Height that did not fit when the overlay could not be shown; zero otherwise.
    pub offscreen_height: f64,
}

impl ShowOutcome {
    pub(crate) const SHOWN: Self = Self {
        displayed: true,
        offscreen_height: 0.0,
    };

    pub(crate) const fn rejected(offscreen_height: f64) -> Self {
        Self {
            displayed: false,
            offscreen_height,
        }
    }
}

bitflags::bitflags! {
    /// Reasons an overlay needs a new layout pass.
    ///
    /// Setters on [`Overlay`](crate::Overlay) record these; the pass itself is deferred until
    /// [`Overlays::flush`](crate::Overlays::flush) so that several changes coalesce into one.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The anchor changed.
        const ANCHOR      = 0b0000_0001;
        /// The top or bottom offset changed.
        const OFFSETS     = 0b0000_0010;
        /// The explicit width changed.
        const WIDTH       = 0b0000_0100;
        /// The requested direction changed.
        const DIRECTION   = 0b0000_1000;
        /// The row height changed.
        const ROW_HEIGHT  = 0b0001_0000;
        /// The rows or their formatting changed.
        const DATASET     = 0b0010_0000;
        /// The screen or an obscuring region changed.
        const ENVIRONMENT = 0b0100_0000;
    }
}
