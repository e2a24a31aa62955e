// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility registry: which overlay is on screen.
//!
//! ## Overview
//!
//! At most one overlay is shown at a time. The registry remembers which one as a plain
//! [`OverlayId`]; it never owns the overlay. An overlay may be removed from its container without
//! anyone releasing the slot, so readers must check the id for liveness before using it.
//! [`Overlays::visible`](crate::Overlays::visible) does exactly that and treats a stale occupant
//! as empty.

use crate::types::OverlayId;

/// Single-slot record of the shown overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityRegistry {
    occupant: Option<OverlayId>,
}

impl VisibilityRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self { occupant: None }
    }

    /// The recorded occupant, without a liveness check.
    pub fn occupant(&self) -> Option<OverlayId> {
        self.occupant
    }

    /// Record `id` as the occupant, replacing any previous one.
    pub fn occupy(&mut self, id: OverlayId) {
        self.occupant = Some(id);
    }

    /// Clear the slot if `id` occupies it. Returns true if it did.
    ///
    /// Releasing an overlay that is not the occupant leaves the slot alone, so hiding an
    /// already-hidden overlay cannot evict the one on screen.
    pub fn release(&mut self, id: OverlayId) -> bool {
        if self.occupant == Some(id) {
            self.occupant = None;
            true
        } else {
            false
        }
    }

    /// Clear the slot unconditionally.
    pub fn clear(&mut self) {
        self.occupant = None;
    }
}
