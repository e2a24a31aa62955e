// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchors: the screen elements overlays attach to.

use understory_overlay_layout::{AnchorKind, AnchorRegion};

use crate::environment::Environment;
use crate::error::OverlayError;

/// An anchor, wrapping a host handle `H` that the [`Environment`] can resolve to a frame.
///
/// The two variants resolve the same way; they differ in placement (trailing bar items
/// right-align their overlay) and in selection (bar items behave like menus and do not keep a
/// selected row).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor<H> {
    /// An ordinary view.
    View(H),
    /// An item in a navigation or tool bar.
    BarItem(H),
}

impl<H> Anchor<H> {
    /// Anchor to an ordinary view.
    pub fn view(handle: H) -> Self {
        Self::View(handle)
    }

    /// Anchor to a bar item.
    pub fn bar_item(handle: H) -> Self {
        Self::BarItem(handle)
    }

    /// Anchor to an ordinary view looked up by the host, rejecting a missing handle.
    pub fn try_view(handle: Option<H>) -> Result<Self, OverlayError> {
        handle.map(Self::View).ok_or(OverlayError::MissingAnchor)
    }

    /// Anchor to a bar item looked up by the host, rejecting a missing handle.
    pub fn try_bar_item(handle: Option<H>) -> Result<Self, OverlayError> {
        handle.map(Self::BarItem).ok_or(OverlayError::MissingAnchor)
    }

    /// The host handle.
    pub fn handle(&self) -> &H {
        match self {
            Self::View(h) | Self::BarItem(h) => h,
        }
    }

    /// Layout flavor of this anchor.
    pub fn kind(&self) -> AnchorKind {
        match self {
            Self::View(_) => AnchorKind::Generic,
            Self::BarItem(_) => AnchorKind::BarItem,
        }
    }

    /// True for anchors whose overlays act as menus.
    pub fn is_menu(&self) -> bool {
        matches!(self, Self::BarItem(_))
    }

    /// Resolve the anchor's current frame, or `None` if the host no longer has it.
    pub fn resolve<E>(&self, env: &E) -> Option<AnchorRegion>
    where
        E: Environment<AnchorHandle = H> + ?Sized,
    {
        env.resolve_anchor(self.handle())
            .map(|frame| AnchorRegion::new(frame, self.kind()))
    }
}
